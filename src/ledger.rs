/// Lives, energy, score and time: the resources that decide win or loss.

use tracing::warn;

use crate::config::GameConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct ResourceLedger {
    pub lives: u32,
    pub max_lives: u32,
    /// Never negative; no upper bound.
    pub energy: f64,
    pub energy_regen_per_ms: f64,
    /// May go negative.
    pub score: i64,
    pub elapsed_ms: f64,
    pub enemies_destroyed: u32,
    pub pickups_collected: u32,
    /// Current world drift, derived from the player's state.
    pub scroll_speed: f64,
    pub max_scroll_speed: f64,
}

impl ResourceLedger {
    pub fn new(config: &GameConfig) -> Self {
        let mut lives = config.ledger.start_lives;
        if lives > config.ledger.max_lives {
            warn!(lives, max_lives = config.ledger.max_lives, "start_lives clamped");
            lives = config.ledger.max_lives;
        }
        ResourceLedger {
            lives,
            max_lives: config.ledger.max_lives,
            energy: config.ledger.start_energy.max(0.0),
            energy_regen_per_ms: config.ledger.energy_regen_per_ms,
            score: 0,
            elapsed_ms: 0.0,
            enemies_destroyed: 0,
            pickups_collected: 0,
            scroll_speed: 0.0,
            max_scroll_speed: config.world.max_scroll_speed,
        }
    }

    /// Advance the clock and regenerate energy.
    pub fn advance(&mut self, delta_ms: f64) {
        let delta_ms = delta_ms.max(0.0);
        self.elapsed_ms += delta_ms;
        self.add_energy(delta_ms * self.energy_regen_per_ms);
    }

    pub fn set_scroll_multiplier(&mut self, multiplier: f64) {
        self.scroll_speed = self.max_scroll_speed * multiplier;
    }

    pub fn add_energy(&mut self, amount: f64) {
        self.energy = (self.energy + amount).max(0.0);
    }

    pub fn drain_energy(&mut self, amount: f64) {
        self.energy = (self.energy - amount).max(0.0);
    }

    pub fn add_score(&mut self, points: i64) {
        self.score += points;
    }

    /// Returns the lives left.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn gain_life(&mut self) {
        self.lives = (self.lives + 1).min(self.max_lives);
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }
}
