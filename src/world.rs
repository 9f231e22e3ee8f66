/// Storage owned by the game loop and the narrow view of it handed to the
/// player each tick.

use rand::Rng;

use crate::config::GameConfig;
use crate::effects::{CollisionFlash, FloatingMessage, Particle};
use crate::entities::{Enemy, Pickup};
use crate::ledger::ResourceLedger;
use crate::pool::EntityPool;

#[derive(Clone, Debug, Default)]
pub struct Pools {
    pub enemies: EntityPool<Enemy>,
    pub pickups: EntityPool<Pickup>,
    /// Newest first.
    pub particles: EntityPool<Particle>,
    pub flashes: EntityPool<CollisionFlash>,
    pub messages: EntityPool<FloatingMessage>,
}

impl Pools {
    pub fn update(&mut self, delta_ms: f64, scroll_speed: f64, config: &GameConfig) {
        self.enemies
            .update_all(|enemy| enemy.update(delta_ms, scroll_speed, config));
        self.pickups
            .update_all(|pickup| pickup.update(delta_ms, scroll_speed));
        self.messages.update_all(|message| message.update());
        self.particles
            .update_all(|particle| particle.update(scroll_speed));
        self.particles.truncate(config.effects.max_particles);
        self.flashes
            .update_all(|flash| flash.update(delta_ms, scroll_speed));
    }

    /// Drop every marked entity from every pool.  Returns the total removed.
    pub fn compact(&mut self) -> usize {
        self.enemies.compact()
            + self.pickups.compact()
            + self.messages.compact()
            + self.particles.compact()
            + self.flashes.compact()
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
        self.pickups.clear();
        self.particles.clear();
        self.flashes.clear();
        self.messages.clear();
    }
}

/// What the player may touch during its update.
pub struct TickContext<'a, R: Rng> {
    pub ledger: &'a mut ResourceLedger,
    pub pools: &'a mut Pools,
    pub config: &'a GameConfig,
    pub rng: &'a mut R,
    /// Disables game over and rolling energy cost.
    pub debug: bool,
}
