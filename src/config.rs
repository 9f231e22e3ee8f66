/// Tunable constants for the simulation.
///
/// Every field has a default matching the stock game, so a config file only
/// needs to list the values it changes.  Loading goes through `toml`; any
/// section or key left out falls back to `Default`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ── World ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    /// Distance between the bottom of the world and the ground line.
    pub ground_margin: f64,
    /// Scroll speed at multiplier 1.
    pub max_scroll_speed: f64,
    pub winning_score: i64,
    /// Elapsed time (ms) after which the run ends.
    pub max_time_ms: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            width: 900.0,
            height: 500.0,
            ground_margin: 80.0,
            max_scroll_speed: 5.0,
            winning_score: 40,
            max_time_ms: 100_000.0,
        }
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f64,
    pub height: f64,
    pub max_speed_x: f64,
    /// Downward acceleration added per tick while airborne.
    pub weight: f64,
    pub jump_impulse: f64,
    pub dive_speed: f64,
    pub fps: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            width: 100.0,
            height: 91.3,
            max_speed_x: 10.0,
            weight: 1.0,
            jump_impulse: 27.0,
            dive_speed: 15.0,
            fps: 20.0,
        }
    }
}

// ── Resources ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub start_lives: u32,
    pub max_lives: u32,
    pub start_energy: f64,
    /// Energy regained per elapsed millisecond.
    pub energy_regen_per_ms: f64,
    /// Energy spent per animation frame while rolling.
    pub rolling_cost: f64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            start_lives: 3,
            max_lives: 10,
            start_energy: 5.0,
            energy_regen_per_ms: 0.001,
            rolling_cost: 0.25,
        }
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Shape of a pickup's vertical drift.
///
/// With probability `still_chance` the pickup does not drift.  Otherwise it
/// rises with probability `rise_chance`, drawing from `rise`, and sinks
/// otherwise, drawing from `sink`.  Ranges are half-open.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    pub still_chance: f64,
    pub rise_chance: f64,
    pub rise: (f64, f64),
    pub sink: (f64, f64),
}

impl Default for DriftConfig {
    fn default() -> Self {
        DriftConfig {
            still_chance: 0.5,
            rise_chance: 0.5,
            rise: (-1.0, 0.0),
            sink: (1.0, 2.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub enemy_interval_ms: f64,
    pub pickup_interval_ms: f64,
    pub pickup_chance: f64,
    pub pickup_drift: DriftConfig,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            enemy_interval_ms: 1000.0,
            pickup_interval_ms: 5000.0,
            pickup_chance: 0.5,
            pickup_drift: DriftConfig::default(),
        }
    }
}

// ── Effects ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub max_particles: usize,
    /// Ticks a floating message stays alive.
    pub message_lifetime: u32,
    /// Fraction of the remaining distance a dynamic message covers per tick.
    pub message_easing: f64,
    pub splash_count: usize,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        EffectsConfig {
            max_particles: 50,
            message_lifetime: 100,
            message_easing: 0.03,
            splash_count: 30,
        }
    }
}

// ── Root ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub ledger: LedgerConfig,
    pub spawn: SpawnConfig,
    pub effects: EffectsConfig,
    /// Seed for the simulation RNG.  `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Ground line for a body of the given height.
    pub fn ground_y(&self, body_height: f64) -> f64 {
        self.world.height - body_height - self.world.ground_margin
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world.width", self.world.width)?;
        positive("world.height", self.world.height)?;
        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        positive("player.fps", self.player.fps)?;
        positive("spawn.enemy_interval_ms", self.spawn.enemy_interval_ms)?;
        positive("spawn.pickup_interval_ms", self.spawn.pickup_interval_ms)?;
        probability("spawn.pickup_chance", self.spawn.pickup_chance)?;
        probability("spawn.pickup_drift.still_chance", self.spawn.pickup_drift.still_chance)?;
        probability("spawn.pickup_drift.rise_chance", self.spawn.pickup_drift.rise_chance)?;
        range("spawn.pickup_drift.rise", self.spawn.pickup_drift.rise)?;
        range("spawn.pickup_drift.sink", self.spawn.pickup_drift.sink)?;
        non_negative("ledger.start_energy", self.ledger.start_energy)?;
        non_negative("ledger.energy_regen_per_ms", self.ledger.energy_regen_per_ms)?;
        non_negative("ledger.rolling_cost", self.ledger.rolling_cost)?;

        if self.player.width > self.world.width {
            return Err(invalid("player.width", "wider than the world"));
        }
        if self.world.ground_margin < 0.0 || self.ground_y(self.player.height) < 0.0 {
            return Err(invalid("world.ground_margin", "ground line lies outside the world"));
        }
        if self.ledger.max_lives == 0 {
            return Err(invalid("ledger.max_lives", "must be at least 1"));
        }
        if self.ledger.start_lives > self.ledger.max_lives {
            return Err(invalid("ledger.start_lives", "exceeds ledger.max_lives"));
        }
        if !(0.0..1.0).contains(&self.effects.message_easing) {
            return Err(invalid("effects.message_easing", "must be in [0, 1)"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive number"))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be zero or more"))
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, "must be within [0, 1]"))
    }
}

fn range(field: &'static str, (lo, hi): (f64, f64)) -> Result<(), ConfigError> {
    if lo < hi {
        Ok(())
    } else {
        Err(invalid(field, "lower bound must be below upper bound"))
    }
}
