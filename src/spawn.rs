/// Timers that decide when new enemies and pickups enter the world.
///
/// The scheduler only decides *what* to spawn; building the entity is left
/// to `Enemy::spawn` / `Pickup::spawn`, so each decision can be tested on
/// its own with a seeded RNG.

use rand::Rng;

use crate::config::SpawnConfig;
use crate::entities::{EnemyClass, PickupKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnRequest {
    Enemy(EnemyClass),
    Pickup(PickupKind),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnScheduler {
    pub enemy_timer_ms: f64,
    pub pickup_timer_ms: f64,
    enemy_interval_ms: f64,
    pickup_interval_ms: f64,
    pickup_chance: f64,
}

impl SpawnScheduler {
    pub fn new(config: &SpawnConfig) -> Self {
        SpawnScheduler {
            enemy_timer_ms: 0.0,
            pickup_timer_ms: 0.0,
            enemy_interval_ms: config.enemy_interval_ms,
            pickup_interval_ms: config.pickup_interval_ms,
            pickup_chance: config.pickup_chance,
        }
    }

    /// Run both timers for one tick and return what should spawn, in order.
    pub fn tick(
        &mut self,
        delta_ms: f64,
        scroll_speed: f64,
        rng: &mut impl Rng,
    ) -> Vec<SpawnRequest> {
        let mut requests = Vec::new();

        // ── Enemies ──────────────────────────────────────────────────────────
        if self.enemy_timer_ms > self.enemy_interval_ms {
            // Ground and climbing enemies only appear while the world moves.
            if scroll_speed > 0.0 {
                let class = if rng.gen_bool(0.5) {
                    EnemyClass::Ground
                } else {
                    EnemyClass::Climbing
                };
                requests.push(SpawnRequest::Enemy(class));
            }
            requests.push(SpawnRequest::Enemy(EnemyClass::Flying));
            self.enemy_timer_ms = 0.0;
        } else {
            self.enemy_timer_ms += delta_ms.max(0.0);
        }

        // ── Pickups ──────────────────────────────────────────────────────────
        if self.pickup_timer_ms > self.pickup_interval_ms {
            if rng.gen_bool(self.pickup_chance) {
                requests.push(SpawnRequest::Pickup(PickupKind::Restorative));
            }
            self.pickup_timer_ms = 0.0;
        } else {
            self.pickup_timer_ms += delta_ms.max(0.0);
        }

        requests
    }
}
