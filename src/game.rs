/// The per-tick orchestrator.
///
/// `Game` owns the ledger, the player, every entity pool and the RNG.  One
/// call to `update` runs a full tick in a fixed order:
///
/// 1. ledger clock and energy regeneration (and the time-out check)
/// 2. player: collisions, input, physics, animation
/// 3. spawn timers
/// 4. every pool's own update
/// 5. compaction of every pool
///
/// All randomness flows through the owned RNG, so a seeded game replays
/// identically given the same deltas and inputs.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::GameConfig;
use crate::effects::CollisionFlash;
use crate::entities::{Enemy, Pickup};
use crate::error::ConfigError;
use crate::input::{ActionSet, Command};
use crate::ledger::ResourceLedger;
use crate::player::Player;
use crate::pool::Expire;
use crate::render::{Hud, Surface, TextStyle};
use crate::spawn::{SpawnRequest, SpawnScheduler};
use crate::world::{Pools, TickContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    OutOfLives,
    OutOfTime,
}

pub struct Game {
    pub config: GameConfig,
    pub ledger: ResourceLedger,
    pub player: Player,
    pub pools: Pools,
    pub spawner: SpawnScheduler,
    pub status: GameStatus,
    pub paused: bool,
    pub debug: bool,
    pub audio_on: bool,
    rng: StdRng,
}

impl Game {
    /// Seeds from `config.seed`, or from entropy when unset.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Every tick assumes a validated config, so it is checked here once.
    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Game {
            ledger: ResourceLedger::new(&config),
            player: Player::new(&config),
            pools: Pools::default(),
            spawner: SpawnScheduler::new(&config.spawn),
            status: GameStatus::Playing,
            paused: false,
            debug: false,
            audio_on: true,
            rng,
            config,
        })
    }

    pub fn is_game_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    pub fn is_victory(&self) -> bool {
        self.ledger.score >= self.config.world.winning_score
    }

    /// Whether the frame scheduler should keep asking for ticks.
    pub fn wants_ticks(&self) -> bool {
        !self.is_game_over()
    }

    /// Run one tick.  Does nothing while paused or after game over.
    pub fn update(&mut self, delta_ms: f64, input: &ActionSet) {
        if self.paused || self.is_game_over() {
            return;
        }
        let delta_ms = delta_ms.max(0.0);

        // ── 1. Clock ─────────────────────────────────────────────────────────
        self.ledger.advance(delta_ms);
        if self.ledger.elapsed_ms > self.config.world.max_time_ms && !self.debug {
            info!(elapsed_ms = self.ledger.elapsed_ms, "out of time");
            self.status = GameStatus::OutOfTime;
        }

        // ── 2. Player ────────────────────────────────────────────────────────
        let mut ctx = TickContext {
            ledger: &mut self.ledger,
            pools: &mut self.pools,
            config: &self.config,
            rng: &mut self.rng,
            debug: self.debug,
        };
        let report = self.player.update(input, delta_ms, &mut ctx);
        if report.lives_exhausted && self.status == GameStatus::Playing {
            info!(score = self.ledger.score, "game over");
            self.status = GameStatus::OutOfLives;
        }

        // ── 3. Spawns ────────────────────────────────────────────────────────
        let requests = self
            .spawner
            .tick(delta_ms, self.ledger.scroll_speed, &mut self.rng);
        for request in requests {
            tracing::trace!(?request, "spawn");
            match request {
                SpawnRequest::Enemy(class) => self
                    .pools
                    .enemies
                    .push(Enemy::spawn(class, &self.config, &mut self.rng)),
                SpawnRequest::Pickup(kind) => self
                    .pools
                    .pickups
                    .push(Pickup::spawn(kind, &self.config, &mut self.rng)),
            }
        }

        // ── 4–5. Pools ───────────────────────────────────────────────────────
        self.pools
            .update(delta_ms, self.ledger.scroll_speed, &self.config);
        self.pools.compact();
    }

    /// Session-level commands from the front end.
    pub fn command(&mut self, command: Command) {
        match command {
            Command::TogglePause => self.paused = !self.paused,
            Command::ToggleDebug => {
                self.debug = !self.debug;
                info!(debug = self.debug, "debug mode toggled");
            }
            Command::ToggleAudio => self.audio_on = !self.audio_on,
            Command::Restart => self.restart(),
            Command::ClearEnemies if self.debug => self.clear_enemies(),
            Command::ClearEnemies => {}
        }
    }

    /// Back to the opening state, keeping config, toggles and RNG stream.
    pub fn restart(&mut self) {
        self.ledger = ResourceLedger::new(&self.config);
        self.player = Player::new(&self.config);
        self.pools.clear();
        self.spawner = SpawnScheduler::new(&self.config.spawn);
        self.status = GameStatus::Playing;
        self.paused = false;
    }

    /// Flash and flag every live enemy.  Score is untouched.
    fn clear_enemies(&mut self) {
        let flashes = &mut self.pools.flashes;
        for enemy in self.pools.enemies.iter_mut().filter(|e| !e.marked) {
            let (cx, cy) = enemy.rect().center();
            flashes.push(CollisionFlash::new(cx, cy, &mut self.rng));
            enemy.mark();
        }
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.ledger.score,
            elapsed_ms: self.ledger.elapsed_ms,
            energy: self.ledger.energy,
            lives: self.ledger.lives,
            paused: self.paused,
            debug: self.debug,
            audio_on: self.audio_on,
            game_over: self.is_game_over(),
            victory: self.is_victory(),
        }
    }

    /// Hand every visible thing to `surface`, back to front.
    pub fn draw(&self, surface: &mut impl Surface) {
        surface.sprite(&self.player.sprite());
        for enemy in self.pools.enemies.iter() {
            surface.sprite(&enemy.sprite());
        }
        for pickup in self.pools.pickups.iter() {
            surface.sprite(&pickup.sprite());
        }
        for particle in self.pools.particles.iter() {
            surface.sprite(&particle.sprite());
        }
        for flash in self.pools.flashes.iter() {
            surface.sprite(&flash.sprite());
        }
        for message in self.pools.messages.iter() {
            let style = if message.is_static() {
                TextStyle::Alert
            } else {
                TextStyle::Popup
            };
            surface.text(&message.text, message.x, message.y, style);
        }
        surface.hud(&self.hud());
    }
}
