/// The player character: body, physics and the state machine driving it.

pub mod state;

use rand::Rng;
use tracing::debug;

use crate::animation::{AnimationClock, Playback};
use crate::collision::{self, CollisionReport};
use crate::config::GameConfig;
use crate::effects::{FloatingMessage, Particle, LOW_ENERGY_ANCHOR, LOW_ENERGY_TEXT};
use crate::entities::Rect;
use crate::input::ActionSet;
use crate::ledger::ResourceLedger;
use crate::render::Sprite;
use crate::world::TickContext;

pub use state::{react, PlayerState, Reaction, Stance, Trail};

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub width: f64,
    pub height: f64,
    pub state: PlayerState,
    pub clock: AnimationClock,
    max_speed_x: f64,
    weight: f64,
    jump_impulse: f64,
    dive_speed: f64,
    ground_y: f64,
    max_x: f64,
}

impl Player {
    /// A sitting player at the left edge, on the ground.
    pub fn new(config: &GameConfig) -> Self {
        let p = &config.player;
        let (max_frame, row) = PlayerState::Sitting.animation();
        let mut clock = AnimationClock::new(p.fps, max_frame, Playback::Loop);
        clock.reset(max_frame, row);
        let ground_y = config.ground_y(p.height);
        Player {
            x: 0.0,
            y: ground_y,
            vx: 0.0,
            vy: 0.0,
            width: p.width,
            height: p.height,
            state: PlayerState::Sitting,
            clock,
            max_speed_x: p.max_speed_x,
            weight: p.weight,
            jump_impulse: p.jump_impulse,
            dive_speed: p.dive_speed,
            ground_y,
            max_x: config.world.width - p.width,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn ground_y(&self) -> f64 {
        self.ground_y
    }

    pub fn is_on_ground(&self) -> bool {
        self.y >= self.ground_y
    }

    /// Switch state, update the world scroll and run the entry action.
    pub fn set_state(&mut self, next: PlayerState, ledger: &mut ResourceLedger) {
        debug!(
            from = self.state.name(),
            to = next.name(),
            scroll = ledger.max_scroll_speed * next.scroll_multiplier(),
            "player state change"
        );
        self.state = next;
        ledger.set_scroll_multiplier(next.scroll_multiplier());
        self.enter();
    }

    fn enter(&mut self) {
        let (max_frame, row) = self.state.animation();
        self.clock.reset(max_frame, row);
        match self.state {
            // Re-entering mid-air must not jump again.
            PlayerState::Jumping if self.is_on_ground() => self.vy -= self.jump_impulse,
            PlayerState::Diving => self.vy = self.dive_speed,
            _ => {}
        }
    }

    fn stance(&self, energy: f64) -> Stance {
        Stance {
            on_ground: self.is_on_ground(),
            vy: self.vy,
            weight: self.weight,
            energy,
            animation_done: self.clock.is_finished(),
        }
    }

    /// One tick: collisions, input, physics, animation, energy.
    pub fn update<R: Rng>(
        &mut self,
        input: &ActionSet,
        delta_ms: f64,
        ctx: &mut TickContext<'_, R>,
    ) -> CollisionReport {
        let report = collision::resolve(self, ctx);
        self.handle_input(input, ctx);

        // ── Horizontal ───────────────────────────────────────────────────────
        self.x += self.vx;
        self.vx = if self.state == PlayerState::Hit {
            0.0
        } else {
            input.horizontal() * self.max_speed_x
        };
        self.x = self.x.clamp(0.0, self.max_x);

        // ── Vertical ─────────────────────────────────────────────────────────
        self.y += self.vy;
        if self.is_on_ground() {
            self.vy = 0.0;
        } else {
            self.vy += self.weight;
        }
        self.y = self.y.min(self.ground_y);

        debug_assert!(self.x >= 0.0 && self.x <= self.max_x);
        debug_assert!(self.y <= self.ground_y);

        // ── Animation & energy ───────────────────────────────────────────────
        let advanced = self.clock.tick(delta_ms);
        if advanced && self.state == PlayerState::Rolling && !ctx.debug {
            ctx.ledger.drain_energy(ctx.config.ledger.rolling_cost);
        }
        if self.state == PlayerState::Rolling && ctx.ledger.energy <= 0.0 {
            let next = if self.is_on_ground() {
                PlayerState::Sitting
            } else {
                PlayerState::Falling
            };
            self.set_state(next, ctx.ledger);
        }

        report
    }

    /// Ask the current state what to do and carry it out.
    pub fn handle_input<R: Rng>(&mut self, input: &ActionSet, ctx: &mut TickContext<'_, R>) {
        let reaction = react(self.state, &self.stance(ctx.ledger.energy), input);
        let (fx, fy) = self.feet();

        match reaction.trail {
            Some(Trail::Dust) => ctx.pools.particles.push_front(Particle::dust(fx, fy, ctx.rng)),
            Some(Trail::Fire) => ctx.pools.particles.push_front(Particle::fire(fx, fy, ctx.rng)),
            None => {}
        }
        if reaction.boost {
            self.vy -= self.jump_impulse;
        }
        if let Some(next) = reaction.next {
            self.set_state(next, ctx.ledger);
        }
        if reaction.splash {
            for _ in 0..ctx.config.effects.splash_count {
                ctx.pools
                    .particles
                    .push_front(Particle::splash(fx, fy, ctx.rng));
            }
        }
        if reaction.low_energy {
            let (x, y) = LOW_ENERGY_ANCHOR;
            ctx.pools.messages.push(FloatingMessage::fixed(
                LOW_ENERGY_TEXT,
                x,
                y,
                ctx.config.effects.message_lifetime,
            ));
        }
    }

    /// Bottom centre, where particles are emitted.
    fn feet(&self) -> (f64, f64) {
        (self.x + self.width * 0.5, self.y + self.height)
    }

    pub fn sprite(&self) -> Sprite {
        Sprite {
            name: "player",
            frame: self.clock.frame,
            row: self.clock.row,
            rect: self.rect(),
        }
    }
}
