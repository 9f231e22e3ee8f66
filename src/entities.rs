/// Enemies and pickups: the world entities the player can run into.
///
/// Each family is a single struct with a variant tag.  Behaviour that
/// differs per variant is a `match` on the tag, never a separate type.

use rand::Rng;

use crate::animation::{AnimationClock, Playback};
use crate::config::{DriftConfig, GameConfig};
use crate::pool::Expire;
use crate::render::Sprite;

const ENTITY_FPS: f64 = 20.0;

// ── Geometry ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    /// Strict AABB overlap; touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

/// Vertical offset for one step of a sine bob.
fn bob(angle: &mut f64, angle_velocity: f64) -> f64 {
    *angle += angle_velocity;
    angle.sin()
}

// ── Enemies ──────────────────────────────────────────────────────────────────

/// Which enemy to spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyClass {
    Flying,
    Ground,
    Climbing,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EnemyKind {
    /// Drifts left while bobbing on a sine wave.
    Flying { angle: f64, angle_velocity: f64 },
    /// Sits on the ground; moves only with the scroll.
    Ground,
    /// Hangs on a thread, bouncing between the sky and the ground.
    Climbing,
}

impl EnemyKind {
    pub fn class(&self) -> EnemyClass {
        match self {
            EnemyKind::Flying { .. } => EnemyClass::Flying,
            EnemyKind::Ground => EnemyClass::Ground,
            EnemyKind::Climbing => EnemyClass::Climbing,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub width: f64,
    pub height: f64,
    pub clock: AnimationClock,
    pub marked: bool,
}

impl Enemy {
    /// Build an enemy just past the right edge of the world.
    pub fn spawn(class: EnemyClass, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let w = config.world.width;
        let h = config.world.height;
        match class {
            EnemyClass::Flying => Enemy {
                kind: EnemyKind::Flying {
                    angle: 0.0,
                    angle_velocity: rng.gen_range(0.1..0.2),
                },
                x: w + rng.gen_range(0.0..w * 0.5),
                y: rng.gen_range(0.0..h * 0.5),
                vx: -rng.gen_range(1.0..2.0),
                vy: 0.0,
                width: 60.0,
                height: 44.0,
                clock: AnimationClock::new(ENTITY_FPS, 5, Playback::Loop),
                marked: false,
            },
            EnemyClass::Ground => Enemy {
                kind: EnemyKind::Ground,
                x: w,
                y: config.ground_y(87.0),
                vx: 0.0,
                vy: 0.0,
                width: 60.0,
                height: 87.0,
                clock: AnimationClock::new(ENTITY_FPS, 1, Playback::Loop),
                marked: false,
            },
            EnemyClass::Climbing => Enemy {
                kind: EnemyKind::Climbing,
                x: w,
                y: rng.gen_range(0.0..h * 0.5),
                vx: 0.0,
                vy: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
                width: 120.0,
                height: 144.0,
                clock: AnimationClock::new(ENTITY_FPS, 5, Playback::Loop),
                marked: false,
            },
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn update(&mut self, delta_ms: f64, scroll_speed: f64, config: &GameConfig) {
        self.x += self.vx - scroll_speed;
        self.y += self.vy;
        self.clock.tick(delta_ms);
        if self.x + self.width < 0.0 {
            self.marked = true;
        }

        match &mut self.kind {
            EnemyKind::Flying {
                angle,
                angle_velocity,
            } => {
                self.y += bob(angle, *angle_velocity);
            }
            EnemyKind::Ground => {}
            EnemyKind::Climbing => {
                if self.y > config.ground_y(self.height) {
                    self.vy = -self.vy;
                }
                if self.y < -self.height {
                    self.marked = true;
                }
            }
        }
    }

    pub fn sprite(&self) -> Sprite {
        let name = match self.kind {
            EnemyKind::Flying { .. } => "enemy_fly",
            EnemyKind::Ground => "enemy_plant",
            EnemyKind::Climbing => "enemy_spider_big",
        };
        Sprite {
            name,
            frame: self.clock.frame,
            row: 0,
            rect: self.rect(),
        }
    }
}

impl Expire for Enemy {
    fn is_marked(&self) -> bool {
        self.marked
    }
    fn mark(&mut self) {
        self.marked = true;
    }
}

// ── Pickups ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
    /// Restores a life and some energy.
    Restorative,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pickup {
    pub kind: PickupKind,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
    pub angle_velocity: f64,
    pub clock: AnimationClock,
    pub marked: bool,
}

impl Pickup {
    pub fn spawn(kind: PickupKind, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let w = config.world.width;
        let h = config.world.height;
        Pickup {
            kind,
            x: w + rng.gen_range(0.0..w * 0.5),
            y: rng.gen_range(0.0..h * 0.5),
            vx: -rng.gen_range(1.0..2.0),
            vy: drift(&config.spawn.pickup_drift, rng),
            width: 61.2,
            height: 60.0,
            angle: 0.0,
            angle_velocity: rng.gen_range(0.1..0.2),
            clock: AnimationClock::new(ENTITY_FPS, 19, Playback::Loop),
            marked: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn update(&mut self, delta_ms: f64, scroll_speed: f64) {
        self.x += self.vx - scroll_speed;
        self.y += self.vy;
        self.clock.tick(delta_ms);
        if self.x + self.width < 0.0 {
            self.marked = true;
        }
        self.y += bob(&mut self.angle, self.angle_velocity);
    }

    pub fn sprite(&self) -> Sprite {
        let name = match self.kind {
            PickupKind::Restorative => "carrot",
        };
        Sprite {
            name,
            frame: self.clock.frame,
            row: 0,
            rect: self.rect(),
        }
    }
}

impl Expire for Pickup {
    fn is_marked(&self) -> bool {
        self.marked
    }
    fn mark(&mut self) {
        self.marked = true;
    }
}

/// Draw a vertical drift speed from the configured distribution.
pub fn drift(shape: &DriftConfig, rng: &mut impl Rng) -> f64 {
    if rng.gen_bool(shape.still_chance) {
        return 0.0;
    }
    let (lo, hi) = if rng.gen_bool(shape.rise_chance) {
        shape.rise
    } else {
        shape.sink
    };
    rng.gen_range(lo..hi)
}
