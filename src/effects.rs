/// Purely visual entities: particles, collision flashes and floating text.
///
/// None of these affect the outcome of a run, but their lifetimes follow
/// the same mark-and-compact rules as enemies.

use rand::Rng;

use crate::animation::{AnimationClock, Playback};
use crate::entities::Rect;
use crate::pool::Expire;
use crate::render::Sprite;

// ── Particles ────────────────────────────────────────────────────────────────

const PARTICLE_SHRINK: f64 = 0.95;
const PARTICLE_MIN_SIZE: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub enum ParticleKind {
    /// Kicked up while running.
    Dust,
    /// Trail left while rolling or diving.
    Fire { angle: f64, angle_velocity: f64 },
    /// Burst on landing from a dive.
    Splash { gravity: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub marked: bool,
}

impl Particle {
    pub fn dust(x: f64, y: f64, rng: &mut impl Rng) -> Self {
        Particle {
            kind: ParticleKind::Dust,
            x,
            y,
            vx: rng.gen_range(0.0..1.0),
            vy: rng.gen_range(0.0..1.0),
            size: rng.gen_range(10.0..20.0),
            marked: false,
        }
    }

    pub fn fire(x: f64, y: f64, rng: &mut impl Rng) -> Self {
        Particle {
            kind: ParticleKind::Fire {
                angle: 0.0,
                angle_velocity: rng.gen_range(-0.1..0.1),
            },
            x,
            y,
            vx: 1.0,
            vy: 1.0,
            size: rng.gen_range(50.0..150.0),
            marked: false,
        }
    }

    pub fn splash(x: f64, y: f64, rng: &mut impl Rng) -> Self {
        let size = rng.gen_range(100.0..200.0);
        Particle {
            kind: ParticleKind::Splash { gravity: 0.0 },
            x: x - size * 0.4,
            y: y - size * 0.5,
            vx: rng.gen_range(-4.0..2.0),
            vy: rng.gen_range(2.0..4.0),
            size,
            marked: false,
        }
    }

    pub fn update(&mut self, scroll_speed: f64) {
        self.x -= self.vx + scroll_speed;
        self.y -= self.vy;
        self.size *= PARTICLE_SHRINK;
        if self.size < PARTICLE_MIN_SIZE {
            self.marked = true;
        }
        match &mut self.kind {
            ParticleKind::Dust => {}
            ParticleKind::Fire {
                angle,
                angle_velocity,
            } => {
                *angle += *angle_velocity;
                self.x += (*angle * 5.0).sin();
            }
            ParticleKind::Splash { gravity } => {
                *gravity += 0.1;
                self.y += *gravity;
            }
        }
    }

    pub fn sprite(&self) -> Sprite {
        let name = match self.kind {
            ParticleKind::Dust => "dust",
            ParticleKind::Fire { .. } | ParticleKind::Splash { .. } => "fire",
        };
        Sprite {
            name,
            frame: 0,
            row: 0,
            rect: Rect::new(self.x, self.y, self.size, self.size),
        }
    }
}

impl Expire for Particle {
    fn is_marked(&self) -> bool {
        self.marked
    }
    fn mark(&mut self) {
        self.marked = true;
    }
}

// ── Collision flash ──────────────────────────────────────────────────────────

const FLASH_SPRITE_WIDTH: f64 = 100.0;
const FLASH_SPRITE_HEIGHT: f64 = 90.0;
const FLASH_FRAMES: u32 = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct CollisionFlash {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub clock: AnimationClock,
    pub marked: bool,
}

impl CollisionFlash {
    /// A randomly sized flash centred on `(cx, cy)`.
    pub fn new(cx: f64, cy: f64, rng: &mut impl Rng) -> Self {
        let scale = rng.gen_range(0.5..1.5);
        let fps = rng.gen_range(5.0..15.0);
        let width = FLASH_SPRITE_WIDTH * scale;
        let height = FLASH_SPRITE_HEIGHT * scale;
        CollisionFlash {
            x: cx - width * 0.5,
            y: cy - height * 0.5,
            width,
            height,
            clock: AnimationClock::new(fps, FLASH_FRAMES, Playback::Once),
            marked: false,
        }
    }

    pub fn update(&mut self, delta_ms: f64, scroll_speed: f64) {
        // stays pinned to the world while it scrolls
        self.x -= scroll_speed;
        self.clock.tick(delta_ms);
        if self.clock.is_past_end() {
            self.marked = true;
        }
    }

    pub fn sprite(&self) -> Sprite {
        Sprite {
            name: "boom",
            frame: self.clock.frame,
            row: 0,
            rect: Rect::new(self.x, self.y, self.width, self.height),
        }
    }
}

impl Expire for CollisionFlash {
    fn is_marked(&self) -> bool {
        self.marked
    }
    fn mark(&mut self) {
        self.marked = true;
    }
}

// ── Floating messages ────────────────────────────────────────────────────────

pub const LOW_ENERGY_TEXT: &str = "Energy";
pub const LOW_ENERGY_ANCHOR: (f64, f64) = (24.0, 107.0);

#[derive(Clone, Debug, PartialEq)]
pub enum MessageKind {
    /// Stays where it was placed.
    Static,
    /// Eases toward the target each tick.
    Dynamic {
        target_x: f64,
        target_y: f64,
        easing: f64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatingMessage {
    pub text: String,
    pub kind: MessageKind,
    pub x: f64,
    pub y: f64,
    /// Ticks lived so far.
    pub timer: u32,
    pub lifetime: u32,
    pub marked: bool,
}

impl FloatingMessage {
    pub fn fixed(text: impl Into<String>, x: f64, y: f64, lifetime: u32) -> Self {
        FloatingMessage {
            text: text.into(),
            kind: MessageKind::Static,
            x,
            y,
            timer: 0,
            lifetime,
            marked: false,
        }
    }

    pub fn moving(
        text: impl Into<String>,
        from: (f64, f64),
        to: (f64, f64),
        easing: f64,
        lifetime: u32,
    ) -> Self {
        FloatingMessage {
            text: text.into(),
            kind: MessageKind::Dynamic {
                target_x: to.0,
                target_y: to.1,
                easing,
            },
            x: from.0,
            y: from.1,
            timer: 0,
            lifetime,
            marked: false,
        }
    }

    pub fn update(&mut self) {
        self.timer += 1;
        if self.timer > self.lifetime {
            self.marked = true;
        }
        if let MessageKind::Dynamic {
            target_x,
            target_y,
            easing,
        } = self.kind
        {
            self.x += (target_x - self.x) * easing;
            self.y += (target_y - self.y) * easing;
        }
    }

    pub fn is_static(&self) -> bool {
        self.kind == MessageKind::Static
    }
}

impl Expire for FloatingMessage {
    fn is_marked(&self) -> bool {
        self.marked
    }
    fn mark(&mut self) {
        self.marked = true;
    }
}
