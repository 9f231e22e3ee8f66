/// The player's seven behaviour states and their transition table.
///
/// `react` is a pure function: it looks at the state, a snapshot of the
/// player, and the held actions, and says what should happen.  Applying the
/// answer (velocity changes, particles, the transition itself) is
/// `Player`'s job.

use crate::input::{Action, ActionSet};

/// Energy a roll needs before it can start.
pub const ROLL_THRESHOLD: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerState {
    Sitting,
    Running,
    Jumping,
    Falling,
    Rolling,
    Diving,
    Hit,
}

impl PlayerState {
    pub const ALL: [PlayerState; 7] = [
        PlayerState::Sitting,
        PlayerState::Running,
        PlayerState::Jumping,
        PlayerState::Falling,
        PlayerState::Rolling,
        PlayerState::Diving,
        PlayerState::Hit,
    ];

    /// `(max_frame, sheet_row)` for this state's animation.
    pub fn animation(self) -> (u32, u32) {
        match self {
            PlayerState::Sitting => (4, 5),
            PlayerState::Running => (8, 3),
            PlayerState::Jumping => (6, 1),
            PlayerState::Falling => (6, 2),
            PlayerState::Rolling => (6, 6),
            PlayerState::Diving => (6, 2),
            PlayerState::Hit => (10, 4),
        }
    }

    /// World scroll speed on entry, as a multiple of the max.
    pub fn scroll_multiplier(self) -> f64 {
        match self {
            PlayerState::Sitting | PlayerState::Diving | PlayerState::Hit => 0.0,
            PlayerState::Running | PlayerState::Jumping | PlayerState::Falling => 1.0,
            PlayerState::Rolling => 2.0,
        }
    }

    /// Enemy contact rewards instead of hurting.
    pub fn is_invulnerable(self) -> bool {
        matches!(self, PlayerState::Rolling | PlayerState::Diving)
    }

    pub fn name(self) -> &'static str {
        match self {
            PlayerState::Sitting => "SITTING",
            PlayerState::Running => "RUNNING",
            PlayerState::Jumping => "JUMPING",
            PlayerState::Falling => "FALLING",
            PlayerState::Rolling => "ROLLING",
            PlayerState::Diving => "DIVING",
            PlayerState::Hit => "HIT",
        }
    }
}

/// What `react` needs to know about the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stance {
    pub on_ground: bool,
    pub vy: f64,
    pub weight: f64,
    pub energy: f64,
    /// The current animation has reached its last frame.
    pub animation_done: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trail {
    Dust,
    Fire,
}

/// Outcome of one `react` call.  `Default` means "nothing happens".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reaction {
    pub next: Option<PlayerState>,
    /// Particle emitted for staying in (or leaving) this state this tick.
    pub trail: Option<Trail>,
    /// Upward impulse while staying in the state.
    pub boost: bool,
    /// Landing burst, emitted after the transition.
    pub splash: bool,
    /// The player asked for a roll without the energy for it.
    pub low_energy: bool,
}

impl Reaction {
    fn to(state: PlayerState) -> Self {
        Reaction {
            next: Some(state),
            ..Reaction::default()
        }
    }

    fn with_trail(mut self, trail: Trail) -> Self {
        self.trail = Some(trail);
        self
    }
}

/// Roll if there is energy for it, otherwise flag the shortage.
fn try_roll(stance: &Stance) -> Reaction {
    if stance.energy > ROLL_THRESHOLD {
        Reaction::to(PlayerState::Rolling)
    } else {
        Reaction {
            low_energy: true,
            ..Reaction::default()
        }
    }
}

pub fn react(state: PlayerState, stance: &Stance, input: &ActionSet) -> Reaction {
    let roll = input.contains(Action::Roll);
    let up = input.contains(Action::Up);
    let down = input.contains(Action::Down);
    let sideways = input.contains(Action::Left) || input.contains(Action::Right);

    match state {
        PlayerState::Sitting => {
            if sideways {
                Reaction::to(PlayerState::Running)
            } else if roll {
                try_roll(stance)
            } else {
                Reaction::default()
            }
        }
        PlayerState::Running => {
            let reaction = if down {
                Reaction::to(PlayerState::Sitting)
            } else if up {
                Reaction::to(PlayerState::Jumping)
            } else if roll {
                try_roll(stance)
            } else {
                Reaction::default()
            };
            reaction.with_trail(Trail::Dust)
        }
        PlayerState::Jumping => {
            if stance.vy > stance.weight {
                Reaction::to(PlayerState::Falling)
            } else if roll {
                try_roll(stance)
            } else if down {
                Reaction::to(PlayerState::Diving)
            } else {
                Reaction::default()
            }
        }
        PlayerState::Falling => {
            if stance.on_ground {
                Reaction::to(PlayerState::Running)
            } else if down {
                Reaction::to(PlayerState::Diving)
            } else {
                Reaction::default()
            }
        }
        PlayerState::Rolling => {
            let reaction = if !roll && stance.on_ground {
                Reaction::to(PlayerState::Running)
            } else if !roll {
                Reaction::to(PlayerState::Falling)
            } else if up && stance.on_ground {
                Reaction {
                    boost: true,
                    ..Reaction::default()
                }
            } else if down && !stance.on_ground {
                Reaction::to(PlayerState::Diving)
            } else {
                Reaction::default()
            };
            reaction.with_trail(Trail::Fire)
        }
        PlayerState::Diving => {
            let reaction = if stance.on_ground {
                Reaction {
                    next: Some(PlayerState::Running),
                    splash: true,
                    ..Reaction::default()
                }
            } else if !roll {
                try_roll(stance)
            } else {
                Reaction::default()
            };
            reaction.with_trail(Trail::Fire)
        }
        PlayerState::Hit => {
            if !stance.animation_done {
                Reaction::default()
            } else if stance.on_ground {
                Reaction::to(PlayerState::Running)
            } else {
                Reaction::to(PlayerState::Falling)
            }
        }
    }
}
