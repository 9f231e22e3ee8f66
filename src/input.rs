/// Logical input actions.
///
/// The front end translates raw key events into an `ActionSet` once per
/// frame; the simulation only ever reads it.

use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    /// Roll / fireball.
    Roll,
}

/// The set of actions currently held.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionSet {
    held: HashSet<Action>,
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Signed horizontal direction: -1 left, 1 right, 0 neither.
    /// Right wins when both are held.
    pub fn horizontal(&self) -> f64 {
        if self.contains(Action::Right) {
            1.0
        } else if self.contains(Action::Left) {
            -1.0
        } else {
            0.0
        }
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        ActionSet {
            held: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[Action; N]> for ActionSet {
    fn from(actions: [Action; N]) -> Self {
        actions.into_iter().collect()
    }
}

/// Commands that act on the session rather than on the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    ToggleDebug,
    ToggleAudio,
    Restart,
    /// Debug only: destroy every enemy on screen.
    ClearEnemies,
}
