/// The boundary between the simulation and whatever draws it.
///
/// `Game::draw` walks its state and hands read-only records to a `Surface`.
/// Sprite names are logical; resolving them to images is the surface's job.

use crate::entities::Rect;

/// One frame of one sprite sheet, placed in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub name: &'static str,
    /// Column on the sheet.
    pub frame: u32,
    /// Row on the sheet.
    pub row: u32,
    pub rect: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyle {
    /// Score-style popup that drifts.
    Popup,
    /// Warning pinned near the HUD.
    Alert,
}

/// Everything the heads-up display shows.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub score: i64,
    pub elapsed_ms: f64,
    pub energy: f64,
    pub lives: u32,
    pub paused: bool,
    pub debug: bool,
    pub audio_on: bool,
    pub game_over: bool,
    pub victory: bool,
}

pub trait Surface {
    fn sprite(&mut self, sprite: &Sprite);
    fn text(&mut self, text: &str, x: f64, y: f64, style: TextStyle);
    fn hud(&mut self, hud: &Hud);
}
