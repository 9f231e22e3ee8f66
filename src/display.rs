/// Terminal rendering.  All terminal I/O lives here.
///
/// `TerminalSurface` receives draw calls from `Game::draw` in world
/// coordinates, scales them onto a character grid, and `present` flushes
/// the grid to the terminal in one pass.  No game logic happens here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use side_scroller::render::{Hud, Sprite, Surface, TextStyle};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_GROUND: Color = Color::DarkGreen;
const C_HUD: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_ALERT: Color = Color::Red;
const C_POPUP: Color = Color::White;

/// Rows reserved above the play area (HUD + top border).
const TOP: u16 = 2;
/// Rows reserved below the play area (bottom border + hint).
const BOTTOM: u16 = 2;

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    world_width: f64,
    world_height: f64,
    ground_y: f64,
    grid: Vec<Cell>,
    hud: Option<Hud>,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16, world_width: f64, world_height: f64, ground_y: f64) -> Self {
        let mut surface = TerminalSurface {
            cols,
            rows,
            world_width,
            world_height,
            ground_y,
            grid: vec![BLANK; cols as usize * rows as usize],
            hud: None,
        };
        surface.draw_frame();
        surface
    }

    fn play_cols(&self) -> f64 {
        self.cols.saturating_sub(2).max(1) as f64
    }

    fn play_rows(&self) -> f64 {
        self.rows.saturating_sub(TOP + BOTTOM).max(1) as f64
    }

    /// World point → grid cell, `None` when off screen.
    fn to_cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        let col = (x / self.world_width * self.play_cols()).floor();
        let row = (y / self.world_height * self.play_rows()).floor();
        if col < 0.0 || row < 0.0 || col >= self.play_cols() || row >= self.play_rows() {
            return None;
        }
        Some((col as u16 + 1, row as u16 + TOP))
    }

    fn put(&mut self, col: u16, row: u16, ch: char, color: Color) {
        if col < self.cols && row < self.rows {
            self.grid[row as usize * self.cols as usize + col as usize] = Cell { ch, color };
        }
    }

    fn put_str(&mut self, col: u16, row: u16, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as u16, row, ch, color);
        }
    }

    fn draw_frame(&mut self) {
        let w = self.cols;
        let bottom = self.rows.saturating_sub(BOTTOM);
        for col in 0..w {
            self.put(col, TOP - 1, '─', C_BORDER);
            self.put(col, bottom, '─', C_BORDER);
        }
        for row in TOP..bottom {
            self.put(0, row, '│', C_BORDER);
            self.put(w.saturating_sub(1), row, '│', C_BORDER);
        }
        if let Some((_, row)) = self.to_cell(0.0, self.ground_y) {
            for col in 1..w.saturating_sub(1) {
                self.put(col, row, '▁', C_GROUND);
            }
        }
    }

    fn draw_hud(&mut self, hud: &Hud) {
        let left = format!(
            "Score:{:>4}  Time:{:>5.1}  Energy:{:>3}",
            hud.score,
            hud.elapsed_ms * 0.001,
            hud.energy.floor() as i64
        );
        self.put_str(1, 0, &left, C_HUD);

        let hearts = "♥".repeat(hud.lives.min(10) as usize);
        let col = self.cols.saturating_sub(hearts.chars().count() as u16 + 1);
        self.put_str(col, 0, &hearts, C_HUD_LIVES);

        let hint = match (hud.paused, hud.audio_on) {
            (true, _) => "PAUSED - P to resume",
            (false, true) => "←→↑↓ move  SPACE roll  P pause  A audio off  Esc quit",
            (false, false) => "←→↑↓ move  SPACE roll  P pause  A audio on  Esc quit",
        };
        self.put_str(1, self.rows.saturating_sub(1), hint, C_HINT);

        if hud.debug {
            let tag = "DEBUG: unlimited life and energy";
            let col = self.cols.saturating_sub(tag.len() as u16 + 1);
            self.put_str(col, self.rows.saturating_sub(1), tag, C_ALERT);
        }

        if hud.game_over {
            let (title, line) = if hud.victory {
                ("Boo-yah", "What are creatures of the night afraid of? YOU!!!")
            } else {
                ("Love at first bite?", "Nope. Better luck next time!")
            };
            let cy = self.rows / 2;
            let lines = [
                (title, Color::Yellow),
                (line, Color::White),
                ("R - Play Again  Esc - Quit", C_HINT),
            ];
            for (i, (text, color)) in lines.into_iter().enumerate() {
                let col = (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
                self.put_str(col, cy.saturating_sub(1) + i as u16, text, color);
            }
        }
    }

    /// Flush the grid to the terminal.
    pub fn present<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        if let Some(hud) = self.hud.take() {
            self.draw_hud(&hud);
        }

        out.queue(terminal::Clear(terminal::ClearType::All))?;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let mut color = Color::Reset;
            out.queue(style::SetForegroundColor(color))?;
            for col in 0..self.cols {
                let cell = self.grid[row as usize * self.cols as usize + col as usize];
                if cell.color != color {
                    color = cell.color;
                    out.queue(style::SetForegroundColor(color))?;
                }
                out.queue(Print(cell.ch))?;
            }
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }
}

/// Glyph and colour for a logical sprite name.
fn glyph(name: &str) -> (char, Color) {
    match name {
        "player" => ('@', Color::White),
        "enemy_fly" => ('W', Color::Magenta),
        "enemy_plant" => ('Y', Color::Green),
        "enemy_spider_big" => ('X', Color::DarkRed),
        "carrot" => ('♥', Color::DarkYellow),
        "boom" => ('*', Color::Yellow),
        "fire" => ('~', Color::Red),
        "dust" => ('.', Color::Grey),
        _ => ('?', Color::White),
    }
}

impl Surface for TerminalSurface {
    fn sprite(&mut self, sprite: &Sprite) {
        let (ch, color) = glyph(sprite.name);
        let r = sprite.rect;
        // Particles are too small to scale; one cell at the centre.
        if matches!(sprite.name, "fire" | "dust") {
            let (cx, cy) = r.center();
            if let Some((col, row)) = self.to_cell(cx, cy) {
                self.put(col, row, ch, color);
            }
            return;
        }
        let (Some(start), end) = (
            self.to_cell(r.x.max(0.0), r.y.max(0.0)),
            self.to_cell(r.x + r.width - 1.0, r.y + r.height - 1.0),
        ) else {
            return;
        };
        // Clip the far corner to the play area.
        let end = end.unwrap_or((
            (self.cols.saturating_sub(2)).max(start.0),
            (self.rows.saturating_sub(BOTTOM + 1)).max(start.1),
        ));
        for row in start.1..=end.1.max(start.1) {
            for col in start.0..=end.0.max(start.0) {
                self.put(col, row, ch, color);
            }
        }
    }

    fn text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        let color = match style {
            TextStyle::Popup => C_POPUP,
            TextStyle::Alert => C_ALERT,
        };
        if let Some((col, row)) = self.to_cell(x.max(0.0), y.max(0.0)) {
            self.put_str(col, row, text, color);
        }
    }

    fn hud(&mut self, hud: &Hud) {
        self.hud = Some(hud.clone());
    }
}
