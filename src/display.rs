/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::GameState;
use crate::sprite::{Playfield, Sprite, Visual};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_STAR: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_PROJECTILE: Color = Color::Cyan;
const C_PAUSE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Rows above the playfield: HUD plus the top border.
const TOP_ROWS: u16 = 2;
/// Rows below the playfield: bottom border plus the controls hint.
const BOTTOM_ROWS: u16 = 2;

/// Stars drawn per playfield row.
const STARS_PER_ROW: usize = 2;
/// Frames per one-column scroll of the starfield.
const STAR_SCROLL_FRAMES: u64 = 5;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps between terminal cells and logical playfield pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub cell_width: i32,
    pub cell_height: i32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, cell_width: i32, cell_height: i32) -> Self {
        Self {
            cols,
            rows,
            cell_width,
            cell_height,
        }
    }

    /// Columns inside the side walls.
    pub fn field_cols(&self) -> u16 {
        self.cols.saturating_sub(2)
    }

    /// Rows between the top and bottom borders.
    pub fn field_rows(&self) -> u16 {
        self.rows.saturating_sub(TOP_ROWS + BOTTOM_ROWS)
    }

    /// Playfield extent in logical pixels.  Collapses to zero on a tiny
    /// terminal and saturates on a huge one.
    pub fn playfield(&self) -> Playfield {
        Playfield::new(
            (self.field_cols() as i32).saturating_mul(self.cell_width),
            (self.field_rows() as i32).saturating_mul(self.cell_height),
        )
    }

    /// Terminal cell of a logical point, clipped to the playfield area.
    pub fn to_cell(&self, x: i32, y: i32) -> (u16, u16) {
        let col = (x / self.cell_width).clamp(0, self.field_cols().saturating_sub(1) as i32);
        let row = (y / self.cell_height).clamp(0, self.field_rows().saturating_sub(1) as i32);
        (1 + col as u16, TOP_ROWS + row as u16)
    }
}

// ── Starfield ─────────────────────────────────────────────────────────────────

/// Background stars drifting slowly to the left while the game runs.
#[derive(Clone, Debug, Default)]
pub struct Starfield {
    frame: u64,
}

impl Starfield {
    pub fn advance(&mut self, paused: bool) {
        if !paused {
            self.frame += 1;
        }
    }

    /// Column shift applied to every star.
    pub fn scroll(&self) -> u64 {
        self.frame / STAR_SCROLL_FRAMES
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    stars: &Starfield,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_stars(out, view, stars)?;
    draw_hud(out, state)?;

    draw_sprite(out, &state.enemy, view)?;
    draw_sprite(out, &state.player, view)?;
    if state.projectile.visible() {
        draw_sprite(out, &state.projectile, view)?;
    }

    draw_controls_hint(out, view)?;

    if state.paused {
        draw_pause(out, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let bottom = TOP_ROWS + view.field_rows();

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, TOP_ROWS - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in TOP_ROWS..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_stars<W: Write>(out: &mut W, view: &Viewport, stars: &Starfield) -> std::io::Result<()> {
    let cols = view.field_cols() as u64;
    if cols == 0 {
        return Ok(());
    }
    let shift = stars.scroll() % cols;

    out.queue(style::SetForegroundColor(C_STAR))?;
    for row in 0..view.field_rows() as u64 {
        for k in 0..STARS_PER_ROW as u64 {
            // Scatter stars with a fixed per-row pattern.
            let home = (row * 73 + k * 151 + row * row * 7) % cols;
            let col = (home + cols - shift) % cols;
            out.queue(cursor::MoveTo(1 + col as u16, TOP_ROWS + row as u16))?;
            out.queue(Print(if k == 0 { "." } else { "·" }))?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>8}", state.total_points)))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn sprite_style(visual: Visual) -> (Color, &'static str) {
    match visual {
        Visual::Player => (C_PLAYER, "▓"),
        Visual::Enemy => (C_ENEMY, "▒"),
        Visual::Projectile => (C_PROJECTILE, "●"),
    }
}

/// Fill every cell the sprite's box touches.
fn draw_sprite<W: Write, S: Sprite>(out: &mut W, sprite: &S, view: &Viewport) -> std::io::Result<()> {
    if view.field_cols() == 0 || view.field_rows() == 0 {
        return Ok(());
    }
    let (color, glyph) = sprite_style(sprite.visual());
    let (c0, r0) = view.to_cell(sprite.left(), sprite.top());
    let (c1, r1) = view.to_cell(
        sprite.left() + sprite.width() - 1,
        sprite.top() + sprite.height() - 1,
    );

    out.queue(style::SetForegroundColor(color))?;
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(glyph.repeat((c1 - c0 + 1) as usize)))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → ↑ ↓ : Move   SPACE : Fire   ESC : Pause   Q : Quit"))?;
    Ok(())
}

// ── Pause overlay ─────────────────────────────────────────────────────────────

fn draw_pause<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", C_PAUSE),
        ("║      PAUSED      ║", C_PAUSE),
        ("╚══════════════════╝", C_PAUSE),
        ("ESC - Resume  Q - Quit", Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
