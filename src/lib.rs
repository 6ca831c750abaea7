//! Space Game - a one-ship-versus-one-ship terminal arcade game
//!
//! Core modules:
//! - `sprite`: shared entity model (position, size, visibility, boundary clamp)
//! - `entities`: player, enemy and projectile actors plus the game state
//! - `input`: held-direction tracking and key edge cleanup
//! - `collision`: projectile/enemy overlap test
//! - `compute`: the per-tick orchestrator
//! - `display`: crossterm renderer
//! - `audio`, `settings`: collaborators for the binary

pub mod audio;
pub mod collision;
pub mod compute;
pub mod display;
pub mod entities;
pub mod input;
pub mod settings;
pub mod sprite;

pub use settings::Settings;

/// Game constants, in logical playfield pixels.
pub mod consts {
    /// Distance covered by a single directional move.
    pub const STEP: i32 = 5;

    pub const SHIP_WIDTH: i32 = 150;
    pub const SHIP_HEIGHT: i32 = 78;

    pub const PROJECTILE_WIDTH: i32 = 36;
    pub const PROJECTILE_HEIGHT: i32 = 36;
}
