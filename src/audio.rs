//! Audio cues.
//!
//! Cues are fire-and-forget: nothing in the game state depends on whether
//! a sound actually played.

use std::io::{stdout, Write};

pub trait AudioCue {
    /// A projectile has just been launched.
    fn launch(&mut self);
}

/// Rings the terminal bell.
#[derive(Debug, Default)]
pub struct Bell;

impl AudioCue for Bell {
    fn launch(&mut self) {
        let mut out = stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            log::debug!("Bell failed: {}", e);
        }
    }
}

/// Swallows every cue.
#[derive(Debug, Default)]
pub struct Silent;

impl AudioCue for Silent {
    fn launch(&mut self) {}
}
