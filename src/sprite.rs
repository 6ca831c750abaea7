//! Shared entity model.
//!
//! Every actor embeds an [`Entity`] and reaches the common movement
//! primitives through the [`Sprite`] trait.  All coordinates are logical
//! playfield pixels with the origin at the top-left corner.

use crate::consts::STEP;

/// Current extent of the simulation bounds.
///
/// Re-read by the game on every resize; a zero or negative extent is legal
/// and collapses every entity's valid range to the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Playfield {
    pub width: i32,
    pub height: i32,
}

impl Playfield {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Which asset the renderer should draw for a sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visual {
    Player,
    Enemy,
    Projectile,
}

/// Position, size and visibility common to all game objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    left: i32,
    top: i32,
    width: i32,
    height: i32,
    visible: bool,
    disappears: bool,
}

impl Entity {
    /// Entities that disappear at the boundary start hidden; the others start visible.
    pub fn new(left: i32, top: i32, width: i32, height: i32, disappears: bool) -> Self {
        Self {
            left,
            top,
            width,
            height,
            visible: !disappears,
            disappears,
        }
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Jump straight to a position.  No clamp here: the next move or
    /// boundary check validates it.
    pub fn teleport(&mut self, left: i32, top: i32) {
        self.left = left;
        self.top = top;
    }

    /// Relative move followed by the boundary policy.  Returns whether a clamp happened.
    pub fn move_by(&mut self, dx: i32, dy: i32, field: &Playfield) -> bool {
        self.left += dx;
        self.top += dy;
        self.boundary_check(field)
    }

    /// Clamp the box into the playfield, hiding it if it disappears on exit.
    ///
    /// Idempotent: a second call never moves the box again.
    pub fn boundary_check(&mut self, field: &Playfield) -> bool {
        let max_left = (field.width - self.width).max(0);
        let max_top = (field.height - self.height).max(0);
        let mut clamped = false;

        if self.left < 0 {
            self.left = 0;
            clamped = true;
        }
        if self.top < 0 {
            self.top = 0;
            clamped = true;
        }
        if self.left + self.width > field.width {
            self.left = max_left;
            clamped = true;
        }
        if self.top + self.height > field.height {
            self.top = max_top;
            clamped = true;
        }

        if clamped && self.disappears {
            self.visible = false;
        }
        clamped
    }
}

/// Capability set shared by the player, the enemy and the projectile.
pub trait Sprite {
    fn entity(&self) -> &Entity;
    fn entity_mut(&mut self) -> &mut Entity;
    fn visual(&self) -> Visual;

    fn left(&self) -> i32 {
        self.entity().left()
    }

    fn top(&self) -> i32 {
        self.entity().top()
    }

    fn width(&self) -> i32 {
        self.entity().width()
    }

    fn height(&self) -> i32 {
        self.entity().height()
    }

    fn visible(&self) -> bool {
        self.entity().visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.entity_mut().set_visible(visible);
    }

    fn move_left(&mut self, field: &Playfield) {
        self.entity_mut().move_by(-STEP, 0, field);
    }

    fn move_right(&mut self, field: &Playfield) {
        self.entity_mut().move_by(STEP, 0, field);
    }

    fn move_up(&mut self, field: &Playfield) {
        self.entity_mut().move_by(0, -STEP, field);
    }

    fn move_down(&mut self, field: &Playfield) {
        self.entity_mut().move_by(0, STEP, field);
    }

    fn boundary_check(&mut self, field: &Playfield) -> bool {
        self.entity_mut().boundary_check(field)
    }
}
