/// Game entities and the behavior each one runs per tick.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::audio::AudioCue;
use crate::consts::{PROJECTILE_HEIGHT, PROJECTILE_WIDTH, SHIP_HEIGHT, SHIP_WIDTH};
use crate::input::{Direction, InputState, Key};
use crate::sprite::{Entity, Playfield, Sprite, Visual};

/// How a projectile that overlaps the enemy is scored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    /// One point for every tick the projectile overlaps the enemy.
    /// The projectile keeps flying after a hit.
    #[default]
    PerOverlapTick,
    /// One point per shot: the projectile is spent on its first hit.
    PerShot,
}

/// Uniform top-left position that keeps a `width` x `height` box inside `field`.
fn random_spawn(field: &Playfield, width: i32, height: i32, rng: &mut impl Rng) -> (i32, i32) {
    let max_left = (field.width - width).max(0);
    let max_top = (field.height - height).max(0);
    (rng.gen_range(0..=max_left), rng.gen_range(0..=max_top))
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    entity: Entity,
}

impl Player {
    pub fn new(left: i32, top: i32) -> Self {
        Self {
            entity: Entity::new(left, top, SHIP_WIDTH, SHIP_HEIGHT, false),
        }
    }

    pub fn spawn(field: &Playfield, rng: &mut impl Rng) -> Self {
        let (left, top) = random_spawn(field, SHIP_WIDTH, SHIP_HEIGHT, rng);
        Self::new(left, top)
    }

    /// Take one step for every held direction.  Opposite directions cancel
    /// and two orthogonal ones add up to a diagonal.  The boundary check runs
    /// even when paused so a resize between ticks is always honoured.
    pub fn apply_input(&mut self, input: &InputState, paused: bool, field: &Playfield) {
        if !paused {
            if input.is_held(Direction::Right) {
                self.move_right(field);
            }
            if input.is_held(Direction::Left) {
                self.move_left(field);
            }
            if input.is_held(Direction::Up) {
                self.move_up(field);
            }
            if input.is_held(Direction::Down) {
                self.move_down(field);
            }
        }
        self.boundary_check(field);
    }
}

impl Sprite for Player {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn visual(&self) -> Visual {
        Visual::Player
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    entity: Entity,
}

impl Enemy {
    pub fn new(left: i32, top: i32) -> Self {
        Self {
            entity: Entity::new(left, top, SHIP_WIDTH, SHIP_HEIGHT, false),
        }
    }

    pub fn spawn(field: &Playfield, rng: &mut impl Rng) -> Self {
        let (left, top) = random_spawn(field, SHIP_WIDTH, SHIP_HEIGHT, rng);
        Self::new(left, top)
    }

    /// Memoryless random walk: one horizontal and one vertical step, each
    /// direction drawn from a fresh coin flip.
    pub fn step_random(&mut self, paused: bool, field: &Playfield, rng: &mut impl Rng) {
        if paused {
            return;
        }
        if rng.gen_range(0..2) == 1 {
            self.move_left(field);
        } else {
            self.move_right(field);
        }
        if rng.gen_range(0..2) == 1 {
            self.move_up(field);
        } else {
            self.move_down(field);
        }
    }
}

impl Sprite for Enemy {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn visual(&self) -> Visual {
        Visual::Enemy
    }
}

// ── Projectile ────────────────────────────────────────────────────────────────

/// The single projectile.  Invisible means spent; visible means in flight
/// along a direction fixed at launch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projectile {
    entity: Entity,
    direction: Option<Direction>,
}

impl Default for Projectile {
    fn default() -> Self {
        Self::new()
    }
}

impl Projectile {
    /// A spent projectile parked at the origin.
    pub fn new() -> Self {
        Self {
            entity: Entity::new(0, 0, PROJECTILE_WIDTH, PROJECTILE_HEIGHT, true),
            direction: None,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Direction of travel from `from` toward `to` along the dominant axis.
    /// Equal deltas go horizontal.
    pub fn aim(from: (i32, i32), to: (i32, i32)) -> Direction {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;

        if dy.abs() > dx.abs() {
            if dy > 0 {
                Direction::Down
            } else {
                Direction::Up
            }
        } else if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    /// Launch from `from` toward `target` on a fire key, unless already in
    /// flight.  Returns whether a launch happened.
    pub fn try_launch(
        &mut self,
        key: Key,
        from: (i32, i32),
        target: (i32, i32),
        audio: &mut dyn AudioCue,
    ) -> bool {
        if key != Key::Fire || self.visible() {
            return false;
        }
        self.entity.set_visible(true);
        self.entity.teleport(from.0, from.1);
        self.direction = Some(Self::aim(from, target));
        audio.launch();
        true
    }

    /// One step along the locked direction.  Leaving the field hides it.
    pub fn advance(&mut self, paused: bool, field: &Playfield) {
        if !paused && self.visible() {
            match self.direction {
                Some(Direction::Right) => self.move_right(field),
                Some(Direction::Up) => self.move_up(field),
                Some(Direction::Down) => self.move_down(field),
                Some(Direction::Left) | None => self.move_left(field),
            }
        }
        self.boundary_check(field);
    }

    /// Back to the spent state without moving.
    pub fn spend(&mut self) {
        self.set_visible(false);
        self.direction = None;
    }
}

impl Sprite for Projectile {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn visual(&self) -> Visual {
        Visual::Projectile
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub player: Player,
    pub enemy: Enemy,
    pub projectile: Projectile,
    /// Directions held right now.
    pub input: InputState,
    pub playfield: Playfield,
    pub total_points: u32,
    pub paused: bool,
    pub scoring: ScoringRule,
    /// Ticks run so far, paused ones included.
    pub frame: u64,
}
