//! Input state tracking.
//!
//! Directional keys are *held* input: a key-down edge adds the direction to
//! the held set and a key-up edge removes it, and the player samples the set
//! every tick.  Fire and pause are *edge-triggered*: they act once on their
//! key-down edge and are never stored here.

use std::collections::{BTreeSet, HashMap};

use crossterm::event::KeyEventKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Every key the simulation understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Pause,
}

impl Key {
    /// The held direction this key controls, if it is a directional key.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Fire | Key::Pause => None,
        }
    }
}

/// A single key-down or key-up transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEdge {
    pub key: Key,
    pub down: bool,
}

impl KeyEdge {
    pub fn down(key: Key) -> Self {
        Self { key, down: true }
    }

    pub fn up(key: Key) -> Self {
        Self { key, down: false }
    }
}

/// The set of directions currently held down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    held: BTreeSet<Direction>,
}

impl InputState {
    /// Apply one edge.  Returns `false` for keys that are not held input.
    pub fn on_key_edge(&mut self, edge: KeyEdge) -> bool {
        let Some(direction) = edge.key.direction() else {
            return false;
        };
        if edge.down {
            self.held.insert(direction);
        } else {
            self.held.remove(&direction);
        }
        true
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held.contains(&direction)
    }

    /// Held directions in a stable order.
    pub fn held(&self) -> impl Iterator<Item = Direction> + '_ {
        self.held.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

/// Turns raw terminal key events into clean down/up edges.
///
/// Terminals with keyboard enhancement report `Press`, `Repeat` and
/// `Release`, and keys only go up on a real release.  Classic terminals only
/// send `Press`, repeated by the OS while the key is held, so there a key
/// whose last press or repeat is older than the hold window is treated as
/// released.  The window must outlast the OS auto-repeat delay.
#[derive(Clone, Debug)]
pub struct KeyRepeatFilter {
    last_seen: HashMap<Key, u64>,
    /// `None` when the terminal reports releases.
    hold_window: Option<u64>,
}

impl KeyRepeatFilter {
    /// For terminals without release events.
    pub fn new(hold_window: u64) -> Self {
        Self {
            last_seen: HashMap::new(),
            hold_window: Some(hold_window),
        }
    }

    /// For terminals that report releases: keys never expire.
    pub fn reporting_releases() -> Self {
        Self {
            last_seen: HashMap::new(),
            hold_window: None,
        }
    }

    /// Feed one raw event seen during `frame`.
    pub fn feed(&mut self, key: Key, kind: KeyEventKind, frame: u64) -> Option<KeyEdge> {
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let was_up = self.last_seen.insert(key, frame).is_none();
                was_up.then(|| KeyEdge::down(key))
            }
            KeyEventKind::Release => self.last_seen.remove(&key).map(|_| KeyEdge::up(key)),
        }
    }

    /// Release every key that has gone quiet for longer than the hold window.
    pub fn expire(&mut self, frame: u64) -> Vec<KeyEdge> {
        let Some(hold_window) = self.hold_window else {
            return Vec::new();
        };
        let mut stale: Vec<Key> = self
            .last_seen
            .iter()
            .filter(|(_, &last)| frame.saturating_sub(last) > hold_window)
            .map(|(&key, _)| key)
            .collect();
        stale.sort();

        for key in &stale {
            self.last_seen.remove(key);
        }
        stale.into_iter().map(KeyEdge::up).collect()
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.last_seen.contains_key(&key)
    }
}
