/// Game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` and returns a brand-new `GameState`.  Side effects are
/// limited to the injected RNG and audio cue.

use rand::Rng;

use crate::audio::AudioCue;
use crate::collision::overlaps;
use crate::entities::{Enemy, GameState, Player, Projectile, ScoringRule};
use crate::input::{InputState, Key, KeyEdge};
use crate::sprite::{Playfield, Sprite};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: both ships at random spots inside the
/// field, the projectile spent at the origin.
pub fn init_state(playfield: Playfield, scoring: ScoringRule, rng: &mut impl Rng) -> GameState {
    GameState {
        player: Player::spawn(&playfield, rng),
        enemy: Enemy::spawn(&playfield, rng),
        projectile: Projectile::default(),
        input: InputState::default(),
        playfield,
        total_points: 0,
        paused: false,
        scoring,
        frame: 0,
    }
}

// ── Input-driven state transitions ──────────────────────────────────────────

/// Apply one key edge.
///
/// Pause toggles on its down edge and works at any time.  Directional edges
/// are always recorded so the held set matches the keyboard on resume; the
/// paused flag only suppresses their effect.  Fire is ignored while paused.
pub fn handle_key(state: &GameState, edge: KeyEdge, audio: &mut dyn AudioCue) -> GameState {
    let mut next = state.clone();

    if next.input.on_key_edge(edge) || !edge.down {
        return next;
    }

    match edge.key {
        Key::Pause => {
            next.paused = !next.paused;
            log::info!("Game {}", if next.paused { "paused" } else { "resumed" });
        }
        Key::Fire if !next.paused => {
            let from = (next.player.left(), next.player.top());
            let target = (next.enemy.left(), next.enemy.top());
            if next.projectile.try_launch(Key::Fire, from, target, audio) {
                log::debug!(
                    "Projectile launched from {:?} heading {:?}",
                    from,
                    next.projectile.direction()
                );
            }
        }
        _ => {}
    }
    next
}

/// The playfield changed size: re-run every boundary check without moving.
pub fn resize(state: &GameState, playfield: Playfield) -> GameState {
    let mut next = state.clone();
    next.playfield = playfield;
    next.player.boundary_check(&playfield);
    next.enemy.boundary_check(&playfield);
    next.projectile.boundary_check(&playfield);
    log::debug!("Playfield resized to {}x{}", playfield.width, playfield.height);
    next
}

// ── Per-tick update (RNG is injected) ───────────────────────────────────────

/// Advance the simulation by one tick: player, enemy, projectile, then
/// collision.  All randomness comes through `rng`.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    let paused = next.paused;
    let field = next.playfield;

    next.frame += 1;
    next.player.apply_input(&state.input, paused, &field);
    next.enemy.step_random(paused, &field, rng);
    next.projectile.advance(paused, &field);

    if overlaps(&next.projectile, &next.enemy, paused) {
        next.total_points += 1;
        log::debug!("Hit on frame {}, score {}", next.frame, next.total_points);
        if next.scoring == ScoringRule::PerShot {
            next.projectile.spend();
        }
    }
    next
}
