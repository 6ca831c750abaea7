use space_game::audio::{AudioCue, Silent};
use space_game::consts::*;
use space_game::entities::*;
use space_game::input::{Direction, InputState, Key, KeyEdge};
use space_game::sprite::{Playfield, Sprite};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn field() -> Playfield {
    Playfield::new(800, 600)
}

#[derive(Default)]
struct CountingAudio {
    launches: u32,
}

impl AudioCue for CountingAudio {
    fn launch(&mut self) {
        self.launches += 1;
    }
}

fn holding(keys: &[Key]) -> InputState {
    let mut input = InputState::default();
    for &key in keys {
        input.on_key_edge(KeyEdge::down(key));
    }
    input
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[test]
fn ships_spawn_inside_field() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let p = Player::spawn(&field(), &mut rng);
        assert!(p.left() >= 0 && p.left() + p.width() <= 800);
        assert!(p.top() >= 0 && p.top() + p.height() <= 600);
        assert!(p.visible());

        let e = Enemy::spawn(&field(), &mut rng);
        assert!(e.left() >= 0 && e.left() + e.width() <= 800);
        assert!(e.top() >= 0 && e.top() + e.height() <= 600);
    }
}

#[test]
fn projectile_starts_spent_at_origin() {
    let b = Projectile::new();
    assert!(!b.visible());
    assert_eq!((b.left(), b.top()), (0, 0));
    assert_eq!((b.width(), b.height()), (PROJECTILE_WIDTH, PROJECTILE_HEIGHT));
    assert_eq!(b.direction(), None);
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_moves_one_step_per_held_direction() {
    let mut p = Player::new(300, 300);
    p.apply_input(&holding(&[Key::Right]), false, &field());
    assert_eq!((p.left(), p.top()), (305, 300));
}

#[test]
fn player_diagonal_is_sum_of_two_steps() {
    let mut p = Player::new(300, 300);
    p.apply_input(&holding(&[Key::Left, Key::Down]), false, &field());
    assert_eq!((p.left(), p.top()), (300 - STEP, 300 + STEP));
}

#[test]
fn player_opposite_directions_cancel() {
    let mut p = Player::new(300, 300);
    p.apply_input(&holding(&[Key::Left, Key::Right, Key::Up, Key::Down]), false, &field());
    assert_eq!((p.left(), p.top()), (300, 300));
}

#[test]
fn player_ignores_input_while_paused() {
    let mut p = Player::new(300, 300);
    p.apply_input(&holding(&[Key::Right, Key::Up]), true, &field());
    assert_eq!((p.left(), p.top()), (300, 300));
}

#[test]
fn player_clamped_after_shrink_even_without_input() {
    let mut p = Player::new(700, 500);
    let small = Playfield::new(400, 300);
    p.apply_input(&InputState::default(), true, &small);
    assert_eq!((p.left(), p.top()), (400 - SHIP_WIDTH, 300 - SHIP_HEIGHT));
    assert!(p.visible());
}

#[test]
fn player_held_right_pins_to_far_edge() {
    let mut p = Player::new(100, 200);
    let input = holding(&[Key::Right]);
    for _ in 0..160 {
        p.apply_input(&input, false, &field());
    }
    assert_eq!(p.left(), 800 - SHIP_WIDTH);
    assert_eq!(p.top(), 200);
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn enemy_takes_one_diagonal_step() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut e = Enemy::new(300, 300);
    e.step_random(false, &field(), &mut rng);
    assert_eq!((e.left() - 300).abs(), STEP);
    assert_eq!((e.top() - 300).abs(), STEP);
}

#[test]
fn enemy_frozen_while_paused() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut e = Enemy::new(300, 300);
    for _ in 0..50 {
        e.step_random(true, &field(), &mut rng);
    }
    assert_eq!((e.left(), e.top()), (300, 300));
}

#[test]
fn enemy_walk_stays_in_field() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut e = Enemy::new(0, 0);
    for _ in 0..5000 {
        e.step_random(false, &field(), &mut rng);
        assert!(e.left() >= 0 && e.left() <= 800 - SHIP_WIDTH);
        assert!(e.top() >= 0 && e.top() <= 600 - SHIP_HEIGHT);
        assert!(e.visible());
    }
}

#[test]
fn enemy_walk_visits_both_directions() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut e = Enemy::new(300, 300);
    let mut moved_left = false;
    let mut moved_right = false;
    for _ in 0..100 {
        let before = e.left();
        e.step_random(false, &field(), &mut rng);
        moved_left |= e.left() < before;
        moved_right |= e.left() > before;
    }
    assert!(moved_left && moved_right);
}

// ── Projectile aiming ─────────────────────────────────────────────────────────

#[test]
fn aim_dominant_axis() {
    assert_eq!(Projectile::aim((100, 100), (400, 150)), Direction::Right);
    assert_eq!(Projectile::aim((100, 100), (0, 150)), Direction::Left);
    assert_eq!(Projectile::aim((100, 100), (120, 400)), Direction::Down);
    assert_eq!(Projectile::aim((100, 100), (120, 0)), Direction::Up);
}

#[test]
fn aim_tie_goes_horizontal() {
    assert_eq!(Projectile::aim((0, 0), (5, 5)), Direction::Right);
    assert_eq!(Projectile::aim((0, 0), (-5, 5)), Direction::Left);
}

#[test]
fn aim_at_own_position_goes_left() {
    assert_eq!(Projectile::aim((50, 50), (50, 50)), Direction::Left);
}

// ── Projectile launch ─────────────────────────────────────────────────────────

#[test]
fn launch_places_and_aims() {
    let mut audio = CountingAudio::default();
    let mut b = Projectile::new();
    assert!(b.try_launch(Key::Fire, (200, 300), (600, 320), &mut audio));
    assert!(b.visible());
    assert_eq!((b.left(), b.top()), (200, 300));
    assert_eq!(b.direction(), Some(Direction::Right));
    assert_eq!(audio.launches, 1);
}

#[test]
fn launch_needs_fire_key() {
    let mut audio = CountingAudio::default();
    let mut b = Projectile::new();
    assert!(!b.try_launch(Key::Up, (200, 300), (600, 320), &mut audio));
    assert!(!b.visible());
    assert_eq!(audio.launches, 0);
}

#[test]
fn launch_guard_while_in_flight() {
    let mut audio = CountingAudio::default();
    let mut b = Projectile::new();
    b.try_launch(Key::Fire, (200, 300), (600, 320), &mut audio);
    b.advance(false, &field());
    let before = b.clone();

    assert!(!b.try_launch(Key::Fire, (10, 10), (10, 500), &mut audio));
    assert_eq!(b, before);
    assert_eq!(audio.launches, 1);
}

// ── Projectile flight ─────────────────────────────────────────────────────────

#[test]
fn projectile_fired_up_travels_fifty_in_ten_ticks() {
    let mut audio = CountingAudio::default();
    let mut b = Projectile::new();
    b.try_launch(Key::Fire, (400, 400), (400, 50), &mut audio);
    assert_eq!(b.direction(), Some(Direction::Up));
    for _ in 0..10 {
        b.advance(false, &field());
    }
    assert_eq!((b.left(), b.top()), (400, 350));
    assert!(b.visible());
}

#[test]
fn projectile_expires_at_edge() {
    let mut b = Projectile::new();
    b.try_launch(Key::Fire, (10, 300), (0, 300), &mut Silent);
    assert_eq!(b.direction(), Some(Direction::Left));
    b.advance(false, &field());
    assert!(b.visible());
    assert_eq!(b.left(), 5);
    b.advance(false, &field());
    assert_eq!(b.left(), 0);
    assert!(b.visible());
    b.advance(false, &field());
    assert!(!b.visible());
    assert_eq!(b.left(), 0);
}

#[test]
fn projectile_frozen_while_paused_or_spent() {
    let mut b = Projectile::new();
    b.try_launch(Key::Fire, (300, 300), (300, 500), &mut Silent);
    assert_eq!(b.direction(), Some(Direction::Down));
    b.advance(true, &field());
    assert_eq!(b.top(), 300);

    b.spend();
    b.advance(false, &field());
    assert_eq!((b.left(), b.top()), (300, 300));
    assert_eq!(b.direction(), None);
}
