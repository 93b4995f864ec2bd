//! Key events through the tracker into a running game

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use tick_tetris::core::ports::InputSource;
use tick_tetris::core::{GameConfig, GameState};
use tick_tetris::input::KeyTracker;
use tick_tetris::types::{InputFrame, Phase, Rotation, TICK_MS};

fn started() -> GameState {
    let mut game = GameState::new(GameConfig::new(31));
    while game.phase() != Phase::Move {
        game.tick(&InputFrame::IDLE, TICK_MS);
    }
    game
}

fn event(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
    KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
}

fn step(keys: &mut KeyTracker, game: &mut GameState) {
    let frame = keys.poll(TICK_MS);
    game.tick(&frame, TICK_MS);
}

fn active_x(game: &GameState) -> i8 {
    game.active().unwrap().x
}

#[test]
fn test_held_key_auto_shifts_until_released() {
    let mut game = started();
    let mut keys = KeyTracker::new();
    let start = active_x(&game);

    keys.handle_key(event(KeyCode::Left, KeyEventKind::Press));
    step(&mut keys, &mut game);
    assert_eq!(active_x(&game), start - 1);

    for _ in 0..20 {
        keys.handle_key(event(KeyCode::Left, KeyEventKind::Repeat));
        step(&mut keys, &mut game);
    }
    let shifted = active_x(&game);
    assert!(shifted < start - 1, "no auto-shift repeat");

    keys.handle_key(event(KeyCode::Left, KeyEventKind::Release));
    for _ in 0..20 {
        step(&mut keys, &mut game);
    }
    assert_eq!(active_x(&game), shifted);
}

#[test]
fn test_tap_without_release_moves_once() {
    let mut game = started();
    let mut keys = KeyTracker::new();
    let start = active_x(&game);

    keys.handle_key(event(KeyCode::Char('d'), KeyEventKind::Press));
    for _ in 0..30 {
        step(&mut keys, &mut game);
    }
    assert_eq!(active_x(&game), start + 1);
}

#[test]
fn test_rotation_tap_applies_once() {
    let mut game = started();
    let mut keys = KeyTracker::new();

    keys.handle_key(event(KeyCode::Char('x'), KeyEventKind::Press));
    keys.handle_key(event(KeyCode::Char('x'), KeyEventKind::Repeat));
    step(&mut keys, &mut game);
    assert_eq!(game.active().unwrap().rotation, Rotation::East);

    for _ in 0..5 {
        step(&mut keys, &mut game);
    }
    assert_eq!(game.active().unwrap().rotation, Rotation::East);
}

#[test]
fn test_pause_key_toggles() {
    let mut game = started();
    let mut keys = KeyTracker::new();

    keys.handle_key(event(KeyCode::Char('p'), KeyEventKind::Press));
    step(&mut keys, &mut game);
    assert!(game.paused());

    let before = game.active();
    keys.handle_key(event(KeyCode::Left, KeyEventKind::Press));
    for _ in 0..100 {
        step(&mut keys, &mut game);
    }
    assert!(game.paused());
    assert_eq!(game.active(), before);

    keys.handle_key(event(KeyCode::Esc, KeyEventKind::Press));
    step(&mut keys, &mut game);
    assert!(!game.paused());
}

#[test]
fn test_hold_key_swaps_piece() {
    let mut game = started();
    let mut keys = KeyTracker::new();
    let first = game.active().unwrap().kind;

    keys.handle_key(event(KeyCode::Char('c'), KeyEventKind::Press));
    step(&mut keys, &mut game);
    assert_eq!(game.hold_piece(), Some(first));
    assert!(!game.can_hold());
}

#[test]
fn test_restart_request_is_taken_once() {
    let mut keys = KeyTracker::new();
    keys.handle_key(event(KeyCode::Char('r'), KeyEventKind::Press));

    let frame = keys.poll(TICK_MS);
    assert!(frame.is_idle());
    assert!(keys.take_restart());
    assert!(!keys.take_restart());
}
