//! Terminal Tetris runner (default binary).
//!
//! Samples keys into one input frame per fixed tick, advances the game, routes
//! its effects to the HUD and debris field, and draws with the framebuffer
//! renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info};

use tick_tetris::config::RunConfig;
use tick_tetris::core::ports::InputSource;
use tick_tetris::core::{dispatch, Effects, GameSnapshot, GameState};
use tick_tetris::input::{should_quit, KeyTracker};
use tick_tetris::logging;
use tick_tetris::term::{DebrisField, FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = RunConfig::from_env();
    logging::init(&config)?;
    info!(
        seed = config.seed,
        randomizer = ?config.randomizer,
        tick_ms = config.tick_ms,
        "starting"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;
    if !term.key_release_events() {
        info!("terminal reports no key releases, using release timeout");
    }

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        error!(error = %e, "failed to restore terminal");
    }
    if let Err(e) = &result {
        error!(error = %e, "runner stopped");
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &RunConfig) -> Result<()> {
    let mut runs = 0;
    let mut game = GameState::new(config.game_config(runs));

    let view = GameView::default();
    let mut keys = KeyTracker::new();
    let mut hud = Hud::new();
    let mut debris = DebrisField::new(config.seed);
    let mut effects = Effects::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_ms = config.tick_ms;
    let tick_duration = Duration::from_millis(tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, &hud, &debris, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        info!(score = game.score(), "quit");
                        return Ok(());
                    }
                    keys.handle_key(key);
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() < tick_duration {
            continue;
        }
        last_tick = Instant::now();

        if keys.take_restart() && game.game_over() {
            runs += 1;
            let top_score = game.top_score();
            game = GameState::with_top_score(config.game_config(runs), top_score);
            hud = Hud::new();
            debris.clear();
            keys.reset();
            info!(run = runs, top_score, "restart");
        }

        let frame = keys.poll(tick_ms);
        effects.clear();
        game.tick_into(&frame, tick_ms, &mut effects);
        dispatch(&effects, &mut hud, &mut debris);
        debris.update(tick_ms);
    }
}
