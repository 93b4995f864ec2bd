//! Core game logic - pure, deterministic, and testable
//!
//! Everything that decides what happens in a game lives here. Nothing in this
//! crate reads a device, draws, or sleeps; the outside world is reached only
//! through the returned [`Effect`]s and the traits in [`ports`].
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 playfield of locked cells with row checks and compaction
//! - [`pieces`]: per-kind, per-orientation offset tables and the piece factory
//! - [`movement`]: the active piece and the move/rotate/fall resolver
//! - [`rng`]: seeded LCG with uniform (default) and 7-bag randomizers
//! - [`line_clear`]: completed-row bookkeeping and the wipe animation
//! - [`scoring`]: score table, back-to-back tetris, level and counters
//! - [`game_state`]: the phase machine tying it all together
//! - [`snapshot`]: a copy of the state for front ends
//! - [`ports`]: input, display, debris and piece-factory boundaries
//!
//! # Game Rules
//!
//! - Pieces spawn hidden in a 4-row buffer above the field and fall one row per
//!   gravity interval (`1200 - 200 * level` ms, never negative).
//! - Left/right/down moves and rotations are rejected in full when illegal.
//!   Rotation corrects the piece back inside the side walls before checking.
//! - Locking with any cell still in the buffer ends the game.
//! - Full rows are wiped from the center outwards over six steps, then removed.
//! - 1/2/3/4 rows score 100/200/400/800; a tetris right after a tetris scores
//!   1200. Ten lines per level, one level at a time.
//! - One hold per piece, re-armed at the next line check.
//!
//! # Example
//!
//! ```
//! use tick_tetris_core::{GameConfig, GameState};
//! use tick_tetris_types::{InputFrame, Phase, TICK_MS};
//!
//! let mut game = GameState::new(GameConfig::new(12345));
//! assert_eq!(game.phase(), Phase::Init);
//!
//! // Init -> Next -> Move
//! game.tick(&InputFrame::IDLE, TICK_MS);
//! game.tick(&InputFrame::IDLE, TICK_MS);
//! assert_eq!(game.phase(), Phase::Move);
//!
//! let mut frame = InputFrame::IDLE;
//! frame.rotate_right = true;
//! game.tick(&frame, TICK_MS);
//! assert!(game.active().is_some());
//! ```
//!
//! # Timing
//!
//! The game uses a fixed timestep:
//! - **Tick Rate**: 16ms (approximately 60 FPS)
//! - **Gravity**: 1000ms per row at level 1, 200ms less per level
//! - **Soft Drop**: caps the remaining fall wait at 32ms
//! - **Clear**: one wipe step every 64ms
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with elapsed time.

pub mod board;
pub mod game_state;
pub mod line_clear;
pub mod movement;
pub mod pieces;
pub mod ports;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tick_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{tick, DebrisCell, Effect, Effects, GameConfig, GameState};
pub use line_clear::LineClearSession;
pub use movement::{fall_tetromino, move_tetromino, rotate_tetromino, Fall, Tetromino};
pub use pieces::{descriptor, get_shape, PieceDescriptor, PieceShape};
pub use ports::{dispatch, DebrisSink, DisplaySink, InputSource, PieceFactory};
pub use rng::{PieceSource, RandomizerKind, SimpleRng};
pub use scoring::{clear_points, fall_interval_ms, DisplayStats, ScoreState};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
