//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders a [`crate::core::GameSnapshot`] into a simple framebuffer that
//! can be flushed to a terminal backend, and it implements the core's display
//! and debris ports for the terminal.

pub mod debris;
pub mod fb;
pub mod game_view;
pub mod hud;
pub mod renderer;

pub use tick_tetris_core as core;
pub use tick_tetris_types as types;

pub use debris::{DebrisField, Particle};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use hud::Hud;
pub use renderer::{encode_frame_into, TerminalRenderer};
