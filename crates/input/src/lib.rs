//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`Intent`]s and provides a key tracker that
//! turns them into one [`crate::types::InputFrame`] per tick, suitable for
//! terminal environments (including terminals without key-release events).

pub mod map;
pub mod tracker;

pub use tick_tetris_core as core;
pub use tick_tetris_types as types;

pub use map::{map_key, should_quit, Intent};
pub use tracker::KeyTracker;
