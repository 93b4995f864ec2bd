//! Tick Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `tick_tetris::{core,input,term,types}` and hosts the runner's
//! configuration and logging setup.

pub mod config;
pub mod logging;

pub use tick_tetris_core as core;
pub use tick_tetris_input as input;
pub use tick_tetris_term as term;
pub use tick_tetris_types as types;

pub use config::RunConfig;
