//! Narrow boundaries between the core and its collaborators
//!
//! The core never reads devices or draws anything. A front end implements
//! these traits and routes a tick's [`Effects`] through [`dispatch`].

use crate::game_state::{DebrisCell, Effect, Effects};
use crate::pieces::{descriptor, PieceDescriptor};
use crate::scoring::DisplayStats;
use crate::types::{InputFrame, PieceKind};

/// Delivers one frame of intents per tick.
pub trait InputSource {
    fn poll(&mut self, elapsed_ms: u32) -> InputFrame;
}

/// Receives the raw display values whenever one of them changes.
pub trait DisplaySink {
    fn show(&mut self, stats: &DisplayStats);
}

/// Spawns one debris object per formerly locked cell at game over.
pub trait DebrisSink {
    fn spawn(&mut self, cell: &DebrisCell);
}

/// Turns a shape kind into the descriptor a front end instantiates.
pub trait PieceFactory {
    fn create(&mut self, kind: PieceKind) -> PieceDescriptor;
}

/// The catalog factory: offsets, spawn orientation and shape id only.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogFactory;

impl PieceFactory for CatalogFactory {
    fn create(&mut self, kind: PieceKind) -> PieceDescriptor {
        descriptor(kind)
    }
}

/// A scripted input source, mostly for tests and replays.
///
/// Yields the frames in order, then idle frames forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<InputFrame>,
    pos: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<InputFrame>) -> Self {
        Self { frames, pos: 0 }
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _elapsed_ms: u32) -> InputFrame {
        let frame = self.frames.get(self.pos).copied().unwrap_or_default();
        self.pos = self.pos.saturating_add(1);
        frame
    }
}

/// Route display and debris effects to their sinks.
///
/// Phase and flash effects are left for the caller to inspect.
pub fn dispatch<D, B>(effects: &Effects, display: &mut D, debris: &mut B)
where
    D: DisplaySink + ?Sized,
    B: DebrisSink + ?Sized,
{
    for effect in effects {
        match effect {
            Effect::Display(stats) => display.show(stats),
            Effect::Debris(cell) => debris.spawn(cell),
            Effect::PhaseEntered(_) | Effect::Flash(_) => {}
        }
    }
}
