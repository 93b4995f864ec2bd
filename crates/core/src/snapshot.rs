use crate::movement::Tetromino;
use crate::scoring::DisplayStats;
use crate::types::{Phase, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    pub fn tetromino(&self) -> Tetromino {
        Tetromino {
            kind: self.kind,
            rotation: self.rotation,
            x: self.x,
            y: self.y,
        }
    }
}

/// Everything a front end needs to draw one frame, copied out of the game.
///
/// Board cells hold `0` for empty and [`PieceKind::shape_id`] otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PieceKind>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub phase: Phase,
    pub paused: bool,
    pub flash: bool,
    pub clearing_rows: [bool; BOARD_HEIGHT as usize],
    pub clear_step: u8,
    pub stats: DisplayStats,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            hold: None,
            can_hold: true,
            phase: Phase::Init,
            paused: false,
            flash: false,
            clearing_rows: [false; BOARD_HEIGHT as usize],
            clear_step: 0,
            stats: DisplayStats::default(),
        }
    }
}
