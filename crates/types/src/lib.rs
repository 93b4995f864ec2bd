//! Core types module - shared data structures and constants
//!
//! Pure data shared by the engine, the terminal front end and the input layer.
//! Nothing in here has behavior beyond small conversions.
//!
//! # Coordinates
//!
//! The playfield is 10 columns by 20 rows, `(x, y)` with `y = 0` at the top.
//! Above the field sits a hidden spawn buffer of [`SPAWN_BUFFER_ROWS`] rows,
//! addressed with negative `y`. Pieces spawn inside the buffer and only cells
//! with `y >= 0` are ever written into the board.
//!
//! # Timing Constants
//!
//! All durations are integer milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FALL_BASE_MS` | 1200 | Gravity intercept, `1200 - 200 * level` |
//! | `FALL_MAX_MS` | 2000 | Upper clamp on the gravity interval |
//! | `SOFT_DROP_MS` | 32 | Fall wait cap while soft drop is held |
//! | `CLEAR_STEP_MS` | 64 | One line-clear wipe step (four frames) |
//! | `AUTO_SHIFT_DELAY_MS` | 150 | Hold time before sideways repeat |
//! | `AUTO_SHIFT_REPEAT_MS` | 50 | Sideways repeat interval |
//!
//! # Examples
//!
//! ```
//! use tick_tetris_types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 visible rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Hidden rows above the visible field where pieces appear.
pub const SPAWN_BUFFER_ROWS: i8 = 4;

/// Anchor column of a freshly spawned active piece.
pub const SPAWN_X: i8 = 3;

/// Anchor row of a freshly spawned active piece (top of the spawn buffer).
pub const SPAWN_Y: i8 = -SPAWN_BUFFER_ROWS;

/// Screen cell of playfield `(0, 0)` in the reference layout.
///
/// Only presentation code cares about this; the engine works in playfield
/// coordinates.
pub const FIELD_ORIGIN: (u16, u16) = (11, 6);

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval intercept: `FALL_BASE_MS - FALL_STEP_MS * level`.
pub const FALL_BASE_MS: u32 = 1200;

/// Gravity interval decrease per level.
pub const FALL_STEP_MS: u32 = 200;

/// Upper clamp on the gravity interval.
pub const FALL_MAX_MS: u32 = 2000;

/// While soft drop is held the remaining fall wait never exceeds two frames.
pub const SOFT_DROP_MS: u32 = 2 * TICK_MS;

/// One step of the line-clear wipe.
pub const CLEAR_STEP_MS: u32 = 4 * TICK_MS;

/// Number of wipe steps before rows are compacted.
pub const CLEAR_STEPS: u8 = 6;

/// Sideways auto-shift delay.
pub const AUTO_SHIFT_DELAY_MS: u32 = 150;

/// Sideways auto-shift repeat interval.
pub const AUTO_SHIFT_REPEAT_MS: u32 = 50;

/// Score clamp (inclusive).
pub const SCORE_MAX: u32 = 9_999_900;

/// Cleared lines clamp (inclusive).
pub const LINES_MAX: u32 = 999;

/// Level clamp (inclusive).
pub const LEVEL_MAX: u32 = 99;

/// Per-kind placement counter clamp (inclusive).
pub const STAT_MAX: u32 = 999;

/// Level a new game starts on.
pub const START_LEVEL: u32 = 1;

/// Lines between level-ups.
pub const LINES_PER_LEVEL: u32 = 10;

/// Score awarded for clearing `n` rows at once, indexed by `n`.
pub const LINE_SCORES: [u32; 5] = [0, 100, 200, 400, 800];

/// Score for a four-row clear that directly follows another four-row clear.
pub const BACK_TO_BACK_SCORE: u32 = 1200;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(SOFT_DROP_MS, 32);
        assert_eq!(CLEAR_STEP_MS, 64);
        assert_eq!(SPAWN_Y, -4);
        assert_eq!(LINE_SCORES[4], 800);
        assert!(BACK_TO_BACK_SCORE > LINE_SCORES[4]);
    }
}

/// The seven tetromino piece kinds
///
/// The declaration order is the catalog order and doubles as the index of the
/// per-kind placement counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    L,
    J,
    S,
    Z,
    T,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::L => 2,
            PieceKind::J => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::T => 6,
        }
    }

    /// Opaque non-zero shape id, used for board hashing and color lookup.
    pub fn shape_id(&self) -> u8 {
        self.index() as u8 + 1
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tick_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
        }
    }
}

/// Discrete piece orientation
///
/// - **North**: spawn orientation (0°)
/// - **East**: 90° clockwise
/// - **South**: 180°
/// - **West**: 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Turn one step in the given direction.
    pub fn turned(&self, dir: RotateDirection) -> Self {
        match dir {
            RotateDirection::Left => self.rotate_ccw(),
            RotateDirection::Right => self.rotate_cw(),
        }
    }

    /// Rotation index 0..=3.
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from any index, wrapping modulo 4.
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Direction of a rotation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    /// Counter-clockwise
    Left,
    /// Clockwise
    Right,
}

/// Direction of a one-cell translation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    /// Cell delta `(dx, dy)` of this direction.
    pub fn delta(&self) -> (i8, i8) {
        match self {
            MoveDirection::Left => (-1, 0),
            MoveDirection::Right => (1, 0),
            MoveDirection::Down => (0, 1),
        }
    }
}

/// Game state machine phases
///
/// Exactly one phase is active per tick. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Populates the catalog selection pool, entered once at startup.
    Init,
    /// Promotes the next piece to active and finalizes any pending clear.
    Next,
    /// Active piece falls under gravity and accepts input.
    Move,
    /// Banks or swaps the active piece.
    Hold,
    /// Writes the active piece into the board.
    PlaceTile,
    /// Scans the board for complete rows.
    LineCheck,
    /// Runs the center-out wipe animation.
    Clear,
    /// Compacts rows above the cleared ones.
    Drop,
    /// Terminal; input is ignored.
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Init => "init",
            Phase::Next => "next",
            Phase::Move => "move",
            Phase::Hold => "hold",
            Phase::PlaceTile => "place_tile",
            Phase::LineCheck => "line_check",
            Phase::Clear => "clear",
            Phase::Drop => "drop",
            Phase::GameOver => "game_over",
        }
    }
}

/// One tick worth of player intents
///
/// `move_left`, `move_right` and `soft_drop` are level-triggered: true for as
/// long as the control is held. `rotate_left`, `rotate_right`, `hold` and
/// `pause` are edge-triggered: true only on the tick the control was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    pub move_left: bool,
    pub move_right: bool,
    pub soft_drop: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub hold: bool,
    pub pause: bool,
}

impl InputFrame {
    /// No intents at all.
    pub const IDLE: InputFrame = InputFrame {
        move_left: false,
        move_right: false,
        soft_drop: false,
        rotate_left: false,
        rotate_right: false,
        hold: false,
        pause: false,
    };

    /// True when no intent is set.
    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Locked cell, remembering which shape placed it
pub type Cell = Option<PieceKind>;
