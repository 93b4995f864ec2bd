//! Active piece and the movement/rotation resolver
//!
//! All functions here are pure: they take the current piece and board and
//! return the piece after the request, or `None` when the request is illegal.
//! A rejected request never partially applies.

use crate::board::Board;
use crate::pieces::{descriptor, get_shape, PieceDescriptor, PieceShape};
use crate::types::{
    MoveDirection, PieceKind, RotateDirection, Rotation, BOARD_WIDTH, SPAWN_X, SPAWN_Y,
};

/// The falling piece
///
/// Visibility of its cells is derived from their row (see
/// [`Tetromino::visible_cells`]) rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at the top-spawn anchor
    pub fn new(kind: PieceKind) -> Self {
        Self::from_descriptor(&descriptor(kind))
    }

    /// Spawn orientation at an explicit anchor.
    pub fn at(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Spawn a factory descriptor at the top-spawn anchor.
    pub fn from_descriptor(descriptor: &PieceDescriptor) -> Self {
        Self {
            kind: descriptor.kind,
            rotation: descriptor.rotation,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute cell positions.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Cells paired with their visibility. Cells in the spawn buffer are hidden.
    pub fn visible_cells(&self) -> [(i8, i8, bool); 4] {
        self.cells().map(|(x, y)| (x, y, is_visible_row(y)))
    }

    /// True while any cell is still in the spawn buffer.
    pub fn is_above_field(&self) -> bool {
        self.cells().iter().any(|&(_, y)| !is_visible_row(y))
    }

    /// Check if all minos are at free positions on the board
    pub fn fits(&self, board: &Board) -> bool {
        self.cells().iter().all(|&(x, y)| board.is_free(x, y))
    }

    fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Rows at or below the spawn-buffer boundary are drawn.
pub fn is_visible_row(y: i8) -> bool {
    y >= 0
}

/// Translate one cell left, right or down.
///
/// Rejected in full if any target cell is occupied, outside the side walls, or
/// below the floor.
pub fn move_tetromino(piece: &Tetromino, board: &Board, dir: MoveDirection) -> Option<Tetromino> {
    let (dx, dy) = dir.delta();
    let moved = piece.shifted(dx, dy);
    moved.fits(board).then_some(moved)
}

/// Horizontal shift that brings every cell inside the side walls.
///
/// Cells left of column 0 push the piece right; cells right of the last column
/// push it left. The amount depends on the kind's offset table, so I and O end
/// at different anchor columns than the three-wide kinds.
pub fn kick_shift(cells: &[(i8, i8); 4]) -> i8 {
    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let max_x = cells.iter().map(|&(x, _)| x).max().unwrap_or(0);
    let right_wall = BOARD_WIDTH as i8 - 1;

    if min_x < 0 {
        -min_x
    } else if max_x > right_wall {
        right_wall - max_x
    } else {
        0
    }
}

/// Apply the wall correction to `piece` and keep it only if it then fits.
pub fn kicked(piece: &Tetromino, board: &Board) -> Option<Tetromino> {
    let corrected = piece.shifted(kick_shift(&piece.cells()), 0);
    corrected.fits(board).then_some(corrected)
}

/// Turn one step about the current anchor with wall correction.
///
/// Returns `None`, leaving orientation and position untouched, if the corrected
/// placement collides with the board or the floor.
pub fn rotate_tetromino(
    piece: &Tetromino,
    board: &Board,
    dir: RotateDirection,
) -> Option<Tetromino> {
    let turned = Tetromino {
        rotation: piece.rotation.turned(dir),
        ..*piece
    };
    kicked(&turned, board)
}

/// Outcome of one gravity or soft-drop step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fall {
    /// The piece moved down one row.
    Moved(Tetromino),
    /// Something is directly below; the piece must lock where it is.
    Landed,
}

/// One row of gravity.
pub fn fall_tetromino(piece: &Tetromino, board: &Board) -> Fall {
    match move_tetromino(piece, board, MoveDirection::Down) {
        Some(moved) => Fall::Moved(moved),
        None => Fall::Landed,
    }
}
