//! Pieces module - the seven-piece catalog
//!
//! Every kind has an offset table with one entry per orientation. Offsets are
//! relative to the piece anchor and live inside a 4x4 box. O is rotation
//! invariant and I only has two distinct layouts.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

const I_HORIZONTAL: PieceShape = [(0, 1), (1, 1), (2, 1), (3, 1)];
const I_VERTICAL: PieceShape = [(2, 0), (2, 1), (2, 2), (2, 3)];

/// Offset tables indexed by `[kind.index()][rotation.index()]`.
const SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [I_HORIZONTAL, I_VERTICAL, I_HORIZONTAL, I_VERTICAL],
    // O
    [[(1, 0), (2, 0), (1, 1), (2, 1)]; 4],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind.index()][rotation.index()]
}

/// Number of distinct layouts a kind cycles through.
pub fn distinct_orientations(kind: PieceKind) -> usize {
    match kind {
        PieceKind::O => 1,
        PieceKind::I => 2,
        _ => 4,
    }
}

/// What the piece factory hands to presentation code for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDescriptor {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub offsets: PieceShape,
    pub shape_id: u8,
}

/// Fresh descriptor for `kind` in spawn orientation.
pub fn descriptor(kind: PieceKind) -> PieceDescriptor {
    PieceDescriptor {
        kind,
        rotation: Rotation::North,
        offsets: get_shape(kind, Rotation::North),
        shape_id: kind.shape_id(),
    }
}
