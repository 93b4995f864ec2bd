//! Piece catalog and movement resolver tests

use tick_tetris::core::movement::{kick_shift, kicked};
use tick_tetris::core::pieces::distinct_orientations;
use tick_tetris::core::{
    descriptor, fall_tetromino, get_shape, move_tetromino, rotate_tetromino, Board, Fall,
    Tetromino,
};
use tick_tetris::types::{
    MoveDirection, PieceKind, RotateDirection, Rotation, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X,
    SPAWN_Y,
};

const ROTATIONS: [Rotation; 4] = [
    Rotation::North,
    Rotation::East,
    Rotation::South,
    Rotation::West,
];

#[test]
fn test_offsets_fit_in_a_four_by_four_box() {
    for kind in PieceKind::ALL {
        for rot in ROTATIONS {
            for (dx, dy) in get_shape(kind, rot) {
                assert!((0..4).contains(&dx), "{:?} {:?}", kind, rot);
                assert!((0..4).contains(&dy), "{:?} {:?}", kind, rot);
            }
        }
    }
}

#[test]
fn test_distinct_orientation_counts() {
    for kind in PieceKind::ALL {
        let mut seen: Vec<[(i8, i8); 4]> = Vec::new();
        for rot in ROTATIONS {
            let mut shape = get_shape(kind, rot);
            shape.sort();
            if !seen.contains(&shape) {
                seen.push(shape);
            }
        }
        assert_eq!(seen.len(), distinct_orientations(kind), "{:?}", kind);
    }
}

#[test]
fn test_four_turns_return_to_start() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        for dir in [RotateDirection::Left, RotateDirection::Right] {
            let start = Tetromino::at(kind, 3, 8);
            let mut piece = start;
            for _ in 0..4 {
                piece = rotate_tetromino(&piece, &board, dir).unwrap();
            }
            assert_eq!(piece, start, "{:?} {:?}", kind, dir);
        }
    }
}

#[test]
fn test_descriptor_matches_catalog() {
    for kind in PieceKind::ALL {
        let d = descriptor(kind);
        assert_eq!(d.rotation, Rotation::North);
        assert_eq!(d.offsets, get_shape(kind, Rotation::North));
        assert_eq!(d.shape_id, kind.index() as u8 + 1);
    }
}

#[test]
fn test_spawn_anchor() {
    for kind in PieceKind::ALL {
        let piece = Tetromino::new(kind);
        assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
        assert!(piece.fits(&Board::new()));
        assert!(piece.visible_cells().iter().all(|&(_, _, visible)| !visible));
    }
}

#[test]
fn test_rejected_move_leaves_piece_unchanged() {
    let mut board = Board::new();
    for y in 0..BOARD_HEIGHT as i8 {
        board.set(0, y, Some(PieceKind::I));
    }
    // J North occupies columns 1..=3 at x = 1.
    let piece = Tetromino::at(PieceKind::J, 1, 5);
    let copy = piece;
    assert!(move_tetromino(&piece, &board, MoveDirection::Left).is_none());
    assert_eq!(piece, copy);
    assert!(move_tetromino(&piece, &board, MoveDirection::Right).is_some());
}

#[test]
fn test_every_accepted_move_fits() {
    let mut board = Board::new();
    board.set(4, 12, Some(PieceKind::S));
    board.set(6, 15, Some(PieceKind::Z));

    for kind in PieceKind::ALL {
        for rot in ROTATIONS {
            for x in -3..BOARD_WIDTH as i8 {
                let piece = Tetromino { kind, rotation: rot, x, y: 10 };
                if !piece.fits(&board) {
                    continue;
                }
                for dir in [MoveDirection::Left, MoveDirection::Right, MoveDirection::Down] {
                    if let Some(moved) = move_tetromino(&piece, &board, dir) {
                        assert!(moved.fits(&board));
                    }
                }
                for dir in [RotateDirection::Left, RotateDirection::Right] {
                    if let Some(turned) = rotate_tetromino(&piece, &board, dir) {
                        assert!(turned.fits(&board));
                        assert_eq!(turned.y, piece.y);
                    }
                }
            }
        }
    }
}

#[test]
fn test_kick_depends_on_kind() {
    // One column past the left wall.
    let i_cells = [(-1, 0), (0, 0), (1, 0), (2, 0)];
    assert_eq!(kick_shift(&i_cells), 1);

    let board = Board::new();
    let i = Tetromino {
        kind: PieceKind::I,
        rotation: Rotation::North,
        x: -1,
        y: 4,
    };
    let corrected = kicked(&i, &board).unwrap();
    assert_eq!(corrected.x, 0);

    let t = Tetromino {
        kind: PieceKind::T,
        rotation: Rotation::North,
        x: -1,
        y: 4,
    };
    let corrected = kicked(&t, &board).unwrap();
    assert_eq!(corrected.x, 0);

    let o = Tetromino {
        kind: PieceKind::O,
        rotation: Rotation::North,
        x: -2,
        y: 4,
    };
    // O's cells start at offset column 1.
    assert_eq!(kicked(&o, &board).unwrap().x, -1);
}

#[test]
fn test_kicked_rotation_into_occupied_cells_is_rejected() {
    let mut board = Board::new();
    // Vertical I against the left wall, with a locked cell where the kicked
    // horizontal I would go.
    let piece = Tetromino {
        kind: PieceKind::I,
        rotation: Rotation::East,
        x: -2,
        y: 5,
    };
    board.set(3, 6, Some(PieceKind::O));
    assert!(rotate_tetromino(&piece, &board, RotateDirection::Right).is_none());
}

#[test]
fn test_fall_to_floor() {
    let board = Board::new();
    let mut piece = Tetromino::new(PieceKind::T);
    let mut steps = 0;
    while let Fall::Moved(next) = fall_tetromino(&piece, &board) {
        piece = next;
        steps += 1;
    }
    // T North bottom row is y + 1, resting on row 19.
    assert_eq!(piece.y, 18);
    assert_eq!(steps, 18 - SPAWN_Y as i32);
}
