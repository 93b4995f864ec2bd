//! Board module - the grid of locked cells
//!
//! The board is the 10x20 visible playfield. Each cell is empty or remembers the
//! kind of the piece that locked there. Falling pieces are never written here
//! until they lock.
//!
//! Coordinates: `(x, y)` with x in 0..=9 (left to right) and y in 0..=19 (top to
//! bottom). Rows with negative `y` are the hidden spawn buffer; the board has no
//! storage for them and treats them as free space inside the side walls.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if outside the playfield
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if outside the playfield
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether an active piece cell may sit at `(x, y)`.
    ///
    /// Free means: inside the side walls, above the floor, and either in the
    /// spawn buffer or on an empty playfield cell.
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || !self.is_occupied(x, y)
    }

    /// Number of occupied cells in row `y`.
    pub fn row_fill(&self, y: usize) -> usize {
        if y >= BOARD_HEIGHT as usize {
            return 0;
        }
        let start = y * BOARD_WIDTH as usize;
        self.cells[start..start + BOARD_WIDTH as usize]
            .iter()
            .filter(|cell| cell.is_some())
            .count()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < BOARD_HEIGHT as usize && self.row_fill(y) == BOARD_WIDTH as usize
    }

    /// Indices of every complete row, top to bottom.
    pub fn full_rows(&self) -> ArrayVec<i8, { BOARD_HEIGHT as usize }> {
        (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .map(|y| y as i8)
            .collect()
    }

    /// Remove row `y` and shift every row above it down by one.
    ///
    /// The top row becomes empty. Returns false if `y` is outside the field.
    pub fn clear_row(&mut self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }

        let width = BOARD_WIDTH as usize;
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }
        for cell in &mut self.cells[..width] {
            *cell = None;
        }

        true
    }

    /// Total number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Every locked cell as `(x, y, kind)`, row-major.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i8, i8, PieceKind)> + '_ {
        let width = BOARD_WIDTH as usize;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|kind| ((idx % width) as i8, (idx / width) as i8, kind))
        })
    }

    /// Write the board as shape ids (0 = empty) into a fixed grid.
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * width + x].map_or(0, |kind| kind.shape_id());
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Build a board from ASCII rows, bottom-aligned.
    ///
    /// `.` is empty, any other character is a locked cell of `kind`. Rows
    /// shorter than the board width are padded with empty cells.
    pub fn from_ascii(rows: &[&str], kind: PieceKind) -> Self {
        let mut board = Self::new();
        let top = BOARD_HEIGHT as usize - rows.len().min(BOARD_HEIGHT as usize);
        for (i, row) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            for (x, ch) in row.chars().take(BOARD_WIDTH as usize).enumerate() {
                if ch != '.' {
                    board.set(x as i8, (top + i) as i8, Some(kind));
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
        assert_eq!(Board::index(0, -1), None);
    }

    #[test]
    fn spawn_buffer_is_free_inside_walls() {
        let board = Board::new();
        assert!(board.is_free(0, -4));
        assert!(board.is_free(9, -1));
        assert!(!board.is_free(-1, -1));
        assert!(!board.is_free(10, -2));
        assert!(!board.is_free(4, 20));
    }

    #[test]
    fn from_ascii_is_bottom_aligned() {
        let board = Board::from_ascii(&["#.........", "##########"], PieceKind::Z);
        assert_eq!(board.get(0, 18), Some(Some(PieceKind::Z)));
        assert_eq!(board.get(1, 18), Some(None));
        assert!(board.is_row_full(19));
        assert_eq!(board.occupied_count(), 11);
    }

    #[test]
    fn clear_row_shifts_rows_above() {
        let mut board = Board::from_ascii(&[".#........", "##########"], PieceKind::T);
        board.set(4, 0, Some(PieceKind::I));

        assert!(board.clear_row(19));

        assert_eq!(board.get(1, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.get(4, 1), Some(Some(PieceKind::I)));
        assert_eq!(board.get(4, 0), Some(None));
        assert_eq!(board.occupied_count(), 2);
        assert!(!board.clear_row(20));
    }

    #[test]
    fn write_u8_grid_uses_shape_ids() {
        let mut board = Board::new();
        board.set(2, 3, Some(PieceKind::I));
        board.set(9, 19, Some(PieceKind::T));

        let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        board.write_u8_grid(&mut grid);

        assert_eq!(grid[3][2], PieceKind::I.shape_id());
        assert_eq!(grid[19][9], PieceKind::T.shape_id());
        assert_eq!(grid[0][0], 0);
    }
}
