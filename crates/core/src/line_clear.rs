//! Line-clear session - completed rows and the wipe animation
//!
//! A session is filled by the line check, animated for [`CLEAR_STEPS`] steps
//! (each step blanks two columns of every recorded row, moving outwards from
//! the center), compacted by the drop phase, and finally scored and emptied
//! when the next piece is promoted.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, CLEAR_STEPS, CLEAR_STEP_MS};

/// Rows needed at once for the tetris flash.
const FLASH_ROWS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineClearSession {
    rows: ArrayVec<i8, { BOARD_HEIGHT as usize }>,
    step: u8,
    timer_ms: u32,
    flash: bool,
}

impl LineClearSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a complete row. Rows are kept in ascending order without
    /// duplicates.
    pub fn record(&mut self, row: i8) {
        if let Err(pos) = self.rows.binary_search(&row) {
            if !self.rows.is_full() {
                self.rows.insert(pos, row);
            }
        }
    }

    pub fn rows(&self) -> &[i8] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, row: i8) -> bool {
        self.rows.binary_search(&row).is_ok()
    }

    /// Wipe steps already applied, in `0..=CLEAR_STEPS`.
    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn is_animation_done(&self) -> bool {
        self.step >= CLEAR_STEPS
    }

    /// Whether the tetris flash is currently lit.
    pub fn flash(&self) -> bool {
        self.flash
    }

    /// Restart the animation from step zero.
    pub fn begin(&mut self) {
        self.step = 0;
        self.timer_ms = 0;
        self.flash = false;
    }

    /// Advance the animation by one tick.
    ///
    /// A step runs whenever the step timer sits at zero; the flash lights on a
    /// step of a four-row clear and goes out on the next tick that does not
    /// step.
    pub fn advance(&mut self, board: &mut Board, elapsed_ms: u32) {
        if self.timer_ms == 0 && self.step < CLEAR_STEPS {
            if self.rows.len() >= FLASH_ROWS {
                self.flash = true;
            }
            let (left, right) = wipe_columns(self.step);
            for &row in &self.rows {
                board.set(left, row, None);
                board.set(right, row, None);
            }
            self.step += 1;
        } else if self.flash {
            self.flash = false;
        }

        self.timer_ms = self.timer_ms.saturating_add(elapsed_ms);
        if self.timer_ms >= CLEAR_STEP_MS {
            self.timer_ms = 0;
        }
    }

    /// Turn the flash off, returning whether it was lit.
    pub fn clear_flash(&mut self) -> bool {
        std::mem::replace(&mut self.flash, false)
    }

    /// Remove every recorded row and shift the cells above down.
    ///
    /// Rows are processed top to bottom so a lower recorded row keeps its
    /// index while the rows above it move.
    pub fn compact(&self, board: &mut Board) {
        for &row in &self.rows {
            board.clear_row(row as usize);
        }
    }

    /// Drop all rows and animation state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Columns blanked by wipe step `step`, left and right of the center.
///
/// The last step lands outside the field and blanks nothing.
pub fn wipe_columns(step: u8) -> (i8, i8) {
    let center = BOARD_WIDTH as i8 / 2;
    (center - 1 - step as i8, center + step as i8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, TICK_MS};

    fn full_board(rows: &[usize]) -> Board {
        let mut board = Board::new();
        for &y in rows {
            for x in 0..BOARD_WIDTH as i8 {
                board.set(x, y as i8, Some(PieceKind::L));
            }
        }
        board
    }

    #[test]
    fn record_keeps_rows_sorted_and_unique() {
        let mut s = LineClearSession::new();
        s.record(17);
        s.record(3);
        s.record(17);
        s.record(9);
        assert_eq!(s.rows(), &[3, 9, 17]);
        assert!(s.contains(9));
        assert!(!s.contains(10));
    }

    #[test]
    fn wipe_moves_outward_from_center() {
        assert_eq!(wipe_columns(0), (4, 5));
        assert_eq!(wipe_columns(1), (3, 6));
        assert_eq!(wipe_columns(4), (0, 9));
        assert_eq!(wipe_columns(5), (-1, 10));
    }

    #[test]
    fn animation_steps_every_four_ticks() {
        let mut board = full_board(&[19]);
        let mut s = LineClearSession::new();
        s.record(19);
        s.begin();

        let mut ticks = 0;
        while !s.is_animation_done() {
            s.advance(&mut board, TICK_MS);
            ticks += 1;
        }
        // Steps on ticks 1, 5, 9, 13, 17, 21.
        assert_eq!(ticks, 21);
        assert_eq!(board.row_fill(19), 0);
    }

    #[test]
    fn first_step_blanks_center_pair() {
        let mut board = full_board(&[10]);
        let mut s = LineClearSession::new();
        s.record(10);
        s.begin();
        s.advance(&mut board, TICK_MS);

        assert_eq!(board.get(4, 10), Some(None));
        assert_eq!(board.get(5, 10), Some(None));
        assert_eq!(board.get(3, 10), Some(Some(PieceKind::L)));
        assert_eq!(board.row_fill(10), 8);
    }

    #[test]
    fn flash_only_for_four_rows() {
        let mut board = full_board(&[16, 17, 18, 19]);
        let mut s = LineClearSession::new();
        for y in 16..20 {
            s.record(y);
        }
        s.begin();
        s.advance(&mut board, TICK_MS);
        assert!(s.flash());
        s.advance(&mut board, TICK_MS);
        assert!(!s.flash());

        let mut board = full_board(&[16, 17, 18]);
        let mut s = LineClearSession::new();
        for y in 16..19 {
            s.record(y);
        }
        s.begin();
        s.advance(&mut board, TICK_MS);
        assert!(!s.flash());
    }

    #[test]
    fn compact_handles_split_rows() {
        // Rows 17 and 19 full, 18 has a single marker.
        let mut board = full_board(&[17, 19]);
        board.set(2, 18, Some(PieceKind::T));
        board.set(7, 16, Some(PieceKind::S));

        let mut s = LineClearSession::new();
        for y in board.full_rows() {
            s.record(y);
        }
        s.compact(&mut board);

        assert_eq!(board.occupied_count(), 2);
        assert_eq!(board.get(2, 19), Some(Some(PieceKind::T)));
        assert_eq!(board.get(7, 18), Some(Some(PieceKind::S)));
    }
}
