//! Scoring module - score, lines, level, placement counters and top score
//!
//! Every counter is clamped rather than allowed to overflow:
//! score to [`SCORE_MAX`], lines to [`LINES_MAX`], level to [`LEVEL_MAX`] and
//! each per-kind placement counter to [`STAT_MAX`]. `top_score` is the running
//! maximum of `score` and survives restarts through
//! [`ScoreState::with_top_score`].

use crate::types::{
    PieceKind, BACK_TO_BACK_SCORE, FALL_BASE_MS, FALL_MAX_MS, FALL_STEP_MS, LEVEL_MAX,
    LINES_MAX, LINES_PER_LEVEL, LINE_SCORES, SCORE_MAX, START_LEVEL, STAT_MAX,
};

/// Rows in a tetris.
const TETRIS_ROWS: usize = 4;

/// Points for clearing `rows` at once.
///
/// A four-row clear right after another four-row clear scores the
/// back-to-back value. Sizes above four (only reachable on hand-built boards)
/// score as four.
pub fn clear_points(rows: usize, last_rows: usize) -> u32 {
    match rows {
        0 => 0,
        1..=3 => LINE_SCORES[rows],
        _ if last_rows >= TETRIS_ROWS => BACK_TO_BACK_SCORE,
        _ => LINE_SCORES[TETRIS_ROWS],
    }
}

/// Gravity interval for a level: `clamp(1200 - 200 * level, 0, 2000)` ms.
pub fn fall_interval_ms(level: u32) -> u32 {
    let reduction = FALL_STEP_MS.saturating_mul(level);
    FALL_BASE_MS.saturating_sub(reduction).min(FALL_MAX_MS)
}

/// Result of finalizing one clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearOutcome {
    pub points: u32,
    pub back_to_back: bool,
    pub leveled_up: bool,
}

/// The values the display sink presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayStats {
    pub level: u32,
    pub lines: u32,
    pub top_score: u32,
    pub score: u32,
    /// Placement counters in [`PieceKind::ALL`] order.
    pub placements: [u32; 7],
}

impl Default for DisplayStats {
    fn default() -> Self {
        ScoreState::new().display()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreState {
    score: u32,
    lines: u32,
    level: u32,
    lines_to_next_level: u32,
    last_lines_cleared: usize,
    placements: [u32; 7],
    top_score: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::with_top_score(0)
    }

    /// Fresh counters that remember a previous run's best score.
    pub fn with_top_score(top_score: u32) -> Self {
        Self {
            score: 0,
            lines: 0,
            level: START_LEVEL,
            lines_to_next_level: LINES_PER_LEVEL,
            last_lines_cleared: 0,
            placements: [0; 7],
            top_score: top_score.min(SCORE_MAX),
        }
    }

    /// Finalize a clear of `rows` rows.
    ///
    /// At most one level-up happens per call even if the clear crosses several
    /// thresholds; later clears catch up one level at a time.
    pub fn apply_clear(&mut self, rows: usize) -> ClearOutcome {
        if rows == 0 {
            return ClearOutcome::default();
        }

        let points = clear_points(rows, self.last_lines_cleared);
        let back_to_back = rows >= TETRIS_ROWS && self.last_lines_cleared >= TETRIS_ROWS;
        self.add_score(points);

        self.lines = self.lines.saturating_add(rows as u32).min(LINES_MAX);

        let leveled_up = self.lines >= self.lines_to_next_level;
        if leveled_up {
            self.level = (self.level + 1).min(LEVEL_MAX);
            self.lines_to_next_level = self.lines_to_next_level.saturating_add(LINES_PER_LEVEL);
        }

        self.last_lines_cleared = rows;

        ClearOutcome {
            points,
            back_to_back,
            leveled_up,
        }
    }

    /// Add points, clamping and tracking the top score.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points).min(SCORE_MAX);
        self.top_score = self.top_score.max(self.score);
    }

    /// Count one locked piece of `kind`.
    pub fn record_placement(&mut self, kind: PieceKind) {
        let slot = &mut self.placements[kind.index()];
        *slot = (*slot + 1).min(STAT_MAX);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_to_next_level(&self) -> u32 {
        self.lines_to_next_level
    }

    pub fn last_lines_cleared(&self) -> usize {
        self.last_lines_cleared
    }

    pub fn placements(&self, kind: PieceKind) -> u32 {
        self.placements[kind.index()]
    }

    pub fn top_score(&self) -> u32 {
        self.top_score
    }

    pub fn display(&self) -> DisplayStats {
        DisplayStats {
            level: self.level,
            lines: self.lines,
            top_score: self.top_score,
            score: self.score,
            placements: self.placements,
        }
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_score_table() {
        assert_eq!(clear_points(1, 0), 100);
        assert_eq!(clear_points(2, 0), 200);
        assert_eq!(clear_points(3, 0), 400);
        assert_eq!(clear_points(4, 0), 800);
        assert_eq!(clear_points(4, 3), 800);
        assert_eq!(clear_points(4, 4), 1200);
        assert_eq!(clear_points(1, 4), 100);
    }

    #[test]
    fn test_fall_interval() {
        assert_eq!(fall_interval_ms(0), 1200);
        assert_eq!(fall_interval_ms(1), 1000);
        assert_eq!(fall_interval_ms(5), 200);
        assert_eq!(fall_interval_ms(6), 0);
        assert_eq!(fall_interval_ms(99), 0);
        assert_eq!(fall_interval_ms(u32::MAX), 0);
    }

    #[test]
    fn test_back_to_back_needs_adjacent_tetrises() {
        let mut s = ScoreState::new();
        assert_eq!(s.apply_clear(4).points, 800);
        let second = s.apply_clear(4);
        assert_eq!(second.points, 1200);
        assert!(second.back_to_back);
        assert_eq!(s.score(), 2000);

        s.apply_clear(2);
        assert_eq!(s.apply_clear(4).points, 800);
    }

    #[test]
    fn test_single_level_up_per_clear() {
        let mut s = ScoreState::new();
        for _ in 0..2 {
            s.apply_clear(4);
        }
        assert_eq!(s.level(), 1);
        // 12 lines crosses the threshold of 10 once.
        let outcome = s.apply_clear(4);
        assert!(outcome.leveled_up);
        assert_eq!(s.lines(), 12);
        assert_eq!(s.level(), 2);
        assert_eq!(s.lines_to_next_level(), 20);
    }

    #[test]
    fn test_clamps() {
        let mut s = ScoreState::new();
        s.add_score(u32::MAX);
        assert_eq!(s.score(), SCORE_MAX);
        assert_eq!(s.top_score(), SCORE_MAX);

        for _ in 0..400 {
            s.apply_clear(4);
        }
        assert_eq!(s.lines(), LINES_MAX);
        assert!(s.level() <= LEVEL_MAX);
        assert_eq!(s.score(), SCORE_MAX);

        for _ in 0..2000 {
            s.record_placement(PieceKind::Z);
        }
        assert_eq!(s.placements(PieceKind::Z), STAT_MAX);
        assert_eq!(s.placements(PieceKind::I), 0);
    }

    #[test]
    fn test_top_score_carries_over() {
        let mut s = ScoreState::with_top_score(5000);
        s.apply_clear(1);
        assert_eq!(s.score(), 100);
        assert_eq!(s.top_score(), 5000);
        assert_eq!(s.display().top_score, 5000);
    }

    #[test]
    fn test_zero_rows_is_a_no_op() {
        let mut s = ScoreState::new();
        s.apply_clear(4);
        assert_eq!(s.apply_clear(0), ClearOutcome::default());
        assert_eq!(s.last_lines_cleared(), 4);
    }
}
