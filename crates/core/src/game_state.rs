//! Game state module - the phase machine
//!
//! One [`GameState`] value owns the board, the active/next/hold pieces, the
//! line-clear session and the score state. [`GameState::tick`] advances it by
//! one fixed step:
//!
//! 1. input for the tick (ignored entirely in `GameOver`; only the pause edge
//!    is honored while paused),
//! 2. the time-driven logic of the current phase (gravity, wipe animation),
//!    frozen while paused,
//! 3. the transition function, a pure mapping from phase and counters to the
//!    next phase.
//!
//! Entry actions may chain straight into another phase (placing a piece goes
//! on to the line check or game over in the same tick). Everything observable
//! outside the core is returned as [`Effect`]s instead of being performed.

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::line_clear::LineClearSession;
use crate::movement::{
    fall_tetromino, kicked, move_tetromino, rotate_tetromino, Fall, Tetromino,
};
use crate::ports::{CatalogFactory, PieceFactory};
use crate::rng::{PieceSource, Randomizer, RandomizerKind};
use crate::scoring::{fall_interval_ms, DisplayStats, ScoreState};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Game setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameConfig {
    pub seed: u32,
    pub randomizer: RandomizerKind,
}

impl GameConfig {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            randomizer: RandomizerKind::Uniform,
        }
    }

    pub fn with_randomizer(mut self, randomizer: RandomizerKind) -> Self {
        self.randomizer = randomizer;
        self
    }
}

/// A formerly locked cell turned into game-over debris.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebrisCell {
    pub x: i8,
    pub y: i8,
    pub kind: PieceKind,
}

/// Something the outside world should react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The machine entered a phase (in order, including chained entries).
    PhaseEntered(Phase),
    /// One of the display values changed.
    Display(DisplayStats),
    /// One debris object per locked cell at game over.
    Debris(DebrisCell),
    /// The tetris flash turned on or off.
    Flash(bool),
}

/// Effects produced by one or more ticks.
pub type Effects = Vec<Effect>;

/// Sideways auto-shift bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct AutoShift {
    dir: Option<MoveDirection>,
    held_ms: u32,
}

/// Complete game state
///
/// Pieces are spawned through the [`PieceFactory`] `F`, which defaults to the
/// plain catalog.
#[derive(Debug, Clone)]
pub struct GameState<F = CatalogFactory> {
    phase: Phase,
    board: Board,
    pool: Vec<PieceKind>,
    randomizer: Randomizer,
    seed: u32,
    active: Option<Tetromino>,
    next: Option<PieceKind>,
    hold: Option<PieceKind>,
    can_hold: bool,
    clear: LineClearSession,
    scores: ScoreState,
    fall_interval_ms: u32,
    fall_timer_ms: u32,
    shift: AutoShift,
    paused: bool,
    last_display: Option<DisplayStats>,
    factory: F,
}

impl GameState {
    /// Create a game in the `Init` phase. The first tick moves it on.
    pub fn new(config: GameConfig) -> Self {
        Self::with_top_score(config, 0)
    }

    /// Create a game that remembers a previous run's top score.
    pub fn with_top_score(config: GameConfig, top_score: u32) -> Self {
        Self::with_factory(config, top_score, CatalogFactory)
    }
}

impl<F: PieceFactory> GameState<F> {
    /// Create a game that spawns its pieces through `factory`.
    pub fn with_factory(config: GameConfig, top_score: u32, factory: F) -> Self {
        let scores = ScoreState::with_top_score(top_score);
        let mut state = Self {
            phase: Phase::Init,
            board: Board::new(),
            pool: Vec::with_capacity(PieceKind::ALL.len()),
            randomizer: Randomizer::new(config.randomizer, config.seed),
            seed: config.seed,
            active: None,
            next: None,
            hold: None,
            can_hold: true,
            clear: LineClearSession::new(),
            fall_interval_ms: fall_interval_ms(scores.level()),
            scores,
            fall_timer_ms: 0,
            shift: AutoShift::default(),
            paused: false,
            last_display: None,
            factory,
        };
        state.enter_state(Phase::Init, &mut Effects::new());
        state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn randomizer_kind(&self) -> RandomizerKind {
        self.randomizer.kind()
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn next_piece(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for puzzle setups and scripted scenarios.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the active piece, for puzzle setups. Refused unless the piece
    /// fits and a piece is currently falling.
    pub fn set_active(&mut self, piece: Tetromino) -> bool {
        if self.phase != Phase::Move || !piece.fits(&self.board) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    pub fn clear_session(&self) -> &LineClearSession {
        &self.clear
    }

    pub fn scores(&self) -> &ScoreState {
        &self.scores
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn level(&self) -> u32 {
        self.scores.level()
    }

    pub fn lines(&self) -> u32 {
        self.scores.lines()
    }

    pub fn top_score(&self) -> u32 {
        self.scores.top_score()
    }

    /// Current gravity interval in milliseconds per row.
    pub fn fall_interval(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn tetris_flash(&self) -> bool {
        self.clear.flash()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.next = self.next;
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.phase = self.phase;
        out.paused = self.paused;
        out.flash = self.clear.flash();
        for (y, clearing) in out.clearing_rows.iter_mut().enumerate() {
            *clearing = self.clear.contains(y as i8);
        }
        out.clear_step = self.clear.step();
        out.stats = self.scores.display();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance one fixed step and return what happened.
    pub fn tick(&mut self, input: &InputFrame, elapsed_ms: u32) -> Effects {
        let mut effects = Effects::new();
        self.tick_into(input, elapsed_ms, &mut effects);
        effects
    }

    /// Like [`GameState::tick`] but appends to a caller-owned buffer.
    pub fn tick_into(&mut self, input: &InputFrame, elapsed_ms: u32, effects: &mut Effects) {
        if self.phase == Phase::GameOver {
            return;
        }

        if input.pause {
            self.paused = !self.paused;
            debug!(paused = self.paused, "pause toggled");
        }

        if !self.paused {
            self.handle_input(input, elapsed_ms, effects);
            self.state_logic(input, elapsed_ms, effects);
        }

        if let Some(next) = self.transition() {
            self.set_state(next, effects);
        }

        self.emit_display(effects);
    }

    /// The transition function: current phase and bounded counters only.
    pub fn transition(&self) -> Option<Phase> {
        match self.phase {
            Phase::Init if !self.pool.is_empty() => Some(Phase::Next),
            Phase::Next if self.active.is_some() => Some(Phase::Move),
            Phase::Hold if self.active.is_none() => Some(Phase::Next),
            Phase::Hold => Some(Phase::Move),
            Phase::LineCheck if self.clear.is_empty() => Some(Phase::Next),
            Phase::LineCheck => Some(Phase::Clear),
            Phase::Clear if self.clear.is_animation_done() => Some(Phase::Drop),
            _ => None,
        }
    }

    fn handle_input(&mut self, input: &InputFrame, elapsed_ms: u32, effects: &mut Effects) {
        if self.phase != Phase::Move || self.active.is_none() {
            return;
        }

        if input.hold && self.can_hold {
            self.set_state(Phase::Hold, effects);
            return;
        }

        if input.rotate_left {
            self.try_rotate(RotateDirection::Left);
        } else if input.rotate_right {
            self.try_rotate(RotateDirection::Right);
        }

        let dir = match (input.move_left, input.move_right) {
            (true, false) => Some(MoveDirection::Left),
            (false, true) => Some(MoveDirection::Right),
            _ => None,
        };

        if dir != self.shift.dir {
            self.shift = AutoShift { dir, held_ms: 0 };
            if let Some(dir) = dir {
                self.try_move(dir);
            }
        } else if let Some(dir) = dir {
            self.shift.held_ms = self.shift.held_ms.saturating_add(elapsed_ms);
            if self.shift.held_ms >= AUTO_SHIFT_DELAY_MS {
                self.try_move(dir);
                self.shift.held_ms = AUTO_SHIFT_DELAY_MS - AUTO_SHIFT_REPEAT_MS;
            }
        }
    }

    fn state_logic(&mut self, input: &InputFrame, elapsed_ms: u32, effects: &mut Effects) {
        match self.phase {
            Phase::Move => {
                let wait = self.fall_interval_ms;
                if input.soft_drop && self.fall_timer_ms.saturating_add(SOFT_DROP_MS) < wait {
                    self.fall_timer_ms = wait - SOFT_DROP_MS;
                }

                self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
                if self.fall_timer_ms >= wait {
                    self.fall_timer_ms = 0;
                    self.fall_step(effects);
                }
            }
            Phase::Clear => {
                let was_lit = self.clear.flash();
                self.clear.advance(&mut self.board, elapsed_ms);
                if self.clear.flash() != was_lit {
                    effects.push(Effect::Flash(self.clear.flash()));
                }
            }
            _ => {}
        }
    }

    /// Translate the active piece one cell. Returns false if rejected.
    pub fn try_move(&mut self, dir: MoveDirection) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        match move_tetromino(&active, &self.board, dir) {
            Some(moved) => {
                self.active = Some(moved);
                true
            }
            None => {
                trace!(?dir, kind = active.kind.as_str(), "move rejected");
                false
            }
        }
    }

    /// Rotate the active piece one step. Returns false if rejected.
    pub fn try_rotate(&mut self, dir: RotateDirection) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        match rotate_tetromino(&active, &self.board, dir) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => {
                trace!(?dir, kind = active.kind.as_str(), "rotation rejected");
                false
            }
        }
    }

    /// One gravity step; landing goes straight to placement.
    fn fall_step(&mut self, effects: &mut Effects) {
        let Some(active) = self.active else {
            return;
        };

        match fall_tetromino(&active, &self.board) {
            Fall::Moved(moved) => self.active = Some(moved),
            Fall::Landed => self.set_state(Phase::PlaceTile, effects),
        }
    }

    fn set_state(&mut self, phase: Phase, effects: &mut Effects) {
        let mut phase = phase;
        loop {
            debug!(from = self.phase.as_str(), to = phase.as_str(), "entering state");
            self.phase = phase;
            effects.push(Effect::PhaseEntered(phase));

            match self.enter_state(phase, effects) {
                Some(chained) => phase = chained,
                None => break,
            }
        }
    }

    /// Entry action for `phase`; returns a phase to enter immediately after.
    fn enter_state(&mut self, phase: Phase, effects: &mut Effects) -> Option<Phase> {
        match phase {
            Phase::Init => {
                self.pool.clear();
                self.pool.extend_from_slice(&PieceKind::ALL);
                None
            }
            Phase::Next => {
                self.finalize_clear();
                self.promote_next();
                None
            }
            Phase::Move => {
                self.fall_interval_ms = fall_interval_ms(self.scores.level());
                self.fall_timer_ms = 0;
                None
            }
            Phase::Hold => {
                self.swap_hold();
                None
            }
            Phase::PlaceTile => Some(self.place_active()),
            Phase::LineCheck => {
                for row in self.board.full_rows() {
                    self.clear.record(row);
                }
                self.can_hold = true;
                None
            }
            Phase::Clear => {
                self.clear.begin();
                None
            }
            Phase::Drop => {
                if self.clear.clear_flash() {
                    effects.push(Effect::Flash(false));
                }
                self.clear.compact(&mut self.board);
                Some(Phase::Next)
            }
            Phase::GameOver => {
                for (x, y, kind) in self.board.occupied_cells() {
                    effects.push(Effect::Debris(DebrisCell { x, y, kind }));
                }
                self.board.clear();
                self.active = None;
                info!(
                    score = self.scores.score(),
                    lines = self.scores.lines(),
                    level = self.scores.level(),
                    "game over"
                );
                None
            }
        }
    }

    fn finalize_clear(&mut self) {
        if self.clear.is_empty() {
            return;
        }

        let rows = self.clear.len();
        let outcome = self.scores.apply_clear(rows);
        info!(
            rows,
            points = outcome.points,
            back_to_back = outcome.back_to_back,
            score = self.scores.score(),
            "lines cleared"
        );
        if outcome.leveled_up {
            info!(level = self.scores.level(), "level up");
        }
        self.clear.reset();
    }

    fn draw(&mut self) -> PieceKind {
        self.randomizer.draw(&self.pool)
    }

    /// A fresh piece of `kind` at the spawn anchor, as the factory describes it.
    fn spawn(&mut self, kind: PieceKind) -> Tetromino {
        let descriptor = self.factory.create(kind);
        debug_assert_eq!(descriptor.kind, kind);
        Tetromino::from_descriptor(&descriptor)
    }

    fn promote_next(&mut self) {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.draw(),
        };
        self.active = Some(self.spawn(kind));
        self.next = Some(self.draw());
    }

    fn swap_hold(&mut self) {
        let Some(outgoing) = self.active.take() else {
            return;
        };

        if let Some(incoming) = self.hold.replace(outgoing.kind) {
            let spawned = self.spawn(incoming);
            let candidate = Tetromino {
                x: outgoing.x,
                y: outgoing.y,
                ..spawned
            };
            self.active = Some(kicked(&candidate, &self.board).unwrap_or(spawned));
        }
        self.can_hold = false;
    }

    /// Lock the active piece and pick the follow-up phase.
    fn place_active(&mut self) -> Phase {
        let Some(piece) = self.active.take() else {
            return Phase::LineCheck;
        };

        for (x, y) in piece.cells() {
            // Buffer cells have no board storage; `set` drops them.
            self.board.set(x, y, Some(piece.kind));
        }
        self.scores.record_placement(piece.kind);

        if piece.is_above_field() {
            Phase::GameOver
        } else {
            Phase::LineCheck
        }
    }

    fn emit_display(&mut self, effects: &mut Effects) {
        let current = self.scores.display();
        if self.last_display != Some(current) {
            self.last_display = Some(current);
            effects.push(Effect::Display(current));
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::new(1))
    }
}

/// Value-in, value-out form of [`GameState::tick`], handy for replays.
pub fn tick<F: PieceFactory>(
    mut state: GameState<F>,
    input: &InputFrame,
    elapsed_ms: u32,
) -> (GameState<F>, Effects) {
    let effects = state.tick(input, elapsed_ms);
    (state, effects)
}
