//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, left to right: the per-kind placement counters, the bordered
//! playfield, then score/level/lines and the next and hold previews.

use crate::core::{get_shape, ActiveSnapshot, GameSnapshot};
use crate::debris::DebrisField;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::hud::Hud;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Width of the placement-counter column left of the field.
const STATS_PANEL_W: u16 = 9;
const SIDE_GAP: u16 = 2;

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Where the field frame landed in the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render one frame into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &Hud,
        debris: &DebrisField,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.frame_for(viewport);

        // The whole play area turns white for the tetris flash.
        let bg = if snap.flash { Rgb::WHITE } else { FIELD_BG };
        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w - 2,
            frame.h - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), bg),
        );
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK));

        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                let cell = snap.board[y as usize][x as usize];
                match piece_from_cell(cell) {
                    Some(kind) => self.draw_board_cell(fb, frame, x, y, kind, bg),
                    None if !snap.flash => self.draw_empty_cell(fb, frame, x, y),
                    None => {}
                }
            }
        }

        if let Some(active) = snap.active {
            self.draw_active(fb, frame, active, bg);
        }

        self.draw_debris(fb, frame, debris);
        self.draw_stats_panel(fb, hud, frame);
        self.draw_side_panel(fb, snap, hud, viewport, frame);

        if snap.paused {
            draw_overlay_text(fb, frame, "PAUSED");
        } else if snap.game_over() {
            draw_overlay_text(fb, frame, "GAME OVER");
            let hint_frame = Frame {
                y: frame.y.saturating_add(2),
                ..frame
            };
            draw_overlay_text(fb, hint_frame, "R: RESTART");
        }
    }

    /// Convenience helper that allocates a new framebuffer and takes the
    /// display values from the snapshot.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        let hud = Hud::from(snap.stats);
        self.render_into(snap, &hud, &DebrisField::default(), viewport, &mut fb);
        fb
    }

    /// Terminal position of the top-left corner of board cell (0, 0).
    pub fn field_origin(&self, viewport: Viewport) -> (u16, u16) {
        let frame = self.frame_for(viewport);
        (frame.x + 1, frame.y + 1)
    }

    fn frame_for(&self, viewport: Viewport) -> Frame {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        // Center the field; the stats column needs room on the left.
        let x = (viewport.width.saturating_sub(w) / 2).max(STATS_PANEL_W + SIDE_GAP);
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    fn draw_active(&self, fb: &mut FrameBuffer, frame: Frame, active: ActiveSnapshot, bg: Rgb) {
        // Cells still in the spawn buffer are hidden.
        for (x, y, visible) in active.tetromino().visible_cells() {
            if visible && x >= 0 && x < BOARD_WIDTH as i8 && y < BOARD_HEIGHT as i8 {
                self.draw_board_cell(fb, frame, x as u16, y as u16, active.kind, bg);
            }
        }
    }

    fn draw_debris(&self, fb: &mut FrameBuffer, frame: Frame, debris: &DebrisField) {
        let ox = (frame.x + 1) as i32;
        let oy = (frame.y + 1) as i32;
        for p in debris.particles() {
            let (cx, cy) = p.cell();
            let sx = ox + cx * self.cell_w as i32;
            let sy = oy + cy * self.cell_h as i32;
            if sx < 0 || sy < 0 || sx > u16::MAX as i32 || sy > u16::MAX as i32 {
                continue;
            }
            let style = CellStyle::new(piece_color(p.kind), FIELD_BG).bold();
            fb.fill_rect(sx as u16, sy as u16, self.cell_w, self.cell_h, '▓', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), FIELD_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, kind: PieceKind, bg: Rgb) {
        let style = CellStyle::new(piece_color(kind), bg).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// One row per kind: a colored letter and its three-digit counter.
    fn draw_stats_panel(&self, fb: &mut FrameBuffer, hud: &Hud, frame: Frame) {
        let x = frame.x.saturating_sub(STATS_PANEL_W + SIDE_GAP);
        let mut y = frame.y.saturating_add(1);

        fb.put_str(x, y, "STATS", label_style());
        y = y.saturating_add(2);
        for kind in PieceKind::ALL {
            let style = CellStyle::new(piece_color(kind), Rgb::BLACK).bold();
            fb.put_str(x, y, piece_letter(kind), style);
            fb.put_u32_padded(x + 3, y, hud.stats().placements[kind.index()], 3, value_style());
            y = y.saturating_add(1);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &Hud,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(SIDE_GAP);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let stats = hud.stats();
        let label = label_style();
        let value = value_style();

        let mut y = frame.y;
        for (name, v, digits) in [
            ("TOP", stats.top_score, 7),
            ("SCORE", stats.score, 7),
            ("LEVEL", stats.level, 2),
            ("LINES", stats.lines, 3),
        ] {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32_padded(panel_x, y, v, digits, value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, snap.next, true);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, snap.hold, snap.can_hold);
    }

    /// Small spawn-orientation picture of `kind`, dimmed when unavailable.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: Option<PieceKind>, available: bool) {
        let Some(kind) = kind else {
            fb.put_str(x, y, "-", value_style());
            return;
        };

        let shape = get_shape(kind, Rotation::North);
        let top = shape.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
        let mut style = CellStyle::new(piece_color(kind), Rgb::BLACK);
        if !available {
            style = style.dim();
        }
        for (dx, dy) in shape {
            let px = x + dx as u16 * self.cell_w;
            let py = y + (dy - top) as u16;
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    fb.put_str(x, mid_y, text, CellStyle::new(Rgb::WHITE, Rgb::BLACK).bold());
}

fn label_style() -> CellStyle {
    CellStyle::new(Rgb::new(220, 220, 220), Rgb::BLACK).bold()
}

fn value_style() -> CellStyle {
    CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK)
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn piece_letter(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "I",
        PieceKind::O => "O",
        PieceKind::T => "T",
        PieceKind::S => "S",
        PieceKind::Z => "Z",
        PieceKind::J => "J",
        PieceKind::L => "L",
    }
}

/// Inverse of [`PieceKind::shape_id`]; `0` is empty.
pub fn piece_from_cell(v: u8) -> Option<PieceKind> {
    (v as usize)
        .checked_sub(1)
        .and_then(|i| PieceKind::ALL.get(i))
        .copied()
}
