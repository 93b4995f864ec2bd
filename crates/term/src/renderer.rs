//! TerminalRenderer: owns the terminal session and flushes framebuffers to it.
//!
//! Only changed runs of cells are written after the first frame.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    key_release_events: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            key_release_events: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    ///
    /// On terminals that support the keyboard enhancement protocol, key
    /// release events are requested too.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;

        self.key_release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.key_release_events {
            self.buf.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }

        self.flush_buf()?;
        self.last = None;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.key_release_events {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
            self.key_release_events = false;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Whether the terminal reports key releases.
    pub fn key_release_events(&self) -> bool {
        self.key_release_events
    }

    /// Force the next draw to be a full redraw, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame. The renderer
    /// diffs against the previous frame and then swaps buffers, so the caller
    /// gets the old one back to render into without cloning.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let same_size = self
            .last
            .as_ref()
            .is_some_and(|prev| prev.width() == fb.width() && prev.height() == fb.height());
        let mut prev = match self.last.take() {
            Some(prev) if same_size => {
                encode_frame_into(Some(&prev), fb, &mut self.buf)?;
                prev
            }
            last => {
                encode_frame_into(None, fb, &mut self.buf)?;
                let mut prev = last.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A horizontal stretch of cells on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

/// Encode `next` into `out` without touching stdout.
///
/// With a same-sized `prev`, only the runs that changed are written;
/// otherwise the screen is cleared and every row is written.
pub fn encode_frame_into(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut writer = RunWriter { out, style: None };
    match prev {
        Some(prev) if prev.width() == next.width() && prev.height() == next.height() => {
            for run in changed_runs(prev, next) {
                writer.write(next, run)?;
            }
        }
        _ => {
            writer.out.queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..next.height() {
                writer.write(
                    next,
                    Run {
                        x: 0,
                        y,
                        len: next.width(),
                    },
                )?;
            }
        }
    }
    writer.finish()
}

/// Writes runs of cells, switching style only where it changes.
struct RunWriter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl RunWriter<'_> {
    fn write(&mut self, fb: &FrameBuffer, run: Run) -> Result<()> {
        if run.len == 0 {
            return Ok(());
        }
        self.out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x.saturating_add(run.len) {
            let cell = fb.get(x, run.y).unwrap_or_default();
            self.set_style(cell.style)?;
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn set_style(&mut self, style: CellStyle) -> Result<()> {
        let prev = self.style.replace(style);
        if prev == Some(style) {
            return Ok(());
        }

        // Attributes can only be turned off wholesale, which also drops colors.
        let attrs_changed = prev.map_or(true, |p| p.bold != style.bold || p.dim != style.dim);
        if attrs_changed {
            self.out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if attrs_changed || prev.map(|p| p.fg) != Some(style.fg) {
            self.out.queue(SetForegroundColor(term_color(style.fg)))?;
        }
        if attrs_changed || prev.map(|p| p.bg) != Some(style.bg) {
            self.out.queue(SetBackgroundColor(term_color(style.bg)))?;
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        if self.style.is_some() {
            self.out.queue(ResetColor)?;
            self.out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Maximal runs of differing cells between two same-sized frames.
fn changed_runs<'a>(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> impl Iterator<Item = Run> + 'a {
    let w = next.width();
    (0..next.height()).flat_map(move |y| {
        let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < w && !differs(x) {
                x += 1;
            }
            if x >= w {
                return None;
            }
            let start = x;
            while x < w && differs(x) {
                x += 1;
            }
            Some(Run {
                x: start,
                y,
                len: x - start,
            })
        })
    })
}
