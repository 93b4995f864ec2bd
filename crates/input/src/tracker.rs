//! Key tracker: terminal key events in, one [`InputFrame`] per tick out.
//!
//! Supports terminals that do not emit key release events by using a timeout.
//! Held controls (move, soft drop) stay set until released or until no event
//! for that key has been seen for the release timeout. Pressed controls
//! (rotate, hold, pause) are latched until the next frame is taken, so a tap
//! between two ticks is never lost and never seen twice.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::core::ports::InputSource;
use crate::map::{map_key, Intent};
use crate::types::{InputFrame, MoveDirection};

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers auto-shift repeats.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Held<T> {
    value: T,
    seen_ms: u32,
}

#[derive(Debug, Clone)]
pub struct KeyTracker {
    clock_ms: u32,
    horizontal: Option<Held<MoveDirection>>,
    soft_drop: Option<Held<()>>,
    pressed: InputFrame,
    restart: bool,
    key_release_timeout_ms: u32,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self {
            clock_ms: 0,
            horizontal: None,
            soft_drop: None,
            pressed: InputFrame::IDLE,
            restart: false,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Feed one terminal key event. Returns the intent it mapped to, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Intent> {
        let intent = map_key(key)?;
        match key.kind {
            KeyEventKind::Press => self.press(intent),
            // Auto-repeat only refreshes held keys.
            KeyEventKind::Repeat if intent.is_held() => self.press(intent),
            KeyEventKind::Repeat => {}
            KeyEventKind::Release => self.release(intent),
        }
        Some(intent)
    }

    pub fn press(&mut self, intent: Intent) {
        let now = self.clock_ms;
        match intent {
            Intent::MoveLeft => self.hold_horizontal(MoveDirection::Left, now),
            Intent::MoveRight => self.hold_horizontal(MoveDirection::Right, now),
            Intent::SoftDrop => {
                self.soft_drop = Some(Held {
                    value: (),
                    seen_ms: now,
                })
            }
            Intent::RotateLeft => self.pressed.rotate_left = true,
            Intent::RotateRight => self.pressed.rotate_right = true,
            Intent::Hold => self.pressed.hold = true,
            Intent::Pause => self.pressed.pause = true,
            Intent::Restart => self.restart = true,
        }
    }

    pub fn release(&mut self, intent: Intent) {
        match intent {
            Intent::MoveLeft => self.release_horizontal(MoveDirection::Left),
            Intent::MoveRight => self.release_horizontal(MoveDirection::Right),
            Intent::SoftDrop => self.soft_drop = None,
            _ => {}
        }
    }

    fn hold_horizontal(&mut self, dir: MoveDirection, now: u32) {
        // The most recent direction wins.
        self.horizontal = Some(Held {
            value: dir,
            seen_ms: now,
        });
    }

    fn release_horizontal(&mut self, dir: MoveDirection) {
        if self.horizontal.map(|h| h.value) == Some(dir) {
            self.horizontal = None;
        }
    }

    /// Advance the tracker clock and take this tick's frame.
    pub fn frame(&mut self, elapsed_ms: u32) -> InputFrame {
        self.clock_ms = self.clock_ms.saturating_add(elapsed_ms);
        self.expire_stale();

        let dir = self.horizontal.map(|h| h.value);
        let mut frame = std::mem::take(&mut self.pressed);
        frame.move_left = dir == Some(MoveDirection::Left);
        frame.move_right = dir == Some(MoveDirection::Right);
        frame.soft_drop = self.soft_drop.is_some();
        frame
    }

    fn expire_stale(&mut self) {
        let now = self.clock_ms;
        let timeout = self.key_release_timeout_ms;
        let stale = |seen_ms: u32| now.saturating_sub(seen_ms) > timeout;

        if self.horizontal.is_some_and(|h| stale(h.seen_ms)) {
            self.horizontal = None;
        }
        if self.soft_drop.is_some_and(|h| stale(h.seen_ms)) {
            self.soft_drop = None;
        }
    }

    /// Whether a restart was requested since the last call.
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart)
    }

    pub fn reset(&mut self) {
        let timeout = self.key_release_timeout_ms;
        *self = Self::new().with_key_release_timeout_ms(timeout);
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for KeyTracker {
    fn poll(&mut self, elapsed_ms: u32) -> InputFrame {
        self.frame(elapsed_ms)
    }
}
