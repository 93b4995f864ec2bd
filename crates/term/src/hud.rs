//! The heads-up display values, fed through the display port.

use crate::core::ports::DisplaySink;
use crate::core::DisplayStats;

/// Last display values received from the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    stats: DisplayStats,
    updates: u32,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &DisplayStats {
        &self.stats
    }

    /// How many display updates have been received.
    pub fn updates(&self) -> u32 {
        self.updates
    }
}

impl From<DisplayStats> for Hud {
    fn from(stats: DisplayStats) -> Self {
        Self { stats, updates: 0 }
    }
}

impl DisplaySink for Hud {
    fn show(&mut self, stats: &DisplayStats) {
        self.stats = *stats;
        self.updates = self.updates.saturating_add(1);
    }
}
