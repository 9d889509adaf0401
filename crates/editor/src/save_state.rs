//! Save-state indicator
//!
//! Edits flip the indicator to Saving; after a quiet delay with no
//! further edits it reports Saved again. Time is passed in explicitly so
//! hosts and tests control the clock.

use std::time::{Duration, Instant};

/// Quiet period after the last edit before the buffer reads as saved
pub const SAVE_QUIET_DELAY: Duration = Duration::from_millis(800);

/// Displayed save state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Saved,
    Saving,
}

/// Tracks the save-state indicator
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveIndicator {
    last_edit: Option<Instant>,
}

impl SaveIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edit
    pub fn touch(&mut self, now: Instant) {
        self.last_edit = Some(now);
    }

    /// State as of `now`
    pub fn state(&self, now: Instant) -> SaveState {
        match self.last_edit {
            Some(at) if now.duration_since(at) < SAVE_QUIET_DELAY => SaveState::Saving,
            _ => SaveState::Saved,
        }
    }
}
