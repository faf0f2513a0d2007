//! Countdown timer for timeboxed writing sessions.
//!
//! The timer is polled: hosts call `tick(now_ms)` from their own loop and
//! only whole elapsed seconds are consumed.

/// Default session length, fifteen minutes.
pub const DEFAULT_FOCUS_SECS: u32 = 900;
/// How long hosts animate the completion cue.
pub const COMPLETION_CUE_MS: i64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One or more seconds elapsed.
    Tick { remaining_secs: u32 },
    /// The countdown reached zero; the timer stopped and reset.
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTimer {
    duration_secs: u32,
    remaining_secs: u32,
    /// Time the last consumed second ended; `Some` only while running.
    anchor_ms: Option<i64>,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_SECS)
    }
}

impl FocusTimer {
    /// A zero duration is bumped to one second.
    pub fn new(duration_secs: u32) -> Self {
        let duration_secs = duration_secs.max(1);
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            anchor_ms: None,
        }
    }

    pub fn start(&mut self, now_ms: i64) {
        if self.anchor_ms.is_none() {
            self.anchor_ms = Some(now_ms);
        }
    }

    /// Stops counting; a partially elapsed second is discarded.
    pub fn pause(&mut self) {
        self.anchor_ms = None;
    }

    pub fn toggle(&mut self, now_ms: i64) {
        if self.is_running() {
            self.pause();
        } else {
            self.start(now_ms);
        }
    }

    pub fn reset(&mut self) {
        self.anchor_ms = None;
        self.remaining_secs = self.duration_secs;
    }

    pub fn tick(&mut self, now_ms: i64) -> Option<TimerEvent> {
        let anchor = self.anchor_ms?;
        let elapsed_secs = now_ms.saturating_sub(anchor) / 1_000;
        if elapsed_secs <= 0 {
            return None;
        }

        if elapsed_secs >= i64::from(self.remaining_secs) {
            self.reset();
            return Some(TimerEvent::Completed);
        }

        // elapsed_secs < remaining_secs, so it fits in u32.
        self.remaining_secs -= elapsed_secs as u32;
        self.anchor_ms = Some(anchor + elapsed_secs * 1_000);
        Some(TimerEvent::Tick {
            remaining_secs: self.remaining_secs,
        })
    }

    pub fn is_running(&self) -> bool {
        self.anchor_ms.is_some()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format_time(self.remaining_secs)
    }
}

/// Formats seconds as zero-padded `MM:SS`.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
