//! Timer state structure and formatting

use serde::{Deserialize, Serialize};

/// Render a second count as `mm:ss`.
///
/// Minutes are not wrapped into hours, so the minute field grows past two
/// digits for long countdowns (`3661` renders as `"61:01"`).
pub fn format_clock(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Countdown state owned by a single controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub remaining_seconds: u64,
    pub is_running: bool,
}

impl TimerState {
    /// Create a paused timer with the given remaining seconds
    pub fn new(remaining_seconds: u64) -> Self {
        Self {
            remaining_seconds,
            is_running: false,
        }
    }

    /// Whether a tick should be pending for this state
    pub fn should_tick(&self) -> bool {
        self.is_running && self.remaining_seconds > 0
    }

    /// Decrement by one second. Returns false when already at zero.
    pub fn tick(&mut self) -> bool {
        match self.remaining_seconds.checked_sub(1) {
            Some(next) => {
                self.remaining_seconds = next;
                true
            }
            None => false,
        }
    }

    /// Remaining time as `mm:ss`
    pub fn formatted_time(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    /// Copy the state into a snapshot for observers
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            remaining_seconds: self.remaining_seconds,
            is_running: self.is_running,
            formatted_time: self.formatted_time(),
        }
    }
}

/// Point-in-time copy of the timer published to observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub remaining_seconds: u64,
    pub is_running: bool,
    pub formatted_time: String,
}

impl TimerSnapshot {
    /// Whether the countdown ran out between `previous` and this snapshot
    pub fn expired_since(&self, previous: &TimerSnapshot) -> bool {
        self.is_running && self.remaining_seconds == 0 && previous.remaining_seconds > 0
    }
}
