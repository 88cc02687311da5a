//! State management module
//!
//! This module contains the countdown state and its derived rendering.

pub mod timer_state;

// Re-export main types
pub use timer_state::{format_clock, TimerSnapshot, TimerState};
