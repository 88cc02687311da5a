//! Background tasks module
//!
//! This module contains the tick task that drives the countdown.

pub mod tick;

// Re-export main items
pub use tick::{spawn_tick, TickHandle, TICK_PERIOD};
