//! Countdown Timer - a countdown state manager with cancellable ticks
//!
//! This library tracks a remaining time in whole seconds, decrements it once
//! per second while running, and renders it as `mm:ss`.

pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use controller::TimerController;
pub use error::TimerError;
pub use state::{format_clock, TimerSnapshot, TimerState};
pub use utils::signals::shutdown_signal;
