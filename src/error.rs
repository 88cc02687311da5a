//! Error types for timer construction and mutation

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    /// A negative duration, or minutes too large to express in seconds
    #[error("Invalid timer duration: {0}")]
    InvalidDuration(i64),

    #[error("Timer must be created inside a tokio runtime")]
    NoRuntime,
}

pub type Result<T> = std::result::Result<T, TimerError>;
