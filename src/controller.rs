//! Countdown controller
//!
//! [`TimerController`] owns one countdown. Every change to the running flag
//! or the remaining time goes through a reconcile step that cancels the
//! pending tick and, if the timer is still running with time left, schedules
//! a fresh one-second tick. At most one tick is ever pending.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::{runtime::Handle, sync::watch};
use tracing::{debug, info};

use crate::{
    error::{Result, TimerError},
    state::{TimerSnapshot, TimerState},
    tasks::{spawn_tick, TickHandle, TICK_PERIOD},
};

#[derive(Debug)]
struct Inner {
    timer: TimerState,
    pending: Option<TickHandle>,
    /// Bumped every time the pending tick is superseded
    generation: u64,
}

#[derive(Debug)]
struct Shared {
    inner: Mutex<Inner>,
    runtime: Handle,
    updates: watch::Sender<TimerSnapshot>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Inner is never left half-updated, so a poisoned lock is still usable
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner) {
        self.updates.send_replace(inner.timer.snapshot());
    }

    /// Cancel the pending tick and schedule a new one if the timer should run
    fn reconcile(self: &Arc<Self>, inner: &mut Inner) {
        if let Some(pending) = inner.pending.take() {
            debug!("Superseding pending tick (generation {})", pending.generation());
            pending.cancel();
        }
        inner.generation = inner.generation.wrapping_add(1);

        if inner.timer.should_tick() {
            let weak = Arc::downgrade(self);
            let tick = spawn_tick(&self.runtime, inner.generation, TICK_PERIOD, move |generation| {
                if let Some(shared) = weak.upgrade() {
                    shared.on_tick(generation);
                }
            });
            inner.pending = Some(tick);
        }
    }

    fn on_tick(self: &Arc<Self>, generation: u64) {
        let mut inner = self.lock();
        if inner.generation != generation {
            debug!("Ignoring stale tick (generation {}, current {})", generation, inner.generation);
            return;
        }
        inner.pending = None;

        if !inner.timer.should_tick() || !inner.timer.tick() {
            return;
        }
        debug!("Tick: {} seconds remaining", inner.timer.remaining_seconds);
        if inner.timer.remaining_seconds == 0 {
            info!("Countdown reached zero");
        }

        self.publish(&inner);
        self.reconcile(&mut inner);
    }

    fn cancel_pending(&self) {
        let mut inner = self.lock();
        if let Some(pending) = inner.pending.take() {
            pending.cancel();
        }
        inner.generation = inner.generation.wrapping_add(1);
    }
}

/// Countdown timer with start/pause controls and a derived `mm:ss` rendering.
///
/// Must be created inside a tokio runtime; ticks are spawned on that runtime.
/// Dropping the controller cancels any pending tick.
#[derive(Debug)]
pub struct TimerController {
    shared: Arc<Shared>,
}

impl TimerController {
    /// Create a paused controller holding `initial_minutes * 60` seconds
    pub fn new(initial_minutes: i64) -> Result<Self> {
        let seconds = initial_minutes
            .checked_mul(60)
            .ok_or(TimerError::InvalidDuration(initial_minutes))?;
        if seconds < 0 {
            return Err(TimerError::InvalidDuration(initial_minutes));
        }
        Self::from_seconds(seconds)
    }

    /// Create a paused controller holding `seconds`
    pub fn from_seconds(seconds: i64) -> Result<Self> {
        let remaining = u64::try_from(seconds).map_err(|_| TimerError::InvalidDuration(seconds))?;
        let runtime = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;

        let timer = TimerState::new(remaining);
        let (updates, _) = watch::channel(timer.snapshot());

        Ok(Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    timer,
                    pending: None,
                    generation: 0,
                }),
                runtime,
                updates,
            }),
        })
    }

    /// Set the running flag, scheduling a tick if time is left
    pub fn start(&self) {
        self.set_is_running(true);
    }

    /// Clear the running flag and cancel the pending tick
    pub fn pause(&self) {
        self.set_is_running(false);
    }

    /// Raw setter for the running flag. Setting the current value is a no-op.
    pub fn set_is_running(&self, running: bool) {
        let mut inner = self.shared.lock();
        if inner.timer.is_running == running {
            return;
        }

        inner.timer.is_running = running;
        if running {
            info!("Timer started with {} remaining", inner.timer.formatted_time());
        } else {
            info!("Timer paused with {} remaining", inner.timer.formatted_time());
        }

        self.shared.publish(&inner);
        self.shared.reconcile(&mut inner);
    }

    /// Overwrite the remaining time.
    ///
    /// While running, the pending tick is replaced so the next decrement lands
    /// one full second after this call. Negative values are rejected.
    pub fn set_remaining_seconds(&self, seconds: i64) -> Result<()> {
        let remaining = u64::try_from(seconds).map_err(|_| TimerError::InvalidDuration(seconds))?;

        let mut inner = self.shared.lock();
        if inner.timer.remaining_seconds == remaining {
            return Ok(());
        }

        inner.timer.remaining_seconds = remaining;
        info!("Remaining time set to {}", inner.timer.formatted_time());

        self.shared.publish(&inner);
        self.shared.reconcile(&mut inner);
        Ok(())
    }

    /// Current running flag
    pub fn is_running(&self) -> bool {
        self.shared.lock().timer.is_running
    }

    /// Remaining time in whole seconds
    pub fn remaining_seconds(&self) -> u64 {
        self.shared.lock().timer.remaining_seconds
    }

    /// Remaining time as `mm:ss`
    pub fn formatted_time(&self) -> String {
        self.shared.lock().timer.formatted_time()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> TimerSnapshot {
        self.shared.lock().timer.snapshot()
    }

    /// Whether a tick is currently scheduled
    pub fn has_pending_tick(&self) -> bool {
        self.shared.lock().pending.is_some()
    }

    /// Observe every change to the timer. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.shared.updates.subscribe()
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        self.shared.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_converts_minutes_to_seconds() {
        let timer = TimerController::new(5).unwrap();
        assert_eq!(timer.remaining_seconds(), 300);
        assert_eq!(timer.formatted_time(), "05:00");
        assert!(!timer.is_running());
        assert!(!timer.has_pending_tick());
    }

    #[tokio::test]
    async fn rejects_negative_and_overflowing_minutes() {
        assert_eq!(TimerController::new(-1).unwrap_err(), TimerError::InvalidDuration(-1));
        assert_eq!(
            TimerController::new(i64::MAX).unwrap_err(),
            TimerError::InvalidDuration(i64::MAX)
        );
        assert_eq!(TimerController::from_seconds(-3).unwrap_err(), TimerError::InvalidDuration(-3));
    }

    #[test]
    fn requires_a_runtime() {
        assert_eq!(TimerController::new(1).unwrap_err(), TimerError::NoRuntime);
    }

    #[tokio::test]
    async fn start_and_pause_are_idempotent() {
        let timer = TimerController::new(1).unwrap();
        timer.start();
        timer.start();
        assert!(timer.is_running());
        assert!(timer.has_pending_tick());

        timer.pause();
        timer.pause();
        assert!(!timer.is_running());
        assert!(!timer.has_pending_tick());
    }

    #[tokio::test]
    async fn set_remaining_is_visible_immediately() {
        let timer = TimerController::new(1).unwrap();
        timer.set_remaining_seconds(125).unwrap();
        assert_eq!(timer.remaining_seconds(), 125);
        assert_eq!(timer.formatted_time(), "02:05");

        timer.start();
        timer.set_remaining_seconds(7).unwrap();
        assert_eq!(timer.snapshot().formatted_time, "00:07");
    }

    #[tokio::test]
    async fn negative_remaining_is_rejected_without_change() {
        let timer = TimerController::new(2).unwrap();
        assert_eq!(
            timer.set_remaining_seconds(-10).unwrap_err(),
            TimerError::InvalidDuration(-10)
        );
        assert_eq!(timer.remaining_seconds(), 120);
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_tick_does_not_decrement() {
        let timer = TimerController::from_seconds(10).unwrap();
        timer.start();
        let stale = timer.shared.lock().generation;

        timer.pause();
        timer.start();
        timer.shared.on_tick(stale);

        assert_eq!(timer.remaining_seconds(), 10);
        let inner = timer.shared.lock();
        assert_ne!(inner.generation, stale);
        assert_eq!(inner.pending.as_ref().map(TickHandle::generation), Some(inner.generation));
    }

    #[tokio::test]
    async fn starting_at_zero_schedules_nothing() {
        let timer = TimerController::new(0).unwrap();
        timer.start();
        assert!(timer.is_running());
        assert!(!timer.has_pending_tick());
        assert_eq!(timer.formatted_time(), "00:00");
    }
}
