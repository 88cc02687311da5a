//! One-shot countdown tick task

use std::time::Duration;
use tokio::{runtime::Handle, task::JoinHandle, time::sleep};
use tracing::trace;

/// Delay between a tick being scheduled and it firing
pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

/// A scheduled tick that has not fired yet.
///
/// Each tick carries the generation it was scheduled under. The owner bumps
/// its generation whenever it supersedes a tick, so a tick whose sleep has
/// already elapsed but which lost the race for the state lock can still
/// recognise itself as stale and do nothing.
#[derive(Debug)]
pub struct TickHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl TickHandle {
    /// Generation this tick was scheduled under
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Abort the tick. The callback will not run if the sleep is still pending.
    pub fn cancel(self) {
        trace!("Cancelling tick for generation {}", self.generation);
        self.task.abort();
    }
}

/// Spawn a tick that calls `on_fire(generation)` once after `period`
pub fn spawn_tick<F>(runtime: &Handle, generation: u64, period: Duration, on_fire: F) -> TickHandle
where
    F: FnOnce(u64) + Send + 'static,
{
    let task = runtime.spawn(async move {
        sleep(period).await;
        trace!("Tick fired for generation {}", generation);
        on_fire(generation);
    });

    TickHandle { generation, task }
}
