//! Scheduling port for timer ticks.
//!
//! The engine never sleeps or spawns on its own. It asks a [`Scheduler`]
//! for a tick after a delay and receives a [`TickHandle`] back. When the
//! delay elapses the scheduler delivers that handle to whoever owns the
//! engine, which passes it to `TimerEngine::on_tick_fired`.
//!
//! Two implementations are provided:
//! - [`TokioScheduler`]: real wall-clock delays on the tokio runtime
//! - [`ManualScheduler`]: deterministic, test-driven delivery

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

// ============================================================================
// TickHandle
// ============================================================================

/// Cancellation handle for one scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickHandle(u64);

impl TickHandle {
    /// Returns the raw identifier of this handle.
    pub fn id(&self) -> u64 {
        self.0
    }
}

// ============================================================================
// Scheduler
// ============================================================================

/// A source of delayed, cancellable tick callbacks.
///
/// Implementations must deliver each scheduled handle at most once and
/// must not deliver a handle after it has been cancelled.
pub trait Scheduler {
    /// Requests a tick after `delay`.
    fn schedule_after(&mut self, delay: Duration) -> TickHandle;

    /// Cancels a previously scheduled tick.
    ///
    /// Cancelling an unknown or already delivered handle is a no-op.
    fn cancel(&mut self, handle: TickHandle);
}

// ============================================================================
// TokioScheduler
// ============================================================================

/// Scheduler backed by `tokio::time::sleep` tasks.
///
/// Fired handles are sent on the channel returned from [`TokioScheduler::new`].
/// Must be used from within a tokio runtime.
pub struct TokioScheduler {
    fired_tx: mpsc::UnboundedSender<TickHandle>,
    tasks: HashMap<TickHandle, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    /// Creates a scheduler and the receiver its fired ticks arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickHandle>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            fired_tx,
            tasks: HashMap::new(),
            next_id: 0,
        };
        (scheduler, fired_rx)
    }

    /// Returns the number of sleep tasks that have not completed yet.
    pub fn active_tasks(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&mut self, delay: Duration) -> TickHandle {
        self.tasks.retain(|_, task| !task.is_finished());

        let handle = TickHandle(self.next_id);
        self.next_id += 1;

        let tx = self.fired_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(handle);
        });
        self.tasks.insert(handle, task);

        trace!(handle = handle.id(), ?delay, "tick scheduled");
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            trace!(handle = handle.id(), "tick cancelled");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("tasks", &self.tasks.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// ManualScheduler
// ============================================================================

/// Scheduler that only fires when told to.
///
/// Useful for driving the engine tick by tick without waiting on a clock.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    outstanding: Vec<(TickHandle, Duration)>,
    cancelled: Vec<TickHandle>,
}

impl ManualScheduler {
    /// Creates a scheduler with nothing outstanding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheduled ticks that have neither fired nor been cancelled.
    #[must_use]
    pub fn outstanding(&self) -> &[(TickHandle, Duration)] {
        &self.outstanding
    }

    /// Handles cancelled so far, in cancellation order.
    #[must_use]
    pub fn cancelled(&self) -> &[TickHandle] {
        &self.cancelled
    }

    /// Removes and returns the oldest outstanding tick, as if it had fired.
    pub fn take_due(&mut self) -> Option<TickHandle> {
        if self.outstanding.is_empty() {
            return None;
        }
        Some(self.outstanding.remove(0).0)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&mut self, delay: Duration) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;
        self.outstanding.push((handle, delay));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        let before = self.outstanding.len();
        self.outstanding.retain(|(h, _)| *h != handle);
        if self.outstanding.len() != before {
            self.cancelled.push(handle);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
