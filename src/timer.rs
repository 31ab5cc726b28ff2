//! The per-question countdown.
//!
//! Each question gets a fresh [`Countdown`]: a spawned task that sends one
//! tick per second over its own channel. Cancelling aborts the task, and
//! because the receiver lives inside the `Countdown` and is dropped with it,
//! a tick queued before cancellation can never reach a later question's
//! state.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

/// Handle to a running one-tick-per-second task.
pub struct Countdown {
    task: JoinHandle<()>,
    ticks: mpsc::UnboundedReceiver<()>,
}

impl Countdown {
    /// Spawn the ticking task. The first tick arrives after one full second.
    pub fn start() -> Self {
        let (tx, ticks) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(1));
            // The first interval tick completes immediately; skip it.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });

        Self { task, ticks }
    }

    /// Wait for the next tick. Returns `None` once the countdown has been
    /// cancelled and any already-queued ticks are drained.
    pub async fn tick(&mut self) -> Option<()> {
        self.ticks.recv().await
    }

    /// Stop the ticking task. Idempotent.
    pub fn cancel(&mut self) {
        self.task.abort();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.cancel();
    }
}
