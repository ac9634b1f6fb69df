//! Task polling utilities
//!
//! Background work runs as tokio tasks tagged with a sequence number. The UI
//! polls them once per frame without blocking; the CLI awaits them.

use std::future::Future;

use futures::FutureExt;
use tokio::task::{JoinError, JoinHandle};

/// A spawned task tagged with the sequence number of the request that started it
pub struct SequencedTask<T> {
    seq: u64,
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> SequencedTask<T> {
    /// Spawn `future` on the current tokio runtime
    pub fn spawn<F>(seq: u64, future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            seq,
            handle: tokio::spawn(future),
        }
    }
}

impl<T> SequencedTask<T> {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Cancel the task. A task that already finished is unaffected.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

/// Result of polling a task slot
pub enum PollResult<T> {
    /// Slot is empty
    NoTask,
    /// Task is still running
    Pending,
    /// Task finished; `result` carries a join error if it panicked or was aborted
    Complete {
        seq: u64,
        result: Result<T, JoinError>,
    },
}

/// Poll a task slot and take the result if the task has finished.
///
/// # Example
/// ```ignore
/// match poll_task(&mut self.in_flight) {
///     PollResult::Complete { seq, result: Ok(value) } => { /* finished */ }
///     PollResult::Complete { result: Err(e), .. } => { /* panicked or aborted */ }
///     PollResult::Pending => ctx.request_repaint(),
///     PollResult::NoTask => {}
/// }
/// ```
pub fn poll_task<T>(slot: &mut Option<SequencedTask<T>>) -> PollResult<T> {
    let Some(task) = slot.as_mut() else {
        return PollResult::NoTask;
    };

    if !task.handle.is_finished() {
        return PollResult::Pending;
    }

    let seq = task.seq;
    // is_finished() guarantees the handle resolves immediately
    let polled = (&mut task.handle).now_or_never();

    match polled {
        Some(result) => {
            *slot = None;
            PollResult::Complete { seq, result }
        }
        None => {
            tracing::warn!("Task {} not ready despite is_finished()", seq);
            PollResult::Pending
        }
    }
}

/// Wait for the task in `slot` to finish and take its result
pub async fn join_task<T>(slot: &mut Option<SequencedTask<T>>) -> PollResult<T> {
    match slot.take() {
        Some(task) => PollResult::Complete {
            seq: task.seq,
            result: task.handle.await,
        },
        None => PollResult::NoTask,
    }
}
