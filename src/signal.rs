//! # Completion Signal
//!
//! A single-assignment cell that lets a caller wait, with a bound, for an operation that
//! completes somewhere else (typically a continuation running on a runtime worker).
//!
//! The cell is split in two halves:
//!
//! - [`Completer<T>`]: the writer. [`Completer::complete`] consumes it, so a value can be
//!   written at most once. Dropping it without writing marks the signal *abandoned*.
//! - [`CompletionSignal<T>`]: the reader. [`is_filled`](CompletionSignal::is_filled) never
//!   blocks; [`wait`](CompletionSignal::wait) awaits the value for async callers and
//!   [`wait_blocking`](CompletionSignal::wait_blocking) polls for synchronous ones.
//!
//! ## Example
//!
//! ```rust
//! use docdb_client::signal::CompletionSignal;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (signal, completer) = CompletionSignal::new();
//!     tokio::spawn(async move { completer.complete(42) });
//!
//!     let value = signal.wait(Duration::from_secs(1)).await.unwrap();
//!     assert_eq!(value, 42);
//! }
//! ```

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Notify;

/// Why a wait ended without a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WaitError {
    #[error("Timed out after {waited:?}")]
    Timeout { waited: Duration },

    #[error("Completer dropped without a value")]
    Abandoned,
}

struct Shared<T> {
    slot: Mutex<Option<T>>,
    filled: AtomicBool,
    abandoned: AtomicBool,
    notify: Notify,
}

impl<T> Shared<T> {
    fn take(&self) -> Option<T> {
        if self.filled.load(Ordering::Acquire) {
            self.slot.lock().take()
        } else {
            None
        }
    }

    fn is_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::Acquire)
    }
}

/// The waiting half of a completion signal.
pub struct CompletionSignal<T> {
    shared: Arc<Shared<T>>,
}

/// The writing half of a completion signal.
pub struct Completer<T> {
    shared: Option<Arc<Shared<T>>>,
}

impl<T> CompletionSignal<T> {
    /// Creates an empty signal and its only writer.
    pub fn new() -> (Self, Completer<T>) {
        let shared = Arc::new(Shared {
            slot: Mutex::new(None),
            filled: AtomicBool::new(false),
            abandoned: AtomicBool::new(false),
            notify: Notify::new(),
        });
        let completer = Completer {
            shared: Some(shared.clone()),
        };
        (Self { shared }, completer)
    }

    /// True once a value has been written. Never blocks.
    pub fn is_filled(&self) -> bool {
        self.shared.filled.load(Ordering::Acquire)
    }

    /// Waits up to `timeout` for the value.
    pub async fn wait(self, timeout: Duration) -> Result<T, WaitError> {
        let shared = self.shared;
        let waiting = async {
            loop {
                // `notify_one` stores a permit, so a write that lands between the check and
                // the await still wakes us.
                let notified = shared.notify.notified();
                if let Some(value) = shared.take() {
                    return Ok(value);
                }
                if shared.is_abandoned() {
                    return Err(WaitError::Abandoned);
                }
                notified.await;
            }
        };

        tokio::time::timeout(timeout, waiting)
            .await
            .unwrap_or(Err(WaitError::Timeout { waited: timeout }))
    }

    /// Sleep-check-repeat wait for callers outside the runtime.
    ///
    /// Must not be called from an async task: it blocks the thread.
    pub fn wait_blocking(self, timeout: Duration, poll_interval: Duration) -> Result<T, WaitError> {
        let started = Instant::now();
        loop {
            if let Some(value) = self.shared.take() {
                return Ok(value);
            }
            if self.shared.is_abandoned() {
                return Err(WaitError::Abandoned);
            }
            let elapsed = started.elapsed();
            if elapsed >= timeout {
                return Err(WaitError::Timeout { waited: elapsed });
            }
            std::thread::sleep(poll_interval.min(timeout - elapsed));
        }
    }
}

impl<T> std::fmt::Debug for CompletionSignal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSignal")
            .field("filled", &self.is_filled())
            .field("abandoned", &self.shared.is_abandoned())
            .finish()
    }
}

impl<T> Completer<T> {
    /// Writes the value and wakes the waiter.
    pub fn complete(mut self, value: T) {
        if let Some(shared) = self.shared.take() {
            *shared.slot.lock() = Some(value);
            shared.filled.store(true, Ordering::Release);
            shared.notify.notify_one();
        }
    }

    /// Adapts the completer into a continuation, e.g. for
    /// [`ResourceClient::dispatch`](crate::client::ResourceClient::dispatch).
    pub fn into_continuation(self) -> impl FnOnce(T) + Send + 'static
    where
        T: Send + 'static,
    {
        move |value| self.complete(value)
    }
}

impl<T> Drop for Completer<T> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.take() {
            shared.abandoned.store(true, Ordering::Release);
            shared.notify.notify_one();
        }
    }
}

impl<T> std::fmt::Debug for Completer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completer").finish_non_exhaustive()
    }
}
