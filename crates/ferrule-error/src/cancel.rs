//! Cooperative thread cancellation by forced unwinding.
//!
//! A cancelled thread unwinds from its next [`CancelToken::checkpoint`] with a
//! [`ForcedUnwind`] payload. The payload shares the unwind channel with errors raised
//! through [`raise`](crate::boundary::raise), so every catch-all in this crate checks
//! for it first and resumes it untouched. Swallowing it would leave the thread running
//! after its owner has torn it down.
//!
//! The standard library has no marker of its own, so this is the single declaration;
//! catch sites identify it by type, never by message.

use std::any::Any;
use std::panic;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Unwind payload of a cancelled thread. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedUnwind;

impl ForcedUnwind {
    /// Start unwinding the current thread. Does not run the panic hook.
    pub fn raise() -> ! {
        panic::resume_unwind(Box::new(ForcedUnwind))
    }
}

/// True if an unwind payload is a cancellation rather than a failure.
pub fn is_forced_unwind(payload: &(dyn Any + Send)) -> bool {
    payload.is::<ForcedUnwind>()
}

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect at the next checkpoint.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Cancellation point: unwinds with [`ForcedUnwind`] if cancelled.
    pub fn checkpoint(&self) {
        if self.is_cancelled() {
            log_unwind();
            ForcedUnwind::raise();
        }
    }
}

#[cfg(feature = "tracing")]
fn log_unwind() {
    tracing::debug!(thread = ?std::thread::current().id(), "cancellation checkpoint hit, unwinding");
}

#[cfg(not(feature = "tracing"))]
fn log_unwind() {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn checkpoint_is_a_noop_until_cancelled() {
        let token = CancelToken::new();
        token.checkpoint();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn cancelled_thread_unwinds_with_the_marker() {
        let token = CancelToken::new();
        let worker = token.clone();
        token.cancel();

        let payload = thread::spawn(move || {
            worker.checkpoint();
        })
        .join()
        .unwrap_err();

        assert!(is_forced_unwind(&*payload));
        assert_eq!(payload.downcast_ref::<ForcedUnwind>(), Some(&ForcedUnwind));
    }

    #[test]
    fn ordinary_panics_are_not_the_marker() {
        let result: thread::Result<()> = panic::catch_unwind(|| panic!("boom"));
        let payload = result.unwrap_err();
        assert!(!is_forced_unwind(&*payload));
    }
}
