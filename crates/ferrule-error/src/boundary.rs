//! Raising faults by unwinding, and the catch sites that stop them.
//!
//! Faults normally travel as `Err` values. [`raise`] exists for code that cannot
//! return a `Result` (callbacks, trait impls with fixed signatures); it unwinds with the
//! fault as payload. [`catch_any`] turns both channels back into a `Result`, and
//! [`Boundary`] is the outermost handler of a process or thread.
//!
//! Neither catch site ever handles [`ForcedUnwind`](crate::ForcedUnwind): it is resumed with its original
//! payload so cancellation keeps unwinding.

use std::any::Any;
use std::io::Write as _;
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;
use std::sync::Arc;

use crate::cancel::is_forced_unwind;
use crate::policy::{ErrorPolicy, NoopPolicy};
use crate::{Describe, Diagnostic, Fault};

/// Unwind with `fault` as payload. The panic hook is not run.
pub fn raise(fault: impl Into<Fault>) -> ! {
    let fault: Fault = fault.into();
    panic::resume_unwind(Box::new(fault))
}

/// Run `f`, catching faults from both the `Err` and the unwind channel.
///
/// - a raised [`Fault`] comes back as `Err`;
/// - [`ForcedUnwind`](crate::ForcedUnwind) is resumed unchanged;
/// - any other panic becomes a [`Diagnostic`] carrying the panic text.
pub fn catch_any<T, F>(f: F) -> Result<T, Fault>
where
    F: FnOnce() -> Result<T, Fault>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(fault_from_payload(payload)),
    }
}

/// Classify an unwind payload, resuming it if it is a cancellation.
fn fault_from_payload(payload: Box<dyn Any + Send>) -> Fault {
    if is_forced_unwind(&*payload) {
        panic::resume_unwind(payload);
    }
    let payload = match payload.downcast::<Fault>() {
        Ok(fault) => return *fault,
        Err(other) => other,
    };
    let mut diag = Diagnostic::with_message("panic: ");
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        diag.append_message(text);
    } else if let Some(text) = payload.downcast_ref::<String>() {
        diag.append_message(text);
    } else {
        diag.append_message("<non-string payload>");
    }
    Fault::Diagnostic(diag)
}

/// Outermost handler: reports an uncaught fault and maps it to an exit status.
///
/// ```rust,ignore
/// fn main() -> std::process::ExitCode {
///     ferrule_error::Boundary::new()
///         .with_policy(ferrule_error::policy::TracingPolicy)
///         .run(|| app::run())
/// }
/// ```
pub struct Boundary {
    policy: Arc<dyn ErrorPolicy>,
    exit_code: u8,
    stderr: bool,
}

impl Default for Boundary {
    fn default() -> Self {
        Self {
            policy: Arc::new(NoopPolicy),
            exit_code: 1,
            stderr: true,
        }
    }
}

impl Boundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy<P: ErrorPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Status returned when a fault reaches the boundary. `0` is bumped to `1`.
    pub fn with_exit_code(mut self, code: u8) -> Self {
        self.exit_code = code.max(1);
        self
    }

    /// Whether to print `describe()` to stderr. On by default.
    pub fn with_stderr(mut self, stderr: bool) -> Self {
        self.stderr = stderr;
        self
    }

    /// Run `body`, returning its fault (if any) after it has been reported.
    pub fn catch<T, F>(&self, body: F) -> Result<T, Fault>
    where
        F: FnOnce() -> Result<T, Fault>,
    {
        catch_any(body).inspect_err(|fault| self.report(fault))
    }

    /// Run `body` and turn the outcome into a process exit status.
    pub fn run<F>(&self, body: F) -> ExitCode
    where
        F: FnOnce() -> Result<(), Fault>,
    {
        ExitCode::from(self.run_status(body))
    }

    /// As [`run`](Self::run), returning the raw status byte.
    pub fn run_status<F>(&self, body: F) -> u8
    where
        F: FnOnce() -> Result<(), Fault>,
    {
        match self.catch(body) {
            Ok(()) => 0,
            Err(_) => self.exit_code,
        }
    }

    fn report(&self, fault: &Fault) {
        self.policy.emit(fault);
        if self.stderr {
            // Nothing sensible to do if stderr itself is gone.
            let _ = writeln!(std::io::stderr(), "error: {}", fault.describe());
        }
    }
}
