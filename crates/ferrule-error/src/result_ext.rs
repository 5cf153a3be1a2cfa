use std::fmt;

use super::{Describe, ErrorPolicy, Result};

/// Extension trait for [`Result`] used at handlers that enrich a fault and pass it
/// on, or report it without ending propagation.
///
/// Example
/// ```rust,ignore
/// use ferrule_error::{ErrorPolicy, Fault, Result, ResultExt};
///
/// fn load(path: &str, policy: &impl ErrorPolicy) -> Result<String> {
///     std::fs::read_to_string(path)
///         .map_err(Fault::from)
///         .append_message(" while loading settings")
///         .emit_with(policy)
/// }
/// ```
pub trait ResultExt<T> {
    /// Append `more` to the fault's message, leaving `Ok` untouched.
    fn append_message(self, more: &str) -> Self;

    /// Render `args` and append them; only renders on `Err`.
    fn append_message_fmt(self, args: fmt::Arguments<'_>) -> Self;

    /// Emit the fault through `policy` and return the result unchanged.
    fn emit_with(self, policy: &impl ErrorPolicy) -> Self;
}

impl<T> ResultExt<T> for Result<T> {
    fn append_message(mut self, more: &str) -> Self {
        if let Err(ref mut e) = self {
            e.append_message(more);
        }
        self
    }

    fn append_message_fmt(mut self, args: fmt::Arguments<'_>) -> Self {
        if let Err(ref mut e) = self {
            e.append_message_fmt(args);
        }
        self
    }

    fn emit_with(self, policy: &impl ErrorPolicy) -> Self {
        if let Err(ref e) = self {
            policy.emit(e);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::tests::Recorder;
    use crate::{DomainError, Fault, Kind, SystemError};

    #[test]
    fn enrich_and_rethrow() {
        fn inner() -> Result<()> {
            Err(SystemError::with_code(2, "open").into())
        }
        fn outer() -> Result<()> {
            inner().append_message_fmt(format_args!(" (attempt {})", 3))
        }

        let fault = outer().unwrap_err();
        assert!(fault.describe().ends_with(" (attempt 3)"));
        assert_eq!(fault.code(), Some(2));
    }

    #[test]
    fn ok_is_untouched() {
        let ok: Result<u8> = Ok(7);
        let recorder = Recorder::default();
        assert_eq!(ok.append_message("x").emit_with(&recorder).unwrap(), 7);
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn emit_keeps_the_error() {
        let recorder = Recorder::default();
        let r: Result<()> = Err(Fault::from(DomainError::with_message("denied")));
        let r = r.append_message("!").emit_with(&recorder);
        assert_eq!(r.unwrap_err().describe(), "denied!");
        assert_eq!(
            *recorder.seen.lock().unwrap(),
            vec![(Kind::Domain, "denied!".to_string())]
        );
    }
}
