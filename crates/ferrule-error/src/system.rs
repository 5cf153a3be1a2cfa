use std::fmt;
use std::io;

use crate::last_error::{self, LastError, OsLastError};
use crate::{Describe, Diagnostic, DomainError, Kind};

/// A domain error caused by the OS, carrying the last-error code.
///
/// The code is read from the register before anything else happens in the
/// constructor, so formatting and text lookup (both of which may reset `errno`)
/// cannot change it. Its text is appended to the message as `": <text>"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{domain}")]
pub struct SystemError {
    domain: DomainError,
    code: i32,
}

impl SystemError {
    pub(crate) const COMPONENT: &'static str = "SystemError";
    const DEFAULT_PREFIX: &'static str = "System Error";

    /// Capture the register; message is `"System Error: <text>"`.
    pub fn new() -> Self {
        let code = last_error::code();
        Self::with_code(code, Self::DEFAULT_PREFIX)
    }

    /// Capture the register; message is `"<message>: <text>"`.
    ///
    /// `message` is evaluated by the caller before this runs. If building it may touch
    /// the register, use [`system_error!`](crate::system_error) instead.
    pub fn with_message(message: impl Into<String>) -> Self {
        let code = last_error::code();
        Self::with_code(code, message)
    }

    /// Capture the register, then render `args`.
    pub fn from_args(args: fmt::Arguments<'_>) -> Self {
        Self::capture_with(&OsLastError, args)
    }

    /// As [`from_args`](Self::from_args), against an arbitrary register.
    pub fn capture_with(register: &dyn LastError, args: fmt::Arguments<'_>) -> Self {
        let code = register.code();
        Self::build(code, register, args)
    }

    /// Use `code` instead of reading the register; message is `"<message>: <text>"`.
    pub fn with_code(code: i32, message: impl Into<String>) -> Self {
        let mut domain = DomainError::with_message(message);
        append_text(domain.as_diagnostic_mut(), &OsLastError, code);
        Self { domain, code }
    }

    /// Use `code` instead of reading the register, then render `args`.
    pub fn with_code_args(code: i32, args: fmt::Arguments<'_>) -> Self {
        Self::build(code, &OsLastError, args)
    }

    fn build(code: i32, register: &dyn LastError, args: fmt::Arguments<'_>) -> Self {
        let mut domain = DomainError::new();
        let diag = domain.as_diagnostic_mut();
        diag.render_into(args, Self::COMPONENT);
        append_text(diag, register, code);
        Self { domain, code }
    }

    /// The captured OS error code.
    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        self.domain.message()
    }

    /// View as the domain error it extends.
    pub fn as_domain(&self) -> &DomainError {
        &self.domain
    }

    pub fn into_domain(self) -> DomainError {
        self.domain
    }

    /// An `io::Error` for the same code, for APIs that want one.
    pub fn as_io_error(&self) -> io::Error {
        io::Error::from_raw_os_error(self.code)
    }
}

impl Default for SystemError {
    fn default() -> Self {
        Self::new()
    }
}

fn append_text(diag: &mut Diagnostic, register: &dyn LastError, code: i32) {
    let text = register.text(code);
    diag.append_message(": ");
    diag.append_message(&text);
}

impl Describe for SystemError {
    fn as_diagnostic(&self) -> &Diagnostic {
        self.domain.as_diagnostic()
    }

    fn as_diagnostic_mut(&mut self) -> &mut Diagnostic {
        self.domain.as_diagnostic_mut()
    }

    fn component(&self) -> &'static str {
        Self::COMPONENT
    }

    fn kind(&self) -> Kind {
        Kind::System
    }
}

/// Errors without a raw OS code are recorded with code 0.
impl From<io::Error> for SystemError {
    fn from(err: io::Error) -> Self {
        match err.raw_os_error() {
            Some(code) => Self::with_code(code, Self::DEFAULT_PREFIX),
            None => {
                let mut domain = DomainError::with_message(Self::DEFAULT_PREFIX);
                domain.append_message(": ");
                domain.append_message(&err.to_string());
                Self { domain, code: 0 }
            }
        }
    }
}

impl From<SystemError> for Diagnostic {
    fn from(err: SystemError) -> Self {
        err.domain.into_diagnostic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// A register that forgets its value as soon as anything else touches it.
    struct VolatileRegister {
        value: Cell<i32>,
    }

    impl LastError for VolatileRegister {
        fn code(&self) -> i32 {
            self.value.get()
        }

        fn text(&self, code: i32) -> String {
            self.value.set(0);
            format!("text for {code}")
        }
    }

    struct Clobber<'a>(&'a VolatileRegister);

    impl fmt::Display for Clobber<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.value.set(-1);
            f.write_str("/tmp/missing")
        }
    }

    #[test]
    fn code_is_captured_before_formatting() {
        let register = VolatileRegister {
            value: Cell::new(2),
        };
        let err = SystemError::capture_with(
            &register,
            format_args!("open {}", Clobber(&register)),
        );
        assert_eq!(err.code(), 2);
        assert_eq!(err.describe(), "open /tmp/missing: text for 2");
        assert_eq!(register.value.get(), 0);
    }

    #[test]
    fn fallback_marker_keeps_the_code_text() {
        struct Broken;
        impl fmt::Display for Broken {
            fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let register = VolatileRegister {
            value: Cell::new(13),
        };
        let err = SystemError::capture_with(&register, format_args!("{}", Broken));
        assert_eq!(err.code(), 13);
        assert_eq!(
            err.describe(),
            "*** Error in SystemError formatting message: text for 13"
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn explicit_code_skips_the_register() {
        last_error::set(libc::EPERM);
        let err = SystemError::with_code_args(libc::ENOENT, format_args!("stat {}", "/x"));
        assert_eq!(err.code(), libc::ENOENT);
        assert_eq!(err.describe(), "stat /x: No such file or directory");

        let err = SystemError::with_code(libc::EACCES, "write");
        assert_eq!(err.describe(), "write: Permission denied");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn default_template_and_literal() {
        last_error::set(libc::EBADF);
        let err = SystemError::new();
        assert_eq!(err.code(), libc::EBADF);
        assert_eq!(err.describe(), "System Error: Bad file descriptor");

        last_error::set(libc::EEXIST);
        let err = SystemError::with_message("mkdir");
        assert_eq!(err.code(), libc::EEXIST);
        assert_eq!(err.describe(), "mkdir: File exists");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn from_io_error_keeps_the_raw_code() {
        let err: SystemError = io::Error::from_raw_os_error(libc::ENOTDIR).into();
        assert_eq!(err.code(), libc::ENOTDIR);
        assert_eq!(err.describe(), "System Error: Not a directory");
        assert_eq!(err.as_io_error().raw_os_error(), Some(libc::ENOTDIR));

        let err: SystemError = io::Error::other("pipe closed").into();
        assert_eq!(err.code(), 0);
        assert_eq!(err.describe(), "System Error: pipe closed");
    }

    #[test]
    fn translates_to_domain_and_base() {
        let err = SystemError::with_code(2, "open");
        let text = err.describe().to_owned();
        let domain: DomainError = err.clone().into();
        assert_eq!(domain.describe(), text);
        let base: Diagnostic = err.into();
        assert_eq!(base.describe(), text);
    }
}
