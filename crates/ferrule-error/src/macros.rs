/// Build a [`Diagnostic`](crate::Diagnostic) from a format string.
///
/// ```
/// use ferrule_error::{diagnostic, Describe};
/// let d = diagnostic!("expected {} items, got {}", 3, 2);
/// assert_eq!(d.describe(), "expected 3 items, got 2");
/// ```
#[macro_export]
macro_rules! diagnostic {
    ($($arg:tt)+) => {
        $crate::Diagnostic::from_args(::core::format_args!($($arg)+))
    };
}

/// Build a [`DomainError`](crate::DomainError) from a format string.
#[macro_export]
macro_rules! domain_error {
    ($($arg:tt)+) => {
        $crate::DomainError::from_args(::core::format_args!($($arg)+))
    };
}

/// Build a [`SystemError`](crate::SystemError).
///
/// The last-error register is read before any format argument is evaluated, so
/// arguments that make system calls cannot disturb the captured code.
///
/// - `system_error!()`: `"System Error: <text>"`
/// - `system_error!("open {}", path)`: `"open <path>: <text>"`
/// - `system_error!(code = c; "open {}", path)`: explicit code, register not read
#[macro_export]
macro_rules! system_error {
    () => {
        $crate::SystemError::new()
    };
    (code = $code:expr; $($arg:tt)+) => {{
        let code: i32 = $code;
        $crate::SystemError::with_code_args(code, ::core::format_args!($($arg)+))
    }};
    ($($arg:tt)+) => {{
        let code = $crate::last_error::code();
        $crate::SystemError::with_code_args(code, ::core::format_args!($($arg)+))
    }};
}

/// Return early with a fault built from a format string.
///
/// `bail!(domain: "...")` and `bail!(system: "...")` pick the variant; the bare form
/// returns a [`Diagnostic`](crate::Diagnostic). The error is converted with `Into`.
#[macro_export]
macro_rules! bail {
    (domain: $($arg:tt)+) => {
        return ::core::result::Result::Err($crate::domain_error!($($arg)+).into())
    };
    (system: $($arg:tt)+) => {
        return ::core::result::Result::Err($crate::system_error!($($arg)+).into())
    };
    ($($arg:tt)+) => {
        return ::core::result::Result::Err($crate::diagnostic!($($arg)+).into())
    };
}
