//! The thread's last OS error code (`errno` on unix, `GetLastError` on windows).
//!
//! The register is owned by the platform; this module only reads it, translates codes
//! to text, and (on unix) writes it back. Almost every libc call may overwrite it, text
//! lookup included, so a code must be read before anything else runs.

use std::io;

/// Access to a last-error register.
pub trait LastError {
    /// Current value of the register.
    fn code(&self) -> i32;

    /// Human-readable text for `code`. May clobber the register.
    fn text(&self, code: i32) -> String;
}

/// The calling thread's real OS register.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsLastError;

impl LastError for OsLastError {
    fn code(&self) -> i32 {
        code()
    }

    fn text(&self, code: i32) -> String {
        text(code)
    }
}

/// Read the calling thread's last OS error code.
pub fn code() -> i32 {
    io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// Translate `code` into the platform's description, e.g. "No such file or directory".
#[cfg(unix)]
pub fn text(code: i32) -> String {
    use std::ffi::CStr;

    let mut buf = [0 as libc::c_char; 256];
    // SAFETY: `buf` is writable for `buf.len()` bytes and the XSI variant always
    // NUL-terminates on success.
    let rc = unsafe { libc::strerror_r(code, buf.as_mut_ptr(), buf.len()) };
    if rc != 0 {
        return format!("Unknown error {code}");
    }
    // SAFETY: see above.
    let text = unsafe { CStr::from_ptr(buf.as_ptr()) };
    text.to_string_lossy().into_owned()
}

#[cfg(not(unix))]
pub fn text(code: i32) -> String {
    let full = io::Error::from_raw_os_error(code).to_string();
    match full.rfind(" (os error ") {
        Some(idx) => full[..idx].to_owned(),
        None => full,
    }
}

/// Overwrite the calling thread's `errno`.
///
/// Only on targets where the `libc` crate exposes an errno-location accessor.
#[cfg(any(
    target_os = "linux",
    target_os = "emscripten",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "android",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "illumos",
    target_os = "solaris"
))]
pub fn set(code: i32) {
    // SAFETY: the location is thread-local and valid for the life of the thread.
    unsafe { *errno_location() = code };
}

#[cfg(any(target_os = "linux", target_os = "emscripten"))]
unsafe fn errno_location() -> *mut libc::c_int {
    unsafe { libc::__errno_location() }
}

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd"
))]
unsafe fn errno_location() -> *mut libc::c_int {
    unsafe { libc::__error() }
}

#[cfg(any(target_os = "android", target_os = "netbsd", target_os = "openbsd"))]
unsafe fn errno_location() -> *mut libc::c_int {
    unsafe { libc::__errno() }
}

#[cfg(any(target_os = "illumos", target_os = "solaris"))]
unsafe fn errno_location() -> *mut libc::c_int {
    unsafe { libc::___errno() }
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;

    #[test]
    fn set_then_read_round_trips() {
        set(libc::EACCES);
        assert_eq!(code(), libc::EACCES);
        set(0);
        assert_eq!(code(), 0);
    }

    #[test]
    fn text_matches_strerror() {
        assert_eq!(text(libc::ENOENT), "No such file or directory");
        assert_eq!(OsLastError.text(libc::EACCES), "Permission denied");
    }

    #[test]
    fn io_error_agrees_on_the_text() {
        let io = io::Error::from_raw_os_error(libc::ENOENT).to_string();
        assert!(io.starts_with(&text(libc::ENOENT)));
    }
}
