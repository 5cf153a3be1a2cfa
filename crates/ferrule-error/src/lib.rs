//! Error values for ferrule.
//!
//! Three variants form a taxonomy: [`Diagnostic`] (any failure) ⊃ [`DomainError`]
//! (raised by application logic) ⊃ [`SystemError`] (caused by the OS, carries the
//! last-error code). [`Fault`] holds any of them for generic handlers.
//!
//! Building or formatting an error never panics. A `Display` argument that fails
//! leaves a `"*** Error in <Variant> formatting message"` marker in the message.
//!
//! ```
//! use ferrule_error::{system_error, Describe, Fault};
//!
//! fn open(path: &str) -> Result<std::fs::File, Fault> {
//!     std::fs::File::open(path).map_err(|_| Fault::from(system_error!("open {}", path)))
//! }
//!
//! let err = open("/definitely/not/here").unwrap_err();
//! assert!(err.describe().starts_with("open /definitely/not/here: "));
//! assert!(err.code().is_some());
//! ```

pub mod boundary;
pub mod cancel;
pub mod diagnostic;
pub mod domain;
pub mod fault;
mod format;
pub mod kind;
pub mod last_error;
mod macros;
pub mod policy;
pub mod result_ext;
pub mod system;

// public exports
pub use boundary::{Boundary, catch_any, raise};
pub use cancel::{CancelToken, ForcedUnwind};
pub use diagnostic::{Describe, Diagnostic, UNSPECIFIED};
pub use domain::DomainError;
pub use fault::Fault;
pub use kind::Kind;
pub use policy::ErrorPolicy;
pub use result_ext::ResultExt;
pub use system::SystemError;

/// Result with [`Fault`] as the default error.
pub type Result<T, E = Fault> = std::result::Result<T, E>;
