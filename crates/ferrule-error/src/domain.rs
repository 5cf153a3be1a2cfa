use std::fmt;

use crate::{Describe, Diagnostic, Kind, SystemError};

/// An error raised by validated application logic.
///
/// Behaves exactly like [`Diagnostic`]; the separate type lets handlers tell an
/// application failure apart from an untyped one.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error(transparent)]
pub struct DomainError {
    base: Diagnostic,
}

impl DomainError {
    pub(crate) const COMPONENT: &'static str = "DomainError";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            base: Diagnostic::with_message(message),
        }
    }

    /// Render `args` as the message. Prefer [`domain_error!`](crate::domain_error).
    pub fn from_args(args: fmt::Arguments<'_>) -> Self {
        let mut err = Self::new();
        err.base.render_into(args, Self::COMPONENT);
        err
    }

    pub fn message(&self) -> &str {
        self.base.message()
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        self.base
    }
}

impl Describe for DomainError {
    fn as_diagnostic(&self) -> &Diagnostic {
        &self.base
    }

    fn as_diagnostic_mut(&mut self) -> &mut Diagnostic {
        &mut self.base
    }

    fn component(&self) -> &'static str {
        Self::COMPONENT
    }

    fn kind(&self) -> Kind {
        Kind::Domain
    }
}

impl From<DomainError> for Diagnostic {
    fn from(err: DomainError) -> Self {
        err.base
    }
}

/// Drops the OS origin, keeping the rendered message (which already carries the
/// code's text).
impl From<SystemError> for DomainError {
    fn from(err: SystemError) -> Self {
        err.into_domain()
    }
}

impl From<String> for DomainError {
    fn from(message: String) -> Self {
        Self::with_message(message)
    }
}

impl From<&str> for DomainError {
    fn from(message: &str) -> Self {
        Self::with_message(message)
    }
}
