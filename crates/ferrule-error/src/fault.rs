use crate::{Describe, Diagnostic, DomainError, Kind, SystemError};

/// Any error in the taxonomy, as caught by a generic handler.
///
/// The `as_*` accessors answer "can this be handled as X": a system error is also a
/// domain error, and everything is a diagnostic ([`Describe::as_diagnostic`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error(transparent)]
    Diagnostic(#[from] Diagnostic),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    System(#[from] SystemError),
}

impl Fault {
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Fault::Diagnostic(_) => None,
            Fault::Domain(err) => Some(err),
            Fault::System(err) => Some(err.as_domain()),
        }
    }

    pub fn as_system(&self) -> Option<&SystemError> {
        match self {
            Fault::System(err) => Some(err),
            _ => None,
        }
    }

    /// The OS code, if this is a system error.
    pub fn code(&self) -> Option<i32> {
        self.as_system().map(SystemError::code)
    }

    fn inner(&self) -> &dyn Describe {
        match self {
            Fault::Diagnostic(err) => err,
            Fault::Domain(err) => err,
            Fault::System(err) => err,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Describe {
        match self {
            Fault::Diagnostic(err) => err,
            Fault::Domain(err) => err,
            Fault::System(err) => err,
        }
    }
}

impl Describe for Fault {
    fn as_diagnostic(&self) -> &Diagnostic {
        self.inner().as_diagnostic()
    }

    fn as_diagnostic_mut(&mut self) -> &mut Diagnostic {
        self.inner_mut().as_diagnostic_mut()
    }

    fn component(&self) -> &'static str {
        self.inner().component()
    }

    fn kind(&self) -> Kind {
        self.inner().kind()
    }
}

impl From<std::io::Error> for Fault {
    fn from(err: std::io::Error) -> Self {
        Fault::System(err.into())
    }
}

impl From<String> for Fault {
    fn from(message: String) -> Self {
        Fault::Diagnostic(message.into())
    }
}

impl From<&str> for Fault {
    fn from(message: &str) -> Self {
        Fault::Diagnostic(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specificity_of_each_variant() {
        let base = Fault::from(Diagnostic::with_message("base"));
        assert!(base.as_domain().is_none());
        assert!(base.as_system().is_none());
        assert_eq!(base.code(), None);

        let domain = Fault::from(DomainError::with_message("domain"));
        assert_eq!(domain.as_domain().map(|e| e.describe()), Some("domain"));
        assert!(domain.as_system().is_none());

        let system = Fault::from(SystemError::with_code(2, "open"));
        assert!(system.as_domain().is_some());
        assert_eq!(system.code(), Some(2));
        assert_eq!(system.kind(), Kind::System);
        assert_eq!(system.as_diagnostic().describe(), system.describe());
    }

    #[test]
    fn enrichment_reaches_the_inner_error() {
        let mut fault = Fault::from(DomainError::with_message("parse failed"));
        fault.append_message(" in settings.toml");
        assert_eq!(fault.to_string(), "parse failed in settings.toml");
        assert_eq!(fault.component(), "DomainError");
    }
}
