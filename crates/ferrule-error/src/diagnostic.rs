use std::fmt;

use crate::Kind;
use crate::format::{push_fallback, render};

/// Text returned by [`Describe::describe`] when no message was set.
pub const UNSPECIFIED: &str = "Unspecified error";

/// Root of the error taxonomy: an owned, human-readable message.
///
/// Cloning yields an independent copy. Construction and every mutator are
/// infallible; a message that fails to render is replaced by a fixed marker rather
/// than raising a second error.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
}

impl Diagnostic {
    pub(crate) const COMPONENT: &'static str = "Diagnostic";

    /// An error with no message; describes as [`UNSPECIFIED`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `message` verbatim.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Render `args` as the message. Prefer the [`diagnostic!`](crate::diagnostic) macro.
    pub fn from_args(args: fmt::Arguments<'_>) -> Self {
        let mut diag = Self::new();
        diag.render_into(args, Self::COMPONENT);
        diag
    }

    /// The stored message, possibly empty.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }

    /// Replace the message, rendering through the builder. `component` names the
    /// variant in the fallback marker.
    pub(crate) fn render_into(&mut self, args: fmt::Arguments<'_>, component: &str) {
        match render(args) {
            Ok(text) => self.message = text,
            Err(_) => push_fallback(&mut self.message, component),
        }
    }

    /// Append rendered `args`, or the fallback marker if rendering fails.
    pub(crate) fn append_rendered(&mut self, args: fmt::Arguments<'_>, component: &str) {
        match render(args) {
            Ok(text) => self.message.push_str(&text),
            Err(_) => push_fallback(&mut self.message, component),
        }
    }

    pub(crate) fn message_mut(&mut self) -> &mut String {
        &mut self.message
    }
}

impl From<String> for Diagnostic {
    fn from(message: String) -> Self {
        Self::with_message(message)
    }
}

impl From<&str> for Diagnostic {
    fn from(message: &str) -> Self {
        Self::with_message(message)
    }
}

impl fmt::Debug for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostic")
            .field("message", &self.describe())
            .finish()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

impl std::error::Error for Diagnostic {}

/// Operations shared by every error in the taxonomy.
///
/// Handlers that only care about the message take `&dyn Describe` (or
/// `impl Describe`) and work for all three variants.
pub trait Describe {
    /// The root diagnostic this error is built on.
    fn as_diagnostic(&self) -> &Diagnostic;

    fn as_diagnostic_mut(&mut self) -> &mut Diagnostic;

    /// Name used in the formatting fallback marker.
    fn component(&self) -> &'static str;

    fn kind(&self) -> Kind;

    /// Display-safe text: the message, or [`UNSPECIFIED`] when it is empty.
    ///
    /// Borrows the stored text; never formats or allocates.
    fn describe(&self) -> &str {
        let message = self.as_diagnostic().message();
        if message.is_empty() {
            UNSPECIFIED
        } else {
            message
        }
    }

    /// Overwrite the message with `message` verbatim.
    fn set_message(&mut self, message: &str) {
        let slot = self.as_diagnostic_mut().message_mut();
        slot.clear();
        slot.push_str(message);
    }

    /// Overwrite the message by rendering `args`.
    ///
    /// If rendering fails the current text is kept and the fallback marker is
    /// appended to it.
    fn set_message_fmt(&mut self, args: fmt::Arguments<'_>) {
        let component = self.component();
        self.as_diagnostic_mut().render_into(args, component);
    }

    /// Concatenate `more` onto the message. No separator is inserted.
    fn append_message(&mut self, more: &str) {
        self.as_diagnostic_mut().message_mut().push_str(more);
    }

    /// Render `args` and concatenate them; on failure the marker is appended instead.
    fn append_message_fmt(&mut self, args: fmt::Arguments<'_>) {
        let component = self.component();
        self.as_diagnostic_mut().append_rendered(args, component);
    }
}

impl Describe for Diagnostic {
    fn as_diagnostic(&self) -> &Diagnostic {
        self
    }

    fn as_diagnostic_mut(&mut self) -> &mut Diagnostic {
        self
    }

    fn component(&self) -> &'static str {
        Self::COMPONENT
    }

    fn kind(&self) -> Kind {
        Kind::Diagnostic
    }
}
