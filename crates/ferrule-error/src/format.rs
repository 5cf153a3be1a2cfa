//! Message rendering that cannot panic.
//!
//! `format!` panics when a `Display` impl reports an error. Messages are often built
//! while another failure is already being handled, so everything here goes through
//! `fmt::write` and reports failure as a value instead.

use std::fmt::{self, Write as _};

/// Render `args` into an owned string.
///
/// The buffer is owned by this call; on error it is dropped before returning.
pub(crate) fn render(args: fmt::Arguments<'_>) -> Result<String, fmt::Error> {
    if let Some(literal) = args.as_str() {
        return Ok(literal.to_owned());
    }
    let mut buf = String::new();
    buf.write_fmt(args)?;
    Ok(buf)
}

/// Append the fallback marker for `component` onto `message`.
pub(crate) fn push_fallback(message: &mut String, component: &str) {
    message.push_str("*** Error in ");
    message.push_str(component);
    message.push_str(" formatting message");
}
