//! How caught faults are reported.
//!
//! Library code returns faults and never logs them itself; the boundary that finally
//! handles a fault hands it to an `ErrorPolicy`. Emission can be anything:
//! - tracing events
//! - a UI message
//! - a test recorder
//!
//! Example
//! ```rust,ignore
//! use ferrule_error::{Describe, ErrorPolicy, Fault};
//!
//! struct PrintPolicy;
//! impl ErrorPolicy for PrintPolicy {
//!     fn emit(&self, f: &Fault) { eprintln!("[{}] {}", f.kind().as_str(), f.describe()); }
//! }
//! ```

use std::sync::Mutex;

use ferrule_common::map::{self, Map};

use super::{Fault, Kind};
use crate::diagnostic::Describe;

pub trait ErrorPolicy: Send + Sync {
    /// Report the fault (log, forward, record...). Must not panic.
    fn emit(&self, fault: &Fault);
}

/// Discards everything.
#[derive(Debug, Clone, Default)]
pub struct NoopPolicy;

impl ErrorPolicy for NoopPolicy {
    fn emit(&self, _fault: &Fault) {}
}

/// Emits through `tracing`: system and base faults at ERROR, domain faults at WARN.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Default)]
pub struct TracingPolicy;

#[cfg(feature = "tracing")]
impl ErrorPolicy for TracingPolicy {
    fn emit(&self, fault: &Fault) {
        use crate::Describe;
        use tracing::{Level, event};

        match fault.kind() {
            Kind::System => event!(
                Level::ERROR,
                kind = fault.kind().as_str(),
                code = fault.code().unwrap_or_default(),
                "{}",
                fault.describe()
            ),
            Kind::Domain => event!(
                Level::WARN,
                kind = fault.kind().as_str(),
                "{}",
                fault.describe()
            ),
            Kind::Diagnostic => event!(
                Level::ERROR,
                kind = fault.kind().as_str(),
                "{}",
                fault.describe()
            ),
        }
    }
}

/// Fans out to several policies in insertion order.
///
/// Example
/// ```rust,ignore
/// use ferrule_error::policy::{CombinedPolicy, NoopPolicy, TracingPolicy};
/// let policy = CombinedPolicy::new()
///     .push(NoopPolicy)
///     .push(TracingPolicy);
/// ```
#[derive(Default)]
pub struct CombinedPolicy {
    policies: Vec<Box<dyn ErrorPolicy>>,
}

impl CombinedPolicy {
    pub fn new() -> Self {
        Self {
            policies: Vec::new(),
        }
    }

    /// Add a policy by value. Builder-style.
    pub fn push<P: ErrorPolicy + 'static>(mut self, policy: P) -> Self {
        self.policies.push(Box::new(policy));
        self
    }

    /// Add an already boxed policy.
    pub fn add_boxed(mut self, policy: Box<dyn ErrorPolicy>) -> Self {
        self.policies.push(policy);
        self
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl ErrorPolicy for CombinedPolicy {
    fn emit(&self, fault: &Fault) {
        for p in &self.policies {
            p.emit(fault);
        }
    }
}

/// Counts emitted faults per [`Kind`]. Useful behind a [`CombinedPolicy`] to summarise
/// a run.
#[derive(Debug, Default)]
pub struct TallyPolicy {
    counts: Mutex<Map<Kind, usize>>,
}

impl TallyPolicy {
    pub fn new() -> Self {
        Self {
            counts: Mutex::new(map::map_with_capacity(3)),
        }
    }

    /// Faults of exactly `kind` seen so far.
    pub fn count(&self, kind: Kind) -> usize {
        match self.counts.lock() {
            Ok(counts) => counts.get(&kind).copied().unwrap_or(0),
            Err(poisoned) => poisoned.into_inner().get(&kind).copied().unwrap_or(0),
        }
    }

    /// Faults that a handler for `kind` would have caught.
    pub fn handled_as(&self, kind: Kind) -> usize {
        [Kind::Diagnostic, Kind::Domain, Kind::System]
            .into_iter()
            .filter(|k| k.is_a(kind))
            .map(|k| self.count(k))
            .sum()
    }
}

impl ErrorPolicy for TallyPolicy {
    fn emit(&self, fault: &Fault) {
        let mut counts = match self.counts.lock() {
            Ok(counts) => counts,
            Err(poisoned) => poisoned.into_inner(),
        };
        *counts.entry(fault.kind()).or_insert(0) += 1;
    }
}

impl<P: ErrorPolicy + ?Sized> ErrorPolicy for std::sync::Arc<P> {
    fn emit(&self, fault: &Fault) {
        (**self).emit(fault)
    }
}
