//! Diagnostic reporting for non-fatal registry failures.
//!
//! The registry never aborts a load because one entry is bad: malformed
//! names, type conflicts, and codec failures are reported through a
//! [`DiagnosticSink`] and the offending entry is skipped. The default sink
//! forwards to `tracing`; tests typically use [`CollectingSink`] to assert
//! on what was reported.

use std::sync::{Mutex, PoisonError};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something was skipped or degraded, but the operation continued.
    Warning,
    /// An entry or operation failed outright.
    Error,
}

/// What went wrong, independent of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A name or flattened document path violates `[a-z0-9._]+`.
    InvalidName,
    /// A name was re-declared under a different value type.
    TypeConflict,
    /// Encoding a current value to text failed.
    Serialization,
    /// Decoding incoming text failed; the value was left untouched.
    Deserialization,
}

impl DiagnosticKind {
    /// Stable string form, used as a structured log field.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::InvalidName => "invalid_name",
            DiagnosticKind::TypeConflict => "type_conflict",
            DiagnosticKind::Serialization => "serialization",
            DiagnosticKind::Deserialization => "deserialization",
        }
    }
}

/// A single reported failure.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    /// Create an error-severity diagnostic.
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Create a warning-severity diagnostic.
    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Sink for diagnostics emitted by the registry, variables, and loader.
///
/// Implementations must be `Send + Sync`: variables report serialization
/// failures from whichever thread touches them.
pub trait DiagnosticSink: Send + Sync {
    /// Receive one diagnostic.
    fn report(&self, diagnostic: Diagnostic);
}

/// Default sink: forwards diagnostics to the `tracing` ecosystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a new tracing-backed sink.
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => {
                tracing::warn!(kind = diagnostic.kind.as_str(), "{}", diagnostic.message);
            }
            Severity::Error => {
                tracing::error!(kind = diagnostic.kind.as_str(), "{}", diagnostic.message);
            }
        }
    }
}

/// Sink that accumulates diagnostics for later inspection.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Create an empty collecting sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain all diagnostics reported so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(
            &mut *self
                .entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// True when nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}
