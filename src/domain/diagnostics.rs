//! Conversion Diagnostics
//!
//! Recoverable problems found during conversion accumulate here instead of
//! being written to a shared stream; the caller decides how to surface them.

use serde::Serialize;

/// How severe a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic record.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Node kind or field position the diagnostic refers to,
    /// e.g. "Subscript" or "field `pages`".
    pub context: String,
    pub message: String,
}

/// Accumulator for the diagnostics of one conversion run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        severity: Severity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.entries.push(Diagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    /// Record an unsupported-pattern error. The offending field or type
    /// resolves to nothing; conversion continues.
    pub fn unsupported(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, context, message);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}
