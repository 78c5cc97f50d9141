use std::fmt;
use thiserror::Error;

/// Severity of a schema issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// Reported, generation continues
    Warning,
    /// Reported, the run fails once the file has been fully checked
    Error,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueSeverity::Warning => write!(f, "warning"),
            IssueSeverity::Error => write!(f, "error"),
        }
    }
}

/// A problem found while extracting an attestation type interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// `Interface` or `Interface.Struct`
    pub location: String,
    pub severity: IssueSeverity,
    /// Machine readable kind, e.g. `missing_param_doc`
    pub kind: &'static str,
    pub message: String,
}

impl SchemaIssue {
    pub fn new(
        location: impl Into<String>,
        severity: IssueSeverity,
        kind: &'static str,
        message: impl Into<String>,
    ) -> Self {
        SchemaIssue {
            location: location.into(),
            severity,
            kind,
            message: message.into(),
        }
    }

    pub fn warning(location: impl Into<String>, kind: &'static str, message: impl Into<String>) -> Self {
        Self::new(location, IssueSeverity::Warning, kind, message)
    }

    pub fn error(location: impl Into<String>, kind: &'static str, message: impl Into<String>) -> Self {
        Self::new(location, IssueSeverity::Error, kind, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }

    /// Emit the issue through `tracing`.
    pub fn log(&self) {
        match self.severity {
            IssueSeverity::Warning => {
                tracing::warn!(location = %self.location, kind = self.kind, "{}", self.message)
            }
            IssueSeverity::Error => {
                tracing::error!(location = %self.location, kind = self.kind, "{}", self.message)
            }
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.location, self.message)
    }
}

/// Fatal extraction failures
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Only one interface per file is supported (found '{second}' after '{first}')")]
    MultipleContracts { first: String, second: String },
    #[error("No interface found")]
    NoInterface,
    #[error("Could not parse line '@param{line}' in struct '{location}'")]
    UnparsableParam { location: String, line: String },
    #[error("Interface {interface} has {count} schema error(s)")]
    Inconsistent { interface: String, count: usize },
}
