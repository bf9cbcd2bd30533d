//! Attest error handling.
//!
//! A single error type covers every failure mode the crate can produce.
//! The `Assertion` kind is the distinguished signal a host runner catches to
//! mark a test *failed*; any other kind escaping a test body marks it
//! *errored*, and `Configuration` surfaces from case expansion before any
//! case runs.

use miette::Diagnostic;
use thiserror::Error;

/// Convenient result alias used throughout the crate.
pub type AttestResult<T> = Result<T, AttestError>;

/// Unified error type for all attest failure modes.
#[derive(Debug, Error)]
pub enum AttestError {
    #[error("Assertion failed: {message}")]
    Assertion { message: String },
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        help: Option<String>,
    },
    #[error("Type error: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },
    #[error("Arity error: expected {expected} value(s), got {actual}")]
    ArityMismatch { expected: usize, actual: usize },
    #[error("Invalid operation '{operation}': {reason}")]
    InvalidOperation { operation: String, reason: String },
}

/// Type-safe error classification used by `assert_throws` and by host
/// runners to separate failed tests from errored ones.
///
/// The taxonomy has one parent kind: `Runtime` covers the `Type`, `Arity`,
/// and `Operation` subkinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// A test expectation was not met.
    Assertion,
    /// A parameter source or spec was malformed.
    Configuration,
    /// Parent kind of Type, Arity, and Operation.
    Runtime,
    /// A value had the wrong type.
    Type,
    /// A case or argument list had the wrong length.
    Arity,
    /// An operation was used outside its domain.
    Operation,
}

impl FaultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::Assertion => "Assertion",
            FaultKind::Configuration => "Configuration",
            FaultKind::Runtime => "Runtime",
            FaultKind::Type => "Type",
            FaultKind::Arity => "Arity",
            FaultKind::Operation => "Operation",
        }
    }

    /// Returns true if an error of kind `actual` satisfies an expectation of
    /// `self`: either the exact kind or one of its subkinds.
    pub fn accepts(self, actual: FaultKind) -> bool {
        self == actual
            || (self == FaultKind::Runtime
                && matches!(
                    actual,
                    FaultKind::Type | FaultKind::Arity | FaultKind::Operation
                ))
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AttestError {
    /// Returns the kind classification for this error.
    pub fn kind(&self) -> FaultKind {
        match self {
            AttestError::Assertion { .. } => FaultKind::Assertion,
            AttestError::Configuration { .. } => FaultKind::Configuration,
            AttestError::TypeMismatch { .. } => FaultKind::Type,
            AttestError::ArityMismatch { .. } => FaultKind::Arity,
            AttestError::InvalidOperation { .. } => FaultKind::Operation,
        }
    }

    /// True for the distinguished assertion-failure signal.
    pub fn is_assertion_failure(&self) -> bool {
        matches!(self, AttestError::Assertion { .. })
    }

    /// True for expansion-time configuration errors.
    pub fn is_configuration(&self) -> bool {
        matches!(self, AttestError::Configuration { .. })
    }

    /// Stable diagnostic code suffix for each kind.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            AttestError::Assertion { .. } => "assertion_failure",
            AttestError::Configuration { .. } => "configuration",
            AttestError::TypeMismatch { .. } => "type_mismatch",
            AttestError::ArityMismatch { .. } => "arity_mismatch",
            AttestError::InvalidOperation { .. } => "invalid_operation",
        }
    }
}

impl Diagnostic for AttestError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(format!("attest::{}", self.code_suffix())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        match self {
            AttestError::Configuration { help: Some(h), .. } => {
                Some(Box::new(h.clone()) as Box<dyn std::fmt::Display>)
            }
            _ => None,
        }
    }
}

// ============================================================================
// ERROR CONSTRUCTION UTILITIES
// ============================================================================

/// Creates the distinguished assertion-failure signal.
pub fn assertion_failure(message: impl Into<String>) -> AttestError {
    AttestError::Assertion {
        message: message.into(),
    }
}

/// Creates a configuration error with no help text.
pub fn configuration_error(message: impl Into<String>) -> AttestError {
    AttestError::Configuration {
        message: message.into(),
        help: None,
    }
}

/// Creates a configuration error carrying a help message.
pub fn configuration_error_with_help(
    message: impl Into<String>,
    help: impl Into<String>,
) -> AttestError {
    AttestError::Configuration {
        message: message.into(),
        help: Some(help.into()),
    }
}

/// Creates a type error with consistent messaging.
pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> AttestError {
    AttestError::TypeMismatch {
        expected: expected.into(),
        actual: actual.into(),
    }
}

/// Creates an arity error with consistent messaging.
pub fn arity_mismatch(expected: usize, actual: usize) -> AttestError {
    AttestError::ArityMismatch { expected, actual }
}

/// Creates an invalid-operation error with consistent messaging.
pub fn invalid_operation(operation: impl Into<String>, reason: impl Into<String>) -> AttestError {
    AttestError::InvalidOperation {
        operation: operation.into(),
        reason: reason.into(),
    }
}

/// Prints an AttestError with full miette diagnostics.
///
/// Use this for user-facing error display in CLI contexts.
pub fn print_error(error: AttestError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
