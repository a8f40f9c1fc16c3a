//! Field-level validation errors surfaced to the invoice editor.

/// A shape or required-field violation, reported with the path of the
/// offending field so the editor can highlight it.
///
/// Raised before assembly and always recoverable by editing the draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {message}")]
pub struct ValidationError {
    /// Dotted path to the offending field (e.g. `"parameters.acceptedTokens"`).
    pub path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for the given field path.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}
