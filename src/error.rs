//! Crate-level error type for studium-ai.
//!
//! Subsystems carry their own error types ([`ToolError`], [`StoreError`]);
//! this type is the umbrella used by the configuration layer and by hosts
//! that want a single error to propagate.
//!
//! No external error crates (anyhow, thiserror, eyre) are used.

use crate::store::StoreError;
use crate::tools::ToolError;
use std::fmt;

/// Errors that can occur when using the studium-ai API.
#[derive(Debug, Clone, PartialEq)]
pub struct StudiumError {
    /// The specific error that occurred
    pub kind: StudiumErrorKind,
}

/// Specific error types.
#[derive(Debug, Clone, PartialEq)]
pub enum StudiumErrorKind {
    /// Configuration error during loading or validation
    Configuration {
        /// Description of what was invalid
        field: String,
        /// Why it was invalid
        reason: String,
    },
    /// A tool lookup, validation, or execution error
    Tool(ToolError),
    /// A context store error
    Store(StoreError),
}

impl StudiumError {
    /// Creates a new StudiumError with the given kind.
    #[must_use]
    pub fn new(kind: StudiumErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(StudiumErrorKind::Configuration {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Returns true if this error indicates a configuration problem.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, StudiumErrorKind::Configuration { .. })
    }

    /// Returns true if this error wraps a tool error.
    #[must_use]
    pub fn is_tool(&self) -> bool {
        matches!(self.kind, StudiumErrorKind::Tool(_))
    }

    /// Returns true if this error wraps a store error.
    #[must_use]
    pub fn is_store(&self) -> bool {
        matches!(self.kind, StudiumErrorKind::Store(_))
    }
}

impl fmt::Display for StudiumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StudiumErrorKind::Configuration { field, reason } => {
                write!(f, "configuration error for '{}': {}", field, reason)
            }
            StudiumErrorKind::Tool(error) => write!(f, "{error}"),
            StudiumErrorKind::Store(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for StudiumError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            StudiumErrorKind::Configuration { .. } => None,
            StudiumErrorKind::Tool(error) => Some(error),
            StudiumErrorKind::Store(error) => Some(error),
        }
    }
}

impl From<ToolError> for StudiumError {
    fn from(error: ToolError) -> Self {
        Self::new(StudiumErrorKind::Tool(error))
    }
}

impl From<StoreError> for StudiumError {
    fn from(error: StoreError) -> Self {
        Self::new(StudiumErrorKind::Store(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_display() {
        let error = StudiumError::configuration("context.default_limit", "must be at least 1");

        let message = error.to_string();
        assert!(message.contains("context.default_limit"));
        assert!(message.contains("at least 1"));
        assert!(error.is_configuration());
    }

    #[test]
    fn tool_error_conversion_preserves_message() {
        let tool_error = ToolError::not_found("navigate");
        let error: StudiumError = tool_error.clone().into();

        assert!(error.is_tool());
        assert_eq!(error.to_string(), tool_error.to_string());
    }

    #[test]
    fn store_error_conversion() {
        let error: StudiumError = StoreError::unavailable("backend offline").into();

        assert!(error.is_store());
        assert!(error.to_string().contains("backend offline"));
    }
}
