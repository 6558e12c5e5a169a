//! Tool error types.
//!
//! The invocation pipeline surfaces exactly three failure kinds: an unknown
//! tool name, arguments that failed schema validation, and a failure inside
//! the tool's own side effect. The orchestration layer relies on this
//! taxonomy to decide whether the model should retry with a different name,
//! retry with corrected arguments, or give up on the call.

use crate::schema::SchemaViolation;
use std::fmt;

/// Errors that can occur in tool operations.
///
/// Uses `Box<ToolErrorKind>` to keep the error size small in Result types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    kind: Box<ToolErrorKind>,
}

/// Specific tool error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolErrorKind {
    /// Tool not found in the registry.
    NotFound {
        /// The name that failed to resolve
        tool_name: String,
    },
    /// Arguments failed schema validation; the tool was never executed.
    InvalidArguments {
        /// The name of the tool
        tool_name: String,
        /// Every violation found in the argument object
        violations: Vec<SchemaViolation>,
    },
    /// The tool's own side effect failed.
    ExecutionFailed {
        /// The name of the tool
        tool_name: String,
        /// The underlying cause
        reason: String,
    },
}

impl ToolError {
    /// Creates a new ToolError with the given kind.
    #[must_use]
    pub fn new(kind: ToolErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(tool_name: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound {
            tool_name: tool_name.into(),
        })
    }

    /// Creates an invalid arguments error.
    #[must_use]
    pub fn invalid_arguments(
        tool_name: impl Into<String>,
        violations: Vec<SchemaViolation>,
    ) -> Self {
        Self::new(ToolErrorKind::InvalidArguments {
            tool_name: tool_name.into(),
            violations,
        })
    }

    /// Creates an execution failed error.
    #[must_use]
    pub fn execution_failed(tool_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::ExecutionFailed {
            tool_name: tool_name.into(),
            reason: reason.into(),
        })
    }

    /// Returns a reference to the error kind.
    #[must_use]
    pub fn kind(&self) -> &ToolErrorKind {
        &self.kind
    }

    /// Returns the name of the tool the error concerns.
    #[must_use]
    pub fn tool_name(&self) -> &str {
        match &*self.kind {
            ToolErrorKind::NotFound { tool_name }
            | ToolErrorKind::InvalidArguments { tool_name, .. }
            | ToolErrorKind::ExecutionFailed { tool_name, .. } => tool_name,
        }
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(&*self.kind, ToolErrorKind::NotFound { .. })
    }

    /// Returns true if this is an invalid arguments error.
    #[must_use]
    pub fn is_invalid_arguments(&self) -> bool {
        matches!(&*self.kind, ToolErrorKind::InvalidArguments { .. })
    }

    /// Returns true if this is an execution failure.
    #[must_use]
    pub fn is_execution_failed(&self) -> bool {
        matches!(&*self.kind, ToolErrorKind::ExecutionFailed { .. })
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.kind {
            ToolErrorKind::NotFound { tool_name } => {
                write!(f, "tool '{tool_name}' not found")
            }
            ToolErrorKind::InvalidArguments {
                tool_name,
                violations,
            } => {
                write!(f, "invalid arguments for tool '{tool_name}':")?;
                for violation in violations {
                    write!(f, " [{violation}]")?;
                }
                Ok(())
            }
            ToolErrorKind::ExecutionFailed { tool_name, reason } => {
                write!(f, "tool '{tool_name}' execution failed: {reason}")
            }
        }
    }
}

impl std::error::Error for ToolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = ToolError::not_found("missing");
        assert_eq!(err.to_string(), "tool 'missing' not found");
        assert!(err.is_not_found());
        assert_eq!(err.tool_name(), "missing");
    }

    #[test]
    fn invalid_arguments_display_lists_violations() {
        let violations = crate::schema::ObjectSchema::new()
            .required("path", crate::schema::Schema::string(), "Route path")
            .validate(serde_json::json!({}))
            .unwrap_err();
        let err = ToolError::invalid_arguments("navigate", violations);

        assert!(err.is_invalid_arguments());
        let display = err.to_string();
        assert!(display.contains("navigate"));
        assert!(display.contains("path"));
    }

    #[test]
    fn execution_failed_display() {
        let err = ToolError::execution_failed("navigate", "store unavailable");
        assert!(err.is_execution_failed());
        assert!(err.to_string().contains("store unavailable"));
    }
}
