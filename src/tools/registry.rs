//! Tool registry and invoker.
//!
//! The registry is an owned map from tool name to descriptor, built once at
//! process start and read concurrently afterwards. Invocation resolves the
//! name, validates the raw arguments against the descriptor's schema, and
//! only then executes — a tool never sees arguments that failed validation.

use crate::tools::declarations::{self, ToolDeclaration};
use crate::tools::descriptor::ToolDescriptor;
use crate::tools::error::ToolError;
use crate::types::CallerId;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters kept by the registry across its lifetime.
///
/// Counters are atomic because invocations run concurrently over a shared
/// registry reference.
#[derive(Debug, Default)]
pub struct RegistryMetrics {
    registered: AtomicU64,
    replaced: AtomicU64,
    invocations: AtomicU64,
    failures: AtomicU64,
}

/// A point-in-time copy of the registry counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    /// Total registrations, including replacements
    pub registered: u64,
    /// Registrations that overwrote an existing name
    pub replaced: u64,
    /// Total invocations attempted
    pub invocations: u64,
    /// Invocations that ended in any error kind
    pub failures: u64,
}

impl RegistryMetrics {
    fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            registered: self.registered.load(Ordering::Relaxed),
            replaced: self.replaced.load(Ordering::Relaxed),
            invocations: self.invocations.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// Owned, injectable catalog of the tools available to the AI agent.
///
/// Populated at startup by each capability module registering itself;
/// there is no unregister operation. Registration is last-write-wins:
/// registering a second descriptor under an existing name replaces the
/// first.
///
/// # Example
///
/// ```rust,ignore
/// use studium_ai::tools::ToolRegistry;
/// use studium_ai::tools::builtins;
///
/// let mut registry = ToolRegistry::new();
/// builtins::register_defaults(&mut registry, store);
///
/// let result = registry.invoke(&caller, "navigate", json!({"path": "/materials"})).await?;
/// ```
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolDescriptor>>,
    metrics: RegistryMetrics,
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor under its own name.
    ///
    /// A registration for an already-present name replaces the previous
    /// descriptor (last write wins); the replacement is logged and counted.
    pub fn register(&mut self, descriptor: Arc<dyn ToolDescriptor>) {
        let name = descriptor.name().to_string();
        let replaced = self.tools.insert(name.clone(), descriptor).is_some();

        self.metrics.registered.fetch_add(1, Ordering::Relaxed);
        if replaced {
            self.metrics.replaced.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(tool_name = %name, "tool registration replaced an existing descriptor");
        } else {
            tracing::info!(tool_name = %name, "tool registered");
        }
    }

    /// Registers a descriptor using the builder pattern.
    #[must_use]
    pub fn with_tool(mut self, descriptor: Arc<dyn ToolDescriptor>) -> Self {
        self.register(descriptor);
        self
    }

    /// Looks up a descriptor by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn ToolDescriptor>> {
        self.tools.get(name).cloned()
    }

    /// Returns true if a tool with the given name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Returns the registered tool names, sorted.
    #[must_use]
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Builds the function-calling declaration catalog: one declaration per
    /// registered tool, sorted by name.
    #[must_use]
    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        let mut catalog: Vec<ToolDeclaration> = self
            .tools
            .values()
            .map(|descriptor| declarations::declaration_for(descriptor.as_ref()))
            .collect();
        catalog.sort_by(|a, b| a.name.cmp(&b.name));
        catalog
    }

    /// Invokes a tool by name for the given caller.
    ///
    /// Resolution, validation, and execution happen in that order; on a
    /// validation failure the tool is never executed.
    ///
    /// # Errors
    ///
    /// - [`ToolError::not_found`] when the name does not resolve
    /// - [`ToolError::invalid_arguments`] when `raw_args` fails the
    ///   descriptor's schema
    /// - [`ToolError::execution_failed`] when the descriptor's own side
    ///   effect fails
    pub async fn invoke(
        &self,
        caller: &CallerId,
        name: &str,
        raw_args: Value,
    ) -> Result<Value, ToolError> {
        self.metrics.invocations.fetch_add(1, Ordering::Relaxed);

        let Some(descriptor) = self.lookup(name) else {
            self.metrics.failures.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(tool_name = %name, caller = %caller, "unknown tool requested");
            return Err(ToolError::not_found(name));
        };

        let validated = match descriptor.parameters().validate(raw_args) {
            Ok(validated) => validated,
            Err(violations) => {
                self.metrics.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    tool_name = %name,
                    caller = %caller,
                    violations = violations.len(),
                    "tool arguments failed validation"
                );
                return Err(ToolError::invalid_arguments(name, violations));
            }
        };

        tracing::debug!(tool_name = %name, caller = %caller, "executing tool");
        match descriptor.execute(caller.clone(), validated).await {
            Ok(result) => Ok(result),
            Err(error) => {
                self.metrics.failures.fetch_add(1, Ordering::Relaxed);
                tracing::error!(
                    tool_name = %name,
                    caller = %caller,
                    error = %error,
                    "tool execution failed"
                );
                // Descriptors normally raise execution failures themselves;
                // anything else is still surfaced under the same kind.
                if error.is_execution_failed() {
                    Err(error)
                } else {
                    Err(ToolError::execution_failed(name, error.to_string()))
                }
            }
        }
    }

    /// Returns a snapshot of the registry counters.
    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish_non_exhaustive()
    }
}
