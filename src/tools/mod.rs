//! Tool infrastructure: descriptors, the registry, invocation, and the
//! model-facing declaration catalog.
//!
//! A tool is anything implementing [`ToolDescriptor`]: a name, a
//! description, a parameter schema, and an async `execute`. Tools register
//! themselves into a [`ToolRegistry`] at startup; the agent invokes them by
//! name with JSON arguments and receives a JSON result.

pub mod builtins;
pub mod declarations;
pub mod descriptor;
pub mod error;
pub mod registry;

pub use declarations::ToolDeclaration;
pub use descriptor::{ToolDescriptor, ToolFuture};
pub use error::{ToolError, ToolErrorKind};
pub use registry::{MetricsSnapshot, ToolRegistry};
