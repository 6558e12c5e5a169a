//! # Studium-AI: AI tooling and plugin bridge for a learning platform
//!
//! Infrastructure for an AI study assistant embedded in a learning app:
//! a registry of tools the assistant can call, schema-validated tool
//! invocation, declaration conversion for LLM function calling, and a
//! message bridge between the host and embedded learning plugins.
//!
//! ## Architecture
//!
//! - **Tool Registry**: Owned catalog of tools; resolves, validates, executes
//! - **Schema**: Typed parameter schemas, validation, and JSON Schema output
//! - **Declarations**: Model-facing catalog with uppercase type tags
//! - **Context Store**: Per-user records backing the built-in tools
//! - **Plugin Bridge**: `READY`/`INIT_DATA` handshake and event dispatch
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use studium_ai::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StudiumError> {
//!     let store = Arc::new(MemoryContextStore::new());
//!     let mut registry = ToolRegistry::new();
//!     studium_ai::tools::builtins::register_defaults(&mut registry, store);
//!
//!     let caller = CallerId::parse("user_1")?;
//!     let result = registry
//!         .invoke(&caller, "navigate", serde_json::json!({"path": "/materials"}))
//!         .await?;
//!     println!("{result}");
//!     Ok(())
//! }
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod logging;
pub mod schema;
pub mod store;
pub mod tools;
pub mod types;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::bridge::{
        BridgeCallbacks, BridgeSession, InboundEnvelope, PluginEndpoint, PluginMessage, PluginMode,
    };
    pub use crate::config::StudiumConfig;
    pub use crate::error::{StudiumError, StudiumErrorKind};
    pub use crate::schema::{ObjectSchema, Schema, SchemaViolation};
    pub use crate::store::{ContextRecord, ContextStore, MemoryContextStore, RecordKind};
    pub use crate::tools::{ToolDeclaration, ToolDescriptor, ToolError, ToolFuture, ToolRegistry};
    pub use crate::types::CallerId;
}
