//! Built-in tools shipped with the crate.
//!
//! - `navigate`: record a navigation intent for the host application
//! - `read_whatsapp_context`: read the caller's recent bridged messages
//!
//! Both are backed by a [`ContextStore`]; hosts register them through
//! [`register_defaults`] and may add their own descriptors alongside.

pub mod navigate;
pub mod whatsapp_context;

pub use navigate::{NavigateTool, NAVIGATE_TOOL_NAME};
pub use whatsapp_context::{
    ReadWhatsappContextTool, DEFAULT_LIMIT, MAX_LIMIT, READ_WHATSAPP_CONTEXT_TOOL_NAME,
};

use crate::config::ContextConfig;
use crate::store::ContextStore;
use crate::tools::registry::ToolRegistry;
use std::sync::Arc;

/// Registers the built-in tools with stock limits.
pub fn register_defaults(registry: &mut ToolRegistry, store: Arc<dyn ContextStore>) {
    registry.register(Arc::new(NavigateTool::new(Arc::clone(&store))));
    registry.register(Arc::new(ReadWhatsappContextTool::new(store)));
}

/// Registers the built-in tools with limits taken from `[context]` config.
pub fn register_with_config(
    registry: &mut ToolRegistry,
    store: Arc<dyn ContextStore>,
    context: &ContextConfig,
) {
    registry.register(Arc::new(NavigateTool::new(Arc::clone(&store))));
    registry.register(Arc::new(ReadWhatsappContextTool::with_limits(
        store,
        context.default_limit,
        context.max_limit,
    )));
}
