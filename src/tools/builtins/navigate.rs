//! Navigation tool: lets the agent request an app route change.

use crate::schema::{ObjectSchema, Schema};
use crate::store::{ContextStore, RecordKind};
use crate::tools::descriptor::{ToolDescriptor, ToolFuture};
use crate::tools::error::ToolError;
use crate::types::CallerId;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub const NAVIGATE_TOOL_NAME: &str = "navigate";

/// Arguments for the navigate tool.
#[derive(Debug, Deserialize)]
struct NavigateArgs {
    path: String,
}

/// Records a navigation intent for the caller. The host application polls
/// the context store and performs the actual route change; the tool itself
/// only persists the request.
pub struct NavigateTool {
    store: Arc<dyn ContextStore>,
}

impl NavigateTool {
    #[must_use]
    pub fn new(store: Arc<dyn ContextStore>) -> Self {
        Self { store }
    }
}

impl ToolDescriptor for NavigateTool {
    fn name(&self) -> &str {
        NAVIGATE_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Navigate the application to a given route on behalf of the user. \
         Use this when the user asks to open a screen, for example a course, \
         a chapter, or their progress overview."
    }

    fn parameters(&self) -> ObjectSchema {
        ObjectSchema::new().required(
            "path",
            Schema::string(),
            "Route path to open, e.g. '/materials' or '/courses/42'",
        )
    }

    fn execute(&self, caller: CallerId, args: Value) -> ToolFuture {
        let store = Arc::clone(&self.store);
        Box::pin(async move {
            // Arguments were validated against the schema before dispatch;
            // a deserialization failure here is an execution error, not an
            // argument error.
            let args: NavigateArgs = serde_json::from_value(args)
                .map_err(|e| ToolError::execution_failed(NAVIGATE_TOOL_NAME, e.to_string()))?;

            tracing::info!(caller = %caller, path = %args.path, "recording navigation intent");
            store
                .insert(
                    &caller,
                    RecordKind::NavigationIntent,
                    json!({ "path": args.path }),
                )
                .await
                .map_err(|e| ToolError::execution_failed(NAVIGATE_TOOL_NAME, e.to_string()))?;

            Ok(json!({
                "success": true,
                "message": format!("Navigation to {} requested", args.path),
            }))
        })
    }
}
