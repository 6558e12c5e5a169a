//! WhatsApp context tool: surfaces the caller's recent bridged messages.

use crate::schema::{ObjectSchema, Schema};
use crate::store::{ContextStore, RecordKind};
use crate::tools::descriptor::{ToolDescriptor, ToolFuture};
use crate::tools::error::ToolError;
use crate::types::CallerId;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub const READ_WHATSAPP_CONTEXT_TOOL_NAME: &str = "read_whatsapp_context";

/// Default number of messages returned when the model omits `limit`.
pub const DEFAULT_LIMIT: u64 = 10;
/// Upper bound on `limit`, enforced by the parameter schema.
pub const MAX_LIMIT: u64 = 50;

#[derive(Debug, Deserialize)]
struct ReadContextArgs {
    limit: u64,
}

/// Reads the caller's most recent WhatsApp messages from the context store,
/// newest first. Only records belonging to the calling user are visible.
pub struct ReadWhatsappContextTool {
    store: Arc<dyn ContextStore>,
    default_limit: u64,
    max_limit: u64,
}

impl ReadWhatsappContextTool {
    #[must_use]
    pub fn new(store: Arc<dyn ContextStore>) -> Self {
        Self::with_limits(store, DEFAULT_LIMIT, MAX_LIMIT)
    }

    /// Overrides the built-in limits, typically from `[context]` config.
    #[must_use]
    pub fn with_limits(store: Arc<dyn ContextStore>, default_limit: u64, max_limit: u64) -> Self {
        Self {
            store,
            default_limit,
            max_limit,
        }
    }
}

impl ToolDescriptor for ReadWhatsappContextTool {
    fn name(&self) -> &str {
        READ_WHATSAPP_CONTEXT_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Read the user's recent WhatsApp conversation context. Use this to \
         ground answers in what the user has actually been discussing."
    }

    fn parameters(&self) -> ObjectSchema {
        // Saturate rather than wrap when a host configures an absurd bound.
        let max = i64::try_from(self.max_limit).unwrap_or(i64::MAX);
        ObjectSchema::new().optional_with_default(
            "limit",
            Schema::integer_in(1, max),
            "Maximum number of messages to return, most recent first",
            json!(self.default_limit),
        )
    }

    fn execute(&self, caller: CallerId, args: Value) -> ToolFuture {
        let store = Arc::clone(&self.store);
        Box::pin(async move {
            let args: ReadContextArgs = serde_json::from_value(args).map_err(|e| {
                ToolError::execution_failed(READ_WHATSAPP_CONTEXT_TOOL_NAME, e.to_string())
            })?;

            tracing::debug!(caller = %caller, limit = args.limit, "reading whatsapp context");
            let limit = usize::try_from(args.limit).unwrap_or(usize::MAX);
            let records = store
                .recent(&caller, RecordKind::WhatsappMessage, limit)
                .await
                .map_err(|e| {
                    ToolError::execution_failed(READ_WHATSAPP_CONTEXT_TOOL_NAME, e.to_string())
                })?;

            let data: Vec<Value> = records
                .into_iter()
                .map(|record| {
                    json!({
                        "body": record.body,
                        "created_at": record.created_at.to_rfc3339(),
                    })
                })
                .collect();

            Ok(json!({ "success": true, "data": data }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryContextStore;

    fn caller() -> CallerId {
        CallerId::parse("user_42").unwrap()
    }

    async fn seeded_store(messages: usize) -> Arc<MemoryContextStore> {
        let store = Arc::new(MemoryContextStore::new());
        for i in 0..messages {
            store
                .insert(
                    &caller(),
                    RecordKind::WhatsappMessage,
                    json!({"text": format!("message {i}")}),
                )
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn returns_most_recent_messages_first() {
        let store = seeded_store(3).await;
        let tool = ReadWhatsappContextTool::new(store);

        let result = tool.execute(caller(), json!({"limit": 2})).await.unwrap();
        let data = result["data"].as_array().unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["body"]["text"], json!("message 2"));
        assert_eq!(data[1]["body"]["text"], json!("message 1"));
    }

    #[tokio::test]
    async fn fewer_messages_than_limit_returns_all() {
        let store = seeded_store(2).await;
        let tool = ReadWhatsappContextTool::new(store);

        let result = tool.execute(caller(), json!({"limit": 10})).await.unwrap();
        assert_eq!(result["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_store_returns_empty_data() {
        let tool = ReadWhatsappContextTool::new(Arc::new(MemoryContextStore::new()));

        let result = tool.execute(caller(), json!({"limit": 5})).await.unwrap();
        assert_eq!(result["success"], json!(true));
        assert_eq!(result["data"], json!([]));
    }

    #[tokio::test]
    async fn other_callers_messages_are_not_visible() {
        let store = seeded_store(2).await;
        store
            .insert(
                &CallerId::parse("user_other").unwrap(),
                RecordKind::WhatsappMessage,
                json!({"text": "private"}),
            )
            .await
            .unwrap();
        let tool = ReadWhatsappContextTool::new(store);

        let result = tool.execute(caller(), json!({"limit": 10})).await.unwrap();
        assert_eq!(result["data"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn limit_schema_defaults_to_ten() {
        let tool = ReadWhatsappContextTool::new(Arc::new(MemoryContextStore::new()));

        let validated = tool.parameters().validate(json!({})).unwrap();
        assert_eq!(validated["limit"], json!(10));
    }

    #[test]
    fn oversized_max_limit_saturates_instead_of_wrapping() {
        let tool = ReadWhatsappContextTool::with_limits(
            Arc::new(MemoryContextStore::new()),
            10,
            u64::MAX,
        );

        // A wrapping cast would turn the bound negative and reject everything.
        let validated = tool.parameters().validate(json!({"limit": 25})).unwrap();
        assert_eq!(validated["limit"], json!(25));
    }

    #[test]
    fn limit_above_maximum_is_rejected_by_schema() {
        let tool = ReadWhatsappContextTool::new(Arc::new(MemoryContextStore::new()));

        let violations = tool.parameters().validate(json!({"limit": 500})).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "limit");
    }
}
