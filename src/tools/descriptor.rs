//! The tool descriptor contract.
//!
//! A descriptor is the static shape of one invocable capability: a stable
//! name, a description consumed only by the language model, a parameter
//! schema, and the execute function. Any future tool conforms to the same
//! `(caller, validated arguments) -> result` shape, whether it only reads
//! or causes writes.

use crate::schema::ObjectSchema;
use crate::tools::error::ToolError;
use crate::types::CallerId;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// The result type for tool execution futures.
pub type ToolFuture = Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send + 'static>>;

/// One invocable capability exposed to the AI agent.
///
/// The registry stores descriptors by [`name`](ToolDescriptor::name) and the
/// invoker validates arguments against
/// [`parameters`](ToolDescriptor::parameters) before
/// [`execute`](ToolDescriptor::execute) runs; an implementation may assume
/// its arguments already satisfy the declared schema, including inserted
/// defaults.
///
/// # Example
///
/// ```rust
/// use studium_ai::schema::{ObjectSchema, Schema};
/// use studium_ai::tools::{ToolDescriptor, ToolFuture};
/// use studium_ai::types::CallerId;
/// use serde_json::{json, Value};
///
/// struct EchoTool;
///
/// impl ToolDescriptor for EchoTool {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn description(&self) -> &str {
///         "Echoes the given text back"
///     }
///
///     fn parameters(&self) -> ObjectSchema {
///         ObjectSchema::new().required("text", Schema::string(), "Text to echo")
///     }
///
///     fn execute(&self, _caller: CallerId, args: Value) -> ToolFuture {
///         Box::pin(async move {
///             Ok(json!({"success": true, "message": args["text"]}))
///         })
///     }
/// }
/// ```
pub trait ToolDescriptor: Send + Sync {
    /// Returns the unique, process-stable name used as the lookup key and
    /// as the identifier the language model emits when selecting this tool.
    fn name(&self) -> &str;

    /// Returns the natural-language description presented to the model.
    /// The core never parses it.
    fn description(&self) -> &str;

    /// Returns the argument contract. The same schema drives validation and
    /// the declaration emitted to the model.
    fn parameters(&self) -> ObjectSchema;

    /// Executes the tool for the given caller with validated arguments.
    ///
    /// Implementations return a small structured value (`{success, message}`
    /// or `{success, data}`) and surface collaborator failures as
    /// [`ToolError::execution_failed`].
    fn execute(&self, caller: CallerId, args: Value) -> ToolFuture;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use serde_json::json;

    struct EchoTool;

    impl ToolDescriptor for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes the given text back"
        }

        fn parameters(&self) -> ObjectSchema {
            ObjectSchema::new().required("text", Schema::string(), "Text to echo")
        }

        fn execute(&self, _caller: CallerId, args: Value) -> ToolFuture {
            Box::pin(async move { Ok(json!({"success": true, "message": args["text"]})) })
        }
    }

    #[tokio::test]
    async fn descriptor_executes_with_caller() {
        let tool = EchoTool;
        let caller = CallerId::parse("user_1").unwrap();

        let result = tool
            .execute(caller, json!({"text": "hello"}))
            .await
            .unwrap();
        assert_eq!(result["success"], json!(true));
        assert_eq!(result["message"], json!("hello"));
    }

    #[test]
    fn descriptor_reports_metadata() {
        let tool = EchoTool;
        assert_eq!(tool.name(), "echo");
        assert!(!tool.description().is_empty());
        assert_eq!(tool.parameters().required_names(), vec!["text"]);
    }
}
