//! Wire types for the plugin bridge.
//!
//! The plugin protocol is a small tagged-JSON message scheme: every message
//! carries a string `type` and an optional `payload`. Dispatch is by string
//! tag rather than a closed enum so unrecognized types survive
//! deserialization and can be logged and dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

/// A message exchanged with an embedded plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl PluginMessage {
    /// Plugin signals it is loaded and ready for initialization data.
    pub const READY: &'static str = "READY";
    /// Host delivers learning material and session settings.
    pub const INIT_DATA: &'static str = "INIT_DATA";
    /// Plugin reports chapter progress.
    pub const PROGRESS_UPDATE: &'static str = "PROGRESS_UPDATE";
    /// Plugin reports a completed quiz.
    pub const QUIZ_RESULT: &'static str = "QUIZ_RESULT";
    /// Plugin requests advancing to the next chapter.
    pub const NEXT_CHAPTER: &'static str = "NEXT_CHAPTER";

    #[must_use]
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload: Some(payload),
        }
    }

    /// A message with no payload.
    #[must_use]
    pub fn bare(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
        }
    }

    #[must_use]
    pub fn ready() -> Self {
        Self::bare(Self::READY)
    }
}

/// Presentation mode requested of the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginMode {
    /// The learner drives chapter navigation.
    #[default]
    Manual,
    /// The plugin advances chapters on its own schedule.
    Auto,
}

impl fmt::Display for PluginMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

static NEXT_ENDPOINT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one plugin endpoint. A session only accepts
/// inbound messages whose source matches its bound endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointId(u64);

impl EndpointId {
    fn next() -> Self {
        Self(NEXT_ENDPOINT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for EndpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "endpoint-{}", self.0)
    }
}

/// Host-side handle for delivering messages to one plugin instance.
#[derive(Debug, Clone)]
pub struct PluginEndpoint {
    id: EndpointId,
    sender: mpsc::UnboundedSender<PluginMessage>,
}

impl PluginEndpoint {
    /// Creates an endpoint and the receiver the plugin host drains.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PluginMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let endpoint = Self {
            id: EndpointId::next(),
            sender,
        };
        (endpoint, receiver)
    }

    #[must_use]
    pub fn id(&self) -> EndpointId {
        self.id
    }

    /// Delivers a message to the plugin. If the plugin side has gone away
    /// the message is dropped silently; a torn-down plugin is a normal
    /// lifecycle event, not an error.
    pub fn send(&self, message: PluginMessage) {
        if self.sender.send(message).is_err() {
            tracing::debug!(endpoint = %self.id, "plugin endpoint closed, dropping outbound message");
        }
    }
}

/// An inbound plugin message stamped with the endpoint it arrived from.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEnvelope {
    pub source: EndpointId,
    pub message: PluginMessage,
}

impl InboundEnvelope {
    #[must_use]
    pub fn new(source: EndpointId, message: PluginMessage) -> Self {
        Self { source, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_serializes_with_type_tag() {
        let message = PluginMessage::new(PluginMessage::INIT_DATA, json!({"mode": "manual"}));
        let wire = serde_json::to_value(&message).unwrap();

        assert_eq!(wire["type"], json!("INIT_DATA"));
        assert_eq!(wire["payload"]["mode"], json!("manual"));
    }

    #[test]
    fn bare_message_omits_payload_on_the_wire() {
        let wire = serde_json::to_value(PluginMessage::ready()).unwrap();
        assert_eq!(wire, json!({"type": "READY"}));
    }

    #[test]
    fn unknown_type_still_deserializes() {
        let message: PluginMessage =
            serde_json::from_value(json!({"type": "TELEMETRY", "payload": {"fps": 60}})).unwrap();
        assert_eq!(message.kind, "TELEMETRY");
        assert_eq!(message.payload, Some(json!({"fps": 60})));
    }

    #[test]
    fn endpoint_ids_are_unique() {
        let (a, _rx_a) = PluginEndpoint::channel();
        let (b, _rx_b) = PluginEndpoint::channel();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn send_to_dropped_receiver_is_silent() {
        let (endpoint, receiver) = PluginEndpoint::channel();
        drop(receiver);
        endpoint.send(PluginMessage::ready());
    }

    #[test]
    fn plugin_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_value(PluginMode::Auto).unwrap(), json!("auto"));
        assert_eq!(PluginMode::default(), PluginMode::Manual);
    }
}
