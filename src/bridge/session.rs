//! Bridge session: the host side of one plugin conversation.
//!
//! Lifecycle: the host creates a session bound to an endpoint, the plugin
//! sends `READY`, the session answers with `INIT_DATA` carrying the
//! learning material and settings, and from then on dispatches progress,
//! quiz, and chapter events to host callbacks. Messages from any other
//! endpoint are dropped, as is everything on a detached session.

use crate::bridge::message::{
    EndpointId, InboundEnvelope, PluginEndpoint, PluginMessage, PluginMode,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

type PayloadCallback = Box<dyn Fn(Value) + Send>;
type EventCallback = Box<dyn Fn() + Send>;

/// Host callbacks invoked as plugin events arrive. Unset callbacks mean
/// the corresponding event is consumed without effect.
#[derive(Default)]
pub struct BridgeCallbacks {
    on_progress: Option<PayloadCallback>,
    on_quiz_result: Option<PayloadCallback>,
    on_next_chapter: Option<EventCallback>,
}

impl BridgeCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_progress(mut self, callback: impl Fn(Value) + Send + 'static) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_quiz_result(mut self, callback: impl Fn(Value) + Send + 'static) -> Self {
        self.on_quiz_result = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn on_next_chapter(mut self, callback: impl Fn() + Send + 'static) -> Self {
        self.on_next_chapter = Some(Box::new(callback));
        self
    }
}

impl std::fmt::Debug for BridgeCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeCallbacks")
            .field("on_progress", &self.on_progress.is_some())
            .field("on_quiz_result", &self.on_quiz_result.is_some())
            .field("on_next_chapter", &self.on_next_chapter.is_some())
            .finish()
    }
}

/// One plugin conversation, bound to at most one endpoint.
#[derive(Debug)]
pub struct BridgeSession {
    endpoint: Option<PluginEndpoint>,
    material: Value,
    knowledge_profile: Option<Value>,
    mode: PluginMode,
    callbacks: BridgeCallbacks,
    initialized: bool,
}

impl BridgeSession {
    /// Creates a session bound to `endpoint`, serving `material`.
    #[must_use]
    pub fn new(endpoint: PluginEndpoint, material: Value) -> Self {
        Self {
            endpoint: Some(endpoint),
            material,
            knowledge_profile: None,
            mode: PluginMode::default(),
            callbacks: BridgeCallbacks::default(),
            initialized: false,
        }
    }

    /// Creates a session with no endpoint. All sends and inbound messages
    /// are dropped; useful when the plugin surface is not mounted yet.
    #[must_use]
    pub fn detached(material: Value) -> Self {
        Self {
            endpoint: None,
            material,
            knowledge_profile: None,
            mode: PluginMode::default(),
            callbacks: BridgeCallbacks::default(),
            initialized: false,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: PluginMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_knowledge_profile(mut self, profile: Value) -> Self {
        self.knowledge_profile = Some(profile);
        self
    }

    #[must_use]
    pub fn with_callbacks(mut self, callbacks: BridgeCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// True once the first `READY` has been answered with `INIT_DATA`.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Identity of the bound endpoint, if any.
    #[must_use]
    pub fn endpoint_id(&self) -> Option<EndpointId> {
        self.endpoint.as_ref().map(PluginEndpoint::id)
    }

    /// Sends a message to the plugin; dropped silently when detached.
    pub fn send(&self, message: PluginMessage) {
        if let Some(endpoint) = &self.endpoint {
            endpoint.send(message);
        }
    }

    /// Handles one inbound message.
    ///
    /// Messages are dropped when the session is detached or the envelope's
    /// source is not the bound endpoint. A repeated `READY` re-sends
    /// `INIT_DATA` without flipping the session back to uninitialized.
    pub fn handle(&mut self, envelope: InboundEnvelope) {
        let Some(endpoint) = &self.endpoint else {
            tracing::debug!("detached bridge session, dropping inbound message");
            return;
        };
        if envelope.source != endpoint.id() {
            tracing::warn!(
                expected = %endpoint.id(),
                actual = %envelope.source,
                "inbound plugin message from foreign endpoint, dropping"
            );
            return;
        }

        let InboundEnvelope { message, .. } = envelope;
        match message.kind.as_str() {
            PluginMessage::READY => {
                tracing::info!(endpoint = %endpoint.id(), "plugin ready, sending init data");
                self.send_init_data();
                self.initialized = true;
            }
            PluginMessage::PROGRESS_UPDATE => {
                if let Some(callback) = &self.callbacks.on_progress {
                    callback(message.payload.unwrap_or(Value::Null));
                }
            }
            PluginMessage::QUIZ_RESULT => {
                if let Some(callback) = &self.callbacks.on_quiz_result {
                    callback(message.payload.unwrap_or(Value::Null));
                }
            }
            PluginMessage::NEXT_CHAPTER => {
                if let Some(callback) = &self.callbacks.on_next_chapter {
                    callback();
                }
            }
            other => {
                tracing::debug!(kind = %other, "ignoring unrecognized plugin message");
            }
        }
    }

    fn send_init_data(&self) {
        self.send(PluginMessage::new(
            PluginMessage::INIT_DATA,
            json!({
                "material": self.material,
                "mode": self.mode,
                "knowledgeProfile": self.knowledge_profile,
            }),
        ));
    }

    /// Moves the session onto a background task draining `inbound`. The
    /// returned listener aborts the task when dropped, so tearing down the
    /// plugin surface stops message handling with it.
    #[must_use]
    pub fn spawn(mut self, mut inbound: mpsc::UnboundedReceiver<InboundEnvelope>) -> BridgeListener {
        let handle = tokio::spawn(async move {
            while let Some(envelope) = inbound.recv().await {
                self.handle(envelope);
            }
            tracing::debug!("bridge inbound channel closed, listener exiting");
        });
        BridgeListener { handle }
    }
}

/// Handle on a spawned bridge listener task.
#[derive(Debug)]
pub struct BridgeListener {
    handle: JoinHandle<()>,
}

impl BridgeListener {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for BridgeListener {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn drain(
        receiver: &mut mpsc::UnboundedReceiver<PluginMessage>,
    ) -> Vec<PluginMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = receiver.try_recv() {
            messages.push(message);
        }
        messages
    }

    #[test]
    fn ready_triggers_init_data() {
        let (endpoint, mut outbound) = PluginEndpoint::channel();
        let id = endpoint.id();
        let mut session = BridgeSession::new(endpoint, json!({"title": "Rust basics"}))
            .with_mode(PluginMode::Auto)
            .with_knowledge_profile(json!({"level": "beginner"}));

        assert!(!session.is_initialized());
        session.handle(InboundEnvelope::new(id, PluginMessage::ready()));
        assert!(session.is_initialized());

        let sent = drain(&mut outbound);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, PluginMessage::INIT_DATA);
        let payload = sent[0].payload.as_ref().unwrap();
        assert_eq!(payload["material"]["title"], json!("Rust basics"));
        assert_eq!(payload["mode"], json!("auto"));
        assert_eq!(payload["knowledgeProfile"]["level"], json!("beginner"));
    }

    #[test]
    fn repeated_ready_resends_init_data() {
        let (endpoint, mut outbound) = PluginEndpoint::channel();
        let id = endpoint.id();
        let mut session = BridgeSession::new(endpoint, json!({}));

        session.handle(InboundEnvelope::new(id, PluginMessage::ready()));
        session.handle(InboundEnvelope::new(id, PluginMessage::ready()));

        assert!(session.is_initialized());
        assert_eq!(drain(&mut outbound).len(), 2);
    }

    #[test]
    fn events_dispatch_to_callbacks() {
        let (endpoint, _outbound) = PluginEndpoint::channel();
        let id = endpoint.id();

        let progress = Arc::new(Mutex::new(Vec::new()));
        let quizzes = Arc::new(Mutex::new(Vec::new()));
        let chapters = Arc::new(AtomicUsize::new(0));

        let callbacks = {
            let progress = Arc::clone(&progress);
            let quizzes = Arc::clone(&quizzes);
            let chapters = Arc::clone(&chapters);
            BridgeCallbacks::new()
                .on_progress(move |payload| progress.lock().unwrap().push(payload))
                .on_quiz_result(move |payload| quizzes.lock().unwrap().push(payload))
                .on_next_chapter(move || {
                    chapters.fetch_add(1, Ordering::SeqCst);
                })
        };

        let mut session = BridgeSession::new(endpoint, json!({})).with_callbacks(callbacks);

        session.handle(InboundEnvelope::new(
            id,
            PluginMessage::new(PluginMessage::PROGRESS_UPDATE, json!({"chapter": 2})),
        ));
        session.handle(InboundEnvelope::new(
            id,
            PluginMessage::new(PluginMessage::QUIZ_RESULT, json!({"score": 0.8})),
        ));
        session.handle(InboundEnvelope::new(
            id,
            PluginMessage::bare(PluginMessage::NEXT_CHAPTER),
        ));

        assert_eq!(progress.lock().unwrap().as_slice(), &[json!({"chapter": 2})]);
        assert_eq!(quizzes.lock().unwrap().as_slice(), &[json!({"score": 0.8})]);
        assert_eq!(chapters.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_payload_dispatches_null() {
        let (endpoint, _outbound) = PluginEndpoint::channel();
        let id = endpoint.id();

        let progress = Arc::new(Mutex::new(Vec::new()));
        let callbacks = {
            let progress = Arc::clone(&progress);
            BridgeCallbacks::new().on_progress(move |payload| progress.lock().unwrap().push(payload))
        };
        let mut session = BridgeSession::new(endpoint, json!({})).with_callbacks(callbacks);

        session.handle(InboundEnvelope::new(
            id,
            PluginMessage::bare(PluginMessage::PROGRESS_UPDATE),
        ));

        assert_eq!(progress.lock().unwrap().as_slice(), &[Value::Null]);
    }

    #[test]
    fn foreign_endpoint_messages_are_dropped() {
        let (endpoint, mut outbound) = PluginEndpoint::channel();
        let (foreign, _foreign_rx) = PluginEndpoint::channel();
        let mut session = BridgeSession::new(endpoint, json!({}));

        session.handle(InboundEnvelope::new(foreign.id(), PluginMessage::ready()));

        assert!(!session.is_initialized());
        assert!(drain(&mut outbound).is_empty());
    }

    #[test]
    fn detached_session_drops_everything() {
        let (foreign, _foreign_rx) = PluginEndpoint::channel();
        let mut session = BridgeSession::detached(json!({}));

        session.send(PluginMessage::ready());
        session.handle(InboundEnvelope::new(foreign.id(), PluginMessage::ready()));

        assert!(!session.is_initialized());
        assert!(session.endpoint_id().is_none());
    }

    #[test]
    fn unknown_message_kinds_are_ignored() {
        let (endpoint, mut outbound) = PluginEndpoint::channel();
        let id = endpoint.id();
        let mut session = BridgeSession::new(endpoint, json!({}));

        session.handle(InboundEnvelope::new(
            id,
            PluginMessage::new("TELEMETRY", json!({"fps": 60})),
        ));

        assert!(drain(&mut outbound).is_empty());
    }

    #[tokio::test]
    async fn spawned_listener_handles_messages_until_dropped() {
        let (endpoint, mut outbound) = PluginEndpoint::channel();
        let id = endpoint.id();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();

        let session = BridgeSession::new(endpoint, json!({"title": "async"}));
        let listener = session.spawn(inbound_rx);

        inbound_tx
            .send(InboundEnvelope::new(id, PluginMessage::ready()))
            .unwrap();

        let sent = tokio::time::timeout(std::time::Duration::from_secs(1), outbound.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sent.kind, PluginMessage::INIT_DATA);

        // Dropping the listener aborts the task: a READY sent afterwards
        // must not produce another INIT_DATA.
        drop(listener);
        tokio::task::yield_now().await;
        inbound_tx
            .send(InboundEnvelope::new(id, PluginMessage::ready()))
            .ok();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(outbound.try_recv().is_err());
    }
}
