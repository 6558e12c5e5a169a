//! Plugin bridge: tagged-JSON messaging between the host and an embedded
//! learning plugin.
//!
//! [`message`] defines the wire types and per-plugin endpoints; [`session`]
//! holds the host-side conversation state, the `READY`/`INIT_DATA`
//! handshake, and event dispatch to host callbacks.

pub mod message;
pub mod session;

pub use message::{EndpointId, InboundEnvelope, PluginEndpoint, PluginMessage, PluginMode};
pub use session::{BridgeCallbacks, BridgeListener, BridgeSession};
