//! Core type definitions for the Studium AI subsystem.
//!
//! Currently this is the identity type used to scope tool side effects:
//! [`CallerId`].

mod caller_id;

pub use caller_id::{CallerId, InvalidCallerId};
