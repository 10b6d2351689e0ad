//! The tagged command model and its fault taxonomy.
//!
//! A command arrives on the wire as `{"type": "...", "payload": {...}}`.
//! Decoding happens in two steps so the two client-error causes stay
//! distinguishable: an unrecognized `type` is [`error::DispatchError::UnknownCommandType`],
//! a payload that does not fit the shape required by that type is
//! [`error::DispatchError::InvalidPayload`].  Both are detected before any
//! side effect.

pub mod error;
pub mod request;
