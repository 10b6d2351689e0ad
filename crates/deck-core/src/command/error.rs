//! Dispatch fault taxonomy and the success acknowledgement.
//!
//! These are result values, not exceptions: every dispatch returns either a
//! [`CommandAck`] echoing the input or exactly one [`DispatchError`] variant.
//! The API surface maps the first two variants to a client-error status and
//! the third to a server-error status.

use serde::Serialize;
use thiserror::Error;

use crate::command::request::CommandEnvelope;

/// Everything that can go wrong while dispatching one command.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The `type` field named no known command family.
    ///
    /// Client error; nothing was executed.  Unknown types are never a silent
    /// no-op — adding a command family means adding a router case.
    #[error("unknown command type: {0}")]
    UnknownCommandType(String),

    /// A required payload field was missing or had the wrong shape or range.
    ///
    /// Client error; the router never partially executes a command it cannot
    /// fully validate, so nothing was executed.
    #[error("invalid payload for '{command}': {reason}")]
    InvalidPayload {
        /// The command type whose payload failed validation.
        command: String,
        /// Human-readable description of what was wrong.
        reason: String,
    },

    /// An underlying platform call failed during execution.
    ///
    /// Server error.  A side effect may have been partially applied (e.g. a
    /// key pressed whose paired release was never issued) — for `h_scroll`
    /// the dispatcher force-releases the gesture modifier before this
    /// surfaces.
    #[error("command execution failed: {0}")]
    Actuation(String),
}

impl DispatchError {
    /// Convenience constructor for payload validation faults.
    pub fn invalid_payload(command: impl Into<String>, reason: impl Into<String>) -> Self {
        DispatchError::InvalidPayload {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// `true` for the two validation faults that map to a client-error status.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DispatchError::UnknownCommandType(_) | DispatchError::InvalidPayload { .. }
        )
    }
}

/// Success acknowledgement: echoes the command exactly as the client sent it.
///
/// Serializes to `{"status":"command executed","command":{...}}`, the shape
/// the companion app expects from the generic command endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CommandAck {
    /// Always `"command executed"`.
    pub status: &'static str,
    /// The original wire envelope, echoed back unmodified.
    pub command: CommandEnvelope,
}

impl CommandAck {
    /// Builds the acknowledgement for a successfully executed envelope.
    pub fn executed(command: CommandEnvelope) -> Self {
        Self {
            status: "command executed",
            command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(DispatchError::UnknownCommandType("warp".into()).is_client_error());
        assert!(DispatchError::invalid_payload("mouse_click", "bad button").is_client_error());
        assert!(!DispatchError::Actuation("display gone".into()).is_client_error());
    }

    #[test]
    fn test_ack_serializes_with_fixed_status() {
        let envelope: CommandEnvelope =
            serde_json::from_str(r#"{"type":"open_folder","payload":{}}"#).unwrap();
        let ack = CommandAck::executed(envelope);

        let json = serde_json::to_value(&ack).unwrap();
        assert_eq!(json["status"], "command executed");
        assert_eq!(json["command"]["type"], "open_folder");
    }

    #[test]
    fn test_invalid_payload_display_names_the_command() {
        let err = DispatchError::invalid_payload("brightness_control", "change must be an integer");
        assert_eq!(
            err.to_string(),
            "invalid payload for 'brightness_control': change must be an integer"
        );
    }
}
