//! The wire envelope and the closed, typed command it decodes into.
//!
//! # Wire shape
//!
//! Every generic command is a JSON object with a `type` tag and a `payload`
//! mapping:
//!
//! ```json
//! {"type":"mouse_move","payload":{"dx":10,"dy":-5}}
//! {"type":"h_scroll","payload":{"state":"drag","dx":20}}
//! {"type":"open_folder","payload":{}}
//! ```
//!
//! # Why decode in two steps?
//!
//! A single `#[serde(tag = "type")]` enum would collapse "the type is not one
//! of ours" and "the payload does not fit" into one opaque serde error.  The
//! dispatcher must report those differently (`UnknownCommandType` vs
//! `InvalidPayload`), so [`CommandEnvelope::decode`] first matches the tag
//! against the closed set of command families and only then deserializes the
//! payload into that family's shape.  Both checks run before any side effect.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::error::DispatchError;
use crate::gesture::ScrollPhase;
use crate::keys::MouseButton;

// ── Wire envelope ─────────────────────────────────────────────────────────────

/// The raw `{type, payload}` object as the client sent it.
///
/// Kept around after decoding so a success acknowledgement can echo the input
/// byte-for-byte (field order aside).  Commands are ephemeral: one envelope
/// per request, no identity, no persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    /// The command family tag, e.g. `"mouse_click"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The untyped payload mapping; shape depends on `kind`.
    pub payload: Value,
}

// ── Typed command ─────────────────────────────────────────────────────────────

/// The closed set of commands the host executes, one variant per family.
///
/// Each variant carries only the fields its family requires, so the
/// dispatcher's `match` is exhaustive at compile time — there is no runtime
/// "unknown" branch past this point.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Tap a single key.  Volume key names are routed through the audio
    /// capability instead of the keyboard.
    KeyPress { key: String },
    /// Press an ordered chord of keys together, then release in reverse.
    /// Key names are passed through verbatim to the input backend.
    Hotkey { keys: Vec<String> },
    /// Click one mouse button.
    MouseClick { button: MouseButton },
    /// Displace the pointer by `(dx, dy)` pixels, instantaneously.
    MouseMove { dx: f64, dy: f64 },
    /// Vertical scroll by `dy` wheel clicks.
    VScroll { dy: f64 },
    /// One step of a continuous horizontal-scroll gesture.
    HScroll { state: ScrollPhase, dx: f64 },
    /// Open the downloads directory in the platform file manager.
    OpenFolder,
    /// Adjust display brightness by a signed delta, clamped to `[0, 100]`.
    BrightnessControl { change: i64 },
}

impl Command {
    /// The wire tag for this command family.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::KeyPress { .. } => "key_press",
            Command::Hotkey { .. } => "hotkey",
            Command::MouseClick { .. } => "mouse_click",
            Command::MouseMove { .. } => "mouse_move",
            Command::VScroll { .. } => "v_scroll",
            Command::HScroll { .. } => "h_scroll",
            Command::OpenFolder => "open_folder",
            Command::BrightnessControl { .. } => "brightness_control",
        }
    }
}

// ── Per-family payload shapes ─────────────────────────────────────────────────
//
// Small private structs define exactly which fields each family requires and
// which default.  Unknown extra fields are ignored, matching the open payload
// mapping on the wire.

#[derive(Deserialize)]
struct KeyPressPayload {
    key: String,
}

#[derive(Deserialize)]
struct HotkeyPayload {
    keys: Vec<String>,
}

#[derive(Deserialize)]
struct MouseClickPayload {
    button: MouseButton,
}

#[derive(Deserialize)]
struct MouseMovePayload {
    #[serde(default)]
    dx: f64,
    #[serde(default)]
    dy: f64,
}

#[derive(Deserialize)]
struct VScrollPayload {
    #[serde(default)]
    dy: f64,
}

#[derive(Deserialize)]
struct HScrollPayload {
    state: ScrollPhase,
    #[serde(default)]
    dx: f64,
}

#[derive(Deserialize)]
struct BrightnessPayload {
    change: i64,
}

// ── Decoding ──────────────────────────────────────────────────────────────────

impl CommandEnvelope {
    /// Validates the tag and payload and produces the typed [`Command`].
    ///
    /// # Errors
    ///
    /// - [`DispatchError::UnknownCommandType`] when `type` names no known
    ///   command family.
    /// - [`DispatchError::InvalidPayload`] when a required field is missing,
    ///   has the wrong shape, or fails a semantic check (empty key, empty
    ///   chord).
    pub fn decode(&self) -> Result<Command, DispatchError> {
        match self.kind.as_str() {
            "key_press" => {
                let p: KeyPressPayload = self.payload_as("key_press")?;
                if p.key.is_empty() {
                    return Err(DispatchError::invalid_payload("key_press", "key not specified"));
                }
                Ok(Command::KeyPress { key: p.key })
            }
            "hotkey" => {
                let p: HotkeyPayload = self.payload_as("hotkey")?;
                if p.keys.is_empty() {
                    return Err(DispatchError::invalid_payload("hotkey", "keys must not be empty"));
                }
                Ok(Command::Hotkey { keys: p.keys })
            }
            "mouse_click" => {
                let p: MouseClickPayload = self.payload_as("mouse_click")?;
                Ok(Command::MouseClick { button: p.button })
            }
            "mouse_move" => {
                let p: MouseMovePayload = self.payload_as("mouse_move")?;
                Ok(Command::MouseMove { dx: p.dx, dy: p.dy })
            }
            "v_scroll" => {
                let p: VScrollPayload = self.payload_as("v_scroll")?;
                Ok(Command::VScroll { dy: p.dy })
            }
            "h_scroll" => {
                let p: HScrollPayload = self.payload_as("h_scroll")?;
                Ok(Command::HScroll { state: p.state, dx: p.dx })
            }
            "open_folder" => Ok(Command::OpenFolder),
            "brightness_control" => {
                let p: BrightnessPayload = self.payload_as("brightness_control")?;
                Ok(Command::BrightnessControl { change: p.change })
            }
            other => Err(DispatchError::UnknownCommandType(other.to_string())),
        }
    }

    /// Deserializes the payload into one family's shape, converting the serde
    /// error into an `InvalidPayload` fault naming the family.
    fn payload_as<T: DeserializeOwned>(&self, kind: &str) -> Result<T, DispatchError> {
        serde_json::from_value(self.payload.clone())
            .map_err(|e| DispatchError::invalid_payload(kind, e.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
