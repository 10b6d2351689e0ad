//! The pointer/keyboard actuation trait and its error type.
//!
//! Each supported OS provides an implementation in the infrastructure layer
//! (`infrastructure::input`); tests use the recording mock.  All calls are
//! blocking calls into OS facilities and are expected to be fast; none of
//! them suspends, retries, or times out.

use deck_core::MouseButton;
use thiserror::Error;

/// Error type for actuation operations across all capabilities.
#[derive(Debug, Error)]
pub enum ActuationError {
    /// The underlying platform call failed.
    #[error("platform error: {0}")]
    Platform(String),
    /// A key name could not be translated for this platform's input API.
    #[error("unmapped key name: {0}")]
    UnknownKey(String),
    /// The capability has no usable backend on this host.
    #[error("capability unavailable: {0}")]
    Unavailable(String),
}

/// Platform-agnostic pointer and keyboard simulation.
///
/// Key names are the client's verbatim lowercase strings; backends translate
/// them (or fail with [`ActuationError::UnknownKey`]).  Pointer movement is
/// relative and instantaneous — there is no animation duration.
pub trait InputActuator: Send + Sync {
    /// Displaces the pointer by `(dx, dy)` pixels.
    fn move_pointer(&self, dx: f64, dy: f64) -> Result<(), ActuationError>;

    /// Clicks one mouse button (press immediately followed by release).
    fn click(&self, button: MouseButton) -> Result<(), ActuationError>;

    /// Turns the vertical wheel by `clicks` notches (positive scrolls up).
    fn scroll(&self, clicks: i32) -> Result<(), ActuationError>;

    /// Presses a key and leaves it held.
    fn key_down(&self, key: &str) -> Result<(), ActuationError>;

    /// Releases a held key.
    fn key_up(&self, key: &str) -> Result<(), ActuationError>;

    /// Taps a key: press, then release.
    fn tap_key(&self, key: &str) -> Result<(), ActuationError> {
        self.key_down(key)?;
        self.key_up(key)
    }

    /// Presses an ordered chord: every key down in order, then up in reverse.
    fn press_chord(&self, keys: &[String]) -> Result<(), ActuationError> {
        for key in keys {
            self.key_down(key)?;
        }
        for key in keys.iter().rev() {
            self.key_up(key)?;
        }
        Ok(())
    }
}
