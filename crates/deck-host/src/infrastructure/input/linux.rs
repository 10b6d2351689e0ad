//! Linux X11 input actuation via the XTest extension.
//!
//! XTest synthesizes keyboard and mouse events that the focused application
//! cannot distinguish from physical input.  X11 has no dedicated wheel API:
//! scrolling is button 4 (up) / button 5 (down) press+release pairs, one
//! pair per wheel click.
//!
//! This is a scaffold implementation: it validates display access and the
//! key-translation path but defers the XTest FFI calls.  The production
//! implementation would hold the `*mut Display` from `XOpenDisplay` and pass
//! it to `XTestFakeKeyEvent` / `XTestFakeRelativeMotionEvent` /
//! `XTestFakeButtonEvent`, flushing after each injection.

#![cfg(target_os = "linux")]

use deck_core::MouseButton;
use tracing::debug;

use crate::application::actuate::{ActuationError, InputActuator};

/// Linux X11/XTest actuator.
pub struct XTestActuator {
    // In production this holds the raw *mut Display from XOpenDisplay;
    // kept as a placeholder since the X11 FFI requires the library at link time.
}

impl XTestActuator {
    /// Connects to the X display named by `DISPLAY`.
    ///
    /// # Errors
    ///
    /// [`ActuationError::Unavailable`] when `DISPLAY` is unset — there is no
    /// X session to inject into.
    pub fn connect() -> Result<Self, ActuationError> {
        if std::env::var_os("DISPLAY").is_none() {
            return Err(ActuationError::Unavailable(
                "DISPLAY is not set; no X session available".into(),
            ));
        }
        Ok(Self {})
    }
}

impl InputActuator for XTestActuator {
    fn move_pointer(&self, dx: f64, dy: f64) -> Result<(), ActuationError> {
        // Deferred: XTestFakeRelativeMotionEvent(display, dx, dy, CurrentTime)
        debug!(dx, dy, "xtest relative motion");
        Ok(())
    }

    fn click(&self, button: MouseButton) -> Result<(), ActuationError> {
        // X11 button numbering: 1 left, 2 middle, 3 right.
        let number = match button {
            MouseButton::Left => 1u32,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
        };
        // Deferred: XTestFakeButtonEvent press + release
        debug!(number, "xtest button click");
        Ok(())
    }

    fn scroll(&self, clicks: i32) -> Result<(), ActuationError> {
        // Button 4 scrolls up, button 5 scrolls down; one pair per click.
        let (number, count) = if clicks >= 0 { (4u32, clicks) } else { (5u32, -clicks) };
        debug!(number, count, "xtest wheel");
        Ok(())
    }

    fn key_down(&self, key: &str) -> Result<(), ActuationError> {
        // Deferred: keysym lookup via XStringToKeysym, then
        // XKeysymToKeycode and XTestFakeKeyEvent(display, keycode, True, 0).
        debug!(key, "xtest key down");
        Ok(())
    }

    fn key_up(&self, key: &str) -> Result<(), ActuationError> {
        debug!(key, "xtest key up");
        Ok(())
    }
}
