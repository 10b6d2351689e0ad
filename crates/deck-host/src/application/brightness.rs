//! Brightness control: read the primary display's level, apply a bounded
//! delta, write back.
//!
//! The client supplies only a signed delta; the absolute level is owned by
//! the device and the result is clamped to `[0, 100]` before writing.

use deck_core::levels;
use tracing::debug;

use crate::application::actuate::ActuationError;

/// Access to the primary display's brightness as a percentage.
pub trait BrightnessDevice: Send + Sync {
    /// Reads the current level in `[0, 100]`.
    fn level(&self) -> Result<u8, ActuationError>;
    /// Writes a level in `[0, 100]`.
    fn set_level(&self, percent: u8) -> Result<(), ActuationError>;
}

/// The read-clamp-write service the dispatcher calls.
pub struct BrightnessService {
    device: Box<dyn BrightnessDevice>,
}

impl BrightnessService {
    pub fn new(device: Box<dyn BrightnessDevice>) -> Self {
        Self { device }
    }

    /// Applies `change` to the current level, clamped to `[0, 100]`.
    ///
    /// Returns the level actually written.
    ///
    /// # Errors
    ///
    /// Propagates the device's read or write failure.
    pub fn adjust(&self, change: i64) -> Result<u8, ActuationError> {
        let current = self.device.level()?;
        let next = levels::apply_brightness_delta(current, change);
        self.device.set_level(next)?;
        debug!(current, change, next, "brightness adjusted");
        Ok(next)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
