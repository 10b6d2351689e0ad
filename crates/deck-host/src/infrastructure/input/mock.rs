//! Recording input actuator for unit testing.
//!
//! The real backends make OS API calls that require a desktop session and
//! actually move the cursor or press keys on the test machine.  This mock
//! replaces them with in-memory recording: each call pushes into a
//! `Mutex<Vec<...>>` so tests can assert exactly what was actuated and in
//! what order.
//!
//! Set `should_fail` to make every method return a `Platform` error, for
//! exercising fault paths (notably the forced modifier release).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use deck_core::MouseButton;

use crate::application::actuate::{ActuationError, InputActuator};

/// Records every actuation call without touching the OS.
///
/// The records sit in `Mutex<Vec<...>>` fields so tests can share the
/// actuator across threads behind an `Arc`.
#[derive(Default)]
pub struct RecordingActuator {
    /// Each key name passed to `key_down`, in call order.
    pub key_downs: Mutex<Vec<String>>,
    /// Each key name passed to `key_up`, in call order.
    pub key_ups: Mutex<Vec<String>>,
    /// Each `(dx, dy)` displacement passed to `move_pointer`.
    pub moves: Mutex<Vec<(f64, f64)>>,
    /// Each button passed to `click`.
    pub clicks: Mutex<Vec<MouseButton>>,
    /// Each wheel-click count passed to `scroll`.
    pub scrolls: Mutex<Vec<i32>>,
    should_fail: AtomicBool,
}

impl RecordingActuator {
    /// Creates an actuator with empty records and `should_fail` off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a `Platform` error.
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// True when no call of any kind has been recorded.
    pub fn is_untouched(&self) -> bool {
        self.key_downs.lock().unwrap().is_empty()
            && self.key_ups.lock().unwrap().is_empty()
            && self.moves.lock().unwrap().is_empty()
            && self.clicks.lock().unwrap().is_empty()
            && self.scrolls.lock().unwrap().is_empty()
    }

    fn check(&self) -> Result<(), ActuationError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(ActuationError::Platform("mock failure".into()));
        }
        Ok(())
    }
}

impl InputActuator for RecordingActuator {
    fn move_pointer(&self, dx: f64, dy: f64) -> Result<(), ActuationError> {
        self.check()?;
        self.moves.lock().unwrap().push((dx, dy));
        Ok(())
    }

    fn click(&self, button: MouseButton) -> Result<(), ActuationError> {
        self.check()?;
        self.clicks.lock().unwrap().push(button);
        Ok(())
    }

    fn scroll(&self, clicks: i32) -> Result<(), ActuationError> {
        self.check()?;
        self.scrolls.lock().unwrap().push(clicks);
        Ok(())
    }

    fn key_down(&self, key: &str) -> Result<(), ActuationError> {
        self.check()?;
        self.key_downs.lock().unwrap().push(key.to_string());
        Ok(())
    }

    fn key_up(&self, key: &str) -> Result<(), ActuationError> {
        self.check()?;
        self.key_ups.lock().unwrap().push(key.to_string());
        Ok(())
    }
}
