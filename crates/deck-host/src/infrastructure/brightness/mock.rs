//! In-memory brightness device for unit testing.

use std::sync::{Arc, Mutex};

use crate::application::actuate::ActuationError;
use crate::application::brightness::BrightnessDevice;

#[derive(Debug)]
struct DeviceState {
    level: u8,
    should_fail: bool,
}

/// A fake brightness device backed by plain memory.
pub struct MockBrightnessDevice {
    state: Arc<Mutex<DeviceState>>,
}

/// Test-side view of a [`MockBrightnessDevice`]'s state.
#[derive(Clone)]
pub struct BrightnessHandle {
    state: Arc<Mutex<DeviceState>>,
}

impl MockBrightnessDevice {
    /// Creates a device at the given level.
    pub fn with_level(level: u8) -> Self {
        Self {
            state: Arc::new(Mutex::new(DeviceState {
                level,
                should_fail: false,
            })),
        }
    }

    /// A handle observing this device's state.
    pub fn handle(&self) -> BrightnessHandle {
        BrightnessHandle {
            state: Arc::clone(&self.state),
        }
    }
}

impl BrightnessHandle {
    /// The stored level.
    pub fn level(&self) -> u8 {
        self.state.lock().unwrap().level
    }

    /// Overwrites the stored level without going through the device API.
    pub fn set_level_directly(&self, level: u8) {
        self.state.lock().unwrap().level = level;
    }

    /// Makes every device call fail with a `Platform` error.
    pub fn set_should_fail(&self, fail: bool) {
        self.state.lock().unwrap().should_fail = fail;
    }
}

impl BrightnessDevice for MockBrightnessDevice {
    fn level(&self) -> Result<u8, ActuationError> {
        let state = self.state.lock().unwrap();
        if state.should_fail {
            return Err(ActuationError::Platform("mock brightness failure".into()));
        }
        Ok(state.level)
    }

    fn set_level(&self, percent: u8) -> Result<(), ActuationError> {
        let mut state = self.state.lock().unwrap();
        if state.should_fail {
            return Err(ActuationError::Platform("mock brightness failure".into()));
        }
        state.level = percent;
        Ok(())
    }
}
