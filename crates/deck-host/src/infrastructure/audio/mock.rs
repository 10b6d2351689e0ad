//! In-memory audio endpoint for unit testing.
//!
//! Stores the scalar and mute flag behind a shared `Arc<Mutex<...>>`; tests
//! keep a [`MockEndpointHandle`] to observe the state after the endpoint
//! itself has been boxed into the volume backend.

use std::sync::{Arc, Mutex};

use crate::application::actuate::ActuationError;
use crate::application::volume::AudioEndpoint;

#[derive(Debug)]
struct EndpointState {
    volume: f32,
    muted: bool,
    should_fail: bool,
}

/// A fake master-volume endpoint backed by plain memory.
pub struct MockAudioEndpoint {
    state: Arc<Mutex<EndpointState>>,
}

/// Test-side view of a [`MockAudioEndpoint`]'s state.
#[derive(Clone)]
pub struct MockEndpointHandle {
    state: Arc<Mutex<EndpointState>>,
}

impl MockAudioEndpoint {
    /// Creates an unmuted endpoint at the given scalar.
    pub fn with_volume(volume: f32) -> Self {
        Self {
            state: Arc::new(Mutex::new(EndpointState {
                volume,
                muted: false,
                should_fail: false,
            })),
        }
    }

    /// A handle observing this endpoint's state.
    pub fn handle(&self) -> MockEndpointHandle {
        MockEndpointHandle {
            state: Arc::clone(&self.state),
        }
    }

    fn check(&self) -> Result<(), ActuationError> {
        if self.state.lock().unwrap().should_fail {
            return Err(ActuationError::Platform("mock audio failure".into()));
        }
        Ok(())
    }
}

impl MockEndpointHandle {
    /// The current scalar.
    pub fn volume(&self) -> f32 {
        self.state.lock().unwrap().volume
    }

    /// The current mute flag.
    pub fn muted(&self) -> bool {
        self.state.lock().unwrap().muted
    }

    /// Makes every endpoint call fail with a `Platform` error.
    pub fn set_should_fail(&self, fail: bool) {
        self.state.lock().unwrap().should_fail = fail;
    }
}

impl AudioEndpoint for MockAudioEndpoint {
    fn volume(&self) -> Result<f32, ActuationError> {
        self.check()?;
        Ok(self.state.lock().unwrap().volume)
    }

    fn set_volume(&self, scalar: f32) -> Result<(), ActuationError> {
        self.check()?;
        self.state.lock().unwrap().volume = scalar;
        Ok(())
    }

    fn muted(&self) -> Result<bool, ActuationError> {
        self.check()?;
        Ok(self.state.lock().unwrap().muted)
    }

    fn set_muted(&self, muted: bool) -> Result<(), ActuationError> {
        self.check()?;
        self.state.lock().unwrap().muted = muted;
        Ok(())
    }
}
