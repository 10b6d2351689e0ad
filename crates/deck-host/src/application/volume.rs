//! The volume abstraction: one interface, two interchangeable backends.
//!
//! At process start, capability detection probes the platform audio endpoint
//! once.  If the probe succeeds the native backend is selected; otherwise
//! every volume operation becomes a single simulated media-key press and the
//! OS owns the scalar.  The selection is fixed for the process lifetime —
//! there is no per-call re-detection — and callers never learn which backend
//! is active.

use std::sync::Arc;

use deck_core::levels;
use tracing::{debug, info};

use crate::application::actuate::{ActuationError, InputActuator};

/// The three operations every volume backend exposes.
pub trait VolumeControl: Send + Sync {
    /// Raises the volume by one step (native) or one media-key press (fallback).
    fn volume_up(&self) -> Result<(), ActuationError>;
    /// Lowers the volume by one step or one media-key press.
    fn volume_down(&self) -> Result<(), ActuationError>;
    /// Flips the mute state.
    fn toggle_mute(&self) -> Result<(), ActuationError>;
}

/// Scoped access to the platform's master audio endpoint.
///
/// Implementations acquire and release the platform interface inside each
/// call (acquisition is per-call, never held across calls), so a fault on any
/// exit path cannot leak the handle.
pub trait AudioEndpoint: Send + Sync {
    /// Reads the current master volume scalar in `[0.0, 1.0]`.
    fn volume(&self) -> Result<f32, ActuationError>;
    /// Writes the master volume scalar; callers pass values already clamped.
    fn set_volume(&self, scalar: f32) -> Result<(), ActuationError>;
    /// Reads the mute flag.
    fn muted(&self) -> Result<bool, ActuationError>;
    /// Writes the mute flag.
    fn set_muted(&self, muted: bool) -> Result<(), ActuationError>;
}

// ── Native backend ────────────────────────────────────────────────────────────

/// Native backend: read the scalar, step it by 0.05, clamp, write back.
///
/// The volume is never set from a client-supplied absolute value; the only
/// mutations are the bounded step and the mute flip.
pub struct EndpointVolume {
    endpoint: Box<dyn AudioEndpoint>,
}

impl EndpointVolume {
    pub fn new(endpoint: Box<dyn AudioEndpoint>) -> Self {
        Self { endpoint }
    }
}

impl VolumeControl for EndpointVolume {
    fn volume_up(&self) -> Result<(), ActuationError> {
        let next = levels::volume_step_up(self.endpoint.volume()?);
        self.endpoint.set_volume(next)?;
        debug!(scalar = next, "volume up");
        Ok(())
    }

    fn volume_down(&self) -> Result<(), ActuationError> {
        let next = levels::volume_step_down(self.endpoint.volume()?);
        self.endpoint.set_volume(next)?;
        debug!(scalar = next, "volume down");
        Ok(())
    }

    fn toggle_mute(&self) -> Result<(), ActuationError> {
        let muted = self.endpoint.muted()?;
        self.endpoint.set_muted(!muted)?;
        debug!(muted = !muted, "mute toggled");
        Ok(())
    }
}

// ── Fallback backend ──────────────────────────────────────────────────────────

/// Fallback backend: each operation is one simulated media-key press.
///
/// No scalar state is tracked here — the OS interprets the key press and
/// owns the resulting level.
pub struct MediaKeyVolume {
    actuator: Arc<dyn InputActuator>,
}

impl MediaKeyVolume {
    pub fn new(actuator: Arc<dyn InputActuator>) -> Self {
        Self { actuator }
    }
}

impl VolumeControl for MediaKeyVolume {
    fn volume_up(&self) -> Result<(), ActuationError> {
        self.actuator.tap_key("volumeup")
    }

    fn volume_down(&self) -> Result<(), ActuationError> {
        self.actuator.tap_key("volumedown")
    }

    fn toggle_mute(&self) -> Result<(), ActuationError> {
        self.actuator.tap_key("volumemute")
    }
}

// ── Backend selection ─────────────────────────────────────────────────────────

/// Selects the volume backend from the startup probe result.
///
/// A pure function of the probe outcome so the selection logic is testable
/// without a platform: `Some(endpoint)` yields the native backend, `None`
/// the media-key fallback.
pub fn select_volume_backend(
    endpoint: Option<Box<dyn AudioEndpoint>>,
    actuator: Arc<dyn InputActuator>,
) -> Box<dyn VolumeControl> {
    match endpoint {
        Some(endpoint) => {
            info!("native audio endpoint detected; using endpoint volume control");
            Box::new(EndpointVolume::new(endpoint))
        }
        None => {
            info!("no native audio endpoint; falling back to media-key volume control");
            Box::new(MediaKeyVolume::new(actuator))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::audio::mock::MockAudioEndpoint;
    use crate::infrastructure::input::mock::RecordingActuator;

    #[test]
    fn test_volume_up_steps_and_clamps_at_full() {
        let endpoint = MockAudioEndpoint::with_volume(0.97);
        let handle = endpoint.handle();
        let control = EndpointVolume::new(Box::new(endpoint));

        control.volume_up().unwrap();
        assert_eq!(handle.volume(), 1.0);

        // Already at the ceiling: stays there.
        control.volume_up().unwrap();
        assert_eq!(handle.volume(), 1.0);
    }

    #[test]
    fn test_volume_down_steps_and_clamps_at_zero() {
        let endpoint = MockAudioEndpoint::with_volume(0.03);
        let handle = endpoint.handle();
        let control = EndpointVolume::new(Box::new(endpoint));

        control.volume_down().unwrap();
        assert_eq!(handle.volume(), 0.0);

        control.volume_down().unwrap();
        assert_eq!(handle.volume(), 0.0);
    }

    #[test]
    fn test_repeated_volume_up_converges_from_any_start() {
        let endpoint = MockAudioEndpoint::with_volume(0.12);
        let handle = endpoint.handle();
        let control = EndpointVolume::new(Box::new(endpoint));

        for _ in 0..30 {
            control.volume_up().unwrap();
            assert!(handle.volume() <= 1.0);
        }
        assert_eq!(handle.volume(), 1.0);
    }

    #[test]
    fn test_toggle_mute_flips_the_flag_both_ways() {
        let endpoint = MockAudioEndpoint::with_volume(0.5);
        let handle = endpoint.handle();
        let control = EndpointVolume::new(Box::new(endpoint));

        control.toggle_mute().unwrap();
        assert!(handle.muted());
        control.toggle_mute().unwrap();
        assert!(!handle.muted());
    }

    #[test]
    fn test_fallback_presses_one_media_key_per_operation() {
        let actuator = std::sync::Arc::new(RecordingActuator::new());
        let control = MediaKeyVolume::new(Arc::clone(&actuator) as Arc<dyn InputActuator>);

        control.volume_up().unwrap();
        control.volume_down().unwrap();
        control.toggle_mute().unwrap();

        assert_eq!(
            *actuator.key_downs.lock().unwrap(),
            vec!["volumeup".to_string(), "volumedown".to_string(), "volumemute".to_string()]
        );
        // Every press was paired with a release.
        assert_eq!(actuator.key_ups.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_selection_prefers_the_native_endpoint() {
        let actuator = std::sync::Arc::new(RecordingActuator::new());
        let endpoint = MockAudioEndpoint::with_volume(0.5);
        let handle = endpoint.handle();

        let control = select_volume_backend(
            Some(Box::new(endpoint)),
            Arc::clone(&actuator) as Arc<dyn InputActuator>,
        );
        control.volume_up().unwrap();

        // The endpoint moved; no media key was pressed.
        assert!(handle.volume() > 0.5);
        assert!(actuator.key_downs.lock().unwrap().is_empty());
    }

    #[test]
    fn test_selection_falls_back_to_media_keys() {
        let actuator = std::sync::Arc::new(RecordingActuator::new());

        let control = select_volume_backend(None, Arc::clone(&actuator) as Arc<dyn InputActuator>);
        control.toggle_mute().unwrap();

        assert_eq!(*actuator.key_downs.lock().unwrap(), vec!["volumemute".to_string()]);
    }
}
