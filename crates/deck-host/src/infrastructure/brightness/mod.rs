//! Platform brightness devices.
//!
//! Detection runs once at startup.  When no usable device is found the
//! dispatcher still gets a [`crate::application::brightness::BrightnessDevice`]
//! implementation — one whose every call reports the capability as
//! unavailable, so `brightness_control` commands fail with a clean actuation
//! fault instead of a missing wiring panic.

use tracing::warn;

use crate::application::actuate::ActuationError;
use crate::application::brightness::BrightnessDevice;

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "linux")]
pub mod linux;

/// Detects the primary display's brightness device, probing with one read.
pub fn detect_device() -> Box<dyn BrightnessDevice> {
    #[cfg(target_os = "windows")]
    let candidate: Option<Box<dyn BrightnessDevice>> = Some(Box::new(windows::WmiBrightness::new()));

    #[cfg(target_os = "linux")]
    let candidate: Option<Box<dyn BrightnessDevice>> = linux::SysfsBacklight::discover()
        .map(|d| Box::new(d) as Box<dyn BrightnessDevice>);

    #[cfg(not(any(target_os = "windows", target_os = "linux")))]
    let candidate: Option<Box<dyn BrightnessDevice>> = None;

    match candidate {
        Some(device) => match device.level() {
            Ok(_) => device,
            Err(e) => {
                warn!("brightness probe failed: {e}");
                Box::new(UnavailableBrightness)
            }
        },
        None => {
            warn!("no brightness device on this host");
            Box::new(UnavailableBrightness)
        }
    }
}

/// Placeholder device for hosts without brightness control.
struct UnavailableBrightness;

impl BrightnessDevice for UnavailableBrightness {
    fn level(&self) -> Result<u8, ActuationError> {
        Err(ActuationError::Unavailable("no brightness device".into()))
    }

    fn set_level(&self, _percent: u8) -> Result<(), ActuationError> {
        Err(ActuationError::Unavailable("no brightness device".into()))
    }
}
