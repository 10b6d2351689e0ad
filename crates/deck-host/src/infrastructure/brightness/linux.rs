//! Linux backlight control through sysfs.
//!
//! Reads and writes `/sys/class/backlight/<device>/brightness`, scaling
//! between raw device units and the 0-100 percentage the service exposes.
//! Writing requires the process to have permission on the sysfs node
//! (typically the `video` group or a udev rule).

#![cfg(target_os = "linux")]

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::application::actuate::ActuationError;
use crate::application::brightness::BrightnessDevice;

const BACKLIGHT_ROOT: &str = "/sys/class/backlight";

/// A sysfs backlight node.
pub struct SysfsBacklight {
    device_dir: PathBuf,
    max_raw: u32,
}

impl SysfsBacklight {
    /// Picks the first device under `/sys/class/backlight`, if any.
    pub fn discover() -> Option<Self> {
        let entry = fs::read_dir(BACKLIGHT_ROOT).ok()?.flatten().next()?;
        let device_dir = entry.path();
        let max_raw: u32 = fs::read_to_string(device_dir.join("max_brightness"))
            .ok()?
            .trim()
            .parse()
            .ok()?;
        if max_raw == 0 {
            return None;
        }
        debug!(device = %device_dir.display(), max_raw, "backlight device found");
        Some(Self { device_dir, max_raw })
    }
}

impl BrightnessDevice for SysfsBacklight {
    fn level(&self) -> Result<u8, ActuationError> {
        let raw: u32 = fs::read_to_string(self.device_dir.join("brightness"))
            .map_err(|e| ActuationError::Platform(e.to_string()))?
            .trim()
            .parse()
            .map_err(|e| ActuationError::Platform(format!("bad brightness value: {e}")))?;
        Ok(((raw as u64 * 100) / self.max_raw as u64).min(100) as u8)
    }

    fn set_level(&self, percent: u8) -> Result<(), ActuationError> {
        let raw = (percent as u64 * self.max_raw as u64) / 100;
        fs::write(self.device_dir.join("brightness"), raw.to_string())
            .map_err(|e| ActuationError::Platform(e.to_string()))
    }
}
