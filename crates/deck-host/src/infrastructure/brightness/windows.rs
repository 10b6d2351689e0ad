//! Windows brightness control through the WMI monitor classes.
//!
//! Shells out to PowerShell for `WmiMonitorBrightness` (read) and
//! `WmiMonitorBrightnessMethods::WmiSetBrightness` (write).  Only internal
//! panels expose these classes; external monitors make the startup probe
//! fail and the capability reports unavailable.

#![cfg(target_os = "windows")]

use std::process::Command;

use crate::application::actuate::ActuationError;
use crate::application::brightness::BrightnessDevice;

/// WMI-backed brightness for the primary internal display.
pub struct WmiBrightness;

impl WmiBrightness {
    pub fn new() -> Self {
        Self
    }

    fn powershell(&self, script: &str) -> Result<String, ActuationError> {
        let output = Command::new("powershell")
            .args(["-NoProfile", "-NonInteractive", "-Command", script])
            .output()
            .map_err(|e| ActuationError::Platform(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ActuationError::Platform(format!("powershell failed: {stderr}")));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for WmiBrightness {
    fn default() -> Self {
        Self::new()
    }
}

impl BrightnessDevice for WmiBrightness {
    fn level(&self) -> Result<u8, ActuationError> {
        let stdout = self.powershell(
            "(Get-CimInstance -Namespace root/wmi -ClassName WmiMonitorBrightness).CurrentBrightness",
        )?;
        stdout
            .trim()
            .parse()
            .map_err(|e| ActuationError::Platform(format!("bad brightness value: {e}")))
    }

    fn set_level(&self, percent: u8) -> Result<(), ActuationError> {
        self.powershell(&format!(
            "(Get-CimInstance -Namespace root/wmi -ClassName WmiMonitorBrightnessMethods) | \
             Invoke-CimMethod -MethodName WmiSetBrightness -Arguments @{{Timeout=0; Brightness={percent}}}"
        ))?;
        Ok(())
    }
}
