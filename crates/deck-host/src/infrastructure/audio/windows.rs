//! Windows master-volume access via the Core Audio APIs.
//!
//! Each call initializes COM, resolves the default render endpoint's
//! `IAudioEndpointVolume`, performs the one read or write, and tears the
//! scope down again.  Acquisition is per-call so a fault on any exit path
//! cannot leak the COM interface across requests.

#![cfg(target_os = "windows")]

use windows::core::GUID;
use windows::Win32::Media::Audio::Endpoints::IAudioEndpointVolume;
use windows::Win32::Media::Audio::{eMultimedia, eRender, IMMDeviceEnumerator, MMDeviceEnumerator};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CoUninitialize, CLSCTX_ALL, COINIT_MULTITHREADED,
};

use crate::application::actuate::ActuationError;
use crate::application::volume::AudioEndpoint;

/// Scoped COM initialization: `CoUninitialize` runs on drop, including on
/// the error paths.
struct ComScope;

impl ComScope {
    fn enter() -> Result<Self, ActuationError> {
        // SAFETY: paired with CoUninitialize in Drop
        unsafe { CoInitializeEx(None, COINIT_MULTITHREADED) }
            .ok()
            .map_err(platform)?;
        Ok(Self)
    }
}

impl Drop for ComScope {
    fn drop(&mut self) {
        // SAFETY: balances the CoInitializeEx in enter()
        unsafe { CoUninitialize() };
    }
}

/// Master-volume endpoint for the default render device.
pub struct CoreAudioEndpoint;

impl CoreAudioEndpoint {
    pub fn new() -> Self {
        Self
    }

    fn with_endpoint<T>(
        &self,
        f: impl FnOnce(&IAudioEndpointVolume) -> windows::core::Result<T>,
    ) -> Result<T, ActuationError> {
        let _com = ComScope::enter()?;
        // SAFETY: COM is initialized for the duration of _com
        let endpoint: IAudioEndpointVolume = unsafe {
            let enumerator: IMMDeviceEnumerator =
                CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL).map_err(platform)?;
            let device = enumerator
                .GetDefaultAudioEndpoint(eRender, eMultimedia)
                .map_err(platform)?;
            device.Activate(CLSCTX_ALL, None).map_err(platform)?
        };
        f(&endpoint).map_err(platform)
    }
}

impl Default for CoreAudioEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEndpoint for CoreAudioEndpoint {
    fn volume(&self) -> Result<f32, ActuationError> {
        // SAFETY: interface is valid inside with_endpoint's scope
        self.with_endpoint(|ep| unsafe { ep.GetMasterVolumeLevelScalar() })
    }

    fn set_volume(&self, scalar: f32) -> Result<(), ActuationError> {
        // SAFETY: as above; the null GUID means "no event context"
        self.with_endpoint(|ep| unsafe {
            ep.SetMasterVolumeLevelScalar(scalar, &GUID::zeroed())
        })
    }

    fn muted(&self) -> Result<bool, ActuationError> {
        // SAFETY: as above
        self.with_endpoint(|ep| unsafe { ep.GetMute() })
            .map(|b| b.as_bool())
    }

    fn set_muted(&self, muted: bool) -> Result<(), ActuationError> {
        // SAFETY: as above
        self.with_endpoint(|ep| unsafe { ep.SetMute(muted, &GUID::zeroed()) })
    }
}

fn platform(e: windows::core::Error) -> ActuationError {
    ActuationError::Platform(e.to_string())
}
