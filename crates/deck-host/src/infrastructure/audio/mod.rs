//! Platform audio endpoints.
//!
//! [`probe_endpoint`] runs once at startup: a successful probe yields the
//! native endpoint for the volume abstraction, `None` selects the media-key
//! fallback.  The probe itself exercises a real read so a half-working
//! endpoint is not selected.

use tracing::warn;

use crate::application::volume::AudioEndpoint;

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "linux")]
pub mod linux;

/// Probes for a usable master-volume endpoint on this host.
pub fn probe_endpoint() -> Option<Box<dyn AudioEndpoint>> {
    #[cfg(target_os = "windows")]
    let candidate: Option<Box<dyn AudioEndpoint>> =
        Some(Box::new(windows::CoreAudioEndpoint::new()));

    #[cfg(target_os = "linux")]
    let candidate: Option<Box<dyn AudioEndpoint>> = Some(Box::new(linux::AmixerEndpoint::new()));

    #[cfg(not(any(target_os = "windows", target_os = "linux")))]
    let candidate: Option<Box<dyn AudioEndpoint>> = None;

    match candidate {
        Some(endpoint) => match endpoint.volume() {
            Ok(_) => Some(endpoint),
            Err(e) => {
                warn!("audio endpoint probe failed: {e}");
                None
            }
        },
        None => None,
    }
}
