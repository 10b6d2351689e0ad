//! Platform input backends.
//!
//! The correct implementation is selected at compile time via
//! `#[cfg(target_os = ...)]`; [`detect_actuator`] constructs it at startup.

use std::sync::Arc;

use tracing::info;

use crate::application::actuate::{ActuationError, InputActuator};

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "linux")]
pub mod linux;

/// Constructs the input backend for this host.
///
/// # Errors
///
/// [`ActuationError::Unavailable`] when the platform has no backend (or, on
/// Linux, when no X display is reachable).
pub fn detect_actuator() -> Result<Arc<dyn InputActuator>, ActuationError> {
    #[cfg(target_os = "windows")]
    {
        info!("input backend: Windows SendInput");
        Ok(Arc::new(windows::SendInputActuator::new()))
    }

    #[cfg(target_os = "linux")]
    {
        info!("input backend: X11 XTest");
        Ok(Arc::new(linux::XTestActuator::connect()?))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux")))]
    {
        Err(ActuationError::Unavailable(
            "no input backend for this platform".into(),
        ))
    }
}
