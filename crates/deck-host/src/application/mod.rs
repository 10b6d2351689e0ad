//! Application layer: the command dispatcher and its capability services.
//!
//! Everything here depends only on traits and deck-core domain types; the
//! concrete platform implementations are injected from the infrastructure
//! layer at startup.

pub mod actuate;
pub mod brightness;
pub mod dispatch;
pub mod gesture;
pub mod volume;

pub use actuate::{ActuationError, InputActuator};
pub use brightness::{BrightnessDevice, BrightnessService};
pub use dispatch::{CommandDispatcher, FolderOpener};
pub use gesture::HScrollTracker;
pub use volume::{select_volume_backend, AudioEndpoint, VolumeControl};
