//! Infrastructure layer: platform backends and the HTTP surface.
//!
//! Everything that touches an OS facility or the network lives here, behind
//! the traits the application layer defines.

pub mod audio;
pub mod brightness;
pub mod files;
pub mod http;
pub mod input;
