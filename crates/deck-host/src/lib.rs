//! # deck-host
//!
//! The host-side Remote Deck service.  A companion mobile app on the same
//! local network submits tagged commands over HTTP; this crate validates
//! each one, routes it to exactly one actuation capability (pointer,
//! keyboard, audio, brightness, downloads folder), and answers with a
//! uniform acknowledgement or fault.
//!
//! # Layering
//!
//! ```text
//! infrastructure/   HTTP surface (axum), platform backends, downloads dir
//!       │  implements the application traits, decodes requests
//!       ▼
//! application/      CommandDispatcher, gesture tracker, volume/brightness
//!       │  services — depends only on traits and deck-core types
//!       ▼
//! domain/           ServerConfig (plain data, no I/O)
//! ```
//!
//! Platform-specific code lives behind traits (`InputActuator`,
//! `AudioEndpoint`, `BrightnessDevice`, `FolderOpener`) so every routing and
//! recovery rule is unit-testable against recording mocks.

pub mod application;
pub mod domain;
pub mod infrastructure;
