//! Domain layer: plain configuration data, no I/O.

pub mod config;

pub use config::ServerConfig;
