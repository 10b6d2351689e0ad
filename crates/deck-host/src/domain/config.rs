//! Host configuration types.
//!
//! [`ServerConfig`] is the single source of truth for runtime settings.  It
//! is built once from CLI arguments (with environment-variable overrides) in
//! `main.rs`; the `Default` impl gives values suitable for tests and local
//! development.  No environment reads happen outside the entry point.

use std::net::SocketAddr;
use std::path::PathBuf;

/// All runtime configuration for the host service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.  `0.0.0.0:8000` accepts connections
    /// from any interface, which is what the companion app needs on a LAN.
    pub bind_addr: SocketAddr,

    /// Directory that uploaded files land in and that `open_folder` reveals.
    pub downloads_dir: PathBuf,
}

impl ServerConfig {
    /// Platform-appropriate default downloads location:
    /// `%LOCALAPPDATA%\RemoteDeck\downloads` on Windows, falling back to a
    /// `RemoteDeck/downloads` directory under the working directory elsewhere.
    pub fn default_downloads_dir() -> PathBuf {
        let base = std::env::var_os("LOCALAPPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        base.join("RemoteDeck").join("downloads")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            // Compile-time-known valid socket address string.
            bind_addr: "0.0.0.0:8000".parse().unwrap(),
            downloads_dir: Self::default_downloads_dir(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_is_8000() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_addr.port(), 8000);
    }

    #[test]
    fn test_default_bind_accepts_lan_connections() {
        let cfg = ServerConfig::default();
        assert!(cfg.bind_addr.ip().is_unspecified());
    }

    #[test]
    fn test_default_downloads_dir_ends_with_downloads() {
        let dir = ServerConfig::default_downloads_dir();
        assert!(dir.ends_with("RemoteDeck/downloads") || dir.ends_with("RemoteDeck\\downloads"));
    }

    #[test]
    fn test_config_can_be_cloned_for_sharing() {
        let cfg = ServerConfig::default();
        let cloned = cfg.clone();
        assert_eq!(cfg.bind_addr, cloned.bind_addr);
        assert_eq!(cfg.downloads_dir, cloned.downloads_dir);
    }
}
