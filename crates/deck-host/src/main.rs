//! Remote Deck host entry point.
//!
//! Wires the platform backends to the command dispatcher, builds the HTTP
//! router, and serves it until interrupted.
//!
//! ```text
//! main()
//!  └─ detect_actuator()      -- platform input backend
//!  └─ probe_endpoint()       -- native audio endpoint, or media-key fallback
//!  └─ detect_device()        -- brightness device, or unavailable stub
//!  └─ CommandDispatcher::new -- one dispatcher shared by every handler
//!  └─ axum::serve            -- runs until ctrl-c
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use deck_host::application::{select_volume_backend, BrightnessService, CommandDispatcher};
use deck_host::domain::config::ServerConfig;
use deck_host::infrastructure::files::DownloadsDir;
use deck_host::infrastructure::http::{build_router, hostname, AppState};
use deck_host::infrastructure::{audio, brightness, input};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Remote Deck host.
///
/// Serves the HTTP API a companion mobile app uses to drive this machine's
/// pointer, keyboard, media playback, audio volume, and display brightness.
#[derive(Debug, Parser)]
#[command(
    name = "deck-host",
    about = "LAN remote-control host for the Remote Deck companion app",
    version
)]
struct Cli {
    /// TCP port for the HTTP server to listen on.
    #[arg(long, default_value_t = 8000, env = "DECK_PORT")]
    port: u16,

    /// IP address to bind to.
    ///
    /// Use `0.0.0.0` to accept connections from the LAN (the normal mode for
    /// a phone-to-desktop remote), or `127.0.0.1` for local testing.
    #[arg(long, default_value = "0.0.0.0", env = "DECK_BIND")]
    bind: String,

    /// Directory uploads are saved to and `open_folder` reveals.
    #[arg(long, env = "DECK_DOWNLOADS_DIR")]
    downloads_dir: Option<PathBuf>,
}

impl Cli {
    /// Converts the parsed arguments into a [`ServerConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error when `--bind` is not a valid IP address.
    fn into_server_config(self) -> anyhow::Result<ServerConfig> {
        let ip: IpAddr = self
            .bind
            .parse()
            .with_context(|| format!("invalid bind address: {}", self.bind))?;
        Ok(ServerConfig {
            bind_addr: SocketAddr::new(ip, self.port),
            downloads_dir: self
                .downloads_dir
                .unwrap_or_else(ServerConfig::default_downloads_dir),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_server_config()?;
    info!("Remote Deck host starting");

    // ── Capability detection (once, at startup) ───────────────────────────────
    let actuator = input::detect_actuator().context("no usable input backend")?;
    let volume = select_volume_backend(audio::probe_endpoint(), Arc::clone(&actuator));
    let brightness = BrightnessService::new(brightness::detect_device());
    let downloads = DownloadsDir::ensure(config.downloads_dir.clone())
        .with_context(|| format!("cannot create downloads dir {}", config.downloads_dir.display()))?;
    info!(downloads = %downloads.path().display(), "downloads directory ready");

    let dispatcher = CommandDispatcher::new(
        actuator,
        volume,
        brightness,
        Arc::new(downloads.clone()),
    );

    let state = AppState {
        dispatcher,
        downloads,
        hostname: hostname(),
    };
    let app = build_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("shut down cleanly");
    Ok(())
}

/// Resolves when ctrl-c is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
    }
    info!("shutdown signal received");
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_bind_all_interfaces_on_8000() {
        let cli = Cli::parse_from(["deck-host"]);
        let cfg = cli.into_server_config().unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn test_cli_overrides_port_and_bind() {
        let cli = Cli::parse_from(["deck-host", "--port", "9100", "--bind", "127.0.0.1"]);
        let cfg = cli.into_server_config().unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:9100");
    }

    #[test]
    fn test_cli_rejects_a_hostname_as_bind_address() {
        let cli = Cli::parse_from(["deck-host", "--bind", "example.invalid"]);
        assert!(cli.into_server_config().is_err());
    }

    #[test]
    fn test_cli_accepts_a_downloads_dir() {
        let cli = Cli::parse_from(["deck-host", "--downloads-dir", "/tmp/deck"]);
        let cfg = cli.into_server_config().unwrap();
        assert_eq!(cfg.downloads_dir, PathBuf::from("/tmp/deck"));
    }
}
