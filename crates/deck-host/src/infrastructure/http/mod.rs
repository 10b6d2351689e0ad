//! The HTTP surface: one generic command endpoint, the discovery endpoint,
//! and the legacy fixed-shape endpoints the original companion app speaks.
//!
//! All actuation funnels through the shared [`CommandDispatcher`]; the
//! handlers here only translate between HTTP shapes and dispatcher calls.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::application::dispatch::CommandDispatcher;
use crate::infrastructure::files::DownloadsDir;

pub mod error;
pub mod routes;

/// Uploads larger than this are rejected before the handler runs.
const MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

/// Shared state behind every handler.
pub struct AppState {
    pub dispatcher: CommandDispatcher,
    pub downloads: DownloadsDir,
    pub hostname: String,
}

/// Builds the full application router over the shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/identify", get(routes::identify))
        .route("/execute-command", post(routes::execute_command))
        .route("/move-mouse", post(routes::move_mouse))
        .route("/click-mouse", post(routes::click_mouse))
        .route("/scroll-mouse", post(routes::scroll_mouse))
        .route("/press-key", post(routes::press_key))
        .route("/press-media-key", post(routes::press_media_key))
        .route("/press-hotkey", post(routes::press_hotkey))
        .route("/hscroll-gesture", post(routes::hscroll_gesture))
        .route("/open-folder", post(routes::open_folder))
        .route(
            "/upload-file",
            post(routes::upload_file)
                .layer::<_, std::convert::Infallible>(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}

/// The host's name as reported by `/identify`.
///
/// Read from the environment (`COMPUTERNAME` on Windows, `HOSTNAME`
/// elsewhere) with a fixed fallback, so discovery never fails.
pub fn hostname() -> String {
    std::env::var("COMPUTERNAME")
        .or_else(|_| std::env::var("HOSTNAME"))
        .unwrap_or_else(|_| "unknown-host".to_string())
}
