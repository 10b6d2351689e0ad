//! Request handlers.
//!
//! The legacy endpoints keep the exact request and response shapes the
//! existing companion app sends: one flat JSON body per endpoint and a
//! `{"message": ...}` acknowledgement.  New client features go through
//! `/execute-command` instead.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use deck_core::{keys, CommandAck, CommandEnvelope, MediaKey, MouseButton, ScrollPhase};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::AppState;

// ── Wire shapes ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct Message {
    message: String,
}

impl Message {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

#[derive(Serialize)]
pub struct Identity {
    app: &'static str,
    hostname: String,
}

#[derive(Deserialize)]
pub struct MouseMoveBody {
    dx: f64,
    dy: f64,
    sensitivity: f64,
}

#[derive(Deserialize)]
pub struct ClickBody {
    button: String,
}

#[derive(Deserialize)]
pub struct ScrollBody {
    dy: f64,
}

#[derive(Deserialize)]
pub struct KeyBody {
    key: String,
}

#[derive(Deserialize)]
pub struct HScrollBody {
    #[serde(default)]
    dx: f64,
    state: String,
}

// ── Discovery and the generic command endpoint ────────────────────────────────

/// `GET /identify`: lets the companion app find this host on the LAN.
pub async fn identify(State(state): State<Arc<AppState>>) -> Json<Identity> {
    Json(Identity {
        app: "deck-host",
        hostname: state.hostname.clone(),
    })
}

/// `POST /execute-command`: decode, validate, execute, acknowledge.
pub async fn execute_command(
    State(state): State<Arc<AppState>>,
    Json(envelope): Json<CommandEnvelope>,
) -> Result<Json<CommandAck>, ApiError> {
    let ack = state.dispatcher.dispatch(&envelope)?;
    Ok(Json(ack))
}

// ── Legacy fixed-shape endpoints ──────────────────────────────────────────────

/// `POST /move-mouse`: relative move, pre-scaled by the client's sensitivity.
pub async fn move_mouse(
    State(state): State<Arc<AppState>>,
    Json(body): Json<MouseMoveBody>,
) -> Result<Json<Message>, ApiError> {
    state
        .dispatcher
        .move_pointer(body.dx * body.sensitivity, body.dy * body.sensitivity)?;
    Ok(Message::new("Mouse moved."))
}

/// `POST /click-mouse`
pub async fn click_mouse(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ClickBody>,
) -> Result<Json<Message>, ApiError> {
    let button: MouseButton = serde_json::from_value(serde_json::Value::String(body.button.clone()))
        .map_err(|_| ApiError::bad_request(format!("Invalid button: {}", body.button)))?;
    state.dispatcher.click(button)?;
    Ok(Message::new(format!("{} click performed.", body.button)))
}

/// `POST /scroll-mouse`: vertical scroll, fractional clicks truncated.
pub async fn scroll_mouse(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ScrollBody>,
) -> Result<Json<Message>, ApiError> {
    state.dispatcher.scroll(body.dy as i32)?;
    Ok(Message::new("Scrolled."))
}

/// `POST /press-key`: single key press restricted to the navigation
/// allow-list.
pub async fn press_key(
    State(state): State<Arc<AppState>>,
    Json(body): Json<KeyBody>,
) -> Result<Json<Message>, ApiError> {
    let key = body.key.to_lowercase();
    if !keys::is_navigation_key(&key) {
        return Err(ApiError::bad_request(format!("Invalid key: {key}")));
    }
    state.dispatcher.press_key(&key)?;
    Ok(Message::new(format!("Key '{key}' pressed.")))
}

/// `POST /press-media-key`: media key restricted to the media allow-list.
pub async fn press_media_key(
    State(state): State<Arc<AppState>>,
    Json(body): Json<KeyBody>,
) -> Result<Json<Message>, ApiError> {
    let key = body.key.to_lowercase();
    let media = MediaKey::parse(&key)
        .ok_or_else(|| ApiError::bad_request(format!("Invalid media key: {key}")))?;
    state.dispatcher.media_key(media)?;
    Ok(Message::new(format!("Media key '{key}' pressed.")))
}

/// `POST /press-hotkey`: a `+`-joined chord in one string, lowercased and
/// passed through verbatim.
pub async fn press_hotkey(
    State(state): State<Arc<AppState>>,
    Json(body): Json<KeyBody>,
) -> Result<Json<Message>, ApiError> {
    let hotkey = body.key.to_lowercase();
    let keys: Vec<String> = hotkey.split('+').map(str::to_string).collect();
    if keys.iter().any(String::is_empty) {
        return Err(ApiError::bad_request(format!("Invalid hotkey: {hotkey}")));
    }
    state.dispatcher.hotkey(&keys)?;
    Ok(Message::new(format!("Hotkey '{hotkey}' pressed.")))
}

/// `POST /hscroll-gesture`: one step of the horizontal-scroll gesture.
pub async fn hscroll_gesture(
    State(state): State<Arc<AppState>>,
    Json(body): Json<HScrollBody>,
) -> Result<Json<Message>, ApiError> {
    let phase = match body.state.as_str() {
        "start" => ScrollPhase::Start,
        "drag" => ScrollPhase::Drag,
        "end" => ScrollPhase::End,
        _ => return Err(ApiError::bad_request("Invalid gesture state.")),
    };
    state.dispatcher.hscroll(phase, body.dx)?;
    Ok(Message::new(match phase {
        ScrollPhase::Start => "H-scroll started.",
        ScrollPhase::Drag => "H-scrolling.",
        ScrollPhase::End => "H-scroll ended.",
    }))
}

/// `POST /open-folder`
pub async fn open_folder(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Message>, ApiError> {
    state.dispatcher.open_folder()?;
    Ok(Message::new("Downloads folder opened."))
}

/// `POST /upload-file`: multipart upload streamed chunk by chunk into the
/// downloads directory, never buffered whole in memory.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Message>, ApiError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .ok_or_else(|| ApiError::bad_request("No file name provided."))?
            .to_string();

        let (path, mut out) = state
            .downloads
            .create(&file_name)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::InvalidInput => ApiError::bad_request(e.to_string()),
                _ => ApiError::internal(e.to_string()),
            })?;
        let mut written: u64 = 0;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| ApiError::bad_request(e.to_string()))?
        {
            out.write_all(&chunk)
                .await
                .map_err(|e| ApiError::internal(e.to_string()))?;
            written += chunk.len() as u64;
        }
        out.flush()
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?;
        info!(path = %path.display(), bytes = written, "file saved");
        return Ok(Message::new(format!("File '{file_name}' uploaded.")));
    }
    Err(ApiError::bad_request("No file provided."))
}
