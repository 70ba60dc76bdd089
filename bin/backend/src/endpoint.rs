use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chatterbox_backend::{wire, ResponseGenerator, TurnRequest, DEFAULT_SESSION_ID};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

pub type SharedGenerator = Arc<ResponseGenerator>;

/// Streamed back verbatim when the request carries no messages at all.
const NO_INPUT_RESPONSE: &str = "Could I BE any more confused? You didn't say anything!";

/// One message of the client-side transcript. Only the last entry is
/// acted on; the rest is the client's own rendering state.
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<InboundMessage>,
    pub session_id: Option<String>,
    pub image_context_notes: Option<String>,
}

/// Returns the first N words of a string for logging preview
fn first_n_words(s: &str, n: usize) -> String {
    s.split_whitespace().take(n).collect::<Vec<_>>().join(" ")
}

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the Chatterbox API!" }))
}

pub async fn health() -> &'static str {
    "OK"
}

fn plain_text(body: Body) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}

pub async fn chat_endpoint(
    State(generator): State<SharedGenerator>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let session_id = request
        .session_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    let Some(last) = request.messages.last() else {
        return plain_text(Body::from(wire::encode_fragment(NO_INPUT_RESPONSE)));
    };

    let preview = first_n_words(&last.content, 3);
    info!(session_id, role = %last.role, preview, "POST /api/v1/chat");

    let turn = TurnRequest {
        session_id,
        user_text: last.content.clone(),
        context_notes: request.image_context_notes.clone(),
    };

    plain_text(Body::from_stream(wire::encode_stream(
        generator.run_turn(turn),
    )))
}

pub fn create_router(generator: SharedGenerator) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/v1/chat", post(chat_endpoint))
        .with_state(generator)
}
