//! Route handlers for the proxy server.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::{debug, warn};
use uuid::Uuid;

use super::AppState;
use super::image::{pick_placeholder, simulated_delay};
use super::types::{
    BooksQuery, ChatRequest, ChatResponse, ErrorResponse, ImageRequest, ImageResponse,
};
use crate::llm::ChatError;
use joseai_library::BookPage;

/// The single-page front end served at `/`.
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Returns the value unchanged if present and not blank.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
}

/// Run one completion, logging a classified failure.
async fn complete(state: &AppState, message: &str) -> Result<String, ChatError> {
    let request_id = Uuid::new_v4();
    debug!(%request_id, provider = state.provider.name(), chars = message.len(), "chat request");
    let result = state.provider.complete(message).await;
    if let Err(ref e) = result {
        warn!(%request_id, code = e.code(), "chat completion failed: {}", e.message());
    }
    result
}

/// `GET /`: the static front end.
pub(super) async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `POST /api/chat`: classified failures surface as 500 with a code.
pub(super) async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let Some(message) = non_blank(request.message) else {
        return bad_request("Message is required");
    };

    match complete(&state, &message).await {
        Ok(response) => Json(ChatResponse { response }).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::with_code(e.user_message(), e.code())),
        )
            .into_response(),
    }
}

/// `POST /ask`: legacy endpoint; failures are rendered as a normal reply.
pub(super) async fn handle_ask(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let Some(message) = non_blank(request.message) else {
        return bad_request("Pesan tidak boleh kosong");
    };

    let response = match complete(&state, &message).await {
        Ok(text) => text,
        Err(e) => e.user_message().to_owned(),
    };
    Json(ChatResponse { response }).into_response()
}

/// `POST /api/generate-image`: random placeholder after a simulated delay.
pub(super) async fn handle_generate_image(
    State(state): State<AppState>,
    Json(request): Json<ImageRequest>,
) -> Response {
    if non_blank(request.prompt).is_none() {
        return bad_request("Prompt is required");
    }

    let delay = simulated_delay(&state.image);
    let Some(url) = pick_placeholder() else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Failed to generate image")),
        )
            .into_response();
    };
    debug!(delay_ms = delay.as_millis() as u64, "simulating image generation");
    tokio::time::sleep(delay).await;

    Json(ImageResponse {
        image_url: url.to_owned(),
    })
    .into_response()
}

/// `GET /api/books`: the fixed catalog; query parameters do not filter.
pub(super) async fn handle_books(
    State(state): State<AppState>,
    Query(query): Query<BooksQuery>,
) -> Json<BookPage> {
    Json(
        state
            .catalog
            .search(query.search.as_deref(), query.page.as_deref()),
    )
}
