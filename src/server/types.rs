//! JSON request and response bodies for the proxy's HTTP surface.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of `POST /api/chat` and `POST /ask`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message. Missing or blank is rejected with 400.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /api/generate-image`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageRequest {
    /// Image description. Missing or blank is rejected with 400.
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Query string of `GET /api/books`. Both fields are accepted and ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BooksQuery {
    /// Free-text search.
    #[serde(default)]
    pub search: Option<String>,
    /// Page number, kept as text so malformed values are not rejected.
    #[serde(default)]
    pub page: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Successful chat reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Assistant text, verbatim from the upstream.
    pub response: String,
}

/// Successful image "generation".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    /// URL of the selected placeholder image.
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Error body for any non-2xx reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Stable error code, present for classified upstream failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    /// An error body with no code.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: None,
        }
    }

    /// An error body carrying a stable code.
    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: Some(code.into()),
        }
    }
}
