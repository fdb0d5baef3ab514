//! Network seam between the controller and the proxy server.

use async_trait::async_trait;
use joseai_library::BookPage;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::server::types::{ChatRequest, ChatResponse, ImageRequest, ImageResponse};

/// Errors from a single client request.
///
/// All variants are terminal for that request; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection, DNS, or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// `error` field of the body, or the raw body.
        message: String,
    },

    /// The body could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// The server's user-facing error text, if it answered with one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => Some(message),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

/// The three calls the controller makes.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Send one chat message; returns the assistant's reply.
    async fn chat(&self, message: &str) -> std::result::Result<String, ClientError>;

    /// Request an image for `prompt`; returns its URL.
    async fn generate_image(&self, prompt: &str) -> std::result::Result<String, ClientError>;

    /// Fetch the catalog page. `None` sends no `search` parameter.
    async fn search_books(
        &self,
        query: Option<&str>,
    ) -> std::result::Result<BookPage, ClientError>;
}

/// [`Backend`] over HTTP against a running proxy server.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            client,
        })
    }

    /// The server base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Decode a response, mapping non-2xx statuses to [`ClientError::Status`].
async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
) -> std::result::Result<T, ClientError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ClientError::Transport(format!("failed to read body: {e}")))?;

    if !status.is_success() {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

fn transport(e: reqwest::Error) -> ClientError {
    ClientError::Transport(e.to_string())
}

#[async_trait]
impl Backend for HttpBackend {
    async fn chat(&self, message: &str) -> std::result::Result<String, ClientError> {
        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(&ChatRequest {
                message: Some(message.to_owned()),
            })
            .send()
            .await
            .map_err(transport)?;
        decode::<ChatResponse>(response).await.map(|r| r.response)
    }

    async fn generate_image(&self, prompt: &str) -> std::result::Result<String, ClientError> {
        let response = self
            .client
            .post(self.url("/api/generate-image"))
            .json(&ImageRequest {
                prompt: Some(prompt.to_owned()),
            })
            .send()
            .await
            .map_err(transport)?;
        decode::<ImageResponse>(response).await.map(|r| r.image_url)
    }

    async fn search_books(
        &self,
        query: Option<&str>,
    ) -> std::result::Result<BookPage, ClientError> {
        let mut request = self.client.get(self.url("/api/books"));
        if let Some(q) = query {
            request = request.query(&[("search", q)]);
        }
        let response = request.send().await.map_err(transport)?;
        decode::<BookPage>(response).await
    }
}
