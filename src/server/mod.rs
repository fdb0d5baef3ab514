//! HTTP proxy server for the JoseAI front end.
//!
//! ## Endpoints
//!
//! - `GET /`: static front end
//! - `POST /api/chat`: chat completion via the configured [`ChatProvider`]
//! - `POST /ask`: legacy chat endpoint that renders failures as replies
//! - `POST /api/generate-image`: random placeholder image after a delay
//! - `GET /api/books`: the fixed book catalog

pub mod image;
mod routes;
pub mod types;

use axum::Router;
use axum::routing::{get, post};
use joseai_library::Catalog;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::{AppConfig, ImageConfig};
use crate::error::{AppError, Result};
use crate::llm::ChatProvider;

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// Shared state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream chat completion backend.
    pub provider: Arc<dyn ChatProvider>,
    /// Static book catalog.
    pub catalog: Arc<Catalog>,
    /// Simulated image generation settings.
    pub image: ImageConfig,
}

impl AppState {
    /// State with the built-in catalog.
    pub fn new(provider: Arc<dyn ChatProvider>, image: ImageConfig) -> Self {
        Self {
            provider,
            catalog: Arc::new(Catalog::builtin()),
            image,
        }
    }
}

/// Build the router for all endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::handle_index))
        .route("/api/chat", post(routes::handle_chat))
        .route("/api/generate-image", post(routes::handle_generate_image))
        .route("/api/books", get(routes::handle_books))
        .route("/ask", post(routes::handle_ask))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// ProxyServer
// ---------------------------------------------------------------------------

/// Running proxy server.
///
/// Serves in a background tokio task; the task is aborted on drop.
pub struct ProxyServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl ProxyServer {
    /// Start the proxy server.
    ///
    /// Binds to `{config.server.host}:{config.server.port}` (use port `0`
    /// for auto-assign) and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start(config: &AppConfig, provider: Arc<dyn ChatProvider>) -> Result<Self> {
        let state = AppState::new(provider, config.image.clone());
        let app = router(state);

        let bind_addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| AppError::Server(format!("bind to {bind_addr} failed: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| AppError::Server(format!("failed to get local addr: {e}")))?;

        info!("JoseAI server running on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("proxy server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Base URL suitable for a client, e.g. `http://127.0.0.1:5000`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for ProxyServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
