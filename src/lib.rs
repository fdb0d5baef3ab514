//! JoseAI: chat, voice, image and book-search assistant.
//!
//! The crate has two halves:
//!
//! - **Server**: an axum proxy that forwards chat messages to an
//!   OpenAI-compatible completion API (Groq), serves placeholder images,
//!   and returns a fixed public-domain book catalog
//! - **Client**: a UI-agnostic controller that drives the chat turn
//!   lifecycle, voice capture, image requests and library browsing through
//!   render-callback traits
//!
//! # Architecture
//!
//! ```text
//! display surface ◀── view traits ── client::App ── Backend (HTTP) ──▶ server
//!                                                                      │
//!                                              llm::ChatProvider ◀─────┤
//!                                              joseai_library::Catalog ◀┘
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod llm;
pub mod server;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use llm::{ChatError, ChatProvider, GroqChatProvider};
pub use server::ProxyServer;
