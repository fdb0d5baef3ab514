//! Error types for the chat proxy's upstream call.
//!
//! Each variant carries a stable error code (SCREAMING_SNAKE_CASE) that is
//! included in the Display output and accessible via [`ChatError::code()`].
//! The user-facing reply text is a rendering of the variant, not the error.

use super::prompt::{CONNECTION_FAILURE_REPLY, MISSING_CREDENTIAL_REPLY};

/// Stable error codes for programmatic error handling.
pub mod error_codes {
    /// No credential configured, or the upstream rejected it.
    pub const CREDENTIAL_FAILED: &str = "CREDENTIAL_FAILED";

    /// Transport failure or non-success status from the upstream.
    pub const UPSTREAM_FAILED: &str = "UPSTREAM_FAILED";

    /// The upstream replied successfully but the body had no usable completion.
    pub const MALFORMED_RESPONSE: &str = "MALFORMED_RESPONSE";
}

/// Tagged failure of a chat completion.
///
/// The Display impl formats as `[CODE] message`.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// No credential configured, or the upstream rejected it (401/403).
    #[error("[{}] {}", error_codes::CREDENTIAL_FAILED, .0)]
    Credential(String),

    /// Network error, timeout, or non-success status.
    #[error("[{}] {}", error_codes::UPSTREAM_FAILED, .0)]
    Upstream(String),

    /// Body was not JSON or lacked `choices[0].message.content`.
    #[error("[{}] {}", error_codes::MALFORMED_RESPONSE, .0)]
    MalformedResponse(String),
}

impl ChatError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Credential(_) => error_codes::CREDENTIAL_FAILED,
            Self::Upstream(_) => error_codes::UPSTREAM_FAILED,
            Self::MalformedResponse(_) => error_codes::MALFORMED_RESPONSE,
        }
    }

    /// Returns the inner message without the code prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Credential(m) | Self::Upstream(m) | Self::MalformedResponse(m) => m,
        }
    }

    /// Default reply text for the end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Credential(_) => MISSING_CREDENTIAL_REPLY,
            Self::Upstream(_) | Self::MalformedResponse(_) => CONNECTION_FAILURE_REPLY,
        }
    }
}
