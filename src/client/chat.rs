//! Chat turn lifecycle.
//!
//! ```text
//! submit(text) ── blank ──▶ (nothing)
//!      │
//!      ▼
//! user turn rendered ─▶ input cleared ─▶ typing shown ─▶ request
//!                                                      │
//!                           ┌──────── ok ──────────────┤
//!                           ▼                          ▼ err
//!            typing hidden, assistant turn     typing hidden,
//!            rendered, spoken if Voice tab     error notification
//! ```
//!
//! Submissions are not serialized: two in-flight requests finish in
//! whatever order the network returns them.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

use super::backend::Backend;
use super::view::{
    ChatTab, ChatView, NoticeKind, Notification, Notifier, SharedViewState, SpeechParams,
    current_view,
};

/// Greeting shown when the assistant section first loads.
pub const WELCOME_MESSAGE: &str =
    "Hello! I'm JoseAI, your intelligent assistant. How can I help you today?";

/// Notification shown when a chat request fails.
pub const CHAT_FAILURE_NOTICE: &str =
    "Failed to get AI response. Please check your internet connection and try again.";

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Originator {
    /// The human user.
    User,
    /// The AI assistant.
    Assistant,
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    /// Message text.
    pub text: String,
    /// Who produced it.
    pub originator: Originator,
    /// When it was appended.
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    fn now(text: impl Into<String>, originator: Originator) -> Self {
        Self {
            text: text.into(),
            originator,
            created_at: Utc::now(),
        }
    }

    /// Returns `true` for turns typed by the user.
    pub fn is_user(&self) -> bool {
        self.originator == Originator::User
    }
}

/// What a submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// The assistant replied with this text.
    Replied(String),
    /// The request failed; the user turn was kept. Carries the server's
    /// error text when it sent one.
    Failed(Option<String>),
}

/// In-memory conversation plus its request lifecycle.
pub struct ChatSession {
    turns: Mutex<Vec<ChatTurn>>,
    backend: Arc<dyn Backend>,
    view: Arc<dyn ChatView>,
    notifier: Arc<dyn Notifier>,
    view_state: SharedViewState,
    error_ttl: Duration,
    speech: SpeechParams,
}

impl ChatSession {
    /// Create an empty session.
    pub fn new(
        backend: Arc<dyn Backend>,
        view: Arc<dyn ChatView>,
        notifier: Arc<dyn Notifier>,
        view_state: SharedViewState,
        error_ttl: Duration,
    ) -> Self {
        Self {
            turns: Mutex::new(Vec::new()),
            backend,
            view,
            notifier,
            view_state,
            error_ttl,
            speech: SpeechParams::default(),
        }
    }

    /// Copy of the conversation so far, oldest first.
    pub fn turns(&self) -> Vec<ChatTurn> {
        self.turns.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of turns so far.
    pub fn len(&self) -> usize {
        self.turns.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Returns `true` if no turn has been appended.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a turn and render it. The lock is released before rendering.
    fn append(&self, turn: ChatTurn) {
        self.turns
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(turn.clone());
        self.view.render_turn(&turn);
    }

    /// Append and render the assistant's greeting.
    pub fn show_welcome(&self) {
        self.append(ChatTurn::now(WELCOME_MESSAGE, Originator::Assistant));
    }

    /// Submit one user message and drive it to completion.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let message = text.trim();
        if message.is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.append(ChatTurn::now(message, Originator::User));
        self.view.clear_input();
        self.view.show_typing();

        debug!(chars = message.len(), "sending chat message");
        let result = self.backend.chat(message).await;
        self.view.hide_typing();

        match result {
            Ok(reply) => {
                self.append(ChatTurn::now(reply.clone(), Originator::Assistant));
                if current_view(&self.view_state).tab == ChatTab::Voice {
                    self.view.speak(&reply, self.speech);
                }
                SubmitOutcome::Replied(reply)
            }
            Err(e) => {
                warn!("chat request failed: {e}");
                self.notifier.notify(Notification {
                    kind: NoticeKind::Error,
                    message: CHAT_FAILURE_NOTICE.to_owned(),
                    ttl: self.error_ttl,
                });
                SubmitOutcome::Failed(e.server_message().map(str::to_owned))
            }
        }
    }
}
