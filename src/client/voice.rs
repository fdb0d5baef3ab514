//! Voice capture: speech recognition feeding the chat session.
//!
//! The platform recognizer is abstracted behind [`Recognizer`]; its events are
//! delivered back through [`VoiceCapture::on_started`],
//! [`VoiceCapture::on_result`], [`VoiceCapture::on_ended`] and
//! [`VoiceCapture::on_error`].

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

use super::chat::{ChatSession, SubmitOutcome};
use super::view::{ChatView, NoticeKind, Notification, Notifier, VoiceView};
use crate::config::ClientConfig;

/// Notification shown when recognition fails.
pub const VOICE_ERROR_NOTICE: &str = "Voice recognition error. Please try again.";

/// Recognition language.
pub const RECOGNITION_LANG: &str = "en-US";

/// Voice capture states.
///
/// ```text
/// Idle ──▶ Listening ──▶ Idle
///  ▲  │        │
///  │  ▼        ▼
///  └─ Error ◀──┘
/// ```
///
/// `Unsupported` is fixed at construction and has no transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    /// No recognizer on this platform.
    Unsupported,
    /// Ready to start.
    Idle,
    /// A recognition session is open.
    Listening,
    /// The last session failed; may start again.
    Error,
}

impl VoiceState {
    /// Returns `true` if a new session may be started from this state.
    pub fn can_start(self) -> bool {
        matches!(self, Self::Idle | Self::Error)
    }

    /// Returns `true` if a transition from `self` to `target` is valid.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Idle, Self::Listening)
                | (Self::Error, Self::Listening)
                | (Self::Listening, Self::Idle)
                | (Self::Listening, Self::Error)
                // A start request can fail before the session opens,
                // including a retry after an earlier failure.
                | (Self::Idle, Self::Error)
                | (Self::Error, Self::Error)
        )
    }
}

impl fmt::Display for VoiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unsupported => "unsupported",
            Self::Idle => "idle",
            Self::Listening => "listening",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Session options handed to the recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionOptions {
    /// Keep listening across pauses.
    pub continuous: bool,
    /// Deliver non-final hypotheses too.
    pub interim_results: bool,
    /// BCP 47 language tag.
    pub lang: String,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self {
            continuous: true,
            interim_results: true,
            lang: RECOGNITION_LANG.to_owned(),
        }
    }
}

/// One recognition hypothesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    /// Best transcript for this chunk.
    pub transcript: String,
    /// `false` for interim hypotheses.
    pub is_final: bool,
}

impl RecognitionResult {
    /// A final chunk.
    pub fn final_chunk(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            is_final: true,
        }
    }

    /// An interim chunk.
    pub fn interim(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            is_final: false,
        }
    }
}

/// A recognizer refused to start.
#[derive(Debug, thiserror::Error)]
#[error("speech recognition failed to start: {0}")]
pub struct RecognizerError(pub String);

/// Platform speech recognizer.
pub trait Recognizer: Send + Sync {
    /// Open a session. Events arrive later through the capture callbacks.
    ///
    /// # Errors
    ///
    /// Returns [`RecognizerError`] if the platform refuses to start.
    fn start(&self, options: &RecognitionOptions) -> Result<(), RecognizerError>;

    /// Ask the open session to finish gracefully.
    fn stop(&self);
}

/// Concatenate the final chunks from `result_index` on.
pub fn final_transcript(results: &[RecognitionResult], result_index: usize) -> String {
    results
        .iter()
        .skip(result_index)
        .filter(|r| r.is_final)
        .map(|r| r.transcript.as_str())
        .collect()
}

#[derive(Debug)]
struct Inner {
    state: VoiceState,
    /// Set between `start()` and the `started` event.
    pending: bool,
}

/// Voice capture controller.
pub struct VoiceCapture {
    inner: Mutex<Inner>,
    recognizer: Option<Arc<dyn Recognizer>>,
    chat: Arc<ChatSession>,
    chat_view: Arc<dyn ChatView>,
    view: Arc<dyn VoiceView>,
    notifier: Arc<dyn Notifier>,
    submit_delay: Duration,
    error_ttl: Duration,
}

impl VoiceCapture {
    /// Create the controller. A `None` recognizer puts it permanently in
    /// [`VoiceState::Unsupported`].
    pub fn new(
        recognizer: Option<Arc<dyn Recognizer>>,
        chat: Arc<ChatSession>,
        chat_view: Arc<dyn ChatView>,
        view: Arc<dyn VoiceView>,
        notifier: Arc<dyn Notifier>,
        config: &ClientConfig,
    ) -> Self {
        let state = if recognizer.is_some() {
            VoiceState::Idle
        } else {
            view.mark_unsupported();
            VoiceState::Unsupported
        };
        Self {
            inner: Mutex::new(Inner {
                state,
                pending: false,
            }),
            recognizer,
            chat,
            chat_view,
            view,
            notifier,
            submit_delay: config.transcript_submit_delay(),
            error_ttl: config.error_notice_ttl(),
        }
    }

    /// Current state.
    pub fn state(&self) -> VoiceState {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).state
    }

    /// Returns `true` while a session is open.
    pub fn is_listening(&self) -> bool {
        self.state() == VoiceState::Listening
    }

    /// Apply a transition. The pending-start guard is only released when the
    /// transition is accepted.
    fn transition(&self, target: VoiceState) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if !inner.state.can_transition_to(target) {
            debug!(from = %inner.state, to = %target, "ignoring voice transition");
            return false;
        }
        debug!(from = %inner.state, to = %target, "voice state transition");
        inner.state = target;
        inner.pending = false;
        true
    }

    /// Move to `Error` if a session is open or a start is pending.
    fn fail(&self) -> bool {
        {
            let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            if inner.state != VoiceState::Listening && !inner.pending {
                debug!(state = %inner.state, "ignoring voice error with no session");
                return false;
            }
        }
        self.transition(VoiceState::Error)
    }

    /// Open a recognition session. No-op unless idle or errored, or while a
    /// start is already pending.
    pub fn start(&self) {
        let Some(recognizer) = &self.recognizer else {
            return;
        };
        {
            let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            if !inner.state.can_start() || inner.pending {
                return;
            }
            inner.pending = true;
        }
        if let Err(e) = recognizer.start(&RecognitionOptions::default()) {
            warn!("{e}");
            self.on_error();
        }
    }

    /// Request graceful termination. No-op unless listening.
    pub fn stop(&self) {
        if !self.is_listening() {
            return;
        }
        if let Some(recognizer) = &self.recognizer {
            recognizer.stop();
        }
    }

    /// The recognizer opened its session.
    pub fn on_started(&self) {
        if self.transition(VoiceState::Listening) {
            self.view.set_listening(true);
            self.view.set_controls(false, true);
        }
    }

    /// The session closed normally.
    pub fn on_ended(&self) {
        if self.transition(VoiceState::Idle) {
            self.reset_controls();
        }
    }

    /// The session, or a pending start, failed.
    pub fn on_error(&self) {
        if self.fail() {
            self.reset_controls();
            self.notifier.notify(Notification {
                kind: NoticeKind::Error,
                message: VOICE_ERROR_NOTICE.to_owned(),
                ttl: self.error_ttl,
            });
        }
    }

    fn reset_controls(&self) {
        self.view.set_listening(false);
        self.view.set_controls(true, false);
    }

    /// Handle a recognition `result` event.
    ///
    /// A non-empty final transcript is shown immediately, then after the
    /// submit delay it is placed in the chat input and submitted, and the
    /// transcript display is cleared. Returns `None` when the event carried
    /// no final text.
    pub async fn on_result(
        &self,
        results: &[RecognitionResult],
        result_index: usize,
    ) -> Option<SubmitOutcome> {
        let transcript = final_transcript(results, result_index);
        if transcript.is_empty() {
            return None;
        }
        self.view.show_transcript(Some(&transcript));

        tokio::time::sleep(self.submit_delay).await;
        self.chat_view.set_input(&transcript);
        let outcome = self.chat.submit(&transcript).await;
        self.view.show_transcript(None);
        Some(outcome)
    }
}
