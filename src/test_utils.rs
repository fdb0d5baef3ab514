//! Shared test doubles for the client controller tests.
//!
//! [`RecordingSurface`] implements every view trait and logs each call as a
//! [`UiEvent`]; [`ScriptedBackend`] answers from canned values and records
//! what it was asked.

use async_trait::async_trait;
use joseai_library::BookPage;
use std::sync::Mutex;
use std::time::Duration;

use crate::client::backend::{Backend, ClientError};
use crate::client::chat::{ChatTurn, Originator};
use crate::client::library::BookCard;
use crate::client::view::{
    ChatView, ImageView, LibraryView, NoticeKind, Notification, Notifier, SpeechParams, VoiceView,
};

/// One observable effect on the display surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A chat turn was rendered.
    Turn(Originator, String),
    /// The chat input was cleared.
    ClearInput,
    /// The chat input was filled.
    SetInput(String),
    /// Typing indicator shown.
    TypingShown,
    /// Typing indicator hidden.
    TypingHidden,
    /// Text handed to speech synthesis.
    Spoken(String),
    /// A transient notification.
    Notice(NoticeKind, String),
    /// Voice start/stop buttons enabled state.
    VoiceControls { start: bool, stop: bool },
    /// Listening indicator toggled.
    Listening(bool),
    /// Transcript shown, or hidden on `None`.
    Transcript(Option<String>),
    /// Voice marked unavailable.
    VoiceUnsupported,
    /// Generate trigger busy state.
    Generating(bool),
    /// Image spinner shown.
    ImageLoading,
    /// Image displayed.
    Image(String),
    /// Inline image error.
    ImageError(String),
    /// Library loading state.
    BooksLoading(bool),
    /// Book grid cleared.
    BooksCleared,
    /// Book cards shown, by title.
    Books(Vec<String>),
    /// Inline library error.
    BooksError(String),
    /// External URL opened.
    Opened(String),
}

/// Records every view call in order.
#[derive(Default)]
pub struct RecordingSurface {
    events: Mutex<Vec<UiEvent>>,
    notices: Mutex<Vec<Notification>>,
}

impl RecordingSurface {
    fn push(&self, event: UiEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }

    /// All events so far.
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Forget recorded events.
    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Lifetime of the most recent notification.
    pub fn last_notice_ttl(&self) -> Option<Duration> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .map(|n| n.ttl)
    }
}

impl Notifier for RecordingSurface {
    fn notify(&self, notice: Notification) {
        self.push(UiEvent::Notice(notice.kind, notice.message.clone()));
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice);
    }
}

impl ChatView for RecordingSurface {
    fn render_turn(&self, turn: &ChatTurn) {
        self.push(UiEvent::Turn(turn.originator, turn.text.clone()));
    }
    fn clear_input(&self) {
        self.push(UiEvent::ClearInput);
    }
    fn set_input(&self, text: &str) {
        self.push(UiEvent::SetInput(text.to_owned()));
    }
    fn show_typing(&self) {
        self.push(UiEvent::TypingShown);
    }
    fn hide_typing(&self) {
        self.push(UiEvent::TypingHidden);
    }
    fn speak(&self, text: &str, _params: SpeechParams) {
        self.push(UiEvent::Spoken(text.to_owned()));
    }
}

impl VoiceView for RecordingSurface {
    fn set_controls(&self, start_enabled: bool, stop_enabled: bool) {
        self.push(UiEvent::VoiceControls {
            start: start_enabled,
            stop: stop_enabled,
        });
    }
    fn set_listening(&self, listening: bool) {
        self.push(UiEvent::Listening(listening));
    }
    fn show_transcript(&self, transcript: Option<&str>) {
        self.push(UiEvent::Transcript(transcript.map(str::to_owned)));
    }
    fn mark_unsupported(&self) {
        self.push(UiEvent::VoiceUnsupported);
    }
}

impl ImageView for RecordingSurface {
    fn set_generating(&self, busy: bool) {
        self.push(UiEvent::Generating(busy));
    }
    fn show_loading(&self) {
        self.push(UiEvent::ImageLoading);
    }
    fn show_image(&self, url: &str) {
        self.push(UiEvent::Image(url.to_owned()));
    }
    fn show_error(&self, message: &str) {
        self.push(UiEvent::ImageError(message.to_owned()));
    }
}

impl LibraryView for RecordingSurface {
    fn set_loading(&self, loading: bool) {
        self.push(UiEvent::BooksLoading(loading));
    }
    fn clear_books(&self) {
        self.push(UiEvent::BooksCleared);
    }
    fn show_books(&self, cards: &[BookCard]) {
        self.push(UiEvent::Books(cards.iter().map(|c| c.title.clone()).collect()));
    }
    fn show_error(&self, message: &str) {
        self.push(UiEvent::BooksError(message.to_owned()));
    }
    fn open_external(&self, url: &str) {
        self.push(UiEvent::Opened(url.to_owned()));
    }
}

/// Backend with canned answers. Unset answers fail with HTTP 500.
#[derive(Default)]
pub struct ScriptedBackend {
    chat_reply: Option<String>,
    image_url: Option<String>,
    books: Option<BookPage>,
    chat_calls: Mutex<Vec<String>>,
    image_calls: Mutex<Vec<String>>,
    book_queries: Mutex<Vec<Option<String>>>,
}

impl ScriptedBackend {
    /// Chat succeeds with `reply`.
    pub fn replying(reply: &str) -> Self {
        Self {
            chat_reply: Some(reply.to_owned()),
            ..Self::default()
        }
    }

    /// Every call fails.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Image generation succeeds with `url`.
    pub fn with_image(mut self, url: &str) -> Self {
        self.image_url = Some(url.to_owned());
        self
    }

    /// Book search succeeds with `page`.
    pub fn with_books(mut self, page: BookPage) -> Self {
        self.books = Some(page);
        self
    }

    /// Messages passed to `chat`, in order.
    pub fn chat_calls(&self) -> Vec<String> {
        self.chat_calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Prompts passed to `generate_image`, in order.
    pub fn image_calls(&self) -> Vec<String> {
        self.image_calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Queries passed to `search_books`, in order.
    pub fn book_queries(&self) -> Vec<Option<String>> {
        self.book_queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

fn scripted_failure() -> ClientError {
    ClientError::Status {
        status: 500,
        message: "scripted failure".into(),
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn chat(&self, message: &str) -> Result<String, ClientError> {
        self.chat_calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_owned());
        // Let other in-flight submissions interleave.
        tokio::task::yield_now().await;
        self.chat_reply.clone().ok_or_else(scripted_failure)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, ClientError> {
        self.image_calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(prompt.to_owned());
        self.image_url.clone().ok_or_else(scripted_failure)
    }

    async fn search_books(&self, query: Option<&str>) -> Result<BookPage, ClientError> {
        self.book_queries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(query.map(str::to_owned));
        self.books.clone().ok_or_else(scripted_failure)
    }
}
