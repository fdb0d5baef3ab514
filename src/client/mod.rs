//! Client controller for the JoseAI front end.
//!
//! The controller owns the conversation, voice capture, image requests and
//! library browsing. It talks to the proxy server through [`Backend`] and
//! renders through the traits in [`view`], so it runs unchanged against a
//! browser binding, a terminal, or a recorder in tests.

pub mod app;
pub mod backend;
pub mod chat;
pub mod image;
pub mod library;
pub mod view;
pub mod voice;

pub use app::{App, Surfaces};
pub use backend::{Backend, ClientError, HttpBackend};
pub use chat::{ChatSession, ChatTurn, Originator, SubmitOutcome};
pub use image::ImageGenerator;
pub use library::{BookCard, LibraryBrowser};
pub use view::{
    ChatTab, ChatView, ImageView, LibraryView, NoticeKind, Notification, Notifier, Section,
    SpeechParams, ViewState, VoiceView,
};
pub use voice::{RecognitionOptions, RecognitionResult, Recognizer, VoiceCapture, VoiceState};
