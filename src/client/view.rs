//! Render-callback seams between the controller and a display surface.
//!
//! Every visible effect the controller has goes through one of these
//! traits. A browser binding, a terminal UI, or a test recorder can
//! implement them. Methods take `&self`: implementations own whatever
//! interior mutability their surface needs, so concurrent requests can
//! render without coordinating.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::chat::ChatTurn;
use super::library::BookCard;

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// Top-level navigation sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    /// Chat and voice assistant.
    #[default]
    TanyaAi,
    /// Image generation.
    ImageGen,
    /// Book library.
    Library,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::TanyaAi => "tanyaai",
            Self::ImageGen => "imagegen",
            Self::Library => "library",
        };
        f.write_str(label)
    }
}

/// Tabs inside the assistant section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatTab {
    /// Typed chat.
    #[default]
    Chat,
    /// Voice conversation; replies are spoken aloud.
    Voice,
}

/// Which section and tab are showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Active navigation section.
    pub section: Section,
    /// Active assistant tab.
    pub tab: ChatTab,
}

/// View state shared between the controller's components.
pub type SharedViewState = Arc<Mutex<ViewState>>;

/// Snapshot the shared view state.
pub fn current_view(state: &SharedViewState) -> ViewState {
    *state.lock().unwrap_or_else(|e| e.into_inner())
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Something failed.
    Error,
    /// Something completed.
    Success,
}

/// A transient, auto-dismissing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub kind: NoticeKind,
    /// Text shown to the user.
    pub message: String,
    /// How long the surface keeps it visible.
    pub ttl: Duration,
}

/// Shows transient notifications; dismissal after `ttl` is the surface's job.
pub trait Notifier: Send + Sync {
    /// Display a notification.
    fn notify(&self, notice: Notification);
}

// ---------------------------------------------------------------------------
// Per-feature views
// ---------------------------------------------------------------------------

/// Speech synthesis parameters for spoken replies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechParams {
    /// Speaking rate (1.0 = normal).
    pub rate: f32,
    /// Pitch (1.0 = normal).
    pub pitch: f32,
}

impl Default for SpeechParams {
    fn default() -> Self {
        Self {
            rate: 0.8,
            pitch: 1.0,
        }
    }
}

/// Conversation surface.
pub trait ChatView: Send + Sync {
    /// Append one rendered turn and scroll it into view.
    fn render_turn(&self, turn: &ChatTurn);
    /// Clear the text input.
    fn clear_input(&self);
    /// Put text into the input, as if typed.
    fn set_input(&self, text: &str);
    /// Show the typing placeholder.
    fn show_typing(&self);
    /// Remove the typing placeholder, if shown.
    fn hide_typing(&self);
    /// Speak text aloud. Surfaces without synthesis may ignore this.
    fn speak(&self, text: &str, params: SpeechParams);
}

/// Voice capture controls.
pub trait VoiceView: Send + Sync {
    /// Enable or disable the start and stop controls.
    fn set_controls(&self, start_enabled: bool, stop_enabled: bool);
    /// Toggle the listening indicator.
    fn set_listening(&self, listening: bool);
    /// Show the recognised transcript, or clear it with `None`.
    fn show_transcript(&self, transcript: Option<&str>);
    /// Permanently mark voice input as unavailable.
    fn mark_unsupported(&self);
}

/// Image generation panel.
pub trait ImageView: Send + Sync {
    /// Put the trigger into (or out of) its busy state.
    fn set_generating(&self, busy: bool);
    /// Show the loading placeholder.
    fn show_loading(&self);
    /// Show the generated image.
    fn show_image(&self, url: &str);
    /// Show an inline error block.
    fn show_error(&self, message: &str);
}

/// Library grid.
pub trait LibraryView: Send + Sync {
    /// Show or hide the loading indicator.
    fn set_loading(&self, loading: bool);
    /// Remove all cards.
    fn clear_books(&self);
    /// Render result cards in order.
    fn show_books(&self, cards: &[BookCard]);
    /// Show an inline error block in the grid.
    fn show_error(&self, message: &str);
    /// Open a URL in a new browsing context.
    fn open_external(&self, url: &str);
}
