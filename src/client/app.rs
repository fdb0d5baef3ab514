//! Top-level controller: navigation plus the four feature controllers.

use std::sync::Arc;
use tracing::debug;

use super::backend::{Backend, HttpBackend};
use super::chat::ChatSession;
use super::image::ImageGenerator;
use super::library::{BookCard, LibraryBrowser};
use super::view::{
    ChatTab, ChatView, ImageView, LibraryView, Notifier, Section, SharedViewState, ViewState,
    VoiceView, current_view,
};
use super::voice::{Recognizer, VoiceCapture};
use crate::config::ClientConfig;
use crate::error::Result;

/// The display surfaces an [`App`] renders into.
#[derive(Clone)]
pub struct Surfaces {
    pub chat: Arc<dyn ChatView>,
    pub voice: Arc<dyn VoiceView>,
    pub image: Arc<dyn ImageView>,
    pub library: Arc<dyn LibraryView>,
    pub notifier: Arc<dyn Notifier>,
}

impl Surfaces {
    /// Use one object for every surface.
    pub fn shared<S>(surface: Arc<S>) -> Self
    where
        S: ChatView + VoiceView + ImageView + LibraryView + Notifier + 'static,
    {
        Self {
            chat: surface.clone(),
            voice: surface.clone(),
            image: surface.clone(),
            library: surface.clone(),
            notifier: surface,
        }
    }
}

/// The client controller.
pub struct App {
    view_state: SharedViewState,
    chat: Arc<ChatSession>,
    voice: VoiceCapture,
    images: ImageGenerator,
    library: LibraryBrowser,
}

impl App {
    /// Build a controller over any [`Backend`].
    pub fn new(
        backend: Arc<dyn Backend>,
        surfaces: Surfaces,
        recognizer: Option<Arc<dyn Recognizer>>,
        config: &ClientConfig,
    ) -> Self {
        let view_state = SharedViewState::default();
        let chat = Arc::new(ChatSession::new(
            backend.clone(),
            surfaces.chat.clone(),
            surfaces.notifier.clone(),
            view_state.clone(),
            config.error_notice_ttl(),
        ));
        let voice = VoiceCapture::new(
            recognizer,
            chat.clone(),
            surfaces.chat,
            surfaces.voice,
            surfaces.notifier.clone(),
            config,
        );
        let images = ImageGenerator::new(
            backend.clone(),
            surfaces.image,
            surfaces.notifier.clone(),
            config,
        );
        let library = LibraryBrowser::new(backend, surfaces.library, surfaces.notifier, config);
        Self {
            view_state,
            chat,
            voice,
            images,
            library,
        }
    }

    /// Build a controller talking HTTP to `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn connect(
        config: &ClientConfig,
        surfaces: Surfaces,
        recognizer: Option<Arc<dyn Recognizer>>,
    ) -> Result<Self> {
        let backend = Arc::new(HttpBackend::new(config.base_url.clone())?);
        Ok(Self::new(backend, surfaces, recognizer, config))
    }

    /// Show the welcome turn. Call once after construction.
    pub fn init(&self) {
        self.chat.show_welcome();
    }

    /// Current section and tab.
    pub fn view(&self) -> ViewState {
        current_view(&self.view_state)
    }

    /// Switch the visible section. Entering the library loads every book.
    ///
    /// Returns the loaded cards when the library was entered successfully.
    pub async fn switch_section(&self, section: Section) -> Option<Vec<BookCard>> {
        debug!(%section, "switching section");
        self.view_state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .section = section;
        if section == Section::Library {
            self.library.search("").await
        } else {
            None
        }
    }

    /// Switch the assistant tab.
    pub fn switch_tab(&self, tab: ChatTab) {
        self.view_state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .tab = tab;
    }

    /// Chat session controller.
    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    /// Voice capture controller.
    pub fn voice(&self) -> &VoiceCapture {
        &self.voice
    }

    /// Image generation controller.
    pub fn images(&self) -> &ImageGenerator {
        &self.images
    }

    /// Library browsing controller.
    pub fn library(&self) -> &LibraryBrowser {
        &self.library
    }
}
