//! Image generation requests from the client side.

use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::backend::Backend;
use super::view::{ImageView, NoticeKind, Notification, Notifier};
use crate::config::ClientConfig;

/// Notification for a blank prompt.
pub const EMPTY_PROMPT_NOTICE: &str = "Please enter an image description.";
/// Notification after a successful generation.
pub const IMAGE_SUCCESS_NOTICE: &str = "Image generated successfully!";
/// Notification and inline error after a failed generation.
pub const IMAGE_FAILURE_NOTICE: &str = "Failed to generate image. Please try again.";

/// Restores the trigger when dropped, whichever way the request ends.
struct BusyGuard<'a> {
    view: &'a dyn ImageView,
}

impl<'a> BusyGuard<'a> {
    fn engage(view: &'a dyn ImageView) -> Self {
        view.set_generating(true);
        Self { view }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.view.set_generating(false);
    }
}

/// Drives one image request at a time per call.
pub struct ImageGenerator {
    backend: Arc<dyn Backend>,
    view: Arc<dyn ImageView>,
    notifier: Arc<dyn Notifier>,
    error_ttl: Duration,
    success_ttl: Duration,
}

impl ImageGenerator {
    /// Create a generator that renders into `view`.
    pub fn new(
        backend: Arc<dyn Backend>,
        view: Arc<dyn ImageView>,
        notifier: Arc<dyn Notifier>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            backend,
            view,
            notifier,
            error_ttl: config.error_notice_ttl(),
            success_ttl: config.success_notice_ttl(),
        }
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        let ttl = match kind {
            NoticeKind::Error => self.error_ttl,
            NoticeKind::Success => self.success_ttl,
        };
        self.notifier.notify(Notification {
            kind,
            message: message.to_owned(),
            ttl,
        });
    }

    /// Request an image for `prompt`. Returns the image URL on success.
    pub async fn generate(&self, prompt: &str) -> Option<String> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            self.notify(NoticeKind::Error, EMPTY_PROMPT_NOTICE);
            return None;
        }

        let _busy = BusyGuard::engage(self.view.as_ref());
        self.view.show_loading();

        match self.backend.generate_image(prompt).await {
            Ok(url) => {
                self.view.show_image(&url);
                self.notify(NoticeKind::Success, IMAGE_SUCCESS_NOTICE);
                Some(url)
            }
            Err(e) => {
                warn!("image generation failed: {e}");
                self.view.show_error(IMAGE_FAILURE_NOTICE);
                self.notify(NoticeKind::Error, IMAGE_FAILURE_NOTICE);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::test_utils::{RecordingSurface, ScriptedBackend, UiEvent};

    const URL: &str = "https://images.unsplash.com/photo-1";

    fn generator(backend: Arc<ScriptedBackend>, surface: Arc<RecordingSurface>) -> ImageGenerator {
        ImageGenerator::new(backend, surface.clone(), surface, &ClientConfig::default())
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected_locally() {
        let backend = Arc::new(ScriptedBackend::default().with_image(URL));
        let surface = Arc::new(RecordingSurface::default());
        let images = generator(backend.clone(), surface.clone());

        assert_eq!(images.generate("   ").await, None);
        assert!(backend.image_calls().is_empty());
        assert_eq!(
            surface.events(),
            vec![UiEvent::Notice(NoticeKind::Error, EMPTY_PROMPT_NOTICE.into())]
        );
    }

    #[tokio::test]
    async fn success_shows_image_and_restores_trigger() {
        let backend = Arc::new(ScriptedBackend::default().with_image(URL));
        let surface = Arc::new(RecordingSurface::default());
        let images = generator(backend.clone(), surface.clone());

        assert_eq!(images.generate(" a red fox ").await.as_deref(), Some(URL));
        assert_eq!(backend.image_calls(), vec!["a red fox".to_owned()]);
        assert_eq!(
            surface.events(),
            vec![
                UiEvent::Generating(true),
                UiEvent::ImageLoading,
                UiEvent::Image(URL.into()),
                UiEvent::Notice(NoticeKind::Success, IMAGE_SUCCESS_NOTICE.into()),
                UiEvent::Generating(false),
            ]
        );
        assert_eq!(surface.last_notice_ttl(), Some(Duration::from_secs(3)));
    }

    #[tokio::test]
    async fn failure_shows_inline_error_and_restores_trigger() {
        let backend = Arc::new(ScriptedBackend::failing());
        let surface = Arc::new(RecordingSurface::default());
        let images = generator(backend, surface.clone());

        assert_eq!(images.generate("a red fox").await, None);
        let events = surface.events();
        assert!(events.contains(&UiEvent::ImageError(IMAGE_FAILURE_NOTICE.into())));
        assert!(events.contains(&UiEvent::Notice(
            NoticeKind::Error,
            IMAGE_FAILURE_NOTICE.into()
        )));
        assert_eq!(events.last(), Some(&UiEvent::Generating(false)));
        assert_eq!(surface.last_notice_ttl(), Some(Duration::from_secs(5)));
    }
}
