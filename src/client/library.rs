//! Library browsing: catalog search and book cards.

use joseai_library::BookRecord;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::backend::Backend;
use super::view::{LibraryView, NoticeKind, Notification, Notifier};
use crate::config::ClientConfig;

/// Cover shown when the primary cover fails to load.
pub const FALLBACK_COVER_URL: &str = "https://images.unsplash.com/photo-1544947950-fa07a98d237f?ixlib=rb-4.0.3&auto=format&fit=crop&w=400&h=600";
/// Author label for records with no authors.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
/// Subject label for records with no subjects.
pub const DEFAULT_SUBJECT: &str = "Fiction";
/// Inline error shown in the grid when a search fails.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load books. Please try again.";
/// Notification when a book has no readable edition.
pub const NOT_READABLE_NOTICE: &str = "Sorry, this book is not available for reading.";

const MAX_SUBJECTS: usize = 2;

/// A record prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    /// Catalog id.
    pub id: u64,
    /// Book title.
    pub title: String,
    /// First listed author, or "Unknown Author".
    pub author: String,
    /// At most two subject labels, never empty.
    pub subjects: Vec<String>,
    /// Cover image, or the placeholder when the record has none.
    pub cover_url: String,
    /// Shown if `cover_url` fails to load.
    pub fallback_cover_url: String,
    /// Readable edition, if any.
    pub read_url: Option<String>,
}

impl From<&BookRecord> for BookCard {
    fn from(book: &BookRecord) -> Self {
        let subjects = if book.subjects.is_empty() {
            vec![DEFAULT_SUBJECT.to_owned()]
        } else {
            book.subjects.iter().take(MAX_SUBJECTS).cloned().collect()
        };
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author_name().unwrap_or(UNKNOWN_AUTHOR).to_owned(),
            subjects,
            cover_url: book.cover_url().map_or_else(
                || format!("https://covers.openlibrary.org/b/id/{}-M.jpg", book.id),
                str::to_owned,
            ),
            fallback_cover_url: FALLBACK_COVER_URL.to_owned(),
            read_url: book.readable_url().map(str::to_owned),
        }
    }
}

/// Searches the catalog and renders cards.
pub struct LibraryBrowser {
    backend: Arc<dyn Backend>,
    view: Arc<dyn LibraryView>,
    notifier: Arc<dyn Notifier>,
    error_ttl: Duration,
}

impl LibraryBrowser {
    /// Create a browser that renders into `view`.
    pub fn new(
        backend: Arc<dyn Backend>,
        view: Arc<dyn LibraryView>,
        notifier: Arc<dyn Notifier>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            backend,
            view,
            notifier,
            error_ttl: config.error_notice_ttl(),
        }
    }

    /// Load books for `query`. A blank query sends no `search` parameter.
    ///
    /// Returns the rendered cards, or `None` if the request failed.
    pub async fn search(&self, query: &str) -> Option<Vec<BookCard>> {
        let query = query.trim();
        self.view.set_loading(true);
        self.view.clear_books();

        let filter = (!query.is_empty()).then_some(query);
        debug!(query = ?filter, "loading books");
        let result = self.backend.search_books(filter).await;
        self.view.set_loading(false);

        match result {
            Ok(page) => {
                let cards: Vec<BookCard> = page.results.iter().map(BookCard::from).collect();
                self.view.show_books(&cards);
                Some(cards)
            }
            Err(e) => {
                warn!("book search failed: {e}");
                self.view.show_error(LOAD_FAILURE_MESSAGE);
                None
            }
        }
    }

    /// Open a card's readable edition, or explain that there is none.
    pub fn read(&self, card: &BookCard) {
        match &card.read_url {
            Some(url) => self.view.open_external(url),
            None => self.notifier.notify(Notification {
                kind: NoticeKind::Error,
                message: NOT_READABLE_NOTICE.to_owned(),
                ttl: self.error_ttl,
            }),
        }
    }
}
