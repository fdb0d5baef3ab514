//! # joseai-library
//!
//! Static public-domain book catalog for the JoseAI library section.
//!
//! ## Design
//!
//! - Six fixed Project Gutenberg titles, built once at start-up
//! - Gutendex-compatible wire shape (`authors`, `subjects`, `formats`)
//! - Search and page parameters are accepted but never filter the result
//! - Queries are logged only at trace level

pub mod catalog;
pub mod types;

pub use catalog::Catalog;
pub use types::{BookPage, BookRecord, Person};

/// Search the built-in catalog.
///
/// Convenience wrapper around [`Catalog::search`] on [`Catalog::builtin`].
///
/// # Examples
///
/// ```
/// let page = joseai_library::search(Some("austen"), None);
/// assert_eq!(page.results.len(), 6);
/// assert!(page.next.is_none());
/// ```
pub fn search(query: Option<&str>, page: Option<&str>) -> BookPage {
    Catalog::builtin().search(query, page)
}
