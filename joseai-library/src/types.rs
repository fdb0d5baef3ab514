//! Core types for catalog records and result pages.
//!
//! The wire shape follows the Gutendex book API: authors are objects with a
//! `name`, subjects are plain strings, and download links are keyed by MIME
//! type in `formats`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// MIME key for the plain-text edition of a book.
pub const FORMAT_TEXT_PLAIN: &str = "text/plain";

/// MIME key for the HTML edition of a book.
pub const FORMAT_TEXT_HTML: &str = "text/html";

/// MIME key for the cover image of a book.
pub const FORMAT_COVER_JPEG: &str = "image/jpeg";

/// A book author as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Display name of the author.
    pub name: String,
}

/// A single catalog entry.
///
/// Records are immutable once built; `id` is the natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Catalog identifier.
    pub id: u64,
    /// Book title.
    pub title: String,
    /// Authors in catalog order. May be empty.
    #[serde(default)]
    pub authors: Vec<Person>,
    /// Subject tags in catalog order. May be empty.
    #[serde(default)]
    pub subjects: Vec<String>,
    /// Download links keyed by MIME type.
    #[serde(default)]
    pub formats: BTreeMap<String, String>,
}

impl BookRecord {
    /// Name of the first listed author, if any.
    pub fn author_name(&self) -> Option<&str> {
        self.authors.first().map(|p| p.name.as_str())
    }

    /// Cover image URL from the `image/jpeg` format, if present.
    pub fn cover_url(&self) -> Option<&str> {
        self.formats.get(FORMAT_COVER_JPEG).map(String::as_str)
    }

    /// Best readable edition: plain text first, then HTML.
    pub fn readable_url(&self) -> Option<&str> {
        self.formats
            .get(FORMAT_TEXT_PLAIN)
            .or_else(|| self.formats.get(FORMAT_TEXT_HTML))
            .map(String::as_str)
    }
}

/// One page of catalog results.
///
/// `next` is the URL of the following page, or `None` on the last page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPage {
    /// Records on this page.
    pub results: Vec<BookRecord>,
    /// Link to the next page. Always serialized, as `null` when absent.
    #[serde(default)]
    pub next: Option<String>,
}
