//! The fixed public-domain catalog.
//!
//! Six Project Gutenberg titles with plain-text, HTML and cover links. The
//! catalog does not filter: every query sees the same single page.

use crate::types::{
    BookPage, BookRecord, FORMAT_COVER_JPEG, FORMAT_TEXT_HTML, FORMAT_TEXT_PLAIN, Person,
};
use std::collections::BTreeMap;

/// Base URL for Gutenberg file downloads.
const GUTENBERG_FILES: &str = "https://www.gutenberg.org/files";

/// Base URL for Gutenberg cover images.
const GUTENBERG_COVERS: &str = "https://www.gutenberg.org/cache/epub";

/// `(id, gutenberg ebook number, title, author, subjects)`
const ENTRIES: &[(u64, u32, &str, &str, [&str; 2])] = &[
    (1, 1342, "Pride and Prejudice", "Jane Austen", ["Fiction", "Romance"]),
    (
        2,
        11,
        "Alice's Adventures in Wonderland",
        "Lewis Carroll",
        ["Fiction", "Fantasy"],
    ),
    (3, 64317, "The Great Gatsby", "F. Scott Fitzgerald", ["Fiction", "Classic"]),
    (4, 2701, "Moby Dick", "Herman Melville", ["Fiction", "Adventure"]),
    (5, 1260, "Jane Eyre", "Charlotte Brontë", ["Fiction", "Romance"]),
    (6, 768, "Wuthering Heights", "Emily Brontë", ["Fiction", "Drama"]),
];

/// An immutable, in-memory book catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<BookRecord>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The built-in six-title catalog.
    pub fn builtin() -> Self {
        let books = ENTRIES
            .iter()
            .map(|&(id, ebook, title, author, subjects)| BookRecord {
                id,
                title: title.to_owned(),
                authors: vec![Person {
                    name: author.to_owned(),
                }],
                subjects: subjects.iter().map(|s| (*s).to_owned()).collect(),
                formats: gutenberg_formats(ebook),
            })
            .collect();
        Self { books }
    }

    /// All records in catalog order.
    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    /// Look up a record by its natural key.
    pub fn get(&self, id: u64) -> Option<&BookRecord> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Return the result page for a search.
    ///
    /// `query` and `page` are accepted for API compatibility and do not
    /// affect the result: the whole catalog is returned with no next page.
    pub fn search(&self, query: Option<&str>, page: Option<&str>) -> BookPage {
        tracing::trace!(?query, ?page, "catalog search");
        BookPage {
            results: self.books.clone(),
            next: None,
        }
    }
}

/// Build the download map for a Gutenberg ebook number.
fn gutenberg_formats(ebook: u32) -> BTreeMap<String, String> {
    let mut formats = BTreeMap::new();
    formats.insert(
        FORMAT_TEXT_PLAIN.to_owned(),
        format!("{GUTENBERG_FILES}/{ebook}/{ebook}-0.txt"),
    );
    formats.insert(
        FORMAT_TEXT_HTML.to_owned(),
        format!("{GUTENBERG_FILES}/{ebook}/{ebook}-h/{ebook}-h.htm"),
    );
    formats.insert(
        FORMAT_COVER_JPEG.to_owned(),
        format!("{GUTENBERG_COVERS}/{ebook}/pg{ebook}.cover.medium.jpg"),
    );
    formats
}
