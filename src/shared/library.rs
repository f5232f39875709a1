//! Reading shelf types
//!
//! A [`LibraryEntry`] is the `(book, shelf, progress)` record the backend keeps
//! for one user and one book.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::error::SharedError;

/// Highest reading progress, in percent
pub const MAX_PROGRESS: u8 = 100;

/// Categorical reading status of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shelf {
    Want,
    Current,
    Read,
}

impl Shelf {
    pub const ALL: [Shelf; 3] = [Shelf::Want, Shelf::Current, Shelf::Read];

    pub fn as_str(self) -> &'static str {
        match self {
            Shelf::Want => "want",
            Shelf::Current => "current",
            Shelf::Read => "read",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Shelf::Want => "Want to Read",
            Shelf::Current => "Currently Reading",
            Shelf::Read => "Completed",
        }
    }
}

impl fmt::Display for Shelf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shelf {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "want" => Ok(Shelf::Want),
            "current" => Ok(Shelf::Current),
            "read" => Ok(Shelf::Read),
            other => Err(SharedError::unknown_variant("shelf", other, "want, current or read")),
        }
    }
}

/// Book fields the backend embeds when it populates a library entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, rename = "coverImage")]
    pub cover_image: String,
}

/// The `bookId` field: either a bare id or the populated book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookRef {
    Populated(BookSummary),
    Id(String),
}

impl BookRef {
    pub fn id(&self) -> &str {
        match self {
            BookRef::Populated(book) => &book.id,
            BookRef::Id(id) => id,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            BookRef::Populated(book) if !book.title.is_empty() => Some(&book.title),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "bookId")]
    pub book: BookRef,
    pub shelf: Shelf,
    #[serde(default)]
    pub progress: u8,
}

impl LibraryEntry {
    pub fn book_id(&self) -> &str {
        self.book.id()
    }
}

/// Fields of an entry a single upsert may change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShelfPatch {
    pub shelf: Option<Shelf>,
    pub progress: Option<u8>,
}

impl ShelfPatch {
    pub fn shelf(shelf: Shelf) -> Self {
        Self {
            shelf: Some(shelf),
            progress: None,
        }
    }

    pub fn progress(progress: u8) -> Self {
        Self {
            shelf: None,
            progress: Some(progress),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shelf.is_none() && self.progress.is_none()
    }

    /// A move to `read` without a progress value finishes the book
    pub fn finishing_read(self) -> Self {
        match (self.shelf, self.progress) {
            (Some(Shelf::Read), None) => Self {
                progress: Some(MAX_PROGRESS),
                ..self
            },
            _ => self,
        }
    }
}

/// Body of `POST /api/library`
#[derive(Debug, Clone, Serialize)]
pub struct LibraryUpsertRequest {
    #[serde(rename = "bookId")]
    pub book_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shelf: Option<Shelf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}

impl LibraryUpsertRequest {
    pub fn new(book_id: impl Into<String>, patch: ShelfPatch) -> Self {
        Self {
            book_id: book_id.into(),
            shelf: patch.shelf,
            progress: patch.progress,
        }
    }
}

/// Entry counts per shelf
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShelfStats {
    pub want: usize,
    pub current: usize,
    pub read: usize,
}

impl ShelfStats {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a LibraryEntry>) -> Self {
        entries
            .into_iter()
            .fold(Self::default(), |mut stats, entry| {
                match entry.shelf {
                    Shelf::Want => stats.want += 1,
                    Shelf::Current => stats.current += 1,
                    Shelf::Read => stats.read += 1,
                }
                stats
            })
    }

    pub fn total(&self) -> usize {
        self.want + self.current + self.read
    }
}
