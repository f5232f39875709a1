//! Catalog, review, tutorial and admin wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::library::BookRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "coverImage")]
    pub cover_image: String,
}

/// Create/update body for `/api/books`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    #[serde(rename = "coverImage")]
    pub cover_image: String,
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            description: book.description.clone(),
            cover_image: book.cover_image.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenreForm {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutorial {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, rename = "youtubeUrl", alias = "videoUrl")]
    pub youtube_url: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TutorialForm {
    pub title: String,
    #[serde(rename = "youtubeUrl")]
    pub youtube_url: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Pending,
    Approved,
}

/// Reviewer as embedded by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewAuthor {
    Populated {
        #[serde(default)]
        name: String,
        #[serde(default)]
        email: String,
    },
    Id(String),
}

impl ReviewAuthor {
    pub fn display(&self) -> &str {
        match self {
            ReviewAuthor::Populated { email, .. } if !email.is_empty() => email,
            ReviewAuthor::Populated { name, .. } if !name.is_empty() => name,
            _ => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "bookId")]
    pub book: Option<BookRef>,
    #[serde(default, rename = "userId")]
    pub author: Option<ReviewAuthor>,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default = "pending")]
    pub status: ReviewStatus,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

fn pending() -> ReviewStatus {
    ReviewStatus::Pending
}

/// Body of `POST /api/reviews/books/:id`
#[derive(Debug, Clone, Serialize)]
pub struct ReviewForm {
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct AdminStats {
    #[serde(default, rename = "totalBooks")]
    pub total_books: u64,
    #[serde(default, rename = "totalUsers")]
    pub total_users: u64,
    #[serde(default, rename = "pendingReviews")]
    pub pending_reviews: u64,
}

/// Failure body the backend sends with non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}
