//! Catalog, review and tutorial screens
//!
//! Read paths degrade to an empty list when the backend fails or answers with
//! something other than an array. Browse filtering, pagination and the
//! dashboard summary are plain functions over already-fetched data.

use std::future::Future;

use tracing::{info, warn};

use crate::client::api::{ApiClient, ApiResult};
use crate::client::credentials::Credential;
use crate::client::error::{ClientError, ClientResult};
use crate::client::library::LibraryModel;
use crate::client::session::SessionView;
use crate::client::task::{ScopeHandle, TaskScope};
use crate::client::validators;
use crate::shared::catalog::{Book, Genre, Review, ReviewForm, Tutorial};
use crate::shared::library::{LibraryEntry, ShelfStats};

/// How many unread books the dashboard suggests
pub const RECOMMENDATION_COUNT: usize = 6;

pub struct CatalogClient {
    api: ApiClient,
    session: SessionView,
    scope: TaskScope,
}

impl CatalogClient {
    pub fn new(api: ApiClient, session: SessionView) -> Self {
        Self {
            api,
            session,
            scope: TaskScope::new(),
        }
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn teardown(&self) {
        self.scope.cancel();
    }

    async fn degrade<T, F>(&self, what: &str, fetch: F) -> ClientResult<Vec<T>>
    where
        F: Future<Output = ApiResult<Vec<T>>>,
    {
        match self.scope.run(fetch).await? {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(error = %e, "failed to load {}, showing none", what);
                Ok(Vec::new())
            }
        }
    }

    pub async fn books(&self) -> ClientResult<Vec<Book>> {
        self.degrade("books", self.api.books()).await
    }

    pub async fn genres(&self) -> ClientResult<Vec<Genre>> {
        self.degrade("genres", self.api.genres()).await
    }

    /// Book details; a missing book is an error rather than an empty page
    pub async fn book(&self, id: &str) -> ClientResult<Book> {
        Ok(self.scope.run(self.api.book(id)).await??)
    }

    /// Tutorials are public; the credential is sent when there is one
    pub async fn tutorials(&self) -> ClientResult<Vec<Tutorial>> {
        let credential = self.session.credential();
        self.degrade("tutorials", self.api.tutorials(credential.as_ref()))
            .await
    }

    pub async fn approved_reviews(&self, book_id: &str) -> ClientResult<Vec<Review>> {
        self.degrade("reviews", self.api.approved_reviews(book_id)).await
    }

    /// Reviews enter moderation as pending
    pub async fn submit_review(&self, book_id: &str, rating: u8, comment: &str) -> ClientResult<()> {
        let credential: Credential = self.session.credential().ok_or(ClientError::MissingCredential)?;
        validators::validate_review(rating, comment)?;

        let form = ReviewForm {
            rating,
            comment: comment.trim().to_string(),
        };
        self.scope
            .run(self.api.submit_review(&credential, book_id, &form))
            .await??;
        info!(book_id, rating, "review submitted");
        Ok(())
    }

    /// Catalog and library together, summarised
    pub async fn dashboard(&self, library: &mut LibraryModel) -> ClientResult<Dashboard> {
        let books = self.books().await?;
        let entries = library.fetch_mine().await?;
        Ok(Dashboard::build(&books, entries))
    }
}

/// Browse screen filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseFilter {
    /// Case-insensitive substring of title or author
    pub query: String,
    /// Exact genre name; `None` means all genres
    pub genre: Option<String>,
}

impl BrowseFilter {
    pub fn new(query: impl Into<String>, genre: Option<String>) -> Self {
        Self {
            query: query.into(),
            genre: genre.filter(|g| !g.is_empty()),
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        let query = self.query.trim().to_lowercase();
        let matches_query = query.is_empty()
            || book.title.to_lowercase().contains(&query)
            || book.author.to_lowercase().contains(&query);
        let matches_genre = match &self.genre {
            Some(genre) => book.genre == *genre,
            None => true,
        };
        matches_query && matches_genre
    }
}

pub fn filter_books<'a>(books: &'a [Book], filter: &BrowseFilter) -> Vec<&'a Book> {
    books.iter().filter(|b| filter.matches(b)).collect()
}

/// Tutorials whose title or description contains `query`
pub fn filter_tutorials<'a>(tutorials: &'a [Tutorial], query: &str) -> Vec<&'a Tutorial> {
    let query = query.trim().to_lowercase();
    tutorials
        .iter()
        .filter(|t| {
            query.is_empty()
                || t.title.to_lowercase().contains(&query)
                || t.description.to_lowercase().contains(&query)
        })
        .collect()
}

/// One page of a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, already clamped
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slice `items` into page `page`, clamped to `1..=total_pages`
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());

    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        total_pages,
        total_items: items.len(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub stats: ShelfStats,
    pub recommendations: Vec<Book>,
}

impl Dashboard {
    /// First books of the catalog the user has not shelved yet
    pub fn build(books: &[Book], library: &[LibraryEntry]) -> Self {
        let recommendations = books
            .iter()
            .filter(|book| !library.iter().any(|e| e.book_id() == book.id))
            .take(RECOMMENDATION_COUNT)
            .cloned()
            .collect();
        Self {
            stats: ShelfStats::from_entries(library),
            recommendations,
        }
    }
}
