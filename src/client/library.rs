//! Shelf / Library Model
//!
//! Mediates every read and write of the signed-in user's library. Shelf and
//! progress are the two mutable dimensions; both go through one upsert keyed
//! by book.
//!
//! # Consistency
//!
//! There is no optimistic update and no local merge. Each successful mutation
//! is followed by a full re-fetch that replaces the local list wholesale, so
//! the view always mirrors the server. Two racing mutations resolve as
//! last-response-wins.
//!
//! # Failure policy
//!
//! - No credential: [`ClientError::MissingCredential`], nothing is sent.
//! - Fetch failure or non-array body: the list degrades to empty.
//! - Mutation failure: the error is returned and the list is left as it was.
//! - Scope torn down: [`ClientError::Cancelled`], late results are dropped.
//!
//! # Progress and shelf
//!
//! Moving a book to [`Shelf::Read`] sets its progress to 100 in the same
//! request. Setting progress to 100 does not move the book to `read`.

use tracing::{debug, info, warn};

use crate::client::api::ApiClient;
use crate::client::confirm::{ConfirmPrompt, Confirmer};
use crate::client::credentials::Credential;
use crate::client::error::{ClientError, ClientResult};
use crate::client::session::SessionView;
use crate::client::task::{ScopeHandle, TaskScope};
use crate::client::validators;
use crate::shared::error::SharedError;
use crate::shared::library::{LibraryEntry, LibraryUpsertRequest, Shelf, ShelfPatch, ShelfStats};

pub struct LibraryModel {
    api: ApiClient,
    session: SessionView,
    scope: TaskScope,
    entries: Vec<LibraryEntry>,
}

impl LibraryModel {
    pub fn new(api: ApiClient, session: SessionView) -> Self {
        Self {
            api,
            session,
            scope: TaskScope::new(),
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    pub fn entry(&self, book_id: &str) -> Option<&LibraryEntry> {
        self.entries.iter().find(|e| e.book_id() == book_id)
    }

    pub fn stats(&self) -> ShelfStats {
        ShelfStats::from_entries(&self.entries)
    }

    pub fn on_shelf(&self, shelf: Shelf) -> impl Iterator<Item = &LibraryEntry> {
        self.entries.iter().filter(move |e| e.shelf == shelf)
    }

    /// Handle a screen keeps to cancel in-flight work on teardown
    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    pub fn teardown(&self) {
        self.scope.cancel();
    }

    fn credential(&self) -> ClientResult<Credential> {
        self.session.credential().ok_or(ClientError::MissingCredential)
    }

    /// Replace the local list with the server's
    pub async fn fetch_mine(&mut self) -> ClientResult<&[LibraryEntry]> {
        let credential = self.credential()?;
        self.refetch(&credential).await?;
        Ok(&self.entries)
    }

    async fn refetch(&mut self, credential: &Credential) -> ClientResult<()> {
        let fetched = self.scope.run(self.api.library_mine(credential)).await?;
        self.entries = match fetched {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "library fetch failed, showing an empty library");
                Vec::new()
            }
        };
        debug!(count = self.entries.len(), "library refreshed");
        Ok(())
    }

    /// Create or update the entry for `book_id`, then re-fetch.
    /// A patch moving to `read` without a progress value also sends progress 100.
    pub async fn upsert(&mut self, book_id: &str, patch: ShelfPatch) -> ClientResult<&[LibraryEntry]> {
        let credential = self.credential()?;
        let patch = patch.finishing_read();
        if book_id.trim().is_empty() {
            return Err(SharedError::validation("bookId", "Book id is required").into());
        }
        if patch.is_empty() {
            return Err(SharedError::validation("patch", "Nothing to update").into());
        }
        if let Some(progress) = patch.progress {
            validators::validate_progress(progress)?;
        }

        let request = LibraryUpsertRequest::new(book_id, patch);
        self.scope
            .run(self.api.upsert_library(&credential, &request))
            .await??;
        info!(book_id, shelf = ?patch.shelf, progress = ?patch.progress, "library entry saved");

        self.refetch(&credential).await?;
        Ok(&self.entries)
    }

    /// Move a book to `shelf`; `read` also sets progress to 100
    pub async fn set_shelf(&mut self, book_id: &str, shelf: Shelf) -> ClientResult<&[LibraryEntry]> {
        self.upsert(book_id, ShelfPatch::shelf(shelf)).await
    }

    /// Change progress only; the shelf is left alone
    pub async fn set_progress(&mut self, book_id: &str, value: u8) -> ClientResult<&[LibraryEntry]> {
        self.upsert(book_id, ShelfPatch::progress(value)).await
    }

    /// Remove a book after confirmation; `Ok(false)` when declined
    pub async fn remove(&mut self, book_id: &str, confirmer: &dyn Confirmer) -> ClientResult<bool> {
        let credential = self.credential()?;

        let title = self
            .entry(book_id)
            .and_then(|e| e.book.title())
            .map(|t| format!("Remove \"{}\" from your library?", t))
            .unwrap_or_else(|| "Remove this book from your library?".to_string());
        let prompt = ConfirmPrompt::new(title, "Its shelf and progress will be lost.", "Yes, remove");
        if !confirmer.confirm(&prompt) {
            debug!(book_id, "library removal declined");
            return Ok(false);
        }

        self.scope
            .run(self.api.delete_library(&credential, book_id))
            .await??;
        info!(book_id, "library entry removed");

        self.refetch(&credential).await?;
        Ok(true)
    }
}
