//! Admin Client
//!
//! Moderation and catalog management for signed-in admins. Every operation
//! checks the session first: no credential or a non-admin role fails before
//! any request is built. Writes that overwrite or destroy data ask a
//! [`Confirmer`] first, and every successful write re-fetches the affected
//! list, which is returned in [`AdminOutcome::Done`].

use std::future::Future;

use tracing::{debug, info, warn};

use crate::client::api::{ApiClient, ApiResult};
use crate::client::confirm::{ConfirmPrompt, Confirmer};
use crate::client::credentials::Credential;
use crate::client::error::{ClientError, ClientResult};
use crate::client::session::SessionView;
use crate::client::task::{ScopeHandle, TaskScope};
use crate::client::validators;
use crate::shared::catalog::{AdminStats, Book, BookForm, Genre, Review, Tutorial, TutorialForm};
use crate::shared::user::{Role, UserInfo};

/// Result of an admin write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminOutcome<T> {
    /// Written; carries the re-fetched list
    Done(T),
    /// The confirmer said no; nothing was sent
    Declined,
    /// Nothing to change; nothing was sent
    Unchanged,
}

impl<T> AdminOutcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, AdminOutcome::Done(_))
    }

    pub fn into_done(self) -> Option<T> {
        match self {
            AdminOutcome::Done(value) => Some(value),
            _ => None,
        }
    }
}

pub struct AdminClient {
    api: ApiClient,
    session: SessionView,
    scope: TaskScope,
}

impl AdminClient {
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

    /// Credential of the signed-in admin
    pub fn require_admin(&self) -> ClientResult<Credential> {
        let state = self.session.snapshot();
        let credential = state.credential().cloned().ok_or(ClientError::MissingCredential)?;
        if state.role() != Some(Role::Admin) {
            return Err(ClientError::Forbidden {
                required: Role::Admin,
            });
        }
        Ok(credential)
    }

    async fn call<T, F>(&self, request: F) -> ClientResult<T>
    where
        F: Future<Output = ApiResult<T>>,
    {
        Ok(self.scope.run(request).await??)
    }

    async fn degrade<T, F>(&self, what: &str, fetch: F) -> ClientResult<Vec<T>>
    where
        F: Future<Output = ApiResult<Vec<T>>>,
    {
        match self.scope.run(fetch).await? {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(error = %e, "failed to load {}", what);
                Ok(Vec::new())
            }
        }
    }

    // --- Overview ---

    pub async fn stats(&self) -> ClientResult<AdminStats> {
        let credential = self.require_admin()?;
        self.call(self.api.admin_stats(&credential)).await
    }

    // --- Users ---

    pub async fn users(&self) -> ClientResult<Vec<UserInfo>> {
        let credential = self.require_admin()?;
        self.degrade("users", self.api.admin_users(&credential)).await
    }

    pub async fn change_role(
        &self,
        user: &UserInfo,
        next: Role,
        confirmer: &dyn Confirmer,
    ) -> ClientResult<AdminOutcome<Vec<UserInfo>>> {
        let credential = self.require_admin()?;
        if user.role == next {
            debug!(user_id = %user.id, role = %next, "role unchanged, nothing to send");
            return Ok(AdminOutcome::Unchanged);
        }
        let prompt = ConfirmPrompt::new(
            "Change user role?",
            format!("Set role to \"{}\"?", next),
            "Yes, change",
        );
        if !confirmer.confirm(&prompt) {
            return Ok(AdminOutcome::Declined);
        }

        self.call(self.api.change_role(&credential, &user.id, next))
            .await?;
        info!(user_id = %user.id, role = %next, "role updated");
        Ok(AdminOutcome::Done(self.users().await?))
    }

    // --- Reviews ---

    pub async fn pending_reviews(&self) -> ClientResult<Vec<Review>> {
        let credential = self.require_admin()?;
        self.degrade("pending reviews", self.api.pending_reviews(&credential))
            .await
    }

    pub async fn approve_review(
        &self,
        id: &str,
        confirmer: &dyn Confirmer,
    ) -> ClientResult<AdminOutcome<Vec<Review>>> {
        let credential = self.require_admin()?;
        let prompt = ConfirmPrompt::new(
            "Approve this review?",
            "Once approved, it will be visible on the book details page.",
            "Approve",
        );
        if !confirmer.confirm(&prompt) {
            return Ok(AdminOutcome::Declined);
        }

        self.call(self.api.approve_review(&credential, id)).await?;
        info!(review_id = id, "review approved");
        Ok(AdminOutcome::Done(self.pending_reviews().await?))
    }

    pub async fn delete_review(
        &self,
        id: &str,
        confirmer: &dyn Confirmer,
    ) -> ClientResult<AdminOutcome<Vec<Review>>> {
        let credential = self.require_admin()?;
        let prompt = ConfirmPrompt::new(
            "Delete this review?",
            "This review will be permanently removed.",
            "Delete",
        );
        if !confirmer.confirm(&prompt) {
            return Ok(AdminOutcome::Declined);
        }

        self.call(self.api.delete_review(&credential, id)).await?;
        info!(review_id = id, "review deleted");
        Ok(AdminOutcome::Done(self.pending_reviews().await?))
    }

    // --- Books ---

    pub async fn books(&self) -> ClientResult<Vec<Book>> {
        self.degrade("books", self.api.books()).await
    }

    pub async fn create_book(&self, form: &BookForm) -> ClientResult<AdminOutcome<Vec<Book>>> {
        let credential = self.require_admin()?;
        validators::validate_book_form(form)?;

        self.call(self.api.create_book(&credential, form)).await?;
        info!(title = %form.title, "book created");
        Ok(AdminOutcome::Done(self.books().await?))
    }

    pub async fn update_book(
        &self,
        id: &str,
        form: &BookForm,
        confirmer: &dyn Confirmer,
    ) -> ClientResult<AdminOutcome<Vec<Book>>> {
        let credential = self.require_admin()?;
        validators::validate_book_form(form)?;
        let prompt = ConfirmPrompt::new(
            "Update this book?",
            "Changes will be saved immediately.",
            "Yes, update",
        );
        if !confirmer.confirm(&prompt) {
            return Ok(AdminOutcome::Declined);
        }

        self.call(self.api.update_book(&credential, id, form)).await?;
        info!(book_id = id, "book updated");
        Ok(AdminOutcome::Done(self.books().await?))
    }

    pub async fn delete_book(
        &self,
        id: &str,
        confirmer: &dyn Confirmer,
    ) -> ClientResult<AdminOutcome<Vec<Book>>> {
        let credential = self.require_admin()?;
        let prompt = ConfirmPrompt::new(
            "Delete this book?",
            "This book will be permanently removed.",
            "Yes, delete",
        );
        if !confirmer.confirm(&prompt) {
            return Ok(AdminOutcome::Declined);
        }

        self.call(self.api.delete_book(&credential, id)).await?;
        info!(book_id = id, "book deleted");
        Ok(AdminOutcome::Done(self.books().await?))
    }

    // --- Genres ---

    pub async fn genres(&self) -> ClientResult<Vec<Genre>> {
        self.degrade("genres", self.api.genres()).await
    }

    pub async fn create_genre(&self, name: &str) -> ClientResult<AdminOutcome<Vec<Genre>>> {
        let credential = self.require_admin()?;
        validators::validate_genre_name(name)?;

        self.call(self.api.create_genre(&credential, name.trim()))
            .await?;
        info!(name = name.trim(), "genre created");
        Ok(AdminOutcome::Done(self.genres().await?))
    }

    pub async fn update_genre(
        &self,
        genre: &Genre,
        name: &str,
        confirmer: &dyn Confirmer,
    ) -> ClientResult<AdminOutcome<Vec<Genre>>> {
        let credential = self.require_admin()?;
        validators::validate_genre_name(name)?;
        let name = name.trim();
        if genre.name == name {
            return Ok(AdminOutcome::Unchanged);
        }
        let prompt = ConfirmPrompt::new(
            "Update this genre?",
            format!("Change \"{}\" to \"{}\"", genre.name, name),
            "Update",
        );
        if !confirmer.confirm(&prompt) {
            return Ok(AdminOutcome::Declined);
        }

        self.call(self.api.update_genre(&credential, &genre.id, name))
            .await?;
        info!(genre_id = %genre.id, name, "genre updated");
        Ok(AdminOutcome::Done(self.genres().await?))
    }

    // --- Tutorials ---

    pub async fn tutorials(&self) -> ClientResult<Vec<Tutorial>> {
        let credential = self.session.credential();
        self.degrade("tutorials", self.api.tutorials(credential.as_ref()))
            .await
    }

    pub async fn create_tutorial(&self, form: &TutorialForm) -> ClientResult<AdminOutcome<Vec<Tutorial>>> {
        let credential = self.require_admin()?;
        validators::validate_tutorial_form(form)?;

        self.call(self.api.create_tutorial(&credential, form)).await?;
        info!(title = %form.title, "tutorial created");
        Ok(AdminOutcome::Done(self.tutorials().await?))
    }

    pub async fn update_tutorial(
        &self,
        id: &str,
        form: &TutorialForm,
        confirmer: &dyn Confirmer,
    ) -> ClientResult<AdminOutcome<Vec<Tutorial>>> {
        let credential = self.require_admin()?;
        validators::validate_tutorial_form(form)?;
        let prompt = ConfirmPrompt::new(
            "Update this tutorial?",
            "Changes will be saved immediately.",
            "Update",
        );
        if !confirmer.confirm(&prompt) {
            return Ok(AdminOutcome::Declined);
        }

        self.call(self.api.update_tutorial(&credential, id, form))
            .await?;
        info!(tutorial_id = id, "tutorial updated");
        Ok(AdminOutcome::Done(self.tutorials().await?))
    }

    pub async fn delete_tutorial(
        &self,
        id: &str,
        confirmer: &dyn Confirmer,
    ) -> ClientResult<AdminOutcome<Vec<Tutorial>>> {
        let credential = self.require_admin()?;
        let prompt = ConfirmPrompt::new(
            "Delete this tutorial?",
            "This will remove the tutorial from the list.",
            "Delete",
        );
        if !confirmer.confirm(&prompt) {
            return Ok(AdminOutcome::Declined);
        }

        self.call(self.api.delete_tutorial(&credential, id)).await?;
        info!(tutorial_id = id, "tutorial deleted");
        Ok(AdminOutcome::Done(self.tutorials().await?))
    }
}
