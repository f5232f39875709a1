/**
 * Backend REST API Client
 *
 * Typed wrappers around every endpoint the client consumes. Write requests
 * carry `Authorization: Bearer <credential>` and a JSON body; failures come
 * back as `{ "message": ... }` with a non-success status.
 */

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::client::config::Config;
use crate::client::credentials::Credential;
use crate::shared::catalog::{
    AdminStats, ApiMessage, Book, BookForm, Genre, GenreForm, Review, ReviewForm, Tutorial,
    TutorialForm,
};
use crate::shared::library::{LibraryEntry, LibraryUpsertRequest};
use crate::shared::user::{
    AuthResponse, LoginRequest, MeResponse, RegisterRequest, Role, RoleChangeRequest, UserInfo,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed: {status} - {message}")]
    Status { status: StatusCode, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for a transient notification
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Network error, please try again".to_string(),
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Decode(_) => "Unexpected response from server".to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Thin async client over the backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Config,
    client: Client,
}

impl ApiClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn request(&self, method: Method, path: &str, credential: Option<&Credential>) -> RequestBuilder {
        let url = self.config.api_url(path);
        debug!(%method, %url, authenticated = credential.is_some(), "api request");
        let builder = self.client.request(method, url);
        match credential {
            Some(credential) => builder.header(reqwest::header::AUTHORIZATION, credential.bearer()),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiMessage>(&body)
            .map(|m| m.message)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
        warn!(status = status.as_u16(), %message, "api request failed");
        Err(ApiError::Status { status, message })
    }

    async fn json<T: DeserializeOwned>(builder: RequestBuilder) -> ApiResult<T> {
        let response = Self::send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Lists degrade to empty when the body is not a JSON array
    async fn list<T: DeserializeOwned>(builder: RequestBuilder) -> ApiResult<Vec<T>> {
        let value: serde_json::Value = Self::json(builder).await?;
        if !value.is_array() {
            warn!("expected a JSON array, treating response as empty");
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn write<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        credential: &Credential,
        body: Option<&B>,
    ) -> ApiResult<()> {
        let mut builder = self.request(method, path, Some(credential));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Self::send(builder).await.map(|_| ())
    }

    // --- Auth ---

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        Self::json(self.request(Method::POST, "/api/auth/login", None).json(&body)).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<()> {
        Self::send(self.request(Method::POST, "/api/auth/register", None).json(request))
            .await
            .map(|_| ())
    }

    pub async fn me(&self, credential: &Credential) -> ApiResult<UserInfo> {
        let me: MeResponse =
            Self::json(self.request(Method::GET, "/api/users/me", Some(credential))).await?;
        Ok(me.into())
    }

    // --- Books ---

    pub async fn books(&self) -> ApiResult<Vec<Book>> {
        Self::list(self.request(Method::GET, "/api/books", None)).await
    }

    pub async fn book(&self, id: &str) -> ApiResult<Book> {
        Self::json(self.request(Method::GET, &format!("/api/books/{}", id), None)).await
    }

    pub async fn create_book(&self, credential: &Credential, form: &BookForm) -> ApiResult<()> {
        self.write(Method::POST, "/api/books", credential, Some(form)).await
    }

    pub async fn update_book(&self, credential: &Credential, id: &str, form: &BookForm) -> ApiResult<()> {
        self.write(Method::PUT, &format!("/api/books/{}", id), credential, Some(form))
            .await
    }

    pub async fn delete_book(&self, credential: &Credential, id: &str) -> ApiResult<()> {
        self.write::<()>(Method::DELETE, &format!("/api/books/{}", id), credential, None)
            .await
    }

    // --- Genres ---

    pub async fn genres(&self) -> ApiResult<Vec<Genre>> {
        Self::list(self.request(Method::GET, "/api/genres", None)).await
    }

    pub async fn create_genre(&self, credential: &Credential, name: &str) -> ApiResult<()> {
        let body = GenreForm { name: name.to_string() };
        self.write(Method::POST, "/api/genres", credential, Some(&body)).await
    }

    pub async fn update_genre(&self, credential: &Credential, id: &str, name: &str) -> ApiResult<()> {
        let body = GenreForm { name: name.to_string() };
        self.write(Method::PUT, &format!("/api/genres/{}", id), credential, Some(&body))
            .await
    }

    // --- Tutorials ---

    /// The endpoint is public; a credential is sent when one is available
    pub async fn tutorials(&self, credential: Option<&Credential>) -> ApiResult<Vec<Tutorial>> {
        Self::list(self.request(Method::GET, "/api/tutorials", credential)).await
    }

    pub async fn create_tutorial(&self, credential: &Credential, form: &TutorialForm) -> ApiResult<()> {
        self.write(Method::POST, "/api/tutorials", credential, Some(form)).await
    }

    pub async fn update_tutorial(
        &self,
        credential: &Credential,
        id: &str,
        form: &TutorialForm,
    ) -> ApiResult<()> {
        self.write(Method::PUT, &format!("/api/tutorials/{}", id), credential, Some(form))
            .await
    }

    pub async fn delete_tutorial(&self, credential: &Credential, id: &str) -> ApiResult<()> {
        self.write::<()>(Method::DELETE, &format!("/api/tutorials/{}", id), credential, None)
            .await
    }

    // --- Reviews ---

    pub async fn submit_review(
        &self,
        credential: &Credential,
        book_id: &str,
        form: &ReviewForm,
    ) -> ApiResult<()> {
        self.write(
            Method::POST,
            &format!("/api/reviews/books/{}", book_id),
            credential,
            Some(form),
        )
        .await
    }

    pub async fn approved_reviews(&self, book_id: &str) -> ApiResult<Vec<Review>> {
        Self::list(self.request(Method::GET, &format!("/api/reviews/books/{}", book_id), None)).await
    }

    pub async fn pending_reviews(&self, credential: &Credential) -> ApiResult<Vec<Review>> {
        Self::list(self.request(Method::GET, "/api/reviews/pending", Some(credential))).await
    }

    pub async fn approve_review(&self, credential: &Credential, id: &str) -> ApiResult<()> {
        self.write::<()>(
            Method::PATCH,
            &format!("/api/reviews/{}/approve", id),
            credential,
            None,
        )
        .await
    }

    pub async fn delete_review(&self, credential: &Credential, id: &str) -> ApiResult<()> {
        self.write::<()>(Method::DELETE, &format!("/api/reviews/{}", id), credential, None)
            .await
    }

    // --- Library ---

    pub async fn library_mine(&self, credential: &Credential) -> ApiResult<Vec<LibraryEntry>> {
        Self::list(self.request(Method::GET, "/api/library/me", Some(credential))).await
    }

    pub async fn upsert_library(
        &self,
        credential: &Credential,
        request: &LibraryUpsertRequest,
    ) -> ApiResult<()> {
        self.write(Method::POST, "/api/library", credential, Some(request))
            .await
    }

    pub async fn delete_library(&self, credential: &Credential, book_id: &str) -> ApiResult<()> {
        self.write::<()>(
            Method::DELETE,
            &format!("/api/library/{}", book_id),
            credential,
            None,
        )
        .await
    }

    // --- Admin ---

    pub async fn admin_stats(&self, credential: &Credential) -> ApiResult<AdminStats> {
        Self::json(self.request(Method::GET, "/api/admin/stats", Some(credential))).await
    }

    pub async fn admin_users(&self, credential: &Credential) -> ApiResult<Vec<UserInfo>> {
        Self::list(self.request(Method::GET, "/api/admin/users", Some(credential))).await
    }

    pub async fn change_role(&self, credential: &Credential, user_id: &str, role: Role) -> ApiResult<()> {
        let body = RoleChangeRequest { role };
        self.write(
            Method::PATCH,
            &format!("/api/admin/users/{}/role", user_id),
            credential,
            Some(&body),
        )
        .await
    }
}
