//! Client Error Types
//!
//! Every asynchronous client operation resolves to either its value or a
//! [`ClientError`]. None of these are fatal: a screen shows
//! [`ClientError::user_message`] as a transient notification and keeps its
//! previous, consistent state.

use thiserror::Error;

use crate::client::api::ApiError;
use crate::client::credentials::StorageError;
use crate::shared::error::SharedError;
use crate::shared::user::Role;

#[derive(Debug, Error)]
pub enum ClientError {
    /// A bearer operation was attempted without a session; nothing was sent
    #[error("Not authenticated")]
    MissingCredential,

    /// The session's role may not perform this operation; nothing was sent
    #[error("Operation requires the {required} role")]
    Forbidden { required: Role },

    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The owning task scope was torn down while the request was in flight
    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ClientError {
    /// Text suitable for a transient notification
    pub fn user_message(&self) -> String {
        match self {
            ClientError::MissingCredential => "No token found. Please login again.".to_string(),
            ClientError::Forbidden { .. } => "You are not allowed to do that.".to_string(),
            ClientError::Validation(e) => e.user_message(),
            ClientError::Api(e) => e.user_message(),
            ClientError::Cancelled => "Cancelled".to_string(),
            ClientError::Storage(_) => "Could not access saved login".to_string(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
