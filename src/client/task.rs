//! Cancellable task scope.
//!
//! A screen owns one [`TaskScope`]; every request it issues runs through
//! [`TaskScope::run`]. Tearing the screen down (explicitly through a
//! [`ScopeHandle`], or by dropping the scope) cancels whatever is in flight and
//! its result is discarded.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::error::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct TaskScope {
    token: CancellationToken,
}

/// Cloneable remote control for a scope
#[derive(Debug, Clone)]
pub struct ScopeHandle {
    token: CancellationToken,
}

impl ScopeHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            token: self.token.clone(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancellation is permanent
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Run `future` unless the scope is, or becomes, cancelled
    pub async fn run<F, T>(&self, future: F) -> ClientResult<T>
    where
        F: Future<Output = T>,
    {
        if self.token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                debug!("task scope cancelled, discarding in-flight result");
                Err(ClientError::Cancelled)
            }
            output = future => Ok(output),
        }
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
