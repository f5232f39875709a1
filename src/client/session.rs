/**
 * Session Store
 *
 * Process-wide authentication state with a fixed protocol:
 *
 * - `restore()` runs at startup. No persisted credential resolves to
 *   anonymous at once; otherwise `GET /api/users/me` decides. Every failure
 *   path clears the persisted credential and ends anonymous.
 * - `login()` exchanges email and password for a credential, persists it and
 *   reports success as a plain `bool`. Failures leave the state untouched.
 * - `logout()` clears the persisted credential and the user, then navigates
 *   to the login screen. It is idempotent.
 *
 * The application root owns the single `SessionStore`. Guards and data
 * screens hold a `SessionView`, which can read and await changes but never
 * mutate.
 */

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::api::{ApiClient, ApiError};
use crate::client::credentials::{Credential, CredentialStore};
use crate::client::error::{ClientError, ClientResult};
use crate::client::routes::{Navigator, Route};
use crate::client::validators;
use crate::shared::user::{RegisterRequest, Role, UserInfo};

/// Exactly one of restoring, anonymous or authenticated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Restoring,
    Anonymous,
    Authenticated { user: UserInfo, credential: Credential },
}

impl SessionState {
    pub fn loading(&self) -> bool {
        matches!(self, SessionState::Restoring)
    }

    pub fn user(&self) -> Option<&UserInfo> {
        match self {
            SessionState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn credential(&self) -> Option<&Credential> {
        match self {
            SessionState::Authenticated { credential, .. } => Some(credential),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }
}

/// Read-only handle on the session
#[derive(Debug, Clone)]
pub struct SessionView {
    rx: watch::Receiver<SessionState>,
}

impl SessionView {
    pub fn snapshot(&self) -> SessionState {
        self.rx.borrow().clone()
    }

    pub fn loading(&self) -> bool {
        self.rx.borrow().loading()
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.rx.borrow().user().cloned()
    }

    pub fn credential(&self) -> Option<Credential> {
        self.rx.borrow().credential().cloned()
    }

    /// Wait for the next state change
    pub async fn changed(&mut self) -> Option<SessionState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Wait until restoration has finished
    pub async fn settled(&mut self) -> SessionState {
        match self.rx.wait_for(|state| !state.loading()).await {
            Ok(state) => state.clone(),
            Err(_) => SessionState::Anonymous,
        }
    }
}

/// Single owning instance of the session
pub struct SessionStore {
    api: ApiClient,
    storage: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// New store in the restoring state; call [`SessionStore::restore`] next
    pub fn new(
        api: ApiClient,
        storage: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Restoring);
        Self {
            api,
            storage,
            navigator,
            state,
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            rx: self.state.subscribe(),
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn set(&self, next: SessionState) {
        self.state.send_replace(next);
    }

    fn forget_persisted(&self) {
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "failed to clear persisted credential");
        }
    }

    /// Resolve the persisted credential into a user; never fails outward
    pub async fn restore(&self) -> SessionState {
        self.set(SessionState::Restoring);

        let credential = match self.storage.load() {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                debug!("no persisted credential, session is anonymous");
                self.set(SessionState::Anonymous);
                return self.snapshot();
            }
            Err(e) => {
                warn!(error = %e, "cannot read persisted credential, session is anonymous");
                self.set(SessionState::Anonymous);
                return self.snapshot();
            }
        };

        match self.api.me(&credential).await {
            Ok(user) => {
                info!(user_id = %user.id, role = %user.role, "session restored");
                self.set(SessionState::Authenticated { user, credential });
            }
            Err(e) => {
                warn!(error = %e, "session restoration failed, clearing credential");
                self.forget_persisted();
                self.set(SessionState::Anonymous);
            }
        }
        self.snapshot()
    }

    /// Exchange email and password for a session
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let auth = match self.api.login(email, password).await {
            Ok(auth) => auth,
            Err(e) => {
                warn!(error = %e, "login failed");
                return false;
            }
        };

        let credential = Credential::new(auth.token);
        if let Err(e) = self.storage.save(&credential) {
            warn!(error = %e, "login succeeded but the credential could not be persisted");
            return false;
        }

        info!(user_id = %auth.user.id, role = %auth.user.role, "logged in");
        self.set(SessionState::Authenticated {
            user: auth.user,
            credential,
        });
        true
    }

    /// Clear the session and go to the login screen
    pub fn logout(&self) {
        self.forget_persisted();
        if self.snapshot().user().is_some() {
            info!("logged out");
        }
        self.set(SessionState::Anonymous);
        self.navigator.navigate(Route::Login);
    }

    /// Create an account; never signs in
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        photo: &str,
    ) -> ClientResult<()> {
        validators::validate_registration(name, email, password, photo)?;

        let request = RegisterRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            photo: photo.trim().to_string(),
        };
        match self.api.register(&request).await {
            Ok(()) => {
                info!(email = %request.email, "account registered");
                Ok(())
            }
            Err(ApiError::Status { status, .. }) if status == reqwest::StatusCode::CONFLICT => {
                Err(ClientError::Api(ApiError::Status {
                    status,
                    message: "Email already exists".to_string(),
                }))
            }
            Err(e) => Err(e.into()),
        }
    }
}
