//! Route guards.
//!
//! A guard maps the current [`SessionState`] to a [`GuardDecision`]. The
//! mapping is a pure function, re-evaluated on every session change; the only
//! side effect, navigation on a redirect, happens in [`enforce`] through an
//! injected [`Navigator`].
//!
//! | session                          | protected              | public-only       |
//! |----------------------------------|------------------------|-------------------|
//! | restoring                        | loading                | loading           |
//! | anonymous                        | redirect `/login`      | render            |
//! | signed in, role matches or none  | render                 | redirect landing  |
//! | signed in, role mismatch         | redirect (policy)      | redirect landing  |

use tracing::debug;

use crate::client::routes::{landing_route, Navigator, Route, RouteAccess};
use crate::client::session::{SessionState, SessionView};
use crate::shared::config::RoleMismatchPolicy;
use crate::shared::user::Role;

/// Where a protected screen stands relative to its precondition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Restoring,
    Unauthenticated,
    Authorized,
    Unauthorized,
}

/// What the wrapped screen should do right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show a neutral loading indicator; no navigation
    Loading,
    /// Render the wrapped content unchanged
    Render,
    /// Render nothing and navigate away
    Redirect(Route),
}

impl GuardDecision {
    pub fn renders_content(&self) -> bool {
        matches!(self, GuardDecision::Render)
    }
}

pub fn protected_state(session: &SessionState, required: Option<Role>) -> GuardState {
    match session {
        SessionState::Restoring => GuardState::Restoring,
        SessionState::Anonymous => GuardState::Unauthenticated,
        SessionState::Authenticated { user, .. } => match required {
            Some(role) if user.role != role => GuardState::Unauthorized,
            _ => GuardState::Authorized,
        },
    }
}

/// Gate for screens that need a session, optionally with a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProtectedGuard {
    pub required_role: Option<Role>,
    pub mismatch: RoleMismatchPolicy,
}

impl ProtectedGuard {
    pub fn any_user() -> Self {
        Self::default()
    }

    pub fn role(role: Role) -> Self {
        Self {
            required_role: Some(role),
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, mismatch: RoleMismatchPolicy) -> Self {
        self.mismatch = mismatch;
        self
    }

    pub fn decide(&self, session: &SessionState) -> GuardDecision {
        match protected_state(session, self.required_role) {
            GuardState::Restoring => GuardDecision::Loading,
            GuardState::Unauthenticated => GuardDecision::Redirect(Route::Login),
            GuardState::Unauthorized => GuardDecision::Redirect(match self.mismatch {
                RoleMismatchPolicy::Login => Route::Login,
                RoleMismatchPolicy::Forbidden => Route::Forbidden,
            }),
            GuardState::Authorized => GuardDecision::Render,
        }
    }
}

/// Inverse gate: keeps signed-in visitors away from login and register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublicOnlyGuard;

impl PublicOnlyGuard {
    pub fn decide(&self, session: &SessionState) -> GuardDecision {
        match session {
            SessionState::Restoring => GuardDecision::Loading,
            SessionState::Anonymous => GuardDecision::Render,
            SessionState::Authenticated { user, .. } => GuardDecision::Redirect(landing_route(user.role)),
        }
    }
}

/// `/` sends everyone somewhere else
pub fn home_redirect(session: &SessionState) -> GuardDecision {
    match session {
        SessionState::Restoring => GuardDecision::Loading,
        SessionState::Anonymous => GuardDecision::Redirect(Route::Login),
        SessionState::Authenticated { user, .. } => GuardDecision::Redirect(landing_route(user.role)),
    }
}

/// Guard chosen from a route's access rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuard {
    Open,
    Home,
    PublicOnly(PublicOnlyGuard),
    Protected(ProtectedGuard),
}

impl RouteGuard {
    pub fn for_route(route: &Route, mismatch: RoleMismatchPolicy) -> Self {
        if *route == Route::Home {
            return RouteGuard::Home;
        }
        match route.access() {
            RouteAccess::Open => RouteGuard::Open,
            RouteAccess::PublicOnly => RouteGuard::PublicOnly(PublicOnlyGuard),
            RouteAccess::Authenticated => {
                RouteGuard::Protected(ProtectedGuard::any_user().with_policy(mismatch))
            }
            RouteAccess::Role(role) => {
                RouteGuard::Protected(ProtectedGuard::role(role).with_policy(mismatch))
            }
        }
    }

    pub fn decide(&self, session: &SessionState) -> GuardDecision {
        match self {
            RouteGuard::Open => GuardDecision::Render,
            RouteGuard::Home => home_redirect(session),
            RouteGuard::PublicOnly(guard) => guard.decide(session),
            RouteGuard::Protected(guard) => guard.decide(session),
        }
    }

    /// Decide against the live session and perform any redirect
    pub fn check(&self, session: &SessionView, navigator: &dyn Navigator) -> GuardDecision {
        enforce(self.decide(&session.snapshot()), navigator)
    }
}

/// Perform the navigation a decision asks for; fire-and-forget
pub fn enforce(decision: GuardDecision, navigator: &dyn Navigator) -> GuardDecision {
    if let GuardDecision::Redirect(route) = &decision {
        debug!(to = %route, "guard redirect");
        navigator.navigate(route.clone());
    }
    decision
}
