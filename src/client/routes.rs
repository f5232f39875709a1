//! Screen routes and navigation.
//!
//! Every screen of the application is a [`Route`]. Each route carries a static
//! [`RouteAccess`] rule, and each [`Role`] has a fixed landing screen and a fixed
//! set of navigation links. The guards read these tables instead of comparing
//! role strings per screen.
//!
//! Navigation itself is a side effect behind the [`Navigator`] trait so guard
//! decisions can be tested without a UI.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::shared::user::Role;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Browse,
    MyLibrary,
    Tutorials,
    Profile,
    BookDetails(String),
    AdminDashboard,
    AdminBooks,
    AdminGenres,
    AdminReviews,
    AdminTutorials,
    AdminUsers,
    Forbidden,
}

/// Precondition a visitor must meet before a screen renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anyone
    Open,
    /// Only visitors without a session (login, register)
    PublicOnly,
    /// Any signed-in visitor
    Authenticated,
    /// Signed-in visitors holding this role
    Role(Role),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::BookDetails(id) => format!("/books/{}", id),
            other => other.static_path().to_string(),
        }
    }

    fn static_path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Browse => "/browse",
            Route::MyLibrary => "/my-library",
            Route::Tutorials => "/tutorials",
            Route::Profile => "/profile",
            Route::BookDetails(_) => "/books",
            Route::AdminDashboard => "/admin/dashboard",
            Route::AdminBooks => "/admin/books",
            Route::AdminGenres => "/admin/genres",
            Route::AdminReviews => "/admin/reviews",
            Route::AdminTutorials => "/admin/tutorials",
            Route::AdminUsers => "/admin/users",
            Route::Forbidden => "/forbidden",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        if let Some(id) = normalized.strip_prefix("/books/") {
            return (!id.is_empty() && !id.contains('/')).then(|| Route::BookDetails(id.to_string()));
        }

        let route = match normalized {
            "/" => Route::Home,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/dashboard" => Route::Dashboard,
            "/browse" => Route::Browse,
            "/my-library" => Route::MyLibrary,
            "/tutorials" => Route::Tutorials,
            "/profile" => Route::Profile,
            "/admin/dashboard" => Route::AdminDashboard,
            "/admin/books" => Route::AdminBooks,
            "/admin/genres" => Route::AdminGenres,
            "/admin/reviews" => Route::AdminReviews,
            "/admin/tutorials" => Route::AdminTutorials,
            "/admin/users" => Route::AdminUsers,
            "/forbidden" => Route::Forbidden,
            _ => return None,
        };
        Some(route)
    }

    pub fn access(&self) -> RouteAccess {
        match self {
            Route::Home | Route::BookDetails(_) | Route::Forbidden => RouteAccess::Open,
            Route::Login | Route::Register => RouteAccess::PublicOnly,
            Route::Dashboard
            | Route::Browse
            | Route::MyLibrary
            | Route::Tutorials
            | Route::Profile => RouteAccess::Authenticated,
            Route::AdminDashboard
            | Route::AdminBooks
            | Route::AdminGenres
            | Route::AdminReviews
            | Route::AdminTutorials
            | Route::AdminUsers => RouteAccess::Role(Role::Admin),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Screen a freshly signed-in visitor lands on
pub fn landing_route(role: Role) -> Route {
    match role {
        Role::Admin => Route::AdminDashboard,
        Role::User => Route::Dashboard,
    }
}

/// Navigation bar entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub route: Route,
    pub label: &'static str,
}

static USER_LINKS: [NavLink; 4] = [
    NavLink { route: Route::Dashboard, label: "Dashboard" },
    NavLink { route: Route::Browse, label: "Browse Books" },
    NavLink { route: Route::MyLibrary, label: "My Library" },
    NavLink { route: Route::Tutorials, label: "Tutorials" },
];

static ADMIN_LINKS: [NavLink; 6] = [
    NavLink { route: Route::AdminDashboard, label: "Dashboard" },
    NavLink { route: Route::AdminBooks, label: "Books" },
    NavLink { route: Route::AdminGenres, label: "Genres" },
    NavLink { route: Route::AdminReviews, label: "Reviews" },
    NavLink { route: Route::AdminTutorials, label: "Tutorials" },
    NavLink { route: Route::AdminUsers, label: "Users" },
];

/// Navigation links offered to a role
pub fn allowed_routes(role: Role) -> &'static [NavLink] {
    match role {
        Role::Admin => &ADMIN_LINKS,
        Role::User => &USER_LINKS,
    }
}

/// Navigation side effect; fire-and-forget
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that only records where it was sent
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    history: Arc<Mutex<Vec<Route>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Route> {
        self.history.lock().ok().and_then(|h| h.last().cloned())
    }

    pub fn clear(&self) {
        if let Ok(mut history) = self.history.lock() {
            history.clear();
        }
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        if let Ok(mut history) = self.history.lock() {
            history.push(route);
        }
    }
}
