//! Routes of the client and the navigator port used by actions.

use std::fmt;

/// Named routes of the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Tests,
    Login,
    Register,
    Accounts,
    TestsAdmin,
    Results,
    TestFull { test_id: String },
}

impl Route {
    /// All parameterless routes, in declaration order.
    pub const STATIC: [Route; 7] = [
        Route::Home,
        Route::Tests,
        Route::Login,
        Route::Register,
        Route::Accounts,
        Route::TestsAdmin,
        Route::Results,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Tests => "Tests",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Accounts => "Accounts",
            Route::TestsAdmin => "TestsAdmin",
            Route::Results => "Results",
            Route::TestFull { .. } => "TestFull",
        }
    }

    /// Concrete path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Tests => "/tests".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Accounts => "/accounts".to_string(),
            Route::TestsAdmin => "/tests_admin".to_string(),
            Route::Results => "/results".to_string(),
            Route::TestFull { test_id } => format!("/test/{}", test_id),
        }
    }

    /// Whether the view behind this route is meant for authenticated users only.
    ///
    /// This is metadata for the presentation layer; nothing here enforces it.
    pub fn requires_login(&self) -> bool {
        matches!(self, Route::Accounts | Route::TestsAdmin | Route::Results)
    }

    /// Resolves a path back to its route.
    pub fn from_path(path: &str) -> Option<Route> {
        if let Some(test_id) = path.strip_prefix("/test/") {
            if test_id.is_empty() || test_id.contains('/') {
                return None;
            }
            return Some(Route::TestFull {
                test_id: test_id.to_string(),
            });
        }
        Route::STATIC.into_iter().find(|route| route.path() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.path())
    }
}

/// Receives navigation requests issued by actions (e.g. back to login after logout).
pub trait Navigator: Send + Sync {
    fn push(&self, route: Route);
}
