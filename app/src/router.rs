//! Route table and navigation state.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A page the application can show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/signup`
    SignUp,
    /// `/login` (also `/`)
    #[default]
    Login,
    /// `/create-tweet`
    CreateTweet,
    /// `/tweets`
    Tweets,
    /// `/change-password`
    ChangePassword,
}

impl Route {
    /// Every route, in navigation-bar order
    pub const ALL: [Self; 5] = [
        Self::SignUp,
        Self::Login,
        Self::CreateTweet,
        Self::Tweets,
        Self::ChangePassword,
    ];

    /// Resolve a path; unknown paths are `None`
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
        match path {
            "/" | "/login" => Some(Self::Login),
            "/signup" => Some(Self::SignUp),
            "/create-tweet" => Some(Self::CreateTweet),
            "/tweets" => Some(Self::Tweets),
            "/change-password" => Some(Self::ChangePassword),
            _ => None,
        }
    }

    /// Canonical path
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::SignUp => "/signup",
            Self::Login => "/login",
            Self::CreateTweet => "/create-tweet",
            Self::Tweets => "/tweets",
            Self::ChangePassword => "/change-password",
        }
    }

    /// Navigation label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SignUp => "Sign Up",
            Self::Login => "Login",
            Self::CreateTweet => "Create Tweet",
            Self::Tweets => "Tweets",
            Self::ChangePassword => "Change Password",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Current route, observable by subscribers
///
/// Clones share the same navigation state.
#[derive(Debug, Clone)]
pub struct Router {
    current: Arc<watch::Sender<Route>>,
}

impl Router {
    /// Start at `initial`
    #[must_use]
    pub fn new(initial: Route) -> Self {
        let (current, _) = watch::channel(initial);
        Self {
            current: Arc::new(current),
        }
    }

    /// Route currently shown
    #[must_use]
    pub fn current(&self) -> Route {
        *self.current.borrow()
    }

    /// Observe route changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.current.subscribe()
    }

    /// Show `route` now
    pub fn navigate(&self, route: Route) {
        tracing::debug!(%route, "Navigating");
        self.current.send_replace(route);
    }

    /// Show the route for `path`; unknown paths leave the route unchanged
    pub fn navigate_path(&self, path: &str) -> Option<Route> {
        let route = Route::from_path(path)?;
        self.navigate(route);
        Some(route)
    }

    /// Show `route` after `delay`
    ///
    /// Must be called inside a Tokio runtime. Aborting the returned handle
    /// cancels the navigation.
    #[must_use = "the handle reports when the navigation happened"]
    pub fn navigate_after(&self, route: Route, delay: Duration) -> JoinHandle<()> {
        let router = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            router.navigate(route);
        })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::default())
    }
}
