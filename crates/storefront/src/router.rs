//! Route table and auth gate.
//!
//! Three routes: catalog (public), login (signed-in users are sent back
//! to the catalog), cart (anonymous users are sent to login). The gate
//! is a pure function of `(route, authenticated)` evaluated before any
//! rendering happens - never a side effect of rendering itself.

/// The storefront's three routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Catalog,
    Login,
    Cart,
}

impl Route {
    /// Map a URL path to a route. No query parameters or deep links;
    /// exact path matching only.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Self::Catalog),
            "/login" => Some(Self::Login),
            "/cart" => Some(Self::Cart),
            _ => None,
        }
    }

    /// The path this route is served at.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Catalog => "/",
            Self::Login => "/login",
            Self::Cart => "/cart",
        }
    }
}

/// Result of gating a route on auth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Render the requested route.
    Render(Route),
    /// Redirect to another route instead.
    Redirect(Route),
}

/// Resolve a route against the presence of an authenticated user.
#[must_use]
pub const fn resolve(route: Route, authenticated: bool) -> RouteOutcome {
    match (route, authenticated) {
        // Login is pointless once signed in
        (Route::Login, true) => RouteOutcome::Redirect(Route::Catalog),
        // The cart belongs to a signed-in user
        (Route::Cart, false) => RouteOutcome::Redirect(Route::Login),
        (route, _) => RouteOutcome::Render(route),
    }
}
