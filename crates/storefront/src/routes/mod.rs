//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog (public)
//! GET  /health                 - Health check
//!
//! # Cart
//! GET  /cart                   - Cart page (redirects to /login when anonymous)
//! POST /cart/add               - Add a book to the cart
//!
//! # Lists
//! POST /favorites/add          - Add a book to favorites
//! POST /saved-for-later/add    - Save a book for later
//!
//! # Auth
//! GET  /login                  - Login page (redirects to / when signed in)
//! POST /login                  - Login action
//! POST /logout                 - Logout action
//! ```
//!
//! Page layout is out of scope for this storefront core: page handlers
//! answer with JSON views and redirects, leaving presentation to the
//! consuming front end.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod lists;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the full storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/favorites/add", post(lists::add_to_favorites))
        .route("/saved-for-later/add", post(lists::add_to_saved_for_later))
}
