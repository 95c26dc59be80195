//! Cart route handlers.

use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use inkshelf_core::{BookId, Price};

use crate::error::Result;
use crate::models::{ListEntry, ListKind};
use crate::router::{Route, RouteOutcome, resolve};
use crate::routes::lists::{AddForm, add_to_list};
use crate::state::AppState;
use crate::store::Store;

/// Cart page data.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: usize,
}

/// One cart line, joined against the cached catalog. Books that have
/// left the catalog still show up by id so the entry is not silently
/// hidden.
#[derive(Debug, Serialize)]
pub struct CartItemView {
    pub book_id: BookId,
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<Price>,
    pub added_at: DateTime<Utc>,
}

impl CartItemView {
    fn project(entry: &ListEntry, store: &Store) -> Self {
        let book = store.book(entry.book_id);
        Self {
            book_id: entry.book_id,
            title: book.as_ref().map(|b| b.title.clone()),
            author: book.as_ref().map(|b| b.author.clone()),
            price: book.map(|b| b.price),
            added_at: entry.created_at,
        }
    }
}

/// `GET /cart` - redirects anonymous visitors to login.
///
/// Re-fetches the cart rows on view; a failed refresh is logged and
/// the last known-good entries keep rendering.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Response {
    let store = state.store();
    match resolve(Route::Cart, store.is_authenticated()) {
        RouteOutcome::Redirect(target) => Redirect::to(target.path()).into_response(),
        RouteOutcome::Render(_) => {
            if let Err(err) = state.actions().refresh_list(ListKind::Cart).await {
                tracing::warn!(error = %err, "cart refresh failed, serving cached entries");
            }

            let items: Vec<_> = store
                .cart_items()
                .iter()
                .map(|entry| CartItemView::project(entry, store))
                .collect();

            Json(CartView {
                item_count: items.len(),
                items,
            })
            .into_response()
        }
    }
}

/// `POST /cart/add` - add a book to the cart.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddForm>) -> Result<Response> {
    add_to_list(&state, ListKind::Cart, form.book_id).await
}
