//! Catalog route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::models::Book;
use crate::state::AppState;
use crate::store::Store;

/// Catalog page data.
#[derive(Debug, Serialize)]
pub struct CatalogView {
    pub signed_in: bool,
    pub books: Vec<BookView>,
}

/// One catalog card: the book plus its three membership affordances,
/// used to disable controls for lists the book is already on.
#[derive(Debug, Serialize)]
pub struct BookView {
    #[serde(flatten)]
    pub book: Book,
    pub in_cart: bool,
    pub in_favorites: bool,
    pub in_saved_for_later: bool,
}

impl BookView {
    fn project(book: Book, store: &Store) -> Self {
        let id = book.id;
        Self {
            book,
            in_cart: store.is_in_cart(id),
            in_favorites: store.is_in_favorites(id),
            in_saved_for_later: store.is_in_saved_for_later(id),
        }
    }
}

/// `GET /` - the catalog, newest first.
///
/// Triggers a catalog fetch on every view. A failed fetch is logged
/// and the last known-good collection keeps rendering; the catalog
/// never goes blank because the backend had a bad moment.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<CatalogView> {
    if let Err(err) = state.actions().fetch_catalog().await {
        tracing::warn!(error = %err, "catalog fetch failed, serving cached books");
    }

    let store = state.store();
    let books = store
        .books()
        .into_iter()
        .map(|book| BookView::project(book, store))
        .collect();

    Json(CatalogView {
        signed_in: store.is_authenticated(),
        books,
    })
}
