//! Add-to-list route handlers shared by cart, favorites, and
//! saved-for-later.

use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use inkshelf_core::BookId;

use crate::actions::AddOutcome;
use crate::error::Result;
use crate::models::ListKind;
use crate::state::AppState;

/// Add-to-list form data.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub book_id: BookId,
}

/// Typed outcome reported back to the view.
#[derive(Debug, Serialize)]
pub struct AddResponse {
    pub status: &'static str,
}

impl From<AddOutcome> for AddResponse {
    fn from(outcome: AddOutcome) -> Self {
        let status = match outcome {
            AddOutcome::Added => "added",
            AddOutcome::AlreadyListed => "already_listed",
            AddOutcome::InFlight => "in_flight",
            AddOutcome::SignedOut => "signed_out",
        };
        Self { status }
    }
}

/// Shared handler body: run the add action and report its outcome.
pub async fn add_to_list(state: &AppState, kind: ListKind, book_id: BookId) -> Result<Response> {
    let outcome = state.actions().add_to_list(kind, book_id).await?;
    Ok(Json(AddResponse::from(outcome)).into_response())
}

/// `POST /favorites/add` - add a book to favorites.
#[instrument(skip(state))]
pub async fn add_to_favorites(
    State(state): State<AppState>,
    Form(form): Form<AddForm>,
) -> Result<Response> {
    add_to_list(&state, ListKind::Favorites, form.book_id).await
}

/// `POST /saved-for-later/add` - save a book for later.
#[instrument(skip(state))]
pub async fn add_to_saved_for_later(
    State(state): State<AppState>,
    Form(form): Form<AddForm>,
) -> Result<Response> {
    add_to_list(&state, ListKind::SavedForLater, form.book_id).await
}
