//! Auth route handlers: login and logout.

use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::router::{Route, RouteOutcome, resolve};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Login page data.
#[derive(Debug, Serialize)]
pub struct LoginView {
    pub fields: [&'static str; 2],
    pub submit: &'static str,
}

/// `GET /login` - redirects to the catalog when already signed in.
#[instrument(skip(state))]
pub async fn login_page(State(state): State<AppState>) -> Response {
    match resolve(Route::Login, state.store().is_authenticated()) {
        RouteOutcome::Redirect(target) => Redirect::to(target.path()).into_response(),
        RouteOutcome::Render(_) => Json(LoginView {
            fields: ["email", "password"],
            submit: Route::Login.path(),
        })
        .into_response(),
    }
}

/// `POST /login` - exchange credentials for a session, hydrate the
/// relation lists, and land on the catalog.
#[instrument(skip(state, form))]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Result<Response> {
    let user = state.actions().sign_in(&form.email, &form.password).await?;
    tracing::info!(user_id = %user.id, "signed in");

    // Hydration is best-effort: a failed list fetch leaves that list
    // empty until the next refresh, which the UI tolerates.
    if let Err(err) = state.actions().refresh_lists().await {
        tracing::warn!(error = %err, "list hydration after sign-in failed");
    }

    Ok(Redirect::to(Route::Catalog.path()).into_response())
}

/// `POST /logout` - end the session.
///
/// The store user is cleared even when the remote sign-out fails; the
/// failure is only worth a warning.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Redirect {
    if let Err(err) = state.actions().sign_out().await {
        tracing::warn!(error = %err, "remote sign-out failed, local session cleared anyway");
    }
    Redirect::to(Route::Catalog.path())
}
