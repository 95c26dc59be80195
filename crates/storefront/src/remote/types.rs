//! Wire payloads for the remote data platform.
//!
//! Catalog and relation rows deserialize straight into the domain types
//! in [`crate::models`]; only auth payloads and error bodies need their
//! own shapes.

use serde::{Deserialize, Serialize};

use inkshelf_core::{BookId, Email, UserId};

/// Body of a single-row relation insert.
#[derive(Debug, Serialize)]
pub struct NewEntry {
    pub user_id: UserId,
    pub book_id: BookId,
}

/// Password-grant sign-in request.
#[derive(Debug, Serialize)]
pub struct SignInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Successful sign-in response.
#[derive(Debug, Deserialize)]
pub struct SignInResponse {
    pub access_token: String,
    pub user: AuthUser,
}

/// User object embedded in a session response.
#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub email: Email,
}

/// Error body returned by the platform.
///
/// The row API and the identity API use different field names, so all
/// are optional and the best available one wins.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl ApiErrorBody {
    /// Pick the most descriptive message available.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error_description).or(self.msg)
    }
}
