//! Remote Data Service client.
//!
//! # Architecture
//!
//! - The hosted data platform is the source of truth - NO local
//!   persistence, direct API calls
//! - Row CRUD over the platform's REST surface (`rest/v1/{table}`),
//!   session auth over its identity endpoints (`auth/v1/*`)
//! - Row-level ownership filtering is enforced by the platform; the
//!   client only scopes queries by `user_id`
//!
//! The [`RemoteDataService`] trait is the seam between the action layer
//! and the network: production code uses [`RemoteClient`], tests use an
//! in-memory fake.
//!
//! # Example
//!
//! ```rust,ignore
//! use inkshelf_storefront::remote::{RemoteClient, RemoteDataService};
//!
//! let client = RemoteClient::new(&config.backend);
//!
//! // Catalog, newest first
//! let books = client.fetch_books().await?;
//!
//! // Sign in and add a book to the cart
//! let user = client.sign_in("reader@example.com", "hunter2!").await?;
//! let entry = client.insert_entry(ListKind::Cart, &user, books[0].id).await?;
//! ```

mod client;
mod types;

pub use client::RemoteClient;

use thiserror::Error;

use inkshelf_core::BookId;

use crate::models::{Book, CurrentUser, ListEntry, ListKind};

/// Errors that can occur when talking to the remote data platform.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Request URL could not be constructed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The platform rejected the request.
    #[error("backend error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Unique constraint violation: the row already exists upstream.
    #[error("duplicate row: {0}")]
    Conflict(String),

    /// Missing or invalid credentials for the requested rows.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limited by the platform.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// An insert with `return=representation` came back empty.
    #[error("insert returned no rows")]
    EmptyInsert,
}

/// Table CRUD and session auth exposed by the remote data platform.
///
/// Mirrors the contract the storefront consumes: catalog select,
/// per-user relation select/insert, password-grant sign-in, sign-out.
#[allow(async_fn_in_trait)]
pub trait RemoteDataService: Send + Sync {
    /// Fetch all catalog books, ordered by creation time descending.
    async fn fetch_books(&self) -> Result<Vec<Book>, RemoteError>;

    /// Fetch the relation rows of `kind` owned by `user`, newest first.
    async fn list_entries(
        &self,
        kind: ListKind,
        user: &CurrentUser,
    ) -> Result<Vec<ListEntry>, RemoteError>;

    /// Insert a single `(user, book)` row into the `kind` table and
    /// return the created row.
    async fn insert_entry(
        &self,
        kind: ListKind,
        user: &CurrentUser,
        book_id: BookId,
    ) -> Result<ListEntry, RemoteError>;

    /// Exchange email + password for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<CurrentUser, RemoteError>;

    /// Terminate the user's session upstream.
    async fn sign_out(&self, user: &CurrentUser) -> Result<(), RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::NotFound("books".to_string());
        assert_eq!(err.to_string(), "not found: books");

        let err = RemoteError::Conflict("duplicate key value".to_string());
        assert_eq!(err.to_string(), "duplicate row: duplicate key value");
    }

    #[test]
    fn test_api_error_display() {
        let err = RemoteError::Api {
            status: 500,
            message: "internal".to_string(),
        };
        assert_eq!(err.to_string(), "backend error (HTTP 500): internal");
    }

    #[test]
    fn test_rate_limited_error() {
        let err = RemoteError::RateLimited(60);
        assert_eq!(err.to_string(), "rate limited, retry after 60 seconds");
    }
}
