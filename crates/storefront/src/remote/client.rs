//! REST client for the hosted data platform.

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use tracing::instrument;
use url::Url;

use inkshelf_core::BookId;

use crate::config::BackendConfig;
use crate::models::{Book, CurrentUser, ListEntry, ListKind};
use crate::remote::types::{ApiErrorBody, NewEntry, SignInRequest, SignInResponse};
use crate::remote::{RemoteDataService, RemoteError};

/// Client for the platform's row and identity APIs.
///
/// Cheaply cloneable via `Arc`. Holds no per-user state: the caller's
/// access token is passed per request.
#[derive(Clone)]
pub struct RemoteClient {
    inner: Arc<RemoteClientInner>,
}

struct RemoteClientInner {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl RemoteClient {
    /// Create a new client for the configured platform project.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(RemoteClientInner {
                client: reqwest::Client::new(),
                base_url: config.url.clone(),
                api_key: config.api_key.expose_secret().to_string(),
            }),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, RemoteError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Attach the headers every platform request needs.
    ///
    /// `bearer` is the signed-in user's access token for row-level
    /// access; `None` falls back to the publishable key (anonymous
    /// catalog reads).
    fn request(
        &self,
        method: reqwest::Method,
        url: Url,
        bearer: Option<&str>,
    ) -> reqwest::RequestBuilder {
        self.inner
            .client
            .request(method, url)
            .header("apikey", &self.inner.api_key)
            .bearer_auth(bearer.unwrap_or(&self.inner.api_key))
    }

    /// Send a request and map the response to a body or a typed error.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, RemoteError> {
        let response = request.send().await?;
        let status = response.status();

        // Check for rate limiting before consuming the body
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(RemoteError::RateLimited(retry_after));
        }

        // Body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(ApiErrorBody::into_message)
                .unwrap_or_else(|| body.chars().take(200).collect());

            tracing::debug!(status = %status, message = %message, "backend rejected request");

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    RemoteError::Unauthorized(message)
                }
                StatusCode::CONFLICT => RemoteError::Conflict(message),
                StatusCode::NOT_FOUND => RemoteError::NotFound(message),
                other => RemoteError::Api {
                    status: other.as_u16(),
                    message,
                },
            });
        }

        Ok(body)
    }
}

impl RemoteDataService for RemoteClient {
    /// Fetch all catalog books ordered by creation timestamp, newest
    /// first.
    #[instrument(skip(self))]
    async fn fetch_books(&self) -> Result<Vec<Book>, RemoteError> {
        let url = self.endpoint("/rest/v1/books")?;
        let request = self
            .request(reqwest::Method::GET, url, None)
            .query(&[("select", "*"), ("order", "created_at.desc")]);

        let body = self.send(request).await?;
        let books: Vec<Book> = serde_json::from_str(&body)?;
        Ok(books)
    }

    #[instrument(skip(self, user), fields(table = %kind, user_id = %user.id))]
    async fn list_entries(
        &self,
        kind: ListKind,
        user: &CurrentUser,
    ) -> Result<Vec<ListEntry>, RemoteError> {
        let url = self.endpoint(&format!("/rest/v1/{}", kind.table()))?;
        let request = self
            .request(
                reqwest::Method::GET,
                url,
                Some(user.access_token.expose_secret()),
            )
            .query(&[
                ("select", "*"),
                ("user_id", &format!("eq.{}", user.id)),
                ("order", "created_at.desc"),
            ]);

        let body = self.send(request).await?;
        let entries: Vec<ListEntry> = serde_json::from_str(&body)?;
        Ok(entries)
    }

    #[instrument(skip(self, user), fields(table = %kind, user_id = %user.id, book_id = %book_id))]
    async fn insert_entry(
        &self,
        kind: ListKind,
        user: &CurrentUser,
        book_id: BookId,
    ) -> Result<ListEntry, RemoteError> {
        let url = self.endpoint(&format!("/rest/v1/{}", kind.table()))?;
        let rows = [NewEntry {
            user_id: user.id,
            book_id,
        }];
        let request = self
            .request(
                reqwest::Method::POST,
                url,
                Some(user.access_token.expose_secret()),
            )
            // Ask the platform to echo the inserted row back so the
            // store can append it without a second fetch.
            .header("Prefer", "return=representation")
            .json(&rows);

        let body = self.send(request).await?;
        let inserted: Vec<ListEntry> = serde_json::from_str(&body)?;
        inserted.into_iter().next().ok_or(RemoteError::EmptyInsert)
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<CurrentUser, RemoteError> {
        let url = self.endpoint("/auth/v1/token")?;
        let request = self
            .request(reqwest::Method::POST, url, None)
            .query(&[("grant_type", "password")])
            .json(&SignInRequest { email, password });

        let body = self.send(request).await?;
        let session: SignInResponse = serde_json::from_str(&body)?;

        Ok(CurrentUser {
            id: session.user.id,
            email: session.user.email,
            access_token: session.access_token.into(),
        })
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn sign_out(&self, user: &CurrentUser) -> Result<(), RemoteError> {
        let url = self.endpoint("/auth/v1/logout")?;
        let request = self.request(
            reqwest::Method::POST,
            url,
            Some(user.access_token.expose_secret()),
        );

        self.send(request).await?;
        Ok(())
    }
}
