//! Integration test support for Inkshelf.
//!
//! Provides [`FakeRemote`], an in-memory stand-in for the hosted data
//! platform. It implements the storefront's `RemoteDataService` seam,
//! records every call it receives, and can be switched into failure
//! modes per operation, so the test suites can drive the action layer
//! through both happy paths and degraded ones without a network.
//!
//! # Test Categories
//!
//! - `catalog_sync` - catalog fetch and last-known-good semantics
//! - `list_membership` - add-to-list flows and membership predicates
//! - `session` - sign-in/sign-out lifecycle

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use inkshelf_core::{BookId, Email, EntryId, Price, UserId};
use inkshelf_storefront::actions::Actions;
use inkshelf_storefront::models::{Book, CurrentUser, ListEntry, ListKind};
use inkshelf_storefront::remote::{RemoteDataService, RemoteError};
use inkshelf_storefront::store::Store;

/// One recorded call against the fake platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchBooks,
    ListEntries(ListKind),
    InsertEntry(ListKind, BookId),
    SignIn,
    SignOut,
}

#[derive(Default)]
struct FakeState {
    books: Vec<Book>,
    entries: HashMap<ListKind, Vec<ListEntry>>,
    calls: Vec<Call>,
    fail_fetch_books: bool,
    fail_insert: bool,
    fail_list: bool,
    fail_sign_in: bool,
    fail_sign_out: bool,
}

/// In-memory fake of the remote data platform.
///
/// Cheaply cloneable; keep a clone outside the action layer to assert
/// on recorded calls.
#[derive(Clone, Default)]
pub struct FakeRemote {
    state: Arc<Mutex<FakeState>>,
}

impl FakeRemote {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with<T>(&self, f: impl FnOnce(&mut FakeState) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    /// Seed the remote catalog (already in newest-first order).
    pub fn seed_books(&self, books: Vec<Book>) {
        self.with(|s| s.books = books);
    }

    /// Seed remote rows for one list.
    pub fn seed_entries(&self, kind: ListKind, entries: Vec<ListEntry>) {
        self.with(|s| {
            s.entries.insert(kind, entries);
        });
    }

    pub fn fail_fetch_books(&self, fail: bool) {
        self.with(|s| s.fail_fetch_books = fail);
    }

    pub fn fail_insert(&self, fail: bool) {
        self.with(|s| s.fail_insert = fail);
    }

    pub fn fail_list(&self, fail: bool) {
        self.with(|s| s.fail_list = fail);
    }

    pub fn fail_sign_in(&self, fail: bool) {
        self.with(|s| s.fail_sign_in = fail);
    }

    pub fn fail_sign_out(&self, fail: bool) {
        self.with(|s| s.fail_sign_out = fail);
    }

    /// Every call recorded so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.with(|s| s.calls.clone())
    }

    /// Number of insert calls recorded for `kind`.
    #[must_use]
    pub fn insert_count(&self, kind: ListKind) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::InsertEntry(k, _) if *k == kind))
            .count()
    }

    /// Rows the fake platform currently holds for `kind`.
    #[must_use]
    pub fn remote_entries(&self, kind: ListKind) -> Vec<ListEntry> {
        self.with(|s| s.entries.get(&kind).cloned().unwrap_or_default())
    }

    fn backend_down() -> RemoteError {
        RemoteError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        }
    }
}

impl RemoteDataService for FakeRemote {
    async fn fetch_books(&self) -> Result<Vec<Book>, RemoteError> {
        self.with(|s| {
            s.calls.push(Call::FetchBooks);
            if s.fail_fetch_books {
                return Err(Self::backend_down());
            }
            Ok(s.books.clone())
        })
    }

    async fn list_entries(
        &self,
        kind: ListKind,
        _user: &CurrentUser,
    ) -> Result<Vec<ListEntry>, RemoteError> {
        self.with(|s| {
            s.calls.push(Call::ListEntries(kind));
            if s.fail_list {
                return Err(Self::backend_down());
            }
            Ok(s.entries.get(&kind).cloned().unwrap_or_default())
        })
    }

    async fn insert_entry(
        &self,
        kind: ListKind,
        user: &CurrentUser,
        book_id: BookId,
    ) -> Result<ListEntry, RemoteError> {
        self.with(|s| {
            s.calls.push(Call::InsertEntry(kind, book_id));
            if s.fail_insert {
                return Err(Self::backend_down());
            }

            let rows = s.entries.entry(kind).or_default();
            // The platform's unique constraint on (user, book, list)
            if rows.iter().any(|e| e.book_id == book_id) {
                return Err(RemoteError::Conflict(
                    "duplicate key value violates unique constraint".to_string(),
                ));
            }

            let entry = ListEntry {
                id: EntryId::generate(),
                user_id: user.id,
                book_id,
                created_at: Utc::now(),
            };
            rows.push(entry.clone());
            Ok(entry)
        })
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<CurrentUser, RemoteError> {
        self.with(|s| {
            s.calls.push(Call::SignIn);
            if s.fail_sign_in {
                return Err(RemoteError::Unauthorized(
                    "Invalid login credentials".to_string(),
                ));
            }
            Ok(CurrentUser {
                id: UserId::generate(),
                email: Email::parse(email).unwrap(),
                access_token: "fake-access-token".into(),
            })
        })
    }

    async fn sign_out(&self, _user: &CurrentUser) -> Result<(), RemoteError> {
        self.with(|s| {
            s.calls.push(Call::SignOut);
            if s.fail_sign_out {
                return Err(Self::backend_down());
            }
            Ok(())
        })
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// A catalog book created `age_days` days ago.
#[must_use]
pub fn sample_book(title: &str, price_cents: i64, age_days: i64) -> Book {
    Book {
        id: BookId::generate(),
        title: title.to_string(),
        author: "A. Reader".to_string(),
        description: format!("About {title}"),
        price: Price::new(Decimal::new(price_cents, 2)).unwrap(),
        cover_image: format!("https://cdn.example.com/covers/{title}.jpg"),
        created_at: created_days_ago(age_days),
    }
}

/// A timestamp `days` days in the past.
#[must_use]
pub fn created_days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

/// A signed-in user for seeding the store directly.
#[must_use]
pub fn sample_user() -> CurrentUser {
    CurrentUser {
        id: UserId::generate(),
        email: Email::parse("reader@example.com").unwrap(),
        access_token: "fake-access-token".into(),
    }
}

/// A relation entry owned by `user` for `book_id`.
#[must_use]
pub fn sample_entry(user: &CurrentUser, book_id: BookId) -> ListEntry {
    ListEntry {
        id: EntryId::generate(),
        user_id: user.id,
        book_id,
        created_at: Utc::now(),
    }
}

/// An action layer wired to a fresh store and the given fake.
#[must_use]
pub fn actions_over(remote: &FakeRemote) -> Actions<FakeRemote> {
    Actions::new(remote.clone(), Store::new())
}
