//! Synchronization layer between user intents and the remote platform.
//!
//! Every action talks to the [`RemoteDataService`], then mutates the
//! [`Store`] so rendered state matches the remote tables within the
//! bounds of eventual consistency. Failures are returned as typed
//! results - this layer never logs and never retries; callers decide
//! what feedback (if any) the user sees.

use inkshelf_core::BookId;

use crate::models::{CurrentUser, ListKind};
use crate::remote::{RemoteDataService, RemoteError};
use crate::store::Store;

/// Outcome of an add-to-list intent.
///
/// Only `Added` touched the network and the store; the other variants
/// are local refusals, invisible failures from the UI's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The row was inserted upstream and appended to the store.
    Added,
    /// The book is already in the list (locally, or upstream via the
    /// unique constraint - in which case the list was re-fetched).
    AlreadyListed,
    /// An insert for the same (list, book) pair is still in flight.
    InFlight,
    /// No authenticated user; the intent is dropped without a call.
    SignedOut,
}

/// User-triggered actions over a remote service and a store.
#[derive(Clone)]
pub struct Actions<R> {
    remote: R,
    store: Store,
}

impl<R: RemoteDataService> Actions<R> {
    /// Bind an action layer to a remote service and a store.
    pub const fn new(remote: R, store: Store) -> Self {
        Self { remote, store }
    }

    /// The store this action layer mutates.
    pub const fn store(&self) -> &Store {
        &self.store
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the full catalog, newest first, and replace the store's
    /// books wholesale.
    ///
    /// Returns the number of books fetched.
    ///
    /// # Errors
    ///
    /// On failure the existing collection is left untouched, so views
    /// keep rendering the last known-good catalog.
    pub async fn fetch_catalog(&self) -> Result<usize, RemoteError> {
        let books = self.remote.fetch_books().await?;
        let count = books.len();
        self.store.set_books(books);
        Ok(count)
    }

    // =========================================================================
    // Relation lists
    // =========================================================================

    /// Add a book to the cart.
    ///
    /// # Errors
    ///
    /// Returns the remote failure when the insert could not be
    /// confirmed; the store is left untouched in that case.
    pub async fn add_to_cart(&self, book_id: BookId) -> Result<AddOutcome, RemoteError> {
        self.add_to_list(ListKind::Cart, book_id).await
    }

    /// Add a book to favorites.
    ///
    /// # Errors
    ///
    /// See [`Self::add_to_cart`].
    pub async fn add_to_favorites(&self, book_id: BookId) -> Result<AddOutcome, RemoteError> {
        self.add_to_list(ListKind::Favorites, book_id).await
    }

    /// Save a book for later.
    ///
    /// # Errors
    ///
    /// See [`Self::add_to_cart`].
    pub async fn add_to_saved_for_later(
        &self,
        book_id: BookId,
    ) -> Result<AddOutcome, RemoteError> {
        self.add_to_list(ListKind::SavedForLater, book_id).await
    }

    /// Add a book to one of the relation lists.
    ///
    /// Signed-out intents and locally-known duplicates are refused
    /// before any network call. A confirmed insert appends the returned
    /// row to the store so membership flips immediately; an upstream
    /// uniqueness conflict re-fetches the list to reconcile.
    ///
    /// # Errors
    ///
    /// Returns the remote failure when the insert could not be
    /// confirmed; the store is left untouched in that case.
    pub async fn add_to_list(
        &self,
        kind: ListKind,
        book_id: BookId,
    ) -> Result<AddOutcome, RemoteError> {
        let Some(user) = self.store.user() else {
            return Ok(AddOutcome::SignedOut);
        };

        if self.store.contains(kind, book_id) {
            return Ok(AddOutcome::AlreadyListed);
        }

        if !self.store.begin_pending(kind, book_id) {
            return Ok(AddOutcome::InFlight);
        }

        match self.remote.insert_entry(kind, &user, book_id).await {
            Ok(entry) => {
                // Single mutation: the entry lands and the flag clears
                // under one lock, so no concurrent add can observe the
                // pair as neither pending nor present.
                self.store.commit_pending(kind, entry);
                Ok(AddOutcome::Added)
            }
            Err(err) => {
                self.store.finish_pending(kind, book_id);
                match err {
                    RemoteError::Conflict(_) => {
                        // The unique constraint is the final arbiter:
                        // the row already exists upstream, so pull the
                        // list back in.
                        self.refresh_list(kind).await?;
                        Ok(AddOutcome::AlreadyListed)
                    }
                    other => Err(other),
                }
            }
        }
    }

    /// Re-fetch one relation list for the signed-in user and replace it
    /// wholesale. A signed-out refresh is a no-op returning 0.
    ///
    /// # Errors
    ///
    /// On failure the existing list is left untouched.
    pub async fn refresh_list(&self, kind: ListKind) -> Result<usize, RemoteError> {
        let Some(user) = self.store.user() else {
            return Ok(0);
        };

        let entries = self.remote.list_entries(kind, &user).await?;
        let count = entries.len();
        self.store.set_entries(kind, entries);
        Ok(count)
    }

    /// Re-fetch all three relation lists.
    ///
    /// # Errors
    ///
    /// Fails fast on the first list that cannot be fetched; earlier
    /// lists keep their refreshed state.
    pub async fn refresh_lists(&self) -> Result<(), RemoteError> {
        for kind in ListKind::ALL {
            self.refresh_list(kind).await?;
        }
        Ok(())
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Exchange credentials for a session and set the store user.
    ///
    /// # Errors
    ///
    /// Returns the remote failure; the store user is unchanged.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<CurrentUser, RemoteError> {
        let user = self.remote.sign_in(email, password).await?;
        self.store.set_user(Some(user.clone()));
        Ok(user)
    }

    /// Request session termination, then clear the store user
    /// unconditionally - even when the remote call fails, the local
    /// session ends.
    ///
    /// # Errors
    ///
    /// Returns the remote failure so callers may log it; the user is
    /// cleared either way.
    pub async fn sign_out(&self) -> Result<(), RemoteError> {
        let result = match self.store.user() {
            Some(user) => self.remote.sign_out(&user).await,
            None => Ok(()),
        };
        self.store.set_user(None);
        result
    }
}
