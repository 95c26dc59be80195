//! Client state store: the single source of truth for rendering.
//!
//! Holds the signed-in user and four collections (books, cart items,
//! favorites, saved-for-later), each a local projection of a remote
//! table. The store performs no validation and no I/O; the action layer
//! ([`crate::actions`]) keeps it eventually consistent with the remote
//! data platform.
//!
//! The store is an explicitly constructed object shared through
//! [`crate::state::AppState`], not ambient global state. It is cheaply
//! cloneable via `Arc` and constructed once at application start.
//!
//! Views subscribe through a [`tokio::sync::watch`] revision counter:
//! every mutation bumps the revision, waking subscribers to re-read.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use tokio::sync::watch;

use inkshelf_core::BookId;

use crate::models::{Book, CurrentUser, ListEntry, ListKind};

/// Process-wide client state.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: RwLock<StoreState>,
    revision: watch::Sender<u64>,
}

#[derive(Default)]
struct StoreState {
    user: Option<CurrentUser>,
    books: Vec<Book>,
    cart_items: Vec<ListEntry>,
    favorites: Vec<ListEntry>,
    saved_for_later: Vec<ListEntry>,
    /// Writes issued but not yet confirmed, keyed by (list, book).
    pending: HashSet<(ListKind, BookId)>,
}

impl StoreState {
    const fn list(&self, kind: ListKind) -> &Vec<ListEntry> {
        match kind {
            ListKind::Cart => &self.cart_items,
            ListKind::Favorites => &self.favorites,
            ListKind::SavedForLater => &self.saved_for_later,
        }
    }

    const fn list_mut(&mut self, kind: ListKind) -> &mut Vec<ListEntry> {
        match kind {
            ListKind::Cart => &mut self.cart_items,
            ListKind::Favorites => &mut self.favorites,
            ListKind::SavedForLater => &mut self.saved_for_later,
        }
    }
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(StoreState::default()),
                revision,
            }),
        }
    }

    /// Subscribe to store changes.
    ///
    /// The receiver yields a monotonically increasing revision number;
    /// subscribers re-read whatever state they render on each change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    /// Current revision number.
    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.inner.revision.borrow()
    }

    fn bump(&self) {
        self.inner.revision.send_modify(|rev| *rev += 1);
    }

    fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> T {
        // A poisoned lock means a writer panicked; the state itself is
        // plain data, so continue with whatever it holds.
        let state = self
            .inner
            .state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&state)
    }

    fn write<T>(&self, f: impl FnOnce(&mut StoreState) -> T) -> T {
        let result = {
            let mut state = self
                .inner
                .state
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            f(&mut state)
        };
        self.bump();
        result
    }

    // =========================================================================
    // User
    // =========================================================================

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<CurrentUser> {
        self.read(|s| s.user.clone())
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read(|s| s.user.is_some())
    }

    /// Replace the signed-in identity.
    ///
    /// Passing `None` clears the user but deliberately leaves the three
    /// relation collections in place; membership predicates stay safe
    /// on the stale entries and the next sign-in refresh replaces them.
    pub fn set_user(&self, user: Option<CurrentUser>) {
        self.write(|s| s.user = user);
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// Snapshot of the catalog.
    #[must_use]
    pub fn books(&self) -> Vec<Book> {
        self.read(|s| s.books.clone())
    }

    /// Wholesale-replace the catalog after a successful fetch.
    pub fn set_books(&self, books: Vec<Book>) {
        self.write(|s| s.books = books);
    }

    /// Look up a catalog book by id.
    #[must_use]
    pub fn book(&self, id: BookId) -> Option<Book> {
        self.read(|s| s.books.iter().find(|b| b.id == id).cloned())
    }

    /// Snapshot of one relation list.
    #[must_use]
    pub fn entries(&self, kind: ListKind) -> Vec<ListEntry> {
        self.read(|s| s.list(kind).clone())
    }

    /// Wholesale-replace one relation list after a successful fetch.
    pub fn set_entries(&self, kind: ListKind, entries: Vec<ListEntry>) {
        self.write(|s| *s.list_mut(kind) = entries);
    }

    /// Snapshot of the cart.
    #[must_use]
    pub fn cart_items(&self) -> Vec<ListEntry> {
        self.entries(ListKind::Cart)
    }

    /// Snapshot of the favorites list.
    #[must_use]
    pub fn favorites(&self) -> Vec<ListEntry> {
        self.entries(ListKind::Favorites)
    }

    /// Snapshot of the saved-for-later list.
    #[must_use]
    pub fn saved_for_later(&self) -> Vec<ListEntry> {
        self.entries(ListKind::SavedForLater)
    }

    /// Append a confirmed relation entry.
    ///
    /// No-op if the list already holds an entry for the same book, so a
    /// forced re-add can never duplicate locally.
    pub fn push_entry(&self, kind: ListKind, entry: ListEntry) {
        self.write(|s| {
            let list = s.list_mut(kind);
            if !list.iter().any(|e| e.book_id == entry.book_id) {
                list.push(entry);
            }
        });
    }

    // =========================================================================
    // Membership predicates
    // =========================================================================

    /// Whether `book_id` already appears in the given list.
    #[must_use]
    pub fn contains(&self, kind: ListKind, book_id: BookId) -> bool {
        self.read(|s| s.list(kind).iter().any(|e| e.book_id == book_id))
    }

    /// Whether the book is in the cart.
    #[must_use]
    pub fn is_in_cart(&self, book_id: BookId) -> bool {
        self.contains(ListKind::Cart, book_id)
    }

    /// Whether the book is in favorites.
    #[must_use]
    pub fn is_in_favorites(&self, book_id: BookId) -> bool {
        self.contains(ListKind::Favorites, book_id)
    }

    /// Whether the book is saved for later.
    #[must_use]
    pub fn is_in_saved_for_later(&self, book_id: BookId) -> bool {
        self.contains(ListKind::SavedForLater, book_id)
    }

    // =========================================================================
    // Pending writes
    // =========================================================================

    /// Mark a write as in flight.
    ///
    /// Returns `false` when the pair is already pending or already
    /// present, closing the double-invocation window between issuing an
    /// insert and its confirmation landing in the store.
    #[must_use]
    pub fn begin_pending(&self, kind: ListKind, book_id: BookId) -> bool {
        self.write(|s| {
            if s.list(kind).iter().any(|e| e.book_id == book_id) {
                return false;
            }
            s.pending.insert((kind, book_id))
        })
    }

    /// Clear an in-flight marker, whatever the write's outcome.
    pub fn finish_pending(&self, kind: ListKind, book_id: BookId) {
        self.write(|s| {
            s.pending.remove(&(kind, book_id));
        });
    }

    /// Land a confirmed entry and clear its in-flight marker in one
    /// mutation.
    ///
    /// The pair must never be observable as neither pending nor
    /// present, or a concurrent add could slip past both guards and
    /// issue a second insert.
    pub fn commit_pending(&self, kind: ListKind, entry: ListEntry) {
        self.write(|s| {
            s.pending.remove(&(kind, entry.book_id));
            let list = s.list_mut(kind);
            if !list.iter().any(|e| e.book_id == entry.book_id) {
                list.push(entry);
            }
        });
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use inkshelf_core::{Email, EntryId, Price, UserId};
    use rust_decimal::Decimal;

    fn book(title: &str) -> Book {
        Book {
            id: BookId::generate(),
            title: title.to_string(),
            author: "A. Reader".to_string(),
            description: String::new(),
            price: Price::new(Decimal::new(999, 2)).unwrap(),
            cover_image: String::new(),
            created_at: Utc::now(),
        }
    }

    fn entry(book_id: BookId) -> ListEntry {
        ListEntry {
            id: EntryId::generate(),
            user_id: UserId::generate(),
            book_id,
            created_at: Utc::now(),
        }
    }

    fn user() -> CurrentUser {
        CurrentUser {
            id: UserId::generate(),
            email: Email::parse("reader@example.com").unwrap(),
            access_token: "token".into(),
        }
    }

    #[test]
    fn test_set_books_wholesale_replace_preserves_order() {
        let store = Store::new();
        let newest = book("B");
        let older = book("A");
        store.set_books(vec![newest.clone(), older.clone()]);

        let books = store.books();
        assert_eq!(books, vec![newest, older]);
    }

    #[test]
    fn test_membership_predicates_scan_by_book_id() {
        let store = Store::new();
        let id = BookId::generate();
        assert!(!store.is_in_cart(id));

        store.push_entry(ListKind::Cart, entry(id));
        assert!(store.is_in_cart(id));
        assert!(!store.is_in_favorites(id));
        assert!(!store.is_in_saved_for_later(id));
    }

    #[test]
    fn test_push_entry_never_duplicates_a_book() {
        let store = Store::new();
        let id = BookId::generate();
        store.push_entry(ListKind::Favorites, entry(id));
        store.push_entry(ListKind::Favorites, entry(id));

        assert_eq!(store.favorites().len(), 1);
    }

    #[test]
    fn test_clearing_user_leaves_relation_lists_intact() {
        let store = Store::new();
        let id = BookId::generate();
        store.set_user(Some(user()));
        store.push_entry(ListKind::Cart, entry(id));

        store.set_user(None);

        // Stale entries remain and the predicates stay safe on them.
        assert!(store.user().is_none());
        assert!(store.is_in_cart(id));
        assert!(!store.is_in_favorites(id));
    }

    #[test]
    fn test_begin_pending_blocks_repeat_and_present() {
        let store = Store::new();
        let id = BookId::generate();

        assert!(store.begin_pending(ListKind::Cart, id));
        // Second invocation while the first is in flight is refused.
        assert!(!store.begin_pending(ListKind::Cart, id));

        store.push_entry(ListKind::Cart, entry(id));
        store.finish_pending(ListKind::Cart, id);

        // Once committed, a new write for the same pair is still refused.
        assert!(!store.begin_pending(ListKind::Cart, id));
    }

    #[test]
    fn test_commit_pending_is_one_mutation_with_no_open_window() {
        let store = Store::new();
        let id = BookId::generate();
        assert!(store.begin_pending(ListKind::Cart, id));
        let before = store.revision();

        store.commit_pending(ListKind::Cart, entry(id));

        // One revision bump: the entry landed and the flag cleared
        // under the same lock, never leaving the pair unguarded.
        assert_eq!(store.revision(), before + 1);
        assert!(store.is_in_cart(id));
        assert!(!store.begin_pending(ListKind::Cart, id));
    }

    #[test]
    fn test_finish_pending_reopens_after_failure() {
        let store = Store::new();
        let id = BookId::generate();

        assert!(store.begin_pending(ListKind::SavedForLater, id));
        store.finish_pending(ListKind::SavedForLater, id);

        // The write failed upstream: a retry intent is allowed again.
        assert!(store.begin_pending(ListKind::SavedForLater, id));
    }

    #[test]
    fn test_revision_bumps_on_every_mutation() {
        let store = Store::new();
        let before = store.revision();

        store.set_books(vec![book("A")]);
        store.set_user(Some(user()));
        store.set_entries(ListKind::Cart, vec![]);

        assert_eq!(store.revision(), before + 3);
    }

    #[tokio::test]
    async fn test_subscribers_wake_on_change() {
        let store = Store::new();
        let mut rx = store.subscribe();

        store.set_books(vec![book("A")]);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);
    }
}
