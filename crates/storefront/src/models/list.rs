//! Relation lists: cart, favorites, saved-for-later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use inkshelf_core::{BookId, EntryId, UserId};

/// The three per-user book lists, each backed by its own remote table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    Cart,
    Favorites,
    SavedForLater,
}

impl ListKind {
    /// All list kinds, for refresh loops.
    pub const ALL: [Self; 3] = [Self::Cart, Self::Favorites, Self::SavedForLater];

    /// Name of the remote table backing this list.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Cart => "cart_items",
            Self::Favorites => "favorites",
            Self::SavedForLater => "saved_for_later",
        }
    }
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

/// A relation record: one user associated one book with one list.
///
/// The platform enforces at most one entry per (user, book, list) with
/// a unique constraint; locally this is only an optimistic guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEntry {
    /// Unique row ID.
    pub id: EntryId,
    /// Owning user.
    pub user_id: UserId,
    /// Referenced book.
    pub book_id: BookId,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}
