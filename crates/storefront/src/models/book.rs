//! Catalog book type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use inkshelf_core::{BookId, Price};

/// A catalog book.
///
/// Read-only projection of a remote catalog row; the platform owns the
/// data and the storefront never writes back to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Unique book ID.
    pub id: BookId,
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Short description for the catalog card.
    pub description: String,
    /// Price in the store currency (non-negative).
    pub price: Price,
    /// Cover image URL.
    pub cover_image: String,
    /// When the book was added to the catalog.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_book_deserializes_from_remote_row() {
        let row = serde_json::json!({
            "id": "5f2a1de2-96fe-4f64-9a34-0a2f1f0e2a10",
            "title": "The Silent Library",
            "author": "A. Reader",
            "description": "A mystery.",
            "price": 9.99,
            "cover_image": "https://cdn.example.com/covers/1.jpg",
            "created_at": "2026-01-15T12:00:00Z"
        });

        let book: Book = serde_json::from_value(row).unwrap();
        assert_eq!(book.title, "The Silent Library");
        assert_eq!(book.price.to_string(), "$9.99");
    }

    #[test]
    fn test_book_rejects_negative_price() {
        let row = serde_json::json!({
            "id": "5f2a1de2-96fe-4f64-9a34-0a2f1f0e2a10",
            "title": "Bad Row",
            "author": "A. Reader",
            "description": "",
            "price": -1.0,
            "cover_image": "",
            "created_at": "2026-01-15T12:00:00Z"
        });

        assert!(serde_json::from_value::<Book>(row).is_err());
    }
}
