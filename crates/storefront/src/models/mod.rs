//! Domain types for the storefront.
//!
//! These types represent validated domain objects separate from wire
//! payloads. Rows arriving from the remote data platform deserialize
//! directly into them; the storefront never mutates a [`Book`].

mod book;
mod list;
mod user;

pub use book::Book;
pub use list::{ListEntry, ListKind};
pub use user::CurrentUser;
