//! Newtype IDs for type-safe entity references.
//!
//! The remote data platform issues UUIDs for every row, so every entity
//! ID here wraps a [`uuid::Uuid`]. Use the `define_id!` macro to create
//! wrappers that prevent accidentally mixing IDs from different entity
//! types.

/// Macro to define a type-safe UUID-backed ID wrapper.
///
/// Creates a newtype wrapper around `uuid::Uuid` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `generate()`, `as_uuid()`
/// - `From<Uuid>` and `Into<Uuid>` implementations
/// - `FromStr` parsing for path/form parameters
///
/// # Example
///
/// ```rust
/// # use inkshelf_core::define_id;
/// define_id!(UserId);
/// define_id!(BookId);
///
/// let user_id = UserId::generate();
/// let book_id = BookId::generate();
///
/// // These are different types, so this won't compile:
/// // let _: UserId = book_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Create an ID from an existing UUID.
            #[must_use]
            pub const fn new(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Generate a fresh random (v4) ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Get the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.parse::<::uuid::Uuid>().map(Self)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(BookId);
define_id!(EntryId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_distinct_types() {
        // Compile-time property; a value round-trips through Uuid.
        let raw = uuid::Uuid::new_v4();
        let book = BookId::new(raw);
        assert_eq!(book.as_uuid(), raw);
        assert_eq!(uuid::Uuid::from(book), raw);
    }

    #[test]
    fn test_id_display_and_parse_round_trip() {
        let id = EntryId::generate();
        let parsed: EntryId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = BookId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: BookId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
