//! Authenticated user identity.

use secrecy::SecretString;

use inkshelf_core::{Email, UserId};

/// The signed-in user held by the store.
///
/// Issued by the remote identity provider on sign-in and cleared on
/// sign-out. The access token authorizes per-user row access and is
/// redacted from `Debug` output.
#[derive(Clone)]
pub struct CurrentUser {
    /// Platform-issued user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Bearer token for row-level access.
    pub access_token: SecretString,
}

impl std::fmt::Debug for CurrentUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentUser")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}
