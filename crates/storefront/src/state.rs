//! Application state shared across handlers.

use std::sync::Arc;

use crate::actions::Actions;
use crate::config::StorefrontConfig;
use crate::remote::RemoteClient;
use crate::store::Store;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration, the client state store, and the action layer
/// bound to the remote data platform.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Store,
    actions: Actions<RemoteClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Constructs the store once for the process lifetime and binds
    /// the action layer to a remote client for the configured backend.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let store = Store::new();
        let remote = RemoteClient::new(&config.backend);
        let actions = Actions::new(remote, store.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                actions,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the client state store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Get a reference to the action layer.
    #[must_use]
    pub fn actions(&self) -> &Actions<RemoteClient> {
        &self.inner.actions
    }
}
