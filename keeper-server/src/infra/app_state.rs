use std::{fmt, sync::Arc};

use keeper_core::{CatalogClient, IdentityRegistry, StagedFileStore};

/// Shared state for the favorites service.
#[derive(Clone)]
pub struct FavoritesState {
    pub registry: IdentityRegistry,
    pub catalog: Arc<dyn CatalogClient>,
}

impl FavoritesState {
    pub fn new(
        registry: IdentityRegistry,
        catalog: Arc<dyn CatalogClient>,
    ) -> Self {
        Self { registry, catalog }
    }
}

impl fmt::Debug for FavoritesState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesState")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Shared state for the feedback service.
#[derive(Clone, Debug)]
pub struct FeedbackState {
    pub store: StagedFileStore,
}

impl FeedbackState {
    pub fn new(store: StagedFileStore) -> Self {
        Self { store }
    }
}
