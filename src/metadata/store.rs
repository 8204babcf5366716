use crate::*;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared handle between a background metadata refresher and completion
/// requests. The refresher builds a fresh `Catalog` and swaps it in; requests
/// take a snapshot up front and keep using it for their whole lifetime, so a
/// swap never changes what a running request sees.
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The snapshot to use for one request.
    pub async fn snapshot(&self) -> Arc<Catalog> {
        self.current.read().await.clone()
    }

    /// Install a freshly fetched catalog, returning the one it replaces.
    pub async fn swap(&self, catalog: Catalog) -> Arc<Catalog> {
        let mut guard = self.current.write().await;
        std::mem::replace(&mut *guard, Arc::new(catalog))
    }
}
