use crate::*;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flag shared between a completion request and the
/// host. Cloning hands out another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Turn a raised flag into the typed error catalog readers report.
    pub fn check(&self) -> Result {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Read access to a catalog, as the analyzer consumes it.
///
/// In-memory snapshots answer immediately; lazily expanded backends may block
/// on I/O, which is why the method is async and takes the request's
/// `CancelToken`. Implementations must keep child order stable between calls
/// for the same parent.
pub trait CatalogReader {
    fn children(
        &self,
        parent: Option<NodeId>,
        cancel: &CancelToken,
    ) -> impl Future<Output = Result<Vec<NodeInfo>>> + Send;
}

impl CatalogReader for Catalog {
    async fn children(&self, parent: Option<NodeId>, cancel: &CancelToken) -> Result<Vec<NodeInfo>> {
        cancel.check()?;
        Ok(self.children_of(parent))
    }
}

/// Resolve a dotted path segment by segment through any `CatalogReader`.
/// `Ok(None)` means some segment did not match; errors are real access
/// failures and are propagated.
pub async fn lookup_path<C: CatalogReader, S: AsRef<str> + Sync>(
    catalog: &C,
    segments: &[S],
    cancel: &CancelToken,
) -> Result<Option<NodeInfo>> {
    let mut scope: Option<NodeInfo> = None;
    for segment in segments {
        let segment = segment.as_ref();
        let parent = scope.as_ref().map(|n| n.id);
        let next = catalog
            .children(parent, cancel)
            .await?
            .into_iter()
            .find(|child| child.name == segment);
        match next {
            Some(child) => scope = Some(child),
            None => return Ok(None),
        }
    }
    Ok(scope)
}
