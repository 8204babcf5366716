use crate::*;
use std::future::Future;
use std::time::Duration;
use tokio::sync::RwLock;

/// Per-fetch ceiling for lazily expanded catalogs.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Backend that can produce one level of the catalog tree on demand, e.g. by
/// querying a live database's information schema. `path` names the parent
/// node from the root (empty for the top level). Implementations should honor
/// the token and report `Error::Cancelled` when it is raised mid-fetch.
pub trait MetadataSource {
    fn fetch_children(
        &self,
        path: &[String],
        cancel: &CancelToken,
    ) -> impl Future<Output = Result<Vec<(String, NodeKind)>>> + Send;
}

#[derive(Debug)]
struct LazyNode {
    name: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Option<Vec<NodeId>>,
}

#[derive(Debug, Default)]
struct LazyArena {
    nodes: Vec<LazyNode>,
    roots: Option<Vec<NodeId>>,
}

impl LazyArena {
    fn info(&self, id: NodeId) -> NodeInfo {
        let node = &self.nodes[id.0];
        NodeInfo {
            id,
            name: node.name.clone(),
            kind: node.kind,
        }
    }

    fn cached(&self, parent: Option<NodeId>) -> Option<Vec<NodeInfo>> {
        let ids = match parent {
            None => self.roots.as_ref()?,
            Some(id) => self.nodes[id.0].children.as_ref()?,
        };
        Some(ids.iter().map(|id| self.info(*id)).collect())
    }

    fn path_of(&self, parent: Option<NodeId>) -> Vec<String> {
        let mut parts = Vec::new();
        let mut current = parent;
        while let Some(id) = current {
            parts.push(self.nodes[id.0].name.clone());
            current = self.nodes[id.0].parent;
        }
        parts.reverse();
        parts
    }

    fn fill(&mut self, parent: Option<NodeId>, fetched: Vec<(String, NodeKind)>) -> Vec<NodeInfo> {
        let mut ids = Vec::with_capacity(fetched.len());
        for (name, kind) in fetched {
            let id = NodeId(self.nodes.len());
            self.nodes.push(LazyNode {
                name,
                kind,
                parent,
                children: None,
            });
            ids.push(id);
        }
        let infos = ids.iter().map(|id| self.info(*id)).collect();
        match parent {
            None => self.roots = Some(ids),
            Some(id) => self.nodes[id.0].children = Some(ids),
        }
        infos
    }
}

/// `CatalogReader` over a `MetadataSource`: children are fetched the first
/// time they are asked for and cached, so a node is fetched at most once per
/// catalog lifetime. Each fetch runs under a timeout; timeouts, cancellation
/// and source failures surface as the typed errors the analyzer degrades on.
#[derive(Debug)]
pub struct LazyCatalog<S> {
    source: S,
    timeout: Duration,
    arena: RwLock<LazyArena>,
}

impl<S: MetadataSource + Sync> LazyCatalog<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            timeout: DEFAULT_FETCH_TIMEOUT,
            arena: RwLock::new(LazyArena::default()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl<S: MetadataSource + Sync> CatalogReader for LazyCatalog<S> {
    async fn children(&self, parent: Option<NodeId>, cancel: &CancelToken) -> Result<Vec<NodeInfo>> {
        let path = {
            let arena = self.arena.read().await;
            if let Some(cached) = arena.cached(parent) {
                return Ok(cached);
            }
            arena.path_of(parent)
        };
        cancel.check()?;
        trace!(?path, "fetching catalog children");
        let fetched = tokio::time::timeout(self.timeout, self.source.fetch_children(&path, cancel))
            .await
            .map_err(|_| Error::Timeout(self.timeout))??;
        let mut arena = self.arena.write().await;
        if let Some(cached) = arena.cached(parent) {
            // another task filled this node while we were fetching
            return Ok(cached);
        }
        Ok(arena.fill(parent, fetched))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MapSource {
        children: HashMap<Vec<String>, Vec<(String, NodeKind)>>,
        fetches: AtomicUsize,
    }

    impl MapSource {
        fn new(entries: &[(&[&str], &[(&str, NodeKind)])]) -> Self {
            let children = entries
                .iter()
                .map(|(path, kids)| {
                    (
                        path.iter().map(|s| s.to_string()).collect(),
                        kids.iter().map(|(n, k)| (n.to_string(), *k)).collect(),
                    )
                })
                .collect();
            Self {
                children,
                fetches: AtomicUsize::new(0),
            }
        }
    }

    impl MetadataSource for MapSource {
        async fn fetch_children(
            &self,
            path: &[String],
            cancel: &CancelToken,
        ) -> Result<Vec<(String, NodeKind)>> {
            cancel.check()?;
            self.fetches.fetch_add(1, Ordering::Relaxed);
            Ok(self.children.get(path).cloned().unwrap_or_default())
        }
    }

    struct FailingSource;

    impl MetadataSource for FailingSource {
        async fn fetch_children(
            &self,
            _path: &[String],
            _cancel: &CancelToken,
        ) -> Result<Vec<(String, NodeKind)>> {
            Err(Error::Source("connection reset".into()))
        }
    }

    struct StallingSource;

    impl MetadataSource for StallingSource {
        async fn fetch_children(
            &self,
            _path: &[String],
            _cancel: &CancelToken,
        ) -> Result<Vec<(String, NodeKind)>> {
            std::future::pending::<()>().await;
            unreachable!()
        }
    }

    #[tokio::test]
    async fn fetches_children_on_demand() {
        let lazy = LazyCatalog::new(MapSource::new(&[
            (&[], &[("Schema1", NodeKind::Schema)]),
            (&["Schema1"], &[("Table1", NodeKind::Table)]),
        ]));
        let cancel = CancelToken::new();
        let roots = lazy.children(None, &cancel).await.unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name, "Schema1");
        let tables = lazy.children(Some(roots[0].id), &cancel).await.unwrap();
        assert_eq!(tables[0].name, "Table1");
        assert_eq!(tables[0].kind, NodeKind::Table);
    }

    #[tokio::test]
    async fn caches_after_first_fetch() {
        let lazy = LazyCatalog::new(MapSource::new(&[(&[], &[("Schema1", NodeKind::Schema)])]));
        let cancel = CancelToken::new();
        lazy.children(None, &cancel).await.unwrap();
        lazy.children(None, &cancel).await.unwrap();
        assert_eq!(lazy.source.fetches.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn source_failures_surface_typed() {
        let lazy = LazyCatalog::new(FailingSource);
        let err = lazy
            .children(None, &CancelToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Source(_)));
    }

    #[tokio::test]
    async fn stalled_fetch_times_out() {
        let lazy = LazyCatalog::new(StallingSource).with_timeout(Duration::from_millis(5));
        let err = lazy
            .children(None, &CancelToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout(_)));
    }

    #[tokio::test]
    async fn cancelled_before_fetch() {
        let lazy = LazyCatalog::new(MapSource::new(&[(&[], &[("Schema1", NodeKind::Schema)])]));
        let cancel = CancelToken::new();
        cancel.cancel();
        let err = lazy.children(None, &cancel).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert_eq!(lazy.source.fetches.load(Ordering::Relaxed), 0);
    }
}
