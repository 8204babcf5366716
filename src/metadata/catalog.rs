use crate::*;

/// Handle to a node within one `Catalog` snapshot. Ids are only meaningful
/// against the snapshot that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
struct NodeData {
    name: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Owned view of one catalog node, as handed out by catalog reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
}

/// Immutable catalog snapshot.
///
/// Built once from `MetadataNode` values and never mutated afterwards; a
/// refresh produces a whole new `Catalog`. Children keep their declared order,
/// they are never re-sorted, and sibling names may repeat.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    nodes: Vec<NodeData>,
    roots: Vec<NodeId>,
}

impl Catalog {
    /// Freeze a forest of metadata values into a snapshot.
    pub fn from_roots(roots: Vec<MetadataNode>) -> Self {
        let mut catalog = Self::default();
        for root in roots {
            let id = catalog.insert(None, root);
            catalog.roots.push(id);
        }
        catalog
    }

    fn insert(&mut self, parent: Option<NodeId>, node: MetadataNode) -> NodeId {
        let MetadataNode {
            name,
            kind,
            children,
        } = node;
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            name,
            kind,
            parent,
            children: Vec::new(),
        });
        for child in children {
            let child_id = self.insert(Some(id), child);
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    /// Back-reference to the enclosing node, `None` for roots. Lookup only.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Child ids of `parent`, or the root ids when `parent` is `None`.
    /// Declared order, stable across calls.
    pub fn child_ids(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            Some(id) => &self.nodes[id.0].children,
            None => &self.roots,
        }
    }

    pub fn info(&self, id: NodeId) -> NodeInfo {
        let data = &self.nodes[id.0];
        NodeInfo {
            id,
            name: data.name.clone(),
            kind: data.kind,
        }
    }

    /// Owned views of the children of `parent`, in declared order.
    pub fn children_of(&self, parent: Option<NodeId>) -> Vec<NodeInfo> {
        self.child_ids(parent)
            .iter()
            .map(|id| self.info(*id))
            .collect()
    }

    /// Walk the tree from the roots, matching each segment's unquoted literal
    /// value against children by exact string equality. Returns the node the
    /// final segment lands on, or `None` anywhere along the way.
    pub fn resolve_path<S: AsRef<str>>(&self, segments: &[S]) -> Option<NodeInfo> {
        let mut scope: Option<NodeId> = None;
        for segment in segments {
            let segment = segment.as_ref();
            let next = self
                .child_ids(scope)
                .iter()
                .copied()
                .find(|id| self.name(*id) == segment)?;
            scope = Some(next);
        }
        scope.map(|id| self.info(id))
    }

    /// Dotted path of a node from its root, e.g. `Database1.Schema1.Table1`.
    pub fn qualified_name(&self, id: NodeId) -> String {
        let mut parts = vec![self.name(id)];
        let mut current = self.parent(id);
        while let Some(p) = current {
            parts.push(self.name(p));
            current = self.parent(p);
        }
        parts.reverse();
        parts.join(".")
    }
}
