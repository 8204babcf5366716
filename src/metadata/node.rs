use crate::*;

/// Plain value tree used to describe catalog contents before they are frozen
/// into a `Catalog` snapshot. Child order is preserved exactly as given and is
/// the order completion results come back in; sibling names need not be
/// unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataNode {
    pub name: String,
    pub kind: NodeKind,
    pub children: Vec<MetadataNode>,
}

impl MetadataNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(
        name: impl Into<String>,
        kind: NodeKind,
        children: Vec<MetadataNode>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            children,
        }
    }

    pub fn database(name: impl Into<String>, schemas: Vec<MetadataNode>) -> Self {
        Self::with_children(name, NodeKind::Database, schemas)
    }

    pub fn schema(name: impl Into<String>, tables: Vec<MetadataNode>) -> Self {
        Self::with_children(name, NodeKind::Schema, tables)
    }

    pub fn table(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::with_children(
            name,
            NodeKind::Table,
            columns.into_iter().map(Self::column).collect(),
        )
    }

    pub fn column(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Column)
    }
}
