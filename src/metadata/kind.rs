use derive_more::Display;

/// Kind discriminator for catalog tree nodes.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Database,
    Schema,
    Table,
    Column,
}
