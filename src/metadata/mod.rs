//! Database object metadata: the catalog tree the completion engine draws
//! candidates from.
//!
//! The analyzer only ever sees an immutable snapshot (`Catalog`). The live
//! side (background refresh, lazily expanded backends) is layered on top:
//! `CatalogStore` swaps whole snapshots, `LazyCatalog` fetches children on
//! demand through a `MetadataSource`. Both satisfy the same `CatalogReader`
//! trait the analyzer is written against.

crate::reexport!(kind);
crate::reexport!(node);
crate::reexport!(catalog);
crate::reexport!(access);
crate::reexport!(store);
crate::reexport!(source);
