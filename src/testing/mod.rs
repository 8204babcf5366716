#![cfg(test)]
pub use rstest::*;

use crate::*;

pub(crate) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Only initialize once for all tests; QCOMPLETE_TEST_TRACE forces a
        // verbose filter regardless of RUST_LOG
        let filter = if config().test_trace {
            EnvFilter::new("trace")
        } else {
            EnvFilter::from_default_env()
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// Catalog whose top level is plain tables: `(name, columns)`.
pub fn tables(defs: &[(&str, &[&str])]) -> Catalog {
    Catalog::from_roots(
        defs.iter()
            .map(|(name, cols)| MetadataNode::table(*name, cols.iter().copied()))
            .collect(),
    )
}

/// Catalog rooted at schemas holding tables with columns.
pub fn schemas(defs: &[(&str, &[(&str, &[&str])])]) -> Catalog {
    Catalog::from_roots(
        defs.iter()
            .map(|(schema, tabs)| {
                MetadataNode::schema(
                    *schema,
                    tabs.iter()
                        .map(|(table, cols)| MetadataNode::table(*table, cols.iter().copied()))
                        .collect(),
                )
            })
            .collect(),
    )
}

/// Catalog rooted at databases holding schemas of column-less tables.
pub fn databases(defs: &[(&str, &[(&str, &[&str])])]) -> Catalog {
    Catalog::from_roots(
        defs.iter()
            .map(|(database, schemas)| {
                MetadataNode::database(
                    *database,
                    schemas
                        .iter()
                        .map(|(schema, tabs)| {
                            MetadataNode::schema(
                                *schema,
                                tabs.iter()
                                    .map(|table| {
                                        MetadataNode::table(*table, Vec::<String>::new())
                                    })
                                    .collect(),
                            )
                        })
                        .collect(),
                )
            })
            .collect(),
    )
}

/// Split a SQL literal on the `|` cursor marker, mirroring how the reference
/// cases are written: `"SELECT * FROM Tb|"`.
pub fn at(marked: &str) -> (String, Cursor) {
    let idx = marked.find('|').expect("cursor marker '|' missing from test SQL");
    let mut sql = String::with_capacity(marked.len() - 1);
    sql.push_str(&marked[..idx]);
    sql.push_str(&marked[idx + 1..]);
    (sql, Cursor::at(idx))
}

mod marker_tests {
    use super::*;

    #[test]
    fn marker_is_removed_and_cursor_points_at_it() {
        let (sql, cursor) = at("SELECT |x FROM t");
        assert_eq!(sql, "SELECT x FROM t");
        assert_eq!(cursor.start(), 7);
        assert_eq!(cursor.end(), None);
        assert_eq!(cursor.range(), (7, None));
    }

    #[test]
    fn fixtures_preserve_declared_order() {
        let catalog = tables(&[("b", &["z", "a"]), ("a", &["y"])]);
        let roots: Vec<_> = catalog
            .children_of(None)
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(roots, vec!["b", "a"]);
    }
}
