//! Cursor-aware SQL completion.
//!
//! The pipeline, leaves first:
//!
//! - `cursor`   : byte-offset cursor within the SQL buffer.
//! - `context`  : classifies what is being typed at the cursor (keyword,
//!   table, column, qualified name, wildcard) from the raw text alone.
//! - `scope`    : table references and alias bindings of the statement or
//!   subquery containing the cursor.
//! - `grammar`  : per-dialect keyword grammar and identifier quoting.
//! - `proposal` : ordered, quoted, offset-correct replacement proposals.
//! - `analyzer` : the orchestrator gluing the above to a catalog snapshot.
//!
//! Everything tolerates half-typed, syntactically invalid SQL; a request
//! never fails, it degrades.

crate::reexport!(cursor);
crate::reexport!(context);
crate::reexport!(scope);
crate::reexport!(grammar);
crate::reexport!(proposal);
crate::reexport!(analyzer);
crate::reexport!(analyzer_tests, test);
