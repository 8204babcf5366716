use crate::*;
use itertools::Itertools;

/// One completion candidate: the text to insert and the span of already-typed
/// text it replaces. Applying `replacement_string` over
/// `[replacement_offset, replacement_offset + replacement_length)` yields the
/// completed query text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{replacement_string}")]
pub struct Proposal {
    pub replacement_string: String,
    pub replacement_offset: usize,
    pub replacement_length: usize,
}

impl Proposal {
    pub fn new(
        replacement_string: impl Into<String>,
        replacement_offset: usize,
        replacement_length: usize,
    ) -> Self {
        Self {
            replacement_string: replacement_string.into(),
            replacement_offset,
            replacement_length,
        }
    }
}

/// Turns candidate sets into ordered, quoted, offset-correct proposals for one
/// resolved context. Candidate order is preserved; nothing here ever sorts.
pub struct ProposalBuilder<'a> {
    dialect: &'a Dialect,
    context: &'a CompletionContext,
}

impl<'a> ProposalBuilder<'a> {
    pub fn new(dialect: &'a Dialect, context: &'a CompletionContext) -> Self {
        Self { dialect, context }
    }

    fn spanned(&self, replacement: String) -> Proposal {
        Proposal::new(replacement, self.context.replace_at, self.context.replace_len)
    }

    /// Keyword candidates: case-insensitive prefix filter, upper-cased output.
    pub fn keywords(&self, candidates: &[&str]) -> Vec<Proposal> {
        let prefix = self.context.prefix.to_ascii_uppercase();
        candidates
            .iter()
            .map(|k| k.to_ascii_uppercase())
            .filter(|k| k.starts_with(&prefix))
            .map(|k| self.spanned(k))
            .collect()
    }

    /// Name candidates: literal, case-sensitive prefix filter on the raw
    /// name; survivors keep their order and are quoted when needed.
    pub fn names<'n>(&self, candidates: impl IntoIterator<Item = &'n NodeInfo>) -> Vec<Proposal> {
        candidates
            .into_iter()
            .filter(|c| c.name.starts_with(&self.context.prefix))
            .map(|c| self.spanned(self.dialect.quote_if_needed(&c.name)))
            .collect()
    }

    /// Columns grouped per binding, each qualified by its binding's name, the
    /// way expression clauses propose them (`a.attribute1`).
    pub fn scoped_columns(&self, groups: &[(String, Vec<NodeInfo>)]) -> Vec<Proposal> {
        let mut out = Vec::new();
        for (qualifier, columns) in groups {
            let qualifier = self.dialect.quote_if_needed(qualifier);
            for column in columns {
                if !column.name.starts_with(&self.context.prefix) {
                    continue;
                }
                out.push(self.spanned(format!(
                    "{qualifier}.{}",
                    self.dialect.quote_if_needed(&column.name)
                )));
            }
        }
        out
    }

    /// Wildcard expansion: a single proposal joining every column, in order.
    /// Qualifiers arrive display-ready. With `keep_first_bare` the first
    /// column stays unqualified: the replacement span covers only the star,
    /// so the qualifier already typed in front of it carries over.
    pub fn wildcard(
        &self,
        entries: &[(Option<String>, Vec<NodeInfo>)],
        keep_first_bare: bool,
    ) -> Vec<Proposal> {
        let mut parts = Vec::new();
        for (qualifier, columns) in entries {
            for column in columns {
                let name = self.dialect.quote_if_needed(&column.name);
                let part = match qualifier {
                    Some(q) if !(keep_first_bare && parts.is_empty()) => format!("{q}.{name}"),
                    _ => name,
                };
                parts.push(part);
            }
        }
        if parts.is_empty() {
            return Vec::new();
        }
        vec![self.spanned(parts.iter().join(", "))]
    }
}
