use crate::*;
use itertools::Itertools;

/// Per-analyzer knobs.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerOptions {
    /// Offer grammar keywords, both in keyword positions and as the fallback
    /// when nothing semantic matched.
    pub include_keywords: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            include_keywords: true,
        }
    }
}

/// Result of one completion request.
#[derive(Debug, Default)]
pub struct Completion {
    pub proposals: Vec<Proposal>,
    /// Set when a catalog read was interrupted (cancelled, timed out, source
    /// failure); `proposals` then holds whatever resolved before that.
    pub failure: Option<Error>,
}

impl Completion {
    pub fn is_degraded(&self) -> bool {
        self.failure.is_some()
    }
}

/// Cursor-aware completion over one catalog snapshot and dialect.
///
/// `request` is deterministic: the same text, cursor and snapshot always
/// produce the same ordered proposals. It never fails; malformed input
/// degrades to keyword proposals or an empty list, catalog failures come back
/// typed on the `Completion`.
pub struct CompletionAnalyzer<'a, C> {
    catalog: &'a C,
    dialect: Dialect,
    options: AnalyzerOptions,
}

impl<'a, C: CatalogReader> CompletionAnalyzer<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            dialect: Dialect::default(),
            options: AnalyzerOptions::default(),
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_options(mut self, options: AnalyzerOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn request(&self, sql: &str, cursor: Cursor) -> Completion {
        self.request_with_cancel(sql, cursor, &CancelToken::new())
            .await
    }

    /// Pipeline: classify the cursor position, gather semantic candidates
    /// through the catalog, fall back to the keyword grammar. Semantic and
    /// keyword proposals are never interleaved; keywords follow only when
    /// nothing semantic matched and the grammar expects a keyword there.
    pub async fn request_with_cancel(
        &self,
        sql: &str,
        cursor: Cursor,
        cancel: &CancelToken,
    ) -> Completion {
        let context = resolve(sql, cursor);
        debug!(
            kind = ?context.kind,
            clause = ?context.clause,
            prefix = %context.prefix,
            dialect = self.dialect.name,
            "resolved completion context"
        );

        let (mut proposals, failure) = self.gather(sql, cursor, &context, cancel).await;
        if let Some(err) = &failure {
            warn!(%err, "catalog read interrupted, degrading to partial result");
        }
        if proposals.is_empty() && self.options.include_keywords {
            let builder = ProposalBuilder::new(&self.dialect, &context);
            let expected: &[&str] = match context.kind {
                ContextKind::Keyword => self.dialect.next_keywords(context.clause),
                // name positions legitimately expect no keyword
                _ => &[],
            };
            proposals.extend(builder.keywords(expected));
        }
        Completion { proposals, failure }
    }

    /// Semantic candidates for the context. Never fails outright: a catalog
    /// error comes back alongside the proposals gathered up to that point.
    async fn gather(
        &self,
        sql: &str,
        cursor: Cursor,
        context: &CompletionContext,
        cancel: &CancelToken,
    ) -> (Vec<Proposal>, Option<Error>) {
        let builder = ProposalBuilder::new(&self.dialect, context);
        match context.kind {
            ContextKind::Keyword => (Vec::new(), None),

            ContextKind::TableRef => match self.catalog.children(None, cancel).await {
                Ok(roots) => (builder.names(&roots), None),
                Err(err) => (Vec::new(), Some(err)),
            },

            ContextKind::QualifiedRef => {
                match self
                    .resolve_qualifier(sql, cursor, &context.qualifier, cancel)
                    .await
                {
                    Ok(Some(target)) => match self.catalog.children(Some(target.id), cancel).await
                    {
                        Ok(children) => (builder.names(&children), None),
                        Err(err) => (Vec::new(), Some(err)),
                    },
                    Ok(None) => (Vec::new(), None),
                    Err(err) => (Vec::new(), Some(err)),
                }
            }

            ContextKind::ColumnRef => {
                let scope = match bind(sql, cursor, self.catalog, cancel).await {
                    Ok(scope) => scope,
                    Err(err) => return (Vec::new(), Some(err)),
                };
                let qualify =
                    matches!(context.clause, ClauseState::WhereExpr | ClauseState::OnExpr);
                let mut groups: Vec<(String, Vec<NodeInfo>)> = Vec::new();
                for binding in &scope.bindings {
                    match self.catalog.children(Some(binding.table.id), cancel).await {
                        Ok(columns) => groups.push((binding.alias.clone(), columns)),
                        Err(err) => {
                            return (column_proposals(&builder, &groups, qualify), Some(err));
                        }
                    }
                }
                (column_proposals(&builder, &groups, qualify), None)
            }

            ContextKind::Wildcard => {
                if context.qualifier.is_empty() {
                    let scope = match bind(sql, cursor, self.catalog, cancel).await {
                        Ok(scope) => scope,
                        Err(err) => return (Vec::new(), Some(err)),
                    };
                    let multiple = scope.bindings.len() > 1;
                    let mut entries: Vec<(Option<String>, Vec<NodeInfo>)> = Vec::new();
                    for binding in &scope.bindings {
                        match self.catalog.children(Some(binding.table.id), cancel).await {
                            Ok(columns) => {
                                let qualifier = multiple
                                    .then(|| self.dialect.quote_if_needed(&binding.alias));
                                entries.push((qualifier, columns));
                            }
                            Err(err) => {
                                return (builder.wildcard(&entries, false), Some(err));
                            }
                        }
                    }
                    (builder.wildcard(&entries, false), None)
                } else {
                    match self
                        .resolve_qualifier(sql, cursor, &context.qualifier, cancel)
                        .await
                    {
                        Ok(Some(target)) => {
                            match self.catalog.children(Some(target.id), cancel).await {
                                Ok(columns) => {
                                    let display = context
                                        .qualifier
                                        .iter()
                                        .map(|s| self.dialect.quote_if_needed(s))
                                        .join(".");
                                    (builder.wildcard(&[(Some(display), columns)], true), None)
                                }
                                Err(err) => (Vec::new(), Some(err)),
                            }
                        }
                        Ok(None) => (Vec::new(), None),
                        Err(err) => (Vec::new(), Some(err)),
                    }
                }
            }
        }
    }

    /// A qualifier names, in order of preference: a statement alias (single
    /// segment only), then a catalog path walked from the roots.
    async fn resolve_qualifier(
        &self,
        sql: &str,
        cursor: Cursor,
        qualifier: &[String],
        cancel: &CancelToken,
    ) -> Result<Option<NodeInfo>> {
        if let [single] = qualifier {
            let scope = bind(sql, cursor, self.catalog, cancel).await?;
            if let Some(binding) = scope.resolve(single) {
                debug!(alias = %single, table = %binding.table.name, "qualifier matched an alias binding");
                return Ok(Some(binding.table.clone()));
            }
        }
        lookup_path(self.catalog, qualifier, cancel).await
    }
}

fn column_proposals(
    builder: &ProposalBuilder<'_>,
    groups: &[(String, Vec<NodeInfo>)],
    qualify: bool,
) -> Vec<Proposal> {
    if qualify {
        builder.scoped_columns(groups)
    } else {
        builder.names(groups.iter().flat_map(|(_, columns)| columns))
    }
}
