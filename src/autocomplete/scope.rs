use crate::*;
use crate::sql::{Keyword, Token, TokenKind, tokenize};

/// One resolved table reference from the FROM list of the statement under the
/// cursor. `alias` is the name the statement refers to it by: the explicit
/// alias as typed, or the bare last path segment when unaliased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBinding {
    pub alias: String,
    pub explicit: bool,
    pub table: NodeInfo,
}

/// Alias bindings scoped to one statement or subquery. The set is rebuilt per
/// request and dies with it; crossing into another statement's token range
/// yields a different scope.
#[derive(Debug, Default)]
pub struct StatementScope {
    pub bindings: Vec<TableBinding>,
}

impl StatementScope {
    /// Exact, case-sensitive lookup. Explicit aliases win over implicit ones,
    /// so `FROM real AS fake, fake` resolves `fake` to `real`.
    pub fn resolve(&self, qualifier: &str) -> Option<&TableBinding> {
        self.bindings
            .iter()
            .filter(|b| b.explicit)
            .find(|b| b.alias == qualifier)
            .or_else(|| self.bindings.iter().find(|b| b.alias == qualifier))
    }
}

/// Collect the table bindings in scope at `cursor`.
///
/// Strategy:
/// 1. Tokenize the SQL.
/// 2. Find the last `SELECT` before the cursor, tracking parenthesis depth to
///    tell nested subqueries apart.
/// 3. From there, find the matching `FROM` at the same depth.
/// 4. Walk the FROM list splitting on commas and JOINs, collecting dotted
///    paths (`table`, `schema.table`, `db.schema.table`, segments may be
///    quoted) with their optional aliases, until a terminating clause.
/// 5. Resolve each path against the catalog; unresolvable paths are dropped
///    silently and simply contribute no candidates.
pub async fn bind<C: CatalogReader>(
    sql: &str,
    cursor: Cursor,
    catalog: &C,
    cancel: &CancelToken,
) -> Result<StatementScope> {
    let tokens = tokenize(sql);
    let pos = cursor.start().min(sql.len());

    // A bare fragment like `FROM t WHERE ...` has no SELECT; anchor on the
    // statement start instead.
    let (anchor, depth0) = match locate_select(&tokens, pos) {
        Some((idx, depth)) => (idx + 1, depth),
        None => (0, 0),
    };
    let Some(from_idx) = locate_from(&tokens, anchor, depth0) else {
        return Ok(StatementScope::default());
    };

    let mut scope = StatementScope::default();
    let mut depth = depth0;
    let mut i = from_idx + 1;
    while let Some(t) = tokens.get(i) {
        match t.kind {
            TokenKind::ParenOpen => {
                depth += 1;
                i += 1;
                continue;
            }
            TokenKind::ParenClose => {
                depth -= 1;
                if depth < depth0 {
                    break; // closed out of our statement scope
                }
                i += 1;
                continue;
            }
            _ => {}
        }
        if depth != depth0 {
            i += 1;
            continue;
        }

        if matches!(t.kind, TokenKind::Other(';')) {
            break;
        }
        if let TokenKind::Keyword(k) = t.kind {
            if Keyword::TERMINATORS.contains(&k) {
                break;
            }
            if k == Keyword::On {
                i = skip_join_condition(&tokens, i + 1);
                continue;
            }
            // JOIN and its modifiers separate items, AS is consumed with them
            i += 1;
            continue;
        }
        if matches!(t.kind, TokenKind::Comma) {
            i += 1;
            continue;
        }

        if t.name().is_some() {
            let (path, alias, next) = parse_item(&tokens, i);
            i = next;
            match lookup_path(catalog, &path, cancel).await? {
                Some(node) if node.kind == NodeKind::Table => {
                    let (alias, explicit) = match alias {
                        Some(alias) => (alias, true),
                        None => (path.last().cloned().unwrap_or_default(), false),
                    };
                    scope.bindings.push(TableBinding {
                        alias,
                        explicit,
                        table: node,
                    });
                }
                _ => {
                    trace!(?path, "dropping unresolvable table reference");
                }
            }
            continue;
        }

        i += 1;
    }
    Ok(scope)
}

/// Index and parenthesis depth of the last `SELECT` token that starts before
/// `pos`. Depth counting distinguishes nested subqueries: only tokens at the
/// same depth belong to the same statement.
fn locate_select(tokens: &[Token], pos: usize) -> Option<(usize, i32)> {
    let mut depth = 0;
    let mut last = None;
    for (idx, t) in tokens.iter().enumerate() {
        if t.start >= pos {
            break;
        }
        match t.kind {
            TokenKind::ParenOpen => depth += 1,
            TokenKind::ParenClose => depth -= 1,
            _ => {}
        }
        if t.is_keyword(Keyword::Select) {
            last = Some((idx, depth));
        }
    }
    last
}

/// Scan forward from `start` for the `FROM` at `depth0`, giving up at a
/// statement boundary.
fn locate_from(tokens: &[Token], start: usize, depth0: i32) -> Option<usize> {
    let mut depth = depth0;
    for (idx, t) in tokens.iter().enumerate().skip(start) {
        match t.kind {
            TokenKind::ParenOpen => depth += 1,
            TokenKind::ParenClose => {
                depth -= 1;
                if depth < depth0 {
                    return None;
                }
            }
            _ => {}
        }
        if depth != depth0 {
            continue;
        }
        if t.is_keyword(Keyword::From) {
            return Some(idx);
        }
        if matches!(t.kind, TokenKind::Other(';')) {
            return None;
        }
        if let TokenKind::Keyword(k) = t.kind {
            if Keyword::STATEMENT_BOUNDARIES.contains(&k) {
                return None;
            }
        }
    }
    None
}

/// Skip an ON condition: returns the index of the next JOIN, list comma,
/// terminator or scope-closing paren, leaving that token for the caller.
fn skip_join_condition(tokens: &[Token], mut i: usize) -> usize {
    let mut depth = 0i32;
    while let Some(t) = tokens.get(i) {
        match &t.kind {
            TokenKind::ParenOpen => depth += 1,
            TokenKind::ParenClose => {
                if depth == 0 {
                    return i;
                }
                depth -= 1;
            }
            TokenKind::Comma if depth == 0 => return i,
            TokenKind::Other(';') => return i,
            TokenKind::Keyword(k) if depth == 0 => {
                if *k == Keyword::Join || Keyword::TERMINATORS.contains(k) {
                    return i;
                }
            }
            _ => {}
        }
        i += 1;
    }
    i
}

/// Parse one FROM-list item starting at `i`: a dotted path plus an optional
/// alias (`table AS a`, `table a`, or none). Returns the path segments, the
/// alias and the index after the consumed tokens.
fn parse_item(tokens: &[Token], i: usize) -> (Vec<String>, Option<String>, usize) {
    let mut path = vec![tokens[i].name().unwrap_or_default().to_string()];
    let mut j = i + 1;
    while matches!(tokens.get(j).map(|t| &t.kind), Some(TokenKind::Dot)) {
        match tokens.get(j + 1).and_then(|t| t.name()) {
            Some(name) => {
                path.push(name.to_string());
                j += 2;
            }
            None => {
                // trailing dot, e.g. `FROM Schema1.` while still typing
                j += 1;
                break;
            }
        }
    }
    let alias = match tokens.get(j).map(|t| &t.kind) {
        Some(TokenKind::Keyword(Keyword::As)) => match tokens.get(j + 1).and_then(|t| t.ident()) {
            Some(alias) => {
                j += 2;
                Some(alias.to_string())
            }
            None => {
                j += 1;
                None
            }
        },
        Some(TokenKind::Ident(alias)) => {
            let alias = alias.clone();
            j += 1;
            Some(alias)
        }
        _ => None,
    };
    (path, alias, j)
}
