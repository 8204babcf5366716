use crate::*;
use crate::sql::{Keyword, Token, TokenKind, tokenize};

/// What the user is typing at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    /// A grammar keyword position (statement start, after a completed item).
    Keyword,
    /// A table (or schema / database) name in a FROM list.
    TableRef,
    /// A bare column name in a select list or condition.
    ColumnRef,
    /// A name behind a dotted qualifier chain, `alias.` / `schema.table.`.
    QualifiedRef,
    /// The `*` wildcard, bare or qualified.
    Wildcard,
}

/// Clause position derived from the nearest preceding clause keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseState {
    Start,
    SelectList,
    FromList,
    AfterFrom,
    WhereExpr,
    OnExpr,
}

/// Result of classifying a cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionContext {
    pub kind: ContextKind,
    /// Text typed so far for the token being completed (may be empty).
    pub prefix: String,
    /// Dotted qualifier segments preceding the prefix, unquoted values.
    pub qualifier: Vec<String>,
    pub clause: ClauseState,
    /// Span of already-typed text a proposal replaces.
    pub replace_at: usize,
    pub replace_len: usize,
}

/// Classify what is being typed at `cursor`.
///
/// A pure text heuristic: scan backward for the prefix and a dotted qualifier
/// chain, then decide the clause from the nearest significant tokens. Must
/// tolerate incomplete or invalid statements and never fails.
pub fn resolve(sql: &str, cursor: Cursor) -> CompletionContext {
    let mut pos = cursor.start().min(sql.len());
    while pos > 0 && !sql.is_char_boundary(pos) {
        pos -= 1;
    }
    let bytes = sql.as_bytes();

    // A star right before the cursor is a wildcard. Its replacement span
    // covers the star alone, so a qualifier typed in front of it stays in
    // the text when the expansion is inserted.
    if pos > 0 && bytes[pos - 1] == b'*' {
        let (qualifier, chain_start) = scan_qualifier(sql, pos - 1);
        let (_, clause) = classify(sql, chain_start);
        return CompletionContext {
            kind: ContextKind::Wildcard,
            prefix: "*".to_string(),
            qualifier,
            clause,
            replace_at: pos - 1,
            replace_len: 1,
        };
    }

    let mut start = pos;
    while start > 0 && is_ident_byte(bytes[start - 1]) {
        start -= 1;
    }
    let prefix = sql[start..pos].to_string();

    let (qualifier, chain_start) = scan_qualifier(sql, start);
    if !qualifier.is_empty() {
        let (_, clause) = classify(sql, chain_start);
        return CompletionContext {
            kind: ContextKind::QualifiedRef,
            prefix,
            qualifier,
            clause,
            replace_at: start,
            replace_len: pos - start,
        };
    }

    let (kind, clause) = classify(sql, start);
    CompletionContext {
        kind,
        prefix,
        qualifier: Vec::new(),
        clause,
        replace_at: start,
        replace_len: pos - start,
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Collect the dot-separated qualifier chain ending right before `at`.
/// Segments come back in source order, quoted segments already unescaped.
/// The second value is the chain's start offset (`at` when there is none).
fn scan_qualifier(sql: &str, at: usize) -> (Vec<String>, usize) {
    let bytes = sql.as_bytes();
    let mut segments = Vec::new();
    let mut cursor = at;

    while cursor > 0 && bytes[cursor - 1] == b'.' {
        let dot = cursor - 1;
        if dot == 0 {
            break;
        }
        if bytes[dot - 1] == b'"' {
            // Quoted segment: scan left for its opening quote, "" escapes
            // belong to the segment.
            let close = dot - 1;
            let mut open = None;
            let mut j = close;
            while j > 0 {
                j -= 1;
                if bytes[j] == b'"' {
                    if j > 0 && bytes[j - 1] == b'"' {
                        j -= 1;
                        continue;
                    }
                    open = Some(j);
                    break;
                }
            }
            let Some(open) = open else { break };
            segments.push(sql[open + 1..close].replace("\"\"", "\""));
            cursor = open;
        } else {
            let end = dot;
            let mut s = end;
            while s > 0 && is_ident_byte(bytes[s - 1]) {
                s -= 1;
            }
            if s == end {
                break;
            }
            segments.push(sql[s..end].to_string());
            cursor = s;
        }
    }

    segments.reverse();
    (segments, cursor)
}

fn is_operator(c: char) -> bool {
    matches!(c, '=' | '<' | '>' | '!' | '+' | '-' | '/' | '%')
}

/// Clause classification for the byte offset `before`: which completion fits
/// there and which clause the position belongs to.
fn classify(sql: &str, before: usize) -> (ContextKind, ClauseState) {
    let tokens = tokenize(sql);
    let scoped: Vec<&Token> = tokens.iter().filter(|t| t.end <= before).collect();

    let Some(prev) = scoped.last().copied() else {
        return (ContextKind::Keyword, ClauseState::Start);
    };
    let upto = scoped.len(); // nearest_clause scans include `prev` itself

    match &prev.kind {
        TokenKind::Keyword(Keyword::Select) => (ContextKind::ColumnRef, ClauseState::SelectList),
        TokenKind::Keyword(Keyword::Where) => (ContextKind::ColumnRef, ClauseState::WhereExpr),
        TokenKind::Keyword(Keyword::On) => (ContextKind::ColumnRef, ClauseState::OnExpr),
        TokenKind::Keyword(Keyword::And | Keyword::Or) => {
            let clause = match nearest_clause(&scoped, upto) {
                Some(Keyword::On) => ClauseState::OnExpr,
                _ => ClauseState::WhereExpr,
            };
            (ContextKind::ColumnRef, clause)
        }
        TokenKind::Keyword(Keyword::From | Keyword::Join) => {
            (ContextKind::TableRef, ClauseState::FromList)
        }
        TokenKind::Keyword(Keyword::By | Keyword::Having | Keyword::Distinct) => {
            (ContextKind::ColumnRef, ClauseState::SelectList)
        }
        TokenKind::Keyword(k) if Keyword::STATEMENT_BOUNDARIES.contains(k) => {
            (ContextKind::Keyword, ClauseState::Start)
        }
        // AS, GROUP, ORDER, LIMIT, join modifiers: a name or a fixed keyword
        // follows that we do not guess at.
        TokenKind::Keyword(_) => (ContextKind::Keyword, ClauseState::FromList),
        TokenKind::Comma => match nearest_clause(&scoped, upto) {
            Some(Keyword::Select) => (ContextKind::ColumnRef, ClauseState::SelectList),
            Some(Keyword::From | Keyword::Join) => (ContextKind::TableRef, ClauseState::FromList),
            Some(Keyword::Where) => (ContextKind::ColumnRef, ClauseState::WhereExpr),
            Some(Keyword::On) => (ContextKind::ColumnRef, ClauseState::OnExpr),
            _ => (ContextKind::Keyword, ClauseState::Start),
        },
        TokenKind::ParenOpen => (ContextKind::Keyword, ClauseState::Start),
        TokenKind::Other(';') => (ContextKind::Keyword, ClauseState::Start),
        TokenKind::Other(c) if is_operator(*c) => match nearest_clause(&scoped, upto) {
            Some(Keyword::Where) => (ContextKind::ColumnRef, ClauseState::WhereExpr),
            Some(Keyword::On) => (ContextKind::ColumnRef, ClauseState::OnExpr),
            Some(Keyword::Select) => (ContextKind::ColumnRef, ClauseState::SelectList),
            _ => (ContextKind::Keyword, ClauseState::Start),
        },
        // A completed item: identifier, quoted name, closed group or the
        // select star. The grammar decides what may follow.
        _ => {
            let clause = match nearest_clause(&scoped, upto) {
                Some(Keyword::Select) => ClauseState::SelectList,
                Some(Keyword::From | Keyword::Join) => ClauseState::AfterFrom,
                Some(Keyword::Where) => ClauseState::WhereExpr,
                Some(Keyword::On) => ClauseState::OnExpr,
                _ => ClauseState::Start,
            };
            (ContextKind::Keyword, clause)
        }
    }
}

/// Nearest clause-trigger keyword before `upto`, skipping completed nested
/// groups. Crossing an enclosing `(` keeps scanning the outer statement;
/// `;` and set-operation keywords end the search.
fn nearest_clause(scoped: &[&Token], upto: usize) -> Option<Keyword> {
    let mut depth = 0i32;
    for idx in (0..upto).rev() {
        let t = scoped[idx];
        match &t.kind {
            TokenKind::ParenClose => depth += 1,
            TokenKind::ParenOpen => {
                if depth > 0 {
                    depth -= 1;
                }
            }
            TokenKind::Other(';') if depth == 0 => return None,
            TokenKind::Keyword(k) if depth == 0 => match k {
                Keyword::Select | Keyword::From | Keyword::Join | Keyword::Where | Keyword::On => {
                    return Some(*k);
                }
                Keyword::Union | Keyword::Except | Keyword::Intersect => return None,
                _ => {}
            },
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    fn resolved(marked: &str) -> CompletionContext {
        let (sql, cursor) = at(marked);
        resolve(&sql, cursor)
    }

    #[rstest]
    #[case("|", ContextKind::Keyword, ClauseState::Start, "")]
    #[case("SEL|", ContextKind::Keyword, ClauseState::Start, "SEL")]
    #[case("SELECT * |", ContextKind::Keyword, ClauseState::SelectList, "")]
    #[case("SELECT * FROM T |", ContextKind::Keyword, ClauseState::AfterFrom, "")]
    #[case("SELECT * FROM t WHERE a = 1 |", ContextKind::Keyword, ClauseState::WhereExpr, "")]
    #[case("SELECT a FROM t UNION |", ContextKind::Keyword, ClauseState::Start, "")]
    #[case("SELECT a FROM t; |", ContextKind::Keyword, ClauseState::Start, "")]
    fn keyword_positions(
        #[case] marked: &str,
        #[case] kind: ContextKind,
        #[case] clause: ClauseState,
        #[case] prefix: &str,
    ) {
        let ctx = resolved(marked);
        assert_eq!(ctx.kind, kind);
        assert_eq!(ctx.clause, clause);
        assert_eq!(ctx.prefix, prefix);
    }

    #[rstest]
    #[case("SELECT | FROM Table1", ClauseState::SelectList, "")]
    #[case("SELECT Co| FROM Table1", ClauseState::SelectList, "Co")]
    #[case("SELECT a, | FROM Table1", ClauseState::SelectList, "")]
    #[case("SELECT * FROM Table1 WHERE |", ClauseState::WhereExpr, "")]
    #[case("SELECT * FROM a, b WHERE x = 1 AND |", ClauseState::WhereExpr, "")]
    #[case("SELECT * FROM a JOIN b ON |", ClauseState::OnExpr, "")]
    #[case("SELECT * FROM a JOIN b ON a.x = b.y OR |", ClauseState::OnExpr, "")]
    #[case("SELECT * FROM t WHERE a = |", ClauseState::WhereExpr, "")]
    #[case("SELECT DISTINCT | FROM t", ClauseState::SelectList, "")]
    #[case("SELECT * FROM t GROUP BY |", ClauseState::SelectList, "")]
    fn column_positions(
        #[case] marked: &str,
        #[case] clause: ClauseState,
        #[case] prefix: &str,
    ) {
        let ctx = resolved(marked);
        assert_eq!(ctx.kind, ContextKind::ColumnRef);
        assert_eq!(ctx.clause, clause);
        assert_eq!(ctx.prefix, prefix);
    }

    #[rstest]
    #[case("SELECT * FROM |", "")]
    #[case("SELECT * FROM Tb|", "Tb")]
    #[case("SELECT * FROM a, |", "")]
    #[case("SELECT * FROM a JOIN |", "")]
    fn table_positions(#[case] marked: &str, #[case] prefix: &str) {
        let ctx = resolved(marked);
        assert_eq!(ctx.kind, ContextKind::TableRef);
        assert_eq!(ctx.clause, ClauseState::FromList);
        assert_eq!(ctx.prefix, prefix);
    }

    #[rstest]
    #[case("SELECT t.| FROM Table1 t", &["t"], "")]
    #[case("SELECT t.Co| FROM Table1 t", &["t"], "Co")]
    #[case("SELECT * FROM Schema1.|", &["Schema1"], "")]
    #[case("SELECT * FROM Database1.Schema1.|", &["Database1", "Schema1"], "")]
    #[case("SELECT * FROM Database3.\"a.schema\".|", &["Database3", "a.schema"], "")]
    #[case("SELECT * FROM t WHERE t.co|", &["t"], "co")]
    fn qualified_positions(
        #[case] marked: &str,
        #[case] qualifier: &[&str],
        #[case] prefix: &str,
    ) {
        let ctx = resolved(marked);
        assert_eq!(ctx.kind, ContextKind::QualifiedRef);
        assert_eq!(ctx.qualifier, qualifier);
        assert_eq!(ctx.prefix, prefix);
    }

    #[test]
    fn wildcard_bare() {
        let ctx = resolved("SELECT *| FROM Table1");
        assert_eq!(ctx.kind, ContextKind::Wildcard);
        assert!(ctx.qualifier.is_empty());
        assert_eq!((ctx.replace_at, ctx.replace_len), (7, 1));
    }

    #[test]
    fn wildcard_qualified_span_covers_star_only() {
        let ctx = resolved("SELECT t.*| FROM Table1 t");
        assert_eq!(ctx.kind, ContextKind::Wildcard);
        assert_eq!(ctx.qualifier, vec!["t"]);
        assert_eq!((ctx.replace_at, ctx.replace_len), (9, 1));
    }

    #[test]
    fn replacement_span_tracks_prefix() {
        let ctx = resolved("SELECT * FROM Tb|");
        assert_eq!((ctx.replace_at, ctx.replace_len), (14, 2));

        let ctx = resolved("SELECT * FROM Database3.|");
        assert_eq!((ctx.replace_at, ctx.replace_len), (24, 0));
    }

    #[test]
    fn quoted_qualifier_unescapes_doubled_quotes() {
        let ctx = resolved("SELECT * FROM \"we\"\"ird\".|");
        assert_eq!(ctx.kind, ContextKind::QualifiedRef);
        assert_eq!(ctx.qualifier, vec!["we\"ird"]);
    }

    #[test]
    fn subquery_classification_uses_inner_select() {
        let ctx = resolved("SELECT (SELECT | FROM inner1) FROM outer1");
        assert_eq!(ctx.kind, ContextKind::ColumnRef);
        assert_eq!(ctx.clause, ClauseState::SelectList);
    }

    #[test]
    fn open_paren_expects_a_statement() {
        let ctx = resolved("SELECT * FROM (|");
        assert_eq!(ctx.kind, ContextKind::Keyword);
        assert_eq!(ctx.clause, ClauseState::Start);
    }

    #[test]
    fn never_panics_on_garbage() {
        for sql in ["", ".", "...", "\"", "((((", "SELECT ..", "a.b.c.d.e.f|||"] {
            let _ = resolve(sql, Cursor::at(sql.len()));
            let _ = resolve(sql, Cursor::at(0));
            let _ = resolve(sql, Cursor::at(usize::MAX));
        }
    }
}
