use crate::sql::{keyword::Keyword, token::Token, token_kind::TokenKind};

/// Lenient SQL tokenizer producing a flat stream of `Token`s.
///
/// Scope / Intent:
/// - Designed for cursor-aware completion over SQL that is still being typed.
/// - Accepts incomplete / syntactically invalid SQL (e.g. `SELECT FROM`,
///   `JOIN , table`, an unterminated quoted identifier).
/// - Classifies only the minimal keyword set defined in `keyword.rs`.
///
/// Behavior:
/// - Skips ASCII whitespace.
/// - Aggregates `[A-Za-z0-9_]` runs into identifiers, preserving original case.
/// - Lowercases an identifier once to attempt keyword classification.
/// - Scans `"` delimited identifiers, collapsing doubled `""` into a literal
///   quote; a missing closing quote swallows the rest of the input instead of
///   failing.
/// - Emits single-character tokens for comma, dot, parentheses; everything
///   else is `Other(char)`.
///
/// Guarantees:
/// - Never panics on valid UTF-8 & bounded indices.
/// - Never returns an error (malformed constructs still yield tokens).
///
/// Complexity:
/// - O(n) time, O(t) space where `t` is number of tokens.
pub fn tokenize(sql: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = sql.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;

        // Skip whitespace quickly
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let start = i;

        // Identifier path
        if c.is_ascii_alphanumeric() || c == '_' {
            i += 1;
            while i < bytes.len() {
                let cc = bytes[i] as char;
                if cc.is_ascii_alphanumeric() || cc == '_' {
                    i += 1;
                } else {
                    break;
                }
            }
            let text = &sql[start..i];
            let lower = text.to_ascii_lowercase();
            let kind = Keyword::from_lower(&lower)
                .map(TokenKind::Keyword)
                .unwrap_or_else(|| TokenKind::Ident(text.to_string()));
            out.push(Token::new(kind, start, i));
            continue;
        }

        // Quoted identifier path
        if c == '"' {
            i += 1;
            let mut text = String::new();
            let mut seg = i;
            let mut closed = false;
            while i < bytes.len() {
                if bytes[i] == b'"' {
                    text.push_str(&sql[seg..i]);
                    if bytes.get(i + 1) == Some(&b'"') {
                        // Doubled quote is an escaped literal quote
                        text.push('"');
                        i += 2;
                        seg = i;
                        continue;
                    }
                    i += 1;
                    closed = true;
                    break;
                }
                i += 1;
            }
            if !closed {
                text.push_str(&sql[seg..]);
            }
            out.push(Token::new(TokenKind::Quoted(text), start, i));
            continue;
        }

        // Single-character tokens
        i += 1;
        let kind = match c {
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '(' => TokenKind::ParenOpen,
            ')' => TokenKind::ParenClose,
            other => TokenKind::Other(other),
        };
        out.push(Token::new(kind, start, i));
    }

    out
}
