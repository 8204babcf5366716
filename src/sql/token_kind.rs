//! Token kind definitions for the lenient SQL tokenizer.
//!
//! Each `TokenKind` variant is a syntactic atom discovered during the scan.
//! The tokenizer avoids strict SQL rules; anything unrecognized becomes
//! `Other(char)` instead of an error.
//!
//! Identifier casing is preserved: `Ident` keeps the text as typed, `Quoted`
//! keeps the content between the double quotes with `""` escapes already
//! collapsed. Structural punctuation is limited to the characters the
//! completion heuristics care about (comma, dot, parentheses).

use crate::sql::keyword::Keyword;

/// Classification for a token produced by the tokenizer.
///
/// Not a full SQL lexeme set; intentionally small and pragmatic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Table / alias / column / generic identifier.
    Ident(String),
    /// Quoted identifier, content unescaped (`"a""b"` yields `a"b`).
    Quoted(String),
    /// Recognized SQL keyword.
    Keyword(Keyword),
    /// Comma `,` separating list items.
    Comma,
    /// Dot `.` joining qualified name segments.
    Dot,
    /// Opening parenthesis `(`.
    ParenOpen,
    /// Closing parenthesis `)`.
    ParenClose,
    /// Any other single character we do not specially classify.
    Other(char),
}

impl TokenKind {
    /// True if this token is the given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    /// Returns the identifier text if this token is a plain `Ident`.
    pub fn ident(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the name carried by this token, plain or quoted.
    pub fn name(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(s) | TokenKind::Quoted(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns true if this token is structural punctuation.
    pub fn is_punctuation(&self) -> bool {
        matches!(
            self,
            TokenKind::Comma | TokenKind::Dot | TokenKind::ParenOpen | TokenKind::ParenClose
        )
    }
}
