//! Lightweight, lenient SQL tokenization module.
//!
//! This module groups the building blocks the completion engine uses to reason
//! about a SQL query near a cursor position without requiring a full parser:
//!
//! - `keyword`    : Small enum of only the keywords needed for completion.
//! - `token_kind` : Classification of lexical atoms.
//! - `token`      : Token struct pairing a `TokenKind` with source spans.
//! - `tokenizer`  : Single pass O(n) tokenizer producing a `Vec<Token>`.
//!
//! Design principles:
//! 1. Accept incomplete / syntactically invalid SQL (robust for live editing).
//! 2. Preserve original identifier casing for display & lookup.
//! 3. Keep the keyword set purposely small; extend only when completion logic
//!    demands.
//!
//! Example:
//! ```rust
//! use qcomplete::prelude::*;
//!
//! let tokens = tokenize("SELECT a, b FROM my_table");
//! assert!(tokens.iter().any(|t| t.is_keyword(Keyword::Select)));
//! assert!(tokens.iter().any(|t| t.ident() == Some("my_table")));
//! ```
//!
//! NOTE: This is **not** a full SQL parser and intentionally ignores many
//! constructs that the completion heuristics never look at.

pub mod keyword;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use keyword::Keyword;
pub use token::Token;
pub use token_kind::TokenKind;
pub use tokenizer::tokenize;

/// Convenience prelude re-exporting the most commonly used items.
pub mod prelude {
    pub use super::{Keyword, Token, TokenKind, tokenize};
}
