//! SQL keyword model used by the lenient tokenizer and the completion logic.
//!
//! Only the keywords the completion heuristics actually reason about are
//! listed here. The set is intentionally small; parsing stays lenient and
//! everything unrecognized is treated as a plain identifier. Extend it only
//! when a new completion context needs to tell a keyword from an alias.
//!
//! Matching is case-insensitive via `from_lower`, which expects the caller to
//! hand in an already lower-cased slice so tokenization does not allocate for
//! every word.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    Distinct,
    From,
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    On,
    As,
    Where,
    And,
    Or,
    Group,
    Order,
    By,
    Having,
    Limit,
    Offset,
    Union,
    Except,
    Intersect,
}

impl Keyword {
    /// Keywords that terminate a FROM list.
    pub const TERMINATORS: [Self; 9] = [
        Keyword::Where,
        Keyword::Group,
        Keyword::Order,
        Keyword::Having,
        Keyword::Limit,
        Keyword::Offset,
        Keyword::Union,
        Keyword::Except,
        Keyword::Intersect,
    ];

    /// Keywords that start a new statement scope within one buffer.
    pub const STATEMENT_BOUNDARIES: [Self; 3] =
        [Keyword::Union, Keyword::Except, Keyword::Intersect];

    /// Attempt to classify a *lower-cased* word slice into a `Keyword`.
    /// Returns `None` if the word is not a recognized keyword.
    pub fn from_lower(word: &str) -> Option<Self> {
        use Keyword::*;
        let kw = match word {
            "select" => Select,
            "distinct" => Distinct,
            "from" => From,
            "join" => Join,
            "inner" => Inner,
            "left" => Left,
            "right" => Right,
            "full" => Full,
            "outer" => Outer,
            "cross" => Cross,
            "on" => On,
            "as" => As,
            "where" => Where,
            "and" => And,
            "or" => Or,
            "group" => Group,
            "order" => Order,
            "by" => By,
            "having" => Having,
            "limit" => Limit,
            "offset" => Offset,
            "union" => Union,
            "except" => Except,
            "intersect" => Intersect,
            _ => return None,
        };
        Some(kw)
    }

    /// Canonical lowercase string form of the keyword.
    pub const fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            Select => "select",
            Distinct => "distinct",
            From => "from",
            Join => "join",
            Inner => "inner",
            Left => "left",
            Right => "right",
            Full => "full",
            Outer => "outer",
            Cross => "cross",
            On => "on",
            As => "as",
            Where => "where",
            And => "and",
            Or => "or",
            Group => "group",
            Order => "order",
            By => "by",
            Having => "having",
            Limit => "limit",
            Offset => "offset",
            Union => "union",
            Except => "except",
            Intersect => "intersect",
        }
    }

}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
