use crate::*;

/// Per-database completion grammar and identifier quoting policy.
///
/// Name matching elsewhere in the crate is exact-case literal; folding rules
/// for case-insensitive databases would land here as a further policy.
#[derive(Debug, Clone)]
pub struct Dialect {
    pub name: &'static str,
    /// Identifier quote character, `"` for the generic dialect.
    pub quote: char,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::generic()
    }
}

impl Dialect {
    pub const fn generic() -> Self {
        Self {
            name: "generic",
            quote: '"',
        }
    }

    /// Keywords the grammar allows next at a clause position. Name positions
    /// (a table right after FROM, an expression right after WHERE) expect
    /// none: only completed items open a keyword slot.
    pub fn next_keywords(&self, clause: ClauseState) -> &'static [&'static str] {
        match clause {
            ClauseState::Start => &["SELECT"],
            ClauseState::SelectList => &["FROM"],
            ClauseState::FromList => &[],
            ClauseState::AfterFrom => &["WHERE"],
            ClauseState::WhereExpr => &["AND", "OR"],
            ClauseState::OnExpr => &["AND", "OR", "WHERE"],
        }
    }

    /// Return `name` unchanged when it matches `[A-Za-z_][A-Za-z0-9_]*`, else
    /// wrapped in the quote character with embedded quotes doubled.
    pub fn quote_if_needed(&self, name: &str) -> String {
        if is_plain_identifier(name) {
            return name.to_string();
        }
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(self.quote);
        for c in name.chars() {
            if c == self.quote {
                quoted.push(self.quote);
            }
            quoted.push(c);
        }
        quoted.push(self.quote);
        quoted
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_identifiers_stay_bare() {
        let dialect = Dialect::generic();
        for name in ["Col1", "a", "_private", "snake_case", "CamelCase2"] {
            assert_eq!(dialect.quote_if_needed(name), name);
        }
    }

    #[test]
    fn irregular_identifiers_get_quoted() {
        let dialect = Dialect::generic();
        assert_eq!(dialect.quote_if_needed("attribute-a"), "\"attribute-a\"");
        assert_eq!(dialect.quote_if_needed("a.schema"), "\"a.schema\"");
        assert_eq!(dialect.quote_if_needed("Table 3"), "\"Table 3\"");
        assert_eq!(dialect.quote_if_needed("1col"), "\"1col\"");
        assert_eq!(dialect.quote_if_needed(""), "\"\"");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let dialect = Dialect::generic();
        assert_eq!(dialect.quote_if_needed("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn keyword_slots_follow_completed_items_only() {
        let dialect = Dialect::generic();
        assert_eq!(dialect.next_keywords(ClauseState::Start), &["SELECT"]);
        assert_eq!(dialect.next_keywords(ClauseState::SelectList), &["FROM"]);
        assert_eq!(dialect.next_keywords(ClauseState::AfterFrom), &["WHERE"]);
        assert!(dialect.next_keywords(ClauseState::FromList).is_empty());
    }
}
