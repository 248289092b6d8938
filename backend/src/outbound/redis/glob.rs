//! Translate a substring query into a Redis `MATCH` pattern.
//!
//! Redis globs are case-sensitive, so every ASCII letter becomes a two-letter
//! class (`a` → `[aA]`). Glob metacharacters are escaped with a backslash.
//! A glob cannot fold non-ASCII case, so a query holding any non-ASCII
//! character matches everything and the filtering is left to
//! [`SearchQuery::matches`](crate::domain::SearchQuery::matches), which
//! callers apply to every returned member.

use crate::domain::SearchQuery;

const METACHARACTERS: [char; 6] = ['*', '?', '[', ']', '\\', '^'];

/// `*<query>*` with case folding and escaping applied, or `*` when the
/// query is not pure ASCII.
pub(crate) fn containment_pattern(query: &SearchQuery) -> String {
    let raw = query.as_str();
    if !raw.is_ascii() {
        return "*".to_owned();
    }
    let mut pattern = String::with_capacity(raw.len() * 4 + 2);
    pattern.push('*');
    for ch in raw.chars() {
        if ch.is_ascii_alphabetic() {
            pattern.push('[');
            pattern.push(ch.to_ascii_lowercase());
            pattern.push(ch.to_ascii_uppercase());
            pattern.push(']');
        } else {
            if METACHARACTERS.contains(&ch) {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
    }
    pattern.push('*');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Pro", "*[pP][rR][oO]*")]
    #[case("_7", "*_7*")]
    #[case("a*b", "*[aA]\\*[bB]*")]
    #[case("[x]?", "*\\[[xX]\\]\\?*")]
    #[case("^\\", "*\\^\\\\*")]
    #[case(" a", "* [aA]*")]
    #[case("é1", "*")]
    #[case("Émile", "*")]
    fn builds_case_insensitive_escaped_globs(#[case] raw: &str, #[case] expected: &str) {
        let query = SearchQuery::new(raw).expect("query");
        assert_eq!(containment_pattern(&query), expected);
    }

    #[rstest]
    #[case("É", "émile")]
    #[case("ÉMI", "Émile_7")]
    fn non_ascii_patterns_let_folded_matches_through(#[case] raw: &str, #[case] member: &str) {
        let query = SearchQuery::new(raw).expect("query");
        assert_eq!(containment_pattern(&query), "*");
        assert!(query.matches(member));
    }
}
