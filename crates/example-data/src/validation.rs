//! Player name validation mirroring backend constraints.
//!
//! The backend accepts any non-blank, trimmed identifier; generated names are
//! held to a stricter shape so they survive URL query strings and Redis glob
//! patterns unescaped.
//!
//! # Validation Rules
//!
//! - Length between 1 and [`PLAYER_NAME_MAX`] characters
//! - Allowed characters: letters (A-Z, a-z), digits (0-9), underscores

/// Maximum allowed length for a generated player name.
pub const PLAYER_NAME_MAX: usize = 64;

/// Validates a generated player name.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_player_name;
///
/// assert!(is_valid_player_name("rahul_kumar_17"));
/// assert!(is_valid_player_name("Legendary_Player_1"));
/// assert!(!is_valid_player_name(""));
/// assert!(!is_valid_player_name("rahul kumar"));
/// assert!(!is_valid_player_name("pro*player"));
/// ```
#[must_use]
pub fn is_valid_player_name(name: &str) -> bool {
    let length = name.chars().count();
    (1..=PLAYER_NAME_MAX).contains(&length) && name.chars().all(is_valid_player_name_char)
}

const fn is_valid_player_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    //! Covers player name validation.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("a", true)]
    #[case("rohit_patel_9999", true)]
    #[case("Pro_Player_8", true)]
    #[case("", false)]
    #[case(" ", false)]
    #[case("kiran-verma", false)]
    #[case("arjun[1]", false)]
    #[case("sai?", false)]
    fn validates_player_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_player_name(name), expected);
    }

    #[test]
    fn rejects_names_exceeding_max_length() {
        assert!(!is_valid_player_name(&"a".repeat(PLAYER_NAME_MAX + 1)));
        assert!(is_valid_player_name(&"a".repeat(PLAYER_NAME_MAX)));
    }
}
