//! Fixed name fragments and showcase entries.

/// First-name fragments combined into generated player names.
pub const FIRST_NAMES: [&str; 5] = ["rahul", "sai", "arjun", "kiran", "rohit"];

/// Last-name fragments combined into generated player names.
pub const LAST_NAMES: [&str; 5] = ["kumar", "reddy", "sharma", "verma", "patel"];

/// Number of entries returned by [`crate::showcase_players`].
pub const SHOWCASE_PLAYER_COUNT: usize = 10;

/// Individually named showcase players and their ratings.
pub(crate) const HEADLINERS: [(&str, i64); 2] =
    [("Legendary_Player_1", 5000), ("Master_Gamer_2", 4998)];

/// `Pro_Player_<n>` entries, numbered from 1.
pub(crate) const PRO_PLAYER_COUNT: i64 = 8;

/// Rating of `Pro_Player_1`; each later pro sits one point higher.
pub(crate) const PRO_PLAYER_BASE_RATING: i64 = 4990;
