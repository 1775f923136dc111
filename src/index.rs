//! Positional keys for host-side selection lists.
//!
//! Hosts that show a numbered list can map positions to single keystrokes
//! with these helpers: position 0 is `'0'`, 10 is `'a'`, 36 is `'A'`.

const INDEX_RUNES: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The full alphabet of index keys, in position order.
pub fn index_runes() -> Vec<char> {
    INDEX_RUNES.chars().collect()
}

/// Position of `rune` in the index alphabet.
pub fn rune_index(rune: char) -> Option<usize> {
    INDEX_RUNES.chars().position(|r| r == rune)
}

/// Key for list position `index`.
pub fn index_rune(index: usize) -> Option<char> {
    INDEX_RUNES.chars().nth(index)
}
