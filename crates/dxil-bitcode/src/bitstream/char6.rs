//! The 6-bit identifier alphabet.
//!
//! A character's code is its position in `a-z A-Z 0-9 . _`.

/// All 64 encodable characters, indexed by code.
pub const ALPHABET: &[u8; 64] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._";

/// Code for `ch`, or `None` if the alphabet has no such character.
pub fn encode(ch: char) -> Option<u8> {
    match ch {
        'a'..='z' => Some(ch as u8 - b'a'),
        'A'..='Z' => Some(ch as u8 - b'A' + 26),
        '0'..='9' => Some(ch as u8 - b'0' + 52),
        '.' => Some(62),
        '_' => Some(63),
        _ => None,
    }
}

/// Character for the low 6 bits of `code`.
pub fn decode(code: u8) -> char {
    ALPHABET[usize::from(code & 0x3F)] as char
}

/// Whether every character of `s` is encodable.
///
/// Symbol table emitters use this to pick a char6 abbreviation over the
/// 7- and 8-bit ones.
pub fn is_char6(s: &str) -> bool {
    s.chars().all(|ch| encode(ch).is_some())
}
