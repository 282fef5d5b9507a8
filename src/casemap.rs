//! IRC case-mapping functions.
//!
//! Nicknames compare case-insensitively under the `rfc1459` mapping, where
//! `[]\~` are the uppercase forms of `{}|^`.

/// Fold one character under the `rfc1459` mapping.
#[inline]
fn irc_lower_char(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        _ => c.to_ascii_lowercase(),
    }
}

/// Compare two nicknames or channel names case-insensitively.
///
/// ```
/// use slirc_client::irc_eq;
///
/// assert!(irc_eq("Nick[away]", "nick{AWAY}"));
/// assert!(!irc_eq("nick", "nick_"));
/// ```
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .chars()
            .zip(b.chars())
            .all(|(ca, cb)| irc_lower_char(ca) == irc_lower_char(cb))
}
