//! NAMES reply (353) roster decoding.
//!
//! The trailing text of `RPL_NAMREPLY` is a space-separated list of
//! nicknames, each optionally carrying a membership prefix: `@` for channel
//! operators and `+` for voiced users.
//!
//! # Reference
//! - RFC 2812 Section 5.1: `RPL_NAMREPLY`

/// One member of a channel roster.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NameEntry {
    /// Nickname with membership prefixes removed.
    pub nick: String,
    /// Member holds channel operator status (`@`).
    pub operator: bool,
    /// Member holds voice (`+`).
    pub voice: bool,
}

impl NameEntry {
    /// Decode a single roster token such as `@alice` or `+bob`.
    ///
    /// `@` is consumed first, then `+` is checked on what remains, so `@+nick`
    /// yields both flags while `+@nick` yields voice with nick `@nick`.
    pub fn parse(token: &str) -> Self {
        let (operator, rest) = match token.strip_prefix('@') {
            Some(rest) => (true, rest),
            None => (false, token),
        };
        let (voice, nick) = match rest.strip_prefix('+') {
            Some(nick) => (true, nick),
            None => (false, rest),
        };

        Self {
            nick: nick.to_owned(),
            operator,
            voice,
        }
    }
}

/// Decode the trailing payload of a NAMES reply.
///
/// Entries come back in the order received. Blank input yields an empty list.
///
/// ```
/// use slirc_client::names::parse_names;
///
/// let names = parse_names("@alice +bob carol");
/// assert_eq!(names.len(), 3);
/// assert!(names[0].operator);
/// assert!(names[1].voice);
/// assert_eq!(names[2].nick, "carol");
/// ```
pub fn parse_names(payload: &str) -> Vec<NameEntry> {
    payload.split_whitespace().map(NameEntry::parse).collect()
}
