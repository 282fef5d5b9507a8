//! Sender identity extracted from a message prefix.
//!
//! A prefix identifies the origin of a message. Users appear as
//! `nick!user@host`; servers appear as a bare name such as `irc.example.net`.
//! Only the user form carries an identity.
//!
//! # Reference
//! - RFC 2812 Section 2.3.1: Message format

use std::fmt;

/// The `nick!user@host` triple of a user-originated message.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct PrefixIdentity {
    /// Nickname.
    pub nick: String,
    /// Username (ident).
    pub user: String,
    /// Hostname.
    pub host: String,
}

impl PrefixIdentity {
    /// Create an identity from its three components.
    ///
    /// # Example
    ///
    /// ```
    /// use slirc_client::PrefixIdentity;
    ///
    /// let id = PrefixIdentity::new("nick", "user", "host.example.com");
    /// assert_eq!(id.to_string(), "nick!user@host.example.com");
    /// ```
    pub fn new(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            user: user.into(),
            host: host.into(),
        }
    }
}

impl fmt::Display for PrefixIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}@{}", self.nick, self.user, self.host)
    }
}

/// Parse a prefix into a [`PrefixIdentity`].
///
/// The leading `:` is optional. Returns `None` for server names and for
/// anything that is not exactly `nick!user@host` with three non-empty parts.
/// Character sets are not validated.
///
/// ```
/// use slirc_client::prefix::parse_identity;
///
/// let id = parse_identity(":nick!user@host.example").unwrap();
/// assert_eq!(id.nick, "nick");
/// assert_eq!(id.host, "host.example");
///
/// assert!(parse_identity(":irc.server.net").is_none());
/// ```
pub fn parse_identity(prefix: &str) -> Option<PrefixIdentity> {
    let raw = prefix.strip_prefix(':').unwrap_or(prefix);

    let (nick, rest) = raw.split_once('!')?;
    let (user, host) = rest.split_once('@')?;

    if nick.is_empty() || user.is_empty() || host.is_empty() {
        return None;
    }

    Some(PrefixIdentity::new(nick, user, host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nick_user_host() {
        let p = parse_identity(":nick!user@host.example").unwrap();
        assert_eq!(p, PrefixIdentity::new("nick", "user", "host.example"));
    }

    #[test]
    fn test_parse_without_colon() {
        let p = parse_identity("Angel!wings@irc.org").unwrap();
        assert_eq!(p.nick, "Angel");
        assert_eq!(p.user, "wings");
        assert_eq!(p.host, "irc.org");
    }

    #[test]
    fn test_server_name_has_no_identity() {
        assert_eq!(parse_identity(":irc.server.net"), None);
        assert_eq!(parse_identity("irc.server.net"), None);
    }

    #[test]
    fn test_partial_forms_have_no_identity() {
        assert_eq!(parse_identity(":nick@host"), None);
        assert_eq!(parse_identity(":nick!user"), None);
        assert_eq!(parse_identity(":!user@host"), None);
        assert_eq!(parse_identity(":nick!@host"), None);
        assert_eq!(parse_identity(":nick!user@"), None);
        assert_eq!(parse_identity(""), None);
    }

    #[test]
    fn test_host_keeps_extra_separators() {
        let p = parse_identity(":nick!~user@gateway/web/irccloud.com/x-abc@def").unwrap();
        assert_eq!(p.user, "~user");
        assert_eq!(p.host, "gateway/web/irccloud.com/x-abc@def");
    }

    #[test]
    fn test_display_round_trip() {
        let p = PrefixIdentity::new("bot", "bot", "example.com");
        assert_eq!(parse_identity(&p.to_string()), Some(p));
    }
}
