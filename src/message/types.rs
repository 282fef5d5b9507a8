//! Owned message types produced by the line parser.

use crate::prefix::{parse_identity, PrefixIdentity};

/// The command slot of a message: a three-digit numeric reply or a verb.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Numeric reply code (000-999).
    Numeric(u16),
    /// Textual command, kept exactly as received.
    Text(String),
}

impl Command {
    /// Classify a command token.
    ///
    /// Exactly three ASCII digits become [`Command::Numeric`]; anything else
    /// is kept verbatim.
    ///
    /// ```
    /// use slirc_client::Command;
    ///
    /// assert_eq!(Command::parse("001"), Command::Numeric(1));
    /// assert_eq!(Command::parse("privmsg"), Command::Text("privmsg".into()));
    /// assert_eq!(Command::parse("0001"), Command::Text("0001".into()));
    /// ```
    pub fn parse(token: &str) -> Self {
        let bytes = token.as_bytes();
        if bytes.len() == 3 && bytes.iter().all(u8::is_ascii_digit) {
            let code = bytes
                .iter()
                .fold(0u16, |acc, b| acc * 10 + u16::from(b - b'0'));
            Command::Numeric(code)
        } else {
            Command::Text(token.to_owned())
        }
    }

    /// The numeric code, if this is a numeric reply.
    #[inline]
    pub fn numeric(&self) -> Option<u16> {
        match self {
            Command::Numeric(code) => Some(*code),
            Command::Text(_) => None,
        }
    }

    /// The verb, if this is a textual command.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Command::Numeric(_) => None,
            Command::Text(verb) => Some(verb),
        }
    }
}

impl From<&str> for Command {
    fn from(token: &str) -> Self {
        Command::parse(token)
    }
}

impl From<u16> for Command {
    fn from(code: u16) -> Self {
        Command::Numeric(code)
    }
}

/// One parsed protocol line.
///
/// `prefix` is stored without its leading `:`. `message` is the trailing
/// text after the first `" :"` marker, absent when the line had none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedMessage {
    /// Origin of the message, if the line carried one.
    pub prefix: Option<String>,
    /// The command or numeric reply.
    pub command: Command,
    /// Middle parameters, in order.
    pub params: Vec<String>,
    /// Trailing text.
    pub message: Option<String>,
}

impl ParsedMessage {
    /// Create a message with only a command.
    pub fn new(command: impl Into<Command>) -> Self {
        Self {
            prefix: None,
            command: command.into(),
            params: Vec::new(),
            message: None,
        }
    }

    /// Set the prefix (without the leading `:`).
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Append a middle parameter.
    #[must_use]
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Set the trailing text.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sender identity, when the prefix has the `nick!user@host` shape.
    pub fn identity(&self) -> Option<PrefixIdentity> {
        self.prefix.as_deref().and_then(parse_identity)
    }

    /// Middle parameter at `index`.
    #[inline]
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Trailing text, if present.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Trailing text, falling back to the middle parameter at `index`.
    ///
    /// Servers differ on whether a lone final argument is sent as trailing
    /// text (`JOIN :#chan`) or as a middle parameter (`JOIN #chan`).
    pub fn message_or_param(&self, index: usize) -> Option<&str> {
        self.message().or_else(|| self.param(index))
    }
}
