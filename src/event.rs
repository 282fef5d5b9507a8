//! Events delivered to application code.
//!
//! Every inbound line produces two raw events followed by zero or more
//! domain events. Lifecycle events (`Connect`, `AfterConnect`, `Close`,
//! `Error`) come from the connection task, not from the dispatcher.

use thiserror::Error;

use crate::error::{ClientError, MessageParseError, ProtocolError};
use crate::message::{Command, ParsedMessage};
use crate::names::NameEntry;
use crate::response::Response;

/// An error numeric (400-600) reported by the server.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("IRC error {code:03}{}: {message}", name_suffix(.code))]
pub struct ServerError {
    /// Numeric reply code.
    pub code: u16,
    /// Human-readable text from the server.
    pub message: String,
}

fn name_suffix(code: &u16) -> String {
    Response::from_code(*code)
        .map(|r| format!(" ({})", r.name()))
        .unwrap_or_default()
}

impl ServerError {
    /// Build from an error numeric. The trailing text is preferred; without
    /// one the middle parameters after the target are joined.
    pub fn from_message(code: u16, msg: &ParsedMessage) -> Self {
        let message = match msg.message() {
            Some(text) => text.to_owned(),
            None => msg.params.iter().skip(1).cloned().collect::<Vec<_>>().join(" "),
        };
        Self { code, message }
    }

    /// Symbolic name of the numeric, when known.
    pub fn response(&self) -> Option<Response> {
        Response::from_code(self.code)
    }
}

/// A connection-level failure delivered as [`Event::Error`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EventError {
    /// Connect, read or write failure on the transport.
    #[error("transport error: {0}")]
    Transport(String),

    /// A line that does not fit the message grammar; it was not dispatched.
    #[error("unparseable line {line:?}: {cause}")]
    Parse {
        /// The offending line.
        line: String,
        /// Why it was rejected.
        cause: MessageParseError,
    },

    /// An inbound line exceeded the length limit; it was skipped.
    #[error("line of {length} bytes exceeds limit {limit}")]
    LineTooLong {
        /// Length of the skipped line in bytes.
        length: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// An outbound line carried a forbidden control character; it was not sent.
    #[error("outbound line rejected: illegal control character {0:?}")]
    Rejected(char),

    /// Nothing was received within the idle timeout.
    #[error("connection idle for {0} seconds")]
    IdleTimeout(u64),
}

impl From<&ClientError> for EventError {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::IdleTimeout(secs) => EventError::IdleTimeout(*secs),
            ClientError::Protocol(ProtocolError::InvalidMessage { string, cause }) => {
                EventError::Parse {
                    line: string.clone(),
                    cause: cause.clone(),
                }
            }
            ClientError::Protocol(ProtocolError::MessageTooLong { actual, limit }) => {
                EventError::LineTooLong {
                    length: *actual,
                    limit: *limit,
                }
            }
            ClientError::Protocol(ProtocolError::IllegalControlChar(ch)) => EventError::Rejected(*ch),
            other => EventError::Transport(other.to_string()),
        }
    }
}

impl From<ClientError> for EventError {
    fn from(err: ClientError) -> Self {
        EventError::from(&err)
    }
}

/// Everything the client reports to the application.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Event {
    /// The transport connection is open.
    Connect,
    /// NICK and USER have been sent.
    AfterConnect,
    /// Registration finished (001).
    Welcome,
    /// Topic of a channel: from 331/332 on join or from a TOPIC change.
    ChannelTopic {
        /// Channel name.
        channel: String,
        /// Topic text; `None` when no topic is set.
        topic: Option<String>,
    },
    /// One NAMES reply (353) worth of channel members.
    ChannelList {
        /// Channel name.
        channel: String,
        /// Members in the order the server listed them.
        names: Vec<NameEntry>,
    },
    /// A user changed nickname.
    NickChange {
        /// Previous nickname.
        old_nick: String,
        /// New nickname.
        new_nick: String,
    },
    /// This client joined a channel.
    Join {
        /// Channel name.
        channel: String,
    },
    /// Someone (possibly this client) joined a channel.
    ChannelJoin {
        /// Channel name.
        channel: String,
        /// Nick of the joining user.
        nick: String,
    },
    /// A message addressed directly to this client.
    PrivMsg {
        /// Sender nick.
        nick: String,
        /// Message body.
        message: String,
    },
    /// A message sent to a channel (or any target other than this client).
    Message {
        /// Sender nick.
        nick: String,
        /// Message body.
        message: String,
        /// Target the message was sent to.
        channel: String,
    },
    /// A NOTICE. The sender is not reported.
    Notice {
        /// Notice text.
        message: String,
    },
    /// Someone left a channel.
    ChannelLeave {
        /// Channel name.
        channel: String,
        /// Nick of the departing user.
        nick: String,
    },
    /// Someone disconnected from the network.
    Quit {
        /// Nick of the user.
        nick: String,
    },
    /// A channel mode aimed at a user changed (e.g. `+o nick`).
    ChannelModeChange {
        /// Channel name.
        channel: String,
        /// Mode string such as `+o`.
        mode: String,
        /// Target nick.
        nick: String,
    },
    /// The server replied with an error numeric.
    IrcError {
        /// Code and text.
        error: ServerError,
    },
    /// Every parsed line, before interpretation.
    Raw(ParsedMessage),
    /// Every parsed line, tagged by its command.
    RawCommand {
        /// The line's command.
        command: Command,
        /// The whole line.
        message: ParsedMessage,
    },
    /// The connection is closed; no further events follow.
    Close,
    /// A connection-level failure.
    Error(EventError),
}

impl Event {
    /// Stable kebab-case name for logging and routing.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Connect => "connect",
            Event::AfterConnect => "after-connect",
            Event::Welcome => "welcome",
            Event::ChannelTopic { .. } => "channel-topic",
            Event::ChannelList { .. } => "channel-list",
            Event::NickChange { .. } => "nick-change",
            Event::Join { .. } => "join",
            Event::ChannelJoin { .. } => "channel-join",
            Event::PrivMsg { .. } => "privmsg",
            Event::Message { .. } => "message",
            Event::Notice { .. } => "notice",
            Event::ChannelLeave { .. } => "channel-leave",
            Event::Quit { .. } => "quit",
            Event::ChannelModeChange { .. } => "channel-modechange",
            Event::IrcError { .. } => "irc-error",
            Event::Raw(_) => "raw-message",
            Event::RawCommand { .. } => "raw-command",
            Event::Close => "close",
            Event::Error(_) => "error",
        }
    }

    /// Whether this is one of the two raw events every line produces.
    #[inline]
    pub fn is_raw(&self) -> bool {
        matches!(self, Event::Raw(_) | Event::RawCommand { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display() {
        let err = ServerError {
            code: 433,
            message: "Nickname is already in use".into(),
        };
        assert_eq!(
            err.to_string(),
            "IRC error 433 (ERR_NICKNAMEINUSE): Nickname is already in use"
        );
        assert_eq!(err.response(), Some(Response::ERR_NICKNAMEINUSE));
    }

    #[test]
    fn test_server_error_unknown_code() {
        let err = ServerError {
            code: 599,
            message: "odd".into(),
        };
        assert_eq!(err.to_string(), "IRC error 599: odd");
    }

    #[test]
    fn test_server_error_without_trailing() {
        let msg = ParsedMessage::parse(":srv 401 me ghost No").unwrap();
        let err = ServerError::from_message(401, &msg);
        assert_eq!(err.message, "ghost No");
    }

    #[test]
    fn test_event_error_from_client_error() {
        let err = ClientError::IdleTimeout(30);
        assert_eq!(EventError::from(&err), EventError::IdleTimeout(30));

        let err = ClientError::Protocol(ProtocolError::InvalidMessage {
            string: ":x".into(),
            cause: MessageParseError::MissingCommand,
        });
        assert_eq!(
            EventError::from(err),
            EventError::Parse {
                line: ":x".into(),
                cause: MessageParseError::MissingCommand,
            }
        );

        let err = ClientError::Protocol(ProtocolError::MessageTooLong {
            actual: 616,
            limit: 512,
        });
        assert_eq!(
            EventError::from(err),
            EventError::LineTooLong {
                length: 616,
                limit: 512
            }
        );

        let err = ClientError::Protocol(ProtocolError::IllegalControlChar('\t'));
        assert_eq!(EventError::from(err), EventError::Rejected('\t'));

        let err = ClientError::Closed;
        assert_eq!(
            EventError::from(err),
            EventError::Transport("connection closed".into())
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(Event::Welcome.name(), "welcome");
        assert_eq!(Event::Close.name(), "close");
        assert!(Event::Raw(ParsedMessage::new("PING")).is_raw());
        assert!(!Event::Welcome.is_raw());
    }
}
