//! Error types for the IRC client library.
//!
//! This module defines error types for line-grammar failures, framing and
//! decoding problems, configuration loading, and the connection itself.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Protocol-level errors raised while framing or decoding lines.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured character encoding label is not recognized.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    /// Line exceeded the configured maximum length.
    #[error("message too long: {actual} bytes (limit {limit})")]
    MessageTooLong {
        /// Length of the offending line in bytes.
        actual: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// Illegal control character in an outgoing line.
    #[error("illegal control character: {0:?}")]
    IllegalControlChar(char),

    /// A line did not match the message grammar.
    #[error("invalid message: {string}")]
    InvalidMessage {
        /// The raw line.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: MessageParseError,
    },
}

impl ProtocolError {
    /// Whether the error concerns a single line and leaves the connection usable.
    pub fn is_line_error(&self) -> bool {
        matches!(
            self,
            ProtocolError::MessageTooLong { .. }
                | ProtocolError::IllegalControlChar(_)
                | ProtocolError::InvalidMessage { .. }
        )
    }
}

/// Errors encountered when parsing a single protocol line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Line was empty or only whitespace.
    #[error("empty message")]
    EmptyMessage,

    /// Line did not start with a prefix or a command token.
    #[error("invalid command")]
    InvalidCommand,

    /// A prefix was present but no command followed it.
    #[error("missing command after prefix")]
    MissingCommand,

    /// The prefix marker was not followed by any prefix text.
    #[error("invalid prefix: {0:?}")]
    InvalidPrefix(String),
}

/// Errors raised while loading a [`ClientConfig`](crate::config::ClientConfig).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that was being read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field failed validation.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Errors surfaced by the connection lifecycle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Opening the TCP connection failed.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        /// The `host:port` that was dialed.
        addr: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No data arrived within the idle timeout.
    #[error("connection idle for {0} seconds")]
    IdleTimeout(u64),

    /// Framing, decoding or grammar failure.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Configuration could not be loaded or was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The connection task has already shut down.
    #[error("connection closed")]
    Closed,
}

impl ClientError {
    /// Whether the error concerns a single line and leaves the connection usable.
    pub fn is_line_error(&self) -> bool {
        matches!(self, ClientError::Protocol(err) if err.is_line_error())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Protocol(ProtocolError::Io(err))
    }
}
