//! # slirc-client
//!
//! A single-connection IRC client library: protocol line parsing, prefix and
//! NAMES decoding, and dispatch of server messages into typed events.
//!
//! ## Features
//!
//! - Raw line parsing into prefix, command, parameters and trailing text
//! - Numeric vs. textual command classification
//! - `nick!user@host` prefix decoding and NAMES membership flags
//! - Sans-IO dispatch from messages to [`Event`]s, with automatic PING replies
//! - Optional Tokio integration: line codec, connection, background client

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! ## Quick Start
//!
//! ### Parsing lines
//!
//! ```rust
//! use slirc_client::{Command, ParsedMessage};
//!
//! let msg: ParsedMessage = ":alice!al@example.com PRIVMSG #rust :hello there"
//!     .parse()
//!     .expect("valid line");
//!
//! assert_eq!(msg.command, Command::Text("PRIVMSG".into()));
//! assert_eq!(msg.params, vec!["#rust"]);
//! assert_eq!(msg.message.as_deref(), Some("hello there"));
//! assert_eq!(msg.identity().map(|id| id.nick), Some("alice".to_string()));
//! ```
//!
//! ### Dispatching
//!
//! ```rust
//! use slirc_client::{dispatch, events, DispatchContext, Event, ParsedMessage};
//!
//! let msg = ParsedMessage::parse(":alice!al@example.com PRIVMSG mybot :hi").unwrap();
//! let actions = dispatch(&msg, &DispatchContext::new("mybot"));
//!
//! let domain: Vec<&Event> = events(&actions).filter(|e| !e.is_raw()).collect();
//! assert_eq!(
//!     domain,
//!     [&Event::PrivMsg { nick: "alice".into(), message: "hi".into() }]
//! );
//! ```

pub mod casemap;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod message;
pub mod names;
pub mod prefix;
pub mod response;

#[cfg(feature = "tokio")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
pub mod client;
#[cfg(feature = "tokio")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
pub mod irc;
#[cfg(feature = "tokio")]
#[cfg_attr(docsrs, doc(cfg(feature = "tokio")))]
pub mod line;

pub use self::casemap::irc_eq;
pub use self::command::OutboundCommand;
pub use self::config::ClientConfig;
pub use self::dispatch::{dispatch, events, Action, DispatchContext};
pub use self::error::{ClientError, ConfigError, MessageParseError, ProtocolError};
pub use self::event::{Event, EventError, ServerError};
pub use self::message::{parse_line, Command, ParsedMessage};
pub use self::names::{parse_names, NameEntry};
pub use self::prefix::{parse_identity, PrefixIdentity};
pub use self::response::Response;

#[cfg(feature = "tokio")]
pub use self::client::{Client, ClientHandle, Connection};
#[cfg(feature = "tokio")]
pub use self::irc::IrcCodec;
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
