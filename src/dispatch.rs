//! Sans-IO message dispatch.
//!
//! [`dispatch`] turns one [`ParsedMessage`] into a list of [`Action`]s: events
//! for the application and lines to send back to the server. It performs no
//! I/O and keeps no state; the only context it needs is the client's current
//! nickname, passed in through [`DispatchContext`].
//!
//! # Example
//!
//! ```
//! use slirc_client::dispatch::{dispatch, Action, DispatchContext};
//! use slirc_client::{Event, OutboundCommand, ParsedMessage};
//!
//! let ctx = DispatchContext::new("mybot");
//! let ping = ParsedMessage::parse("PING :abc123").unwrap();
//!
//! let actions = dispatch(&ping, &ctx);
//! assert!(actions.contains(&Action::Send(OutboundCommand::pong("abc123"))));
//! ```

use tracing::debug;

use crate::casemap::irc_eq;
use crate::command::OutboundCommand;
use crate::event::{Event, ServerError};
use crate::message::{Command, ParsedMessage};
use crate::names::parse_names;
use crate::prefix::PrefixIdentity;
use crate::response::{is_error_code, Response};

/// What the caller should do in response to a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Deliver this event to the application.
    Emit(Event),
    /// Write this command to the server.
    Send(OutboundCommand),
}

/// Client state the dispatcher reads.
#[derive(Clone, Copy, Debug)]
pub struct DispatchContext<'a> {
    /// The nickname this client currently holds.
    pub nick: &'a str,
}

impl<'a> DispatchContext<'a> {
    /// Context for a client known as `nick`.
    pub fn new(nick: &'a str) -> Self {
        Self { nick }
    }

    fn is_me(&self, name: &str) -> bool {
        irc_eq(name, self.nick)
    }
}

/// Map a parsed message onto actions.
///
/// The first two actions are always `Raw` and `RawCommand`, whether or not
/// the command is recognized. Unrecognized commands add nothing further.
pub fn dispatch(msg: &ParsedMessage, ctx: &DispatchContext<'_>) -> Vec<Action> {
    let mut actions = vec![
        Action::Emit(Event::Raw(msg.clone())),
        Action::Emit(Event::RawCommand {
            command: msg.command.clone(),
            message: msg.clone(),
        }),
    ];

    match &msg.command {
        Command::Numeric(code) => dispatch_numeric(*code, msg, &mut actions),
        Command::Text(verb) => dispatch_verb(verb, msg, ctx, &mut actions),
    }

    actions
}

fn dispatch_numeric(code: u16, msg: &ParsedMessage, actions: &mut Vec<Action>) {
    match Response::from_code(code) {
        Some(Response::RPL_WELCOME) => actions.push(Action::Emit(Event::Welcome)),
        Some(Response::RPL_BOUNCE) => {}
        Some(Response::RPL_NOTOPIC) => {
            if let Some(channel) = msg.param(1) {
                actions.push(Action::Emit(Event::ChannelTopic {
                    channel: channel.to_owned(),
                    topic: None,
                }));
            }
        }
        Some(Response::RPL_TOPIC) => {
            if let Some(channel) = msg.param(1) {
                actions.push(Action::Emit(Event::ChannelTopic {
                    channel: channel.to_owned(),
                    topic: msg.message_or_param(2).map(str::to_owned),
                }));
            }
        }
        Some(Response::RPL_NAMREPLY) => {
            if let Some(channel) = msg.params.last() {
                actions.push(Action::Emit(Event::ChannelList {
                    channel: channel.clone(),
                    names: parse_names(msg.message().unwrap_or_default()),
                }));
            }
        }
        _ if is_error_code(code) => actions.push(Action::Emit(Event::IrcError {
            error: ServerError::from_message(code, msg),
        })),
        _ => {}
    }
}

fn dispatch_verb(
    verb: &str,
    msg: &ParsedMessage,
    ctx: &DispatchContext<'_>,
    actions: &mut Vec<Action>,
) {
    match verb.to_ascii_uppercase().as_str() {
        "PING" => {
            let payload = msg.message_or_param(0).unwrap_or_default();
            actions.push(Action::Send(OutboundCommand::pong(payload)));
        }
        "PONG" => {}
        "NICK" => {
            let Some(sender) = sender(msg) else { return };
            if let Some(new_nick) = msg.message_or_param(0) {
                actions.push(Action::Emit(Event::NickChange {
                    old_nick: sender.nick,
                    new_nick: new_nick.to_owned(),
                }));
            }
        }
        "JOIN" => {
            let Some(sender) = sender(msg) else { return };
            let Some(channel) = msg.message_or_param(0) else {
                return;
            };
            let own_join =
                msg.param(0).is_some_and(|p| ctx.is_me(p)) || ctx.is_me(&sender.nick);
            if own_join {
                actions.push(Action::Emit(Event::Join {
                    channel: channel.to_owned(),
                }));
            }
            actions.push(Action::Emit(Event::ChannelJoin {
                channel: channel.to_owned(),
                nick: sender.nick,
            }));
        }
        "TOPIC" => {
            if let Some(channel) = msg.param(0) {
                actions.push(Action::Emit(Event::ChannelTopic {
                    channel: channel.to_owned(),
                    topic: msg.message_or_param(1).map(str::to_owned),
                }));
            }
        }
        "PRIVMSG" => {
            let Some(sender) = sender(msg) else { return };
            let Some(target) = msg.param(0) else { return };
            let message = msg.message_or_param(1).unwrap_or_default().to_owned();
            let event = if ctx.is_me(target) {
                Event::PrivMsg {
                    nick: sender.nick,
                    message,
                }
            } else {
                Event::Message {
                    nick: sender.nick,
                    message,
                    channel: target.to_owned(),
                }
            };
            actions.push(Action::Emit(event));
        }
        "NOTICE" => {
            let message = msg.message_or_param(1).unwrap_or_default().to_owned();
            actions.push(Action::Emit(Event::Notice { message }));
        }
        "PART" => {
            let Some(sender) = sender(msg) else { return };
            if let Some(channel) = msg.param(0) {
                actions.push(Action::Emit(Event::ChannelLeave {
                    channel: channel.to_owned(),
                    nick: sender.nick,
                }));
            }
        }
        "QUIT" => {
            let Some(sender) = sender(msg) else { return };
            actions.push(Action::Emit(Event::Quit { nick: sender.nick }));
        }
        "MODE" => {
            if let [channel, mode, nick, ..] = msg.params.as_slice() {
                actions.push(Action::Emit(Event::ChannelModeChange {
                    channel: channel.clone(),
                    mode: mode.clone(),
                    nick: nick.clone(),
                }));
            }
        }
        _ => {}
    }
}

/// Sender identity, or `None` (logged) for server-originated and malformed
/// prefixes. Handlers that report a nick skip the event in that case.
fn sender(msg: &ParsedMessage) -> Option<PrefixIdentity> {
    let identity = msg.identity();
    if identity.is_none() {
        debug!(
            command = %msg.command,
            prefix = ?msg.prefix,
            "skipping event: prefix is not nick!user@host"
        );
    }
    identity
}

/// Events only, in order. Convenience for callers that do not send replies.
pub fn events(actions: &[Action]) -> impl Iterator<Item = &Event> {
    actions.iter().filter_map(|action| match action {
        Action::Emit(event) => Some(event),
        Action::Send(_) => None,
    })
}
