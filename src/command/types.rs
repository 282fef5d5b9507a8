/// A command sent from the client to the server.
///
/// The [`Display`](std::fmt::Display) form is the wire line without CRLF;
/// the codec appends the terminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutboundCommand {
    /// `NICK <nick>`
    Nick(String),
    /// `USER <user> 0 * : <realname>`
    User {
        /// Username (ident).
        username: String,
        /// Real name / GECOS.
        realname: String,
    },
    /// `JOIN <channel>[ :<password>]`
    Join {
        /// Channel to join.
        channel: String,
        /// Channel key, if the channel is `+k`.
        password: Option<String>,
    },
    /// `PRIVMSG <target> :<text>`
    Privmsg {
        /// Channel or nickname.
        target: String,
        /// Message body.
        text: String,
    },
    /// `PONG: <payload>`, the reply to a server PING.
    Pong(String),
    /// `QUIT[ :<reason>]`
    Quit(Option<String>),
    /// A line passed through verbatim.
    Raw(String),
}

impl OutboundCommand {
    /// `NICK` command.
    pub fn nick(nick: impl Into<String>) -> Self {
        Self::Nick(nick.into())
    }

    /// `USER` registration command.
    pub fn user(username: impl Into<String>, realname: impl Into<String>) -> Self {
        Self::User {
            username: username.into(),
            realname: realname.into(),
        }
    }

    /// `JOIN` without a key.
    pub fn join(channel: impl Into<String>) -> Self {
        Self::Join {
            channel: channel.into(),
            password: None,
        }
    }

    /// `JOIN` with a channel key.
    pub fn join_with_password(channel: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Join {
            channel: channel.into(),
            password: Some(password.into()),
        }
    }

    /// `PRIVMSG` to a channel or nick.
    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Privmsg {
            target: target.into(),
            text: text.into(),
        }
    }

    /// `PONG` reply carrying the PING payload.
    pub fn pong(payload: impl Into<String>) -> Self {
        Self::Pong(payload.into())
    }

    /// Raw line.
    pub fn raw(line: impl Into<String>) -> Self {
        Self::Raw(line.into())
    }
}
