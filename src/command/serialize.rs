use std::fmt;

use super::types::OutboundCommand;

impl fmt::Display for OutboundCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutboundCommand::Nick(nick) => write!(f, "NICK {}", nick),
            // Literal ": " before the realname is part of the wire form.
            OutboundCommand::User { username, realname } => {
                write!(f, "USER {} 0 * : {}", username, realname)
            }
            OutboundCommand::Join { channel, password } => {
                write!(f, "JOIN {}", channel)?;
                if let Some(password) = password {
                    write!(f, " :{}", password)?;
                }
                Ok(())
            }
            OutboundCommand::Privmsg { target, text } => {
                write!(f, "PRIVMSG {} :{}", target, text)
            }
            OutboundCommand::Pong(payload) => write!(f, "PONG: {}", payload),
            OutboundCommand::Quit(reason) => {
                f.write_str("QUIT")?;
                if let Some(reason) = reason {
                    f.write_str(" :")?;
                    f.write_str(reason)?;
                }
                Ok(())
            }
            OutboundCommand::Raw(line) => f.write_str(line.trim_end_matches(&['\r', '\n'][..])),
        }
    }
}
