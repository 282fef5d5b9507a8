use std::fmt::{self, Display, Formatter};

use super::types::{Command, ParsedMessage};

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Command::Numeric(code) => write!(f, "{:03}", code),
            Command::Text(verb) => f.write_str(verb),
        }
    }
}

/// Wire form without the line terminator.
impl Display for ParsedMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }

        write!(f, "{}", self.command)?;

        for param in &self.params {
            write!(f, " {}", param)?;
        }

        if let Some(ref message) = self.message {
            write!(f, " :{}", message)?;
        }

        Ok(())
    }
}
