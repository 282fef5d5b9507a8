//! Line grammar.
//!
//! The prefix and command tokens are taken with nom combinators; the
//! argument segment is scanned by hand because its only structure is the
//! first `" :"` boundary.

use std::str::FromStr;

use nom::{
    bytes::complete::{take_till1, take_while},
    character::complete::char,
    error::{context, VerboseError, VerboseErrorKind},
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::{MessageParseError, ProtocolError};

use super::types::{Command, ParsedMessage};

type ParseResult<I, O> = IResult<I, O, VerboseError<I>>;

const PREFIX_CONTEXT: &str = "parsing message prefix";
const COMMAND_CONTEXT: &str = "parsing command";

/// Marker separating middle parameters from trailing text.
const TRAILING_MARKER: &str = " :";

#[inline]
fn is_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Prefix token: `:` followed by at least one non-space character.
fn parse_prefix(input: &str) -> ParseResult<&str, &str> {
    context(
        PREFIX_CONTEXT,
        terminated(
            preceded(char(':'), take_till1(is_space)),
            take_while(is_space),
        ),
    )(input)
}

/// Command token: the next run of non-space characters.
fn parse_command(input: &str) -> ParseResult<&str, &str> {
    context(COMMAND_CONTEXT, take_till1(is_space))(input)
}

/// Optional prefix followed by a required command.
fn parse_head(input: &str) -> ParseResult<&str, (Option<&str>, &str)> {
    let (input, prefix) = if input.starts_with(':') {
        let (rest, prefix) = parse_prefix(input)?;
        (rest, Some(prefix))
    } else {
        (input, None)
    };
    let (input, command) = parse_command(input)?;
    Ok((input, (prefix, command)))
}

/// Split the argument segment into middle parameters and trailing text.
///
/// `args` starts with the separator that followed the command, so
/// `PING :abc` hands over `" :abc"` and the marker is found at offset 0.
fn split_arguments(args: &str) -> (Vec<String>, Option<String>) {
    let (middle, trailing) = match args.find(TRAILING_MARKER) {
        Some(pos) => (&args[..pos], Some(&args[pos + TRAILING_MARKER.len()..])),
        None => (args, None),
    };

    let params = middle
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect();

    (params, trailing.map(str::to_owned))
}

/// Map a nom failure onto the grammar error it represents.
fn classify_error(line: &str, err: &VerboseError<&str>) -> MessageParseError {
    let innermost = err.errors.iter().find_map(|(_, kind)| match kind {
        VerboseErrorKind::Context(ctx) => Some(*ctx),
        _ => None,
    });

    match innermost {
        Some(PREFIX_CONTEXT) => {
            let token = line.split(is_space).next().unwrap_or(line);
            MessageParseError::InvalidPrefix(token.to_owned())
        }
        Some(COMMAND_CONTEXT) if line.starts_with(':') => MessageParseError::MissingCommand,
        _ => MessageParseError::InvalidCommand,
    }
}

/// Parse one protocol line.
///
/// A trailing CR/LF left over from framing is ignored. Empty lines, a bare
/// `:` prefix, a prefix without a command and leading whitespace are
/// rejected; there is no partial result.
///
/// ```
/// use slirc_client::message::parse_line;
/// use slirc_client::Command;
///
/// let msg = parse_line(":nick!user@host PRIVMSG #chan :hello world").unwrap();
/// assert_eq!(msg.prefix.as_deref(), Some("nick!user@host"));
/// assert_eq!(msg.command, Command::Text("PRIVMSG".into()));
/// assert_eq!(msg.params, vec!["#chan"]);
/// assert_eq!(msg.message.as_deref(), Some("hello world"));
/// ```
pub fn parse_line(line: &str) -> Result<ParsedMessage, MessageParseError> {
    let line = line.trim_end_matches(['\r', '\n']);

    if line.trim().is_empty() {
        return Err(MessageParseError::EmptyMessage);
    }

    let (args, (prefix, command)) = match parse_head(line) {
        Ok(parsed) => parsed,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            return Err(classify_error(line, &e));
        }
        Err(nom::Err::Incomplete(_)) => return Err(MessageParseError::InvalidCommand),
    };

    let (params, message) = split_arguments(args);

    Ok(ParsedMessage {
        prefix: prefix.map(str::to_owned),
        command: Command::parse(command),
        params,
        message,
    })
}

impl ParsedMessage {
    /// Parse one protocol line. See [`parse_line`].
    pub fn parse(line: &str) -> Result<Self, MessageParseError> {
        parse_line(line)
    }
}

impl FromStr for ParsedMessage {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s).map_err(|cause| ProtocolError::InvalidMessage {
            string: s.to_owned(),
            cause,
        })
    }
}
