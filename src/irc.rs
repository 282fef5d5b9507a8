//! IRC message codec for tokio.
//!
//! Decodes lines into [`ParsedMessage`] values and encodes
//! [`OutboundCommand`] values as CRLF-terminated lines.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::command::OutboundCommand;
use crate::error;
use crate::line::LineCodec;
use crate::message::{parse_line, ParsedMessage};

/// Tokio codec for IRC traffic.
///
/// Wraps [`LineCodec`]. A line that is too long or fails to parse is
/// yielded as an inner `Err` so that one bad line does not end the stream.
/// Only I/O failures are outer errors.
pub struct IrcCodec {
    inner: LineCodec,
}

impl IrcCodec {
    /// Create a new codec with the specified encoding.
    ///
    /// # Arguments
    /// * `label` - Encoding label (e.g., "utf-8", "iso-8859-1")
    pub fn new(label: &str) -> error::Result<Self> {
        LineCodec::new(label).map(|codec| Self { inner: codec })
    }

    /// Create a new codec with custom max line length.
    ///
    /// # Arguments
    /// * `label` - Encoding label
    /// * `max_len` - Maximum line length in bytes
    pub fn with_max_len(label: &str, max_len: usize) -> error::Result<Self> {
        LineCodec::with_max_len(label, max_len).map(|codec| Self { inner: codec })
    }

    /// Sanitize outgoing line data.
    ///
    /// - Truncates at the first line ending, dropping it and anything after
    /// - Rejects NUL, BEL and control characters other than IRC format codes
    pub fn sanitize(mut data: String) -> error::Result<String> {
        if let Some(pos) = data.find(['\r', '\n']) {
            data.truncate(pos);
        }

        if let Some(ch) = data.chars().find(|ch| is_illegal_control_char(*ch)) {
            return Err(error::ProtocolError::IllegalControlChar(ch));
        }

        Ok(data)
    }

    fn parse(line: String) -> error::Result<ParsedMessage> {
        parse_line(&line).map_err(|cause| error::ProtocolError::InvalidMessage {
            string: line,
            cause,
        })
    }
}

/// mIRC-style formatting codes, plus `\x01` for CTCP.
#[inline]
fn is_irc_format_code(ch: char) -> bool {
    matches!(
        ch,
        '\x01' | '\x02' | '\x03' | '\x04' | '\x0F' | '\x11' | '\x16' | '\x1D' | '\x1E' | '\x1F'
    )
}

/// Whether `ch` must never appear in an outgoing line.
#[inline]
pub fn is_illegal_control_char(ch: char) -> bool {
    // BEL is always illegal
    if ch == '\x07' {
        return true;
    }
    ch.is_control() && ch != '\r' && ch != '\n' && !is_irc_format_code(ch)
}

impl Decoder for IrcCodec {
    type Item = error::Result<ParsedMessage>;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Self::Item>> {
        Ok(self
            .inner
            .decode(src)?
            .map(|line| line.and_then(Self::parse)))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<Self::Item>> {
        Ok(self
            .inner
            .decode_eof(src)?
            .map(|line| line.and_then(Self::parse)))
    }
}

impl Encoder<OutboundCommand> for IrcCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, cmd: OutboundCommand, dst: &mut BytesMut) -> error::Result<()> {
        let mut line = Self::sanitize(cmd.to_string())?;
        line.push_str("\r\n");
        self.inner.encode(line, dst)
    }
}
