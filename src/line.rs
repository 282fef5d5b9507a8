//! Line-based codec for tokio.
//!
//! This module provides a codec that reads and writes newline-terminated
//! lines in a configurable character encoding.

use std::borrow::Cow;

use bytes::{Buf, BytesMut};
use encoding::Encoding;
use tokio_util::codec::{Decoder, Encoder};

use crate::error;

/// Default maximum line length in bytes, terminator included (RFC 1459).
pub const DEFAULT_MAX_LINE_LEN: usize = 512;

/// Line-based codec that handles newline-terminated messages.
///
/// Decoded lines have their `\n` and any `\r` before it removed. A line
/// longer than the limit is skipped and yielded as an inner
/// [`MessageTooLong`](error::ProtocolError::MessageTooLong) error, so the
/// stream keeps going.
pub struct LineCodec {
    encoding: &'static Encoding,
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
    /// Dropping the tail of an overlong line until the next newline
    discarding: bool,
}

impl LineCodec {
    /// Create a new codec with the specified encoding.
    ///
    /// # Arguments
    /// * `label` - Encoding label (e.g., "utf-8", "iso-8859-1")
    pub fn new(label: &str) -> error::Result<Self> {
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| error::ProtocolError::UnknownEncoding(label.to_owned()))?;

        Ok(Self {
            encoding,
            next_index: 0,
            max_len: DEFAULT_MAX_LINE_LEN,
            discarding: false,
        })
    }

    /// Create a new codec with custom max line length.
    pub fn with_max_len(label: &str, max_len: usize) -> error::Result<Self> {
        let mut codec = Self::new(label)?;
        codec.max_len = max_len;
        Ok(codec)
    }

    fn decode_line(&self, line: &[u8]) -> String {
        let line = strip_terminator(line);
        let (text, _enc, had_errors) = self.encoding.decode(line);
        if had_errors {
            tracing::debug!(
                encoding = self.encoding.name(),
                "replaced undecodable bytes in line"
            );
        }
        text.into_owned()
    }

    fn too_long(&self, actual: usize) -> error::ProtocolError {
        error::ProtocolError::MessageTooLong {
            actual,
            limit: self.max_len,
        }
    }
}

fn strip_terminator(mut line: &[u8]) -> &[u8] {
    if let [rest @ .., b'\n'] = line {
        line = rest;
    }
    if let [rest @ .., b'\r'] = line {
        line = rest;
    }
    line
}

impl Decoder for LineCodec {
    type Item = error::Result<String>;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Self::Item>> {
        loop {
            // Look for newline starting from where we left off
            let newline = src[self.next_index..].iter().position(|b| *b == b'\n');

            if self.discarding {
                match newline {
                    Some(offset) => {
                        src.advance(self.next_index + offset + 1);
                        self.next_index = 0;
                        self.discarding = false;
                        continue;
                    }
                    None => {
                        src.clear();
                        self.next_index = 0;
                        return Ok(None);
                    }
                }
            }

            return match newline {
                Some(offset) => {
                    let line = src.split_to(self.next_index + offset + 1);
                    self.next_index = 0;

                    if line.len() > self.max_len {
                        tracing::debug!(
                            length = line.len(),
                            limit = self.max_len,
                            "skipped overlong line"
                        );
                        return Ok(Some(Err(self.too_long(line.len()))));
                    }

                    Ok(Some(Ok(self.decode_line(&line))))
                }
                None if src.len() > self.max_len => {
                    // Drop what we have and skip the rest of the line when it arrives
                    let actual = src.len();
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                    tracing::debug!(
                        length = actual,
                        limit = self.max_len,
                        "discarding overlong line"
                    );
                    Ok(Some(Err(self.too_long(actual))))
                }
                None => {
                    // No complete line yet - remember where we stopped
                    self.next_index = src.len();
                    Ok(None)
                }
            };
        }
    }

    /// A final line without a terminator is still delivered.
    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<Self::Item>> {
        if let Some(item) = self.decode(src)? {
            return Ok(Some(item));
        }
        if self.discarding || src.is_empty() {
            src.clear();
            self.discarding = false;
            self.next_index = 0;
            return Ok(None);
        }

        let line = self.decode_line(src);
        src.advance(src.len());
        self.next_index = 0;
        Ok(Some(Ok(line)))
    }
}

impl Encoder<String> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: String, dst: &mut BytesMut) -> error::Result<()> {
        let (bytes, _enc, _had_errors) = self.encoding.encode(&msg);
        match bytes {
            Cow::Borrowed(b) => dst.extend_from_slice(b),
            Cow::Owned(v) => dst.extend_from_slice(&v),
        }
        Ok(())
    }
}
