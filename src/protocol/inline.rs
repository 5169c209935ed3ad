//! Inline command parser for the list shell.
//!
//! Supports telnet-style space-separated commands like `RPUSH key a b`.

use bytes::Bytes;
use std::io;

/// Parser for inline (telnet-style) command lines.
///
/// Splits a line into byte-string arguments. Double quotes group words,
/// and inside quotes `\n`, `\r`, `\t`, `\"`, `\\` and `\xHH` escapes are
/// understood, so arbitrary bytes can be written.
pub struct InlineParser;

impl InlineParser {
    /// Parse one command line, with or without its trailing line terminator.
    /// Returns an empty vector for a blank line.
    pub fn parse(line: &str) -> Result<Vec<Bytes>, io::Error> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut parts = Vec::new();
        let mut current: Vec<u8> = Vec::new();
        let mut in_quotes = false;
        // A quoted empty string still produces an argument.
        let mut quoted = false;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '"' if !in_quotes => {
                    in_quotes = true;
                    quoted = true;
                }
                '"' if in_quotes => {
                    in_quotes = false;
                }
                ' ' | '\t' if !in_quotes => {
                    if !current.is_empty() || quoted {
                        parts.push(Bytes::from(std::mem::take(&mut current)));
                        quoted = false;
                    }
                }
                '\\' if in_quotes => {
                    if let Some(next_ch) = chars.next() {
                        match next_ch {
                            'n' => current.push(b'\n'),
                            'r' => current.push(b'\r'),
                            't' => current.push(b'\t'),
                            '"' => current.push(b'"'),
                            '\\' => current.push(b'\\'),
                            'x' => current.push(Self::parse_hex_byte(&mut chars)?),
                            _ => {
                                current.push(b'\\');
                                Self::push_char(&mut current, next_ch);
                            }
                        }
                    }
                }
                _ => Self::push_char(&mut current, ch),
            }
        }

        if in_quotes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Unclosed quote in inline command",
            ));
        }

        if !current.is_empty() || quoted {
            parts.push(Bytes::from(current));
        }

        Ok(parts)
    }

    fn push_char(buf: &mut Vec<u8>, ch: char) {
        let mut utf8 = [0u8; 4];
        buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    }

    fn parse_hex_byte(
        chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    ) -> Result<u8, io::Error> {
        let invalid = || {
            io::Error::new(
                io::ErrorKind::InvalidData,
                "Invalid \\x escape in inline command",
            )
        };
        let hi = chars.next().and_then(|c| c.to_digit(16)).ok_or_else(invalid)?;
        let lo = chars.next().and_then(|c| c.to_digit(16)).ok_or_else(invalid)?;
        Ok((hi * 16 + lo) as u8)
    }
}
