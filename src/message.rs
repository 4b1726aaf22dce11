//! Inbound IRC message parsing.
//!
//! This module provides a single-pass parser for RFC 1459 protocol lines
//! built on the nom parser combinator library.
//!
//! IRC message format:
//! ```text
//! [:prefix] <command> [params...] [:trailing]
//! ```
//!
//! The prefix names the origin (`nick!user@host` or a server name), the
//! command is either an alphabetic word or a three-digit numeric reply,
//! middle parameters are whitespace-delimited, and the trailing parameter
//! (after a ` :` delimiter) may contain spaces and colons verbatim.

use std::fmt;
use std::str::FromStr;

use nom::{
    bytes::complete::take_while1,
    character::complete::char,
    combinator::opt,
    sequence::preceded,
    IResult,
};

use crate::error::MessageParseError;

/// Parse the message prefix (the part after `:` and before the first space).
fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// Parse the command token: an alphabetic word, a three-digit numeric,
/// or a symbolic reply alias like `RPL_MOTD`.
fn parse_command(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

/// Skip one or more spaces. Runs of spaces collapse, so incidental
/// doubled spaces never produce empty parameters.
fn skip_spaces(input: &str) -> &str {
    input.trim_start_matches(' ')
}

/// A parsed IRC message.
///
/// Immutable once parsed. `trailing` is `Some` exactly when the raw line
/// carried a trailing-parameter delimiter; numeric replies carry the
/// target nickname as `params[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Origin of the message (`nick!user@host` or server name), if present.
    pub prefix: Option<String>,
    /// The command word or three-digit numeric code, verbatim.
    pub command: String,
    /// Middle parameters in order, never containing spaces.
    pub params: Vec<String>,
    /// The trailing parameter, verbatim, if the line had one.
    pub trailing: Option<String>,
}

impl Message {
    /// Parse one protocol line into a [`Message`].
    ///
    /// The line may still carry its CRLF terminator; it is stripped
    /// before parsing. Fails on empty lines and lines whose prefix or
    /// command cannot be isolated — the caller recovers by rendering
    /// the raw line unmodified.
    pub fn parse(line: &str) -> Result<Message, MessageParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Err(MessageParseError::EmptyMessage);
        }

        let (rest, prefix) = opt(parse_prefix)(line)
            .map_err(|_: nom::Err<nom::error::Error<&str>>| MessageParseError::InvalidPrefix)?;
        if line.starts_with(':') && prefix.is_none() {
            return Err(MessageParseError::InvalidPrefix);
        }
        let rest = skip_spaces(rest);

        let (rest, command) = parse_command(rest)
            .map_err(|_: nom::Err<nom::error::Error<&str>>| MessageParseError::InvalidCommand)?;

        let mut params = Vec::new();
        let mut trailing = None;
        let mut rest = rest;

        while rest.starts_with(' ') {
            rest = skip_spaces(rest);

            if let Some(t) = rest.strip_prefix(':') {
                // Trailing parameter: everything after the colon, verbatim.
                trailing = Some(t.to_string());
                break;
            }

            if rest.is_empty() {
                break;
            }

            let end = rest.find(' ').unwrap_or(rest.len());
            params.push(rest[..end].to_string());
            rest = &rest[end..];
        }

        Ok(Message {
            prefix: prefix.map(str::to_string),
            command: command.to_string(),
            params,
            trailing,
        })
    }

    /// The nick part of the prefix: everything before the first `!`,
    /// or the whole prefix for server origins.
    pub fn origin_nick(&self) -> Option<&str> {
        let prefix = self.prefix.as_deref()?;
        Some(prefix.split('!').next().unwrap_or(prefix))
    }

    /// Middle parameter by index.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// The trailing parameter if present, otherwise the last middle
    /// parameter. Several commands (PING among them) put their payload
    /// in either position depending on the server.
    pub fn payload(&self) -> Option<&str> {
        self.trailing
            .as_deref()
            .or_else(|| self.params.last().map(String::as_str))
    }
}

impl FromStr for Message {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Message::parse(s)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        f.write_str(&self.command)?;
        for param in &self.params {
            write!(f, " {}", param)?;
        }
        if let Some(trailing) = &self.trailing {
            write!(f, " :{}", trailing)?;
        }
        Ok(())
    }
}
