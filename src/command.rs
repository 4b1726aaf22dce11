//! Outbound IRC commands.
//!
//! This module provides type-safe representations of the client-issued
//! commands, their wire serialization, and the pre-send validation that
//! keeps malformed parameters off the wire.
//!
//! # Reference
//! - RFC 1459 §4: Message details

use std::fmt::{self, Write};

use crate::error::InvalidCommand;
use crate::validation::{
    validate_middle_param, validate_nickname, validate_trailing_param, MAX_LINE_LEN,
};

/// A client-issued IRC command with its parameters.
///
/// Known verbs get typed variants; console verbs that are forwarded
/// verbatim to the server travel as `Raw`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command {
    /// `PASS password`
    PASS(String),
    /// `NICK nickname`
    NICK(String),
    /// `USER username hostname servername :realname`
    USER(String, String, String, String),
    /// `QUIT [:message]`
    QUIT(Option<String>),
    /// `JOIN channels [keys]`
    JOIN(String, Option<String>),
    /// `PART channels`
    PART(String),
    /// `PRIVMSG target :text`
    PRIVMSG(String, String),
    /// `NOTICE target :text`
    NOTICE(String, String),
    /// `PONG :token`
    PONG(String),
    /// `AWAY [:message]`
    AWAY(Option<String>),
    /// `TOPIC channel [:topic]`
    TOPIC(String, Option<String>),
    /// Any other verb forwarded with middle parameters only
    /// (NAMES, TRACE, MODE, LIST, WHOIS, ...).
    Raw(String, Vec<String>),
}

/// Write a command with arguments. The last argument gets a `:` prefix
/// if it is empty, contains a space, or starts with `:`.
fn write_cmd(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    if args.is_empty() {
        return f.write_str(cmd);
    }

    let (middle, trailing) = args.split_at(args.len() - 1);
    let trailing = trailing[0];

    f.write_str(cmd)?;

    for param in middle {
        f.write_char(' ')?;
        f.write_str(param)?;
    }

    f.write_char(' ')?;

    if trailing.is_empty() || trailing.contains(' ') || trailing.starts_with(':') {
        f.write_char(':')?;
    }

    f.write_str(trailing)
}

/// Write a command with a freeform (always colon-prefixed) trailing argument.
fn write_cmd_freeform(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    match args.split_last() {
        Some((suffix, middle)) => {
            f.write_str(cmd)?;
            for arg in middle {
                f.write_char(' ')?;
                f.write_str(arg)?;
            }
            f.write_str(" :")?;
            f.write_str(suffix)
        }
        None => f.write_str(cmd),
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::PASS(p) => write_cmd(f, "PASS", &[p]),
            Command::NICK(n) => write_cmd(f, "NICK", &[n]),
            Command::USER(u, h, s, r) => write_cmd_freeform(f, "USER", &[u, h, s, r]),
            Command::QUIT(None) => f.write_str("QUIT"),
            Command::QUIT(Some(m)) => write_cmd_freeform(f, "QUIT", &[m]),
            Command::JOIN(chans, None) => write_cmd(f, "JOIN", &[chans]),
            Command::JOIN(chans, Some(keys)) => write_cmd(f, "JOIN", &[chans, keys]),
            Command::PART(chans) => write_cmd(f, "PART", &[chans]),
            Command::PRIVMSG(target, text) => write_cmd_freeform(f, "PRIVMSG", &[target, text]),
            Command::NOTICE(target, text) => write_cmd_freeform(f, "NOTICE", &[target, text]),
            Command::PONG(token) => write_cmd_freeform(f, "PONG", &[token]),
            Command::AWAY(None) => f.write_str("AWAY"),
            Command::AWAY(Some(m)) => write_cmd_freeform(f, "AWAY", &[m]),
            Command::TOPIC(chan, None) => write_cmd(f, "TOPIC", &[chan]),
            Command::TOPIC(chan, Some(topic)) => write_cmd_freeform(f, "TOPIC", &[chan, topic]),
            Command::Raw(verb, args) => {
                f.write_str(verb)?;
                for arg in args {
                    f.write_char(' ')?;
                    f.write_str(arg)?;
                }
                Ok(())
            }
        }
    }
}

impl Command {
    /// Validate this command against the grammar it claims to satisfy.
    ///
    /// Checks parameter grammar per verb and the serialized line length
    /// (≤ [`MAX_LINE_LEN`] bytes including CRLF). On error nothing may
    /// be sent; the failure is local and non-fatal.
    pub fn validate(&self) -> Result<(), InvalidCommand> {
        match self {
            Command::NICK(nick) => {
                validate_nickname(nick).map_err(|cause| InvalidCommand::InvalidNickname {
                    nick: nick.clone(),
                    cause,
                })?;
            }
            Command::USER(username, hostname, servername, realname) => {
                for param in [username, hostname, servername] {
                    validate_middle_param(param).map_err(|cause| {
                        InvalidCommand::InvalidParameter {
                            param: param.clone(),
                            cause,
                        }
                    })?;
                }
                validate_trailing_param(realname)
                    .map_err(|cause| InvalidCommand::InvalidTrailing { cause })?;
            }
            Command::PASS(password) => {
                validate_middle_param(password).map_err(|cause| {
                    InvalidCommand::InvalidParameter {
                        param: password.clone(),
                        cause,
                    }
                })?;
            }
            Command::QUIT(message) | Command::AWAY(message) => {
                if let Some(message) = message {
                    validate_trailing_param(message)
                        .map_err(|cause| InvalidCommand::InvalidTrailing { cause })?;
                }
            }
            Command::PRIVMSG(target, text) | Command::NOTICE(target, text) => {
                validate_middle_param(target).map_err(|cause| {
                    InvalidCommand::InvalidParameter {
                        param: target.clone(),
                        cause,
                    }
                })?;
                validate_trailing_param(text)
                    .map_err(|cause| InvalidCommand::InvalidTrailing { cause })?;
            }
            Command::JOIN(chans, keys) => {
                validate_middle_param(chans).map_err(|cause| {
                    InvalidCommand::InvalidParameter {
                        param: chans.clone(),
                        cause,
                    }
                })?;
                if let Some(keys) = keys {
                    validate_middle_param(keys).map_err(|cause| {
                        InvalidCommand::InvalidParameter {
                            param: keys.clone(),
                            cause,
                        }
                    })?;
                }
            }
            Command::PART(chans) => {
                validate_middle_param(chans).map_err(|cause| {
                    InvalidCommand::InvalidParameter {
                        param: chans.clone(),
                        cause,
                    }
                })?;
            }
            Command::PONG(token) => {
                validate_trailing_param(token)
                    .map_err(|cause| InvalidCommand::InvalidTrailing { cause })?;
            }
            Command::TOPIC(chan, topic) => {
                validate_middle_param(chan).map_err(|cause| {
                    InvalidCommand::InvalidParameter {
                        param: chan.clone(),
                        cause,
                    }
                })?;
                if let Some(topic) = topic {
                    validate_trailing_param(topic)
                        .map_err(|cause| InvalidCommand::InvalidTrailing { cause })?;
                }
            }
            Command::Raw(_, args) => {
                for param in args {
                    validate_middle_param(param).map_err(|cause| {
                        InvalidCommand::InvalidParameter {
                            param: param.clone(),
                            cause,
                        }
                    })?;
                }
            }
        }

        let line_len = self.to_string().len() + 2; // CRLF
        if line_len > MAX_LINE_LEN {
            return Err(InvalidCommand::LineTooLong(line_len));
        }

        Ok(())
    }
}
