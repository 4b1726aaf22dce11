//! Error types for the IRC client.
//!
//! This module defines error types for transport-level failures, inbound
//! message parsing, and outbound command validation.

use thiserror::Error;

use crate::validation::ValidationError;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Line exceeded the RFC 1459 maximum length.
    #[error("line too long: {0} bytes")]
    LineTooLong(usize),

    /// A line that was not valid UTF-8.
    #[error("decode error: {0}")]
    Decode(#[from] std::str::Utf8Error),

    /// Outbound command rejected before transmission.
    #[error("invalid command: {0}")]
    InvalidCommand(#[from] InvalidCommand),
}

/// Errors encountered when parsing inbound IRC lines.
///
/// These are never fatal to a session: the dispatcher recovers by
/// rendering the offending line verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Line was empty.
    #[error("empty message")]
    EmptyMessage,

    /// Line had a `:` prefix marker but no prefix or command after it.
    #[error("invalid prefix")]
    InvalidPrefix,

    /// Command token was missing or not alphanumeric.
    #[error("invalid command")]
    InvalidCommand,
}

/// Errors that reject an outbound command before it reaches the wire.
///
/// All of these are local and non-fatal: the command is dropped, the
/// operator sees a diagnostic, and the session continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidCommand {
    /// Nickname violates the RFC 1459 nickname grammar.
    #[error("invalid nickname {nick:?}: {cause}")]
    InvalidNickname {
        /// The rejected nickname.
        nick: String,
        /// The underlying validation failure.
        #[source]
        cause: ValidationError,
    },

    /// A middle parameter violates parameter grammar (leading `:`,
    /// embedded space, NUL, CR, LF, or empty).
    #[error("invalid parameter {param:?}: {cause}")]
    InvalidParameter {
        /// The rejected parameter.
        param: String,
        /// The underlying validation failure.
        #[source]
        cause: ValidationError,
    },

    /// A trailing parameter contains NUL, CR, or LF.
    #[error("invalid trailing parameter: {cause}")]
    InvalidTrailing {
        /// The underlying validation failure.
        #[source]
        cause: ValidationError,
    },

    /// Serialized line would exceed the 512-byte limit.
    #[error("line too long: {0} bytes (max 512 including CRLF)")]
    LineTooLong(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InvalidCommand::LineTooLong(600);
        assert_eq!(
            format!("{}", err),
            "line too long: 600 bytes (max 512 including CRLF)"
        );

        let err = MessageParseError::EmptyMessage;
        assert_eq!(format!("{}", err), "empty message");
    }

    #[test]
    fn test_error_source_chaining() {
        let cause = ValidationError::InvalidFirstChar { ch: '1' };
        let err = InvalidCommand::InvalidNickname {
            nick: "1abc".to_string(),
            cause,
        };

        let source = std::error::Error::source(&err);
        assert!(source.is_some());
        assert_eq!(source.unwrap().to_string(), cause.to_string());
    }

    #[test]
    fn test_error_conversion() {
        let io_err =
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let protocol_err: ProtocolError = io_err.into();

        match protocol_err {
            ProtocolError::Io(_) => {}
            _ => panic!("Expected Io variant"),
        }
    }
}
