//! Outbound parameter validation.
//!
//! Every client-issued command is checked against the grammar it claims
//! to satisfy before it reaches the wire:
//!
//! - Nicknames follow the RFC 1459 grammar
//!   `letter ( letter | digit | special )*` where special is one of
//!   `` - [ ] \ ` ^ { } ``.
//! - Middle parameters must not be empty, start with `:`, or contain
//!   space, NUL, CR, or LF.
//! - Trailing parameters may contain spaces but never NUL, CR, or LF.
//! - A serialized line (command, parameters, CRLF) never exceeds
//!   [`MAX_LINE_LEN`] bytes.
//!
//! All validation failures are local and non-fatal: nothing is sent and
//! the session continues.

/// Maximum length of an IRC line including the trailing CRLF, per
/// RFC 1459 §2.3.
pub const MAX_LINE_LEN: usize = 512;

/// Characters that are never valid inside any IRC parameter.
///
/// These characters terminate or delimit IRC protocol lines.
pub const PROTOCOL_CONTROL_CHARS: &[char] = &[
    '\x00', // NUL - terminates strings
    '\x0D', // CR - line delimiter
    '\x0A', // LF - line delimiter
];

/// Result of validation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The input was empty.
    Empty,
    /// Invalid character found at position.
    InvalidChar {
        /// The invalid character.
        ch: char,
        /// Position in the string.
        position: usize,
    },
    /// Invalid first character.
    InvalidFirstChar {
        /// The invalid character.
        ch: char,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "input is empty"),
            ValidationError::InvalidChar { ch, position } => {
                write!(f, "invalid character {:?} at position {}", ch, position)
            }
            ValidationError::InvalidFirstChar { ch } => {
                write!(f, "invalid first character: {:?}", ch)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check if a character is a protocol control character (NUL, CR, LF).
#[inline]
pub fn is_protocol_control_char(c: char) -> bool {
    PROTOCOL_CONTROL_CHARS.contains(&c)
}

/// Check if a string contains any protocol control characters.
///
/// # Examples
///
/// ```
/// use minirc::validation::contains_protocol_control_chars;
///
/// assert!(contains_protocol_control_chars("hello\x00world"));
/// assert!(contains_protocol_control_chars("line\r\n"));
/// assert!(!contains_protocol_control_chars("hello world"));
/// ```
pub fn contains_protocol_control_chars(s: &str) -> bool {
    s.chars().any(is_protocol_control_char)
}

/// Check if a character is a special nickname character.
///
/// Special chars per RFC 1459: `` - [ ] \ ` ^ { } ``
#[inline]
pub fn is_nick_special_char(c: char) -> bool {
    matches!(c, '-' | '[' | ']' | '\\' | '`' | '^' | '{' | '}')
}

/// Check if a character is valid as the first character of a nickname.
#[inline]
pub fn is_valid_nick_first_char(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Check if a character is valid in a nickname after the first char.
#[inline]
pub fn is_valid_nick_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || is_nick_special_char(c)
}

/// Validate an IRC nickname.
///
/// Per RFC 1459, nicknames must start with a letter and continue with
/// letters, digits, or the special characters `` - [ ] \ ` ^ { } ``.
///
/// # Examples
///
/// ```
/// use minirc::validation::validate_nickname;
///
/// assert!(validate_nickname("Guest42").is_ok());
/// assert!(validate_nickname("nick`-{}").is_ok());
/// assert!(validate_nickname("").is_err()); // Empty
/// assert!(validate_nickname("1abc").is_err()); // Starts with digit
/// assert!(validate_nickname("ab cd").is_err()); // Contains space
/// ```
pub fn validate_nickname(nick: &str) -> Result<(), ValidationError> {
    if nick.is_empty() {
        return Err(ValidationError::Empty);
    }

    let mut chars = nick.chars();
    let first = chars.next().expect("non-empty checked above");

    if !is_valid_nick_first_char(first) {
        return Err(ValidationError::InvalidFirstChar { ch: first });
    }

    for (i, c) in chars.enumerate() {
        if !is_valid_nick_char(c) {
            return Err(ValidationError::InvalidChar {
                ch: c,
                position: i + 1,
            });
        }
    }

    Ok(())
}

/// Validate a middle (non-trailing) parameter.
///
/// Middle parameters must be non-empty, must not start with `:`, and
/// must not contain space, NUL, CR, or LF.
///
/// # Examples
///
/// ```
/// use minirc::validation::validate_middle_param;
///
/// assert!(validate_middle_param("guest").is_ok());
/// assert!(validate_middle_param("").is_err());
/// assert!(validate_middle_param(":secret").is_err());
/// assert!(validate_middle_param("two words").is_err());
/// ```
pub fn validate_middle_param(param: &str) -> Result<(), ValidationError> {
    if param.is_empty() {
        return Err(ValidationError::Empty);
    }

    if param.starts_with(':') {
        return Err(ValidationError::InvalidFirstChar { ch: ':' });
    }

    for (i, c) in param.chars().enumerate() {
        if c == ' ' || is_protocol_control_char(c) {
            return Err(ValidationError::InvalidChar { ch: c, position: i });
        }
    }

    Ok(())
}

/// Validate a trailing parameter.
///
/// Trailing parameters may contain spaces and colons but never NUL,
/// CR, or LF.
pub fn validate_trailing_param(param: &str) -> Result<(), ValidationError> {
    for (i, c) in param.chars().enumerate() {
        if is_protocol_control_char(c) {
            return Err(ValidationError::InvalidChar { ch: c, position: i });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_nicknames() {
        assert!(validate_nickname("Guest42").is_ok());
        assert!(validate_nickname("a").is_ok());
        assert!(validate_nickname("nick-name").is_ok());
        assert!(validate_nickname("n[box]").is_ok());
        assert!(validate_nickname("x`y^z").is_ok());
        assert!(validate_nickname("brace{s}").is_ok());
        assert!(validate_nickname("back\\slash").is_ok());
    }

    #[test]
    fn test_invalid_nicknames() {
        assert_eq!(validate_nickname(""), Err(ValidationError::Empty));
        assert_eq!(
            validate_nickname("1abc"),
            Err(ValidationError::InvalidFirstChar { ch: '1' })
        );
        assert_eq!(
            validate_nickname("-dash"),
            Err(ValidationError::InvalidFirstChar { ch: '-' })
        );
        assert_eq!(
            validate_nickname("ab cd"),
            Err(ValidationError::InvalidChar {
                ch: ' ',
                position: 2
            })
        );
        assert!(validate_nickname("nick!name").is_err());
        assert!(validate_nickname("nick\u{e9}").is_err()); // non-ASCII
    }

    #[test]
    fn test_middle_param() {
        assert!(validate_middle_param("guest").is_ok());
        assert!(validate_middle_param("0").is_ok());
        assert_eq!(validate_middle_param(""), Err(ValidationError::Empty));
        assert_eq!(
            validate_middle_param(":lead"),
            Err(ValidationError::InvalidFirstChar { ch: ':' })
        );
        assert!(validate_middle_param("a b").is_err());
        assert!(validate_middle_param("a\nb").is_err());
        assert!(validate_middle_param("a\0b").is_err());
    }

    #[test]
    fn test_trailing_param() {
        assert!(validate_trailing_param("").is_ok());
        assert!(validate_trailing_param("real name with spaces").is_ok());
        assert!(validate_trailing_param("colons : allowed : here").is_ok());
        assert!(validate_trailing_param("no\rcr").is_err());
        assert!(validate_trailing_param("no\nlf").is_err());
        assert!(validate_trailing_param("no\0nul").is_err());
    }
}
