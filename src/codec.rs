//! Line framing for the IRC wire protocol.
//!
//! [`IrcCodec`] turns the raw byte stream from the socket into complete
//! CRLF-terminated lines and serializes outbound commands. An incomplete
//! trailing fragment stays in the read buffer across calls, so the lines
//! produced are independent of how the stream was chunked into reads.
//! End of stream (a zero-length read) surfaces as stream termination
//! from the framed transport, which the client treats as the
//! connection-closed condition.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::command::Command;
use crate::error::ProtocolError;
use crate::validation::MAX_LINE_LEN;

/// Codec for RFC 1459 lines over a byte stream.
///
/// Decodes to raw line strings (terminators stripped); message parsing
/// is a separate stage so that malformed lines can be recovered by
/// rendering them verbatim. Encodes [`Command`] values, appending CRLF
/// and refusing oversize lines without a partial write.
#[derive(Debug, Default)]
pub struct IrcCodec {
    _priv: (),
}

impl IrcCodec {
    /// Create a new codec. Fresh per connection; no cross-connection state.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for IrcCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, ProtocolError> {
        let Some(newline_pos) = src.iter().position(|&b| b == b'\n') else {
            // No complete line yet. A peer that streams more than a full
            // line's worth of bytes without a terminator is broken.
            if src.len() > MAX_LINE_LEN {
                let len = src.len();
                src.clear();
                return Err(ProtocolError::LineTooLong(len));
            }
            return Ok(None);
        };

        let line_len = newline_pos + 1;
        let line = src.split_to(line_len);

        if line_len > MAX_LINE_LEN {
            return Err(ProtocolError::LineTooLong(line_len));
        }

        let text = std::str::from_utf8(&line)?;
        Ok(Some(text.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Encoder<Command> for IrcCodec {
    type Error = ProtocolError;

    fn encode(&mut self, cmd: Command, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        let line = cmd.to_string();
        if line.len() + 2 > MAX_LINE_LEN {
            return Err(ProtocolError::LineTooLong(line.len() + 2));
        }

        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
