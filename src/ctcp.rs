//! Client-To-Client Protocol (CTCP) handling.
//!
//! A CTCP payload rides inside the trailing parameter of a PRIVMSG,
//! delimited by the 0x01 control byte at both ends:
//!
//! ```text
//! PRIVMSG nick :\x01VERSION\x01
//! PRIVMSG nick :\x01DCC SEND file.bin 2130706433 5000 1024\x01
//! ```
//!
//! Recognized payloads are VERSION queries and DCC SEND offers; anything
//! else is surfaced verbatim so unknown extensions degrade to display
//! rather than errors.

/// The CTCP envelope delimiter byte.
pub const CTCP_DELIM: char = '\u{0001}';

/// A recognized CTCP payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ctcp<'a> {
    /// `VERSION` query: the peer asks what client we run.
    Version,
    /// `DCC SEND`: the peer offers a file on a second connection.
    DccSend {
        /// Name the file was offered under.
        filename: String,
        /// Peer IPv4 address packed as a network-byte-order integer,
        /// per the legacy DCC convention.
        address: u32,
        /// Peer TCP port.
        port: u16,
        /// Declared byte count of the file.
        size: u64,
    },
    /// Any other payload, verbatim without its delimiters.
    Other(&'a str),
}

impl<'a> Ctcp<'a> {
    /// Parse a PRIVMSG trailing parameter as a CTCP payload.
    ///
    /// Returns `None` when the text does not start with the CTCP
    /// delimiter — the message is then a plain chat line. A payload
    /// with a recognized keyword but malformed arguments degrades to
    /// [`Ctcp::Other`].
    pub fn parse(text: &'a str) -> Option<Ctcp<'a>> {
        let payload = text.strip_prefix(CTCP_DELIM)?;
        let payload = payload.strip_suffix(CTCP_DELIM).unwrap_or(payload);

        let mut words = payload.split(' ');
        let keyword = words.next().unwrap_or("");

        if keyword.eq_ignore_ascii_case("VERSION") {
            return Some(Ctcp::Version);
        }

        if keyword.eq_ignore_ascii_case("DCC") {
            if let Some(offer) = parse_dcc_send(payload) {
                return Some(offer);
            }
        }

        Some(Ctcp::Other(payload))
    }
}

/// Parse `DCC SEND <filename> <address> <port> <size>` arguments.
fn parse_dcc_send(payload: &str) -> Option<Ctcp<'static>> {
    let mut words = payload.split(' ');
    let _dcc = words.next()?;
    if !words.next()?.eq_ignore_ascii_case("SEND") {
        return None;
    }

    let filename = words.next()?.to_string();
    let address: u32 = words.next()?.parse().ok()?;
    let port: u16 = words.next()?.parse().ok()?;
    let size: u64 = words.next()?.parse().ok()?;

    Some(Ctcp::DccSend {
        filename,
        address,
        port,
        size,
    })
}

/// Wrap a payload in the CTCP envelope.
pub fn envelope(payload: &str) -> String {
    format!("{}{}{}", CTCP_DELIM, payload, CTCP_DELIM)
}

/// The fixed client-identification string sent in VERSION replies.
pub fn version_string() -> String {
    format!(
        "VERSION {} {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}
