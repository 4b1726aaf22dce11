//! Session state.
//!
//! One [`Session`] exists per process. It is owned by the dispatch loop
//! and mutated only there; every other task communicates through the
//! shared event queue. This replaces the shared-mutable-fields design
//! with a single-writer value.

/// Lifecycle of the IRC session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Connected, registration not yet attempted.
    #[default]
    Unregistered,
    /// NICK/USER (optionally PASS) sent, awaiting the welcome reply.
    Registering,
    /// Received 001, fully registered.
    Registered,
    /// QUIT issued locally or by the server, or the transport failed;
    /// draining the grace period.
    Closing,
    /// Resources released. Terminal.
    Closed,
}

/// Accumulator for the multi-line MOTD greeting.
///
/// 375 (MOTD start) resets it, 372 appends, 376 (MOTD end) freezes it.
/// Freezing happens exactly once; appends after the freeze are dropped.
#[derive(Clone, Debug, Default)]
pub struct Motd {
    lines: Vec<String>,
    frozen: bool,
}

impl Motd {
    /// Discard any accumulated text and start a fresh accumulation.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.frozen = false;
    }

    /// Append one MOTD line. Ignored once frozen.
    pub fn push(&mut self, line: &str) {
        if !self.frozen {
            self.lines.push(line.to_string());
        }
    }

    /// Freeze the accumulated text. Idempotent.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Whether the terminator has been seen.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// The accumulated lines, in arrival order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// The single source of truth for the session.
#[derive(Clone, Debug)]
pub struct Session {
    /// Current nickname; updated on both locally issued and
    /// server-confirmed NICK.
    pub nickname: String,
    /// Username (ident) sent at registration.
    pub username: String,
    /// Real name sent at registration.
    pub realname: String,
    /// Server host this session is connected to.
    pub host: String,
    /// Raw user mode string as last reported by the server.
    pub mode: String,
    /// Message-of-the-day accumulator.
    pub motd: Motd,
    /// Lifecycle state.
    pub state: SessionState,
}

impl Session {
    /// Create a session in the `Unregistered` state.
    pub fn new(nickname: &str, username: &str, realname: &str, host: &str) -> Self {
        Self {
            nickname: nickname.to_string(),
            username: username.to_string(),
            realname: realname.to_string(),
            host: host.to_string(),
            mode: String::new(),
            motd: Motd::default(),
            state: SessionState::Unregistered,
        }
    }

    /// Whether the session is still exchanging traffic.
    pub fn is_running(&self) -> bool {
        !matches!(self.state, SessionState::Closing | SessionState::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motd_accumulates_in_order() {
        let mut motd = Motd::default();
        motd.reset();
        motd.push("Line one");
        motd.push("Line two");
        motd.freeze();

        assert_eq!(motd.lines(), ["Line one", "Line two"]);
        assert!(motd.is_frozen());
    }

    #[test]
    fn test_motd_freeze_drops_later_appends() {
        let mut motd = Motd::default();
        motd.push("kept");
        motd.freeze();
        motd.push("dropped");

        assert_eq!(motd.lines(), ["kept"]);
    }

    #[test]
    fn test_motd_reset_discards_and_unfreezes() {
        let mut motd = Motd::default();
        motd.push("old");
        motd.freeze();
        motd.reset();
        motd.push("new");

        assert_eq!(motd.lines(), ["new"]);
        assert!(!motd.is_frozen());
    }

    #[test]
    fn test_new_session_is_unregistered() {
        let session = Session::new("nick", "user", "real", "irc.example.com");
        assert_eq!(session.state, SessionState::Unregistered);
        assert!(session.is_running());
        assert!(session.mode.is_empty());
    }
}
