//! Append-only protocol log.
//!
//! Every line sent, and every dispatched server line, is appended as
//!
//! ```text
//! <timestamp> : <client|server> : <raw line>
//! ```
//!
//! with a fixed-width local timestamp carrying a trailing numeric UTC
//! offset (`Fri 07 Aug 2026 14:03:59 +0000`). This is protocol output,
//! distinct from `tracing` diagnostics.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::Local;

/// Which side of the session produced a logged line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// A line this client sent.
    Client,
    /// A line received from the server.
    Server,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Direction::Client => "client",
            Direction::Server => "server",
        }
    }
}

/// Append-only log sink.
pub struct LogSink {
    file: File,
}

impl LogSink {
    /// Open (or create) the log file for appending.
    ///
    /// Failure here is a startup error: the client refuses to run
    /// without its log.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Append one entry. Write failures are reported to the caller but
    /// are not fatal to the session.
    pub fn append(&mut self, direction: Direction, line: &str) -> std::io::Result<()> {
        let stamp = Local::now().format("%a %d %b %Y %X %z");
        writeln!(self.file, "{} : {} : {}", stamp, direction.as_str(), line)
    }
}
