//! # minirc
//!
//! A minimal client for the IRC wire protocol (RFC 1459): one TCP
//! session, CRLF line framing, single-pass message parsing, a sans-IO
//! command dispatcher owning all session state, CTCP VERSION/DCC
//! handling, and an out-of-band DCC file receiver.
//!
//! ## Features
//!
//! - Line framing with chunk-size independence over a tokio codec
//! - RFC 1459 message parsing (prefix, command, params, trailing)
//! - Canonical numeric↔name reply table consulted for both forms
//! - Outbound validation: nothing malformed or oversize reaches the wire
//! - Console verbs (`/nick`, `/join`, `/msg`, ...) mapped onto protocol
//!   commands, with a scripted bare-verb variant
//! - DCC SEND receive on an independent connection, reporting through
//!   the session's single event queue

#![deny(clippy::all)]

//! ## Quick Start
//!
//! ```rust
//! use minirc::dispatch::{Action, Dispatcher};
//! use minirc::state::Session;
//!
//! let session = Session::new("Guest42", "guest", "A. Guest", "irc.example.com");
//! let mut dispatcher = Dispatcher::new(session, None, false);
//!
//! // Server traffic in, effects out; the run loop executes them.
//! let actions = dispatcher.server_line("PING :abc123");
//! assert!(actions.iter().any(|a| matches!(a, Action::Send(_))));
//! ```

pub mod casemap;
pub mod client;
pub mod codec;
pub mod command;
pub mod config;
pub mod ctcp;
pub mod dcc;
pub mod dispatch;
pub mod error;
pub mod logfile;
pub mod message;
pub mod response;
pub mod state;
pub mod transport;
pub mod validation;

pub use self::casemap::irc_eq;
pub use self::client::{run, Event};
pub use self::codec::IrcCodec;
pub use self::command::Command;
pub use self::config::Config;
pub use self::ctcp::Ctcp;
pub use self::dcc::{DccOffer, TransferOutcome, TransferResult};
pub use self::dispatch::{Action, Dispatcher};
pub use self::error::{InvalidCommand, MessageParseError, ProtocolError};
pub use self::logfile::{Direction, LogSink};
pub use self::message::Message;
pub use self::response::Response;
pub use self::state::{Motd, Session, SessionState};
pub use self::transport::Transport;
pub use self::validation::MAX_LINE_LEN;
