//! Command dispatch.
//!
//! The [`Dispatcher`] is sans-IO: it consumes parsed server messages and
//! console lines, performs every [`Session`] mutation, and returns
//! [`Action`] values for the run loop to execute. It never touches the
//! network, the terminal, or the log file itself, which keeps the whole
//! dispatch policy unit-testable without mocking I/O.

use tracing::debug;

use crate::casemap::irc_eq;
use crate::command::Command;
use crate::ctcp::{self, Ctcp};
use crate::dcc::{DccOffer, TransferOutcome, TransferResult};
use crate::logfile::Direction;
use crate::message::Message;
use crate::response::Response;
use crate::state::{Session, SessionState};

/// Effects produced by dispatch, executed in order by the run loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Send this command to the server. Always pre-validated.
    Send(Command),
    /// Render this line on the console.
    Print(String),
    /// Append this entry to the log sink.
    Log(Direction, String),
    /// Start a DCC transfer for this offer.
    Dcc(DccOffer),
    /// Begin session shutdown (grace drain, then teardown).
    Quit,
}

/// Consumes console and server input, owns the [`Session`].
pub struct Dispatcher {
    session: Session,
    password: Option<String>,
    script: bool,
}

impl Dispatcher {
    /// Create a dispatcher around a fresh session.
    ///
    /// `script` enables the scripted console variant where bare verbs
    /// (`quit`, `nick x`, `join x`) are accepted without the slash.
    pub fn new(session: Session, password: Option<String>, script: bool) -> Self {
        Self {
            session,
            password,
            script,
        }
    }

    /// The session owned by this dispatcher.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start registration: PASS (if configured), NICK, USER.
    pub fn start(&mut self) -> Vec<Action> {
        let mut out = Vec::new();

        if let Some(pass) = self.password.clone() {
            self.send(Command::PASS(pass), &mut out);
        }
        self.send(Command::NICK(self.session.nickname.clone()), &mut out);
        self.send(
            Command::USER(
                self.session.username.clone(),
                self.session.host.clone(),
                self.session.host.clone(),
                self.session.realname.clone(),
            ),
            &mut out,
        );

        self.session.state = SessionState::Registering;
        out
    }

    /// Dispatch one framed server line.
    ///
    /// A line that fails to parse is recovered by rendering it
    /// verbatim; parse errors are never fatal.
    pub fn server_line(&mut self, line: &str) -> Vec<Action> {
        let mut out = Vec::new();
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return out;
        }

        match Message::parse(line) {
            Ok(msg) => self.dispatch(&msg, line, &mut out),
            Err(e) => {
                debug!("unparseable server line ({}): {:?}", e, line);
                out.push(Action::Print(line.to_string()));
            }
        }
        out
    }

    /// Dispatch one console input line.
    pub fn console_line(&mut self, line: &str) -> Vec<Action> {
        let mut out = Vec::new();
        let line = line.trim();
        if line.is_empty() {
            return out;
        }

        if let Some(rest) = line.strip_prefix('/') {
            self.console_command(rest, line, &mut out);
        } else if self.script {
            self.console_command(line, line, &mut out);
        } else {
            out.push(Action::Print(line.to_string()));
        }
        out
    }

    /// The main transport went down: implicit quit.
    pub fn connection_lost(&mut self) -> Vec<Action> {
        let mut out = vec![Action::Print("Connection down".to_string())];
        if self.session.is_running() {
            self.session.state = SessionState::Closing;
            out.push(Action::Quit);
        }
        out
    }

    /// A DCC transfer finished; report through the shared queue path.
    pub fn transfer_result(&mut self, result: TransferResult) -> Vec<Action> {
        let mut out = Vec::new();
        match result.outcome {
            TransferOutcome::Complete { bytes } => {
                out.push(Action::Print(format!(
                    "Transfer complete from {} : {} ({} bytes)",
                    result.from, result.filename, bytes
                )));
            }
            TransferOutcome::ConnectFailed => {
                out.push(Action::Print(format!(
                    "DCC transfer of {} from {} failed: could not connect",
                    result.filename, result.from
                )));
                self.send(
                    Command::PRIVMSG(result.from, "failed to connect to your host".to_string()),
                    &mut out,
                );
            }
            TransferOutcome::Short { received, expected } => {
                out.push(Action::Print(format!(
                    "DCC transfer of {} from {} failed: {} of {} bytes",
                    result.filename, result.from, received, expected
                )));
                self.send(
                    Command::PRIVMSG(result.from, format!("failed to receive {}", result.filename)),
                    &mut out,
                );
            }
        }
        out
    }

    /// Resource teardown finished; the session is terminal.
    pub fn closed(&mut self) {
        self.session.state = SessionState::Closed;
    }

    /// Validate, then emit the print/log/send triple for one outbound
    /// command. On validation failure nothing is sent and the operator
    /// sees a diagnostic.
    fn send(&self, cmd: Command, out: &mut Vec<Action>) {
        match cmd.validate() {
            Ok(()) => {
                let line = cmd.to_string();
                out.push(Action::Print(line.clone()));
                out.push(Action::Log(Direction::Client, line));
                out.push(Action::Send(cmd));
            }
            Err(e) => out.push(Action::Print(format!("not sent: {}", e))),
        }
    }

    fn dispatch(&mut self, msg: &Message, raw: &str, out: &mut Vec<Action>) {
        // PONG immediately, in every state.
        if msg.command.eq_ignore_ascii_case("PING") {
            let token = msg.payload().unwrap_or(&self.session.host).to_string();
            out.push(Action::Print(raw.to_string()));
            out.push(Action::Log(Direction::Server, raw.to_string()));
            self.send(Command::PONG(token), out);
            return;
        }

        // One canonical table resolves both "372" and "RPL_MOTD".
        if let Ok(resp) = msg.command.parse::<Response>() {
            self.dispatch_reply(resp, msg, out);
            return;
        }

        match msg.command.to_ascii_uppercase().as_str() {
            "NICK" => {
                let new = msg.payload().unwrap_or("").to_string();
                let old = msg
                    .origin_nick()
                    .unwrap_or(&self.session.nickname)
                    .to_string();
                if irc_eq(&old, &self.session.nickname) {
                    self.session.nickname = new.clone();
                }
                let text = format!("{} is now known as {}", old, new);
                out.push(Action::Print(text.clone()));
                out.push(Action::Log(Direction::Server, format!("NICK {}", text)));
            }
            "QUIT" => self.server_quit(msg, raw, out),
            "JOIN" => {
                let chan = msg.payload().unwrap_or("");
                let origin = msg.origin_nick().unwrap_or(&self.session.host);
                let text = format!("{} just joined {}", origin, chan);
                out.push(Action::Print(text.clone()));
                out.push(Action::Log(Direction::Server, format!("JOIN {}", text)));
            }
            "PART" => {
                let chan = msg.param(0).or_else(|| msg.payload()).unwrap_or("");
                let origin = msg.origin_nick().unwrap_or(&self.session.host);
                let text = format!("{} just left {}", origin, chan);
                out.push(Action::Print(text.clone()));
                out.push(Action::Log(Direction::Server, format!("PART {}", text)));
            }
            "MODE" => {
                let mut mode = msg.params.iter().skip(1).cloned().collect::<Vec<_>>();
                if let Some(t) = &msg.trailing {
                    mode.push(t.clone());
                }
                let mode = mode.join(" ");
                self.session.mode = mode.clone();
                out.push(Action::Print(mode.clone()));
                out.push(Action::Log(Direction::Server, format!("MODE {}", mode)));
            }
            "NOTICE" => self.chat(msg, "NOTICE", out),
            "PRIVMSG" => self.privmsg(msg, out),
            _ => {
                // Forward-compatible default: surface the line unchanged.
                out.push(Action::Print(raw.to_string()));
            }
        }
    }

    fn dispatch_reply(&mut self, resp: Response, msg: &Message, out: &mut Vec<Action>) {
        // Numeric replies carry our nickname as params[0]; the rendered
        // text is everything after it.
        let mut text = msg
            .params
            .iter()
            .skip(1)
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(trailing) = &msg.trailing {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(trailing);
        }

        match resp {
            Response::RPL_WELCOME => {
                // A late 001 must not reopen a closing session.
                if self.session.is_running() {
                    self.session.state = SessionState::Registered;
                }
            }
            Response::RPL_MOTDSTART => self.session.motd.reset(),
            Response::RPL_MOTD => self.session.motd.push(&text),
            Response::RPL_ENDOFMOTD => self.session.motd.freeze(),
            _ => {}
        }

        out.push(Action::Print(text.clone()));
        out.push(Action::Log(
            Direction::Server,
            format!("{} {}", resp.name(), text),
        ));
    }

    fn server_quit(&mut self, msg: &Message, raw: &str, out: &mut Vec<Action>) {
        let ours = match msg.origin_nick() {
            Some(origin) => irc_eq(origin, &self.session.nickname),
            None => true,
        };

        if ours {
            out.push(Action::Print(raw.to_string()));
            out.push(Action::Log(Direction::Server, raw.to_string()));
            if self.session.is_running() {
                self.session.state = SessionState::Closing;
                out.push(Action::Quit);
            }
        } else {
            // Another user's departure is display-only.
            out.push(Action::Print(raw.to_string()));
        }
    }

    /// Shared NOTICE/PRIVMSG rendering: the target precedes the origin
    /// only for channel-addressed messages.
    fn chat(&self, msg: &Message, tag: &str, out: &mut Vec<Action>) {
        let target = msg.param(0).unwrap_or("");
        let origin = msg.origin_nick().unwrap_or(&self.session.host);
        let text = msg.trailing.as_deref().unwrap_or("");

        let who = if irc_eq(target, &self.session.nickname) {
            origin.to_string()
        } else {
            format!("{} {}", target, origin)
        };

        let rendered = format!("{} : {}", who, text);
        out.push(Action::Print(rendered.clone()));
        out.push(Action::Log(
            Direction::Server,
            format!("{} {}", tag, rendered),
        ));
    }

    fn privmsg(&mut self, msg: &Message, out: &mut Vec<Action>) {
        let text = msg.trailing.as_deref().unwrap_or("");
        let origin = msg
            .origin_nick()
            .unwrap_or(&self.session.host)
            .to_string();

        match Ctcp::parse(text) {
            Some(Ctcp::Version) => {
                self.send(
                    Command::NOTICE(origin, ctcp::envelope(&ctcp::version_string())),
                    out,
                );
            }
            Some(Ctcp::DccSend {
                filename,
                address,
                port,
                size,
            }) => {
                out.push(Action::Print(format!(
                    "DCC SEND offer from {} : {} ({} bytes)",
                    origin, filename, size
                )));
                out.push(Action::Dcc(DccOffer {
                    filename,
                    address,
                    port,
                    size,
                    from: origin,
                }));
            }
            Some(Ctcp::Other(payload)) => {
                // Unknown-extension tolerance: display, don't reject.
                out.push(Action::Print(payload.to_string()));
            }
            None => self.chat(msg, "PRIVMSG", out),
        }
    }

    fn console_command(&mut self, command: &str, raw: &str, out: &mut Vec<Action>) {
        let mut words = command.splitn(2, ' ');
        let verb = words.next().unwrap_or("").to_ascii_lowercase();
        let rest = words.next().unwrap_or("").trim();

        match verb.as_str() {
            "quit" => {
                let message = (!rest.is_empty()).then(|| rest.to_string());
                self.send(Command::QUIT(message), out);
                self.session.state = SessionState::Closing;
                out.push(Action::Quit);
            }
            "nick" => {
                let cmd = Command::NICK(rest.to_string());
                if cmd.validate().is_ok() {
                    // Locally issued NICK updates the session just like a
                    // server-confirmed one.
                    self.session.nickname = rest.to_string();
                }
                self.send(cmd, out);
            }
            "join" => {
                if rest.is_empty() {
                    return;
                }
                let (chans, keys) = match rest.split_once(' ') {
                    Some((chans, keys)) => (chans.to_string(), Some(keys.to_string())),
                    None => (rest.to_string(), None),
                };
                self.send(Command::JOIN(chans, keys), out);
            }
            "part" => {
                if !rest.is_empty() {
                    self.send(Command::PART(rest.to_string()), out);
                }
            }
            "msg" | "privmsg" => {
                let (target, text) = rest.split_once(' ').unwrap_or((rest, ""));
                if !target.is_empty() {
                    self.send(
                        Command::PRIVMSG(target.to_string(), text.to_string()),
                        out,
                    );
                }
            }
            "notice" => {
                let (target, text) = rest.split_once(' ').unwrap_or((rest, ""));
                if !target.is_empty() {
                    self.send(Command::NOTICE(target.to_string(), text.to_string()), out);
                }
            }
            "topic" => {
                let (chan, text) = rest.split_once(' ').unwrap_or((rest, ""));
                if !chan.is_empty() {
                    let topic = (!text.is_empty()).then(|| text.to_string());
                    self.send(Command::TOPIC(chan.to_string(), topic), out);
                }
            }
            "away" => {
                let message = (!rest.is_empty()).then(|| rest.to_string());
                self.send(Command::AWAY(message), out);
            }
            "ctcp" => {
                let (target, sub) = rest.split_once(' ').unwrap_or((rest, ""));
                if !target.is_empty() && sub.eq_ignore_ascii_case("version") {
                    self.send(
                        Command::PRIVMSG(target.to_string(), ctcp::envelope("VERSION")),
                        out,
                    );
                } else {
                    out.push(Action::Print(raw.to_string()));
                }
            }
            // Verbs forwarded verbatim; the server owns their semantics.
            "names" | "trace" | "mode" | "list" | "invite" | "kick" | "version" | "stats"
            | "links" | "time" | "admin" | "info" | "who" | "whois" | "whowas" | "ison" => {
                let args = rest.split_whitespace().map(str::to_string).collect();
                self.send(Command::Raw(verb.to_ascii_uppercase(), args), out);
            }
            _ => out.push(Action::Print(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> Dispatcher {
        let session = Session::new("Guest42", "guest", "A. Guest", "irc.example.com");
        Dispatcher::new(session, None, false)
    }

    fn sends(actions: &[Action]) -> Vec<Command> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::Send(cmd) => Some(cmd.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_start_sends_nick_and_user() {
        let mut d = dispatcher();
        let actions = d.start();
        assert_eq!(
            sends(&actions),
            vec![
                Command::NICK("Guest42".into()),
                Command::USER(
                    "guest".into(),
                    "irc.example.com".into(),
                    "irc.example.com".into(),
                    "A. Guest".into()
                ),
            ]
        );
        assert_eq!(d.session().state, SessionState::Registering);
    }

    #[test]
    fn test_start_sends_pass_first_when_configured() {
        let session = Session::new("Guest42", "guest", "A. Guest", "irc.example.com");
        let mut d = Dispatcher::new(session, Some("hunter2".into()), false);
        let sent = sends(&d.start());
        assert_eq!(sent[0], Command::PASS("hunter2".into()));
        assert_eq!(sent.len(), 3);
    }

    #[test]
    fn test_welcome_registers_session() {
        let mut d = dispatcher();
        d.start();
        d.server_line(":srv 001 Guest42 :Welcome to the network");
        assert_eq!(d.session().state, SessionState::Registered);
    }

    #[test]
    fn test_ping_produces_only_pong_in_any_state() {
        // Before registration.
        let mut d = dispatcher();
        let actions = d.server_line("PING :abc123");
        assert_eq!(sends(&actions), vec![Command::PONG("abc123".into())]);

        // After registration.
        d.start();
        d.server_line(":srv 001 Guest42 :Welcome");
        let actions = d.server_line("PING :abc123");
        assert_eq!(sends(&actions), vec![Command::PONG("abc123".into())]);

        // While closing.
        d.console_line("/quit");
        let actions = d.server_line("PING :abc123");
        assert_eq!(sends(&actions), vec![Command::PONG("abc123".into())]);
    }

    #[test]
    fn test_ping_token_in_middle_param() {
        let mut d = dispatcher();
        let actions = d.server_line("PING abc123");
        assert_eq!(sends(&actions), vec![Command::PONG("abc123".into())]);
    }

    #[test]
    fn test_motd_accumulates_then_freezes_once() {
        let mut d = dispatcher();
        d.server_line(":srv 375 Guest42 :Start");
        d.server_line(":srv 372 Guest42 :Line one");
        d.server_line(":srv 372 Guest42 :Line two");
        d.server_line(":srv 376 Guest42 :End");

        assert_eq!(d.session().motd.lines(), ["Line one", "Line two"]);
        assert!(d.session().motd.is_frozen());

        // Appends after the freeze are dropped.
        d.server_line(":srv 372 Guest42 :Late line");
        assert_eq!(d.session().motd.lines(), ["Line one", "Line two"]);
    }

    #[test]
    fn test_numeric_renders_params_after_target() {
        let mut d = dispatcher();
        let actions = d.server_line(":srv 353 Guest42 = #rust :alice bob carol");
        assert!(actions
            .iter()
            .any(|a| *a == Action::Print("= #rust alice bob carol".to_string())));
        assert!(actions.iter().any(|a| matches!(
            a,
            Action::Log(Direction::Server, line) if line.starts_with("RPL_NAMREPLY ")
        )));
    }

    #[test]
    fn test_numeric_and_alias_forms_dispatch_identically() {
        let mut d = dispatcher();
        let by_code = d.server_line(":srv 372 Guest42 :One");
        let mut d2 = dispatcher();
        let by_name = d2.server_line(":srv RPL_MOTD Guest42 :One");
        assert_eq!(by_code, by_name);
    }

    #[test]
    fn test_server_confirmed_nick_updates_session() {
        let mut d = dispatcher();
        let actions = d.server_line(":Guest42!guest@host NICK :Neo");
        assert_eq!(d.session().nickname, "Neo");
        assert!(actions
            .iter()
            .any(|a| *a == Action::Print("Guest42 is now known as Neo".to_string())));
    }

    #[test]
    fn test_other_users_nick_change_leaves_session_alone() {
        let mut d = dispatcher();
        d.server_line(":somebody!u@h NICK :newname");
        assert_eq!(d.session().nickname, "Guest42");
    }

    #[test]
    fn test_private_message_framing_shows_origin_only() {
        let mut d = dispatcher();
        let actions = d.server_line(":alice!a@h PRIVMSG Guest42 :hi there");
        assert!(actions
            .iter()
            .any(|a| *a == Action::Print("alice : hi there".to_string())));
    }

    #[test]
    fn test_channel_message_framing_puts_target_first() {
        let mut d = dispatcher();
        let actions = d.server_line(":alice!a@h PRIVMSG #rust :hi all");
        assert!(actions
            .iter()
            .any(|a| *a == Action::Print("#rust alice : hi all".to_string())));
    }

    #[test]
    fn test_notice_framing_matches_privmsg_policy() {
        let mut d = dispatcher();
        let actions = d.server_line(":srv NOTICE guest42 :look out");
        // Case-insensitive target match: addressed to us.
        assert!(actions
            .iter()
            .any(|a| *a == Action::Print("srv : look out".to_string())));
    }

    #[test]
    fn test_mode_stored_and_rendered() {
        let mut d = dispatcher();
        d.server_line(":srv MODE Guest42 :+i");
        assert_eq!(d.session().mode, "+i");
    }

    #[test]
    fn test_unrecognized_command_rendered_verbatim() {
        let mut d = dispatcher();
        let raw = ":srv WALLOPS :server going down";
        let actions = d.server_line(raw);
        assert_eq!(actions, vec![Action::Print(raw.to_string())]);
    }

    #[test]
    fn test_malformed_line_rendered_verbatim() {
        let mut d = dispatcher();
        let actions = d.server_line(":");
        assert_eq!(actions, vec![Action::Print(":".to_string())]);
    }

    #[test]
    fn test_ctcp_version_query_gets_notice_reply() {
        let mut d = dispatcher();
        let actions = d.server_line(":alice!a@h PRIVMSG Guest42 :\u{1}VERSION\u{1}");
        let sent = sends(&actions);
        assert_eq!(sent.len(), 1);
        match &sent[0] {
            Command::NOTICE(target, text) => {
                assert_eq!(target, "alice");
                assert!(text.starts_with('\u{1}'));
                assert!(text.contains("VERSION minirc"));
            }
            other => panic!("expected NOTICE, got {:?}", other),
        }
    }

    #[test]
    fn test_ctcp_dcc_send_produces_offer() {
        let mut d = dispatcher();
        let actions =
            d.server_line(":alice!a@h PRIVMSG Guest42 :\u{1}DCC SEND notes.txt 2130706433 5000 99\u{1}");
        let offer = actions
            .iter()
            .find_map(|a| match a {
                Action::Dcc(offer) => Some(offer.clone()),
                _ => None,
            })
            .expect("expected a Dcc action");
        assert_eq!(offer.filename, "notes.txt");
        assert_eq!(offer.address, 2130706433);
        assert_eq!(offer.port, 5000);
        assert_eq!(offer.size, 99);
        assert_eq!(offer.from, "alice");
    }

    #[test]
    fn test_unknown_ctcp_payload_displayed() {
        let mut d = dispatcher();
        let actions = d.server_line(":alice!a@h PRIVMSG Guest42 :\u{1}PING 12345\u{1}");
        assert_eq!(actions, vec![Action::Print("PING 12345".to_string())]);
    }

    #[test]
    fn test_console_quit_closes_session() {
        let mut d = dispatcher();
        let actions = d.console_line("/quit gone fishing");
        assert_eq!(
            sends(&actions),
            vec![Command::QUIT(Some("gone fishing".into()))]
        );
        assert!(actions.contains(&Action::Quit));
        assert_eq!(d.session().state, SessionState::Closing);
    }

    #[test]
    fn test_console_msg_maps_to_privmsg() {
        let mut d = dispatcher();
        let actions = d.console_line("/msg #rust hello world");
        assert_eq!(
            sends(&actions),
            vec![Command::PRIVMSG("#rust".into(), "hello world".into())]
        );
    }

    #[test]
    fn test_console_rejected_nick_not_sent() {
        let mut d = dispatcher();
        let actions = d.console_line("/nick 1abc");
        assert!(sends(&actions).is_empty());
        assert!(actions
            .iter()
            .any(|a| matches!(a, Action::Print(p) if p.starts_with("not sent:"))));
        assert_eq!(d.session().nickname, "Guest42");
    }

    #[test]
    fn test_console_nick_updates_session_locally() {
        let mut d = dispatcher();
        let actions = d.console_line("/nick Neo");
        assert_eq!(sends(&actions), vec![Command::NICK("Neo".into())]);
        assert_eq!(d.session().nickname, "Neo");
    }

    #[test]
    fn test_console_passthrough_verbs() {
        let mut d = dispatcher();
        let actions = d.console_line("/names #rust");
        assert_eq!(
            sends(&actions),
            vec![Command::Raw("NAMES".into(), vec!["#rust".into()])]
        );

        let actions = d.console_line("/trace");
        assert_eq!(sends(&actions), vec![Command::Raw("TRACE".into(), vec![])]);
    }

    #[test]
    fn test_console_ctcp_version_query() {
        let mut d = dispatcher();
        let actions = d.console_line("/ctcp alice version");
        assert_eq!(
            sends(&actions),
            vec![Command::PRIVMSG(
                "alice".into(),
                "\u{1}VERSION\u{1}".into()
            )]
        );
    }

    #[test]
    fn test_console_unknown_verb_echoes() {
        let mut d = dispatcher();
        let actions = d.console_line("/frobnicate all the things");
        assert_eq!(
            actions,
            vec![Action::Print("/frobnicate all the things".to_string())]
        );
        assert!(sends(&actions).is_empty());
    }

    #[test]
    fn test_console_bare_text_echoes_without_sending() {
        let mut d = dispatcher();
        let actions = d.console_line("just thinking out loud");
        assert_eq!(
            actions,
            vec![Action::Print("just thinking out loud".to_string())]
        );
    }

    #[test]
    fn test_script_mode_accepts_bare_verbs() {
        let session = Session::new("Guest42", "guest", "A. Guest", "irc.example.com");
        let mut d = Dispatcher::new(session, None, true);

        let actions = d.console_line("join #rust");
        assert_eq!(
            sends(&actions),
            vec![Command::JOIN("#rust".into(), None)]
        );

        let actions = d.console_line("quit");
        assert_eq!(sends(&actions), vec![Command::QUIT(None)]);
    }

    #[test]
    fn test_connection_lost_is_implicit_quit() {
        let mut d = dispatcher();
        let actions = d.connection_lost();
        assert!(actions.contains(&Action::Quit));
        assert_eq!(d.session().state, SessionState::Closing);

        // Already closing: no second quit.
        let actions = d.connection_lost();
        assert!(!actions.contains(&Action::Quit));
    }

    #[test]
    fn test_server_quit_for_us_closes_session() {
        let mut d = dispatcher();
        let actions = d.server_line(":Guest42!guest@host QUIT :Quit: leaving");
        assert!(actions.contains(&Action::Quit));
        assert_eq!(d.session().state, SessionState::Closing);
    }

    #[test]
    fn test_server_quit_for_other_user_is_display_only() {
        let mut d = dispatcher();
        let actions = d.server_line(":bob!b@h QUIT :Quit: gone");
        assert!(!actions.contains(&Action::Quit));
        assert!(d.session().is_running());
    }

    #[test]
    fn test_transfer_results() {
        let mut d = dispatcher();

        let ok = TransferResult {
            filename: "notes.txt".into(),
            from: "alice".into(),
            outcome: TransferOutcome::Complete { bytes: 99 },
        };
        let actions = d.transfer_result(ok);
        assert!(sends(&actions).is_empty());
        assert!(actions
            .iter()
            .any(|a| matches!(a, Action::Print(p) if p.starts_with("Transfer complete"))));

        let short = TransferResult {
            filename: "notes.txt".into(),
            from: "alice".into(),
            outcome: TransferOutcome::Short {
                received: 50,
                expected: 99,
            },
        };
        let actions = d.transfer_result(short);
        assert_eq!(
            sends(&actions),
            vec![Command::PRIVMSG(
                "alice".into(),
                "failed to receive notes.txt".into()
            )]
        );
    }
}
