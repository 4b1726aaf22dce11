//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

/// A minimal RFC 1459 IRC client.
#[derive(Parser, Debug, Clone)]
#[command(name = "minirc", version, about)]
pub struct Config {
    /// IRC server host.
    pub host: String,

    /// Server port.
    #[arg(short, long, default_value_t = 6667)]
    pub port: u16,

    /// Nickname to register with.
    #[arg(short, long, default_value = "minirc")]
    pub nick: String,

    /// Username (ident) to register with.
    #[arg(short, long, default_value = "minirc")]
    pub user: String,

    /// Real name to register with.
    #[arg(short, long, default_value = "minirc user")]
    pub realname: String,

    /// Server password, sent as PASS before registration.
    #[arg(long)]
    pub pass: Option<String>,

    /// Path of the protocol log.
    #[arg(long, default_value = "irc.log")]
    pub log: PathBuf,

    /// Directory DCC transfers are written into.
    #[arg(long, default_value = ".")]
    pub download_dir: PathBuf,

    /// Quit automatically after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub quit_after: Option<u64>,

    /// Scripted console: accept bare verbs (quit, nick <x>, join <x>)
    /// without the leading slash.
    #[arg(long)]
    pub script: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["minirc", "irc.example.com"]);
        assert_eq!(config.host, "irc.example.com");
        assert_eq!(config.port, 6667);
        assert_eq!(config.nick, "minirc");
        assert_eq!(config.log, PathBuf::from("irc.log"));
        assert!(config.pass.is_none());
        assert!(!config.script);
    }

    #[test]
    fn test_overrides() {
        let config = Config::parse_from([
            "minirc",
            "irc.example.com",
            "--port",
            "6668",
            "--nick",
            "Guest42",
            "--quit-after",
            "120",
            "--script",
        ]);
        assert_eq!(config.port, 6668);
        assert_eq!(config.nick, "Guest42");
        assert_eq!(config.quit_after, Some(120));
        assert!(config.script);
    }
}
