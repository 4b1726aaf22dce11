//! IRC numeric reply codes as defined in RFC 1459.
//!
//! Servers identify replies by a three-digit numeric code; each code also
//! has a symbolic alias (`RPL_*` / `ERR_*`). The dispatcher matches on
//! either form through the single table below, so the numeric and alias
//! spellings can never drift apart.
//!
//! Response codes are categorized as:
//! - 001-099: connection/registration
//! - 200-399: command replies
//! - 400-599: error replies
//!
//! # Reference
//! - RFC 1459 §6: Replies

#![allow(non_camel_case_types)]

use std::str::FromStr;

/// Defines [`Response`] and its lookups from one canonical
/// numeric↔name table.
macro_rules! replies {
    ( $( $code:literal => $variant:ident ),* $(,)? ) => {
        /// IRC server numeric reply.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u16)]
        #[non_exhaustive]
        pub enum Response {
            $( $variant = $code, )*
        }

        impl Response {
            /// Creates a Response from a numeric code.
            pub fn from_code(code: u16) -> Option<Response> {
                match code {
                    $( $code => Some(Response::$variant), )*
                    _ => None,
                }
            }

            /// Creates a Response from its symbolic alias.
            pub fn from_name(name: &str) -> Option<Response> {
                match name {
                    $( stringify!($variant) => Some(Response::$variant), )*
                    _ => None,
                }
            }

            /// The symbolic alias for this reply.
            pub fn name(&self) -> &'static str {
                match self {
                    $( Response::$variant => stringify!($variant), )*
                }
            }
        }
    };
}

replies! {
    // Connection registration (001-099)
    1 => RPL_WELCOME,
    2 => RPL_YOURHOST,
    3 => RPL_CREATED,
    4 => RPL_MYINFO,
    5 => RPL_ISUPPORT,
    42 => RPL_YOURID,

    // Trace replies
    200 => RPL_TRACELINK,
    201 => RPL_TRACECONNECTING,
    202 => RPL_TRACEHANDSHAKE,
    203 => RPL_TRACEUNKNOWN,
    204 => RPL_TRACEOPERATOR,
    205 => RPL_TRACEUSER,
    206 => RPL_TRACESERVER,
    208 => RPL_TRACENEWTYPE,

    // Stats replies
    211 => RPL_STATSLINKINFO,
    212 => RPL_STATSCOMMANDS,
    213 => RPL_STATSCLINE,
    214 => RPL_STATSNLINE,
    215 => RPL_STATSILINE,
    216 => RPL_STATSKLINE,
    217 => RPL_STATSQLINE,
    218 => RPL_STATSYLINE,
    219 => RPL_ENDOFSTATS,
    221 => RPL_UMODEIS,
    231 => RPL_SERVICEINFO,
    232 => RPL_ENDOFSERVICES,
    233 => RPL_SERVICE,
    241 => RPL_STATSLLINE,
    242 => RPL_STATSUPTIME,
    243 => RPL_STATSOLINE,
    244 => RPL_STATSHLINE,

    // Luser/admin replies
    251 => RPL_LUSERCLIENT,
    252 => RPL_LUSEROP,
    253 => RPL_LUSERUNKNOWN,
    254 => RPL_LUSERCHANNELS,
    255 => RPL_LUSERME,
    256 => RPL_ADMINME,
    257 => RPL_ADMINLOC1,
    258 => RPL_ADMINLOC2,
    259 => RPL_ADMINEMAIL,
    261 => RPL_TRACELOG,
    262 => RPL_TRACEEND,
    265 => RPL_LOCALUSERS,
    266 => RPL_GLOBALUSERS,

    // Command replies (300-399)
    300 => RPL_NONE,
    301 => RPL_AWAY,
    302 => RPL_USERHOST,
    303 => RPL_ISON,
    305 => RPL_UNAWAY,
    306 => RPL_NOWAWAY,
    311 => RPL_WHOISUSER,
    312 => RPL_WHOISSERVER,
    313 => RPL_WHOISOPERATOR,
    314 => RPL_WHOWASUSER,
    315 => RPL_ENDOFWHO,
    316 => RPL_WHOISCHANOP,
    317 => RPL_WHOISIDLE,
    318 => RPL_ENDOFWHOIS,
    319 => RPL_WHOISCHANNELS,
    321 => RPL_LISTSTART,
    322 => RPL_LIST,
    323 => RPL_LISTEND,
    324 => RPL_CHANNELMODEIS,
    331 => RPL_NOTOPIC,
    332 => RPL_TOPIC,
    341 => RPL_INVITING,
    342 => RPL_SUMMONING,
    351 => RPL_VERSION,
    352 => RPL_WHOREPLY,
    353 => RPL_NAMREPLY,
    361 => RPL_KILLDONE,
    362 => RPL_CLOSING,
    363 => RPL_CLOSEEND,
    364 => RPL_LINKS,
    365 => RPL_ENDOFLINKS,
    366 => RPL_ENDOFNAMES,
    367 => RPL_BANLIST,
    368 => RPL_ENDOFBANLIST,
    369 => RPL_ENDOFWHOWAS,
    371 => RPL_INFO,
    372 => RPL_MOTD,
    373 => RPL_INFOSTART,
    374 => RPL_ENDOFINFO,
    375 => RPL_MOTDSTART,
    376 => RPL_ENDOFMOTD,
    381 => RPL_YOUREOPER,
    382 => RPL_REHASHING,
    384 => RPL_MYPORTIS,
    391 => RPL_TIME,
    392 => RPL_USERSSTART,
    393 => RPL_USERS,
    394 => RPL_ENDOFUSERS,
    395 => RPL_NOUSERS,

    // Error replies (400-599)
    401 => ERR_NOSUCHNICK,
    402 => ERR_NOSUCHSERVER,
    403 => ERR_NOSUCHCHANNEL,
    404 => ERR_CANNOTSENDTOCHAN,
    405 => ERR_TOOMANYCHANNELS,
    406 => ERR_WASNOSUCHNICK,
    407 => ERR_TOOMANYTARGETS,
    409 => ERR_NOORIGIN,
    411 => ERR_NORECIPIENT,
    412 => ERR_NOTEXTTOSEND,
    413 => ERR_NOTOPLEVEL,
    414 => ERR_WILDTOPLEVEL,
    421 => ERR_UNKNOWNCOMMAND,
    422 => ERR_NOMOTD,
    423 => ERR_NOADMININFO,
    424 => ERR_FILEERROR,
    431 => ERR_NONICKNAMEGIVEN,
    432 => ERR_ERRONEUSNICKNAME,
    433 => ERR_NICKNAMEINUSE,
    436 => ERR_NICKCOLLISION,
    441 => ERR_USERNOTINCHANNEL,
    442 => ERR_NOTONCHANNEL,
    443 => ERR_USERONCHANNEL,
    444 => ERR_NOLOGIN,
    445 => ERR_SUMMONDISABLED,
    446 => ERR_USERSDISABLED,
    461 => ERR_NEEDMOREPARAMS,
    462 => ERR_ALREADYREGISTERED,
    463 => ERR_NOPERMFORHOST,
    464 => ERR_PASSWDMISMATCH,
    465 => ERR_YOUREBANNEDCREEP,
    466 => ERR_YOUWILLBEBANNED,
    467 => ERR_KEYSET,
    471 => ERR_CHANNELISFULL,
    472 => ERR_UNKNOWNMODE,
    473 => ERR_INVITEONLYCHAN,
    474 => ERR_BANNEDFROMCHAN,
    475 => ERR_BADCHANNELKEY,
    481 => ERR_NOPRIVILEGES,
    482 => ERR_CHANOPRIVSNEEDED,
    483 => ERR_CANTKILLSERVER,
    491 => ERR_NOOPERHOST,
    492 => ERR_NOSERVICEHOST,
    501 => ERR_UMODEUNKNOWNFLAG,
    502 => ERR_USERSDONTMATCH,
}

impl Response {
    /// Returns the numeric code as u16.
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is an error reply (4xx/5xx).
    #[inline]
    pub fn is_error(&self) -> bool {
        (400..600).contains(&self.code())
    }
}

impl FromStr for Response {
    type Err = ParseResponseError;

    /// Parses either form of a reply identifier: the three-digit code
    /// (`"372"`) or the symbolic alias (`"RPL_MOTD"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.parse::<u16>() {
            return Response::from_code(code).ok_or(ParseResponseError::UnknownCode(code));
        }
        Response::from_name(s).ok_or(ParseResponseError::UnknownName)
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03}", self.code())
    }
}

/// Error when parsing a reply identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseResponseError {
    /// The numeric code is not a known reply.
    UnknownCode(u16),
    /// The string is neither a numeric code nor a known alias.
    UnknownName,
}

impl std::fmt::Display for ParseResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCode(code) => write!(f, "unknown reply code: {}", code),
            Self::UnknownName => write!(f, "unknown reply name"),
        }
    }
}

impl std::error::Error for ParseResponseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code() {
        assert_eq!(Response::RPL_WELCOME.code(), 1);
        assert_eq!(Response::RPL_ENDOFMOTD.code(), 376);
        assert_eq!(Response::ERR_USERSDONTMATCH.code(), 502);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Response::from_code(1), Some(Response::RPL_WELCOME));
        assert_eq!(Response::from_code(433), Some(Response::ERR_NICKNAMEINUSE));
        assert_eq!(Response::from_code(999), None);
    }

    #[test]
    fn test_both_forms_resolve_identically() {
        assert_eq!("001".parse::<Response>().unwrap(), Response::RPL_WELCOME);
        assert_eq!(
            "RPL_WELCOME".parse::<Response>().unwrap(),
            Response::RPL_WELCOME
        );
        assert_eq!("372".parse::<Response>().unwrap(), Response::RPL_MOTD);
        assert_eq!(
            "RPL_MOTD".parse::<Response>().unwrap(),
            Response::RPL_MOTD
        );
        assert!("867".parse::<Response>().is_err());
        assert!("RPL_NOPE".parse::<Response>().is_err());
    }

    #[test]
    fn test_name() {
        assert_eq!(Response::RPL_MOTDSTART.name(), "RPL_MOTDSTART");
        assert_eq!(Response::ERR_NICKNAMEINUSE.name(), "ERR_NICKNAMEINUSE");
    }

    #[test]
    fn test_is_error() {
        assert!(!Response::RPL_WELCOME.is_error());
        assert!(Response::ERR_NICKNAMEINUSE.is_error());
        assert!(Response::ERR_UMODEUNKNOWNFLAG.is_error());
    }

    #[test]
    fn test_display_pads_to_three_digits() {
        assert_eq!(format!("{}", Response::RPL_WELCOME), "001");
        assert_eq!(format!("{}", Response::RPL_YOURID), "042");
        assert_eq!(format!("{}", Response::RPL_MOTD), "372");
    }
}
