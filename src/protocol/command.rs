//! Request Line Parser
//!
//! Turns one line of client input into a [`Command`]. The protocol is plain
//! text: a verb followed by whitespace-separated arguments.
//!
//! ## Grammar
//!
//! ```text
//! GET <key>
//! SET <key> <value>
//! ```
//!
//! The verb is matched case-insensitively; keys and values are kept verbatim.
//! Lines are handled as raw bytes: keys and values may hold any byte except
//! newline and ASCII whitespace, which separates the tokens. Nothing is
//! decoded as UTF-8.
//!
//! Parsing never fails: a line with the wrong number of arguments becomes
//! [`Command::Malformed`] and an unrecognised verb becomes
//! [`Command::Unknown`]. Both are answered on the same connection, which then
//! keeps reading.

use bytes::Bytes;
use std::fmt;

/// Reason reported for a line with no tokens at all.
pub const EMPTY_COMMAND: &str = "wrong number of arguments";

/// Reason reported for a `GET` with the wrong number of arguments.
pub const GET_ARITY: &str = "wrong number of arguments for 'get' command";

/// Reason reported for a `SET` with the wrong number of arguments.
pub const SET_ARITY: &str = "wrong number of arguments for 'set' command";

/// A single parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `GET key`
    Get { key: Bytes },

    /// `SET key value`
    Set { key: Bytes, value: Bytes },

    /// A verb this server does not implement. Carries the line as received.
    Unknown { raw: Bytes },

    /// A known verb (or an empty line) with the wrong number of arguments.
    Malformed { reason: &'static str },
}

impl Command {
    /// Parses one line of input. The trailing newline must already be removed.
    ///
    /// # Example
    ///
    /// ```
    /// use linekv::protocol::Command;
    /// use bytes::Bytes;
    ///
    /// assert_eq!(
    ///     Command::parse("set Name Alice"),
    ///     Command::Set { key: Bytes::from("Name"), value: Bytes::from("Alice") },
    /// );
    /// assert_eq!(
    ///     Command::parse(b"GET \xff"),
    ///     Command::Get { key: Bytes::from_static(b"\xff") },
    /// );
    /// ```
    pub fn parse(line: impl AsRef<[u8]>) -> Self {
        let line = line.as_ref();
        let tokens: Vec<&[u8]> = line
            .split(|b| b.is_ascii_whitespace())
            .filter(|token| !token.is_empty())
            .collect();

        let Some(verb) = tokens.first() else {
            return Command::Malformed {
                reason: EMPTY_COMMAND,
            };
        };

        if verb.eq_ignore_ascii_case(b"GET") {
            match tokens.as_slice() {
                [_, key] => Command::Get {
                    key: Bytes::copy_from_slice(key),
                },
                _ => Command::Malformed { reason: GET_ARITY },
            }
        } else if verb.eq_ignore_ascii_case(b"SET") {
            match tokens.as_slice() {
                [_, key, value] => Command::Set {
                    key: Bytes::copy_from_slice(key),
                    value: Bytes::copy_from_slice(value),
                },
                _ => Command::Malformed { reason: SET_ARITY },
            }
        } else {
            Command::Unknown {
                raw: Bytes::copy_from_slice(line),
            }
        }
    }

    /// Returns the command name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Get { .. } => "GET",
            Command::Set { .. } => "SET",
            Command::Unknown { .. } => "UNKNOWN",
            Command::Malformed { .. } => "MALFORMED",
        }
    }
}

/// Lossy rendering for logs only; the parsed bytes are never altered.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Get { key } => write!(f, "GET {}", String::from_utf8_lossy(key)),
            Command::Set { key, value } => write!(
                f,
                "SET {} {}",
                String::from_utf8_lossy(key),
                String::from_utf8_lossy(value)
            ),
            Command::Unknown { raw } => write!(f, "{}", String::from_utf8_lossy(raw)),
            Command::Malformed { reason } => write!(f, "<malformed: {}>", reason),
        }
    }
}

/// Convenience wrapper around [`Command::parse`].
pub fn parse_line(line: impl AsRef<[u8]>) -> Command {
    Command::parse(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(key: &'static str) -> Command {
        Command::Get {
            key: Bytes::from(key),
        }
    }

    fn set(key: &'static str, value: &'static str) -> Command {
        Command::Set {
            key: Bytes::from(key),
            value: Bytes::from(value),
        }
    }

    #[test]
    fn test_parse_get() {
        assert_eq!(Command::parse("GET name"), get("name"));
    }

    #[test]
    fn test_parse_set() {
        assert_eq!(Command::parse("SET name Alice"), set("name", "Alice"));
    }

    #[test]
    fn test_verb_is_case_insensitive() {
        assert_eq!(Command::parse("set A b"), set("A", "b"));
        assert_eq!(Command::parse("gEt MixedCase"), get("MixedCase"));
    }

    #[test]
    fn test_get_arity() {
        assert_eq!(
            Command::parse("GET"),
            Command::Malformed { reason: GET_ARITY }
        );
        assert_eq!(
            Command::parse("GET a b"),
            Command::Malformed { reason: GET_ARITY }
        );
    }

    #[test]
    fn test_set_arity() {
        assert_eq!(
            Command::parse("SET"),
            Command::Malformed { reason: SET_ARITY }
        );
        assert_eq!(
            Command::parse("SET a"),
            Command::Malformed { reason: SET_ARITY }
        );
        // Values cannot contain whitespace
        assert_eq!(
            Command::parse("SET a hello world"),
            Command::Malformed { reason: SET_ARITY }
        );
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(
            Command::parse(""),
            Command::Malformed {
                reason: EMPTY_COMMAND
            }
        );
        assert_eq!(
            Command::parse("   \t "),
            Command::Malformed {
                reason: EMPTY_COMMAND
            }
        );
    }

    #[test]
    fn test_unknown_keeps_raw_line() {
        assert_eq!(
            Command::parse("FOO"),
            Command::Unknown {
                raw: Bytes::from("FOO")
            }
        );
        assert_eq!(
            Command::parse("DEL some key"),
            Command::Unknown {
                raw: Bytes::from("DEL some key")
            }
        );
    }

    #[test]
    fn test_extra_whitespace_between_tokens() {
        assert_eq!(Command::parse("  SET   k\tv  "), set("k", "v"));
    }

    #[test]
    fn test_non_utf8_tokens_kept_verbatim() {
        assert_eq!(
            Command::parse(b"SET \xff \xfe\x80"),
            Command::Set {
                key: Bytes::from_static(b"\xff"),
                value: Bytes::from_static(b"\xfe\x80"),
            }
        );
        // Distinct invalid bytes stay distinct keys
        assert_ne!(Command::parse(b"GET \xff"), Command::parse(b"GET \xfe"));
    }

    #[test]
    fn test_name() {
        assert_eq!(Command::parse("get k").name(), "GET");
        assert_eq!(Command::parse("set k v").name(), "SET");
        assert_eq!(Command::parse("PING").name(), "UNKNOWN");
        assert_eq!(Command::parse("GET").name(), "MALFORMED");
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::parse("get k").to_string(), "GET k");
        assert_eq!(Command::parse("set k v").to_string(), "SET k v");
        assert_eq!(Command::parse("PING").to_string(), "PING");
    }
}
