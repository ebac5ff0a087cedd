//! Response Lines
//!
//! Every request is answered with exactly one line terminated by CRLF.
//!
//! ## Examples
//!
//! Value: `Alice\r\n`
//! Missing key: `\r\n`
//! Acknowledgement: `OK\r\n`
//! Unknown verb: `Unknown command\r\n`
//! Error: `ERR wrong number of arguments for 'get' command\r\n`

use bytes::Bytes;
use std::fmt;

/// The line terminator used for every response.
pub const CRLF: &[u8] = b"\r\n";

/// A response to a single request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// The value stored under a key, byte for byte. Empty when the key is absent.
    Value(Bytes),

    /// Acknowledges a successful write.
    Ok,

    /// The verb was not recognised.
    UnknownCommand,

    /// The request was malformed. Serialized as `ERR <reason>`.
    Error(String),
}

impl Response {
    /// Creates a value response.
    pub fn value(v: impl Into<Bytes>) -> Self {
        Response::Value(v.into())
    }

    /// Creates an error response from its reason.
    ///
    /// # Example
    /// ```
    /// use linekv::protocol::Response;
    /// let err = Response::error("wrong number of arguments");
    /// assert_eq!(err.serialize(), b"ERR wrong number of arguments\r\n");
    /// ```
    pub fn error(reason: impl Into<String>) -> Self {
        Response::Error(reason.into())
    }

    /// Serializes the response to a freshly allocated buffer.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }

    /// Serializes the response into an existing buffer.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        match self {
            Response::Value(v) => buf.extend_from_slice(v),
            Response::Ok => buf.extend_from_slice(b"OK"),
            Response::UnknownCommand => buf.extend_from_slice(b"Unknown command"),
            Response::Error(reason) => {
                buf.extend_from_slice(b"ERR ");
                buf.extend_from_slice(reason.as_bytes());
            }
        }
        buf.extend_from_slice(CRLF);
    }

    /// Returns true if this response reports a client error.
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_) | Response::UnknownCommand)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Value(v) => write!(f, "{}", String::from_utf8_lossy(v)),
            Response::Ok => write!(f, "OK"),
            Response::UnknownCommand => write!(f, "Unknown command"),
            Response::Error(reason) => write!(f, "ERR {}", reason),
        }
    }
}
