//! Line Protocol Implementation
//!
//! Requests and responses are single lines of text. A request ends with `\n`
//! (a preceding `\r` is tolerated); a response always ends with `\r\n`.
//!
//! ## Modules
//!
//! - `command`: Parses a request line into a `Command`
//! - `response`: Defines the `Response` enum and its serialization
//!
//! ## Example
//!
//! ```
//! use linekv::protocol::{parse_line, Command, Response};
//!
//! let command = parse_line("GET name");
//! assert_eq!(command, Command::Get { key: "name".to_string().into() });
//!
//! let response = Response::value("Alice");
//! assert_eq!(response.serialize(), b"Alice\r\n");
//! ```

pub mod command;
pub mod response;

pub use command::{parse_line, Command};
pub use response::{Response, CRLF};
