//! Command Dispatch
//!
//! Executes a parsed [`Command`] against the shared [`StorageEngine`] and
//! produces the [`Response`] line for the client.
//!
//! | Command               | Storage call      | Response              |
//! |-----------------------|-------------------|-----------------------|
//! | `Get { key }`         | `get(key)`        | `<value>` (may be "") |
//! | `Set { key, value }`  | `set(key, value)` | `OK`                  |
//! | `Unknown { .. }`      | none              | `Unknown command`     |
//! | `Malformed { reason }`| none              | `ERR <reason>`        |

use crate::protocol::{Command, Response};
use crate::storage::StorageEngine;
use std::sync::Arc;
use tracing::debug;

/// Dispatches parsed commands to the storage engine.
///
/// Cheap to clone: each connection gets its own handler sharing one engine.
#[derive(Clone, Debug)]
pub struct CommandHandler {
    storage: Arc<StorageEngine>,
}

impl CommandHandler {
    /// Creates a new command handler with the given storage engine.
    pub fn new(storage: Arc<StorageEngine>) -> Self {
        Self { storage }
    }

    /// Executes a command and returns the response.
    pub fn execute(&self, command: Command) -> Response {
        match command {
            Command::Get { key } => Response::Value(self.storage.get(&key)),
            Command::Set { key, value } => {
                self.storage.set(key, value);
                Response::Ok
            }
            Command::Unknown { raw } => {
                debug!(line = ?raw, "Unknown command");
                Response::UnknownCommand
            }
            Command::Malformed { reason } => Response::error(reason),
        }
    }

    /// Returns the storage engine this handler dispatches to.
    pub fn storage(&self) -> &Arc<StorageEngine> {
        &self.storage
    }
}
