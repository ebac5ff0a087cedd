//! TCP Listener
//!
//! Accepts connections and spawns one [`handle_connection`] task per client.
//!
//! Concurrency is explicitly unbounded: every accepted socket gets its own
//! tokio task and nothing caps how many run at once. Each connection costs a
//! task, a socket and a read buffer of up to [`MAX_LINE_LENGTH`] bytes, so
//! enough idle clients can exhaust file descriptors or memory. There are no
//! idle timeouts; a connection lives until its client closes it or an I/O
//! error occurs.
//!
//! [`MAX_LINE_LENGTH`]: crate::connection::MAX_LINE_LENGTH

use crate::commands::CommandHandler;
use crate::connection::{handle_connection, ConnectionStats};
use crate::storage::StorageEngine;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, warn};

/// Runs the accept loop forever.
///
/// Accept failures are logged and the loop keeps going. Binding is the
/// caller's job, so a bind failure surfaces before this is ever called.
pub async fn run(listener: TcpListener, storage: Arc<StorageEngine>, stats: Arc<ConnectionStats>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                if let Err(e) = stream.set_nodelay(true) {
                    warn!(client = %addr, error = %e, "Failed to set TCP_NODELAY");
                }

                let handler = CommandHandler::new(Arc::clone(&storage));
                let stats = Arc::clone(&stats);

                tokio::spawn(async move {
                    handle_connection(stream, addr, handler, stats).await;
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
