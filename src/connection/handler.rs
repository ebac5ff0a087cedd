//! Connection Handler Module
//!
//! This module handles individual client connections to LineKV.
//! Each client gets its own handler task that runs in a loop,
//! reading request lines and sending responses.
//!
//! ## Connection Lifecycle
//!
//! ```text
//! 1. Client connects (TCP handshake)
//!        │
//!        ▼
//! 2. ConnectionHandler spawned
//!        │
//!        ▼
//! 3. ┌──────────────────────────────┐
//!    │  Reading                     │◄─┐
//!    │  (wait for a full line)      │  │
//!    └──────────────┬───────────────┘  │
//!                   ▼                  │
//!    ┌──────────────────────────────┐  │
//!    │  Parsing                     │  │
//!    └──────────────┬───────────────┘  │
//!                   ▼                  │
//!    ┌──────────────────────────────┐  │
//!    │  Dispatching                 │  │
//!    └──────────────┬───────────────┘  │
//!                   ▼                  │
//!    ┌──────────────────────────────┐  │
//!    │  Responding (write + flush)  │──┘
//!    └──────────────────────────────┘
//!        │
//!        ▼
//! 4. Client disconnects / I/O error
//!        │
//!        ▼
//! 5. Handler task ends, socket is dropped
//! ```
//!
//! ## Buffer Management
//!
//! Incoming bytes accumulate in a `BytesMut` until a `\n` arrives. TCP may
//! deliver half a line or several lines in one read; lines are processed one
//! at a time, each answered before the next is parsed.

use crate::commands::CommandHandler;
use crate::protocol::{parse_line, Response};
use bytes::{Bytes, BytesMut};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::{debug, error, info, trace, warn};

/// Longest request line accepted, in bytes, not counting its `\r\n` or `\n`
/// terminator. A longer line ends the connection.
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Initial buffer capacity
const INITIAL_BUFFER_SIZE: usize = 4096;

/// Statistics for connection handling
#[derive(Debug, Default)]
pub struct ConnectionStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Currently active connections
    pub active_connections: AtomicU64,
    /// Total commands processed
    pub commands_processed: AtomicU64,
    /// Commands answered with `ERR ...` or `Unknown command`
    pub command_errors: AtomicU64,
    /// Total bytes read
    pub bytes_read: AtomicU64,
    /// Total bytes written
    pub bytes_written: AtomicU64,
}

impl ConnectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn command_processed(&self) {
        self.commands_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn command_failed(&self) {
        self.command_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_read(&self, count: usize) {
        self.bytes_read.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written
            .fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// Handles a single client connection.
///
/// Generic over the stream so the same loop serves a `TcpStream` in
/// production and an in-memory mock in tests.
pub struct ConnectionHandler<S> {
    /// The client stream; writes are buffered and flushed per response
    stream: BufWriter<S>,

    /// Client's address (for logging)
    addr: SocketAddr,

    /// Bytes received but not yet consumed as a full line
    buffer: BytesMut,

    /// Dispatches commands to the shared storage engine
    command_handler: CommandHandler,

    /// Connection statistics (shared)
    stats: Arc<ConnectionStats>,
}

impl<S> ConnectionHandler<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new connection handler.
    ///
    /// # Arguments
    ///
    /// * `stream` - The client stream for this connection
    /// * `addr` - The client's socket address
    /// * `command_handler` - The command handler for executing commands
    /// * `stats` - Shared connection statistics
    pub fn new(
        stream: S,
        addr: SocketAddr,
        command_handler: CommandHandler,
        stats: Arc<ConnectionStats>,
    ) -> Self {
        stats.connection_opened();

        Self {
            stream: BufWriter::new(stream),
            addr,
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_SIZE),
            command_handler,
            stats,
        }
    }

    /// Runs the connection loop until the client disconnects or an I/O
    /// error occurs.
    ///
    /// A clean disconnect between lines is reported as `Ok(())`; every other
    /// way the loop can end is returned as the error that ended it.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        info!(client = %self.addr, "Client connected");

        let result = match self.main_loop().await {
            Err(ConnectionError::ClientDisconnected) => Ok(()),
            other => other,
        };

        match &result {
            Ok(()) => info!(client = %self.addr, "Client disconnected"),
            Err(ConnectionError::Io(io_err))
                if io_err.kind() == std::io::ErrorKind::ConnectionReset =>
            {
                debug!(client = %self.addr, "Connection reset by client")
            }
            Err(e) => warn!(client = %self.addr, error = %e, "Connection error"),
        }

        self.stats.connection_closed();
        result
    }

    /// The read-parse-dispatch-respond loop.
    async fn main_loop(&mut self) -> Result<(), ConnectionError> {
        loop {
            while let Some(line) = self.try_take_line()? {
                let command = parse_line(line.trim_ascii());
                debug!(
                    client = %self.addr,
                    command = command.name(),
                    line = %command,
                    "Received command"
                );

                let response = self.command_handler.execute(command);
                self.stats.command_processed();
                if response.is_error() {
                    self.stats.command_failed();
                }

                self.send_response(&response).await?;
            }

            self.read_more_data().await?;
        }
    }

    /// Removes one complete line from the buffer, without its terminator.
    ///
    /// The length check ignores the terminator, so the outcome does not
    /// depend on whether the `\n` arrives in the same read as the line.
    fn try_take_line(&mut self) -> Result<Option<Bytes>, ConnectionError> {
        let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') else {
            // A trailing `\r` may still be the first half of the terminator
            let pending = self.buffer.len() - usize::from(self.buffer.last() == Some(&b'\r'));
            if pending > MAX_LINE_LENGTH {
                return Err(self.line_too_long(pending));
            }
            return Ok(None);
        };

        let mut line = self.buffer.split_to(pos + 1);
        line.truncate(pos);
        if line.last() == Some(&b'\r') {
            line.truncate(pos - 1);
        }
        if line.len() > MAX_LINE_LENGTH {
            return Err(self.line_too_long(line.len()));
        }

        trace!(
            client = %self.addr,
            consumed = pos + 1,
            remaining = self.buffer.len(),
            "Took line from buffer"
        );

        Ok(Some(line.freeze()))
    }

    fn line_too_long(&self, size: usize) -> ConnectionError {
        error!(client = %self.addr, size = size, "Request line exceeds limit");
        ConnectionError::LineTooLong
    }

    /// Reads more data from the socket into the buffer.
    async fn read_more_data(&mut self) -> Result<(), ConnectionError> {
        if self.buffer.capacity() - self.buffer.len() < 1024 {
            self.buffer.reserve(4096);
        }

        let n = self.stream.get_mut().read_buf(&mut self.buffer).await?;

        if n == 0 {
            if self.buffer.is_empty() {
                return Err(ConnectionError::ClientDisconnected);
            } else {
                return Err(ConnectionError::UnexpectedEof);
            }
        }

        self.stats.bytes_read(n);
        trace!(client = %self.addr, bytes = n, "Read data");

        Ok(())
    }

    /// Writes one response line and flushes it to the socket.
    async fn send_response(&mut self, response: &Response) -> Result<(), ConnectionError> {
        let bytes = response.serialize();
        self.stream.write_all(&bytes).await?;
        self.stream.flush().await?;
        self.stats.bytes_written(bytes.len());
        trace!(
            client = %self.addr,
            bytes = bytes.len(),
            "Sent response"
        );
        Ok(())
    }
}

/// Errors that end a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// I/O error while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Client closed the stream between requests
    #[error("Client disconnected")]
    ClientDisconnected,

    /// Client closed the stream in the middle of a line
    #[error("Unexpected end of stream")]
    UnexpectedEof,

    /// A request line longer than `MAX_LINE_LENGTH` bytes
    #[error("Request line longer than {MAX_LINE_LENGTH} bytes")]
    LineTooLong,
}

/// Handles a client connection to completion.
///
/// Errors have already been logged by [`ConnectionHandler::run`]; they end
/// this connection only and are not propagated further.
pub async fn handle_connection<S>(
    stream: S,
    addr: SocketAddr,
    command_handler: CommandHandler,
    stats: Arc<ConnectionStats>,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let handler = ConnectionHandler::new(stream, addr, command_handler, stats);
    if let Err(e) = handler.run().await {
        debug!(client = %addr, error = %e, "Connection ended with error");
    }
}
