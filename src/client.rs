//! Line Protocol Client
//!
//! A minimal client used by the `linekv-cli` binary: send one request line,
//! wait for exactly one response line.

use bytes::Bytes;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};

/// Errors returned by [`Client`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// I/O error talking to the server
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server closed the connection before responding
    #[error("server closed the connection")]
    ServerClosed,
}

/// A connection to a LineKV server.
#[derive(Debug)]
pub struct Client {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl Client {
    /// Connects to the server at `addr`.
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).await?;
        let (read, write) = stream.into_split();

        Ok(Self {
            reader: BufReader::new(read),
            writer: BufWriter::new(write),
        })
    }

    /// Sends one request line and returns the response line without its
    /// terminator.
    ///
    /// Any trailing newline on `line` is replaced by a single `\n`. The
    /// response bytes are returned as received; nothing is decoded.
    pub async fn send(&mut self, line: impl AsRef<[u8]>) -> Result<Bytes, ClientError> {
        let line = strip_line_end(line.as_ref());
        self.writer.write_all(line).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;

        let mut response = Vec::new();
        if self.reader.read_until(b'\n', &mut response).await? == 0 {
            return Err(ClientError::ServerClosed);
        }

        let len = strip_line_end(&response).len();
        response.truncate(len);
        Ok(Bytes::from(response))
    }
}

fn strip_line_end(mut line: &[u8]) -> &[u8] {
    while let [rest @ .., b'\r' | b'\n'] = line {
        line = rest;
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ConnectionStats;
    use crate::server;
    use crate::storage::StorageEngine;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    async fn start_server() -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(server::run(
            listener,
            Arc::new(StorageEngine::new()),
            Arc::new(ConnectionStats::new()),
        ));
        addr
    }

    #[tokio::test]
    async fn test_round_trip() {
        let addr = start_server().await;
        let mut client = Client::connect(addr).await.unwrap();

        assert_eq!(client.send("SET name Alice").await.unwrap(), "OK");
        assert_eq!(client.send("GET name\n").await.unwrap(), "Alice");
        assert_eq!(client.send("GET nobody").await.unwrap(), "");
        assert_eq!(client.send("HELLO").await.unwrap(), "Unknown command");
    }

    #[tokio::test]
    async fn test_binary_round_trip() {
        let addr = start_server().await;
        let mut client = Client::connect(addr).await.unwrap();

        assert_eq!(client.send(b"SET \xff \xfe\x80").await.unwrap(), "OK");
        assert_eq!(
            client.send(b"GET \xff").await.unwrap(),
            Bytes::from_static(b"\xfe\x80")
        );
    }

    #[tokio::test]
    async fn test_two_clients_see_each_other() {
        let addr = start_server().await;
        let mut alice = Client::connect(addr).await.unwrap();
        let mut bob = Client::connect(addr).await.unwrap();

        alice.send("SET from alice").await.unwrap();
        bob.send("SET reply bob").await.unwrap();

        assert_eq!(bob.send("GET from").await.unwrap(), "alice");
        assert_eq!(alice.send("GET reply").await.unwrap(), "bob");
    }

    #[tokio::test]
    async fn test_server_closed() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and immediately hang up
            let (stream, _) = listener.accept().await.unwrap();
            drop(stream);
        });

        let mut client = Client::connect(addr).await.unwrap();
        let result = client.send("GET k").await;
        assert!(matches!(
            result,
            Err(ClientError::ServerClosed) | Err(ClientError::Io(_))
        ));
    }
}
