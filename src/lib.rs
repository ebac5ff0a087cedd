//! # LineKV - A Small In-Memory Key-Value Server
//!
//! LineKV keeps a single string-to-string map in memory and serves it over
//! TCP using a line-based text protocol. Every client connection runs in its
//! own tokio task; all of them share one [`StorageEngine`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                               LineKV                                    │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │ TCP Server  │───>│ Connection  │───>│  Command    │                  │
//! │  │ (Listener)  │    │  Handler    │    │  Handler    │                  │
//! │  └─────────────┘    └──────┬──────┘    └──────┬──────┘                  │
//! │                            │                  │                         │
//! │                            ▼                  ▼                         │
//! │                     ┌─────────────┐    ┌──────────────────────────────┐ │
//! │                     │    Line     │    │        StorageEngine         │ │
//! │                     │   Parser    │    │  ┌────────┐ ┌────────┐       │ │
//! │                     └─────────────┘    │  │Shard 0 │ │Shard N │ ...   │ │
//! │                                        │  │RwLock  │ │RwLock  │       │ │
//! │                                        │  └────────┘ └────────┘       │ │
//! │                                        └──────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use linekv::connection::ConnectionStats;
//! use linekv::storage::StorageEngine;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let storage = Arc::new(StorageEngine::new());
//!     let stats = Arc::new(ConnectionStats::new());
//!
//!     let listener = TcpListener::bind("127.0.0.1:6378").await?;
//!     linekv::server::run(listener, storage, stats).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Protocol
//!
//! | Request             | Response                                             |
//! |---------------------|------------------------------------------------------|
//! | `GET <key>`         | `<value>\r\n`, or `\r\n` if the key was never set    |
//! | `SET <key> <value>` | `OK\r\n`                                             |
//! | wrong arity         | `ERR wrong number of arguments for '<verb>' command` |
//! | anything else       | `Unknown command\r\n`                                |
//!
//! ## Module Overview
//!
//! - [`protocol`]: Request line parser and response encoding
//! - [`storage`]: Thread-safe sharded storage engine
//! - [`commands`]: Executes parsed commands against the storage engine
//! - [`connection`]: Per-client read/dispatch/respond loop
//! - [`server`]: Accept loop
//! - [`client`]: Client used by the interactive CLI

pub mod client;
pub mod commands;
pub mod connection;
pub mod protocol;
pub mod server;
pub mod storage;

// Re-export commonly used types for convenience
pub use client::{Client, ClientError};
pub use commands::CommandHandler;
pub use connection::{handle_connection, ConnectionError, ConnectionStats};
pub use protocol::{parse_line, Command, Response};
pub use storage::{StorageEngine, StorageStats};

/// The default port LineKV listens on
pub const DEFAULT_PORT: u16 = 6378;

/// The default host LineKV binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Version of LineKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
