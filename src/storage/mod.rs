//! Storage Engine Module
//!
//! The only shared mutable state in LineKV: a thread-safe, sharded
//! string-to-string map.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     StorageEngine                           │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐           │
//! │  │ Shard 0 │ │ Shard 1 │ │ Shard 2 │ │...64    │           │
//! │  │ RwLock  │ │ RwLock  │ │ RwLock  │ │ shards  │           │
//! │  └─────────┘ └─────────┘ └─────────┘ └─────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//!        ▲               ▲               ▲
//!        │               │               │
//!   connection 1    connection 2    connection N
//! ```
//!
//! ## Example
//!
//! ```
//! use linekv::storage::StorageEngine;
//! use std::sync::Arc;
//!
//! let engine = Arc::new(StorageEngine::new());
//!
//! engine.set("name", "Alice");
//! assert_eq!(engine.get("name"), "Alice");
//! assert_eq!(engine.get("missing"), "");
//! ```

pub mod engine;

pub use engine::{StorageEngine, StorageStats};
