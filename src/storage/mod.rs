// src/storage/mod.rs
//
// Storage substrate: a synchronous string key/value contract plus the
// SQLite-backed and in-memory implementations.

pub mod kv;

pub use kv::{
    default_store_path, ConnectionPool, KeyValueStore, MemoryKeyValueStore, PooledConn,
    SqliteKeyValueStore,
};
