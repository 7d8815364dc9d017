//! # Storage Layer
//!
//! Persistence boundary for circ.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Library snapshot | JSON (single record) | `<data-dir>/library-lite-data.json` |
//! | Config | TOML | `~/.config/circ/config.toml` |
//!
//! ## Design
//!
//! The engine never touches files. It sees a [`KeyValueStore`] — a string
//! value under a string key — and the [`SnapshotStore`] that serializes
//! the whole [`crate::domain::LibraryState`] under one fixed key after
//! every committed transition. Reads and writes hold `fs2` file locks and
//! writes are atomic (temp file + rename).
//!
//! Persistence failures are deliberately quiet: a missing or unreadable
//! snapshot loads as an empty library, and a failed save is logged and
//! dropped. The data on disk is only ever a full, consistent snapshot.

mod kv;
mod snapshot;
mod config;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use snapshot::{SnapshotStore, STORAGE_KEY};
pub use config::Config;
