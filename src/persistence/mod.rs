//! Key/value persistence for player data
//!
//! Features:
//! - LocalStorage backend on the web, in-memory store on native
//! - JSON encoding through serde
//! - Corrupt or missing entries fall back to defaults

pub mod storage;

pub use storage::{StorageError, load_json, save_json};
