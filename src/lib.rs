//! Mock chat database backed by a local key-value preference store.
//!
//! Profiles, chats, and messages are serialized as JSON blobs under fixed
//! preference keys. Every write reads the whole stored collection, mutates it
//! in memory, and writes it back as one blob; there is no incremental update
//! and no cross-process coordination.

pub mod config;
pub mod contacts;
pub mod storage;

pub use storage::models::{Chat, Message, Profile};
pub use storage::{MockDatabase, Preferences, StorageError};
