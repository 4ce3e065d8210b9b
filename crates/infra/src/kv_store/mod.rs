//! Local key-value persistence boundary.
//!
//! The application keeps everything under a single key, so the surface is the
//! minimal get/set/remove triple a mobile key-value store offers.

pub mod in_memory;
pub mod sqlite;
pub mod r#trait;

pub use in_memory::InMemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;
pub use r#trait::{KeyValueStore, StoreError};
