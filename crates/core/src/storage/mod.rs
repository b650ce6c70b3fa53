//! Durable key-value persistence for refresh timestamps.
//!
//! - [`KeyValueStore`] - the interface the refresh gates depend on
//! - [`InMemoryStore`] - process-local store for tests and ephemeral runs
//! - [`FileStore`] - versioned JSON file that survives restarts

mod file_store;
mod memory_store;
mod store_traits;

pub use file_store::FileStore;
pub use memory_store::InMemoryStore;
pub use store_traits::KeyValueStore;
