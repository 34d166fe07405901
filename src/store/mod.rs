//! Persistence
//!
//! A small key-value abstraction plus the saved point collection built on it.

pub mod file;
pub mod memory;
pub mod world;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use world::RealWorldLocations;

use crate::error::Result;
use serde_json::Value;
use std::sync::Arc;

/// Durable key-value storage holding JSON values
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value under `key`
    fn set(&self, key: &str, value: Value) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Type-erased storage handle, used where the backend is picked at runtime
pub type SharedStorage = Arc<dyn KeyValueStore>;
