//! Storage layer
//!
//! - `remote`: the tree-shaped remote document store contract
//! - `memory`: in-process implementation used by tests and development
//! - `local`: redb-backed device cache (session record, order-number fallback)
//! - `saga`: undo journal over remote writes for multi-step operations
//! - `paths`: the well-known tree paths

pub mod local;
pub mod memory;
pub mod paths;
pub mod remote;
pub mod saga;
#[cfg(test)]
pub mod test_support;

pub use local::{CacheError, LocalCache};
pub use memory::MemoryStore;
pub use remote::{RemoteStore, StoreError, StoreResult};
pub use saga::Saga;
