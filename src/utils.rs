//! Utilities for implementers of collections atop raw storage.

mod allocator;
mod error;
mod raw_storage;

pub use error::AllocError;
pub use raw_storage::RawStorage;
