//! A growable, contiguous vector, built atop raw, uninitialized storage.
//!
//! #   Organization
//!
//! This crate is composed of two top modules:
//!
//! -   The `utils` module contains the low-level building blocks: `RawStorage`, an owner of uninitialized slots, and
//!     `AllocError`, the error reported when memory cannot be obtained.
//! -   The `collections` module contains `Vector`, which tracks which prefix of a `RawStorage` is live, and is the only
//!     entity constructing and destroying elements within it.
//!
//!
//! #   Storage versus elements
//!
//! `RawStorage<T>` owns memory, not elements. It allocates an array of `capacity` slots, hands out their addresses,
//! and releases the memory when dropped, without ever reading, writing, or dropping a single `T`.
//!
//! `Vector<T>` owns elements. It knows that slots `[0, len)` are live, and slots `[len, capacity)` are not, and upholds
//! this invariant across every operation, including when an element operation panics midway.
//!
//!
//! #   Growth
//!
//! Whenever more slots are needed, `Vector` builds a new `RawStorage`, relocates its elements into it, then swaps the
//! new storage in. Should anything fail before the swap, the new storage is simply dropped, and the vector is left
//! untouched.
//!
//!
//! #   Panic safety
//!
//! Element operations (`Default`, `Clone`, construction closures, `Drop`) may panic. Operations which build into fresh
//! storage, or construct a value before touching any slot, offer the strong guarantee: on panic, the vector is left
//! exactly as it was. Operations which destroy or assign elements in place offer the basic guarantee: on panic, the
//! vector is left in a valid state, with no element leaked twice or dropped twice.

#![cfg_attr(not(test), no_std)]
//  Lints
#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
//  This author prefers to keep its test modules close to what they are testing.
#![allow(clippy::items_after_test_module)]

extern crate alloc;

pub mod collections;
pub mod utils;

pub use collections::Vector;
pub use utils::{AllocError, RawStorage};
