//! Collections built atop `RawStorage`.

//  Design considerations
//
//  #   Why `usize` positions, rather than iterators?
//
//  Iterators into a vector are plain addresses, invalidated by any operation which reallocates or shifts elements. In
//  Rust, the borrow-checker already forbids holding such an address across a mutation, so positions are expressed as
//  indexes, and addresses are only exposed as slices, or as a raw pointer range.

pub mod into_iter;
pub mod vector;

pub use into_iter::IntoIter;
pub use vector::Vector;
