//  Errors.

use core::{alloc::Layout, error, fmt};

/// An error in obtaining memory for a number of slots.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AllocError {
    /// The requested number of slots cannot be represented as a `Layout`.
    CapacityOverflow,
    /// The global allocator could not satisfy the request.
    OutOfMemory {
        /// The layout which could not be allocated.
        layout: Layout,
    },
}

impl AllocError {
    /// Reports the error, in the manner of `alloc::vec::Vec`.
    ///
    /// Panics on `CapacityOverflow`, and invokes the allocation error handler on `OutOfMemory`.
    #[cold]
    #[track_caller]
    pub fn handle(self) -> ! {
        match self {
            Self::CapacityOverflow => panic!("capacity overflow"),
            Self::OutOfMemory { layout } => alloc::alloc::handle_alloc_error(layout),
        }
    }
}

impl fmt::Display for AllocError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::CapacityOverflow => f.write_str("capacity overflow"),
            Self::OutOfMemory { layout } => write!(
                f,
                "memory allocation of {} bytes (align {}) failed",
                layout.size(),
                layout.align()
            ),
        }
    }
}

impl error::Error for AllocError {}

// mod tests
