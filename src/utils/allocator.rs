//  Thin layer over the global allocator.

use core::{alloc::Layout, ptr::NonNull};

use alloc::alloc;

use crate::utils::AllocError;

//  Returns the layout of an array of `n` slots of `T`.
pub(crate) fn array_layout<T>(n: usize) -> Result<Layout, AllocError> {
    Layout::array::<T>(n).map_err(|_| AllocError::CapacityOverflow)
}

//  Attempts to allocate a block of memory satisfying `layout`.
//
//  Returns an error if allocation fails.
//
//  The resulting memory should be considered uninitialized.
//
//  #   Safety
//
//  -   Non-Zero: `layout` must have a non-zero size.
pub(crate) unsafe fn allocate(layout: Layout) -> Result<NonNull<u8>, AllocError> {
    debug_assert_ne!(0, layout.size());

    //  Safety:
    //  -   `layout` is non-zero, as per Non-Zero pre-condition.
    let ptr = unsafe { alloc::alloc(layout) };

    NonNull::new(ptr).ok_or_else(|| {
        log::debug!("failed to allocate {} bytes (align {})", layout.size(), layout.align());

        AllocError::OutOfMemory { layout }
    })
}

//  Deallocates the block of memory `ptr`, with the given `layout`.
//
//  #   Safety
//
//  -   Liveness: `ptr` must still be allocated.
//  -   Selfness: `ptr` must have been returned by `allocate`.
//  -   Layout: `layout` must match the layout passed to `allocate`.
pub(crate) unsafe fn deallocate(ptr: NonNull<u8>, layout: Layout) {
    //  Safety:
    //  -   `ptr` is currently allocated, as per Liveness pre-condition.
    //  -   `ptr` was allocated via the global allocator, as per Selfness pre-condition.
    //  -   `layout` matches the layout passed to the allocation function, as per Layout pre-condition.
    unsafe { alloc::dealloc(ptr.as_ptr(), layout) };
}

// mod tests
