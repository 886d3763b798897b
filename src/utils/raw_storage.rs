//  See `RawStorage`.

use core::{
    fmt,
    mem::{self, MaybeUninit},
    ptr::NonNull,
};

use crate::utils::{AllocError, allocator};

/// An owned block of uninitialized memory, sized for a fixed number of slots of `T`.
///
/// `RawStorage` is concerned with memory, not elements: it never reads, writes, constructs, or drops a `T`. Keeping
/// track of which slots hold a live element is the responsibility of its user.
///
/// The capacity of an instance is fixed for its lifetime; it may only change by exchanging the block with another
/// instance, through `swap` or `take`. Copying a block of possibly uninitialized memory has no meaning, hence
/// `RawStorage` is not `Clone`.
pub struct RawStorage<T> {
    //  Safety Invariants:
    //  -   Aligned: `ptr` is always non-null, and suitably aligned for `T`.
    //  -   Zero-Sized: if `array_layout::<T>(capacity)` has a size of 0, `ptr` is dangling.
    //  -   Self-Allocated: otherwise, `ptr` was allocated by `allocator::allocate(array_layout::<T>(capacity))`.
    ptr: NonNull<T>,
    capacity: usize,
}

//
//  Creation
//

impl<T> RawStorage<T> {
    /// Returns a new, empty, instance.
    ///
    /// Does not allocate.
    pub const fn new() -> Self {
        //  Safety Invariant:
        //  -   Zero-Sized: an array of 0 slots has a size of 0, and `ptr` is dangling.
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
        }
    }

    /// Returns a new instance, with room for exactly `capacity` slots.
    ///
    /// All slots are uninitialized. Does not allocate if `capacity` is 0, or `T` is zero-sized.
    ///
    /// #   Errors
    ///
    /// Returns an error if the layout of `capacity` slots overflows, or if the memory cannot be allocated. Nothing is
    /// leaked in either case.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        let layout = allocator::array_layout::<T>(capacity)?;

        if layout.size() == 0 {
            //  Safety Invariant:
            //  -   Zero-Sized: `ptr` is dangling.
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
            });
        }

        //  Safety:
        //  -   Non-Zero: `layout` has a non-zero size, as checked above.
        let ptr = unsafe { allocator::allocate(layout)? };

        //  Safety Invariant:
        //  -   Aligned: `layout` is aligned for `T`, hence so is `ptr`.
        //  -   Self-Allocated: `ptr` was just allocated with `array_layout::<T>(capacity)`.
        Ok(Self {
            ptr: ptr.cast(),
            capacity,
        })
    }

    /// Returns a new instance, with room for exactly `capacity` slots.
    ///
    /// #   Panics
    ///
    /// If the layout of `capacity` slots overflows. Invokes the allocation error handler if the memory cannot be
    /// allocated.
    #[track_caller]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|error| error.handle())
    }
}

//
//  Observers
//

impl<T> RawStorage<T> {
    /// Returns the number of slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns whether there is no slot at all.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// Returns the address of the first slot.
    ///
    /// The pointer is dangling if there is no slot.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns the address of the first slot.
    ///
    /// The pointer is dangling if there is no slot.
    #[inline]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }
}

//
//  Slot access
//

impl<T> RawStorage<T> {
    /// Returns the address of the slot at `offset`.
    ///
    /// `offset` may be equal to the capacity, in which case the one-past-the-end address is returned. Such an address
    /// may be compared, or used for pointer arithmetic, but never read from nor written to.
    ///
    /// #   Panics
    ///
    /// If `offset` is strictly greater than the capacity.
    #[inline]
    #[track_caller]
    pub fn address_at(&self, offset: usize) -> *const T {
        assert!(offset <= self.capacity, "{offset} > {}", self.capacity);

        //  Safety:
        //  -   `offset` is within the allocation, or one past its end, as checked above.
        unsafe { self.ptr.as_ptr().add(offset) }
    }

    /// Returns the address of the slot at `offset`.
    ///
    /// See `address_at`.
    ///
    /// #   Panics
    ///
    /// If `offset` is strictly greater than the capacity.
    #[inline]
    #[track_caller]
    pub fn address_at_mut(&mut self, offset: usize) -> *mut T {
        assert!(offset <= self.capacity, "{offset} > {}", self.capacity);

        //  Safety:
        //  -   `offset` is within the allocation, or one past its end, as checked above.
        unsafe { self.ptr.as_ptr().add(offset) }
    }

    /// Returns the address of the slot at `offset`, without bounds checking.
    ///
    /// #   Safety
    ///
    /// -   Bounded: `offset` must be less than or equal to the capacity.
    #[inline]
    pub unsafe fn address_at_unchecked(&self, offset: usize) -> *const T {
        debug_assert!(offset <= self.capacity, "{offset} > {}", self.capacity);

        //  Safety:
        //  -   `offset` is within the allocation, or one past its end, as per Bounded pre-condition.
        unsafe { self.ptr.as_ptr().add(offset) }
    }

    /// Returns the address of the slot at `offset`, without bounds checking.
    ///
    /// #   Safety
    ///
    /// -   Bounded: `offset` must be less than or equal to the capacity.
    #[inline]
    pub unsafe fn address_at_unchecked_mut(&mut self, offset: usize) -> *mut T {
        debug_assert!(offset <= self.capacity, "{offset} > {}", self.capacity);

        //  Safety:
        //  -   `offset` is within the allocation, or one past its end, as per Bounded pre-condition.
        unsafe { self.ptr.as_ptr().add(offset) }
    }

    /// Returns a reference to the slot at `index`.
    ///
    /// #   Panics
    ///
    /// If `index` is greater than or equal to the capacity.
    #[inline]
    #[track_caller]
    pub fn slot(&self, index: usize) -> &MaybeUninit<T> {
        assert!(index < self.capacity, "{index} >= {}", self.capacity);

        //  Safety:
        //  -   `index` is in bounds, as checked above.
        //  -   `MaybeUninit<T>` has the same layout as `T`, and requires no initialization.
        //  -   The borrow of `self` guarantees no mutable borrow of the slot is accessible.
        unsafe { &*self.address_at_unchecked(index).cast::<MaybeUninit<T>>() }
    }

    /// Returns a mutable reference to the slot at `index`.
    ///
    /// Writing to the slot does not drop its previous content, if any.
    ///
    /// #   Panics
    ///
    /// If `index` is greater than or equal to the capacity.
    #[inline]
    #[track_caller]
    pub fn slot_mut(&mut self, index: usize) -> &mut MaybeUninit<T> {
        assert!(index < self.capacity, "{index} >= {}", self.capacity);

        //  Safety:
        //  -   `index` is in bounds, as checked above.
        //  -   `MaybeUninit<T>` has the same layout as `T`, and requires no initialization.
        //  -   The mutable borrow of `self` guarantees no other borrow of the slot is accessible.
        unsafe { &mut *self.address_at_unchecked_mut(index).cast::<MaybeUninit<T>>() }
    }
}

//
//  Ownership transfer
//

impl<T> RawStorage<T> {
    /// Exchanges the blocks, and capacities, of `self` and `other`.
    ///
    /// The content of the slots is not touched.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Takes the block out of `self`, leaving it empty.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }
}

//
//  Common traits
//

impl<T> Default for RawStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        //  #   Safety
        //
        //  -   Self-Allocated: `ptr` was allocated by `allocator::allocate(array_layout::<T>(capacity))`.
        #[inline(never)]
        unsafe fn do_deallocate<T>(ptr: NonNull<T>, capacity: usize) {
            let layout = allocator::array_layout::<T>(capacity);

            #[cfg(debug_assertions)]
            let layout = layout.expect("valid layout");

            //  Safety:
            //  -   Valid since `ptr` was allocated with this very layout, as per Self-Allocated pre-condition, which
            //      cannot succeed without `array_layout`, a pure function, succeeding.
            #[cfg(not(debug_assertions))]
            let layout = unsafe { layout.unwrap_unchecked() };

            //  Safety:
            //  -   Liveness: `ptr` is still allocated, as per Self-Allocated pre-condition.
            //  -   Selfness: `ptr` was returned by `allocate`, as per Self-Allocated pre-condition.
            //  -   Layout: `layout` is the layout passed to `allocate`, as per Self-Allocated pre-condition.
            unsafe { allocator::deallocate(ptr.cast(), layout) }
        }

        if self.capacity == 0 || mem::size_of::<T>() == 0 {
            return;
        }

        //  Safety:
        //  -   Self-Allocated: a non-zero number of non zero-sized slots implies a non-zero size, hence `ptr` was
        //      allocated, as per Safety Invariants.
        unsafe { do_deallocate(self.ptr, self.capacity) };
    }
}

impl<T> fmt::Debug for RawStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("RawStorage")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

//  Safety:
//  -   Just like a `Box<[MaybeUninit<T>]>`.
unsafe impl<T> Send for RawStorage<T> where T: Send {}

unsafe impl<T> Sync for RawStorage<T> where T: Sync {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let storage = RawStorage::<u64>::new();

        assert_eq!(0, storage.capacity());
        assert!(storage.is_empty());
        assert_eq!(storage.as_ptr(), storage.address_at(0));
    }

    #[test]
    fn with_capacity_zero() {
        let storage = RawStorage::<String>::with_capacity(0);

        assert_eq!(0, storage.capacity());
        assert!(storage.is_empty());
    }

    #[test]
    fn with_capacity() {
        let storage = RawStorage::<u64>::with_capacity(4);

        assert_eq!(4, storage.capacity());
        assert!(!storage.is_empty());
        assert_eq!(0, storage.as_ptr() as usize % mem::align_of::<u64>());
    }

    #[test]
    fn with_capacity_overflow() {
        let result = RawStorage::<u64>::try_with_capacity(usize::MAX);

        assert_eq!(Some(AllocError::CapacityOverflow), result.err());
    }

    #[test]
    fn zero_sized() {
        let storage = RawStorage::<()>::with_capacity(usize::MAX);

        assert_eq!(usize::MAX, storage.capacity());
    }

    #[test]
    fn address_at_end() {
        let storage = RawStorage::<u32>::with_capacity(3);

        let first = storage.address_at(0) as usize;
        let end = storage.address_at(3) as usize;

        assert_eq!(3 * mem::size_of::<u32>(), end - first);
    }

    #[test]
    #[should_panic]
    fn address_at_beyond_end() {
        let storage = RawStorage::<u32>::with_capacity(3);

        storage.address_at(4);
    }

    #[test]
    fn slot_write_read() {
        let mut storage = RawStorage::<u32>::with_capacity(3);

        storage.slot_mut(2).write(42);

        //  Safety:
        //  -   Slot 2 was just initialized.
        assert_eq!(42, unsafe { storage.slot(2).assume_init_read() });
    }

    #[test]
    fn address_at_unchecked_write_read() {
        let mut storage = RawStorage::<String>::with_capacity(2);

        //  Safety:
        //  -   Slot 1 is in bounds, and uninitialized.
        unsafe { storage.address_at_unchecked_mut(1).write(String::from("slot")) };

        assert_eq!(storage.address_at(1), unsafe { storage.address_at_unchecked(1) });

        //  Safety:
        //  -   Slot 1 was just initialized, and is read exactly once.
        let element = unsafe { storage.address_at_unchecked(1).read() };

        assert_eq!("slot", element);
    }

    #[test]
    #[should_panic]
    fn slot_at_capacity() {
        let storage = RawStorage::<u32>::with_capacity(3);

        storage.slot(3);
    }

    #[test]
    fn swap() {
        let mut left = RawStorage::<u32>::with_capacity(3);
        let mut right = RawStorage::<u32>::new();

        let address = left.as_ptr();

        left.swap(&mut right);

        assert_eq!(0, left.capacity());
        assert_eq!(3, right.capacity());
        assert_eq!(address, right.as_ptr());
    }

    #[test]
    fn take() {
        let mut storage = RawStorage::<u32>::with_capacity(3);

        let address = storage.as_ptr();

        let taken = storage.take();

        assert_eq!(0, storage.capacity());
        assert_eq!(3, taken.capacity());
        assert_eq!(address, taken.as_ptr());
    }

    #[test]
    fn debug() {
        let storage = RawStorage::<u32>::with_capacity(3);

        assert_eq!("RawStorage { capacity: 3, .. }", format!("{storage:?}"));
    }
} // mod tests
