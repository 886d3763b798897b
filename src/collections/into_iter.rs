//! Owning iterator over the elements of a `Vector`.

use core::{fmt, iter::FusedIterator, ptr, slice};

use crate::utils::RawStorage;

/// Owning iterator over the elements of a `Vector`.
///
/// Elements not yielded by the time the iterator is dropped are dropped with it.
pub struct IntoIter<T> {
    //  Safety Invariants:
    //  -   Bounded: `start <= end <= storage.capacity()`.
    //  -   Live: slots `[start, end)` of `storage` hold initialized elements, owned by `self`.
    //  -   Dead: all other slots hold no element.
    storage: RawStorage<T>,
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    //  #   Safety
    //
    //  -   Live: slots `[0, len)` of `storage` must hold initialized elements, whose ownership is transferred.
    pub(crate) unsafe fn new(storage: RawStorage<T>, len: usize) -> Self {
        debug_assert!(len <= storage.capacity(), "{len} > {}", storage.capacity());

        Self { storage, start: 0, end: len }
    }

    /// Returns the remaining elements, as a slice.
    pub fn as_slice(&self) -> &[T] {
        //  Safety:
        //  -   Bounded: `start` is at most `capacity()`.
        let first = unsafe { self.storage.address_at_unchecked(self.start) };

        //  Safety:
        //  -   `first` is non-null and aligned.
        //  -   The `end - start` elements from `first` are initialized, as per Live invariant.
        //  -   No mutable borrow is accessible, as `self` is borrowed.
        unsafe { slice::from_raw_parts(first, self.end - self.start) }
    }

    /// Returns the remaining elements, as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        //  Safety:
        //  -   Bounded: `start` is at most `capacity()`.
        let first = unsafe { self.storage.address_at_unchecked_mut(self.start) };

        //  Safety:
        //  -   `first` is non-null and aligned.
        //  -   The `end - start` elements from `first` are initialized, as per Live invariant.
        //  -   No other borrow is accessible, as `self` is mutably borrowed.
        unsafe { slice::from_raw_parts_mut(first, self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        let index = self.start;

        //  Safety Invariant:
        //  -   Dead: the slot at `index` is moved out of below.
        self.start += 1;

        //  Safety:
        //  -   Bounded: `index` is strictly less than `end`.
        //  -   The slot at `index` was live, and is now dead, hence read only once.
        Some(unsafe { self.storage.address_at_unchecked_mut(index).read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;

        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }

        //  Safety Invariant:
        //  -   Dead: the slot at `end` is moved out of below.
        self.end -= 1;

        //  Safety:
        //  -   Bounded: `end` is strictly less than its former value, itself at most `capacity()`.
        //  -   The slot at `end` was live, and is now dead, hence read only once.
        Some(unsafe { self.storage.address_at_unchecked_mut(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> fmt::Debug for IntoIter<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining: *mut [T] = ptr::from_mut(self.as_mut_slice());

        //  Safety:
        //  -   `remaining` covers exactly the live elements, as per Live invariant, which are never accessed again.
        //
        //  `storage` releases the memory afterwards, even should a drop panic.
        unsafe { ptr::drop_in_place(remaining) };
    }
}

// mod tests
