//! Growable, contiguous, sequence of elements.

use core::{
    cmp, fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem,
    ops::{Deref, DerefMut, Range},
    ptr, slice,
};

use crate::{
    collections::IntoIter,
    utils::{AllocError, RawStorage},
};

/// A growable, contiguous, sequence of elements.
///
/// `Vector` owns a `RawStorage`, and is the only entity constructing and destroying elements within it: slots
/// `[0, len)` hold live elements, in insertion order, while slots `[len, capacity)` are uninitialized.
///
/// #   Growth
///
/// When an element is appended, or inserted, while the vector is full, its capacity is doubled (or set to 1, if 0).
/// `reserve` and `resize`, on the other hand, grow the capacity to exactly the requested size.
///
/// Growth always builds a new storage, relocates the elements into it, and only then swaps it in. Relocation is a
/// bitwise move, which cannot fail, hence elements are never cloned during growth.
///
/// #   Positions
///
/// Positions are indexes in `[0, len)`, or `[0, len]` for insertion. Addresses obtained through `as_ptr`,
/// `as_ptr_range`, or slices, are invalidated by any operation which reallocates or shifts elements.
pub struct Vector<T> {
    //  Safety Invariants:
    //  -   Bounded: `len <= storage.capacity()`.
    //  -   Live: slots `[0, len)` of `storage` hold initialized elements.
    //  -   Dead: slots `[len, storage.capacity())` of `storage` hold no element, they may be overwritten at leisure.
    storage: RawStorage<T>,
    len: usize,
    _marker: PhantomData<T>,
}

//
//  Creation
//

impl<T> Vector<T> {
    /// Creates a new, empty, vector.
    ///
    /// Does not allocate.
    pub const fn new() -> Self {
        //  Safety Invariant:
        //  -   Bounded, Live, Dead: trivially, as `len` is 0.
        Self {
            storage: RawStorage::new(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a new, empty, vector with room for exactly `capacity` elements.
    ///
    /// #   Errors
    ///
    /// Returns an error if the memory cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        let storage = RawStorage::try_with_capacity(capacity)?;

        //  Safety Invariant:
        //  -   Bounded, Live, Dead: trivially, as `len` is 0.
        Ok(Self {
            storage,
            len: 0,
            _marker: PhantomData,
        })
    }

    /// Creates a new, empty, vector with room for exactly `capacity` elements.
    ///
    /// #   Panics
    ///
    /// If the memory cannot be allocated.
    #[track_caller]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|error| error.handle())
    }

    /// Creates a new vector of `len` default elements, with a capacity of exactly `len`.
    ///
    /// Should `T::default()` panic, the elements constructed so far are dropped, and the memory released, before the
    /// panic propagates.
    ///
    /// #   Errors
    ///
    /// Returns an error if the memory cannot be allocated.
    pub fn try_with_len(len: usize) -> Result<Self, AllocError>
    where
        T: Default,
    {
        let mut result = Self::try_with_capacity(len)?;

        result.extend_tail_with(len, |_| T::default());

        Ok(result)
    }

    /// Creates a new vector of `len` default elements, with a capacity of exactly `len`.
    ///
    /// See `try_with_len`.
    ///
    /// #   Panics
    ///
    /// If the memory cannot be allocated.
    #[track_caller]
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::try_with_len(len).unwrap_or_else(|error| error.handle())
    }

    /// Clones `self`, with a capacity of exactly `self.len()`.
    ///
    /// Should `T::clone()` panic, the clones constructed so far are dropped, and the memory released, before the panic
    /// propagates.
    ///
    /// #   Errors
    ///
    /// Returns an error if the memory cannot be allocated.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut result = Self::try_with_capacity(self.len)?;

        result.extend_tail_with(self.len, |index| self[index].clone());

        Ok(result)
    }

    /// Takes the elements, and storage, out of `self`, leaving it empty.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Exchanges the elements, and storage, of `self` and `other`.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }
}

//
//  Observers
//

impl<T> Vector<T> {
    /// Returns the number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns whether there is no element.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the vector can hold without reallocating.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Returns the elements, as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        //  Safety:
        //  -   The pointer is non-null and aligned, even if dangling.
        //  -   The first `len` elements are initialized, as per Live invariant.
        //  -   No mutable borrow is accessible, as `self` is borrowed.
        unsafe { slice::from_raw_parts(self.storage.as_ptr(), self.len) }
    }

    /// Returns the elements, as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        //  Safety:
        //  -   The pointer is non-null and aligned, even if dangling.
        //  -   The first `len` elements are initialized, as per Live invariant.
        //  -   No other borrow is accessible, as `self` is mutably borrowed.
        unsafe { slice::from_raw_parts_mut(self.storage.as_mut_ptr(), self.len) }
    }

    /// Returns the address of the first element.
    ///
    /// The pointer is dangling if the vector has no capacity.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Returns the address of the first element.
    ///
    /// The pointer is dangling if the vector has no capacity.
    #[inline]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    /// Returns the range of addresses of the live elements, from the first to one-past-the-last.
    #[inline]
    pub fn as_ptr_range(&self) -> Range<*const T> {
        self.as_slice().as_ptr_range()
    }

    /// Returns the range of addresses of the live elements, from the first to one-past-the-last.
    #[inline]
    pub fn as_mut_ptr_range(&mut self) -> Range<*mut T> {
        self.as_mut_slice().as_mut_ptr_range()
    }
}

//
//  Capacity
//

impl<T> Vector<T> {
    /// Ensures the capacity is at least `new_capacity`.
    ///
    /// Does nothing if the capacity is already sufficient, otherwise reallocates to exactly `new_capacity`. Neither the
    /// number, nor the values, of the elements are changed.
    ///
    /// #   Errors
    ///
    /// Returns an error if the memory cannot be allocated, in which case `self` is left unchanged.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }

        let storage = RawStorage::try_with_capacity(new_capacity)?;

        //  Safety:
        //  -   Room: `storage.capacity()` is `new_capacity`, which is greater than `capacity()`, hence `len`.
        unsafe { self.relocate(storage, None) };

        Ok(())
    }

    /// Ensures the capacity is at least `new_capacity`.
    ///
    /// See `try_reserve`.
    ///
    /// #   Panics
    ///
    /// If the memory cannot be allocated.
    #[track_caller]
    pub fn reserve(&mut self, new_capacity: usize) {
        self.try_reserve(new_capacity).unwrap_or_else(|error| error.handle())
    }

    /// Resizes the vector to `new_len` elements, constructing new elements with `f`, or dropping excess ones.
    ///
    /// If `new_len` exceeds the capacity, the capacity is grown to exactly `new_len` first.
    ///
    /// Should `f` panic, the elements it constructed so far are dropped, and the number of elements is left unchanged.
    ///
    /// #   Errors
    ///
    /// Returns an error if the memory cannot be allocated, in which case `self` is left unchanged.
    pub fn try_resize_with<F>(&mut self, new_len: usize, mut f: F) -> Result<(), AllocError>
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);

            return Ok(());
        }

        self.try_reserve(new_len)?;

        self.extend_tail_with(new_len, |_| f());

        Ok(())
    }

    /// Resizes the vector to `new_len` elements, constructing new elements with `f`, or dropping excess ones.
    ///
    /// See `try_resize_with`.
    ///
    /// #   Panics
    ///
    /// If the memory cannot be allocated.
    #[track_caller]
    pub fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        self.try_resize_with(new_len, f).unwrap_or_else(|error| error.handle())
    }

    /// Resizes the vector to `new_len` elements, default constructing new elements, or dropping excess ones.
    ///
    /// See `try_resize_with`.
    ///
    /// #   Errors
    ///
    /// Returns an error if the memory cannot be allocated, in which case `self` is left unchanged.
    pub fn try_resize(&mut self, new_len: usize) -> Result<(), AllocError>
    where
        T: Default,
    {
        self.try_resize_with(new_len, T::default)
    }

    /// Resizes the vector to `new_len` elements, default constructing new elements, or dropping excess ones.
    ///
    /// See `try_resize_with`.
    ///
    /// #   Panics
    ///
    /// If the memory cannot be allocated.
    #[track_caller]
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }
}

//
//  Mutation at the back
//

impl<T> Vector<T> {
    /// Appends the element constructed by `f`, and returns a reference to it.
    ///
    /// If the vector is full, its capacity is doubled first, and the element is constructed directly into its slot in
    /// the new storage, before the existing elements are relocated.
    ///
    /// Should `f` panic, `self` is left unchanged.
    ///
    /// #   Errors
    ///
    /// Returns an error if the memory cannot be allocated, in which case `f` is not called, and `self` is left
    /// unchanged.
    pub fn try_emplace_back<F>(&mut self, f: F) -> Result<&mut T, AllocError>
    where
        F: FnOnce() -> T,
    {
        let index = self.len;

        if index == self.capacity() {
            let mut storage = RawStorage::<T>::try_with_capacity(self.grown_capacity()?)?;

            //  Should `f` panic, `storage` is released, and `self` is untouched.
            let element = f();

            //  Safety:
            //  -   Bounded: `index` is `capacity()`, strictly less than `storage.capacity()`.
            unsafe { storage.address_at_unchecked_mut(index).write(element) };

            //  Safety:
            //  -   Room: `storage.capacity()` is strictly greater than `len`.
            unsafe { self.relocate(storage, None) };
        } else {
            let element = f();

            //  Safety:
            //  -   Bounded: `index` is `len`, strictly less than `capacity()`.
            //  -   The slot at `index` is dead, as per Dead invariant, and may be overwritten.
            unsafe { self.storage.address_at_unchecked_mut(index).write(element) };
        }

        //  Safety Invariant:
        //  -   Live: the slot at `index` was just initialized.
        self.len += 1;

        //  Safety:
        //  -   The slot at `index` is live.
        //  -   No other borrow is accessible, as `self` is mutably borrowed.
        Ok(unsafe { &mut *self.storage.address_at_unchecked_mut(index) })
    }

    /// Appends the element constructed by `f`, and returns a reference to it.
    ///
    /// See `try_emplace_back`.
    ///
    /// #   Panics
    ///
    /// If the memory cannot be allocated.
    #[track_caller]
    pub fn emplace_back<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace_back(f) {
            Ok(element) => element,
            Err(error) => error.handle(),
        }
    }

    /// Appends `element`, and returns a reference to it.
    ///
    /// See `try_emplace_back`.
    ///
    /// #   Errors
    ///
    /// Returns an error if the memory cannot be allocated, in which case `element` is dropped, and `self` is left
    /// unchanged.
    pub fn try_push(&mut self, element: T) -> Result<&mut T, AllocError> {
        self.try_emplace_back(|| element)
    }

    /// Appends `element`, and returns a reference to it.
    ///
    /// See `try_emplace_back`.
    ///
    /// #   Panics
    ///
    /// If the memory cannot be allocated.
    #[track_caller]
    pub fn push(&mut self, element: T) -> &mut T {
        self.emplace_back(|| element)
    }

    /// Removes the last element, if any, and returns it.
    ///
    /// Does nothing on an empty vector.
    pub fn pop_back(&mut self) -> Option<T> {
        let last = self.len.checked_sub(1)?;

        //  Safety Invariant:
        //  -   Dead: the slot at `last` is moved out of below.
        self.len = last;

        //  Safety:
        //  -   The slot at `last` was live, as per Live invariant, and is now dead, hence read only once.
        Some(unsafe { self.storage.address_at_unchecked_mut(last).read() })
    }

    /// Drops all elements at or after `new_len`, if any.
    ///
    /// The capacity is left unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }

        //  Safety:
        //  -   Bounded: `new_len` is strictly less than `len`, hence than `capacity()`.
        let first = unsafe { self.storage.address_at_unchecked_mut(new_len) };

        let tail = ptr::slice_from_raw_parts_mut(first, self.len - new_len);

        //  Safety Invariant:
        //  -   Dead: the tail is dropped below. Should a drop panic, the remaining elements are still dropped, and
        //      none is dropped twice.
        self.len = new_len;

        //  Safety:
        //  -   `tail` covers slots `[new_len, old len)`, which were live, and are now dead.
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Drops all elements.
    ///
    /// The capacity is left unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }
}

//
//  Mutation at arbitrary positions
//

impl<T> Vector<T> {
    /// Inserts the element constructed by `f` at `index`, shifting all elements at or after it by one slot, and
    /// returns a reference to it.
    ///
    /// Inserting at `len()` is equivalent to `try_emplace_back`. If the vector is full, its capacity is doubled first,
    /// and the element is constructed directly into its slot in the new storage, before the existing elements are
    /// relocated around it.
    ///
    /// In all cases, the element is constructed before any existing element is moved: should `f` panic, `self` is left
    /// unchanged.
    ///
    /// #   Errors
    ///
    /// Returns an error if the memory cannot be allocated, in which case `f` is not called, and `self` is left
    /// unchanged.
    ///
    /// #   Panics
    ///
    /// If `index` is strictly greater than `len()`.
    #[track_caller]
    pub fn try_emplace<F>(&mut self, index: usize, f: F) -> Result<&mut T, AllocError>
    where
        F: FnOnce() -> T,
    {
        assert!(index <= self.len, "insertion index {index} > len {}", self.len);

        if index == self.len {
            return self.try_emplace_back(f);
        }

        if self.len == self.capacity() {
            let mut storage = RawStorage::<T>::try_with_capacity(self.grown_capacity()?)?;

            //  Should `f` panic, `storage` is released, and `self` is untouched.
            let element = f();

            //  Safety:
            //  -   Bounded: `index` is strictly less than `len`, hence than `storage.capacity()`.
            unsafe { storage.address_at_unchecked_mut(index).write(element) };

            //  Safety:
            //  -   Room: `storage.capacity()` is strictly greater than `len`.
            //  -   Hole: `index` is strictly less than `len`.
            unsafe { self.relocate(storage, Some(index)) };
        } else {
            //  Should `f` panic, `self` is untouched.
            let element = f();

            //  Safety:
            //  -   Bounded: `index` is strictly less than `len`, hence than `capacity()`.
            let hole = unsafe { self.storage.address_at_unchecked_mut(index) };

            //  Safety:
            //  -   `hole` is valid for reads of `len - index` elements, as per Live invariant.
            //  -   `hole + 1` is valid for writes of `len - index` elements, as `len < capacity()`.
            //  -   Both are aligned, and `ptr::copy` handles the overlap.
            unsafe { ptr::copy(hole, hole.add(1), self.len - index) };

            //  Safety:
            //  -   The element at `hole` was bitwise moved to `hole + 1` above, hence `hole` may be overwritten.
            unsafe { hole.write(element) };
        }

        //  Safety Invariant:
        //  -   Live: the elements were shifted, and the slot at `index` initialized, leaving `[0, len + 1)` live.
        self.len += 1;

        //  Safety:
        //  -   The slot at `index` is live.
        //  -   No other borrow is accessible, as `self` is mutably borrowed.
        Ok(unsafe { &mut *self.storage.address_at_unchecked_mut(index) })
    }

    /// Inserts the element constructed by `f` at `index`, and returns a reference to it.
    ///
    /// See `try_emplace`.
    ///
    /// #   Panics
    ///
    /// If `index` is strictly greater than `len()`, or if the memory cannot be allocated.
    #[track_caller]
    pub fn emplace<F>(&mut self, index: usize, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace(index, f) {
            Ok(element) => element,
            Err(error) => error.handle(),
        }
    }

    /// Inserts `element` at `index`, and returns a reference to it.
    ///
    /// See `try_emplace`.
    ///
    /// #   Errors
    ///
    /// Returns an error if the memory cannot be allocated, in which case `element` is dropped, and `self` is left
    /// unchanged.
    ///
    /// #   Panics
    ///
    /// If `index` is strictly greater than `len()`.
    #[track_caller]
    pub fn try_insert(&mut self, index: usize, element: T) -> Result<&mut T, AllocError> {
        self.try_emplace(index, || element)
    }

    /// Inserts `element` at `index`, and returns a reference to it.
    ///
    /// See `try_emplace`.
    ///
    /// #   Panics
    ///
    /// If `index` is strictly greater than `len()`, or if the memory cannot be allocated.
    #[track_caller]
    pub fn insert(&mut self, index: usize, element: T) -> &mut T {
        self.emplace(index, || element)
    }

    /// Removes the element at `index`, shifting all elements after it by one slot, and returns it.
    ///
    /// #   Panics
    ///
    /// If `index` is greater than or equal to `len()`.
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "removal index {index} >= len {}", self.len);

        //  Safety:
        //  -   Bounded: `index` is strictly less than `len`, hence than `capacity()`.
        let hole = unsafe { self.storage.address_at_unchecked_mut(index) };

        //  Safety:
        //  -   The slot at `hole` is live, as per Live invariant, and is overwritten below.
        let element = unsafe { hole.read() };

        //  Safety:
        //  -   `hole + 1` is valid for reads of `len - index - 1` elements, as per Live invariant.
        //  -   `hole` is valid for writes of `len - index - 1` elements, as `hole` was moved out of.
        //  -   Both are aligned, and `ptr::copy` handles the overlap.
        unsafe { ptr::copy(hole.add(1), hole, self.len - index - 1) };

        //  Safety Invariant:
        //  -   Dead: the last slot was bitwise moved one slot down.
        self.len -= 1;

        element
    }

    /// Drops the element at `index`, shifting all elements after it by one slot.
    ///
    /// Returns the index of the element now occupying `index`, which is `len()` if the erased element was the last.
    ///
    /// #   Panics
    ///
    /// If `index` is greater than or equal to `len()`.
    #[track_caller]
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));

        index
    }
}

//
//  Common traits
//

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> Clone for Vector<T>
where
    T: Clone,
{
    #[track_caller]
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|error| error.handle())
    }

    //  If `source` does not fit, a full clone is built first, then swapped in, leaving `self` unchanged should any
    //  clone panic.
    //
    //  Otherwise, the storage is reused: the common prefix is assigned element-wise, then trailing elements are cloned
    //  from `source` or dropped. Should a clone panic, the trailing elements cloned so far are dropped, and `len` is
    //  left unchanged, though the common prefix may be partially assigned.
    #[track_caller]
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let mut temporary = source.clone();

            self.swap(&mut temporary);

            return;
        }

        let common = cmp::min(self.len, source.len);

        for (target, element) in self[..common].iter_mut().zip(&source[..common]) {
            target.clone_from(element);
        }

        if self.len < source.len {
            self.extend_tail_with(source.len, |index| source[index].clone());
        } else {
            self.truncate(source.len);
        }
    }
}

impl<T> fmt::Debug for Vector<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        let live: *mut [T] = self.as_mut_slice();

        //  Safety:
        //  -   `live` covers exactly the live elements, as per Live invariant, which are never accessed again.
        //
        //  `storage` releases the memory afterwards, even should a drop panic.
        unsafe { ptr::drop_in_place(live) };
    }
}

impl<T> Eq for Vector<T> where T: Eq {}

impl<T> Extend<T> for Vector<T> {
    #[track_caller]
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();

        let (lower, _) = iter.size_hint();

        self.reserve(self.len.saturating_add(lower));

        for element in iter {
            self.push(element);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    #[track_caller]
    fn from(array: [T; N]) -> Self {
        let mut result = Self::with_capacity(N);

        result.extend(array);

        result
    }
}

impl<T> FromIterator<T> for Vector<T> {
    #[track_caller]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut result = Self::new();

        result.extend(iter);

        result
    }
}

impl<T> Hash for Vector<T>
where
    T: Hash,
{
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.as_slice().hash(state);
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let storage = self.storage.take();

        //  Safety Invariant:
        //  -   Bounded, Live, Dead: trivially, as `len` is 0, matching the now empty storage.
        let len = mem::replace(&mut self.len, 0);

        //  Safety:
        //  -   Live: slots `[0, len)` of `storage` are live, as per Live invariant, and no longer owned by `self`.
        unsafe { IntoIter::new(storage, len) }
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> Ord for Vector<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T> PartialEq for Vector<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T> PartialOrd for Vector<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

//
//  Implementation
//

impl<T> Vector<T> {
    //  Returns the capacity to grow to when full: double the current one, or 1 if 0.
    fn grown_capacity(&self) -> Result<usize, AllocError> {
        match self.capacity() {
            0 => Ok(1),
            capacity => capacity.checked_mul(2).ok_or(AllocError::CapacityOverflow),
        }
    }

    //  Constructs the elements of slots `[len, new_len)`, in order, calling `f` with the index of each.
    //
    //  Should `f` panic, the elements constructed so far are dropped, and `self` is left unchanged.
    //
    //  #   Panics
    //
    //  If `new_len` is strictly less than `len`, or strictly greater than `capacity()`.
    #[track_caller]
    fn extend_tail_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut(usize) -> T,
    {
        assert!(self.len <= new_len && new_len <= self.capacity());

        let start = self.len;

        let mut builder = TailBuilder::new(self);

        for index in start..new_len {
            //  Safety:
            //  -   Room: `index` is strictly less than `new_len`, hence than `capacity()`.
            unsafe { builder.push(f(index)) };
        }

        builder.commit();
    }

    //  Relocates all elements into `storage`, then swaps it in, releasing the old block.
    //
    //  If `hole` is some, the elements at or after `hole` are shifted by one slot, and the slot at `hole` of `storage`
    //  is left untouched. `len` is not adjusted.
    //
    //  Relocation is a bitwise move, which cannot fail.
    //
    //  #   Safety
    //
    //  -   Room: `storage.capacity()` must be at least `len + 1` if `hole` is some, and at least `len` otherwise.
    //  -   Hole: `hole`, if some, must be less than or equal to `len`.
    unsafe fn relocate(&mut self, mut storage: RawStorage<T>, hole: Option<usize>) {
        let split = hole.unwrap_or(self.len);
        let shift = usize::from(hole.is_some());

        debug_assert!(split <= self.len);
        debug_assert!(self.len + shift <= storage.capacity());

        let source = self.storage.as_ptr();
        let destination = storage.as_mut_ptr();

        //  Safety:
        //  -   `source` is valid for reads of `len` elements, as per Live invariant.
        //  -   `destination` is valid for writes of `len + shift` elements, as per Room pre-condition.
        //  -   `split` is at most `len`, as per Hole pre-condition.
        //  -   Both are aligned, and do not overlap, as `storage` is a distinct block.
        unsafe {
            ptr::copy_nonoverlapping(source, destination, split);
            ptr::copy_nonoverlapping(source.add(split), destination.add(split + shift), self.len - split);
        }

        log::trace!(
            "relocated {} elements from capacity {} to capacity {}",
            self.len,
            self.capacity(),
            storage.capacity()
        );

        //  The old block, now in `storage`, only holds moved-out elements: dropping it merely releases memory.
        self.storage.swap(&mut storage);
    }
}

//  Constructs elements in the dead slots following the live ones.
//
//  Until committed, the constructed elements are not accounted for in `len`: should construction panic midway,
//  dropping the builder drops the elements constructed so far, leaving the vector as it was.
struct TailBuilder<'a, T> {
    vector: &'a mut Vector<T>,
    built: usize,
}

impl<'a, T> TailBuilder<'a, T> {
    fn new(vector: &'a mut Vector<T>) -> Self {
        Self { vector, built: 0 }
    }

    //  #   Safety
    //
    //  -   Room: `len + built` must be strictly less than `capacity()`.
    unsafe fn push(&mut self, element: T) {
        let index = self.vector.len + self.built;

        debug_assert!(index < self.vector.capacity(), "{index} >= {}", self.vector.capacity());

        //  Safety:
        //  -   Bounded: `index` is strictly less than `capacity()`, as per Room pre-condition.
        //  -   The slot at `index` is dead, neither live nor built yet, and may be overwritten.
        unsafe { self.vector.storage.address_at_unchecked_mut(index).write(element) };

        self.built += 1;
    }

    fn commit(mut self) {
        //  Safety Invariant:
        //  -   Live: the `built` slots following the live ones were initialized by `push`.
        self.vector.len += mem::replace(&mut self.built, 0);
    }
}

impl<T> Drop for TailBuilder<'_, T> {
    fn drop(&mut self) {
        if self.built == 0 {
            return;
        }

        //  Safety:
        //  -   Bounded: `len` is strictly less than `len + built`, which is at most `capacity()`.
        let first = unsafe { self.vector.storage.address_at_unchecked_mut(self.vector.len) };

        let built = ptr::slice_from_raw_parts_mut(first, self.built);

        //  Safety:
        //  -   `built` covers exactly the elements constructed by `push`, which are never accessed again.
        unsafe { ptr::drop_in_place(built) };
    }
}

// mod tests
