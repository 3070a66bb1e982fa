use std::fmt;
use std::slice;
use core::ptr::NonNull;

use crate::memory::{self, AllocResult};


/// An owned allocation of `capacity` slots of `T`.
///
/// Tracks no length of its own; the containers built on top decide which slots are live.
/// Restricted to `Copy` so that no element ever needs dropping.
pub struct RawArray<T> where T: Copy {
    ptr: Option<NonNull<T>>,
    capacity: usize,
}

impl<T> RawArray<T> where T: Copy {
    pub const fn new() -> Self {
        Self { ptr: None, capacity: 0 }
    }

    #[inline]
    pub fn capacity(&self) -> usize { self.capacity }

    #[inline]
    pub fn is_allocated(&self) -> bool { self.ptr.is_some() }

    /// Resizes the allocation, keeping existing slots up to the new capacity.
    /// Leaves the array unchanged on failure.
    pub fn try_resize(&mut self, new_capacity: usize) -> AllocResult<()> {
        self.ptr = memory::reallocate(self.ptr, self.capacity, new_capacity)?;
        self.capacity = new_capacity;
        Ok(())
    }

    /// Releases the allocation. Calling this on an empty array does nothing.
    pub fn free(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // releasing never fails
            let _ = memory::reallocate(Some(ptr), self.capacity, 0);
        }
        self.capacity = 0;
    }

    /// # Safety
    /// `index` must be less than `capacity()`.
    #[inline]
    pub unsafe fn write(&mut self, index: usize, value: T) {
        debug_assert!(index < self.capacity);
        if let Some(ptr) = self.ptr {
            ptr.as_ptr().add(index).write(value);
        }
    }

    /// # Safety
    /// `len` must not exceed `capacity()`, and every slot in `0..len` must have been written.
    #[inline]
    pub unsafe fn as_slice(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.capacity);
        match self.ptr {
            Some(ptr) => slice::from_raw_parts(ptr.as_ptr(), len),
            None => &[],
        }
    }
}

impl<T> Default for RawArray<T> where T: Copy {
    fn default() -> Self { Self::new() }
}

impl<T> Drop for RawArray<T> where T: Copy {
    fn drop(&mut self) {
        self.free()
    }
}

impl<T> fmt::Debug for RawArray<T> where T: Copy {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "RawArray({:?}, capacity: {})", self.ptr, self.capacity)
    }
}
