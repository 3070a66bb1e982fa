//! The single reallocation primitive underlying every dynamic array in the crate.

use std::fmt;
use std::error::Error;
use core::alloc::Layout;
use core::ptr::NonNull;
use std::alloc;

use crate::utils;

pub mod raw;

pub use raw::RawArray;

mod tests;


/// Capacity of a dynamic array after its first growth.
pub const MIN_CAPACITY: usize = 8;

/// Next capacity for an array that is out of room
#[inline]
pub fn grow_capacity(capacity: usize) -> usize {
    if capacity < MIN_CAPACITY { MIN_CAPACITY }
    else { capacity * 2 }
}


pub type AllocResult<T> = Result<T, AllocError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// the requested size does not fit in `isize`
    CapacityOverflow,
    /// the allocator could not satisfy the request
    OutOfMemory(Layout),
}

impl Error for AllocError { }

impl fmt::Display for AllocError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow => utils::format_error(fmt, "allocation error", Some("capacity overflow"), None),
            Self::OutOfMemory(layout) => write!(fmt, "allocation error: out of memory allocating {} bytes", layout.size()),
        }
    }
}

/// Terminates the process for an allocation failure that the caller has no way to recover from.
pub fn fatal(error: AllocError) -> ! {
    log::error!("{}", error);
    match error {
        AllocError::OutOfMemory(layout) => alloc::handle_alloc_error(layout),
        AllocError::CapacityOverflow => panic!("capacity overflow"),
    }
}


/// Resizes an array allocation of `T` from `old_capacity` to `new_capacity` elements.
///
/// - `ptr` of `None` means there is no existing allocation.
/// - Contents are preserved up to the smaller of the two capacities.
/// - A `new_capacity` of zero releases the allocation and yields `Ok(None)`.
///
/// On error the original allocation is left untouched and still owned by the caller.
///
/// `ptr`, if present, must have been returned by this function with `old_capacity`.
pub fn reallocate<T>(ptr: Option<NonNull<T>>, old_capacity: usize, new_capacity: usize) -> AllocResult<Option<NonNull<T>>> {
    if new_capacity == 0 {
        if let Some(ptr) = ptr {
            free::<T>(ptr, old_capacity);
        }
        return Ok(None);
    }

    let new_layout = Layout::array::<T>(new_capacity)
        .map_err(|_| AllocError::CapacityOverflow)?;

    // zero-sized elements never touch the allocator
    if new_layout.size() == 0 {
        return Ok(Some(NonNull::dangling()));
    }

    let old_layout = Layout::array::<T>(old_capacity).ok()
        .filter(|layout| layout.size() > 0);

    let raw = match (ptr, old_layout) {
        // SAFETY: ptr was allocated with old_layout, and new_layout.size() is nonzero and does not overflow isize
        (Some(ptr), Some(old_layout)) => unsafe {
            alloc::realloc(ptr.as_ptr().cast::<u8>(), old_layout, new_layout.size())
        },
        // SAFETY: new_layout has nonzero size
        _ => unsafe { alloc::alloc(new_layout) },
    };

    let new_ptr = NonNull::new(raw.cast::<T>())
        .ok_or(AllocError::OutOfMemory(new_layout))?;

    log::debug!("{:#X} allocate {} bytes ({} -> {} elements)",
        new_ptr.as_ptr() as usize, new_layout.size(), old_capacity, new_capacity);

    Ok(Some(new_ptr))
}

fn free<T>(ptr: NonNull<T>, capacity: usize) {
    let layout = match Layout::array::<T>(capacity) {
        Ok(layout) if layout.size() > 0 => layout,
        _ => return,  // nothing was ever allocated for this pointer
    };

    log::debug!("{:#X} free {} bytes", ptr.as_ptr() as usize, layout.size());

    // SAFETY: ptr was allocated by reallocate() with this same layout
    unsafe { alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout) }
}
