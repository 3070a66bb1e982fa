#![cfg(test)]

use core::ptr::NonNull;
use crate::memory::{self, RawArray, AllocError, grow_capacity, MIN_CAPACITY};


#[test]
fn grow_capacity_follows_doubling_schedule() {
    assert_eq!(grow_capacity(0), MIN_CAPACITY);
    assert_eq!(grow_capacity(8), 16);
    assert_eq!(grow_capacity(16), 32);
    assert_eq!(grow_capacity(32), 64);

    let mut capacity = 0;
    let mut visited = vec![ capacity ];
    for _ in 0..5 {
        capacity = grow_capacity(capacity);
        visited.push(capacity);
    }
    assert_eq!(visited, [0, 8, 16, 32, 64, 128]);
}

#[test_log::test]
fn reallocate_preserves_contents() {
    let ptr = memory::reallocate::<u32>(None, 0, 8).unwrap().unwrap();
    unsafe {
        for i in 0..8 {
            ptr.as_ptr().add(i).write(i as u32 * 10);
        }
    }

    let ptr = memory::reallocate(Some(ptr), 8, 16).unwrap().unwrap();
    let contents = unsafe { std::slice::from_raw_parts(ptr.as_ptr(), 8) };
    assert_eq!(contents, &[0, 10, 20, 30, 40, 50, 60, 70]);

    // shrinking keeps the prefix
    let ptr = memory::reallocate(Some(ptr), 16, 4).unwrap().unwrap();
    let contents = unsafe { std::slice::from_raw_parts(ptr.as_ptr(), 4) };
    assert_eq!(contents, &[0, 10, 20, 30]);

    let released = memory::reallocate(Some(ptr), 4, 0).unwrap();
    assert!(released.is_none());
}

#[test]
fn reallocate_to_zero_without_allocation() {
    let result = memory::reallocate::<f64>(None, 0, 0);
    assert_eq!(result, Ok(None));
}

#[test]
fn reallocate_rejects_overflowing_capacity() {
    let result = memory::reallocate::<u64>(None, 0, usize::MAX);
    assert_eq!(result, Err(AllocError::CapacityOverflow));
}

#[test]
fn reallocate_zero_sized_elements() {
    let ptr = memory::reallocate::<()>(None, 0, 8).unwrap();
    assert_eq!(ptr, Some(NonNull::dangling()));
    assert_eq!(memory::reallocate(ptr, 8, 0), Ok(None));
}

#[test]
fn raw_array_resize_and_free() {
    let mut array = RawArray::<u8>::new();
    assert_eq!(array.capacity(), 0);
    assert!(!array.is_allocated());

    array.try_resize(8).unwrap();
    assert_eq!(array.capacity(), 8);
    assert!(array.is_allocated());

    unsafe {
        array.write(0, 0xAB);
        array.write(7, 0xCD);
    }
    array.try_resize(16).unwrap();
    unsafe {
        let contents = array.as_slice(8);
        assert_eq!(contents[0], 0xAB);
        assert_eq!(contents[7], 0xCD);
    }

    array.free();
    assert_eq!(array.capacity(), 0);
    assert!(!array.is_allocated());

    // already empty
    array.free();
    assert_eq!(array.capacity(), 0);
    assert!(unsafe { array.as_slice(0) }.is_empty());
}

#[test]
fn raw_array_failed_resize_leaves_array_unchanged() {
    let mut array = RawArray::<u64>::new();
    array.try_resize(8).unwrap();

    let result = array.try_resize(usize::MAX);
    assert_eq!(result, Err(AllocError::CapacityOverflow));
    assert_eq!(array.capacity(), 8);
    assert!(array.is_allocated());
}

#[test]
fn alloc_error_display() {
    assert_eq!(AllocError::CapacityOverflow.to_string(), "allocation error: capacity overflow");

    let layout = core::alloc::Layout::array::<u8>(64).unwrap();
    assert_eq!(AllocError::OutOfMemory(layout).to_string(), "allocation error: out of memory allocating 64 bytes");
}
