use std::fmt;

use crate::language::Value;
use crate::memory::{self, RawArray, AllocResult};


/// Append-only pool of constant values, addressed by position.
#[derive(Default)]
pub struct ValueArray {
    values: RawArray<Value>,
    count: usize,
}

impl ValueArray {
    pub const fn new() -> Self {
        Self {
            values: RawArray::new(),
            count: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize { self.count }

    #[inline]
    pub fn is_empty(&self) -> bool { self.count == 0 }

    #[inline]
    pub fn capacity(&self) -> usize { self.values.capacity() }

    pub fn as_slice(&self) -> &[Value] {
        // SAFETY: every slot below count has been written by try_push()
        unsafe { self.values.as_slice(self.count) }
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.as_slice().get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item=&Value> {
        self.as_slice().iter()
    }

    /// Appends `value`, returning the index it was stored at.
    pub fn try_push(&mut self, value: Value) -> AllocResult<usize> {
        if self.count + 1 > self.capacity() {
            let capacity = memory::grow_capacity(self.capacity());
            log::debug!("grow value array {} -> {}", self.capacity(), capacity);
            self.values.try_resize(capacity)?;
        }

        // SAFETY: count < capacity after growing
        unsafe { self.values.write(self.count, value) }
        self.count += 1;

        log::trace!("write value {} at [{}]", value, self.count - 1);
        Ok(self.count - 1)
    }

    /// Like [`try_push()`](Self::try_push) but allocation failure terminates the process.
    pub fn push(&mut self, value: Value) -> usize {
        self.try_push(value)
            .unwrap_or_else(|error| memory::fatal(error))
    }

    /// Releases the backing storage and resets to the empty state.
    pub fn free(&mut self) {
        log::debug!("free value array ({} values)", self.count);
        self.values.free();
        self.count = 0;
    }
}

impl fmt::Debug for ValueArray {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_list().entries(self.iter()).finish()
    }
}
