//! Fixed-capacity array stored inline.

use std::fmt;

use thiserror::Error;

pub const MAX_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FixedArrayError {
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("capacity {capacity} exceeded: {requested} elements requested")]
    CapacityExceeded { capacity: usize, requested: usize },
}

pub type Result<T> = std::result::Result<T, FixedArrayError>;

/// An array of at most `N` elements that never reallocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedArray<T, const N: usize = MAX_CAPACITY> {
    slots: [T; N],
    len: usize,
}

pub type StaticIntArray = FixedArray<i32>;

impl<T: Copy + Default, const N: usize> Default for FixedArray<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default, const N: usize> FixedArray<T, N> {
    pub fn new() -> Self {
        Self {
            slots: [T::default(); N],
            len: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn as_slice(&self) -> &[T] {
        &self.slots[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn get(&self, index: usize) -> Result<T> {
        self.as_slice()
            .get(index)
            .copied()
            .ok_or(FixedArrayError::IndexOutOfRange {
                index,
                len: self.len,
            })
    }

    fn ensure_room(&self, additional: usize) -> Result<()> {
        let requested = self.len + additional;
        if requested > N {
            return Err(FixedArrayError::CapacityExceeded {
                capacity: N,
                requested,
            });
        }
        Ok(())
    }

    /// Inserts `value` before `index`, shifting later elements up.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(FixedArrayError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.ensure_room(1)?;

        self.slots.copy_within(index..self.len, index + 1);
        self.slots[index] = value;
        self.len += 1;
        Ok(())
    }

    pub fn push(&mut self, value: T) -> Result<()> {
        self.insert(self.len, value)
    }

    /// Removes the element at `index`, shifting later elements down.
    pub fn delete(&mut self, index: usize) -> Result<T> {
        let value = self.get(index)?;
        self.slots.copy_within(index + 1..self.len, index);
        self.len -= 1;
        Ok(value)
    }

    /// Appends every element of `other`. Fails without modifying `self` when
    /// the combined length would exceed `N`.
    pub fn flatten(&mut self, other: &FixedArray<T, N>) -> Result<()> {
        self.ensure_room(other.len)?;
        self.slots[self.len..self.len + other.len].copy_from_slice(other.as_slice());
        self.len += other.len;
        Ok(())
    }
}

impl<T: fmt::Display + Copy + Default, const N: usize> fmt::Display for FixedArray<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::sequence::write_list(f, self.as_slice())
    }
}
