//! A growable, ordered sequence with checked operations.
//!
//! [`Sequence`] wraps a `Vec` and turns every operation that the standard
//! container would panic on (out-of-range insert, missing value) into a
//! [`SequenceError`]. A failed operation never modifies the sequence.

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("value not found in sequence")]
    ValueNotFound,
}

pub type Result<T> = std::result::Result<T, SequenceError>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence<T> {
    items: Vec<T>,
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Sequence<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(SequenceError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    /// Element at a zero-based position.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;
        Ok(&self.items[index])
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.items[index], value))
    }

    pub fn append(&mut self, value: T) {
        self.items.push(value);
    }

    /// Inserts `value` before `index`. `index == len` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.items.len() {
            return Err(SequenceError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.items.insert(index, value);
        Ok(())
    }

    /// Removes the element at `index`; later elements shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    /// Stable sort under a caller-supplied total order.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(compare);
    }

    /// Moves every element of `other` onto the end of this sequence.
    pub fn flatten(&mut self, other: Sequence<T>) {
        self.items.extend(other.items);
    }

    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    pub fn shrink_to_fit(&mut self) {
        self.items.shrink_to_fit();
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Ord> Sequence<T> {
    /// Sorts into non-decreasing order. Equal elements keep their relative
    /// order.
    pub fn sort(&mut self) {
        self.items.sort();
    }
}

impl<T: PartialEq> Sequence<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }

    /// Position of the first element equal to `value`.
    pub fn position(&self, value: &T) -> Option<usize> {
        self.items.iter().position(|item| item == value)
    }

    pub fn index_of(&self, value: &T) -> Result<usize> {
        self.position(value).ok_or(SequenceError::ValueNotFound)
    }

    /// Removes the first element equal to `value` and returns it.
    pub fn remove(&mut self, value: &T) -> Result<T> {
        let index = self.index_of(value)?;
        Ok(self.items.remove(index))
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T: Clone> From<&[T]> for Sequence<T> {
    fn from(items: &[T]) -> Self {
        Self {
            items: items.to_vec(),
        }
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> AsRef<[T]> for Sequence<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Display> fmt::Display for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.items)
    }
}

/// Writes `[a, b, c]`.
pub(crate) fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(items: &[i64]) -> Sequence<i64> {
        Sequence::from(items)
    }

    #[test]
    fn index_access() {
        let s = seq(&[5, 2, 3, 1, 4]);
        assert_eq!(s.get(2), Ok(&3));
        assert_eq!(s.get(0), Ok(&5));
        assert_eq!(
            s.get(5),
            Err(SequenceError::IndexOutOfRange { index: 5, len: 5 })
        );
    }

    #[test]
    fn append_grows_by_one() {
        let mut s = seq(&[5, 2, 3, 1, 4]);
        s.append(6);
        assert_eq!(s.as_slice(), [5, 2, 3, 1, 4, 6]);
        assert_eq!(s.len(), 6);
    }

    #[test]
    fn sort_then_reverse() {
        let mut s = seq(&[5, 2, 3, 1, 4, 6]);
        s.sort();
        assert_eq!(s.as_slice(), [1, 2, 3, 4, 5, 6]);
        s.reverse();
        assert_eq!(s.as_slice(), [6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn sort_is_stable() {
        let mut s: Sequence<(i64, char)> = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')].into();
        s.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(s.as_slice(), [(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn remove_first_occurrence() {
        let mut s = seq(&[6, 5, 4, 3, 2, 1]);
        assert_eq!(s.remove(&3), Ok(3));
        assert_eq!(s.as_slice(), [6, 5, 4, 2, 1]);

        let mut dup = seq(&[1, 3, 2, 3]);
        dup.remove(&3).unwrap();
        assert_eq!(dup.as_slice(), [1, 2, 3]);
    }

    #[test]
    fn remove_missing_value_leaves_sequence_unchanged() {
        let mut s = seq(&[1, 2]);
        assert_eq!(s.remove(&9), Err(SequenceError::ValueNotFound));
        assert_eq!(s.as_slice(), [1, 2]);
    }

    #[test]
    fn insert_before_index() {
        let mut s = seq(&[6, 5, 4, 2, 1]);
        s.insert(2, 7).unwrap();
        assert_eq!(s.as_slice(), [6, 5, 7, 4, 2, 1]);

        s.insert(6, 0).unwrap();
        assert_eq!(s.as_slice(), [6, 5, 7, 4, 2, 1, 0]);
    }

    #[test]
    fn insert_past_end_fails() {
        let mut s = seq(&[1, 2]);
        assert_eq!(
            s.insert(3, 9),
            Err(SequenceError::IndexOutOfRange { index: 3, len: 2 })
        );
        assert_eq!(s.as_slice(), [1, 2]);
    }

    #[test]
    fn lookup() {
        let s = seq(&[6, 5, 7, 4, 2, 1]);
        assert!(s.contains(&4));
        assert_eq!(s.position(&4), Some(3));
        assert_eq!(s.index_of(&4), Ok(3));
        assert!(!s.contains(&9));
        assert_eq!(s.position(&9), None);
        assert_eq!(s.index_of(&9), Err(SequenceError::ValueNotFound));
    }

    #[test]
    fn delete_and_set() {
        let mut s = seq(&[1, 2, 3]);
        assert_eq!(s.delete(0), Ok(1));
        assert_eq!(s.set(1, 9), Ok(3));
        assert_eq!(s.as_slice(), [2, 9]);
        assert!(s.delete(2).is_err());
        assert!(s.set(2, 0).is_err());
    }

    #[test]
    fn flatten_and_capacity() {
        let mut a = seq(&[1, 2]);
        a.flatten(seq(&[3, 4]));
        assert_eq!(a.as_slice(), [1, 2, 3, 4]);

        a.reserve(100);
        assert!(a.capacity() >= 104);
        a.shrink_to_fit();
        assert!(a.capacity() >= a.len());

        a.clear();
        assert!(a.is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(seq(&[5, 2, 3]).to_string(), "[5, 2, 3]");
        assert_eq!(Sequence::<i64>::new().to_string(), "[]");
    }
}
