//! Fixed-capacity sequence used for every body collection in a scene.
//!
//! The backing storage is allocated once at construction and never grows.
//! Inserting into a full collection hands the item back instead of
//! reallocating, which keeps the per-tick memory footprint constant.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// Returned by [`BoundedVec::try_push`] when the collection is full.
/// Carries the rejected element.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityError<T> {
    pub element: T,
    pub capacity: usize,
}

impl<T> fmt::Display for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "capacity of {} elements reached", self.capacity)
    }
}

impl<T: fmt::Debug> std::error::Error for CapacityError<T> {}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundedVec<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedVec<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Appends `element`, or returns it inside a [`CapacityError`] when full.
    pub fn try_push(&mut self, element: T) -> Result<(), CapacityError<T>> {
        if self.is_full() {
            return Err(CapacityError {
                element,
                capacity: self.capacity,
            });
        }
        self.items.push(element);
        Ok(())
    }

    /// Removes the element at `index` by moving the last element into its
    /// slot. Order is not preserved.
    ///
    /// Panics if `index` is out of bounds.
    pub fn swap_remove(&mut self, index: usize) -> T {
        self.items.swap_remove(index)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Deref for BoundedVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> DerefMut for BoundedVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<'a, T> IntoIterator for &'a BoundedVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
