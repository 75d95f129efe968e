//! Growable stack container for the setc expression engine
//!
//! `GrowableStack<T>` is the one data structure every other part of the
//! engine is built on: the operator stack, the operand stack and the
//! element storage of each set value are all instances of it.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use std::fmt;
use thiserror::Error;

/// Factor applied to the required size when the buffer has to grow.
pub const GROWTH_FACTOR: usize = 2;

/// Raised when popping from an empty stack.
///
/// The evaluator only pops what it has previously pushed, so this must never
/// occur for a well-formed expression. It is surfaced as an error instead of
/// terminating the process so callers can report it as an internal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pop from an empty stack")]
pub struct StackUnderflow;

/// A generic stack with amortized doubling growth.
///
/// The logical capacity is tracked explicitly: when a push would exceed it,
/// the capacity becomes `GROWTH_FACTOR * (size + 1)` and the live elements are
/// moved into the larger buffer. Popping never shrinks the buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct GrowableStack<T> {
    /// Live elements; `buffer[size - 1]` is the top
    buffer: Vec<T>,
    /// Logical capacity, always `>= buffer.len()`
    capacity: usize,
}

impl<T> GrowableStack<T> {
    /// Create an empty stack without allocating
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            capacity: 0,
        }
    }

    /// Create an empty stack with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Push `value` on top, growing the buffer if it is full.
    pub fn push(&mut self, value: T) {
        self.reserve_for(self.buffer.len() + 1);
        self.buffer.push(value);
    }

    /// Remove and return the top element.
    pub fn pop(&mut self) -> Result<T, StackUnderflow> {
        self.buffer.pop().ok_or(StackUnderflow)
    }

    /// Borrow the top element, or `None` when the stack is empty
    pub fn top(&self) -> Option<&T> {
        self.buffer.last()
    }

    /// Number of live elements
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if there are no live elements
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Logical capacity of the backing buffer
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Elements from bottom to top
    pub fn as_slice(&self) -> &[T] {
        &self.buffer
    }

    /// Returns true if an element equal to `value` is on the stack
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.buffer.contains(value)
    }

    /// Sort all elements in place, ascending
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.buffer.sort_unstable();
    }

    fn reserve_for(&mut self, required: usize) {
        if required <= self.capacity {
            return;
        }
        let new_capacity = required * GROWTH_FACTOR;
        let mut grown = Vec::with_capacity(new_capacity);
        grown.append(&mut self.buffer);
        self.buffer = grown;
        self.capacity = new_capacity;
    }
}

impl<T> Default for GrowableStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowableStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.buffer.iter()).finish()
    }
}

impl<T> FromIterator<T> for GrowableStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        stack.extend(iter);
        stack
    }
}

impl<T> Extend<T> for GrowableStack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> IntoIterator for GrowableStack<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buffer.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a GrowableStack<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buffer.iter()
    }
}
