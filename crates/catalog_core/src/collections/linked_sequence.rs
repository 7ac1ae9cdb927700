//! Singly linked sequence used for result lists and hash buckets.
//!
//! # Responsibility
//! - Keep elements in insertion order.
//! - Provide equality-based and predicate-based removal scanning from the head.
//!
//! # Invariants
//! - `len` always equals the number of reachable nodes.
//! - Dropping a sequence never recurses through its nodes.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::iter::FromIterator;
use std::ops::Index;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

/// Positional access outside `[0, len)`.
///
/// This is a caller contract violation, not a lookup miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

impl Display for IndexOutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "index {} out of range for sequence of length {}",
            self.index, self.len
        )
    }
}

impl Error for IndexOutOfRange {}

/// Ordered container backed by boxed nodes.
pub struct LinkedSequence<T> {
    head: Link<T>,
    len: usize,
}

impl<T> LinkedSequence<T> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Adds `value` after the current last element.
    pub fn append(&mut self, value: T) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { value, next: None }));
        self.len += 1;
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    /// - Returns [`IndexOutOfRange`] when `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T, IndexOutOfRange> {
        self.iter().nth(index).ok_or(IndexOutOfRange {
            index,
            len: self.len,
        })
    }

    pub fn first(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    /// Removes and returns the first element satisfying `predicate`.
    pub fn remove_first_where<F>(&mut self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = &mut self.head;
        loop {
            let matched = match cursor.as_deref() {
                None => return None,
                Some(node) => predicate(&node.value),
            };

            if matched {
                let mut node = cursor.take()?;
                *cursor = node.next.take();
                self.len -= 1;
                return Some(node.value);
            }

            match cursor {
                Some(node) => cursor = &mut node.next,
                None => return None,
            }
        }
    }

    /// Removes the first element at the head.
    pub fn pop_front(&mut self) -> Option<T> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        self.len -= 1;
        Some(node.value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
            remaining: self.len,
        }
    }
}

impl<T: PartialEq> LinkedSequence<T> {
    /// Removes the first element equal to `value`.
    ///
    /// Returns whether a match was found.
    pub fn remove_first_matching(&mut self, value: &T) -> bool {
        self.remove_first_where(|candidate| candidate == value)
            .is_some()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|candidate| candidate == value)
    }

    /// Appends `value` unless an equal element is present.
    ///
    /// Duplicate check and tail search share one walk.
    pub fn append_unique(&mut self, value: T) -> bool {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            if node.value == value {
                return false;
            }
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { value, next: None }));
        self.len += 1;
        true
    }
}

impl<T> Default for LinkedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedSequence<T> {
    fn drop(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<T> Extend<T> for LinkedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        for value in iter {
            let node = cursor.insert(Box::new(Node { value, next: None }));
            cursor = &mut node.next;
            self.len += 1;
        }
    }
}

impl<T> FromIterator<T> for LinkedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sequence = Self::new();
        sequence.extend(iter);
        sequence
    }
}

impl<T: Clone> Clone for LinkedSequence<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for LinkedSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedSequence<T> {}

impl<T: Debug> Debug for LinkedSequence<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<usize> for LinkedSequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Borrowing iterator over a [`LinkedSequence`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Mutable iterator over a [`LinkedSequence`].
pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            self.remaining -= 1;
            &mut node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// Owning iterator over a [`LinkedSequence`].
pub struct IntoIter<T>(LinkedSequence<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedSequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedSequence<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
