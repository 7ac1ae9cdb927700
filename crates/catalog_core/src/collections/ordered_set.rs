//! AVL-balanced ordered set with pluggable comparators.
//!
//! # Responsibility
//! - Keep unique elements sorted by an explicit [`Comparator`].
//! - Provide O(log n) insert/find/remove and O(n) in-order enumeration.
//!
//! # Invariants
//! - No two elements compare `Equal`.
//! - Every node caches `1 + max(height(left), height(right))`.
//! - Every node's balance factor `height(left) - height(right)` is in `-1..=1`.

use crate::collections::linked_sequence::LinkedSequence;
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};

/// Total order used by an [`OrderedSet`].
pub trait Comparator<T: ?Sized> {
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

/// Orders elements by their own `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// Orders strings by lowercase code points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseInsensitive;

impl<T: AsRef<str> + ?Sized> Comparator<T> for CaseInsensitive {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        compare_ignore_case(left.as_ref(), right.as_ref())
    }
}

/// Compares two strings ignoring case, code point by code point.
pub fn compare_ignore_case(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase))
}

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
    height: u32,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            height: 1,
        }
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance_factor(&self) -> i32 {
        height(&self.left) as i32 - height(&self.right) as i32
    }
}

/// Self-balancing binary search tree holding unique elements.
pub struct OrderedSet<T, C = NaturalOrder> {
    root: Link<T>,
    len: usize,
    comparator: C,
}

impl<T: Ord> OrderedSet<T> {
    /// Creates an empty set ordered by `T`'s own `Ord`.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C: Comparator<T>> OrderedSet<T, C> {
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            len: 0,
            comparator,
        }
    }

    /// Inserts `value` unless an equal element is already present.
    ///
    /// Returns whether the set changed.
    pub fn insert(&mut self, value: T) -> bool {
        let mut inserted = false;
        let root = insert_node(self.root.take(), value, &self.comparator, &mut inserted);
        self.root = Some(root);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Removes the element equal to `target` and returns it.
    pub fn remove(&mut self, target: &T) -> Option<T> {
        let mut removed = None;
        self.root = remove_node(self.root.take(), target, &self.comparator, &mut removed);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn contains(&self, target: &T) -> bool {
        self.find(target).is_some()
    }

    /// Returns the stored element equal to `target`.
    pub fn find(&self, target: &T) -> Option<&T> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            match self.comparator.compare(target, &node.value) {
                Ordering::Less => cursor = node.left.as_deref(),
                Ordering::Greater => cursor = node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Returns the stored element equal to `target` for in-place updates.
    ///
    /// Callers must not change the fields the comparator reads.
    pub fn find_mut(&mut self, target: &T) -> Option<&mut T> {
        let comparator = &self.comparator;
        let mut cursor = self.root.as_deref_mut();
        while let Some(node) = cursor {
            match comparator.compare(target, &node.value) {
                Ordering::Less => cursor = node.left.as_deref_mut(),
                Ordering::Greater => cursor = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Lists every element in ascending comparator order.
    pub fn in_order(&self) -> LinkedSequence<&T> {
        self.iter().collect()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Checks cached heights and the balance factor of every node.
    pub fn is_balanced(&self) -> bool {
        checked_height(&self.root).is_some()
    }
}

impl<T, C> OrderedSet<T, C> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the whole tree; `0` when empty.
    pub fn height(&self) -> u32 {
        height(&self.root)
    }
}

impl<T, C: Comparator<T> + Default> Default for OrderedSet<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Debug, C: Comparator<T>> Debug for OrderedSet<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// In-order iterator over an [`OrderedSet`].
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut link: Option<&'a Node<T>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

fn height<T>(link: &Link<T>) -> u32 {
    link.as_ref().map_or(0, |node| node.height)
}

fn balance_factor_of<T>(link: &Link<T>) -> i32 {
    link.as_ref().map_or(0, |node| node.balance_factor())
}

fn insert_node<T, C: Comparator<T>>(
    link: Link<T>,
    value: T,
    comparator: &C,
    inserted: &mut bool,
) -> Box<Node<T>> {
    let Some(mut node) = link else {
        *inserted = true;
        return Box::new(Node::leaf(value));
    };

    match comparator.compare(&value, &node.value) {
        Ordering::Less => {
            node.left = Some(insert_node(node.left.take(), value, comparator, inserted));
        }
        Ordering::Greater => {
            node.right = Some(insert_node(node.right.take(), value, comparator, inserted));
        }
        Ordering::Equal => return node,
    }

    rebalance(node)
}

fn remove_node<T, C: Comparator<T>>(
    link: Link<T>,
    target: &T,
    comparator: &C,
    removed: &mut Option<T>,
) -> Link<T> {
    let mut node = link?;

    match comparator.compare(target, &node.value) {
        Ordering::Less => {
            node.left = remove_node(node.left.take(), target, comparator, removed);
        }
        Ordering::Greater => {
            node.right = remove_node(node.right.take(), target, comparator, removed);
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => {
                *removed = Some(node.value);
                return None;
            }
            (Some(child), None) | (None, Some(child)) => {
                *removed = Some(node.value);
                return Some(child);
            }
            (Some(left), Some(right)) => {
                let (rest, successor) = take_min(right);
                node.left = Some(left);
                node.right = rest;
                *removed = Some(std::mem::replace(&mut node.value, successor));
            }
        },
    }

    Some(rebalance(node))
}

/// Detaches the smallest element of a subtree, rebalancing on the way up.
fn take_min<T>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (rest, node.value)
        }
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}

/// Restores the AVL invariant at `node` after one of its subtrees changed.
///
/// LL: rotate right. LR: rotate the left child left, then rotate right.
/// RR: rotate left. RL: rotate the right child right, then rotate left.
fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update_height();
    let factor = node.balance_factor();

    if factor > 1 {
        if balance_factor_of(&node.left) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if factor < -1 {
        if balance_factor_of(&node.right) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

fn rotate_right<T>(mut top: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = top.left.take() else {
        return top;
    };
    top.left = pivot.right.take();
    top.update_height();
    pivot.right = Some(top);
    pivot.update_height();
    pivot
}

fn rotate_left<T>(mut top: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = top.right.take() else {
        return top;
    };
    top.right = pivot.left.take();
    top.update_height();
    pivot.left = Some(top);
    pivot.update_height();
    pivot
}

fn checked_height<T>(link: &Link<T>) -> Option<u32> {
    let Some(node) = link else {
        return Some(0);
    };
    let left = checked_height(&node.left)?;
    let right = checked_height(&node.right)?;
    if left.abs_diff(right) > 1 {
        return None;
    }
    let expected = 1 + left.max(right);
    (expected == node.height).then_some(expected)
}

#[cfg(test)]
mod tests {
    use super::{compare_ignore_case, CaseInsensitive, Comparator, OrderedSet};
    use proptest::prelude::*;
    use std::cmp::Ordering;
    use std::collections::BTreeSet;

    #[derive(Debug, Clone)]
    enum SetOp {
        Insert(u16),
        Remove(u16),
    }

    fn set_op() -> impl Strategy<Value = SetOp> {
        prop_oneof![
            2 => (0_u16..200).prop_map(SetOp::Insert),
            1 => (0_u16..200).prop_map(SetOp::Remove),
        ]
    }

    fn values(set: &OrderedSet<u32>) -> Vec<u32> {
        set.iter().copied().collect()
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut set = OrderedSet::new();
        for value in 1..=1024_u32 {
            assert!(set.insert(value));
            assert!(set.is_balanced(), "unbalanced after inserting {value}");
        }
        assert_eq!(set.len(), 1024);
        assert_eq!(set.height(), 11);
    }

    #[test]
    fn insert_is_idempotent() {
        let mut set = OrderedSet::new();
        assert!(set.insert(5_u32));
        assert!(!set.insert(5));
        assert_eq!(set.len(), 1);
        assert_eq!(values(&set), vec![5]);
    }

    #[test]
    fn all_four_rotation_shapes_produce_sorted_balanced_trees() {
        for order in [[3, 2, 1], [1, 2, 3], [3, 1, 2], [1, 3, 2]] {
            let mut set = OrderedSet::new();
            for value in order {
                set.insert(value);
            }
            assert!(set.is_balanced(), "shape {order:?}");
            assert_eq!(set.height(), 2, "shape {order:?}");
            assert_eq!(values(&set), vec![1, 2, 3]);
        }
    }

    #[test]
    fn remove_handles_leaf_single_child_and_two_children() {
        let mut set = OrderedSet::new();
        for value in [50_u32, 30, 70, 20, 40, 60, 80, 10] {
            set.insert(value);
        }

        assert_eq!(set.remove(&10), Some(10));
        assert_eq!(set.remove(&20), Some(20));
        assert_eq!(set.remove(&50), Some(50));
        assert_eq!(set.remove(&99), None);

        assert!(set.is_balanced());
        assert_eq!(values(&set), vec![30, 40, 60, 70, 80]);
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn remove_until_empty() {
        let mut set = OrderedSet::new();
        for value in 0..64_u32 {
            set.insert(value);
        }
        for value in (0..64_u32).rev() {
            assert_eq!(set.remove(&value), Some(value));
            assert!(set.is_balanced());
        }
        assert!(set.is_empty());
        assert_eq!(set.height(), 0);
        assert!(set.in_order().is_empty());
    }

    #[test]
    fn case_insensitive_comparator_merges_spellings() {
        let mut set = OrderedSet::with_comparator(CaseInsensitive);
        assert!(set.insert("Loscher, Iván".to_string()));
        assert!(!set.insert("LOSCHER, IVÁN".to_string()));
        assert!(set.insert("carmona, Rhadamés".to_string()));

        assert_eq!(
            set.find(&"loscher, iván".to_string()).map(String::as_str),
            Some("Loscher, Iván")
        );
        assert_eq!(
            set.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["carmona, Rhadamés", "Loscher, Iván"]
        );
    }

    #[test]
    fn compare_ignore_case_orders_by_lowercase() {
        assert_eq!(compare_ignore_case("Alan", "alan"), Ordering::Equal);
        assert_eq!(compare_ignore_case("ada", "Alan"), Ordering::Less);
        assert_eq!(compare_ignore_case("Zed", "abc"), Ordering::Greater);
    }

    #[test]
    fn find_mut_allows_updating_non_key_data() {
        let mut set = OrderedSet::with_comparator(ByKey);
        set.insert(Tagged { key: 1, label: "one" });
        set.insert(Tagged { key: 2, label: "two" });

        let target = Tagged { key: 2, label: "" };
        if let Some(entry) = set.find_mut(&target) {
            entry.label = "deux";
        }
        assert_eq!(set.find(&target).map(|entry| entry.label), Some("deux"));
    }

    struct Tagged {
        key: u32,
        label: &'static str,
    }

    struct ByKey;

    impl Comparator<Tagged> for ByKey {
        fn compare(&self, left: &Tagged, right: &Tagged) -> Ordering {
            left.key.cmp(&right.key)
        }
    }

    proptest! {
        #[test]
        fn arbitrary_inserts_and_removes_match_btreeset(
            ops in prop::collection::vec(set_op(), 0..400)
        ) {
            let mut set = OrderedSet::new();
            let mut mirror = BTreeSet::new();
            for op in ops {
                match op {
                    SetOp::Insert(value) => {
                        prop_assert_eq!(set.insert(value), mirror.insert(value));
                    }
                    SetOp::Remove(value) => {
                        prop_assert_eq!(set.remove(&value), mirror.take(&value));
                    }
                }
                prop_assert!(set.is_balanced());
            }
            prop_assert_eq!(
                set.iter().copied().collect::<Vec<_>>(),
                mirror.iter().copied().collect::<Vec<_>>()
            );
            prop_assert_eq!(set.len(), mirror.len());
        }
    }
}
