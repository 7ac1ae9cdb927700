//! Fixed-capacity chained hash table.
//!
//! # Responsibility
//! - Map string-like keys to values with average O(1) lookup.
//! - Resolve collisions by chaining entries in per-bucket [`LinkedSequence`]s.
//!
//! # Invariants
//! - A key appears at most once across all buckets.
//! - `len` equals the total number of chained entries.
//! - Bucket count is fixed at construction; the table never rehashes.
//!
//! Worst case (every key in one bucket) degrades to O(n) per operation.

use crate::collections::linked_sequence::LinkedSequence;
use std::borrow::Borrow;

const HASH_MULTIPLIER: i64 = 31;

struct Entry<K, V> {
    key: K,
    value: V,
}

/// Chained hash table keyed by anything with a canonical string form.
pub struct HashIndex<K, V> {
    buckets: Vec<LinkedSequence<Entry<K, V>>>,
    len: usize,
}

impl<K, V> HashIndex<K, V>
where
    K: AsRef<str> + Eq,
{
    /// Creates a table with `bucket_count` buckets (at least one).
    pub fn with_buckets(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, LinkedSequence::new);
        Self { buckets, len: 0 }
    }

    /// Inserts a new key/value pair.
    ///
    /// Returns `false` and leaves the table unchanged when `key` already exists.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let slot = self.slot_of(key.as_ref());
        let bucket = &mut self.buckets[slot];
        if bucket.iter().any(|entry| entry.key == key) {
            return false;
        }
        bucket.append(Entry { key, value });
        self.len += 1;
        true
    }

    pub fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: AsRef<str> + Eq + ?Sized,
    {
        let slot = self.slot_of(key.as_ref());
        self.buckets[slot]
            .iter()
            .find(|entry| key_matches(&entry.key, key))
            .map(|entry| &entry.value)
    }

    pub fn lookup_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: AsRef<str> + Eq + ?Sized,
    {
        let slot = self.slot_of(key.as_ref());
        self.buckets[slot]
            .iter_mut()
            .find(|entry| key_matches(&entry.key, key))
            .map(|entry| &mut entry.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: AsRef<str> + Eq + ?Sized,
    {
        self.lookup(key).is_some()
    }

    /// Removes `key` and returns its value, or `None` when it was absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: AsRef<str> + Eq + ?Sized,
    {
        let slot = self.slot_of(key.as_ref());
        let removed =
            self.buckets[slot].remove_first_where(|entry| key_matches(&entry.key, key))?;
        self.len -= 1;
        Some(removed.value)
    }

    /// Lists every key in bucket-then-insertion order (not sorted).
    pub fn all_keys(&self) -> LinkedSequence<&K> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Iterates entries in bucket-then-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|entry| (&entry.key, &entry.value)))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Length of the longest collision chain.
    pub fn longest_chain(&self) -> usize {
        self.buckets
            .iter()
            .map(LinkedSequence::len)
            .max()
            .unwrap_or(0)
    }

    fn slot_of(&self, key: &str) -> usize {
        bucket_for(key, self.buckets.len())
    }
}

fn key_matches<K, Q>(stored: &K, target: &Q) -> bool
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    <K as Borrow<Q>>::borrow(stored) == target
}

/// Polynomial (Horner) string hash reduced to a bucket index.
///
/// `hash = hash * 31 + codepoint` with wrapping 64-bit arithmetic, then the
/// absolute value modulo `bucket_count`.
pub fn bucket_for(key: &str, bucket_count: usize) -> usize {
    let hash = key.chars().fold(0_i64, |hash, ch| {
        hash.wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(i64::from(u32::from(ch)))
    });
    (hash.unsigned_abs() % bucket_count.max(1) as u64) as usize
}
