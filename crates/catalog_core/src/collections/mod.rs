//! Hand-built containers backing the catalogue indexes.
//!
//! - [`linked_sequence`] - ordered results and hash buckets.
//! - [`hash_index`] - fixed-capacity chained hash table.
//! - [`ordered_set`] - AVL tree with explicit comparators.

pub mod hash_index;
pub mod linked_sequence;
pub mod ordered_set;

pub use hash_index::HashIndex;
pub use linked_sequence::{IndexOutOfRange, LinkedSequence};
pub use ordered_set::{CaseInsensitive, Comparator, NaturalOrder, OrderedSet};
