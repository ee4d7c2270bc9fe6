//! Ordered associative containers over a single red-black tree engine:
//! unique/multi key-duplication policy crossed with plain/position-indexed
//! augmentation, each as both a keyed-only (set) and keyed-value (map)
//! façade.
//!
//! The engine ([`tree`]) is private; it is reached only through the eight
//! public type aliases below, the shape spec.md §6 names. Each is a
//! parametric type over key, value (for maps), ordering predicate, and
//! allocator, matching the table in that section:
//!
//! | Alias | Unique? | Indexed? | Value? |
//! |---|---|---|---|
//! | [`OrderedSet`] | yes | no | no |
//! | [`PositionedSet`] | yes | yes | no |
//! | [`OrderedMultiSet`] | no | no | no |
//! | [`PositionedMultiSet`] | no | yes | no |
//! | [`OrderedMap`] | yes | no | yes |
//! | [`PositionedMap`] | yes | yes | yes |
//! | [`OrderedMultiMap`] | no | no | yes |
//! | [`PositionedMultiMap`] | no | yes | yes |

pub mod arena;
pub mod comparator;
pub mod containers;
pub mod cursor;
pub mod dup;
pub mod error;
pub mod map;
pub mod node;
pub mod node_handle;
pub mod set;
mod tree;

pub use comparator::{DefaultComparator, FnComparator, KeyComparator};
pub use containers::{InsertResult, OrderedContainer};
pub use cursor::Cursor;
pub use dup::{DupPolicy, Multi, Unique};
pub use error::{Error, Result};
pub use map::Map;
pub use node::{Augment, Indexed, Plain};
pub use node_handle::{Allocator, Global, NodeHandle};
pub use set::Set;

/// Unique keys, no position index (`set`).
pub type OrderedSet<K, C = DefaultComparator> = Set<K, Unique, Plain, C>;
/// Unique keys, with `O(log N)` rank/select (`pset`).
pub type PositionedSet<K, C = DefaultComparator> = Set<K, Unique, Indexed, C>;
/// Duplicate keys allowed, no position index (`multiset`).
pub type OrderedMultiSet<K, C = DefaultComparator> = Set<K, Multi, Plain, C>;
/// Duplicate keys allowed, with `O(log N)` rank/select (`pmultiset`).
pub type PositionedMultiSet<K, C = DefaultComparator> = Set<K, Multi, Indexed, C>;

/// Unique keys, no position index (`map`).
pub type OrderedMap<K, V, C = DefaultComparator> = Map<K, V, Unique, Plain, C>;
/// Unique keys, with `O(log N)` rank/select (`pmap`).
pub type PositionedMap<K, V, C = DefaultComparator> = Map<K, V, Unique, Indexed, C>;
/// Duplicate keys allowed, no position index (`multimap`).
pub type OrderedMultiMap<K, V, C = DefaultComparator> = Map<K, V, Multi, Plain, C>;
/// Duplicate keys allowed, with `O(log N)` rank/select (`pmultimap`).
pub type PositionedMultiMap<K, V, C = DefaultComparator> = Map<K, V, Multi, Indexed, C>;
