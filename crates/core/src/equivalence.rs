// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use std::cmp::Ordering;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

/// Key-equivalence strategy shared by grouping, set algebra, joins and
/// keyed aggregation.
///
/// A strategy manufactures the keyed containers an operator buffers into.
/// Both implementations preserve **first-occurrence order**: iterating a
/// map or converting it into entries yields keys in the order they were
/// first inserted, regardless of the internal probe structure.
pub trait Equivalence<K>: Clone {
	type Set: KeySet<K>;
	type Map<V>: KeyMap<K, V>;

	fn new_set(&self) -> Self::Set;
	fn new_map<V>(&self) -> Self::Map<V>;
}

/// Membership structure over keys.
pub trait KeySet<K> {
	/// Insert a key. Returns `true` if the key was not present before.
	fn insert(&mut self, key: K) -> bool;

	fn contains(&self, key: &K) -> bool;

	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Key-to-value association preserving first-occurrence key order.
pub trait KeyMap<K, V> {
	/// Look up the slot for `key`, inserting `init()` if absent. The key
	/// is consumed either way.
	fn get_or_insert_with(&mut self, key: K, init: impl FnOnce() -> V) -> &mut V;

	fn get(&self, key: &K) -> Option<&V>;

	/// Consume the map, yielding `(key, value)` entries in
	/// first-occurrence order.
	fn into_entries(self) -> Vec<(K, V)>;

	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Default strategy: the key type's own hash/equality capability.
///
/// Backed by `indexmap`, which keeps insertion order natively, so the
/// first-occurrence guarantee costs nothing extra. Amortized O(1) insert
/// and probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct Natural;

impl<K> Equivalence<K> for Natural
where
	K: Hash + Eq,
{
	type Set = IndexSet<K>;
	type Map<V> = IndexMap<K, V>;

	fn new_set(&self) -> Self::Set {
		IndexSet::new()
	}

	fn new_map<V>(&self) -> Self::Map<V> {
		IndexMap::new()
	}
}

impl<K> KeySet<K> for IndexSet<K>
where
	K: Hash + Eq,
{
	fn insert(&mut self, key: K) -> bool {
		IndexSet::insert(self, key)
	}

	fn contains(&self, key: &K) -> bool {
		IndexSet::contains(self, key)
	}

	fn len(&self) -> usize {
		IndexSet::len(self)
	}
}

impl<K, V> KeyMap<K, V> for IndexMap<K, V>
where
	K: Hash + Eq,
{
	fn get_or_insert_with(&mut self, key: K, init: impl FnOnce() -> V) -> &mut V {
		self.entry(key).or_insert_with(init)
	}

	fn get(&self, key: &K) -> Option<&V> {
		IndexMap::get(self, key)
	}

	fn into_entries(self) -> Vec<(K, V)> {
		self.into_iter().collect()
	}

	fn len(&self) -> usize {
		IndexMap::len(self)
	}
}

/// Strategy defined by an explicit comparator; keys need no hash or
/// equality capability of their own.
///
/// Entries are stored in insertion order next to a probe index kept
/// sorted under the comparator, so membership tests are O(log k) while
/// emission order stays first-occurrence.
#[derive(Debug, Clone)]
pub struct ByComparator<C> {
	compare: C,
}

impl<C> ByComparator<C> {
	pub fn new(compare: C) -> Self {
		Self {
			compare,
		}
	}
}

impl<K, C> Equivalence<K> for ByComparator<C>
where
	C: Fn(&K, &K) -> Ordering + Clone,
{
	type Set = OrderedSet<K, C>;
	type Map<V> = OrderedMap<K, V, C>;

	fn new_set(&self) -> Self::Set {
		OrderedSet {
			inner: OrderedMap::new(self.compare.clone()),
		}
	}

	fn new_map<V>(&self) -> Self::Map<V> {
		OrderedMap::new(self.compare.clone())
	}
}

pub struct OrderedMap<K, V, C> {
	compare: C,
	entries: Vec<(K, V)>,
	// Indices into `entries`, sorted under `compare`.
	probe: Vec<usize>,
}

impl<K, V, C> OrderedMap<K, V, C>
where
	C: Fn(&K, &K) -> Ordering,
{
	fn new(compare: C) -> Self {
		Self {
			compare,
			entries: Vec::new(),
			probe: Vec::new(),
		}
	}

	fn probe_position(&self, key: &K) -> std::result::Result<usize, usize> {
		self.probe.binary_search_by(|&idx| (self.compare)(&self.entries[idx].0, key))
	}
}

impl<K, V, C> KeyMap<K, V> for OrderedMap<K, V, C>
where
	C: Fn(&K, &K) -> Ordering,
{
	fn get_or_insert_with(&mut self, key: K, init: impl FnOnce() -> V) -> &mut V {
		match self.probe_position(&key) {
			Ok(pos) => {
				let idx = self.probe[pos];
				&mut self.entries[idx].1
			}
			Err(pos) => {
				let idx = self.entries.len();
				self.entries.push((key, init()));
				self.probe.insert(pos, idx);
				&mut self.entries[idx].1
			}
		}
	}

	fn get(&self, key: &K) -> Option<&V> {
		self.probe_position(key).ok().map(|pos| &self.entries[self.probe[pos]].1)
	}

	fn into_entries(self) -> Vec<(K, V)> {
		self.entries
	}

	fn len(&self) -> usize {
		self.entries.len()
	}
}

pub struct OrderedSet<K, C> {
	inner: OrderedMap<K, (), C>,
}

impl<K, C> KeySet<K> for OrderedSet<K, C>
where
	C: Fn(&K, &K) -> Ordering,
{
	fn insert(&mut self, key: K) -> bool {
		let before = self.inner.len();
		self.inner.get_or_insert_with(key, || ());
		self.inner.len() > before
	}

	fn contains(&self, key: &K) -> bool {
		self.inner.get(key).is_some()
	}

	fn len(&self) -> usize {
		self.inner.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_natural_map_preserves_first_occurrence_order() {
		let strategy = Natural;
		let mut map = Equivalence::<i32>::new_map::<Vec<i32>>(&strategy);
		for value in [1, 2, 3, 4, 5, 6] {
			map.get_or_insert_with(value % 3, Vec::new).push(value);
		}
		let entries = map.into_entries();
		assert_eq!(entries, vec![(1, vec![1, 4]), (2, vec![2, 5]), (0, vec![3, 6])]);
	}

	#[test]
	fn test_natural_set_insert_reports_novelty() {
		let strategy = Natural;
		let mut set = Equivalence::<&str>::new_set(&strategy);
		assert!(set.insert("a"));
		assert!(set.insert("b"));
		assert!(!set.insert("a"));
		assert!(set.contains(&"b"));
		assert_eq!(set.len(), 2);
	}

	#[test]
	fn test_comparator_map_preserves_first_occurrence_order() {
		let strategy = ByComparator::new(|a: &i32, b: &i32| a.cmp(b));
		let mut map = strategy.new_map::<Vec<i32>>();
		for value in [5, 2, 8, 2, 5, 1] {
			map.get_or_insert_with(value, Vec::new).push(value);
		}
		let keys: Vec<i32> = map.into_entries().into_iter().map(|(k, _)| k).collect();
		assert_eq!(keys, vec![5, 2, 8, 1]);
	}

	#[test]
	fn test_comparator_defines_equivalence_classes() {
		// Case-insensitive comparator: "A" and "a" are the same key.
		let strategy = ByComparator::new(|a: &String, b: &String| a.to_lowercase().cmp(&b.to_lowercase()));
		let mut set = strategy.new_set();
		assert!(set.insert("Apple".to_string()));
		assert!(!set.insert("APPLE".to_string()));
		assert!(set.contains(&"apple".to_string()));
	}

	#[test]
	fn test_comparator_map_probe_is_consistent_after_many_inserts() {
		let strategy = ByComparator::new(|a: &i32, b: &i32| a.cmp(b));
		let mut map = strategy.new_map::<i32>();
		for value in (0..100).rev() {
			*map.get_or_insert_with(value, || 0) += 1;
		}
		for value in 0..100 {
			*map.get_or_insert_with(value, || 0) += 1;
		}
		assert_eq!(map.len(), 100);
		assert_eq!(map.get(&42), Some(&2));
		assert_eq!(map.get(&100), None);
	}
}
