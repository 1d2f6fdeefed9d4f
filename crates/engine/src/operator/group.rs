// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use tracing::trace;

use sequo_core::{Cursor, CursorState, Equivalence, Group, KeyMap, Pair, Result, Sequence};

/// Partitions the input into [`Group`]s keyed by a selector.
///
/// Buffering happens on the first pull of each cursor. Groups come out in
/// first-occurrence order of their keys; within a group, elements keep
/// their source order.
pub struct GroupBy<S, KF, EF, E> {
	input: S,
	key: KF,
	element: EF,
	equivalence: E,
}

impl<S, KF, EF, E> GroupBy<S, KF, EF, E> {
	pub(crate) fn new(input: S, key: KF, element: EF, equivalence: E) -> Self {
		Self {
			input,
			key,
			element,
			equivalence,
		}
	}
}

impl<S, KF, EF, E, K, Elem> Sequence for GroupBy<S, KF, EF, E>
where
	S: Sequence,
	KF: Fn(&S::Item) -> K + Clone,
	EF: Fn(&S::Item) -> Elem + Clone,
	E: Equivalence<K>,
	K: Clone,
	Elem: Clone,
{
	type Item = Group<K, Elem>;
	type Cursor = GroupByCursor<S::Cursor, KF, EF, E, K, Elem>;

	fn cursor(&self) -> Self::Cursor {
		GroupByCursor {
			input: Some(self.input.cursor()),
			key: self.key.clone(),
			element: self.element.clone(),
			equivalence: self.equivalence.clone(),
			groups: Vec::new(),
			pos: 0,
			state: CursorState::Unstarted,
		}
	}
}

pub struct GroupByCursor<C, KF, EF, E, K, Elem> {
	input: Option<C>,
	key: KF,
	element: EF,
	equivalence: E,
	groups: Vec<Group<K, Elem>>,
	pos: usize,
	state: CursorState,
}

impl<C, KF, EF, E, K, Elem> Cursor for GroupByCursor<C, KF, EF, E, K, Elem>
where
	C: Cursor,
	KF: Fn(&C::Item) -> K,
	EF: Fn(&C::Item) -> Elem,
	E: Equivalence<K>,
	K: Clone,
	Elem: Clone,
{
	type Item = Group<K, Elem>;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if let Some(mut input) = self.input.take() {
			let mut buckets = self.equivalence.new_map::<Vec<Elem>>();
			while input.move_next()? {
				let item = input.current()?;
				buckets.get_or_insert_with((self.key)(item), Vec::new).push((self.element)(item));
			}
			input.close();
			self.groups = buckets
				.into_entries()
				.into_iter()
				.map(|(key, elements)| Group::new(key, elements))
				.collect();
			trace!(groups = self.groups.len(), "group buckets materialized");
		} else if self.state == CursorState::Active {
			self.pos += 1;
		}
		if self.pos < self.groups.len() {
			self.state = CursorState::Active;
			Ok(true)
		} else {
			self.state = CursorState::Exhausted;
			Ok(false)
		}
	}

	fn current(&self) -> Result<&Group<K, Elem>> {
		self.state.ensure_active()?;
		Ok(&self.groups[self.pos])
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			if let Some(mut input) = self.input.take() {
				input.close();
			}
			self.groups.clear();
			self.state = CursorState::Closed;
		}
	}
}

/// [`GroupBy`] followed by a per-group projection `mapping(&key, &group)`.
pub struct GroupByMap<S, KF, EF, MF, E> {
	groups: GroupBy<S, KF, EF, E>,
	mapping: MF,
}

impl<S, KF, EF, MF, E> GroupByMap<S, KF, EF, MF, E> {
	pub(crate) fn new(input: S, key: KF, element: EF, mapping: MF, equivalence: E) -> Self {
		Self {
			groups: GroupBy::new(input, key, element, equivalence),
			mapping,
		}
	}
}

impl<S, KF, EF, MF, E, K, Elem, R> Sequence for GroupByMap<S, KF, EF, MF, E>
where
	S: Sequence,
	KF: Fn(&S::Item) -> K + Clone,
	EF: Fn(&S::Item) -> Elem + Clone,
	MF: Fn(&K, &Group<K, Elem>) -> R + Clone,
	E: Equivalence<K>,
	K: Clone,
	Elem: Clone,
{
	type Item = R;
	type Cursor = GroupByMapCursor<GroupByCursor<S::Cursor, KF, EF, E, K, Elem>, MF, R>;

	fn cursor(&self) -> Self::Cursor {
		GroupByMapCursor {
			groups: self.groups.cursor(),
			mapping: self.mapping.clone(),
			current: None,
			state: CursorState::Unstarted,
		}
	}
}

pub struct GroupByMapCursor<GC, MF, R> {
	groups: GC,
	mapping: MF,
	current: Option<R>,
	state: CursorState,
}

impl<GC, MF, K, Elem, R> Cursor for GroupByMapCursor<GC, MF, R>
where
	GC: Cursor<Item = Group<K, Elem>>,
	MF: Fn(&K, &Group<K, Elem>) -> R,
{
	type Item = R;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if self.groups.move_next()? {
			let group = self.groups.current()?;
			self.current = Some((self.mapping)(group.key(), group));
			self.state = CursorState::Active;
			Ok(true)
		} else {
			self.current = None;
			self.state = CursorState::Exhausted;
			Ok(false)
		}
	}

	fn current(&self) -> Result<&R> {
		self.state.ensure_active()?;
		Ok(self.current.as_ref().expect("active group map cursor holds a value"))
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			self.current = None;
			self.groups.close();
			self.state = CursorState::Closed;
		}
	}
}

/// Counts occurrences per key, yielding `(key, count)` pairs in
/// first-occurrence key order.
pub struct CountBy<S, KF, E> {
	input: S,
	key: KF,
	equivalence: E,
}

impl<S, KF, E> CountBy<S, KF, E> {
	pub(crate) fn new(input: S, key: KF, equivalence: E) -> Self {
		Self {
			input,
			key,
			equivalence,
		}
	}
}

impl<S, KF, E, K> Sequence for CountBy<S, KF, E>
where
	S: Sequence,
	KF: Fn(&S::Item) -> K + Clone,
	E: Equivalence<K>,
	K: Clone,
{
	type Item = Pair<K, u64>;
	type Cursor = CountByCursor<S::Cursor, KF, E, K>;

	fn cursor(&self) -> Self::Cursor {
		CountByCursor {
			input: Some(self.input.cursor()),
			key: self.key.clone(),
			equivalence: self.equivalence.clone(),
			counts: Vec::new(),
			pos: 0,
			state: CursorState::Unstarted,
		}
	}
}

pub struct CountByCursor<C, KF, E, K> {
	input: Option<C>,
	key: KF,
	equivalence: E,
	counts: Vec<Pair<K, u64>>,
	pos: usize,
	state: CursorState,
}

impl<C, KF, E, K> Cursor for CountByCursor<C, KF, E, K>
where
	C: Cursor,
	KF: Fn(&C::Item) -> K,
	E: Equivalence<K>,
	K: Clone,
{
	type Item = Pair<K, u64>;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if let Some(mut input) = self.input.take() {
			let mut buckets = self.equivalence.new_map::<u64>();
			while input.move_next()? {
				*buckets.get_or_insert_with((self.key)(input.current()?), || 0) += 1;
			}
			input.close();
			self.counts = buckets.into_entries().into_iter().map(Pair::from).collect();
		} else if self.state == CursorState::Active {
			self.pos += 1;
		}
		if self.pos < self.counts.len() {
			self.state = CursorState::Active;
			Ok(true)
		} else {
			self.state = CursorState::Exhausted;
			Ok(false)
		}
	}

	fn current(&self) -> Result<&Pair<K, u64>> {
		self.state.ensure_active()?;
		Ok(&self.counts[self.pos])
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			if let Some(mut input) = self.input.take() {
				input.close();
			}
			self.counts.clear();
			self.state = CursorState::Closed;
		}
	}
}

/// Folds every element into a per-key accumulator, yielding
/// `(key, accumulator)` pairs in first-occurrence key order.
///
/// Each key starts from its own clone of the seed.
pub struct AggregateBy<S, KF, R, FF, E> {
	input: S,
	key: KF,
	seed: R,
	fold: FF,
	equivalence: E,
}

impl<S, KF, R, FF, E> AggregateBy<S, KF, R, FF, E> {
	pub(crate) fn new(input: S, key: KF, seed: R, fold: FF, equivalence: E) -> Self {
		Self {
			input,
			key,
			seed,
			fold,
			equivalence,
		}
	}
}

impl<S, KF, R, FF, E, K> Sequence for AggregateBy<S, KF, R, FF, E>
where
	S: Sequence,
	KF: Fn(&S::Item) -> K + Clone,
	R: Clone,
	FF: Fn(R, &S::Item) -> R + Clone,
	E: Equivalence<K>,
	K: Clone,
{
	type Item = Pair<K, R>;
	type Cursor = AggregateByCursor<S::Cursor, KF, R, FF, E, K>;

	fn cursor(&self) -> Self::Cursor {
		AggregateByCursor {
			input: Some(self.input.cursor()),
			key: self.key.clone(),
			seed: self.seed.clone(),
			fold: self.fold.clone(),
			equivalence: self.equivalence.clone(),
			results: Vec::new(),
			pos: 0,
			state: CursorState::Unstarted,
		}
	}
}

pub struct AggregateByCursor<C, KF, R, FF, E, K> {
	input: Option<C>,
	key: KF,
	seed: R,
	fold: FF,
	equivalence: E,
	results: Vec<Pair<K, R>>,
	pos: usize,
	state: CursorState,
}

impl<C, KF, R, FF, E, K> Cursor for AggregateByCursor<C, KF, R, FF, E, K>
where
	C: Cursor,
	KF: Fn(&C::Item) -> K,
	R: Clone,
	FF: Fn(R, &C::Item) -> R,
	E: Equivalence<K>,
	K: Clone,
{
	type Item = Pair<K, R>;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if let Some(mut input) = self.input.take() {
			let mut buckets = self.equivalence.new_map::<Option<R>>();
			while input.move_next()? {
				let item = input.current()?;
				let bucket = buckets.get_or_insert_with((self.key)(item), || Some(self.seed.clone()));
				let accumulator = bucket.take().expect("aggregate bucket holds its accumulator");
				*bucket = Some((self.fold)(accumulator, item));
			}
			input.close();
			self.results = buckets
				.into_entries()
				.into_iter()
				.map(|(key, accumulator)| {
					Pair::new(key, accumulator.expect("aggregate bucket holds its accumulator"))
				})
				.collect();
		} else if self.state == CursorState::Active {
			self.pos += 1;
		}
		if self.pos < self.results.len() {
			self.state = CursorState::Active;
			Ok(true)
		} else {
			self.state = CursorState::Exhausted;
			Ok(false)
		}
	}

	fn current(&self) -> Result<&Pair<K, R>> {
		self.state.ensure_active()?;
		Ok(&self.results[self.pos])
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			if let Some(mut input) = self.input.take() {
				input.close();
			}
			self.results.clear();
			self.state = CursorState::Closed;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::SequenceOps;
	use sequo_core::items;
	use sequo_testing::collect;

	#[test]
	fn test_group_by_keeps_first_occurrence_key_order() {
		let seq = items(vec![1, 2, 3, 4, 5, 6]).group_by(|v| v % 3);
		let groups = collect(&seq);
		let keys: Vec<i32> = groups.iter().map(|g| *g.key()).collect();
		assert_eq!(keys, vec![1, 2, 0]);
		assert_eq!(groups[0].as_slice(), &[1, 4]);
		assert_eq!(groups[1].as_slice(), &[2, 5]);
		assert_eq!(groups[2].as_slice(), &[3, 6]);
	}

	#[test]
	fn test_group_by_select_projects_elements() {
		let seq = items(vec!["apple", "avocado", "banana"])
			.group_by_select(|s| s.as_bytes()[0], |s| s.len());
		let groups = collect(&seq);
		assert_eq!(groups[0].as_slice(), &[5, 7]);
		assert_eq!(groups[1].as_slice(), &[6]);
	}

	#[test]
	fn test_group_by_map_projects_whole_groups() {
		let seq = items(vec![1, 2, 3, 4, 5, 6])
			.group_by_map(|v| v % 3, |key, group| (*key, group.len()));
		assert_eq!(collect(&seq), vec![(1, 2), (2, 2), (0, 2)]);
	}

	#[test]
	fn test_group_by_map_with_comparator_equivalence() {
		let seq = items(vec!["Ada", "ada", "Bob"]).group_by_map_with(
			|s| s.to_string(),
			|key, group| (key.clone(), group.len()),
			|a, b| a.to_lowercase().cmp(&b.to_lowercase()),
		);
		assert_eq!(collect(&seq), vec![("Ada".to_string(), 2), ("Bob".to_string(), 1)]);
	}

	#[test]
	fn test_group_by_with_comparator_equivalence() {
		let seq = items(vec!["Ada", "ada", "Bob"]).group_by_with(
			|s| s.to_string(),
			|a, b| a.to_lowercase().cmp(&b.to_lowercase()),
		);
		let groups = collect(&seq);
		assert_eq!(groups.len(), 2);
		// The key of an equivalence class is its first representative.
		assert_eq!(groups[0].key(), "Ada");
		assert_eq!(groups[0].len(), 2);
	}

	#[test]
	fn test_count_by() {
		let seq = items(vec!["a", "bb", "cc", "d"]).count_by(|s| s.len());
		assert_eq!(collect(&seq), vec![Pair::new(1, 2), Pair::new(2, 2)]);
	}

	#[test]
	fn test_aggregate_by_folds_per_key() {
		let seq = items(vec![1, 2, 3, 4, 5, 6])
			.aggregate_by(0, |v| v % 2, |acc, v| acc + v);
		assert_eq!(collect(&seq), vec![Pair::new(1, 9), Pair::new(0, 12)]);
	}

	#[test]
	fn test_group_by_of_empty_yields_no_groups() {
		let seq = items(Vec::<i32>::new()).group_by(|v| *v);
		assert!(collect(&seq).is_empty());
	}
}
