// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use sequo_core::{Cursor, CursorState, Equivalence, KeySet, Result, Sequence};

/// Set intersection: elements of the input whose key occurs in `other`,
/// deduplicated, in first-occurrence order of the input.
///
/// `other` supplies keys and is drained into a key set on the first
/// pull; the input itself streams.
#[derive(Clone)]
pub struct Intersect<S, O, KF, E> {
	input: S,
	other: O,
	key: KF,
	equivalence: E,
}

impl<S, O, KF, E> Intersect<S, O, KF, E> {
	pub(crate) fn new(input: S, other: O, key: KF, equivalence: E) -> Self {
		Self {
			input,
			other,
			key,
			equivalence,
		}
	}
}

impl<S, O, KF, E, K> Sequence for Intersect<S, O, KF, E>
where
	S: Sequence,
	O: Sequence<Item = K>,
	K: Clone,
	KF: Fn(&S::Item) -> K + Clone,
	E: Equivalence<K>,
{
	type Item = S::Item;
	type Cursor = IntersectCursor<S::Cursor, O::Cursor, KF, E::Set>;

	fn cursor(&self) -> Self::Cursor {
		IntersectCursor {
			input: self.input.cursor(),
			other: Some(self.other.cursor()),
			key: self.key.clone(),
			allowed: self.equivalence.new_set(),
			seen: self.equivalence.new_set(),
			state: CursorState::Unstarted,
		}
	}
}

pub struct IntersectCursor<C, OC, KF, Set> {
	input: C,
	other: Option<OC>,
	key: KF,
	allowed: Set,
	seen: Set,
	state: CursorState,
}

impl<C, OC, KF, Set, K> Cursor for IntersectCursor<C, OC, KF, Set>
where
	C: Cursor,
	OC: Cursor<Item = K>,
	K: Clone,
	KF: Fn(&C::Item) -> K,
	Set: KeySet<K>,
{
	type Item = C::Item;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if let Some(mut other) = self.other.take() {
			while other.move_next()? {
				self.allowed.insert(other.current()?.clone());
			}
			other.close();
		}
		while self.input.move_next()? {
			let key = (self.key)(self.input.current()?);
			if self.allowed.contains(&key) && self.seen.insert(key) {
				self.state = CursorState::Active;
				return Ok(true);
			}
		}
		self.state = CursorState::Exhausted;
		Ok(false)
	}

	fn current(&self) -> Result<&C::Item> {
		self.state.ensure_active()?;
		self.input.current()
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			if let Some(mut other) = self.other.take() {
				other.close();
			}
			self.input.close();
			self.state = CursorState::Closed;
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::SequenceOps;
	use sequo_core::items;
	use sequo_testing::collect;

	#[test]
	fn test_intersect_keeps_common_elements_deduped() {
		let seq = items(vec![1, 2, 2, 3, 4]).intersect(items(vec![2, 4, 5]));
		assert_eq!(collect(&seq), vec![2, 4]);
	}

	#[test]
	fn test_intersect_with_disjoint_other_is_empty() {
		let seq = items(vec![1, 2]).intersect(items(vec![3, 4]));
		assert!(collect(&seq).is_empty());
	}

	#[test]
	fn test_intersect_by_matches_on_keys() {
		let seq = items(vec!["apple", "banana", "cherry"])
			.intersect_by(items(vec![b'a', b'c']), |s| s.as_bytes()[0]);
		assert_eq!(collect(&seq), vec!["apple", "cherry"]);
	}

	#[test]
	fn test_except_and_intersect_partition_the_input() {
		let input = items(vec![1, 2, 3, 4, 5]);
		let other = items(vec![2, 4, 6]);
		let kept = collect(&input.clone().intersect(other.clone()));
		let removed = collect(&input.clone().except(other));
		assert_eq!(kept, vec![2, 4]);
		assert_eq!(removed, vec![1, 3, 5]);
	}
}
