// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use sequo_core::{Cursor, CursorState, Equivalence, KeySet, Result, Sequence};

/// Streams the input, suppressing elements whose key was already seen.
///
/// The first occurrence of each key wins; output order is the source
/// order of those survivors. Memory grows with the number of distinct
/// keys, not with the input length.
#[derive(Clone)]
pub struct Distinct<S, KF, E> {
	input: S,
	key: KF,
	equivalence: E,
}

impl<S, KF, E> Distinct<S, KF, E> {
	pub(crate) fn new(input: S, key: KF, equivalence: E) -> Self {
		Self {
			input,
			key,
			equivalence,
		}
	}
}

impl<S, KF, E, K> Sequence for Distinct<S, KF, E>
where
	S: Sequence,
	KF: Fn(&S::Item) -> K + Clone,
	E: Equivalence<K>,
{
	type Item = S::Item;
	type Cursor = DistinctCursor<S::Cursor, KF, E::Set>;

	fn cursor(&self) -> Self::Cursor {
		DistinctCursor {
			input: self.input.cursor(),
			key: self.key.clone(),
			seen: self.equivalence.new_set(),
			state: CursorState::Unstarted,
		}
	}
}

pub struct DistinctCursor<C, KF, Set> {
	input: C,
	key: KF,
	seen: Set,
	state: CursorState,
}

impl<C, KF, Set, K> Cursor for DistinctCursor<C, KF, Set>
where
	C: Cursor,
	KF: Fn(&C::Item) -> K,
	Set: KeySet<K>,
{
	type Item = C::Item;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		while self.input.move_next()? {
			if self.seen.insert((self.key)(self.input.current()?)) {
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
			self.input.close();
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
	fn test_distinct_keeps_first_occurrences_in_order() {
		let seq = items(vec![3, 1, 3, 2, 1]).distinct();
		assert_eq!(collect(&seq), vec![3, 1, 2]);
	}

	#[test]
	fn test_distinct_is_idempotent() {
		let once = items(vec![1, 1, 2, 2, 3]).distinct();
		let twice = once.clone().distinct();
		assert_eq!(collect(&once), collect(&twice));
	}

	#[test]
	fn test_distinct_by_key() {
		let seq = items(vec!["apple", "avocado", "banana", "cherry"]).distinct_by(|s| s.as_bytes()[0]);
		assert_eq!(collect(&seq), vec!["apple", "banana", "cherry"]);
	}

	#[test]
	fn test_distinct_with_comparator_equivalence() {
		let seq = items(vec!["Ada".to_string(), "ADA".to_string(), "Bob".to_string()])
			.distinct_with(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
		assert_eq!(collect(&seq), vec!["Ada".to_string(), "Bob".to_string()]);
	}
}
