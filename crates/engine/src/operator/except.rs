// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use sequo_core::{Cursor, CursorState, Equivalence, KeySet, Result, Sequence};

/// Set difference: elements of the input whose key does not occur in
/// `other`, deduplicated, in first-occurrence order.
///
/// `other` is drained into a key set on the first pull; the input itself
/// streams.
#[derive(Clone)]
pub struct Except<S, O, KF, E> {
	input: S,
	other: O,
	key: KF,
	equivalence: E,
}

impl<S, O, KF, E> Except<S, O, KF, E> {
	pub(crate) fn new(input: S, other: O, key: KF, equivalence: E) -> Self {
		Self {
			input,
			other,
			key,
			equivalence,
		}
	}
}

impl<S, O, KF, E, K> Sequence for Except<S, O, KF, E>
where
	S: Sequence,
	O: Sequence<Item = S::Item>,
	KF: Fn(&S::Item) -> K + Clone,
	E: Equivalence<K>,
{
	type Item = S::Item;
	type Cursor = ExceptCursor<S::Cursor, O::Cursor, KF, E::Set>;

	fn cursor(&self) -> Self::Cursor {
		ExceptCursor {
			input: self.input.cursor(),
			other: Some(self.other.cursor()),
			key: self.key.clone(),
			excluded: self.equivalence.new_set(),
			state: CursorState::Unstarted,
		}
	}
}

pub struct ExceptCursor<C, OC, KF, Set> {
	input: C,
	other: Option<OC>,
	key: KF,
	// Seeded with the keys of `other`; survivors are added as they are
	// emitted, which is what deduplicates the output.
	excluded: Set,
	state: CursorState,
}

impl<C, OC, KF, Set, K> Cursor for ExceptCursor<C, OC, KF, Set>
where
	C: Cursor,
	OC: Cursor<Item = C::Item>,
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
				self.excluded.insert((self.key)(other.current()?));
			}
			other.close();
		}
		while self.input.move_next()? {
			if self.excluded.insert((self.key)(self.input.current()?)) {
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
	fn test_except_removes_and_dedups() {
		let seq = items(vec![1, 2, 2, 3, 4, 3]).except(items(vec![2, 4]));
		assert_eq!(collect(&seq), vec![1, 3]);
	}

	#[test]
	fn test_except_empty_other_still_dedups() {
		let seq = items(vec![1, 1, 2]).except(items(Vec::<i32>::new()));
		assert_eq!(collect(&seq), vec![1, 2]);
	}

	#[test]
	fn test_except_by_key() {
		let seq = items(vec!["apple", "banana", "cherry"])
			.except_by(items(vec!["blueberry"]), |s| s.as_bytes()[0]);
		assert_eq!(collect(&seq), vec!["apple", "cherry"]);
	}
}
