// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use sequo_core::{Cursor, CursorState, Equivalence, Items, KeyMap, Result, Sequence};

use super::build_lookup;

/// Group join: one output per left element, paired with the full batch
/// of right elements sharing its key. Unmatched left elements see an
/// empty batch.
#[derive(Clone)]
pub struct GroupJoin<S, O, SK, OK, M, E> {
	input: S,
	other: O,
	self_key: SK,
	other_key: OK,
	mapping: M,
	equivalence: E,
}

impl<S, O, SK, OK, M, E> GroupJoin<S, O, SK, OK, M, E> {
	pub(crate) fn new(input: S, other: O, self_key: SK, other_key: OK, mapping: M, equivalence: E) -> Self {
		Self {
			input,
			other,
			self_key,
			other_key,
			mapping,
			equivalence,
		}
	}
}

impl<S, O, SK, OK, M, E, K, R> Sequence for GroupJoin<S, O, SK, OK, M, E>
where
	S: Sequence,
	O: Sequence,
	O::Item: Clone,
	SK: Fn(&S::Item) -> K + Clone,
	OK: Fn(&O::Item) -> K + Clone,
	M: Fn(&S::Item, Items<O::Item>) -> R + Clone,
	E: Equivalence<K>,
{
	type Item = R;
	type Cursor = GroupJoinCursor<S::Cursor, O::Cursor, SK, OK, M, E, K, R>;

	fn cursor(&self) -> Self::Cursor {
		GroupJoinCursor {
			input: self.input.cursor(),
			other: Some(self.other.cursor()),
			self_key: self.self_key.clone(),
			other_key: self.other_key.clone(),
			mapping: self.mapping.clone(),
			equivalence: self.equivalence.clone(),
			lookup: None,
			current: None,
			state: CursorState::Unstarted,
		}
	}
}

pub struct GroupJoinCursor<C, OC, SK, OK, M, E, K, R>
where
	OC: Cursor,
	E: Equivalence<K>,
{
	input: C,
	other: Option<OC>,
	self_key: SK,
	other_key: OK,
	mapping: M,
	equivalence: E,
	lookup: Option<E::Map<Vec<OC::Item>>>,
	current: Option<R>,
	state: CursorState,
}

impl<C, OC, SK, OK, M, E, K, R> Cursor for GroupJoinCursor<C, OC, SK, OK, M, E, K, R>
where
	C: Cursor,
	OC: Cursor,
	OC::Item: Clone,
	SK: Fn(&C::Item) -> K,
	OK: Fn(&OC::Item) -> K,
	M: Fn(&C::Item, Items<OC::Item>) -> R,
	E: Equivalence<K>,
{
	type Item = R;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if let Some(other) = self.other.take() {
			self.lookup = Some(build_lookup(other, &self.other_key, &self.equivalence)?);
		}
		if !self.input.move_next()? {
			self.current = None;
			self.state = CursorState::Exhausted;
			return Ok(false);
		}
		let left = self.input.current()?;
		let lookup = self.lookup.as_ref().expect("group join cursor built its lookup");
		let matches = lookup
			.get(&(self.self_key)(left))
			.map(|batch| Items::from(batch.clone()))
			.unwrap_or_else(|| Items::from(Vec::new()));
		self.current = Some((self.mapping)(left, matches));
		self.state = CursorState::Active;
		Ok(true)
	}

	fn current(&self) -> Result<&R> {
		self.state.ensure_active()?;
		Ok(self.current.as_ref().expect("active group join cursor holds a value"))
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			if let Some(mut other) = self.other.take() {
				other.close();
			}
			self.lookup = None;
			self.current = None;
			self.input.close();
			self.state = CursorState::Closed;
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::SequenceOps;
	use crate::aggregate::to_vec;
	use sequo_core::items;
	use sequo_testing::collect;

	#[test]
	fn test_group_join_batches_matches_per_left_element() {
		let left = items(vec![1, 2, 3]);
		let right = items(vec![(2, "a"), (2, "b"), (3, "c")]);
		let seq = left.group_join(
			right,
			|l| *l,
			|r| r.0,
			|l, batch| (*l, to_vec(&batch.map(|r| r.1)).unwrap()),
		);
		assert_eq!(
			collect(&seq),
			vec![(1, vec![]), (2, vec!["a", "b"]), (3, vec!["c"])]
		);
	}
}
