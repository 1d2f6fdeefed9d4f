// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use std::collections::VecDeque;

use sequo_core::{Cursor, CursorState, Equivalence, KeyMap, Result, Sequence};

use super::build_lookup;

/// Right outer equi-join: the mirror image of [`super::LeftJoin`].
///
/// The receiver is drained into the lookup and `other` becomes the
/// probing side, so output order follows `other`. Unmatched right
/// elements see `None` on the left side of the mapping.
#[derive(Clone)]
pub struct RightJoin<S, O, SK, OK, M, E> {
	input: S,
	other: O,
	self_key: SK,
	other_key: OK,
	mapping: M,
	equivalence: E,
}

impl<S, O, SK, OK, M, E> RightJoin<S, O, SK, OK, M, E> {
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

impl<S, O, SK, OK, M, E, K, R> Sequence for RightJoin<S, O, SK, OK, M, E>
where
	S: Sequence,
	S::Item: Clone,
	O: Sequence,
	SK: Fn(&S::Item) -> K + Clone,
	OK: Fn(&O::Item) -> K + Clone,
	M: Fn(Option<&S::Item>, &O::Item) -> R + Clone,
	E: Equivalence<K>,
{
	type Item = R;
	type Cursor = RightJoinCursor<S::Cursor, O::Cursor, SK, OK, M, E, K, R>;

	fn cursor(&self) -> Self::Cursor {
		RightJoinCursor {
			input: Some(self.input.cursor()),
			other: self.other.cursor(),
			self_key: self.self_key.clone(),
			other_key: self.other_key.clone(),
			mapping: self.mapping.clone(),
			equivalence: self.equivalence.clone(),
			lookup: None,
			pending: VecDeque::new(),
			current: None,
			state: CursorState::Unstarted,
		}
	}
}

pub struct RightJoinCursor<C, OC, SK, OK, M, E, K, R>
where
	C: Cursor,
	E: Equivalence<K>,
{
	input: Option<C>,
	other: OC,
	self_key: SK,
	other_key: OK,
	mapping: M,
	equivalence: E,
	lookup: Option<E::Map<Vec<C::Item>>>,
	pending: VecDeque<R>,
	current: Option<R>,
	state: CursorState,
}

impl<C, OC, SK, OK, M, E, K, R> Cursor for RightJoinCursor<C, OC, SK, OK, M, E, K, R>
where
	C: Cursor,
	C::Item: Clone,
	OC: Cursor,
	SK: Fn(&C::Item) -> K,
	OK: Fn(&OC::Item) -> K,
	M: Fn(Option<&C::Item>, &OC::Item) -> R,
	E: Equivalence<K>,
{
	type Item = R;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if let Some(input) = self.input.take() {
			self.lookup = Some(build_lookup(input, &self.self_key, &self.equivalence)?);
		}
		loop {
			if let Some(result) = self.pending.pop_front() {
				self.current = Some(result);
				self.state = CursorState::Active;
				return Ok(true);
			}
			if !self.other.move_next()? {
				self.current = None;
				self.state = CursorState::Exhausted;
				return Ok(false);
			}
			let right = self.other.current()?;
			let lookup = self.lookup.as_ref().expect("right join cursor built its lookup");
			match lookup.get(&(self.other_key)(right)) {
				Some(matches) if !matches.is_empty() => {
					self.pending.extend(matches.iter().map(|left| (self.mapping)(Some(left), right)));
				}
				_ => self.pending.push_back((self.mapping)(None, right)),
			}
		}
	}

	fn current(&self) -> Result<&R> {
		self.state.ensure_active()?;
		Ok(self.current.as_ref().expect("active right join cursor holds a value"))
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			if let Some(mut input) = self.input.take() {
				input.close();
			}
			self.lookup = None;
			self.pending.clear();
			self.current = None;
			self.other.close();
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
	fn test_right_join_keeps_unmatched_right_elements() {
		let left = items(vec![(2, "two"), (3, "three")]);
		let right = items(vec![1, 2, 3]);
		let seq = left.right_join(right, |l| l.0, |r| *r, |l, r| (l.map(|l| l.1), *r));
		assert_eq!(
			collect(&seq),
			vec![(None, 1), (Some("two"), 2), (Some("three"), 3)]
		);
	}

	#[test]
	fn test_right_join_output_order_follows_other() {
		let left = items(vec![(1, "a")]);
		let right = items(vec![3, 1, 2]);
		let seq = left.right_join(right, |l| l.0, |r| *r, |l, r| (l.map(|l| l.1), *r));
		assert_eq!(collect(&seq), vec![(None, 3), (Some("a"), 1), (None, 2)]);
	}
}
