// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use std::collections::VecDeque;

use sequo_core::{Cursor, CursorState, Equivalence, KeyMap, Result, Sequence};

use super::build_lookup;

/// Inner equi-join.
///
/// Output order follows the probing (left) side; when one left element
/// matches several right elements, the pairs come out in the right
/// side's encounter order. Left elements with no match are dropped.
#[derive(Clone)]
pub struct Join<S, O, SK, OK, M, E> {
	input: S,
	other: O,
	self_key: SK,
	other_key: OK,
	mapping: M,
	equivalence: E,
}

impl<S, O, SK, OK, M, E> Join<S, O, SK, OK, M, E> {
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

impl<S, O, SK, OK, M, E, K, R> Sequence for Join<S, O, SK, OK, M, E>
where
	S: Sequence,
	O: Sequence,
	O::Item: Clone,
	SK: Fn(&S::Item) -> K + Clone,
	OK: Fn(&O::Item) -> K + Clone,
	M: Fn(&S::Item, &O::Item) -> R + Clone,
	E: Equivalence<K>,
{
	type Item = R;
	type Cursor = JoinCursor<S::Cursor, O::Cursor, SK, OK, M, E, K, R>;

	fn cursor(&self) -> Self::Cursor {
		JoinCursor {
			input: self.input.cursor(),
			other: Some(self.other.cursor()),
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

pub struct JoinCursor<C, OC, SK, OK, M, E, K, R>
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
	pending: VecDeque<R>,
	current: Option<R>,
	state: CursorState,
}

impl<C, OC, SK, OK, M, E, K, R> Cursor for JoinCursor<C, OC, SK, OK, M, E, K, R>
where
	C: Cursor,
	OC: Cursor,
	OC::Item: Clone,
	SK: Fn(&C::Item) -> K,
	OK: Fn(&OC::Item) -> K,
	M: Fn(&C::Item, &OC::Item) -> R,
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
		loop {
			if let Some(result) = self.pending.pop_front() {
				self.current = Some(result);
				self.state = CursorState::Active;
				return Ok(true);
			}
			if !self.input.move_next()? {
				self.current = None;
				self.state = CursorState::Exhausted;
				return Ok(false);
			}
			let left = self.input.current()?;
			let lookup = self.lookup.as_ref().expect("join cursor built its lookup");
			if let Some(matches) = lookup.get(&(self.self_key)(left)) {
				self.pending.extend(matches.iter().map(|right| (self.mapping)(left, right)));
			}
		}
	}

	fn current(&self) -> Result<&R> {
		self.state.ensure_active()?;
		Ok(self.current.as_ref().expect("active join cursor holds a value"))
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			if let Some(mut other) = self.other.take() {
				other.close();
			}
			self.lookup = None;
			self.pending.clear();
			self.current = None;
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
	fn test_join_pairs_matching_keys() {
		let left = items(vec![(1, "one"), (2, "two"), (3, "three")]);
		let right = items(vec![(2, "zwei"), (3, "drei"), (4, "vier")]);
		let seq = left.join(right, |l| l.0, |r| r.0, |l, r| (l.1, r.1));
		assert_eq!(collect(&seq), vec![("two", "zwei"), ("three", "drei")]);
	}

	#[test]
	fn test_join_emits_the_cross_product_of_duplicates() {
		let left = items(vec![1, 2, 2]);
		let right = items(vec![(2, "a"), (2, "b"), (3, "c")]);
		let seq = left.join(right, |l| *l, |r| r.0, |l, r| (*l, r.1));
		assert_eq!(collect(&seq), vec![(2, "a"), (2, "b"), (2, "a"), (2, "b")]);
	}

	#[test]
	fn test_join_with_empty_side_is_empty() {
		let seq = items(vec![1, 2]).join(items(Vec::<i32>::new()), |l| *l, |r| *r, |l, r| (*l, *r));
		assert!(collect(&seq).is_empty());
	}
}
