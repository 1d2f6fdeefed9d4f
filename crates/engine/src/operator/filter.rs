// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use sequo_core::{Cursor, CursorState, Result, Sequence};

/// Lazily keeps the elements the predicate accepts.
#[derive(Debug, Clone)]
pub struct Filter<S, P> {
	input: S,
	predicate: P,
}

impl<S, P> Filter<S, P> {
	pub(crate) fn new(input: S, predicate: P) -> Self {
		Self {
			input,
			predicate,
		}
	}
}

impl<S, P> Sequence for Filter<S, P>
where
	S: Sequence,
	P: Fn(&S::Item) -> bool + Clone,
{
	type Item = S::Item;
	type Cursor = FilterCursor<S::Cursor, P>;

	fn cursor(&self) -> Self::Cursor {
		FilterCursor {
			input: self.input.cursor(),
			predicate: self.predicate.clone(),
			state: CursorState::Unstarted,
		}
	}
}

pub struct FilterCursor<C, P> {
	input: C,
	predicate: P,
	state: CursorState,
}

impl<C, P> Cursor for FilterCursor<C, P>
where
	C: Cursor,
	P: Fn(&C::Item) -> bool,
{
	type Item = C::Item;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		while self.input.move_next()? {
			if (self.predicate)(self.input.current()?) {
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
	fn test_filter_keeps_matching_elements() {
		let seq = items(vec![1, 2, 3, 4, 5]).filter(|x| x % 2 == 0);
		assert_eq!(collect(&seq), vec![2, 4]);
	}

	#[test]
	fn test_filter_rejects_everything() {
		let seq = items(vec![1, 3]).filter(|_| false);
		assert!(collect(&seq).is_empty());
	}

	#[test]
	fn test_filter_is_re_enumerable() {
		let seq = items(vec![1, 2]).filter(|x| *x > 1);
		assert_eq!(collect(&seq), vec![2]);
		assert_eq!(collect(&seq), vec![2]);
	}
}
