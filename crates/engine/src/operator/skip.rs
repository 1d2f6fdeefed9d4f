// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use std::collections::VecDeque;

use sequo_core::{Cursor, CursorState, Result, Sequence};

/// Lazily discards the first `count` elements.
#[derive(Debug, Clone)]
pub struct Skip<S> {
	input: S,
	count: usize,
}

impl<S> Skip<S> {
	pub(crate) fn new(input: S, count: usize) -> Self {
		Self {
			input,
			count,
		}
	}
}

impl<S> Sequence for Skip<S>
where
	S: Sequence,
{
	type Item = S::Item;
	type Cursor = SkipCursor<S::Cursor>;

	fn cursor(&self) -> Self::Cursor {
		SkipCursor {
			input: self.input.cursor(),
			to_skip: self.count,
			state: CursorState::Unstarted,
		}
	}
}

pub struct SkipCursor<C> {
	input: C,
	to_skip: usize,
	state: CursorState,
}

impl<C> Cursor for SkipCursor<C>
where
	C: Cursor,
{
	type Item = C::Item;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		while self.to_skip > 0 {
			if !self.input.move_next()? {
				self.to_skip = 0;
				self.state = CursorState::Exhausted;
				return Ok(false);
			}
			self.to_skip -= 1;
		}
		if self.input.move_next()? {
			self.state = CursorState::Active;
			Ok(true)
		} else {
			self.state = CursorState::Exhausted;
			Ok(false)
		}
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

/// Lazily discards elements while the predicate holds, then yields the
/// remainder unconditionally.
#[derive(Debug, Clone)]
pub struct SkipWhile<S, P> {
	input: S,
	predicate: P,
}

impl<S, P> SkipWhile<S, P> {
	pub(crate) fn new(input: S, predicate: P) -> Self {
		Self {
			input,
			predicate,
		}
	}
}

impl<S, P> Sequence for SkipWhile<S, P>
where
	S: Sequence,
	P: Fn(&S::Item) -> bool + Clone,
{
	type Item = S::Item;
	type Cursor = SkipWhileCursor<S::Cursor, P>;

	fn cursor(&self) -> Self::Cursor {
		SkipWhileCursor {
			input: self.input.cursor(),
			predicate: self.predicate.clone(),
			skipping: true,
			state: CursorState::Unstarted,
		}
	}
}

pub struct SkipWhileCursor<C, P> {
	input: C,
	predicate: P,
	skipping: bool,
	state: CursorState,
}

impl<C, P> Cursor for SkipWhileCursor<C, P>
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
			if self.skipping && (self.predicate)(self.input.current()?) {
				continue;
			}
			self.skipping = false;
			self.state = CursorState::Active;
			return Ok(true);
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

/// Discards the final `count` elements while streaming the rest.
///
/// Holds a bounded buffer of `count` elements: an element is only
/// released once `count` further elements have been seen behind it.
#[derive(Debug, Clone)]
pub struct SkipLast<S> {
	input: S,
	count: usize,
}

impl<S> SkipLast<S> {
	pub(crate) fn new(input: S, count: usize) -> Self {
		Self {
			input,
			count,
		}
	}
}

impl<S> Sequence for SkipLast<S>
where
	S: Sequence,
	S::Item: Clone,
{
	type Item = S::Item;
	type Cursor = SkipLastCursor<S::Cursor>;

	fn cursor(&self) -> Self::Cursor {
		SkipLastCursor {
			input: self.input.cursor(),
			count: self.count,
			buffer: VecDeque::new(),
			current: None,
			state: CursorState::Unstarted,
		}
	}
}

pub struct SkipLastCursor<C>
where
	C: Cursor,
{
	input: C,
	count: usize,
	buffer: VecDeque<C::Item>,
	current: Option<C::Item>,
	state: CursorState,
}

impl<C> Cursor for SkipLastCursor<C>
where
	C: Cursor,
	C::Item: Clone,
{
	type Item = C::Item;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		while self.input.move_next()? {
			self.buffer.push_back(self.input.current()?.clone());
			if self.buffer.len() > self.count {
				self.current = self.buffer.pop_front();
				self.state = CursorState::Active;
				return Ok(true);
			}
		}
		self.current = None;
		self.state = CursorState::Exhausted;
		Ok(false)
	}

	fn current(&self) -> Result<&C::Item> {
		self.state.ensure_active()?;
		Ok(self.current.as_ref().expect("active skip_last cursor holds a value"))
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			self.buffer.clear();
			self.current = None;
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
	fn test_skip_discards_the_head() {
		assert_eq!(collect(&items(vec![1, 2, 3, 4]).skip(2)), vec![3, 4]);
	}

	#[test]
	fn test_skip_past_the_end_is_empty() {
		assert!(collect(&items(vec![1, 2]).skip(5)).is_empty());
	}

	#[test]
	fn test_skip_while_resumes_permanently() {
		let seq = items(vec![1, 2, 9, 1, 2]).skip_while(|x| *x < 5);
		assert_eq!(collect(&seq), vec![9, 1, 2]);
	}

	#[test]
	fn test_skip_last_discards_the_tail() {
		assert_eq!(collect(&items(vec![1, 2, 3, 4, 5]).skip_last(2)), vec![1, 2, 3]);
	}

	#[test]
	fn test_skip_last_zero_is_identity() {
		assert_eq!(collect(&items(vec![1, 2]).skip_last(0)), vec![1, 2]);
	}

	#[test]
	fn test_skip_last_entire_sequence() {
		assert!(collect(&items(vec![1, 2]).skip_last(3)).is_empty());
	}
}
