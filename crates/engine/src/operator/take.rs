// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use std::collections::VecDeque;

use sequo_core::{Cursor, CursorState, Result, Sequence};

/// Lazily yields at most the first `count` elements.
#[derive(Debug, Clone)]
pub struct Take<S> {
	input: S,
	count: usize,
}

impl<S> Take<S> {
	pub(crate) fn new(input: S, count: usize) -> Self {
		Self {
			input,
			count,
		}
	}
}

impl<S> Sequence for Take<S>
where
	S: Sequence,
{
	type Item = S::Item;
	type Cursor = TakeCursor<S::Cursor>;

	fn cursor(&self) -> Self::Cursor {
		TakeCursor {
			input: self.input.cursor(),
			remaining: self.count,
			state: CursorState::Unstarted,
		}
	}
}

pub struct TakeCursor<C> {
	input: C,
	remaining: usize,
	state: CursorState,
}

impl<C> Cursor for TakeCursor<C>
where
	C: Cursor,
{
	type Item = C::Item;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if self.remaining == 0 || !self.input.move_next()? {
			self.state = CursorState::Exhausted;
			return Ok(false);
		}
		self.remaining -= 1;
		self.state = CursorState::Active;
		Ok(true)
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

/// Lazily yields elements while the predicate holds, then stops for good.
#[derive(Debug, Clone)]
pub struct TakeWhile<S, P> {
	input: S,
	predicate: P,
}

impl<S, P> TakeWhile<S, P> {
	pub(crate) fn new(input: S, predicate: P) -> Self {
		Self {
			input,
			predicate,
		}
	}
}

impl<S, P> Sequence for TakeWhile<S, P>
where
	S: Sequence,
	P: Fn(&S::Item) -> bool + Clone,
{
	type Item = S::Item;
	type Cursor = TakeWhileCursor<S::Cursor, P>;

	fn cursor(&self) -> Self::Cursor {
		TakeWhileCursor {
			input: self.input.cursor(),
			predicate: self.predicate.clone(),
			state: CursorState::Unstarted,
		}
	}
}

pub struct TakeWhileCursor<C, P> {
	input: C,
	predicate: P,
	state: CursorState,
}

impl<C, P> Cursor for TakeWhileCursor<C, P>
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
		if self.input.move_next()? && (self.predicate)(self.input.current()?) {
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

/// Yields only the final `count` elements, in encounter order.
///
/// Keeps a bounded ring buffer of at most `count` elements; the source is
/// drained on first advance.
#[derive(Debug, Clone)]
pub struct TakeLast<S> {
	input: S,
	count: usize,
}

impl<S> TakeLast<S> {
	pub(crate) fn new(input: S, count: usize) -> Self {
		Self {
			input,
			count,
		}
	}
}

impl<S> Sequence for TakeLast<S>
where
	S: Sequence,
	S::Item: Clone,
{
	type Item = S::Item;
	type Cursor = TakeLastCursor<S::Cursor>;

	fn cursor(&self) -> Self::Cursor {
		TakeLastCursor {
			input: Some(self.input.cursor()),
			count: self.count,
			buffer: VecDeque::new(),
			state: CursorState::Unstarted,
		}
	}
}

pub struct TakeLastCursor<C>
where
	C: Cursor,
{
	input: Option<C>,
	count: usize,
	buffer: VecDeque<C::Item>,
	state: CursorState,
}

impl<C> Cursor for TakeLastCursor<C>
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
		if let Some(mut input) = self.input.take() {
			if self.count > 0 {
				while input.move_next()? {
					if self.buffer.len() == self.count {
						self.buffer.pop_front();
					}
					self.buffer.push_back(input.current()?.clone());
				}
			}
			input.close();
		} else if self.state == CursorState::Active {
			self.buffer.pop_front();
		}
		if self.buffer.is_empty() {
			self.state = CursorState::Exhausted;
			Ok(false)
		} else {
			self.state = CursorState::Active;
			Ok(true)
		}
	}

	fn current(&self) -> Result<&C::Item> {
		self.state.ensure_active()?;
		Ok(&self.buffer[0])
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			if let Some(mut input) = self.input.take() {
				input.close();
			}
			self.buffer.clear();
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
	fn test_take_limits_the_sequence() {
		assert_eq!(collect(&items(vec![1, 2, 3, 4, 5]).take(3)), vec![1, 2, 3]);
	}

	#[test]
	fn test_take_zero_is_empty() {
		assert!(collect(&items(vec![1, 2]).take(0)).is_empty());
	}

	#[test]
	fn test_take_more_than_available() {
		assert_eq!(collect(&items(vec![1, 2]).take(10)), vec![1, 2]);
	}

	#[test]
	fn test_take_while_stops_at_first_rejection() {
		let seq = items(vec![1, 2, 5, 1]).take_while(|x| *x < 3);
		assert_eq!(collect(&seq), vec![1, 2]);
	}

	#[test]
	fn test_take_last_keeps_tail_in_order() {
		assert_eq!(collect(&items(vec![1, 2, 3, 4, 5]).take_last(2)), vec![4, 5]);
	}

	#[test]
	fn test_take_last_zero_is_empty() {
		assert!(collect(&items(vec![1, 2]).take_last(0)).is_empty());
	}
}
