// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use sequo_core::{Cursor, CursorState, Result, Sequence};

/// Lazily yields all of `first`, then all of `second`.
#[derive(Debug, Clone)]
pub struct Concat<S, O> {
	first: S,
	second: O,
}

impl<S, O> Concat<S, O> {
	pub(crate) fn new(first: S, second: O) -> Self {
		Self {
			first,
			second,
		}
	}
}

impl<S, O> Sequence for Concat<S, O>
where
	S: Sequence,
	O: Sequence<Item = S::Item>,
{
	type Item = S::Item;
	type Cursor = ConcatCursor<S::Cursor, O::Cursor>;

	fn cursor(&self) -> Self::Cursor {
		ConcatCursor {
			first: self.first.cursor(),
			second: self.second.cursor(),
			on_second: false,
			state: CursorState::Unstarted,
		}
	}
}

pub struct ConcatCursor<A, B> {
	first: A,
	second: B,
	on_second: bool,
	state: CursorState,
}

impl<A, B> Cursor for ConcatCursor<A, B>
where
	A: Cursor,
	B: Cursor<Item = A::Item>,
{
	type Item = A::Item;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if !self.on_second {
			if self.first.move_next()? {
				self.state = CursorState::Active;
				return Ok(true);
			}
			self.first.close();
			self.on_second = true;
		}
		if self.second.move_next()? {
			self.state = CursorState::Active;
			Ok(true)
		} else {
			self.state = CursorState::Exhausted;
			Ok(false)
		}
	}

	fn current(&self) -> Result<&A::Item> {
		self.state.ensure_active()?;
		if self.on_second {
			self.second.current()
		} else {
			self.first.current()
		}
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			if !self.on_second {
				self.first.close();
			}
			self.second.close();
			self.state = CursorState::Closed;
		}
	}
}
