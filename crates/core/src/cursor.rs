// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use crate::error::{Error, Result};

/// Single-pass, stateful iteration handle obtained from a
/// [`Sequence`](crate::Sequence).
///
/// A cursor moves through the lifecycle
/// `Unstarted → Active → Exhausted | Closed`. Work happens only inside
/// [`move_next`](Cursor::move_next); obtaining a cursor performs no
/// enumeration. [`current`](Cursor::current) is defined only immediately
/// after a `move_next()` call returned `Ok(true)`; any other read fails
/// with [`Error::IllegalCursorState`].
///
/// A cursor exclusively owns every buffer and lookup structure it builds
/// and every upstream cursor it created. [`close`](Cursor::close) releases
/// them, transitively and exactly once; calling it again is a no-op, and it
/// is safe in any lifecycle state. Advancing a closed cursor is an error;
/// advancing an exhausted one keeps returning `Ok(false)`.
pub trait Cursor {
	type Item;

	/// Advance to the next element. Returns `Ok(true)` if an element is
	/// available through [`current`](Cursor::current).
	fn move_next(&mut self) -> Result<bool>;

	/// The element the cursor is positioned on.
	fn current(&self) -> Result<&Self::Item>;

	/// Release owned resources and close upstream cursors. Idempotent.
	fn close(&mut self);
}

/// Lifecycle marker shared by every cursor implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
	Unstarted,
	Active,
	Exhausted,
	Closed,
}

impl CursorState {
	/// Guard for `move_next()`: only a closed cursor refuses to advance.
	pub fn ensure_open(self) -> Result<()> {
		if self == CursorState::Closed {
			return Err(Error::illegal_cursor_state("move_next() on a closed cursor"));
		}
		Ok(())
	}

	/// Guard for `current()`: defined only while positioned on an element.
	pub fn ensure_active(self) -> Result<()> {
		match self {
			CursorState::Active => Ok(()),
			CursorState::Unstarted => {
				Err(Error::illegal_cursor_state("current() without a successful move_next()"))
			}
			CursorState::Exhausted => Err(Error::illegal_cursor_state("current() after exhaustion")),
			CursorState::Closed => Err(Error::illegal_cursor_state("current() on a closed cursor")),
		}
	}

	pub fn is_closed(self) -> bool {
		self == CursorState::Closed
	}
}

/// Adapter exposing any [`Cursor`] as a `std::iter::Iterator` of
/// `Result<T>`.
///
/// A thin composition over the two-method core contract; no inheritance
/// involved. The wrapped cursor is closed when the iterator sees
/// exhaustion or an error, and again (idempotently) on drop. The iterator
/// is fused: once it has yielded `None` or an `Err`, every later call
/// returns `None` without touching the closed cursor.
pub struct CursorIter<C>
where
	C: Cursor,
{
	cursor: C,
	done: bool,
}

impl<C> CursorIter<C>
where
	C: Cursor,
{
	pub fn new(cursor: C) -> Self {
		Self {
			cursor,
			done: false,
		}
	}
}

impl<C> Iterator for CursorIter<C>
where
	C: Cursor,
	C::Item: Clone,
{
	type Item = Result<C::Item>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		match self.cursor.move_next() {
			Ok(true) => Some(self.cursor.current().cloned()),
			Ok(false) => {
				self.done = true;
				self.cursor.close();
				None
			}
			Err(err) => {
				self.done = true;
				self.cursor.close();
				Some(Err(err))
			}
		}
	}
}

impl<C> Drop for CursorIter<C>
where
	C: Cursor,
{
	fn drop(&mut self) {
		self.cursor.close();
	}
}
