// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use sequo_core::{Cursor, CursorState, Result, Sequence};

/// Lazily yields the input followed by one extra element.
#[derive(Debug, Clone)]
pub struct Append<S>
where
	S: Sequence,
{
	input: S,
	element: S::Item,
}

impl<S> Append<S>
where
	S: Sequence,
{
	pub(crate) fn new(input: S, element: S::Item) -> Self {
		Self {
			input,
			element,
		}
	}
}

impl<S> Sequence for Append<S>
where
	S: Sequence,
	S::Item: Clone,
{
	type Item = S::Item;
	type Cursor = AppendCursor<S::Cursor>;

	fn cursor(&self) -> Self::Cursor {
		AppendCursor {
			input: self.input.cursor(),
			element: self.element.clone(),
			on_extra: false,
			state: CursorState::Unstarted,
		}
	}
}

pub struct AppendCursor<C>
where
	C: Cursor,
{
	input: C,
	element: C::Item,
	on_extra: bool,
	state: CursorState,
}

impl<C> Cursor for AppendCursor<C>
where
	C: Cursor,
{
	type Item = C::Item;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if self.on_extra {
			self.state = CursorState::Exhausted;
			return Ok(false);
		}
		if self.input.move_next()? {
			self.state = CursorState::Active;
			Ok(true)
		} else {
			self.input.close();
			self.on_extra = true;
			self.state = CursorState::Active;
			Ok(true)
		}
	}

	fn current(&self) -> Result<&C::Item> {
		self.state.ensure_active()?;
		if self.on_extra {
			Ok(&self.element)
		} else {
			self.input.current()
		}
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			if !self.on_extra {
				self.input.close();
			}
			self.state = CursorState::Closed;
		}
	}
}

/// Lazily yields one extra element followed by the input.
#[derive(Debug, Clone)]
pub struct Prepend<S>
where
	S: Sequence,
{
	input: S,
	element: S::Item,
}

impl<S> Prepend<S>
where
	S: Sequence,
{
	pub(crate) fn new(input: S, element: S::Item) -> Self {
		Self {
			input,
			element,
		}
	}
}

impl<S> Sequence for Prepend<S>
where
	S: Sequence,
	S::Item: Clone,
{
	type Item = S::Item;
	type Cursor = PrependCursor<S::Cursor>;

	fn cursor(&self) -> Self::Cursor {
		PrependCursor {
			input: self.input.cursor(),
			element: self.element.clone(),
			emitted_extra: false,
			on_extra: false,
			state: CursorState::Unstarted,
		}
	}
}

pub struct PrependCursor<C>
where
	C: Cursor,
{
	input: C,
	element: C::Item,
	emitted_extra: bool,
	on_extra: bool,
	state: CursorState,
}

impl<C> Cursor for PrependCursor<C>
where
	C: Cursor,
{
	type Item = C::Item;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if !self.emitted_extra {
			self.emitted_extra = true;
			self.on_extra = true;
			self.state = CursorState::Active;
			return Ok(true);
		}
		self.on_extra = false;
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
		if self.on_extra {
			Ok(&self.element)
		} else {
			self.input.current()
		}
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			self.input.close();
			self.state = CursorState::Closed;
		}
	}
}
