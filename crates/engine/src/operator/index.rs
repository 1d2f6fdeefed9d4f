// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use sequo_core::{Cursor, CursorState, Indexed, Result, Sequence};

/// Lazily pairs each element with its 0-based encounter index.
#[derive(Debug, Clone)]
pub struct Index<S> {
	input: S,
}

impl<S> Index<S> {
	pub(crate) fn new(input: S) -> Self {
		Self {
			input,
		}
	}
}

impl<S> Sequence for Index<S>
where
	S: Sequence,
	S::Item: Clone,
{
	type Item = Indexed<S::Item>;
	type Cursor = IndexCursor<S::Cursor>;

	fn cursor(&self) -> Self::Cursor {
		IndexCursor {
			input: self.input.cursor(),
			next_index: 0,
			current: None,
			state: CursorState::Unstarted,
		}
	}
}

pub struct IndexCursor<C>
where
	C: Cursor,
{
	input: C,
	next_index: u64,
	current: Option<Indexed<C::Item>>,
	state: CursorState,
}

impl<C> Cursor for IndexCursor<C>
where
	C: Cursor,
	C::Item: Clone,
{
	type Item = Indexed<C::Item>;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if self.input.move_next()? {
			self.current = Some(Indexed::new(self.next_index, self.input.current()?.clone()));
			self.next_index += 1;
			self.state = CursorState::Active;
			Ok(true)
		} else {
			self.current = None;
			self.state = CursorState::Exhausted;
			Ok(false)
		}
	}

	fn current(&self) -> Result<&Indexed<C::Item>> {
		self.state.ensure_active()?;
		Ok(self.current.as_ref().expect("active index cursor holds a value"))
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			self.current = None;
			self.input.close();
			self.state = CursorState::Closed;
		}
	}
}
