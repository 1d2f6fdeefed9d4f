// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use sequo_core::{Cursor, CursorState, Result, Sequence};

/// Lazily expands each element into a sub-sequence and flattens the
/// results in encounter order.
#[derive(Debug, Clone)]
pub struct FlatMap<S, F> {
	input: S,
	mapping: F,
}

impl<S, F> FlatMap<S, F> {
	pub(crate) fn new(input: S, mapping: F) -> Self {
		Self {
			input,
			mapping,
		}
	}
}

impl<S, F, Sub> Sequence for FlatMap<S, F>
where
	S: Sequence,
	Sub: Sequence,
	F: Fn(&S::Item) -> Sub + Clone,
{
	type Item = Sub::Item;
	type Cursor = FlatMapCursor<S::Cursor, F, Sub>;

	fn cursor(&self) -> Self::Cursor {
		FlatMapCursor {
			input: self.input.cursor(),
			mapping: self.mapping.clone(),
			inner: None,
			state: CursorState::Unstarted,
		}
	}
}

pub struct FlatMapCursor<C, F, Sub>
where
	Sub: Sequence,
{
	input: C,
	mapping: F,
	inner: Option<Sub::Cursor>,
	state: CursorState,
}

impl<C, F, Sub> Cursor for FlatMapCursor<C, F, Sub>
where
	C: Cursor,
	Sub: Sequence,
	F: Fn(&C::Item) -> Sub,
{
	type Item = Sub::Item;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		loop {
			if let Some(inner) = self.inner.as_mut() {
				if inner.move_next()? {
					self.state = CursorState::Active;
					return Ok(true);
				}
				if let Some(mut spent) = self.inner.take() {
					spent.close();
				}
			}
			if !self.input.move_next()? {
				self.state = CursorState::Exhausted;
				return Ok(false);
			}
			let sub = (self.mapping)(self.input.current()?);
			self.inner = Some(sub.cursor());
		}
	}

	fn current(&self) -> Result<&Sub::Item> {
		self.state.ensure_active()?;
		self.inner.as_ref().expect("active flat_map cursor holds an inner cursor").current()
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			if let Some(mut inner) = self.inner.take() {
				inner.close();
			}
			self.input.close();
			self.state = CursorState::Closed;
		}
	}
}
