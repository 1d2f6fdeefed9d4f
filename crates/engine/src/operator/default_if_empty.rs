// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use sequo_core::{Cursor, CursorState, Result, Sequence};

/// Yields the input unchanged, or a single default element when the input
/// turns out to be empty.
///
/// Emptiness is only discovered on first pull, so the default is held
/// until then.
#[derive(Debug, Clone)]
pub struct DefaultIfEmpty<S>
where
	S: Sequence,
{
	input: S,
	default: S::Item,
}

impl<S> DefaultIfEmpty<S>
where
	S: Sequence,
{
	pub(crate) fn new(input: S, default: S::Item) -> Self {
		Self {
			input,
			default,
		}
	}
}

impl<S> Sequence for DefaultIfEmpty<S>
where
	S: Sequence,
	S::Item: Clone,
{
	type Item = S::Item;
	type Cursor = DefaultIfEmptyCursor<S::Cursor>;

	fn cursor(&self) -> Self::Cursor {
		DefaultIfEmptyCursor {
			input: self.input.cursor(),
			default: self.default.clone(),
			on_default: false,
			started: false,
			state: CursorState::Unstarted,
		}
	}
}

pub struct DefaultIfEmptyCursor<C>
where
	C: Cursor,
{
	input: C,
	default: C::Item,
	on_default: bool,
	started: bool,
	state: CursorState,
}

impl<C> Cursor for DefaultIfEmptyCursor<C>
where
	C: Cursor,
{
	type Item = C::Item;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if self.on_default {
			self.state = CursorState::Exhausted;
			return Ok(false);
		}
		if self.input.move_next()? {
			self.started = true;
			self.state = CursorState::Active;
			return Ok(true);
		}
		if !self.started {
			self.input.close();
			self.on_default = true;
			self.state = CursorState::Active;
			return Ok(true);
		}
		self.state = CursorState::Exhausted;
		Ok(false)
	}

	fn current(&self) -> Result<&C::Item> {
		self.state.ensure_active()?;
		if self.on_default {
			Ok(&self.default)
		} else {
			self.input.current()
		}
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			if !self.on_default {
				self.input.close();
			}
			self.state = CursorState::Closed;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::SequenceOps;
	use sequo_core::{empty, items};
	use sequo_testing::collect;

	#[test]
	fn test_non_empty_input_passes_through() {
		assert_eq!(collect(&items(vec![1, 2]).default_if_empty(9)), vec![1, 2]);
	}

	#[test]
	fn test_empty_input_yields_the_default_once() {
		assert_eq!(collect(&empty().default_if_empty(9)), vec![9]);
	}
}
