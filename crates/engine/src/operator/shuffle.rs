// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use rand::seq::SliceRandom;
use tracing::trace;

use sequo_core::{Cursor, CursorState, Result, Sequence};

/// Yields the input in randomized order.
///
/// Declaring the shuffle performs no work and draws no randomness; the
/// source is materialized and permuted on the first pull of each cursor,
/// so separate enumerations produce independent permutations.
#[derive(Debug, Clone)]
pub struct Shuffle<S> {
	input: S,
}

impl<S> Shuffle<S> {
	pub(crate) fn new(input: S) -> Self {
		Self {
			input,
		}
	}
}

impl<S> Sequence for Shuffle<S>
where
	S: Sequence,
	S::Item: Clone,
{
	type Item = S::Item;
	type Cursor = ShuffleCursor<S::Cursor>;

	fn cursor(&self) -> Self::Cursor {
		ShuffleCursor {
			input: Some(self.input.cursor()),
			buffer: Vec::new(),
			pos: 0,
			state: CursorState::Unstarted,
		}
	}
}

pub struct ShuffleCursor<C>
where
	C: Cursor,
{
	input: Option<C>,
	buffer: Vec<C::Item>,
	pos: usize,
	state: CursorState,
}

impl<C> Cursor for ShuffleCursor<C>
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
			while input.move_next()? {
				self.buffer.push(input.current()?.clone());
			}
			input.close();
			self.buffer.shuffle(&mut rand::rng());
			trace!(elements = self.buffer.len(), "shuffle buffer materialized");
		} else if self.state == CursorState::Active {
			self.pos += 1;
		}
		if self.pos < self.buffer.len() {
			self.state = CursorState::Active;
			Ok(true)
		} else {
			self.state = CursorState::Exhausted;
			Ok(false)
		}
	}

	fn current(&self) -> Result<&C::Item> {
		self.state.ensure_active()?;
		Ok(&self.buffer[self.pos])
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
