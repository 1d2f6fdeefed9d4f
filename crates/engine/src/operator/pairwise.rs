// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use sequo_core::{Cursor, CursorState, Pair, Result, Sequence};

/// Lazily yields each adjacent pair `(previous, next)`.
///
/// A source with fewer than two elements yields nothing.
#[derive(Debug, Clone)]
pub struct Pairwise<S> {
	input: S,
}

impl<S> Pairwise<S> {
	pub(crate) fn new(input: S) -> Self {
		Self {
			input,
		}
	}
}

impl<S> Sequence for Pairwise<S>
where
	S: Sequence,
	S::Item: Clone,
{
	type Item = Pair<S::Item, S::Item>;
	type Cursor = PairwiseCursor<S::Cursor>;

	fn cursor(&self) -> Self::Cursor {
		PairwiseCursor {
			input: self.input.cursor(),
			previous: None,
			current: None,
			state: CursorState::Unstarted,
		}
	}
}

pub struct PairwiseCursor<C>
where
	C: Cursor,
{
	input: C,
	previous: Option<C::Item>,
	current: Option<Pair<C::Item, C::Item>>,
	state: CursorState,
}

impl<C> Cursor for PairwiseCursor<C>
where
	C: Cursor,
	C::Item: Clone,
{
	type Item = Pair<C::Item, C::Item>;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if self.previous.is_none() {
			if !self.input.move_next()? {
				self.state = CursorState::Exhausted;
				return Ok(false);
			}
			self.previous = Some(self.input.current()?.clone());
		}
		if self.input.move_next()? {
			let next = self.input.current()?.clone();
			let previous = self.previous.replace(next.clone()).expect("pairwise cursor primed its previous element");
			self.current = Some(Pair::new(previous, next));
			self.state = CursorState::Active;
			Ok(true)
		} else {
			self.current = None;
			self.state = CursorState::Exhausted;
			Ok(false)
		}
	}

	fn current(&self) -> Result<&Pair<C::Item, C::Item>> {
		self.state.ensure_active()?;
		Ok(self.current.as_ref().expect("active pairwise cursor holds a value"))
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			self.previous = None;
			self.current = None;
			self.input.close();
			self.state = CursorState::Closed;
		}
	}
}
