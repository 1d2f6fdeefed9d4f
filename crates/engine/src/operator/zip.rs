// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use sequo_core::{Cursor, CursorState, Result, Sequence};

/// Lazily combines two inputs element by element.
///
/// Output length is the shorter of the two; once either side runs out,
/// both upstream cursors are closed.
#[derive(Debug, Clone)]
pub struct Zip<S, O, F> {
	input: S,
	other: O,
	combine: F,
}

impl<S, O, F> Zip<S, O, F> {
	pub(crate) fn new(input: S, other: O, combine: F) -> Self {
		Self {
			input,
			other,
			combine,
		}
	}
}

impl<S, O, F, R> Sequence for Zip<S, O, F>
where
	S: Sequence,
	O: Sequence,
	F: Fn(&S::Item, &O::Item) -> R + Clone,
{
	type Item = R;
	type Cursor = ZipCursor<S::Cursor, O::Cursor, F, R>;

	fn cursor(&self) -> Self::Cursor {
		ZipCursor {
			input: self.input.cursor(),
			other: self.other.cursor(),
			combine: self.combine.clone(),
			current: None,
			state: CursorState::Unstarted,
		}
	}
}

pub struct ZipCursor<C, OC, F, R> {
	input: C,
	other: OC,
	combine: F,
	current: Option<R>,
	state: CursorState,
}

impl<C, OC, F, R> Cursor for ZipCursor<C, OC, F, R>
where
	C: Cursor,
	OC: Cursor,
	F: Fn(&C::Item, &OC::Item) -> R,
{
	type Item = R;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if self.input.move_next()? && self.other.move_next()? {
			self.current = Some((self.combine)(self.input.current()?, self.other.current()?));
			self.state = CursorState::Active;
			Ok(true)
		} else {
			self.input.close();
			self.other.close();
			self.current = None;
			self.state = CursorState::Exhausted;
			Ok(false)
		}
	}

	fn current(&self) -> Result<&R> {
		self.state.ensure_active()?;
		Ok(self.current.as_ref().expect("active zip cursor holds a value"))
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			self.input.close();
			self.other.close();
			self.current = None;
			self.state = CursorState::Closed;
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::SequenceOps;
	use sequo_core::{Pair, items};
	use sequo_testing::collect;

	#[test]
	fn test_zip_pairs_up_to_the_shorter_side() {
		let seq = items(vec![1, 2, 3]).zip(items(vec!["a", "b"]));
		assert_eq!(collect(&seq), vec![Pair::new(1, "a"), Pair::new(2, "b")]);
	}

	#[test]
	fn test_zip_with_combiner() {
		let seq = items(vec![1, 2, 3]).zip_with(items(vec![10, 20, 30]), |a, b| a + b);
		assert_eq!(collect(&seq), vec![11, 22, 33]);
	}

	#[test]
	fn test_zip_with_empty_side_is_empty() {
		let seq = items(vec![1, 2]).zip(items(Vec::<i32>::new()));
		assert!(collect(&seq).is_empty());
	}
}
