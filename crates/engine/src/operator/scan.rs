// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use sequo_core::{Cursor, CursorState, Result, Sequence};

/// Lazily yields the running accumulation of the input.
///
/// The seed itself is the first output, so a source of `n` elements
/// produces `n + 1` values.
#[derive(Debug, Clone)]
pub struct Scan<S, A, F> {
	input: S,
	seed: A,
	fold: F,
}

impl<S, A, F> Scan<S, A, F> {
	pub(crate) fn new(input: S, seed: A, fold: F) -> Self {
		Self {
			input,
			seed,
			fold,
		}
	}
}

impl<S, A, F> Sequence for Scan<S, A, F>
where
	S: Sequence,
	A: Clone,
	F: Fn(&A, &S::Item) -> A + Clone,
{
	type Item = A;
	type Cursor = ScanCursor<S::Cursor, A, F>;

	fn cursor(&self) -> Self::Cursor {
		ScanCursor {
			input: self.input.cursor(),
			seed: self.seed.clone(),
			fold: self.fold.clone(),
			current: None,
			state: CursorState::Unstarted,
		}
	}
}

pub struct ScanCursor<C, A, F> {
	input: C,
	seed: A,
	fold: F,
	current: Option<A>,
	state: CursorState,
}

impl<C, A, F> Cursor for ScanCursor<C, A, F>
where
	C: Cursor,
	A: Clone,
	F: Fn(&A, &C::Item) -> A,
{
	type Item = A;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		match &self.current {
			None => {
				self.current = Some(self.seed.clone());
				self.state = CursorState::Active;
				Ok(true)
			}
			Some(accumulator) => {
				if self.input.move_next()? {
					let next = (self.fold)(accumulator, self.input.current()?);
					self.current = Some(next);
					self.state = CursorState::Active;
					Ok(true)
				} else {
					self.state = CursorState::Exhausted;
					Ok(false)
				}
			}
		}
	}

	fn current(&self) -> Result<&A> {
		self.state.ensure_active()?;
		Ok(self.current.as_ref().expect("active scan cursor holds an accumulator"))
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			self.current = None;
			self.input.close();
			self.state = CursorState::Closed;
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::SequenceOps;
	use sequo_core::items;
	use sequo_testing::collect;

	#[test]
	fn test_scan_emits_the_seed_first() {
		let seq = items(vec![1, 2, 3]).scan(0, |acc, v| acc + v);
		assert_eq!(collect(&seq), vec![0, 1, 3, 6]);
	}

	#[test]
	fn test_scan_of_empty_yields_only_the_seed() {
		let seq = items(Vec::<i32>::new()).scan(10, |acc, v| acc + v);
		assert_eq!(collect(&seq), vec![10]);
	}
}
