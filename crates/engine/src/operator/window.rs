// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use std::collections::VecDeque;

use sequo_core::{Cursor, CursorState, Error, Result, Sequence};

/// Lazily yields sliding windows of `size` elements, advancing by `step`
/// between windows.
///
/// Only full windows are emitted; a tail shorter than `size` is
/// discarded. With `step < size` consecutive windows overlap, with
/// `step > size` elements between windows are skipped.
#[derive(Debug, Clone)]
pub struct Window<S> {
	input: S,
	size: usize,
	step: usize,
}

impl<S> Window<S> {
	pub(crate) fn new(input: S, size: usize, step: usize) -> Result<Self> {
		if size == 0 {
			return Err(Error::invalid_argument("size", "window size must be positive"));
		}
		if step == 0 {
			return Err(Error::invalid_argument("step", "window step must be positive"));
		}
		Ok(Self {
			input,
			size,
			step,
		})
	}
}

impl<S> Sequence for Window<S>
where
	S: Sequence,
	S::Item: Clone,
{
	type Item = Vec<S::Item>;
	type Cursor = WindowCursor<S::Cursor>;

	fn cursor(&self) -> Self::Cursor {
		WindowCursor {
			input: self.input.cursor(),
			size: self.size,
			step: self.step,
			buffer: VecDeque::with_capacity(self.size),
			started: false,
			current: None,
			state: CursorState::Unstarted,
		}
	}
}

pub struct WindowCursor<C>
where
	C: Cursor,
{
	input: C,
	size: usize,
	step: usize,
	// Retained overlap between consecutive windows.
	buffer: VecDeque<C::Item>,
	started: bool,
	current: Option<Vec<C::Item>>,
	state: CursorState,
}

impl<C> Cursor for WindowCursor<C>
where
	C: Cursor,
	C::Item: Clone,
{
	type Item = Vec<C::Item>;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if self.started {
			for _ in 0..self.step.min(self.size) {
				self.buffer.pop_front();
			}
			// With step > size there is a gap of upstream elements that
			// belongs to no window.
			for _ in self.size..self.step {
				if !self.input.move_next()? {
					self.current = None;
					self.state = CursorState::Exhausted;
					return Ok(false);
				}
			}
		}
		self.started = true;
		while self.buffer.len() < self.size {
			if !self.input.move_next()? {
				self.current = None;
				self.state = CursorState::Exhausted;
				return Ok(false);
			}
			self.buffer.push_back(self.input.current()?.clone());
		}
		self.current = Some(self.buffer.iter().cloned().collect());
		self.state = CursorState::Active;
		Ok(true)
	}

	fn current(&self) -> Result<&Vec<C::Item>> {
		self.state.ensure_active()?;
		Ok(self.current.as_ref().expect("active window cursor holds a window"))
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			self.buffer.clear();
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
	fn test_window_slides_by_one() {
		let seq = items(vec![1, 2, 3, 4, 5]).window(3, 1).unwrap();
		assert_eq!(collect(&seq), vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]);
	}

	#[test]
	fn test_window_with_larger_step_skips_elements() {
		let seq = items(vec![1, 2, 3, 4, 5, 6, 7]).window(2, 3).unwrap();
		assert_eq!(collect(&seq), vec![vec![1, 2], vec![4, 5]]);
	}

	#[test]
	fn test_window_never_emits_a_short_window() {
		let seq = items(vec![1, 2]).window(3, 1).unwrap();
		assert!(collect(&seq).is_empty());
	}

	#[test]
	fn test_window_equal_step_tiles_the_input() {
		let seq = items(vec![1, 2, 3, 4]).window(2, 2).unwrap();
		assert_eq!(collect(&seq), vec![vec![1, 2], vec![3, 4]]);
	}

	#[test]
	fn test_window_rejects_zero_arguments() {
		assert!(items(vec![1]).window(0, 1).is_err());
		assert!(items(vec![1]).window(1, 0).is_err());
	}
}
