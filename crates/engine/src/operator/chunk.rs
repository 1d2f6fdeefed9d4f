// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use sequo_core::{Cursor, CursorState, Error, Result, Sequence};

/// Lazily batches the input into runs of `size` elements.
///
/// Every batch is full except possibly the last. A batch is only pulled
/// together when the downstream asks for it.
#[derive(Debug, Clone)]
pub struct Chunk<S> {
	input: S,
	size: usize,
}

impl<S> Chunk<S> {
	pub(crate) fn new(input: S, size: usize) -> Result<Self> {
		if size == 0 {
			return Err(Error::invalid_argument("size", "chunk size must be positive"));
		}
		Ok(Self {
			input,
			size,
		})
	}
}

impl<S> Sequence for Chunk<S>
where
	S: Sequence,
	S::Item: Clone,
{
	type Item = Vec<S::Item>;
	type Cursor = ChunkCursor<S::Cursor>;

	fn cursor(&self) -> Self::Cursor {
		ChunkCursor {
			input: self.input.cursor(),
			size: self.size,
			current: None,
			state: CursorState::Unstarted,
		}
	}
}

pub struct ChunkCursor<C>
where
	C: Cursor,
{
	input: C,
	size: usize,
	current: Option<Vec<C::Item>>,
	state: CursorState,
}

impl<C> Cursor for ChunkCursor<C>
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
		let mut batch = Vec::with_capacity(self.size);
		while batch.len() < self.size && self.input.move_next()? {
			batch.push(self.input.current()?.clone());
		}
		if batch.is_empty() {
			self.current = None;
			self.state = CursorState::Exhausted;
			Ok(false)
		} else {
			self.current = Some(batch);
			self.state = CursorState::Active;
			Ok(true)
		}
	}

	fn current(&self) -> Result<&Vec<C::Item>> {
		self.state.ensure_active()?;
		Ok(self.current.as_ref().expect("active chunk cursor holds a batch"))
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
	fn test_chunk_batches_with_a_short_tail() {
		let seq = items(vec![1, 2, 3, 4, 5]).chunk(2).unwrap();
		assert_eq!(collect(&seq), vec![vec![1, 2], vec![3, 4], vec![5]]);
	}

	#[test]
	fn test_chunk_exact_multiple() {
		let seq = items(vec![1, 2, 3, 4]).chunk(2).unwrap();
		assert_eq!(collect(&seq), vec![vec![1, 2], vec![3, 4]]);
	}

	#[test]
	fn test_chunk_of_empty_is_empty() {
		let seq = items(Vec::<i32>::new()).chunk(3).unwrap();
		assert!(collect(&seq).is_empty());
	}

	#[test]
	fn test_chunk_rejects_zero_size() {
		assert!(items(vec![1]).chunk(0).is_err());
	}
}
