// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

//! Test utilities shared across the workspace: full-drain collection and
//! close-tracking sequence wrappers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use sequo_core::{Cursor, CursorState, Result, Sequence};

/// Drains a fresh cursor into a `Vec`, panicking on any cursor error.
pub fn collect<S>(seq: &S) -> Vec<S::Item>
where
	S: Sequence,
	S::Item: Clone,
{
	try_collect(seq).expect("sequence enumerates without error")
}

/// Drains a fresh cursor into a `Vec`, closing it afterwards.
pub fn try_collect<S>(seq: &S) -> Result<Vec<S::Item>>
where
	S: Sequence,
	S::Item: Clone,
{
	let mut cursor = seq.cursor();
	let mut out = Vec::new();
	loop {
		match cursor.move_next() {
			Ok(true) => match cursor.current() {
				Ok(item) => out.push(item.clone()),
				Err(err) => {
					cursor.close();
					return Err(err);
				}
			},
			Ok(false) => {
				cursor.close();
				return Ok(out);
			}
			Err(err) => {
				cursor.close();
				return Err(err);
			}
		}
	}
}

/// Wraps a sequence and counts, across all cursors it hands out, how
/// often `close()` reached the wrapped side. Clones share the counters,
/// so the original handle observes closes of cursors opened downstream.
#[derive(Clone)]
pub struct TrackingSequence<S> {
	inner: S,
	opened: Arc<AtomicUsize>,
	closed: Arc<AtomicUsize>,
}

impl<S> TrackingSequence<S> {
	pub fn new(inner: S) -> Self {
		Self {
			inner,
			opened: Arc::new(AtomicUsize::new(0)),
			closed: Arc::new(AtomicUsize::new(0)),
		}
	}

	/// Number of cursors opened on the wrapped sequence.
	pub fn opened(&self) -> usize {
		self.opened.load(Ordering::SeqCst)
	}

	/// Number of those cursors that have been closed.
	pub fn closed(&self) -> usize {
		self.closed.load(Ordering::SeqCst)
	}
}

impl<S> Sequence for TrackingSequence<S>
where
	S: Sequence,
{
	type Item = S::Item;
	type Cursor = TrackingCursor<S::Cursor>;

	fn cursor(&self) -> Self::Cursor {
		self.opened.fetch_add(1, Ordering::SeqCst);
		TrackingCursor {
			inner: self.inner.cursor(),
			closed: Arc::clone(&self.closed),
			state: CursorState::Unstarted,
		}
	}
}

pub struct TrackingCursor<C> {
	inner: C,
	closed: Arc<AtomicUsize>,
	state: CursorState,
}

impl<C> Cursor for TrackingCursor<C>
where
	C: Cursor,
{
	type Item = C::Item;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if self.inner.move_next()? {
			self.state = CursorState::Active;
			Ok(true)
		} else {
			self.state = CursorState::Exhausted;
			Ok(false)
		}
	}

	fn current(&self) -> Result<&C::Item> {
		self.state.ensure_active()?;
		self.inner.current()
	}

	fn close(&mut self) {
		if !self.state.is_closed() {
			self.inner.close();
			self.closed.fetch_add(1, Ordering::SeqCst);
			self.state = CursorState::Closed;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use sequo_core::items;

	#[test]
	fn test_collect_drains_in_order() {
		assert_eq!(collect(&items(vec![1, 2, 3])), vec![1, 2, 3]);
	}

	#[test]
	fn test_tracking_counts_opens_and_closes() {
		let seq = TrackingSequence::new(items(vec![1, 2]));
		assert_eq!(seq.opened(), 0);
		let mut cursor = seq.cursor();
		assert_eq!(seq.opened(), 1);
		assert_eq!(seq.closed(), 0);
		cursor.close();
		cursor.close();
		assert_eq!(seq.closed(), 1);
	}
}
