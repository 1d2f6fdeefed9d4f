// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use std::sync::Arc;

use crate::cursor::{Cursor, CursorState};
use crate::error::Result;

/// Immutable, re-enumerable declaration of an ordered source.
///
/// A sequence is a pure description: building one performs no work and
/// never drains the underlying source. Each [`cursor`](Sequence::cursor)
/// call returns an independent [`Cursor`] positioned before the first
/// element, with its own private buffers; enumerating twice yields the
/// same encounter order (unless a decorator such as shuffle is explicitly
/// randomized, in which case the randomization happens on first pull, per
/// cursor).
pub trait Sequence {
	type Item;
	type Cursor: Cursor<Item = Self::Item>;

	/// Create a fresh, independent cursor over this sequence.
	fn cursor(&self) -> Self::Cursor;
}

/// In-memory source sequence over shared, immutable storage.
///
/// Cheap to clone and to re-enumerate; every cursor shares the same
/// backing slice.
#[derive(Debug, Clone)]
pub struct Items<T> {
	items: Arc<[T]>,
}

impl<T> Items<T> {
	pub fn new(items: impl Into<Arc<[T]>>) -> Self {
		Self {
			items: items.into(),
		}
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn as_slice(&self) -> &[T] {
		&self.items
	}
}

impl<T> From<Vec<T>> for Items<T> {
	fn from(items: Vec<T>) -> Self {
		Self::new(items)
	}
}

impl<T> FromIterator<T> for Items<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect::<Vec<_>>())
	}
}

/// Declare a sequence over the given elements.
pub fn items<T>(items: impl IntoIterator<Item = T>) -> Items<T> {
	Items::from_iter(items)
}

impl<T> Sequence for Items<T> {
	type Item = T;
	type Cursor = ItemsCursor<T>;

	fn cursor(&self) -> Self::Cursor {
		ItemsCursor::over(Arc::clone(&self.items))
	}
}

pub struct ItemsCursor<T> {
	items: Arc<[T]>,
	pos: usize,
	state: CursorState,
}

impl<T> ItemsCursor<T> {
	pub(crate) fn over(items: Arc<[T]>) -> Self {
		Self {
			items,
			pos: 0,
			state: CursorState::Unstarted,
		}
	}
}

impl<T> Cursor for ItemsCursor<T> {
	type Item = T;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		let next = match self.state {
			CursorState::Unstarted => 0,
			CursorState::Active => self.pos + 1,
			_ => return Ok(false),
		};
		if next < self.items.len() {
			self.pos = next;
			self.state = CursorState::Active;
			Ok(true)
		} else {
			self.state = CursorState::Exhausted;
			Ok(false)
		}
	}

	fn current(&self) -> Result<&T> {
		self.state.ensure_active()?;
		Ok(&self.items[self.pos])
	}

	fn close(&mut self) {
		self.state = CursorState::Closed;
	}
}

/// The empty sequence.
#[derive(Debug, Clone, Default)]
pub struct Empty<T> {
	_marker: std::marker::PhantomData<T>,
}

/// Declare a sequence with no elements.
pub fn empty<T>() -> Empty<T> {
	Empty {
		_marker: std::marker::PhantomData,
	}
}

impl<T> Sequence for Empty<T> {
	type Item = T;
	type Cursor = EmptyCursor<T>;

	fn cursor(&self) -> Self::Cursor {
		EmptyCursor {
			state: CursorState::Unstarted,
			_marker: std::marker::PhantomData,
		}
	}
}

pub struct EmptyCursor<T> {
	state: CursorState,
	_marker: std::marker::PhantomData<T>,
}

impl<T> Cursor for EmptyCursor<T> {
	type Item = T;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		self.state = CursorState::Exhausted;
		Ok(false)
	}

	fn current(&self) -> Result<&T> {
		self.state.ensure_active()?;
		unreachable!("empty cursor is never active")
	}

	fn close(&mut self) {
		self.state = CursorState::Closed;
	}
}

/// Declare a single-element sequence.
pub fn once<T>(value: T) -> Items<T> {
	Items::new(vec![value])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_items_yields_in_order() {
		let seq = items(vec![3, 1, 2]);
		let mut cursor = seq.cursor();
		let mut out = Vec::new();
		while cursor.move_next().unwrap() {
			out.push(*cursor.current().unwrap());
		}
		cursor.close();
		assert_eq!(out, vec![3, 1, 2]);
	}

	#[test]
	fn test_items_is_re_enumerable() {
		let seq = items(vec![1, 2]);
		for _ in 0..3 {
			let mut cursor = seq.cursor();
			assert!(cursor.move_next().unwrap());
			assert_eq!(cursor.current().unwrap(), &1);
			assert!(cursor.move_next().unwrap());
			assert!(!cursor.move_next().unwrap());
		}
	}

	#[test]
	fn test_independent_cursors_do_not_share_position() {
		let seq = items(vec![1, 2, 3]);
		let mut a = seq.cursor();
		let mut b = seq.cursor();
		assert!(a.move_next().unwrap());
		assert!(a.move_next().unwrap());
		assert!(b.move_next().unwrap());
		assert_eq!(a.current().unwrap(), &2);
		assert_eq!(b.current().unwrap(), &1);
	}

	#[test]
	fn test_empty_sequence_has_no_elements() {
		let seq = empty::<i32>();
		let mut cursor = seq.cursor();
		assert!(!cursor.move_next().unwrap());
	}

	#[test]
	fn test_once_yields_single_element() {
		let seq = once(42);
		let mut cursor = seq.cursor();
		assert!(cursor.move_next().unwrap());
		assert_eq!(cursor.current().unwrap(), &42);
		assert!(!cursor.move_next().unwrap());
	}
}
