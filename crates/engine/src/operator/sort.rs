// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::trace;

use sequo_core::{Cursor, CursorState, Result, Sequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
	Asc,
	Desc,
}

/// One sort criterion. Criteria are applied in declaration order; later
/// criteria only break ties left by earlier ones.
pub struct SortSpec<T> {
	compare: Arc<dyn Fn(&T, &T) -> Ordering>,
	direction: SortDirection,
}

impl<T> Clone for SortSpec<T> {
	fn clone(&self) -> Self {
		Self {
			compare: self.compare.clone(),
			direction: self.direction,
		}
	}
}

impl<T> SortSpec<T> {
	pub fn by_key<K, F>(key: F, direction: SortDirection) -> Self
	where
		K: Ord,
		F: Fn(&T) -> K + 'static,
	{
		Self {
			compare: Arc::new(move |a, b| key(a).cmp(&key(b))),
			direction,
		}
	}

	pub fn by_key_with<K, F, C>(key: F, compare: C, direction: SortDirection) -> Self
	where
		F: Fn(&T) -> K + 'static,
		C: Fn(&K, &K) -> Ordering + 'static,
	{
		Self {
			compare: Arc::new(move |a, b| compare(&key(a), &key(b))),
			direction,
		}
	}

	pub fn by_compare<F>(compare: F, direction: SortDirection) -> Self
	where
		F: Fn(&T, &T) -> Ordering + 'static,
	{
		Self {
			compare: Arc::new(compare),
			direction,
		}
	}

	fn apply(&self, a: &T, b: &T) -> Ordering {
		let ordering = (self.compare)(a, b);
		match self.direction {
			SortDirection::Asc => ordering,
			SortDirection::Desc => ordering.reverse(),
		}
	}
}

/// A sorted view over the input.
///
/// Sorting is deferred: the source is materialized and sorted when a
/// cursor takes its first step. The sort is stable, so elements that
/// compare equal under every criterion keep their source order.
pub struct Ordered<S>
where
	S: Sequence,
{
	input: S,
	specs: Vec<SortSpec<S::Item>>,
}

impl<S> Clone for Ordered<S>
where
	S: Sequence + Clone,
{
	fn clone(&self) -> Self {
		Self {
			input: self.input.clone(),
			specs: self.specs.clone(),
		}
	}
}

impl<S> Ordered<S>
where
	S: Sequence,
{
	pub(crate) fn new(input: S, spec: SortSpec<S::Item>) -> Self {
		Self {
			input,
			specs: vec![spec],
		}
	}

	/// Appends an ascending tie-breaking criterion.
	pub fn then_by<K, F>(mut self, key: F) -> Self
	where
		K: Ord,
		F: Fn(&S::Item) -> K + 'static,
	{
		self.specs.push(SortSpec::by_key(key, SortDirection::Asc));
		self
	}

	/// Appends a descending tie-breaking criterion.
	pub fn then_by_desc<K, F>(mut self, key: F) -> Self
	where
		K: Ord,
		F: Fn(&S::Item) -> K + 'static,
	{
		self.specs.push(SortSpec::by_key(key, SortDirection::Desc));
		self
	}

	/// Appends an ascending tie-breaking criterion under an explicit key
	/// comparator.
	pub fn then_by_with<K, F, C>(mut self, key: F, compare: C) -> Self
	where
		F: Fn(&S::Item) -> K + 'static,
		C: Fn(&K, &K) -> Ordering + 'static,
	{
		self.specs.push(SortSpec::by_key_with(key, compare, SortDirection::Asc));
		self
	}

	/// Appends a descending tie-breaking criterion under an explicit key
	/// comparator.
	pub fn then_by_desc_with<K, F, C>(mut self, key: F, compare: C) -> Self
	where
		F: Fn(&S::Item) -> K + 'static,
		C: Fn(&K, &K) -> Ordering + 'static,
	{
		self.specs.push(SortSpec::by_key_with(key, compare, SortDirection::Desc));
		self
	}
}

impl<S> Sequence for Ordered<S>
where
	S: Sequence,
	S::Item: Clone,
{
	type Item = S::Item;
	type Cursor = OrderedCursor<S::Cursor>;

	fn cursor(&self) -> Self::Cursor {
		OrderedCursor {
			input: Some(self.input.cursor()),
			specs: self.specs.clone(),
			buffer: Vec::new(),
			pos: 0,
			state: CursorState::Unstarted,
		}
	}
}

pub struct OrderedCursor<C>
where
	C: Cursor,
{
	input: Option<C>,
	specs: Vec<SortSpec<C::Item>>,
	buffer: Vec<C::Item>,
	pos: usize,
	state: CursorState,
}

impl<C> Cursor for OrderedCursor<C>
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
			let specs = std::mem::take(&mut self.specs);
			self.buffer.sort_by(|a, b| {
				specs.iter()
					.map(|spec| spec.apply(a, b))
					.find(|ordering| *ordering != Ordering::Equal)
					.unwrap_or(Ordering::Equal)
			});
			trace!(elements = self.buffer.len(), criteria = specs.len(), "sort buffer materialized");
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
