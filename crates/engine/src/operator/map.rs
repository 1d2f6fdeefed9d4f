// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use sequo_core::{Cursor, CursorState, Result, Sequence};

/// Lazily projects each element through a mapping function.
#[derive(Debug, Clone)]
pub struct Map<S, F> {
	input: S,
	mapping: F,
}

impl<S, F> Map<S, F> {
	pub(crate) fn new(input: S, mapping: F) -> Self {
		Self {
			input,
			mapping,
		}
	}
}

impl<S, F, R> Sequence for Map<S, F>
where
	S: Sequence,
	F: Fn(&S::Item) -> R + Clone,
{
	type Item = R;
	type Cursor = MapCursor<S::Cursor, F, R>;

	fn cursor(&self) -> Self::Cursor {
		MapCursor {
			input: self.input.cursor(),
			mapping: self.mapping.clone(),
			current: None,
			state: CursorState::Unstarted,
		}
	}
}

pub struct MapCursor<C, F, R> {
	input: C,
	mapping: F,
	current: Option<R>,
	state: CursorState,
}

impl<C, F, R> Cursor for MapCursor<C, F, R>
where
	C: Cursor,
	F: Fn(&C::Item) -> R,
{
	type Item = R;

	fn move_next(&mut self) -> Result<bool> {
		self.state.ensure_open()?;
		if self.state == CursorState::Exhausted {
			return Ok(false);
		}
		if self.input.move_next()? {
			self.current = Some((self.mapping)(self.input.current()?));
			self.state = CursorState::Active;
			Ok(true)
		} else {
			self.current = None;
			self.state = CursorState::Exhausted;
			Ok(false)
		}
	}

	fn current(&self) -> Result<&R> {
		self.state.ensure_active()?;
		Ok(self.current.as_ref().expect("active map cursor holds a value"))
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
	use super::*;
	use crate::SequenceOps;
	use sequo_core::items;
	use sequo_testing::collect;

	#[test]
	fn test_map_projects_each_element() {
		let seq = items(vec![1, 2, 3]).map(|x| x * 10);
		assert_eq!(collect(&seq), vec![10, 20, 30]);
	}

	#[test]
	fn test_map_changes_element_type() {
		let seq = items(vec![1, 22]).map(|x| x.to_string());
		assert_eq!(collect(&seq), vec!["1".to_string(), "22".to_string()]);
	}

	#[test]
	fn test_map_is_lazy() {
		use std::sync::atomic::{AtomicUsize, Ordering};
		let calls = std::sync::Arc::new(AtomicUsize::new(0));
		let counted = std::sync::Arc::clone(&calls);
		let seq = items(vec![1, 2, 3]).map(move |x| {
			counted.fetch_add(1, Ordering::SeqCst);
			x + 1
		});
		assert_eq!(calls.load(Ordering::SeqCst), 0);
		let mut cursor = seq.cursor();
		assert!(cursor.move_next().unwrap());
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		cursor.close();
	}
}
