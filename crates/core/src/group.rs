// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use std::sync::Arc;

use crate::sequence::{ItemsCursor, Sequence};

/// Ordered, immutable bucket of elements sharing one key.
///
/// Membership is fixed at construction; the API exposes no mutation.
/// Element order is the sub-order of the source elements that produced
/// the key. A group is itself a [`Sequence`], so it can be fed back into
/// any operator.
#[derive(Debug, Clone)]
pub struct Group<K, E> {
	key: K,
	elements: Arc<[E]>,
}

impl<K, E> Group<K, E> {
	pub fn new(key: K, elements: impl Into<Arc<[E]>>) -> Self {
		Self {
			key,
			elements: elements.into(),
		}
	}

	pub fn key(&self) -> &K {
		&self.key
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// Ordered random access.
	pub fn get(&self, index: usize) -> Option<&E> {
		self.elements.get(index)
	}

	pub fn iter(&self) -> std::slice::Iter<'_, E> {
		self.elements.iter()
	}

	pub fn as_slice(&self) -> &[E] {
		&self.elements
	}

	pub fn contains(&self, element: &E) -> bool
	where
		E: PartialEq,
	{
		self.elements.contains(element)
	}
}

impl<K, E> Sequence for Group<K, E> {
	type Item = E;
	type Cursor = ItemsCursor<E>;

	fn cursor(&self) -> Self::Cursor {
		ItemsCursor::over(Arc::clone(&self.elements))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cursor::Cursor;

	#[test]
	fn test_group_exposes_key_and_elements_in_order() {
		let group = Group::new("even", vec![2, 4, 6]);
		assert_eq!(group.key(), &"even");
		assert_eq!(group.len(), 3);
		assert_eq!(group.get(1), Some(&4));
		assert_eq!(group.get(3), None);
		assert!(group.contains(&6));
		assert!(!group.contains(&3));
	}

	#[test]
	fn test_group_is_a_sequence() {
		let group = Group::new(0, vec![3, 6]);
		let mut cursor = group.cursor();
		let mut out = Vec::new();
		while cursor.move_next().unwrap() {
			out.push(*cursor.current().unwrap());
		}
		assert_eq!(out, vec![3, 6]);
	}
}
