// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

/// An element with its 0-based encounter index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Indexed<T> {
	pub index: u64,
	pub value: T,
}

impl<T> Indexed<T> {
	pub fn new(index: u64, value: T) -> Self {
		Self {
			index,
			value,
		}
	}
}
