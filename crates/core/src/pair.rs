// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use std::fmt::{Display, Formatter};

/// Two-element tuple returned by zip, join, count_by and aggregate_by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair<A, B> {
	pub first: A,
	pub second: B,
}

impl<A, B> Pair<A, B> {
	pub fn new(first: A, second: B) -> Self {
		Self {
			first,
			second,
		}
	}

	pub fn into_tuple(self) -> (A, B) {
		(self.first, self.second)
	}
}

impl<A, B> From<(A, B)> for Pair<A, B> {
	fn from((first, second): (A, B)) -> Self {
		Self::new(first, second)
	}
}

impl<A: Display, B: Display> Display for Pair<A, B> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "({}, {})", self.first, self.second)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_pair_display() {
		assert_eq!(Pair::new(2, "a").to_string(), "(2, a)");
	}

	#[test]
	fn test_pair_from_tuple_round_trip() {
		let pair: Pair<i32, i32> = (1, 2).into();
		assert_eq!(pair.into_tuple(), (1, 2));
	}
}
