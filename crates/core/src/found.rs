// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use crate::error::{Error, Result};

/// Tagged result of a single-element lookup.
///
/// Distinguishes "no element matched" from "an element matched" without
/// relying on a sentinel value, so a matched default/zero value is never
/// mistaken for absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found<T> {
	Found(T),
	Missing,
}

impl<T> Found<T> {
	pub fn is_found(&self) -> bool {
		matches!(self, Found::Found(_))
	}

	/// The value, or [`Error::NoSuchElement`] when nothing matched.
	pub fn required(self) -> Result<T> {
		match self {
			Found::Found(value) => Ok(value),
			Found::Missing => Err(Error::NoSuchElement),
		}
	}

	/// The value, or the supplied default when nothing matched.
	pub fn or_default(self, default: T) -> T {
		match self {
			Found::Found(value) => value,
			Found::Missing => default,
		}
	}

	pub fn into_option(self) -> Option<T> {
		match self {
			Found::Found(value) => Some(value),
			Found::Missing => None,
		}
	}
}

impl<T> From<Option<T>> for Found<T> {
	fn from(value: Option<T>) -> Self {
		match value {
			Some(value) => Found::Found(value),
			None => Found::Missing,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_found_required() {
		assert_eq!(Found::Found(7).required(), Ok(7));
		assert_eq!(Found::<i32>::Missing.required(), Err(Error::NoSuchElement));
	}

	#[test]
	fn test_found_zero_value_is_not_missing() {
		let found = Found::Found(0);
		assert!(found.is_found());
		assert_eq!(found.or_default(9), 0);
		assert_eq!(Found::Missing.or_default(9), 9);
	}
}
