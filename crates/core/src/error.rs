// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use thiserror::Error;

/// Failure modes of pipeline construction and cursor advancement.
///
/// Argument-shape errors that can be detected without enumerating anything
/// (a zero chunk size, for example) are raised when the pipeline is built.
/// Everything else surfaces lazily, from `move_next()`, and aborts that
/// enumeration. A failed enumeration holds no retry state; the consumer is
/// expected to `close()` the cursor and move on.
///
/// Caller-supplied closures (key extractors, comparators, predicates) are
/// infallible by signature. A panic inside one unwinds through the pulling
/// cursor unchanged, never wrapped into this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// An argument had an invalid shape, detected before enumeration.
	#[error("invalid argument `{argument}`: {message}")]
	InvalidArgument {
		argument: &'static str,
		message: String,
	},

	/// A mandatorily required element was absent.
	#[error("sequence contains no matching element")]
	NoSuchElement,

	/// A single-element lookup matched more than one element.
	#[error("sequence contains more than one matching element")]
	MultipleElementsFound,

	/// The cursor was driven outside its legal lifecycle.
	#[error("illegal cursor state: {reason}")]
	IllegalCursorState {
		reason: &'static str,
	},

	/// An aggregation exceeded the representable range.
	#[error("arithmetic overflow during aggregation")]
	Overflow,
}

impl Error {
	pub fn invalid_argument(argument: &'static str, message: impl Into<String>) -> Self {
		Self::InvalidArgument {
			argument,
			message: message.into(),
		}
	}

	pub fn illegal_cursor_state(reason: &'static str) -> Self {
		Self::IllegalCursorState {
			reason,
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_invalid_argument_display() {
		let err = Error::invalid_argument("size", "must be positive, but was 0");
		assert_eq!(err.to_string(), "invalid argument `size`: must be positive, but was 0");
	}

	#[test]
	fn test_illegal_cursor_state_display() {
		let err = Error::illegal_cursor_state("current() without a successful move_next()");
		assert_eq!(err.to_string(), "illegal cursor state: current() without a successful move_next()");
	}
}
