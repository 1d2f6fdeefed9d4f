// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

//! Sequence/cursor contract for Sequo.
//!
//! A [`Sequence`] is a pure, re-enumerable declaration of an ordered
//! source; a [`Cursor`] is the single-pass handle that actually performs
//! work, one `move_next()` at a time. Operator crates build on this
//! contract together with the [`Equivalence`] strategy abstraction and the
//! [`Group`]/[`Pair`]/[`Found`] data model.

pub mod cursor;
pub mod equivalence;
pub mod error;
pub mod found;
pub mod group;
pub mod indexed;
pub mod pair;
pub mod sequence;

pub use cursor::{Cursor, CursorIter, CursorState};
pub use equivalence::{ByComparator, Equivalence, KeyMap, KeySet, Natural};
pub use error::{Error, Result};
pub use found::Found;
pub use group::Group;
pub use indexed::Indexed;
pub use pair::Pair;
pub use sequence::{Empty, Items, ItemsCursor, Sequence, empty, items, once};
