// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

//! Lazy operator pipelines over the [`sequo_core`] Sequence/Cursor
//! contract.
//!
//! Sequences are immutable declarations; composing them performs no
//! work. Enumeration is pull-based: each `move_next()` on the
//! downstream cursor pulls just enough from upstream to produce one
//! element, except for the documented buffering stages (sort, group,
//! join lookup, shuffle, last-element windows), which drain their
//! input on the first pull.
//!
//! ```
//! use sequo_core::items;
//! use sequo_engine::{SequenceOps, aggregate};
//!
//! let seq = items(vec![5, 3, 5, 1, 4])
//! 	.distinct()
//! 	.filter(|v| *v > 1)
//! 	.order_by(|v| *v);
//! assert_eq!(aggregate::to_vec(&seq).unwrap(), vec![3, 4, 5]);
//! ```

pub mod aggregate;
pub mod operator;
mod ops;

pub use ops::{CloneKey, PairOf, SequenceOps, Union, clone_key, pair_of};
pub use sequo_core::{Cursor, CursorIter, Error, Result, Sequence, empty, items, once};
