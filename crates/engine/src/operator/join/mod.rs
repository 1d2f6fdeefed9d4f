// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

//! Hash-join style operators. One side is drained into a keyed lookup on
//! the first pull; the probing side streams.

mod group;
mod inner;
mod left;
mod right;

pub use group::{GroupJoin, GroupJoinCursor};
pub use inner::{Join, JoinCursor};
pub use left::{LeftJoin, LeftJoinCursor};
pub use right::{RightJoin, RightJoinCursor};

use tracing::trace;

use sequo_core::{Cursor, Equivalence, KeyMap, Result};

/// Drains `cursor` into a map from key to the elements that produced it,
/// in encounter order.
pub(crate) fn build_lookup<C, KF, E, K>(
	mut cursor: C,
	key: &KF,
	equivalence: &E,
) -> Result<E::Map<Vec<C::Item>>>
where
	C: Cursor,
	C::Item: Clone,
	KF: Fn(&C::Item) -> K,
	E: Equivalence<K>,
{
	let mut lookup = equivalence.new_map::<Vec<C::Item>>();
	while cursor.move_next()? {
		let item = cursor.current()?;
		lookup.get_or_insert_with(key(item), Vec::new).push(item.clone());
	}
	cursor.close();
	trace!(keys = lookup.len(), "join lookup materialized");
	Ok(lookup)
}
