// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

//! Lazy operator stages. Each stage is a [`sequo_core::Sequence`]
//! decorating its input; work happens only when a cursor is pulled.

mod append;
mod chunk;
mod concat;
mod default_if_empty;
mod distinct;
mod except;
mod filter;
mod flat_map;
mod group;
mod index;
mod intersect;
mod join;
mod map;
mod pairwise;
mod scan;
mod shuffle;
mod skip;
mod sort;
mod take;
mod window;
mod zip;

pub use append::{Append, AppendCursor, Prepend, PrependCursor};
pub use chunk::{Chunk, ChunkCursor};
pub use concat::{Concat, ConcatCursor};
pub use default_if_empty::{DefaultIfEmpty, DefaultIfEmptyCursor};
pub use distinct::{Distinct, DistinctCursor};
pub use except::{Except, ExceptCursor};
pub use filter::{Filter, FilterCursor};
pub use flat_map::{FlatMap, FlatMapCursor};
pub use group::{
	AggregateBy, AggregateByCursor, CountBy, CountByCursor, GroupBy, GroupByCursor, GroupByMap,
	GroupByMapCursor,
};
pub use index::{Index, IndexCursor};
pub use intersect::{Intersect, IntersectCursor};
pub use join::{
	GroupJoin, GroupJoinCursor, Join, JoinCursor, LeftJoin, LeftJoinCursor, RightJoin,
	RightJoinCursor,
};
pub use map::{Map, MapCursor};
pub use pairwise::{Pairwise, PairwiseCursor};
pub use scan::{Scan, ScanCursor};
pub use shuffle::{Shuffle, ShuffleCursor};
pub use skip::{Skip, SkipCursor, SkipLast, SkipLastCursor, SkipWhile, SkipWhileCursor};
pub use sort::{Ordered, OrderedCursor, SortDirection, SortSpec};
pub use take::{Take, TakeCursor, TakeLast, TakeLastCursor, TakeWhile, TakeWhileCursor};
pub use window::{Window, WindowCursor};
pub use zip::{Zip, ZipCursor};
