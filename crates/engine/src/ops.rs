// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

use std::cmp::Ordering;
use std::hash::Hash;

use sequo_core::{ByComparator, CursorIter, Group, Items, Natural, Pair, Result, Sequence};

use crate::operator::{
	AggregateBy, Append, Chunk, Concat, CountBy, DefaultIfEmpty, Distinct, Except, Filter,
	FlatMap, GroupBy, GroupByMap, GroupJoin, Index, Intersect, Join, LeftJoin, Map, Ordered,
	Pairwise, Prepend, RightJoin, Scan, Shuffle, Skip, SkipLast, SkipWhile, SortDirection,
	SortSpec, Take, TakeLast, TakeWhile, Window, Zip,
};

/// Identity key extractor used when elements key themselves.
///
/// A plain function pointer, so operator return types stay nameable.
pub type CloneKey<T> = fn(&T) -> T;

pub fn clone_key<T: Clone>(value: &T) -> T {
	value.clone()
}

/// Default zip combiner. A plain function pointer, like [`CloneKey`].
pub type PairOf<A, B> = fn(&A, &B) -> Pair<A, B>;

pub fn pair_of<A: Clone, B: Clone>(first: &A, second: &B) -> Pair<A, B> {
	Pair::new(first.clone(), second.clone())
}

/// Fluent composition surface over any [`Sequence`].
///
/// Every method builds a declaration; nothing is enumerated until a
/// cursor is pulled. Blanket-implemented, so all operator outputs chain.
pub trait SequenceOps: Sequence + Sized {
	// --- element-wise decorators ---

	fn filter<P>(self, predicate: P) -> Filter<Self, P>
	where
		P: Fn(&Self::Item) -> bool + Clone,
	{
		Filter::new(self, predicate)
	}

	fn map<F, R>(self, mapping: F) -> Map<Self, F>
	where
		F: Fn(&Self::Item) -> R + Clone,
	{
		Map::new(self, mapping)
	}

	fn flat_map<F, Sub>(self, mapping: F) -> FlatMap<Self, F>
	where
		F: Fn(&Self::Item) -> Sub + Clone,
		Sub: Sequence,
	{
		FlatMap::new(self, mapping)
	}

	fn take(self, count: usize) -> Take<Self> {
		Take::new(self, count)
	}

	fn take_while<P>(self, predicate: P) -> TakeWhile<Self, P>
	where
		P: Fn(&Self::Item) -> bool + Clone,
	{
		TakeWhile::new(self, predicate)
	}

	fn take_last(self, count: usize) -> TakeLast<Self>
	where
		Self::Item: Clone,
	{
		TakeLast::new(self, count)
	}

	fn skip(self, count: usize) -> Skip<Self> {
		Skip::new(self, count)
	}

	fn skip_while<P>(self, predicate: P) -> SkipWhile<Self, P>
	where
		P: Fn(&Self::Item) -> bool + Clone,
	{
		SkipWhile::new(self, predicate)
	}

	fn skip_last(self, count: usize) -> SkipLast<Self>
	where
		Self::Item: Clone,
	{
		SkipLast::new(self, count)
	}

	fn concat<O>(self, other: O) -> Concat<Self, O>
	where
		O: Sequence<Item = Self::Item>,
	{
		Concat::new(self, other)
	}

	fn append(self, element: Self::Item) -> Append<Self>
	where
		Self::Item: Clone,
	{
		Append::new(self, element)
	}

	fn prepend(self, element: Self::Item) -> Prepend<Self>
	where
		Self::Item: Clone,
	{
		Prepend::new(self, element)
	}

	fn default_if_empty(self, default: Self::Item) -> DefaultIfEmpty<Self>
	where
		Self::Item: Clone,
	{
		DefaultIfEmpty::new(self, default)
	}

	fn index(self) -> Index<Self>
	where
		Self::Item: Clone,
	{
		Index::new(self)
	}

	fn pairwise(self) -> Pairwise<Self>
	where
		Self::Item: Clone,
	{
		Pairwise::new(self)
	}

	fn shuffle(self) -> Shuffle<Self>
	where
		Self::Item: Clone,
	{
		Shuffle::new(self)
	}

	// --- ordering ---

	fn order(self) -> Ordered<Self>
	where
		Self::Item: Ord + 'static,
	{
		Ordered::new(self, SortSpec::by_compare(|a: &Self::Item, b| a.cmp(b), SortDirection::Asc))
	}

	fn order_desc(self) -> Ordered<Self>
	where
		Self::Item: Ord + 'static,
	{
		Ordered::new(self, SortSpec::by_compare(|a: &Self::Item, b| a.cmp(b), SortDirection::Desc))
	}

	fn order_by<K, F>(self, key: F) -> Ordered<Self>
	where
		Self::Item: 'static,
		K: Ord,
		F: Fn(&Self::Item) -> K + 'static,
	{
		Ordered::new(self, SortSpec::by_key(key, SortDirection::Asc))
	}

	fn order_by_desc<K, F>(self, key: F) -> Ordered<Self>
	where
		Self::Item: 'static,
		K: Ord,
		F: Fn(&Self::Item) -> K + 'static,
	{
		Ordered::new(self, SortSpec::by_key(key, SortDirection::Desc))
	}

	fn order_by_with<K, F, C>(self, key: F, compare: C) -> Ordered<Self>
	where
		Self::Item: 'static,
		F: Fn(&Self::Item) -> K + 'static,
		C: Fn(&K, &K) -> Ordering + 'static,
	{
		Ordered::new(self, SortSpec::by_key_with(key, compare, SortDirection::Asc))
	}

	fn order_by_desc_with<K, F, C>(self, key: F, compare: C) -> Ordered<Self>
	where
		Self::Item: 'static,
		F: Fn(&Self::Item) -> K + 'static,
		C: Fn(&K, &K) -> Ordering + 'static,
	{
		Ordered::new(self, SortSpec::by_key_with(key, compare, SortDirection::Desc))
	}

	/// On an already ordered sequence the inherent method shadows this
	/// one and appends a tie-breaker; anywhere else a new primary
	/// ordering starts.
	fn then_by<K, F>(self, key: F) -> Ordered<Self>
	where
		Self::Item: 'static,
		K: Ord,
		F: Fn(&Self::Item) -> K + 'static,
	{
		self.order_by(key)
	}

	fn then_by_desc<K, F>(self, key: F) -> Ordered<Self>
	where
		Self::Item: 'static,
		K: Ord,
		F: Fn(&Self::Item) -> K + 'static,
	{
		self.order_by_desc(key)
	}

	fn then_by_with<K, F, C>(self, key: F, compare: C) -> Ordered<Self>
	where
		Self::Item: 'static,
		F: Fn(&Self::Item) -> K + 'static,
		C: Fn(&K, &K) -> Ordering + 'static,
	{
		self.order_by_with(key, compare)
	}

	fn then_by_desc_with<K, F, C>(self, key: F, compare: C) -> Ordered<Self>
	where
		Self::Item: 'static,
		F: Fn(&Self::Item) -> K + 'static,
		C: Fn(&K, &K) -> Ordering + 'static,
	{
		self.order_by_desc_with(key, compare)
	}

	// --- grouping and keyed aggregation ---

	fn group_by<K, KF>(self, key: KF) -> GroupBy<Self, KF, CloneKey<Self::Item>, Natural>
	where
		Self::Item: Clone,
		K: Hash + Eq + Clone,
		KF: Fn(&Self::Item) -> K + Clone,
	{
		GroupBy::new(self, key, clone_key, Natural)
	}

	fn group_by_with<K, KF, C>(
		self,
		key: KF,
		compare: C,
	) -> GroupBy<Self, KF, CloneKey<Self::Item>, ByComparator<C>>
	where
		Self::Item: Clone,
		K: Clone,
		KF: Fn(&Self::Item) -> K + Clone,
		C: Fn(&K, &K) -> Ordering + Clone,
	{
		GroupBy::new(self, key, clone_key, ByComparator::new(compare))
	}

	fn group_by_select<K, E, KF, EF>(self, key: KF, element: EF) -> GroupBy<Self, KF, EF, Natural>
	where
		K: Hash + Eq + Clone,
		E: Clone,
		KF: Fn(&Self::Item) -> K + Clone,
		EF: Fn(&Self::Item) -> E + Clone,
	{
		GroupBy::new(self, key, element, Natural)
	}

	fn group_by_select_with<K, E, KF, EF, C>(
		self,
		key: KF,
		element: EF,
		compare: C,
	) -> GroupBy<Self, KF, EF, ByComparator<C>>
	where
		K: Clone,
		E: Clone,
		KF: Fn(&Self::Item) -> K + Clone,
		EF: Fn(&Self::Item) -> E + Clone,
		C: Fn(&K, &K) -> Ordering + Clone,
	{
		GroupBy::new(self, key, element, ByComparator::new(compare))
	}

	fn group_by_map<K, KF, MF, R>(
		self,
		key: KF,
		mapping: MF,
	) -> GroupByMap<Self, KF, CloneKey<Self::Item>, MF, Natural>
	where
		Self::Item: Clone,
		K: Hash + Eq + Clone,
		KF: Fn(&Self::Item) -> K + Clone,
		MF: Fn(&K, &Group<K, Self::Item>) -> R + Clone,
	{
		GroupByMap::new(self, key, clone_key, mapping, Natural)
	}

	fn group_by_map_with<K, KF, MF, R, C>(
		self,
		key: KF,
		mapping: MF,
		compare: C,
	) -> GroupByMap<Self, KF, CloneKey<Self::Item>, MF, ByComparator<C>>
	where
		Self::Item: Clone,
		K: Clone,
		KF: Fn(&Self::Item) -> K + Clone,
		MF: Fn(&K, &Group<K, Self::Item>) -> R + Clone,
		C: Fn(&K, &K) -> Ordering + Clone,
	{
		GroupByMap::new(self, key, clone_key, mapping, ByComparator::new(compare))
	}

	fn count_by<K, KF>(self, key: KF) -> CountBy<Self, KF, Natural>
	where
		K: Hash + Eq + Clone,
		KF: Fn(&Self::Item) -> K + Clone,
	{
		CountBy::new(self, key, Natural)
	}

	fn count_by_with<K, KF, C>(self, key: KF, compare: C) -> CountBy<Self, KF, ByComparator<C>>
	where
		K: Clone,
		KF: Fn(&Self::Item) -> K + Clone,
		C: Fn(&K, &K) -> Ordering + Clone,
	{
		CountBy::new(self, key, ByComparator::new(compare))
	}

	fn aggregate_by<K, KF, R, FF>(self, seed: R, key: KF, fold: FF) -> AggregateBy<Self, KF, R, FF, Natural>
	where
		K: Hash + Eq + Clone,
		KF: Fn(&Self::Item) -> K + Clone,
		R: Clone,
		FF: Fn(R, &Self::Item) -> R + Clone,
	{
		AggregateBy::new(self, key, seed, fold, Natural)
	}

	fn aggregate_by_with<K, KF, R, FF, C>(
		self,
		seed: R,
		key: KF,
		fold: FF,
		compare: C,
	) -> AggregateBy<Self, KF, R, FF, ByComparator<C>>
	where
		K: Clone,
		KF: Fn(&Self::Item) -> K + Clone,
		R: Clone,
		FF: Fn(R, &Self::Item) -> R + Clone,
		C: Fn(&K, &K) -> Ordering + Clone,
	{
		AggregateBy::new(self, key, seed, fold, ByComparator::new(compare))
	}

	// --- set algebra ---

	fn distinct(self) -> Distinct<Self, CloneKey<Self::Item>, Natural>
	where
		Self::Item: Hash + Eq + Clone,
	{
		Distinct::new(self, clone_key, Natural)
	}

	fn distinct_with<C>(self, compare: C) -> Distinct<Self, CloneKey<Self::Item>, ByComparator<C>>
	where
		Self::Item: Clone,
		C: Fn(&Self::Item, &Self::Item) -> Ordering + Clone,
	{
		Distinct::new(self, clone_key, ByComparator::new(compare))
	}

	fn distinct_by<K, KF>(self, key: KF) -> Distinct<Self, KF, Natural>
	where
		K: Hash + Eq,
		KF: Fn(&Self::Item) -> K + Clone,
	{
		Distinct::new(self, key, Natural)
	}

	fn distinct_by_with<K, KF, C>(self, key: KF, compare: C) -> Distinct<Self, KF, ByComparator<C>>
	where
		KF: Fn(&Self::Item) -> K + Clone,
		C: Fn(&K, &K) -> Ordering + Clone,
	{
		Distinct::new(self, key, ByComparator::new(compare))
	}

	fn union<O>(self, other: O) -> Union<Self, O, CloneKey<Self::Item>, Natural>
	where
		Self::Item: Hash + Eq + Clone,
		O: Sequence<Item = Self::Item>,
	{
		Distinct::new(Concat::new(self, other), clone_key, Natural)
	}

	fn union_by<O, K, KF>(self, other: O, key: KF) -> Union<Self, O, KF, Natural>
	where
		K: Hash + Eq,
		O: Sequence<Item = Self::Item>,
		KF: Fn(&Self::Item) -> K + Clone,
	{
		Distinct::new(Concat::new(self, other), key, Natural)
	}

	fn union_with<O, C>(self, other: O, compare: C) -> Union<Self, O, CloneKey<Self::Item>, ByComparator<C>>
	where
		Self::Item: Clone,
		O: Sequence<Item = Self::Item>,
		C: Fn(&Self::Item, &Self::Item) -> Ordering + Clone,
	{
		Distinct::new(Concat::new(self, other), clone_key, ByComparator::new(compare))
	}

	fn intersect<O>(self, other: O) -> Intersect<Self, O, CloneKey<Self::Item>, Natural>
	where
		Self::Item: Hash + Eq + Clone,
		O: Sequence<Item = Self::Item>,
	{
		Intersect::new(self, other, clone_key, Natural)
	}

	/// Keyed variant: `other` is a sequence of keys, not of elements.
	fn intersect_by<O, K, KF>(self, other: O, key: KF) -> Intersect<Self, O, KF, Natural>
	where
		K: Hash + Eq + Clone,
		O: Sequence<Item = K>,
		KF: Fn(&Self::Item) -> K + Clone,
	{
		Intersect::new(self, other, key, Natural)
	}

	fn intersect_with<O, C>(self, other: O, compare: C) -> Intersect<Self, O, CloneKey<Self::Item>, ByComparator<C>>
	where
		Self::Item: Clone,
		O: Sequence<Item = Self::Item>,
		C: Fn(&Self::Item, &Self::Item) -> Ordering + Clone,
	{
		Intersect::new(self, other, clone_key, ByComparator::new(compare))
	}

	fn except<O>(self, other: O) -> Except<Self, O, CloneKey<Self::Item>, Natural>
	where
		Self::Item: Hash + Eq + Clone,
		O: Sequence<Item = Self::Item>,
	{
		Except::new(self, other, clone_key, Natural)
	}

	fn except_by<O, K, KF>(self, other: O, key: KF) -> Except<Self, O, KF, Natural>
	where
		K: Hash + Eq,
		O: Sequence<Item = Self::Item>,
		KF: Fn(&Self::Item) -> K + Clone,
	{
		Except::new(self, other, key, Natural)
	}

	fn except_with<O, C>(self, other: O, compare: C) -> Except<Self, O, CloneKey<Self::Item>, ByComparator<C>>
	where
		Self::Item: Clone,
		O: Sequence<Item = Self::Item>,
		C: Fn(&Self::Item, &Self::Item) -> Ordering + Clone,
	{
		Except::new(self, other, clone_key, ByComparator::new(compare))
	}

	// --- joins ---

	fn join<O, K, SK, OK, M, R>(
		self,
		other: O,
		self_key: SK,
		other_key: OK,
		mapping: M,
	) -> Join<Self, O, SK, OK, M, Natural>
	where
		O: Sequence,
		O::Item: Clone,
		K: Hash + Eq,
		SK: Fn(&Self::Item) -> K + Clone,
		OK: Fn(&O::Item) -> K + Clone,
		M: Fn(&Self::Item, &O::Item) -> R + Clone,
	{
		Join::new(self, other, self_key, other_key, mapping, Natural)
	}

	fn join_with<O, K, SK, OK, M, R, C>(
		self,
		other: O,
		self_key: SK,
		other_key: OK,
		mapping: M,
		compare: C,
	) -> Join<Self, O, SK, OK, M, ByComparator<C>>
	where
		O: Sequence,
		O::Item: Clone,
		SK: Fn(&Self::Item) -> K + Clone,
		OK: Fn(&O::Item) -> K + Clone,
		M: Fn(&Self::Item, &O::Item) -> R + Clone,
		C: Fn(&K, &K) -> Ordering + Clone,
	{
		Join::new(self, other, self_key, other_key, mapping, ByComparator::new(compare))
	}

	fn left_join<O, K, SK, OK, M, R>(
		self,
		other: O,
		self_key: SK,
		other_key: OK,
		mapping: M,
	) -> LeftJoin<Self, O, SK, OK, M, Natural>
	where
		O: Sequence,
		O::Item: Clone,
		K: Hash + Eq,
		SK: Fn(&Self::Item) -> K + Clone,
		OK: Fn(&O::Item) -> K + Clone,
		M: Fn(&Self::Item, Option<&O::Item>) -> R + Clone,
	{
		LeftJoin::new(self, other, self_key, other_key, mapping, Natural)
	}

	fn left_join_with<O, K, SK, OK, M, R, C>(
		self,
		other: O,
		self_key: SK,
		other_key: OK,
		mapping: M,
		compare: C,
	) -> LeftJoin<Self, O, SK, OK, M, ByComparator<C>>
	where
		O: Sequence,
		O::Item: Clone,
		SK: Fn(&Self::Item) -> K + Clone,
		OK: Fn(&O::Item) -> K + Clone,
		M: Fn(&Self::Item, Option<&O::Item>) -> R + Clone,
		C: Fn(&K, &K) -> Ordering + Clone,
	{
		LeftJoin::new(self, other, self_key, other_key, mapping, ByComparator::new(compare))
	}

	/// `other LEFT JOIN self`: `other` is probed in order, the receiver
	/// is drained into the lookup.
	fn right_join<O, K, SK, OK, M, R>(
		self,
		other: O,
		self_key: SK,
		other_key: OK,
		mapping: M,
	) -> RightJoin<Self, O, SK, OK, M, Natural>
	where
		Self::Item: Clone,
		O: Sequence,
		K: Hash + Eq,
		SK: Fn(&Self::Item) -> K + Clone,
		OK: Fn(&O::Item) -> K + Clone,
		M: Fn(Option<&Self::Item>, &O::Item) -> R + Clone,
	{
		RightJoin::new(self, other, self_key, other_key, mapping, Natural)
	}

	fn right_join_with<O, K, SK, OK, M, R, C>(
		self,
		other: O,
		self_key: SK,
		other_key: OK,
		mapping: M,
		compare: C,
	) -> RightJoin<Self, O, SK, OK, M, ByComparator<C>>
	where
		Self::Item: Clone,
		O: Sequence,
		SK: Fn(&Self::Item) -> K + Clone,
		OK: Fn(&O::Item) -> K + Clone,
		M: Fn(Option<&Self::Item>, &O::Item) -> R + Clone,
		C: Fn(&K, &K) -> Ordering + Clone,
	{
		RightJoin::new(self, other, self_key, other_key, mapping, ByComparator::new(compare))
	}

	fn group_join<O, K, SK, OK, M, R>(
		self,
		other: O,
		self_key: SK,
		other_key: OK,
		mapping: M,
	) -> GroupJoin<Self, O, SK, OK, M, Natural>
	where
		O: Sequence,
		O::Item: Clone,
		K: Hash + Eq,
		SK: Fn(&Self::Item) -> K + Clone,
		OK: Fn(&O::Item) -> K + Clone,
		M: Fn(&Self::Item, Items<O::Item>) -> R + Clone,
	{
		GroupJoin::new(self, other, self_key, other_key, mapping, Natural)
	}

	fn group_join_with<O, K, SK, OK, M, R, C>(
		self,
		other: O,
		self_key: SK,
		other_key: OK,
		mapping: M,
		compare: C,
	) -> GroupJoin<Self, O, SK, OK, M, ByComparator<C>>
	where
		O: Sequence,
		O::Item: Clone,
		SK: Fn(&Self::Item) -> K + Clone,
		OK: Fn(&O::Item) -> K + Clone,
		M: Fn(&Self::Item, Items<O::Item>) -> R + Clone,
		C: Fn(&K, &K) -> Ordering + Clone,
	{
		GroupJoin::new(self, other, self_key, other_key, mapping, ByComparator::new(compare))
	}

	// --- windowing, scanning, zipping ---

	/// Fails with [`Error::InvalidArgument`](sequo_core::Error) when
	/// `size` is zero; the check runs at declaration time.
	fn chunk(self, size: usize) -> Result<Chunk<Self>> {
		Chunk::new(self, size)
	}

	/// Fails at declaration time when `size` or `step` is zero.
	fn window(self, size: usize, step: usize) -> Result<Window<Self>> {
		Window::new(self, size, step)
	}

	fn scan<A, F>(self, seed: A, fold: F) -> Scan<Self, A, F>
	where
		A: Clone,
		F: Fn(&A, &Self::Item) -> A + Clone,
	{
		Scan::new(self, seed, fold)
	}

	fn zip<O>(self, other: O) -> Zip<Self, O, PairOf<Self::Item, O::Item>>
	where
		Self::Item: Clone,
		O: Sequence,
		O::Item: Clone,
	{
		Zip::new(self, other, pair_of)
	}

	fn zip_with<O, F, R>(self, other: O, combine: F) -> Zip<Self, O, F>
	where
		O: Sequence,
		F: Fn(&Self::Item, &O::Item) -> R + Clone,
	{
		Zip::new(self, other, combine)
	}

	// --- bridges ---

	/// A `std::iter::Iterator` of `Result<Item>` over a fresh cursor.
	fn iter(&self) -> CursorIter<Self::Cursor> {
		CursorIter::new(self.cursor())
	}
}

impl<S> SequenceOps for S where S: Sequence + Sized {}

/// Union is distinct-over-concat under one equivalence strategy.
pub type Union<S, O, KF, E> = Distinct<Concat<S, O>, KF, E>;

#[cfg(test)]
mod tests {
	use super::*;
	use sequo_core::items;
	use sequo_testing::collect;

	#[test]
	fn test_union_equals_distinct_over_concat() {
		let a = items(vec![1, 2, 2, 3]);
		let b = items(vec![3, 4, 4]);
		let union = collect(&a.clone().union(b.clone()));
		let reference = collect(&a.concat(b).distinct());
		assert_eq!(union, reference);
		assert_eq!(union, vec![1, 2, 3, 4]);
	}

	#[test]
	fn test_declarations_chain_without_enumeration() {
		let seq = items(vec![5, 3, 5, 1, 4])
			.distinct()
			.filter(|v| *v > 1)
			.order_by(|v| *v)
			.take(2);
		assert_eq!(collect(&seq), vec![3, 4]);
	}

	#[test]
	fn test_iter_bridges_to_std_iterator() {
		let seq = items(vec![1, 2, 3]).map(|v| v * 10);
		let out: Result<Vec<i32>> = seq.iter().collect();
		assert_eq!(out, Ok(vec![10, 20, 30]));
	}
}
