// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

//! Cross-operator behavior: laziness, re-enumerability, transitive
//! close, and end-to-end pipeline results.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use sequo_core::{Cursor, Pair, Sequence, items};
use sequo_engine::{SequenceOps, aggregate};
use sequo_testing::{TrackingSequence, collect};

#[test]
fn test_composition_performs_no_enumeration() {
	let source = TrackingSequence::new(items(vec![1, 2, 3, 4]));
	let seq = source
		.clone()
		.filter(|v| v % 2 == 0)
		.map(|v| v * 10)
		.order_by(|v| *v)
		.take(1);
	assert_eq!(source.opened(), 0);
	assert_eq!(collect(&seq), vec![20]);
	assert_eq!(source.opened(), 1);
}

#[test]
fn test_sequences_are_re_enumerable_with_independent_cursors() {
	let seq = items(vec![3, 1, 2]).order_by(|v| *v);
	let first = collect(&seq);
	let second = collect(&seq);
	assert_eq!(first, second);
	assert_eq!(first, vec![1, 2, 3]);
}

#[test]
fn test_mapping_runs_once_per_pulled_element() {
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let seq = items(vec![1, 2, 3, 4, 5])
		.map(move |v| {
			counter.fetch_add(1, Ordering::SeqCst);
			v * 2
		})
		.take(2);
	assert_eq!(collect(&seq), vec![2, 4]);
	assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_close_reaches_every_upstream_exactly_once() {
	let left = TrackingSequence::new(items(vec![1, 2, 3]));
	let right = TrackingSequence::new(items(vec![(2, "a"), (3, "b")]));
	let seq = left
		.clone()
		.join(right.clone(), |l| *l, |r| r.0, |l, r| (*l, r.1))
		.order_by(|p| p.0);
	let mut cursor = seq.cursor();
	assert!(cursor.move_next().unwrap());
	cursor.close();
	cursor.close();
	assert_eq!(left.opened(), 1);
	assert_eq!(left.closed(), 1);
	assert_eq!(right.opened(), 1);
	assert_eq!(right.closed(), 1);
}

#[test]
fn test_early_abandonment_closes_partially_consumed_upstreams() {
	let source = TrackingSequence::new(items(vec![1, 2, 3, 4, 5]));
	let seq = source.clone().filter(|v| v % 2 == 1);
	let mut cursor = seq.cursor();
	assert!(cursor.move_next().unwrap());
	cursor.close();
	assert_eq!(source.closed(), 1);
}

#[test]
fn test_group_by_mod_three_scenario() {
	let groups = collect(&items(vec![1, 2, 3, 4, 5, 6]).group_by(|v| v % 3));
	let summary: Vec<(i32, Vec<i32>)> =
		groups.iter().map(|g| (*g.key(), g.as_slice().to_vec())).collect();
	assert_eq!(summary, vec![(1, vec![1, 4]), (2, vec![2, 5]), (0, vec![3, 6])]);
}

#[test]
fn test_ordering_scenarios() {
	let data = vec![3, 1, 2];
	assert_eq!(collect(&items(data.clone()).order()), vec![1, 2, 3]);
	assert_eq!(collect(&items(data).order_desc()), vec![3, 2, 1]);
}

#[test]
fn test_distinct_is_idempotent_over_pipelines() {
	let once = items(vec![1, 2, 1, 3, 2]).distinct();
	let twice = once.clone().distinct();
	assert_eq!(collect(&once), collect(&twice));
	assert_eq!(collect(&once), vec![1, 2, 3]);
}

#[test]
fn test_join_cross_product_scenario() {
	let seq = items(vec![1, 2, 2]).join(
		items(vec![(2, "a"), (2, "b"), (3, "c")]),
		|l| *l,
		|r| r.0,
		|l, r| (*l, r.1),
	);
	assert_eq!(collect(&seq), vec![(2, "a"), (2, "b"), (2, "a"), (2, "b")]);
}

#[test]
fn test_chunk_scenario() {
	let seq = items(vec![1, 2, 3, 4, 5]).chunk(2).unwrap();
	assert_eq!(collect(&seq), vec![vec![1, 2], vec![3, 4], vec![5]]);
}

#[test]
fn test_window_scenario() {
	let seq = items(vec![1, 2, 3, 4, 5]).window(3, 1).unwrap();
	assert_eq!(collect(&seq), vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]);
}

#[test]
fn test_union_matches_distinct_over_concat() {
	let a = items(vec![1, 3, 5, 3]);
	let b = items(vec![5, 7, 1]);
	assert_eq!(
		collect(&a.clone().union(b.clone())),
		collect(&a.concat(b).distinct())
	);
}

#[test]
fn test_except_and_intersect_partition() {
	let input = items(vec![1, 2, 3, 4, 5, 2]);
	let other = items(vec![2, 4]);
	let kept = collect(&input.clone().intersect(other.clone()));
	let removed = collect(&input.clone().except(other));
	assert_eq!(kept, vec![2, 4]);
	assert_eq!(removed, vec![1, 3, 5]);
	let mut all: Vec<i32> = kept.into_iter().chain(removed).collect();
	all.sort();
	assert_eq!(all, collect(&input.distinct().order()));
}

#[test]
fn test_zip_stops_at_shorter_and_closes_both() {
	let long = TrackingSequence::new(items(vec![1, 2, 3, 4]));
	let short = TrackingSequence::new(items(vec!["a", "b"]));
	let seq = long.clone().zip(short.clone());
	assert_eq!(collect(&seq), vec![Pair::new(1, "a"), Pair::new(2, "b")]);
	assert_eq!(long.closed(), 1);
	assert_eq!(short.closed(), 1);
}

#[test]
fn test_shuffle_draws_nothing_until_pulled() {
	let source = TrackingSequence::new(items(vec![1, 2, 3, 4, 5]));
	let seq = source.clone().shuffle();
	assert_eq!(source.opened(), 0);
	let mut out = collect(&seq);
	assert_eq!(source.opened(), 1);
	out.sort();
	assert_eq!(out, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_then_by_on_unordered_sequence_starts_fresh_ordering() {
	// Without a preceding order_by the tie-breaker becomes the primary
	// criterion.
	let seq = items(vec![("b", 1), ("a", 2)]).then_by(|p| p.1);
	assert_eq!(collect(&seq), vec![("b", 1), ("a", 2)]);
	let ordered = items(vec![("b", 1), ("a", 1)]).order_by(|p| p.1).then_by(|p| p.0);
	assert_eq!(collect(&ordered), vec![("a", 1), ("b", 1)]);
}

#[test]
fn test_pipeline_feeding_aggregations() {
	let seq = items(vec![1, 2, 3, 4, 5, 6])
		.filter(|v| v % 2 == 0)
		.map(|v| v * v);
	assert_eq!(aggregate::to_vec(&seq), Ok(vec![4, 16, 36]));
	assert_eq!(aggregate::sum(&seq), Ok(56));
	assert_eq!(aggregate::max(&seq), Ok(36));
}

#[test]
fn test_group_elements_feed_back_into_operators() {
	let groups = collect(&items(vec![1, 2, 3, 4, 5, 6]).group_by(|v| v % 2));
	let odd = &groups[0];
	assert_eq!(aggregate::sum(odd), Ok(9));
	assert_eq!(collect(&odd.clone().map(|v| v * 10)), vec![10, 30, 50]);
}
