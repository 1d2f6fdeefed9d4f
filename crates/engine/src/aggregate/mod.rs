// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Sequo

//! Terminal aggregations. Each function runs one forward scan over a
//! fresh cursor and closes it before returning, error or not.

use std::cmp::Ordering;

use num_traits::{CheckedAdd, Zero};

use sequo_core::{Cursor, Error, Found, Result, Sequence};

fn with_cursor<S, R, F>(seq: &S, body: F) -> Result<R>
where
	S: Sequence,
	F: FnOnce(&mut S::Cursor) -> Result<R>,
{
	let mut cursor = seq.cursor();
	let result = body(&mut cursor);
	cursor.close();
	result
}

pub fn count<S>(seq: &S) -> Result<u64>
where
	S: Sequence,
{
	with_cursor(seq, |cursor| {
		let mut count = 0u64;
		while cursor.move_next()? {
			count += 1;
		}
		Ok(count)
	})
}

pub fn count_if<S, P>(seq: &S, predicate: P) -> Result<u64>
where
	S: Sequence,
	P: Fn(&S::Item) -> bool,
{
	with_cursor(seq, |cursor| {
		let mut count = 0u64;
		while cursor.move_next()? {
			if predicate(cursor.current()?) {
				count += 1;
			}
		}
		Ok(count)
	})
}

pub fn to_vec<S>(seq: &S) -> Result<Vec<S::Item>>
where
	S: Sequence,
	S::Item: Clone,
{
	with_cursor(seq, |cursor| {
		let mut out = Vec::new();
		while cursor.move_next()? {
			out.push(cursor.current()?.clone());
		}
		Ok(out)
	})
}

pub fn fold<S, A, F>(seq: &S, seed: A, fold: F) -> Result<A>
where
	S: Sequence,
	F: Fn(A, &S::Item) -> A,
{
	with_cursor(seq, |cursor| {
		let mut accumulator = seed;
		while cursor.move_next()? {
			accumulator = fold(accumulator, cursor.current()?);
		}
		Ok(accumulator)
	})
}

/// [`fold`] followed by a final projection of the accumulator.
pub fn fold_map<S, A, F, G, R>(seq: &S, seed: A, fold_fn: F, finish: G) -> Result<R>
where
	S: Sequence,
	F: Fn(A, &S::Item) -> A,
	G: FnOnce(A) -> R,
{
	Ok(finish(fold(seq, seed, fold_fn)?))
}

/// Folds with the first element as seed; [`Error::NoSuchElement`] on an
/// empty sequence.
pub fn reduce<S, F>(seq: &S, fold: F) -> Result<S::Item>
where
	S: Sequence,
	S::Item: Clone,
	F: Fn(S::Item, &S::Item) -> S::Item,
{
	with_cursor(seq, |cursor| {
		if !cursor.move_next()? {
			return Err(Error::NoSuchElement);
		}
		let mut accumulator = cursor.current()?.clone();
		while cursor.move_next()? {
			accumulator = fold(accumulator, cursor.current()?);
		}
		Ok(accumulator)
	})
}

/// True when every element satisfies the predicate; vacuously true on
/// empty. Stops at the first rejection.
pub fn all<S, P>(seq: &S, predicate: P) -> Result<bool>
where
	S: Sequence,
	P: Fn(&S::Item) -> bool,
{
	with_cursor(seq, |cursor| {
		while cursor.move_next()? {
			if !predicate(cursor.current()?) {
				return Ok(false);
			}
		}
		Ok(true)
	})
}

/// True when any element satisfies the predicate. Stops at the first hit.
pub fn any<S, P>(seq: &S, predicate: P) -> Result<bool>
where
	S: Sequence,
	P: Fn(&S::Item) -> bool,
{
	with_cursor(seq, |cursor| {
		while cursor.move_next()? {
			if predicate(cursor.current()?) {
				return Ok(true);
			}
		}
		Ok(false)
	})
}

pub fn contains<S>(seq: &S, value: &S::Item) -> Result<bool>
where
	S: Sequence,
	S::Item: PartialEq,
{
	any(seq, |item| item == value)
}

pub fn contains_with<S, C>(seq: &S, value: &S::Item, compare: C) -> Result<bool>
where
	S: Sequence,
	C: Fn(&S::Item, &S::Item) -> Ordering,
{
	any(seq, |item| compare(item, value) == Ordering::Equal)
}

pub fn first_found<S>(seq: &S) -> Result<Found<S::Item>>
where
	S: Sequence,
	S::Item: Clone,
{
	with_cursor(seq, |cursor| {
		if cursor.move_next()? {
			Ok(Found::Found(cursor.current()?.clone()))
		} else {
			Ok(Found::Missing)
		}
	})
}

pub fn first<S>(seq: &S) -> Result<S::Item>
where
	S: Sequence,
	S::Item: Clone,
{
	first_found(seq)?.required()
}

pub fn first_if_found<S, P>(seq: &S, predicate: P) -> Result<Found<S::Item>>
where
	S: Sequence,
	S::Item: Clone,
	P: Fn(&S::Item) -> bool,
{
	with_cursor(seq, |cursor| {
		while cursor.move_next()? {
			let item = cursor.current()?;
			if predicate(item) {
				return Ok(Found::Found(item.clone()));
			}
		}
		Ok(Found::Missing)
	})
}

pub fn first_if<S, P>(seq: &S, predicate: P) -> Result<S::Item>
where
	S: Sequence,
	S::Item: Clone,
	P: Fn(&S::Item) -> bool,
{
	first_if_found(seq, predicate)?.required()
}

pub fn last_found<S>(seq: &S) -> Result<Found<S::Item>>
where
	S: Sequence,
	S::Item: Clone,
{
	with_cursor(seq, |cursor| {
		let mut last = Found::Missing;
		while cursor.move_next()? {
			last = Found::Found(cursor.current()?.clone());
		}
		Ok(last)
	})
}

pub fn last<S>(seq: &S) -> Result<S::Item>
where
	S: Sequence,
	S::Item: Clone,
{
	last_found(seq)?.required()
}

pub fn last_if<S, P>(seq: &S, predicate: P) -> Result<S::Item>
where
	S: Sequence,
	S::Item: Clone,
	P: Fn(&S::Item) -> bool,
{
	with_cursor(seq, |cursor| {
		let mut last = Found::Missing;
		while cursor.move_next()? {
			let item = cursor.current()?;
			if predicate(item) {
				last = Found::Found(item.clone());
			}
		}
		last.required()
	})
}

/// The only element, or [`Found::Missing`] on empty.
/// [`Error::MultipleElementsFound`] when a second element exists.
pub fn single_found<S>(seq: &S) -> Result<Found<S::Item>>
where
	S: Sequence,
	S::Item: Clone,
{
	with_cursor(seq, |cursor| {
		if !cursor.move_next()? {
			return Ok(Found::Missing);
		}
		let item = cursor.current()?.clone();
		if cursor.move_next()? {
			return Err(Error::MultipleElementsFound);
		}
		Ok(Found::Found(item))
	})
}

/// The only element; [`Error::NoSuchElement`] on empty,
/// [`Error::MultipleElementsFound`] when a second element exists.
pub fn single<S>(seq: &S) -> Result<S::Item>
where
	S: Sequence,
	S::Item: Clone,
{
	single_found(seq)?.required()
}

/// The only element satisfying the predicate, or [`Found::Missing`] when
/// none does; [`Error::MultipleElementsFound`] when two do.
pub fn single_if_found<S, P>(seq: &S, predicate: P) -> Result<Found<S::Item>>
where
	S: Sequence,
	S::Item: Clone,
	P: Fn(&S::Item) -> bool,
{
	with_cursor(seq, |cursor| {
		let mut found = Found::Missing;
		while cursor.move_next()? {
			let item = cursor.current()?;
			if predicate(item) {
				if found.is_found() {
					return Err(Error::MultipleElementsFound);
				}
				found = Found::Found(item.clone());
			}
		}
		Ok(found)
	})
}

/// The only element satisfying the predicate; errors as [`single`].
pub fn single_if<S, P>(seq: &S, predicate: P) -> Result<S::Item>
where
	S: Sequence,
	S::Item: Clone,
	P: Fn(&S::Item) -> bool,
{
	single_if_found(seq, predicate)?.required()
}

/// The element at a 0-based position, or [`Found::Missing`] past the end.
pub fn element_at_found<S>(seq: &S, index: usize) -> Result<Found<S::Item>>
where
	S: Sequence,
	S::Item: Clone,
{
	with_cursor(seq, |cursor| {
		for _ in 0..=index {
			if !cursor.move_next()? {
				return Ok(Found::Missing);
			}
		}
		Ok(Found::Found(cursor.current()?.clone()))
	})
}

/// The element at a 0-based position; [`Error::NoSuchElement`] past the
/// end.
pub fn element_at<S>(seq: &S, index: usize) -> Result<S::Item>
where
	S: Sequence,
	S::Item: Clone,
{
	element_at_found(seq, index)?.required()
}

/// The smallest element; ties resolve to the earliest.
/// [`Error::NoSuchElement`] on empty.
pub fn min<S>(seq: &S) -> Result<S::Item>
where
	S: Sequence,
	S::Item: Ord + Clone,
{
	reduce(seq, |best, item| if *item < best { item.clone() } else { best })
}

/// The largest element; ties resolve to the earliest.
pub fn max<S>(seq: &S) -> Result<S::Item>
where
	S: Sequence,
	S::Item: Ord + Clone,
{
	reduce(seq, |best, item| if *item > best { item.clone() } else { best })
}

pub fn min_by_key<S, K, F>(seq: &S, key: F) -> Result<S::Item>
where
	S: Sequence,
	S::Item: Clone,
	K: Ord,
	F: Fn(&S::Item) -> K,
{
	reduce(seq, |best, item| if key(item) < key(&best) { item.clone() } else { best })
}

pub fn max_by_key<S, K, F>(seq: &S, key: F) -> Result<S::Item>
where
	S: Sequence,
	S::Item: Clone,
	K: Ord,
	F: Fn(&S::Item) -> K,
{
	reduce(seq, |best, item| if key(item) > key(&best) { item.clone() } else { best })
}

/// Checked integer sum starting from the type's zero;
/// [`Error::Overflow`] when the sum wraps.
pub fn sum<S>(seq: &S) -> Result<S::Item>
where
	S: Sequence,
	S::Item: CheckedAdd + num_traits::Zero,
{
	with_cursor(seq, |cursor| {
		let mut total = S::Item::zero();
		while cursor.move_next()? {
			total = total.checked_add(cursor.current()?).ok_or(Error::Overflow)?;
		}
		Ok(total)
	})
}

pub fn sum_f64<S>(seq: &S) -> Result<f64>
where
	S: Sequence<Item = f64>,
{
	fold(seq, 0.0, |total, value| total + value)
}

/// Arithmetic mean; [`Error::NoSuchElement`] on empty.
pub fn average<S>(seq: &S) -> Result<f64>
where
	S: Sequence<Item = f64>,
{
	let (total, count) = fold(seq, (0.0, 0u64), |(total, count), value| (total + value, count + 1))?;
	if count == 0 {
		return Err(Error::NoSuchElement);
	}
	Ok(total / count as f64)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::SequenceOps;
	use sequo_core::items;

	#[test]
	fn test_count_and_count_if() {
		let seq = items(vec![1, 2, 3, 4]);
		assert_eq!(count(&seq), Ok(4));
		assert_eq!(count_if(&seq, |v| v % 2 == 0), Ok(2));
		assert_eq!(count(&items(Vec::<i32>::new())), Ok(0));
	}

	#[test]
	fn test_fold_and_reduce() {
		let seq = items(vec![1, 2, 3]);
		assert_eq!(fold(&seq, 10, |acc, v| acc + v), Ok(16));
		assert_eq!(reduce(&seq, |acc, v| acc * v), Ok(6));
		assert_eq!(reduce(&items(Vec::<i32>::new()), |acc, _| acc), Err(Error::NoSuchElement));
	}

	#[test]
	fn test_fold_map_projects_the_accumulator() {
		let seq = items(vec![1, 2, 3]);
		let result = fold_map(&seq, 0, |acc, v| acc + v, |total| total.to_string());
		assert_eq!(result, Ok("6".to_string()));
	}

	#[test]
	fn test_all_any_contains() {
		let seq = items(vec![2, 4, 6]);
		assert_eq!(all(&seq, |v| v % 2 == 0), Ok(true));
		assert_eq!(all(&seq, |v| *v > 2), Ok(false));
		assert_eq!(any(&seq, |v| *v == 4), Ok(true));
		assert_eq!(any(&items(Vec::<i32>::new()), |_| true), Ok(false));
		assert_eq!(all(&items(Vec::<i32>::new()), |_| false), Ok(true));
		assert_eq!(contains(&seq, &6), Ok(true));
		assert_eq!(contains(&seq, &7), Ok(false));
	}

	#[test]
	fn test_contains_with_comparator() {
		let seq = items(vec!["Ada", "Bob"]);
		let found = contains_with(&seq, &"ada", |a, b| {
			a.to_lowercase().cmp(&b.to_lowercase())
		});
		assert_eq!(found, Ok(true));
	}

	#[test]
	fn test_first_and_last() {
		let seq = items(vec![1, 2, 3]);
		assert_eq!(first(&seq), Ok(1));
		assert_eq!(last(&seq), Ok(3));
		assert_eq!(first(&items(Vec::<i32>::new())), Err(Error::NoSuchElement));
		assert_eq!(first_if(&seq, |v| *v > 1), Ok(2));
		assert_eq!(last_if(&seq, |v| *v < 3), Ok(2));
		assert_eq!(first_if(&seq, |v| *v > 9), Err(Error::NoSuchElement));
	}

	#[test]
	fn test_single_rejects_more_than_one() {
		assert_eq!(single(&items(vec![7])), Ok(7));
		assert_eq!(single(&items(vec![7, 8])), Err(Error::MultipleElementsFound));
		assert_eq!(single(&items(Vec::<i32>::new())), Err(Error::NoSuchElement));
		assert_eq!(single_if(&items(vec![1, 2, 3]), |v| *v == 2), Ok(2));
		assert_eq!(
			single_if(&items(vec![1, 2, 2]), |v| *v == 2),
			Err(Error::MultipleElementsFound)
		);
	}

	#[test]
	fn test_single_found_recovers_from_empty() {
		assert_eq!(single_found(&items(vec![7])), Ok(Found::Found(7)));
		assert_eq!(single_found(&items(Vec::<i32>::new())), Ok(Found::Missing));
		assert_eq!(single_found(&items(vec![7, 8])), Err(Error::MultipleElementsFound));
		assert_eq!(single_found(&items(Vec::<i32>::new())).map(|f| f.or_default(0)), Ok(0));
		assert_eq!(
			single_if_found(&items(vec![1, 2, 3]), |v| *v > 5),
			Ok(Found::Missing)
		);
		assert_eq!(
			single_if_found(&items(vec![1, 2, 2]), |v| *v == 2),
			Err(Error::MultipleElementsFound)
		);
	}

	#[test]
	fn test_element_at() {
		let seq = items(vec![10, 20, 30]);
		assert_eq!(element_at(&seq, 0), Ok(10));
		assert_eq!(element_at(&seq, 2), Ok(30));
		assert_eq!(element_at(&seq, 3), Err(Error::NoSuchElement));
	}

	#[test]
	fn test_element_at_found_recovers_past_the_end() {
		let seq = items(vec![10, 20]);
		assert_eq!(element_at_found(&seq, 1), Ok(Found::Found(20)));
		assert_eq!(element_at_found(&seq, 5), Ok(Found::Missing));
		assert_eq!(element_at_found(&seq, 5).map(|f| f.or_default(0)), Ok(0));
	}

	#[test]
	fn test_min_max_and_by_key() {
		let seq = items(vec![3, 1, 4, 1]);
		assert_eq!(min(&seq), Ok(1));
		assert_eq!(max(&seq), Ok(4));
		let words = items(vec!["bb", "a", "ccc"]);
		assert_eq!(min_by_key(&words, |s| s.len()), Ok("a"));
		assert_eq!(max_by_key(&words, |s| s.len()), Ok("ccc"));
		assert_eq!(min(&items(Vec::<i32>::new())), Err(Error::NoSuchElement));
	}

	#[test]
	fn test_sum_detects_overflow() {
		assert_eq!(sum(&items(vec![1u8, 2, 3])), Ok(6));
		assert_eq!(sum(&items(vec![200u8, 100])), Err(Error::Overflow));
	}

	#[test]
	fn test_sum_f64_and_average() {
		let seq = items(vec![1.0, 2.0, 3.0]);
		assert_eq!(sum_f64(&seq), Ok(6.0));
		assert_eq!(average(&seq), Ok(2.0));
		assert_eq!(average(&items(Vec::<f64>::new())), Err(Error::NoSuchElement));
	}

	#[test]
	fn test_aggregations_run_over_composed_pipelines() {
		let seq = items(vec![5, 3, 5, 1]).distinct().order_by(|v| *v);
		assert_eq!(to_vec(&seq), Ok(vec![1, 3, 5]));
		assert_eq!(count(&seq), Ok(3));
	}
}
