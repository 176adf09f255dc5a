//! Consumers that drain a range.

use crate::Range;

/// Calls `f` on every element of `range`, front to back.
pub fn for_each<R, F>(mut range: R, mut f: F)
where
	R: Range,
	F: FnMut(R::Item),
{
	while !range.is_empty() {
		f(range.front());
		range.step_front();
	}
}

/// Folds every element of `range` into `init` with `f`.
pub fn fold<R, A, F>(mut range: R, init: A, mut f: F) -> A
where
	R: Range,
	F: FnMut(A, R::Item) -> A,
{
	let mut acc = init;
	while !range.is_empty() {
		acc = f(acc, range.front());
		range.step_front();
	}
	acc
}

/// Counts the elements of `range`.
pub fn count<R: Range>(range: R) -> usize {
	fold(range, 0, |n, _| n + 1)
}

/// Returns the first element of `range` satisfying `pred`.
pub fn find<R, P>(mut range: R, pred: P) -> Option<R::Item>
where
	R: Range,
	P: Fn(&R::Item) -> bool,
{
	while !range.is_empty() {
		let item = range.front();
		if pred(&item) {
			return Some(item);
		}
		range.step_front();
	}
	None
}

/// Returns true when some element of `range` equals `needle`.
pub fn contains<R>(range: R, needle: &R::Item) -> bool
where
	R: Range,
	R::Item: PartialEq,
{
	find(range, |item| item == needle).is_some()
}
