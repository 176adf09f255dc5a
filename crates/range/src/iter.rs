//! Bridges between ranges and [`Iterator`].

use crate::Range;

/// Iterator draining a range front to back.
#[derive(Debug, Clone)]
pub struct RangeIter<R> {
	range: R,
}

impl<R: Range> RangeIter<R> {
	pub(crate) fn new(range: R) -> Self {
		Self { range }
	}

	/// Returns the range that has not been iterated yet.
	pub fn into_inner(self) -> R {
		self.range
	}
}

impl<R: Range> Iterator for RangeIter<R> {
	type Item = R::Item;

	fn next(&mut self) -> Option<R::Item> {
		if self.range.is_empty() {
			return None;
		}
		let item = self.range.front();
		self.range.step_front();
		Some(item)
	}
}

/// Range over an arbitrary iterator, buffering one element ahead.
pub struct IterRange<I: Iterator> {
	iter: I,
	head: Option<I::Item>,
}

impl<I> Clone for IterRange<I>
where
	I: Iterator + Clone,
	I::Item: Clone,
{
	fn clone(&self) -> Self {
		Self {
			iter: self.iter.clone(),
			head: self.head.clone(),
		}
	}
}

impl<I> Range for IterRange<I>
where
	I: Iterator,
	I::Item: Clone,
{
	type Item = I::Item;

	#[inline]
	fn is_empty(&self) -> bool {
		self.head.is_none()
	}

	fn front(&self) -> I::Item {
		match &self.head {
			Some(item) => item.clone(),
			None => panic!("front() on an empty range"),
		}
	}

	fn step_front(&mut self) {
		debug_assert!(!self.is_empty(), "step_front() on an empty range");
		self.head = self.iter.next();
	}
}

/// Wraps an iterator into a range.
pub fn from_iter<I>(iter: I) -> IterRange<I::IntoIter>
where
	I: IntoIterator,
	I::Item: Clone,
{
	let mut iter = iter.into_iter();
	let head = iter.next();
	IterRange { iter, head }
}
