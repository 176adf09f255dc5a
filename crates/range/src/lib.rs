//! Lazy cursor ranges.
//!
//! A [`Range`] is a forward-only cursor: it exposes the element at its front
//! and can be stepped past it. Adapters in this crate wrap a range and change
//! what the cursor sees without materializing anything, with the single
//! exception of [`sort`], which has to look at every element before it can
//! yield the first one.
//!
//! # Contract
//!
//! - [`Range::front`] and [`Range::step_front`] must only be called while
//!   [`Range::is_empty`] returns false. Violations are programmer errors and
//!   trip a debug assertion.
//! - Adapters never fail. Filtering adapters skip non-matching fronts eagerly,
//!   both when constructed and after every step, so `is_empty` is always exact.
//! - A range is single-pass unless its storage is clonable, in which case the
//!   range itself implements [`Clone`] and each clone advances independently.
//!
//! # Example
//!
//! ```
//! use specula_range::{Range, RangeExt, from_vec};
//!
//! let evens: Vec<i32> = from_vec(vec![1, 2, 3, 4, 5, 6])
//! 	.only_if(|n| n % 2 == 0)
//! 	.transform(|n| n * 10)
//! 	.limit(2)
//! 	.collect_vec();
//! assert_eq!(evens, vec![20, 40]);
//! ```

mod adapt;
mod consume;
mod iter;
mod link;
mod source;

pub use adapt::{Extract, Limit, Offset, OnlyIf, Transform, Until, extract, limit, offset, only_if, sort, sort_by_key, transform, until};
pub use consume::{contains, count, find, fold, for_each};
pub use iter::{IterRange, RangeIter, from_iter};
pub use link::{Link, link};
pub use source::{Empty, Once, SliceRange, VecRange, empty, from_slice, from_vec, once};

/// A forward-only cursor over a sequence of items.
pub trait Range {
	/// Element type yielded by [`Range::front`].
	type Item;

	/// Returns true when no element remains.
	fn is_empty(&self) -> bool;

	/// Returns the element at the front of the range.
	///
	/// The range must not be empty.
	fn front(&self) -> Self::Item;

	/// Advances past the front element.
	///
	/// The range must not be empty.
	fn step_front(&mut self);

	/// Advances past up to `n` elements, stopping early at the end.
	fn leap_front(&mut self, n: usize) {
		for _ in 0..n {
			if self.is_empty() {
				break;
			}
			self.step_front();
		}
	}
}

impl<R: Range + ?Sized> Range for &mut R {
	type Item = R::Item;

	#[inline]
	fn is_empty(&self) -> bool {
		(**self).is_empty()
	}

	#[inline]
	fn front(&self) -> Self::Item {
		(**self).front()
	}

	#[inline]
	fn step_front(&mut self) {
		(**self).step_front()
	}

	#[inline]
	fn leap_front(&mut self, n: usize) {
		(**self).leap_front(n)
	}
}

impl<R: Range + ?Sized> Range for Box<R> {
	type Item = R::Item;

	#[inline]
	fn is_empty(&self) -> bool {
		(**self).is_empty()
	}

	#[inline]
	fn front(&self) -> Self::Item {
		(**self).front()
	}

	#[inline]
	fn step_front(&mut self) {
		(**self).step_front()
	}

	#[inline]
	fn leap_front(&mut self, n: usize) {
		(**self).leap_front(n)
	}
}

/// Fluent adapter methods for every [`Range`].
pub trait RangeExt: Range + Sized {
	/// Keeps only the elements for which `pred` holds. See [`only_if`].
	fn only_if<P>(self, pred: P) -> OnlyIf<Self, P>
	where
		P: Fn(&Self::Item) -> bool,
	{
		only_if(self, pred)
	}

	/// Maps each front through `f`. See [`transform`].
	fn transform<U, F>(self, f: F) -> Transform<Self, F>
	where
		F: Fn(Self::Item) -> U,
	{
		transform(self, f)
	}

	/// Keeps the elements `f` can re-type. See [`extract`].
	fn extract<U, F>(self, f: F) -> Extract<Self, F>
	where
		F: Fn(Self::Item) -> Option<U>,
	{
		extract(self, f)
	}

	/// Caps the range at `n` elements. See [`limit`].
	fn limit(self, n: usize) -> Limit<Self> {
		limit(self, n)
	}

	/// Skips the first `n` elements. See [`offset`].
	fn offset(self, n: usize) -> Offset<Self> {
		offset(self, n)
	}

	/// Ends the range at the first element satisfying `pred`. See [`until`].
	fn until<P>(self, pred: P) -> Until<Self, P>
	where
		P: Fn(&Self::Item) -> bool,
	{
		until(self, pred)
	}

	/// Eagerly sorts the remaining elements. See [`sort`].
	fn sorted_by<F>(self, cmp: F) -> VecRange<Self::Item>
	where
		Self::Item: Clone,
		F: FnMut(&Self::Item, &Self::Item) -> std::cmp::Ordering,
	{
		sort(self, cmp)
	}

	/// Appends `other` after this range.
	fn link_with(self, other: Self) -> Link<Self> {
		link(vec![self, other])
	}

	/// Calls `f` on every remaining element.
	fn for_each_front<F>(self, f: F)
	where
		F: FnMut(Self::Item),
	{
		for_each(self, f)
	}

	/// Folds every remaining element into an accumulator.
	fn fold_front<A, F>(self, init: A, f: F) -> A
	where
		F: FnMut(A, Self::Item) -> A,
	{
		fold(self, init, f)
	}

	/// Counts the remaining elements.
	fn count_front(self) -> usize {
		count(self)
	}

	/// Returns the first element satisfying `pred`.
	fn find_front<P>(self, pred: P) -> Option<Self::Item>
	where
		P: Fn(&Self::Item) -> bool,
	{
		find(self, pred)
	}

	/// Collects the remaining elements.
	fn collect_vec(self) -> Vec<Self::Item> {
		self.into_iter_range().collect()
	}

	/// Bridges the range into an [`Iterator`].
	fn into_iter_range(self) -> RangeIter<Self> {
		RangeIter::new(self)
	}
}

impl<R: Range> RangeExt for R {}
