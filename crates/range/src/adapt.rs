//! Lazy range adapters, plus the eager [`sort`].

use std::cmp::Ordering;

use crate::Range;
use crate::source::VecRange;

/// Filtering adapter returned by [`only_if`].
#[derive(Debug, Clone)]
pub struct OnlyIf<R, P> {
	inner: R,
	pred: P,
}

impl<R, P> OnlyIf<R, P>
where
	R: Range,
	P: Fn(&R::Item) -> bool,
{
	fn skip_rejected(&mut self) {
		while !self.inner.is_empty() && !(self.pred)(&self.inner.front()) {
			self.inner.step_front();
		}
	}
}

impl<R, P> Range for OnlyIf<R, P>
where
	R: Range,
	P: Fn(&R::Item) -> bool,
{
	type Item = R::Item;

	#[inline]
	fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	#[inline]
	fn front(&self) -> R::Item {
		self.inner.front()
	}

	fn step_front(&mut self) {
		self.inner.step_front();
		self.skip_rejected();
	}
}

/// Keeps only the elements of `range` for which `pred` holds, in order.
///
/// Rejected fronts are skipped immediately, so the returned range is empty
/// exactly when no remaining element matches.
pub fn only_if<R, P>(range: R, pred: P) -> OnlyIf<R, P>
where
	R: Range,
	P: Fn(&R::Item) -> bool,
{
	let mut filtered = OnlyIf { inner: range, pred };
	filtered.skip_rejected();
	filtered
}

/// Mapping adapter returned by [`transform`].
#[derive(Debug, Clone)]
pub struct Transform<R, F> {
	inner: R,
	f: F,
}

impl<R, F, U> Range for Transform<R, F>
where
	R: Range,
	F: Fn(R::Item) -> U,
{
	type Item = U;

	#[inline]
	fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	#[inline]
	fn front(&self) -> U {
		(self.f)(self.inner.front())
	}

	#[inline]
	fn step_front(&mut self) {
		self.inner.step_front()
	}

	#[inline]
	fn leap_front(&mut self, n: usize) {
		self.inner.leap_front(n)
	}
}

/// Maps every front of `range` through `f`.
///
/// `f` runs on each call to [`Range::front`]; nothing is cached.
pub fn transform<R, F, U>(range: R, f: F) -> Transform<R, F>
where
	R: Range,
	F: Fn(R::Item) -> U,
{
	Transform { inner: range, f }
}

/// Re-typing filter returned by [`extract`].
#[derive(Debug, Clone)]
pub struct Extract<R, F> {
	inner: R,
	f: F,
}

impl<R, F, U> Extract<R, F>
where
	R: Range,
	F: Fn(R::Item) -> Option<U>,
{
	fn skip_rejected(&mut self) {
		while !self.inner.is_empty() && (self.f)(self.inner.front()).is_none() {
			self.inner.step_front();
		}
	}
}

impl<R, F, U> Range for Extract<R, F>
where
	R: Range,
	F: Fn(R::Item) -> Option<U>,
{
	type Item = U;

	#[inline]
	fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	fn front(&self) -> U {
		match (self.f)(self.inner.front()) {
			Some(item) => item,
			None => unreachable!("extract() front was not skipped"),
		}
	}

	fn step_front(&mut self) {
		self.inner.step_front();
		self.skip_rejected();
	}
}

/// Keeps only the elements `f` can view as `U`, yielding the views.
///
/// `f` must be pure: it is consulted both to skip and to produce the front.
pub fn extract<R, F, U>(range: R, f: F) -> Extract<R, F>
where
	R: Range,
	F: Fn(R::Item) -> Option<U>,
{
	let mut extracted = Extract { inner: range, f };
	extracted.skip_rejected();
	extracted
}

/// Length cap returned by [`limit`].
#[derive(Debug, Clone)]
pub struct Limit<R> {
	inner: R,
	remaining: usize,
}

impl<R: Range> Range for Limit<R> {
	type Item = R::Item;

	#[inline]
	fn is_empty(&self) -> bool {
		self.remaining == 0 || self.inner.is_empty()
	}

	#[inline]
	fn front(&self) -> R::Item {
		debug_assert!(self.remaining > 0, "front() on an empty range");
		self.inner.front()
	}

	#[inline]
	fn step_front(&mut self) {
		debug_assert!(self.remaining > 0, "step_front() on an empty range");
		self.inner.step_front();
		self.remaining -= 1;
	}

	fn leap_front(&mut self, n: usize) {
		let n = n.min(self.remaining);
		self.inner.leap_front(n);
		self.remaining -= n;
	}
}

/// Caps `range` at its first `n` elements.
pub fn limit<R: Range>(range: R, n: usize) -> Limit<R> {
	Limit {
		inner: range,
		remaining: n,
	}
}

/// Prefix skip returned by [`offset`].
#[derive(Debug, Clone)]
pub struct Offset<R> {
	inner: R,
}

impl<R: Range> Range for Offset<R> {
	type Item = R::Item;

	#[inline]
	fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	#[inline]
	fn front(&self) -> R::Item {
		self.inner.front()
	}

	#[inline]
	fn step_front(&mut self) {
		self.inner.step_front()
	}

	#[inline]
	fn leap_front(&mut self, n: usize) {
		self.inner.leap_front(n)
	}
}

/// Skips the first `n` elements of `range` via [`Range::leap_front`].
pub fn offset<R: Range>(mut range: R, n: usize) -> Offset<R> {
	range.leap_front(n);
	Offset { inner: range }
}

/// Terminating adapter returned by [`until`].
#[derive(Debug, Clone)]
pub struct Until<R, P> {
	inner: R,
	pred: P,
	done: bool,
}

impl<R, P> Until<R, P>
where
	R: Range,
	P: Fn(&R::Item) -> bool,
{
	fn check(&mut self) {
		self.done = self.inner.is_empty() || (self.pred)(&self.inner.front());
	}
}

impl<R, P> Range for Until<R, P>
where
	R: Range,
	P: Fn(&R::Item) -> bool,
{
	type Item = R::Item;

	#[inline]
	fn is_empty(&self) -> bool {
		self.done
	}

	#[inline]
	fn front(&self) -> R::Item {
		debug_assert!(!self.done, "front() on an empty range");
		self.inner.front()
	}

	fn step_front(&mut self) {
		debug_assert!(!self.done, "step_front() on an empty range");
		self.inner.step_front();
		self.check();
	}
}

/// Ends `range` right before the first element satisfying `pred`.
///
/// If the initial front already satisfies `pred` the result is empty. Once
/// ended, the range stays empty even if later elements would not match.
pub fn until<R, P>(range: R, pred: P) -> Until<R, P>
where
	R: Range,
	P: Fn(&R::Item) -> bool,
{
	let mut bounded = Until {
		inner: range,
		pred,
		done: false,
	};
	bounded.check();
	bounded
}

/// Materializes `range` and sorts it with `cmp`.
///
/// This is the one eager operation of the algebra. The sort is stable, so
/// elements comparing equal keep their original relative order.
pub fn sort<R, F>(range: R, mut cmp: F) -> VecRange<R::Item>
where
	R: Range,
	R::Item: Clone,
	F: FnMut(&R::Item, &R::Item) -> Ordering,
{
	let mut items = crate::RangeExt::collect_vec(range);
	items.sort_by(&mut cmp);
	VecRange::new(items)
}

/// Materializes `range` and sorts it by the key `f` extracts.
pub fn sort_by_key<R, K, F>(range: R, mut f: F) -> VecRange<R::Item>
where
	R: Range,
	R::Item: Clone,
	K: Ord,
	F: FnMut(&R::Item) -> K,
{
	sort(range, |a, b| f(a).cmp(&f(b)))
}
