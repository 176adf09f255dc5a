use crate::Range;

/// Borrowing range over a slice, yielding references.
#[derive(Debug)]
pub struct SliceRange<'a, T> {
	items: &'a [T],
}

impl<T> Clone for SliceRange<'_, T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for SliceRange<'_, T> {}

impl<'a, T> SliceRange<'a, T> {
	/// Creates a range over `items`.
	pub fn new(items: &'a [T]) -> Self {
		Self { items }
	}

	/// Returns the elements not yet stepped past.
	pub fn as_slice(&self) -> &'a [T] {
		self.items
	}
}

impl<'a, T> Range for SliceRange<'a, T> {
	type Item = &'a T;

	#[inline]
	fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	#[inline]
	fn front(&self) -> &'a T {
		debug_assert!(!self.is_empty(), "front() on an empty range");
		&self.items[0]
	}

	#[inline]
	fn step_front(&mut self) {
		debug_assert!(!self.is_empty(), "step_front() on an empty range");
		self.items = &self.items[1..];
	}

	#[inline]
	fn leap_front(&mut self, n: usize) {
		self.items = &self.items[n.min(self.items.len())..];
	}
}

/// Owning range over a vector, yielding clones.
#[derive(Debug, Clone)]
pub struct VecRange<T> {
	items: Vec<T>,
	pos: usize,
}

impl<T> VecRange<T> {
	/// Creates a range over `items`.
	pub fn new(items: Vec<T>) -> Self {
		Self { items, pos: 0 }
	}

	/// Number of elements not yet stepped past.
	pub fn len(&self) -> usize {
		self.items.len() - self.pos
	}

	/// Returns the elements not yet stepped past.
	pub fn as_slice(&self) -> &[T] {
		&self.items[self.pos..]
	}
}

impl<T: Clone> Range for VecRange<T> {
	type Item = T;

	#[inline]
	fn is_empty(&self) -> bool {
		self.pos >= self.items.len()
	}

	#[inline]
	fn front(&self) -> T {
		debug_assert!(!self.is_empty(), "front() on an empty range");
		self.items[self.pos].clone()
	}

	#[inline]
	fn step_front(&mut self) {
		debug_assert!(!self.is_empty(), "step_front() on an empty range");
		self.pos += 1;
	}

	#[inline]
	fn leap_front(&mut self, n: usize) {
		self.pos = self.pos.saturating_add(n).min(self.items.len());
	}
}

/// Range holding exactly one element.
#[derive(Debug, Clone)]
pub struct Once<T> {
	item: Option<T>,
}

impl<T: Clone> Range for Once<T> {
	type Item = T;

	fn is_empty(&self) -> bool {
		self.item.is_none()
	}

	fn front(&self) -> T {
		match &self.item {
			Some(item) => item.clone(),
			None => panic!("front() on an empty range"),
		}
	}

	fn step_front(&mut self) {
		debug_assert!(!self.is_empty(), "step_front() on an empty range");
		self.item = None;
	}
}

/// Range with no elements.
#[derive(Debug)]
pub struct Empty<T> {
	_marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> Clone for Empty<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Empty<T> {}

impl<T> Range for Empty<T> {
	type Item = T;

	fn is_empty(&self) -> bool {
		true
	}

	fn front(&self) -> T {
		panic!("front() on an empty range")
	}

	fn step_front(&mut self) {
		panic!("step_front() on an empty range")
	}

	fn leap_front(&mut self, _n: usize) {}
}

/// Creates a borrowing range over a slice.
pub fn from_slice<T>(items: &[T]) -> SliceRange<'_, T> {
	SliceRange::new(items)
}

/// Creates an owning range over a vector.
pub fn from_vec<T>(items: Vec<T>) -> VecRange<T> {
	VecRange::new(items)
}

/// Creates a range holding exactly `item`.
pub fn once<T>(item: T) -> Once<T> {
	Once { item: Some(item) }
}

/// Creates a range with no elements.
pub fn empty<T>() -> Empty<T> {
	Empty {
		_marker: std::marker::PhantomData,
	}
}
