use crate::Range;

/// Concatenation returned by [`link`].
#[derive(Debug, Clone)]
pub struct Link<R> {
	parts: Vec<R>,
	current: usize,
}

impl<R: Range> Link<R> {
	fn skip_exhausted(&mut self) {
		while self.current < self.parts.len() && self.parts[self.current].is_empty() {
			self.current += 1;
		}
	}
}

impl<R: Range> Range for Link<R> {
	type Item = R::Item;

	#[inline]
	fn is_empty(&self) -> bool {
		self.current >= self.parts.len()
	}

	#[inline]
	fn front(&self) -> R::Item {
		debug_assert!(!self.is_empty(), "front() on an empty range");
		self.parts[self.current].front()
	}

	fn step_front(&mut self) {
		debug_assert!(!self.is_empty(), "step_front() on an empty range");
		self.parts[self.current].step_front();
		self.skip_exhausted();
	}
}

/// Concatenates homogeneous ranges in order.
///
/// Exhausted members are skipped lazily: when the first member is empty the
/// front of the linked range is the front of the next non-empty one.
pub fn link<R: Range>(parts: impl IntoIterator<Item = R>) -> Link<R> {
	let mut linked = Link {
		parts: parts.into_iter().collect(),
		current: 0,
	};
	linked.skip_exhausted();
	linked
}
