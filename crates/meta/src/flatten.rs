//! Scope traversal ranges and interface extraction.

use std::collections::VecDeque;

use specula_range::{Extract, Range, extract};

use crate::graph::MetaRange;
use crate::{Interface, MetaId, MetaRef};

/// Every member transitively nested in a scope, level by level.
#[derive(Debug, Clone)]
pub struct Flatten<'g> {
	graph: &'g crate::MetaGraph,
	queue: VecDeque<MetaId>,
}

impl<'g> Range for Flatten<'g> {
	type Item = MetaRef<'g>;

	#[inline]
	fn is_empty(&self) -> bool {
		self.queue.is_empty()
	}

	fn front(&self) -> MetaRef<'g> {
		match self.queue.front() {
			Some(&id) => MetaRef::new(self.graph, id),
			None => panic!("front() on an empty range"),
		}
	}

	fn step_front(&mut self) {
		debug_assert!(!self.is_empty(), "step_front() on an empty range");
		if let Some(id) = self.queue.pop_front() {
			self.queue.extend(self.graph.object(id).members());
		}
	}
}

/// Returns every member transitively nested in `scope`, excluding `scope`.
///
/// Order is unspecified beyond each member appearing exactly once; use
/// [`flatten_in_order`] when declaration order matters.
pub fn flatten(scope: MetaRef<'_>) -> Flatten<'_> {
	Flatten {
		graph: scope.graph(),
		queue: scope.object().members().iter().copied().collect(),
	}
}

/// Pre-order traversal of a scope: each member, then its own members, then
/// its next sibling.
#[derive(Debug, Clone)]
pub struct FlattenInOrder<'g> {
	stack: Vec<MetaRange<'g>>,
}

impl FlattenInOrder<'_> {
	fn pop_exhausted(&mut self) {
		while self.stack.last().is_some_and(|top| top.is_empty()) {
			self.stack.pop();
		}
	}
}

impl<'g> Range for FlattenInOrder<'g> {
	type Item = MetaRef<'g>;

	#[inline]
	fn is_empty(&self) -> bool {
		self.stack.is_empty()
	}

	fn front(&self) -> MetaRef<'g> {
		match self.stack.last() {
			Some(top) => top.front(),
			None => panic!("front() on an empty range"),
		}
	}

	fn step_front(&mut self) {
		debug_assert!(!self.is_empty(), "step_front() on an empty range");
		let Some(top) = self.stack.last_mut() else {
			return;
		};
		let current = top.front();
		top.step_front();
		let children = current.members();
		if !children.is_empty() {
			self.stack.push(children);
		}
		self.pop_exhausted();
	}
}

/// Returns every member transitively nested in `scope` in declaration
/// pre-order. For `A { B, C }, D` this yields `A, B, C, D`.
pub fn flatten_in_order(scope: MetaRef<'_>) -> FlattenInOrder<'_> {
	let mut flat = FlattenInOrder {
		stack: vec![scope.members()],
	};
	flat.pop_exhausted();
	flat
}

/// Range of the elements of `R` viewable as `I`.
pub type ExtractAs<'g, R, I> = Extract<R, fn(MetaRef<'g>) -> Option<I>>;

/// Keeps the metaobjects of `range` that expose interface `I`, viewed as `I`.
pub fn extract_as<'g, R, I>(range: R) -> ExtractAs<'g, R, I>
where
	R: Range<Item = MetaRef<'g>>,
	I: Interface<'g>,
{
	extract(range, MetaRef::try_as::<I> as fn(MetaRef<'g>) -> Option<I>)
}

/// Fluent [`extract_as`] on metaobject ranges.
pub trait MetaRangeExt<'g>: Range<Item = MetaRef<'g>> + Sized {
	fn extract_as<I: Interface<'g>>(self) -> ExtractAs<'g, Self, I> {
		extract_as(self)
	}
}

impl<'g, R: Range<Item = MetaRef<'g>>> MetaRangeExt<'g> for R {}
