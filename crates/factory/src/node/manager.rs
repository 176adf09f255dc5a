use specula_meta::{ClassMeta, Value};

use super::{Composite, Cx, Role, missing};
use crate::source::Candidate;
use crate::{ContextPath, FactoryError, Fit, Result};

/// Selection progress of a [`Manager`] within the current unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
	/// Nothing learned from the current unit yet.
	Init,
	/// Candidates are being scored and fed to the selector.
	Collecting,
	/// Every candidate was seen; the selector has not answered yet.
	Finalized,
	/// Overload `index` was chosen.
	Selected(usize),
	/// No candidate fits the current unit.
	Rejected,
}

/// Chooses one constructor of a polymorphic class per unit.
///
/// Selection runs at most once per unit: the first `score` or `create`
/// after a `reset` collects every candidate's parameter fits, hands them to
/// the source's [`ConstructorSelector`](crate::ConstructorSelector) and
/// caches the answer.
#[derive(Debug)]
pub struct Manager<'g> {
	class: ClassMeta<'g>,
	path: ContextPath,
	scoped: bool,
	candidates: Vec<Composite<'g>>,
	aggregates: Vec<Fit>,
	state: ManagerState,
}

impl<'g> Manager<'g> {
	pub(crate) fn new(class: ClassMeta<'g>, path: ContextPath, scoped: bool, candidates: Vec<Composite<'g>>) -> Self {
		Self {
			class,
			path,
			scoped,
			candidates,
			aggregates: Vec::new(),
			state: ManagerState::Init,
		}
	}

	pub fn class(&self) -> ClassMeta<'g> {
		self.class
	}

	pub fn path(&self) -> &ContextPath {
		&self.path
	}

	pub fn state(&self) -> ManagerState {
		self.state
	}

	/// One composite per constructor, in overload order.
	pub fn candidates(&self) -> &[Composite<'g>] {
		&self.candidates
	}

	pub(crate) fn walk(&self, f: &mut dyn FnMut(Role, &ContextPath)) {
		f(Role::Manager, &self.path);
		for candidate in &self.candidates {
			candidate.walk(f);
		}
	}

	pub(crate) fn reset(&mut self) {
		self.state = ManagerState::Init;
		self.aggregates.clear();
		for candidate in &mut self.candidates {
			candidate.reset();
		}
	}

	fn select(&mut self, cx: &mut Cx<'_, '_>) -> Option<usize> {
		match self.state {
			ManagerState::Selected(index) => return Some(index),
			ManagerState::Rejected => return None,
			ManagerState::Init | ManagerState::Collecting | ManagerState::Finalized => {}
		}

		self.state = ManagerState::Collecting;
		let mut selector = cx.src.selector(cx.config);
		let count = self.candidates.len();
		let order: Vec<usize> = if cx.config.backward_iteration {
			(0..count).rev().collect()
		} else {
			(0..count).collect()
		};
		self.aggregates = vec![Fit::MISSING; count];
		for index in order {
			let candidate = &mut self.candidates[index];
			let fits = candidate.fits(cx);
			self.aggregates[index] = Fit::aggregate(&fits, cx.config.nullary_confidence);
			selector.add_constructor(&Candidate {
				index,
				constructor: candidate.constructor(),
				path: candidate.path(),
				fits: &fits,
			});
		}
		selector.finalize();
		self.state = ManagerState::Finalized;

		match selector.index().filter(|&index| index < count) {
			Some(index) => {
				tracing::debug!(
					domain = "factory",
					class = %self.class.full_name(),
					path = %self.path,
					selected = index,
					confidence = self.aggregates[index].confidence,
					candidates = count,
					"constructor selected"
				);
				self.state = ManagerState::Selected(index);
				Some(index)
			}
			None => {
				tracing::debug!(
					domain = "factory",
					class = %self.class.full_name(),
					path = %self.path,
					candidates = count,
					"no constructor fits"
				);
				self.state = ManagerState::Rejected;
				None
			}
		}
	}

	pub(crate) fn score(&mut self, cx: &mut Cx<'_, '_>, hint: usize) -> Fit {
		if !cx.enter(self.scoped, &self.path, hint) {
			return Fit::MISSING;
		}
		let fit = match self.select(cx) {
			Some(index) => self.aggregates[index],
			None => Fit::MISSING,
		};
		cx.leave(self.scoped);
		fit
	}

	pub(crate) fn create(&mut self, cx: &mut Cx<'_, '_>, hint: usize) -> Result<Value> {
		if !cx.enter(self.scoped, &self.path, hint) {
			return Err(missing(&self.path, self.class.full_name()));
		}
		let value = match self.select(cx) {
			Some(index) => self.candidates[index].build(cx),
			None => Err(FactoryError::NoMatchingConstructor {
				class: self.class.full_name(),
				path: self.path.clone(),
			}),
		};
		cx.leave(self.scoped);
		value
	}
}
