use specula_meta::Value;

use super::{Cx, FactoryNode};
use crate::{ContextPath, Fit, Result};

/// Builds a sequence by running its element producer once per item.
#[derive(Debug)]
pub struct Arrayer<'g> {
	path: ContextPath,
	element: Box<FactoryNode<'g>>,
}

impl<'g> Arrayer<'g> {
	pub(crate) fn new(path: ContextPath, element: FactoryNode<'g>) -> Self {
		Self {
			path,
			element: Box::new(element),
		}
	}

	pub fn path(&self) -> &ContextPath {
		&self.path
	}

	/// Producer of each element.
	pub fn element(&self) -> &FactoryNode<'g> {
		&self.element
	}

	pub(crate) fn reset(&mut self) {
		self.element.reset();
	}

	/// Item count of the sequence in the current scope.
	///
	/// # Panics
	///
	/// When the source cannot enumerate sequences at all.
	fn len(&self, cx: &mut Cx<'_, '_>, hint: usize) -> Option<usize> {
		match cx.src.sequence_len(&self.path, hint) {
			Ok(len) => len,
			Err(err) => panic!("cannot build the sequence at {}: {err}", self.path),
		}
	}

	pub(crate) fn score(&mut self, cx: &mut Cx<'_, '_>, hint: usize) -> Fit {
		let Some(len) = self.len(cx, hint) else {
			return Fit::MISSING;
		};
		if !cx.enter(true, &self.path, hint) {
			return Fit::MISSING;
		}
		let mut fits = Vec::with_capacity(len);
		for index in 0..len {
			self.element.reset();
			fits.push(self.element.score(cx, index));
		}
		cx.leave(true);
		Fit {
			present: true,
			..Fit::aggregate(&fits, 1.0)
		}
	}

	pub(crate) fn create(&mut self, cx: &mut Cx<'_, '_>, hint: usize) -> Result<Value> {
		let Some(len) = self.len(cx, hint) else {
			tracing::trace!(domain = "factory", path = %self.path, "absent sequence, building it empty");
			return Ok(Value::Seq(Vec::new()));
		};
		if !cx.enter(true, &self.path, hint) {
			return Ok(Value::Seq(Vec::new()));
		}
		let items = self.create_items(cx, len);
		cx.leave(true);
		items.map(Value::Seq)
	}

	fn create_items(&mut self, cx: &mut Cx<'_, '_>, len: usize) -> Result<Vec<Value>> {
		let mut items = Vec::with_capacity(len);
		for index in 0..len {
			items.push(self.element.make_next(cx, index)?);
		}
		Ok(items)
	}
}
