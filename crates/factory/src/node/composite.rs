use specula_meta::{Arguments, CallableMeta, ClassMeta, Value};

use super::{Cx, FactoryNode, Role, missing};
use crate::{ContextPath, FactoryError, Fit, Result};

/// A constructor parameter and the node producing its argument.
#[derive(Debug)]
pub(crate) struct Slot<'g> {
	pub(crate) position: usize,
	pub(crate) node: FactoryNode<'g>,
}

/// Builds a class through one constructor: one child per parameter, then
/// the constructor call.
#[derive(Debug)]
pub struct Composite<'g> {
	class: ClassMeta<'g>,
	constructor: CallableMeta<'g>,
	index: usize,
	slot_path: ContextPath,
	path: ContextPath,
	scoped: bool,
	slots: Vec<Slot<'g>>,
}

impl<'g> Composite<'g> {
	pub(crate) fn new(
		class: ClassMeta<'g>,
		constructor: CallableMeta<'g>,
		index: usize,
		slot_path: ContextPath,
		path: ContextPath,
		scoped: bool,
		slots: Vec<Slot<'g>>,
	) -> Self {
		Self {
			class,
			constructor,
			index,
			slot_path,
			path,
			scoped,
			slots,
		}
	}

	pub fn class(&self) -> ClassMeta<'g> {
		self.class
	}

	pub fn constructor(&self) -> CallableMeta<'g> {
		self.constructor
	}

	/// Overload index of the constructor within its class.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Path of the slot the class fills.
	pub fn slot_path(&self) -> &ContextPath {
		&self.slot_path
	}

	/// Path of the constructor, the prefix of every parameter path.
	pub fn path(&self) -> &ContextPath {
		&self.path
	}

	/// Argument producers, in parameter order.
	pub fn children(&self) -> impl Iterator<Item = &FactoryNode<'g>> {
		self.slots.iter().map(|slot| &slot.node)
	}

	pub(crate) fn walk(&self, f: &mut dyn FnMut(Role, &ContextPath)) {
		f(Role::Composite, &self.path);
		for slot in &self.slots {
			slot.node.walk(f);
		}
	}

	pub(crate) fn reset(&mut self) {
		for slot in &mut self.slots {
			slot.node.reset();
		}
	}

	/// Parameter fits against the current scope.
	pub(crate) fn fits(&mut self, cx: &mut Cx<'_, '_>) -> Vec<Fit> {
		self.slots.iter_mut().map(|slot| slot.node.score(cx, slot.position)).collect()
	}

	/// Creates every argument in the current scope, then invokes the constructor.
	pub(crate) fn build(&mut self, cx: &mut Cx<'_, '_>) -> Result<Value> {
		let mut args = Vec::with_capacity(self.slots.len());
		for slot in &mut self.slots {
			args.push(slot.node.create(cx, slot.position)?);
		}
		tracing::trace!(domain = "factory", path = %self.path, args = args.len(), "invoking constructor");
		self.constructor
			.invoke(Arguments::new(args))
			.map_err(|source| FactoryError::Invoke {
				constructor: self.constructor.full_name(),
				path: self.path.clone(),
				source,
			})
	}

	pub(crate) fn score(&mut self, cx: &mut Cx<'_, '_>, hint: usize) -> Fit {
		if !cx.enter(self.scoped, &self.slot_path, hint) {
			return Fit::MISSING;
		}
		let fit = Fit::aggregate(&self.fits(cx), cx.config.nullary_confidence);
		cx.leave(self.scoped);
		fit
	}

	pub(crate) fn create(&mut self, cx: &mut Cx<'_, '_>, hint: usize) -> Result<Value> {
		if !cx.enter(self.scoped, &self.slot_path, hint) {
			return Err(missing(&self.slot_path, self.class.full_name()));
		}
		let value = self.build(cx);
		cx.leave(self.scoped);
		value
	}
}
