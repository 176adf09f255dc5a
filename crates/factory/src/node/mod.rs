//! Build-tree nodes.
//!
//! # Purpose
//!
//! A build tree mirrors the constructor and parameter structure of one
//! product class. Each node plays one [`Role`] and owns its children
//! exclusively; the tree is built once per [`Factory`](crate::Factory) and
//! reused for every unit the source yields.
//!
//! # Protocol
//!
//! Every node answers three calls, always relative to the source's current
//! scope and a position hint (the parameter position, or the element index
//! inside a sequence):
//!
//! * `reset` forgets everything learned from the previous unit.
//! * `score` estimates how well the data fits, without building anything.
//!   Managers run constructor selection here and remember the outcome.
//! * `create` builds the value. Children are created first, so values are
//!   assembled bottom-up and a parent invokes its constructor last.
//!
//! # Failure modes
//!
//! * Conversion failures and unselectable polymorphic classes abort the unit.
//! * Null or absent fields degrade to declared or type defaults. Structured
//!   data in a scalar slot is a conversion failure.
//! * Unmatched enumeration literals degrade to the enumeration's default.
//! * Sources that cannot enumerate sequences make arrayers panic.

use specula_meta::Value;

use crate::enums::EnumMatcher;
use crate::{ContextPath, DataSource, FactoryConfig, FactoryError, Field, Fit, Result};

mod arrayer;
mod composite;
mod enumerator;
mod manager;
mod manufacturer;
mod suppliers;

pub use arrayer::Arrayer;
pub use composite::Composite;
pub(crate) use composite::Slot;
pub use enumerator::Enumerator;
pub use manager::{Manager, ManagerState};
pub use manufacturer::Manufacturer;
pub use suppliers::Suppliers;

/// Per-pass state threaded through the build tree.
pub(crate) struct Cx<'a, 's> {
	pub(crate) src: &'a mut (dyn DataSource + 's),
	pub(crate) config: &'a FactoryConfig,
	pub(crate) matcher: &'a dyn EnumMatcher,
}

/// What the source holds for a scalar slot.
#[derive(Debug)]
pub(crate) enum Located {
	Absent,
	Null,
	Scalar(Field),
	/// A nested object, call or sequence where a scalar is expected.
	Structured,
}

impl Cx<'_, '_> {
	pub(crate) fn locate(&self, path: &ContextPath, hint: usize) -> Located {
		let Some(index) = self.src.find_field(path, hint) else {
			return Located::Absent;
		};
		match self.src.field(index) {
			None => Located::Structured,
			Some(Field::Null) => Located::Null,
			Some(field) => Located::Scalar(field),
		}
	}

	/// Enters the nested scope of a slot when `scoped`.
	pub(crate) fn enter(&mut self, scoped: bool, path: &ContextPath, hint: usize) -> bool {
		!scoped || self.src.add_sub_handler(path, hint)
	}

	pub(crate) fn leave(&mut self, scoped: bool) {
		if scoped {
			self.src.skip_sub_handler();
		}
	}
}

/// What a node does in the build tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
	Manager,
	Composite,
	Arrayer,
	Manufacturer,
	Suppliers,
	Enumerator,
}

/// A node of the build tree.
#[derive(Debug)]
pub enum FactoryNode<'g> {
	/// Chooses a constructor of a polymorphic class.
	Manager(Manager<'g>),
	/// Builds a class through one constructor.
	Composite(Composite<'g>),
	/// Builds a sequence element by element.
	Arrayer(Arrayer<'g>),
	/// Converts a field into a builtin scalar.
	Manufacturer(Manufacturer),
	/// Stands in for a class already being built on the same path.
	Suppliers(Suppliers),
	/// Resolves an enumeration literal.
	Enumerator(Enumerator<'g>),
}

impl<'g> FactoryNode<'g> {
	pub fn role(&self) -> Role {
		match self {
			FactoryNode::Manager(_) => Role::Manager,
			FactoryNode::Composite(_) => Role::Composite,
			FactoryNode::Arrayer(_) => Role::Arrayer,
			FactoryNode::Manufacturer(_) => Role::Manufacturer,
			FactoryNode::Suppliers(_) => Role::Suppliers,
			FactoryNode::Enumerator(_) => Role::Enumerator,
		}
	}

	/// Path of the slot this node fills.
	pub fn path(&self) -> &ContextPath {
		match self {
			FactoryNode::Manager(n) => n.path(),
			FactoryNode::Composite(n) => n.slot_path(),
			FactoryNode::Arrayer(n) => n.path(),
			FactoryNode::Manufacturer(n) => n.path(),
			FactoryNode::Suppliers(n) => n.path(),
			FactoryNode::Enumerator(n) => n.path(),
		}
	}

	/// Calls `f` with the role and path of every node, in pre-order.
	///
	/// Composites report their constructor path, so each call names a
	/// distinct slot.
	pub fn walk(&self, f: &mut dyn FnMut(Role, &ContextPath)) {
		match self {
			FactoryNode::Manager(n) => n.walk(f),
			FactoryNode::Composite(n) => n.walk(f),
			FactoryNode::Arrayer(n) => {
				f(Role::Arrayer, n.path());
				n.element().walk(f);
			}
			other => f(other.role(), other.path()),
		}
	}

	pub(crate) fn reset(&mut self) {
		match self {
			FactoryNode::Manager(n) => n.reset(),
			FactoryNode::Composite(n) => n.reset(),
			FactoryNode::Arrayer(n) => n.reset(),
			FactoryNode::Manufacturer(_) | FactoryNode::Suppliers(_) | FactoryNode::Enumerator(_) => {}
		}
	}

	pub(crate) fn score(&mut self, cx: &mut Cx<'_, '_>, hint: usize) -> Fit {
		match self {
			FactoryNode::Manager(n) => n.score(cx, hint),
			FactoryNode::Composite(n) => n.score(cx, hint),
			FactoryNode::Arrayer(n) => n.score(cx, hint),
			FactoryNode::Manufacturer(n) => n.score(cx, hint),
			FactoryNode::Suppliers(n) => n.score(),
			FactoryNode::Enumerator(n) => n.score(cx, hint),
		}
	}

	/// Builds the value of this slot.
	///
	/// An enumerator that matches nothing yields its enumeration's default.
	pub(crate) fn create(&mut self, cx: &mut Cx<'_, '_>, hint: usize) -> Result<Value> {
		match self {
			FactoryNode::Manager(n) => n.create(cx, hint),
			FactoryNode::Composite(n) => n.create(cx, hint),
			FactoryNode::Arrayer(n) => n.create(cx, hint),
			FactoryNode::Manufacturer(n) => n.create(cx, hint),
			FactoryNode::Suppliers(n) => n.get(),
			FactoryNode::Enumerator(n) => Ok(Value::Enum(match n.create(cx, hint)? {
				Some(value) => value,
				None => {
					let fallback = n.default_value();
					tracing::warn!(
						domain = "factory",
						path = %n.path(),
						enumeration = %n.enumeration().full_name(),
						fallback,
						"unmatched enum literal, substituting default"
					);
					fallback
				}
			})),
		}
	}

	/// Resets this node and builds the next value; used per sequence element.
	pub(crate) fn make_next(&mut self, cx: &mut Cx<'_, '_>, hint: usize) -> Result<Value> {
		self.reset();
		self.create(cx, hint)
	}
}

/// Error for structured data sitting in a scalar slot.
pub(crate) fn structured(path: &ContextPath, expected: &str) -> FactoryError {
	FactoryError::ConversionFailure {
		path: path.clone(),
		expected: expected.to_owned(),
		found: "structured data".to_owned(),
	}
}

/// Error for a nested object the source has no data for.
pub(crate) fn missing(path: &ContextPath, expected: String) -> FactoryError {
	FactoryError::ConversionFailure {
		path: path.clone(),
		expected,
		found: "nothing".to_owned(),
	}
}
