//! Build-tree construction from class metadata.

use specula_meta::{ClassMeta, Literal, MetaId, TypeKind, TypeMeta};
use specula_range::RangeExt;

use crate::node::{Arrayer, Composite, Enumerator, FactoryNode, Manager, Manufacturer, Slot, Suppliers};
use crate::path::Segment;
use crate::{ContextPath, FactoryError, Result};

/// Walks class metadata top-down, tracking the classes under construction
/// on the current path.
#[derive(Default)]
pub(crate) struct TreeBuilder {
	building: Vec<MetaId>,
}

impl TreeBuilder {
	/// Build tree for `class` as the root product. The root fills the
	/// source's unit itself, so it never enters a nested scope.
	pub(crate) fn root<'g>(class: ClassMeta<'g>) -> Result<FactoryNode<'g>> {
		let mut builder = Self::default();
		builder.building.push(class.id());
		let node = builder.class(class, ContextPath::root(), false);
		builder.building.pop();
		node
	}

	fn slot<'g>(&mut self, ty: TypeMeta<'g>, path: ContextPath, default: Option<Literal>) -> Result<FactoryNode<'g>> {
		Ok(match ty.kind() {
			TypeKind::Builtin(builtin) => FactoryNode::Manufacturer(Manufacturer::new(builtin, path, default)),
			TypeKind::Enum(enumeration) => FactoryNode::Enumerator(Enumerator::new(enumeration, path, default)),
			TypeKind::Sequence(element) => {
				let element = self.slot(element, path.child(Segment::Element), None)?;
				FactoryNode::Arrayer(Arrayer::new(path, element))
			}
			TypeKind::Class(class) if self.building.contains(&class.id()) => {
				tracing::trace!(domain = "factory", class = %class.full_name(), path = %path, "recursive class, using suppliers");
				FactoryNode::Suppliers(Suppliers::new(class.full_name(), path))
			}
			TypeKind::Class(class) => {
				self.building.push(class.id());
				let node = self.class(class, path, true);
				self.building.pop();
				node?
			}
		})
	}

	fn class<'g>(&mut self, class: ClassMeta<'g>, path: ContextPath, scoped: bool) -> Result<FactoryNode<'g>> {
		let constructors = class.constructors().collect_vec();
		if constructors.is_empty() {
			return Err(FactoryError::NotConstructible {
				class: class.full_name(),
			});
		}
		let polymorphic = constructors.len() > 1;
		let mut composites = Vec::with_capacity(constructors.len());
		for (index, constructor) in constructors.into_iter().enumerate() {
			let ctor_path = path.child(Segment::Constructor {
				class: class.local_name().into_boxed_str(),
				index,
			});
			let mut slots = Vec::with_capacity(constructor.arity());
			for param in constructor.parameters().into_iter_range() {
				let param_path = ctor_path.child(Segment::Param(param.base_name().into()));
				let node = self.slot(param.ty(), param_path, param.default_literal().cloned())?;
				slots.push(Slot {
					position: param.position(),
					node,
				});
			}
			composites.push(Composite::new(
				class,
				constructor,
				index,
				path.clone(),
				ctor_path,
				scoped && !polymorphic,
				slots,
			));
		}

		if polymorphic {
			return Ok(FactoryNode::Manager(Manager::new(class, path, scoped, composites)));
		}
		composites
			.pop()
			.map(FactoryNode::Composite)
			.ok_or_else(|| FactoryError::NotConstructible { class: class.full_name() })
	}
}
