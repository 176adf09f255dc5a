//! Typed views over [`MetaRef`].
//!
//! Each view is obtained through [`MetaRef::try_as`] and exposes the
//! accessors meaningful for its category. Views dereference to the underlying
//! [`MetaRef`] for names, scope and tags.

use std::ops::Deref;

use specula_range::{Range, Transform, transform};

use crate::graph::{EnumValue, MetaRange, Payload};
use crate::{Arguments, Builtin, CategorySet, Interface, InvokeError, Literal, MetaRef, Value};

macro_rules! meta_view {
	($(#[$attr:meta])* $name:ident, $tags:expr, $label:literal) => {
		$(#[$attr])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq)]
		pub struct $name<'g>(MetaRef<'g>);

		impl<'g> Interface<'g> for $name<'g> {
			const TAGS: CategorySet = $tags;
			const NAME: &'static str = $label;

			#[inline]
			fn wrap(meta: MetaRef<'g>) -> Self {
				Self(meta)
			}

			#[inline]
			fn meta(self) -> MetaRef<'g> {
				self.0
			}
		}

		impl<'g> Deref for $name<'g> {
			type Target = MetaRef<'g>;

			#[inline]
			fn deref(&self) -> &MetaRef<'g> {
				&self.0
			}
		}
	};
}

meta_view!(
	/// A namespace.
	NamespaceMeta, CategorySet::NAMESPACE, "namespace"
);
meta_view!(
	/// Anything owning members: namespaces and classes.
	ScopeMeta, CategorySet::SCOPE, "scope"
);
meta_view!(
	/// Any type: builtin scalars, sequences, classes and enumerations.
	TypeMeta, CategorySet::TYPE, "type"
);
meta_view!(
	/// A class with constructors.
	ClassMeta, CategorySet::CLASS, "class"
);
meta_view!(
	/// An enumeration with named integral values.
	EnumMeta, CategorySet::ENUM, "enum"
);
meta_view!(
	/// A function or constructor.
	CallableMeta, CategorySet::CALLABLE, "callable"
);
meta_view!(
	/// A parameter of a callable.
	ParameterMeta, CategorySet::PARAMETER, "parameter"
);
meta_view!(
	/// A variable declared in a scope.
	VariableMeta, CategorySet::VARIABLE, "variable"
);

impl<'g> ScopeMeta<'g> {
	/// Members of this scope that are themselves scopes.
	pub fn nested_scopes(self) -> crate::ExtractAs<'g, MetaRange<'g>, ScopeMeta<'g>> {
		crate::extract_as(self.members())
	}
}

/// What an intrinsic or user type is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind<'g> {
	Builtin(Builtin),
	Sequence(TypeMeta<'g>),
	Class(ClassMeta<'g>),
	Enum(EnumMeta<'g>),
}

impl<'g> TypeMeta<'g> {
	pub fn kind(self) -> TypeKind<'g> {
		match self.payload() {
			Payload::Builtin(builtin) => TypeKind::Builtin(*builtin),
			Payload::Sequence { element } => TypeKind::Sequence(TypeMeta(self.at(*element))),
			Payload::Enum { .. } => TypeKind::Enum(EnumMeta(self.0)),
			_ => TypeKind::Class(ClassMeta(self.0)),
		}
	}

	/// The builtin scalar this type is, if any.
	pub fn as_builtin(self) -> Option<Builtin> {
		match self.payload() {
			Payload::Builtin(builtin) => Some(*builtin),
			_ => None,
		}
	}

	/// Element type, if this is a sequence.
	pub fn element(self) -> Option<TypeMeta<'g>> {
		match self.payload() {
			Payload::Sequence { element } => Some(TypeMeta(self.at(*element))),
			_ => None,
		}
	}
}

impl<'g> ClassMeta<'g> {
	fn parts(self) -> (&'g [crate::MetaId], &'g [crate::MetaId]) {
		match self.payload() {
			Payload::Class {
				constructors, bases, ..
			} => (constructors, bases),
			_ => (&[], &[]),
		}
	}

	/// Declared constructors, in registration order.
	pub fn constructors(self) -> Transform<MetaRange<'g>, fn(MetaRef<'g>) -> CallableMeta<'g>> {
		let (constructors, _) = self.parts();
		transform(
			MetaRange::new(self.graph(), constructors),
			CallableMeta::wrap as fn(MetaRef<'g>) -> CallableMeta<'g>,
		)
	}

	pub fn constructor_count(self) -> usize {
		self.parts().0.len()
	}

	/// True when more than one constructor competes for selection.
	pub fn is_polymorphic(self) -> bool {
		self.constructor_count() > 1
	}

	/// Direct base classes.
	pub fn bases(self) -> Transform<MetaRange<'g>, fn(MetaRef<'g>) -> ClassMeta<'g>> {
		let (_, bases) = self.parts();
		transform(MetaRange::new(self.graph(), bases), ClassMeta::wrap as fn(MetaRef<'g>) -> ClassMeta<'g>)
	}

	/// True when `base` is this class or one of its transitive bases.
	pub fn is_derived_from(self, base: ClassMeta<'g>) -> bool {
		if self == base {
			return true;
		}
		let mut bases = self.bases();
		while !bases.is_empty() {
			if bases.front().is_derived_from(base) {
				return true;
			}
			bases.step_front();
		}
		false
	}

	/// Variables declared directly in this class.
	pub fn variables(self) -> crate::ExtractAs<'g, MetaRange<'g>, VariableMeta<'g>> {
		crate::extract_as(self.members())
	}
}

impl<'g> EnumMeta<'g> {
	fn parts(self) -> (&'g [EnumValue], usize) {
		match self.payload() {
			Payload::Enum { values, default } => (values, *default),
			_ => (&[], 0),
		}
	}

	/// Declared values, in declaration order.
	pub fn values(self) -> &'g [EnumValue] {
		self.parts().0
	}

	/// Looks up a value by its exact declared name.
	pub fn value_of(self, name: &str) -> Option<i64> {
		self.values().iter().find(|v| v.name == name).map(|v| v.value)
	}

	/// Returns the declared name of `value`.
	pub fn name_of(self, value: i64) -> Option<&'g str> {
		self.values().iter().find(|v| v.value == value).map(|v| v.name.as_str())
	}

	/// Value substituted when a literal matches none of the declared names.
	pub fn default_value(self) -> i64 {
		let (values, default) = self.parts();
		values.get(default).map_or(0, |v| v.value)
	}
}

impl<'g> CallableMeta<'g> {
	pub fn is_constructor(self) -> bool {
		self.tags().contains(CategorySet::CONSTRUCTOR)
	}

	/// Number of declared parameters.
	pub fn arity(self) -> usize {
		match self.payload() {
			Payload::Callable(sig) => sig.params.len(),
			_ => 0,
		}
	}

	/// Class a constructor belongs to.
	pub fn owner(self) -> Option<ClassMeta<'g>> {
		if !self.is_constructor() {
			return None;
		}
		self.scope().and_then(MetaRef::try_as)
	}

	/// Calls the registered invoker with `args`.
	pub fn invoke(self, mut args: Arguments) -> Result<Value, InvokeError> {
		match self.payload() {
			Payload::Callable(sig) => match &sig.invoker {
				Some(invoker) => invoker(&mut args),
				None => Err(InvokeError::NotInvocable(self.full_name())),
			},
			_ => Err(InvokeError::NotInvocable(self.full_name())),
		}
	}
}

impl<'g> ParameterMeta<'g> {
	/// Declared type.
	pub fn ty(self) -> TypeMeta<'g> {
		match self.payload() {
			Payload::Parameter { ty, .. } => TypeMeta(self.at(*ty)),
			_ => unreachable!("ParameterMeta over a non-parameter"),
		}
	}

	/// Zero-based position in the parameter list.
	pub fn position(self) -> usize {
		match self.payload() {
			Payload::Parameter { position, .. } => *position,
			_ => 0,
		}
	}

	/// Declared default literal.
	pub fn default_literal(self) -> Option<&'g Literal> {
		match self.payload() {
			Payload::Parameter { default, .. } => default.as_ref(),
			_ => None,
		}
	}

	/// The callable declaring this parameter.
	pub fn callable(self) -> Option<CallableMeta<'g>> {
		self.scope().and_then(MetaRef::try_as)
	}
}

impl<'g> VariableMeta<'g> {
	pub fn ty(self) -> TypeMeta<'g> {
		match self.payload() {
			Payload::Variable { ty } => TypeMeta(self.at(*ty)),
			_ => unreachable!("VariableMeta over a non-variable"),
		}
	}
}
