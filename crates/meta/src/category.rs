//! Category tags and the typed-view capability trait.

use std::fmt;

use bitflags::bitflags;

use crate::MetaRef;

/// Closed set of metaobject kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
	Namespace,
	/// Intrinsic type: a builtin scalar or a sequence.
	Type,
	Class,
	Enum,
	Function,
	Constructor,
	Parameter,
	Variable,
}

impl Category {
	/// Capability tags every object of this category carries.
	pub const fn tags(self) -> CategorySet {
		match self {
			Self::Namespace => CategorySet::SCOPE.union(CategorySet::NAMESPACE),
			Self::Type => CategorySet::TYPE.union(CategorySet::INTRINSIC),
			Self::Class => CategorySet::SCOPE.union(CategorySet::TYPE).union(CategorySet::CLASS),
			Self::Enum => CategorySet::TYPE.union(CategorySet::ENUM),
			Self::Function => CategorySet::CALLABLE.union(CategorySet::FUNCTION),
			Self::Constructor => CategorySet::CALLABLE.union(CategorySet::CONSTRUCTOR),
			Self::Parameter => CategorySet::TYPED.union(CategorySet::PARAMETER),
			Self::Variable => CategorySet::TYPED.union(CategorySet::VARIABLE),
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Namespace => "namespace",
			Self::Type => "type",
			Self::Class => "class",
			Self::Enum => "enum",
			Self::Function => "function",
			Self::Constructor => "constructor",
			Self::Parameter => "parameter",
			Self::Variable => "variable",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

bitflags! {
	/// Capability tags of a metaobject.
	///
	/// [`Interface::TAGS`] names the tags a view requires; an object can be
	/// viewed through an interface iff its tags contain them.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct CategorySet: u32 {
		/// Has a non-empty name. Only the global namespace lacks one.
		const NAMED = 1 << 0;
		/// Has an enclosing scope.
		const SCOPED = 1 << 1;
		/// Owns members.
		const SCOPE = 1 << 2;
		const TYPE = 1 << 3;
		const INTRINSIC = 1 << 4;
		const NAMESPACE = 1 << 5;
		const CLASS = 1 << 6;
		const ENUM = 1 << 7;
		/// Has parameters and an invoker.
		const CALLABLE = 1 << 8;
		const FUNCTION = 1 << 9;
		const CONSTRUCTOR = 1 << 10;
		/// Has a declared type.
		const TYPED = 1 << 11;
		const PARAMETER = 1 << 12;
		const VARIABLE = 1 << 13;
	}
}

/// A typed view over a metaobject.
///
/// Views are thin `Copy` wrappers around [`MetaRef`]. Use
/// [`MetaRef::try_as`] to obtain one; there is no implicit conversion between
/// views.
pub trait Interface<'g>: Copy + Sized {
	/// Tags an object must carry to be viewed as `Self`.
	const TAGS: CategorySet;

	/// Human-readable interface name for diagnostics.
	const NAME: &'static str;

	/// Wraps `meta` without checking its tags.
	///
	/// Callers must have checked [`Interface::TAGS`] first.
	fn wrap(meta: MetaRef<'g>) -> Self;

	/// Returns the underlying metaobject.
	fn meta(self) -> MetaRef<'g>;
}

impl<'g> Interface<'g> for MetaRef<'g> {
	const TAGS: CategorySet = CategorySet::empty();
	const NAME: &'static str = "metaobject";

	#[inline]
	fn wrap(meta: MetaRef<'g>) -> Self {
		meta
	}

	#[inline]
	fn meta(self) -> MetaRef<'g> {
		self
	}
}
