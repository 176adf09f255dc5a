use crate::Category;

/// Failures raised while populating the metaobject graph or managing the
/// process-wide registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetaError {
	#[error("unknown metaobject id {0}")]
	UnknownId(u32),

	#[error("no declaration named {0:?}")]
	UnknownName(String),

	#[error("{name:?} is already declared in {scope:?}")]
	DuplicateName { scope: String, name: String },

	#[error("{name:?} is a {found}, expected {expected}")]
	CategoryMismatch {
		name: String,
		expected: &'static str,
		found: Category,
	},

	#[error("parameter {name:?} of {callable:?} must have a type, found {found}")]
	UntypedParameter {
		callable: String,
		name: String,
		found: Category,
	},

	#[error("enumeration {enumeration:?} has no value named {name:?}")]
	UnknownEnumValue { enumeration: String, name: String },

	#[error("{class:?} cannot derive from itself")]
	SelfDerivation { class: String },

	#[error("metadata registry is already initialized")]
	AlreadyInitialized,

	#[error("metadata registry is not initialized")]
	NotInitialized,
}
