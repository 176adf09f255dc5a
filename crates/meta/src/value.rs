//! Dynamic values flowing into and out of reflected callables.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Scalar types known to the metaobject graph without registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Builtin {
	Bool,
	I32,
	I64,
	U32,
	U64,
	F32,
	F64,
	Char,
	String,
}

impl Builtin {
	/// Every builtin, in registration order.
	pub const ALL: [Builtin; 9] = [
		Builtin::Bool,
		Builtin::I32,
		Builtin::I64,
		Builtin::U32,
		Builtin::U64,
		Builtin::F32,
		Builtin::F64,
		Builtin::Char,
		Builtin::String,
	];

	/// Returns the type name as written in Rust.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::I32 => "i32",
			Self::I64 => "i64",
			Self::U32 => "u32",
			Self::U64 => "u64",
			Self::F32 => "f32",
			Self::F64 => "f64",
			Self::Char => "char",
			Self::String => "String",
		}
	}

	/// True for the integral builtins.
	pub const fn is_integer(self) -> bool {
		matches!(self, Self::I32 | Self::I64 | Self::U32 | Self::U64)
	}

	/// True for the floating point builtins.
	pub const fn is_float(self) -> bool {
		matches!(self, Self::F32 | Self::F64)
	}

	/// Returns the value a null or absent field of this type becomes.
	pub fn default_value(self) -> Value {
		match self {
			Self::Bool => Value::Bool(false),
			Self::I32 => Value::I32(0),
			Self::I64 => Value::I64(0),
			Self::U32 => Value::U32(0),
			Self::U64 => Value::U64(0),
			Self::F32 => Value::F32(0.0),
			Self::F64 => Value::F64(0.0),
			Self::Char => Value::Char('\0'),
			Self::String => Value::Str(String::new()),
		}
	}

	pub(crate) const fn index(self) -> usize {
		self as usize
	}
}

impl fmt::Display for Builtin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Literal attached to metadata, such as a declared parameter default.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
	Bool(bool),
	Int(i64),
	Float(f64),
	Char(char),
	Str(String),
}

impl fmt::Display for Literal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(v) => write!(f, "{v}"),
			Self::Int(v) => write!(f, "{v}"),
			Self::Float(v) => write!(f, "{v}"),
			Self::Char(v) => write!(f, "{v:?}"),
			Self::Str(v) => write!(f, "{v:?}"),
		}
	}
}

/// A dynamically typed value.
pub enum Value {
	/// Result of callables without a result type.
	Unit,
	Bool(bool),
	I32(i32),
	I64(i64),
	U32(u32),
	U64(u64),
	F32(f32),
	F64(f64),
	Char(char),
	Str(String),
	/// Underlying integral value of an enumeration.
	Enum(i64),
	/// Homogeneous sequence.
	Seq(Vec<Value>),
	/// Instance of a reflected class.
	Object(Box<dyn Any + Send>),
}

impl Value {
	/// Boxes `value` as a class instance.
	pub fn object<T: Any + Send>(value: T) -> Self {
		Value::Object(Box::new(value))
	}

	/// Returns a short name of the variant for diagnostics.
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Unit => "unit",
			Value::Bool(_) => "bool",
			Value::I32(_) => "i32",
			Value::I64(_) => "i64",
			Value::U32(_) => "u32",
			Value::U64(_) => "u64",
			Value::F32(_) => "f32",
			Value::F64(_) => "f64",
			Value::Char(_) => "char",
			Value::Str(_) => "string",
			Value::Enum(_) => "enum",
			Value::Seq(_) => "sequence",
			Value::Object(_) => "object",
		}
	}

	/// Borrows the boxed instance if this is an object of type `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		match self {
			Value::Object(obj) => obj.downcast_ref::<T>(),
			_ => None,
		}
	}

	/// Unboxes an object of type `T`.
	pub fn into_object<T: Any>(self) -> Result<T, ValueError> {
		match self {
			Value::Object(obj) => match obj.downcast::<T>() {
				Ok(boxed) => Ok(*boxed),
				Err(_) => Err(ValueError::new(std::any::type_name::<T>(), "object of another type")),
			},
			other => Err(ValueError::new(std::any::type_name::<T>(), other.type_name())),
		}
	}

	/// Converts into `T`.
	pub fn into_typed<T: FromValue>(self) -> Result<T, ValueError> {
		T::from_value(self)
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Unit => f.write_str("Unit"),
			Value::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
			Value::I32(v) => f.debug_tuple("I32").field(v).finish(),
			Value::I64(v) => f.debug_tuple("I64").field(v).finish(),
			Value::U32(v) => f.debug_tuple("U32").field(v).finish(),
			Value::U64(v) => f.debug_tuple("U64").field(v).finish(),
			Value::F32(v) => f.debug_tuple("F32").field(v).finish(),
			Value::F64(v) => f.debug_tuple("F64").field(v).finish(),
			Value::Char(v) => f.debug_tuple("Char").field(v).finish(),
			Value::Str(v) => f.debug_tuple("Str").field(v).finish(),
			Value::Enum(v) => f.debug_tuple("Enum").field(v).finish(),
			Value::Seq(v) => f.debug_tuple("Seq").field(v).finish(),
			Value::Object(_) => f.write_str("Object(..)"),
		}
	}
}

/// Objects never compare equal; everything else compares structurally.
impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Unit, Value::Unit) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::I32(a), Value::I32(b)) => a == b,
			(Value::I64(a), Value::I64(b)) => a == b,
			(Value::U32(a), Value::U32(b)) => a == b,
			(Value::U64(a), Value::U64(b)) => a == b,
			(Value::F32(a), Value::F32(b)) => a == b,
			(Value::F64(a), Value::F64(b)) => a == b,
			(Value::Char(a), Value::Char(b)) => a == b,
			(Value::Str(a), Value::Str(b)) => a == b,
			(Value::Enum(a), Value::Enum(b)) => a == b,
			(Value::Seq(a), Value::Seq(b)) => a == b,
			_ => false,
		}
	}
}

/// A value did not have the shape a conversion expected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found {found}")]
pub struct ValueError {
	pub expected: &'static str,
	pub found: &'static str,
}

impl ValueError {
	pub fn new(expected: &'static str, found: &'static str) -> Self {
		Self { expected, found }
	}
}

/// Types that can be extracted from a [`Value`].
///
/// Class types implement this through [`impl_from_value!`](crate::impl_from_value).
pub trait FromValue: Sized {
	fn from_value(value: Value) -> Result<Self, ValueError>;
}

macro_rules! impl_scalar_from_value {
	($($ty:ty => $variant:ident),+ $(,)?) => {
		$(
			impl FromValue for $ty {
				fn from_value(value: Value) -> Result<Self, ValueError> {
					match value {
						Value::$variant(v) => Ok(v),
						other => Err(ValueError::new(stringify!($ty), other.type_name())),
					}
				}
			}
		)+
	};
}

impl_scalar_from_value! {
	bool => Bool,
	i32 => I32,
	u32 => U32,
	u64 => U64,
	f32 => F32,
	f64 => F64,
	char => Char,
	String => Str,
}

/// Enumerations hand out their underlying integral value, so `i64` accepts both.
impl FromValue for i64 {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::I64(v) | Value::Enum(v) => Ok(v),
			other => Err(ValueError::new("i64", other.type_name())),
		}
	}
}

impl FromValue for Value {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		Ok(value)
	}
}

impl<T: FromValue> FromValue for Vec<T> {
	fn from_value(value: Value) -> Result<Self, ValueError> {
		match value {
			Value::Seq(items) => items.into_iter().map(T::from_value).collect(),
			other => Err(ValueError::new("sequence", other.type_name())),
		}
	}
}

/// Implements [`FromValue`] for class types carried as [`Value::Object`].
#[macro_export]
macro_rules! impl_from_value {
	($($ty:ty),+ $(,)?) => {
		$(
			impl $crate::FromValue for $ty {
				fn from_value(value: $crate::Value) -> Result<Self, $crate::ValueError> {
					value.into_object::<$ty>()
				}
			}
		)+
	};
}

/// Failure raised while invoking a reflected callable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvokeError {
	#[error("missing argument #{index}")]
	MissingArgument { index: usize },

	#[error("argument #{index}: {source}")]
	Argument {
		index: usize,
		#[source]
		source: ValueError,
	},

	#[error("no invoker registered for {0}")]
	NotInvocable(String),

	#[error("{0}")]
	Failed(String),
}

/// Positional arguments handed to an [`Invoker`], consumed in order.
#[derive(Debug)]
pub struct Arguments {
	values: std::vec::IntoIter<Value>,
	next: usize,
}

impl Arguments {
	pub fn new(values: Vec<Value>) -> Self {
		Self {
			values: values.into_iter(),
			next: 0,
		}
	}

	/// Number of arguments not yet taken.
	pub fn remaining(&self) -> usize {
		self.values.len()
	}

	/// Takes the next argument as is.
	pub fn take_value(&mut self) -> Result<Value, InvokeError> {
		let index = self.next;
		let value = self.values.next().ok_or(InvokeError::MissingArgument { index })?;
		self.next += 1;
		Ok(value)
	}

	/// Takes the next argument, converting it to `T`.
	pub fn take<T: FromValue>(&mut self) -> Result<T, InvokeError> {
		let index = self.next;
		self.take_value()?
			.into_typed()
			.map_err(|source| InvokeError::Argument { index, source })
	}

	/// Takes the next argument as a boxed class instance of type `T`.
	pub fn take_object<T: Any>(&mut self) -> Result<T, InvokeError> {
		let index = self.next;
		self.take_value()?
			.into_object()
			.map_err(|source| InvokeError::Argument { index, source })
	}
}

/// Type-erased body of a constructor or function.
pub type Invoker = Arc<dyn Fn(&mut Arguments) -> Result<Value, InvokeError> + Send + Sync>;
