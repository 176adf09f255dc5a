use std::fmt;

/// Weakly typed literal handed out by a data source.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
	Null,
	/// Unquoted text whose type is unknown, e.g. a database column or a bare word.
	Text(String),
	/// Text the source knows to be a string literal.
	Quoted(String),
	Int(i64),
	Float(f64),
	Bool(bool),
}

impl Field {
	pub fn is_null(&self) -> bool {
		matches!(self, Field::Null)
	}

	/// Text of a `Text` or `Quoted` field.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Field::Text(s) | Field::Quoted(s) => Some(s),
			_ => None,
		}
	}

	/// Short description for diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Field::Null => "null",
			Field::Text(_) => "text",
			Field::Quoted(_) => "quoted text",
			Field::Int(_) => "integer",
			Field::Float(_) => "float",
			Field::Bool(_) => "bool",
		}
	}
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Field::Null => f.write_str("null"),
			Field::Text(s) => f.write_str(s),
			Field::Quoted(s) => write!(f, "{s:?}"),
			Field::Int(v) => write!(f, "{v}"),
			Field::Float(v) => write!(f, "{v}"),
			Field::Bool(v) => write!(f, "{v}"),
		}
	}
}

impl From<&str> for Field {
	fn from(text: &str) -> Self {
		Field::Text(text.to_owned())
	}
}

impl From<i64> for Field {
	fn from(value: i64) -> Self {
		Field::Int(value)
	}
}

impl From<f64> for Field {
	fn from(value: f64) -> Self {
		Field::Float(value)
	}
}

impl From<bool> for Field {
	fn from(value: bool) -> Self {
		Field::Bool(value)
	}
}

/// Types a field can be read as through [`DataSource::get_as`](crate::DataSource::get_as).
pub trait FromField: Sized {
	fn from_field(field: &Field) -> Option<Self>;
}

impl FromField for i64 {
	fn from_field(field: &Field) -> Option<Self> {
		match field {
			Field::Int(v) => Some(*v),
			Field::Text(s) | Field::Quoted(s) => s.trim().parse().ok(),
			_ => None,
		}
	}
}

impl FromField for f64 {
	fn from_field(field: &Field) -> Option<Self> {
		match field {
			Field::Float(v) => Some(*v),
			Field::Int(v) => Some(*v as f64),
			Field::Text(s) | Field::Quoted(s) => s.trim().parse().ok(),
			_ => None,
		}
	}
}

impl FromField for bool {
	fn from_field(field: &Field) -> Option<Self> {
		match field {
			Field::Bool(v) => Some(*v),
			Field::Text(s) | Field::Quoted(s) => crate::convert::parse_bool(s),
			_ => None,
		}
	}
}

impl FromField for String {
	fn from_field(field: &Field) -> Option<Self> {
		match field {
			Field::Null => None,
			Field::Text(s) | Field::Quoted(s) => Some(s.clone()),
			other => Some(other.to_string()),
		}
	}
}

/// `None` reads as a null field, as an empty database cell does.
impl<T: Into<Field>> From<Option<T>> for Field {
	fn from(value: Option<T>) -> Self {
		value.map_or(Field::Null, Into::into)
	}
}
