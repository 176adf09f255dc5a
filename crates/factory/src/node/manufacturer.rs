use specula_meta::{Builtin, Literal, Value};

use super::{Cx, Located, structured};
use crate::{ContextPath, FactoryError, Fit, Result, convert};

/// Leaf converting one field into a builtin scalar.
#[derive(Debug)]
pub struct Manufacturer {
	ty: Builtin,
	path: ContextPath,
	default: Option<Literal>,
}

impl Manufacturer {
	pub(crate) fn new(ty: Builtin, path: ContextPath, default: Option<Literal>) -> Self {
		Self { ty, path, default }
	}

	pub fn ty(&self) -> Builtin {
		self.ty
	}

	pub fn path(&self) -> &ContextPath {
		&self.path
	}

	pub(crate) fn score(&self, cx: &mut Cx<'_, '_>, hint: usize) -> Fit {
		match cx.locate(&self.path, hint) {
			Located::Absent if self.default.is_some() => Fit::absent(cx.config.default_confidence),
			Located::Absent => Fit::MISSING,
			Located::Null => Fit::absent(cx.config.null_confidence),
			Located::Scalar(field) => Fit::present(convert::confidence(self.ty, &field, cx.config)),
			Located::Structured => Fit::present(0.0),
		}
	}

	pub(crate) fn create(&self, cx: &mut Cx<'_, '_>, hint: usize) -> Result<Value> {
		let field = match cx.locate(&self.path, hint) {
			Located::Absent | Located::Null => return Ok(self.fallback()),
			Located::Structured => return Err(structured(&self.path, self.ty.name())),
			Located::Scalar(field) => field,
		};
		convert::convert(self.ty, &field, cx.config).ok_or_else(|| FactoryError::ConversionFailure {
			path: self.path.clone(),
			expected: self.ty.name().to_owned(),
			found: format!("{} `{field}`", field.kind()),
		})
	}

	/// Value of a null or absent field: the declared default, else the
	/// type's default.
	fn fallback(&self) -> Value {
		tracing::trace!(domain = "factory", path = %self.path, "null field");
		let Some(literal) = &self.default else {
			return self.ty.default_value();
		};
		convert::literal_value(self.ty, literal).unwrap_or_else(|| {
			tracing::warn!(
				domain = "factory",
				path = %self.path,
				literal = %literal,
				ty = self.ty.name(),
				"declared default does not fit its type, falling back to type default"
			);
			self.ty.default_value()
		})
	}
}
