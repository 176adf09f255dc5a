use specula_meta::{EnumMeta, Literal};

use super::{Cx, Located, structured};
use crate::enums::best_match;
use crate::{ContextPath, Field, Fit, Result};

/// Leaf resolving a literal against the values of an enumeration.
#[derive(Debug)]
pub struct Enumerator<'g> {
	enumeration: EnumMeta<'g>,
	path: ContextPath,
	default: Option<Literal>,
}

impl<'g> Enumerator<'g> {
	pub(crate) fn new(enumeration: EnumMeta<'g>, path: ContextPath, default: Option<Literal>) -> Self {
		Self {
			enumeration,
			path,
			default,
		}
	}

	pub fn enumeration(&self) -> EnumMeta<'g> {
		self.enumeration
	}

	pub fn path(&self) -> &ContextPath {
		&self.path
	}

	/// The parameter's declared default if it names a value, else the
	/// enumeration's default.
	pub fn default_value(&self) -> i64 {
		let declared = match &self.default {
			Some(Literal::Str(name)) => self.enumeration.value_of(name),
			Some(Literal::Int(v)) => self.enumeration.name_of(*v).map(|_| *v),
			_ => None,
		};
		declared.unwrap_or_else(|| self.enumeration.default_value())
	}

	pub(crate) fn score(&self, cx: &mut Cx<'_, '_>, hint: usize) -> Fit {
		let unmatched = cx.config.unmatched_enum_confidence;
		match cx.locate(&self.path, hint) {
			Located::Absent if self.default.is_some() => Fit::absent(cx.config.default_confidence),
			Located::Absent => Fit::MISSING,
			Located::Null => Fit::absent(cx.config.null_confidence),
			Located::Scalar(Field::Int(v)) => Fit::present(if self.enumeration.name_of(v).is_some() { 1.0 } else { unmatched }),
			Located::Scalar(Field::Text(s) | Field::Quoted(s)) => {
				Fit::present(best_match(self.enumeration, cx.matcher, &s).map_or(unmatched, |(_, score)| score))
			}
			Located::Scalar(_) => Fit::present(unmatched),
			Located::Structured => Fit::present(0.0),
		}
	}

	/// Underlying value of the literal, or `None` when it matches nothing.
	///
	/// Null and absent fields resolve to [`Enumerator::default_value`].
	pub(crate) fn create(&self, cx: &mut Cx<'_, '_>, hint: usize) -> Result<Option<i64>> {
		Ok(match cx.locate(&self.path, hint) {
			Located::Absent | Located::Null => Some(self.default_value()),
			Located::Scalar(Field::Int(v)) => self.enumeration.name_of(v).map(|_| v),
			Located::Scalar(Field::Text(s) | Field::Quoted(s)) => {
				best_match(self.enumeration, cx.matcher, &s).map(|(value, _)| value)
			}
			Located::Scalar(_) => None,
			Located::Structured => return Err(structured(&self.path, &self.enumeration.full_name())),
		})
	}
}
