//! The contract data sources satisfy to feed the factory.

use specula_meta::CallableMeta;

use crate::selector::ConfidenceSelector;
use crate::{ContextPath, FactoryConfig, FactoryError, Field, FromField, Result};

/// How well the data at one slot fits the slot's type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
	/// Match confidence in `[0, 1]`; zero means the slot cannot be filled.
	pub confidence: f64,
	/// Whether the source holds non-null data for the slot, as opposed to a
	/// default standing in for it.
	pub present: bool,
}

impl Fit {
	/// No data and no fallback.
	pub const MISSING: Fit = Fit {
		confidence: 0.0,
		present: false,
	};

	pub const fn present(confidence: f64) -> Self {
		Self { confidence, present: true }
	}

	pub const fn absent(confidence: f64) -> Self {
		Self {
			confidence,
			present: false,
		}
	}

	/// Combines the fits of a constructor's parameters.
	///
	/// The mean confidence, or zero as soon as one parameter cannot be
	/// filled. A constructor without parameters scores `nullary`.
	pub fn aggregate(fits: &[Fit], nullary: f64) -> Fit {
		if fits.is_empty() {
			return Fit::absent(nullary);
		}
		let present = fits.iter().any(|f| f.present);
		if fits.iter().any(|f| f.confidence <= 0.0) {
			return Fit { confidence: 0.0, present };
		}
		let mean = fits.iter().map(|f| f.confidence).sum::<f64>() / fits.len() as f64;
		Fit { confidence: mean, present }
	}
}

/// One constructor competing for selection, with the fits of its parameters.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
	/// Overload index within the class.
	pub index: usize,
	pub constructor: CallableMeta<'a>,
	pub path: &'a ContextPath,
	/// Parameter fits in declaration order.
	pub fits: &'a [Fit],
}

/// Chooses one constructor among the candidates of a polymorphic class.
///
/// The manager feeds every candidate through [`add_constructor`], in
/// iteration order, then calls [`finalize`] once and reads [`index`].
///
/// [`add_constructor`]: ConstructorSelector::add_constructor
/// [`finalize`]: ConstructorSelector::finalize
/// [`index`]: ConstructorSelector::index
pub trait ConstructorSelector {
	fn add_constructor(&mut self, candidate: &Candidate<'_>);

	fn finalize(&mut self) {}

	/// Overload index of the selected constructor, if any fits.
	fn index(&self) -> Option<usize>;
}

/// A weakly typed source of construction units.
///
/// A source exposes one *unit* at a time (a row, a script call, a document
/// node); [`advance`](DataSource::advance) moves to the next one. Inside a
/// unit, fields are addressed by index within the current scope. Scoped
/// sources enter nested objects and sequences through the sub-handler
/// protocol; flat sources keep the defaults and address nested parameters by
/// [`ContextPath::field_key`].
pub trait DataSource {
	/// Number of fields in the current scope.
	fn field_count(&self) -> usize;

	/// Field `index` of the current scope.
	///
	/// `None` when there is no such field or when it holds structured data
	/// (a nested object, call or sequence) rather than a scalar.
	fn field(&self, index: usize) -> Option<Field>;

	/// True when field `index` exists and is not null.
	fn is_present(&self, index: usize) -> bool {
		self.field(index).is_some_and(|f| !f.is_null())
	}

	/// Field `index` read as `T`.
	fn get_as<T: FromField>(&self, index: usize) -> Option<T>
	where
		Self: Sized,
	{
		self.field(index).and_then(|f| T::from_field(&f))
	}

	/// Locates the field for the slot at `path` in the current scope.
	///
	/// `position_hint` is the parameter position, or the element index for
	/// sequence elements.
	fn find_field(&self, path: &ContextPath, position_hint: usize) -> Option<usize>;

	/// Number of elements of the sequence at `path`, `None` when absent.
	///
	/// Sources without a notion of repeated literals keep the default, which
	/// reports [`FactoryError::UnimplementedFeature`].
	fn sequence_len(&mut self, path: &ContextPath, position_hint: usize) -> Result<Option<usize>> {
		let _ = position_hint;
		Err(FactoryError::UnimplementedFeature(format!("sequence field at {path}")))
	}

	/// Enters the nested object or sequence at `path`, making it the current
	/// scope. Returns false when there is nothing to enter.
	///
	/// Every successful call is paired with one [`skip_sub_handler`](DataSource::skip_sub_handler).
	fn add_sub_handler(&mut self, path: &ContextPath, position_hint: usize) -> bool {
		let _ = (path, position_hint);
		true
	}

	/// Leaves the scope entered by the matching [`add_sub_handler`](DataSource::add_sub_handler).
	fn skip_sub_handler(&mut self) {}

	/// Moves to the next unit. Returns false when the source is exhausted.
	fn advance(&mut self) -> bool;

	/// Selection policy for polymorphic classes.
	fn selector(&self, config: &FactoryConfig) -> Box<dyn ConstructorSelector> {
		Box::new(ConfidenceSelector::new(config))
	}
}
