//! Built-in constructor selection policies.

use crate::source::{Candidate, ConstructorSelector, Fit};
use crate::FactoryConfig;

/// Picks the candidate with the highest mean parameter confidence.
///
/// A candidate with any unfillable parameter is disqualified, as is one
/// scoring below `min-confidence`. Ties go to the candidate visited first.
#[derive(Debug, Clone)]
pub struct ConfidenceSelector {
	min_confidence: f64,
	nullary_confidence: f64,
	best: Option<(usize, f64)>,
}

impl ConfidenceSelector {
	pub fn new(config: &FactoryConfig) -> Self {
		Self {
			min_confidence: config.min_confidence,
			nullary_confidence: config.nullary_confidence,
			best: None,
		}
	}

	/// Confidence of the current best candidate.
	pub fn best_confidence(&self) -> Option<f64> {
		self.best.map(|(_, score)| score)
	}
}

impl ConstructorSelector for ConfidenceSelector {
	fn add_constructor(&mut self, candidate: &Candidate<'_>) {
		let score = Fit::aggregate(candidate.fits, self.nullary_confidence).confidence;
		if score <= 0.0 || score < self.min_confidence {
			return;
		}
		if self.best.is_none_or(|(_, top)| score > top) {
			self.best = Some((candidate.index, score));
		}
	}

	fn index(&self) -> Option<usize> {
		self.best.map(|(index, _)| index)
	}
}

/// Row-style selection: every parameter must be fillable, and the candidate
/// binding the most fields actually present in the unit wins.
#[derive(Debug, Clone, Default)]
pub struct FieldCoverageSelector {
	best: Option<(usize, usize)>,
}

impl FieldCoverageSelector {
	pub fn new() -> Self {
		Self::default()
	}
}

impl ConstructorSelector for FieldCoverageSelector {
	fn add_constructor(&mut self, candidate: &Candidate<'_>) {
		if candidate.fits.iter().any(|f| f.confidence <= 0.0) {
			return;
		}
		let bound = candidate.fits.iter().filter(|f| f.present).count();
		if self.best.is_none_or(|(_, top)| bound > top) {
			self.best = Some((candidate.index, bound));
		}
	}

	fn index(&self) -> Option<usize> {
		self.best.map(|(index, _)| index)
	}
}
