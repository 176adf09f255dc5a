//! Tunables of constructor selection and leaf conversion.

use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;
use crate::enums::{CaseInsensitiveMatch, EnumMatcher, ExactMatch, FuzzyMatch};

/// How enumeration literals are compared with declared value names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumMatch {
	#[default]
	Exact,
	CaseInsensitive,
	/// Normalized Levenshtein similarity above `fuzzy-threshold`.
	Fuzzy,
}

/// Factory configuration, usually loaded from TOML:
///
/// ```toml
/// backward-iteration = true
/// enum-match = "fuzzy"
/// fuzzy-threshold = 0.75
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FactoryConfig {
	/// Visit later constructors first, so they win ties.
	pub backward_iteration: bool,
	/// Candidates scoring below this are never selected.
	pub min_confidence: f64,
	/// Confidence of a field that is present but null.
	pub null_confidence: f64,
	/// Confidence of an absent field whose parameter declares a default.
	pub default_confidence: f64,
	/// Confidence of a constructor without parameters.
	pub nullary_confidence: f64,
	/// Confidence of unquoted text taken as a string.
	pub text_as_string_confidence: f64,
	/// Confidence of a literal that names no enumeration value. Non-zero, so
	/// the slot falls back to the enumeration's default instead of
	/// disqualifying its constructor.
	pub unmatched_enum_confidence: f64,
	pub enum_match: EnumMatch,
	pub fuzzy_threshold: f64,
	/// Reject lossy conversions at creation time instead of accepting them.
	pub strict_conversion: bool,
}

impl Default for FactoryConfig {
	fn default() -> Self {
		Self {
			backward_iteration: false,
			min_confidence: 0.0,
			null_confidence: 0.5,
			default_confidence: 0.5,
			nullary_confidence: 0.1,
			text_as_string_confidence: 0.5,
			unmatched_enum_confidence: 0.1,
			enum_match: EnumMatch::Exact,
			fuzzy_threshold: 0.8,
			strict_conversion: false,
		}
	}
}

impl FactoryConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a TOML file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let config = Self::from_toml_str(&text)?;
		tracing::debug!(domain = "config", path = %path.display(), "factory config loaded");
		Ok(config)
	}

	/// Checks that every confidence lies in `[0, 1]`.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let bounded = [
			("min-confidence", self.min_confidence),
			("null-confidence", self.null_confidence),
			("default-confidence", self.default_confidence),
			("nullary-confidence", self.nullary_confidence),
			("text-as-string-confidence", self.text_as_string_confidence),
			("unmatched-enum-confidence", self.unmatched_enum_confidence),
			("fuzzy-threshold", self.fuzzy_threshold),
		];
		for (key, value) in bounded {
			if !(0.0..=1.0).contains(&value) {
				return Err(ConfigError::OutOfRange { key, value });
			}
		}
		Ok(())
	}

	/// Returns the enum matcher selected by `enum-match`.
	pub fn matcher(&self) -> Box<dyn EnumMatcher> {
		match self.enum_match {
			EnumMatch::Exact => Box::new(ExactMatch),
			EnumMatch::CaseInsensitive => Box::new(CaseInsensitiveMatch),
			EnumMatch::Fuzzy => Box::new(FuzzyMatch {
				threshold: self.fuzzy_threshold,
			}),
		}
	}
}
