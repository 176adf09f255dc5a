//! Matching of literals against enumeration value names.

use specula_meta::EnumMeta;

/// Compares a literal with one declared value name.
pub trait EnumMatcher: Send + Sync {
	/// Confidence in `[0, 1]` that `literal` names `declared`.
	fn confidence(&self, declared: &str, literal: &str) -> f64;
}

/// Accepts only the exact declared name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl EnumMatcher for ExactMatch {
	fn confidence(&self, declared: &str, literal: &str) -> f64 {
		if declared == literal { 1.0 } else { 0.0 }
	}
}

/// Accepts the declared name in any ASCII case, preferring the exact spelling.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitiveMatch;

impl EnumMatcher for CaseInsensitiveMatch {
	fn confidence(&self, declared: &str, literal: &str) -> f64 {
		if declared == literal {
			1.0
		} else if declared.eq_ignore_ascii_case(literal) {
			0.9
		} else {
			0.0
		}
	}
}

/// Accepts names whose normalized Levenshtein similarity reaches `threshold`.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatch {
	pub threshold: f64,
}

impl EnumMatcher for FuzzyMatch {
	fn confidence(&self, declared: &str, literal: &str) -> f64 {
		if declared == literal {
			return 1.0;
		}
		let similarity = strsim::normalized_levenshtein(&declared.to_lowercase(), &literal.to_lowercase());
		if similarity >= self.threshold { similarity * 0.9 } else { 0.0 }
	}
}

/// Strips a `Type::` qualification, so `Color::Red` matches `Red`.
fn unqualified(literal: &str) -> &str {
	literal.rsplit_once("::").map_or(literal, |(_, name)| name).trim()
}

/// Best match of `literal` among the values of `enumeration`.
///
/// Returns the matched value and its confidence. Ties go to the value
/// declared first. Integer literals match declared values numerically.
pub fn best_match(enumeration: EnumMeta<'_>, matcher: &dyn EnumMatcher, literal: &str) -> Option<(i64, f64)> {
	let literal = unqualified(literal);
	if let Ok(number) = literal.parse::<i64>() {
		return enumeration.name_of(number).map(|_| (number, 1.0));
	}
	let mut best: Option<(i64, f64)> = None;
	for value in enumeration.values() {
		let score = matcher.confidence(&value.name, literal);
		if score > 0.0 && best.is_none_or(|(_, top)| score > top) {
			best = Some((value.value, score));
		}
	}
	best
}
