//! Leaf conversion of weakly typed fields into builtin scalars.
//!
//! [`confidence`] estimates how well a field fits a builtin without building
//! anything; [`convert`] performs the conversion. Both agree: a field scoring
//! zero never converts, and in strict mode only fields scoring one convert.

use specula_meta::{Builtin, Literal, Value};

use crate::{Field, FactoryConfig};

const EXACT: f64 = 1.0;
const NUMERIC_WIDENING: f64 = 0.9;
const INTEGRAL_FLOAT: f64 = 0.75;
const UNQUOTED_CHAR: f64 = 0.75;
const QUOTED_NUMBER: f64 = 0.5;
const LOOSE_BOOL: f64 = 0.5;
const FORMATTED: f64 = 0.25;

/// Parses a boolean the way configuration files spell them.
pub fn parse_bool(text: &str) -> Option<bool> {
	match text.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Some(true),
		"false" | "0" | "no" | "off" => Some(false),
		_ => None,
	}
}

fn is_strict_bool(text: &str) -> bool {
	let text = text.trim();
	text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("false")
}

fn parse_int(text: &str) -> Option<i64> {
	text.trim().parse().ok()
}

fn parse_float(text: &str) -> Option<f64> {
	text.trim().parse().ok()
}

fn single_char(text: &str) -> Option<char> {
	let mut chars = text.chars();
	match (chars.next(), chars.next()) {
		(Some(c), None) => Some(c),
		_ => None,
	}
}

/// Narrows `value` into the integral builtin `ty`.
fn narrow(ty: Builtin, value: i64) -> Option<Value> {
	match ty {
		Builtin::I32 => i32::try_from(value).ok().map(Value::I32),
		Builtin::I64 => Some(Value::I64(value)),
		Builtin::U32 => u32::try_from(value).ok().map(Value::U32),
		Builtin::U64 => u64::try_from(value).ok().map(Value::U64),
		_ => None,
	}
}

fn integral(value: f64) -> Option<i64> {
	(value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64).then_some(value as i64)
}

fn float_value(ty: Builtin, value: f64) -> Option<Value> {
	match ty {
		Builtin::F64 => Some(Value::F64(value)),
		Builtin::F32 if !value.is_finite() || value.abs() <= f32::MAX as f64 => Some(Value::F32(value as f32)),
		_ => None,
	}
}

/// Confidence in `[0, 1]` that `field` denotes a value of `ty`.
///
/// Null fields are the caller's concern and score zero here.
pub fn confidence(ty: Builtin, field: &Field, config: &FactoryConfig) -> f64 {
	match ty {
		Builtin::Bool => match field {
			Field::Bool(_) => EXACT,
			Field::Text(s) if is_strict_bool(s) => EXACT,
			Field::Text(s) | Field::Quoted(s) if parse_bool(s).is_some() => LOOSE_BOOL,
			Field::Int(0 | 1) => LOOSE_BOOL,
			_ => 0.0,
		},
		ty if ty.is_integer() => match field {
			Field::Int(v) => score_if(narrow(ty, *v).is_some(), EXACT),
			Field::Text(s) => score_if(parse_int(s).and_then(|v| narrow(ty, v)).is_some(), EXACT),
			Field::Quoted(s) => score_if(parse_int(s).and_then(|v| narrow(ty, v)).is_some(), QUOTED_NUMBER),
			Field::Float(v) => score_if(integral(*v).and_then(|v| narrow(ty, v)).is_some(), INTEGRAL_FLOAT),
			_ => 0.0,
		},
		ty if ty.is_float() => match field {
			Field::Float(v) => score_if(float_value(ty, *v).is_some(), EXACT),
			Field::Int(_) => NUMERIC_WIDENING,
			Field::Text(s) => match (parse_int(s), parse_float(s)) {
				(Some(_), _) => NUMERIC_WIDENING,
				(None, Some(v)) => score_if(float_value(ty, v).is_some(), EXACT),
				(None, None) => 0.0,
			},
			Field::Quoted(s) => score_if(parse_float(s).is_some(), QUOTED_NUMBER),
			_ => 0.0,
		},
		Builtin::Char => match field {
			Field::Quoted(s) => score_if(single_char(s).is_some(), EXACT),
			Field::Text(s) => score_if(single_char(s).is_some(), UNQUOTED_CHAR),
			_ => 0.0,
		},
		Builtin::String => match field {
			Field::Quoted(_) => EXACT,
			Field::Text(_) => config.text_as_string_confidence,
			Field::Int(_) | Field::Float(_) | Field::Bool(_) => FORMATTED,
			Field::Null => 0.0,
		},
		_ => 0.0,
	}
}

#[inline]
fn score_if(fits: bool, score: f64) -> f64 {
	if fits { score } else { 0.0 }
}

/// Converts `field` into a value of `ty`.
///
/// Fails when the literal cannot be consumed completely, and, with
/// `strict-conversion`, when the conversion would be lossy.
pub fn convert(ty: Builtin, field: &Field, config: &FactoryConfig) -> Option<Value> {
	if config.strict_conversion && confidence(ty, field, config) < EXACT {
		return None;
	}
	match ty {
		Builtin::Bool => match field {
			Field::Bool(v) => Some(Value::Bool(*v)),
			Field::Int(0) => Some(Value::Bool(false)),
			Field::Int(1) => Some(Value::Bool(true)),
			Field::Text(s) | Field::Quoted(s) => parse_bool(s).map(Value::Bool),
			_ => None,
		},
		ty if ty.is_integer() => match field {
			Field::Int(v) => narrow(ty, *v),
			Field::Text(s) | Field::Quoted(s) => parse_int(s).and_then(|v| narrow(ty, v)),
			Field::Float(v) => integral(*v).and_then(|v| narrow(ty, v)),
			_ => None,
		},
		ty if ty.is_float() => match field {
			Field::Float(v) => float_value(ty, *v),
			Field::Int(v) => float_value(ty, *v as f64),
			Field::Text(s) | Field::Quoted(s) => parse_float(s).and_then(|v| float_value(ty, v)),
			_ => None,
		},
		Builtin::Char => field.as_text().and_then(single_char).map(Value::Char),
		Builtin::String => match field {
			Field::Null => None,
			Field::Text(s) | Field::Quoted(s) => Some(Value::Str(s.clone())),
			other => Some(Value::Str(other.to_string())),
		},
		_ => None,
	}
}

/// Converts a declared default literal into a value of `ty`.
pub fn literal_value(ty: Builtin, literal: &Literal) -> Option<Value> {
	match (ty, literal) {
		(Builtin::Bool, Literal::Bool(v)) => Some(Value::Bool(*v)),
		(ty, Literal::Int(v)) if ty.is_integer() => narrow(ty, *v),
		(ty, Literal::Int(v)) if ty.is_float() => float_value(ty, *v as f64),
		(ty, Literal::Float(v)) if ty.is_float() => float_value(ty, *v),
		(Builtin::Char, Literal::Char(c)) => Some(Value::Char(*c)),
		(Builtin::String, Literal::Str(s)) => Some(Value::Str(s.clone())),
		_ => None,
	}
}
