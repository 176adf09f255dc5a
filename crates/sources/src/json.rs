//! JSON documents read through `serde_json`.

use serde_json::Value as Json;
use specula_factory::{ContextPath, DataSource, Field};

/// JSON documents, one unit each.
///
/// Objects bind their members to parameters by name; arrays fill sequence
/// parameters. Strings are quoted fields, so they never score as unquoted
/// text would.
#[derive(Debug, Clone, Default)]
pub struct JsonSource {
	units: Vec<Json>,
	cursor: Option<usize>,
	scopes: Vec<usize>,
}

impl JsonSource {
	/// Parses `text`. A top-level array holds one unit per element; any
	/// other document is a single unit.
	pub fn parse(text: &str) -> serde_json::Result<Self> {
		let units = match serde_json::from_str(text)? {
			Json::Array(units) => units,
			unit => vec![unit],
		};
		tracing::debug!(domain = "sources", units = units.len(), "json parsed");
		Ok(Self::from_units(units))
	}

	pub fn from_units(units: Vec<Json>) -> Self {
		Self {
			units,
			cursor: None,
			scopes: Vec::new(),
		}
	}

	/// Number of nested scopes currently entered.
	pub fn depth(&self) -> usize {
		self.scopes.len()
	}

	fn scope(&self) -> Option<&Json> {
		let mut node = self.units.get(self.cursor?)?;
		for &index in &self.scopes {
			node = child(node, index)?;
		}
		Some(node)
	}
}

fn child(node: &Json, index: usize) -> Option<&Json> {
	match node {
		Json::Object(members) => members.values().nth(index),
		Json::Array(items) => items.get(index),
		_ => None,
	}
}

fn scalar(node: &Json) -> Option<Field> {
	Some(match node {
		Json::Null => Field::Null,
		Json::Bool(v) => Field::Bool(*v),
		Json::Number(n) => match n.as_i64() {
			Some(v) => Field::Int(v),
			None => Field::Float(n.as_f64()?),
		},
		Json::String(s) => Field::Quoted(s.clone()),
		Json::Array(_) | Json::Object(_) => return None,
	})
}

impl DataSource for JsonSource {
	fn field_count(&self) -> usize {
		match self.scope() {
			Some(Json::Object(members)) => members.len(),
			Some(Json::Array(items)) => items.len(),
			_ => 0,
		}
	}

	fn field(&self, index: usize) -> Option<Field> {
		scalar(child(self.scope()?, index)?)
	}

	fn find_field(&self, path: &ContextPath, position_hint: usize) -> Option<usize> {
		match (self.scope()?, path.param_name()) {
			(Json::Object(members), Some(name)) => members.keys().position(|key| key == name),
			(Json::Array(items), _) => (position_hint < items.len()).then_some(position_hint),
			_ => None,
		}
	}

	fn sequence_len(&mut self, path: &ContextPath, position_hint: usize) -> specula_factory::Result<Option<usize>> {
		let node = self
			.find_field(path, position_hint)
			.and_then(|index| child(self.scope()?, index));
		Ok(match node {
			Some(Json::Array(items)) => Some(items.len()),
			_ => None,
		})
	}

	fn add_sub_handler(&mut self, path: &ContextPath, position_hint: usize) -> bool {
		let Some(index) = self.find_field(path, position_hint) else {
			return false;
		};
		match self.scope().and_then(|scope| child(scope, index)) {
			Some(Json::Object(_) | Json::Array(_)) => {
				self.scopes.push(index);
				true
			}
			_ => false,
		}
	}

	fn skip_sub_handler(&mut self) {
		self.scopes.pop();
	}

	fn advance(&mut self) -> bool {
		self.scopes.clear();
		let next = self.cursor.map_or(0, |cursor| cursor + 1);
		self.cursor = Some(next.min(self.units.len()));
		next < self.units.len()
	}
}
