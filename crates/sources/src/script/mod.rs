//! Call scripts: constructor-call expressions read as construction units.
//!
//! A script such as `Team("core", [Person("Ann", 30)])` names classes and
//! spells their arguments the way source code would. Each top-level
//! expression is one unit. Nested calls and lists are entered as scopes;
//! inside a call, an argument named after a parameter binds to it and
//! unnamed arguments bind by position. A call only binds parameters of the
//! class it names, so `Team(..)` never fills a `Person`.

mod parse;

pub use parse::{Arg, Expr, parse};
use specula_factory::{ContextPath, DataSource, Field, Segment};

use crate::Result;

/// Units parsed from a call script.
#[derive(Debug, Clone, Default)]
pub struct ScriptSource {
	units: Vec<Expr>,
	cursor: Option<usize>,
	scopes: Vec<usize>,
}

impl ScriptSource {
	/// Parses `text`; the source starts before its first unit.
	pub fn parse(text: &str) -> Result<Self> {
		let units = parse(text)?;
		tracing::debug!(domain = "sources", units = units.len(), "script parsed");
		Ok(Self::from_units(units))
	}

	pub fn from_units(units: Vec<Expr>) -> Self {
		Self {
			units,
			cursor: None,
			scopes: Vec::new(),
		}
	}

	pub fn units(&self) -> &[Expr] {
		&self.units
	}

	/// Current unit, `None` before the first `advance` and once exhausted.
	pub fn unit(&self) -> Option<&Expr> {
		self.units.get(self.cursor?)
	}

	/// Number of nested scopes currently entered.
	pub fn depth(&self) -> usize {
		self.scopes.len()
	}

	fn scope(&self) -> Option<&Expr> {
		let mut expr = self.unit()?;
		for &index in &self.scopes {
			expr = expr.child(index)?;
		}
		Some(expr)
	}
}

/// Class whose constructor declares the parameter at `path`.
fn owning_class(path: &ContextPath) -> Option<&str> {
	match path.segments() {
		[.., Segment::Constructor { class, .. }, Segment::Param(_)] => Some(class.as_ref()),
		_ => None,
	}
}

/// True when `callee`, qualified or not, names `class`.
fn names_class(callee: &str, class: &str) -> bool {
	callee
		.strip_suffix(class)
		.is_some_and(|scope| scope.is_empty() || scope.ends_with("::"))
}

impl DataSource for ScriptSource {
	fn field_count(&self) -> usize {
		self.scope().map_or(0, Expr::child_count)
	}

	fn field(&self, index: usize) -> Option<Field> {
		match self.scope()?.child(index)? {
			Expr::Literal(field) => Some(field.clone()),
			Expr::Call { .. } | Expr::List(_) => None,
		}
	}

	fn find_field(&self, path: &ContextPath, position_hint: usize) -> Option<usize> {
		match self.scope()? {
			Expr::Call { callee, args } => {
				if let Some(class) = owning_class(path)
					&& !names_class(callee, class)
				{
					tracing::trace!(domain = "sources", path = %path, callee = %callee, "call names another class");
					return None;
				}
				if let Some(name) = path.param_name()
					&& let Some(index) = args.iter().position(|arg| arg.name.as_deref() == Some(name))
				{
					return Some(index);
				}
				args.get(position_hint)
					.filter(|arg| arg.name.is_none())
					.map(|_| position_hint)
			}
			Expr::List(items) => (position_hint < items.len()).then_some(position_hint),
			Expr::Literal(_) => None,
		}
	}

	fn sequence_len(&mut self, path: &ContextPath, position_hint: usize) -> specula_factory::Result<Option<usize>> {
		let index = self.find_field(path, position_hint);
		let scope = self.scope();
		Ok(match index.and_then(|index| scope?.child(index)) {
			Some(Expr::List(items)) => Some(items.len()),
			_ => None,
		})
	}

	fn add_sub_handler(&mut self, path: &ContextPath, position_hint: usize) -> bool {
		let Some(index) = self.find_field(path, position_hint) else {
			return false;
		};
		match self.scope().and_then(|scope| scope.child(index)) {
			Some(Expr::Call { callee, .. }) => {
				tracing::trace!(domain = "sources", path = %path, callee = %callee, "entering call");
			}
			Some(Expr::List(_)) => {}
			Some(Expr::Literal(_)) | None => return false,
		}
		self.scopes.push(index);
		true
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
