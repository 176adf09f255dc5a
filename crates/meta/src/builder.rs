//! Append-only population of a [`MetaGraph`].

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::graph::{EnumValue, MetaObject, Payload, Signature};
use crate::{Arguments, Builtin, Category, InvokeError, Literal, MetaError, MetaGraph, MetaId, Value};

/// Populates a metaobject graph.
///
/// Every declaration is validated as it is added: scopes must be namespaces
/// or classes, parameter and variable types must be types, and a name may be
/// declared once per scope. Functions may be overloaded; only the first
/// overload is reachable through [`MetaGraph::find`].
#[derive(Debug)]
pub struct MetaGraphBuilder {
	objects: Vec<MetaObject>,
	names: FxHashMap<Box<str>, MetaId>,
	builtins: [MetaId; Builtin::ALL.len()],
	sequences: FxHashMap<MetaId, MetaId>,
}

impl Default for MetaGraphBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl MetaGraphBuilder {
	/// Starts a graph holding the global namespace and every builtin type.
	pub fn new() -> Self {
		let mut builder = Self {
			objects: Vec::new(),
			names: FxHashMap::default(),
			builtins: [MetaId::GLOBAL; Builtin::ALL.len()],
			sequences: FxHashMap::default(),
		};
		builder.push("", Category::Namespace, None, Payload::Namespace { members: Vec::new() });
		for builtin in Builtin::ALL {
			let id = builder.push(builtin.name(), Category::Type, None, Payload::Builtin(builtin));
			builder.names.insert(builtin.name().into(), id);
			builder.builtins[builtin.index()] = id;
		}
		builder
	}

	/// The global namespace.
	pub fn global(&self) -> MetaId {
		MetaId::GLOBAL
	}

	/// The type object of a builtin scalar.
	pub fn builtin(&self, builtin: Builtin) -> MetaId {
		self.builtins[builtin.index()]
	}

	/// Declares a namespace inside `scope`.
	pub fn namespace(&mut self, scope: MetaId, name: &str) -> Result<MetaId, MetaError> {
		self.declare(scope, name, Category::Namespace, Payload::Namespace { members: Vec::new() })
	}

	/// Declares a class inside `scope`.
	pub fn class(&mut self, scope: MetaId, name: &str) -> Result<MetaId, MetaError> {
		self.declare(
			scope,
			name,
			Category::Class,
			Payload::Class {
				members: Vec::new(),
				constructors: Vec::new(),
				bases: Vec::new(),
			},
		)
	}

	/// Records `base` as a direct base class of `class`.
	pub fn derive_from(&mut self, class: MetaId, base: MetaId) -> Result<(), MetaError> {
		self.expect(class, Category::Class, "class")?;
		self.expect(base, Category::Class, "class")?;
		if class == base {
			return Err(MetaError::SelfDerivation {
				class: self.full_name(class),
			});
		}
		if let Payload::Class { bases, .. } = &mut self.objects[class.index()].payload
			&& !bases.contains(&base)
		{
			bases.push(base);
		}
		Ok(())
	}

	/// Declares an enumeration with `values` in declaration order. The first
	/// value is the default until [`MetaGraphBuilder::enum_default`] says otherwise.
	pub fn enumeration(&mut self, scope: MetaId, name: &str, values: &[(&str, i64)]) -> Result<MetaId, MetaError> {
		let values = values
			.iter()
			.map(|&(name, value)| EnumValue {
				name: name.to_owned(),
				value,
			})
			.collect();
		self.declare(scope, name, Category::Enum, Payload::Enum { values, default: 0 })
	}

	/// Selects the value an unmatched literal falls back to.
	pub fn enum_default(&mut self, enumeration: MetaId, value_name: &str) -> Result<(), MetaError> {
		self.expect(enumeration, Category::Enum, "enum")?;
		let enum_name = self.full_name(enumeration);
		let Payload::Enum { values, default } = &mut self.objects[enumeration.index()].payload else {
			unreachable!("category checked above");
		};
		let Some(index) = values.iter().position(|v| v.name == value_name) else {
			return Err(MetaError::UnknownEnumValue {
				enumeration: enum_name,
				name: value_name.to_owned(),
			});
		};
		*default = index;
		Ok(())
	}

	/// Returns the sequence type of `element`, declaring it on first use.
	pub fn sequence_of(&mut self, element: MetaId) -> Result<MetaId, MetaError> {
		self.expect_type(element)?;
		if let Some(&id) = self.sequences.get(&element) {
			return Ok(id);
		}
		let name = format!("Vec<{}>", self.full_name(element));
		let id = self.push(&name, Category::Type, None, Payload::Sequence { element });
		self.sequences.insert(element, id);
		Ok(id)
	}

	/// Declares a variable of type `ty` inside a namespace or class.
	pub fn variable(&mut self, scope: MetaId, name: &str, ty: MetaId) -> Result<MetaId, MetaError> {
		self.expect_type(ty)?;
		self.declare(scope, name, Category::Variable, Payload::Variable { ty })
	}

	/// Starts declaring a constructor of `class`.
	pub fn constructor(&mut self, class: MetaId) -> CallableBuilder<'_> {
		CallableBuilder::new(self, class, None, Category::Constructor)
	}

	/// Starts declaring a function `name` inside a namespace or class.
	///
	/// `result` is `None` for functions producing [`Value::Unit`].
	pub fn function(&mut self, scope: MetaId, name: &str, result: Option<MetaId>) -> CallableBuilder<'_> {
		let signature = Some((name.to_owned(), result));
		CallableBuilder::new(self, scope, signature, Category::Function)
	}

	/// Freezes the graph.
	pub fn build(self) -> MetaGraph {
		tracing::debug!(domain = "meta", objects = self.objects.len(), "metaobject graph built");
		MetaGraph {
			objects: self.objects,
			names: self.names,
			builtins: self.builtins,
		}
	}

	fn push(&mut self, name: &str, category: Category, scope: Option<MetaId>, payload: Payload) -> MetaId {
		let id = MetaId(self.objects.len() as u32);
		self.objects.push(MetaObject {
			name: name.into(),
			category,
			scope,
			payload,
		});
		id
	}

	fn declare(&mut self, scope: MetaId, name: &str, category: Category, payload: Payload) -> Result<MetaId, MetaError> {
		self.expect_scope(scope)?;
		let full = self.child_name(scope, name);
		if self.names.contains_key(full.as_str()) {
			return Err(MetaError::DuplicateName {
				scope: self.full_name(scope),
				name: name.to_owned(),
			});
		}
		let id = self.push(name, category, Some(scope), payload);
		self.add_member(scope, id);
		self.names.insert(full.into_boxed_str(), id);
		Ok(id)
	}

	fn add_member(&mut self, scope: MetaId, id: MetaId) {
		match &mut self.objects[scope.index()].payload {
			Payload::Namespace { members } | Payload::Class { members, .. } => members.push(id),
			_ => unreachable!("scope checked by caller"),
		}
	}

	fn child_name(&self, scope: MetaId, name: &str) -> String {
		let prefix = self.full_name(scope);
		if prefix.is_empty() { name.to_owned() } else { format!("{prefix}::{name}") }
	}

	fn full_name(&self, id: MetaId) -> String {
		let mut parts = Vec::new();
		let mut cursor = Some(id);
		while let Some(current) = cursor {
			let object = &self.objects[current.index()];
			if object.name.is_empty() {
				break;
			}
			parts.push(&*object.name);
			cursor = object.scope;
		}
		parts.reverse();
		parts.join("::")
	}

	fn object(&self, id: MetaId) -> Result<&MetaObject, MetaError> {
		self.objects.get(id.index()).ok_or(MetaError::UnknownId(id.0))
	}

	fn mismatch(&self, id: MetaId, expected: &'static str) -> MetaError {
		MetaError::CategoryMismatch {
			name: self.full_name(id),
			expected,
			found: self.objects[id.index()].category,
		}
	}

	fn expect(&self, id: MetaId, category: Category, expected: &'static str) -> Result<(), MetaError> {
		if self.object(id)?.category == category {
			Ok(())
		} else {
			Err(self.mismatch(id, expected))
		}
	}

	fn expect_scope(&self, id: MetaId) -> Result<(), MetaError> {
		match self.object(id)?.category {
			Category::Namespace | Category::Class => Ok(()),
			_ => Err(self.mismatch(id, "scope")),
		}
	}

	fn expect_type(&self, id: MetaId) -> Result<(), MetaError> {
		match self.object(id)?.category {
			Category::Type | Category::Class | Category::Enum => Ok(()),
			_ => Err(self.mismatch(id, "type")),
		}
	}
}

struct PendingParam {
	name: String,
	ty: MetaId,
	default: Option<Literal>,
}

/// Declares the parameters and invoker of a constructor or function.
///
/// Obtained from [`MetaGraphBuilder::constructor`] or
/// [`MetaGraphBuilder::function`]; nothing is recorded until
/// [`CallableBuilder::finish`].
#[must_use = "a callable is only declared once `finish` is called"]
pub struct CallableBuilder<'b> {
	builder: &'b mut MetaGraphBuilder,
	owner: MetaId,
	function: Option<(String, Option<MetaId>)>,
	category: Category,
	params: Vec<PendingParam>,
}

/// Constructor flavor of [`CallableBuilder`].
pub type ConstructorBuilder<'b> = CallableBuilder<'b>;

impl<'b> CallableBuilder<'b> {
	fn new(builder: &'b mut MetaGraphBuilder, owner: MetaId, function: Option<(String, Option<MetaId>)>, category: Category) -> Self {
		Self {
			builder,
			owner,
			function,
			category,
			params: Vec::new(),
		}
	}

	/// Appends a parameter of type `ty`.
	pub fn param(mut self, name: &str, ty: MetaId) -> Self {
		self.params.push(PendingParam {
			name: name.to_owned(),
			ty,
			default: None,
		});
		self
	}

	/// Appends a parameter with a declared default literal.
	pub fn param_with_default(mut self, name: &str, ty: MetaId, default: Literal) -> Self {
		self.params.push(PendingParam {
			name: name.to_owned(),
			ty,
			default: Some(default),
		});
		self
	}

	/// Validates and records the callable with `invoker` as its body.
	pub fn finish<F>(self, invoker: F) -> Result<MetaId, MetaError>
	where
		F: Fn(&mut Arguments) -> Result<Value, InvokeError> + Send + Sync + 'static,
	{
		self.finish_with(Some(Arc::new(invoker)))
	}

	/// Records the callable without a body; invoking it fails.
	pub fn declare(self) -> Result<MetaId, MetaError> {
		self.finish_with(None)
	}

	fn finish_with(self, invoker: Option<crate::Invoker>) -> Result<MetaId, MetaError> {
		let Self {
			builder,
			owner,
			function,
			category,
			params,
		} = self;

		let (name, result) = match function {
			Some((name, result)) => {
				builder.expect_scope(owner)?;
				if let Some(result) = result {
					builder.expect_type(result)?;
				}
				(name, result)
			}
			None => {
				builder.expect(owner, Category::Class, "class")?;
				(builder.objects[owner.index()].name.to_string(), Some(owner))
			}
		};
		for param in &params {
			let found = builder.object(param.ty)?.category;
			if !matches!(found, Category::Type | Category::Class | Category::Enum) {
				return Err(MetaError::UntypedParameter {
					callable: builder.child_name(owner, &name),
					name: param.name.clone(),
					found,
				});
			}
		}

		let callable = builder.push(
			&name,
			category,
			Some(owner),
			Payload::Callable(Signature {
				params: Vec::with_capacity(params.len()),
				result,
				invoker,
			}),
		);
		let param_ids: Vec<MetaId> = params
			.into_iter()
			.enumerate()
			.map(|(position, param)| {
				builder.push(
					&param.name,
					Category::Parameter,
					Some(callable),
					Payload::Parameter {
						ty: param.ty,
						position,
						default: param.default,
					},
				)
			})
			.collect();
		if let Payload::Callable(sig) = &mut builder.objects[callable.index()].payload {
			sig.params = param_ids;
		}

		match category {
			Category::Constructor => {
				if let Payload::Class { constructors, .. } = &mut builder.objects[owner.index()].payload {
					constructors.push(callable);
				}
			}
			_ => {
				builder.add_member(owner, callable);
				let full = builder.child_name(owner, &name);
				builder.names.entry(full.into_boxed_str()).or_insert(callable);
			}
		}
		Ok(callable)
	}
}
