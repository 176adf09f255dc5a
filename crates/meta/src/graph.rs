//! Frozen metaobject graph and the borrowed [`MetaRef`] handle.

use std::fmt;

use rustc_hash::FxHashMap;
use specula_range::{Range, Transform, transform};

use crate::views::{CallableMeta, ParameterMeta, TypeMeta};
use crate::{Builtin, Category, CategorySet, Interface, Invoker, Literal, MetaError};

/// Dense identity of a metaobject inside one [`MetaGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetaId(pub(crate) u32);

impl MetaId {
	/// The global namespace, present in every graph.
	pub const GLOBAL: MetaId = MetaId(0);

	pub const fn as_u32(self) -> u32 {
		self.0
	}

	#[inline]
	pub(crate) const fn index(self) -> usize {
		self.0 as usize
	}
}

impl fmt::Display for MetaId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// One declared value of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
	pub name: String,
	pub value: i64,
}

pub(crate) struct Signature {
	pub(crate) params: Vec<MetaId>,
	pub(crate) result: Option<MetaId>,
	pub(crate) invoker: Option<Invoker>,
}

impl fmt::Debug for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signature")
			.field("params", &self.params)
			.field("result", &self.result)
			.field("invoker", &self.invoker.as_ref().map(|_| ".."))
			.finish()
	}
}

#[derive(Debug)]
pub(crate) enum Payload {
	Namespace {
		members: Vec<MetaId>,
	},
	Class {
		members: Vec<MetaId>,
		constructors: Vec<MetaId>,
		bases: Vec<MetaId>,
	},
	Enum {
		values: Vec<EnumValue>,
		default: usize,
	},
	Builtin(Builtin),
	Sequence {
		element: MetaId,
	},
	Callable(Signature),
	Parameter {
		ty: MetaId,
		position: usize,
		default: Option<Literal>,
	},
	Variable {
		ty: MetaId,
	},
}

#[derive(Debug)]
pub(crate) struct MetaObject {
	pub(crate) name: Box<str>,
	pub(crate) category: Category,
	pub(crate) scope: Option<MetaId>,
	pub(crate) payload: Payload,
}

impl MetaObject {
	fn tags(&self) -> CategorySet {
		let mut tags = self.category.tags();
		if !self.name.is_empty() {
			tags |= CategorySet::NAMED;
		}
		if self.scope.is_some() {
			tags |= CategorySet::SCOPED;
		}
		tags
	}

	pub(crate) fn members(&self) -> &[MetaId] {
		match &self.payload {
			Payload::Namespace { members } | Payload::Class { members, .. } => members,
			_ => &[],
		}
	}
}

/// Immutable graph of metaobjects produced by
/// [`MetaGraphBuilder::build`](crate::MetaGraphBuilder::build).
#[derive(Debug)]
pub struct MetaGraph {
	pub(crate) objects: Vec<MetaObject>,
	pub(crate) names: FxHashMap<Box<str>, MetaId>,
	pub(crate) builtins: [MetaId; Builtin::ALL.len()],
}

impl MetaGraph {
	/// Number of metaobjects, including the global namespace and builtins.
	pub fn len(&self) -> usize {
		self.objects.len()
	}

	/// Always false: every graph holds at least the global namespace.
	pub fn is_empty(&self) -> bool {
		self.objects.is_empty()
	}

	/// The global namespace.
	pub fn global(&self) -> MetaRef<'_> {
		MetaRef::new(self, MetaId::GLOBAL)
	}

	/// Looks up a metaobject by id.
	pub fn get(&self, id: MetaId) -> Option<MetaRef<'_>> {
		(id.index() < self.objects.len()).then(|| MetaRef::new(self, id))
	}

	/// Looks up a metaobject by id, reporting unknown ids.
	pub fn meta(&self, id: MetaId) -> Result<MetaRef<'_>, MetaError> {
		self.get(id).ok_or(MetaError::UnknownId(id.0))
	}

	/// Looks up a named declaration by its full name, e.g. `shop::Product`.
	///
	/// Overloaded functions resolve to the first declaration.
	pub fn find(&self, full_name: &str) -> Option<MetaRef<'_>> {
		self.names.get(full_name).map(|&id| MetaRef::new(self, id))
	}

	/// Looks up a named declaration, reporting unknown names.
	pub fn require(&self, full_name: &str) -> Result<MetaRef<'_>, MetaError> {
		self.find(full_name).ok_or_else(|| MetaError::UnknownName(full_name.to_owned()))
	}

	/// Returns the metaobject of a builtin scalar type.
	pub fn builtin(&self, builtin: Builtin) -> TypeMeta<'_> {
		TypeMeta::wrap(MetaRef::new(self, self.builtins[builtin.index()]))
	}

	#[inline]
	pub(crate) fn object(&self, id: MetaId) -> &MetaObject {
		&self.objects[id.index()]
	}
}

/// Borrowed handle to one metaobject.
///
/// This is the provider interface the factory engine consumes: names,
/// category, scope, members and parameters are all answered from the graph.
#[derive(Clone, Copy)]
pub struct MetaRef<'g> {
	graph: &'g MetaGraph,
	id: MetaId,
}

impl<'g> MetaRef<'g> {
	#[inline]
	pub(crate) fn new(graph: &'g MetaGraph, id: MetaId) -> Self {
		Self { graph, id }
	}

	#[inline]
	pub(crate) fn object(self) -> &'g MetaObject {
		self.graph.object(self.id)
	}

	#[inline]
	pub(crate) fn payload(self) -> &'g Payload {
		&self.object().payload
	}

	#[inline]
	pub(crate) fn at(self, id: MetaId) -> MetaRef<'g> {
		MetaRef::new(self.graph, id)
	}

	pub fn id(self) -> MetaId {
		self.id
	}

	pub fn graph(self) -> &'g MetaGraph {
		self.graph
	}

	pub fn category(self) -> Category {
		self.object().category
	}

	/// Capability tags of this object.
	pub fn tags(self) -> CategorySet {
		self.object().tags()
	}

	/// Declared name without any scope prefix.
	///
	/// Constructors carry the name of their class; sequences are named
	/// `Vec<element>`.
	pub fn base_name(self) -> &'g str {
		&self.object().name
	}

	/// Name qualified by every enclosing scope, joined with `::`.
	pub fn full_name(self) -> String {
		self.qualified(|_| true)
	}

	/// Name qualified by enclosing scopes up to, not including, the nearest
	/// namespace. Nested classes keep their outer class prefix.
	pub fn local_name(self) -> String {
		self.qualified(|scope| scope.category() != Category::Namespace)
	}

	fn qualified(self, mut keep: impl FnMut(MetaRef<'g>) -> bool) -> String {
		let mut parts = vec![self.base_name()];
		let mut cursor = self.scope();
		while let Some(scope) = cursor
			&& !scope.base_name().is_empty()
			&& keep(scope)
		{
			parts.push(scope.base_name());
			cursor = scope.scope();
		}
		parts.reverse();
		parts.join("::")
	}

	/// Enclosing scope, absent for the global namespace and intrinsic types.
	pub fn scope(self) -> Option<MetaRef<'g>> {
		self.object().scope.map(|id| self.at(id))
	}

	/// Direct members of a namespace or class; empty for everything else.
	pub fn members(self) -> MetaRange<'g> {
		MetaRange::new(self.graph, self.object().members())
	}

	/// Parameters of a callable, in declaration order; empty for everything else.
	pub fn parameters(self) -> ParamRange<'g> {
		let ids: &[MetaId] = match self.payload() {
			Payload::Callable(sig) => &sig.params,
			_ => &[],
		};
		transform(MetaRange::new(self.graph, ids), ParameterMeta::wrap as fn(MetaRef<'g>) -> ParameterMeta<'g>)
	}

	/// Result type of a callable. Constructors produce their class; functions
	/// without a result and non-callables have none.
	pub fn result_type(self) -> Option<TypeMeta<'g>> {
		match self.payload() {
			Payload::Callable(sig) => sig.result.map(|id| TypeMeta::wrap(self.at(id))),
			_ => None,
		}
	}

	/// True when this object can be viewed as `I`.
	pub fn is<I: Interface<'g>>(self) -> bool {
		self.tags().contains(I::TAGS)
	}

	/// Views this object as `I`, or `None` when its category does not allow it.
	pub fn try_as<I: Interface<'g>>(self) -> Option<I> {
		self.is::<I>().then(|| I::wrap(self))
	}

	/// Views this object as `I`, reporting a [`MetaError::CategoryMismatch`].
	pub fn expect_as<I: Interface<'g>>(self) -> Result<I, MetaError> {
		self.try_as::<I>().ok_or_else(|| MetaError::CategoryMismatch {
			name: self.full_name(),
			expected: I::NAME,
			found: self.category(),
		})
	}

	/// Callable view, if this is a function or constructor.
	pub fn as_callable(self) -> Option<CallableMeta<'g>> {
		self.try_as()
	}
}

impl PartialEq for MetaRef<'_> {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id && std::ptr::eq(self.graph, other.graph)
	}
}

impl Eq for MetaRef<'_> {}

impl fmt::Debug for MetaRef<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {} {:?}", self.category(), self.id, self.full_name())
	}
}

/// Range over a list of metaobject ids.
#[derive(Clone, Copy)]
pub struct MetaRange<'g> {
	graph: &'g MetaGraph,
	ids: &'g [MetaId],
}

impl<'g> MetaRange<'g> {
	pub(crate) fn new(graph: &'g MetaGraph, ids: &'g [MetaId]) -> Self {
		Self { graph, ids }
	}

	/// Number of remaining members.
	pub fn len(&self) -> usize {
		self.ids.len()
	}
}

impl<'g> Range for MetaRange<'g> {
	type Item = MetaRef<'g>;

	#[inline]
	fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	#[inline]
	fn front(&self) -> MetaRef<'g> {
		debug_assert!(!self.is_empty(), "front() on an empty range");
		MetaRef::new(self.graph, self.ids[0])
	}

	#[inline]
	fn step_front(&mut self) {
		debug_assert!(!self.is_empty(), "step_front() on an empty range");
		self.ids = &self.ids[1..];
	}

	#[inline]
	fn leap_front(&mut self, n: usize) {
		self.ids = &self.ids[n.min(self.ids.len())..];
	}
}

impl fmt::Debug for MetaRange<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.ids).finish()
	}
}

/// Parameters of a callable, viewed as [`ParameterMeta`].
pub type ParamRange<'g> = Transform<MetaRange<'g>, fn(MetaRef<'g>) -> ParameterMeta<'g>>;
