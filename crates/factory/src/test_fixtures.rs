use specula_meta::{Builtin, Literal, MetaGraph, MetaGraphBuilder, Value};

use crate::{ConstructorSelector, ContextPath, DataSource, FactoryConfig, Field, FieldCoverageSelector};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Address {
	pub street: String,
	pub zip: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Product {
	Priced { name: String, price: f64 },
	Shipped { name: String, addr: Address, color: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Order {
	pub id: i64,
	pub items: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Measure {
	Count(i32),
	Label(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Chain {
	pub value: i32,
	pub next: Option<Box<Chain>>,
}

specula_meta::impl_from_value!(Address, Product, Order, Measure, Chain);

/// Test graph, everything under the `shop` namespace:
///
/// * `Color { Red = 1, Green = 2, Blue = 4 }`, default `Green`
/// * `Address(street: string, zip: i32 = 99999)`
/// * `Product(name: string, price: f64)` / `Product(name: string, addr: Address, color: Color)`
/// * `Order(id: i64, items: Vec<Product>)`
/// * `Measure(x: i32)` / `Measure(x: string)`
/// * `Paint(color: Color)`
/// * `Flag(on: bool)`
/// * `Twin(label: string)` twice, building `"first"` and `"second"`
/// * `Chain(value: i32)` / `Chain(value: i32, next: Chain)`
/// * `Replica(other: Replica)`
/// * `Blank` without constructors
pub(crate) fn shop_graph() -> MetaGraph {
	let mut b = MetaGraphBuilder::new();
	let string = b.builtin(Builtin::String);
	let int = b.builtin(Builtin::I32);
	let long = b.builtin(Builtin::I64);
	let float = b.builtin(Builtin::F64);
	let boolean = b.builtin(Builtin::Bool);

	let shop = b.namespace(b.global(), "shop").unwrap();
	let color = b.enumeration(shop, "Color", &[("Red", 1), ("Green", 2), ("Blue", 4)]).unwrap();
	b.enum_default(color, "Green").unwrap();

	let address = b.class(shop, "Address").unwrap();
	b.constructor(address)
		.param("street", string)
		.param_with_default("zip", int, Literal::Int(99999))
		.finish(|args| {
			let street = args.take()?;
			let zip = args.take()?;
			Ok(Value::object(Address { street, zip }))
		})
		.unwrap();

	let product = b.class(shop, "Product").unwrap();
	b.constructor(product)
		.param("name", string)
		.param("price", float)
		.finish(|args| {
			let name = args.take()?;
			let price = args.take()?;
			Ok(Value::object(Product::Priced { name, price }))
		})
		.unwrap();
	b.constructor(product)
		.param("name", string)
		.param("addr", address)
		.param("color", color)
		.finish(|args| {
			let name = args.take()?;
			let addr = args.take()?;
			let color = args.take()?;
			Ok(Value::object(Product::Shipped { name, addr, color }))
		})
		.unwrap();

	let order = b.class(shop, "Order").unwrap();
	let products = b.sequence_of(product).unwrap();
	b.constructor(order)
		.param("id", long)
		.param("items", products)
		.finish(|args| {
			let id = args.take()?;
			let items = args.take()?;
			Ok(Value::object(Order { id, items }))
		})
		.unwrap();

	let measure = b.class(shop, "Measure").unwrap();
	b.constructor(measure)
		.param("x", int)
		.finish(|args| Ok(Value::object(Measure::Count(args.take()?))))
		.unwrap();
	b.constructor(measure)
		.param("x", string)
		.finish(|args| Ok(Value::object(Measure::Label(args.take()?))))
		.unwrap();

	let paint = b.class(shop, "Paint").unwrap();
	b.constructor(paint)
		.param("color", color)
		.finish(|args| Ok(Value::Enum(args.take()?)))
		.unwrap();

	let flag = b.class(shop, "Flag").unwrap();
	b.constructor(flag)
		.param("on", boolean)
		.finish(|args| Ok(Value::Bool(args.take()?)))
		.unwrap();

	let twin = b.class(shop, "Twin").unwrap();
	for which in ["first", "second"] {
		b.constructor(twin)
			.param("label", string)
			.finish(move |args| {
				let label = args.take::<String>()?;
				Ok(Value::Str(format!("{which}:{label}")))
			})
			.unwrap();
	}

	let chain = b.class(shop, "Chain").unwrap();
	b.constructor(chain)
		.param("value", int)
		.finish(|args| Ok(Value::object(Chain { value: args.take()?, next: None })))
		.unwrap();
	b.constructor(chain)
		.param("value", int)
		.param("next", chain)
		.finish(|args| {
			let value = args.take()?;
			let next = args.take::<Chain>()?;
			Ok(Value::object(Chain {
				value,
				next: Some(Box::new(next)),
			}))
		})
		.unwrap();

	let replica = b.class(shop, "Replica").unwrap();
	b.constructor(replica).param("other", replica).declare().unwrap();

	b.class(shop, "Blank").unwrap();

	b.build()
}

/// Flat table: every unit is one row of `key => field`, nested parameters
/// addressed by their dotted key (`addr.street`).
pub(crate) struct MapSource {
	rows: Vec<Vec<(String, Field)>>,
	cursor: usize,
	coverage: bool,
}

impl MapSource {
	/// Source positioned before the first row; call `advance` or
	/// `Factory::next` to reach it.
	pub(crate) fn new(rows: Vec<Vec<(&str, Field)>>) -> Self {
		let rows = rows
			.into_iter()
			.map(|row| row.into_iter().map(|(k, v)| (k.to_owned(), v)).collect())
			.collect();
		Self {
			rows,
			cursor: usize::MAX,
			coverage: false,
		}
	}

	/// Source positioned on its only row.
	pub(crate) fn single(row: Vec<(&str, Field)>) -> Self {
		let mut src = Self::new(vec![row]);
		src.cursor = 0;
		src
	}

	/// Selects constructors by field coverage instead of confidence.
	pub(crate) fn with_coverage(mut self) -> Self {
		self.coverage = true;
		self
	}

	fn row(&self) -> &[(String, Field)] {
		self.rows.get(self.cursor).map(Vec::as_slice).unwrap_or_default()
	}
}

impl DataSource for MapSource {
	fn field_count(&self) -> usize {
		self.row().len()
	}

	fn field(&self, index: usize) -> Option<Field> {
		self.row().get(index).map(|(_, field)| field.clone())
	}

	fn find_field(&self, path: &ContextPath, _position_hint: usize) -> Option<usize> {
		let key = path.field_key(".");
		self.row().iter().position(|(k, _)| *k == key)
	}

	fn advance(&mut self) -> bool {
		self.cursor = self.cursor.wrapping_add(1);
		self.cursor < self.rows.len()
	}

	fn selector(&self, config: &FactoryConfig) -> Box<dyn ConstructorSelector> {
		if self.coverage {
			Box::new(FieldCoverageSelector::new())
		} else {
			Box::new(crate::ConfidenceSelector::new(config))
		}
	}
}

/// Document node of a [`TreeSource`].
#[derive(Debug, Clone)]
pub(crate) enum Doc {
	Leaf(Field),
	Map(Vec<(&'static str, Doc)>),
	List(Vec<Doc>),
}

pub(crate) fn leaf(field: impl Into<Field>) -> Doc {
	Doc::Leaf(field.into())
}

pub(crate) fn quoted(text: &str) -> Doc {
	Doc::Leaf(Field::Quoted(text.to_owned()))
}

/// Nested documents entered through the sub-handler protocol. Named slots
/// resolve by parameter name inside maps, everything else by position.
pub(crate) struct TreeSource {
	units: Vec<Doc>,
	cursor: usize,
	scopes: Vec<usize>,
}

impl TreeSource {
	pub(crate) fn single(unit: Doc) -> Self {
		Self {
			units: vec![unit],
			cursor: 0,
			scopes: Vec::new(),
		}
	}

	/// Scope depth; zero whenever every entered scope was left again.
	pub(crate) fn depth(&self) -> usize {
		self.scopes.len()
	}

	fn scope(&self) -> Option<&Doc> {
		let mut doc = self.units.get(self.cursor)?;
		for &index in &self.scopes {
			doc = match doc {
				Doc::Map(entries) => &entries.get(index)?.1,
				Doc::List(items) => items.get(index)?,
				Doc::Leaf(_) => return None,
			};
		}
		Some(doc)
	}

	fn child(&self, index: usize) -> Option<&Doc> {
		match self.scope()? {
			Doc::Map(entries) => entries.get(index).map(|(_, doc)| doc),
			Doc::List(items) => items.get(index),
			Doc::Leaf(_) => None,
		}
	}
}

impl DataSource for TreeSource {
	fn field_count(&self) -> usize {
		match self.scope() {
			Some(Doc::Map(entries)) => entries.len(),
			Some(Doc::List(items)) => items.len(),
			_ => 0,
		}
	}

	fn field(&self, index: usize) -> Option<Field> {
		match self.child(index)? {
			Doc::Leaf(field) => Some(field.clone()),
			_ => None,
		}
	}

	fn find_field(&self, path: &ContextPath, position_hint: usize) -> Option<usize> {
		match (self.scope()?, path.param_name()) {
			(Doc::Map(entries), Some(name)) => entries.iter().position(|(key, _)| *key == name),
			(Doc::List(items), None) => (position_hint < items.len()).then_some(position_hint),
			_ => None,
		}
	}

	fn sequence_len(&mut self, path: &ContextPath, position_hint: usize) -> crate::Result<Option<usize>> {
		let index = self.find_field(path, position_hint);
		Ok(match index.and_then(|i| self.child(i)) {
			Some(Doc::List(items)) => Some(items.len()),
			_ => None,
		})
	}

	fn add_sub_handler(&mut self, path: &ContextPath, position_hint: usize) -> bool {
		let Some(index) = self.find_field(path, position_hint) else {
			return false;
		};
		match self.child(index) {
			Some(Doc::Map(_) | Doc::List(_)) => {
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
		self.cursor += 1;
		self.cursor < self.units.len()
	}
}

/// Routes `tracing` output through the test harness.
pub(crate) fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
