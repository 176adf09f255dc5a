use crate::{Builtin, Literal, MetaGraph, MetaGraphBuilder, Value};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Address {
	pub street: String,
	pub zip: i32,
}

crate::impl_from_value!(Address);

/// `shop` namespace with an enum, two classes, a nested class and a function.
pub(crate) fn shop_graph() -> MetaGraph {
	let mut b = MetaGraphBuilder::new();
	let string = b.builtin(Builtin::String);
	let int = b.builtin(Builtin::I32);
	let float = b.builtin(Builtin::F64);

	let shop = b.namespace(b.global(), "shop").unwrap();
	let color = b.enumeration(shop, "Color", &[("Red", 1), ("Green", 2), ("Blue", 4)]).unwrap();
	b.enum_default(color, "Green").unwrap();

	let address = b.class(shop, "Address").unwrap();
	b.constructor(address)
		.param("street", string)
		.param_with_default("zip", int, Literal::Int(0))
		.finish(|args| {
			let street = args.take::<String>()?;
			let zip = args.take::<i32>()?;
			Ok(Value::object(Address { street, zip }))
		})
		.unwrap();

	let product = b.class(shop, "Product").unwrap();
	b.constructor(product)
		.param("name", string)
		.param("price", float)
		.declare()
		.unwrap();
	b.constructor(product)
		.param("name", string)
		.param("addr", address)
		.param("color", color)
		.declare()
		.unwrap();

	let outer = b.class(shop, "Outer").unwrap();
	b.class(outer, "Inner").unwrap();
	b.variable(outer, "count", int).unwrap();

	let products = b.sequence_of(product).unwrap();
	b.function(shop, "total", Some(float))
		.param("items", products)
		.finish(|args| {
			let items = args.take::<Vec<Value>>()?;
			Ok(Value::F64(items.len() as f64))
		})
		.unwrap();

	b.build()
}
