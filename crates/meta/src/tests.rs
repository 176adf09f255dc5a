use pretty_assertions::assert_eq;
use specula_range::{Range, RangeExt};

use super::*;
use crate::test_fixtures::{Address, shop_graph};

fn names<'g>(range: impl Range<Item = MetaRef<'g>>) -> Vec<String> {
	range.transform(|m| m.full_name()).collect_vec()
}

#[test]
fn test_names_are_qualified_by_scope() {
	let graph = shop_graph();
	let inner = graph.find("shop::Outer::Inner").unwrap();
	assert_eq!(inner.base_name(), "Inner");
	assert_eq!(inner.local_name(), "Outer::Inner");
	assert_eq!(inner.full_name(), "shop::Outer::Inner");
	assert_eq!(inner.scope().unwrap().full_name(), "shop::Outer");

	let product = graph.find("shop::Product").unwrap().try_as::<ClassMeta>().unwrap();
	let ctor = product.constructors().front();
	assert_eq!(ctor.base_name(), "Product");
	assert_eq!(ctor.full_name(), "shop::Product::Product");
	assert_eq!(ctor.result_type().unwrap().meta(), product.meta());
}

#[test]
fn test_global_namespace_is_unnamed() {
	let graph = shop_graph();
	let global = graph.global();
	assert_eq!(global.full_name(), "");
	assert!(global.scope().is_none());
	assert!(!global.tags().contains(CategorySet::NAMED));
	assert!(global.is::<NamespaceMeta>());
	assert_eq!(names(global.members()), vec!["shop".to_string()]);
}

#[test]
fn test_duplicate_name_in_scope_is_rejected() {
	let mut b = MetaGraphBuilder::new();
	let ns = b.namespace(b.global(), "app").unwrap();
	b.class(ns, "Widget").unwrap();
	let err = b.class(ns, "Widget").unwrap_err();
	assert_eq!(
		err,
		MetaError::DuplicateName {
			scope: "app".into(),
			name: "Widget".into()
		}
	);
	// same base name in another scope is fine
	let other = b.namespace(b.global(), "other").unwrap();
	assert!(b.class(other, "Widget").is_ok());
}

#[test]
fn test_overloaded_functions_are_allowed() {
	let mut b = MetaGraphBuilder::new();
	let int = b.builtin(Builtin::I64);
	let first = b.function(b.global(), "abs", Some(int)).param("x", int).declare().unwrap();
	let second = b.function(b.global(), "abs", Some(int)).declare().unwrap();
	assert_ne!(first, second);
	let graph = b.build();
	assert_eq!(graph.find("abs").unwrap().id(), first);
	assert_eq!(graph.global().members().count_front(), 2);
}

#[test]
fn test_declarations_require_a_scope() {
	let mut b = MetaGraphBuilder::new();
	let color = b.enumeration(b.global(), "Color", &[("Red", 0)]).unwrap();
	let err = b.class(color, "Nested").unwrap_err();
	assert!(matches!(
		err,
		MetaError::CategoryMismatch {
			expected: "scope",
			found: Category::Enum,
			..
		}
	));
}

#[test]
fn test_parameter_type_must_be_a_type() {
	let mut b = MetaGraphBuilder::new();
	let ns = b.namespace(b.global(), "ns").unwrap();
	let class = b.class(ns, "Thing").unwrap();
	let err = b.constructor(class).param("bad", ns).declare().unwrap_err();
	assert_eq!(
		err,
		MetaError::UntypedParameter {
			callable: "ns::Thing::Thing".into(),
			name: "bad".into(),
			found: Category::Namespace,
		}
	);
}

#[test]
fn test_constructor_requires_class() {
	let mut b = MetaGraphBuilder::new();
	let ns = b.namespace(b.global(), "ns").unwrap();
	let err = b.constructor(ns).declare().unwrap_err();
	assert!(matches!(err, MetaError::CategoryMismatch { expected: "class", .. }));
}

#[test]
fn test_classification_by_tags() {
	let graph = shop_graph();
	let product = graph.find("shop::Product").unwrap();
	let color = graph.find("shop::Color").unwrap();
	let count = graph.find("shop::Outer::count").unwrap();

	assert_eq!(product.category(), Category::Class);
	assert!(product.is::<ClassMeta>());
	assert!(product.is::<ScopeMeta>());
	assert!(product.is::<TypeMeta>());
	assert!(!product.is::<EnumMeta>());

	assert!(color.is::<TypeMeta>());
	assert!(color.try_as::<ScopeMeta>().is_none());

	assert!(count.is::<VariableMeta>());
	assert!(count.tags().contains(CategorySet::TYPED | CategorySet::SCOPED | CategorySet::NAMED));
	assert_eq!(count.try_as::<VariableMeta>().unwrap().ty().as_builtin(), Some(Builtin::I32));
}

#[test]
fn test_expect_as_reports_mismatch() {
	let graph = shop_graph();
	let color = graph.find("shop::Color").unwrap();
	let err = color.expect_as::<ClassMeta>().unwrap_err();
	assert_eq!(
		err,
		MetaError::CategoryMismatch {
			name: "shop::Color".into(),
			expected: "class",
			found: Category::Enum,
		}
	);
	assert!(color.expect_as::<EnumMeta>().is_ok());
}

#[test]
fn test_type_kinds() {
	let graph = shop_graph();
	let total = graph.find("shop::total").unwrap().as_callable().unwrap();
	let items = total.parameters().front();
	let TypeKind::Sequence(element) = items.ty().kind() else {
		panic!("expected a sequence, got {:?}", items.ty().kind());
	};
	assert_eq!(element.full_name(), "shop::Product");
	assert!(matches!(element.kind(), TypeKind::Class(_)));
	assert_eq!(items.ty().base_name(), "Vec<shop::Product>");
	assert_eq!(graph.builtin(Builtin::F64).kind(), TypeKind::Builtin(Builtin::F64));
	assert_eq!(total.result_type().unwrap().as_builtin(), Some(Builtin::F64));
}

#[test]
fn test_sequence_types_are_interned() {
	let mut b = MetaGraphBuilder::new();
	let int = b.builtin(Builtin::I32);
	let a = b.sequence_of(int).unwrap();
	let c = b.sequence_of(int).unwrap();
	assert_eq!(a, c);
	let nested = b.sequence_of(a).unwrap();
	let graph = b.build();
	assert_eq!(graph.meta(nested).unwrap().base_name(), "Vec<Vec<i32>>");
	assert!(graph.meta(a).unwrap().scope().is_none());
}

#[test]
fn test_parameters_carry_position_and_default() {
	let graph = shop_graph();
	let address = graph.find("shop::Address").unwrap().try_as::<ClassMeta>().unwrap();
	let params = address.constructors().front().parameters().collect_vec();
	assert_eq!(params.len(), 2);
	assert_eq!(params[0].base_name(), "street");
	assert_eq!(params[0].position(), 0);
	assert_eq!(params[0].default_literal(), None);
	assert_eq!(params[1].position(), 1);
	assert_eq!(params[1].default_literal(), Some(&Literal::Int(0)));
	assert_eq!(params[1].callable().unwrap().owner().unwrap(), address);
}

#[test]
fn test_polymorphic_class() {
	let graph = shop_graph();
	let product = graph.find("shop::Product").unwrap().try_as::<ClassMeta>().unwrap();
	let address = graph.find("shop::Address").unwrap().try_as::<ClassMeta>().unwrap();
	assert!(product.is_polymorphic());
	assert!(!address.is_polymorphic());
	let arities = product.constructors().transform(|c| c.arity()).collect_vec();
	assert_eq!(arities, vec![2, 3]);
}

#[test]
fn test_invoke_constructor() {
	let graph = shop_graph();
	let address = graph.find("shop::Address").unwrap().try_as::<ClassMeta>().unwrap();
	let ctor = address.constructors().front();
	let value = ctor
		.invoke(Arguments::new(vec![Value::Str("Main".into()), Value::I32(12345)]))
		.unwrap();
	let built: Address = value.into_typed().unwrap();
	assert_eq!(
		built,
		Address {
			street: "Main".into(),
			zip: 12345
		}
	);
}

#[test]
fn test_invoke_reports_argument_errors() {
	let graph = shop_graph();
	let address = graph.find("shop::Address").unwrap().try_as::<ClassMeta>().unwrap();
	let ctor = address.constructors().front();

	let err = ctor.invoke(Arguments::new(vec![Value::Str("Main".into())])).unwrap_err();
	assert_eq!(err, InvokeError::MissingArgument { index: 1 });

	let err = ctor
		.invoke(Arguments::new(vec![Value::I32(1), Value::I32(2)]))
		.unwrap_err();
	assert_eq!(
		err,
		InvokeError::Argument {
			index: 0,
			source: ValueError::new("String", "i32")
		}
	);

	let product = graph.find("shop::Product").unwrap().try_as::<ClassMeta>().unwrap();
	let declared_only = product.constructors().front();
	assert!(matches!(declared_only.invoke(Arguments::new(vec![])), Err(InvokeError::NotInvocable(_))));
}

#[test]
fn test_enum_values_and_default() {
	let graph = shop_graph();
	let color = graph.find("shop::Color").unwrap().try_as::<EnumMeta>().unwrap();
	assert_eq!(color.values().len(), 3);
	assert_eq!(color.value_of("Blue"), Some(4));
	assert_eq!(color.value_of("blue"), None);
	assert_eq!(color.name_of(1), Some("Red"));
	assert_eq!(color.default_value(), 2);
}

#[test]
fn test_enum_default_must_name_a_value() {
	let mut b = MetaGraphBuilder::new();
	let e = b.enumeration(b.global(), "Mode", &[("On", 1)]).unwrap();
	assert_eq!(
		b.enum_default(e, "Off").unwrap_err(),
		MetaError::UnknownEnumValue {
			enumeration: "Mode".into(),
			name: "Off".into()
		}
	);
}

#[test]
fn test_derivation_is_transitive() {
	let mut b = MetaGraphBuilder::new();
	let base = b.class(b.global(), "Base").unwrap();
	let mid = b.class(b.global(), "Mid").unwrap();
	let leaf = b.class(b.global(), "Leaf").unwrap();
	b.derive_from(mid, base).unwrap();
	b.derive_from(leaf, mid).unwrap();
	assert!(matches!(b.derive_from(leaf, leaf), Err(MetaError::SelfDerivation { .. })));
	let graph = b.build();

	let class = |name: &str| graph.find(name).unwrap().try_as::<ClassMeta>().unwrap();
	assert!(class("Leaf").is_derived_from(class("Base")));
	assert!(!class("Base").is_derived_from(class("Leaf")));
	assert_eq!(class("Leaf").bases().transform(|c| c.full_name()).collect_vec(), vec!["Mid".to_string()]);
}

/// For `A { B, C }, D` the in-order flattening is `A, B, C, D`.
#[test]
fn test_flatten_in_order_is_preorder() {
	let mut b = MetaGraphBuilder::new();
	let a = b.namespace(b.global(), "A").unwrap();
	b.class(a, "B").unwrap();
	b.class(a, "C").unwrap();
	b.class(b.global(), "D").unwrap();
	let graph = b.build();

	let order = flatten_in_order(graph.global())
		.transform(|m| m.base_name())
		.collect_vec();
	assert_eq!(order, vec!["A", "B", "C", "D"]);
}

#[test]
fn test_flatten_visits_every_member_once() {
	let graph = shop_graph();
	let mut unordered = names(flatten(graph.global()));
	let mut ordered = names(flatten_in_order(graph.global()));
	unordered.sort();
	ordered.sort();
	assert_eq!(unordered, ordered);
	assert_eq!(
		ordered,
		vec![
			"shop",
			"shop::Address",
			"shop::Color",
			"shop::Outer",
			"shop::Outer::Inner",
			"shop::Outer::count",
			"shop::Product",
			"shop::total",
		]
	);
}

#[test]
fn test_flatten_of_leaf_is_empty() {
	let graph = shop_graph();
	let color = graph.find("shop::Color").unwrap();
	assert!(flatten(color).is_empty());
	assert!(flatten_in_order(color).is_empty());
}

#[test]
fn test_extract_as_retypes_matching_members() {
	let graph = shop_graph();
	let classes = flatten_in_order(graph.global())
		.extract_as::<ClassMeta>()
		.transform(|c| c.local_name())
		.collect_vec();
	assert_eq!(classes, vec!["Address", "Product", "Outer", "Outer::Inner"]);

	let outer = graph.find("shop::Outer").unwrap().try_as::<ClassMeta>().unwrap();
	assert_eq!(outer.variables().count_front(), 1);
	let shop = graph.find("shop").unwrap().try_as::<ScopeMeta>().unwrap();
	assert_eq!(shop.nested_scopes().count_front(), 3);
}

#[test]
fn test_value_conversions() {
	assert_eq!(Value::Enum(4).into_typed::<i64>(), Ok(4));
	assert_eq!(
		Value::Seq(vec![Value::I32(1), Value::I32(2)]).into_typed::<Vec<i32>>(),
		Ok(vec![1, 2])
	);
	assert_eq!(Value::Bool(true).into_typed::<String>(), Err(ValueError::new("String", "bool")));
	assert!(Value::object(7u8).into_object::<u16>().is_err());
	assert_ne!(Value::object(1u8), Value::object(1u8));
}

/// The registry is process-wide, so its whole lifecycle is exercised in one test.
#[test]
fn test_registry_lifecycle() {
	assert!(registry::current().is_none());
	assert_eq!(registry::require().unwrap_err(), MetaError::NotInitialized);

	let published = registry::init(shop_graph()).unwrap();
	assert!(registry::is_initialized());
	assert_eq!(registry::init(shop_graph()).unwrap_err(), MetaError::AlreadyInitialized);

	let pinned = registry::current().unwrap();
	assert!(std::sync::Arc::ptr_eq(&pinned, &published));

	let removed = registry::shutdown().unwrap();
	assert!(std::sync::Arc::ptr_eq(&removed, &published));
	assert!(registry::current().is_none());
	assert!(pinned.find("shop::Product").is_some());
	assert!(registry::shutdown().is_none());
}
