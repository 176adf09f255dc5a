use pretty_assertions::assert_eq;
use rstest::rstest;
use specula_factory::{DataSource, Factory, FactoryError, Field};
use specula_meta::{ClassMeta, MetaGraph, Value};

use crate::script::{Arg, Expr, parse};
use crate::test_fixtures::*;
use crate::{JsonSource, RowSource, ScriptError, ScriptSource};

fn factory<'g>(graph: &'g MetaGraph, name: &str) -> Factory<'g> {
	let class = graph.require(name).unwrap().expect_as::<ClassMeta>().unwrap();
	Factory::new(class).unwrap()
}

fn people(values: Vec<Value>) -> Vec<Person> {
	values.into_iter().map(|v| v.into_object::<Person>().unwrap()).collect()
}

#[test]
fn test_rows_select_constructor_by_bound_columns() {
	let graph = crew_graph();
	let mut factory = factory(&graph, "crew::Person");
	let mut rows = RowSource::new(["name", "age", "addr__street", "mood"]);
	rows.push_row([Some("Ann"), Some("30"), None, None])
		.push_row([Some("Bob"), None, Some("Main"), Some("Busy")]);

	let built = people(factory.create_all(&mut rows).unwrap());
	assert_eq!(built, vec![ann(), bob()]);
	assert_eq!(rows.position(), Some(2));
}

#[test]
fn test_row_columns_match_case_insensitively_and_pad_with_null() {
	let graph = crew_graph();
	let mut factory = factory(&graph, "crew::Person");
	let mut rows = RowSource::new(["NAME", "Age"]);
	rows.push_row(["Ann", "30"]).push_row(["Cat"]);

	assert_eq!(rows.len(), 2);
	let built = people(factory.create_all(&mut rows).unwrap());
	assert_eq!(
		built,
		vec![
			ann(),
			Person::Aged {
				name: "Cat".into(),
				age: 0,
			}
		]
	);
}

#[test]
fn test_row_cursor_stops_at_end() {
	let mut rows = RowSource::new(["n"]);
	rows.push_row([Field::Int(1)]);
	assert_eq!(rows.field_count(), 0);

	assert!(rows.advance());
	assert_eq!(rows.field(0), Some(Field::Int(1)));
	assert!(!rows.advance());
	assert!(!rows.advance());
	assert_eq!(rows.field(0), None);
}

#[test]
#[should_panic(expected = "unimplemented data source feature")]
fn test_rows_cannot_fill_sequences() {
	let graph = crew_graph();
	let mut factory = factory(&graph, "crew::Team");
	let mut rows = RowSource::new(["name"]);
	rows.push_row(["core"]);
	let _ = factory.next(&mut rows);
}

const CREW_SCRIPT: &str = r#"
# one unit per statement
Person("Ann", 30);
Person(name: "Bob", addr: Address(street: "Main"), mood: Mood::Busy);
"#;

#[test]
fn test_script_units_build_in_order() {
	let graph = crew_graph();
	let mut factory = factory(&graph, "crew::Person");
	let mut src = ScriptSource::parse(CREW_SCRIPT).unwrap();

	assert_eq!(src.units().len(), 2);
	let built = people(factory.create_all(&mut src).unwrap());
	assert_eq!(built, vec![ann(), bob()]);
}

#[test]
fn test_script_named_arguments_bind_in_any_order() {
	let graph = crew_graph();
	let mut factory = factory(&graph, "crew::Person");
	let mut src = ScriptSource::parse(r#"Person(age: 30, name: "Ann")"#).unwrap();

	let value = factory.next(&mut src).unwrap().unwrap();
	assert_eq!(value.into_object::<Person>().unwrap(), ann());
}

#[test]
fn test_script_positional_nested_call_and_integer_enum() {
	let graph = crew_graph();
	let mut factory = factory(&graph, "crew::Person");
	let mut src = ScriptSource::parse(r#"Person(name: "Eve", addr: Address("Side", 12345), mood: 1)"#).unwrap();

	let value = factory.next(&mut src).unwrap().unwrap();
	assert_eq!(
		value.into_object::<Person>().unwrap(),
		Person::Located {
			name: "Eve".into(),
			addr: Address {
				street: "Side".into(),
				zip: 12345,
			},
			mood: 1,
		}
	);
}

#[test]
fn test_script_lists_fill_sequences() {
	let graph = crew_graph();
	let mut factory = factory(&graph, "crew::Team");
	let mut src = ScriptSource::parse(
		r#"Team("core", [
			Person("Ann", 30),
			Person(name: "Bob", addr: Address(street: "Main"), mood: Mood::Busy),
		])"#,
	)
	.unwrap();

	let team = factory.next(&mut src).unwrap().unwrap().into_object::<Team>().unwrap();
	assert_eq!(
		team,
		Team {
			name: "core".into(),
			members: vec![ann(), bob()],
		}
	);
	assert_eq!(src.depth(), 0);
}

#[test]
fn test_script_with_swapped_arguments_matches_nothing() {
	let graph = crew_graph();
	let mut factory = factory(&graph, "crew::Person");
	let mut src = ScriptSource::parse(r#"Person(30, "Ann")"#).unwrap();

	assert!(matches!(
		factory.next(&mut src),
		Err(FactoryError::NoMatchingConstructor { .. })
	));
}

#[test]
fn test_script_call_binds_only_the_class_it_names() {
	let graph = crew_graph();
	let mut factory = factory(&graph, "crew::Person");

	let mut src = ScriptSource::parse(r#"Team("core", 30)"#).unwrap();
	assert!(matches!(
		factory.next(&mut src),
		Err(FactoryError::NoMatchingConstructor { .. })
	));

	let mut src = ScriptSource::parse(r#"crew::Person("Ann", 30)"#).unwrap();
	assert_eq!(factory.next(&mut src).unwrap().unwrap().into_object::<Person>().unwrap(), ann());
}

#[test]
fn test_script_structured_argument_in_scalar_slot_fails() {
	let graph = crew_graph();
	let mut factory = factory(&graph, "crew::Address");
	let mut src = ScriptSource::parse(r#"Address(street: [1, 2], zip: Person("x", 1))"#).unwrap();

	assert!(matches!(
		factory.next(&mut src),
		Err(FactoryError::ConversionFailure { ref found, .. }) if found == "structured data"
	));
}

#[test]
fn test_script_unmatched_enum_falls_back_inside_polymorphic_class() {
	let graph = crew_graph();
	let mut factory = factory(&graph, "crew::Person");
	let mut src =
		ScriptSource::parse(r#"Person(name: "Bob", addr: Address(street: "Main"), mood: Mood::Sleepy)"#).unwrap();

	let value = factory.next(&mut src).unwrap().unwrap();
	assert_eq!(
		value.into_object::<Person>().unwrap(),
		Person::Located {
			name: "Bob".into(),
			addr: Address {
				street: "Main".into(),
				zip: 0,
			},
			mood: 0,
		}
	);
}

#[test]
fn test_script_literals() {
	let units = parse(r#"f("a\"b", -3, 2.5, true, null, x, Mood::Busy, [])"#).unwrap();
	let positional = |value| Arg { name: None, value };
	assert_eq!(
		units,
		vec![Expr::Call {
			callee: "f".into(),
			args: vec![
				positional(Expr::Literal(Field::Quoted("a\"b".into()))),
				positional(Expr::Literal(Field::Int(-3))),
				positional(Expr::Literal(Field::Float(2.5))),
				positional(Expr::Literal(Field::Bool(true))),
				positional(Expr::Literal(Field::Null)),
				positional(Expr::Literal(Field::Text("x".into()))),
				positional(Expr::Literal(Field::Text("Mood::Busy".into()))),
				positional(Expr::List(vec![])),
			],
		}]
	);
}

#[test]
fn test_empty_statements_are_skipped() {
	assert_eq!(parse("# nothing\n;;").unwrap(), vec![]);
	assert_eq!(parse(";1;;2;").unwrap().len(), 2);
}

#[rstest]
#[case::lex(r#"Person("Ann" @)"#, ScriptError::Lex { offset: 13, text: "@".into() })]
#[case::truncated(r#"Person("Ann","#, ScriptError::UnexpectedEnd { expected: "expression" })]
#[case::missing_separator(
	r#"Person("Ann") Person("Bob")"#,
	ScriptError::Unexpected { offset: 14, expected: "`;` or end of input", found: "Person".into() }
)]
#[case::stray_colon("Person(: 1)", ScriptError::Unexpected { offset: 7, expected: "expression", found: ":".into() })]
#[case::unclosed_list("[1, 2", ScriptError::UnexpectedEnd { expected: "`,` or `]`" })]
fn test_script_errors(#[case] text: &str, #[case] expected: ScriptError) {
	assert_eq!(parse(text).unwrap_err(), expected);
}

#[test]
fn test_json_array_holds_one_unit_per_element() {
	let graph = crew_graph();
	let mut factory = factory(&graph, "crew::Person");
	let mut src = JsonSource::parse(
		r#"[
			{"name": "Ann", "age": 30},
			{"name": "Bob", "addr": {"street": "Main"}, "mood": "Busy"}
		]"#,
	)
	.unwrap();

	let built = people(factory.create_all(&mut src).unwrap());
	assert_eq!(built, vec![ann(), bob()]);
}

#[test]
fn test_json_nested_arrays_and_null_defaults() {
	let graph = crew_graph();
	let mut factory = factory(&graph, "crew::Team");
	let mut src = JsonSource::parse(
		r#"{
			"name": "core",
			"members": [
				{"name": "Ann", "age": "30"},
				{"name": "Bob", "addr": {"street": "Main", "zip": null}, "mood": "Busy"}
			]
		}"#,
	)
	.unwrap();

	let team = factory.next(&mut src).unwrap().unwrap().into_object::<Team>().unwrap();
	assert_eq!(team.members, vec![ann(), bob()]);
	assert_eq!(src.depth(), 0);
	assert!(factory.next(&mut src).unwrap().is_none());
}

#[test]
fn test_json_scalars_map_to_fields() {
	let mut src = JsonSource::parse(r#"{"a": 1, "b": 2.5, "c": "x", "d": true, "e": null, "f": [1]}"#).unwrap();
	assert!(src.advance());

	assert_eq!(src.field_count(), 6);
	let fields: Vec<Option<Field>> = (0..6).map(|i| src.field(i)).collect();
	assert_eq!(
		fields,
		vec![
			Some(Field::Int(1)),
			Some(Field::Float(2.5)),
			Some(Field::Quoted("x".into())),
			Some(Field::Bool(true)),
			Some(Field::Null),
			None,
		]
	);
	assert!(src.is_present(0));
	assert!(!src.is_present(4));
}

#[test]
fn test_json_structured_member_in_scalar_slot_fails() {
	let graph = crew_graph();
	let mut factory = factory(&graph, "crew::Address");
	let mut src = JsonSource::parse(r#"{"street": {"a": 1}, "zip": [3]}"#).unwrap();

	assert!(matches!(
		factory.next(&mut src),
		Err(FactoryError::ConversionFailure { ref expected, .. }) if expected == "String"
	));
}

#[test]
fn test_invalid_json_is_rejected() {
	assert!(JsonSource::parse(r#"{"name": "Ann""#).is_err());
}
