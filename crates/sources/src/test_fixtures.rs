use specula_meta::{Builtin, Literal, MetaGraph, MetaGraphBuilder, Value};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Address {
	pub street: String,
	pub zip: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Person {
	Aged { name: String, age: i32 },
	Located { name: String, addr: Address, mood: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Team {
	pub name: String,
	pub members: Vec<Person>,
}

specula_meta::impl_from_value!(Address, Person, Team);

/// `crew` namespace:
///
/// * `Mood { Calm = 0, Busy = 1 }`
/// * `Address(street: string, zip: i32 = 0)`
/// * `Person(name: string, age: i32)` / `Person(name: string, addr: Address, mood: Mood)`
/// * `Team(name: string, members: Vec<Person>)`
pub(crate) fn crew_graph() -> MetaGraph {
	let mut b = MetaGraphBuilder::new();
	let string = b.builtin(Builtin::String);
	let int = b.builtin(Builtin::I32);

	let crew = b.namespace(b.global(), "crew").unwrap();
	let mood = b.enumeration(crew, "Mood", &[("Calm", 0), ("Busy", 1)]).unwrap();

	let address = b.class(crew, "Address").unwrap();
	b.constructor(address)
		.param("street", string)
		.param_with_default("zip", int, Literal::Int(0))
		.finish(|args| {
			let street = args.take()?;
			let zip = args.take()?;
			Ok(Value::object(Address { street, zip }))
		})
		.unwrap();

	let person = b.class(crew, "Person").unwrap();
	b.constructor(person)
		.param("name", string)
		.param("age", int)
		.finish(|args| {
			let name = args.take()?;
			let age = args.take()?;
			Ok(Value::object(Person::Aged { name, age }))
		})
		.unwrap();
	b.constructor(person)
		.param("name", string)
		.param("addr", address)
		.param("mood", mood)
		.finish(|args| {
			let name = args.take()?;
			let addr = args.take()?;
			let mood = args.take()?;
			Ok(Value::object(Person::Located { name, addr, mood }))
		})
		.unwrap();

	let team = b.class(crew, "Team").unwrap();
	let people = b.sequence_of(person).unwrap();
	b.constructor(team)
		.param("name", string)
		.param("members", people)
		.finish(|args| {
			let name = args.take()?;
			let members = args.take()?;
			Ok(Value::object(Team { name, members }))
		})
		.unwrap();

	b.build()
}

pub(crate) fn ann() -> Person {
	Person::Aged {
		name: "Ann".into(),
		age: 30,
	}
}

pub(crate) fn bob() -> Person {
	Person::Located {
		name: "Bob".into(),
		addr: Address {
			street: "Main".into(),
			zip: 0,
		},
		mood: 1,
	}
}
