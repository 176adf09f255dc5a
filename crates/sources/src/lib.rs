//! Reference data sources for the factory.
//!
//! * [`RowSource`]: flat tables, nested parameters flattened into column
//!   names, no sequences.
//! * [`ScriptSource`]: constructor-call scripts with named arguments, lists
//!   and qualified enumeration literals.
//! * [`JsonSource`]: JSON documents, objects entered as nested scopes.
//!
//! Every source starts before its first unit; drive it with
//! [`Factory::next`](specula_factory::Factory::next) or
//! [`DataSource::advance`](specula_factory::DataSource::advance).

mod error;
mod json;
mod row;
pub mod script;

pub use error::{Result, ScriptError};
pub use json::JsonSource;
pub use row::{COLUMN_SEPARATOR, RowSource};
pub use script::ScriptSource;

#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod tests;
