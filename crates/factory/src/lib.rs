//! Polymorphic construction of reflected classes from weakly typed data.
//!
//! A [`Factory`] derives a build tree from a class's constructors and
//! parameters, then fills it from a [`DataSource`] one unit at a time.
//! Classes with several constructors are resolved per unit by scoring every
//! candidate against the data: each parameter gets a match confidence from
//! its leaf converter, and the source's [`ConstructorSelector`] picks a
//! winner.
//!
//! Scalars are converted by [`convert`], enumerations matched by an
//! [`EnumMatcher`], sequences built element by element, and nested classes
//! built recursively. A class reached again on its own construction path is
//! never recursed into; its slot cannot be filled.

mod build;
mod config;
pub mod convert;
mod enums;
mod error;
mod factory;
mod field;
pub mod node;
mod path;
mod selector;
mod source;

pub use config::{EnumMatch, FactoryConfig};
pub use enums::{CaseInsensitiveMatch, EnumMatcher, ExactMatch, FuzzyMatch, best_match};
pub use error::{ConfigError, FactoryError, Result};
pub use factory::Factory;
pub use field::{Field, FromField};
pub use node::{FactoryNode, ManagerState, Role};
pub use path::{ContextPath, Segment};
pub use selector::{ConfidenceSelector, FieldCoverageSelector};
pub use source::{Candidate, ConstructorSelector, DataSource, Fit};

#[cfg(test)]
mod test_fixtures;
