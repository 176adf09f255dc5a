use specula_meta::Value;

use crate::{ContextPath, FactoryError, Fit, Result};

/// Placeholder for a parameter whose class is already being built on the
/// same path, such as a copy-constructor argument.
#[derive(Debug)]
pub struct Suppliers {
	class: String,
	path: ContextPath,
}

impl Suppliers {
	pub(crate) fn new(class: String, path: ContextPath) -> Self {
		Self { class, path }
	}

	/// Full name of the class that would have to be supplied.
	pub fn class(&self) -> &str {
		&self.class
	}

	pub fn path(&self) -> &ContextPath {
		&self.path
	}

	pub(crate) fn score(&self) -> Fit {
		Fit::MISSING
	}

	/// Always fails: there is no existing instance to copy from.
	pub fn get(&self) -> Result<Value> {
		Err(FactoryError::UnsupportedOperation("copy construction not supported".to_owned()))
	}
}
