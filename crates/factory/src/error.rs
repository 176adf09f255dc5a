use std::path::PathBuf;

use specula_meta::{InvokeError, MetaError};

use crate::ContextPath;

/// A convenient type alias for `Result` with `E` = [`FactoryError`].
pub type Result<T, E = FactoryError> = std::result::Result<T, E>;

/// Failures that abort the construction of the current unit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FactoryError {
	/// No candidate constructor of a polymorphic class fits the data.
	#[error("no constructor of {class} matches the data at {path}")]
	NoMatchingConstructor { class: String, path: ContextPath },

	/// A field was present but could not be fully converted.
	#[error("cannot convert {found} to {expected} at {path}")]
	ConversionFailure {
		path: ContextPath,
		expected: String,
		found: String,
	},

	/// The slot needs an operation the engine does not provide.
	#[error("{0}")]
	UnsupportedOperation(String),

	/// The data source lacks a capability the build tree relies on.
	///
	/// The engine treats this as fatal and panics when it surfaces.
	#[error("unimplemented data source feature: {0}")]
	UnimplementedFeature(String),

	/// A class offers no constructor at all.
	#[error("{class} has no constructor")]
	NotConstructible { class: String },

	/// The selected constructor's invoker failed.
	#[error("constructor {constructor} failed at {path}: {source}")]
	Invoke {
		constructor: String,
		path: ContextPath,
		#[source]
		source: InvokeError,
	},

	/// The metadata handed to the factory is inconsistent.
	#[error(transparent)]
	Meta(#[from] MetaError),
}

/// Failures loading a [`FactoryConfig`](crate::FactoryConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("cannot read {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid factory config: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("{key} must lie in [0, 1], got {value}")]
	OutOfRange { key: &'static str, value: f64 },
}
