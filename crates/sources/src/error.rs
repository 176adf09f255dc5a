/// A convenient type alias for `Result` with `E` = [`ScriptError`].
pub type Result<T, E = ScriptError> = std::result::Result<T, E>;

/// Failures reading a call script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
	#[error("unrecognized input `{text}` at offset {offset}")]
	Lex { offset: usize, text: String },

	#[error("expected {expected} at offset {offset}, found `{found}`")]
	Unexpected {
		offset: usize,
		expected: &'static str,
		found: String,
	},

	#[error("expected {expected}, found end of input")]
	UnexpectedEnd { expected: &'static str },
}
