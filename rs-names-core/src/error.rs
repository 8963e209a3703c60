use thiserror::Error;

/// Errors raised by encoders, models and generators.
///
/// Lookup misses get their own variants so callers can tell a bad request
/// (`InvalidInput`, `UnknownCategory`) apart from a broken model
/// (`ModelInference`, `ModelShape`).
#[derive(Debug, Error)]
pub enum NameError {
	#[error("invalid input: {0}")]
	InvalidInput(String),
	#[error("unknown symbol '{0}'")]
	UnknownSymbol(char),
	#[error("unknown index {0}")]
	UnknownIndex(usize),
	#[error("unknown category '{0}'")]
	UnknownCategory(String),
	#[error("model inference failed: {0}")]
	ModelInference(String),
	#[error("model shape mismatch: expected {expected}, found {found}")]
	ModelShape { expected: usize, found: usize },
	#[error("corpus error: {0}")]
	Corpus(String),
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("model decoding error: {0}")]
	Decode(#[from] postcard::Error),
}

impl NameError {
	/// Returns `true` when the error was caused by caller input rather than
	/// by the model or the environment.
	pub fn is_client_error(&self) -> bool {
		matches!(self, NameError::InvalidInput(_) | NameError::UnknownCategory(_))
	}
}

pub type Result<T> = std::result::Result<T, NameError>;
