//! Error types for YAML parsing and emission.

use thiserror::Error;

/// Result type alias for confreg-yaml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or emitting YAML.
#[derive(Debug, Error)]
pub enum Error {
    /// YAML syntax error from the underlying scanner.
    #[error("YAML parse error: {0}")]
    Parse(#[from] yaml_rust2::ScanError),

    /// The emitter failed to serialize a node back to text.
    #[error("YAML emit error: {0:?}")]
    Emit(yaml_rust2::EmitError),

    /// The input contained no YAML document at all.
    #[error("input contains no YAML document")]
    EmptyDocument,
}

impl From<yaml_rust2::EmitError> for Error {
    fn from(err: yaml_rust2::EmitError) -> Self {
        Error::Emit(err)
    }
}
