//! Error types for the configuration registry.

use thiserror::Error;

/// Errors produced while converting between YAML text and typed values.
///
/// These never cross the variable-handle boundary: a failing decode or
/// encode is reported to the diagnostic sink and the operation degrades
/// (value untouched, or empty output text).
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Malformed or out-of-range text for a scalar target type.
    #[error("cannot parse {text:?} as {target}")]
    Scalar { target: &'static str, text: String },

    /// The text parsed to a document of the wrong shape.
    #[error("expected a YAML {expected}, got: {text}")]
    Shape { expected: &'static str, text: String },

    /// A mapping key was itself a sequence or mapping.
    #[error("mapping key is not a scalar")]
    NonScalarKey,

    /// The underlying document could not be parsed or emitted.
    #[error(transparent)]
    Yaml(#[from] confreg_yaml::Error),
}

/// Errors returned by [`ConfigRegistry::declare`](crate::ConfigRegistry::declare).
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The declaration name contains characters outside `[a-z0-9._]`.
    ///
    /// This is the one hard failure of the registry: a programmatic
    /// declaration under an invalid name is a precondition violation.
    #[error("invalid config name {name:?} (allowed characters: [a-z0-9._])")]
    InvalidName { name: String },

    /// The name is already declared under a different value type.
    ///
    /// Non-fatal: the existing variable and its value are untouched.
    #[error("config {name:?} already declared as {existing}, requested {requested}")]
    TypeConflict {
        name: String,
        existing: &'static str,
        requested: &'static str,
    },
}
