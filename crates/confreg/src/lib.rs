//! # confreg
//!
//! A process-wide, strongly-typed configuration registry.
//!
//! Subsystems declare named variables with a default value and a
//! description; a loader later populates them from a parsed YAML document,
//! converting text into the declared type and firing per-variable change
//! listeners. Hundreds of independently-declared settings stay consistent
//! under one lookup-by-name contract with compile-time type safety.
//!
//! # Key pieces
//!
//! - [`ConfigCodec`]: per-type text codec, compositional over sequences,
//!   sets, and string-keyed mappings nested to arbitrary depth
//! - [`ConfigVar`] / [`ConfigVarBase`]: typed variable behind a
//!   type-erased handle, with a keyed change-listener table
//! - [`ConfigRegistry`]: the explicit, shareable registry object —
//!   construct one per process and pass it around
//! - [`DiagnosticSink`]: where non-fatal failures go (default: `tracing`)
//!
//! # Example
//!
//! ```rust
//! use confreg::ConfigRegistry;
//!
//! let registry = ConfigRegistry::new();
//! let timeout = registry
//!     .declare("server.timeout", 30i64, "request timeout in seconds")
//!     .unwrap();
//! timeout.on_change(1, |old, new| println!("timeout: {old} -> {new}"));
//!
//! registry.load_from_str("server:\n  timeout: 45").unwrap();
//! assert_eq!(timeout.get(), 45);
//! ```

mod codec;
mod diag;
mod error;
mod loader;
mod registry;
mod var;

pub use codec::ConfigCodec;
pub use diag::{
    CollectingSink,
    Diagnostic,
    DiagnosticKind,
    DiagnosticSink,
    Severity,
    TracingSink,
};
pub use error::{ConversionError, RegistryError};
pub use registry::ConfigRegistry;
pub use var::{ChangeListener, ConfigVar, ConfigVarBase};

// Re-exports for declaring mapping-typed variables and passing document
// trees without direct dependencies on the underlying crates.
pub use confreg_yaml::Yaml;
pub use indexmap::IndexMap;
