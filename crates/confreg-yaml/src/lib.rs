//! # confreg-yaml
//!
//! A thin, read-only view over parsed YAML documents for the confreg
//! configuration registry.
//!
//! The registry never walks raw text itself: it consumes a `yaml-rust2::Yaml`
//! tree and needs exactly three things from it — the kind of a node (scalar,
//! sequence, or mapping), the lexical text of a scalar, and a way to turn a
//! non-scalar subtree back into YAML text so a single codec path can handle
//! both shapes. This crate provides those operations plus single-document
//! parsing.
//!
//! ## Example
//!
//! ```rust
//! use confreg_yaml::{parse, NodeKind, kind};
//!
//! let root = parse("ports:\n  http: 80").unwrap();
//! assert_eq!(kind(&root), NodeKind::Mapping);
//! ```

mod error;
mod node;
mod parser;

pub use error::{Error, Result};
pub use node::{NodeKind, emit, kind, node_text, scalar_text};
pub use parser::parse;

// Re-exported so downstream crates don't need a direct yaml-rust2 dependency
// just to hold document trees.
pub use yaml_rust2::Yaml;
