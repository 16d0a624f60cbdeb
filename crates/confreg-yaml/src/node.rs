//! Node classification and text extraction for document trees.

use crate::Result;
use yaml_rust2::{Yaml, YamlEmitter};

/// The shape of a document node, as seen by the registry loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A leaf value (string, number, boolean, or null).
    Scalar,
    /// An ordered list of nodes.
    Sequence,
    /// An ordered list of key/value pairs with unique keys.
    Mapping,
}

/// Classify a node.
pub fn kind(node: &Yaml) -> NodeKind {
    match node {
        Yaml::Array(_) => NodeKind::Sequence,
        Yaml::Hash(_) => NodeKind::Mapping,
        _ => NodeKind::Scalar,
    }
}

/// Lexical text of a scalar node, or `None` for sequences and mappings.
///
/// Strings pass through unchanged; numbers and booleans use their YAML
/// lexical form; null becomes `~`.
pub fn scalar_text(node: &Yaml) -> Option<String> {
    match node {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Real(r) => Some(r.clone()),
        Yaml::Boolean(b) => Some(b.to_string()),
        Yaml::Null => Some("~".to_string()),
        _ => None,
    }
}

/// Serialize any node back to YAML text.
///
/// # Errors
///
/// Returns an error if the emitter rejects the node (e.g. a `BadValue`
/// placeholder left behind by the parser).
pub fn emit(node: &Yaml) -> Result<String> {
    let mut out = String::new();
    let mut emitter = YamlEmitter::new(&mut out);
    emitter.dump(node)?;
    Ok(out)
}

/// Textual form of any node: scalars in lexical form, containers re-emitted
/// as YAML documents.
///
/// This is the single codec path used by the registry: a declared variable's
/// decoder always receives text, whether the document carried the value as a
/// scalar or as a nested structure.
///
/// # Errors
///
/// Returns an error if a non-scalar node cannot be emitted.
pub fn node_text(node: &Yaml) -> Result<String> {
    match scalar_text(node) {
        Some(text) => Ok(text),
        None => emit(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_kind_classification() {
        assert_eq!(kind(&parse("5").unwrap()), NodeKind::Scalar);
        assert_eq!(kind(&parse("[1]").unwrap()), NodeKind::Sequence);
        assert_eq!(kind(&parse("a: 1").unwrap()), NodeKind::Mapping);
    }

    #[test]
    fn test_scalar_text_forms() {
        assert_eq!(scalar_text(&Yaml::String("hi".into())).as_deref(), Some("hi"));
        assert_eq!(scalar_text(&Yaml::Integer(-3)).as_deref(), Some("-3"));
        assert_eq!(scalar_text(&Yaml::Boolean(true)).as_deref(), Some("true"));
        assert_eq!(scalar_text(&Yaml::Null).as_deref(), Some("~"));
        assert_eq!(scalar_text(&parse("[1]").unwrap()), None);
    }

    #[test]
    fn test_emit_round_trips_through_parse() {
        let original = parse("ports:\n  http: 80\n  https: 443").unwrap();
        let text = emit(&original).unwrap();
        let reparsed = parse(&text).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_node_text_scalar_is_lexical() {
        let node = parse("45").unwrap();
        assert_eq!(node_text(&node).unwrap(), "45");
    }

    #[test]
    fn test_node_text_sequence_is_parseable() {
        let node = parse("[10, 20]").unwrap();
        let text = node_text(&node).unwrap();
        let reparsed = parse(&text).unwrap();
        assert_eq!(reparsed.as_vec().unwrap().len(), 2);
    }
}
