//! Single-document YAML parsing.

use crate::{Error, Result};
use yaml_rust2::{Yaml, YamlLoader};

/// Parse YAML from a string, producing the first document's tree.
///
/// Multi-document input is accepted but only the first document is
/// returned; the registry loader only ever deals with one tree at a time.
///
/// # Example
///
/// ```rust
/// use confreg_yaml::parse;
///
/// let root = parse("timeout: 45").unwrap();
/// assert!(root.as_hash().is_some());
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is malformed or the input holds no
/// document at all (e.g. an empty string).
pub fn parse(content: &str) -> Result<Yaml> {
    let mut docs = YamlLoader::load_from_str(content)?;
    if docs.is_empty() {
        return Err(Error::EmptyDocument);
    }
    Ok(docs.swap_remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar() {
        let node = parse("hello").unwrap();
        assert_eq!(node.as_str(), Some("hello"));
    }

    #[test]
    fn test_parse_integer() {
        let node = parse("42").unwrap();
        assert_eq!(node.as_i64(), Some(42));
    }

    #[test]
    fn test_parse_sequence() {
        let node = parse("[1, 2, 3]").unwrap();
        let items = node.as_vec().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_i64(), Some(1));
    }

    #[test]
    fn test_parse_mapping_preserves_order() {
        let node = parse("b: 1\na: 2\nc: 3").unwrap();
        let keys: Vec<&str> = node
            .as_hash()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(parse(""), Err(Error::EmptyDocument)));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(parse("key: [unclosed"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_first_document_only() {
        let node = parse("one: 1\n---\ntwo: 2").unwrap();
        assert!(node.as_hash().unwrap().contains_key(&Yaml::String("one".into())));
    }
}
