//! Populating the registry from a parsed document tree.
//!
//! The loader flattens a YAML tree into dotted-path entries
//! (`server.timeout`, `logging.appenders`, ...), then feeds each entry
//! with a declared variable through the variable's own text codec. Keys
//! without a declared variable are expected and skipped silently; invalid
//! names prune their subtree with a diagnostic instead of aborting the
//! load.

use confreg_yaml::{NodeKind, Yaml, kind};

use crate::diag::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::registry::{ConfigRegistry, is_valid_name};

/// Collect `(dotted-path, node)` pairs for every node reachable through
/// mapping keys. The root is recorded under the empty path (filtered out
/// later, since the empty name can never match a declared variable).
fn flatten<'a>(
    prefix: String,
    node: &'a Yaml,
    out: &mut Vec<(String, &'a Yaml)>,
    sink: &dyn DiagnosticSink,
) {
    if !prefix.is_empty() && !is_valid_name(&prefix) {
        sink.report(Diagnostic::error(
            DiagnosticKind::InvalidName,
            format!("invalid config path {prefix:?}, skipping subtree"),
        ));
        return;
    }

    out.push((prefix.clone(), node));

    // Sequences and scalars are leaves; only mapping entries extend paths.
    if kind(node) != NodeKind::Mapping {
        return;
    }
    let Some(entries) = node.as_hash() else {
        return;
    };
    for (key, child) in entries {
        let Some(key) = confreg_yaml::scalar_text(key) else {
            sink.report(Diagnostic::error(
                DiagnosticKind::InvalidName,
                format!("non-scalar mapping key under {prefix:?}, skipping subtree"),
            ));
            continue;
        };
        let child_prefix = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}.{key}")
        };
        flatten(child_prefix, child, out, sink);
    }
}

impl ConfigRegistry {
    /// Populate declared variables from a parsed document tree.
    ///
    /// Each flattened path is lowercased and looked up; scalar nodes feed
    /// the variable's decoder directly, container nodes are re-emitted as
    /// YAML text first so one codec path handles both shapes. Safe to call
    /// while other threads look up or read variables; diagnostics cover
    /// every skipped entry, and one bad entry never stops the rest.
    pub fn load_from_yaml(&self, root: &Yaml) {
        let mut entries = Vec::new();
        flatten(String::new(), root, &mut entries, self.sink().as_ref());

        for (path, node) in entries {
            if path.is_empty() {
                continue;
            }
            let key = path.to_ascii_lowercase();
            let Some(var) = self.lookup_base(&key) else {
                continue;
            };
            match confreg_yaml::node_text(node) {
                Ok(text) => {
                    var.from_yaml_text(&text);
                }
                Err(err) => {
                    self.sink().report(Diagnostic::error(
                        DiagnosticKind::Deserialization,
                        format!("config {key:?}: cannot stringify document node: {err}"),
                    ));
                }
            }
        }
    }

    /// Parse YAML text and load it.
    ///
    /// # Errors
    ///
    /// Returns the parse error when `content` is not valid YAML; load-time
    /// failures on individual entries go to the diagnostic sink instead.
    pub fn load_from_str(&self, content: &str) -> Result<(), confreg_yaml::Error> {
        let root = confreg_yaml::parse(content)?;
        self.load_from_yaml(&root);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::CollectingSink;
    use std::sync::Arc;

    fn flattened(content: &str) -> (Vec<String>, Vec<Diagnostic>) {
        let sink = CollectingSink::new();
        let root = confreg_yaml::parse(content).unwrap();
        let mut out = Vec::new();
        flatten(String::new(), &root, &mut out, &sink);
        (out.into_iter().map(|(path, _)| path).collect(), sink.take())
    }

    #[test]
    fn test_flatten_nested_mappings() {
        let (paths, diags) = flattened("server:\n  timeout: 45\n  port: 8080");
        assert_eq!(paths, vec!["", "server", "server.timeout", "server.port"]);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_flatten_sequences_are_leaves() {
        let (paths, diags) = flattened("hosts:\n  - a\n  - b");
        assert_eq!(paths, vec!["", "hosts"]);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_flatten_prunes_invalid_names() {
        let (paths, diags) = flattened("Bad-Key:\n  child: 1\ngood: 2");
        assert_eq!(paths, vec!["", "good"]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::InvalidName);
    }

    #[test]
    fn test_load_scalar() {
        let sink = Arc::new(CollectingSink::new());
        let registry = ConfigRegistry::with_sink(sink.clone());
        let timeout = registry.declare("server.timeout", 30i64, "").unwrap();

        registry.load_from_str("server:\n  timeout: 45").unwrap();
        assert_eq!(timeout.get(), 45);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_load_unknown_keys_skipped_silently() {
        let sink = Arc::new(CollectingSink::new());
        let registry = ConfigRegistry::with_sink(sink.clone());
        let port = registry.declare("port", 80u16, "").unwrap();

        registry
            .load_from_str("port: 81\nunrelated:\n  nested: value")
            .unwrap();
        assert_eq!(port.get(), 81);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_load_container_value() {
        let registry = ConfigRegistry::new();
        let hosts = registry
            .declare("cluster.hosts", Vec::<String>::new(), "")
            .unwrap();

        registry
            .load_from_str("cluster:\n  hosts:\n    - alpha\n    - beta")
            .unwrap();
        assert_eq!(hosts.get(), vec!["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn test_load_bad_value_reports_and_continues() {
        let sink = Arc::new(CollectingSink::new());
        let registry = ConfigRegistry::with_sink(sink.clone());
        let a = registry.declare("a", 1i64, "").unwrap();
        let b = registry.declare("b", 2i64, "").unwrap();

        registry.load_from_str("a: not-a-number\nb: 20").unwrap();
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 20);

        let entries = sink.take();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, DiagnosticKind::Deserialization);
    }

    #[test]
    fn test_load_from_str_propagates_parse_errors() {
        let registry = ConfigRegistry::new();
        assert!(registry.load_from_str("key: [unclosed").is_err());
    }
}
