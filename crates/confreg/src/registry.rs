//! The variable registry: lookup-or-create by canonical name.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::codec::ConfigCodec;
use crate::diag::{Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
use crate::error::RegistryError;
use crate::var::{ConfigVar, ConfigVarBase};

/// True when `name` is a valid canonical variable name: non-empty and
/// restricted to `[a-z0-9._]`.
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '_')
}

/// Registry of configuration variables, keyed by canonical name.
///
/// One registry is constructed per process and shared (by reference or
/// `Arc`) with every subsystem that declares variables; there is no hidden
/// global instance. All operations are safe to call from multiple threads:
/// declaration takes the write lock, so two threads racing to declare the
/// same new name always end up sharing one handle.
pub struct ConfigRegistry {
    sink: Arc<dyn DiagnosticSink>,
    vars: RwLock<HashMap<String, Arc<dyn ConfigVarBase>>>,
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigRegistry {
    /// Create a registry that reports diagnostics through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink::new()))
    }

    /// Create a registry reporting diagnostics to a custom sink.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            sink,
            vars: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) fn sink(&self) -> &Arc<dyn DiagnosticSink> {
        &self.sink
    }

    /// Declare a variable, or fetch the existing one under this name.
    ///
    /// The name is lowercased before lookup. If the name is already
    /// declared with value type `T`, the existing handle is returned and
    /// `default`/`description` are ignored (first declaration wins). If it
    /// is declared under a different type, a `TypeConflict` diagnostic is
    /// emitted and `Err(RegistryError::TypeConflict)` returned; the stored
    /// variable is untouched.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidName`] if a fresh name fails the
    /// `[a-z0-9._]+` policy — the caller's precondition violation —
    /// or [`RegistryError::TypeConflict`] as above.
    pub fn declare<T>(
        &self,
        name: &str,
        default: T,
        description: &str,
    ) -> Result<Arc<ConfigVar<T>>, RegistryError>
    where
        T: ConfigCodec + Clone + PartialEq + Send + Sync + 'static,
    {
        let key = name.to_ascii_lowercase();
        let mut vars = self.vars.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = vars.get(&key) {
            return match Arc::clone(existing).as_any_arc().downcast::<ConfigVar<T>>() {
                Ok(var) => Ok(var),
                Err(_) => {
                    self.sink.report(Diagnostic::error(
                        DiagnosticKind::TypeConflict,
                        format!(
                            "config {key:?} already declared as {} (current value: {}), cannot redeclare as {}",
                            existing.type_name(),
                            existing.to_yaml_text(),
                            std::any::type_name::<T>(),
                        ),
                    ));
                    Err(RegistryError::TypeConflict {
                        name: key,
                        existing: existing.type_name(),
                        requested: std::any::type_name::<T>(),
                    })
                }
            };
        }

        if !is_valid_name(&key) {
            self.sink.report(Diagnostic::error(
                DiagnosticKind::InvalidName,
                format!("invalid config name {key:?}"),
            ));
            return Err(RegistryError::InvalidName { name: key });
        }

        let var = Arc::new(ConfigVar::new(
            &key,
            default,
            description,
            Arc::clone(&self.sink),
        ));
        vars.insert(key, Arc::clone(&var) as Arc<dyn ConfigVarBase>);
        Ok(var)
    }

    /// Fetch an existing variable of type `T`, or `None`.
    ///
    /// Never creates, never reports: a missing name and a type mismatch
    /// both come back as `None`.
    pub fn lookup<T>(&self, name: &str) -> Option<Arc<ConfigVar<T>>>
    where
        T: ConfigCodec + Clone + PartialEq + Send + Sync + 'static,
    {
        let key = name.to_ascii_lowercase();
        let vars = self.vars.read().unwrap_or_else(PoisonError::into_inner);
        let existing = Arc::clone(vars.get(&key)?);
        existing.as_any_arc().downcast::<ConfigVar<T>>().ok()
    }

    /// Fetch an existing variable as its type-erased base handle.
    pub fn lookup_base(&self, name: &str) -> Option<Arc<dyn ConfigVarBase>> {
        let key = name.to_ascii_lowercase();
        self.vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }
}
