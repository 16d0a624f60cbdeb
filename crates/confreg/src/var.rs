//! Typed configuration variables behind a type-erased handle.
//!
//! The registry stores every variable as an `Arc<dyn ConfigVarBase>`; the
//! typed [`ConfigVar<T>`] is recovered with a checked downcast guarded by
//! the stored [`TypeId`]. A failed downcast is an ordinary `None`, never
//! undefined behavior.

use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::codec::ConfigCodec;
use crate::diag::{Diagnostic, DiagnosticKind, DiagnosticSink};

/// Change listener, invoked with `(old, new)` before the new value commits.
pub type ChangeListener<T> = Arc<dyn Fn(&T, &T) + Send + Sync>;

/// Type-erased base of a configuration variable.
///
/// Exposes only what the registry and the document loader need: identity,
/// the text codec boundary, and the type tag for conflict detection.
pub trait ConfigVarBase: Send + Sync {
    /// Canonical (lowercase) variable name.
    fn name(&self) -> &str;

    /// Free-text description supplied at declaration.
    fn description(&self) -> &str;

    /// Stable discriminator of the stored value type.
    fn type_tag(&self) -> TypeId;

    /// Human-readable name of the stored value type, for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Render the current value to YAML text.
    ///
    /// A codec failure is reported as a `Serialization` diagnostic and
    /// yields an empty string; it never propagates.
    fn to_yaml_text(&self) -> String;

    /// Replace the current value from YAML text, firing change listeners.
    ///
    /// On decode failure the value is left untouched, a `Deserialization`
    /// diagnostic is reported, and `false` is returned.
    fn from_yaml_text(&self, text: &str) -> bool;

    /// Upcast used by the registry's checked downcast.
    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// Value plus listener table, guarded together so a listener-fire/commit
/// pair is one critical section.
struct VarState<T> {
    value: T,
    listeners: BTreeMap<u64, ChangeListener<T>>,
}

/// A declared configuration variable of type `T`.
///
/// Handles are shared (`Arc`) between the registry and every declaration
/// site; the value itself lives behind a mutex. Listeners fire on the
/// thread that calls [`set`](ConfigVar::set), inside the critical section,
/// so callbacks must not touch the same variable again.
pub struct ConfigVar<T> {
    name: String,
    description: String,
    sink: Arc<dyn DiagnosticSink>,
    state: Mutex<VarState<T>>,
}

impl<T> ConfigVar<T>
where
    T: ConfigCodec + Clone + PartialEq + Send + Sync + 'static,
{
    pub(crate) fn new(
        name: &str,
        default: T,
        description: &str,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            description: description.to_string(),
            sink,
            state: Mutex::new(VarState {
                value: default,
                listeners: BTreeMap::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, VarState<T>> {
        // A panicking listener poisons the mutex; the state itself is still
        // consistent (the commit never happened), so recover the guard.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Canonical variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description supplied at first declaration.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Clone out the current value.
    pub fn get(&self) -> T {
        self.state().value.clone()
    }

    /// Replace the current value.
    ///
    /// Setting a value equal to the current one is a no-op and fires no
    /// listeners. Otherwise every registered listener runs with
    /// `(old, new)`, in ascending id order, before the new value commits.
    /// A panic in a listener propagates to the caller and aborts the
    /// commit.
    pub fn set(&self, value: T) {
        let mut state = self.state();
        if state.value == value {
            return;
        }
        for listener in state.listeners.values() {
            listener(&state.value, &value);
        }
        state.value = value;
    }

    /// Register a change listener under a caller-chosen id.
    ///
    /// Ids must be collision-free per variable (a hash of a stable string
    /// works well); re-registering an existing id overwrites its callback.
    pub fn on_change(&self, id: u64, listener: impl Fn(&T, &T) + Send + Sync + 'static) {
        self.state().listeners.insert(id, Arc::new(listener));
    }

    /// Remove the listener registered under `id`, if any.
    pub fn remove_listener(&self, id: u64) {
        self.state().listeners.remove(&id);
    }

    /// Fetch the listener registered under `id`, if any.
    pub fn listener(&self, id: u64) -> Option<ChangeListener<T>> {
        self.state().listeners.get(&id).cloned()
    }

    /// Drop all registered listeners.
    pub fn clear_listeners(&self) {
        self.state().listeners.clear();
    }
}

impl<T> ConfigVarBase for ConfigVar<T>
where
    T: ConfigCodec + Clone + PartialEq + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn type_tag(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn to_yaml_text(&self) -> String {
        match self.get().encode() {
            Ok(text) => text,
            Err(err) => {
                self.sink.report(Diagnostic::error(
                    DiagnosticKind::Serialization,
                    format!(
                        "config {:?}: cannot encode value of type {}: {err}",
                        self.name,
                        type_name::<T>(),
                    ),
                ));
                String::new()
            }
        }
    }

    fn from_yaml_text(&self, text: &str) -> bool {
        match T::decode(text) {
            Ok(value) => {
                self.set(value);
                true
            }
            Err(err) => {
                self.sink.report(Diagnostic::error(
                    DiagnosticKind::Deserialization,
                    format!(
                        "config {:?}: cannot decode {text:?} as {}: {err}",
                        self.name,
                        type_name::<T>(),
                    ),
                ));
                false
            }
        }
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
