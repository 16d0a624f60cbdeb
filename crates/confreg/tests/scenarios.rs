//! End-to-end scenarios: declaration, document loading, listeners, and
//! conflict handling working together.

use std::sync::{Arc, Mutex};

use confreg::{
    CollectingSink, ConfigRegistry, DiagnosticKind, IndexMap, RegistryError,
};

#[test]
fn declared_scalar_updates_from_document_and_notifies() {
    let registry = ConfigRegistry::new();
    let timeout = registry
        .declare("timeout", 30i64, "request timeout")
        .unwrap();

    let observed = Arc::new(Mutex::new(Vec::new()));
    let record = observed.clone();
    timeout.on_change(1, move |old, new| {
        record.lock().unwrap().push((*old, *new));
    });

    registry.load_from_str("timeout: 45").unwrap();

    assert_eq!(timeout.get(), 45);
    assert_eq!(*observed.lock().unwrap(), vec![(30, 45)]);
}

#[test]
fn declared_mapping_updates_from_document() {
    let registry = ConfigRegistry::new();
    let ports = registry
        .declare("ports", IndexMap::<String, i64>::new(), "service ports")
        .unwrap();

    registry
        .load_from_str("ports:\n  http: 80\n  https: 443")
        .unwrap();

    let mut expected = IndexMap::new();
    expected.insert("http".to_string(), 80);
    expected.insert("https".to_string(), 443);
    assert_eq!(ports.get(), expected);
}

#[test]
fn invalid_document_key_is_reported_and_ignored() {
    let sink = Arc::new(CollectingSink::new());
    let registry = ConfigRegistry::with_sink(sink.clone());
    let x = registry.declare("x", 1i64, "").unwrap();

    registry.load_from_str("Invalid-Name!: 1\nx: 2").unwrap();

    assert_eq!(x.get(), 2);
    let diags = sink.take();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::InvalidName);
}

#[test]
fn redeclaring_under_another_type_conflicts() {
    let sink = Arc::new(CollectingSink::new());
    let registry = ConfigRegistry::with_sink(sink.clone());

    registry.declare("x", 1i64, "").unwrap();
    let conflict = registry.declare("x", "a".to_string(), "");

    assert!(matches!(conflict, Err(RegistryError::TypeConflict { .. })));
    assert_eq!(sink.take()[0].kind, DiagnosticKind::TypeConflict);
    assert_eq!(registry.lookup::<i64>("x").unwrap().get(), 1);
}

#[test]
fn repeated_loads_fire_listeners_only_on_change() {
    let registry = ConfigRegistry::new();
    let level = registry
        .declare("log.level", "info".to_string(), "log severity")
        .unwrap();

    let fired = Arc::new(Mutex::new(0u32));
    let counter = fired.clone();
    level.on_change(0xc0ffee, move |_, _| {
        *counter.lock().unwrap() += 1;
    });

    registry.load_from_str("log:\n  level: debug").unwrap();
    registry.load_from_str("log:\n  level: debug").unwrap();

    assert_eq!(level.get(), "debug");
    assert_eq!(*fired.lock().unwrap(), 1);
}

#[test]
fn nested_container_variable_loads_uniformly() {
    let registry = ConfigRegistry::new();
    let routes = registry
        .declare(
            "routing.tables",
            IndexMap::<String, Vec<u16>>::new(),
            "per-table port lists",
        )
        .unwrap();

    registry
        .load_from_str("routing:\n  tables:\n    edge: [80, 443]\n    internal: [9090]")
        .unwrap();

    let tables = routes.get();
    assert_eq!(tables["edge"], vec![80, 443]);
    assert_eq!(tables["internal"], vec![9090]);
}

#[test]
fn serialize_reflects_loaded_state() {
    let registry = ConfigRegistry::new();
    registry
        .declare("banner", "hello".to_string(), "greeting text")
        .unwrap();
    registry.load_from_str("banner: welcome").unwrap();

    let base = registry.lookup_base("banner").unwrap();
    assert_eq!(base.to_yaml_text(), "welcome");
}

#[test]
fn loading_is_safe_against_concurrent_readers() {
    let registry = Arc::new(ConfigRegistry::new());
    let counter = registry.declare("worker.count", 1u32, "").unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let counter = Arc::clone(&counter);
            std::thread::spawn(move || {
                for _ in 0..1000 {
                    let v = counter.get();
                    assert!(v == 1 || v == 8);
                }
            })
        })
        .collect();

    let writer = {
        let registry = Arc::clone(&registry);
        std::thread::spawn(move || {
            registry.load_from_str("worker:\n  count: 8").unwrap();
        })
    };

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(counter.get(), 8);
}
