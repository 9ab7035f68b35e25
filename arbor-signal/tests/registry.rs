use arbor_graph::{NodeGraph, NodeId};
use arbor_signal::{
    RegistryError, SignalError, SignalRegistry, Signaler, Slot, SlotHandle, SlotId,
    SlotRegistration, SlotResolver, assemble,
};

struct First;
struct Second;

impl Slot for First {
    fn invoke(
        &self,
        _signaler: &mut Signaler,
        _graph: &mut NodeGraph,
        _args: NodeId,
    ) -> Result<(), SignalError> {
        Ok(())
    }
}

impl Slot for Second {
    fn invoke(
        &self,
        _signaler: &mut Signaler,
        _graph: &mut NodeGraph,
        _args: NodeId,
    ) -> Result<(), SignalError> {
        Ok(())
    }
}

#[test]
fn lookup_finds_declared_names() {
    let registry = SignalRegistry::builder()
        .declare(SlotId::of::<First>(), ["io.read", "io.write"])
        .declare(SlotId::of::<Second>(), ["math.add"])
        .build()
        .unwrap();

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.lookup("io.read"), Some(SlotId::of::<First>()));
    assert_eq!(registry.lookup("math.add"), Some(SlotId::of::<Second>()));
    assert_eq!(registry.lookup("missing"), None);

    let mut names: Vec<_> = registry.names().collect();
    names.sort_unstable();
    assert_eq!(names, ["io.read", "io.write", "math.add"]);
}

#[test]
fn duplicate_names_fail_to_build() {
    let err = SignalRegistry::builder()
        .declare(SlotId::of::<First>(), ["foo.bar"])
        .declare(SlotId::of::<Second>(), ["foo.bar"])
        .build()
        .unwrap_err();

    match err {
        RegistryError::NameTaken { name, first, second } => {
            assert_eq!(name, "foo.bar");
            assert!(first.contains("First"));
            assert!(second.contains("Second"));
        }
        other => panic!("expected NameTaken, got {other:?}"),
    }
}

#[test]
fn empty_names_fail_to_build() {
    let err = SignalRegistry::builder()
        .declare(SlotId::of::<First>(), [""])
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistryError::EmptyName { .. }));
}

#[test]
fn assemble_wires_registry_and_resolver_together() {
    let (registry, resolver) = assemble([
        SlotRegistration::of::<First>(["unit.first"], || SlotHandle::sync(First)),
        SlotRegistration::of::<Second>(["unit.second"], || SlotHandle::sync(Second)),
    ])
    .unwrap();

    assert_eq!(registry.len(), 2);
    let id = registry.lookup("unit.first").unwrap();
    let handle = resolver.resolve(&id).unwrap();
    assert!(handle.as_sync().is_some());
    assert!(handle.as_async().is_none());

    // Identities not registered with the resolver stay unresolved.
    struct Unregistered;
    assert!(resolver.resolve(&SlotId::of::<Unregistered>()).is_none());
}

#[test]
fn assemble_propagates_validation_errors() {
    let err = assemble([
        SlotRegistration::of::<First>(["same"], || SlotHandle::sync(First)),
        SlotRegistration::of::<Second>(["same"], || SlotHandle::sync(Second)),
    ])
    .unwrap_err();
    assert!(matches!(err, RegistryError::NameTaken { .. }));
}
