//! Tests for graph-local sharing through `IdentityMap`.

use once_cell::sync::OnceCell;
use robo_ioc::{
  Component, Concrete, Construct, Container, ContainerConfig, CyclePolicy, IdentityMap, Inject,
  IocError,
};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// --- Test Fixtures ---

struct Shared {
  id: usize,
}

struct Left {
  shared: Arc<Shared>,
}

struct Right {
  shared: Arc<Shared>,
}

struct Pair {
  left: Arc<Left>,
  right: Arc<Right>,
}

fn graph_container() -> Container {
  static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

  let container = Container::new();
  container.bind("z").unwrap().to(Concrete::factory(|_: ()| Shared {
    id: NEXT_ID.fetch_add(1, Ordering::SeqCst),
  }));
  container
    .bind("left")
    .unwrap()
    .to(Concrete::factory(|(shared,): (Arc<Shared>,)| Left { shared }))
    .using(["z"]);
  container
    .bind("right")
    .unwrap()
    .to(Concrete::factory(|(shared,): (Arc<Shared>,)| Right { shared }))
    .using(["z"]);
  container
    .bind("pair")
    .unwrap()
    .to(Concrete::factory(|(left, right): (Arc<Left>, Arc<Right>)| Pair { left, right }))
    .using(["left", "right"]);
  container
}

fn expect<T: Send + Sync + 'static>(property: &str, value: Component) -> robo_ioc::Result<Arc<T>> {
  value.downcast::<T>().map_err(|_| IocError::TypeMismatch {
    name: property.to_owned(),
    expected: std::any::type_name::<T>(),
  })
}

struct Parent {
  child: OnceCell<Arc<Child>>,
}

struct Child {
  parent: OnceCell<Arc<Parent>>,
}

impl Inject for Parent {
  fn inject(&self, property: &str, value: Component) -> robo_ioc::Result<()> {
    let _ = self.child.set(expect::<Child>(property, value)?);
    Ok(())
  }
}

impl Construct for Parent {
  type Args = ();

  fn construct(_: ()) -> Self {
    Parent {
      child: OnceCell::new(),
    }
  }
}

impl Inject for Child {
  fn inject(&self, property: &str, value: Component) -> robo_ioc::Result<()> {
    let _ = self.parent.set(expect::<Parent>(property, value)?);
    Ok(())
  }
}

impl Construct for Child {
  type Args = ();

  fn construct(_: ()) -> Self {
    Child {
      parent: OnceCell::new(),
    }
  }
}

fn cyclic_container(config: ContainerConfig) -> Container {
  let container = Container::with_config(config);
  container
    .bind("parent")
    .unwrap()
    .to(Concrete::class::<Parent>())
    .set([("child", "child")]);
  container
    .bind("child")
    .unwrap()
    .to(Concrete::class::<Child>())
    .set([("parent", "parent")]);
  container
}

// --- Sharing ---

#[test]
fn test_declared_name_is_shared_across_the_graph() {
  // Arrange
  let container = graph_container();
  let mut identity_map = IdentityMap::new();
  identity_map.declare("z");

  // Act
  let pair = container.get_with::<Pair>("pair", &mut identity_map).unwrap();

  // Assert
  assert!(Arc::ptr_eq(&pair.left.shared, &pair.right.shared));
  let recorded = identity_map.get_as::<Shared>("z").unwrap();
  assert!(Arc::ptr_eq(&recorded, &pair.left.shared));
}

#[test]
fn test_without_identity_map_instances_differ() {
  let container = graph_container();

  let pair = container.get::<Pair>("pair").unwrap();

  assert!(!Arc::ptr_eq(&pair.left.shared, &pair.right.shared));
  assert_ne!(pair.left.shared.id, pair.right.shared.id);
}

#[test]
fn test_undeclared_names_are_not_recorded() {
  let container = graph_container();
  let mut identity_map = IdentityMap::new();

  let pair = container.get_with::<Pair>("pair", &mut identity_map).unwrap();

  assert!(!Arc::ptr_eq(&pair.left.shared, &pair.right.shared));
  assert!(identity_map.is_empty());
}

#[test]
fn test_recording_all_shares_every_component() {
  let container = graph_container();
  let mut identity_map = IdentityMap::recording_all();

  let pair = container.get_with::<Pair>("pair", &mut identity_map).unwrap();

  assert!(Arc::ptr_eq(&pair.left.shared, &pair.right.shared));
  for name in ["z", "left", "right", "pair"] {
    assert!(identity_map.get(name).is_some(), "{} was not recorded", name);
  }
}

#[test]
fn test_seeded_instance_is_used_without_building() {
  // Arrange
  let container = graph_container();
  let mut identity_map = IdentityMap::new();
  identity_map.insert("z", Arc::new(Shared { id: 999 }));

  // Act
  let left = container.get_with::<Left>("left", &mut identity_map).unwrap();

  // Assert
  assert_eq!(left.shared.id, 999);
  let recorded = identity_map.get_as::<Shared>("z").unwrap();
  assert!(Arc::ptr_eq(&recorded, &left.shared));
}

#[test]
fn test_declaring_twice_keeps_a_single_key() {
  let mut identity_map = IdentityMap::new();
  identity_map.declare("a").declare("a").declare("b");

  assert_eq!(identity_map.len(), 2);
  assert!(identity_map.is_declared("a"));
  assert!(identity_map.get("a").is_none());
}

// --- Cycles ---

#[test]
fn test_declared_names_break_property_cycles() {
  // Arrange
  let container = cyclic_container(ContainerConfig::default());
  let mut identity_map = IdentityMap::new();
  identity_map.declare("parent").declare("child");

  // Act
  let parent = container.get_with::<Parent>("parent", &mut identity_map).unwrap();

  // Assert
  let child = parent.child.get().unwrap();
  assert!(Arc::ptr_eq(child.parent.get().unwrap(), &parent));
}

#[test]
fn test_detect_policy_still_honours_the_identity_map() {
  let container = cyclic_container(ContainerConfig::new().cycle_policy(CyclePolicy::Detect));
  let mut identity_map = IdentityMap::new();
  identity_map.declare("parent");

  let parent = container.get_with::<Parent>("parent", &mut identity_map).unwrap();

  let child = parent.child.get().unwrap();
  assert!(Arc::ptr_eq(child.parent.get().unwrap(), &parent));
}

#[test]
fn test_detect_policy_reports_an_unguarded_property_cycle() {
  let container = cyclic_container(ContainerConfig::new().cycle_policy(CyclePolicy::Detect));

  assert_eq!(
    container.resolve("parent").unwrap_err(),
    IocError::CircularDependency {
      name: "parent".to_owned()
    }
  );
}

#[test]
fn test_failed_injection_leaves_declared_entry_unbuilt() {
  // Arrange
  let container = Container::new();
  container
    .bind("parent")
    .unwrap()
    .to(Concrete::class::<Parent>())
    .set([("child", "missing")]);
  let mut identity_map = IdentityMap::new();
  identity_map.declare("parent");

  // Act
  let result = container.resolve_with("parent", &mut identity_map);

  // Assert
  assert_eq!(
    result.unwrap_err(),
    IocError::ComponentNotFound {
      name: "missing".to_owned()
    }
  );
  assert!(identity_map.is_declared("parent"));
  assert!(identity_map.get("parent").is_none());
}

#[test]
fn test_failed_injection_is_not_recorded_when_recording_all() {
  let container = Container::new();
  container
    .bind("parent")
    .unwrap()
    .to(Concrete::class::<Parent>())
    .set([("child", "missing")]);
  let mut identity_map = IdentityMap::recording_all();
  identity_map.declare("z");

  assert!(container.resolve_with("parent", &mut identity_map).is_err());

  assert!(!identity_map.is_declared("parent"));
  assert_eq!(identity_map.len(), 1);
}
