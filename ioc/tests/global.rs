//! Tests for the process-wide default container.
//!
//! Every test here is `#[serial]` because some of them replace the global
//! container.

use robo_ioc::{
  bind, get, get_with, global, init_global, reset_global, resolve, resolve_with, value, Concrete,
  ContainerConfig, CyclePolicy, IdentityMap, IocError,
};
use serial_test::serial;
use std::sync::Arc;

#[test]
#[serial]
fn test_free_functions_delegate_to_the_global_container() {
  // Arrange
  bind("global_base").unwrap().to(Concrete::instance(20_u32));
  bind("global_sum")
    .unwrap()
    .to(Concrete::factory(|(base, extra): (Arc<u32>, Arc<u32>)| *base + *extra))
    .using([robo_ioc::Contract::from("global_base"), value(1_u32).into()]);

  // Act
  let sum = get::<u32>("global_sum").unwrap();
  let raw = resolve("global_base").unwrap();

  // Assert
  assert_eq!(*sum, 21);
  assert_eq!(*raw.downcast::<u32>().unwrap(), 20);
  assert!(global().contains("global_sum"));
}

#[test]
#[serial]
fn test_global_resolve_with_identity_map() {
  bind("global_token")
    .unwrap()
    .to(Concrete::factory(|_: ()| String::from("token")));
  let mut identity_map = IdentityMap::recording_all();

  let first = resolve_with("global_token", &mut identity_map).unwrap();
  let second = resolve_with("global_token", &mut identity_map).unwrap();

  assert!(Arc::ptr_eq(&first, &second));
}

#[test]
#[serial]
fn test_global_get_with_downcasts_through_the_identity_map() {
  bind("global_counter")
    .unwrap()
    .to(Concrete::factory(|_: ()| vec![1_u8, 2, 3]));
  let mut identity_map = IdentityMap::new();
  identity_map.declare("global_counter");

  let first = get_with::<Vec<u8>>("global_counter", &mut identity_map).unwrap();
  let second = get_with::<Vec<u8>>("global_counter", &mut identity_map).unwrap();

  assert_eq!(*first, vec![1, 2, 3]);
  assert!(Arc::ptr_eq(&first, &second));
}

#[test]
#[serial]
fn test_reset_global_drops_bindings() {
  // Arrange
  bind("global_reset_me").unwrap().to(Concrete::instance(1_u8));
  let old_handle = global();

  // Act
  reset_global();

  // Assert
  assert_eq!(
    resolve("global_reset_me").unwrap_err(),
    IocError::ComponentNotFound {
      name: "global_reset_me".to_owned()
    }
  );
  assert!(global().is_empty());
  // Handles taken earlier keep the container they were created from.
  assert_eq!(*old_handle.get::<u8>("global_reset_me").unwrap(), 1);
}

#[test]
#[serial]
fn test_init_global_applies_the_config() {
  let handle = init_global(ContainerConfig::new().cycle_policy(CyclePolicy::Detect));
  assert_eq!(global().config().cycle_policy, CyclePolicy::Detect);

  bind("global_loop")
    .unwrap()
    .to(Concrete::factory(|(_me,): (Arc<u8>,)| 0_u8))
    .using(["global_loop"]);

  assert_eq!(
    handle.resolve("global_loop").unwrap_err(),
    IocError::CircularDependency {
      name: "global_loop".to_owned()
    }
  );

  reset_global();
  assert_eq!(global().config().cycle_policy, CyclePolicy::IdentityMap);
}
