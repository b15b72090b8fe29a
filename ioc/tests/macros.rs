//! Tests for the resolution macros `resolve!` and `resolve_from!`.

use robo_ioc::{global, resolve, resolve_from, Concrete, Container, Contract};
use std::sync::Arc;

// --- Test Fixtures ---

struct MacroTestService {
  value: i32,
}

struct UnregisteredService;

// --- Global Macro Tests ---

#[test]
fn test_resolve_global_by_type_and_name() {
  // Arrange
  global()
    .bind(Contract::of::<MacroTestService>())
    .unwrap()
    .to(Concrete::instance(MacroTestService { value: 42 }));
  global()
    .bind("macro_named")
    .unwrap()
    .to(Concrete::instance(MacroTestService { value: 43 }));

  // Act & Assert
  assert_eq!(resolve!(MacroTestService).value, 42);
  assert_eq!(resolve!(MacroTestService, "macro_named").value, 43);
}

#[test]
#[should_panic(expected = "Failed to resolve required component")]
fn test_resolve_global_panics_when_missing() {
  let _service = resolve!(UnregisteredService);
}

#[test]
#[should_panic(expected = "is not of type")]
fn test_resolve_panics_on_type_mismatch() {
  global()
    .bind("macro_mismatch")
    .unwrap()
    .to(Concrete::instance(String::from("not a number")));

  let _number = resolve!(u64, "macro_mismatch");
}

// --- Local Container Macro Tests ---

#[test]
fn test_resolve_from_local_container() {
  let container = Container::new();
  container
    .bind(Contract::of::<MacroTestService>())
    .unwrap()
    .to(Concrete::instance(MacroTestService { value: 7 }))
    .as_singleton();
  container
    .bind("local_named")
    .unwrap()
    .to(Concrete::factory(|(service,): (Arc<MacroTestService>,)| service.value * 2))
    .using([Contract::of::<MacroTestService>()]);

  let service = resolve_from!(container, MacroTestService);
  let doubled = resolve_from!(&container, i32, "local_named");

  assert_eq!(service.value, 7);
  assert_eq!(*doubled, 14);
}

#[test]
#[should_panic(expected = "Failed to resolve required component 'local_missing'")]
fn test_resolve_from_panics_when_missing() {
  let container = Container::new();
  let _missing = resolve_from!(container, String, "local_missing");
}
