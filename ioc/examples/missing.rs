use robo_ioc::{global, resolve, IocError};
use std::panic;

struct UnregisteredService;

fn main() {
  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a component that was never bound...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve!(UnregisteredService);
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `get()` method ---
  println!("\nNow, attempting to resolve using the fallible `get()` method...");

  match global().get::<UnregisteredService>("unregistered") {
    Ok(_) => panic!("Should not have found the component!"),
    Err(IocError::ComponentNotFound { name }) => {
      println!("Correctly received ComponentNotFound for '{}'.", name)
    }
    Err(other) => panic!("Unexpected error: {}", other),
  }
}
