use robo_ioc::{global, Concrete, Container};

// A function that configures bindings and runs some logic.
// By accepting a `&Container`, it can be tested with a controlled environment.
fn process_data(container: &Container) -> Result<String, robo_ioc::IocError> {
  // Bind a data source ONLY within this container.
  container
    .bind("data")?
    .to(Concrete::instance("test data".to_string()));

  let data = container.get::<String>("data")?;
  Ok(format!("Processed: {}", data.to_uppercase()))
}

fn main() -> Result<(), robo_ioc::IocError> {
  println!("--- Running with a local container ---");
  let test_container = Container::new();
  let result = process_data(&test_container)?;

  println!("Result: {}", result);
  assert_eq!(result, "Processed: TEST DATA");

  // The binding made in `test_container` must not exist in the global container.
  assert!(
    global().get::<String>("data").is_err(),
    "Binding should not have leaked into the global container!"
  );

  println!("\nVerified that the local container is isolated from the global one.");
  Ok(())
}
