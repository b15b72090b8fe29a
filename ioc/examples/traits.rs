use once_cell::sync::OnceCell;
use robo_ioc::{Component, Concrete, Construct, Container, Contract, IdentityMap, Inject, IocError};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger {
  prefix: Arc<String>,
}

impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[{}]: {}", self.prefix, message);
  }
}

// 3. A service that receives the logger as a property after construction.
struct ReportService {
  logger: OnceCell<Arc<Arc<dyn Logger>>>,
}

impl Inject for ReportService {
  fn inject(&self, property: &str, value: Component) -> Result<(), IocError> {
    let logger = value
      .downcast::<Arc<dyn Logger>>()
      .map_err(|_| IocError::TypeMismatch {
        name: property.to_owned(),
        expected: "Arc<dyn Logger>",
      })?;
    let _ = self.logger.set(logger);
    Ok(())
  }
}

impl Construct for ReportService {
  type Args = ();

  fn construct(_: ()) -> Self {
    ReportService {
      logger: OnceCell::new(),
    }
  }
}

impl ReportService {
  fn generate_report(&self) {
    if let Some(logger) = self.logger.get() {
      logger.log("Starting report generation.");
      logger.log("Finished report generation.");
    }
  }
}

fn main() -> Result<(), IocError> {
  let container = Container::new();

  // --- Binding ---
  container.bind("log_prefix")?.to(Concrete::instance(String::from("CONSOLE LOG")));

  // The logger is stored as `Arc<dyn Logger>` so consumers never see the concrete type.
  container
    .bind("logger")?
    .to(Concrete::factory(|(prefix,): (Arc<String>,)| {
      Arc::new(ConsoleLogger { prefix }) as Arc<dyn Logger>
    }))
    .using(["log_prefix"]);

  container
    .bind(Contract::of::<ReportService>())?
    .to(Concrete::class::<ReportService>())
    .set([("logger", "logger")]);

  // --- Resolution and Usage ---
  // Declaring "logger" makes every consumer in this resolution share one logger.
  let mut identity_map = IdentityMap::new();
  identity_map.declare("logger");
  let report_service =
    container.get_with::<ReportService>(Contract::of::<ReportService>(), &mut identity_map)?;

  report_service.generate_report();
  Ok(())
}
