use robo_ioc::{global, resolve, Concrete};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn new_tracker(_: ()) -> RequestTracker {
  RequestTracker {
    id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
  }
}

fn main() -> Result<(), robo_ioc::IocError> {
  // --- Singleton Binding ---
  // This factory will only be called ONCE.
  global()
    .bind("singleton_tracker")?
    .to(Concrete::factory(new_tracker))
    .as_singleton();

  // --- Transient Binding ---
  // This factory will be called EVERY time the component is resolved.
  global()
    .bind("transient_tracker")?
    .to(Concrete::factory(new_tracker));

  println!("--- Resolving Singletons ---");
  let s1 = resolve!(RequestTracker, "singleton_tracker");
  let s2 = resolve!(RequestTracker, "singleton_tracker");
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert!(Arc::ptr_eq(&s1, &s2), "Singleton instances should be identical");

  println!("--- Resolving Transients ---");
  let t1 = resolve!(RequestTracker, "transient_tracker");
  let t2 = resolve!(RequestTracker, "transient_tracker");
  println!("Transient 1 ID: {}, Transient 2 ID: {}", t1.id, t2.id);
  assert_eq!(t1.id, 1);
  assert_eq!(t2.id, 2);
  assert!(!Arc::ptr_eq(&t1, &t2), "Transient instances should be different");

  Ok(())
}
