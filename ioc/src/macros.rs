//! Public macros for ergonomic component resolution.

/// Resolves a component from the global container.
///
/// Panics if the component cannot be resolved. For a fallible version, use
/// [`get`](crate::get) or `global().get(...)` directly.
///
/// With only a type, the contract is `Contract::of::<T>()`; with a name, the
/// named contract is resolved and downcast to the type.
///
/// # Examples
///
/// ```
/// use robo_ioc::{global, resolve, Concrete, Contract};
///
/// struct Settings { retries: u32 }
///
/// global().bind(Contract::of::<Settings>())?.to(Concrete::instance(Settings { retries: 3 }));
/// global().bind("retry_limit")?.to(Concrete::instance(5_u32));
///
/// assert_eq!(resolve!(Settings).retries, 3);
/// assert_eq!(*resolve!(u32, "retry_limit"), 5);
/// # Ok::<(), robo_ioc::IocError>(())
/// ```
#[macro_export]
macro_rules! resolve {
  ($type:ty) => {
    $crate::resolve_from!($crate::global(), $type)
  };

  ($type:ty, $name:expr) => {
    $crate::resolve_from!($crate::global(), $type, $name)
  };
}

/// Resolves a component from the given container, panicking on failure.
#[macro_export]
macro_rules! resolve_from {
  ($container:expr, $type:ty) => {
    $container
      .get::<$type>($crate::Contract::of::<$type>())
      .unwrap_or_else(|error| {
        panic!(
          "Failed to resolve required component {}: {}",
          std::any::type_name::<$type>(),
          error
        )
      })
  };

  ($container:expr, $type:ty, $name:expr) => {
    $container
      .get::<$type>($name)
      .unwrap_or_else(|error| {
        panic!(
          "Failed to resolve required component '{}' as {}: {}",
          $name,
          std::any::type_name::<$type>(),
          error
        )
      })
  };
}
