//! The process-wide default container and free functions delegating to it.

use crate::binding::ConcreteSpecification;
use crate::config::ContainerConfig;
use crate::container::Container;
use crate::core::{Component, Contract, IdentityMap, Value};
use crate::error::Result;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;

/// A shared handle to a container.
pub type ContainerHandle = Arc<Container>;

// Created on first access; replaced wholesale by `init_global`/`reset_global`.
static GLOBAL_CONTAINER: Lazy<RwLock<ContainerHandle>> =
  Lazy::new(|| RwLock::new(Arc::new(Container::default())));

/// Returns a handle to the global container.
///
/// Handles taken before a [`reset_global`] keep pointing at the old container.
///
/// # Examples
///
/// ```
/// use robo_ioc::{global, Concrete};
///
/// global()
///   .bind("global_greeting")?
///   .to(Concrete::instance(String::from("Hello from global!")));
/// assert_eq!(*global().get::<String>("global_greeting")?, "Hello from global!");
/// # Ok::<(), robo_ioc::IocError>(())
/// ```
pub fn global() -> ContainerHandle {
  GLOBAL_CONTAINER.read().clone()
}

/// Replaces the global container with an empty one built from `config`.
pub fn init_global(config: ContainerConfig) -> ContainerHandle {
  let container = Arc::new(Container::with_config(config));
  *GLOBAL_CONTAINER.write() = container.clone();
  tracing::debug!("global container initialized");
  container
}

/// Drops every global binding by swapping in a fresh default container.
pub fn reset_global() {
  init_global(ContainerConfig::default());
}

pub fn bind(contract: impl Into<Contract>) -> Result<ConcreteSpecification> {
  global().bind(contract)
}

pub fn resolve(contract: impl Into<Contract>) -> Result<Component> {
  global().resolve(contract)
}

pub fn resolve_with(contract: impl Into<Contract>, identity_map: &mut IdentityMap) -> Result<Component> {
  global().resolve_with(contract, identity_map)
}

pub fn get<T: Any + Send + Sync>(contract: impl Into<Contract>) -> Result<Arc<T>> {
  global().get(contract)
}

pub fn get_with<T: Any + Send + Sync>(
  contract: impl Into<Contract>,
  identity_map: &mut IdentityMap,
) -> Result<Arc<T>> {
  global().get_with(contract, identity_map)
}

pub fn value<T: Any + Send + Sync>(value: T) -> Value {
  Value::new(value)
}
