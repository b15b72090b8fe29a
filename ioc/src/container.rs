//! The main `Container` struct and its associated methods.

use crate::binding::ConcreteSpecification;
use crate::config::{ContainerConfig, CyclePolicy};
use crate::core::{Component, Contract, IdentityMap, ResolutionGuard, Value};
use crate::description::ComponentDescription;
use crate::error::{IocError, Result};
use dashmap::DashMap;
use std::any::{type_name, Any};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(0);

/// The dependency injection container.
///
/// Holds one [`ComponentDescription`] per contract name. Bindings are added
/// with [`bind`](Self::bind) and components built on demand with
/// [`resolve`](Self::resolve). No registry lock is held while a component is
/// built, so builders may bind or resolve on the same container.
///
/// ```
/// use robo_ioc::{Concrete, Container};
/// use std::sync::Arc;
///
/// struct Greeting(String);
///
/// let container = Container::new();
/// container.bind("name")?.to(Concrete::instance(String::from("World")));
/// container
///   .bind("greeting")?
///   .to(Concrete::factory(|(name,): (Arc<String>,)| Greeting(format!("Hello, {}!", name))))
///   .using(["name"])
///   .as_singleton();
///
/// let greeting = container.get::<Greeting>("greeting")?;
/// assert_eq!(greeting.0, "Hello, World!");
/// # Ok::<(), robo_ioc::IocError>(())
/// ```
pub struct Container {
  id: u64,
  config: ContainerConfig,
  descriptions: DashMap<String, Arc<ComponentDescription>>,
}

impl Default for Container {
  fn default() -> Self {
    Self::with_config(ContainerConfig::default())
  }
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_config(config: ContainerConfig) -> Self {
    Self {
      id: NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed),
      config,
      descriptions: DashMap::new(),
    }
  }

  pub fn config(&self) -> &ContainerConfig {
    &self.config
  }

  // --- Registration ---

  /// Registers a contract, replacing any earlier binding of the same name.
  ///
  /// Fails with `IocError::InvalidContract` for an empty name or a literal value.
  pub fn bind(&self, contract: impl Into<Contract>) -> Result<ConcreteSpecification> {
    let contract: Contract = contract.into();
    let name = match contract.name() {
      Some(name) if !name.is_empty() => name,
      _ => return Err(IocError::InvalidContract),
    };
    let description = Arc::new(ComponentDescription::new(name));
    if self
      .descriptions
      .insert(name.to_owned(), description.clone())
      .is_some()
    {
      tracing::debug!(component = name, "replacing existing binding");
    } else {
      tracing::debug!(component = name, "registered binding");
    }
    Ok(ConcreteSpecification::new(description))
  }

  /// Wraps a literal for direct injection. Equivalent to [`Value::new`].
  pub fn value<T: Any + Send + Sync>(&self, value: T) -> Value {
    Value::new(value)
  }

  // --- Resolution ---

  pub fn resolve(&self, contract: impl Into<Contract>) -> Result<Component> {
    self.resolve_in(&contract.into(), None)
  }

  /// Resolves a contract sharing `identity_map` across the whole dependency graph.
  pub fn resolve_with(
    &self,
    contract: impl Into<Contract>,
    identity_map: &mut IdentityMap,
  ) -> Result<Component> {
    self.resolve_in(&contract.into(), Some(identity_map))
  }

  /// Resolves a contract and downcasts it to `T`.
  pub fn get<T: Any + Send + Sync>(&self, contract: impl Into<Contract>) -> Result<Arc<T>> {
    let contract: Contract = contract.into();
    let component = self.resolve_in(&contract, None)?;
    downcast(&contract, component)
  }

  pub fn get_with<T: Any + Send + Sync>(
    &self,
    contract: impl Into<Contract>,
    identity_map: &mut IdentityMap,
  ) -> Result<Arc<T>> {
    let contract: Contract = contract.into();
    let component = self.resolve_in(&contract, Some(identity_map))?;
    downcast(&contract, component)
  }

  pub(crate) fn resolve_in(
    &self,
    contract: &Contract,
    identity_map: Option<&mut IdentityMap>,
  ) -> Result<Component> {
    let name = match contract {
      Contract::Value(value) => return Ok(value.component().clone()),
      Contract::Name(name) => name.as_str(),
      Contract::Type { name, .. } => *name,
    };

    if let Some(existing) = identity_map.as_deref().and_then(|map| map.lookup(name)) {
      tracing::trace!(component = name, "identity map hit");
      return Ok(existing);
    }

    let description = self
      .descriptions
      .get(name)
      .map(|entry| entry.value().clone())
      .ok_or_else(|| IocError::ComponentNotFound {
        name: name.to_owned(),
      })?;

    let _guard = match self.config.cycle_policy {
      CyclePolicy::Detect => Some(ResolutionGuard::enter(self.id, name)?),
      CyclePolicy::IdentityMap => None,
    };

    let builder = description
      .builder()
      .ok_or_else(|| IocError::ConcreteNotSpecified {
        contract: name.to_owned(),
      })?;

    tracing::trace!(component = name, "resolving");
    builder.build(self, &description, identity_map)
  }

  // --- Inspection ---

  pub fn contains(&self, contract: impl Into<Contract>) -> bool {
    let contract: Contract = contract.into();
    contract
      .name()
      .is_some_and(|name| self.descriptions.contains_key(name))
  }

  pub fn description(&self, contract: impl Into<Contract>) -> Option<Arc<ComponentDescription>> {
    let contract: Contract = contract.into();
    self
      .descriptions
      .get(contract.name()?)
      .map(|entry| entry.value().clone())
  }

  /// The registered contract names, in no particular order.
  pub fn names(&self) -> Vec<String> {
    self
      .descriptions
      .iter()
      .map(|entry| entry.key().clone())
      .collect()
  }

  pub fn len(&self) -> usize {
    self.descriptions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.descriptions.is_empty()
  }
}

fn downcast<T: Any + Send + Sync>(contract: &Contract, component: Component) -> Result<Arc<T>> {
  component
    .downcast::<T>()
    .map_err(|_| IocError::TypeMismatch {
      name: contract.name().unwrap_or("<value>").to_owned(),
      expected: type_name::<T>(),
    })
}
