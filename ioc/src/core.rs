//! Core data structures shared by the binding DSL, the builders and the container.

use crate::error::{IocError, Result};
use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// A built component, as handed out by the container.
///
/// Use [`Container::get`](crate::Container::get) for typed access.
pub type Component = Arc<dyn Any + Send + Sync>;

thread_local! {
  // The (container, name) pairs currently being resolved on this thread.
  // Only consulted when the container runs with `CyclePolicy::Detect`.
  static RESOLVING_STACK: RefCell<HashSet<(u64, String)>> = RefCell::new(HashSet::new());
}

/// An RAII guard marking a component as "being resolved" on the current thread.
///
/// Entering the same name twice on one container before the first guard is
/// dropped yields `IocError::CircularDependency`.
pub(crate) struct ResolutionGuard {
  key: (u64, String),
}

impl ResolutionGuard {
  pub(crate) fn enter(container_id: u64, name: &str) -> Result<Self> {
    let key = (container_id, name.to_owned());
    RESOLVING_STACK.with(|stack| {
      // `insert` returns `false` if the key was already present.
      if stack.borrow_mut().insert(key.clone()) {
        Ok(Self { key })
      } else {
        Err(IocError::CircularDependency {
          name: name.to_owned(),
        })
      }
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.key);
    });
  }
}

/// A literal value injected as-is, bypassing the registry.
#[derive(Clone)]
pub struct Value(Component);

impl Value {
  pub fn new<T: Any + Send + Sync>(value: T) -> Self {
    Self(Arc::new(value))
  }

  /// Wraps an already shared value without re-allocating it.
  pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
    Self(value)
  }

  pub fn component(&self) -> &Component {
    &self.0
  }

  pub fn into_component(self) -> Component {
    self.0
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Value(..)")
  }
}

/// Identifies what to resolve.
///
/// Plain strings convert into [`Contract::Name`]; use [`Contract::of`] to key a
/// binding by a Rust type and [`Value`] to inject a literal.
#[derive(Clone)]
pub enum Contract {
  Name(String),
  Type { id: TypeId, name: &'static str },
  Value(Value),
}

impl Contract {
  pub fn named(name: impl Into<String>) -> Self {
    Contract::Name(name.into())
  }

  /// A contract keyed by the type `T`, named after `std::any::type_name::<T>()`.
  pub fn of<T: ?Sized + Any>() -> Self {
    Contract::Type {
      id: TypeId::of::<T>(),
      name: type_name::<T>(),
    }
  }

  /// The registry key this contract resolves through, `None` for a literal value.
  pub fn name(&self) -> Option<&str> {
    match self {
      Contract::Name(name) => Some(name),
      Contract::Type { name, .. } => Some(name),
      Contract::Value(_) => None,
    }
  }

  pub fn is_value(&self) -> bool {
    matches!(self, Contract::Value(_))
  }
}

impl fmt::Debug for Contract {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Contract::Name(name) => write!(f, "Contract(Name({}))", name),
      Contract::Type { id, name } => write!(f, "Contract(Type({:?}, {}))", id, name),
      Contract::Value(_) => write!(f, "Contract(Value(..))"),
    }
  }
}

impl From<&str> for Contract {
  fn from(name: &str) -> Self {
    Contract::Name(name.to_owned())
  }
}

impl From<String> for Contract {
  fn from(name: String) -> Self {
    Contract::Name(name)
  }
}

impl From<&String> for Contract {
  fn from(name: &String) -> Self {
    Contract::Name(name.clone())
  }
}

impl From<Value> for Contract {
  fn from(value: Value) -> Self {
    Contract::Value(value)
  }
}

/// A graph-local cache of components, threaded through one resolution call tree.
///
/// A name can be *declared* before resolution starts. When a declared name is
/// built, the instance is recorded before its properties are injected, so
/// components reached later in the same call (including ones that point back
/// at it through a property) observe that same instance.
///
/// A map created with [`IdentityMap::recording_all`] records every component
/// it sees, declared or not.
#[derive(Clone, Default)]
pub struct IdentityMap {
  entries: HashMap<String, Option<Component>>,
  record_all: bool,
}

impl IdentityMap {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn recording_all() -> Self {
    Self {
      entries: HashMap::new(),
      record_all: true,
    }
  }

  /// Marks a contract as shared for the duration of the resolution.
  ///
  /// Literal value contracts carry no name and are ignored.
  pub fn declare(&mut self, contract: impl Into<Contract>) -> &mut Self {
    let contract: Contract = contract.into();
    if let Some(name) = contract.name() {
      self.entries.entry(name.to_owned()).or_insert(None);
    }
    self
  }

  /// Seeds the map with a ready-made instance.
  pub fn insert(&mut self, contract: impl Into<Contract>, component: Component) -> &mut Self {
    let contract: Contract = contract.into();
    if let Some(name) = contract.name() {
      self.entries.insert(name.to_owned(), Some(component));
    }
    self
  }

  pub fn get(&self, contract: impl Into<Contract>) -> Option<&Component> {
    let contract: Contract = contract.into();
    self.entries.get(contract.name()?)?.as_ref()
  }

  /// Returns the recorded instance downcast to `T`.
  pub fn get_as<T: Any + Send + Sync>(&self, contract: impl Into<Contract>) -> Option<Arc<T>> {
    self.get(contract)?.clone().downcast::<T>().ok()
  }

  pub fn is_declared(&self, contract: impl Into<Contract>) -> bool {
    let contract: Contract = contract.into();
    contract
      .name()
      .is_some_and(|name| self.entries.contains_key(name))
  }

  /// The number of keys, declared or recorded.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub(crate) fn lookup(&self, name: &str) -> Option<Component> {
    self.entries.get(name).and_then(|entry| entry.clone())
  }

  /// Stores `component` if `name` is tracked, returning the entry it replaced
  /// for [`restore`](Self::restore). The outer `None` means "no entry".
  pub(crate) fn record(&mut self, name: &str, component: &Component) -> Option<Option<Component>> {
    if self.record_all {
      self.entries.insert(name.to_owned(), Some(component.clone()))
    } else if let Some(entry) = self.entries.get_mut(name) {
      Some(entry.replace(component.clone()))
    } else {
      None
    }
  }

  pub(crate) fn restore(&mut self, name: &str, previous: Option<Option<Component>>) {
    match previous {
      Some(entry) => {
        self.entries.insert(name.to_owned(), entry);
      }
      None => {
        self.entries.remove(name);
      }
    }
  }
}

impl fmt::Debug for IdentityMap {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut map = f.debug_map();
    for (name, entry) in &self.entries {
      map.entry(name, &if entry.is_some() { "built" } else { "declared" });
    }
    map.finish()
  }
}
