use crate::builder::{Builder, SingletonBuilder};
use crate::core::Contract;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

#[derive(Default)]
struct DescriptionState {
  builder: Option<Arc<dyn Builder>>,
  dependencies: Vec<Contract>,
  inject_properties: Vec<(String, Contract)>,
}

/// The registration record stored for one contract name.
///
/// Created by `bind` and filled in by the binding DSL. Readers get cloned
/// snapshots of each field so no lock is held while a dependency resolves.
pub struct ComponentDescription {
  name: String,
  state: RwLock<DescriptionState>,
}

impl ComponentDescription {
  pub(crate) fn new(name: &str) -> Self {
    Self {
      name: name.to_owned(),
      state: RwLock::new(DescriptionState::default()),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn builder(&self) -> Option<Arc<dyn Builder>> {
    self.state.read().builder.clone()
  }

  pub fn dependencies(&self) -> Vec<Contract> {
    self.state.read().dependencies.clone()
  }

  pub fn inject_properties(&self) -> Vec<(String, Contract)> {
    self.state.read().inject_properties.clone()
  }

  pub fn has_builder(&self) -> bool {
    self.state.read().builder.is_some()
  }

  pub(crate) fn set_builder(&self, builder: Arc<dyn Builder>) {
    self.state.write().builder = Some(builder);
  }

  pub(crate) fn set_dependencies(&self, dependencies: Vec<Contract>) {
    self.state.write().dependencies = dependencies;
  }

  pub(crate) fn set_inject_properties(&self, properties: Vec<(String, Contract)>) {
    self.state.write().inject_properties = properties;
  }

  /// Wraps the current builder in a memoizing singleton builder.
  pub(crate) fn wrap_singleton(&self) {
    let mut state = self.state.write();
    if let Some(inner) = state.builder.take() {
      state.builder = Some(Arc::new(SingletonBuilder::new(inner)));
    }
  }
}

impl fmt::Debug for ComponentDescription {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = self.state.read();
    f.debug_struct("ComponentDescription")
      .field("name", &self.name)
      .field("has_builder", &state.builder.is_some())
      .field("dependencies", &state.dependencies)
      .field("inject_properties", &state.inject_properties)
      .finish()
  }
}
