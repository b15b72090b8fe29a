//! The fluent binding DSL returned by `Container::bind`.

use crate::builder::Concrete;
use crate::core::Contract;
use crate::description::ComponentDescription;
use crate::error::{IocError, Result};
use std::sync::Arc;

/// The first step of a binding: choose what the contract resolves to.
#[must_use = "a binding without a concrete cannot be resolved"]
pub struct ConcreteSpecification {
  description: Arc<ComponentDescription>,
}

impl ConcreteSpecification {
  pub(crate) fn new(description: Arc<ComponentDescription>) -> Self {
    Self { description }
  }

  pub fn to(self, concrete: Concrete) -> DependencySpecification {
    tracing::debug!(
      component = self.description.name(),
      kind = concrete_kind(&concrete),
      "binding concrete"
    );
    self.description.set_builder(concrete.into_builder());
    DependencySpecification {
      description: self.description,
    }
  }

  /// Like [`to`](Self::to), for concretes chosen at runtime.
  pub fn try_to(self, concrete: Option<Concrete>) -> Result<DependencySpecification> {
    match concrete {
      Some(concrete) => Ok(self.to(concrete)),
      None => Err(IocError::ConcreteNotSpecified {
        contract: self.description.name().to_owned(),
      }),
    }
  }
}

fn concrete_kind(concrete: &Concrete) -> &'static str {
  match concrete {
    Concrete::Instance(_) => "instance",
    Concrete::Class(_) => "class",
    Concrete::Factory(_) => "factory",
  }
}

/// The second step of a binding. Every method returns `self` so
/// calls chain in any order; repeating a call replaces the earlier setting.
pub struct DependencySpecification {
  description: Arc<ComponentDescription>,
}

impl DependencySpecification {
  pub fn name(&self) -> &str {
    self.description.name()
  }

  /// Declares the constructor dependencies, passed positionally in this order.
  pub fn using<I, C>(self, contracts: I) -> Self
  where
    I: IntoIterator<Item = C>,
    C: Into<Contract>,
  {
    self
      .description
      .set_dependencies(contracts.into_iter().map(Into::into).collect());
    self
  }

  /// Declares properties injected after construction, as `(property, contract)` pairs.
  pub fn set<I, P, C>(self, properties: I) -> Self
  where
    I: IntoIterator<Item = (P, C)>,
    P: Into<String>,
    C: Into<Contract>,
  {
    self.description.set_inject_properties(
      properties
        .into_iter()
        .map(|(property, contract)| (property.into(), contract.into()))
        .collect(),
    );
    self
  }

  /// Builds the component once and returns that instance from then on.
  pub fn as_singleton(self) -> Self {
    self.description.wrap_singleton();
    self
  }
}
