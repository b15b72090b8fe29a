use thiserror::Error;

/// The error type for every fallible container operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IocError {
  /// `bind` was given a contract that cannot key the registry: an empty name
  /// or a literal value.
  #[error("invalid contract: a binding needs a non-empty name")]
  InvalidContract,

  #[error("no concrete specified for contract '{contract}'")]
  ConcreteNotSpecified { contract: String },

  #[error("component not found: '{name}'")]
  ComponentNotFound { name: String },

  #[error("component '{name}' is not of type {expected}")]
  TypeMismatch { name: String, expected: &'static str },

  #[error("'{component}' takes {expected} dependencies but {found} were declared")]
  DependencyCount {
    component: String,
    expected: usize,
    found: usize,
  },

  #[error("'{component}' has no injectable property '{property}'")]
  UnknownProperty { component: String, property: String },

  #[error("circular dependency detected while resolving '{name}'")]
  CircularDependency { name: String },
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = IocError> = std::result::Result<T, E>;
