//! Container configuration.

/// How a container reacts when a component is re-entered while it is still
/// being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CyclePolicy {
  /// Only a cooperating identity map breaks cycles. An unguarded cycle
  /// recurses until the stack is exhausted.
  #[default]
  IdentityMap,
  /// Re-entering a component fails with `IocError::CircularDependency`.
  /// Identity-map hits are still served first.
  Detect,
}

/// Settings for a [`Container`](crate::Container).
///
/// With the `serde` feature enabled this can be read from any serde format:
///
/// ```text
/// { "cycle_policy": "detect" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct ContainerConfig {
  #[cfg_attr(feature = "serde", serde(default))]
  pub cycle_policy: CyclePolicy,
}

impl ContainerConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn cycle_policy(mut self, policy: CyclePolicy) -> Self {
    self.cycle_policy = policy;
    self
  }
}
