//! Positional constructor arguments.

use crate::core::Component;
use crate::error::{IocError, Result};
use std::any::{type_name, Any};
use std::sync::Arc;

/// The resolved dependencies of one component, in declaration order.
pub struct Dependencies {
  component: String,
  entries: Vec<(String, Component)>,
}

impl Dependencies {
  pub(crate) fn new(component: &str, entries: Vec<(String, Component)>) -> Self {
    Self {
      component: component.to_owned(),
      entries,
    }
  }

  /// The name of the component these dependencies were resolved for.
  pub fn component(&self) -> &str {
    &self.component
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn get_raw(&self, index: usize) -> Option<&Component> {
    self.entries.get(index).map(|(_, component)| component)
  }

  /// Returns the dependency at `index` downcast to `T`.
  pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
    let (label, component) = self.entries.get(index).ok_or_else(|| IocError::DependencyCount {
      component: self.component.clone(),
      expected: index + 1,
      found: self.entries.len(),
    })?;
    component
      .clone()
      .downcast::<T>()
      .map_err(|_| IocError::TypeMismatch {
        name: label.clone(),
        expected: type_name::<T>(),
      })
  }

  pub fn into_components(self) -> Vec<Component> {
    self.entries.into_iter().map(|(_, component)| component).collect()
  }

  fn expect_len(&self, expected: usize) -> Result<()> {
    if self.entries.len() == expected {
      Ok(())
    } else {
      Err(IocError::DependencyCount {
        component: self.component.clone(),
        expected,
        found: self.entries.len(),
      })
    }
  }
}

/// Conversion from resolved dependencies into a typed argument list.
///
/// Implemented for `()`, for [`Dependencies`] itself (untyped access) and for
/// tuples of `Arc<T>` up to eight elements. Tuples require exactly as many
/// dependencies as they have elements.
pub trait FromDependencies: Sized {
  fn from_dependencies(dependencies: Dependencies) -> Result<Self>;
}

impl FromDependencies for Dependencies {
  fn from_dependencies(dependencies: Dependencies) -> Result<Self> {
    Ok(dependencies)
  }
}

impl FromDependencies for () {
  fn from_dependencies(dependencies: Dependencies) -> Result<Self> {
    dependencies.expect_len(0)
  }
}

macro_rules! impl_from_dependencies {
  ($count:expr; $($ty:ident => $idx:tt),+) => {
    impl<$($ty: Any + Send + Sync),+> FromDependencies for ($(Arc<$ty>,)+) {
      fn from_dependencies(dependencies: Dependencies) -> Result<Self> {
        dependencies.expect_len($count)?;
        Ok(($(dependencies.get::<$ty>($idx)?,)+))
      }
    }
  };
}

impl_from_dependencies!(1; A => 0);
impl_from_dependencies!(2; A => 0, B => 1);
impl_from_dependencies!(3; A => 0, B => 1, C => 2);
impl_from_dependencies!(4; A => 0, B => 1, C => 2, D => 3);
impl_from_dependencies!(5; A => 0, B => 1, C => 2, D => 3, E => 4);
impl_from_dependencies!(6; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5);
impl_from_dependencies!(7; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6);
impl_from_dependencies!(8; A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7);
