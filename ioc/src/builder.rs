//! The strategies that turn a component description into an instance.

use crate::args::{Dependencies, FromDependencies};
use crate::container::Container;
use crate::core::{Component, IdentityMap};
use crate::description::ComponentDescription;
use crate::error::{IocError, Result};
use once_cell::sync::OnceCell;
use std::any::{type_name, Any};
use std::sync::Arc;

type CreateFn = Arc<dyn Fn(Dependencies) -> Result<Component> + Send + Sync>;
type InjectFn = Arc<dyn Fn(&Component, &str, Component) -> Result<()> + Send + Sync>;

/// Produces a component for a description, resolving what it needs through
/// the container.
pub trait Builder: Send + Sync {
  fn build(
    &self,
    container: &Container,
    description: &ComponentDescription,
    identity_map: Option<&mut IdentityMap>,
  ) -> Result<Component>;
}

/// A component that accepts properties after it is built.
///
/// Components are shared, so types with injectable properties keep them
/// behind interior mutability. The default accepts none.
///
/// # Examples
///
/// ```
/// use robo_ioc::{Component, Inject, IocError};
/// use std::sync::{Arc, Mutex};
///
/// struct Mailer {
///   footer: Mutex<Option<Component>>,
/// }
///
/// impl Inject for Mailer {
///   fn inject(&self, property: &str, value: Component) -> Result<(), IocError> {
///     match property {
///       "footer" => {
///         *self.footer.lock().unwrap() = Some(value);
///         Ok(())
///       }
///       _ => Err(IocError::UnknownProperty {
///         component: "Mailer".into(),
///         property: property.into(),
///       }),
///     }
///   }
/// }
/// ```
pub trait Inject: Any + Send + Sync {
  fn inject(&self, property: &str, _value: Component) -> Result<()> {
    Err(IocError::UnknownProperty {
      component: type_name::<Self>().to_owned(),
      property: property.to_owned(),
    })
  }
}

/// A type the container can construct from its declared dependencies.
///
/// ```
/// use robo_ioc::{Construct, Inject};
/// use std::sync::Arc;
///
/// struct Mailer {
///   host: Arc<String>,
/// }
///
/// impl Inject for Mailer {}
///
/// impl Construct for Mailer {
///   type Args = (Arc<String>,);
///
///   fn construct((host,): Self::Args) -> Self {
///     Mailer { host }
///   }
/// }
/// ```
pub trait Construct: Inject + Sized {
  type Args: FromDependencies;

  fn construct(args: Self::Args) -> Self;
}

/// What a contract is bound to.
#[derive(Clone)]
pub enum Concrete {
  /// A fixed instance, handed out verbatim on every resolution.
  Instance(Component),
  /// A [`Construct`] type built with `construct`, injected through [`Inject`].
  Class(ClassConstructor),
  /// A plain function whose return value is the component. Built with
  /// [`Concrete::injectable_factory`], its product also receives properties.
  Factory(FactoryFunction),
}

#[derive(Clone)]
pub struct ClassConstructor {
  type_name: &'static str,
  create: CreateFn,
  inject: InjectFn,
}

impl ClassConstructor {
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }
}

#[derive(Clone)]
pub struct FactoryFunction {
  create: CreateFn,
  inject: Option<InjectFn>,
}

fn injector<T: Inject>() -> InjectFn {
  Arc::new(|component: &Component, property: &str, value: Component| -> Result<()> {
    let target = (**component)
      .downcast_ref::<T>()
      .ok_or_else(|| IocError::TypeMismatch {
        name: type_name::<T>().to_owned(),
        expected: type_name::<T>(),
      })?;
    target.inject(property, value)
  })
}

impl Concrete {
  pub fn instance<T: Any + Send + Sync>(value: T) -> Self {
    Concrete::Instance(Arc::new(value))
  }

  /// Binds an existing shared value; resolutions return this very `Arc`.
  pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
    Concrete::Instance(value)
  }

  pub fn class<T: Construct>() -> Self {
    Concrete::Class(ClassConstructor {
      type_name: type_name::<T>(),
      create: Arc::new(|dependencies: Dependencies| -> Result<Component> {
        let args = <T::Args as FromDependencies>::from_dependencies(dependencies)?;
        Ok(Arc::new(T::construct(args)) as Component)
      }),
      inject: injector::<T>(),
    })
  }

  /// Binds a function called with the typed dependency tuple.
  ///
  /// ```
  /// use robo_ioc::{Concrete, Container};
  /// use std::sync::Arc;
  ///
  /// let container = Container::new();
  /// container.bind("base")?.to(Concrete::instance(40_u32));
  /// container
  ///   .bind("answer")?
  ///   .to(Concrete::factory(|(base,): (Arc<u32>,)| *base + 2))
  ///   .using(["base"]);
  ///
  /// assert_eq!(*container.get::<u32>("answer")?, 42);
  /// # Ok::<(), robo_ioc::IocError>(())
  /// ```
  pub fn factory<A, R, F>(factory: F) -> Self
  where
    A: FromDependencies,
    R: Any + Send + Sync,
    F: Fn(A) -> R + Send + Sync + 'static,
  {
    Concrete::Factory(FactoryFunction {
      create: Arc::new(move |dependencies: Dependencies| -> Result<Component> {
        let args = A::from_dependencies(dependencies)?;
        Ok(Arc::new(factory(args)) as Component)
      }),
      inject: None,
    })
  }

  /// Like [`factory`](Self::factory), for products that take properties
  /// declared with `.set(..)`.
  ///
  /// ```
  /// use robo_ioc::{Component, Concrete, Container, Inject, IocError};
  /// use once_cell::sync::OnceCell;
  ///
  /// struct Banner {
  ///   text: OnceCell<Component>,
  /// }
  ///
  /// impl Inject for Banner {
  ///   fn inject(&self, _property: &str, value: Component) -> Result<(), IocError> {
  ///     let _ = self.text.set(value);
  ///     Ok(())
  ///   }
  /// }
  ///
  /// let container = Container::new();
  /// container.bind("motd")?.to(Concrete::instance(String::from("hi")));
  /// container
  ///   .bind("banner")?
  ///   .to(Concrete::injectable_factory(|_: ()| Banner { text: OnceCell::new() }))
  ///   .set([("text", "motd")]);
  ///
  /// assert!(container.get::<Banner>("banner")?.text.get().is_some());
  /// # Ok::<(), robo_ioc::IocError>(())
  /// ```
  pub fn injectable_factory<A, R, F>(factory: F) -> Self
  where
    A: FromDependencies,
    R: Inject,
    F: Fn(A) -> R + Send + Sync + 'static,
  {
    Concrete::Factory(FactoryFunction {
      create: Arc::new(move |dependencies: Dependencies| -> Result<Component> {
        let args = A::from_dependencies(dependencies)?;
        Ok(Arc::new(factory(args)) as Component)
      }),
      inject: Some(injector::<R>()),
    })
  }

  pub(crate) fn into_builder(self) -> Arc<dyn Builder> {
    match self {
      Concrete::Instance(instance) => Arc::new(InstanceBuilder { instance }),
      Concrete::Class(constructor) => Arc::new(ClassBuilder { constructor }),
      Concrete::Factory(function) => Arc::new(FactoryBuilder { function }),
    }
  }
}

/// Resolves dependencies, creates the component, records it in the identity
/// map and injects its properties.
///
/// If an injection fails the identity map entry is put back the way it was,
/// so the map never holds a half-built component.
fn build_component(
  create: &CreateFn,
  inject: Option<&InjectFn>,
  container: &Container,
  description: &ComponentDescription,
  mut identity_map: Option<&mut IdentityMap>,
) -> Result<Component> {
  let name = description.name();

  let mut resolved = Vec::new();
  for dependency in description.dependencies() {
    let label = dependency.name().unwrap_or("<value>").to_owned();
    let component = container.resolve_in(&dependency, identity_map.as_deref_mut())?;
    resolved.push((label, component));
  }
  let component = create(Dependencies::new(name, resolved))?;

  let previous = identity_map
    .as_deref_mut()
    .map(|map| map.record(name, &component));

  let injected = inject_properties(
    inject,
    &component,
    container,
    description,
    identity_map.as_deref_mut(),
  );
  if injected.is_err() {
    if let (Some(map), Some(previous)) = (identity_map, previous) {
      map.restore(name, previous);
    }
  }
  injected.map(|()| component)
}

fn inject_properties(
  inject: Option<&InjectFn>,
  component: &Component,
  container: &Container,
  description: &ComponentDescription,
  mut identity_map: Option<&mut IdentityMap>,
) -> Result<()> {
  let name = description.name();
  for (property, contract) in description.inject_properties() {
    let inject = inject.ok_or_else(|| IocError::UnknownProperty {
      component: name.to_owned(),
      property: property.clone(),
    })?;
    let value = container.resolve_in(&contract, identity_map.as_deref_mut())?;
    tracing::trace!(component = name, property = property.as_str(), "injecting property");
    inject(component, &property, value)?;
  }
  Ok(())
}

pub(crate) struct InstanceBuilder {
  instance: Component,
}

impl Builder for InstanceBuilder {
  fn build(
    &self,
    _container: &Container,
    _description: &ComponentDescription,
    _identity_map: Option<&mut IdentityMap>,
  ) -> Result<Component> {
    Ok(self.instance.clone())
  }
}

pub(crate) struct ClassBuilder {
  constructor: ClassConstructor,
}

impl Builder for ClassBuilder {
  fn build(
    &self,
    container: &Container,
    description: &ComponentDescription,
    identity_map: Option<&mut IdentityMap>,
  ) -> Result<Component> {
    build_component(
      &self.constructor.create,
      Some(&self.constructor.inject),
      container,
      description,
      identity_map,
    )
  }
}

pub(crate) struct FactoryBuilder {
  function: FactoryFunction,
}

impl Builder for FactoryBuilder {
  fn build(
    &self,
    container: &Container,
    description: &ComponentDescription,
    identity_map: Option<&mut IdentityMap>,
  ) -> Result<Component> {
    build_component(
      &self.function.create,
      self.function.inject.as_ref(),
      container,
      description,
      identity_map,
    )
  }
}

/// Decorates another builder, caching the first successfully built instance.
pub(crate) struct SingletonBuilder {
  inner: Arc<dyn Builder>,
  instance: OnceCell<Component>,
}

impl SingletonBuilder {
  pub(crate) fn new(inner: Arc<dyn Builder>) -> Self {
    Self {
      inner,
      instance: OnceCell::new(),
    }
  }
}

impl Builder for SingletonBuilder {
  fn build(
    &self,
    container: &Container,
    description: &ComponentDescription,
    identity_map: Option<&mut IdentityMap>,
  ) -> Result<Component> {
    if let Some(instance) = self.instance.get() {
      tracing::trace!(component = description.name(), "singleton cache hit");
      return Ok(instance.clone());
    }
    // Not `get_or_try_init`: the inner build may re-enter this builder, and
    // the cell must stay unlocked while it runs.
    let built = self.inner.build(container, description, identity_map)?;
    Ok(self.instance.get_or_init(|| built).clone())
  }
}
