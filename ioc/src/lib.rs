//! # Robo IoC
//!
//! A small dependency injection container built around *contracts*.
//!
//! A contract names what a caller needs: a plain string, or a Rust type via
//! [`Contract::of`]. Each contract is bound to a [`Concrete`] producer, optionally
//! with a list of constructor dependencies, a set of properties to inject after
//! construction, and a singleton lifetime.
//!
//! ## Core Concepts
//!
//! - **Container**: the registry of bindings, plus the resolution algorithm.
//! - **Binding DSL**: `bind(contract)?.to(concrete).using(..).set(..).as_singleton()`.
//! - **Builders**: fixed instances, [`Construct`] types, factory functions and the
//!   singleton decorator. Class and injectable-factory products take properties
//!   through [`Inject`].
//! - **Identity map**: a graph-local cache that lets components resolved in one
//!   call share instances and point back at each other through properties.
//! - **Global Container**: a process-wide default container, accessible via `global()`.
//!
//! ## Quick Start
//!
//! ```
//! use robo_ioc::{Concrete, Construct, Container, Contract, Inject, Value};
//! use std::sync::Arc;
//!
//! struct Database {
//!   url: Arc<String>,
//! }
//!
//! impl Inject for Database {}
//!
//! impl Construct for Database {
//!   type Args = (Arc<String>,);
//!
//!   fn construct((url,): Self::Args) -> Self {
//!     Database { url }
//!   }
//! }
//!
//! struct UserService {
//!   db: Arc<Database>,
//!   page_size: Arc<usize>,
//! }
//!
//! let container = Container::new();
//! container.bind("database_url")?.to(Concrete::instance(String::from("postgres://localhost/app")));
//! container
//!   .bind(Contract::of::<Database>())?
//!   .to(Concrete::class::<Database>())
//!   .using(["database_url"])
//!   .as_singleton();
//! container
//!   .bind("users")?
//!   .to(Concrete::factory(|(db, page_size): (Arc<Database>, Arc<usize>)| UserService { db, page_size }))
//!   .using([Contract::of::<Database>(), Value::new(50_usize).into()]);
//!
//! let users = container.get::<UserService>("users")?;
//! assert_eq!(*users.db.url, "postgres://localhost/app");
//! assert_eq!(*users.page_size, 50);
//! # Ok::<(), robo_ioc::IocError>(())
//! ```

mod args;
mod binding;
mod builder;
mod config;
mod container;
mod core;
mod description;
mod error;
mod global;
mod macros;

pub use args::{Dependencies, FromDependencies};
pub use binding::{ConcreteSpecification, DependencySpecification};
pub use builder::{Builder, ClassConstructor, Concrete, Construct, FactoryFunction, Inject};
pub use config::{ContainerConfig, CyclePolicy};
pub use container::Container;
pub use crate::core::{Component, Contract, IdentityMap, Value};
pub use description::ComponentDescription;
pub use error::{IocError, Result};
pub use global::{
  bind, get, get_with, global, init_global, reset_global, resolve, resolve_with, value,
  ContainerHandle,
};
