//! A runtime registry of values keyed by type and by tag.
//!
//! Values are registered in a [`Registry`] under their own type, under an
//! interface they implement, or under a string tag. They are then resolved
//! individually, used to populate the fields of a struct deriving [`Inject`],
//! or passed as arguments to a closure.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use taginject::prelude::*;
//!
//! #[derive(Default, Inject)]
//! struct Credentials {
//!     name: String,
//!     #[inject("password")]
//!     password: String,
//! }
//!
//! let mut registry = Registry::new();
//! registry
//!     .map(String::from("Ciel"))
//!     .map_tag(String::from("123456"), "password");
//!
//! let mut credentials = Credentials::default();
//! registry.apply(&mut credentials).unwrap();
//! assert_eq!(credentials.name, "Ciel");
//! assert_eq!(credentials.password, "123456");
//!
//! let length = registry
//!     .invoke_tag(&["password"], |password: Arc<String>| password.len())
//!     .unwrap();
//! assert_eq!(length, 6);
//! ```
//!
//! [`Registry`]: container::registry::Registry
//! [`Inject`]: derive@Inject

pub mod container;
pub mod key;
pub mod module;

mod interface;
mod managed;

pub use taginject_derive::Inject;

pub mod prelude {
    pub use crate::container::injector::{
        Cloned, Dependency, Inject, Injector, InjectorError, TypedInjector, UntaggedFields,
    };
    pub use crate::container::registry::{Config, Registry, RegistryError};
    pub use crate::container::{IntoShared, Managed};
    pub use crate::key::TypeKey;
    pub use crate::module::{Configuration, Module};
    pub use crate::Inject;
    pub use crate::{clone_dependency, interface, managed};
}
