mod binding_map;
mod config;

use std::any;
use std::borrow::Cow;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use snafu::prelude::*;
use tracing::{debug, trace};

use crate::container::injector::{Inject, InjectOptions, Injector, InjectorError, TypedInjector};
use crate::container::{Binding, IntoShared, Managed};
use crate::key::TypeKey;
use crate::module::Module;

pub use binding_map::BindingMap;
pub use config::{Config, ConfigBuilder, DEFAULT_TAG};

/// A store of values keyed by type and by tag.
///
/// Values are registered with the `map*` methods and resolved through
/// [`TypedInjector`]. Registering a second value for the same type or tag
/// replaces the first one. A registry may have a parent which is asked
/// whenever a lookup misses.
///
/// A [`Registry`] has no internal synchronization. Share it across threads
/// behind a lock such as `Arc<parking_lot::RwLock<Registry>>`, which is an
/// [`Injector`] itself.
pub struct Registry {
    config: Config,
    types: BindingMap,
    tags: HashMap<String, Binding>,
    parent: Option<Arc<dyn Injector>>,
}

impl Registry {
    /// Creates an empty registry honouring the `inject` tag name.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty registry honouring the tag name `tag`.
    pub fn with_tag(tag: impl Into<Cow<'static, str>>) -> Self {
        Self::with_config(Config::builder().tag(tag).build())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            types: BindingMap::new(),
            tags: HashMap::new(),
            parent: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Installs `parent` as the fallback of every lookup that misses here.
    ///
    /// Parents are not checked for cycles. A cycle makes a missing lookup
    /// recurse without end.
    pub fn set_parent(&mut self, parent: Arc<dyn Injector>) -> &mut Self {
        self.parent = Some(parent);
        self
    }

    pub fn parent(&self) -> Option<&Arc<dyn Injector>> {
        self.parent.as_ref()
    }

    /// Binds `value` to its type.
    ///
    /// A plain value is bound to its own type. A value behind `Arc<T>` or
    /// `Box<T>` is bound to `T`.
    pub fn map<V>(&mut self, value: V) -> &mut Self
    where
        V: IntoShared,
    {
        self.insert_type_binding(Binding::new(value.into_shared()))
    }

    /// Binds a shared value to the pointee type `T`.
    pub fn map_shared<T>(&mut self, value: Arc<T>) -> &mut Self
    where
        T: Managed,
    {
        self.map(value)
    }

    /// Binds a boxed value to the pointee type `T`.
    pub fn map_boxed<T>(&mut self, value: Box<T>) -> &mut Self
    where
        T: Managed,
    {
        self.map(value)
    }

    /// Binds `value` to the interface `I` instead of its concrete type.
    ///
    /// # Panics
    ///
    /// Panics if `I` is not an interface declared with
    /// [`interface!`](crate::interface).
    pub fn map_to<I>(&mut self, value: Arc<I>) -> &mut Self
    where
        I: Managed + ?Sized,
    {
        assert!(
            I::INTERFACE,
            "`{}` is not an interface declared with `interface!`",
            any::type_name::<I>(),
        );
        self.insert_type_binding(Binding::new(value))
    }

    /// Binds `value` to `tag`, normalizing pointers like [`Registry::map`].
    pub fn map_tag<V>(&mut self, value: V, tag: impl Into<String>) -> &mut Self
    where
        V: IntoShared,
    {
        self.map_tag_shared(value.into_shared(), tag)
    }

    /// Binds a shared value, possibly an interface, to `tag`.
    pub fn map_tag_shared<T>(&mut self, value: Arc<T>, tag: impl Into<String>) -> &mut Self
    where
        T: Managed + ?Sized,
    {
        let tag = tag.into();
        let binding = Binding::new(value);
        debug!(tag = tag.as_str(), key = %binding.key(), "map tag");
        if self.tags.insert(tag, binding).is_some() {
            trace!("previous tag binding replaced");
        }
        self
    }

    /// Runs `module` against this registry.
    ///
    /// # Errors
    ///
    /// Returns an error wrapping the module's own failure. Registrations the
    /// module made before failing are kept.
    pub fn install<M>(&mut self, module: M) -> Result<&mut Self, RegistryError>
    where
        M: Module,
    {
        let name = any::type_name::<M>();
        debug!(module = name, "install module");
        module
            .configure(self)
            .map_err(|source| RegistryError::ModuleInner {
                module: name,
                source,
            })?;
        Ok(self)
    }

    /// Populates the fields of `target` honouring the configured tag name.
    ///
    /// # Errors
    ///
    /// Returns the first error met while resolving a field. Fields assigned
    /// before it keep their new values.
    pub fn apply<S>(&self, target: &mut S) -> Result<(), InjectorError>
    where
        S: Inject,
    {
        self.apply_tag(target, self.config.tag())
    }

    /// Populates the fields of `target` honouring the tag name `tag`.
    ///
    /// # Errors
    ///
    /// Returns the first error met while resolving a field. Fields assigned
    /// before it keep their new values.
    pub fn apply_tag<S>(&self, target: &mut S, tag: &str) -> Result<(), InjectorError>
    where
        S: Inject,
    {
        let options = InjectOptions::new(tag, self.config.untagged());
        self.apply_with(target, &options)
    }

    /// Returns the keys of all type bindings made on this registry.
    pub fn keys(&self) -> impl Iterator<Item = &TypeKey> {
        self.types.keys()
    }

    /// Returns the tags bound on this registry.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    /// Returns the number of bindings made on this registry, type and tag
    /// bindings together. The parent's bindings are not counted.
    pub fn len(&self) -> usize {
        self.types.len() + self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.tags.is_empty()
    }

    fn insert_type_binding(&mut self, binding: Binding) -> &mut Self {
        let key = *binding.key();
        debug!(%key, "map type");
        if self.types.insert(key, binding).is_some() {
            trace!(%key, "previous type binding replaced");
        }
        self
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("types", &self.types)
            .field("tags", &self.tags)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

impl Injector for Registry {
    fn dyn_get(&self, key: &TypeKey) -> Result<Binding, InjectorError> {
        if let Some(binding) = self.types.find(key) {
            trace!(%key, "type binding found");
            return Ok(binding);
        }

        if let Some(parent) = self.parent.as_ref() {
            trace!(%key, "type binding not found, asking parent");
            return parent.dyn_get(key);
        }

        debug!(%key, "type binding not found");
        Err(InjectorError::NotFound { key: *key })
    }

    fn dyn_get_tag(&self, tag: &str) -> Result<Binding, InjectorError> {
        if let Some(binding) = self.tags.get(tag) {
            trace!(tag, "tag binding found");
            return Ok(binding.clone());
        }

        if let Some(parent) = self.parent.as_ref() {
            trace!(tag, "tag binding not found, asking parent");
            return parent.dyn_get_tag(tag);
        }

        debug!(tag, "tag binding not found");
        Err(InjectorError::TagNotFound {
            tag: tag.to_string(),
        })
    }
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum RegistryError {
    #[snafu(display("module {module} fails to setup the registry"))]
    #[non_exhaustive]
    ModuleInner {
        module: &'static str,
        source: Box<dyn Error + Send + Sync>,
    },
}
