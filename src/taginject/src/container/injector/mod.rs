mod dependency;
mod fields;
mod forward;
mod invoke;

use std::sync::Arc;

use snafu::prelude::*;

use crate::container::{Binding, Managed};
use crate::key::TypeKey;

pub use dependency::{Cloned, Dependency, Lookup};
pub use fields::{Annotation, FieldDescriptor, FieldSite, Inject, InjectOptions, UntaggedFields};
pub use invoke::Invocable;

/// A source of registered values.
///
/// This is the object-safe half of the resolution API: it hands out
/// type-erased [`Binding`]s. Everything typed is layered on top of it by
/// [`TypedInjector`], which is implemented for every [`Injector`].
#[cfg_attr(test, mockall::automock)]
pub trait Injector: Send + Sync {
    /// Resolves the binding registered for `key`.
    ///
    /// An exact match wins. An interface key then falls back to any concrete
    /// binding the interface accepts. Implementations with a parent ask it
    /// last.
    ///
    /// # Errors
    ///
    /// Returns [`InjectorError::NotFound`] if nothing is bound to `key`.
    fn dyn_get(&self, key: &TypeKey) -> Result<Binding, InjectorError>;

    /// Resolves the binding registered under `tag`, asking the parent on a
    /// miss.
    ///
    /// # Errors
    ///
    /// Returns [`InjectorError::TagNotFound`] if nothing is bound to `tag`.
    fn dyn_get_tag(&self, tag: &str) -> Result<Binding, InjectorError>;
}

/// A static layer over [`Injector`] resolving typed values, populating
/// structs and invoking callables.
pub trait TypedInjector: Injector {
    /// Resolves the value bound to the type `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if no value is bound to `T` or the bound value has
    /// another type.
    fn get<T>(&self) -> Result<Arc<T>, InjectorError>
    where
        T: Managed + ?Sized,
    {
        let key = TypeKey::of::<T>();
        let binding = self.dyn_get(&key)?;
        downcast_binding(&binding, key)
    }

    /// Resolves the value bound to `tag` as a `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if no value is bound to `tag` or the bound value
    /// can't be used as a `T`.
    fn get_tag<T>(&self, tag: &str) -> Result<Arc<T>, InjectorError>
    where
        T: Managed + ?Sized,
    {
        let binding = self.dyn_get_tag(tag)?;
        downcast_binding(&binding, TypeKey::of::<T>())
    }

    /// Populates the fields of `target` following `options`.
    ///
    /// Fields are visited in declaration order. The first failure aborts the
    /// population and is returned, while fields assigned before it keep their
    /// new values.
    ///
    /// # Errors
    ///
    /// Returns the first error met while resolving a field.
    fn apply_with<S>(&self, target: &mut S, options: &InjectOptions<'_>) -> Result<(), InjectorError>
    where
        S: Inject,
    {
        fields::apply(self.upcast_dyn(), target, options)
    }

    /// Calls `callable` with every parameter resolved by its declared type.
    ///
    /// # Errors
    ///
    /// Returns the first error met while resolving a parameter, in which case
    /// `callable` is not called.
    fn invoke<F, A>(&self, callable: F) -> Result<F::Output, InjectorError>
    where
        F: Invocable<A>,
    {
        callable.invoke_with(self.upcast_dyn(), &[])
    }

    /// Calls `callable`, resolving the `i`-th parameter by `tags[i]` when
    /// present and by its declared type otherwise. Tags beyond the number of
    /// parameters are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first error met while resolving a parameter, in which case
    /// `callable` is not called.
    fn invoke_tag<F, A>(&self, tags: &[&str], callable: F) -> Result<F::Output, InjectorError>
    where
        F: Invocable<A>,
    {
        callable.invoke_with(self.upcast_dyn(), tags)
    }

    fn upcast_dyn(&self) -> &dyn Injector;
}

impl<T> TypedInjector for T
where
    T: Injector,
{
    fn upcast_dyn(&self) -> &dyn Injector {
        self
    }
}

impl TypedInjector for dyn Injector + '_ {
    fn upcast_dyn(&self) -> &dyn Injector {
        self
    }
}

fn downcast_binding<T>(binding: &Binding, expected: TypeKey) -> Result<Arc<T>, InjectorError>
where
    T: Managed + ?Sized,
{
    binding
        .downcast::<T>()
        .or_else(|| T::cast_from(binding))
        .ok_or_else(|| InjectorError::TypeMismatch {
            expected,
            found: *binding.key(),
        })
}

#[derive(Debug, Clone, Snafu)]
#[non_exhaustive]
pub enum InjectorError {
    #[snafu(display("could not find any value bound to the type {key}"))]
    #[non_exhaustive]
    NotFound { key: TypeKey },
    #[snafu(display("could not find any value bound to the tag {tag:?}"))]
    #[non_exhaustive]
    TagNotFound { tag: String },
    #[snafu(display("could not use the value bound to {found} as {expected}"))]
    #[non_exhaustive]
    TypeMismatch { expected: TypeKey, found: TypeKey },
}
