use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::container::injector::{InjectorError, TypedInjector};
use crate::container::Managed;

/// A field or parameter type which can be built from a registered value.
///
/// [`Dependency::Target`] is the type looked up in the registry and
/// [`Dependency::from_shared`] turns the shared value into `Self`. This is
/// where pointer normalization happens on the consuming side: an `Arc<T>`
/// dependency is looked up as `T`, just like a value registered as `T`.
///
/// Implementations are provided for:
///
/// - `Arc<T>` for any [`Managed`] `T`, interfaces included, yielding the
///   shared value itself;
/// - [`Cloned<T>`] for any clonable `T`;
/// - common standard types (`String`, `&'static str`, primitives,
///   [`PathBuf`], [`Duration`]), yielding a clone.
///
/// Other clonable types can opt in with [`clone_dependency!`].
///
/// [`clone_dependency!`]: crate::clone_dependency
pub trait Dependency: Sized {
    /// The type looked up in the registry.
    type Target: Managed + ?Sized;

    /// Builds `Self` from the resolved value.
    fn from_shared(shared: Arc<Self::Target>) -> Self;
}

impl<T> Dependency for Arc<T>
where
    T: Managed + ?Sized,
{
    type Target = T;

    fn from_shared(shared: Arc<Self::Target>) -> Self {
        shared
    }
}

/// A dependency holding a clone of the registered `T`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cloned<T>(pub T);

impl<T> Cloned<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Cloned<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Cloned<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> Dependency for Cloned<T>
where
    T: Managed + Clone,
{
    type Target = T;

    fn from_shared(shared: Arc<Self::Target>) -> Self {
        Self(T::clone(&shared))
    }
}

/// Implements [`Dependency`] for clonable types, resolving them by their own
/// type and cloning the registered value.
/// The types must also be [`Managed`](crate::container::Managed).
///
/// ```rust
/// # use taginject::prelude::*;
/// #[derive(Clone)]
/// struct Settings {
///     verbose: bool,
/// }
///
/// taginject::managed!(Settings);
/// taginject::clone_dependency!(Settings);
///
/// let mut registry = Registry::new();
/// registry.map(Settings { verbose: true });
///
/// let verbose = registry.invoke(|settings: Settings| settings.verbose).unwrap();
/// assert!(verbose);
/// ```
///
/// [`Dependency`]: crate::container::injector::Dependency
#[macro_export]
macro_rules! clone_dependency {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::container::injector::Dependency for $ty {
                type Target = Self;

                fn from_shared(shared: ::std::sync::Arc<Self>) -> Self {
                    ::std::clone::Clone::clone(&*shared)
                }
            }
        )*
    };
}

crate::clone_dependency!(
    String,
    &'static str,
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    PathBuf,
    Duration,
);

/// Where a dependency is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup<'a> {
    /// By the declared type of the dependency.
    Type,
    /// By an explicit tag.
    Tag(&'a str),
}

impl<'a> Lookup<'a> {
    /// Returns the lookup of the parameter at `position` when the leading
    /// parameters are resolved by `tags`.
    pub fn at(tags: &[&'a str], position: usize) -> Self {
        tags.get(position).map_or(Self::Type, |tag| Self::Tag(*tag))
    }

    /// Resolves a `D` from `injector`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dependency can't be found or has another type.
    pub fn resolve<D, I>(self, injector: &I) -> Result<D, InjectorError>
    where
        D: Dependency,
        I: TypedInjector + ?Sized,
    {
        let shared = match self {
            Self::Type => injector.get::<D::Target>()?,
            Self::Tag(tag) => injector.get_tag::<D::Target>(tag)?,
        };
        Ok(D::from_shared(shared))
    }
}
