pub mod injector;
pub mod registry;

mod binding;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};

pub use binding::Binding;

/// A type whose values can be stored in and resolved from a registry.
///
/// Concrete types opt in with [`managed!`], which also makes them
/// [`IntoShared`]. Common standard types are [`Managed`] out of the box. Trait
/// object types become [`Managed`] once declared with [`interface!`], which
/// also tells the registry how to find an implementation among concrete
/// bindings.
///
/// Pointer types such as `Arc<T>` and `Box<T>` are never [`Managed`]. A value
/// registered through a pointer is stored under the pointee's key, and asking
/// for a pointer key is rejected at compile time:
///
/// ```rust,compile_fail
/// # use std::sync::Arc;
/// # use taginject::prelude::*;
/// let mut registry = Registry::new();
/// registry.map(1i32);
/// let _ = registry.get::<Arc<i32>>();
/// ```
///
/// [`managed!`]: crate::managed
/// [`interface!`]: crate::interface
pub trait Managed: Send + Sync + 'static {
    /// Whether `Self` is an interface declared with [`interface!`].
    ///
    /// [`interface!`]: crate::interface
    const INTERFACE: bool = false;

    /// Views the value of a concrete binding as `Self`.
    ///
    /// Returns [`None`] unless `Self` is an interface and the binding holds
    /// one of its declared implementations.
    fn cast_from(_binding: &Binding) -> Option<Arc<Self>> {
        None
    }
}

/// A value accepted by the registration methods, normalized to a shared
/// pointer to the type it is bound to.
///
/// A plain [`Managed`] value is bound to its own type, while `Arc<T>` and
/// `Box<T>` are bound to `T`.
pub trait IntoShared {
    /// The type the value is bound to.
    type Target: Managed + ?Sized;

    fn into_shared(self) -> Arc<Self::Target>;
}

impl<T> IntoShared for Arc<T>
where
    T: Managed + ?Sized,
{
    type Target = T;

    fn into_shared(self) -> Arc<Self::Target> {
        self
    }
}

impl<T> IntoShared for Box<T>
where
    T: Managed + ?Sized,
{
    type Target = T;

    fn into_shared(self) -> Arc<Self::Target> {
        Arc::from(self)
    }
}

crate::managed!(
    (),
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

impl<T> Managed for Vec<T> where T: Send + Sync + 'static {}

impl<T> IntoShared for Vec<T>
where
    T: Send + Sync + 'static,
{
    type Target = Self;

    fn into_shared(self) -> Arc<Self::Target> {
        Arc::new(self)
    }
}

impl<T> Managed for Option<T> where T: Send + Sync + 'static {}

impl<T> IntoShared for Option<T>
where
    T: Send + Sync + 'static,
{
    type Target = Self;

    fn into_shared(self) -> Arc<Self::Target> {
        Arc::new(self)
    }
}

impl<K, V, S> Managed for HashMap<K, V, S>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
    S: Send + Sync + 'static,
{
}

impl<K, V, S> IntoShared for HashMap<K, V, S>
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
    S: Send + Sync + 'static,
{
    type Target = Self;

    fn into_shared(self) -> Arc<Self::Target> {
        Arc::new(self)
    }
}

impl<T> Managed for Mutex<T> where T: Send + 'static {}

impl<T> IntoShared for Mutex<T>
where
    T: Send + 'static,
{
    type Target = Self;

    fn into_shared(self) -> Arc<Self::Target> {
        Arc::new(self)
    }
}

impl<T> Managed for RwLock<T> where T: Send + Sync + 'static {}

impl<T> IntoShared for RwLock<T>
where
    T: Send + Sync + 'static,
{
    type Target = Self;

    fn into_shared(self) -> Arc<Self::Target> {
        Arc::new(self)
    }
}
