use std::any::Any;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::container::Managed;
use crate::key::TypeKey;

/// A registered value, shared and type-erased.
///
/// The value is kept as an `Arc<T>`; cloning a [`Binding`] clones the pointer,
/// so every clone refers to the same value.
#[derive(Clone)]
pub struct Binding {
    key: TypeKey,
    value: Arc<dyn Any + Send + Sync>,
}

impl Binding {
    pub fn new<T>(value: Arc<T>) -> Self
    where
        T: Managed + ?Sized,
    {
        Self {
            key: TypeKey::of::<T>(),
            value: Arc::new(value),
        }
    }

    /// Returns the key of the type the value was stored as.
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    pub fn is<T>(&self) -> bool
    where
        T: Managed + ?Sized,
    {
        self.value.is::<Arc<T>>()
    }

    /// Returns the shared value if it was stored as `T`.
    pub fn downcast<T>(&self) -> Option<Arc<T>>
    where
        T: Managed + ?Sized,
    {
        self.value.downcast_ref::<Arc<T>>().cloned()
    }
}

impl Debug for Binding {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Binding")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
