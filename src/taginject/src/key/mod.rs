//! Runtime identities of registered types.

use std::any::{self, TypeId};
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};

use crate::container::{Binding, Managed};

/// Converts a binding into one holding the shared value as an interface.
pub type Caster = fn(&Binding) -> Option<Binding>;

/// The identity of a type used as a lookup key in a registry.
///
/// Two keys are equal if and only if they were built for the same type. The
/// type name is only kept for diagnostics. A key built for an interface, that
/// is a trait object type declared with [`interface!`], additionally carries a
/// [`Caster`] which recognizes bindings of the interface's implementations.
///
/// Pointer normalization happens at the API boundary rather than in the key:
/// values registered through `Arc<T>` or `Box<T>` are stored under the key of
/// `T`, and dependencies of type `Arc<T>` are looked up with the key of `T`.
///
/// # Examples
///
/// ```rust
/// # use taginject::key::TypeKey;
/// assert_eq!(TypeKey::of::<String>(), TypeKey::of_val(&String::new()));
/// assert_ne!(TypeKey::of::<String>(), TypeKey::of::<&'static str>());
/// assert!(!TypeKey::of::<String>().is_interface());
/// ```
///
/// [`interface!`]: crate::interface
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
    caster: Option<Caster>,
}

impl TypeKey {
    /// Returns the key of `T`.
    pub fn of<T>() -> Self
    where
        T: Managed + ?Sized,
    {
        let caster = if T::INTERFACE {
            Some(cast_binding::<T> as Caster)
        } else {
            None
        };

        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
            caster,
        }
    }

    /// Returns the key of the type of `value`.
    pub fn of_val<T>(_value: &T) -> Self
    where
        T: Managed + ?Sized,
    {
        Self::of::<T>()
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// Returns true if the key denotes an interface declared with
    /// [`interface!`](crate::interface).
    pub fn is_interface(&self) -> bool {
        self.caster.is_some()
    }

    /// Tries to view the value of `binding` as this key's interface.
    ///
    /// Always returns [`None`] for keys of concrete types.
    pub fn cast(&self, binding: &Binding) -> Option<Binding> {
        self.caster.and_then(|caster| caster(binding))
    }
}

fn cast_binding<T>(binding: &Binding) -> Option<Binding>
where
    T: Managed + ?Sized,
{
    T::cast_from(binding).map(Binding::new)
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(self, f)
    }
}

impl Display for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name)
    }
}
