/// Makes concrete types storable in a registry.
///
/// Implements [`Managed`] and [`IntoShared`] for every listed type. The types
/// must be `Send + Sync + 'static`. Pointer types can't be listed: a value
/// registered through `Arc<T>` or `Box<T>` is always bound to `T`.
///
/// ```rust
/// use std::sync::Arc;
///
/// use taginject::prelude::*;
///
/// struct Database {
///     url: &'static str,
/// }
///
/// taginject::managed!(Database);
///
/// let mut registry = Registry::new();
/// registry.map(Arc::new(Database { url: "sqlite::memory:" }));
///
/// let database = registry.get::<Database>().unwrap();
/// assert_eq!(database.url, "sqlite::memory:");
/// ```
///
/// [`Managed`]: crate::container::Managed
/// [`IntoShared`]: crate::container::IntoShared
#[macro_export]
macro_rules! managed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::container::Managed for $ty {}

            impl $crate::container::IntoShared for $ty {
                type Target = Self;

                fn into_shared(self) -> ::std::sync::Arc<Self> {
                    ::std::sync::Arc::new(self)
                }
            }
        )*
    };
}
