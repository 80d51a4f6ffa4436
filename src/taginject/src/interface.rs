/// Declares trait object types as interfaces and lists their implementations.
///
/// Rust has no runtime notion of "this type implements that trait", so an
/// interface enumerates the concrete types it accepts. Looking up an interface
/// in a [`Registry`] first tries an exact match (a value registered with
/// [`Registry::map_to`]), then scans the concrete bindings and returns the
/// first one whose type is listed here. When several listed types are
/// registered, which one wins is unspecified.
///
/// The trait must have `Send + Sync` as supertraits, and the implementations
/// must be declared with [`managed!`](crate::managed).
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use taginject::prelude::*;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "Hello".into()
///     }
/// }
///
/// taginject::managed!(English);
/// taginject::interface!(dyn Greeter = [English]);
///
/// let mut registry = Registry::new();
/// registry.map(English);
///
/// let greeter: Arc<dyn Greeter> = registry.get().unwrap();
/// assert_eq!(greeter.greet(), "Hello");
/// ```
///
/// [`Registry`]: crate::container::registry::Registry
/// [`Registry::map_to`]: crate::container::registry::Registry::map_to
#[macro_export]
macro_rules! interface {
    ($($interface:ty = [$($implementation:ty),* $(,)?]),+ $(,)?) => {
        $(
            impl $crate::container::Managed for $interface {
                const INTERFACE: bool = true;

                fn cast_from(
                    binding: &$crate::container::Binding,
                ) -> ::std::option::Option<::std::sync::Arc<Self>> {
                    $(
                        if let ::std::option::Option::Some(value) =
                            binding.downcast::<$implementation>()
                        {
                            let value: ::std::sync::Arc<Self> = value;
                            return ::std::option::Option::Some(value);
                        }
                    )*
                    ::std::option::Option::None
                }
            }
        )+
    };
}
