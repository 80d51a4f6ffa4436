use crate::container::injector::{Dependency, Injector, InjectorError, Lookup};

/// A callable whose parameters can be resolved from an [`Injector`].
///
/// Implemented by every `FnOnce(D1, D2, ...) -> R` where each `Di` is a
/// [`Dependency`]. Parameters are resolved in positional order before the
/// call; the first failure aborts and the callable is never run. The output
/// is returned as is, and panics raised by the callable propagate to the
/// caller.
///
/// Rust has no variadic functions, so [`Invocable`] is only implemented for
/// callables taking at most 16 parameters. Parameter types of closures must
/// be annotated.
pub trait Invocable<Args> {
    /// The value returned by the callable.
    type Output;

    /// The number of parameters.
    const ARITY: usize;

    /// Resolves the parameters and calls `self`. The parameter at position
    /// `i` is looked up by `tags[i]` if present, by its declared type
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns the first error met while resolving a parameter.
    fn invoke_with(self, injector: &dyn Injector, tags: &[&str]) -> Result<Self::Output, InjectorError>;
}

impl<F, R> Invocable<()> for F
where
    F: FnOnce() -> R,
{
    type Output = R;

    const ARITY: usize = 0;

    fn invoke_with(self, _injector: &dyn Injector, _tags: &[&str]) -> Result<Self::Output, InjectorError> {
        Ok(self())
    }
}

macro_rules! count {
    () => { 0usize };
    ($head:ident $(, $tail:ident)*) => { 1usize + count!($($tail),*) };
}

macro_rules! for_all_tuples {
    ($implementation:ident) => {
        $implementation!(D1);
        $implementation!(D1, D2);
        $implementation!(D1, D2, D3);
        $implementation!(D1, D2, D3, D4);
        $implementation!(D1, D2, D3, D4, D5);
        $implementation!(D1, D2, D3, D4, D5, D6);
        $implementation!(D1, D2, D3, D4, D5, D6, D7);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13, D14);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13, D14, D15);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13, D14, D15, D16);
    };
}

macro_rules! impl_invocable {
    ($($dep:ident),*) => {
        #[allow(non_snake_case)]
        impl<F, R, $($dep,)*> Invocable<($($dep,)*)> for F
        where
            F: FnOnce($($dep,)*) -> R,
            $($dep: Dependency,)*
        {
            type Output = R;

            const ARITY: usize = count!($($dep),*);

            #[allow(unused_assignments)]
            fn invoke_with(
                self,
                injector: &dyn Injector,
                tags: &[&str],
            ) -> Result<Self::Output, InjectorError> {
                let mut position = 0;
                $(
                    let $dep = Lookup::at(tags, position).resolve::<$dep, _>(injector)?;
                    position += 1;
                )*
                Ok(self($($dep,)*))
            }
        }
    };
}

for_all_tuples!(impl_invocable);

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Arc;

    use crate::container::injector::{MockInjector, TypedInjector};
    use crate::container::Binding;
    use crate::key::TypeKey;

    use super::*;

    fn injector() -> MockInjector {
        let mut injector = MockInjector::new();
        injector.expect_dyn_get().returning(|key| {
            if *key == TypeKey::of::<String>() {
                Ok(Binding::new(Arc::new(String::from("token"))))
            } else if *key == TypeKey::of::<i32>() {
                Ok(Binding::new(Arc::new(42i32)))
            } else {
                Err(InjectorError::NotFound { key: *key })
            }
        });
        injector.expect_dyn_get_tag().returning(|tag| match tag {
            "name" | "password" | "gender" => Ok(Binding::new(Arc::new(tag.to_string()))),
            _ => Err(InjectorError::TagNotFound {
                tag: tag.to_string(),
            }),
        });
        injector
    }

    fn arity<F, A>(_callable: &F) -> usize
    where
        F: Invocable<A>,
    {
        F::ARITY
    }

    #[test]
    fn invocable_arity_succeeds() {
        assert_eq!(arity(&|| ()), 0);
        assert_eq!(arity(&|_: i32| ()), 1);
        assert_eq!(arity(&|_: i32, _: String, _: Arc<i32>| ()), 3);
    }

    #[test]
    fn invoke_succeeds() {
        let injector = injector();

        let res = injector
            .invoke(|token: String, answer: Arc<i32>| format!("{token}-{answer}"))
            .unwrap();
        assert_eq!(res, "token-42");

        assert_eq!(injector.invoke(|| "no parameter").unwrap(), "no parameter");
    }

    #[test]
    fn invoke_tag_succeeds_when_tags_are_fewer_than_parameters() {
        let injector = injector();

        let res = injector
            .invoke_tag(
                &["name", "password", "gender"],
                |name: String, password: String, gender: String, token: String| {
                    [name, password, gender, token].join(",")
                },
            )
            .unwrap();
        assert_eq!(res, "name,password,gender,token");
    }

    #[test]
    fn invoke_tag_succeeds_when_tags_are_more_than_parameters() {
        let injector = injector();

        let res = injector
            .invoke_tag(&["name", "password", "unknown"], |name: String| name)
            .unwrap();
        assert_eq!(res, "name");
    }

    #[test]
    fn invoke_fails_without_calling_when_parameter_not_found() {
        let injector = injector();
        let called = Cell::new(false);

        let res = injector.invoke(|_: String, _: f64| called.set(true));
        assert!(matches!(
            res,
            Err(InjectorError::NotFound { key }) if key == TypeKey::of::<f64>()
        ));
        assert!(!called.get());

        let res = injector.invoke_tag(&["missing"], |_: String| called.set(true));
        assert!(matches!(res, Err(InjectorError::TagNotFound { .. })));
        assert!(!called.get());
    }

    #[test]
    #[should_panic(expected = "callable panicked")]
    fn invoke_propagates_panics() {
        let injector = injector();
        let _ = injector.invoke(|_: i32| -> () { panic!("callable panicked") });
    }
}
