use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::container::injector::{Injector, InjectorError};
use crate::container::Binding;
use crate::key::TypeKey;

impl<I> Injector for Arc<I>
where
    I: Injector + ?Sized,
{
    fn dyn_get(&self, key: &TypeKey) -> Result<Binding, InjectorError> {
        (**self).dyn_get(key)
    }

    fn dyn_get_tag(&self, tag: &str) -> Result<Binding, InjectorError> {
        (**self).dyn_get_tag(tag)
    }
}

impl<I> Injector for Box<I>
where
    I: Injector + ?Sized,
{
    fn dyn_get(&self, key: &TypeKey) -> Result<Binding, InjectorError> {
        (**self).dyn_get(key)
    }

    fn dyn_get_tag(&self, tag: &str) -> Result<Binding, InjectorError> {
        (**self).dyn_get_tag(tag)
    }
}

// The lock is held for the duration of each lookup, parent delegation
// included.
impl<I> Injector for RwLock<I>
where
    I: Injector,
{
    fn dyn_get(&self, key: &TypeKey) -> Result<Binding, InjectorError> {
        self.read().dyn_get(key)
    }

    fn dyn_get_tag(&self, tag: &str) -> Result<Binding, InjectorError> {
        self.read().dyn_get_tag(tag)
    }
}

impl<I> Injector for Mutex<I>
where
    I: Injector,
{
    fn dyn_get(&self, key: &TypeKey) -> Result<Binding, InjectorError> {
        self.lock().dyn_get(key)
    }

    fn dyn_get_tag(&self, tag: &str) -> Result<Binding, InjectorError> {
        self.lock().dyn_get_tag(tag)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use crate::container::injector::{MockInjector, TypedInjector};

    use super::*;

    fn injector() -> MockInjector {
        let mut injector = MockInjector::new();
        injector
            .expect_dyn_get()
            .returning(|_| Ok(Binding::new(Arc::new(7u8))));
        injector
            .expect_dyn_get_tag()
            .returning(|_| Ok(Binding::new(Arc::new(8u8))));
        injector
    }

    #[test]
    fn forwarding_injectors_succeed() {
        let shared: Arc<dyn Injector> = Arc::new(injector());
        assert_eq!(*shared.get::<u8>().unwrap(), 7);
        assert_eq!(*shared.get_tag::<u8>("tag").unwrap(), 8);

        let boxed: Box<dyn Injector> = Box::new(injector());
        assert_eq!(*boxed.get::<u8>().unwrap(), 7);

        let mutex = Mutex::new(injector());
        assert_eq!(*mutex.get_tag::<u8>("tag").unwrap(), 8);
    }

    #[test]
    fn rw_lock_injector_succeeds_across_threads() {
        let shared = Arc::new(RwLock::new(injector()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || *shared.get::<u8>().unwrap())
            })
            .collect();

        handles
            .into_iter()
            .for_each(|h| assert_eq!(h.join().expect("Each thread should not `panic!()`"), 7));
    }
}
