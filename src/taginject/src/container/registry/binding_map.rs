use std::collections::HashMap;

use crate::container::Binding;
use crate::key::TypeKey;

#[derive(Debug, Default)]
pub struct BindingMap {
    bindings: HashMap<TypeKey, Binding>,
}

impl BindingMap {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Binds `binding` to `key`, returning the binding it replaces.
    pub fn insert(&mut self, key: TypeKey, binding: Binding) -> Option<Binding> {
        self.bindings.insert(key, binding)
    }

    /// Finds the binding for `key`, falling back to the first concrete binding
    /// accepted by an interface key. The scan follows the map's iteration
    /// order, so the winner among several candidates is unspecified.
    pub fn find(&self, key: &TypeKey) -> Option<Binding> {
        if let Some(binding) = self.bindings.get(key) {
            return Some(binding.clone());
        }

        if key.is_interface() {
            self.bindings.values().find_map(|binding| key.cast(binding))
        } else {
            None
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &TypeKey> {
        self.bindings.keys()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::container::Managed;

    use super::*;

    trait Animal: Send + Sync {
        fn sound(&self) -> &'static str;
    }

    struct Dog;

    impl Animal for Dog {
        fn sound(&self) -> &'static str {
            "woof"
        }
    }

    struct Cow;

    impl Animal for Cow {
        fn sound(&self) -> &'static str {
            "moo"
        }
    }

    crate::managed!(Dog, Cow);
    crate::interface!(dyn Animal = [Dog, Cow]);

    fn insert<T: Managed>(map: &mut BindingMap, value: T) -> Option<Binding> {
        let binding = Binding::new(Arc::new(value));
        map.insert(*binding.key(), binding)
    }

    #[test]
    fn binding_map_insert_succeeds() {
        let mut map = BindingMap::new();
        assert!(map.is_empty());
        assert!(insert(&mut map, 42i32).is_none());
        assert!(insert(&mut map, "str").is_none());
        assert_eq!(map.len(), 2);

        let replaced = insert(&mut map, 43i32).unwrap();
        assert_eq!(*replaced.downcast::<i32>().unwrap(), 42);
        assert_eq!(
            *map.find(&TypeKey::of::<i32>()).unwrap().downcast::<i32>().unwrap(),
            43
        );
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn binding_map_find_succeeds_when_key_is_interface() {
        let mut map = BindingMap::new();
        insert(&mut map, 0i32);
        insert(&mut map, Dog);

        let binding = map.find(&TypeKey::of::<dyn Animal>()).unwrap();
        assert_eq!(binding.downcast::<dyn Animal>().unwrap().sound(), "woof");

        insert(&mut map, Cow);
        let binding = map.find(&TypeKey::of::<dyn Animal>()).unwrap();
        let sound = binding.downcast::<dyn Animal>().unwrap().sound();
        assert!(sound == "woof" || sound == "moo");
    }

    #[test]
    fn binding_map_find_prefers_exact_match() {
        let mut map = BindingMap::new();
        insert(&mut map, Dog);
        let exact: Arc<dyn Animal> = Arc::new(Cow);
        let binding = Binding::new(exact);
        map.insert(*binding.key(), binding);

        let binding = map.find(&TypeKey::of::<dyn Animal>()).unwrap();
        assert_eq!(binding.downcast::<dyn Animal>().unwrap().sound(), "moo");
    }

    #[test]
    fn binding_map_find_fails_when_key_not_found() {
        let mut map = BindingMap::new();
        insert(&mut map, 0i32);

        assert!(map.find(&TypeKey::of::<i64>()).is_none());
        assert!(map.find(&TypeKey::of::<dyn Animal>()).is_none());
    }
}
