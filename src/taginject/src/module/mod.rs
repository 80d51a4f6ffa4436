use std::error::Error;

use crate::container::registry::Registry;

/// A bundle of registrations.
pub trait Module: 'static {
    fn configure(&self, registry: &mut Registry) -> Result<(), Box<dyn Error + Send + Sync>>;
}

impl<F> Module for F
where
    F: Fn(&mut Registry) -> Result<(), Box<dyn Error + Send + Sync>> + 'static,
{
    fn configure(&self, registry: &mut Registry) -> Result<(), Box<dyn Error + Send + Sync>> {
        self(registry)
    }
}

/// A list of modules configured in insertion order.
///
/// Configuration stops at the first failing module.
#[derive(Default)]
pub struct Configuration {
    modules: Vec<Box<dyn Module>>,
}

impl Configuration {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with<M: Module>(mut self, module: M) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn compose(mut self, mut other: Configuration) -> Self {
        self.modules.append(&mut other.modules);
        self
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Module for Configuration {
    fn configure(&self, registry: &mut Registry) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.modules
            .iter()
            .try_for_each(|module| module.configure(registry))
    }
}
