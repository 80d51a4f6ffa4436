use std::borrow::Cow;

use crate::container::injector::UntaggedFields;

/// The tag name used when none is configured.
pub const DEFAULT_TAG: &str = "inject";

/// Settings of a [`Registry`](crate::container::registry::Registry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    tag: Cow<'static, str>,
    untagged: UntaggedFields,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Returns the tag name honoured by `apply`.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns what `apply` does with fields lacking an annotation.
    pub fn untagged(&self) -> UntaggedFields {
        self.untagged
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tag: Cow::Borrowed(DEFAULT_TAG),
            untagged: UntaggedFields::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.config.tag = tag.into();
        self
    }

    pub fn untagged(mut self, untagged: UntaggedFields) -> Self {
        self.config.untagged = untagged;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_succeeds() {
        let config = Config::default();
        assert_eq!(config.tag(), "inject");
        assert_eq!(config.untagged(), UntaggedFields::Resolve);
        assert_eq!(Config::builder().build(), config);
    }

    #[test]
    fn config_builder_succeeds() {
        let config = Config::builder()
            .tag(String::from("wire"))
            .untagged(UntaggedFields::Skip)
            .build();
        assert_eq!(config.tag(), "wire");
        assert_eq!(config.untagged(), UntaggedFields::Skip);
    }
}
