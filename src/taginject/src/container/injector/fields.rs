use tracing::trace;

use crate::container::injector::{Dependency, Injector, InjectorError, Lookup};

/// A struct whose fields can be populated from a registry.
///
/// Usually derived with `#[derive(Inject)]`, which builds the field table from
/// `#[inject(...)]` attributes:
///
/// - `#[inject]` marks the field for lookup by its declared type under the
///   default tag name `inject`;
/// - `#[inject("value")]` looks the field up by the tag `value`;
/// - `#[inject(name)]` and `#[inject(name = "value")]` do the same for a
///   custom tag name `name`;
/// - `#[inject(skip)]` leaves the field out of the table.
///
/// Each field type must implement [`Dependency`].
pub trait Inject {
    /// Returns the table of injectable fields in declaration order.
    fn fields() -> &'static [FieldDescriptor];

    /// Assigns the field at `index` of [`Inject::fields`] with the value
    /// resolved by `site`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value can't be resolved, leaving the field
    /// untouched.
    fn inject_field(&mut self, index: usize, site: FieldSite<'_>) -> Result<(), InjectorError>;
}

/// Metadata of one injectable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    type_name: &'static str,
    annotations: &'static [Annotation],
}

impl FieldDescriptor {
    pub const fn new(
        name: &'static str,
        type_name: &'static str,
        annotations: &'static [Annotation],
    ) -> Self {
        Self {
            name,
            type_name,
            annotations,
        }
    }

    /// Returns the field's name, or its position for tuple structs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field's declared type as written in the source.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn annotations(&self) -> &'static [Annotation] {
        self.annotations
    }

    /// Returns the annotation made under the tag name `tag`, if any.
    pub fn annotation(&self, tag: &str) -> Option<&'static Annotation> {
        self.annotations.iter().find(|annotation| annotation.tag == tag)
    }

    /// Decides how the field is resolved under the tag name `tag`.
    ///
    /// Returns [`None`] if the field should be left untouched.
    pub fn lookup(&self, tag: &str, untagged: UntaggedFields) -> Option<Lookup<'static>> {
        match self.annotation(tag) {
            Some(annotation) => Some(annotation.value().map_or(Lookup::Type, Lookup::Tag)),
            None if untagged == UntaggedFields::Resolve => Some(Lookup::Type),
            None => None,
        }
    }
}

/// One `tag` or `tag = "value"` entry attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Annotation {
    tag: &'static str,
    value: Option<&'static str>,
}

impl Annotation {
    /// A bare marker, requesting a lookup by the field's declared type.
    pub const fn marker(tag: &'static str) -> Self {
        Self { tag, value: None }
    }

    /// A valued annotation, requesting a lookup by the tag `value`.
    pub const fn valued(tag: &'static str, value: &'static str) -> Self {
        Self {
            tag,
            value: Some(value),
        }
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Returns the tag to look the field up by. An empty value counts as a
    /// bare marker.
    pub fn value(&self) -> Option<&'static str> {
        self.value.filter(|value| !value.is_empty())
    }
}

/// What happens to fields without an annotation for the active tag name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UntaggedFields {
    /// Resolve them by their declared type.
    #[default]
    Resolve,
    /// Leave them untouched.
    Skip,
}

/// Options of a single struct population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectOptions<'a> {
    pub tag: &'a str,
    pub untagged: UntaggedFields,
}

impl<'a> InjectOptions<'a> {
    pub fn new(tag: &'a str, untagged: UntaggedFields) -> Self {
        Self { tag, untagged }
    }
}

/// The resolution of one field, handed to [`Inject::inject_field`].
#[derive(Clone, Copy)]
pub struct FieldSite<'a> {
    injector: &'a dyn Injector,
    lookup: Lookup<'a>,
}

impl<'a> FieldSite<'a> {
    pub fn new(injector: &'a dyn Injector, lookup: Lookup<'a>) -> Self {
        Self { injector, lookup }
    }

    pub fn lookup(&self) -> Lookup<'a> {
        self.lookup
    }

    /// Resolves the field's value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value can't be found or has another type.
    pub fn resolve<D>(&self) -> Result<D, InjectorError>
    where
        D: Dependency,
    {
        self.lookup.resolve(self.injector)
    }
}

pub(super) fn apply<S>(
    injector: &dyn Injector,
    target: &mut S,
    options: &InjectOptions<'_>,
) -> Result<(), InjectorError>
where
    S: Inject,
{
    for (index, field) in S::fields().iter().enumerate() {
        let Some(lookup) = field.lookup(options.tag, options.untagged) else {
            trace!(field = field.name(), tag = options.tag, "skip untagged field");
            continue;
        };
        trace!(field = field.name(), ?lookup, "inject field");
        target.inject_field(index, FieldSite::new(injector, lookup))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::container::injector::{MockInjector, TypedInjector};
    use crate::container::Binding;
    use crate::key::TypeKey;

    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct User {
        name: String,
        password: String,
        usertype: String,
    }

    impl Inject for User {
        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[
                FieldDescriptor::new("name", "String", &[]),
                FieldDescriptor::new("password", "String", &[Annotation::valued("inject", "password")]),
                FieldDescriptor::new(
                    "usertype",
                    "String",
                    &[Annotation::marker("inject"), Annotation::valued("custom", "kind")],
                ),
            ];
            FIELDS
        }

        fn inject_field(&mut self, index: usize, site: FieldSite<'_>) -> Result<(), InjectorError> {
            match index {
                0 => self.name = site.resolve()?,
                1 => self.password = site.resolve()?,
                2 => self.usertype = site.resolve()?,
                _ => {}
            }
            Ok(())
        }
    }

    fn injector() -> MockInjector {
        let mut injector = MockInjector::new();
        injector
            .expect_dyn_get()
            .withf(|key| *key == TypeKey::of::<String>())
            .returning(|_| Ok(Binding::new(Arc::new(String::from("by-type")))));
        injector.expect_dyn_get_tag().returning(|tag| match tag {
            "password" | "kind" => Ok(Binding::new(Arc::new(format!("by-tag-{tag}")))),
            _ => Err(InjectorError::TagNotFound {
                tag: tag.to_string(),
            }),
        });
        injector
    }

    #[test]
    fn field_descriptor_lookup_succeeds() {
        let [name, password, usertype] = User::fields() else {
            unreachable!("`User` has three fields");
        };

        assert_eq!(name.lookup("inject", UntaggedFields::Resolve), Some(Lookup::Type));
        assert_eq!(name.lookup("inject", UntaggedFields::Skip), None);
        assert_eq!(
            password.lookup("inject", UntaggedFields::Skip),
            Some(Lookup::Tag("password"))
        );
        assert_eq!(password.lookup("custom", UntaggedFields::Skip), None);
        assert_eq!(usertype.lookup("inject", UntaggedFields::Skip), Some(Lookup::Type));
        assert_eq!(
            usertype.lookup("custom", UntaggedFields::Skip),
            Some(Lookup::Tag("kind"))
        );
    }

    #[test]
    fn annotation_value_treats_empty_value_as_marker() {
        assert_eq!(Annotation::valued("inject", "").value(), None);
        assert_eq!(Annotation::valued("inject", "name").value(), Some("name"));
        assert_eq!(Annotation::marker("inject").value(), None);
    }

    #[test]
    fn apply_succeeds_with_default_tag() {
        let injector = injector();
        let mut user = User::default();

        injector
            .apply_with(&mut user, &InjectOptions::new("inject", UntaggedFields::Resolve))
            .unwrap();
        assert_eq!(
            user,
            User {
                name: "by-type".into(),
                password: "by-tag-password".into(),
                usertype: "by-type".into(),
            }
        );
    }

    #[test]
    fn apply_succeeds_with_custom_tag_and_skip_policy() {
        let injector = injector();
        let mut user = User {
            name: "unchanged".into(),
            ..User::default()
        };

        injector
            .apply_with(&mut user, &InjectOptions::new("custom", UntaggedFields::Skip))
            .unwrap();
        assert_eq!(
            user,
            User {
                name: "unchanged".into(),
                password: String::new(),
                usertype: "by-tag-kind".into(),
            }
        );
    }

    #[test]
    fn apply_fails_and_keeps_earlier_fields_when_field_not_found() {
        let mut injector = MockInjector::new();
        injector
            .expect_dyn_get()
            .returning(|_| Ok(Binding::new(Arc::new(String::from("by-type")))));
        injector.expect_dyn_get_tag().returning(|tag| {
            Err(InjectorError::TagNotFound {
                tag: tag.to_string(),
            })
        });
        let mut user = User::default();

        let res = injector.apply_with(&mut user, &InjectOptions::new("inject", UntaggedFields::Resolve));
        assert!(matches!(res, Err(InjectorError::TagNotFound { tag }) if tag == "password"));
        assert_eq!(user.name, "by-type");
        assert_eq!(user.usertype, "");
    }
}
