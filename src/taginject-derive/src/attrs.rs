use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::token::{Comma, Eq as EqToken};
use syn::{Attribute, Error as SynError, Expr, ExprLit, Ident, Lit, LitStr, Meta, Result as SynResult};

pub const DEFAULT_TAG: &str = "inject";

const SKIP: &str = "skip";

#[derive(Debug)]
pub enum FieldAttributeData {
    Skip,
    Annotations(Vec<AnnotationData>),
}

#[derive(Debug)]
pub struct AnnotationData {
    pub tag: String,
    pub value: Option<String>,
}

enum Entry {
    Value(LitStr),
    Marker(Ident),
    Valued(Ident, LitStr),
}

impl Parse for Entry {
    fn parse(input: ParseStream) -> SynResult<Self> {
        if input.peek(LitStr) {
            return Ok(Entry::Value(input.parse()?));
        }

        let tag = input.call(Ident::parse_any)?;
        if input.peek(EqToken) {
            input.parse::<EqToken>()?;
            Ok(Entry::Valued(tag, input.parse()?))
        } else {
            Ok(Entry::Marker(tag))
        }
    }
}

pub fn parse_field_attributes(attrs: &[Attribute]) -> SynResult<FieldAttributeData> {
    let mut annotations: Vec<AnnotationData> = Vec::new();
    let mut skip = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident(DEFAULT_TAG)) {
        for (entry_span, entry) in parse_entries(attr)? {
            let annotation = match entry {
                Entry::Value(value) => AnnotationData {
                    tag: DEFAULT_TAG.to_string(),
                    value: Some(value.value()),
                },
                Entry::Marker(tag) if tag == SKIP => {
                    skip = Some(entry_span);
                    continue;
                }
                Entry::Marker(tag) => AnnotationData {
                    tag: tag.to_string(),
                    value: None,
                },
                Entry::Valued(tag, _) if tag == SKIP => {
                    return Err(SynError::new(tag.span(), "`skip` takes no value"));
                }
                Entry::Valued(tag, value) => AnnotationData {
                    tag: tag.to_string(),
                    value: Some(value.value()),
                },
            };

            if annotations.iter().any(|other| other.tag == annotation.tag) {
                return Err(SynError::new(
                    entry_span,
                    format!("tag name `{}` is annotated more than once", annotation.tag),
                ));
            }
            annotations.push(annotation);
        }
    }

    match skip {
        Some(span) if !annotations.is_empty() => Err(SynError::new(
            span,
            "a field marked with `#[inject(skip)]` can't have other annotations",
        )),
        Some(_) => Ok(FieldAttributeData::Skip),
        None => Ok(FieldAttributeData::Annotations(annotations)),
    }
}

fn parse_entries(attr: &Attribute) -> SynResult<Vec<(Span, Entry)>> {
    match &attr.meta {
        Meta::Path(path) => Ok(vec![(
            path.span(),
            Entry::Marker(Ident::new(DEFAULT_TAG, path.span())),
        )]),
        Meta::NameValue(nv) => {
            let Expr::Lit(ExprLit {
                lit: Lit::Str(value),
                ..
            }) = &nv.value
            else {
                return Err(SynError::new(
                    nv.value.span(),
                    "expects `#[inject = \"...\"]` to receive a string literal",
                ));
            };
            Ok(vec![(nv.span(), Entry::Value(value.clone()))])
        }
        Meta::List(list) if list.tokens.is_empty() => Ok(vec![(
            list.span(),
            Entry::Marker(Ident::new(DEFAULT_TAG, list.span())),
        )]),
        Meta::List(list) => {
            let entries = list.parse_args_with(Punctuated::<Entry, Comma>::parse_terminated)?;
            Ok(entries
                .into_iter()
                .map(|entry| (entry.span(), entry))
                .collect())
        }
    }
}

impl Entry {
    fn span(&self) -> Span {
        match self {
            Entry::Value(value) => value.span(),
            Entry::Marker(tag) => tag.span(),
            Entry::Valued(tag, _) => tag.span(),
        }
    }
}
