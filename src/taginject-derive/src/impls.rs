use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::spanned::Spanned;
use syn::{
    Data, DataStruct, DeriveInput, Error as SynError, Fields, Index, Member, Result as SynResult,
    Type,
};

use crate::attrs::{self, AnnotationData, FieldAttributeData};

#[derive(Debug)]
struct FieldData {
    member: Member,
    name: String,
    ty: Type,
    annotations: Vec<AnnotationData>,
}

pub fn expand_implementation(input: DeriveInput) -> SynResult<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(SynError::new(
            input.ident.span(),
            "`#[derive(Inject)]` can only be used on structs",
        ));
    };

    let fields = parse_fields(data)?;
    expand_inject_implementation(&input, &fields)
}

fn parse_fields(data: &DataStruct) -> SynResult<Vec<FieldData>> {
    let mut res = Vec::new();

    let fields = match &data.fields {
        Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
        Fields::Unnamed(fields) => fields.unnamed.iter().collect(),
        Fields::Unit => Vec::new(),
    };

    for (position, field) in fields.into_iter().enumerate() {
        let FieldAttributeData::Annotations(annotations) =
            attrs::parse_field_attributes(&field.attrs)?
        else {
            continue;
        };

        let (member, name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.to_string()),
            None => (
                Member::Unnamed(Index {
                    index: position as u32,
                    span: field.span(),
                }),
                position.to_string(),
            ),
        };

        res.push(FieldData {
            member,
            name,
            ty: field.ty.clone(),
            annotations,
        });
    }

    Ok(res)
}

fn expand_inject_implementation(
    input: &DeriveInput,
    fields: &[FieldData],
) -> SynResult<TokenStream2> {
    let self_type = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut predicates = where_clause
        .map(|clause| clause.predicates.iter().map(ToTokens::to_token_stream).collect())
        .unwrap_or_else(Vec::new);
    predicates.extend(fields.iter().map(|field| {
        let ty = &field.ty;
        quote! { #ty: taginject::container::injector::Dependency }
    }));

    let descriptors = fields
        .iter()
        .map(|field| {
            let name = &field.name;
            let type_name = field.ty.to_token_stream().to_string();
            let annotations = field
                .annotations
                .iter()
                .map(|annotation| {
                    let tag = &annotation.tag;
                    match &annotation.value {
                        Some(value) => quote! {
                            taginject::container::injector::Annotation::valued(#tag, #value),
                        },
                        None => quote! {
                            taginject::container::injector::Annotation::marker(#tag),
                        },
                    }
                })
                .collect::<TokenStream2>();

            quote! {
                taginject::container::injector::FieldDescriptor::new(
                    #name,
                    #type_name,
                    &[#annotations],
                ),
            }
        })
        .collect::<TokenStream2>();

    let assignments = fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let member = &field.member;
            quote! { #index => self.#member = site.resolve()?, }
        })
        .collect::<TokenStream2>();

    Ok(quote! {
        impl #impl_generics taginject::container::injector::Inject for #self_type #ty_generics
        where
            #(#predicates,)*
        {
            fn fields() -> &'static [taginject::container::injector::FieldDescriptor] {
                const FIELDS: &[taginject::container::injector::FieldDescriptor] = &[
                    #descriptors
                ];
                FIELDS
            }

            #[allow(unused_variables)]
            fn inject_field(
                &mut self,
                index: usize,
                site: taginject::container::injector::FieldSite<'_>,
            ) -> std::result::Result<(), taginject::container::injector::InjectorError> {
                match index {
                    #assignments
                    _ => {}
                }
                Ok(())
            }
        }
    })
}
