mod attrs;
mod impls;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::{DeriveInput, Result as SynResult};

#[proc_macro_derive(Inject, attributes(inject))]
pub fn derive_inject(item: TokenStream) -> TokenStream {
    match inject_impl(item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn inject_impl(item: TokenStream) -> SynResult<TokenStream2> {
    let input = syn::parse::<DeriveInput>(item)?;
    let expanded = impls::expand_implementation(input)?;
    Ok(expanded)
}
