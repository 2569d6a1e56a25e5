//! Adoption macros.
//!
//! This module contains:
//! - `#[adopt]` - Records which methods an impl block defines
//! - `#[derive(Delegate)]` - Answers `responds_to` from the adopted capabilities

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Attribute, DeriveInput, ImplItem, ItemImpl, Path, Token, parse_macro_input,
    punctuated::Punctuated,
};

/// Implementation of the `#[adopt]` macro.
pub fn adopt_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "`#[adopt]` takes no arguments",
        )
        .to_compile_error()
        .into();
    }
    let input = parse_macro_input!(item as ItemImpl);

    let capability = match &input.trait_ {
        Some((None, path, _)) => path,
        _ => {
            return syn::Error::new_spanned(
                &input.self_ty,
                "`#[adopt]` must be placed on `impl Capability for Type`",
            )
            .to_compile_error()
            .into();
        }
    };

    let methods = input.items.iter().filter_map(|item| match item {
        ImplItem::Fn(method) => Some(method.sig.ident.to_string()),
        _ => None,
    });

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        #input

        impl #impl_generics ::chorus::Adopts<dyn #capability> for #self_ty #where_clause {
            const METHODS: &'static [&'static str] = &[#(#methods),*];
        }
    };

    TokenStream::from(expanded)
}

/// Implementation of `#[derive(Delegate)]`.
pub fn derive_delegate_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let capabilities = match adopted_capabilities(&input.attrs) {
        Ok(capabilities) => capabilities,
        Err(err) => return err.to_compile_error().into(),
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = capabilities
        .iter()
        .map(|capability| {
            quote! { <Self as ::chorus::Adopts<dyn #capability>>::adopts_selector(selector) }
        })
        .reduce(|checks, check| quote! { #checks || #check })
        .unwrap_or_else(|| {
            quote! {
                let _ = selector;
                false
            }
        });

    let expanded = quote! {
        #[automatically_derived]
        impl #impl_generics ::chorus::Delegate for #name #ty_generics #where_clause {
            fn responds_to(&self, selector: ::chorus::Selector) -> bool {
                #body
            }
        }
    };

    TokenStream::from(expanded)
}

/// Collect the paths listed in every `#[adopts(..)]` attribute.
fn adopted_capabilities(attrs: &[Attribute]) -> syn::Result<Vec<Path>> {
    let mut capabilities = Vec::new();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("adopts")) {
        let paths = attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
        capabilities.extend(paths);
    }
    Ok(capabilities)
}
