//! Capability-related macros.
//!
//! This module contains:
//! - `#[capability]` - Builds the forwarding table of a delegate trait and
//!   the forwarding impl for `MultiDelegate<dyn Trait>`

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    FnArg, Ident, ItemTrait, ReturnType, TraitItem, TraitItemFn, Type, TypeParamBound,
    parse_macro_input, parse_quote,
};

/// What the macro learns from one trait method.
struct Method<'a> {
    item: &'a TraitItemFn,
    /// Methods with a default body may be left out by delegates.
    optional: bool,
    /// Methods returning anything but `()` are value-returning calls.
    returns_value: bool,
}

impl Method<'_> {
    fn name(&self) -> String {
        self.item.sig.ident.to_string()
    }

    fn selector_ident(&self) -> Ident {
        format_ident!(
            "{}",
            self.name().to_uppercase(),
            span = self.item.sig.ident.span()
        )
    }
}

/// Implementation of the `#[capability]` macro.
pub fn capability_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "`#[capability]` takes no arguments",
        )
        .to_compile_error()
        .into();
    }
    let mut input = parse_macro_input!(item as ItemTrait);
    match expand(&mut input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &mut ItemTrait) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "capability traits cannot be generic",
        ));
    }
    require_delegate_supertrait(input);

    let methods = input
        .items
        .iter()
        .map(|item| match item {
            TraitItem::Fn(method) => Ok(Some(inspect(method))),
            TraitItem::Type(ty) => Err(syn::Error::new_spanned(
                ty,
                "capability traits cannot have associated types",
            )),
            TraitItem::Const(constant) => Err(syn::Error::new_spanned(
                constant,
                "capability traits cannot have associated constants",
            )),
            _ => Ok(None),
        })
        .filter_map(Result::transpose)
        .collect::<syn::Result<Vec<_>>>()?;

    let trait_name = &input.ident;
    let vis = &input.vis;
    let short_name = trait_name.to_string();
    // Qualified by module so same-named traits stay distinct.
    let capability = quote! { ::core::concat!(::core::module_path!(), "::", #short_name) };

    let table = methods.iter().map(|method| {
        let name = method.name();
        let constructor = if method.optional {
            quote! { optional }
        } else {
            quote! { required }
        };
        let pattern = if method.returns_value {
            quote! { ::chorus::CallPattern::ValueReturning }
        } else {
            quote! { ::chorus::CallPattern::Broadcast }
        };
        quote! { ::chorus::MethodDescriptor::#constructor(#name, #pattern) }
    });

    let selectors = methods.iter().map(|method| {
        let name = method.name();
        let ident = method.selector_ident();
        quote! {
            #[doc = concat!("Selector of `", #short_name, "::", #name, "`.")]
            #vis const #ident: ::chorus::Selector = ::chorus::Selector::new(#capability, #name);
        }
    });

    let forwarders = methods
        .iter()
        .map(|method| forwarder(trait_name, method))
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        #input

        impl ::chorus::Capability for dyn #trait_name {
            const DESCRIPTOR: &'static ::chorus::CapabilityDescriptor =
                &::chorus::CapabilityDescriptor::new(#capability, &[#(#table),*]);
        }

        impl dyn #trait_name {
            #(#selectors)*
        }

        impl #trait_name for ::chorus::MultiDelegate<dyn #trait_name> {
            #(#forwarders)*
        }
    })
}

fn inspect(item: &TraitItemFn) -> Method<'_> {
    let returns_value = match &item.sig.output {
        ReturnType::Default => false,
        ReturnType::Type(_, ty) => !matches!(&**ty, Type::Tuple(tuple) if tuple.elems.is_empty()),
    };
    Method {
        item,
        optional: item.default.is_some(),
        returns_value,
    }
}

/// The capability trait must extend `Delegate` so that `dyn Trait` can be
/// asked which methods it implements.
fn require_delegate_supertrait(input: &mut ItemTrait) {
    let present = input.supertraits.iter().any(|bound| {
        matches!(bound, TypeParamBound::Trait(t)
            if t.path.segments.last().is_some_and(|s| s.ident == "Delegate"))
    });
    if !present {
        input.colon_token.get_or_insert_with(Default::default);
        input.supertraits.push(parse_quote!(::chorus::Delegate));
    }
}

/// Generate the `MultiDelegate` body of one method.
///
/// Arguments are renamed and passed to every delegate unchanged; `&mut`
/// arguments are reborrowed per delegate.
fn forwarder(trait_name: &Ident, method: &Method<'_>) -> syn::Result<TokenStream2> {
    let mut sig = method.item.sig.clone();
    let mut has_receiver = false;
    let mut args = Vec::new();

    for (i, input) in sig.inputs.iter_mut().enumerate() {
        match input {
            FnArg::Receiver(receiver) => {
                if receiver.reference.is_none() || receiver.mutability.is_some() {
                    return Err(syn::Error::new_spanned(
                        receiver,
                        "forwarded methods must take `&self`",
                    ));
                }
                has_receiver = true;
            }
            FnArg::Typed(typed) => {
                let ident = format_ident!("arg{}", i);
                typed.attrs.clear();
                typed.pat = Box::new(parse_quote!(#ident));
                args.push(match &*typed.ty {
                    Type::Reference(reference) if reference.mutability.is_some() => {
                        quote! { &mut *#ident }
                    }
                    _ => quote! { #ident },
                });
            }
        }
    }
    if !has_receiver {
        return Err(syn::Error::new_spanned(
            &method.item.sig,
            "forwarded methods must take `&self`",
        ));
    }

    let name = &sig.ident;
    let selector = method.selector_ident();
    let body = if method.returns_value {
        quote! {
            ::chorus::MultiDelegate::call(self, <dyn #trait_name>::#selector, |delegate| {
                #trait_name::#name(delegate, #(#args),*)
            })
            .unwrap_or_default()
        }
    } else {
        quote! {
            ::chorus::MultiDelegate::broadcast(self, <dyn #trait_name>::#selector, |delegate| {
                #trait_name::#name(delegate, #(#args),*)
            });
        }
    };

    Ok(quote! {
        #sig {
            #body
        }
    })
}
