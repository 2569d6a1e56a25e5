//! Procedural macros for Chorus.
//!
//! - [`macro@capability`] turns a trait into a capability that a
//!   `MultiDelegate` can forward.
//! - [`macro@adopt`] records which methods of a capability a type implements.
//! - [`derive@Delegate`] answers `responds_to` from the adopted capabilities.
//!
//! Generated code refers to `::chorus`, so these macros are meant to be used
//! through the facade crate.

use proc_macro::TokenStream;

mod adopt;
mod capability;

/// Declare a delegate trait as a capability.
///
/// Methods with a default body are optional, the others are required.
/// Methods returning `()` are broadcast to every delegate; the others return
/// the last delegate's answer, or `Default::default()` when nobody answers.
///
/// Besides the trait itself this generates:
/// - `impl Capability for dyn Trait`, the method table
/// - one `Selector` constant per method on `dyn Trait`, named after the
///   method in upper case
/// - `impl Trait for MultiDelegate<dyn Trait>`, the forwarding
///
/// The capability is named by its module path and trait name, so traits
/// with the same name in different modules never share selectors.
///
/// The trait gains a `Delegate` supertrait if it does not name one. Methods
/// must take `&self`; arguments are handed to every delegate, so they must be
/// `Copy` or `&mut` references (reborrowed per delegate).
///
/// # Example
///
/// ```rust,ignore
/// #[chorus::capability]
/// pub trait ObjectDelegate {
///     fn did_something(&self);
///     fn return_result(&self) -> i64;
///     fn did_something_optional(&self) {}
/// }
///
/// assert_eq!(<dyn ObjectDelegate>::DID_SOMETHING.method(), "did_something");
/// ```
#[proc_macro_attribute]
pub fn capability(attr: TokenStream, item: TokenStream) -> TokenStream {
    capability::capability_impl(attr, item)
}

/// Mark an `impl Capability for Type` block as the adoption of that capability.
///
/// The impl is kept as written and `Adopts<dyn Capability>` is generated for
/// `Type`, listing the methods the block defines.
#[proc_macro_attribute]
pub fn adopt(attr: TokenStream, item: TokenStream) -> TokenStream {
    adopt::adopt_impl(attr, item)
}

/// Derive macro for implementing the `Delegate` trait.
///
/// Capabilities are listed with `#[adopts(A, B)]`, each backed by an
/// `#[adopt]` impl. A type without `#[adopts]` responds to nothing.
#[proc_macro_derive(Delegate, attributes(adopts))]
pub fn derive_delegate(input: TokenStream) -> TokenStream {
    adopt::derive_delegate_impl(input)
}
