use proc_macro2::TokenStream;
use quote::{quote, quote_spanned, ToTokens};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Error, Result};

pub(crate) fn parse_generics(input: &syn::DeriveInput) -> ParsedGenerics {
    let generics = &input.generics;

    let (decl, usage) = if input.generics.params.is_empty() {
        (quote!(), quote!())
    } else {
        let decl: Vec<_> = input.generics.params.iter().collect();
        let usage: Vec<_> = input
            .generics
            .params
            .iter()
            .map(|param| match param {
                syn::GenericParam::Type(syn::TypeParam { ident, .. }) => quote!(#ident),
                syn::GenericParam::Lifetime(syn::LifetimeParam { lifetime, .. }) => {
                    quote!(#lifetime)
                }
                syn::GenericParam::Const(syn::ConstParam { ident, .. }) => quote!(#ident),
            })
            .collect();
        (
            quote_spanned!(generics.span() => <#(#decl),*>),
            quote_spanned!(generics.span() => <#(#usage),*>),
        )
    };

    let where_ = &input.generics.where_clause;

    ParsedGenerics { ident: input.ident.clone(), decl, usage, where_: where_.to_token_stream() }
}

pub(crate) struct ParsedGenerics {
    pub(crate) ident:  proc_macro2::Ident,
    pub(crate) decl:   TokenStream,
    pub(crate) usage:  TokenStream,
    pub(crate) where_: TokenStream,
}

impl ParsedGenerics {
    pub(crate) fn impl_trait(&self, trait_: TokenStream, body: TokenStream) -> TokenStream {
        let Self { ident, decl, usage, where_ } = self;
        quote! {
            impl #decl #trait_ for #ident #usage #where_ {
                #body
            }
        }
    }
}

/// A comma-separated list of `name` or `name = value` arguments.
pub(crate) struct Attr<T> {
    items: Vec<Named<T>>,
}

impl<T> Parse for Attr<T>
where
    Named<T>: Parse,
{
    fn parse(input: ParseStream) -> Result<Self> {
        let items = Punctuated::<Named<T>, syn::Token![,]>::parse_terminated(input)?;
        Ok(Self { items: items.into_iter().collect() })
    }
}

impl<T> Attr<T> {
    /// Finds the only argument matched by `f`.
    ///
    /// Returns an error if the argument is specified more than once.
    pub(crate) fn find_one<'t, U: ?Sized + 't>(
        &'t self,
        f: impl Fn(&'t T) -> Option<&'t U>,
    ) -> Result<Option<(&'t syn::Ident, &'t U)>> {
        let mut found = None;

        for item in &self.items {
            if let Some(value) = f(&item.value) {
                if found.is_some() {
                    return Err(Error::new_spanned(
                        &item.name,
                        format!("Argument `{}` cannot be specified multiple times", item.name),
                    ));
                }
                found = Some((&item.name, value));
            }
        }

        Ok(found)
    }
}

/// An argument together with the identifier that named it.
pub(crate) struct Named<T> {
    pub(crate) name:  syn::Ident,
    pub(crate) value: T,
}
