use matches2::option_match;
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::parse::{Parse, ParseStream};
use syn::{Error, Result};

use crate::util::{self, Attr, Named};

pub(crate) fn imp(args: TokenStream, input: TokenStream) -> Result<TokenStream> {
    let input: syn::DeriveInput = syn::parse2(input)?;
    let generics = util::parse_generics(&input);

    let mut crate_name = quote!(::tickec);
    let mut init = quote!(::std::default::Default::default());
    let mut storage = None;

    if !args.is_empty() {
        let args: Attr<FnOpt> = syn::parse2(args)?;

        if let Some((_, ts)) =
            args.find_one(|opt| option_match!(opt, FnOpt::TickecAs(_, ts) => ts))?
        {
            crate_name = ts.clone();
        }

        if let Some((_, expr)) =
            args.find_one(|opt| option_match!(opt, FnOpt::Init(_, expr) => expr))?
        {
            init = expr.to_token_stream();
        }

        if let Some((_, ty)) =
            args.find_one(|opt| option_match!(opt, FnOpt::Storage(_, ty) => ty))?
        {
            storage = Some(ty.to_token_stream());
        }
    }

    let storage = match storage {
        Some(storage) => storage,
        None => quote!(#crate_name::storage::Vec<Self>),
    };

    let comp_impl = generics.impl_trait(
        quote!(#crate_name::Comp),
        quote! {
            type Storage = #storage;

            fn initial() -> Self {
                #init
            }
        },
    );

    Ok(quote! {
        #input

        #[automatically_derived]
        #comp_impl
    })
}

enum FnOpt {
    TickecAs(syn::token::Paren, TokenStream),
    Init(syn::Token![=], Box<syn::Expr>),
    Storage(syn::Token![=], Box<syn::Type>),
}

impl Parse for Named<FnOpt> {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse::<syn::Ident>()?;

        let value = match name.to_string().as_str() {
            "tickec_as" => {
                let inner;
                let paren = syn::parenthesized!(inner in input);
                let args = inner.parse()?;
                FnOpt::TickecAs(paren, args)
            }
            "init" => {
                let eq: syn::Token![=] = input.parse()?;
                let expr = input.parse::<syn::Expr>()?;
                FnOpt::Init(eq, Box::new(expr))
            }
            "storage" => {
                let eq: syn::Token![=] = input.parse()?;
                let ty = input.parse::<syn::Type>()?;
                FnOpt::Storage(eq, Box::new(ty))
            }
            _ => return Err(Error::new_spanned(&name, format!("Unknown argument `{}`", name))),
        };

        Ok(Named { name, value })
    }
}
