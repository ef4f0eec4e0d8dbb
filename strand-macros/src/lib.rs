//! Procedural macros for the strand scheduler.
//!
//! - `#[strand::main]` runs an `async fn main` as the entry task of a fresh
//!   runtime,
//! - `#[strand::test]` does the same for an `async` test function,
//! - `join!` polls several futures concurrently inside the current task.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Error, Expr, ItemFn, Token, parse_macro_input};

/// Polls every future concurrently and returns their outputs as a tuple,
/// in argument order.
///
/// The futures run inside the calling task; nothing is spawned. A single
/// argument is simply awaited, and no argument yields `()`.
#[proc_macro]
pub fn join(input: TokenStream) -> TokenStream {
    let parser = Punctuated::<Expr, Token![,]>::parse_terminated;
    let futures = match parser.parse(input) {
        Ok(futures) => futures,
        Err(err) => return err.to_compile_error().into(),
    };

    let futures: Vec<Expr> = futures.into_iter().collect();

    match futures.len() {
        0 => quote! { () }.into(),
        1 => {
            let future = &futures[0];
            quote! { (#future).await }.into()
        }
        _ => expand_join(&futures).into(),
    }
}

fn expand_join(futures: &[Expr]) -> TokenStream2 {
    let pinned: Vec<_> = (0..futures.len()).map(|i| format_ident!("__strand_f{}", i)).collect();
    let outputs: Vec<_> = (0..futures.len()).map(|i| format_ident!("__strand_o{}", i)).collect();

    quote! {
        {
            #(
                let mut #pinned = ::std::boxed::Box::pin(#futures);
                let mut #outputs = ::core::option::Option::None;
            )*

            ::std::future::poll_fn(move |cx| {
                #(
                    if #outputs.is_none() {
                        if let ::std::task::Poll::Ready(value) =
                            ::std::future::Future::poll(#pinned.as_mut(), cx)
                        {
                            #outputs = ::core::option::Option::Some(value);
                        }
                    }
                )*

                if true #(&& #outputs.is_some())* {
                    ::std::task::Poll::Ready((
                        #(#outputs.take().unwrap(),)*
                    ))
                } else {
                    ::std::task::Poll::Pending
                }
            })
            .await
        }
    }
}

/// Marks `async fn main` as the entry task of a strand runtime.
///
/// The function body runs on a runtime built with the default
/// configuration. If the entry task fails, `main` panics with the task's
/// error.
#[proc_macro_attribute]
pub fn main(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    if let Err(err) = check_entry(&attr, &input, "main") {
        return err.to_compile_error().into();
    }

    if input.sig.ident != "main" {
        return Error::new_spanned(&input.sig.ident, "#[strand::main] must be used on fn main")
            .to_compile_error()
            .into();
    }

    expand_entry(input, quote! {}).into()
}

/// Runs an `async` test function as the entry task of a fresh runtime.
///
/// The test fails if the entry task fails.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    if let Err(err) = check_entry(&attr, &input, "test") {
        return err.to_compile_error().into();
    }

    expand_entry(input, quote! { #[::core::prelude::v1::test] }).into()
}

fn check_entry(attr: &TokenStream, input: &ItemFn, name: &str) -> Result<(), Error> {
    if !attr.is_empty() {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            format!("#[strand::{name}] takes no arguments"),
        ));
    }

    if input.sig.asyncness.is_none() {
        return Err(Error::new_spanned(
            input.sig.fn_token,
            format!("#[strand::{name}] must be used on an async function"),
        ));
    }

    Ok(())
}

fn expand_entry(input: ItemFn, extra_attr: TokenStream2) -> TokenStream2 {
    let ItemFn {
        attrs,
        vis,
        mut sig,
        block,
    } = input;

    sig.asyncness = None;

    quote! {
        #extra_attr
        #(#attrs)*
        #vis #sig {
            let runtime = ::strand::Runtime::builder().build();

            match runtime.block_on(async move #block) {
                ::core::result::Result::Ok(output) => output,
                ::core::result::Result::Err(err) => ::core::panic!("entry task failed: {}", err),
            }
        }
    }
}
