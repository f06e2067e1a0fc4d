use proc_macro::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::{Attribute, Data, DeriveInput, Field, Fields, Index, parse_macro_input, spanned::Spanned};

/// Derives `crate::walk::Walk` for an AST node.
///
/// Every field is walked in declaration order. Leaf fields (spans, flags,
/// operators) opt out with `#[walk(skip)]`.
#[proc_macro_derive(WalkAst, attributes(walk))]
pub fn derive_walk_ast(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let span = input.span();

    let walk_body = match generate_walk_body(&input.data) {
        Ok(body) => body,
        Err(err) => return err.into_compile_error().into(),
    };

    let expanded = quote_spanned! {span =>
        impl<'ast> crate::walk::Walk<'ast> for #name {
            #[inline(always)]
            #[allow(unused_variables)]
            fn walk<V: crate::walk::Visitor<'ast> + ?Sized>(
                &self,
                a: &'ast crate::ast::AstArena,
                v: &mut V
            ) {
                #walk_body
            }
        }
    };

    expanded.into()
}

fn is_skipped(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skip = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident("walk")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported walk attribute, expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

fn generate_walk_body(data: &Data) -> syn::Result<proc_macro2::TokenStream> {
    match data {
        Data::Struct(data_struct) => generate_fields_walk(&data_struct.fields),
        Data::Enum(data_enum) => {
            let arms = data_enum
                .variants
                .iter()
                .map(|variant| generate_variant_arm(&variant.ident, &variant.fields))
                .collect::<syn::Result<Vec<_>>>()?;

            Ok(quote! {
                match self {
                    #(#arms)*
                }
            })
        }
        Data::Union(u) => Err(syn::Error::new_spanned(
            u.union_token,
            "WalkAst cannot be derived for unions",
        )),
    }
}

fn generate_fields_walk(fields: &Fields) -> syn::Result<proc_macro2::TokenStream> {
    let mut walk_calls = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        if is_skipped(&field.attrs)? {
            continue;
        }
        let access = match &field.ident {
            Some(ident) => quote! { &self.#ident },
            None => {
                let index = Index::from(i);
                quote! { &self.#index }
            }
        };
        walk_calls.push(quote! { crate::walk::Walk::walk(#access, a, v); });
    }

    Ok(quote! { #(#walk_calls)* })
}

/// Pattern binding for one variant field; skipped fields bind to `_`.
fn binding(field: &Field, i: usize) -> syn::Result<(proc_macro2::TokenStream, Option<syn::Ident>)> {
    let skip = is_skipped(&field.attrs)?;
    Ok(match (&field.ident, skip) {
        (Some(ident), true) => (quote! { #ident: _ }, None),
        (Some(ident), false) => (quote! { #ident }, Some(ident.clone())),
        (None, true) => (quote! { _ }, None),
        (None, false) => {
            let var = format_ident!("f{}", i);
            (quote! { #var }, Some(var))
        }
    })
}

fn generate_variant_arm(
    variant_name: &syn::Ident,
    fields: &Fields,
) -> syn::Result<proc_macro2::TokenStream> {
    let mut patterns = Vec::new();
    let mut walked = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let (pat, var) = binding(field, i)?;
        patterns.push(pat);
        walked.extend(var);
    }
    let walk_calls = walked
        .iter()
        .map(|var| quote! { crate::walk::Walk::walk(#var, a, v); });

    Ok(match fields {
        Fields::Unit => quote! { Self::#variant_name => {} },
        Fields::Named(_) => quote! {
            Self::#variant_name { #(#patterns),* } => {
                #(#walk_calls)*
            }
        },
        Fields::Unnamed(_) => quote! {
            Self::#variant_name(#(#patterns),*) => {
                #(#walk_calls)*
            }
        },
    })
}
