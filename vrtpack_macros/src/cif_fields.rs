// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use proc_macro::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, Ident, ItemStruct, Token};

/// Types stored directly as wire words, with no `size_words()` of their own.
static WORD_PRIMITIVES: &[(&str, u16)] = &[
    ("i32", 1),
    ("u32", 1),
    ("i64", 2),
    ("u64", 2),
    ("i128", 4),
    ("u128", 4),
];

struct CifFieldsArgs {
    cif_name: Ident,
    /// When set, the indicator-word ctx parameter is `Option<&CifN>` even
    /// for CIF0. Used by the acknowledge WIF/EIF field structs, where even
    /// the level-0 indicator word is conditionally present.
    optional: bool,
}

impl Parse for CifFieldsArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let cif_name = input.parse()?;
        let optional = if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            let flag: Ident = input.parse()?;
            flag == "optional"
        } else {
            false
        };
        Ok(CifFieldsArgs { cif_name, optional })
    }
}

pub fn cif_fields(attr: TokenStream, item: TokenStream) -> TokenStream {
    let CifFieldsArgs { cif_name, optional } = parse_macro_input!(attr as CifFieldsArgs);
    let input = parse_macro_input!(item as ItemStruct);
    let struct_name = input.ident;
    let cif_is_optional = optional || cif_name != "cif0";

    let mut members = Vec::new();
    let mut size_arms = Vec::new();
    let mut empty_arms = Vec::new();

    for field in input.fields {
        let name = field.ident.clone().expect("cif_fields requires named fields");
        let ty = field.ty.clone();
        let attr_name = format_ident!("{}_attributes", name);

        let field_doc = format!("{name} data field");
        let attr_doc = format!("{name} data attributes (present when CIF7 is in use)");

        let deref = if cif_is_optional { ".unwrap()" } else { "" };
        let main_cond = format!("{cif_name}{deref}.{name}() && cif7_opts.current_val");
        let attr_cond = format!("{cif_name}{deref}.{name}() && cif7_opts.num_extra_attrs > 0");

        members.push(quote! {
            #[doc = #field_doc]
            #[deku(cond = #main_cond)]
            pub #name: Option<#ty>,

            #[doc = #attr_doc]
            #[cfg(feature = "cif7")]
            #[deku(cond = #attr_cond, count = "cif7_opts.num_extra_attrs")]
            pub #attr_name: Vec<#ty>,
        });

        let ty_str = ty.to_token_stream().to_string();
        let primitive_words = WORD_PRIMITIVES
            .iter()
            .find(|(n, _)| *n == ty_str)
            .map(|(_, w)| *w);

        size_arms.push(match primitive_words {
            Some(words) => quote! {
                if self.#name.is_some() {
                    acc += #words;
                }
                #[cfg(feature = "cif7")]
                {
                    acc += #words * (self.#attr_name.len() as u16);
                }
            },
            None => quote! {
                if let Some(v) = &self.#name {
                    acc += v.size_words();
                }
                #[cfg(feature = "cif7")]
                for v in &self.#attr_name {
                    acc += v.size_words();
                }
            },
        });

        empty_arms.push(quote! {
            #[cfg(feature = "cif7")]
            if self.#name.is_some() || !self.#attr_name.is_empty() {
                return false;
            }
            #[cfg(not(feature = "cif7"))]
            if self.#name.is_some() {
                return false;
            }
        });
    }

    let cif_name_str = cif_name.to_string();
    let mut chars = cif_name_str.chars();
    let cif_type = match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    };
    let cif_ref = if cif_is_optional {
        format!("Option<&{cif_type}>")
    } else {
        format!("&{cif_type}")
    };
    let deku_ctx =
        format!("endian: deku::ctx::Endian, {cif_name}: {cif_ref}, cif7_opts: Cif7Opts");
    let struct_doc = format!("Data-field records gated by the {cif_name} indicator word");
    let size_doc = format!("Size of all present {cif_name} data fields in 32-bit words.");
    let empty_doc = format!("Returns true if no {cif_name} data field is populated.");

    let expanded = quote! {
        #[doc = #struct_doc]
        #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, DekuRead, DekuWrite)]
        #[deku(
            endian = "endian",
            ctx = #deku_ctx,
        )]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct #struct_name {
            #(#members)*
        }

        impl #struct_name {
            #[doc = #size_doc]
            pub fn size_words(&self) -> u16 {
                let mut acc = 0;
                #(#size_arms)*
                acc
            }

            #[doc = #empty_doc]
            pub fn empty(&self) -> bool {
                #(#empty_arms)*
                true
            }
        }
    };

    TokenStream::from(expanded)
}
