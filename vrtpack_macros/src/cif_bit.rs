// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse::{Parse, ParseStream};
use syn::{parse2, Ident, LitInt, Token};

struct CifBitArgs {
    name: Ident,
    bit: LitInt,
}

impl Parse for CifBitArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name = input.parse()?;
        input.parse::<Token![,]>()?;
        let bit = input.parse()?;
        Ok(CifBitArgs { name, bit })
    }
}

pub fn cif_bit(input: TokenStream) -> TokenStream {
    let CifBitArgs { name, bit } = parse2(input).expect("failed to parse macro input");

    let set = format_ident!("set_{}", name);
    let unset = format_ident!("unset_{}", name);

    let get_doc = format!("Returns true if the {name} indicator bit is set.");
    let set_doc = format!("Sets the {name} indicator bit.");
    let unset_doc = format!("Clears the {name} indicator bit.");

    quote! {
        #[doc = #get_doc]
        pub fn #name(&self) -> bool {
            self.0 & (1 << #bit) != 0
        }
        #[doc = #set_doc]
        pub fn #set(&mut self) {
            self.0 |= 1 << #bit;
        }
        #[doc = #unset_doc]
        pub fn #unset(&mut self) {
            self.0 &= !(1 << #bit);
        }
    }
}
