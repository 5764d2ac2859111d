// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::parse2;

use crate::cif_plain::{clear_optional_cif, CifAccessorArgs, Plumbing};

pub fn cif_fixed_masked(input: TokenStream) -> TokenStream {
    let CifAccessorArgs {
        cif_name,
        field,
        api_name,
        types,
    } = parse2(input).expect("failed to parse macro input");
    let [friendly_type, fixed_type, storage_type, masked_type] = types.as_slice() else {
        panic!(
            "cif_fixed_masked!(cif, field, api_name, FriendlyType, FixedType, \
             StorageType, MaskedType)"
        );
    };

    // Width of the live portion comes from the masked integer type name,
    // e.g. "i16" carries 16 live bits in the low half of the stored word.
    let masked_str = masked_type.to_token_stream().to_string();
    let masked_bits: usize = masked_str
        .trim_start_matches(|c: char| c.is_alphabetic())
        .parse()
        .expect("masked type must be a primitive integer type");
    let mask: u128 = (1 << masked_bits) - 1;
    let mask = proc_macro2::Literal::u128_unsuffixed(mask);

    let p = Plumbing::new(&cif_name, &field);
    let Plumbing {
        cif,
        cif_mut,
        cif_fields,
        cif_fields_mut,
        set_bit,
        unset_bit,
        enable_cif,
        cif_type,
        cif_fields_type,
        ..
    } = &p;

    let attr_field = quote::format_ident!("{}_attributes", field);
    let get_fn = api_name.clone();
    let set_fn = quote::format_ident!("set_{}", api_name);

    let get_doc = format!("Get the current {api_name}. `None` means the field is unset.");
    let set_doc =
        format!("Set the {api_name}. Passing `None` removes the field and clears its CIF bit.");

    let decode = quote! {
        #fixed_type::from_bits(((v as #storage_type) & (#mask as #storage_type)) as #masked_type)
            .to_num()
    };
    let encode = quote! {
        (#fixed_type::from_num(v).to_bits() as #masked_type as #storage_type)
            & (#mask as #storage_type)
    };

    if cif_name == "cif0" {
        quote! {
            #[doc = #get_doc]
            fn #get_fn(&self) -> Option<#friendly_type> {
                self.#cif_fields().#field.map(|v| #decode)
            }
            #[doc = #set_doc]
            fn #set_fn(&mut self, #api_name: Option<#friendly_type>) {
                if let Some(v) = #api_name {
                    self.#cif_fields_mut().#field = Some(#encode);
                    self.#cif_mut().#set_bit();
                } else {
                    self.#cif_fields_mut().#field = None;
                    self.#cif_mut().#unset_bit();
                }
            }
        }
    } else {
        let clear = clear_optional_cif(
            &p,
            quote! {
                f.#field = None;
                #[cfg(feature = "cif7")]
                f.#attr_field.clear();
            },
        );
        quote! {
            #[doc = #get_doc]
            fn #get_fn(&self) -> Option<#friendly_type> {
                self.#cif_fields()?.#field.map(|v| #decode)
            }
            #[doc = #set_doc]
            fn #set_fn(&mut self, #api_name: Option<#friendly_type>) {
                if let Some(v) = #api_name {
                    if self.#cif().is_none() {
                        self.cif0_mut().#enable_cif();
                        *self.#cif_mut() = Some(#cif_type::default());
                    }
                    self.#cif_mut().as_mut().unwrap().#set_bit();
                    if self.#cif_fields().is_none() {
                        *self.#cif_fields_mut() = Some(#cif_fields_type::default());
                    }
                    self.#cif_fields_mut().as_mut().unwrap().#field = Some(#encode);
                } else {
                    #clear
                }
            }
        }
    }
}
