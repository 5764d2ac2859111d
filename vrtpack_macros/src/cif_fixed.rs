// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse2;

use crate::cif_plain::{clear_optional_cif, CifAccessorArgs, Plumbing};

pub fn cif_fixed(input: TokenStream) -> TokenStream {
    let CifAccessorArgs {
        cif_name,
        field,
        api_name,
        types,
    } = parse2(input).expect("failed to parse macro input");
    let [friendly_type, fixed_type] = types.as_slice() else {
        panic!("cif_fixed!(cif, field, api_name, FriendlyType, FixedType)");
    };

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

    let attr_field = format_ident!("{}_attributes", field);
    let attr_api = format_ident!("{}_attributes", api_name);
    let get_fn = api_name.clone();
    let set_fn = format_ident!("set_{}", api_name);
    let get_attr_fn = attr_api.clone();
    let set_attr_fn = format_ident!("set_{}", attr_api);

    let get_doc = format!("Get the current {api_name}. `None` means the field is unset.");
    let set_doc =
        format!("Set the {api_name}. Passing `None` removes the field and clears its CIF bit.");
    let get_attr_doc = format!("Get the {api_name} CIF7 attribute values.");
    let set_attr_doc = format!("Set the {api_name} CIF7 attribute values.");

    let decode = quote! { #fixed_type::from_bits(v).to_num() };
    let encode = quote! { #fixed_type::from_num(v).to_bits() };

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
            #[doc = #get_attr_doc]
            #[cfg(feature = "cif7")]
            fn #get_attr_fn(&self) -> Vec<#friendly_type> {
                self.#cif_fields().#attr_field.iter().map(|&v| #decode).collect()
            }
            #[doc = #set_attr_doc]
            #[cfg(feature = "cif7")]
            fn #set_attr_fn(&mut self, #attr_api: Option<Vec<#friendly_type>>) {
                if let Some(vec) = #attr_api {
                    self.cif0_mut().set_cif7_enabled();
                    self.#cif_fields_mut().#attr_field =
                        vec.into_iter().map(|v| #encode).collect();
                    self.#cif_mut().#set_bit();
                } else {
                    self.#cif_fields_mut().#attr_field.clear();
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
            #[doc = #get_attr_doc]
            #[cfg(feature = "cif7")]
            fn #get_attr_fn(&self) -> Vec<#friendly_type> {
                match self.#cif_fields() {
                    Some(f) => f.#attr_field.iter().map(|&v| #decode).collect(),
                    None => Vec::new(),
                }
            }
            #[doc = #set_attr_doc]
            #[cfg(feature = "cif7")]
            fn #set_attr_fn(&mut self, #attr_api: Option<Vec<#friendly_type>>) {
                if let Some(vec) = #attr_api {
                    self.cif0_mut().set_cif7_enabled();
                    if self.#cif().is_none() {
                        self.cif0_mut().#enable_cif();
                        *self.#cif_mut() = Some(#cif_type::default());
                    }
                    self.#cif_mut().as_mut().unwrap().#set_bit();
                    if self.#cif_fields().is_none() {
                        *self.#cif_fields_mut() = Some(#cif_fields_type::default());
                    }
                    self.#cif_fields_mut().as_mut().unwrap().#attr_field =
                        vec.into_iter().map(|v| #encode).collect();
                } else if let Some(f) = self.#cif_fields_mut() {
                    f.#attr_field.clear();
                }
            }
        }
    }
}
