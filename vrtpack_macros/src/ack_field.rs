// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse::{Parse, ParseStream};
use syn::{parse2, Ident, LitInt, Token};

struct AckFieldArgs {
    cif_num: LitInt,
    field: Ident,
}

impl Parse for AckFieldArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let cif_num = input.parse()?;
        input.parse::<Token![,]>()?;
        let field = input.parse()?;
        Ok(AckFieldArgs { cif_num, field })
    }
}

/// Generates one arm of the setter: identical logic for the warning (WIF)
/// and error (EIF) indicator sets, differing only in the accessor prefix.
fn setter_arm(prefix: &str, cif_num: u8, field: &Ident) -> TokenStream {
    let ifx = format_ident!("{}if{}", prefix, cif_num);
    let ifx_mut = format_ident!("{}if{}_mut", prefix, cif_num);
    let ifx_fields = format_ident!("{}if{}_fields", prefix, cif_num);
    let ifx_fields_mut = format_ident!("{}if{}_fields_mut", prefix, cif_num);
    let if0 = format_ident!("{}if0", prefix);
    let if0_mut = format_ident!("{}if0_mut", prefix);

    let cif_type = format_ident!("Cif{}", cif_num);
    let ack_fields_type = format_ident!("Cif{}AckFields", cif_num);
    let set_bit = format_ident!("set_{}", field);
    let unset_bit = format_ident!("unset_{}", field);

    // Setting a level-N field must also flag "CIFN follows" in the level-0
    // indicator word, and materialize the level-0 fields struct so the
    // packet reads back equal to what was written; CIF0 fields have no
    // such chain.
    let (chain_enable, chain_disable) = if cif_num == 0 {
        (quote! {}, quote! {})
    } else {
        let enable_cif = format_ident!("set_cif{}_enabled", cif_num);
        let disable_cif = format_ident!("unset_cif{}_enabled", cif_num);
        let if0_fields = format_ident!("{}if0_fields", prefix);
        let if0_fields_mut = format_ident!("{}if0_fields_mut", prefix);
        (
            quote! {
                if self.#if0().is_none() {
                    *self.#if0_mut() = Some(Cif0::default());
                }
                self.#if0_mut().as_mut().unwrap().#enable_cif();
                if self.#if0_fields().is_none() {
                    *self.#if0_fields_mut() = Some(Cif0AckFields::default());
                }
            },
            quote! {
                if let Some(w) = self.#if0_mut() {
                    w.#disable_cif();
                }
            },
        )
    };

    quote! {
        if let Some(r) = response {
            #chain_enable
            if self.#ifx().is_none() {
                *self.#ifx_mut() = Some(#cif_type::default());
            }
            self.#ifx_mut().as_mut().unwrap().#set_bit();
            if self.#ifx_fields().is_none() {
                *self.#ifx_fields_mut() = Some(#ack_fields_type::default());
            }
            self.#ifx_fields_mut().as_mut().unwrap().#field = Some(r);
        } else {
            let mut clear = false;
            if let Some(f) = self.#ifx_fields_mut() {
                f.#field = None;
            }
            if let Some(w) = self.#ifx_mut() {
                w.#unset_bit();
                clear = w.empty();
            }
            if clear {
                *self.#ifx_mut() = None;
                *self.#ifx_fields_mut() = None;
                #chain_disable
            }
        }
    }
}

pub fn ack_field(input: TokenStream) -> TokenStream {
    let AckFieldArgs { cif_num, field } = parse2(input).expect("failed to parse macro input");
    let cif_num = cif_num.base10_parse::<u8>().expect("CIF number literal");

    let wif_fields = format_ident!("wif{}_fields", cif_num);
    let eif_fields = format_ident!("eif{}_fields", cif_num);
    let set_fn = format_ident!("set_{}", field);

    let get_doc = format!(
        "Get the {field} warning/error response and its level. \
         `None` means no response is recorded for the field."
    );
    let set_doc = format!(
        "Record or clear the {field} response at the given level, \
         maintaining the warning/error indicator words."
    );

    let warning_arm = setter_arm("w", cif_num, &field);
    let error_arm = setter_arm("e", cif_num, &field);

    quote! {
        #[doc = #get_doc]
        fn #field(&self) -> Option<(AckLevel, WarningErrorFields)> {
            if let Some(fields) = self.#eif_fields() {
                if let Some(response) = fields.#field {
                    return Some((AckLevel::Error, response));
                }
            }
            if let Some(fields) = self.#wif_fields() {
                if let Some(response) = fields.#field {
                    return Some((AckLevel::Warning, response));
                }
            }
            None
        }

        #[doc = #set_doc]
        fn #set_fn(&mut self, level: AckLevel, response: Option<WarningErrorFields>) {
            match level {
                AckLevel::Warning => { #warning_arm }
                AckLevel::Error => { #error_arm }
            }
        }
    }
}
