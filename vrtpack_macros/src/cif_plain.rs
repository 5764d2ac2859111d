// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse::{Parse, ParseStream};
use syn::{parse2, Ident, Token, Type};

pub struct CifAccessorArgs {
    pub cif_name: Ident,
    pub field: Ident,
    pub api_name: Ident,
    pub types: Vec<Type>,
}

impl Parse for CifAccessorArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let cif_name = input.parse()?;
        input.parse::<Token![,]>()?;
        let field = input.parse()?;
        input.parse::<Token![,]>()?;
        let api_name = input.parse()?;
        let mut types = Vec::new();
        while input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            types.push(input.parse()?);
        }
        Ok(CifAccessorArgs {
            cif_name,
            field,
            api_name,
            types,
        })
    }
}

/// Idents shared by all the typed accessor macros.
pub struct Plumbing {
    pub cif: Ident,
    pub cif_mut: Ident,
    pub cif_fields: Ident,
    pub cif_fields_mut: Ident,
    pub set_bit: Ident,
    pub unset_bit: Ident,
    pub enable_cif: Ident,
    pub disable_cif: Ident,
    pub cif_type: Ident,
    pub cif_fields_type: Ident,
}

impl Plumbing {
    pub fn new(cif_name: &Ident, field: &Ident) -> Plumbing {
        let cif_name_str = cif_name.to_string();
        let mut chars = cif_name_str.chars();
        let cif_type_str = match chars.next() {
            None => String::new(),
            Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        };
        Plumbing {
            cif: cif_name.clone(),
            cif_mut: format_ident!("{}_mut", cif_name),
            cif_fields: format_ident!("{}_fields", cif_name),
            cif_fields_mut: format_ident!("{}_fields_mut", cif_name),
            set_bit: format_ident!("set_{}", field),
            unset_bit: format_ident!("unset_{}", field),
            enable_cif: format_ident!("set_{}_enabled", cif_name),
            disable_cif: format_ident!("unset_{}_enabled", cif_name),
            cif_type: format_ident!("{}", cif_type_str),
            cif_fields_type: format_ident!("{}Fields", cif_type_str),
        }
    }
}

/// Expansion of the "unset" path shared by every non-CIF0 setter: clear the
/// indicator bit and the stored value, then collapse the optional CIF word
/// and fields struct when they become empty.
pub fn clear_optional_cif(p: &Plumbing, clear_value: TokenStream) -> TokenStream {
    let Plumbing {
        cif_mut,
        cif_fields_mut,
        unset_bit,
        disable_cif,
        ..
    } = p;
    quote! {
        let mut clear_cif = false;
        let mut clear_fields = false;
        if let Some(c) = self.#cif_mut() {
            c.#unset_bit();
            clear_cif = c.empty();
        }
        if let Some(f) = self.#cif_fields_mut() {
            #clear_value
            clear_fields = f.empty();
        }
        if clear_cif {
            *self.#cif_mut() = None;
            self.cif0_mut().#disable_cif();
        }
        if clear_fields {
            *self.#cif_fields_mut() = None;
        }
    }
}

pub fn cif_plain(input: TokenStream) -> TokenStream {
    let CifAccessorArgs {
        cif_name,
        field,
        api_name,
        types,
    } = parse2(input).expect("failed to parse macro input");
    let [value_type] = types.as_slice() else {
        panic!("cif_plain!(cif, field, api_name, Type)");
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

    if cif_name == "cif0" {
        quote! {
            #[doc = #get_doc]
            fn #get_fn(&self) -> Option<&#value_type> {
                self.#cif_fields().#field.as_ref()
            }
            #[doc = #set_doc]
            fn #set_fn(&mut self, #api_name: Option<#value_type>) {
                self.#cif_fields_mut().#field = #api_name;
                if self.#cif_fields().#field.is_some() {
                    self.#cif_mut().#set_bit();
                } else {
                    self.#cif_mut().#unset_bit();
                }
            }
            #[doc = #get_attr_doc]
            #[cfg(feature = "cif7")]
            fn #get_attr_fn(&self) -> &Vec<#value_type> {
                &self.#cif_fields().#attr_field
            }
            #[doc = #set_attr_doc]
            #[cfg(feature = "cif7")]
            fn #set_attr_fn(&mut self, #attr_api: Option<Vec<#value_type>>) {
                if let Some(vec) = #attr_api {
                    self.cif0_mut().set_cif7_enabled();
                    self.#cif_fields_mut().#attr_field = vec;
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
            fn #get_fn(&self) -> Option<&#value_type> {
                self.#cif_fields()?.#field.as_ref()
            }
            #[doc = #set_doc]
            fn #set_fn(&mut self, #api_name: Option<#value_type>) {
                if let Some(v) = #api_name {
                    if self.#cif().is_none() {
                        self.cif0_mut().#enable_cif();
                        *self.#cif_mut() = Some(#cif_type::default());
                    }
                    self.#cif_mut().as_mut().unwrap().#set_bit();
                    if self.#cif_fields().is_none() {
                        *self.#cif_fields_mut() = Some(#cif_fields_type::default());
                    }
                    self.#cif_fields_mut().as_mut().unwrap().#field = Some(v);
                } else {
                    #clear
                }
            }
            #[doc = #get_attr_doc]
            #[cfg(feature = "cif7")]
            fn #get_attr_fn(&self) -> Option<&Vec<#value_type>> {
                Some(&self.#cif_fields()?.#attr_field)
            }
            #[doc = #set_attr_doc]
            #[cfg(feature = "cif7")]
            fn #set_attr_fn(&mut self, #attr_api: Option<Vec<#value_type>>) {
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
                    self.#cif_fields_mut().as_mut().unwrap().#attr_field = vec;
                } else if let Some(f) = self.#cif_fields_mut() {
                    f.#attr_field.clear();
                }
            }
        }
    }
}
