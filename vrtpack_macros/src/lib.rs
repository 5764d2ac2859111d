// SPDX-FileCopyrightText: 2026 The vrtpack Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use proc_macro::TokenStream;

mod ack_field;
mod cif_bit;
mod cif_fields;
mod cif_fixed;
mod cif_fixed_masked;
mod cif_plain;

/// Generates the indicator-bit accessors for one CIF bit position:
///
///  - `${name}()`: returns true if the bit is set
///  - `set_${name}()`: sets the bit
///  - `unset_${name}()`: clears the bit
///
/// Intended for use inside an `impl` block of a `u32` newtype.
#[proc_macro]
pub fn cif_bit(input: TokenStream) -> TokenStream {
    cif_bit::cif_bit(input.into()).into()
}

/// Attribute macro applied to a plain `field: Type` struct listing. Expands
/// into the deku-conditional data-field struct for one CIF word: each member
/// becomes `Option<Type>` read/written only when the matching indicator bit
/// is set, plus the CIF7 attribute vector for the member when the `cif7`
/// feature is enabled. Also derives `size_words()` and `empty()` over the
/// generated members.
#[proc_macro_attribute]
pub fn cif_fields(attr: TokenStream, item: TokenStream) -> TokenStream {
    cif_fields::cif_fields(attr, item)
}

/// Generates typed getter/setter trait methods for a CIF field whose stored
/// representation and user-facing value share a type.
#[proc_macro]
pub fn cif_plain(input: TokenStream) -> TokenStream {
    cif_plain::cif_plain(input.into()).into()
}

/// Generates typed getter/setter trait methods for a CIF field stored as a
/// two's-complement fixed-point integer. The user-facing value is a float;
/// the radix position comes from the given `fixed` crate type.
#[proc_macro]
pub fn cif_fixed(input: TokenStream) -> TokenStream {
    cif_fixed::cif_fixed(input.into()).into()
}

/// Like `cif_fixed`, but for fields where only the low portion of the stored
/// word carries the fixed-point number (e.g. a 16-bit quantity in a 32-bit
/// field). The remaining bits are reserved and masked off.
#[proc_macro]
pub fn cif_fixed_masked(input: TokenStream) -> TokenStream {
    cif_fixed_masked::cif_fixed_masked(input.into()).into()
}

/// Generates the warning/error response accessors used by acknowledge
/// packets: a getter returning the response record with its level, and a
/// setter that maintains the WIF/EIF indicator words.
#[proc_macro]
pub fn ack_field(input: TokenStream) -> TokenStream {
    ack_field::ack_field(input.into()).into()
}
