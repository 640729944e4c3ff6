#![recursion_limit = "128"]

extern crate proc_macro;
extern crate proc_macro2;

mod attr;
mod de;
mod ser;

use attr::Mode;
use proc_macro::TokenStream;
use syn::*;

type Expander = fn(&DeriveInput, &DataStruct, Mode) -> Result<proc_macro2::TokenStream>;

/// Derives `bitbox::Encode` for a struct.
///
/// Fields are written in declaration order. With `#[bitbox(pod)]` the struct is written as
/// one block of its raw bytes instead, which requires `bytemuck::Pod`.
#[proc_macro_derive(Encode, attributes(bitbox))]
pub fn encode_derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    expand(&ast, ser::struct_impl::encode_impl)
}

/// Derives `bitbox::Decode` for a struct, mirroring `#[derive(Encode)]`.
#[proc_macro_derive(Decode, attributes(bitbox))]
pub fn decode_derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    expand(&ast, de::struct_impl::decode_impl)
}

fn expand(ast: &DeriveInput, expander: Expander) -> TokenStream {
    let res = match &ast.data {
        Data::Struct(sd) => attr::mode(ast).and_then(|mode| expander(ast, sd, mode)),
        Data::Enum(_) => Err(Error::new_spanned(
            &ast.ident,
            "bitbox: enums have no wire layout, derive on a struct instead",
        )),
        Data::Union(_) => Err(Error::new_spanned(&ast.ident, "bitbox: unions are not supported")),
    };

    res.unwrap_or_else(Error::into_compile_error).into()
}

/// Adds `field_type: bound` for every field when the struct is generic.
fn bounded(ast: &DeriveInput, fields: &Fields, bound: proc_macro2::TokenStream) -> Generics {
    let mut generics = ast.generics.clone();
    if generics.params.is_empty() {
        return generics;
    }

    let clause = generics.make_where_clause();
    for field in fields {
        let ty = &field.ty;
        clause.predicates.push(parse_quote! { #ty: #bound });
    }

    generics
}
