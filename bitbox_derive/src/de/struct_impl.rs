use crate::{attr::Mode, bounded, ser::struct_impl::field_accessors};
use quote::quote;
use syn::*;

pub fn decode_impl(ast: &DeriveInput, data: &DataStruct, mode: Mode) -> Result<proc_macro2::TokenStream> {
    let name = &ast.ident;

    let body = match mode {
        Mode::Pod => quote! {
            #[inline]
            fn decode<__D: ::bitbox::Deserializer>(&mut self, __d: &mut __D) -> ::core::result::Result<(), ::bitbox::Error> {
                ::bitbox::pod::read_block(self, __d)
            }

            #[inline]
            fn decode_slice<__D: ::bitbox::Deserializer>(
                items: &mut [Self],
                __d: &mut __D,
            ) -> ::core::result::Result<(), ::bitbox::Error> {
                ::bitbox::pod::read_blocks(items, __d)
            }

            #[inline]
            fn decode_vec<__D: ::bitbox::Deserializer>(
                dst: &mut ::std::vec::Vec<Self>,
                len: usize,
                __d: &mut __D,
            ) -> ::core::result::Result<(), ::bitbox::Error> {
                ::bitbox::pod::read_block_vec(dst, len, __d)
            }
        },
        // in place, so fields keep their allocations
        Mode::Fields => {
            let accessors = field_accessors(&data.fields);

            quote! {
                #[inline]
                fn decode<__D: ::bitbox::Deserializer>(&mut self, __d: &mut __D) -> ::core::result::Result<(), ::bitbox::Error> {
                    #(::bitbox::Decode::decode(&mut self.#accessors, __d)?;)*
                    ::core::result::Result::Ok(())
                }
            }
        }
    };

    let generics = bounded(ast, &data.fields, quote! { ::bitbox::Decode });
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::bitbox::Decode for #name #ty_generics #where_clause {
            #body
        }
    })
}
