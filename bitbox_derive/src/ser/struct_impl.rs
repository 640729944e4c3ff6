use crate::{attr::Mode, bounded};
use quote::quote;
use syn::*;

pub fn encode_impl(ast: &DeriveInput, data: &DataStruct, mode: Mode) -> Result<proc_macro2::TokenStream> {
    let name = &ast.ident;

    let body = match mode {
        Mode::Pod => quote! {
            const SHAPE: ::bitbox::Shape = ::bitbox::Shape::Struct {
                pod_size: ::core::option::Option::Some(::core::mem::size_of::<Self>()),
            };

            #[inline]
            fn encode<__S: ::bitbox::Serializer>(&self, __s: &mut __S) -> ::core::result::Result<(), ::bitbox::Error> {
                ::bitbox::pod::write_block(self, __s);
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn encode_slice<__S: ::bitbox::Serializer>(
                items: &[Self],
                __s: &mut __S,
            ) -> ::core::result::Result<(), ::bitbox::Error> {
                ::bitbox::pod::write_blocks(items, __s);
                ::core::result::Result::Ok(())
            }
        },
        Mode::Fields => {
            let accessors = field_accessors(&data.fields);

            quote! {
                const SHAPE: ::bitbox::Shape = ::bitbox::Shape::Struct { pod_size: ::core::option::Option::None };

                #[inline]
                fn encode<__S: ::bitbox::Serializer>(&self, __s: &mut __S) -> ::core::result::Result<(), ::bitbox::Error> {
                    #(::bitbox::Encode::encode(&self.#accessors, __s)?;)*
                    ::core::result::Result::Ok(())
                }
            }
        }
    };

    let generics = bounded(ast, &data.fields, quote! { ::bitbox::Encode });
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::bitbox::Encode for #name #ty_generics #where_clause {
            #body
        }
    })
}

/// `self.<accessor>` for every field: names for named fields, indices for tuple fields.
pub fn field_accessors(fields: &Fields) -> Vec<Member> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(i)),
        })
        .collect()
}
