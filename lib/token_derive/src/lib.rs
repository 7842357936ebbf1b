use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Derives the string form of a serde-tagged unit enum.
///
/// Generates `Display` and `FromStr` that go through the enum's own serde
/// representation, so `#[serde(rename_all = ...)]` decides the wire spelling,
/// plus an `ALL` constant listing every variant in declaration order.
#[proc_macro_derive(Token)]
pub fn token_macro_derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let name = &ast.ident;

    let variants = match &ast.data {
        Data::Enum(data) => &data.variants,
        _ => return quote! {compile_error!("Token supports only enums");}.into(),
    };

    if variants.iter().any(|v| !matches!(v.fields, Fields::Unit)) {
        return quote! {compile_error!("Token supports only unit variants");}.into();
    }

    let count = variants.len();
    let idents = variants.iter().map(|v| &v.ident);

    let gen = quote! {
        impl #name {
            pub const ALL: [#name; #count] = [#(#name::#idents),*];
        }

        impl std::fmt::Display for #name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                serde::Serialize::serialize(self, f)
            }
        }

        impl std::str::FromStr for #name {
            type Err = serde::de::value::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                use serde::de::IntoDeserializer;

                <Self as serde::Deserialize>::deserialize(s.into_deserializer())
            }
        }
    };

    gen.into()
}
