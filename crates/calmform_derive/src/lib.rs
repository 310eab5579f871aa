use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, parse_macro_input};

#[proc_macro_derive(FormSchema, attributes(form))]
pub fn derive_form_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let schema_ident = input.ident;
    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &schema_ident,
            "FormSchema derive currently supports only non-generic structs",
        )
        .to_compile_error()
        .into();
    }

    let fields_struct_ident = format_ident!("{schema_ident}Fields");

    let named_fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &schema_ident,
                    "FormSchema derive requires a struct with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(
                &schema_ident,
                "FormSchema derive is only supported on structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let calmform = calmform_path();
    let mut key_methods = Vec::new();
    let mut field_names = Vec::new();

    for field in named_fields {
        let Some(field_ident) = field.ident else {
            continue;
        };
        let field_name = match rename_of(&field.attrs) {
            Ok(Some(name)) => name,
            Ok(None) => field_ident.to_string(),
            Err(error) => return error.to_compile_error().into(),
        };

        key_methods.push(quote! {
            pub const fn #field_ident(&self) -> #calmform::form::FieldKey {
                #calmform::form::FieldKey::new(#field_name)
            }
        });
        field_names.push(field_name);
    }

    quote! {
        #[derive(Clone, Copy, Debug, Default)]
        pub struct #fields_struct_ident;

        impl #fields_struct_ident {
            #(#key_methods)*
        }

        impl #calmform::form::FormSchema for #schema_ident {
            type Fields = #fields_struct_ident;

            fn fields() -> Self::Fields {
                #fields_struct_ident
            }

            fn field_names() -> &'static [&'static str] {
                &[#(#field_names),*]
            }
        }
    }
    .into()
}

/// `#[form(rename = "...")]` overrides the key a field is mounted under.
fn rename_of(attrs: &[syn::Attribute]) -> syn::Result<Option<String>> {
    let mut rename = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("form")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: syn::LitStr = meta.value()?.parse()?;
                rename = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported form attribute, expected `rename`"))
            }
        })?;
    }
    Ok(rename)
}

fn calmform_path() -> TokenStream2 {
    match crate_name("calmform") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Ok(FoundCrate::Itself) | Err(_) => quote!(::calmform),
    }
}
