//! `#[derive(Entity)]` — the Rust-native stand-in for the original
//! `gears_templates.hpp` compile-time entity macro (spec §4.1).
//!
//! ```ignore
//! #[derive(Entity)]
//! #[entity(table = "users")]
//! struct User {
//!     #[entity(column = "id", primary_key)]
//!     id: i32,
//!     name: String,
//!     #[entity(nullable)]
//!     age: Option<i32>,
//! }
//! ```
//!
//! expands to an `impl demiplane_schema::EntityTrait for User` that
//! builds the runtime `Table` by reflecting over the annotated fields,
//! and projects `User` values to/from `Record`s.

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Type, parse_macro_input};

struct FieldPlan {
    ident: syn::Ident,
    column: String,
    inner_ty: Type,
    nullable: bool,
    primary_key: bool,
    unique: bool,
    indexed: bool,
}

#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let struct_ident = input.ident.clone();

    let table_name = table_name_from_attrs(&input.attrs).unwrap_or_else(|| to_snake_case(&struct_ident.to_string()));

    let Data::Struct(data) = &input.data else {
        return syn::Error::new_spanned(&input, "Entity can only be derived for structs")
            .to_compile_error()
            .into();
    };
    let Fields::Named(named) = &data.fields else {
        return syn::Error::new_spanned(&input, "Entity requires named fields")
            .to_compile_error()
            .into();
    };

    let plans: Vec<FieldPlan> = named.named.iter().map(field_plan).collect();

    let add_field_calls = plans.iter().map(|p| {
        let column = &p.column;
        let sql_type = sql_type_for(&p.inner_ty);
        let inner_ty = &p.inner_ty;
        let mut chain = quote! {
            table.add_field::<#inner_ty>(#column, #sql_type);
        };
        if p.nullable {
            chain = quote! { #chain table.nullable(#column).expect("just-added column"); };
        }
        if p.primary_key {
            chain = quote! { #chain table.primary_key(#column).expect("just-added column"); };
        }
        if p.unique {
            chain = quote! { #chain table.unique(#column).expect("just-added column"); };
        }
        if p.indexed {
            chain = quote! { #chain table.indexed(#column).expect("just-added column"); };
        }
        chain
    });

    let to_record_pushes = plans.iter().map(|p| {
        let ident = &p.ident;
        let column = &p.column;
        if p.nullable {
            quote! {
                fields.push(::demiplane_schema::Field::new(
                    table.field(#column).expect("schema built from this entity").clone(),
                    match &self.#ident {
                        Some(v) => ::demiplane_schema::IntoFieldValue::into_field_value(v.clone()),
                        None => ::demiplane_schema::FieldValue::Null,
                    },
                ));
            }
        } else {
            quote! {
                fields.push(::demiplane_schema::Field::new(
                    table.field(#column).expect("schema built from this entity").clone(),
                    ::demiplane_schema::IntoFieldValue::into_field_value(self.#ident.clone()),
                ));
            }
        }
    });

    let from_record_fields = plans.iter().map(|p| {
        let ident = &p.ident;
        let column = &p.column;
        if p.nullable {
            quote! {
                #ident: record.get(#column)?.try_get(),
            }
        } else {
            quote! {
                #ident: record.get(#column)?.get()?,
            }
        }
    });

    let const_table_name_lit = table_name.clone();
    let entity_descriptor_impl_name = format_ident!("__{}EntityDescriptor", struct_ident);

    let expanded = quote! {
        #[doc(hidden)]
        #[allow(non_camel_case_types)]
        struct #entity_descriptor_impl_name;

        impl ::demiplane_schema::EntityDescriptor for #entity_descriptor_impl_name {
            const TABLE_NAME: &'static str = #const_table_name_lit;
        }

        impl ::demiplane_schema::EntityTrait for #struct_ident {
            fn table_name() -> &'static str {
                #const_table_name_lit
            }

            fn to_table() -> ::demiplane_schema::Table {
                let mut table = ::demiplane_schema::Table::new(#const_table_name_lit);
                #( #add_field_calls )*
                table
            }

            fn to_record(&self, table: ::std::sync::Arc<::demiplane_schema::Table>) -> ::demiplane_schema::Record {
                let mut fields = ::std::vec::Vec::with_capacity(table.field_count());
                #( #to_record_pushes )*
                ::demiplane_schema::Record::from_fields(table, fields)
                    .expect("entity-generated record matches its own schema")
            }

            fn from_record(record: &::demiplane_schema::Record) -> ::demiplane_schema::SchemaResult<Self> {
                ::std::result::Result::Ok(Self {
                    #( #from_record_fields )*
                })
            }
        }
    };

    expanded.into()
}

fn field_plan(field: &syn::Field) -> FieldPlan {
    let ident = field.ident.clone().expect("named field");
    let (inner_ty, is_option) = unwrap_option(&field.ty);

    let mut column = to_snake_case(&ident.to_string());
    let mut nullable = is_option;
    let mut primary_key = false;
    let mut unique = false;
    let mut indexed = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("entity") {
            continue;
        }
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("column") {
                let value = meta.value()?;
                let lit: syn::LitStr = value.parse()?;
                column = lit.value();
            } else if meta.path.is_ident("primary_key") {
                primary_key = true;
            } else if meta.path.is_ident("unique") {
                unique = true;
            } else if meta.path.is_ident("indexed") {
                indexed = true;
            } else if meta.path.is_ident("nullable") {
                nullable = true;
            }
            Ok(())
        });
    }

    FieldPlan {
        ident,
        column,
        inner_ty,
        nullable,
        primary_key,
        unique,
        indexed,
    }
}

fn unwrap_option(ty: &Type) -> (Type, bool) {
    if let Type::Path(p) = ty {
        if let Some(seg) = p.path.segments.last() {
            if seg.ident == "Option" {
                if let syn::PathArguments::AngleBracketed(args) = &seg.arguments {
                    if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                        return (inner.clone(), true);
                    }
                }
            }
        }
    }
    (ty.clone(), false)
}

fn sql_type_for(ty: &Type) -> &'static str {
    let name = quote!(#ty).to_string().replace(' ', "");
    match name.as_str() {
        "bool" => "BOOLEAN",
        "i32" => "INTEGER",
        "i64" => "BIGINT",
        "f32" => "REAL",
        "f64" => "DOUBLE PRECISION",
        "String" => "TEXT",
        "Vec<u8>" => "BYTEA",
        _ => "TEXT",
    }
}

fn table_name_from_attrs(attrs: &[syn::Attribute]) -> Option<String> {
    for attr in attrs {
        if !attr.path().is_ident("entity") {
            continue;
        }
        let mut found = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let value = meta.value()?;
                let lit: syn::LitStr = value.parse()?;
                found = Some(lit.value());
            }
            Ok(())
        });
        if found.is_some() {
            return found;
        }
    }
    None
}

fn to_snake_case(s: &str) -> String {
    let mut out = String::new();
    for (i, ch) in s.char_indices() {
        if ch.is_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
