use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, LitStr, Meta, Type};

/// Derive macro describing the CSV columns of a record struct.
///
/// For each named field it records:
/// - the column name (honours `#[serde(rename = "...")]`)
/// - whether the column is required (false for `Option<T>` or `#[serde(default)]`)
/// - a description taken from the field's doc comment
///
/// Generates `csv_schema() -> &'static [CsvField]`. `CsvField` must be in scope
/// where the derive is used.
#[proc_macro_derive(CsvSchema, attributes(serde))]
pub fn derive_csv_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(name, "CsvSchema needs named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "CsvSchema only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let mut columns = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let attrs = match SerdeAttrs::parse(&field.attrs) {
            Ok(attrs) => attrs,
            Err(err) => return err.to_compile_error().into(),
        };
        let column = attrs.rename.unwrap_or_else(|| ident.to_string());
        let required = !attrs.default && !is_option_type(&field.ty);
        let description = doc_comment(&field.attrs);
        columns.push(quote! {
            CsvField {
                name: #column,
                required: #required,
                description: #description,
            }
        });
    }

    let expanded = quote! {
        impl #name {
            pub fn csv_schema() -> &'static [CsvField] {
                static SCHEMA: &[CsvField] = &[
                    #(#columns),*
                ];
                SCHEMA
            }
        }
    };

    TokenStream::from(expanded)
}

#[derive(Default)]
struct SerdeAttrs {
    rename: Option<String>,
    default: bool,
}

impl SerdeAttrs {
    fn parse(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut parsed = SerdeAttrs::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if meta.input.peek(syn::token::Paren) {
                        // rename(serialize = "..", deserialize = ".."): the read side names the column
                        let mut serialize = None;
                        let mut deserialize = None;
                        meta.parse_nested_meta(|inner| {
                            let value: LitStr = inner.value()?.parse()?;
                            if inner.path.is_ident("deserialize") {
                                deserialize = Some(value.value());
                            } else if inner.path.is_ident("serialize") {
                                serialize = Some(value.value());
                            }
                            Ok(())
                        })?;
                        parsed.rename = deserialize.or(serialize).or(parsed.rename.take());
                    } else {
                        let value: LitStr = meta.value()?.parse()?;
                        parsed.rename = Some(value.value());
                    }
                } else if meta.path.is_ident("default") {
                    parsed.default = true;
                    skip_option_value(&meta)?;
                } else {
                    skip_option_value(&meta)?;
                }
                Ok(())
            })?;
        }
        Ok(parsed)
    }
}

/// Consumes `= value` or `( .. )` after a serde option that does not shape a column
fn skip_option_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        let _: proc_macro2::TokenStream = content.parse()?;
    }
    Ok(())
}

fn doc_comment(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(meta) => match &meta.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: Lit::Str(text), ..
                }) => Some(text.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_option_type(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}
