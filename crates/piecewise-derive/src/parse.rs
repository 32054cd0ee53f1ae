//! Parsing logic for the `Mutable` derive macro.

use darling::{ast, FromDeriveInput, FromField, FromVariant};
use quote::format_ident;
use syn::{Generics, Ident, Type, Visibility};

/// Parsed container-level options.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(piecewise), supports(struct_any, enum_any))]
pub struct MutableInput {
    /// The type identifier.
    pub ident: Ident,

    /// The type visibility.
    pub vis: Visibility,

    /// Generic parameters.
    pub generics: Generics,

    /// Struct fields or enum variants.
    pub data: ast::Data<VariantInput, FieldInput>,

    /// Store the whole value in one cell.
    #[darling(default)]
    pub leaf: bool,

    /// Go through the structural representation engine instead of emitting a
    /// dedicated ref type.
    #[darling(default)]
    pub generic: bool,

    /// Emit first-field-of-type lookups (`ByType`).
    #[darling(default)]
    pub by_type: bool,

    /// Name of the generated ref type (default: `{Name}Ref`).
    #[darling(default)]
    pub ref_name: Option<Ident>,
}

impl MutableInput {
    /// Returns true for enums.
    pub fn is_enum(&self) -> bool {
        self.data.is_enum()
    }

    /// The struct fields, if this is a struct.
    pub fn struct_fields(&self) -> Option<&ast::Fields<FieldInput>> {
        match &self.data {
            ast::Data::Struct(fields) => Some(fields),
            ast::Data::Enum(_) => None,
        }
    }

    /// The enum variants (empty for structs).
    pub fn variants(&self) -> &[VariantInput] {
        match &self.data {
            ast::Data::Enum(variants) => variants,
            ast::Data::Struct(_) => &[],
        }
    }

    /// Every field, across all variants for enums.
    pub fn all_fields(&self) -> Vec<&FieldInput> {
        match &self.data {
            ast::Data::Struct(fields) => fields.iter().collect(),
            ast::Data::Enum(variants) => variants.iter().flat_map(|v| v.fields.iter()).collect(),
        }
    }

    /// Identifier of the generated ref type.
    pub fn ref_ident(&self) -> Ident {
        self.ref_name
            .clone()
            .unwrap_or_else(|| format_ident!("{}Ref", self.ident))
    }

    /// Identifier of the generated branch enum (enums only).
    pub fn branch_ident(&self) -> Ident {
        match &self.ref_name {
            Some(name) => format_ident!("{}Branch", name),
            None => format_ident!("{}Branch", self.ident),
        }
    }
}

/// Parsed enum variant.
#[derive(Debug, FromVariant)]
#[darling(attributes(piecewise))]
pub struct VariantInput {
    /// Variant identifier.
    pub ident: Ident,

    /// Variant fields.
    pub fields: ast::Fields<FieldInput>,
}

/// Parsed field-level options.
#[derive(Debug, FromField)]
#[darling(attributes(piecewise))]
pub struct FieldInput {
    /// Field identifier (`None` for tuple fields).
    pub ident: Option<Ident>,

    /// Field visibility.
    pub vis: Visibility,

    /// Field type.
    pub ty: Type,

    /// Store this field in a single cell.
    #[darling(default)]
    pub leaf: bool,
}

impl FieldInput {
    /// Display name of the field at `index`: its identifier, or the index for
    /// tuple fields.
    pub fn name(&self, index: usize) -> String {
        match &self.ident {
            Some(ident) => ident.to_string().trim_start_matches("r#").to_string(),
            None => index.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darling::FromDeriveInput;
    use syn::parse_quote;

    #[test]
    fn test_parse_basic_struct() {
        let input: syn::DeriveInput = parse_quote! {
            struct Stats {
                count: i64,
                items: Vec<f64>,
            }
        };

        let parsed = MutableInput::from_derive_input(&input).unwrap();
        assert_eq!(parsed.ident.to_string(), "Stats");
        assert!(!parsed.is_enum());
        assert_eq!(parsed.ref_ident().to_string(), "StatsRef");

        let fields = parsed.all_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name(0), "count");
        assert_eq!(fields[1].name(1), "items");
    }

    #[test]
    fn test_parse_container_attributes() {
        let input: syn::DeriveInput = parse_quote! {
            #[piecewise(by_type, ref_name = "Handle")]
            struct Pair(u8, #[piecewise(leaf)] String);
        };

        let parsed = MutableInput::from_derive_input(&input).unwrap();
        assert!(parsed.by_type);
        assert!(!parsed.leaf);
        assert_eq!(parsed.ref_ident().to_string(), "Handle");

        let fields = parsed.all_fields();
        assert_eq!(fields[0].name(0), "0");
        assert!(!fields[0].leaf);
        assert!(fields[1].leaf);
    }

    #[test]
    fn test_parse_enum_variants() {
        let input: syn::DeriveInput = parse_quote! {
            #[piecewise(generic)]
            enum Shape {
                Empty,
                Circle { radius: f64 },
                Rect(f64, f64),
            }
        };

        let parsed = MutableInput::from_derive_input(&input).unwrap();
        assert!(parsed.is_enum());
        assert!(parsed.generic);
        assert_eq!(parsed.branch_ident().to_string(), "ShapeBranch");

        let variants = parsed.variants();
        assert_eq!(variants.len(), 3);
        assert!(variants[0].fields.is_empty());
        assert_eq!(variants[1].fields.fields[0].name(0), "radius");
        assert_eq!(parsed.all_fields().len(), 3);
    }

    #[test]
    fn test_reject_unknown_option() {
        let input: syn::DeriveInput = parse_quote! {
            #[piecewise(frozen)]
            struct Stats {
                count: i64,
            }
        };

        assert!(MutableInput::from_derive_input(&input).is_err());
    }
}
