//! Attribute parsing for `#[env(...)]` annotations.

use syn::{Field, Lit};

/// Parsed `#[env(...)]` attributes from a struct field.
///
/// String annotations are carried verbatim into the generated field
/// metadata; the runtime resolver interprets key options and the expansion
/// flag.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Raw key annotation, `NAME[,option[,option...]]`.
    pub key: Option<String>,

    /// Default literal used when the variable is absent.
    pub default: Option<String>,

    /// Expansion flag; the resolver enables substitution only for the
    /// case-insensitive literal `"true"`.
    pub expand: Option<String>,

    /// Separator for sequence fields.
    pub separator: Option<String>,

    /// Marks a nested or owned sub-structure field.
    pub nested: bool,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    ///
    /// Silently ignores unrecognized attributes to allow other macros to
    /// process them.
    pub fn from_field(field: &Field) -> Self {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            let _ = attr.parse_nested_meta(|meta| {
                // key = "NAME[,option...]"
                if meta.path.is_ident("key") {
                    let value = meta.value()?;
                    let lit: Lit = value.parse()?;
                    if let Lit::Str(s) = lit {
                        attrs.key = Some(s.value());
                    }
                    return Ok(());
                }

                // default = "literal" (bare numeric and bool literals are
                // accepted and carried as their source text)
                if meta.path.is_ident("default") {
                    let value = meta.value()?;
                    let lit: Lit = value.parse()?;
                    attrs.default = Some(match lit {
                        Lit::Str(s) => s.value(),
                        Lit::Int(i) => i.base10_digits().to_string(),
                        Lit::Float(f) => f.base10_digits().to_string(),
                        Lit::Bool(b) => b.value.to_string(),
                        other => return Err(syn::Error::new_spanned(
                            other,
                            "unsupported default literal",
                        )),
                    });
                    return Ok(());
                }

                // expand = "true"
                if meta.path.is_ident("expand") {
                    let value = meta.value()?;
                    let lit: Lit = value.parse()?;
                    if let Lit::Str(s) = lit {
                        attrs.expand = Some(s.value());
                    }
                    return Ok(());
                }

                // separator = ";"
                if meta.path.is_ident("separator") {
                    let value = meta.value()?;
                    let lit: Lit = value.parse()?;
                    if let Lit::Str(s) = lit {
                        attrs.separator = Some(s.value());
                    }
                    return Ok(());
                }

                // nested
                if meta.path.is_ident("nested") {
                    attrs.nested = true;
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            });
        }

        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_key_attribute() {
        let field: Field = parse_quote! {
            #[env(key = "DATABASE_URL,required")]
            pub database_url: String
        };

        let attrs = FieldAttrs::from_field(&field);
        assert_eq!(attrs.key, Some("DATABASE_URL,required".to_string()));
        assert!(!attrs.nested);
    }

    #[test]
    fn test_parse_default_string() {
        let field: Field = parse_quote! {
            #[env(key = "ADDR", default = "0.0.0.0:9000")]
            pub addr: String
        };

        let attrs = FieldAttrs::from_field(&field);
        assert_eq!(attrs.default, Some("0.0.0.0:9000".to_string()));
    }

    #[test]
    fn test_parse_default_bare_literals() {
        let field: Field = parse_quote! {
            #[env(key = "PORT", default = 8080)]
            pub port: u16
        };
        assert_eq!(FieldAttrs::from_field(&field).default, Some("8080".to_string()));

        let field: Field = parse_quote! {
            #[env(key = "RATIO", default = 0.5)]
            pub ratio: f64
        };
        assert_eq!(FieldAttrs::from_field(&field).default, Some("0.5".to_string()));

        let field: Field = parse_quote! {
            #[env(key = "DEBUG", default = true)]
            pub debug: bool
        };
        assert_eq!(FieldAttrs::from_field(&field).default, Some("true".to_string()));
    }

    #[test]
    fn test_parse_expand_and_separator() {
        let field: Field = parse_quote! {
            #[env(key = "PATHS", expand = "True", separator = ":")]
            pub paths: Vec<String>
        };

        let attrs = FieldAttrs::from_field(&field);
        assert_eq!(attrs.expand, Some("True".to_string()));
        assert_eq!(attrs.separator, Some(":".to_string()));
    }

    #[test]
    fn test_parse_nested_flag() {
        let field: Field = parse_quote! {
            #[env(nested)]
            pub redis: RedisConfig
        };

        assert!(FieldAttrs::from_field(&field).nested);
    }

    #[test]
    fn test_unannotated_field() {
        let field: Field = parse_quote! {
            pub plain: u32
        };

        let attrs = FieldAttrs::from_field(&field);
        assert_eq!(attrs.key, None);
        assert_eq!(attrs.default, None);
        assert_eq!(attrs.expand, None);
        assert_eq!(attrs.separator, None);
        assert!(!attrs.nested);
    }

    #[test]
    fn test_attributes_split_across_entries() {
        let field: Field = parse_quote! {
            #[env(key = "TOKEN")]
            #[env(default = "anon")]
            pub token: String
        };

        let attrs = FieldAttrs::from_field(&field);
        assert_eq!(attrs.key, Some("TOKEN".to_string()));
        assert_eq!(attrs.default, Some("anon".to_string()));
    }
}
