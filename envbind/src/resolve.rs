//! Key resolution: annotation options, defaults, and variable expansion

use std::env;

use crate::error::Error;

/// Per-field annotation metadata, built at compile time by
/// `#[derive(EnvBind)]`.
///
/// `key` is the raw key annotation, `NAME[,option[,option...]]`; options are
/// interpreted during resolution. All other annotations are carried verbatim.
#[derive(Debug, Clone, Copy)]
pub struct FieldMeta {
    /// Field name in the source structure
    pub name: &'static str,
    /// Raw key annotation, empty when the field has none
    pub key: &'static str,
    /// Default literal, empty when the field has none
    pub default: &'static str,
    /// Expansion annotation; the literal `"true"` (case-insensitive) enables
    /// `${VAR}`/`$VAR` substitution
    pub expand: &'static str,
    /// Sequence separator, `,` when empty
    pub separator: &'static str,
}

/// Compute the effective source string for one field.
///
/// Lookup order: environment value for the base key, else the declared
/// default literal. Expansion, when enabled, applies to that result before
/// options are evaluated. Options are processed in order and the last
/// applied error or value wins; `required` re-reads the raw environment
/// value, so it overwrites an expanded string.
pub(crate) fn resolve(meta: &FieldMeta) -> Result<String, Error> {
    let mut options = meta.key.split(',');
    let key = options.next().unwrap_or("");

    let mut value = match env::var(key) {
        Ok(value) => value,
        Err(_) => meta.default.to_string(),
    };

    if meta.expand.eq_ignore_ascii_case("true") {
        value = expand(&value);
    }

    let mut outcome = Ok(value);
    for option in options {
        match option {
            "" => {}
            "required" => {
                outcome = env::var(key).map_err(|_| Error::MissingRequired {
                    key: key.to_string(),
                });
            }
            unsupported => {
                outcome = Err(Error::UnsupportedOption {
                    option: unsupported.to_string(),
                });
            }
        }
    }
    outcome
}

/// Shell-style substitution of `${VAR}` and `$VAR` references against the
/// environment. Unset variables expand to the empty string; a `$` that does
/// not introduce a variable name, and an unterminated `${`, are left
/// verbatim.
fn expand(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(close) => {
                    out.push_str(&env::var(&braced[..close]).unwrap_or_default());
                    rest = &braced[close + 1..];
                }
                None => {
                    out.push_str(&rest[dollar..]);
                    rest = "";
                }
            }
            continue;
        }

        let name_len = after
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(after.len());
        if name_len == 0 {
            out.push('$');
            rest = after;
        } else {
            out.push_str(&env::var(&after[..name_len]).unwrap_or_default());
            rest = &after[name_len..];
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn meta(key: &'static str, default: &'static str, expand: &'static str) -> FieldMeta {
        FieldMeta {
            name: "field",
            key,
            default,
            expand,
            separator: "",
        }
    }

    #[test]
    #[serial]
    fn test_env_value_wins_over_default() {
        env::set_var("RESOLVE_BASIC", "from_env");
        let value = resolve(&meta("RESOLVE_BASIC", "from_default", "")).unwrap();
        assert_eq!(value, "from_env");
        env::remove_var("RESOLVE_BASIC");
    }

    #[test]
    #[serial]
    fn test_default_used_when_absent() {
        env::remove_var("RESOLVE_ABSENT");
        let value = resolve(&meta("RESOLVE_ABSENT", "fallback", "")).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    #[serial]
    fn test_unannotated_field_resolves_empty() {
        let value = resolve(&meta("", "", "")).unwrap();
        assert_eq!(value, "");
    }

    #[test]
    #[serial]
    fn test_required_present() {
        env::set_var("RESOLVE_REQ", "present");
        let value = resolve(&meta("RESOLVE_REQ,required", "", "")).unwrap();
        assert_eq!(value, "present");
        env::remove_var("RESOLVE_REQ");
    }

    #[test]
    #[serial]
    fn test_required_missing_ignores_default() {
        env::remove_var("RESOLVE_REQ_MISSING");
        let err = resolve(&meta("RESOLVE_REQ_MISSING,required", "fallback", "")).unwrap_err();
        match err {
            Error::MissingRequired { key } => assert_eq!(key, "RESOLVE_REQ_MISSING"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    #[serial]
    fn test_unsupported_option() {
        let err = resolve(&meta("RESOLVE_OPT,bogus", "", "")).unwrap_err();
        match err {
            Error::UnsupportedOption { option } => assert_eq!(option, "bogus"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    #[serial]
    fn test_empty_option_is_noop() {
        env::set_var("RESOLVE_EMPTY_OPT", "ok");
        let value = resolve(&meta("RESOLVE_EMPTY_OPT,,required", "", "")).unwrap();
        assert_eq!(value, "ok");
        env::remove_var("RESOLVE_EMPTY_OPT");
    }

    #[test]
    #[serial]
    fn test_later_option_overrides_earlier_error() {
        // `required` resolving successfully clears the earlier bogus-option
        // error: the last applied error or value wins.
        env::set_var("RESOLVE_ORDER", "value");
        let value = resolve(&meta("RESOLVE_ORDER,bogus,required", "", "")).unwrap();
        assert_eq!(value, "value");
        env::remove_var("RESOLVE_ORDER");
    }

    #[test]
    #[serial]
    fn test_expansion_applies_to_env_value() {
        env::set_var("RESOLVE_EXP_TARGET", "inner");
        env::set_var("RESOLVE_EXP", "pre-${RESOLVE_EXP_TARGET}-post");
        let value = resolve(&meta("RESOLVE_EXP", "", "true")).unwrap();
        assert_eq!(value, "pre-inner-post");
        env::remove_var("RESOLVE_EXP");
        env::remove_var("RESOLVE_EXP_TARGET");
    }

    #[test]
    #[serial]
    fn test_expansion_applies_to_default() {
        env::set_var("RESOLVE_EXP_TARGET2", "filled");
        env::remove_var("RESOLVE_EXP_DEFAULT");
        let value = resolve(&meta("RESOLVE_EXP_DEFAULT", "$RESOLVE_EXP_TARGET2", "TRUE")).unwrap();
        assert_eq!(value, "filled");
        env::remove_var("RESOLVE_EXP_TARGET2");
    }

    #[test]
    #[serial]
    fn test_expansion_flag_must_be_true() {
        env::set_var("RESOLVE_EXP_OFF", "${RESOLVE_NOPE}");
        let value = resolve(&meta("RESOLVE_EXP_OFF", "", "yes")).unwrap();
        assert_eq!(value, "${RESOLVE_NOPE}");
        env::remove_var("RESOLVE_EXP_OFF");
    }

    #[test]
    #[serial]
    fn test_required_rereads_raw_value() {
        // Expansion happens before options; `required` then re-reads the raw
        // environment string, overwriting the expanded one.
        env::set_var("RESOLVE_RAW_TARGET", "expanded");
        env::set_var("RESOLVE_RAW", "$RESOLVE_RAW_TARGET");
        let value = resolve(&meta("RESOLVE_RAW,required", "", "true")).unwrap();
        assert_eq!(value, "$RESOLVE_RAW_TARGET");
        env::remove_var("RESOLVE_RAW");
        env::remove_var("RESOLVE_RAW_TARGET");
    }

    #[test]
    #[serial]
    fn test_expand_forms() {
        env::set_var("EXPAND_A", "alpha");
        env::set_var("EXPAND_B", "beta");
        env::remove_var("EXPAND_UNSET");

        assert_eq!(expand("$EXPAND_A/$EXPAND_B"), "alpha/beta");
        assert_eq!(expand("${EXPAND_A}beta"), "alphabeta");
        assert_eq!(expand("x${EXPAND_UNSET}y"), "xy");
        assert_eq!(expand("cost: 5$"), "cost: 5$");
        assert_eq!(expand("$-literal"), "$-literal");
        assert_eq!(expand("${unterminated"), "${unterminated");
        assert_eq!(expand("no references"), "no references");

        env::remove_var("EXPAND_A");
        env::remove_var("EXPAND_B");
    }
}
