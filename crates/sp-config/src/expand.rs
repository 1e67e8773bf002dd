//! Environment variable and tilde expansion for configuration strings.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `~`, `$VAR`, `${VAR}` and `${VAR:-default}` in `value`.
///
/// `field` names the config key in the error when a variable is unset.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::full(value)
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("docs", "docs.source_dir").unwrap(), "docs");
    }

    #[test]
    fn test_default_value() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SP_EXPAND_UNSET_DIR");
        }
        assert_eq!(
            expand_env("${SP_EXPAND_UNSET_DIR:-site}", "docs.output_dir").unwrap(),
            "site"
        );
    }

    #[test]
    fn test_set_variable() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SP_EXPAND_DOCS", "/srv/docs");
        }
        assert_eq!(
            expand_env("${SP_EXPAND_DOCS}/guide", "docs.source_dir").unwrap(),
            "/srv/docs/guide"
        );
        unsafe {
            std::env::remove_var("SP_EXPAND_DOCS");
        }
    }

    #[test]
    fn test_missing_variable_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SP_EXPAND_MISSING");
        }
        let err = expand_env("${SP_EXPAND_MISSING}", "docs.source_dir").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("docs.source_dir"));
        assert!(msg.contains("SP_EXPAND_MISSING"));
    }
}
