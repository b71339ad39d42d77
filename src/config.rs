//! Handler configuration
//!
//! Controls response encoding and how much of a server-side failure is
//! revealed to clients.
//!
//! Supported environment variables (see [`HandlerConfig::from_env`]):
//! - `GRAPHQL_WEB_PRETTY_JSON`: pretty-print response bodies
//! - `GRAPHQL_WEB_MASK_ERRORS`: replace server-error messages with a generic one

use crate::error::GraphQlWebError;

pub const ENV_PRETTY_JSON: &str = "GRAPHQL_WEB_PRETTY_JSON";
pub const ENV_MASK_ERRORS: &str = "GRAPHQL_WEB_MASK_ERRORS";

const DEFAULT_MASKED_MESSAGE: &str = "internal error";

/// Options for a [`GraphQlHandler`](crate::handler::GraphQlHandler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Whether to pretty-print the JSON output.
    /// Default: `false`
    pub pretty_json: bool,

    /// Whether to mask server-error messages in response bodies.
    ///
    /// Client errors (malformed or invalid requests) are never masked.
    /// Default: `true`
    pub mask_errors: bool,

    /// Message used when `mask_errors` is `true`.
    /// Default: `None` ("internal error")
    pub masked_error_message: Option<String>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            pretty_json: false,
            mask_errors: true,
            masked_error_message: None,
        }
    }
}

impl HandlerConfig {
    /// Create options suitable for development (errors not masked).
    pub fn development() -> Self {
        Self {
            mask_errors: false,
            ..Default::default()
        }
    }

    /// Create options suitable for production (errors masked).
    pub fn production() -> Self {
        Self {
            mask_errors: true,
            ..Default::default()
        }
    }

    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    pub fn with_masked_error_message(mut self, message: impl Into<String>) -> Self {
        self.mask_errors = true;
        self.masked_error_message = Some(message.into());
        self
    }

    pub fn masked_message(&self) -> &str {
        self.masked_error_message
            .as_deref()
            .unwrap_or(DEFAULT_MASKED_MESSAGE)
    }

    /// Build from environment variables, starting from the defaults.
    pub fn from_env() -> Result<Self, GraphQlWebError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, config file, tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GraphQlWebError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_PRETTY_JSON) {
            config.pretty_json = parse_bool(ENV_PRETTY_JSON, &value)?;
        }
        if let Some(value) = lookup(ENV_MASK_ERRORS) {
            config.mask_errors = parse_bool(ENV_MASK_ERRORS, &value)?;
        }
        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, GraphQlWebError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(GraphQlWebError::Configuration(format!(
            "Invalid value for {key}: {value}. Valid options: true, false, 1, 0, yes, no"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_mask_errors() {
        let config = HandlerConfig::default();
        assert!(config.mask_errors);
        assert!(!config.pretty_json);
        assert_eq!(config.masked_message(), "internal error");
        assert_eq!(config, HandlerConfig::production());
        assert!(!HandlerConfig::development().mask_errors);
    }

    #[test]
    fn reads_flags_case_insensitively() {
        let config =
            HandlerConfig::from_lookup(lookup(&[(ENV_PRETTY_JSON, "YES"), (ENV_MASK_ERRORS, "0")]))
                .unwrap();
        assert!(config.pretty_json);
        assert!(!config.mask_errors);
    }

    #[test]
    fn missing_variables_keep_defaults() {
        let config = HandlerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, HandlerConfig::default());
    }

    #[test]
    fn invalid_value_names_the_variable() {
        let err = HandlerConfig::from_lookup(lookup(&[(ENV_MASK_ERRORS, "maybe")])).unwrap_err();
        assert!(matches!(err, GraphQlWebError::Configuration(_)));
        assert!(err.to_string().contains(ENV_MASK_ERRORS));
    }

    #[test]
    fn custom_masked_message_enables_masking() {
        let config = HandlerConfig::development().with_masked_error_message("try again later");
        assert!(config.mask_errors);
        assert_eq!(config.masked_message(), "try again later");
    }
}
