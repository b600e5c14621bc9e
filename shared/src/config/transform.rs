//! Transform configuration.
//!
//! Options controlling how a preprocessed status document is rendered into
//! metric lines.

use serde::{Deserialize, Serialize};

/// Options for the flattener.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Measurement prefix prepended to every rendered path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Emit boolean leaves as `1`/`0` fields instead of skipping them.
    #[serde(default)]
    pub booleans_as_fields: bool,
}

impl TransformConfig {
    /// Creates the default configuration: no prefix, booleans skipped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the measurement prefix.
    ///
    /// Surrounding dots and whitespace are trimmed; an empty prefix clears it.
    ///
    /// # Examples
    ///
    /// ```
    /// use shared::config::TransformConfig;
    ///
    /// let config = TransformConfig::new().with_prefix("fdb.");
    /// assert_eq!(config.prefix.as_deref(), Some("fdb"));
    ///
    /// let config = TransformConfig::new().with_prefix("  ");
    /// assert_eq!(config.prefix, None);
    /// ```
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = prefix.trim().trim_matches('.');
        self.prefix = if prefix.is_empty() {
            None
        } else {
            Some(prefix.to_string())
        };
        self
    }

    /// Sets whether boolean leaves are emitted as fields.
    #[must_use]
    pub fn with_booleans_as_fields(mut self, enabled: bool) -> Self {
        self.booleans_as_fields = enabled;
        self
    }

    /// Applies the prefix to a rendered measurement path.
    #[must_use]
    pub fn measurement(&self, path: &str) -> String {
        match (&self.prefix, path.is_empty()) {
            (Some(prefix), true) => prefix.clone(),
            (Some(prefix), false) => format!("{prefix}.{path}"),
            (None, _) => path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransformConfig::default();
        assert_eq!(config.prefix, None);
        assert!(!config.booleans_as_fields);
    }

    #[test]
    fn test_measurement_without_prefix() {
        let config = TransformConfig::new();
        assert_eq!(config.measurement("cluster.qos"), "cluster.qos");
        assert_eq!(config.measurement(""), "");
    }

    #[test]
    fn test_measurement_with_prefix() {
        let config = TransformConfig::new().with_prefix(".fdb.status.");
        assert_eq!(config.measurement("cluster.qos"), "fdb.status.cluster.qos");
        assert_eq!(config.measurement(""), "fdb.status");
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let config: TransformConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TransformConfig::default());

        let config: TransformConfig =
            serde_json::from_str(r#"{"prefix": "fdb", "booleans_as_fields": true}"#).unwrap();
        assert_eq!(config.prefix.as_deref(), Some("fdb"));
        assert!(config.booleans_as_fields);
    }
}
