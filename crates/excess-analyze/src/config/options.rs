//! Options shared by every excess-property check
//!
//! Keys use the camelCase spelling of the lint host's rule options, so the
//! same JSON object can be passed through unchanged:
//!
//! ```json
//! { "skipWords": ["Props"], "skipProperties": ["id"], "checkJsx": false }
//! ```

use crate::logging;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Umbrella UI type names whose values carry framework-internal properties
pub const RECOMMENDED_SKIP_WORDS: &[&str] =
    &["Element", "HTMLElement", "ReactNode", "ReactElement", "FC"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse rule options: {0}")]
    ParseError(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleOptions {
    /// Declared type names never compared against
    pub skip_words: Vec<String>,
    /// Property names ignored on the actual side
    pub skip_properties: Vec<String>,
    /// When non-empty, only these names are reported as missing
    pub target_properties: Vec<String>,
    pub check_jsx: bool,
    /// Compare class instances on the actual side
    pub check_class: bool,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            skip_words: Vec::new(),
            skip_properties: Vec::new(),
            target_properties: Vec::new(),
            check_jsx: true,
            check_class: false,
        }
    }
}

impl RuleOptions {
    /// Defaults plus the recommended skip-words
    pub fn recommended() -> Self {
        Self::default().with_recommended_skip_words()
    }

    /// Add the recommended skip-words that are not configured yet
    pub fn with_recommended_skip_words(mut self) -> Self {
        for word in RECOMMENDED_SKIP_WORDS {
            if !self.skip_words.iter().any(|w| w == word) {
                self.skip_words.push((*word).to_string());
            }
        }
        self
    }

    /// Parse a JSON options object
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load a JSON options file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        logging::log_config_load(path);
        let content = fs::read_to_string(path)?;
        let options = Self::from_json_str(&content)?;
        logging::log_options_summary(&options);
        Ok(options)
    }

    /// Reject duplicated entries in the list options
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, values) in [
            ("skipWords", &self.skip_words),
            ("skipProperties", &self.skip_properties),
            ("targetProperties", &self.target_properties),
        ] {
            let mut seen = HashSet::new();
            for value in values {
                if !seen.insert(value.as_str()) {
                    return Err(ConfigError::InvalidConfig(format!(
                        "duplicate entry '{}' in {}",
                        value, key
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn is_skip_word(&self, name: &str) -> bool {
        self.skip_words.iter().any(|w| w == name)
    }

    pub fn is_skip_property(&self, name: &str) -> bool {
        self.skip_properties.iter().any(|p| p == name)
    }

    /// Whether a missing property with this name may be reported
    pub fn is_target_property(&self, name: &str) -> bool {
        self.target_properties.is_empty() || self.target_properties.iter().any(|p| p == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = RuleOptions::default();
        assert!(options.check_jsx);
        assert!(!options.check_class);
        assert!(options.skip_words.is_empty());
        assert!(options.is_target_property("anything"));
    }

    #[test]
    fn test_recommended_adds_ui_types_once() {
        let options = RuleOptions {
            skip_words: vec!["FC".into(), "Props".into()],
            ..RuleOptions::default()
        }
        .with_recommended_skip_words();

        assert!(options.is_skip_word("ReactNode"));
        assert!(options.is_skip_word("Props"));
        assert_eq!(options.skip_words.iter().filter(|w| *w == "FC").count(), 1);
        assert_eq!(RuleOptions::recommended().skip_words.len(), 5);
    }

    #[test]
    fn test_parse_camel_case_json() {
        let options = RuleOptions::from_json_str(
            r#"{ "skipProperties": ["age"], "targetProperties": ["name"], "checkJsx": false }"#,
        )
        .unwrap();
        assert!(options.is_skip_property("age"));
        assert!(options.is_target_property("name"));
        assert!(!options.is_target_property("age"));
        assert!(!options.check_jsx);
        assert!(!options.check_class);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = RuleOptions::from_json_str(r#"{ "skipWord": ["x"] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_duplicates_rejected() {
        let err = RuleOptions::from_json_str(r#"{ "skipWords": ["A", "A"] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
        assert!(err.to_string().contains("skipWords"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "checkClass": true }"#).unwrap();
        let options = RuleOptions::load(file.path()).unwrap();
        assert!(options.check_class);
        assert!(options.check_jsx);
    }
}
