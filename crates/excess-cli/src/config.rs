//! Configuration file support for excess-lint
//!
//! Loads `.excess-lint.toml` from current directory or parent directories.

use anyhow::{Context, Result};
use excess_analyze::{RuleOptions, Severity};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".excess-lint.toml";

/// Configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rule options, same keys as the JSON options object
    pub rule: RuleOptions,
    pub paths: PathsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Glob patterns of snapshot files and source units to skip
    pub exclude: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "table", "raw", "json" or "github"
    pub format: Option<String>,
    pub severity: Option<Severity>,
}

/// Rule option flags given on the command line
#[derive(Debug, Default)]
pub struct RuleFlags {
    pub skip_words: Vec<String>,
    pub skip_properties: Vec<String>,
    pub target_properties: Vec<String>,
    pub no_jsx: bool,
    pub check_class: bool,
    pub recommended: bool,
}

impl Config {
    /// Load config from `.excess-lint.toml` searching from current directory upward
    pub fn load() -> Result<Option<(Config, PathBuf)>> {
        Self::load_from(std::env::current_dir()?)
    }

    /// Load config searching from the given directory upward
    pub fn load_from(start_dir: PathBuf) -> Result<Option<(Config, PathBuf)>> {
        let mut current = Some(start_dir.as_path());

        while let Some(dir) = current {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                let config = Self::load_path(&config_path)?;
                return Ok(Some((config, config_path)));
            }
            current = dir.parent();
        }

        Ok(None)
    }

    /// Load config from a specific path
    pub fn load_path(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .rule
            .validate()
            .with_context(|| format!("Invalid [rule] table in {}", path.display()))?;
        Ok(config)
    }

    /// Rule options of the file with the command-line flags applied on top
    pub fn effective_options(&self, base: Option<RuleOptions>, flags: &RuleFlags) -> RuleOptions {
        let mut options = base.unwrap_or_else(|| self.rule.clone());

        extend_unique(&mut options.skip_words, &flags.skip_words);
        extend_unique(&mut options.skip_properties, &flags.skip_properties);
        extend_unique(&mut options.target_properties, &flags.target_properties);
        if flags.no_jsx {
            options.check_jsx = false;
        }
        if flags.check_class {
            options.check_class = true;
        }
        if flags.recommended {
            options = options.with_recommended_skip_words();
        }

        options
    }
}

fn extend_unique(target: &mut Vec<String>, values: &[String]) {
    for value in values {
        if !target.contains(value) {
            target.push(value.clone());
        }
    }
}
