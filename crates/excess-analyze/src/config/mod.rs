//! Rule configuration

pub mod options;

pub use options::{ConfigError, RuleOptions, RECOMMENDED_SKIP_WORDS};
