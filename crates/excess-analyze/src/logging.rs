//! Debug log for excess-analyze
//!
//! An opt-in file log of the options in effect, the units analyzed, every
//! reported finding and the comparator's cache usage, for verifying why a
//! finding was (or was not) reported.

use crate::compare::CacheStats;
use crate::config::RuleOptions;
use crate::issue::Issue;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Global logger instance
static LOGGER: Mutex<Option<AnalyzeLogger>> = Mutex::new(None);

/// Logger for analyze operations
pub struct AnalyzeLogger {
    file: File,
}

impl AnalyzeLogger {
    /// Create a new logger writing to the specified path
    pub fn new(log_path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;

        Ok(Self { file })
    }

    /// Write a log message
    pub fn log(&mut self, message: &str) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(self.file, "[{}] {}", timestamp, message);
        let _ = self.file.flush();
    }

    /// Log a section header
    pub fn section(&mut self, title: &str) {
        let separator = "=".repeat(60);
        self.log(&separator);
        self.log(title);
        self.log(&separator);
    }

    /// Log a subsection
    pub fn subsection(&mut self, title: &str) {
        let separator = "-".repeat(40);
        self.log(&separator);
        self.log(title);
        self.log(&separator);
    }
}

/// Initialize the global logger
pub fn init_logger(log_path: Option<&Path>) -> std::io::Result<PathBuf> {
    let path = log_path.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        std::env::temp_dir().join(format!("excess-lint-{}.log", timestamp))
    });

    let logger = AnalyzeLogger::new(&path)?;

    if let Ok(mut guard) = LOGGER.lock() {
        *guard = Some(logger);
    }

    Ok(path)
}

fn with_logger(f: impl FnOnce(&mut AnalyzeLogger)) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            f(logger);
        }
    }
}

/// Log a message to the global logger
pub fn log(message: &str) {
    with_logger(|logger| logger.log(message));
}

/// Log a section header
pub fn section(title: &str) {
    with_logger(|logger| logger.section(title));
}

/// Log a subsection
pub fn subsection(title: &str) {
    with_logger(|logger| logger.subsection(title));
}

/// Check if logging is enabled
pub fn is_enabled() -> bool {
    LOGGER.lock().map(|guard| guard.is_some()).unwrap_or(false)
}

/// Log configuration loading
pub fn log_config_load(path: &Path) {
    section("CONFIGURATION LOADING");
    log(&format!("Loading config from: {}", path.display()));
}

/// Log the rule options in effect
pub fn log_options_summary(options: &RuleOptions) {
    section("RULE OPTIONS");
    log(&format!("skipWords: {:?}", options.skip_words));
    log(&format!("skipProperties: {:?}", options.skip_properties));
    log(&format!("targetProperties: {:?}", options.target_properties));
    log(&format!("checkJsx: {}", options.check_jsx));
    log(&format!("checkClass: {}", options.check_class));
}

/// Log analysis start
pub fn log_analysis_start(units_count: usize) {
    section("ANALYSIS START");
    log(&format!("Analyzing {} source units", units_count));
}

/// Log the start of one source unit
pub fn log_unit_start(path: &Path, checks: &[&str]) {
    subsection(&format!("UNIT {}", path.display()));
    log(&format!("Checks: {}", checks.join(", ")));
}

/// Log a reported finding
pub fn log_finding(issue: &Issue) {
    log(&format!(
        "REPORTED: {}:{}:{} [{}] {}",
        issue.file.display(),
        issue.line,
        issue.column,
        issue.check_id,
        issue.message
    ));
}

/// Log the comparator's memo usage for one unit
pub fn log_cache_stats(path: &Path, stats: CacheStats) {
    log(&format!(
        "Comparator cache for {}: {} hits, {} misses",
        path.display(),
        stats.hits,
        stats.misses
    ));
}

/// Log a snapshot that could not be read
pub fn log_snapshot_skipped(path: &Path, error: &str) {
    log(&format!("SKIPPED: {}", path.display()));
    log(&format!("  Error: {}", error));
}

/// Log analysis complete
pub fn log_analysis_complete(total_findings: usize, skipped_units: usize) {
    section("ANALYSIS COMPLETE");
    log(&format!("Findings reported: {}", total_findings));
    log(&format!("Units skipped: {}", skipped_units));
}
