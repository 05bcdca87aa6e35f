//! excess-lint CLI - excess-property lint for TypeScript
//!
//! Reads typed-tree snapshot files (JSON exports of source units and their
//! resolved types) and reports object values carrying properties their
//! declared types do not declare:
//! - annotated variable initializers
//! - call arguments, across every overload
//! - function and lambda return values
//! - JSX element attributes

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use excess_analyze::{
    checks::{Check, CheckRegistry},
    logging,
    output::{format_issues, OutputFormat},
    AnalysisReport, Analyzer, RuleOptions, Severity,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use config::{Config, RuleFlags};

#[derive(Parser, Debug)]
#[command(name = "excess-lint")]
#[command(version = "0.1.0")]
#[command(about = "Reports object properties that their declared types do not declare")]
struct Cli {
    /// Snapshot files or directories holding them
    #[arg(required_unless_present = "list_checks")]
    paths: Vec<PathBuf>,

    /// Declared type name never compared against (repeatable)
    #[arg(long, value_name = "NAME")]
    skip_word: Vec<String>,

    /// Property name ignored on the actual side (repeatable)
    #[arg(long, value_name = "NAME")]
    skip_property: Vec<String>,

    /// Only report these missing property names (repeatable)
    #[arg(long, value_name = "NAME")]
    target_property: Vec<String>,

    /// Do not check JSX attributes
    #[arg(long)]
    no_jsx: bool,

    /// Compare class instances on the actual side
    #[arg(long)]
    check_class: bool,

    /// Add the recommended skip-words (Element, HTMLElement, ReactNode, ...)
    #[arg(long)]
    recommended: bool,

    /// JSON rule options file, replaces the [rule] table of the config
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,

    /// Output format: table, raw, json, github
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Path to config file (default: auto-detect .excess-lint.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, conflicts_with = "config")]
    no_config: bool,

    /// Write a debug log (default: a timestamped file in the temp directory)
    #[arg(long, value_name = "FILE")]
    debug_log: Option<Option<PathBuf>>,

    /// Show verbose output
    #[arg(long, short = 'v')]
    verbose: bool,

    /// List available checks and exit
    #[arg(long)]
    list_checks: bool,
}

impl Cli {
    fn rule_flags(&self) -> RuleFlags {
        RuleFlags {
            skip_words: self.skip_word.clone(),
            skip_properties: self.skip_property.clone(),
            target_properties: self.target_property.clone(),
            no_jsx: self.no_jsx,
            check_class: self.check_class,
            recommended: self.recommended,
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if cli.list_checks {
        println!("{}", "Available checks:".bold());
        for check in CheckRegistry::with_builtin_checks().all_checks() {
            println!("  {} - {}", check.id().green(), check.description());
        }
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(log_path) = &cli.debug_log {
        match logging::init_logger(log_path.as_deref()) {
            Ok(path) => {
                if cli.verbose {
                    println!("{}: Debug log writing to {}", "Debug".bold(), path.display());
                }
            }
            Err(e) => {
                eprintln!("{}: Failed to initialize debug log: {}", "Warning".yellow(), e);
            }
        }
    }

    let config = load_config(&cli)?;

    let base = match &cli.options {
        Some(path) => Some(
            RuleOptions::load(path)
                .with_context(|| format!("Failed to load rule options from {}", path.display()))?,
        ),
        None => None,
    };
    let options = config.effective_options(base, &cli.rule_flags());
    options.validate()?;
    logging::log_options_summary(&options);

    let format_name = cli
        .format
        .as_deref()
        .or(config.output.format.as_deref())
        .unwrap_or("table");
    let format: OutputFormat = format_name.parse().map_err(anyhow::Error::msg)?;

    let analyzer = Analyzer::new(options)
        .with_exclude_patterns(&config.paths.exclude)?
        .with_severity(config.output.severity.unwrap_or(Severity::Error));

    if cli.verbose {
        println!(
            "{}: {}",
            "Analyzing".bold(),
            cli.paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let paths: Vec<&Path> = cli.paths.iter().map(|p| p.as_path()).collect();
    let report = analyzer.analyze_paths(&paths)?;

    report_skipped(&report);
    if cli.verbose {
        println!(
            "{}: {} snapshot files, {} findings",
            "Done".green(),
            report.files,
            report.issues.len()
        );
    }

    print!("{}", format_issues(&report.issues, format));

    Ok(exit_code(&report))
}

fn load_config(cli: &Cli) -> Result<Config> {
    if cli.no_config {
        return Ok(Config::default());
    }

    if let Some(config_path) = &cli.config {
        if !config_path.exists() {
            anyhow::bail!("Configuration file not found: {}", config_path.display());
        }
        logging::log_config_load(config_path);
        let config = Config::load_path(config_path)?;
        if cli.verbose {
            println!("{}: {}", "Using config".bold(), config_path.display());
        }
        return Ok(config);
    }

    match Config::load()? {
        Some((config, path)) => {
            logging::log_config_load(&path);
            if cli.verbose {
                println!("{}: {}", "Using config".bold(), path.display());
            }
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

fn report_skipped(report: &AnalysisReport) {
    for skipped in &report.skipped {
        eprintln!(
            "{}: Skipping {}: {}",
            "Warning".yellow(),
            skipped.path.display(),
            skipped.error
        );
    }
}

fn exit_code(report: &AnalysisReport) -> ExitCode {
    if report.issues.error_count() > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rule_flags() {
        let cli = Cli::try_parse_from([
            "excess-lint",
            "snapshots/",
            "--skip-word",
            "Props",
            "--skip-word",
            "Theme",
            "--skip-property",
            "id",
            "--no-jsx",
            "--recommended",
        ])
        .unwrap();

        let flags = cli.rule_flags();
        assert_eq!(flags.skip_words, vec!["Props", "Theme"]);
        assert_eq!(flags.skip_properties, vec!["id"]);
        assert!(flags.no_jsx);
        assert!(flags.recommended);
        assert!(!flags.check_class);
        assert_eq!(cli.paths, vec![PathBuf::from("snapshots/")]);
    }

    #[test]
    fn test_paths_required_unless_listing() {
        assert!(Cli::try_parse_from(["excess-lint"]).is_err());
        assert!(Cli::try_parse_from(["excess-lint", "--list-checks"]).is_ok());
    }

    #[test]
    fn test_debug_log_value_is_optional() {
        let cli = Cli::try_parse_from(["excess-lint", "a.json", "--debug-log"]).unwrap();
        assert_eq!(cli.debug_log, Some(None));

        let cli =
            Cli::try_parse_from(["excess-lint", "a.json", "--debug-log", "/tmp/x.log"]).unwrap();
        assert_eq!(cli.debug_log, Some(Some(PathBuf::from("/tmp/x.log"))));
    }

    #[test]
    fn test_config_conflicts_with_no_config() {
        let result = Cli::try_parse_from([
            "excess-lint",
            "a.json",
            "--config",
            "x.toml",
            "--no-config",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_exit_code_follows_error_count() {
        let report = AnalysisReport::default();
        assert_eq!(exit_code(&report), ExitCode::SUCCESS);
    }
}
