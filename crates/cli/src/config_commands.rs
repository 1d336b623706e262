use std::path::Path;

use {
    anyhow::Result,
    clap::Subcommand,
    spindle_config::{Severity, SpindleConfig, find_config_file},
};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Validate the configuration and report errors and warnings.
    Check,
    /// Print the effective configuration as TOML.
    Show,
}

pub fn handle_config(
    action: ConfigAction,
    config: &SpindleConfig,
    path: Option<&Path>,
) -> Result<()> {
    match action {
        ConfigAction::Check => check(config, path),
        ConfigAction::Show => {
            println!("{}", toml::to_string_pretty(config)?);
            Ok(())
        },
    }
}

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn check(config: &SpindleConfig, path: Option<&Path>) -> Result<()> {
    match path.map(Path::to_path_buf).or_else(find_config_file) {
        Some(path) => eprintln!("Checking {}\n", path.display()),
        None => eprintln!("No config file found; checking defaults.\n"),
    }

    let result = config.validate();
    for d in &result.diagnostics {
        let color = match d.severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
        };
        eprintln!("  {BOLD}{color}{}{RESET} {}: {}", d.severity, d.path, d.message);
    }
    if !result.diagnostics.is_empty() {
        eprintln!();
    }

    let errors = result.count(Severity::Error);
    let warnings = result.count(Severity::Warning);
    if errors == 0 && warnings == 0 {
        eprintln!("No issues found.");
    } else {
        eprintln!("{errors} error(s), {warnings} warning(s)");
    }

    if errors > 0 {
        anyhow::bail!("configuration has {errors} error(s)");
    }
    Ok(())
}
