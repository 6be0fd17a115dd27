//! `suitehook config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use suitehook_core::config::SuitehookConfig;
use suitehook_core::error::{ConfigError, SuitehookError};

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `config` command.
pub async fn execute(
    args: ConfigArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => execute_show(config_path, section, writer).await,
    }
}

/// Load the effective configuration.
///
/// A missing file is not an error: defaults plus environment overrides are used.
pub async fn load_effective(config_path: &Path) -> Result<SuitehookConfig, CliError> {
    match SuitehookConfig::load(config_path).await {
        Ok(config) => Ok(config),
        Err(SuitehookError::Config(ConfigError::FileNotFound { .. })) => {
            let mut config = SuitehookConfig::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
        Err(e) => Err(e.into()),
    }
}

/// Execute the config validate subcommand.
///
/// Unlike other commands, a missing file is reported as invalid.
///
/// # Errors
///
/// Returns `CliError::Config` if validation fails (parse errors, invalid values).
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let report = match SuitehookConfig::load(config_path).await {
        Ok(_) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: true,
            errors: Vec::new(),
        },
        Err(e) => ConfigValidationReport {
            source: config_path.display().to_string(),
            valid: false,
            errors: vec![e.to_string()],
        },
    };

    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }

    Ok(())
}

/// Execute the config show subcommand.
///
/// Displays the effective configuration (file + env overrides + defaults),
/// optionally limited to one section (general, runner, properties).
async fn execute_show(
    config_path: &Path,
    section: Option<String>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = load_effective(config_path).await?;
    let report = build_show_report(&config, config_path, section)?;
    writer.render(&report)?;

    Ok(())
}

fn build_show_report(
    config: &SuitehookConfig,
    config_path: &Path,
    section: Option<String>,
) -> Result<ConfigReport, CliError> {
    let (config_toml, config_json) = match section.as_deref() {
        None => (toml::to_string_pretty(config), serde_json::to_value(config)?),
        Some("general") => (
            toml::to_string_pretty(&config.general),
            serde_json::to_value(&config.general)?,
        ),
        Some("runner") => (
            toml::to_string_pretty(&config.runner),
            serde_json::to_value(&config.runner)?,
        ),
        Some("properties") => (
            toml::to_string_pretty(&config.properties),
            serde_json::to_value(&config.properties)?,
        ),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {} (expected: general, runner, properties)",
                other
            )));
        }
    };

    Ok(ConfigReport {
        source: config_path.display().to_string(),
        section,
        config: config_json,
        config_toml: config_toml.unwrap_or_else(|e| format!("(serialization error: {})", e)),
    })
}

/// Configuration display report.
///
/// JSON output carries the configuration as `config`; text output prints `config_toml`.
#[derive(Debug, Serialize)]
pub struct ConfigReport {
    /// Configuration file path
    pub source: String,
    /// Optional section name (None = full config)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Effective configuration (or the selected section)
    pub config: serde_json::Value,
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if let Some(ref section) = self.section {
            let section_label = format!("[{}]", section);
            writeln!(
                w,
                "Configuration {} (source: {})",
                section_label.bold(),
                self.source
            )?;
        } else {
            writeln!(w, "Configuration (source: {})", self.source.bold())?;
        }

        writeln!(w)?;
        write!(w, "{}", self.config_toml)?;

        Ok(())
    }
}

/// Configuration validation report.
#[derive(Serialize)]
pub struct ConfigValidationReport {
    pub source: String,
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Config Validation: {}", self.source.bold())?;

        if self.valid {
            writeln!(w, "  Result: {}", "VALID".green().bold())?;
        } else {
            writeln!(w, "  Result: {}", "INVALID".red().bold())?;
            for err in &self.errors {
                writeln!(w, "  Error: {}", err.red())?;
            }
        }

        Ok(())
    }
}
