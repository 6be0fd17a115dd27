//! `suitehook run` command handler

use std::io::Write;

use tracing::info;

use suitehook_core::config::{RunnerConfig, SuitehookConfig};
use suitehook_core::{CaseOrder, Outcome, PhaseOutcome, RunSummary, SuiteReport};

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};
use crate::samples;

/// Execute the `run` command.
///
/// Suites run on the blocking pool since case bodies are synchronous.
///
/// # Errors
///
/// Returns `CliError::TestsFailed` when any suite is unsuccessful, after the
/// summary has been rendered.
pub async fn execute(
    args: RunArgs,
    mut config: SuitehookConfig,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    apply_overrides(&args, &mut config.runner);
    config.validate()?;

    info!(
        suites = ?args.suites,
        order = %config.runner.order,
        seed = ?config.runner.seed,
        "starting run"
    );

    let suites = args.suites;
    let summary = tokio::task::spawn_blocking(move || -> Result<RunSummary, CliError> {
        let registry = samples::registry().map_err(|e| CliError::Command(e.to_string()))?;
        let summary = if suites.is_empty() {
            registry.run_all(&config)?
        } else {
            let names: Vec<&str> = suites.iter().map(String::as_str).collect();
            registry.run_selected(&names, &config)?
        };
        Ok(summary)
    })
    .await
    .map_err(|e| CliError::Command(format!("run task failed: {e}")))??;

    writer.render(&summary)?;

    if !summary.is_success() {
        return Err(CliError::TestsFailed {
            failed: summary.total_failed(),
        });
    }

    Ok(())
}

/// Apply command-line flags on top of the loaded runner configuration.
///
/// `--seed` without `--order` selects random order.
pub fn apply_overrides(args: &RunArgs, runner: &mut RunnerConfig) {
    if let Some(order) = args.order {
        runner.order = order.into();
    }
    if let Some(seed) = args.seed {
        runner.seed = Some(seed);
        if args.order.is_none() {
            runner.order = CaseOrder::Random;
        }
    }
    if let Some(filter) = &args.filter {
        runner.filter = Some(filter.clone());
    }
    if args.parallel {
        runner.parallel_suites = true;
    }
}

impl Render for RunSummary {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for suite in &self.suites {
            render_suite(suite, w)?;
            writeln!(w)?;
        }

        let status = if self.is_success() {
            "PASSED".green().bold()
        } else {
            "FAILED".red().bold()
        };
        writeln!(
            w,
            "Summary: {} passed, {} failed, {} skipped ({} total) {}",
            self.total_passed(),
            self.total_failed(),
            self.total_skipped(),
            self.total_cases(),
            status
        )?;

        Ok(())
    }
}

fn render_suite(suite: &SuiteReport, w: &mut dyn Write) -> std::io::Result<()> {
    use colored::Colorize;

    let title = suite.display_name.as_deref().unwrap_or(&suite.suite);
    match suite.seed {
        Some(seed) => writeln!(
            w,
            "{} ({}, order: {}, seed: {})",
            title.bold(),
            suite.suite,
            suite.order,
            seed
        )?,
        None => writeln!(
            w,
            "{} ({}, order: {})",
            title.bold(),
            suite.suite,
            suite.order
        )?,
    }

    render_phase("setup", &suite.setup, w)?;
    for case in &suite.cases {
        let marker = match &case.outcome {
            Outcome::Passed => "✓".green(),
            Outcome::Skipped { .. } | Outcome::Disabled { .. } => "-".yellow(),
            Outcome::Failed { .. } | Outcome::ConfigError { .. } | Outcome::NotRun { .. } => {
                "✗".red()
            }
        };
        write!(w, "  {} {} ({} ms)", marker, case.label(), case.duration_ms)?;
        match case.outcome.reason() {
            Some(reason) => writeln!(w, " {}: {}", case.outcome.label(), reason)?,
            None => writeln!(w)?,
        }
    }
    render_phase("teardown", &suite.teardown, w)?;

    Ok(())
}

fn render_phase(name: &str, phase: &PhaseOutcome, w: &mut dyn Write) -> std::io::Result<()> {
    use colored::Colorize;

    match phase {
        PhaseOutcome::Passed => writeln!(w, "  {} {}", "✓".green(), name),
        PhaseOutcome::Skipped => Ok(()),
        PhaseOutcome::Failed { reason } => {
            writeln!(w, "  {} {} failed: {}", "✗".red(), name, reason.red())
        }
    }
}
