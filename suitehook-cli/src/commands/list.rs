//! `suitehook list` command handler

use std::io::Write;

use serde::Serialize;

use suitehook_core::{CaseInfo, SuiteRegistry};

use crate::error::CliError;
use crate::output::{OutputWriter, Render};
use crate::samples;

/// Execute the `list` command.
pub fn execute(writer: &OutputWriter) -> Result<(), CliError> {
    let registry = samples::registry().map_err(|e| CliError::Command(e.to_string()))?;
    writer.render(&SuiteListing::from_registry(&registry))
}

/// Registered suites with their cases in declaration order.
#[derive(Serialize)]
pub struct SuiteListing {
    pub suites: Vec<SuiteEntry>,
}

#[derive(Serialize)]
pub struct SuiteEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub description: String,
    pub cases: Vec<CaseInfo>,
}

impl SuiteListing {
    pub fn from_registry(registry: &SuiteRegistry) -> Self {
        let suites = registry
            .list()
            .into_iter()
            .filter_map(|info| registry.get(&info.name))
            .map(|suite| {
                let info = suite.info();
                SuiteEntry {
                    name: info.name.clone(),
                    display_name: info.display_name.clone(),
                    description: info.description.clone(),
                    cases: suite.cases().into_iter().cloned().collect(),
                }
            })
            .collect();
        Self { suites }
    }
}

impl Render for SuiteListing {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if self.suites.is_empty() {
            writeln!(w, "No suites registered.")?;
            return Ok(());
        }

        for suite in &self.suites {
            match &suite.display_name {
                Some(display) => writeln!(w, "{} ({})", suite.name.bold(), display)?,
                None => writeln!(w, "{}", suite.name.bold())?,
            }
            if !suite.description.is_empty() {
                writeln!(w, "  {}", suite.description.dimmed())?;
            }
            for case in &suite.cases {
                write!(w, "  - {}", case.name)?;
                if let Some(display) = &case.display_name {
                    write!(w, " \"{}\"", display)?;
                }
                if let Some(reason) = &case.disabled {
                    write!(w, " {}", format!("[disabled: {}]", reason).yellow())?;
                }
                writeln!(w)?;
            }
        }

        Ok(())
    }
}
