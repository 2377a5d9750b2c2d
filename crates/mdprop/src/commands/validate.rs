//! `mdprop validate` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdprop_validate::validate_proposal;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the validate command.
#[derive(Args)]
pub(crate) struct ValidateArgs {
    /// Markdown proposal to validate.
    document: PathBuf,
}

impl ValidateArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if !self.document.is_file() {
            return Err(CliError::Validation(format!(
                "document not found: {}",
                self.document.display()
            )));
        }
        let markdown = std::fs::read_to_string(&self.document)?;

        output.separator();
        output.highlight("Proposal validation");
        output.separator();

        let report = validate_proposal(&markdown);
        for section in &report.present_sections {
            output.info(&format!("ok   core section present: {section}"));
        }
        for issue in &report.issues {
            output.error(&format!("FAIL {issue}"));
        }
        for warning in &report.warnings {
            output.warning(&format!("warn {warning}"));
        }

        output.separator();
        if report.is_valid() {
            if report.warnings.is_empty() {
                output.success("All checks passed");
            } else {
                output.success(&format!(
                    "Valid with {} warning(s)",
                    report.warnings.len()
                ));
            }
            Ok(())
        } else {
            Err(CliError::Validation(format!(
                "{} issue(s) found",
                report.issues.len()
            )))
        }
    }
}
