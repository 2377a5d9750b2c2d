//! `mdprop check` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdprop_validate::check_blocks;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Markdown document to audit.
    document: PathBuf,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if !self.document.is_file() {
            return Err(CliError::Validation(format!(
                "document not found: {}",
                self.document.display()
            )));
        }
        let markdown = std::fs::read_to_string(&self.document)?;

        let report = check_blocks(&markdown);
        for (line, kind) in &report.tagged {
            output.info(&format!("ok   line {line}: tagged as {}", kind.as_str()));
        }
        for issue in &report.issues {
            output.error(&format!("FAIL {}", issue.describe()));
        }

        output.separator();
        output.info(&format!(
            "{} diagram-looking block(s), {} tagged, {} with problems",
            report.checked,
            report.tagged.len(),
            report.issues.len()
        ));

        if report.is_clean() {
            output.success("All ASCII diagram blocks are tagged");
            Ok(())
        } else {
            output.info("Supported tags: ascii:architecture, ascii:flowchart, ascii:ui, ascii:timeline, ascii:diagram");
            Err(CliError::Validation(format!(
                "{} untagged diagram block(s)",
                report.issues.len()
            )))
        }
    }
}
