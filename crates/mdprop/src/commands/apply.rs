//! `mdprop apply` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdprop_diagrams::apply_side_file;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the apply command.
#[derive(Args)]
pub(crate) struct ApplyArgs {
    /// JSON side file produced by `mdprop export`.
    side_file: PathBuf,
}

impl ApplyArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if !self.side_file.is_file() {
            return Err(CliError::Validation(format!(
                "side file not found: {}",
                self.side_file.display()
            )));
        }

        let outcome = apply_side_file(&self.side_file)?;

        for warning in &outcome.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        output.info(&format!(
            "Replaced {} placeholder(s): {} SVG, {} HTML",
            outcome.replaced,
            outcome.replaced - outcome.ui_count,
            outcome.ui_count
        ));
        if !outcome.skipped.is_empty() {
            output.warning(&format!(
                "Skipped {} placeholder(s) with broken spans",
                outcome.skipped.len()
            ));
        }
        if outcome.legacy_markers > 0 {
            output.warning(&format!(
                "{} marker(s) in the legacy unscoped format remain (from an older tool run)",
                outcome.legacy_markers
            ));
        }

        if outcome.leftover_markers == 0 {
            output.success(&format!(
                "Document updated: {}",
                outcome.html_path.display()
            ));
        } else {
            output.warning(&format!(
                "Document updated with {} pending marker(s) left: {}",
                outcome.leftover_markers,
                outcome.html_path.display()
            ));
        }
        Ok(())
    }
}
