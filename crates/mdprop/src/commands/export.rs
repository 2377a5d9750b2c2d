//! `mdprop export` command implementation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use mdprop_diagrams::{SessionId, export_pending};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Rendered HTML document containing pending spans.
    document: PathBuf,

    /// Session to export (defaults to the first one found in the document).
    #[arg(short, long)]
    session: Option<String>,
}

impl ExportArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if !self.document.is_file() {
            return Err(CliError::Validation(format!(
                "document not found: {}",
                self.document.display()
            )));
        }

        let session = match &self.session {
            Some(raw) => Some(SessionId::parse(raw).ok_or_else(|| {
                CliError::Validation(format!("invalid session id '{raw}'"))
            })?),
            None => None,
        };

        let outcome = export_pending(&self.document, session.as_ref())?;
        for warning in &outcome.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        output.info(&format!("Session: {}", outcome.set.session_id));
        output.info(&format!("Exported {} placeholder(s):", outcome.set.total));
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for item in &outcome.set.placeholders {
            *counts.entry(item.kind.as_str()).or_default() += 1;
        }
        for (kind, count) in counts {
            output.item(&format!("{kind}: {count}"));
        }

        output.success(&format!("Side file written: {}", outcome.side_file.display()));
        output.info("Drop generated files into the session cache, then run 'mdprop apply'");
        Ok(())
    }
}
