//! `mdprop convert` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdprop_diagrams::RenderMode;
use mdprop_renderer::{ConvertOptions, convert_document};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown document to convert.
    document: PathBuf,

    /// Theme name (see `mdprop themes`).
    #[arg(short, long, default_value = mdprop_theme::DEFAULT_THEME)]
    theme: String,

    /// Directory with additional theme YAML files.
    #[arg(long)]
    theme_dir: Option<PathBuf>,

    /// Emit pending spans for external generation instead of rendering
    /// diagrams inline.
    #[arg(long, env = "MDPROP_DEFERRED")]
    deferred: bool,
}

impl ConvertArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let options = ConvertOptions {
            theme: self.theme,
            theme_dir: self.theme_dir,
            mode: if self.deferred {
                RenderMode::Deferred
            } else {
                RenderMode::Immediate
            },
        };

        let summary = convert_document(&self.document, &options)?;

        output.info(&format!("Session: {}", summary.session));
        output.info(&format!("Cache:   {}", summary.cache_dir.display()));
        output.info(&format!("Theme:   {}", summary.theme_name));

        if summary.diagrams.is_empty() {
            output.info("No diagram blocks found");
        } else {
            output.info(&format!(
                "Extracted {} diagram block(s):",
                summary.diagrams.len()
            ));
            for (index, kind) in &summary.diagrams {
                output.item(&format!("#{index}: {}", kind.label()));
            }
            match summary.mode {
                RenderMode::Immediate => output.info("Diagrams rendered inline"),
                RenderMode::Deferred => {
                    output.info("Pending spans written; run 'mdprop export' to hand them off");
                }
            }
        }

        let kb = summary.output_bytes / 1024;
        let kb_tenths = (summary.output_bytes % 1024) * 10 / 1024;
        output.success(&format!(
            "Converted {} -> {} ({kb}.{kb_tenths} KB)",
            self.document.display(),
            summary.html_path.display(),
        ));
        Ok(())
    }
}
