//! `mdprop themes` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdprop_theme::list_themes;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the themes command.
#[derive(Args)]
pub(crate) struct ThemesArgs {
    /// Directory with additional theme YAML files.
    #[arg(long)]
    theme_dir: Option<PathBuf>,
}

impl ThemesArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let themes = list_themes(self.theme_dir.as_deref())?;
        output.highlight("Available themes:");
        for theme in themes {
            output.info(&format!(
                "  {:<10} {}: {}",
                theme.key, theme.display_name, theme.description
            ));
        }
        Ok(())
    }
}
