//! CLI error types.

use mdprop_diagrams::{ExportError, SubstituteError};
use mdprop_renderer::ConvertError;
use mdprop_theme::ThemeError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Theme(#[from] ThemeError),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("{0}")]
    Substitute(#[from] SubstituteError),

    #[error("{0}")]
    Validation(String),
}
