//! CLI command implementations.

pub(crate) mod apply;
pub(crate) mod check;
pub(crate) mod convert;
pub(crate) mod export;
pub(crate) mod new;
pub(crate) mod themes;
pub(crate) mod validate;

pub(crate) use apply::ApplyArgs;
pub(crate) use check::CheckArgs;
pub(crate) use convert::ConvertArgs;
pub(crate) use export::ExportArgs;
pub(crate) use new::NewArgs;
pub(crate) use themes::ThemesArgs;
pub(crate) use validate::ValidateArgs;
