//! Theme loading and merging for mdprop.
//!
//! Themes are YAML files. A complete set of defaults lives in `base.yaml`;
//! a named theme overlays it via a recursive map merge, so theme files only
//! list what they change (typically a handful of colors). Gradient strings
//! may reference `{{primary}}`, `{{secondary}}`, and `{{border_color}}`,
//! which are substituted after the merge.
//!
//! Four themes are embedded in the binary (`purple`, `blue`, `green`,
//! `minimal`); additional themes can be loaded from a directory of
//! `<name>.yaml` files, which shadow built-ins of the same name.
//!
//! # Example
//!
//! ```
//! use mdprop_theme::Theme;
//!
//! let theme = Theme::load("blue", None).unwrap();
//! assert_eq!(theme.colors.primary, "#1890ff");
//! ```

mod merge;

use std::path::Path;

use serde::Deserialize;

use crate::merge::deep_merge;

/// Shared defaults every theme overlays.
const BASE_YAML: &str = include_str!("../themes/base.yaml");

/// Built-in themes embedded in the binary, in listing order.
const BUILTIN_THEMES: [(&str, &str); 4] = [
    ("purple", include_str!("../themes/purple.yaml")),
    ("blue", include_str!("../themes/blue.yaml")),
    ("green", include_str!("../themes/green.yaml")),
    ("minimal", include_str!("../themes/minimal.yaml")),
];

/// Default theme name used when none is given on the command line.
pub const DEFAULT_THEME: &str = "purple";

/// Theme loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("unknown theme '{name}' (available: {})", available.join(", "))]
    NotFound { name: String, available: Vec<String> },

    #[error("failed to read theme file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid theme YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Color values used by the page template and SVG rendering.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub link: String,
    pub code_bg: String,
    pub code_text: String,
    pub border_color: String,
    pub header_text: String,
    pub code_inline_bg: String,
    pub code_inline_color: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            primary: "#667eea".to_owned(),
            secondary: "#764ba2".to_owned(),
            background: "#ffffff".to_owned(),
            text: "#333333".to_owned(),
            link: "#1890ff".to_owned(),
            code_bg: "#2d2d2d".to_owned(),
            code_text: "#f8f8f2".to_owned(),
            border_color: "#667eea".to_owned(),
            header_text: "#ffffff".to_owned(),
            code_inline_bg: "#e6f7ff".to_owned(),
            code_inline_color: "#096dd9".to_owned(),
        }
    }
}

/// Box-level style values (lengths keep whatever unit the theme wrote;
/// bare numbers get `px` via [`add_unit`]).
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Styles {
    pub border_radius: String,
    pub box_shadow: String,
    pub header_padding: String,
    pub content_padding: String,
    pub header_h1_weight: String,
    pub header_meta_opacity: String,
    pub header_text_shadow: String,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            border_radius: "16".to_owned(),
            box_shadow: "0 20px 60px rgba(0, 0, 0, 0.3)".to_owned(),
            header_padding: "60px 40px".to_owned(),
            content_padding: "50px 60px".to_owned(),
            header_h1_weight: "700".to_owned(),
            header_meta_opacity: "0.95".to_owned(),
            header_text_shadow: "none".to_owned(),
        }
    }
}

/// Font sizes per element class.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub header_h1: String,
    pub header_meta: String,
    pub h2: String,
    pub h3: String,
    pub h4: String,
    pub body: String,
    pub code: String,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            header_h1: "2.5em".to_owned(),
            header_meta: "1.1em".to_owned(),
            h2: "2em".to_owned(),
            h3: "1.5em".to_owned(),
            h4: "1.2em".to_owned(),
            body: "15px".to_owned(),
            code: "0.9em".to_owned(),
        }
    }
}

/// Margins for block elements.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Spacing {
    pub h2_margin: String,
    pub h3_margin: String,
    pub h4_margin: String,
    pub p_margin: String,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            h2_margin: "50px 0 25px 0".to_owned(),
            h3_margin: "35px 0 20px 0".to_owned(),
            h4_margin: "25px 0 15px 0".to_owned(),
            p_margin: "15px 0".to_owned(),
        }
    }
}

/// Gradient/background CSS values. May contain `{{variable}}` references
/// until [`Theme::load`] resolves them.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Gradients {
    pub background: String,
    pub header: String,
    pub table_header: String,
    pub blockquote: String,
    pub table_hover: String,
}

impl Default for Gradients {
    fn default() -> Self {
        let diagonal = "linear-gradient(135deg, {{primary}} 0%, {{secondary}} 100%)".to_owned();
        Self {
            background: diagonal.clone(),
            header: diagonal.clone(),
            table_header: diagonal,
            blockquote: "linear-gradient(135deg, rgba(102, 126, 234, 0.1) 0%, rgba(118, 75, 162, 0.1) 100%)"
                .to_owned(),
            table_hover: "rgba(102, 126, 234, 0.05)".to_owned(),
        }
    }
}

/// A fully resolved theme: base defaults, overlay applied, variables
/// substituted.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Display name (e.g. "Purple"), distinct from the file-stem key.
    pub name: String,
    pub description: String,
    pub colors: Colors,
    pub styles: Styles,
    pub font_sizes: FontSizes,
    pub spacing: Spacing,
    pub gradients: Gradients,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Unknown".to_owned(),
            description: String::new(),
            colors: Colors::default(),
            styles: Styles::default(),
            font_sizes: FontSizes::default(),
            spacing: Spacing::default(),
            gradients: Gradients::default(),
        }
    }
}

/// Summary entry returned by [`list_themes`].
#[derive(Clone, Debug)]
pub struct ThemeInfo {
    /// Key used on the command line (file stem for directory themes).
    pub key: String,
    /// Display name from the theme file.
    pub display_name: String,
    pub description: String,
}

impl Theme {
    /// Load a theme by name.
    ///
    /// Looks in `theme_dir` first (if given), then the built-ins. The theme
    /// overlays `base.yaml` and gradient variables are substituted before
    /// returning.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::NotFound`] with the available theme names when
    /// `name` matches nothing, or a parse/IO error for unreadable files.
    pub fn load(name: &str, theme_dir: Option<&Path>) -> Result<Self, ThemeError> {
        if let Some(dir) = theme_dir {
            let candidate = dir.join(format!("{name}.yaml"));
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)?;
                return Self::from_overlay(&content);
            }
        }

        if let Some((_, content)) = BUILTIN_THEMES.iter().find(|(key, _)| *key == name) {
            return Self::from_overlay(content);
        }

        Err(ThemeError::NotFound {
            name: name.to_owned(),
            available: available_names(theme_dir),
        })
    }

    /// Parse a theme overlay, merge it onto the base, and resolve variables.
    fn from_overlay(overlay_yaml: &str) -> Result<Self, ThemeError> {
        let base: serde_yaml::Value = serde_yaml::from_str(BASE_YAML)?;
        let overlay: serde_yaml::Value = serde_yaml::from_str(overlay_yaml)?;
        let merged = deep_merge(base, overlay);

        let mut theme: Self = serde_yaml::from_value(merged)?;
        theme.resolve_variables();
        Ok(theme)
    }

    /// Substitute `{{primary}}`-style references in gradient strings.
    fn resolve_variables(&mut self) {
        let replacements = [
            ("{{primary}}", self.colors.primary.clone()),
            ("{{secondary}}", self.colors.secondary.clone()),
            ("{{border_color}}", self.colors.border_color.clone()),
        ];

        for value in [
            &mut self.gradients.background,
            &mut self.gradients.header,
            &mut self.gradients.table_header,
            &mut self.gradients.blockquote,
            &mut self.gradients.table_hover,
        ] {
            for (var, color) in &replacements {
                if value.contains(var) {
                    *value = value.replace(var, color);
                }
            }
        }
    }
}

/// List every available theme: directory themes first (shadowing built-ins
/// of the same key), then remaining built-ins in their fixed order.
///
/// # Errors
///
/// Returns an error when a directory theme file exists but cannot be read
/// or parsed.
pub fn list_themes(theme_dir: Option<&Path>) -> Result<Vec<ThemeInfo>, ThemeError> {
    let mut seen: Vec<String> = Vec::new();
    let mut themes = Vec::new();

    if let Some(dir) = theme_dir
        && dir.is_dir()
    {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "yaml"))
            .collect();
        paths.sort();

        for path in paths {
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let theme = Theme::from_overlay(&std::fs::read_to_string(&path)?)?;
            seen.push(key.to_owned());
            themes.push(ThemeInfo {
                key: key.to_owned(),
                display_name: theme.name,
                description: theme.description,
            });
        }
    }

    for (key, content) in BUILTIN_THEMES {
        if seen.iter().any(|s| s == key) {
            continue;
        }
        let theme = Theme::from_overlay(content)?;
        themes.push(ThemeInfo {
            key: key.to_owned(),
            display_name: theme.name,
            description: theme.description,
        });
    }

    Ok(themes)
}

/// Theme keys for error messages.
fn available_names(theme_dir: Option<&Path>) -> Vec<String> {
    list_themes(theme_dir)
        .map(|themes| themes.into_iter().map(|t| t.key).collect())
        .unwrap_or_else(|_| {
            BUILTIN_THEMES
                .iter()
                .map(|(key, _)| (*key).to_owned())
                .collect()
        })
}

/// Append `px` to a bare numeric CSS length; values that already carry a
/// unit are returned unchanged.
///
/// # Example
///
/// ```
/// use mdprop_theme::add_unit;
///
/// assert_eq!(add_unit("16"), "16px");
/// assert_eq!(add_unit("1.5em"), "1.5em");
/// ```
#[must_use]
pub fn add_unit(value: &str) -> String {
    const UNITS: [&str; 6] = ["px", "em", "%", "rem", "vh", "vw"];
    if UNITS.iter().any(|unit| value.ends_with(unit)) {
        value.to_owned()
    } else {
        format!("{value}px")
    }
}
