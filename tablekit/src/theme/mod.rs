//! Design tokens for table rendering.
//!
//! Tokens are plain strings (CSS values in the default theme). Callers
//! override any subset with a partial JSON object and look tokens up by
//! dotted camelCase path, e.g. `colors.surfaceSelected`.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tablekit::theme::TableTheme;
//!
//! let theme = TableTheme::default()
//!     .merged(&json!({ "colors": { "primary": "#ff0000" } }))
//!     .unwrap();
//! assert_eq!(theme.value("colors.primary"), "#ff0000");
//! assert_eq!(theme.value("spacing.md"), "var(--joy-spacing-3, 12px)");
//! ```

mod default;

use log::warn;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value as Json;

use crate::error::TableError;

/// Prefix marking a style value as a theme reference.
const THEME_REF_PREFIX: &str = "theme.";

/// Complete table theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableTheme {
    pub colors: ThemeColors,
    pub spacing: ThemeSpacing,
    pub typography: ThemeTypography,
    pub shadows: ThemeShadows,
    pub breakpoints: ThemeBreakpoints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub surface: String,
    pub surface_hover: String,
    pub surface_selected: String,
    pub border: String,
    pub text: String,
    pub text_secondary: String,
    pub primary: String,
    pub success: String,
    pub danger: String,
    pub warning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSpacing {
    pub xs: String,
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeTypography {
    pub header: FontStyle,
    pub body: FontStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontStyle {
    pub font_size: String,
    pub font_weight: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeShadows {
    pub sm: String,
    pub md: String,
    pub lg: String,
}

/// Breakpoint tokens, e.g. `"768px"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeBreakpoints {
    pub mobile: String,
    pub tablet: String,
    pub desktop: String,
}

impl TableTheme {
    /// Returns this theme with `overrides` applied.
    ///
    /// Overrides merge one level deep: an object under a top-level key is
    /// merged into that group, anything else replaces the group outright.
    pub fn merged(&self, overrides: &Json) -> Result<Self, TableError> {
        let Json::Object(overrides) = overrides else {
            return Err(TableError::InvalidTheme(format!(
                "expected an object, got {overrides}"
            )));
        };

        let mut base = serde_json::to_value(self)?;
        let Some(groups) = base.as_object_mut() else {
            return Err(TableError::InvalidTheme("theme is not an object".into()));
        };

        for (key, value) in overrides {
            match (groups.get_mut(key), value) {
                (Some(Json::Object(group)), Json::Object(patch)) => {
                    group.extend(patch.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                _ => {
                    groups.insert(key.clone(), value.clone());
                }
            }
        }

        serde_json::from_value(base).map_err(|e| TableError::InvalidTheme(e.to_string()))
    }

    /// Looks up a token by dotted path.
    ///
    /// Returns an empty string, with a warning, when the path does not
    /// resolve.
    pub fn value(&self, path: &str) -> String {
        let resolved = serde_json::to_value(self).ok().and_then(|root| {
            path.split('.')
                .try_fold(root, |node, key| node.get(key).cloned())
        });

        match resolved {
            Some(Json::String(s)) => s,
            Some(Json::Null) | None => {
                warn!("Theme path \"{path}\" not found");
                String::new()
            }
            Some(other) => other.to_string(),
        }
    }

    /// Replaces every `"theme.<path>"` string in `styles`, recursively, with
    /// the token it names. Other values are copied unchanged.
    pub fn resolve_styles(&self, styles: &Json) -> Json {
        match styles {
            Json::Object(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), self.resolve_styles(v)))
                    .collect::<Map<String, Json>>(),
            ),
            Json::Array(items) => Json::Array(items.iter().map(|v| self.resolve_styles(v)).collect()),
            Json::String(s) => match s.strip_prefix(THEME_REF_PREFIX) {
                Some(path) => Json::String(self.value(path)),
                None => styles.clone(),
            },
            other => other.clone(),
        }
    }

    /// Background token for a row.
    pub fn row_background(&self, selected: bool) -> &str {
        if selected {
            &self.colors.surface_selected
        } else {
            &self.colors.surface
        }
    }
}
