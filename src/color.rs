//! Semantic color roles, theme modes and value validation
//!
//! Six semantic roles, each themeable in a light and a dark variant. The
//! role names double as the raw SCSS variable names, so the settings
//! layer can enumerate them instead of reflecting over field names.

use crate::{AssetRef, Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Semantic color roles exposed for theming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Brand,
    Primary,
    Success,
    Info,
    Warning,
    Danger,
}

impl ColorRole {
    /// Raw variable name as it appears in the SCSS sources
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorRole::Brand => "color_brand",
            ColorRole::Primary => "color_primary",
            ColorRole::Success => "color_success",
            ColorRole::Info => "color_info",
            ColorRole::Warning => "color_warning",
            ColorRole::Danger => "color_danger",
        }
    }

    /// Get all color roles
    pub fn all() -> &'static [ColorRole] {
        &[
            ColorRole::Brand,
            ColorRole::Primary,
            ColorRole::Success,
            ColorRole::Info,
            ColorRole::Warning,
            ColorRole::Danger,
        ]
    }

    /// All raw variable names, in role order
    pub fn variable_names() -> Vec<&'static str> {
        Self::all().iter().map(|role| role.as_str()).collect()
    }
}

impl FromStr for ColorRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "brand" | "color_brand" => Ok(ColorRole::Brand),
            "primary" | "color_primary" => Ok(ColorRole::Primary),
            "success" | "color_success" => Ok(ColorRole::Success),
            "info" | "color_info" => Ok(ColorRole::Info),
            "warning" | "color_warning" => Ok(ColorRole::Warning),
            "danger" | "color_danger" => Ok(ColorRole::Danger),
            _ => Err(Error::UnknownRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for ColorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Theme variant, each backed by its own SCSS source and bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// The built-in asset holding this mode's color variables
    pub fn asset(&self) -> AssetRef {
        match self {
            ThemeMode::Light => AssetRef::new(
                "/themepatch/static/scss/colors_light.scss",
                "web._assets_primary_variables",
            ),
            ThemeMode::Dark => AssetRef::new(
                "/themepatch/static/scss/colors_dark.scss",
                "web.assets_web_dark",
            ),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CSS named colors accepted besides hex and rgb notations.
const NAMED_COLORS: &[&str] = &[
    "red", "green", "blue", "yellow", "orange", "purple", "pink", "black", "white", "gray",
    "grey", "brown", "cyan", "magenta", "transparent", "inherit", "initial", "unset",
];

/// Validate a color value before it reaches the override store.
///
/// Accepts `#RGB`/`#RRGGBB` hex, `rgb()`/`rgba()` and a fixed set of CSS
/// color names. Empty values pass: an unset slot is not an error.
pub fn validate_color(value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }

    let hex = regex::Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$")
        .expect("hex color pattern is valid");
    if hex.is_match(value) {
        return Ok(());
    }

    let rgb = regex::Regex::new(r"^rgba?\(\s*\d+\s*,\s*\d+\s*,\s*\d+(\s*,\s*[01]?\.?\d*)?\s*\)$")
        .expect("rgb color pattern is valid");
    if rgb.is_match(value) {
        return Ok(());
    }

    if NAMED_COLORS.contains(&value.to_lowercase().as_str()) {
        return Ok(());
    }

    Err(Error::InvalidColor(value.to_string()))
}
