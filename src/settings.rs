//! Theme settings facade
//!
//! Thin layer the settings page talks to: one value slot per color role
//! and mode, validated up front and written through the override store
//! only when something actually changed. Roles are enumerated explicitly,
//! there is no reflective field access.

use std::collections::BTreeMap;

use crate::color::{validate_color, ColorRole, ThemeMode};
use crate::overrides::OverrideStore;
use crate::scss::Assignment;
use crate::Result;

/// Current effective values per role for one theme mode.
pub type ThemeValues = BTreeMap<ColorRole, Option<String>>;

/// Settings facade over the twelve light/dark color slots.
pub struct ThemeSettings {
    store: OverrideStore,
}

impl ThemeSettings {
    pub fn new(store: OverrideStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &OverrideStore {
        &self.store
    }

    /// Current effective values for a mode, override-aware.
    pub fn values(&self, mode: ThemeMode) -> Result<ThemeValues> {
        let asset = mode.asset();
        let raw = self.store.values(&asset, &ColorRole::variable_names())?;
        Ok(ColorRole::all()
            .iter()
            .map(|role| (*role, raw.get(role.as_str()).cloned().flatten()))
            .collect())
    }

    /// Apply new values for a mode.
    ///
    /// Every value is validated before anything is written; an invalid
    /// color rejects the whole call. Returns `true` when an override was
    /// written, `false` when the values already matched.
    pub fn apply(&mut self, mode: ThemeMode, updates: &[(ColorRole, String)]) -> Result<bool> {
        for (_, value) in updates {
            validate_color(value)?;
        }

        let current = self.values(mode)?;
        let changed = updates
            .iter()
            .any(|(role, value)| current.get(role) != Some(&Some(value.clone())));
        if !changed {
            tracing::debug!("No {} color changes, skipping write", mode);
            return Ok(false);
        }

        let assignments: Vec<Assignment> = updates
            .iter()
            .map(|(role, value)| Assignment::new(role.as_str(), value.clone()))
            .collect();
        self.store.replace(&mode.asset(), &assignments)?;
        tracing::info!("Applied {} {} color override(s)", updates.len(), mode);
        Ok(true)
    }

    /// Drop the override for a mode, restoring the shipped colors.
    pub fn reset(&mut self, mode: ThemeMode) -> Result<()> {
        self.store.reset(&mode.asset())
    }

    /// Whether a mode currently has an override persisted.
    pub fn is_customized(&self, mode: ThemeMode) -> Result<bool> {
        self.store.is_customized(&mode.asset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::NoopCache;
    use crate::source::AssetSources;
    use crate::storage::SqliteStore;
    use crate::Error;
    use std::fs;

    const LIGHT_SCSS: &str = "\
$mk_color_brand: #111111;
$mk_color_primary: #714B67;
$mk_color_success: #28a745;
$mk_color_info: #17a2b8;
$mk_color_warning: #ffc107;
$mk_color_danger: #dc3545;
";

    const DARK_SCSS: &str = "\
$mk_color_brand: #000000;
$mk_color_primary: #9B6B8F;
$mk_color_success: #1e7e34;
$mk_color_info: #117a8b;
$mk_color_warning: #d39e00;
$mk_color_danger: #bd2130;
";

    fn fixture() -> (tempfile::TempDir, ThemeSettings) {
        let dir = tempfile::tempdir().unwrap();
        let scss = dir.path().join("themepatch/static/scss");
        fs::create_dir_all(&scss).unwrap();
        fs::write(scss.join("colors_light.scss"), LIGHT_SCSS).unwrap();
        fs::write(scss.join("colors_dark.scss"), DARK_SCSS).unwrap();

        let settings = ThemeSettings::new(OverrideStore::new(
            AssetSources::new(dir.path()),
            SqliteStore::open_in_memory().unwrap(),
            Box::new(NoopCache),
        ));
        (dir, settings)
    }

    #[test]
    fn test_values_cover_all_roles() {
        let (_dir, settings) = fixture();
        let values = settings.values(ThemeMode::Light).unwrap();
        assert_eq!(values.len(), ColorRole::all().len());
        assert_eq!(values[&ColorRole::Brand], Some("#111111".to_string()));
        assert_eq!(values[&ColorRole::Danger], Some("#dc3545".to_string()));
    }

    #[test]
    fn test_apply_writes_and_reads_back() {
        let (_dir, mut settings) = fixture();
        let wrote = settings
            .apply(ThemeMode::Light, &[(ColorRole::Brand, "#ABCDEF".to_string())])
            .unwrap();
        assert!(wrote);

        let values = settings.values(ThemeMode::Light).unwrap();
        assert_eq!(values[&ColorRole::Brand], Some("#ABCDEF".to_string()));
        // Other roles untouched
        assert_eq!(values[&ColorRole::Primary], Some("#714B67".to_string()));
    }

    #[test]
    fn test_apply_unchanged_values_skips_write() {
        let (_dir, mut settings) = fixture();
        let wrote = settings
            .apply(ThemeMode::Light, &[(ColorRole::Brand, "#111111".to_string())])
            .unwrap();
        assert!(!wrote);
        assert!(!settings.is_customized(ThemeMode::Light).unwrap());
    }

    #[test]
    fn test_apply_rejects_invalid_color_before_writing() {
        let (_dir, mut settings) = fixture();
        let err = settings
            .apply(
                ThemeMode::Light,
                &[
                    (ColorRole::Brand, "#ABCDEF".to_string()),
                    (ColorRole::Danger, "not-a-color".to_string()),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidColor(v) if v == "not-a-color"));
        // Nothing was persisted
        assert!(!settings.is_customized(ThemeMode::Light).unwrap());
    }

    #[test]
    fn test_modes_are_independent() {
        let (_dir, mut settings) = fixture();
        settings
            .apply(ThemeMode::Dark, &[(ColorRole::Brand, "#222222".to_string())])
            .unwrap();

        assert!(settings.is_customized(ThemeMode::Dark).unwrap());
        assert!(!settings.is_customized(ThemeMode::Light).unwrap());
        let light = settings.values(ThemeMode::Light).unwrap();
        assert_eq!(light[&ColorRole::Brand], Some("#111111".to_string()));
    }

    #[test]
    fn test_reset_restores_shipped_colors() {
        let (_dir, mut settings) = fixture();
        settings
            .apply(ThemeMode::Light, &[(ColorRole::Brand, "#ABCDEF".to_string())])
            .unwrap();
        settings.reset(ThemeMode::Light).unwrap();

        let values = settings.values(ThemeMode::Light).unwrap();
        assert_eq!(values[&ColorRole::Brand], Some("#111111".to_string()));
        assert!(!settings.is_customized(ThemeMode::Light).unwrap());
    }
}
