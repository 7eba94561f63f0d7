//! Asset reference - identity of one SCSS source inside one bundle
//!
//! An `AssetRef` is the lookup key for every override operation. It is not
//! persisted itself; its derived custom URL keys both the attachment and
//! the directive record.
//!
//! Examples:
//! - path `/themepatch/static/scss/colors_light.scss`,
//!   bundle `web._assets_primary_variables`
//! - derived custom URL
//!   `/_custom/web._assets_primary_variables/themepatch/static/scss/colors_light.scss`

use std::fmt;

/// Prefix of every derived override URL.
pub const CUSTOM_URL_PREFIX: &str = "/_custom/";

/// Reference to a theme asset: a URL-like source path plus the bundle it
/// is served in. Two assets with the same path in different bundles get
/// distinct override keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRef {
    /// URL-like path of the source file, with a leading `/`
    pub path: String,
    /// Name of the bundle the asset belongs to
    pub bundle: String,
}

impl AssetRef {
    /// Create a new AssetRef. A missing leading `/` on the path is added.
    pub fn new(path: impl Into<String>, bundle: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        Self {
            path,
            bundle: bundle.into(),
        }
    }

    /// Derived key for the override pair: `/_custom/<bundle><path>`.
    ///
    /// Deterministic, so repeated replace calls land on the same records.
    pub fn custom_url(&self) -> String {
        format!("{}{}{}", CUSTOM_URL_PREFIX, self.bundle, self.path)
    }

    /// Final path segment, used as the attachment name.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Path without the leading `/`, as resolved against the sources root.
    pub fn relative_path(&self) -> &str {
        self.path.trim_start_matches('/')
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.bundle)
    }
}
