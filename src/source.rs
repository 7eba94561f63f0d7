//! Read-only lookup of original asset sources on disk
//!
//! Overrides never mutate these files; they are the shared,
//! version-controlled fallback content. Lookups are restricted to a fixed
//! allow-list of static-asset extensions and cannot escape the root.

use crate::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// File extensions a source lookup may resolve.
pub const ALLOWED_EXTENSIONS: &[&str] = &["scss", "sass", "less", "css", "js", "xml"];

/// Read-only file-resource store rooted at a static assets directory.
#[derive(Debug, Clone)]
pub struct AssetSources {
    root: PathBuf,
}

impl AssetSources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read a source by its URL-like path and decode as UTF-8 text.
    ///
    /// The leading `/` is stripped before resolving against the root. A
    /// missing file is fatal to the caller, unlike a missing variable.
    pub fn read(&self, path: &str) -> Result<String> {
        let relative = path.trim_start_matches('/');
        self.check_extension(relative)?;
        self.check_contained(relative)?;

        let full = self.root.join(relative);
        let bytes = std::fs::read(&full).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::SourceNotFound(path.to_string())
            } else {
                Error::Io(e)
            }
        })?;
        String::from_utf8(bytes).map_err(|_| Error::InvalidContent(path.to_string()))
    }

    fn check_extension(&self, relative: &str) -> Result<()> {
        let ext = Path::new(relative)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        if ALLOWED_EXTENSIONS.contains(&ext) {
            Ok(())
        } else {
            Err(Error::UnsupportedExtension(relative.to_string()))
        }
    }

    fn check_contained(&self, relative: &str) -> Result<()> {
        let escapes = Path::new(relative)
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
        if escapes {
            Err(Error::SourceNotFound(relative.to_string()))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> (tempfile::TempDir, AssetSources) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("theme/scss")).unwrap();
        fs::write(
            dir.path().join("theme/scss/colors.scss"),
            "$mk_color_brand: #111111;\n",
        )
        .unwrap();
        let sources = AssetSources::new(dir.path());
        (dir, sources)
    }

    #[test]
    fn test_read_strips_leading_slash() {
        let (_dir, sources) = fixture();
        let content = sources.read("/theme/scss/colors.scss").unwrap();
        assert!(content.contains("$mk_color_brand"));
    }

    #[test]
    fn test_missing_file_is_source_not_found() {
        let (_dir, sources) = fixture();
        let err = sources.read("/theme/scss/absent.scss").unwrap_err();
        assert!(matches!(err, Error::SourceNotFound(_)));
    }

    #[test]
    fn test_disallowed_extension_rejected() {
        let (_dir, sources) = fixture();
        let err = sources.read("/theme/secrets.pem").unwrap_err();
        assert!(matches!(err, Error::UnsupportedExtension(_)));
    }

    #[test]
    fn test_traversal_rejected() {
        let (_dir, sources) = fixture();
        let err = sources.read("/../outside/colors.scss").unwrap_err();
        assert!(matches!(err, Error::SourceNotFound(_)));
    }
}
