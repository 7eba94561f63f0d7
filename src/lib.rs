//! # Themepatch - Theme Color Override Store
//!
//! Deployment-local customization of SCSS color variables inside web asset
//! bundles, without touching the version-controlled source files.
//!
//! Themepatch provides:
//! - Regex-based read/replace of `$mk_*` color variables in SCSS sources
//! - Overrides persisted in SQLite as an attachment (replacement blob)
//!   paired with a `replace` directive for the asset pipeline
//! - Transparent fallback to the original on-disk source when no override
//!   exists, and an idempotent reset back to it
//! - A settings facade over the twelve light/dark semantic color slots

pub mod asset;
pub mod scss;
pub mod source;
pub mod storage;
pub mod cache;
pub mod overrides;
pub mod color;
pub mod settings;
pub mod config;

// Re-exports for convenient access
pub use asset::AssetRef;
pub use color::{ColorRole, ThemeMode};
pub use overrides::OverrideStore;
pub use settings::ThemeSettings;
pub use storage::SqliteStore;

/// Result type alias for Themepatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Themepatch operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Asset source not found: {0}")]
    SourceNotFound(String),

    #[error("Unsupported asset extension: {0}")]
    UnsupportedExtension(String),

    #[error("Asset content is not valid UTF-8: {0}")]
    InvalidContent(String),

    #[error("Invalid color value: {0}")]
    InvalidColor(String),

    #[error("Unknown color role: {0}")]
    UnknownRole(String),

    #[error("Unknown theme mode: {0}")]
    UnknownMode(String),
}
