//! Color Asset Override Store
//!
//! The core component: reads effective variable values (override if
//! present, else the original source), replaces a subset of them by
//! persisting an attachment/directive pair, and resets back to the
//! original by deleting the pair.
//!
//! Overrides are layered on top of the asset pipeline as `replace`
//! directives instead of mutating source files; the sources are shared,
//! read-only and version-controlled, while the override stays local to a
//! deployment and is trivially reversible.

use std::collections::BTreeMap;

use crate::asset::{AssetRef, CUSTOM_URL_PREFIX};
use crate::cache::{AssetCache, ASSETS_REGION};
use crate::scss::{self, Assignment};
use crate::source::AssetSources;
use crate::storage::sqlite::{DEFAULT_SEQUENCE, DIRECTIVE_REPLACE};
use crate::storage::{Attachment, SqliteStore};
use crate::Result;

/// Content type of persisted override attachments.
pub const OVERRIDE_MIMETYPE: &str = "text/scss";

/// Store for deployment-local color overrides of bundle assets.
pub struct OverrideStore {
    sources: AssetSources,
    store: SqliteStore,
    cache: Box<dyn AssetCache>,
}

impl OverrideStore {
    pub fn new(sources: AssetSources, store: SqliteStore, cache: Box<dyn AssetCache>) -> Self {
        Self {
            sources,
            store,
            cache,
        }
    }

    pub fn storage(&self) -> &SqliteStore {
        &self.store
    }

    /// Whether an override is currently persisted for this asset.
    pub fn is_customized(&self, asset: &AssetRef) -> Result<bool> {
        Ok(self
            .store
            .get_attachment_by_url(&asset.custom_url())?
            .is_some())
    }

    /// Read current effective variable values.
    ///
    /// A name the text does not contain maps to `None`; only a missing
    /// source file is an error.
    pub fn values(
        &self,
        asset: &AssetRef,
        names: &[&str],
    ) -> Result<BTreeMap<String, Option<String>>> {
        let content = self.effective_content(asset)?;
        Ok(scss::variable_values(&content, names))
    }

    /// Replace variable values, persisting the result as the override.
    ///
    /// Creates the attachment/directive pair on first call, overwrites
    /// the attachment afterwards. Names absent from the text are skipped.
    pub fn replace(&mut self, asset: &AssetRef, assignments: &[Assignment]) -> Result<()> {
        let content = self.effective_content(asset)?;
        let patched = scss::replace_variables(&content, assignments);
        self.save(asset, &patched)
    }

    /// Delete the override so the original source applies again.
    /// Idempotent; missing records are not an error.
    pub fn reset(&mut self, asset: &AssetRef) -> Result<()> {
        let custom_url = asset.custom_url();
        tracing::debug!("Resetting override at {}", custom_url);
        self.store.delete_override_pair(&custom_url)
    }

    /// Effective text for the asset: the override attachment when one
    /// exists, the original on-disk source otherwise.
    fn effective_content(&self, asset: &AssetRef) -> Result<String> {
        if let Some(attachment) = self.store.get_attachment_by_url(&asset.custom_url())? {
            return attachment.decoded_text();
        }
        self.sources.read(&asset.path)
    }

    fn save(&mut self, asset: &AssetRef, content: &str) -> Result<()> {
        let custom_url = asset.custom_url();
        let datas = Attachment::encode_text(content);

        if self
            .store
            .get_attachment_by_url(&custom_url)?
            .is_some()
        {
            tracing::debug!("Updating override at {}", custom_url);
            self.store.update_attachment_datas(&custom_url, &datas)?;
            // Compiled bundles must not serve the old content after we
            // return.
            self.cache.invalidate(ASSETS_REGION);
            return Ok(());
        }

        tracing::debug!("Creating override pair at {}", custom_url);
        let (name, bundle, sequence) = self.directive_metadata(asset)?;
        self.store.create_override_pair(
            (asset.file_name(), OVERRIDE_MIMETYPE, &custom_url, &datas),
            (&name, &bundle, &custom_url, &asset.path, sequence),
        )
    }

    /// Descriptive metadata for a new replace directive. An existing
    /// directive already registering the source path lends its name,
    /// bundle and ordering; otherwise defaults are synthesized from the
    /// asset key.
    fn directive_metadata(&self, asset: &AssetRef) -> Result<(String, String, i64)> {
        let existing = self
            .store
            .find_directives_by_path_pattern(&format!("%{}", asset.relative_path()))?
            .into_iter()
            .find(|d| !d.path.starts_with(CUSTOM_URL_PREFIX) && d.directive != DIRECTIVE_REPLACE);

        Ok(match existing {
            Some(d) => (format!("{} override", d.name), d.bundle, d.sequence),
            None => (
                format!("{}: replace {}", asset.bundle, asset.file_name()),
                asset.bundle.clone(),
                DEFAULT_SEQUENCE,
            ),
        })
    }
}
