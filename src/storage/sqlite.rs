//! SQLite storage implementation

use std::path::Path;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use rusqlite::{params, Connection, OptionalExtension};

use super::schema;
use crate::{Error, Result};

/// Directive kind used by override pairs.
pub const DIRECTIVE_REPLACE: &str = "replace";

/// Default ordering sequence for synthesized directives.
pub const DEFAULT_SEQUENCE: i64 = 16;

/// A persisted binary blob, addressed by its (unique) URL.
///
/// For overrides the URL is the derived custom URL and `datas` holds the
/// base64-encoded replacement text for the asset.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub id: i64,
    pub name: String,
    pub mimetype: String,
    pub url: String,
    pub datas: String,
}

impl Attachment {
    /// Encode replacement text into the stored form. Empty content is
    /// persisted as a single newline so the attachment is never empty.
    pub fn encode_text(text: &str) -> String {
        let text = if text.is_empty() { "\n" } else { text };
        B64.encode(text.as_bytes())
    }

    /// Decode the stored payload back into text.
    pub fn decoded_text(&self) -> Result<String> {
        let bytes = B64
            .decode(&self.datas)
            .map_err(|_| Error::InvalidContent(self.url.clone()))?;
        String::from_utf8(bytes).map_err(|_| Error::InvalidContent(self.url.clone()))
    }
}

/// An asset-pipeline rewrite rule.
///
/// Override rows use kind [`DIRECTIVE_REPLACE`]: serve the attachment at
/// `path` instead of `target` when building `bundle`.
#[derive(Debug, Clone)]
pub struct Directive {
    pub id: i64,
    pub name: String,
    pub bundle: String,
    pub path: String,
    pub target: Option<String>,
    pub directive: String,
    pub sequence: i64,
}

/// SQLite-backed storage for attachments and directives
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Attachment Operations ==========

    /// Get the attachment stored at a URL
    pub fn get_attachment_by_url(&self, url: &str) -> Result<Option<Attachment>> {
        self.conn
            .query_row(
                "SELECT id, name, mimetype, url, datas FROM attachments WHERE url = ?1",
                [url],
                |row| Self::row_to_attachment(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Insert a new attachment
    pub fn create_attachment(
        &self,
        name: &str,
        mimetype: &str,
        url: &str,
        datas: &str,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO attachments (name, mimetype, url, datas) VALUES (?1, ?2, ?3, ?4)",
            params![name, mimetype, url, datas],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Overwrite the payload of an existing attachment
    pub fn update_attachment_datas(&self, url: &str, datas: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE attachments SET datas = ?1 WHERE url = ?2",
            params![datas, url],
        )?;
        Ok(())
    }

    /// Delete the attachment at a URL; absence is not an error
    pub fn delete_attachment_by_url(&self, url: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM attachments WHERE url = ?1", [url])?;
        Ok(deleted > 0)
    }

    /// Count all attachments
    pub fn count_attachments(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM attachments", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to an Attachment
    fn row_to_attachment(row: &rusqlite::Row) -> rusqlite::Result<Attachment> {
        Ok(Attachment {
            id: row.get(0)?,
            name: row.get(1)?,
            mimetype: row.get(2)?,
            url: row.get(3)?,
            datas: row.get(4)?,
        })
    }

    // ========== Directive Operations ==========

    /// Get the directive registered at an exact path
    pub fn get_directive_by_path(&self, path: &str) -> Result<Option<Directive>> {
        self.conn
            .query_row(
                "SELECT id, name, bundle, path, target, directive, sequence FROM directives WHERE path = ?1",
                [path],
                |row| Self::row_to_directive(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Find directives whose path matches a LIKE pattern
    pub fn find_directives_by_path_pattern(&self, pattern: &str) -> Result<Vec<Directive>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, bundle, path, target, directive, sequence FROM directives WHERE path LIKE ?1",
        )?;

        let directives = stmt
            .query_map([pattern], |row| Self::row_to_directive(row))?
            .filter_map(|r| r.ok())
            .collect();

        Ok(directives)
    }

    /// Insert a new directive
    pub fn create_directive(
        &self,
        name: &str,
        bundle: &str,
        path: &str,
        target: Option<&str>,
        directive: &str,
        sequence: i64,
    ) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO directives (name, bundle, path, target, directive, sequence)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![name, bundle, path, target, directive, sequence],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Delete all directives registered at a path; absence is not an error
    pub fn delete_directives_by_path(&self, path: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM directives WHERE path = ?1", [path])?;
        Ok(deleted > 0)
    }

    /// Count all directives
    pub fn count_directives(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM directives", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to a Directive
    fn row_to_directive(row: &rusqlite::Row) -> rusqlite::Result<Directive> {
        Ok(Directive {
            id: row.get(0)?,
            name: row.get(1)?,
            bundle: row.get(2)?,
            path: row.get(3)?,
            target: row.get(4)?,
            directive: row.get(5)?,
            sequence: row.get(6)?,
        })
    }

    // ========== Override Pair Operations ==========

    /// Create the attachment and its replace directive atomically.
    ///
    /// An override must never be observable half-created; a failure on
    /// either insert rolls back both.
    pub fn create_override_pair(
        &mut self,
        attachment: (&str, &str, &str, &str),
        directive: (&str, &str, &str, &str, i64),
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let (name, mimetype, url, datas) = attachment;
            tx.execute(
                "INSERT INTO attachments (name, mimetype, url, datas) VALUES (?1, ?2, ?3, ?4)",
                params![name, mimetype, url, datas],
            )?;

            let (name, bundle, path, target, sequence) = directive;
            tx.execute(
                r#"
                INSERT INTO directives (name, bundle, path, target, directive, sequence)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![name, bundle, path, target, DIRECTIVE_REPLACE, sequence],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Delete the attachment and directive at a derived key atomically.
    /// Each side is an independent existence check; a missing record is
    /// not an error.
    pub fn delete_override_pair(&mut self, custom_url: &str) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM attachments WHERE url = ?1", [custom_url])?;
        tx.execute("DELETE FROM directives WHERE path = ?1", [custom_url])?;
        tx.commit()?;
        Ok(())
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            attachments: self.count_attachments()?,
            directives: self.count_directives()?,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DbStats {
    pub attachments: usize,
    pub directives: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Attachments: {}", self.attachments)?;
        writeln!(f, "  Directives: {}", self.directives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_crud() {
        let store = SqliteStore::open_in_memory().unwrap();
        let datas = Attachment::encode_text("$mk_color_brand: #111;\n");

        store
            .create_attachment("colors.scss", "text/scss", "/_custom/web/colors.scss", &datas)
            .unwrap();

        let found = store
            .get_attachment_by_url("/_custom/web/colors.scss")
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "colors.scss");
        assert_eq!(found.decoded_text().unwrap(), "$mk_color_brand: #111;\n");

        let updated = Attachment::encode_text("$mk_color_brand: #222;\n");
        store
            .update_attachment_datas("/_custom/web/colors.scss", &updated)
            .unwrap();
        let found = store
            .get_attachment_by_url("/_custom/web/colors.scss")
            .unwrap()
            .unwrap();
        assert_eq!(found.decoded_text().unwrap(), "$mk_color_brand: #222;\n");

        assert!(store
            .delete_attachment_by_url("/_custom/web/colors.scss")
            .unwrap());
        assert!(store
            .get_attachment_by_url("/_custom/web/colors.scss")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_delete_missing_attachment_is_noop() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(!store.delete_attachment_by_url("/_custom/absent").unwrap());
    }

    #[test]
    fn test_encode_empty_text() {
        let datas = Attachment::encode_text("");
        let attachment = Attachment {
            id: 1,
            name: "x.scss".into(),
            mimetype: "text/scss".into(),
            url: "/_custom/x".into(),
            datas,
        };
        assert_eq!(attachment.decoded_text().unwrap(), "\n");
    }

    #[test]
    fn test_directive_crud() {
        let store = SqliteStore::open_in_memory().unwrap();

        store
            .create_directive(
                "web: replace colors.scss",
                "web.assets_light",
                "/_custom/web.assets_light/theme/colors.scss",
                Some("/theme/colors.scss"),
                DIRECTIVE_REPLACE,
                DEFAULT_SEQUENCE,
            )
            .unwrap();

        let found = store
            .get_directive_by_path("/_custom/web.assets_light/theme/colors.scss")
            .unwrap()
            .unwrap();
        assert_eq!(found.bundle, "web.assets_light");
        assert_eq!(found.directive, DIRECTIVE_REPLACE);
        assert_eq!(found.target.as_deref(), Some("/theme/colors.scss"));

        let matched = store
            .find_directives_by_path_pattern("%theme/colors.scss")
            .unwrap();
        assert_eq!(matched.len(), 1);

        assert!(store
            .delete_directives_by_path("/_custom/web.assets_light/theme/colors.scss")
            .unwrap());
        assert!(!store
            .delete_directives_by_path("/_custom/web.assets_light/theme/colors.scss")
            .unwrap());
    }

    #[test]
    fn test_override_pair_created_and_deleted_together() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let datas = Attachment::encode_text("$mk_color_brand: #333;\n");
        let url = "/_custom/web.assets_light/theme/colors.scss";

        store
            .create_override_pair(
                ("colors.scss", "text/scss", url, &datas),
                (
                    "web.assets_light: replace colors.scss",
                    "web.assets_light",
                    url,
                    "/theme/colors.scss",
                    DEFAULT_SEQUENCE,
                ),
            )
            .unwrap();

        assert!(store.get_attachment_by_url(url).unwrap().is_some());
        assert!(store.get_directive_by_path(url).unwrap().is_some());

        store.delete_override_pair(url).unwrap();
        assert!(store.get_attachment_by_url(url).unwrap().is_none());
        assert!(store.get_directive_by_path(url).unwrap().is_none());

        // Deleting again is a no-op
        store.delete_override_pair(url).unwrap();
    }

    #[test]
    fn test_duplicate_attachment_url_rejected_atomically() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let datas = Attachment::encode_text("x");
        let url = "/_custom/web/colors.scss";

        store
            .create_attachment("colors.scss", "text/scss", url, &datas)
            .unwrap();

        // The pair insert hits the UNIQUE url constraint; no directive
        // may be left behind.
        let result = store.create_override_pair(
            ("colors.scss", "text/scss", url, &datas),
            ("name", "web", url, "/theme/colors.scss", DEFAULT_SEQUENCE),
        );
        assert!(result.is_err());
        assert_eq!(store.count_directives().unwrap(), 0);
    }
}
