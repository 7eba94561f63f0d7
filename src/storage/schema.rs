//! Database schema definitions

/// SQL to create the attachments table
/// One row per override blob; `url` is the derived custom URL and `datas`
/// holds the base64-encoded replacement text.
pub const CREATE_ATTACHMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS attachments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    mimetype TEXT NOT NULL,
    url TEXT NOT NULL UNIQUE,
    datas TEXT NOT NULL
)
"#;

/// SQL to create the directives table
/// Asset-pipeline rewrite rules; an override row declares "replace
/// `target` with the attachment at `path` inside `bundle`".
pub const CREATE_DIRECTIVES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS directives (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    bundle TEXT NOT NULL,
    path TEXT NOT NULL,
    target TEXT,
    directive TEXT NOT NULL DEFAULT 'append',
    sequence INTEGER NOT NULL DEFAULT 16
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_attachments_url ON attachments(url)",
    "CREATE INDEX IF NOT EXISTS idx_directives_path ON directives(path)",
    "CREATE INDEX IF NOT EXISTS idx_directives_bundle ON directives(bundle)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_ATTACHMENTS_TABLE, CREATE_DIRECTIVES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
