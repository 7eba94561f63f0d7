//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - attachments(name, mimetype, url, datas)
//! - directives(name, bundle, path, target, directive, sequence)

pub mod schema;
pub mod sqlite;

pub use sqlite::{Attachment, DbStats, Directive, SqliteStore};
