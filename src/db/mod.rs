//! Persistence layer.
//!
//! Two tables behind one trait: a per-patient memory row (JSON blob) and an
//! append-only chat history. Backends are selected via [`DatabaseProvider`]:
//! in-memory SQLite (ephemeral), a local SQLite file (default for
//! deployments), or remote Turso behind the `turso` feature.

/// Store trait and backend selection.
pub mod traits;

/// libsql-backed implementation.
pub mod sqlite;

pub use sqlite::SqliteClient;
pub use traits::{ChatStore, DatabaseProvider};
