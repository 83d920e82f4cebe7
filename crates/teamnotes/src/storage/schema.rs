//! `SQLite` schema definitions for the item store.

/// Key-value items, one row per storage key.
pub const CREATE_ITEMS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS items (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// Index used by `stats` to find the latest write.
pub const CREATE_UPDATED_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_items_updated ON items(updated_at DESC)
";

/// Internal bookkeeping (schema version).
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_ITEMS_TABLE,
    CREATE_UPDATED_INDEX,
    CREATE_METADATA_TABLE,
];
