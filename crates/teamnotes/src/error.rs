//! Error types for teamnotes.
//!
//! Every fallible operation in the crate reports one of these variants as a
//! value. The front end is expected to turn them into user-facing notices.

use std::path::PathBuf;
use thiserror::Error;

use crate::record::RecordId;
use crate::team::Team;

/// The main error type for teamnotes operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Store Errors ===
    /// No record with the given id exists.
    #[error("record {id} not found")]
    NotFound {
        /// The id that was looked up.
        id: RecordId,
    },

    /// The access rule does not allow the acting team to touch the record.
    #[error("{} may not access records owned by {owner}", actor_label(.acting))]
    PermissionDenied {
        /// Team that owns the target record.
        owner: Team,
        /// Team that attempted the operation, if any.
        acting: Option<Team>,
    },

    /// An operation requiring a selected team ran without one.
    #[error("no team is logged in")]
    NotLoggedIn,

    /// Caller-supplied record fields were rejected.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the rejected input.
        message: String,
    },

    /// Durable storage could not be updated after an in-memory change.
    #[error("failed to persist '{key}': {source}")]
    Persistence {
        /// Storage key that was being written.
        key: &'static str,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },

    /// A string did not name one of the known teams.
    #[error("unknown team '{0}' (expected one of X, Y, Z, A)")]
    InvalidTeam(String),

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// A storage backend refused an operation.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for teamnotes operations.
pub type Result<T> = std::result::Result<T, Error>;

#[allow(clippy::ref_option)]
fn actor_label(acting: &Option<Team>) -> String {
    acting.map_or_else(|| "an anonymous session".to_string(), |team| team.label())
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for the given id.
    #[must_use]
    pub fn not_found(id: &RecordId) -> Self {
        Self::NotFound { id: id.clone() }
    }

    /// Create a permission-denied error.
    #[must_use]
    pub fn permission_denied(owner: Team, acting: Option<Team>) -> Self {
        Self::PermissionDenied { owner, acting }
    }

    /// Create an invalid-input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Wrap a storage failure that happened while persisting `key`.
    #[must_use]
    pub fn persistence(key: &'static str, source: Self) -> Self {
        Self::Persistence {
            key,
            source: Box::new(source),
        }
    }

    /// Create a storage-unavailable error.
    #[must_use]
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::StorageUnavailable(message.into())
    }

    /// Check if this error means the record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is an access rule violation.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Check if this error means durable storage diverged from memory.
    #[must_use]
    pub fn is_persistence_failure(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }
}
