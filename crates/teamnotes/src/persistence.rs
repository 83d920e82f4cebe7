//! Moves the record collection between memory and durable storage.
//!
//! Loading never fails: missing, unreadable or undecodable data falls back
//! to the seed collection. Saving reports failure so the caller can decide
//! how to react.

use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::record::{seed_records, Record};
use crate::storage::{Backend, RECORDS_KEY};

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Decoded from durable storage.
    Stored,
    /// Nothing was stored; seed data was used.
    Empty,
    /// Stored data could not be decoded; seed data was used.
    Corrupt,
    /// Storage could not be read; seed data was used.
    Unreadable,
}

impl LoadSource {
    /// Whether the seed collection was substituted.
    #[must_use]
    pub fn is_seeded(self) -> bool {
        !matches!(self, Self::Stored)
    }
}

impl std::fmt::Display for LoadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stored => write!(f, "stored"),
            Self::Empty => write!(f, "seed (storage empty)"),
            Self::Corrupt => write!(f, "seed (stored data corrupt)"),
            Self::Unreadable => write!(f, "seed (storage unreadable)"),
        }
    }
}

/// A collection read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    /// The working collection.
    pub records: Vec<Record>,
    /// How it was obtained.
    pub source: LoadSource,
}

/// Read the collection from `backend`, falling back to the seed data.
pub fn load(backend: &impl Backend) -> Loaded {
    let seeded = |source| Loaded {
        records: seed_records(),
        source,
    };

    let raw = match backend.get_item(RECORDS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("No stored records, starting from seed data");
            return seeded(LoadSource::Empty);
        }
        Err(err) => {
            error!(error = %err, "Failed to read stored records, starting from seed data");
            return seeded(LoadSource::Unreadable);
        }
    };

    match serde_json::from_str::<Vec<Record>>(&raw) {
        Ok(records) => {
            debug!(count = records.len(), "Loaded stored records");
            Loaded {
                records,
                source: LoadSource::Stored,
            }
        }
        Err(err) => {
            warn!(error = %err, bytes = raw.len(), "Stored records are corrupt, starting from seed data");
            seeded(LoadSource::Corrupt)
        }
    }
}

/// Write the full collection to `backend`.
///
/// # Errors
///
/// Returns [`Error::Persistence`] if the collection could not be encoded or
/// written.
pub fn save(backend: &impl Backend, records: &[Record]) -> Result<()> {
    let encoded =
        serde_json::to_string(records).map_err(|err| Error::persistence(RECORDS_KEY, err.into()))?;
    backend
        .set_item(RECORDS_KEY, &encoded)
        .map_err(|err| Error::persistence(RECORDS_KEY, err))?;
    debug!(count = records.len(), "Saved records");
    Ok(())
}
