//! The record store.
//!
//! [`RecordStore`] owns the working collection and is the only thing that
//! mutates it. Every mutation checks the access rule first and writes the
//! whole collection back to durable storage afterwards.

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::config::{InsertionOrder, RecordsConfig};
use crate::error::{Error, Result};
use crate::persistence::{self, LoadSource};
use crate::record::{Record, RecordId, RecordPatch};
use crate::storage::Backend;
use crate::team::{can_access, Team};

/// Title shown in place of a record the viewer may not access.
pub const RESTRICTED_TITLE: &str = "Restricted Content";

/// Team-scoped record collection synchronized with a [`Backend`].
#[derive(Debug)]
pub struct RecordStore<B: Backend> {
    backend: B,
    records: Vec<Record>,
    source: LoadSource,
    settings: RecordsConfig,
}

impl<B: Backend> RecordStore<B> {
    /// Load the collection from `backend`, falling back to the seed data.
    pub fn load(backend: B, settings: RecordsConfig) -> Self {
        let loaded = persistence::load(&backend);
        info!(
            count = loaded.records.len(),
            source = %loaded.source,
            "Record store ready"
        );
        Self {
            backend,
            records: loaded.records,
            source: loaded.source,
            settings,
        }
    }

    /// Where the working collection came from at startup.
    #[must_use]
    pub fn load_source(&self) -> LoadSource {
        self.source
    }

    /// The whole collection, in order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The backend this store persists to.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Records visible to `team`, in collection order.
    ///
    /// The admin team sees everything, other teams only their own records,
    /// and no team sees nothing.
    #[must_use]
    pub fn list_for_team(&self, team: Option<Team>) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| can_access(record.owning_team, team))
            .collect()
    }

    /// Look up a record by id. Does not check access.
    #[must_use]
    pub fn get_by_id(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// Every record, each marked with whether `team` may access it.
    #[must_use]
    pub fn browse(&self, team: Option<Team>) -> Vec<Listing<'_>> {
        self.records
            .iter()
            .map(|record| Listing {
                record,
                accessible: can_access(record.owning_team, team),
            })
            .collect()
    }

    /// Create a record owned by `team`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotLoggedIn`] without a team, [`Error::InvalidInput`]
    /// when a field exceeds the configured limits, and
    /// [`Error::Persistence`] when the collection could not be saved. In the
    /// last case the record stays in memory.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        team: Option<Team>,
    ) -> Result<Record> {
        let team = team.ok_or(Error::NotLoggedIn)?;
        let title = title.into();
        let content = content.into();
        self.settings
            .check_lengths(Some(title.as_str()), Some(content.as_str()))?;

        let record = Record::new(self.next_id(Utc::now()), title, content, team);
        self.insert(record.clone());
        info!(id = %record.id, team = %team, "Created record");

        self.persist()?;
        Ok(record)
    }

    /// Replace the supplied fields of a record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id,
    /// [`Error::PermissionDenied`] when `acting` may not access the record,
    /// [`Error::InvalidInput`] when a field exceeds the configured limits,
    /// and [`Error::Persistence`] when the collection could not be saved.
    pub fn update(
        &mut self,
        id: &RecordId,
        patch: RecordPatch,
        acting: Option<Team>,
    ) -> Result<Record> {
        let index = self.authorize(id, acting, "update")?;
        self.settings
            .check_lengths(patch.title.as_deref(), patch.content.as_deref())?;

        if patch.is_empty() {
            return Ok(self.records[index].clone());
        }

        let record = &mut self.records[index];
        patch.apply(record);
        let updated = record.clone();
        info!(id = %id, "Updated record");

        self.persist()?;
        Ok(updated)
    }

    /// Remove a record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id,
    /// [`Error::PermissionDenied`] when `acting` may not access the record,
    /// and [`Error::Persistence`] when the collection could not be saved. In
    /// the last case the record is already gone from memory.
    pub fn delete(&mut self, id: &RecordId, acting: Option<Team>) -> Result<Record> {
        let index = self.authorize(id, acting, "delete")?;
        let removed = self.records.remove(index);
        info!(id = %id, "Deleted record");

        self.persist()?;
        Ok(removed)
    }

    /// Position of `id`, if `acting` may access it.
    fn authorize(&self, id: &RecordId, acting: Option<Team>, operation: &str) -> Result<usize> {
        let index = self
            .records
            .iter()
            .position(|record| &record.id == id)
            .ok_or_else(|| Error::not_found(id))?;

        let owner = self.records[index].owning_team;
        if !can_access(owner, acting) {
            warn!(id = %id, owner = %owner, acting = ?acting, operation, "Access denied");
            return Err(Error::permission_denied(owner, acting));
        }
        Ok(index)
    }

    fn insert(&mut self, record: Record) {
        match self.settings.insertion_order {
            InsertionOrder::Prepend => self.records.insert(0, record),
            InsertionOrder::Clustered => {
                let mut clusters: Vec<Team> = Vec::with_capacity(Team::ALL.len());
                for existing in &self.records {
                    if !clusters.contains(&existing.owning_team) {
                        clusters.push(existing.owning_team);
                    }
                }
                if !clusters.contains(&record.owning_team) {
                    clusters.insert(0, record.owning_team);
                }

                self.records.insert(0, record);
                // Stable: the new record stays ahead of its older teammates.
                self.records.sort_by_key(|r| {
                    clusters
                        .iter()
                        .position(|team| *team == r.owning_team)
                        .unwrap_or(usize::MAX)
                });
            }
        }
    }

    /// Millisecond timestamp id, bumped until unique.
    fn next_id(&self, now: DateTime<Utc>) -> RecordId {
        let mut millis = now.timestamp_millis();
        loop {
            let candidate = RecordId::from_millis(millis);
            if self.get_by_id(&candidate).is_none() {
                return candidate;
            }
            millis += 1;
        }
    }

    fn persist(&self) -> Result<()> {
        persistence::save(&self.backend, &self.records).inspect_err(|err| {
            error!(error = %err, "Collection changed in memory but was not saved");
        })
    }
}

/// A record as seen by a particular team.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    record: &'a Record,
    accessible: bool,
}

impl<'a> Listing<'a> {
    /// Whether the viewer may see the record's title and content.
    #[must_use]
    pub fn is_accessible(&self) -> bool {
        self.accessible
    }

    /// Record id.
    #[must_use]
    pub fn id(&self) -> &'a RecordId {
        &self.record.id
    }

    /// Title, or [`RESTRICTED_TITLE`] when inaccessible.
    #[must_use]
    pub fn title(&self) -> &'a str {
        if self.accessible {
            &self.record.title
        } else {
            RESTRICTED_TITLE
        }
    }

    /// Content, hidden when inaccessible.
    #[must_use]
    pub fn content(&self) -> Option<&'a str> {
        self.accessible.then_some(self.record.content.as_str())
    }

    /// Owning team. Always visible.
    #[must_use]
    pub fn owning_team(&self) -> Team {
        self.record.owning_team
    }

    /// Creation time. Always visible.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.record.created_at
    }

    /// Search match that never looks inside restricted records.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        // Restricted records match on the placeholder title only. Matching
        // their real title or content would reveal what the redaction hides.
        if self.accessible {
            self.record.matches(query)
        } else {
            RESTRICTED_TITLE.to_lowercase().contains(&query.to_lowercase())
        }
    }
}

/// Records whose title or content contains `query`, ignoring case.
pub fn search<'a>(records: impl IntoIterator<Item = &'a Record>, query: &str) -> Vec<&'a Record> {
    records
        .into_iter()
        .filter(|record| record.matches(query))
        .collect()
}
