//! Core record types for teamnotes.
//!
//! A [`Record`] is a titled, timestamped note owned by exactly one team. The
//! serialized field names match the layout already found in existing stored
//! collections (`team`, `createdAt`).

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::team::Team;

/// Opaque, unique record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Build an id from a Unix timestamp in milliseconds.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique identifier, fixed at creation.
    pub id: RecordId,

    /// Short human-readable title.
    pub title: String,

    /// Free-form multi-line body.
    pub content: String,

    /// Team that owns this record. Never changes after creation.
    #[serde(rename = "team")]
    pub owning_team: Team,

    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Record {
    /// Create a record owned by `team`, stamped with the current time.
    #[must_use]
    pub fn new(id: RecordId, title: String, content: String, team: Team) -> Self {
        Self {
            id,
            title,
            content,
            owning_team: team,
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive substring match against title or content.
    ///
    /// An empty query matches every record.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.content.to_lowercase().contains(&query)
    }

    /// Content split into paragraphs, one per line.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }
}

/// Fields to replace on an existing record. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement content.
    pub content: Option<String>,
}

impl RecordPatch {
    /// Patch that replaces only the title.
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    /// Patch that replaces only the content.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }

    /// Also replace the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Apply the supplied fields to `record`.
    pub fn apply(self, record: &mut Record) {
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(content) = self.content {
            record.content = content;
        }
    }
}

fn seed_time(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn seed(id: &str, team: Team, title: &str, content: &str, created_at: DateTime<Utc>) -> Record {
    Record {
        id: RecordId::from(id),
        title: title.to_string(),
        content: content.to_string(),
        owning_team: team,
        created_at,
    }
}

/// The sample collection used when nothing has been stored yet.
///
/// Two records for each of X, Y and Z, and two owned by the admin team.
#[must_use]
pub fn seed_records() -> Vec<Record> {
    vec![
        seed(
            "1",
            Team::X,
            "Team X Project Plan",
            "This document outlines the strategic roadmap for Team X in the upcoming quarter, \
             including key milestones, resource allocation, and success metrics.",
            seed_time(2023, 10, 15, 8, 30),
        ),
        seed(
            "2",
            Team::X,
            "Team X Budget Analysis",
            "Financial breakdown of Team X expenses and revenue projections for the current \
             fiscal year with comparison to previous performance.",
            seed_time(2023, 10, 12, 11, 45),
        ),
        seed(
            "3",
            Team::Y,
            "Team Y Marketing Strategy",
            "Comprehensive marketing plan for Team Y including target audience analysis, \
             messaging framework, and channel optimization recommendations.",
            seed_time(2023, 10, 10, 9, 15),
        ),
        seed(
            "4",
            Team::Y,
            "Team Y Customer Feedback Summary",
            "Analysis of recent customer satisfaction surveys with actionable insights for \
             Team Y product improvements and service enhancements.",
            seed_time(2023, 10, 8, 14, 20),
        ),
        seed(
            "5",
            Team::Z,
            "Team Z Technology Stack Review",
            "Technical assessment of current infrastructure with recommendations for Team Z \
             platform optimization and scalability improvements.",
            seed_time(2023, 10, 6, 10, 30),
        ),
        seed(
            "6",
            Team::Z,
            "Team Z Innovation Pipeline",
            "Overview of Team Z research initiatives and development projects in various \
             stages, from ideation to prototype testing.",
            seed_time(2023, 10, 4, 16, 45),
        ),
        seed(
            "7",
            Team::A,
            "Cross-Team Collaboration Framework",
            "Guidelines for fostering effective collaboration across teams X, Y, and Z, with \
             recommended tools and communication protocols.",
            seed_time(2023, 10, 2, 13, 0),
        ),
        seed(
            "8",
            Team::A,
            "Organization-Wide Security Protocols",
            "Comprehensive security policies and practices to be implemented across all teams, \
             addressing data protection, access control, and incident response.",
            seed_time(2023, 9, 30, 9, 45),
        ),
    ]
}
