//! Text and JSON rendering for CLI output.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::OutputFormat;
use crate::error::Result;
use crate::record::Record;
use crate::store::Listing;
use crate::team::Team;

const TITLE_WIDTH: usize = 48;

/// One output row, possibly redacted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Row<'a> {
    id: &'a str,
    team: Team,
    created_at: DateTime<Utc>,
    title: &'a str,
    content: Option<&'a str>,
    accessible: bool,
}

impl<'a> From<&'a Record> for Row<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            id: record.id.as_str(),
            team: record.owning_team,
            created_at: record.created_at,
            title: &record.title,
            content: Some(&record.content),
            accessible: true,
        }
    }
}

impl<'a> From<&Listing<'a>> for Row<'a> {
    fn from(listing: &Listing<'a>) -> Self {
        Self {
            id: listing.id().as_str(),
            team: listing.owning_team(),
            created_at: listing.created_at(),
            title: listing.title(),
            content: listing.content(),
            accessible: listing.is_accessible(),
        }
    }
}

/// Heading for the record list of `team`.
#[must_use]
pub fn heading(team: Team) -> String {
    if team.is_admin() {
        "All Team Data".to_string()
    } else {
        format!("{team} Dashboard")
    }
}

/// Short date as shown on list entries, e.g. "Oct 15, 2023".
#[must_use]
pub fn short_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// Long date as shown on a detail view, e.g. "October 15, 2023".
#[must_use]
pub fn long_date(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

/// Render records the viewer may fully see.
///
/// # Errors
///
/// Returns an error if JSON encoding fails.
pub fn records(records: &[&Record], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(records)?);
    }
    let rows: Vec<Row<'_>> = records.iter().map(|record| Row::from(*record)).collect();
    Ok(rows_text(&rows, format))
}

/// Render a browse view, redacting what the viewer may not see.
///
/// # Errors
///
/// Returns an error if JSON encoding fails.
pub fn listings(listings: &[Listing<'_>], format: OutputFormat) -> Result<String> {
    let rows: Vec<Row<'_>> = listings.iter().map(Row::from).collect();
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }
    Ok(rows_text(&rows, format))
}

/// Render a single record in full.
///
/// # Errors
///
/// Returns an error if JSON encoding fails.
pub fn detail(record: &Record, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(record)?);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", record.title);
    let _ = writeln!(
        out,
        "{}  |  {}  |  id {}",
        long_date(record.created_at),
        record.owning_team,
        record.id
    );
    out.push('\n');
    for paragraph in record.paragraphs() {
        let _ = writeln!(out, "{paragraph}");
    }
    Ok(out)
}

/// Notice shown when a record belongs to a team the viewer cannot access.
#[must_use]
pub fn access_denied(owner: Team) -> String {
    format!(
        "Access Denied\nThis content belongs to {owner} and you don't have permission to view it.\n\
         Please contact an administrator if you believe this is an error."
    )
}

fn rows_text(rows: &[Row<'_>], format: OutputFormat) -> String {
    if rows.is_empty() {
        return "No records found.\n".to_string();
    }
    match format {
        OutputFormat::Table => table(rows),
        _ => plain(rows),
    }
}

fn plain(rows: &[Row<'_>]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "[{}] Team {}  {}",
            row.id,
            row.team.as_str(),
            short_date(row.created_at)
        );
        let _ = writeln!(out, "  {}", row.title);
        match row.content {
            Some(content) => {
                for line in content.lines() {
                    let _ = writeln!(out, "  {line}");
                }
            }
            None => {
                let _ = writeln!(
                    out,
                    "  You don't have permission to view this content. This belongs to Team {}.",
                    row.team.as_str()
                );
            }
        }
        out.push('\n');
    }
    out
}

fn table(rows: &[Row<'_>]) -> String {
    let id_width = rows
        .iter()
        .map(|row| row.id.len())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<id_width$}  {:<4}  {:<12}  TITLE",
        "ID", "TEAM", "CREATED"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<id_width$}  {:<4}  {:<12}  {}",
            row.id,
            row.team.as_str(),
            short_date(row.created_at),
            truncate(row.title, TITLE_WIDTH)
        );
    }
    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
