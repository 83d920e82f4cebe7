//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::team::Team;

/// Login command arguments.
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Team to act as: X, Y, Z, or A for admin
    #[arg(value_parser = parse_team)]
    pub team: Team,
}

fn parse_team(value: &str) -> Result<Team, String> {
    value.parse().map_err(|err: crate::error::Error| err.to_string())
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Show every record, with other teams' records redacted
    #[arg(short, long)]
    pub all: bool,

    /// Only show records whose title or content contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Record id
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// New command arguments.
#[derive(Debug, Args)]
pub struct NewCommand {
    /// Record title
    #[arg(short, long)]
    pub title: String,

    /// Record body
    #[arg(long, default_value = "")]
    pub content: String,
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Record id
    pub id: String,

    /// Replacement title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Replacement body
    #[arg(long)]
    pub content: Option<String>,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Record id
    pub id: String,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_team_accepts_letters_and_labels() {
        assert_eq!(parse_team("X"), Ok(Team::X));
        assert_eq!(parse_team("a"), Ok(Team::A));
        assert_eq!(parse_team("Team Y"), Ok(Team::Y));
    }

    #[test]
    fn test_parse_team_rejects_unknown() {
        let err = parse_team("Q").unwrap_err();
        assert!(err.contains("unknown team 'Q'"));
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }
}
