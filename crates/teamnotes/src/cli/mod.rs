//! Command-line interface for teamnotes.
//!
//! This module provides the CLI structure and output rendering for the
//! `teamnotes` binary.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, DeleteCommand, EditCommand, ListCommand, LoginCommand, NewCommand,
    OutputFormat, ShowCommand, StatusCommand,
};

use crate::logging::Verbosity;

/// teamnotes - Team-scoped notes
///
/// Pick a team, then read and manage that team's notes. Team A is the admin
/// team and can see and change everything.
#[derive(Debug, Parser)]
#[command(name = "teamnotes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Select the team to act as
    Login(LoginCommand),

    /// Forget the selected team
    Logout,

    /// Show the selected team
    Whoami,

    /// List records visible to the selected team
    List(ListCommand),

    /// Show one record
    Show(ShowCommand),

    /// Create a record owned by the selected team
    New(NewCommand),

    /// Change a record's title or content
    Edit(EditCommand),

    /// Delete a record
    Delete(DeleteCommand),

    /// Show session and storage status
    Status(StatusCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::Team;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "teamnotes");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_login() {
        let cli = Cli::try_parse_from(["teamnotes", "login", "X"]).unwrap();
        match cli.command {
            Command::Login(cmd) => assert_eq!(cmd.team, Team::X),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_login_lowercase() {
        let cli = Cli::try_parse_from(["teamnotes", "login", "a"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Login(LoginCommand { team: Team::A })
        ));
    }

    #[test]
    fn test_parse_login_with_label() {
        let cli = Cli::try_parse_from(["teamnotes", "login", "Team Z"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Login(LoginCommand { team: Team::Z })
        ));
    }

    #[test]
    fn test_parse_login_unknown_team() {
        assert!(Cli::try_parse_from(["teamnotes", "login", "Q"]).is_err());
    }

    #[test]
    fn test_parse_list_defaults() {
        let cli = Cli::try_parse_from(["teamnotes", "list"]).unwrap();
        match cli.command {
            Command::List(cmd) => {
                assert!(!cmd.all);
                assert!(cmd.search.is_none());
                assert_eq!(cmd.format, OutputFormat::Table);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_all_with_search() {
        let cli =
            Cli::try_parse_from(["teamnotes", "list", "--all", "-s", "plan", "-f", "json"]).unwrap();
        match cli.command {
            Command::List(cmd) => {
                assert!(cmd.all);
                assert_eq!(cmd.search.as_deref(), Some("plan"));
                assert_eq!(cmd.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_new() {
        let cli =
            Cli::try_parse_from(["teamnotes", "new", "--title", "Plan", "--content", "Body"])
                .unwrap();
        match cli.command {
            Command::New(cmd) => {
                assert_eq!(cmd.title, "Plan");
                assert_eq!(cmd.content, "Body");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_new_requires_title() {
        assert!(Cli::try_parse_from(["teamnotes", "new"]).is_err());
    }

    #[test]
    fn test_parse_edit_partial() {
        let cli = Cli::try_parse_from(["teamnotes", "edit", "7", "-t", "Renamed"]).unwrap();
        match cli.command {
            Command::Edit(cmd) => {
                assert_eq!(cmd.id, "7");
                assert_eq!(cmd.title.as_deref(), Some("Renamed"));
                assert!(cmd.content.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from(["teamnotes", "delete", "3"]).unwrap();
        assert!(matches!(cli.command, Command::Delete(DeleteCommand { ref id }) if id == "3"));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["teamnotes", "-c", "/custom/config.toml", "whoami"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_config_subcommands() {
        let cli = Cli::try_parse_from(["teamnotes", "config", "show", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Show { json: true })
        ));

        let cli = Cli::try_parse_from(["teamnotes", "config", "validate", "-f", "a.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(ref f) }) if f == &PathBuf::from("a.toml")
        ));
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["teamnotes", "-vv", "status"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Trace);

        let cli = Cli::try_parse_from(["teamnotes", "-q", "status"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);

        let cli = Cli::try_parse_from(["teamnotes", "status"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Normal);
    }
}
