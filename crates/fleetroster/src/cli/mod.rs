//! Command-line interface for fleetroster.
//!
//! This module provides the CLI structure for the `fleetctl` binary and the
//! interactive shell.

mod commands;
pub mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, AvailabilityArg, CategoryArg, CategoryFilterArg, ConfigCommand, DeleteCommand,
    FilterArgs, ListCommand, OutputFormat, RenderCommand, StatusCommand, ToggleCommand,
    UpdateDriverCommand,
};

/// fleetctl - Manage a local fleet roster
///
/// Keeps vehicle records on this machine and lets a logged-in admin add,
/// edit, filter and delete them.
#[derive(Debug, Parser)]
#[command(name = "fleetctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
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
    /// Start an admin session
    Login,

    /// End the admin session
    Logout,

    /// Show session and storage status
    Status(StatusCommand),

    /// Add a vehicle
    Add(AddCommand),

    /// List vehicles
    List(ListCommand),

    /// Change a vehicle's driver
    UpdateDriver(UpdateDriverCommand),

    /// Flip a vehicle's availability
    Toggle(ToggleCommand),

    /// Delete a vehicle
    Delete(DeleteCommand),

    /// Write the admin page as HTML
    Render(RenderCommand),

    /// Interactive admin shell
    Shell,

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Status(StatusCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "fleetctl");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "fleetctl",
            "add",
            "--reg-no",
            "KA01",
            "--category",
            "truck",
            "--driver",
            "Sam",
            "-a",
        ])
        .unwrap();

        let Command::Add(add) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(add.reg_no, "KA01");
        assert_eq!(add.category, CategoryArg::Truck);
        assert_eq!(add.driver, "Sam");
        assert!(add.available);
    }

    #[test]
    fn test_parse_add_requires_fields() {
        assert!(Cli::try_parse_from(["fleetctl", "add", "--reg-no", "KA01"]).is_err());
    }

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::try_parse_from([
            "fleetctl",
            "list",
            "-t",
            "bus",
            "--availability",
            "unavailable",
            "--format",
            "json",
        ])
        .unwrap();

        let Command::List(list) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(list.filters.category, CategoryFilterArg::Bus);
        assert_eq!(list.filters.availability, AvailabilityArg::Unavailable);
        assert_eq!(list.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_list_defaults() {
        let cli = Cli::try_parse_from(["fleetctl", "list"]).unwrap();
        let Command::List(list) = cli.command else {
            panic!("expected list");
        };
        assert!(list.filters.filters().is_clear());
        assert_eq!(list.format, OutputFormat::Plain);
    }

    #[test]
    fn test_parse_update_driver() {
        let cli =
            Cli::try_parse_from(["fleetctl", "update-driver", "id_abc", "--name", "Ria"]).unwrap();
        let Command::UpdateDriver(cmd) = cli.command else {
            panic!("expected update-driver");
        };
        assert_eq!(cmd.id, "id_abc");
        assert_eq!(cmd.name.as_deref(), Some("Ria"));
    }

    #[test]
    fn test_parse_delete_yes() {
        let cli = Cli::try_parse_from(["fleetctl", "delete", "id_abc", "-y"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Delete(DeleteCommand { yes: true, .. })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["fleetctl", "-c", "/custom/config.toml", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["fleetctl", "toggle", "id_abc", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
