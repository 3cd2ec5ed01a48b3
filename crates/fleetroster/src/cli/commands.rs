//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::filter::{AvailabilityFilter, CategoryFilter, Filters};
use crate::vehicle::Category;

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Registration number
    #[arg(short, long)]
    pub reg_no: String,

    /// Vehicle category
    #[arg(short = 't', long, value_enum)]
    pub category: CategoryArg,

    /// Driver name
    #[arg(short, long)]
    pub driver: String,

    /// Mark the vehicle as available
    #[arg(short, long)]
    pub available: bool,
}

/// Filter arguments shared by `list` and `render`.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Only show this category
    #[arg(short = 't', long, value_enum, default_value = "all")]
    pub category: CategoryFilterArg,

    /// Only show vehicles with this availability
    #[arg(short, long, value_enum, default_value = "all")]
    pub availability: AvailabilityArg,
}

impl FilterArgs {
    /// The filters these arguments select.
    #[must_use]
    pub fn filters(&self) -> Filters {
        Filters {
            category: self.category.into(),
            availability: self.availability.into(),
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Filters to apply
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Update-driver command arguments.
#[derive(Debug, Args)]
pub struct UpdateDriverCommand {
    /// Vehicle id
    pub id: String,

    /// New driver name (prompted for when omitted)
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Toggle command arguments.
#[derive(Debug, Args)]
pub struct ToggleCommand {
    /// Vehicle id
    pub id: String,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Vehicle id
    pub id: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Render command arguments.
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Filters to apply
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Write the page here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
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

/// Vehicle category argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    /// Auto-rickshaws
    Auto,
    /// Cars
    Car,
    /// Trucks
    Truck,
    /// Buses
    Bus,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Auto => Self::Auto,
            CategoryArg::Car => Self::Car,
            CategoryArg::Truck => Self::Truck,
            CategoryArg::Bus => Self::Bus,
        }
    }
}

/// Category filter argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CategoryFilterArg {
    /// Every category
    #[default]
    All,
    /// Auto-rickshaws
    Auto,
    /// Cars
    Car,
    /// Trucks
    Truck,
    /// Buses
    Bus,
}

impl From<CategoryFilterArg> for CategoryFilter {
    fn from(arg: CategoryFilterArg) -> Self {
        let category = match arg {
            CategoryFilterArg::All => return Self::All,
            CategoryFilterArg::Auto => Category::Auto,
            CategoryFilterArg::Car => Category::Car,
            CategoryFilterArg::Truck => Category::Truck,
            CategoryFilterArg::Bus => Category::Bus,
        };
        Self::Only(category.as_str().to_string())
    }
}

/// Availability filter argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AvailabilityArg {
    /// Available and unavailable
    #[default]
    All,
    /// Available only
    Available,
    /// Unavailable only
    Unavailable,
}

impl From<AvailabilityArg> for AvailabilityFilter {
    fn from(arg: AvailabilityArg) -> Self {
        match arg {
            AvailabilityArg::All => Self::All,
            AvailabilityArg::Available => Self::Available,
            AvailabilityArg::Unavailable => Self::Unavailable,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text cards
    #[default]
    Plain,
    /// JSON array of records
    Json,
    /// HTML card grid
    Html,
}
