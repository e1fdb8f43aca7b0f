//! CLI argument definitions for Tether.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tether - stay in touch with the people who matter.
///
/// Start with `tt add` to track someone, `tt list` to see who's due,
/// and `tt contacted` after you reach out.
#[derive(Parser, Debug)]
#[command(name = "tt")]
#[command(author, version, about = "A CLI tool for tracking the people you want to stay in touch with", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Directory holding tether's data instead of the platform default.
    /// Can also be set via the TT_DATA_DIR environment variable.
    #[arg(short = 'd', long = "data-dir", global = true, env = "TT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start tracking a person (today counts as the first contact)
    Add {
        /// Display name
        name: String,

        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,

        /// Target contact cadence in days
        #[arg(short = 'f', long, default_value_t = 7)]
        frequency: u32,

        /// Category label (e.g., Friends, Family, Work)
        #[arg(long)]
        category: Option<String>,

        /// Phone number (used for import dedup)
        #[arg(long)]
        phone: Option<String>,

        /// Email address (used for import dedup)
        #[arg(long)]
        email: Option<String>,
    },

    /// List tracked people, most urgent first
    List {
        /// Filter: all, overdue, week, or month
        #[arg(long, default_value = "all")]
        filter: String,

        /// Case-insensitive substring search over name, notes, category
        #[arg(long)]
        search: Option<String>,

        /// Keep only people in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show a person by ID
    Show {
        /// Person ID (e.g., tt-a1b2)
        id: String,
    },

    /// Update a person's fields
    Update {
        /// Person ID (e.g., tt-a1b2)
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Target contact cadence in days
        #[arg(short = 'f', long)]
        frequency: Option<u32>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Stop tracking a person (undo-able)
    Delete {
        /// Person ID (e.g., tt-a1b2)
        id: String,
    },

    /// Record that you contacted someone today
    Contacted {
        /// Person ID (e.g., tt-a1b2)
        #[arg(required_unless_present_any = ["all", "category"])]
        id: Option<String>,

        /// Mark everyone as contacted
        #[arg(long, conflicts_with_all = ["id", "category"])]
        all: bool,

        /// Mark everyone in a category as contacted
        #[arg(long, conflicts_with = "id")]
        category: Option<String>,
    },

    /// Revert the most recent destructive action
    Undo,

    /// Summary counts: total, overdue, contacted this week, on time
    Stats,

    /// List category labels in use
    Categories,

    /// Import candidates from a JSON address-book export, skipping
    /// duplicates
    Import {
        /// Path to a JSON array of {name, phone?, email?} records
        file: PathBuf,

        /// Classify candidates without adding anyone
        #[arg(long)]
        dry_run: bool,

        /// Contact cadence in days assigned to imported people
        #[arg(short = 'f', long, default_value_t = 30)]
        frequency: u32,
    },
}
