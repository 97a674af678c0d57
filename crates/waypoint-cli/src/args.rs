use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ParticipantCommands, PrefsCommands, TripCommands};

/// Plan road trips from the command line
///
/// Waypoint keeps trips, their travel preferences and the people on them in
/// a local SQLite database. New trips go through the same three-step wizard
/// as the app: details, preferences, review.
#[derive(Parser)]
#[command(version, about, name = "waypoint")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/waypoint/waypoint.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// User to act as when creating trips
    #[arg(long, global = true, env = "WAYPOINT_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage trips
    #[command(alias = "t")]
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Manage the travel preferences of a trip
    #[command(alias = "p")]
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },
    /// Manage who is on a trip
    #[command(alias = "u")]
    Participant {
        #[command(subcommand)]
        command: ParticipantCommands,
    },
}
