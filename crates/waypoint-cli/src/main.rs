//! Waypoint CLI
//!
//! Command-line front end for the Waypoint trip planner.

mod args;
mod cli;
mod notifier;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use waypoint_core::{BackendBuilder, StaticIdentity, TripQuery};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        user,
        command,
    } = Args::parse();

    let backend = BackendBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize trip database")?;

    let cli = Cli::new(
        backend,
        TerminalRenderer::new(!no_color),
        StaticIdentity::from_option(user),
    );

    info!("Waypoint started");

    match command {
        Some(Trip { command }) => cli.handle_trip_command(command).await,
        Some(Prefs { command }) => cli.handle_prefs_command(command).await,
        Some(Participant { command }) => cli.handle_participant_command(command).await,
        None => cli.list_trips(&TripQuery::default()).await,
    }
}
