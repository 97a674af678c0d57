//! Subcommand arguments and their handlers.
//!
//! Argument structs carry the clap attributes and convert into core types
//! through `From` impls, keeping clap out of `waypoint-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core types → Backend / Wizard
//! ```

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use jiff::civil::Date;
use log::debug;
use waypoint_core::{
    display::{CreateResult, DeleteResult, OperationStatus, Participants, UpdateResult},
    load_dashboard,
    models::{
        Accommodation, Dining, ParticipantRole, StopPreference, TripStatus, UpdateTrip,
        UpdateTripParticipant, UpdateTripPreferences, UserId, DISTANCE_MAX, DISTANCE_MIN,
        DISTANCE_STEP,
    },
    Backend, CompensationPolicy, IdentityProvider, ReviewSummary, StaticIdentity, StatusFilter,
    StepIndicator, SubmissionOrchestrator, SubmitRejected, Transition, TripQuery, TripSort,
    Wizard, WizardSubmitError,
};

use crate::{notifier::StderrNotifier, renderer::TerminalRenderer};

const SIGN_IN_REQUIRED: &str = "Sign in to create a trip: pass --user or set WAYPOINT_USER";

fn distance_help() -> String {
    format!("Miles between stops ({DISTANCE_MIN}-{DISTANCE_MAX}, in steps of {DISTANCE_STEP})")
}

/// Rejects values that are empty after trimming.
fn non_blank(value: &str) -> std::result::Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("value must not be blank".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

// ============================================================================
// Trip arguments
// ============================================================================

/// List trips
#[derive(Args)]
pub struct ListTripsArgs {
    /// Only trips whose name, start or destination contains this text
    #[arg(short, long)]
    pub search: Option<String>,
    /// all, upcoming, in-progress or completed
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,
    /// date-desc, date-asc, name-asc or name-desc
    #[arg(long, default_value = "date-desc")]
    pub sort: TripSort,
}

impl From<ListTripsArgs> for TripQuery {
    fn from(val: ListTripsArgs) -> Self {
        TripQuery {
            search: val.search,
            status: val.status,
            sort: val.sort,
        }
    }
}

/// Create a trip through the creation wizard
///
/// Values are entered step by step exactly as in the app. Enumerated values
/// are passed through as typed so that the wizard can reject unknown ones.
#[derive(Args)]
pub struct CreateTripArgs {
    /// Name of the trip
    #[arg(long)]
    pub name: Option<String>,
    /// Starting location
    #[arg(long = "from")]
    pub start_location: Option<String>,
    /// Destination
    #[arg(long = "to")]
    pub destination: Option<String>,
    /// First day of the trip (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<Date>,
    /// Last day of the trip (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<Date>,
    /// Kinds of stops as a comma-separated list: scenic, nature, adventure,
    /// historical, luxury
    #[arg(long = "stop", value_delimiter = ',')]
    pub stops: Vec<String>,
    #[arg(long, allow_negative_numbers = true, help = distance_help())]
    pub distance: Option<i64>,
    /// hotel, hostel, camping or airbnb
    #[arg(long)]
    pub accommodation: Option<String>,
    /// casual, fine, local or fast
    #[arg(long)]
    pub dining: Option<String>,
    /// Delete the trip again if its preferences cannot be saved
    #[arg(long)]
    pub compensate: bool,
}

/// Show a trip with its preferences and participants
#[derive(Args)]
pub struct ShowTripArgs {
    /// ID of the trip
    pub id: u64,
}

/// Change fields of a trip
#[derive(Args)]
pub struct UpdateTripArgs {
    /// ID of the trip
    pub id: u64,
    #[arg(long, value_parser = non_blank)]
    pub name: Option<String>,
    /// Starting location
    #[arg(long = "from", value_parser = non_blank)]
    pub start_location: Option<String>,
    /// Destination
    #[arg(long = "to", value_parser = non_blank)]
    pub destination: Option<String>,
    #[arg(long)]
    pub start_date: Option<Date>,
    #[arg(long)]
    pub end_date: Option<Date>,
    /// Remove both dates
    #[arg(long, conflicts_with_all = ["start_date", "end_date"])]
    pub clear_dates: bool,
    /// upcoming, in-progress or completed
    #[arg(long)]
    pub status: Option<TripStatus>,
    /// Cover image URL
    #[arg(long)]
    pub thumbnail: Option<String>,
}

impl From<UpdateTripArgs> for UpdateTrip {
    fn from(val: UpdateTripArgs) -> Self {
        let (start_date, end_date) = if val.clear_dates {
            (Some(None), Some(None))
        } else {
            (val.start_date.map(Some), val.end_date.map(Some))
        };
        UpdateTrip {
            name: val.name,
            start_location: val.start_location.map(Some),
            destination: val.destination,
            start_date,
            end_date,
            status: val.status,
            thumbnail_url: val.thumbnail.map(Some),
            user_id: None,
        }
    }
}

/// Delete a trip with its preferences and participants
#[derive(Args)]
pub struct DeleteTripArgs {
    /// ID of the trip
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// List trips
    #[command(aliases = ["l", "ls"])]
    List(ListTripsArgs),
    /// Create a trip
    #[command(alias = "c")]
    Create(CreateTripArgs),
    /// Show a trip
    #[command(alias = "s")]
    Show(ShowTripArgs),
    /// Update a trip
    #[command(alias = "u")]
    Update(UpdateTripArgs),
    /// Delete a trip permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteTripArgs),
}

// ============================================================================
// Preference arguments
// ============================================================================

/// Show the preferences of a trip
#[derive(Args)]
pub struct ShowPrefsArgs {
    /// ID of the trip
    pub trip_id: u64,
}

/// Change the preferences of a trip
#[derive(Args)]
pub struct UpdatePrefsArgs {
    /// ID of the trip
    pub trip_id: u64,
    /// Replace the stop kinds with this comma-separated list
    #[arg(long = "stop", value_delimiter = ',', conflicts_with = "clear_stops")]
    pub stops: Option<Vec<StopPreference>>,
    /// Remove every stop kind
    #[arg(long)]
    pub clear_stops: bool,
    #[arg(
        long,
        help = distance_help(),
        value_parser = clap::value_parser!(u32).range(DISTANCE_MIN..=DISTANCE_MAX)
    )]
    pub distance: Option<u32>,
    #[arg(long)]
    pub accommodation: Option<Accommodation>,
    #[arg(long)]
    pub dining: Option<Dining>,
}

impl From<UpdatePrefsArgs> for UpdateTripPreferences {
    fn from(val: UpdatePrefsArgs) -> Self {
        let stop_preferences = if val.clear_stops {
            Some(Vec::new())
        } else {
            val.stops
        };
        UpdateTripPreferences {
            stop_preferences,
            distance_between_stops: val.distance,
            accommodation: val.accommodation,
            dining: val.dining,
        }
    }
}

#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Show the preferences of a trip
    #[command(alias = "s")]
    Show(ShowPrefsArgs),
    /// Update the preferences of a trip
    #[command(alias = "u")]
    Update(UpdatePrefsArgs),
}

// ============================================================================
// Participant arguments
// ============================================================================

/// List the participants of a trip
#[derive(Args)]
pub struct ListParticipantsArgs {
    /// ID of the trip
    pub trip_id: u64,
}

/// Add a user to a trip
#[derive(Args)]
pub struct AddParticipantArgs {
    /// ID of the trip
    pub trip_id: u64,
    /// User to add
    pub user: String,
    /// owner, admin or member (default)
    #[arg(long)]
    pub role: Option<ParticipantRole>,
}

/// Change the role of a participant
#[derive(Args)]
pub struct ParticipantRoleArgs {
    /// ID of the participant
    pub id: u64,
    /// owner, admin or member
    pub role: ParticipantRole,
}

impl From<ParticipantRoleArgs> for UpdateTripParticipant {
    fn from(val: ParticipantRoleArgs) -> Self {
        UpdateTripParticipant {
            role: Some(val.role),
            ..Default::default()
        }
    }
}

/// Remove a user from a trip
#[derive(Args)]
pub struct RemoveParticipantArgs {
    /// ID of the trip
    pub trip_id: u64,
    /// User to remove
    pub user: String,
}

#[derive(Subcommand)]
pub enum ParticipantCommands {
    /// List the participants of a trip
    #[command(aliases = ["l", "ls"])]
    List(ListParticipantsArgs),
    /// Add a user to a trip
    #[command(alias = "a")]
    Add(AddParticipantArgs),
    /// Change the role of a participant
    #[command(alias = "r")]
    Role(ParticipantRoleArgs),
    /// Remove a user from a trip
    #[command(alias = "rm")]
    Remove(RemoveParticipantArgs),
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs commands against a backend and renders the results.
pub struct Cli<B: Backend> {
    backend: Arc<B>,
    renderer: TerminalRenderer,
    identity: StaticIdentity,
}

impl<B: Backend> Cli<B> {
    pub fn new(backend: B, renderer: TerminalRenderer, identity: StaticIdentity) -> Self {
        Self {
            backend: Arc::new(backend),
            renderer,
            identity,
        }
    }

    pub async fn handle_trip_command(&self, command: TripCommands) -> Result<()> {
        match command {
            TripCommands::List(args) => self.list_trips(&args.into()).await,
            TripCommands::Create(args) => self.create_trip(args).await,
            TripCommands::Show(args) => self.show_trip(args.id).await,
            TripCommands::Update(args) => self.update_trip(args).await,
            TripCommands::Delete(args) => self.delete_trip(args).await,
        }
    }

    pub async fn handle_prefs_command(&self, command: PrefsCommands) -> Result<()> {
        match command {
            PrefsCommands::Show(args) => {
                let preferences = self
                    .backend
                    .get_preferences_by_trip(args.trip_id)
                    .await
                    .with_context(|| format!("Failed to load preferences of trip {}", args.trip_id))?;
                self.renderer.render(&preferences.to_string())
            }
            PrefsCommands::Update(args) => {
                let trip_id = args.trip_id;
                let update = UpdateTripPreferences::from(args);
                if update.is_empty() {
                    bail!("No changes specified for the preferences of trip {trip_id}");
                }
                let preferences = self
                    .backend
                    .update_preferences(trip_id, update)
                    .await
                    .with_context(|| format!("Failed to update preferences of trip {trip_id}"))?;
                self.renderer
                    .render(&UpdateResult::new(preferences).to_string())
            }
        }
    }

    pub async fn handle_participant_command(&self, command: ParticipantCommands) -> Result<()> {
        match command {
            ParticipantCommands::List(args) => {
                let participants = self
                    .backend
                    .get_participants_by_trip(args.trip_id)
                    .await
                    .context("Failed to load participants")?;
                self.renderer
                    .render(&Participants(participants).to_string())
            }
            ParticipantCommands::Add(args) => {
                let participant = self
                    .backend
                    .add_user_to_trip(args.trip_id, &UserId::new(args.user), args.role)
                    .await
                    .with_context(|| format!("Failed to add participant to trip {}", args.trip_id))?;
                self.renderer
                    .render(&CreateResult::new(participant).to_string())
            }
            ParticipantCommands::Role(args) => {
                let id = args.id;
                let participant = self
                    .backend
                    .update_participant(id, args.into())
                    .await
                    .with_context(|| format!("Failed to update participant {id}"))?;
                self.renderer.render(
                    &UpdateResult::with_changes(participant, vec!["role".to_string()]).to_string(),
                )
            }
            ParticipantCommands::Remove(args) => {
                let user_id = UserId::new(args.user);
                self.backend
                    .remove_user_from_trip(args.trip_id, &user_id)
                    .await
                    .with_context(|| format!("Failed to remove {user_id} from trip {}", args.trip_id))?;
                self.renderer.render(
                    &OperationStatus::success(format!(
                        "Removed {user_id} from trip {}",
                        args.trip_id
                    ))
                    .to_string(),
                )
            }
        }
    }

    pub async fn list_trips(&self, query: &TripQuery) -> Result<()> {
        let cards = load_dashboard(self.backend.as_ref(), query)
            .await
            .context("Failed to load trips")?;
        self.renderer.render(&cards.to_string())
    }

    async fn show_trip(&self, id: u64) -> Result<()> {
        let trip = self
            .backend
            .get_trip(id)
            .await
            .with_context(|| format!("Failed to load trip {id}"))?;

        let mut output = trip.to_string();
        output.push('\n');
        match self.backend.get_preferences_by_trip(id).await {
            Ok(preferences) => output.push_str(&preferences.to_string()),
            Err(e) if e.is_not_found() => output.push_str("No preferences saved.\n"),
            Err(e) => return Err(e).context("Failed to load preferences"),
        }

        let participants = self
            .backend
            .get_participants_by_trip(id)
            .await
            .context("Failed to load participants")?;
        output.push_str("\n## Participants\n\n");
        output.push_str(&Participants(participants).to_string());

        self.renderer.render(&output)
    }

    /// Walks the wizard: details, preferences, review, submit.
    async fn create_trip(&self, args: CreateTripArgs) -> Result<()> {
        if self.identity.current_user().is_none() {
            bail!(SIGN_IN_REQUIRED);
        }
        let mut wizard = Wizard::new();

        wizard.set_trip_name(args.name.unwrap_or_default());
        wizard.set_start_location(args.start_location.unwrap_or_default());
        wizard.set_destination(args.destination.unwrap_or_default());
        wizard.set_date_range(args.start_date, args.end_date);
        expect_moved(wizard.advance().await)?;

        for tag in &args.stops {
            wizard.toggle_stop_preference(tag.trim(), true);
        }
        if args.distance.is_some() {
            wizard.set_distance_between_stops(args.distance);
        }
        if args.accommodation.is_some() {
            wizard.set_accommodation(args.accommodation);
        }
        if args.dining.is_some() {
            wizard.set_dining(args.dining);
        }
        expect_moved(wizard.advance().await)?;

        debug!("{}", StepIndicator::new(&wizard));
        self.renderer
            .render(&ReviewSummary(wizard.draft()).to_string())?;
        println!();

        let compensation = if args.compensate {
            CompensationPolicy::DeleteOrphanedTrip
        } else {
            CompensationPolicy::None
        };
        let orchestrator =
            SubmissionOrchestrator::new(Arc::clone(&self.backend)).with_compensation(compensation);
        let notifier = StderrNotifier::new(self.renderer.is_rich());

        match wizard.submit(&self.identity, &orchestrator, &notifier).await {
            Ok(receipt) => self
                .renderer
                .render(&CreateResult::new(receipt).to_string()),
            Err(WizardSubmitError::Rejected(SubmitRejected::AuthenticationRequired)) => {
                Err(anyhow!(SIGN_IN_REQUIRED))
            }
            Err(e) => Err(e).context("Failed to create trip"),
        }
    }

    async fn update_trip(&self, args: UpdateTripArgs) -> Result<()> {
        let id = args.id;
        let update = UpdateTrip::from(args);
        if update.is_empty() {
            bail!("No changes specified for trip {id}");
        }
        let changes = update
            .changed_fields()
            .into_iter()
            .map(|field| format!("Updated {field}"))
            .collect();

        let trip = self
            .backend
            .update_trip(id, update)
            .await
            .with_context(|| format!("Failed to update trip {id}"))?;
        self.renderer
            .render(&UpdateResult::with_changes(trip, changes).to_string())
    }

    async fn delete_trip(&self, args: DeleteTripArgs) -> Result<()> {
        if !args.confirm {
            bail!(
                "Trip deletion requires explicit confirmation. Pass --confirm to delete trip {} permanently.",
                args.id
            );
        }
        let trip = self
            .backend
            .get_trip(args.id)
            .await
            .with_context(|| format!("Failed to load trip {}", args.id))?;
        self.backend
            .delete_trip(trip.id)
            .await
            .with_context(|| format!("Failed to delete trip {}", trip.id))?;
        self.renderer.render(&DeleteResult::new(trip).to_string())
    }
}

/// Turns a blocked wizard step into an error listing its field messages.
fn expect_moved(transition: Transition) -> Result<()> {
    match transition {
        Transition::Moved { .. } => Ok(()),
        Transition::Blocked { step, errors } => bail!("{step}: {errors}"),
        Transition::Unchanged => bail!("The wizard did not move"),
    }
}
