//! Core library for the Waypoint trip planner.
//!
//! The crate holds the trip creation flow and the data it writes:
//!
//! - **Validation** ([`validation`]): field rules for a trip draft, runnable
//!   on any subset of fields
//! - **Wizard** ([`wizard`]): the three-step creation state machine
//! - **Submission** ([`submission`]): the two-phase write of a trip and its
//!   preferences
//! - **Backend** ([`backend`]): asynchronous CRUD over trips, preferences and
//!   participants, backed by SQLite ([`db`]) or memory
//! - **Display** ([`display`]): markdown formatting for the terminal
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use waypoint_core::{
//!     BackendBuilder, LogNotifier, StaticIdentity, SubmissionOrchestrator, Wizard,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(
//!     BackendBuilder::new()
//!         .with_database_path(Some("trips.db"))
//!         .build()
//!         .await?,
//! );
//! let orchestrator = SubmissionOrchestrator::new(backend);
//!
//! let mut wizard = Wizard::new();
//! wizard.set_trip_name("Coast Run");
//! wizard.set_start_location("LA");
//! wizard.set_destination("SF");
//! wizard.toggle_stop_preference("scenic", true);
//! wizard.advance().await;
//! wizard.advance().await;
//!
//! let receipt = wizard
//!     .submit(&StaticIdentity::new("ann"), &orchestrator, &LogNotifier)
//!     .await?;
//! println!("Created trip {}", receipt.trip_id());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod dashboard;
pub mod db;
pub mod display;
pub mod error;
pub mod identity;
pub mod models;
pub mod notify;
pub mod submission;
pub mod validation;
pub mod wizard;

// Re-export commonly used types
pub use backend::{Backend, BackendBuilder, MemoryBackend, SqliteBackend};
pub use dashboard::{load_dashboard, StatusFilter, TripCard, TripQuery, TripSort};
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, OperationStatus, Participants, ReviewSummary, StepIndicator,
    TripCards, UpdateResult,
};
pub use error::{BackendError, BackendOperation, Result, SubmitError};
pub use identity::{IdentityProvider, StaticIdentity};
pub use models::{
    DraftInput, ParticipantRole, Trip, TripDraft, TripParticipant, TripPreferences, TripStatus,
    UserId,
};
pub use notify::{LogNotifier, Notification, Notifier, Severity};
pub use submission::{CompensationPolicy, SubmissionOrchestrator, SubmissionReceipt};
pub use validation::{DraftValidator, Field, TripSchema, ValidationErrors};
pub use wizard::{SubmitRejected, Transition, Wizard, WizardStep, WizardSubmitError};
