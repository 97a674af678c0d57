//! Data models for trips, their preferences and participants.
//!
//! Persisted records ([`Trip`], [`TripPreferences`], [`TripParticipant`]) come
//! with `New*` insert shapes and `Update*` partial-update shapes. The creation
//! wizard works on [`DraftInput`] and hands a validated [`TripDraft`] to the
//! submission orchestrator.
//!
//! Display implementations live in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::models::{DraftInput, StopPreference};
//!
//! let mut draft = DraftInput::default();
//! draft.toggle_stop_preference(StopPreference::Nature.as_str(), true);
//! draft.toggle_stop_preference(StopPreference::Nature.as_str(), false);
//! assert!(draft.stop_preferences.is_empty());
//! ```

pub mod draft;
pub mod options;
pub mod participant;
pub mod preferences;
pub mod status;
pub mod trip;

#[cfg(test)]
mod tests;

pub use draft::{DateRange, DraftInput, TripDraft};
pub use options::{
    Accommodation, Dining, StopPreference, DEFAULT_DISTANCE, DISTANCE_MAX, DISTANCE_MIN,
    DISTANCE_STEP,
};
pub use participant::{NewTripParticipant, TripParticipant, UpdateTripParticipant, UserId};
pub use preferences::{NewTripPreferences, TripPreferences, UpdateTripPreferences};
pub use status::{ParticipantRole, TripStatus};
pub use trip::{NewTrip, Trip, UpdateTrip};
