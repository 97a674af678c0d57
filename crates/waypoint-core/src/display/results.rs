//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create,
//! update and delete operations with consistent messaging.

use std::fmt;

use crate::{
    models::{Trip, TripParticipant, TripPreferences},
    submission::SubmissionReceipt,
};

/// A record the result wrappers can name in their headline.
pub trait Resource: fmt::Display {
    /// Lowercase noun used in messages
    const KIND: &'static str;

    fn id(&self) -> u64;
}

impl Resource for Trip {
    const KIND: &'static str = "trip";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for TripPreferences {
    const KIND: &'static str = "preferences";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for TripParticipant {
    const KIND: &'static str = "participant";

    fn id(&self) -> u64 {
        self.id
    }
}

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::{
///     display::CreateResult,
///     models::{Trip, TripStatus, UserId},
/// };
/// use jiff::Timestamp;
///
/// let trip = Trip {
///     id: 1,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     name: "Coast Run".to_string(),
///     start_location: Some("LA".to_string()),
///     destination: "SF".to_string(),
///     start_date: None,
///     end_date: None,
///     status: TripStatus::Upcoming,
///     thumbnail_url: None,
///     user_id: UserId::new("ann"),
/// };
///
/// let output = CreateResult::new(trip).to_string();
/// assert!(output.starts_with("Created trip with ID: 1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} with ID: {}", T::KIND, self.resource.id())?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of the creation wizard: the trip and its preferences.
impl fmt::Display for CreateResult<SubmissionReceipt> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let receipt = &self.resource;
        writeln!(f, "Created trip with ID: {}", receipt.trip_id())?;
        writeln!(f)?;
        write!(f, "{}", receipt.trip)?;
        writeln!(f)?;
        write!(f, "{}", receipt.preferences)
    }
}

/// Wrapper type for displaying the result of update operations, with the
/// list of changed fields.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: Resource> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated {} with ID: {}", T::KIND, self.resource.id())?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted trip '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<TripPreferences> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted preferences of trip {}", self.resource.trip_id)
    }
}

impl fmt::Display for DeleteResult<TripParticipant> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Removed {} from trip {}",
            self.resource.user_id, self.resource.trip_id
        )
    }
}
