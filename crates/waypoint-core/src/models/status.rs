//! Status and role enumerations for trips and participants.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a trip.
///
/// New trips start as [`TripStatus::Upcoming`]; later transitions are managed
/// outside the creation flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TripStatus {
    /// Trip has not started yet
    #[default]
    Upcoming,

    /// Trip is under way
    InProgress,

    /// Trip is over
    Completed,
}

impl FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upcoming" => Ok(TripStatus::Upcoming),
            "in-progress" | "in_progress" | "inprogress" => Ok(TripStatus::InProgress),
            "completed" => Ok(TripStatus::Completed),
            _ => Err(format!("Invalid trip status: {s}")),
        }
    }
}

impl TripStatus {
    /// All statuses in display order.
    pub const ALL: [TripStatus; 3] = [
        TripStatus::Upcoming,
        TripStatus::InProgress,
        TripStatus::Completed,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Upcoming => "upcoming",
            TripStatus::InProgress => "in-progress",
            TripStatus::Completed => "completed",
        }
    }

    /// Human readable label used on trip cards.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::models::TripStatus;
    ///
    /// assert_eq!(TripStatus::InProgress.label(), "In Progress");
    /// ```
    pub fn label(&self) -> &'static str {
        match self {
            TripStatus::Upcoming => "Upcoming",
            TripStatus::InProgress => "In Progress",
            TripStatus::Completed => "Completed",
        }
    }
}

/// Role a user holds on a trip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    /// Created the trip
    Owner,

    /// May manage the trip and its participants
    Admin,

    /// Regular participant
    #[default]
    Member,
}

impl FromStr for ParticipantRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(ParticipantRole::Owner),
            "admin" => Ok(ParticipantRole::Admin),
            "member" => Ok(ParticipantRole::Member),
            _ => Err(format!("Invalid participant role: {s}")),
        }
    }
}

impl ParticipantRole {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Owner => "owner",
            ParticipantRole::Admin => "admin",
            ParticipantRole::Member => "member",
        }
    }
}
