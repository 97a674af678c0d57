//! Trip participants and user identifiers.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::ParticipantRole;

/// Identifier issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Membership of a user in a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripParticipant {
    pub id: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub trip_id: u64,
    pub user_id: UserId,
    #[serde(default)]
    pub role: ParticipantRole,
}

/// Values required to add a participant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTripParticipant {
    pub trip_id: u64,
    pub user_id: UserId,
    #[serde(default)]
    pub role: ParticipantRole,
}

/// Partial update of a participant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateTripParticipant {
    pub trip_id: Option<u64>,
    pub user_id: Option<UserId>,
    pub role: Option<ParticipantRole>,
}

impl UpdateTripParticipant {
    pub fn apply_to(&self, participant: &mut TripParticipant) {
        if let Some(trip_id) = self.trip_id {
            participant.trip_id = trip_id;
        }
        if let Some(user_id) = &self.user_id {
            participant.user_id.clone_from(user_id);
        }
        if let Some(role) = self.role {
            participant.role = role;
        }
    }
}
