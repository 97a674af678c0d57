//! Trip preferences, stored one-to-one with their trip.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Accommodation, Dining, StopPreference, DEFAULT_DISTANCE};

/// Persisted preferences of a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripPreferences {
    pub id: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// Trip these preferences belong to
    pub trip_id: u64,

    /// Kinds of stops requested, in selection order
    pub stop_preferences: Vec<StopPreference>,

    /// Preferred miles between stops
    pub distance_between_stops: u32,

    pub accommodation: Accommodation,
    pub dining: Dining,
}

/// Values required to insert preferences for a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTripPreferences {
    pub trip_id: u64,
    #[serde(default)]
    pub stop_preferences: Vec<StopPreference>,
    #[serde(default = "default_distance")]
    pub distance_between_stops: u32,
    #[serde(default)]
    pub accommodation: Accommodation,
    #[serde(default)]
    pub dining: Dining,
}

fn default_distance() -> u32 {
    DEFAULT_DISTANCE
}

impl NewTripPreferences {
    /// Preferences for a trip with every field at its default.
    pub fn defaults_for(trip_id: u64) -> Self {
        Self {
            trip_id,
            stop_preferences: Vec::new(),
            distance_between_stops: DEFAULT_DISTANCE,
            accommodation: Accommodation::default(),
            dining: Dining::default(),
        }
    }
}

/// Partial update of trip preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateTripPreferences {
    pub stop_preferences: Option<Vec<StopPreference>>,
    pub distance_between_stops: Option<u32>,
    pub accommodation: Option<Accommodation>,
    pub dining: Option<Dining>,
}

impl UpdateTripPreferences {
    pub fn is_empty(&self) -> bool {
        self == &UpdateTripPreferences::default()
    }

    /// Applies the update to existing preferences in place.
    pub fn apply_to(&self, preferences: &mut TripPreferences) {
        if let Some(stops) = &self.stop_preferences {
            preferences.stop_preferences.clone_from(stops);
        }
        if let Some(distance) = self.distance_between_stops {
            preferences.distance_between_stops = distance;
        }
        if let Some(accommodation) = self.accommodation {
            preferences.accommodation = accommodation;
        }
        if let Some(dining) = self.dining {
            preferences.dining = dining;
        }
    }
}
