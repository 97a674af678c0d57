//! Trip-creation drafts: the raw form values and their validated snapshot.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{
    Accommodation, Dining, NewTrip, NewTripPreferences, StopPreference, TripStatus, UserId,
    DEFAULT_DISTANCE,
};

/// Optional start and end dates of a trip.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl DateRange {
    pub fn new(from: Option<Date>, to: Option<Date>) -> Self {
        Self { from, to }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Form values as typed by the user, before validation.
///
/// Enumerated fields are kept as text so that an unknown value can be
/// reported instead of silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftInput {
    pub trip_name: String,
    pub start_location: String,
    pub destination: String,
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default)]
    pub stop_preferences: Vec<String>,
    pub distance_between_stops: Option<i64>,
    pub accommodation: Option<String>,
    pub dining: Option<String>,
}

impl Default for DraftInput {
    fn default() -> Self {
        Self {
            trip_name: String::new(),
            start_location: String::new(),
            destination: String::new(),
            date_range: DateRange::default(),
            stop_preferences: Vec::new(),
            distance_between_stops: Some(i64::from(DEFAULT_DISTANCE)),
            accommodation: Some(Accommodation::default().as_str().to_string()),
            dining: Some(Dining::default().as_str().to_string()),
        }
    }
}

impl DraftInput {
    /// Adds or removes a stop tag, keeping each tag at most once.
    ///
    /// Returns true if the list changed.
    pub fn toggle_stop_preference(&mut self, tag: &str, checked: bool) -> bool {
        let present = self.stop_preferences.iter().any(|t| t == tag);
        match (checked, present) {
            (true, false) => {
                self.stop_preferences.push(tag.to_string());
                true
            }
            (false, true) => {
                self.stop_preferences.retain(|t| t != tag);
                true
            }
            _ => false,
        }
    }
}

/// A validated, normalized draft ready for submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripDraft {
    pub trip_name: String,
    pub start_location: String,
    pub destination: String,
    pub date_range: DateRange,
    pub stop_preferences: Vec<StopPreference>,
    pub distance_between_stops: u32,
    pub accommodation: Accommodation,
    pub dining: Dining,
}

impl TripDraft {
    /// Trip record for phase one of a submission.
    pub fn to_new_trip(&self, user_id: &UserId) -> NewTrip {
        NewTrip {
            name: self.trip_name.clone(),
            start_location: Some(self.start_location.clone()),
            destination: self.destination.clone(),
            start_date: self.date_range.from,
            end_date: self.date_range.to,
            status: TripStatus::Upcoming,
            thumbnail_url: None,
            user_id: user_id.clone(),
        }
    }

    /// Preferences record for phase two, referencing the created trip.
    pub fn to_new_preferences(&self, trip_id: u64) -> NewTripPreferences {
        NewTripPreferences {
            trip_id,
            stop_preferences: self.stop_preferences.clone(),
            distance_between_stops: self.distance_between_stops,
            accommodation: self.accommodation,
            dining: self.dining,
        }
    }
}
