//! Display implementations for domain models.
//!
//! Records render as markdown for the terminal: a heading, a metadata list
//! and optional sections.

use std::fmt;

use super::datetime::{DateSpan, LocalDateTime};
use crate::{
    dashboard::TripCard,
    models::{
        Accommodation, Dining, ParticipantRole, StopPreference, Trip, TripParticipant,
        TripPreferences, TripStatus,
    },
};

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StopPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Accommodation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Dining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status.label())?;
        if let Some(from) = &self.start_location {
            writeln!(f, "- From: {from}")?;
        }
        writeln!(f, "- To: {}", self.destination)?;
        writeln!(f, "- Dates: {}", DateSpan::new(self.start_date, self.end_date))?;
        writeln!(f, "- Owner: {}", self.user_id)?;
        if let Some(url) = &self.thumbnail_url {
            writeln!(f, "- Thumbnail: {url}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))
    }
}

impl fmt::Display for TripPreferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Preferences for trip {}", self.trip_id)?;
        writeln!(f)?;

        if self.stop_preferences.is_empty() {
            writeln!(f, "- Stops: No preferences selected")?;
        } else {
            let labels: Vec<&str> = self.stop_preferences.iter().map(|s| s.label()).collect();
            writeln!(f, "- Stops: {}", labels.join(", "))?;
        }
        writeln!(
            f,
            "- Distance between stops: {} miles",
            self.distance_between_stops
        )?;
        writeln!(f, "- Accommodation: {}", self.accommodation)?;
        writeln!(f, "- Dining: {}", self.dining)
    }
}

impl fmt::Display for TripParticipant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- {} ({}, ID: {})", self.user_id, self.role, self.id)
    }
}

impl fmt::Display for TripCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trip = &self.trip;
        writeln!(f, "## {} (ID: {})", trip.name, trip.id)?;
        writeln!(f)?;

        writeln!(f, "- **Destination**: {}", trip.destination)?;
        writeln!(
            f,
            "- **Dates**: {}",
            DateSpan::new(trip.start_date, trip.end_date)
        )?;
        writeln!(f, "- **Status**: {}", trip.status.label())?;
        if !self.participants.is_empty() {
            let names: Vec<&str> = self
                .participants
                .iter()
                .map(|p| p.user_id.as_str())
                .collect();
            writeln!(f, "- **Participants**: {}", names.join(", "))?;
        }
        writeln!(f)
    }
}
