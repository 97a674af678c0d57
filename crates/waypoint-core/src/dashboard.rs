//! Trip overview: search, status filter and sort over all trips.

use std::{cmp::Ordering, collections::HashMap, str::FromStr};

use log::debug;

use crate::{
    backend::Backend,
    display::TripCards,
    error::Result,
    models::{Trip, TripParticipant, TripStatus},
};

/// Which trips to show by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TripStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: TripStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

/// Card ordering. Dates refer to the trip's start date; undated trips always
/// come last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripSort {
    /// Newest first
    #[default]
    DateDesc,
    /// Oldest first
    DateAsc,
    NameAsc,
    NameDesc,
}

impl TripSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripSort::DateDesc => "date-desc",
            TripSort::DateAsc => "date-asc",
            TripSort::NameAsc => "name-asc",
            TripSort::NameDesc => "name-desc",
        }
    }

    fn compare(&self, a: &Trip, b: &Trip) -> Ordering {
        let by_date = |a: &Trip, b: &Trip| match (a.start_date, b.start_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        let by_name = |a: &Trip, b: &Trip| a.name.to_lowercase().cmp(&b.name.to_lowercase());

        let ordering = match self {
            TripSort::DateAsc => by_date(a, b),
            TripSort::DateDesc => match (a.start_date, b.start_date) {
                (Some(x), Some(y)) => y.cmp(&x),
                _ => by_date(a, b),
            },
            TripSort::NameAsc => by_name(a, b),
            TripSort::NameDesc => by_name(b, a),
        };
        ordering.then(a.id.cmp(&b.id))
    }
}

impl FromStr for TripSort {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date-desc" => Ok(TripSort::DateDesc),
            "date-asc" => Ok(TripSort::DateAsc),
            "name-asc" => Ok(TripSort::NameAsc),
            "name-desc" => Ok(TripSort::NameDesc),
            _ => Err(format!("Invalid sort order: {s}")),
        }
    }
}

/// Dashboard criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripQuery {
    /// Case-insensitive text matched against name, start and destination
    pub search: Option<String>,
    pub status: StatusFilter,
    pub sort: TripSort,
}

impl TripQuery {
    fn matches(&self, trip: &Trip) -> bool {
        if !self.status.matches(trip.status) {
            return false;
        }
        let needle = match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => needle.to_lowercase(),
            _ => return true,
        };
        [
            Some(trip.name.as_str()),
            trip.start_location.as_deref(),
            Some(trip.destination.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|text| text.to_lowercase().contains(&needle))
    }
}

/// A trip together with the people on it.
#[derive(Debug, Clone, PartialEq)]
pub struct TripCard {
    pub trip: Trip,
    pub participants: Vec<TripParticipant>,
}

/// Loads, filters and orders the trip cards matching `query`.
pub async fn load_dashboard<B: Backend + ?Sized>(
    backend: &B,
    query: &TripQuery,
) -> Result<TripCards> {
    let trips = backend.get_all_trips().await?;
    let mut participants: HashMap<u64, Vec<TripParticipant>> = HashMap::new();
    for participant in backend.get_all_participants().await? {
        participants
            .entry(participant.trip_id)
            .or_default()
            .push(participant);
    }

    let mut cards: Vec<TripCard> = trips
        .into_iter()
        .filter(|trip| query.matches(trip))
        .map(|trip| TripCard {
            participants: participants.remove(&trip.id).unwrap_or_default(),
            trip,
        })
        .collect();
    cards.sort_by(|a, b| query.sort.compare(&a.trip, &b.trip));

    debug!("Dashboard query {query:?} matched {} trips", cards.len());
    Ok(TripCards(cards))
}
