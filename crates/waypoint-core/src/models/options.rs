//! Fixed option sets offered by the trip preferences step.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lower bound of the distance between stops, in miles.
pub const DISTANCE_MIN: i64 = 0;
/// Upper bound of the distance between stops, in miles.
pub const DISTANCE_MAX: i64 = 200;
/// Granularity offered when choosing a distance.
pub const DISTANCE_STEP: i64 = 10;
/// Distance used when none was chosen.
pub const DEFAULT_DISTANCE: u32 = 50;

/// Kind of stop a traveller wants along the route.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum StopPreference {
    Scenic,
    Nature,
    Adventure,
    Historical,
    Luxury,
}

impl StopPreference {
    /// Every tag, in the order the preferences step lists them.
    pub const ALL: [StopPreference; 5] = [
        StopPreference::Scenic,
        StopPreference::Nature,
        StopPreference::Adventure,
        StopPreference::Historical,
        StopPreference::Luxury,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StopPreference::Scenic => "scenic",
            StopPreference::Nature => "nature",
            StopPreference::Adventure => "adventure",
            StopPreference::Historical => "historical",
            StopPreference::Luxury => "luxury",
        }
    }

    /// Checkbox label shown next to the tag.
    pub fn label(&self) -> &'static str {
        match self {
            StopPreference::Scenic => "Scenic Routes",
            StopPreference::Nature => "Nature Spots",
            StopPreference::Adventure => "Adventure Activities",
            StopPreference::Historical => "Historical Sites",
            StopPreference::Luxury => "Luxury Experiences",
        }
    }
}

impl FromStr for StopPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StopPreference::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Invalid stop preference: {s}"))
    }
}

/// Where the travellers want to sleep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Accommodation {
    #[default]
    Hotel,
    Hostel,
    Camping,
    Airbnb,
}

impl Accommodation {
    pub const ALL: [Accommodation; 4] = [
        Accommodation::Hotel,
        Accommodation::Hostel,
        Accommodation::Camping,
        Accommodation::Airbnb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Accommodation::Hotel => "hotel",
            Accommodation::Hostel => "hostel",
            Accommodation::Camping => "camping",
            Accommodation::Airbnb => "airbnb",
        }
    }
}

impl FromStr for Accommodation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Accommodation::ALL
            .into_iter()
            .find(|value| value.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Invalid accommodation: {s}"))
    }
}

/// Preferred style of food along the way.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dining {
    #[default]
    Casual,
    Fine,
    Local,
    Fast,
}

impl Dining {
    pub const ALL: [Dining; 4] = [Dining::Casual, Dining::Fine, Dining::Local, Dining::Fast];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dining::Casual => "casual",
            Dining::Fine => "fine",
            Dining::Local => "local",
            Dining::Fast => "fast",
        }
    }
}

impl FromStr for Dining {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dining::ALL
            .into_iter()
            .find(|value| value.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Invalid dining option: {s}"))
    }
}
