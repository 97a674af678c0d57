//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::{dashboard::TripCard, models::TripParticipant};

/// Newtype wrapper for the cards of the trip overview.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::display::TripCards;
///
/// let cards = TripCards(vec![]);
/// assert_eq!(cards.to_string(), "No trips found.\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripCards(pub Vec<TripCard>);

impl TripCards {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&TripCard> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripCard> {
        self.0.iter()
    }
}

impl Index<usize> for TripCards {
    type Output = TripCard;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for TripCards {
    type Item = TripCard;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TripCards {
    type Item = &'a TripCard;
    type IntoIter = std::slice::Iter<'a, TripCard>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TripCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No trips found.")
        } else {
            for card in &self.0 {
                write!(f, "{card}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for the participants of a trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Participants(pub Vec<TripParticipant>);

impl Participants {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripParticipant> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Participants {
    type Item = &'a TripParticipant;
    type IntoIter = std::slice::Iter<'a, TripParticipant>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Participants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No participants found.")
        } else {
            for participant in &self.0 {
                write!(f, "{participant}")?;
            }
            Ok(())
        }
    }
}
