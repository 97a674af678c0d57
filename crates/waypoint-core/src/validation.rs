//! Validation schema for trip-creation drafts.
//!
//! [`TripSchema`] checks a [`DraftInput`] field by field. It can validate any
//! subset of fields (the wizard validates one step at a time) or normalize
//! the whole draft into a [`TripDraft`] with defaults applied.
//!
//! ```rust
//! use waypoint_core::validation::{Field, TripSchema, ValidationErrorKind};
//! use waypoint_core::models::DraftInput;
//!
//! let draft = DraftInput {
//!     trip_name: "Coast Run".to_string(),
//!     ..Default::default()
//! };
//! let errors = TripSchema
//!     .validate_fields(&draft, &[Field::TripName, Field::Destination])
//!     .unwrap_err();
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors.get(Field::Destination).unwrap().kind, ValidationErrorKind::RequiredField);
//! ```

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Accommodation, Dining, DraftInput, StopPreference, TripDraft, DEFAULT_DISTANCE, DISTANCE_MAX,
    DISTANCE_MIN,
};

/// Every field of the trip-creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    TripName,
    StartLocation,
    Destination,
    DateRange,
    StopPreferences,
    DistanceBetweenStops,
    Accommodation,
    Dining,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::TripName,
        Field::StartLocation,
        Field::Destination,
        Field::DateRange,
        Field::StopPreferences,
        Field::DistanceBetweenStops,
        Field::Accommodation,
        Field::Dining,
    ];

    /// Identifier of the field in serialized drafts.
    pub fn name(&self) -> &'static str {
        match self {
            Field::TripName => "trip_name",
            Field::StartLocation => "start_location",
            Field::Destination => "destination",
            Field::DateRange => "date_range",
            Field::StopPreferences => "stop_preferences",
            Field::DistanceBetweenStops => "distance_between_stops",
            Field::Accommodation => "accommodation",
            Field::Dining => "dining",
        }
    }

    /// Form label of the field.
    pub fn label(&self) -> &'static str {
        match self {
            Field::TripName => "Trip Name",
            Field::StartLocation => "Starting Location",
            Field::Destination => "Destination",
            Field::DateRange => "Trip Dates",
            Field::StopPreferences => "Stop Preferences",
            Field::DistanceBetweenStops => "Distance Between Stops",
            Field::Accommodation => "Accommodation",
            Field::Dining => "Dining",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What is wrong with a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required text field is empty
    RequiredField,
    /// A number falls outside its allowed range
    Range { min: i64, max: i64, value: i64 },
    /// A value is not one of the listed options
    InvalidEnum {
        value: String,
        allowed: Vec<&'static str>,
    },
    /// The end date precedes the start date
    DateOrder,
}

/// Validation failure of a single field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FieldError {
    pub field: Field,
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl FieldError {
    fn required(field: Field) -> Self {
        let message = match field {
            Field::TripName => "Trip name is required".to_string(),
            Field::StartLocation => "Starting location is required".to_string(),
            Field::Destination => "Destination is required".to_string(),
            other => format!("{} is required", other.label()),
        };
        Self {
            field,
            kind: ValidationErrorKind::RequiredField,
            message,
        }
    }

    fn range(field: Field, value: i64) -> Self {
        Self {
            field,
            kind: ValidationErrorKind::Range {
                min: DISTANCE_MIN,
                max: DISTANCE_MAX,
                value,
            },
            message: format!(
                "{} must be between {DISTANCE_MIN} and {DISTANCE_MAX} miles (got {value})",
                field.label()
            ),
        }
    }

    fn invalid_enum(field: Field, value: &str, allowed: Vec<&'static str>) -> Self {
        let message = format!(
            "{} must be one of: {} (got '{value}')",
            field.label(),
            allowed.join(", ")
        );
        Self {
            field,
            kind: ValidationErrorKind::InvalidEnum {
                value: value.to_string(),
                allowed,
            },
            message,
        }
    }

    fn date_order() -> Self {
        Self {
            field: Field::DateRange,
            kind: ValidationErrorKind::DateOrder,
            message: "End date must not be before the start date".to_string(),
        }
    }
}

/// Field-level errors of a validation run, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Error recorded for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Records an error, replacing any earlier error for the same field.
    pub fn push(&mut self, error: FieldError) {
        self.remove(error.field);
        self.0.push(error);
    }

    /// Drops the error for `field`; returns true if one was present.
    pub fn remove(&mut self, field: Field) -> bool {
        let before = self.0.len();
        self.0.retain(|e| e.field != field);
        before != self.0.len()
    }

    /// Keeps only errors for the given fields.
    pub fn restricted_to(&self, fields: &[Field]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|e| fields.contains(&e.field))
                .cloned()
                .collect(),
        )
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Validation seam used by the wizard.
///
/// Both methods may suspend so that implementations can run asynchronous
/// cross-field checks.
#[async_trait]
pub trait DraftValidator: Send + Sync {
    /// Validates only `fields`, leaving every other field unchecked.
    async fn validate(&self, draft: &DraftInput, fields: &[Field]) -> Result<(), ValidationErrors>;

    /// Validates the whole draft and applies defaults.
    async fn normalize(&self, draft: &DraftInput) -> Result<TripDraft, ValidationErrors>;
}

/// The declarative rules of the trip-creation form.
#[derive(Debug, Clone, Copy, Default)]
pub struct TripSchema;

impl TripSchema {
    /// Validates the named fields of `draft`.
    pub fn validate_fields(
        &self,
        draft: &DraftInput,
        fields: &[Field],
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for field in fields {
            if let Some(error) = Self::check(draft, *field) {
                errors.push(error);
            }
        }
        errors.into_result()
    }

    /// Validates every field and returns the normalized draft.
    pub fn normalize(&self, draft: &DraftInput) -> Result<TripDraft, ValidationErrors> {
        self.validate_fields(draft, &Field::ALL)?;

        let mut stop_preferences: Vec<StopPreference> = Vec::new();
        for tag in &draft.stop_preferences {
            // checked above
            if let Ok(tag) = tag.parse::<StopPreference>() {
                if !stop_preferences.contains(&tag) {
                    stop_preferences.push(tag);
                }
            }
        }

        let distance_between_stops = draft
            .distance_between_stops
            .and_then(|d| u32::try_from(d).ok())
            .unwrap_or(DEFAULT_DISTANCE);

        Ok(TripDraft {
            trip_name: draft.trip_name.trim().to_string(),
            start_location: draft.start_location.trim().to_string(),
            destination: draft.destination.trim().to_string(),
            date_range: draft.date_range,
            stop_preferences,
            distance_between_stops,
            accommodation: parse_or_default(draft.accommodation.as_deref()),
            dining: parse_or_default(draft.dining.as_deref()),
        })
    }

    fn check(draft: &DraftInput, field: Field) -> Option<FieldError> {
        match field {
            Field::TripName => required(field, &draft.trip_name),
            Field::StartLocation => required(field, &draft.start_location),
            Field::Destination => required(field, &draft.destination),
            Field::DateRange => match (draft.date_range.from, draft.date_range.to) {
                (Some(from), Some(to)) if to < from => Some(FieldError::date_order()),
                _ => None,
            },
            Field::StopPreferences => draft
                .stop_preferences
                .iter()
                .find(|tag| tag.parse::<StopPreference>().is_err())
                .map(|tag| {
                    FieldError::invalid_enum(
                        field,
                        tag,
                        StopPreference::ALL.iter().map(StopPreference::as_str).collect(),
                    )
                }),
            Field::DistanceBetweenStops => draft
                .distance_between_stops
                .filter(|d| !(DISTANCE_MIN..=DISTANCE_MAX).contains(d))
                .map(|d| FieldError::range(field, d)),
            Field::Accommodation => draft
                .accommodation
                .as_deref()
                .filter(|value| value.parse::<Accommodation>().is_err())
                .map(|value| {
                    FieldError::invalid_enum(
                        field,
                        value,
                        Accommodation::ALL.iter().map(Accommodation::as_str).collect(),
                    )
                }),
            Field::Dining => draft
                .dining
                .as_deref()
                .filter(|value| value.parse::<Dining>().is_err())
                .map(|value| {
                    FieldError::invalid_enum(
                        field,
                        value,
                        Dining::ALL.iter().map(Dining::as_str).collect(),
                    )
                }),
        }
    }
}

fn required(field: Field, value: &str) -> Option<FieldError> {
    value
        .trim()
        .is_empty()
        .then(|| FieldError::required(field))
}

fn parse_or_default<T>(value: Option<&str>) -> T
where
    T: std::str::FromStr + Default,
{
    value.and_then(|v| v.parse().ok()).unwrap_or_default()
}

#[async_trait]
impl DraftValidator for TripSchema {
    async fn validate(&self, draft: &DraftInput, fields: &[Field]) -> Result<(), ValidationErrors> {
        self.validate_fields(draft, fields)
    }

    async fn normalize(&self, draft: &DraftInput) -> Result<TripDraft, ValidationErrors> {
        TripSchema::normalize(self, draft)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::DateRange;

    fn valid_draft() -> DraftInput {
        DraftInput {
            trip_name: "Coast Run".to_string(),
            start_location: "LA".to_string(),
            destination: "SF".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_text_fields_are_required() {
        let errors = TripSchema
            .validate_fields(
                &DraftInput::default(),
                &[Field::TripName, Field::StartLocation, Field::Destination],
            )
            .unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::TripName).unwrap().message, "Trip name is required");
        assert_eq!(
            errors.get(Field::StartLocation).unwrap().message,
            "Starting location is required"
        );
        assert_eq!(errors.get(Field::Destination).unwrap().message, "Destination is required");
    }

    #[test]
    fn test_whitespace_only_text_is_rejected() {
        let draft = DraftInput {
            trip_name: "   ".to_string(),
            ..valid_draft()
        };
        let errors = TripSchema.validate_fields(&draft, &[Field::TripName]).unwrap_err();
        assert_eq!(errors.get(Field::TripName).unwrap().kind, ValidationErrorKind::RequiredField);
    }

    #[test]
    fn test_distance_bounds() {
        for accepted in [0, 50, 200] {
            let draft = DraftInput {
                distance_between_stops: Some(accepted),
                ..valid_draft()
            };
            assert!(
                TripSchema
                    .validate_fields(&draft, &[Field::DistanceBetweenStops])
                    .is_ok(),
                "{accepted} should be accepted"
            );
        }

        for rejected in [-10, 210] {
            let draft = DraftInput {
                distance_between_stops: Some(rejected),
                ..valid_draft()
            };
            let errors = TripSchema
                .validate_fields(&draft, &[Field::DistanceBetweenStops])
                .unwrap_err();
            assert_eq!(
                errors.get(Field::DistanceBetweenStops).unwrap().kind,
                ValidationErrorKind::Range {
                    min: 0,
                    max: 200,
                    value: rejected
                }
            );
        }
    }

    #[test]
    fn test_invalid_enum_values() {
        let draft = DraftInput {
            accommodation: Some("castle".to_string()),
            dining: Some("buffet".to_string()),
            stop_preferences: vec!["scenic".to_string(), "spa".to_string()],
            ..valid_draft()
        };
        let errors = TripSchema
            .validate_fields(&draft, &[Field::StopPreferences, Field::Accommodation, Field::Dining])
            .unwrap_err();

        assert_eq!(errors.len(), 3);
        match &errors.get(Field::Accommodation).unwrap().kind {
            ValidationErrorKind::InvalidEnum { value, allowed } => {
                assert_eq!(value, "castle");
                assert_eq!(allowed, &vec!["hotel", "hostel", "camping", "airbnb"]);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
        match &errors.get(Field::StopPreferences).unwrap().kind {
            ValidationErrorKind::InvalidEnum { value, .. } => assert_eq!(value, "spa"),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_partial_validation_ignores_untouched_fields() {
        let draft = DraftInput {
            distance_between_stops: Some(500),
            ..DraftInput::default()
        };
        assert!(TripSchema
            .validate_fields(&draft, &[Field::Accommodation, Field::Dining])
            .is_ok());
        assert!(TripSchema.validate_fields(&draft, &[]).is_ok());
    }

    #[test]
    fn test_date_order() {
        let draft = DraftInput {
            date_range: DateRange::new(Some(date(2025, 5, 10)), Some(date(2025, 5, 1))),
            ..valid_draft()
        };
        let errors = TripSchema.validate_fields(&draft, &[Field::DateRange]).unwrap_err();
        assert_eq!(errors.get(Field::DateRange).unwrap().kind, ValidationErrorKind::DateOrder);

        let open_ended = DraftInput {
            date_range: DateRange::new(None, Some(date(2025, 5, 1))),
            ..valid_draft()
        };
        assert!(TripSchema.validate_fields(&open_ended, &[Field::DateRange]).is_ok());
    }

    #[test]
    fn test_normalize_applies_defaults() {
        let draft = DraftInput {
            trip_name: "  Coast Run ".to_string(),
            distance_between_stops: None,
            accommodation: None,
            dining: None,
            stop_preferences: vec![
                "scenic".to_string(),
                "nature".to_string(),
                "scenic".to_string(),
            ],
            ..valid_draft()
        };

        let normalized = TripSchema.normalize(&draft).unwrap();

        assert_eq!(normalized.trip_name, "Coast Run");
        assert_eq!(normalized.distance_between_stops, 50);
        assert_eq!(normalized.accommodation, Accommodation::Hotel);
        assert_eq!(normalized.dining, Dining::Casual);
        assert_eq!(
            normalized.stop_preferences,
            vec![StopPreference::Scenic, StopPreference::Nature]
        );
    }

    #[test]
    fn test_normalize_reports_every_invalid_field() {
        let draft = DraftInput {
            distance_between_stops: Some(-10),
            ..DraftInput::default()
        };
        let errors = TripSchema.normalize(&draft).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(Field::DistanceBetweenStops));
    }

    #[test]
    fn test_push_replaces_error_for_same_field() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldError::required(Field::TripName));
        errors.push(FieldError::required(Field::TripName));
        assert_eq!(errors.len(), 1);
        assert!(errors.remove(Field::TripName));
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn test_validator_trait_delegates_to_schema() {
        let validator: &dyn DraftValidator = &TripSchema;
        assert!(validator.validate(&valid_draft(), &Field::ALL).await.is_ok());
        let draft = validator.normalize(&valid_draft()).await.unwrap();
        assert_eq!(draft.destination, "SF");
    }
}
