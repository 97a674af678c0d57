use jiff::{civil::date, Timestamp};

use super::*;

fn sample_trip() -> Trip {
    Trip {
        id: 1,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        name: "Grand Canyon Adventure".to_string(),
        start_location: Some("Phoenix".to_string()),
        destination: "Grand Canyon, Arizona".to_string(),
        start_date: Some(date(2024, 6, 15)),
        end_date: Some(date(2024, 6, 22)),
        status: TripStatus::Upcoming,
        thumbnail_url: None,
        user_id: UserId::new("user-1"),
    }
}

#[test]
fn test_trip_status_round_trips_through_str() {
    for status in TripStatus::ALL {
        assert_eq!(status.as_str().parse::<TripStatus>(), Ok(status));
    }
    assert_eq!("in_progress".parse::<TripStatus>(), Ok(TripStatus::InProgress));
    assert!("cancelled".parse::<TripStatus>().is_err());
}

#[test]
fn test_trip_status_serializes_kebab_case() {
    let json = serde_json::to_string(&TripStatus::InProgress).unwrap();
    assert_eq!(json, "\"in-progress\"");
}

#[test]
fn test_participant_role_defaults_to_member() {
    assert_eq!(ParticipantRole::default(), ParticipantRole::Member);
    assert_eq!("ADMIN".parse::<ParticipantRole>(), Ok(ParticipantRole::Admin));
    assert!("guest".parse::<ParticipantRole>().is_err());
}

#[test]
fn test_option_sets_parse_their_own_names() {
    for tag in StopPreference::ALL {
        assert_eq!(tag.as_str().parse::<StopPreference>(), Ok(tag));
    }
    for value in Accommodation::ALL {
        assert_eq!(value.as_str().parse::<Accommodation>(), Ok(value));
    }
    for value in Dining::ALL {
        assert_eq!(value.as_str().parse::<Dining>(), Ok(value));
    }
    assert!("spa".parse::<StopPreference>().is_err());
    assert!("castle".parse::<Accommodation>().is_err());
}

#[test]
fn test_draft_defaults_match_form_defaults() {
    let draft = DraftInput::default();
    assert!(draft.trip_name.is_empty());
    assert!(draft.date_range.is_empty());
    assert!(draft.stop_preferences.is_empty());
    assert_eq!(draft.distance_between_stops, Some(50));
    assert_eq!(draft.accommodation.as_deref(), Some("hotel"));
    assert_eq!(draft.dining.as_deref(), Some("casual"));
}

#[test]
fn test_toggle_stop_preference_on_then_off_is_identity() {
    let mut draft = DraftInput {
        stop_preferences: vec!["scenic".to_string()],
        ..Default::default()
    };
    let original = draft.stop_preferences.clone();

    assert!(draft.toggle_stop_preference("nature", true));
    assert_eq!(draft.stop_preferences, vec!["scenic", "nature"]);
    assert!(draft.toggle_stop_preference("nature", false));

    assert_eq!(draft.stop_preferences, original);
}

#[test]
fn test_toggle_stop_preference_never_duplicates() {
    let mut draft = DraftInput::default();
    assert!(draft.toggle_stop_preference("luxury", true));
    assert!(!draft.toggle_stop_preference("luxury", true));
    assert_eq!(draft.stop_preferences, vec!["luxury"]);
    assert!(!draft.toggle_stop_preference("scenic", false));
}

#[test]
fn test_update_trip_applies_only_set_fields() {
    let mut trip = sample_trip();
    let update = UpdateTrip {
        name: Some("Canyon Loop".to_string()),
        end_date: Some(None),
        status: Some(TripStatus::Completed),
        ..Default::default()
    };

    update.apply_to(&mut trip);

    assert_eq!(trip.name, "Canyon Loop");
    assert_eq!(trip.destination, "Grand Canyon, Arizona");
    assert_eq!(trip.start_date, Some(date(2024, 6, 15)));
    assert_eq!(trip.end_date, None);
    assert_eq!(trip.status, TripStatus::Completed);
    assert_eq!(update.changed_fields(), vec!["name", "end date", "status"]);
    assert!(UpdateTrip::default().is_empty());
}

#[test]
fn test_trip_draft_conversions() {
    let draft = TripDraft {
        trip_name: "Coast Run".to_string(),
        start_location: "LA".to_string(),
        destination: "SF".to_string(),
        date_range: DateRange::new(Some(date(2025, 3, 1)), None),
        stop_preferences: vec![StopPreference::Scenic],
        distance_between_stops: 50,
        accommodation: Accommodation::Hotel,
        dining: Dining::Casual,
    };
    let user = UserId::new("u-42");

    let trip = draft.to_new_trip(&user);
    assert_eq!(trip.name, "Coast Run");
    assert_eq!(trip.start_location.as_deref(), Some("LA"));
    assert_eq!(trip.status, TripStatus::Upcoming);
    assert_eq!(trip.start_date, Some(date(2025, 3, 1)));
    assert_eq!(trip.user_id, user);

    let prefs = draft.to_new_preferences(7);
    assert_eq!(prefs.trip_id, 7);
    assert_eq!(prefs.stop_preferences, vec![StopPreference::Scenic]);
    assert_eq!(prefs.distance_between_stops, 50);
}

#[test]
fn test_new_preferences_deserialize_with_defaults() {
    let prefs: NewTripPreferences = serde_json::from_str(r#"{"trip_id": 3}"#).unwrap();
    assert_eq!(prefs, NewTripPreferences::defaults_for(3));
}
