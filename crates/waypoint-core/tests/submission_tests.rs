use std::sync::{Arc, Mutex};

use waypoint_core::{
    error::BackendOperation,
    models::{DraftInput, ParticipantRole, StopPreference, UserId},
    notify::NotificationKind,
    Backend, LogNotifier, MemoryBackend, Notification, Notifier, Severity, StaticIdentity,
    SubmissionOrchestrator, SubmitError, SubmitRejected, TripSchema, Wizard, WizardStep,
    WizardSubmitError,
};

mod common;

use common::create_test_backend;

#[derive(Default)]
struct RecordingNotifier(Mutex<Vec<Notification>>);

impl RecordingNotifier {
    fn recorded(&self) -> Vec<Notification> {
        self.0.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.0.lock().unwrap().push(notification);
    }
}

fn coast_run() -> DraftInput {
    DraftInput {
        trip_name: "Coast Run".to_string(),
        start_location: "LA".to_string(),
        destination: "SF".to_string(),
        stop_preferences: vec!["scenic".to_string()],
        distance_between_stops: Some(50),
        accommodation: Some("hotel".to_string()),
        dining: Some("casual".to_string()),
        ..Default::default()
    }
}

async fn wizard_on_review(draft: DraftInput) -> Wizard {
    let mut wizard = Wizard::with_draft(TripSchema, DraftInput::default());
    wizard.set_trip_name(draft.trip_name);
    wizard.set_start_location(draft.start_location);
    wizard.set_destination(draft.destination);
    for tag in &draft.stop_preferences {
        wizard.toggle_stop_preference(tag, true);
    }
    wizard.set_distance_between_stops(draft.distance_between_stops);
    wizard.set_accommodation(draft.accommodation);
    wizard.set_dining(draft.dining);

    assert!(wizard.jump_to(WizardStep::Review).await.is_moved());
    wizard
}

#[tokio::test]
async fn test_coast_run_submission() {
    let backend = Arc::new(MemoryBackend::new());
    let orchestrator = SubmissionOrchestrator::new(Arc::clone(&backend));
    let notifier = RecordingNotifier::default();
    let mut wizard = wizard_on_review(coast_run()).await;

    let receipt = wizard
        .submit(&StaticIdentity::new("ann"), &orchestrator, &notifier)
        .await
        .expect("Submission should succeed");

    let preferences = backend
        .get_preferences_by_trip(receipt.trip_id())
        .await
        .unwrap();
    assert_eq!(preferences.stop_preferences, vec![StopPreference::Scenic]);
    assert_eq!(preferences.distance_between_stops, 50);

    let kinds: Vec<NotificationKind> = notifier.recorded().iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NotificationKind::CreatingTrip,
            NotificationKind::SavingPreferences,
            NotificationKind::Success
        ]
    );
    assert_eq!(wizard.step(), WizardStep::Details);
}

#[tokio::test]
async fn test_partial_failure_reports_trip_and_clears_submitting() {
    let backend = Arc::new(MemoryBackend::new());
    backend.fail_operation(BackendOperation::CreatePreferences).await;
    let orchestrator = SubmissionOrchestrator::new(Arc::clone(&backend));
    let notifier = RecordingNotifier::default();
    let mut wizard = wizard_on_review(coast_run()).await;

    let err = wizard
        .submit(&StaticIdentity::new("ann"), &orchestrator, &notifier)
        .await
        .unwrap_err();

    let trip_id = match &err {
        WizardSubmitError::Failed(failure @ SubmitError::PartialSubmission { .. }) => {
            failure.orphaned_trip_id().expect("Trip id should be reported")
        }
        other => panic!("unexpected error: {other:?}"),
    };
    assert_eq!(backend.get_trip(trip_id).await.unwrap().name, "Coast Run");
    assert!(!wizard.is_submitting());
    assert_eq!(wizard.step(), WizardStep::Review);
    assert_eq!(wizard.draft().trip_name, "Coast Run");

    let last = notifier.recorded().pop().unwrap();
    assert_eq!(last.kind, NotificationKind::Error);
    assert_eq!(last.severity, Severity::Destructive);

    // Retrying is up to the caller and writes a fresh trip
    backend.clear_failures().await;
    wizard
        .submit(&StaticIdentity::new("ann"), &orchestrator, &LogNotifier)
        .await
        .unwrap();
    assert_eq!(backend.get_all_trips().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_anonymous_submission_is_rejected_before_any_write() {
    let backend = Arc::new(MemoryBackend::new());
    let orchestrator = SubmissionOrchestrator::new(Arc::clone(&backend));
    let mut wizard = wizard_on_review(coast_run()).await;

    let err = wizard
        .submit(&StaticIdentity::anonymous(), &orchestrator, &LogNotifier)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WizardSubmitError::Rejected(SubmitRejected::AuthenticationRequired)
    ));
    assert!(backend.get_all_trips().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sqlite_end_to_end() {
    let (_temp_dir, backend) = create_test_backend().await;
    let backend = Arc::new(backend);
    let orchestrator = SubmissionOrchestrator::new(Arc::clone(&backend));
    let mut wizard = wizard_on_review(coast_run()).await;

    let receipt = wizard
        .submit(&StaticIdentity::new("ann"), &orchestrator, &LogNotifier)
        .await
        .unwrap();

    let trip = backend.get_trip(receipt.trip_id()).await.unwrap();
    assert_eq!(trip.start_location.as_deref(), Some("LA"));
    assert_eq!(trip.destination, "SF");

    let preferences = backend.get_preferences_by_trip(trip.id).await.unwrap();
    assert_eq!(preferences.stop_preferences, vec![StopPreference::Scenic]);
    assert_eq!(preferences.distance_between_stops, 50);

    // Participants only come from explicit add-to-trip calls
    assert!(backend
        .get_participants_by_trip(trip.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_sqlite_add_and_remove_user() {
    let (_temp_dir, backend) = create_test_backend().await;
    let trip = backend
        .create_trip(common::new_trip("Crew", None))
        .await
        .unwrap();
    let user = UserId::new("bob");

    let added = backend.add_user_to_trip(trip.id, &user, None).await.unwrap();
    assert_eq!(added.role, ParticipantRole::Member);

    backend.remove_user_from_trip(trip.id, &user).await.unwrap();
    assert!(backend
        .get_participants_by_trip(trip.id)
        .await
        .unwrap()
        .is_empty());
}
