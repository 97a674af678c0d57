//! Two-phase trip submission.
//!
//! A submission first creates the [`Trip`] and then, using the id the store
//! assigned, its [`TripPreferences`]. The phases are not wrapped in a
//! transaction: when phase two fails the trip is left without preferences,
//! and the failure says so. [`CompensationPolicy::DeleteOrphanedTrip`] opts
//! into deleting that orphan instead. Participants are never written here.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::{
    backend::Backend,
    error::SubmitError,
    models::{Trip, TripDraft, TripPreferences, UserId},
    notify::{Notification, Notifier},
};

/// What to do with a trip whose preferences could not be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompensationPolicy {
    /// Keep the trip and report the partial submission
    #[default]
    None,
    /// Delete the trip so no preference-less record remains
    DeleteOrphanedTrip,
}

/// Records written by a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub trip: Trip,
    pub preferences: TripPreferences,
}

impl SubmissionReceipt {
    pub fn trip_id(&self) -> u64 {
        self.trip.id
    }
}

/// Runs submissions against an injected [`Backend`].
pub struct SubmissionOrchestrator<B: Backend + ?Sized> {
    backend: Arc<B>,
    compensation: CompensationPolicy,
}

impl<B: Backend + ?Sized> Clone for SubmissionOrchestrator<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            compensation: self.compensation,
        }
    }
}

impl<B: Backend + ?Sized> SubmissionOrchestrator<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            compensation: CompensationPolicy::default(),
        }
    }

    pub fn with_compensation(mut self, compensation: CompensationPolicy) -> Self {
        self.compensation = compensation;
        self
    }

    /// Writes `draft` for `user_id`, reporting progress to `notifier`.
    ///
    /// Each phase is announced before it starts. Exactly one terminal
    /// notification (success or a destructive error) is emitted.
    ///
    /// # Errors
    ///
    /// [`SubmitError::TripCreation`] if the trip could not be created (the
    /// preferences phase is then skipped), [`SubmitError::PartialSubmission`]
    /// if the trip exists but its preferences could not be saved.
    pub async fn submit(
        &self,
        draft: &TripDraft,
        user_id: &UserId,
        notifier: &dyn Notifier,
    ) -> Result<SubmissionReceipt, SubmitError> {
        notifier.notify(Notification::creating_trip());
        let trip = match self.backend.create_trip(draft.to_new_trip(user_id)).await {
            Ok(trip) => trip,
            Err(source) => {
                let err = SubmitError::TripCreation { source };
                notifier.notify(Notification::error(err.to_string()));
                return Err(err);
            }
        };
        debug!("Created trip {} for {user_id}", trip.id);

        notifier.notify(Notification::saving_preferences());
        let preferences = match self
            .backend
            .create_preferences(draft.to_new_preferences(trip.id))
            .await
        {
            Ok(preferences) => preferences,
            Err(source) => {
                let compensated = self.compensate(trip.id).await;
                let err = SubmitError::PartialSubmission {
                    trip_id: trip.id,
                    compensated,
                    source,
                };
                notifier.notify(Notification::error(err.to_string()));
                return Err(err);
            }
        };

        info!("Trip {} '{}' submitted", trip.id, trip.name);
        notifier.notify(Notification::success(trip.id));

        Ok(SubmissionReceipt { trip, preferences })
    }

    /// Applies the compensation policy; true if the orphan was removed.
    async fn compensate(&self, trip_id: u64) -> bool {
        match self.compensation {
            CompensationPolicy::None => {
                warn!("Trip {trip_id} left without preferences");
                false
            }
            CompensationPolicy::DeleteOrphanedTrip => {
                match self.backend.delete_trip(trip_id).await {
                    Ok(()) => {
                        info!("Deleted orphaned trip {trip_id}");
                        true
                    }
                    Err(e) => {
                        warn!("Failed to delete orphaned trip {trip_id}: {e}");
                        false
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{
        backend::MemoryBackend,
        error::{BackendError, BackendOperation},
        models::{Accommodation, DateRange, Dining, StopPreference},
        notify::{NotificationKind, Severity},
    };

    #[derive(Default)]
    struct RecordingNotifier(Mutex<Vec<Notification>>);

    impl RecordingNotifier {
        fn kinds(&self) -> Vec<NotificationKind> {
            self.0.lock().unwrap().iter().map(|n| n.kind).collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.0.lock().unwrap().push(notification);
        }
    }

    fn coast_run() -> TripDraft {
        TripDraft {
            trip_name: "Coast Run".to_string(),
            start_location: "LA".to_string(),
            destination: "SF".to_string(),
            date_range: DateRange::default(),
            stop_preferences: vec![StopPreference::Scenic],
            distance_between_stops: 50,
            accommodation: Accommodation::Hotel,
            dining: Dining::Casual,
        }
    }

    #[tokio::test]
    async fn test_successful_submission_writes_both_phases() {
        let backend = Arc::new(MemoryBackend::new());
        let orchestrator = SubmissionOrchestrator::new(Arc::clone(&backend));
        let notifier = RecordingNotifier::default();

        let receipt = orchestrator
            .submit(&coast_run(), &UserId::new("ann"), &notifier)
            .await
            .unwrap();

        assert_eq!(receipt.preferences.trip_id, receipt.trip_id());
        assert_eq!(
            notifier.kinds(),
            vec![
                NotificationKind::CreatingTrip,
                NotificationKind::SavingPreferences,
                NotificationKind::Success
            ]
        );
    }

    #[tokio::test]
    async fn test_trip_failure_skips_preferences() {
        let backend = Arc::new(MemoryBackend::new());
        backend.fail_operation(BackendOperation::CreateTrip).await;
        let orchestrator = SubmissionOrchestrator::new(Arc::clone(&backend));
        let notifier = RecordingNotifier::default();

        let err = orchestrator
            .submit(&coast_run(), &UserId::new("ann"), &notifier)
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::TripCreation { .. }));
        assert!(backend.get_all_preferences().await.unwrap().is_empty());
        assert_eq!(
            notifier.kinds(),
            vec![NotificationKind::CreatingTrip, NotificationKind::Error]
        );
    }

    #[tokio::test]
    async fn test_partial_submission_keeps_trip_by_default() {
        let backend = Arc::new(MemoryBackend::new());
        backend.fail_operation(BackendOperation::CreatePreferences).await;
        let orchestrator = SubmissionOrchestrator::new(Arc::clone(&backend));
        let notifier = RecordingNotifier::default();

        let err = orchestrator
            .submit(&coast_run(), &UserId::new("ann"), &notifier)
            .await
            .unwrap_err();

        let trip_id = err.orphaned_trip_id().unwrap();
        assert!(backend.get_trip(trip_id).await.is_ok());
        assert!(err.to_string().contains("preferences failed"));
        match err {
            SubmitError::PartialSubmission {
                compensated,
                source,
                ..
            } => {
                assert!(!compensated);
                assert!(matches!(source, BackendError::Unavailable { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let last = notifier.0.lock().unwrap().last().cloned().unwrap();
        assert_eq!(last.severity, Severity::Destructive);
    }

    #[tokio::test]
    async fn test_compensation_deletes_orphan() {
        let backend = Arc::new(MemoryBackend::new());
        backend.fail_operation(BackendOperation::CreatePreferences).await;
        let orchestrator = SubmissionOrchestrator::new(Arc::clone(&backend))
            .with_compensation(CompensationPolicy::DeleteOrphanedTrip);

        let err = orchestrator
            .submit(&coast_run(), &UserId::new("ann"), &RecordingNotifier::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitError::PartialSubmission {
                compensated: true,
                ..
            }
        ));
        assert_eq!(err.orphaned_trip_id(), None);
        assert!(backend.get_all_trips().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submission_adds_no_participants() {
        let backend = Arc::new(MemoryBackend::new());
        let orchestrator = SubmissionOrchestrator::new(Arc::clone(&backend));

        let receipt = orchestrator
            .submit(&coast_run(), &UserId::new("ann"), &RecordingNotifier::default())
            .await
            .unwrap();

        assert!(backend
            .get_participants_by_trip(receipt.trip_id())
            .await
            .unwrap()
            .is_empty());
        assert!(backend.get_all_participants().await.unwrap().is_empty());
    }
}
