//! Multi-step trip creation wizard.
//!
//! The wizard walks a [`DraftInput`] through three steps ([`WizardStep`]).
//! Moving forward validates the fields owned by the step being left; moving
//! back never validates. Submission is only possible from the review step
//! and at most one submission can be in flight.
//!
//! ```rust
//! use waypoint_core::wizard::{Transition, Wizard, WizardStep};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut wizard = Wizard::new();
//! assert!(matches!(wizard.advance().await, Transition::Blocked { .. }));
//!
//! wizard.set_trip_name("Coast Run");
//! wizard.set_start_location("LA");
//! wizard.set_destination("SF");
//! assert_eq!(
//!     wizard.advance().await,
//!     Transition::Moved { from: WizardStep::Details, to: WizardStep::Preferences }
//! );
//! # }
//! ```

use std::fmt;

use jiff::civil::Date;
use log::{debug, info};
use thiserror::Error;

use crate::{
    backend::Backend,
    error::SubmitError,
    identity::IdentityProvider,
    models::{DateRange, DraftInput, TripDraft, UserId},
    notify::Notifier,
    submission::{SubmissionOrchestrator, SubmissionReceipt},
    validation::{DraftValidator, Field, TripSchema, ValidationErrors},
};

/// The three steps of the wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WizardStep {
    Details,
    Preferences,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::Details,
        WizardStep::Preferences,
        WizardStep::Review,
    ];

    pub fn index(self) -> usize {
        match self {
            WizardStep::Details => 0,
            WizardStep::Preferences => 1,
            WizardStep::Review => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Details => "Trip Details",
            WizardStep::Preferences => "Preferences",
            WizardStep::Review => "Review",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WizardStep::Details => "Basic information about your trip",
            WizardStep::Preferences => "Set your travel preferences",
            WizardStep::Review => "Review your trip before creating it",
        }
    }

    /// Fields validated when leaving this step forward.
    pub fn fields(self) -> &'static [Field] {
        match self {
            WizardStep::Details => &[
                Field::TripName,
                Field::StartLocation,
                Field::Destination,
                Field::DateRange,
            ],
            WizardStep::Preferences => &[
                Field::StopPreferences,
                Field::DistanceBetweenStops,
                Field::Accommodation,
                Field::Dining,
            ],
            WizardStep::Review => &[],
        }
    }

    /// The step on which `field` is edited.
    pub fn owning(field: Field) -> Self {
        Self::ALL
            .into_iter()
            .find(|step| step.fields().contains(&field))
            .unwrap_or(WizardStep::Review)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// What the current step shows, borrowed from the draft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepView<'a> {
    Details {
        trip_name: &'a str,
        start_location: &'a str,
        destination: &'a str,
        date_range: DateRange,
    },
    Preferences {
        stop_preferences: &'a [String],
        distance_between_stops: Option<i64>,
        accommodation: Option<&'a str>,
        dining: Option<&'a str>,
    },
    Review {
        draft: &'a DraftInput,
    },
}

/// Result of a navigation intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved { from: WizardStep, to: WizardStep },
    /// Nothing to do (already at the boundary or a submission is pending)
    Unchanged,
    /// Validation of `step` failed; the wizard did not move
    Blocked {
        step: WizardStep,
        errors: ValidationErrors,
    },
}

impl Transition {
    pub fn is_moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

/// Why a submission could not start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("Trips can only be submitted from the review step")]
    NotOnReviewStep,
    #[error("A submission is already in progress")]
    AlreadySubmitting,
    #[error("Sign in to create a trip")]
    AuthenticationRequired,
    #[error("Trip is incomplete: {0}")]
    Invalid(ValidationErrors),
}

/// Failure of [`Wizard::submit`].
#[derive(Error, Debug)]
pub enum WizardSubmitError {
    #[error(transparent)]
    Rejected(#[from] SubmitRejected),
    #[error(transparent)]
    Failed(#[from] SubmitError),
}

/// A validated snapshot handed to the orchestrator.
///
/// Only issued by [`Wizard::begin_submission`], which marks the wizard as
/// submitting until [`Wizard::finish_submission`] is called.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub draft: TripDraft,
    pub user_id: UserId,
}

/// State machine driving trip creation.
pub struct Wizard<V: DraftValidator = TripSchema> {
    validator: V,
    initial: DraftInput,
    draft: DraftInput,
    step: WizardStep,
    errors: [ValidationErrors; 3],
    submission_error: Option<String>,
    submitting: bool,
}

impl Wizard<TripSchema> {
    pub fn new() -> Self {
        Self::with_validator(TripSchema)
    }
}

impl Default for Wizard<TripSchema> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: DraftValidator> Wizard<V> {
    pub fn with_validator(validator: V) -> Self {
        Self::with_draft(validator, DraftInput::default())
    }

    /// Starts from `initial` instead of the default draft. Resets return
    /// to it as well.
    pub fn with_draft(validator: V, initial: DraftInput) -> Self {
        Self {
            validator,
            draft: initial.clone(),
            initial,
            step: WizardStep::Details,
            errors: Default::default(),
            submission_error: None,
            submitting: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &DraftInput {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Field errors recorded for `step`.
    pub fn step_errors(&self, step: WizardStep) -> &ValidationErrors {
        &self.errors[step.index()]
    }

    /// Text to display for `step`, if anything failed there.
    ///
    /// On the review step a failed submission takes precedence.
    pub fn error_message(&self, step: WizardStep) -> Option<String> {
        if step == WizardStep::Review {
            if let Some(message) = &self.submission_error {
                return Some(message.clone());
            }
        }
        let errors = self.step_errors(step);
        (!errors.is_empty()).then(|| errors.to_string())
    }

    /// Share of the steps reached, counting the current one.
    pub fn progress_percent(&self) -> u8 {
        ((self.step.index() + 1) * 100 / WizardStep::ALL.len()) as u8
    }

    pub fn current_view(&self) -> StepView<'_> {
        match self.step {
            WizardStep::Details => StepView::Details {
                trip_name: &self.draft.trip_name,
                start_location: &self.draft.start_location,
                destination: &self.draft.destination,
                date_range: self.draft.date_range,
            },
            WizardStep::Preferences => StepView::Preferences {
                stop_preferences: &self.draft.stop_preferences,
                distance_between_stops: self.draft.distance_between_stops,
                accommodation: self.draft.accommodation.as_deref(),
                dining: self.draft.dining.as_deref(),
            },
            WizardStep::Review => StepView::Review { draft: &self.draft },
        }
    }

    pub fn set_trip_name(&mut self, value: impl Into<String>) {
        self.draft.trip_name = value.into();
        self.clear_error(Field::TripName);
    }

    pub fn set_start_location(&mut self, value: impl Into<String>) {
        self.draft.start_location = value.into();
        self.clear_error(Field::StartLocation);
    }

    pub fn set_destination(&mut self, value: impl Into<String>) {
        self.draft.destination = value.into();
        self.clear_error(Field::Destination);
    }

    pub fn set_date_range(&mut self, from: Option<Date>, to: Option<Date>) {
        self.draft.date_range = DateRange::new(from, to);
        self.clear_error(Field::DateRange);
    }

    pub fn set_distance_between_stops(&mut self, miles: Option<i64>) {
        self.draft.distance_between_stops = miles;
        self.clear_error(Field::DistanceBetweenStops);
    }

    pub fn set_accommodation(&mut self, value: Option<String>) {
        self.draft.accommodation = value;
        self.clear_error(Field::Accommodation);
    }

    pub fn set_dining(&mut self, value: Option<String>) {
        self.draft.dining = value;
        self.clear_error(Field::Dining);
    }

    /// Checks or unchecks a stop tag. Returns true if the selection changed.
    pub fn toggle_stop_preference(&mut self, tag: &str, checked: bool) -> bool {
        let changed = self.draft.toggle_stop_preference(tag, checked);
        if changed {
            self.clear_error(Field::StopPreferences);
        }
        changed
    }

    fn clear_error(&mut self, field: Field) {
        self.errors[WizardStep::owning(field).index()].remove(field);
    }

    /// Validates the current step and moves to the next one.
    pub async fn advance(&mut self) -> Transition {
        match self.step.next() {
            Some(target) if !self.submitting => self.move_forward(target).await,
            _ => Transition::Unchanged,
        }
    }

    /// Moves back one step without validating.
    pub fn retreat(&mut self) -> Transition {
        match self.step.previous() {
            Some(target) if !self.submitting => self.move_to(target),
            _ => Transition::Unchanged,
        }
    }

    /// Moves directly to `target`, as from the step indicator.
    ///
    /// Forward jumps validate every step between the current one and
    /// `target`, stopping at the first that fails.
    pub async fn jump_to(&mut self, target: WizardStep) -> Transition {
        if self.submitting || target == self.step {
            Transition::Unchanged
        } else if target < self.step {
            self.move_to(target)
        } else {
            self.move_forward(target).await
        }
    }

    async fn move_forward(&mut self, target: WizardStep) -> Transition {
        let mut step = self.step;
        while step < target {
            if let Err(errors) = self.validate_step(step).await {
                debug!("{step} blocked: {errors}");
                return Transition::Blocked { step, errors };
            }
            step = match step.next() {
                Some(next) => next,
                None => break,
            };
        }
        self.move_to(target)
    }

    fn move_to(&mut self, target: WizardStep) -> Transition {
        let from = self.step;
        self.step = target;
        debug!("Wizard moved from {from} to {target}");
        Transition::Moved { from, to: target }
    }

    /// Validates the fields of `step`, replacing the errors recorded for it.
    async fn validate_step(&mut self, step: WizardStep) -> Result<(), ValidationErrors> {
        let result = self.validator.validate(&self.draft, step.fields()).await;
        let recorded = &mut self.errors[step.index()];
        match result {
            Ok(()) => {
                *recorded = ValidationErrors::new();
                Ok(())
            }
            Err(errors) => {
                *recorded = errors.clone();
                Err(errors)
            }
        }
    }

    /// Validates the whole draft and marks the wizard as submitting.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitRejected`] without changing anything when a
    /// submission is pending, the wizard is not on the review step, or no
    /// user is signed in. Validation failures are recorded on the steps that
    /// own the failing fields.
    pub async fn begin_submission(
        &mut self,
        identity: &dyn IdentityProvider,
    ) -> Result<PendingSubmission, SubmitRejected> {
        if self.submitting {
            return Err(SubmitRejected::AlreadySubmitting);
        }
        if self.step != WizardStep::Review {
            return Err(SubmitRejected::NotOnReviewStep);
        }
        let user_id = identity
            .current_user()
            .ok_or(SubmitRejected::AuthenticationRequired)?;

        let draft = match self.validator.normalize(&self.draft).await {
            Ok(draft) => draft,
            Err(errors) => {
                for step in WizardStep::ALL {
                    self.errors[step.index()] = errors.restricted_to(step.fields());
                }
                return Err(SubmitRejected::Invalid(errors));
            }
        };

        self.submitting = true;
        self.submission_error = None;
        Ok(PendingSubmission { draft, user_id })
    }

    /// Records the outcome of a submission started with
    /// [`Wizard::begin_submission`].
    ///
    /// Success resets the wizard to its initial state. Failure keeps the
    /// draft and records the error on the review step so it can be retried.
    pub fn finish_submission(
        &mut self,
        result: Result<SubmissionReceipt, SubmitError>,
    ) -> Result<SubmissionReceipt, SubmitError> {
        self.submitting = false;
        match result {
            Ok(receipt) => {
                info!("Trip {} created, resetting wizard", receipt.trip_id());
                self.reset();
                Ok(receipt)
            }
            Err(e) => {
                self.submission_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Runs a full submission through `orchestrator`.
    pub async fn submit<B: Backend + ?Sized>(
        &mut self,
        identity: &dyn IdentityProvider,
        orchestrator: &SubmissionOrchestrator<B>,
        notifier: &dyn Notifier,
    ) -> Result<SubmissionReceipt, WizardSubmitError> {
        let pending = self.begin_submission(identity).await?;
        let result = orchestrator
            .submit(&pending.draft, &pending.user_id, notifier)
            .await;
        Ok(self.finish_submission(result)?)
    }

    /// Back to the first step with the initial draft and no errors.
    pub fn reset(&mut self) {
        self.draft = self.initial.clone();
        self.step = WizardStep::Details;
        self.errors = Default::default();
        self.submission_error = None;
        self.submitting = false;
    }
}
