//! Progress and outcome notifications emitted during submission.

use log::{error, info};

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Default,
    Destructive,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Default => "default",
            Severity::Destructive => "destructive",
        }
    }
}

/// The semantic event a notification stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    CreatingTrip,
    SavingPreferences,
    Success,
    Error,
}

/// A title and description pair for an external toast presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn creating_trip() -> Self {
        Self {
            title: "Creating trip".to_string(),
            description: "Saving your trip details...".to_string(),
            severity: Severity::Default,
            kind: NotificationKind::CreatingTrip,
        }
    }

    pub fn saving_preferences() -> Self {
        Self {
            title: "Saving preferences".to_string(),
            description: "Saving your travel preferences...".to_string(),
            severity: Severity::Default,
            kind: NotificationKind::SavingPreferences,
        }
    }

    pub fn success(trip_id: u64) -> Self {
        Self {
            title: "Success".to_string(),
            description: format!("Trip {trip_id} created successfully"),
            severity: Severity::Default,
            kind: NotificationKind::Success,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
            severity: Severity::Destructive,
            kind: NotificationKind::Error,
        }
    }

    /// True for the events that end a submission.
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, NotificationKind::Success | NotificationKind::Error)
    }
}

/// Receiver of submission notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Forwards notifications to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Default => info!("{}: {}", notification.title, notification.description),
            Severity::Destructive => {
                error!("{}: {}", notification.title, notification.description)
            }
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}
