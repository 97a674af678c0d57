//! Error types for the trip backend and the submission orchestrator.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by a [`Backend`](crate::backend::Backend) operation.
///
/// Carries the underlying store's detail unchanged; no operation retries.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Requested record does not exist
    #[error("{entity} {key} not found")]
    NotFound { entity: Entity, key: String },
    /// Uniqueness or referential constraint rejected the write
    #[error("Conflict: {message}")]
    Conflict { message: String },
    /// A stored value could not be mapped back into a model
    #[error("Invalid stored data: {message}")]
    InvalidData { message: String },
    /// The store refused the operation (remote outage, injected failure)
    #[error("Backend unavailable during {operation}: {message}")]
    Unavailable {
        operation: BackendOperation,
        message: String,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Blocking task failed to complete
    #[error("Background task error: {message}")]
    Task { message: String },
}

/// Entity families exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Trip,
    Preferences,
    Participant,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Trip => write!(f, "Trip"),
            Entity::Preferences => write!(f, "Preferences for trip"),
            Entity::Participant => write!(f, "Participant"),
        }
    }
}

/// Every operation of the data access layer, used for logging and failure
/// injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOperation {
    GetAllTrips,
    GetTrip,
    CreateTrip,
    UpdateTrip,
    DeleteTrip,
    GetAllPreferences,
    GetPreferences,
    CreatePreferences,
    UpdatePreferences,
    DeletePreferences,
    GetAllParticipants,
    GetParticipants,
    CreateParticipant,
    UpdateParticipant,
    DeleteParticipant,
    RemoveUserFromTrip,
}

impl fmt::Display for BackendOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendOperation::GetAllTrips => "trips.get_all",
            BackendOperation::GetTrip => "trips.get_by_id",
            BackendOperation::CreateTrip => "trips.create",
            BackendOperation::UpdateTrip => "trips.update",
            BackendOperation::DeleteTrip => "trips.delete",
            BackendOperation::GetAllPreferences => "trip_preferences.get_all",
            BackendOperation::GetPreferences => "trip_preferences.get_by_trip_id",
            BackendOperation::CreatePreferences => "trip_preferences.create",
            BackendOperation::UpdatePreferences => "trip_preferences.update",
            BackendOperation::DeletePreferences => "trip_preferences.delete",
            BackendOperation::GetAllParticipants => "trip_participants.get_all",
            BackendOperation::GetParticipants => "trip_participants.get_by_trip_id",
            BackendOperation::CreateParticipant => "trip_participants.create",
            BackendOperation::UpdateParticipant => "trip_participants.update",
            BackendOperation::DeleteParticipant => "trip_participants.delete",
            BackendOperation::RemoveUserFromTrip => "trip_participants.remove_user",
        };
        f.write_str(name)
    }
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    ///
    /// Constraint violations are surfaced as [`BackendError::Conflict`] so
    /// callers can tell a duplicate apart from a broken connection.
    pub fn with_source(self, source: rusqlite::Error) -> BackendError {
        if let rusqlite::Error::SqliteFailure(err, detail) = &source {
            if err.code == rusqlite::ErrorCode::ConstraintViolation {
                return BackendError::Conflict {
                    message: format!(
                        "{}: {}",
                        self.message,
                        detail.as_deref().unwrap_or("constraint violation")
                    ),
                };
            }
        }
        BackendError::Database {
            message: self.message,
            source,
        }
    }
}

impl BackendError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a not-found error for the given entity and key.
    pub fn not_found(entity: Entity, key: impl fmt::Display) -> Self {
        BackendError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Wraps a join failure from the blocking pool.
    pub(crate) fn task(err: tokio::task::JoinError) -> Self {
        BackendError::Task {
            message: format!("Task join error: {err}"),
        }
    }

    /// Returns true if the error means the record is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound { .. })
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| BackendError::database(message).with_source(e))
    }
}

/// Failure of a two-phase trip submission, annotated with the phase it
/// happened in.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Phase 1 failed; nothing was written.
    #[error("Failed to create trip: {source}")]
    TripCreation {
        #[source]
        source: BackendError,
    },
    /// Phase 1 succeeded but phase 2 failed; the trip exists without
    /// preferences unless `compensated` is true.
    #[error("Trip {trip_id} created but preferences failed to save: {source}")]
    PartialSubmission {
        trip_id: u64,
        compensated: bool,
        #[source]
        source: BackendError,
    },
}

impl SubmitError {
    /// Id of a trip left behind by a partial submission, if any.
    pub fn orphaned_trip_id(&self) -> Option<u64> {
        match self {
            SubmitError::PartialSubmission {
                trip_id,
                compensated: false,
                ..
            } => Some(*trip_id),
            _ => None,
        }
    }
}

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;
