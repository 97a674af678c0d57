#![allow(dead_code)]

use jiff::civil::Date;
use tempfile::TempDir;
use waypoint_core::{
    models::{NewTrip, TripStatus, UserId},
    BackendBuilder, SqliteBackend,
};

/// Helper function to create a backend over a throwaway database
pub async fn create_test_backend() -> (TempDir, SqliteBackend) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let backend = BackendBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create backend");
    (temp_dir, backend)
}

/// Insert shape for a trip owned by `ann`
pub fn new_trip(name: &str, start_date: Option<Date>) -> NewTrip {
    NewTrip {
        name: name.to_string(),
        start_location: Some("LA".to_string()),
        destination: "SF".to_string(),
        start_date,
        end_date: None,
        status: TripStatus::Upcoming,
        thumbnail_url: None,
        user_id: UserId::new("ann"),
    }
}
