//! Display formatting for models, operation results and the wizard.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and operation outcomes are formatted through newtype wrappers. Everything
//! renders as markdown so the terminal renderer can style it.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │   Formatted     │
//! │  (Trip, ...)    │───▶│ (TripCards,...) │───▶│    Markdown     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: [`TripCards`] and [`Participants`]
//! - [`results`]: [`CreateResult`], [`UpdateResult`], [`DeleteResult`]
//! - [`status`]: [`OperationStatus`] and notification lines
//! - [`datetime`]: timestamp and date formatting
//! - [`wizard`]: [`StepIndicator`] and [`ReviewSummary`]
//!
//! ```rust
//! use waypoint_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Trip deleted".to_string());
//! assert_eq!(status.to_string(), "Success: Trip deleted\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;
pub mod wizard;

pub use collections::{Participants, TripCards};
pub use datetime::{DateSpan, LocalDateTime, ShortDate};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
pub use wizard::{ReviewSummary, StepIndicator};
