//! # aidmatch Core
//!
//! Core data model for the aidmatch volunteer matching engine.
//!
//! This crate provides the fundamental data structures shared by the
//! matching pipeline:
//!
//! - [`RequestRecord`] / [`VolunteerRecord`] - boundary records with
//!   union-shaped fields as they arrive from the surrounding application
//! - [`FeatureVector`] / [`FeatureMatrix`] - fixed-length numeric features
//! - [`Error`] - the shared error taxonomy
//!
//! ## Example
//!
//! ```rust
//! use aidmatch_core::{Location, RequestRecord, Urgency, VolunteerRecord};
//!
//! let request = RequestRecord::new("req-1", "Medical")
//!     .with_location(Location::coordinates(6.52, 3.37))
//!     .with_urgency(Urgency::High);
//!
//! let volunteer = VolunteerRecord::new("vol-1")
//!     .with_skill("Medical")
//!     .with_location(Location::coordinates(6.60, 3.35))
//!     .with_availability(true);
//!
//! assert_eq!(request.urgency_score(), 3.0);
//! assert_eq!(volunteer.availability_flag(), 1.0);
//! ```

pub mod error;
pub mod record;
pub mod vector;

pub use error::{Error, Result};
pub use record::{
    Availability, Location, RecordId, RequestRecord, Skills, Urgency, VolunteerRecord,
};
pub use vector::{FeatureMatrix, FeatureVector};
