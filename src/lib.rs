//! # aidmatch
//!
//! A volunteer-to-aid-request matching engine for disaster relief
//! coordination.
//!
//! Given an aid request (a needed category plus a location) and a pool of
//! candidate volunteers, aidmatch builds comparable feature vectors from
//! heterogeneous, partially-missing records, normalizes them against the
//! current pool, and returns the k nearest volunteers by Euclidean distance.
//! The surrounding application (HTTP, persistence, auth) supplies plain
//! records and consumes the ranked list; networked geocoding plugs in
//! behind the [`Geocoder`] trait.
//!
//! ## Quick Start
//!
//! ```rust
//! use aidmatch::prelude::*;
//!
//! let vocabulary = CategoryVocabulary::new(["Medical", "Rescue", "Food"]);
//! let matcher = Matcher::new(MatcherConfig::new(vocabulary));
//!
//! let request = RequestRecord::new("req-1", "Medical")
//!     .with_location(Location::coordinates(6.52, 3.37))
//!     .with_urgency(Urgency::High);
//!
//! let volunteers = vec![
//!     VolunteerRecord::new("vol-1")
//!         .with_skill("Medical")
//!         .with_location(Location::coordinates(6.50, 3.40))
//!         .with_availability(true),
//!     VolunteerRecord::new("vol-2")
//!         .with_skill("Rescue")
//!         .with_location(Location::coordinates(9.00, 7.40))
//!         .with_availability(false),
//!     VolunteerRecord::new("vol-3")
//!         .with_skill("Food")
//!         .with_location(Location::coordinates(52.5, 13.4))
//!         .with_availability(true),
//! ];
//!
//! let matches = matcher.top_matches(&request, &volunteers);
//! assert_eq!(matches[0].volunteer.id, "vol-1".into());
//! ```
//!
//! ## Crate Structure
//!
//! - [`aidmatch-core`](https://docs.rs/aidmatch-core) - records, feature
//!   vectors, error taxonomy
//! - [`aidmatch-matching`](https://docs.rs/aidmatch-matching) - encoder,
//!   coordinate resolution, scaler, k-NN matcher
//!
//! ## Failure Policy
//!
//! The engine is fail-soft end to end: unresolvable locations fall back to
//! sentinel coordinates, structurally invalid records are dropped
//! individually, and call-level problems (empty pools, zero-variance
//! scaling) produce an empty result with warnings rather than an error.
//! The debug entry point surfaces every absorbed warning together with all
//! intermediate arrays.

// Re-export core types
pub use aidmatch_core::{
    Availability, Error, FeatureMatrix, FeatureVector, Location, RecordId, RequestRecord, Result,
    Skills, Urgency, VolunteerRecord,
};

// Re-export the matching engine
pub use aidmatch_matching::{
    is_sentinel, CategoryVocabulary, FeatureExtractor, GeocodeError, Geocoder, MatchReport,
    MatchResult, Matcher, MatcherConfig, StandardScaler, StaticGeocoder, Warnings,
    DEFAULT_GEOCODE_TIMEOUT, DEFAULT_K, SENTINEL_COORDINATES,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Availability, CategoryVocabulary, Error, FeatureMatrix, FeatureVector, GeocodeError,
        Geocoder, Location, MatchReport, MatchResult, Matcher, MatcherConfig, RecordId,
        RequestRecord, Result, Skills, StandardScaler, StaticGeocoder, Urgency, VolunteerRecord,
    };
}
