//! # aidmatch Matching
//!
//! Feature-extraction and nearest-neighbor matching engine for disaster
//! relief coordination. Given an aid request and a pool of volunteers, it
//! turns heterogeneous, partially-missing records into comparable numeric
//! vectors, normalizes them against the current pool, and ranks volunteers
//! by Euclidean distance to the request.
//!
//! - [`CategoryVocabulary`] - fixed-vocabulary one-hot encoder; unknown
//!   categories map to the all-zero vector
//! - [`Geocoder`] - seam for the external geocoding collaborator
//! - [`FeatureExtractor`] - composes coordinates, encoded category, and a
//!   scalar attribute into fixed-length vectors, and builds the candidate
//!   matrix while absorbing record-local failures
//! - [`StandardScaler`] - per-call z-score normalization
//! - [`Matcher`] - plain and debug k-NN ranking
//!
//! ## Example
//!
//! ```rust
//! use aidmatch_core::{Location, RequestRecord, Urgency, VolunteerRecord};
//! use aidmatch_matching::{CategoryVocabulary, Matcher, MatcherConfig};
//!
//! // Vocabulary must cover the categories present in the pool; a category
//! // no candidate uses leaves a zero-variance column and an empty result.
//! let vocabulary = CategoryVocabulary::new(["Medical", "Rescue", "Food"]);
//! let config = MatcherConfig::new(vocabulary).with_k(2);
//! let matcher = Matcher::new(config);
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
//! assert_eq!(matches.len(), 2);
//! ```

pub mod encoder;
pub mod features;
pub mod geocode;
pub mod matcher;
pub mod scaler;

pub use encoder::CategoryVocabulary;
pub use features::{FeatureExtractor, Warnings};
pub use geocode::{
    is_sentinel, resolve_location, GeocodeError, Geocoder, StaticGeocoder, SENTINEL_COORDINATES,
};
pub use matcher::{
    MatchReport, MatchResult, Matcher, MatcherConfig, DEFAULT_GEOCODE_TIMEOUT, DEFAULT_K,
};
pub use scaler::StandardScaler;
