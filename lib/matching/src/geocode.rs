//! Coordinate resolution
//!
//! Turns a record's location attribute into a `(lat, lon)` pair. Already
//! resolved coordinates pass through; textual addresses are delegated to an
//! external [`Geocoder`] with a bounded timeout. Resolution degrades
//! gracefully: anything that cannot be resolved yields the sentinel pair
//! `(0.0, 0.0)` plus a warning instead of aborting the match. Only
//! structurally malformed locations are reported as errors, so the matrix
//! builder can drop that one record and continue.

use std::time::Duration;

use aidmatch_core::{Error, Location, RecordId, Result};
use thiserror::Error as ThisError;

/// Placeholder returned when a location cannot be resolved
///
/// `(0.0, 0.0)` is a real geographic point (Gulf of Guinea); callers that
/// need strict accuracy should treat it as "unresolved".
pub const SENTINEL_COORDINATES: (f64, f64) = (0.0, 0.0);

/// Whether a coordinate pair is the unresolved sentinel
#[inline]
#[must_use]
pub fn is_sentinel(lat: f64, lon: f64) -> bool {
    lat == 0.0 && lon == 0.0
}

/// Failure modes of the external geocoding collaborator
#[derive(Debug, Clone, ThisError)]
pub enum GeocodeError {
    #[error("Geocoding timed out after {0:?}")]
    Timeout(Duration),

    #[error("Address not found")]
    NotFound,

    #[error("Geocoding service error: {0}")]
    Service(String),
}

/// External geocoding collaborator
///
/// Implementations resolve a textual address to `(lat, lon)` within the
/// given timeout. The core performs no network I/O itself; a networked
/// implementation lives with the caller.
pub trait Geocoder {
    fn geocode(&self, address: &str, timeout: Duration) -> std::result::Result<(f64, f64), GeocodeError>;
}

/// In-memory geocoder backed by a fixed address table
///
/// Useful offline and in tests; unknown addresses report [`GeocodeError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    table: ahash::AHashMap<String, (f64, f64)>,
}

impl StaticGeocoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(mut self, address: impl Into<String>, lat: f64, lon: f64) -> Self {
        self.table.insert(address.into(), (lat, lon));
        self
    }

    pub fn insert(&mut self, address: impl Into<String>, lat: f64, lon: f64) {
        self.table.insert(address.into(), (lat, lon));
    }
}

impl Geocoder for StaticGeocoder {
    fn geocode(&self, address: &str, _timeout: Duration) -> std::result::Result<(f64, f64), GeocodeError> {
        self.table
            .get(address)
            .copied()
            .ok_or(GeocodeError::NotFound)
    }
}

/// Resolve a location attribute to coordinates
///
/// Returns the resolved pair together with an optional non-fatal warning.
/// An `Err` is returned only for structurally malformed locations, which
/// the caller drops record-locally.
pub fn resolve_location(
    record_id: &RecordId,
    location: Option<&Location>,
    geocoder: Option<&dyn Geocoder>,
    timeout: Duration,
) -> Result<((f64, f64), Option<String>)> {
    match location {
        Some(Location::Coordinates {
            latitude,
            longitude,
        }) => {
            if !latitude.is_finite() || !longitude.is_finite() {
                return Err(Error::FeatureExtraction {
                    id: record_id.to_string(),
                    reason: "non-finite coordinate field".to_string(),
                });
            }
            if is_sentinel(*latitude, *longitude) {
                let warning = format!("Record {} has zero lat/lon", record_id);
                return Ok(((*latitude, *longitude), Some(warning)));
            }
            Ok(((*latitude, *longitude), None))
        }
        Some(Location::Address(addr)) => {
            if addr.trim().is_empty() {
                let warning = format!("Record {} has an empty address", record_id);
                return Ok((SENTINEL_COORDINATES, Some(warning)));
            }
            let Some(geocoder) = geocoder else {
                let warning = format!(
                    "Record {} has address '{}' but no geocoder is configured",
                    record_id, addr
                );
                return Ok((SENTINEL_COORDINATES, Some(warning)));
            };
            match geocoder.geocode(addr, timeout) {
                Ok(coords) => Ok((coords, None)),
                Err(e) => {
                    let warning = format!("Geocoding failed for '{}': {}", addr, e);
                    Ok((SENTINEL_COORDINATES, Some(warning)))
                }
            }
        }
        Some(Location::Other(value)) => Err(Error::FeatureExtraction {
            id: record_id.to_string(),
            reason: format!("malformed location: {}", value),
        }),
        None => {
            let warning = format!("Record {} has no location", record_id);
            Ok((SENTINEL_COORDINATES, Some(warning)))
        }
    }
}
