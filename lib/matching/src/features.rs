//! Feature extraction for requests and volunteers
//!
//! Composes resolved coordinates, the one-hot encoded category, and one
//! scalar attribute into a fixed-length vector:
//!
//! ```text
//! [lat, lon] ++ onehot(category)[0..C) ++ [scalar]
//! ```
//!
//! The scalar slot holds the urgency score for requests and the
//! availability flag for volunteers, so both sides share one vector shape
//! and are directly comparable under a single distance metric. Missing or
//! unknown values are defaulted with a warning; only structurally invalid
//! records produce an error, and the matrix builder absorbs those
//! record-locally.

use std::time::Duration;

use aidmatch_core::{FeatureMatrix, FeatureVector, RequestRecord, Result, VolunteerRecord};

use crate::encoder::CategoryVocabulary;
use crate::geocode::{resolve_location, Geocoder};

/// Non-fatal warnings collected over one matching call
///
/// Each warning is logged as it is recorded and surfaced verbatim in the
/// debug report's `processing_warnings`.
#[derive(Debug, Default, Clone)]
pub struct Warnings {
    messages: Vec<String>,
}

impl Warnings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: String) {
        tracing::warn!("{message}");
        self.messages.push(message);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.messages
    }

    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.messages
    }
}

/// Builds feature vectors against one vocabulary and one geocoder
#[derive(Clone, Copy)]
pub struct FeatureExtractor<'a> {
    vocabulary: &'a CategoryVocabulary,
    geocoder: Option<&'a dyn Geocoder>,
    geocode_timeout: Duration,
}

impl<'a> FeatureExtractor<'a> {
    #[must_use]
    pub fn new(
        vocabulary: &'a CategoryVocabulary,
        geocoder: Option<&'a dyn Geocoder>,
        geocode_timeout: Duration,
    ) -> Self {
        Self {
            vocabulary,
            geocoder,
            geocode_timeout,
        }
    }

    /// Total vector dimension: `[lat, lon]` + one-hot block + scalar
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        2 + self.vocabulary.len() + 1
    }

    /// Feature vector for an aid request
    ///
    /// Scalar slot is the urgency score, defaulting to medium.
    pub fn request_features(
        &self,
        request: &RequestRecord,
        warnings: &mut Warnings,
    ) -> Result<FeatureVector> {
        let ((lat, lon), warning) = resolve_location(
            &request.id,
            request.location.as_ref(),
            self.geocoder,
            self.geocode_timeout,
        )?;
        if let Some(w) = warning {
            warnings.push(w);
        }

        if !self.vocabulary.contains(&request.category) {
            warnings.push(format!(
                "Request {} category '{}' not in known categories, treating as unknown",
                request.id, request.category
            ));
        }
        let onehot = self.vocabulary.encode(&request.category);

        Ok(self.compose(lat, lon, onehot, request.urgency_score()))
    }

    /// Feature vector for a volunteer
    ///
    /// Only the first listed skill participates; the scalar slot is the
    /// availability flag, defaulting to unavailable.
    pub fn volunteer_features(
        &self,
        volunteer: &VolunteerRecord,
        warnings: &mut Warnings,
    ) -> Result<FeatureVector> {
        let ((lat, lon), warning) = resolve_location(
            &volunteer.id,
            volunteer.location.as_ref(),
            self.geocoder,
            self.geocode_timeout,
        )?;
        if let Some(w) = warning {
            warnings.push(w);
        }

        let skill = volunteer.first_skill().unwrap_or_default();
        if skill.is_empty() {
            warnings.push(format!("Volunteer {} has no skills listed", volunteer.id));
        } else if !self.vocabulary.contains(skill) {
            warnings.push(format!(
                "Volunteer {} skill '{}' not in known categories, treating as unknown",
                volunteer.id, skill
            ));
        }
        let onehot = self.vocabulary.encode(skill);

        Ok(self.compose(lat, lon, onehot, volunteer.availability_flag()))
    }

    /// Build the candidate matrix, skipping records that fail extraction
    ///
    /// Returns the matrix together with the indices of the volunteers that
    /// produced its rows, in input order. One bad record never aborts the
    /// whole pool; an empty matrix means "no candidates", not an error.
    pub fn build_matrix(
        &self,
        volunteers: &[VolunteerRecord],
        warnings: &mut Warnings,
    ) -> (FeatureMatrix, Vec<usize>) {
        let mut matrix = FeatureMatrix::with_capacity(volunteers.len());
        let mut valid_indices = Vec::with_capacity(volunteers.len());

        for (i, volunteer) in volunteers.iter().enumerate() {
            let row = match self.volunteer_features(volunteer, warnings) {
                Ok(row) => row,
                Err(e) => {
                    warnings.push(format!("Skipping volunteer {}: {}", volunteer.id, e));
                    continue;
                }
            };
            match matrix.push_row(row) {
                Ok(()) => valid_indices.push(i),
                Err(e) => {
                    warnings.push(format!("Skipping volunteer {}: {}", volunteer.id, e));
                }
            }
        }

        (matrix, valid_indices)
    }

    fn compose(&self, lat: f64, lon: f64, onehot: Vec<f64>, scalar: f64) -> FeatureVector {
        let mut data = Vec::with_capacity(self.dim());
        data.push(lat);
        data.push(lon);
        data.extend(onehot);
        data.push(scalar);
        FeatureVector::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aidmatch_core::{Location, Urgency};
    use serde_json::json;

    fn vocab() -> CategoryVocabulary {
        CategoryVocabulary::new(["Food", "Medical", "Rescue"])
    }

    fn extractor(vocab: &CategoryVocabulary) -> FeatureExtractor<'_> {
        FeatureExtractor::new(vocab, None, Duration::from_secs(10))
    }

    #[test]
    fn test_request_feature_layout() {
        let vocab = vocab();
        let ex = extractor(&vocab);
        let mut warnings = Warnings::new();

        let request = RequestRecord::new("req-1", "Medical")
            .with_location(Location::coordinates(6.5, 3.4))
            .with_urgency(Urgency::High);

        let features = ex.request_features(&request, &mut warnings).unwrap();
        assert_eq!(features.as_slice(), &[6.5, 3.4, 0.0, 1.0, 0.0, 3.0]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_volunteer_feature_layout() {
        let vocab = vocab();
        let ex = extractor(&vocab);
        let mut warnings = Warnings::new();

        let volunteer = VolunteerRecord::new("vol-1")
            .with_skills(vec!["Rescue".to_string(), "Food".to_string()])
            .with_location(Location::coordinates(5.6, -0.2))
            .with_availability(true);

        let features = ex.volunteer_features(&volunteer, &mut warnings).unwrap();
        // Only the first skill is encoded
        assert_eq!(features.as_slice(), &[5.6, -0.2, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_unknown_category_encodes_to_zeros_with_warning() {
        let vocab = vocab();
        let ex = extractor(&vocab);
        let mut warnings = Warnings::new();

        let request = RequestRecord::new("req-1", "Plumbing")
            .with_location(Location::coordinates(1.0, 2.0));

        let features = ex.request_features(&request, &mut warnings).unwrap();
        assert_eq!(features.as_slice(), &[1.0, 2.0, 0.0, 0.0, 0.0, 2.0]);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_missing_location_uses_sentinel() {
        let vocab = vocab();
        let ex = extractor(&vocab);
        let mut warnings = Warnings::new();

        let volunteer = VolunteerRecord::new("vol-1").with_skill("Medical");
        let features = ex.volunteer_features(&volunteer, &mut warnings).unwrap();
        assert_eq!(features.as_slice()[..2], [0.0, 0.0]);
        assert!(!warnings.is_empty());
    }

    #[test]
    fn test_build_matrix_skips_malformed_records() {
        let vocab = vocab();
        let ex = extractor(&vocab);
        let mut warnings = Warnings::new();

        let good = VolunteerRecord::new("good")
            .with_skill("Medical")
            .with_location(Location::coordinates(1.0, 1.0))
            .with_availability(true);
        let bad: VolunteerRecord = serde_json::from_value(json!({
            "id": "bad",
            "skills": "Rescue",
            "location": {"latitude": "north", "longitude": "east"}
        }))
        .unwrap();
        let also_good = VolunteerRecord::new("also-good")
            .with_skill("Food")
            .with_location(Location::coordinates(2.0, 2.0));

        let (matrix, valid_indices) = ex.build_matrix(&[good, bad, also_good], &mut warnings);
        assert_eq!(matrix.row_count(), 2);
        assert_eq!(valid_indices, vec![0, 2]);
        assert!(warnings.as_slice().iter().any(|w| w.contains("bad")));
    }

    #[test]
    fn test_build_matrix_empty_pool() {
        let vocab = vocab();
        let ex = extractor(&vocab);
        let mut warnings = Warnings::new();

        let (matrix, valid_indices) = ex.build_matrix(&[], &mut warnings);
        assert!(matrix.is_empty());
        assert!(valid_indices.is_empty());
    }

    #[test]
    fn test_dim_matches_vocabulary() {
        let vocab = vocab();
        let ex = extractor(&vocab);
        assert_eq!(ex.dim(), 2 + 3 + 1);
    }
}
