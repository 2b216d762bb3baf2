//! k-nearest-neighbor volunteer matcher
//!
//! Runs the full pipeline for one call: featurize the request, build the
//! candidate matrix (dropping invalid rows), z-score both against the
//! current pool, then rank candidates by Euclidean distance in normalized
//! space. The matcher is purely functional per call; the only state it
//! carries is immutable configuration and the geocoding collaborator.
//!
//! Failures follow a fail-soft policy throughout: record-local problems
//! are absorbed as warnings, and call-level problems (no candidates, a
//! zero-variance pool) produce an empty, warned result instead of an
//! error. The debug variant exposes every intermediate array plus the
//! absorbed warnings so callers can see why a match set is small or empty.

use std::time::Duration;

use aidmatch_core::{FeatureMatrix, FeatureVector, RequestRecord, VolunteerRecord};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::encoder::CategoryVocabulary;
use crate::features::{FeatureExtractor, Warnings};
use crate::geocode::Geocoder;
use crate::scaler::StandardScaler;

/// Default number of matches returned
pub const DEFAULT_K: usize = 3;

/// Default bound on a single geocoding call
pub const DEFAULT_GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);

/// Matching configuration, supplied at construction
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Category vocabulary shared by request and volunteer encoding
    pub vocabulary: CategoryVocabulary,
    /// Number of matches to return; silently clamped to the candidate count
    pub k: usize,
    /// Bound on each call into the geocoding collaborator
    pub geocode_timeout: Duration,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            vocabulary: CategoryVocabulary::disaster_relief(),
            k: DEFAULT_K,
            geocode_timeout: DEFAULT_GEOCODE_TIMEOUT,
        }
    }
}

impl MatcherConfig {
    #[must_use]
    pub fn new(vocabulary: CategoryVocabulary) -> Self {
        Self {
            vocabulary,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    #[must_use]
    pub fn with_geocode_timeout(mut self, timeout: Duration) -> Self {
        self.geocode_timeout = timeout;
        self
    }
}

/// A ranked match: distance in normalized space plus the original record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub distance: f64,
    pub volunteer: VolunteerRecord,
}

/// Full intermediate state of one debug matching call
///
/// `indices` are row positions in the scaled matrix (i.e. relative to the
/// valid candidates, not the raw input). `matched_volunteers` is identical
/// to the plain output for the same inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    pub request_features: Vec<f64>,
    pub volunteer_features: Vec<Vec<f64>>,
    #[serde(rename = "X_scaled")]
    pub x_scaled: Vec<Vec<f64>>,
    pub req_scaled: Vec<f64>,
    pub distances: Vec<f64>,
    pub indices: Vec<usize>,
    pub matched_volunteers: Vec<VolunteerRecord>,
    pub processing_warnings: Vec<String>,
}

/// k-NN matcher over normalized volunteer features
pub struct Matcher {
    config: MatcherConfig,
    geocoder: Option<Box<dyn Geocoder + Send + Sync>>,
}

impl Matcher {
    /// Create a matcher without a geocoding collaborator
    ///
    /// Textual addresses then resolve to the sentinel coordinates.
    #[must_use]
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            config,
            geocoder: None,
        }
    }

    /// Create a matcher with a geocoding collaborator for textual addresses
    #[must_use]
    pub fn with_geocoder(
        config: MatcherConfig,
        geocoder: Box<dyn Geocoder + Send + Sync>,
    ) -> Self {
        Self {
            config,
            geocoder: Some(geocoder),
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Production entry point: the top `k` volunteers, closest first
    ///
    /// Returns at most `min(k, valid_count)` results. Empty pools, pools
    /// with no valid candidates, and scaling failures all yield an empty
    /// vec; none of them are errors.
    pub fn top_matches(
        &self,
        request: &RequestRecord,
        volunteers: &[VolunteerRecord],
    ) -> Vec<MatchResult> {
        let run = self.run(request, volunteers);
        run.ranked
            .iter()
            .map(|&(row, distance)| MatchResult {
                distance,
                volunteer: volunteers[run.valid_indices[row]].clone(),
            })
            .collect()
    }

    /// Debug entry point: the same ranking plus all intermediate state
    pub fn top_matches_debug(
        &self,
        request: &RequestRecord,
        volunteers: &[VolunteerRecord],
    ) -> MatchReport {
        let run = self.run(request, volunteers);

        let matched_volunteers = run
            .ranked
            .iter()
            .map(|&(row, _)| volunteers[run.valid_indices[row]].clone())
            .collect();

        MatchReport {
            request_features: run
                .request_features
                .as_ref()
                .map(FeatureVector::to_vec)
                .unwrap_or_default(),
            volunteer_features: run.matrix.to_nested_vec(),
            x_scaled: run
                .scaled_matrix
                .as_ref()
                .map(FeatureMatrix::to_nested_vec)
                .unwrap_or_default(),
            req_scaled: run
                .scaled_request
                .as_ref()
                .map(FeatureVector::to_vec)
                .unwrap_or_default(),
            distances: run.ranked.iter().map(|&(_, d)| d).collect(),
            indices: run.ranked.iter().map(|&(row, _)| row).collect(),
            matched_volunteers,
            processing_warnings: run.warnings.into_vec(),
        }
    }

    /// Execute the pipeline once; both entry points consume the same run
    fn run(&self, request: &RequestRecord, volunteers: &[VolunteerRecord]) -> PipelineRun {
        let mut run = PipelineRun::default();

        let geocoder: Option<&dyn Geocoder> = match &self.geocoder {
            Some(g) => Some(g.as_ref()),
            None => None,
        };
        let extractor = FeatureExtractor::new(
            &self.config.vocabulary,
            geocoder,
            self.config.geocode_timeout,
        );

        match extractor.request_features(request, &mut run.warnings) {
            Ok(features) => run.request_features = Some(features),
            Err(e) => {
                run.warnings
                    .push(format!("Failed to extract request features: {}", e));
                return run;
            }
        }

        if volunteers.is_empty() {
            run.warnings.push("No volunteers provided".to_string());
            return run;
        }

        let (matrix, valid_indices) = extractor.build_matrix(volunteers, &mut run.warnings);
        run.matrix = matrix;
        run.valid_indices = valid_indices;

        if run.matrix.is_empty() {
            run.warnings
                .push("No valid volunteer features could be extracted".to_string());
            return run;
        }

        let (scaler, scaled_matrix) = match StandardScaler::fit_transform(&run.matrix) {
            Ok(fitted) => fitted,
            Err(e) => {
                run.warnings
                    .push(format!("Error during scaling: {}. Returning empty matches", e));
                return run;
            }
        };

        let request_features = run
            .request_features
            .as_ref()
            .cloned()
            .unwrap_or_else(|| FeatureVector::new(Vec::new()));
        let scaled_request = match scaler.transform_vector(&request_features) {
            Ok(scaled) => scaled,
            Err(e) => {
                run.warnings
                    .push(format!("Error during scaling: {}. Returning empty matches", e));
                return run;
            }
        };

        // Exhaustive k-NN over the pool; ties broken by original input order
        let mut ranked: Vec<(usize, f64)> = scaled_matrix
            .rows()
            .enumerate()
            .map(|(row, candidate)| (row, scaled_request.euclidean_distance(candidate)))
            .collect();
        ranked.sort_by_key(|&(row, distance)| (OrderedFloat(distance), row));
        ranked.truncate(self.config.k.min(ranked.len()));

        run.scaled_matrix = Some(scaled_matrix);
        run.scaled_request = Some(scaled_request);
        run.ranked = ranked;
        run
    }
}

/// Intermediate state of one matching call
#[derive(Default)]
struct PipelineRun {
    request_features: Option<FeatureVector>,
    matrix: FeatureMatrix,
    valid_indices: Vec<usize>,
    scaled_matrix: Option<FeatureMatrix>,
    scaled_request: Option<FeatureVector>,
    /// `(row in scaled matrix, distance)`, closest first, already truncated
    ranked: Vec<(usize, f64)>,
    warnings: Warnings,
}
