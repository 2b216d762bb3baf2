//! Per-call z-score normalization
//!
//! A scaler is fit on the candidate matrix of the current matching call and
//! the same fitted model is applied to the query vector, then discarded.
//! Scores are therefore call-relative: rankings are meaningful within one
//! call, not across calls.

use aidmatch_core::{Error, FeatureMatrix, FeatureVector, Result};

/// Per-column mean and standard deviation, fit from one candidate matrix
///
/// Standard deviation is the population deviation, matching the usual
/// fit-transform convention. Fitting fails on an empty matrix or on any
/// zero-variance column, since dividing by a zero deviation is undefined;
/// the matcher converts that failure into an empty, warned result.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl StandardScaler {
    /// Fit column means and deviations from the matrix
    pub fn fit(matrix: &FeatureMatrix) -> Result<Self> {
        if matrix.is_empty() {
            return Err(Error::Scaling(
                "cannot fit scaler on an empty matrix".to_string(),
            ));
        }

        let dim = matrix.dim();
        let n = matrix.row_count() as f64;

        let mut mean = vec![0.0; dim];
        for row in matrix.rows() {
            for (m, v) in mean.iter_mut().zip(row.as_slice()) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut variance = vec![0.0; dim];
        for row in matrix.rows() {
            for ((var, v), m) in variance.iter_mut().zip(row.as_slice()).zip(&mean) {
                let d = v - m;
                *var += d * d;
            }
        }

        let mut std = Vec::with_capacity(dim);
        for (column, var) in variance.iter().enumerate() {
            let sigma = (var / n).sqrt();
            if sigma == 0.0 {
                return Err(Error::Scaling(format!(
                    "column {} has zero variance across {} candidates",
                    column,
                    matrix.row_count()
                )));
            }
            std.push(sigma);
        }

        Ok(Self { mean, std })
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    #[inline]
    #[must_use]
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    #[inline]
    #[must_use]
    pub fn std(&self) -> &[f64] {
        &self.std
    }

    /// Apply the fitted transform to a single vector
    pub fn transform_vector(&self, vector: &FeatureVector) -> Result<FeatureVector> {
        if vector.dim() != self.dim() {
            return Err(Error::InvalidDimension {
                expected: self.dim(),
                actual: vector.dim(),
            });
        }

        let scaled = vector
            .as_slice()
            .iter()
            .zip(&self.mean)
            .zip(&self.std)
            .map(|((v, m), s)| (v - m) / s)
            .collect();
        Ok(FeatureVector::new(scaled))
    }

    /// Apply the fitted transform to every row of a matrix
    pub fn transform_matrix(&self, matrix: &FeatureMatrix) -> Result<FeatureMatrix> {
        let mut scaled = FeatureMatrix::with_capacity(matrix.row_count());
        for row in matrix.rows() {
            scaled.push_row(self.transform_vector(row)?)?;
        }
        Ok(scaled)
    }

    /// Fit on the matrix and return its scaled copy along with the model
    pub fn fit_transform(matrix: &FeatureMatrix) -> Result<(Self, FeatureMatrix)> {
        let scaler = Self::fit(matrix)?;
        let scaled = scaler.transform_matrix(matrix)?;
        Ok((scaler, scaled))
    }
}
