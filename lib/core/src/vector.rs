use serde::{Deserialize, Serialize};

/// A fixed-length numeric feature vector
///
/// Layout for matching is always `[lat, lon] ++ onehot(category) ++ [scalar]`,
/// so every vector produced within a single matching call has the same
/// dimension and feature ordering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    data: Vec<f64>,
}

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f64]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    #[inline]
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    /// Compute L2 (Euclidean) distance
    ///
    /// Returns `f64::INFINITY` on dimension mismatch.
    #[inline]
    pub fn euclidean_distance(&self, other: &FeatureVector) -> f64 {
        if self.dim() != other.dim() {
            return f64::INFINITY;
        }

        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(data: Vec<f64>) -> Self {
        Self::new(data)
    }
}

/// A row-major matrix of feature vectors, one row per candidate
///
/// All rows share the same dimension; `push_row` rejects mismatched rows.
/// Built fresh per matching call and discarded afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<FeatureVector>,
}

impl FeatureMatrix {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dimension of the rows, or 0 for an empty matrix
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.rows.first().map(FeatureVector::dim).unwrap_or(0)
    }

    /// Append a row, enforcing a uniform dimension across the matrix
    pub fn push_row(&mut self, row: FeatureVector) -> crate::Result<()> {
        if !self.rows.is_empty() && row.dim() != self.dim() {
            return Err(crate::Error::InvalidDimension {
                expected: self.dim(),
                actual: row.dim(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&FeatureVector> {
        self.rows.get(index)
    }

    #[inline]
    pub fn rows(&self) -> impl Iterator<Item = &FeatureVector> {
        self.rows.iter()
    }

    /// Values of a single column, in row order
    #[must_use]
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|r| r.as_slice().get(index).copied())
            .collect()
    }

    /// Plain nested lists of floats, for debug output
    #[must_use]
    pub fn to_nested_vec(&self) -> Vec<Vec<f64>> {
        self.rows.iter().map(FeatureVector::to_vec).collect()
    }
}
