//! Fixed-vocabulary one-hot category encoder
//!
//! The vocabulary is the ordered set of recognized request types and
//! volunteer skills. It is fixed at construction and shared by request and
//! volunteer encoding so that vector dimensions align. Unknown categories
//! encode to the all-zero vector rather than failing.

use ahash::AHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered, immutable set of known category names
///
/// Names are deduplicated and sorted at construction, which fixes the
/// one-hot dimensionality and position of every category for the lifetime
/// of the vocabulary. Serializes as a plain list of names.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryVocabulary {
    categories: Vec<String>,
    index: AHashMap<String, usize>,
}

impl CategoryVocabulary {
    /// Build a vocabulary from category names, deduplicating and sorting
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories: Vec<String> = names.into_iter().map(Into::into).collect();
        categories.sort();
        categories.dedup();

        let index = categories
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Self { categories, index }
    }

    /// The default disaster-relief vocabulary
    #[must_use]
    pub fn disaster_relief() -> Self {
        Self::new([
            "Medical",
            "Food Logistics",
            "Rescue",
            "Shelter Management",
            "Transportation",
            "Communication",
            "General Labor",
            "Food",
            "Shelter",
        ])
    }

    /// Number of known categories (the one-hot dimensionality)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.index.contains_key(category)
    }

    /// Position of a category within the one-hot block, if known
    #[inline]
    #[must_use]
    pub fn position(&self, category: &str) -> Option<usize> {
        self.index.get(category).copied()
    }

    /// Category names in encoding order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    /// One-hot encode a category
    ///
    /// Members get a 1.0 at their position; unknown or empty strings get
    /// the all-zero vector. Never an error.
    #[must_use]
    pub fn encode(&self, category: &str) -> Vec<f64> {
        let mut onehot = vec![0.0; self.categories.len()];
        if let Some(pos) = self.position(category) {
            onehot[pos] = 1.0;
        }
        onehot
    }
}

impl Default for CategoryVocabulary {
    fn default() -> Self {
        Self::disaster_relief()
    }
}

impl Serialize for CategoryVocabulary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.categories.serialize(serializer)
    }
}

// The lookup index is rebuilt on deserialization rather than stored.
impl<'de> Deserialize<'de> for CategoryVocabulary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names = Vec::<String>::deserialize(deserializer)?;
        Ok(Self::new(names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_is_sorted_and_deduplicated() {
        let vocab = CategoryVocabulary::new(["Rescue", "Medical", "Rescue", "Food"]);
        let names: Vec<&str> = vocab.names().collect();
        assert_eq!(names, vec!["Food", "Medical", "Rescue"]);
        assert_eq!(vocab.len(), 3);
    }

    #[test]
    fn test_encode_known_category() {
        let vocab = CategoryVocabulary::new(["Food", "Medical", "Rescue"]);
        assert_eq!(vocab.encode("Medical"), vec![0.0, 1.0, 0.0]);
        assert_eq!(vocab.encode("Food"), vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_encode_unknown_category_is_all_zero() {
        let vocab = CategoryVocabulary::new(["Food", "Medical", "Rescue"]);
        assert_eq!(vocab.encode("Plumbing"), vec![0.0, 0.0, 0.0]);
        assert_eq!(vocab.encode(""), vec![0.0, 0.0, 0.0]);
        // Two different unknown strings encode identically
        assert_eq!(vocab.encode("Plumbing"), vocab.encode("Knitting"));
    }

    #[test]
    fn test_disaster_relief_vocabulary() {
        let vocab = CategoryVocabulary::disaster_relief();
        assert_eq!(vocab.len(), 9);
        assert!(vocab.contains("Medical"));
        assert!(vocab.contains("Shelter Management"));
        // Sorted order fixes positions
        assert_eq!(vocab.position("Communication"), Some(0));
        assert_eq!(vocab.position("Transportation"), Some(8));
    }

    #[test]
    fn test_serde_roundtrip_rebuilds_index() {
        let vocab = CategoryVocabulary::new(["Food", "Medical"]);
        let json = serde_json::to_string(&vocab).unwrap();
        assert_eq!(json, r#"["Food","Medical"]"#);

        let parsed: CategoryVocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.encode("Medical"), vec![0.0, 1.0]);
    }

    #[test]
    fn test_encode_case_sensitive() {
        let vocab = CategoryVocabulary::new(["Medical"]);
        assert_eq!(vocab.encode("medical"), vec![0.0]);
    }
}
