//! Boundary records supplied by the surrounding application
//!
//! Requests and volunteers arrive as loosely-shaped JSON from the caller's
//! persistence layer. The union-shaped fields (`location`, `skills`,
//! `availability`, ids) are modelled as untagged enums so that every shape
//! the boundary produces deserializes into one explicit variant, with a
//! catch-all arm where a malformed shape must be detected rather than
//! rejected at the boundary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record identifier - string, UUID, or integer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    String(String),
    Uuid(Uuid),
    Integer(u64),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::String(s) => write!(f, "{}", s),
            RecordId::Uuid(u) => write!(f, "{}", u),
            RecordId::Integer(i) => write!(f, "{}", i),
        }
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::String(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::String(s.to_string())
    }
}

impl From<u64> for RecordId {
    fn from(i: u64) -> Self {
        RecordId::Integer(i)
    }
}

impl From<Uuid> for RecordId {
    fn from(u: Uuid) -> Self {
        RecordId::Uuid(u)
    }
}

/// A location attribute - either resolved coordinates or a textual address
///
/// The `Other` arm absorbs shapes that are neither (wrong types, missing
/// fields); feature extraction treats it as structurally invalid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Location {
    Coordinates { latitude: f64, longitude: f64 },
    Address(String),
    Other(serde_json::Value),
}

impl Location {
    #[inline]
    #[must_use]
    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Location::Coordinates {
            latitude,
            longitude,
        }
    }

    #[inline]
    #[must_use]
    pub fn address(addr: impl Into<String>) -> Self {
        Location::Address(addr.into())
    }
}

/// Urgency of an aid request, on an ordered scale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl Urgency {
    /// Ordered numeric score: low=1, medium=2, high=3
    #[inline]
    #[must_use]
    pub fn score(self) -> f64 {
        match self {
            Urgency::Low => 1.0,
            Urgency::Medium => 2.0,
            Urgency::High => 3.0,
        }
    }
}

/// Volunteer skills - a single name or a list; only the first is used
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Skills {
    One(String),
    Many(Vec<String>),
}

impl Skills {
    /// The first listed skill, if any
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Skills::One(s) => Some(s.as_str()),
            Skills::Many(list) => list.first().map(String::as_str),
        }
    }
}

/// Volunteer availability - a boolean flag or a textual marker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Availability {
    Flag(bool),
    Text(String),
}

impl Availability {
    /// Interpret as a boolean flag
    ///
    /// Textual markers "true", "yes", "available" and "1" (case-insensitive,
    /// trimmed) count as available; any other text does not.
    #[must_use]
    pub fn as_flag(&self) -> bool {
        match self {
            Availability::Flag(b) => *b,
            Availability::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "available" | "1"
            ),
        }
    }
}

/// An aid request awaiting volunteers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestRecord {
    pub id: RecordId,
    /// Needed category, matched against the vocabulary
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Defaults to medium when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
}

impl RequestRecord {
    #[must_use]
    pub fn new(id: impl Into<RecordId>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            location: None,
            urgency: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    /// Urgency score, defaulting to medium
    #[inline]
    #[must_use]
    pub fn urgency_score(&self) -> f64 {
        self.urgency.unwrap_or_default().score()
    }
}

/// A candidate volunteer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VolunteerRecord {
    pub id: RecordId,
    /// One or more skill names; only the first participates in matching
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Skills>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Defaults to unavailable when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
}

impl VolunteerRecord {
    #[must_use]
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            skills: None,
            location: None,
            availability: None,
        }
    }

    #[must_use]
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills = Some(Skills::One(skill.into()));
        self
    }

    #[must_use]
    pub fn with_skills(mut self, skills: Vec<String>) -> Self {
        self.skills = Some(Skills::Many(skills));
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_availability(mut self, available: bool) -> Self {
        self.availability = Some(Availability::Flag(available));
        self
    }

    /// First listed skill, if any
    #[must_use]
    pub fn first_skill(&self) -> Option<&str> {
        self.skills.as_ref().and_then(Skills::first)
    }

    /// Availability as a feature flag: 1.0 if available, else 0.0
    #[inline]
    #[must_use]
    pub fn availability_flag(&self) -> f64 {
        let available = self.availability.as_ref().is_some_and(Availability::as_flag);
        if available {
            1.0
        } else {
            0.0
        }
    }
}
