//! Personality trait axes, their bounds, and point-in-time snapshots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{PersonaError, Result};

// ============================================================================
// Trait
// ============================================================================

/// The eight persistent personality axes.
///
/// Declaration order is the canonical order used for iteration, summaries
/// and serialized snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trait {
    Curiosity,
    Empathy,
    Creativity,
    Logic,
    Humor,
    Assertiveness,
    Patience,
    Openness,
}

impl Trait {
    /// All traits in canonical order.
    pub const ALL: [Trait; 8] = [
        Self::Curiosity,
        Self::Empathy,
        Self::Creativity,
        Self::Logic,
        Self::Humor,
        Self::Assertiveness,
        Self::Patience,
        Self::Openness,
    ];

    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Curiosity => "curiosity",
            Self::Empathy => "empathy",
            Self::Creativity => "creativity",
            Self::Logic => "logic",
            Self::Humor => "humor",
            Self::Assertiveness => "assertiveness",
            Self::Patience => "patience",
            Self::Openness => "openness",
        }
    }

    /// Resolve a trait from a free-form name.
    ///
    /// Matching ignores case and surrounding whitespace. Returns `None` for
    /// names outside the enumerated set; callers skip those entries.
    pub fn from_name(name: &str) -> Option<Trait> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Bounds
// ============================================================================

/// Inclusive value range shared by every trait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for TraitBounds {
    fn default() -> Self {
        Self { min: 0.0, max: 10.0 }
    }
}

impl TraitBounds {
    /// Reject ranges that are empty, inverted or not finite.
    pub fn check(&self) -> Result<()> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(())
        } else {
            Err(PersonaError::Validation(format!(
                "trait bounds [{}, {}] is not a valid range",
                self.min, self.max
            )))
        }
    }

    /// Clamp a value into the range. Never panics, even on a range that
    /// fails [`check`](Self::check); a NaN value lands on `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Whether `value` lies inside the range (non-finite values never do).
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && (self.min..=self.max).contains(&value)
    }

    /// Width of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Read-only copy of every trait value at one instant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitSnapshot(BTreeMap<Trait, f64>);

impl TraitSnapshot {
    /// Build a snapshot by reading each trait through `read`.
    pub fn from_fn(mut read: impl FnMut(Trait) -> f64) -> Self {
        Self(Trait::ALL.iter().map(|&t| (t, read(t))).collect())
    }

    /// Snapshot with every trait at the same value.
    pub fn uniform(value: f64) -> Self {
        Self::from_fn(|_| value)
    }

    /// Value of one trait (0.0 if the snapshot was built without it).
    pub fn get(&self, t: Trait) -> f64 {
        self.0.get(&t).copied().unwrap_or_default()
    }

    /// Replace one value, returning the updated snapshot.
    pub fn with(mut self, t: Trait, value: f64) -> Self {
        self.0.insert(t, value);
        self
    }

    /// Iterate in canonical trait order.
    pub fn iter(&self) -> impl Iterator<Item = (Trait, f64)> + '_ {
        self.0.iter().map(|(t, v)| (*t, *v))
    }
}
