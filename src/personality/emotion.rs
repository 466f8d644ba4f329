//! Emotional influence on personality.
//!
//! The engine only needs a trait-name → signed influence mapping on demand.
//! Any `HashMap<String, f64>` can serve as a fixed provider; [`EmotionalState`]
//! derives the mapping from six emotion intensities.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Source of emotional contributions to trait deltas.
///
/// Names that are not personality traits are skipped by the engine.
pub trait EmotionalInfluence {
    fn influence(&self) -> HashMap<String, f64>;
}

impl EmotionalInfluence for HashMap<String, f64> {
    fn influence(&self) -> HashMap<String, f64> {
        self.clone()
    }
}

/// The six tracked emotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Interest,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Self::Joy,
        Self::Sadness,
        Self::Anger,
        Self::Fear,
        Self::Surprise,
        Self::Interest,
    ];

    /// Resting intensity of a freshly created state.
    pub fn default_intensity(&self) -> f64 {
        match self {
            Self::Joy | Self::Interest => 5.0,
            _ => 0.0,
        }
    }

    /// Per-trait influence at full intensity.
    fn trait_weights(&self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Joy => &[("empathy", 0.1), ("openness", 0.1), ("patience", 0.05)],
            Self::Sadness => &[("empathy", 0.05), ("patience", -0.05), ("assertiveness", -0.1)],
            Self::Anger => &[("assertiveness", 0.1), ("patience", -0.15), ("empathy", -0.05)],
            Self::Fear => &[("openness", -0.1), ("assertiveness", -0.1), ("patience", 0.05)],
            Self::Surprise => &[("curiosity", 0.1), ("openness", 0.05)],
            Self::Interest => &[("curiosity", 0.15), ("openness", 0.1), ("creativity", 0.05)],
        }
    }
}

/// Intensity above which an emotion starts to shape personality.
pub const NEUTRAL_INTENSITY: f64 = 5.0;

const MAX_INTENSITY: f64 = 10.0;

/// Current emotion intensities in `[0, 10]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionalState(BTreeMap<Emotion, f64>);

impl Default for EmotionalState {
    fn default() -> Self {
        Self(
            Emotion::ALL
                .iter()
                .map(|&e| (e, e.default_intensity()))
                .collect(),
        )
    }
}

impl EmotionalState {
    pub fn intensity(&self, emotion: Emotion) -> f64 {
        self.0.get(&emotion).copied().unwrap_or_default()
    }

    /// Set an intensity, clamped to `[0, 10]`.
    pub fn set(&mut self, emotion: Emotion, value: f64) {
        if value.is_finite() {
            self.0.insert(emotion, value.clamp(0.0, MAX_INTENSITY));
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, emotion: Emotion, value: f64) -> Self {
        self.set(emotion, value);
        self
    }
}

impl EmotionalInfluence for EmotionalState {
    fn influence(&self) -> HashMap<String, f64> {
        let mut out: HashMap<String, f64> = HashMap::new();
        for (&emotion, &value) in &self.0 {
            if value <= NEUTRAL_INTENSITY {
                continue;
            }
            let factor = (value - NEUTRAL_INTENSITY) / (MAX_INTENSITY - NEUTRAL_INTENSITY);
            for &(name, weight) in emotion.trait_weights() {
                *out.entry(name.to_string()).or_insert(0.0) += weight * factor;
            }
        }
        out
    }
}
