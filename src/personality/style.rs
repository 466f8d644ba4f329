//! Derived views of a trait snapshot: a textual summary, a communication
//! style record, and numeric response modifiers.
//!
//! Everything here is a pure function of the snapshot and thresholds.
//!
//! ```text
//! TraitSnapshot ─┬─ dominant / weak phrases  → "I am curious. Tending to be impatient."
//!                ├─ high / low rules         → CommunicationStyle
//!                └─ offset + norm × gain     → ResponseModifiers (≈1.0 at midpoint)
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{StyleThresholds, SummaryThresholds};

use super::traits::{Trait, TraitBounds, TraitSnapshot};

// ============================================================================
// Summary
// ============================================================================

/// Sentence emitted when no trait is dominant or weak.
pub const BALANCED_SUMMARY: &str = "I have a balanced personality.";

/// (dominant, weak) descriptive phrase for a trait.
fn phrases(t: Trait) -> (&'static str, &'static str) {
    match t {
        Trait::Curiosity => ("curious", "incurious"),
        Trait::Empathy => ("empathetic", "detached"),
        Trait::Creativity => ("creative", "conventional"),
        Trait::Logic => ("logical", "intuitive rather than logical"),
        Trait::Humor => ("good-humored", "serious"),
        Trait::Assertiveness => ("assertive", "passive"),
        Trait::Patience => ("patient", "impatient"),
        Trait::Openness => ("open to new experiences", "resistant to change"),
    }
}

/// Describe the personality in one or two sentences.
pub fn personality_summary(snapshot: &TraitSnapshot, thresholds: &SummaryThresholds) -> String {
    let dominant: Vec<&str> = snapshot
        .iter()
        .filter(|(_, v)| *v > thresholds.dominant_above)
        .map(|(t, _)| phrases(t).0)
        .collect();
    let weak: Vec<&str> = snapshot
        .iter()
        .filter(|(_, v)| *v < thresholds.weak_below)
        .map(|(t, _)| phrases(t).1)
        .collect();

    let mut parts = Vec::new();
    if !dominant.is_empty() {
        parts.push(format!("I am {}", dominant.join(", ")));
    }
    if !weak.is_empty() {
        parts.push(format!("Tending to be {}", weak.join(", ")));
    }
    if parts.is_empty() {
        return BALANCED_SUMMARY.to_string();
    }
    format!("{}.", parts.join(". "))
}

// ============================================================================
// Communication style
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formality {
    Informal,
    Neutral,
    Formal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    Concise,
    Moderate,
    Verbose,
}

/// Three-step intensity used by emotional expression and question tendency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumorUsage {
    Rare,
    Occasional,
    Frequent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertivenessLevel {
    Passive,
    Balanced,
    Assertive,
}

/// How the agent should phrase its replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationStyle {
    pub formality: Formality,
    pub verbosity: Verbosity,
    pub emotional_expression: Level,
    pub humor_usage: HumorUsage,
    pub question_tendency: Level,
    pub assertiveness_level: AssertivenessLevel,
}

impl Default for CommunicationStyle {
    fn default() -> Self {
        Self {
            formality: Formality::Informal,
            verbosity: Verbosity::Moderate,
            emotional_expression: Level::Moderate,
            humor_usage: HumorUsage::Occasional,
            question_tendency: Level::Moderate,
            assertiveness_level: AssertivenessLevel::Balanced,
        }
    }
}

/// Apply the threshold rules to the default style.
pub fn communication_style(snapshot: &TraitSnapshot, thresholds: &StyleThresholds) -> CommunicationStyle {
    let high = |t: Trait| snapshot.get(t) > thresholds.high_above;
    let low = |t: Trait| snapshot.get(t) < thresholds.low_below;
    let mut style = CommunicationStyle::default();

    if high(Trait::Humor) {
        style.humor_usage = HumorUsage::Frequent;
    } else if low(Trait::Humor) {
        style.humor_usage = HumorUsage::Rare;
    }

    if high(Trait::Curiosity) {
        style.question_tendency = Level::High;
    } else if low(Trait::Curiosity) {
        style.question_tendency = Level::Low;
    }

    if high(Trait::Assertiveness) {
        style.assertiveness_level = AssertivenessLevel::Assertive;
    } else if low(Trait::Assertiveness) {
        style.assertiveness_level = AssertivenessLevel::Passive;
    }

    if high(Trait::Openness) {
        style.verbosity = Verbosity::Verbose;
        style.emotional_expression = Level::High;
    } else if low(Trait::Openness) {
        style.verbosity = Verbosity::Concise;
        style.emotional_expression = Level::Low;
    }

    // Empathy wins over closed-off openness for expression.
    if high(Trait::Empathy) {
        style.emotional_expression = Level::High;
    }

    style
}

// ============================================================================
// Response modifiers
// ============================================================================

/// Multipliers for response generation; 1.0 is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseModifiers {
    pub enthusiasm: f64,
    pub detail_level: f64,
    pub question_frequency: f64,
    pub humor_frequency: f64,
    pub empathy_expression: f64,
    pub directness: f64,
}

/// (trait, offset, gain): modifier = offset + normalized value × gain.
const MODIFIER_TABLE: [(Trait, f64, f64); 6] = [
    (Trait::Openness, 0.5, 1.0),
    (Trait::Logic, 0.5, 1.0),
    (Trait::Curiosity, 0.3, 1.4),
    (Trait::Humor, 0.2, 1.6),
    (Trait::Empathy, 0.4, 1.2),
    (Trait::Assertiveness, 0.4, 1.2),
];

pub fn response_modifiers(snapshot: &TraitSnapshot, bounds: &TraitBounds) -> ResponseModifiers {
    let m = MODIFIER_TABLE.map(|(t, offset, gain)| {
        let norm = (snapshot.get(t) - bounds.min) / bounds.span();
        offset + norm * gain
    });
    ResponseModifiers {
        enthusiasm: m[0],
        detail_level: m[1],
        question_frequency: m[2],
        humor_frequency: m[3],
        empathy_expression: m[4],
        directness: m[5],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(snapshot: &TraitSnapshot) -> String {
        personality_summary(snapshot, &SummaryThresholds::default())
    }

    #[test]
    fn test_midpoint_is_balanced() {
        assert_eq!(summary(&TraitSnapshot::uniform(5.0)), BALANCED_SUMMARY);
    }

    #[test]
    fn test_threshold_values_are_not_classified() {
        let snap = TraitSnapshot::uniform(5.0)
            .with(Trait::Humor, 6.5)
            .with(Trait::Logic, 3.5);
        assert_eq!(summary(&snap), BALANCED_SUMMARY);
    }

    #[test]
    fn test_dominant_and_weak_sentences() {
        let snap = TraitSnapshot::uniform(5.0)
            .with(Trait::Curiosity, 8.0)
            .with(Trait::Empathy, 7.2)
            .with(Trait::Patience, 2.0);
        assert_eq!(
            summary(&snap),
            "I am curious, empathetic. Tending to be impatient."
        );
    }

    #[test]
    fn test_only_weak_traits() {
        let snap = TraitSnapshot::uniform(5.0).with(Trait::Humor, 1.0);
        assert_eq!(summary(&snap), "Tending to be serious.");
    }

    #[test]
    fn test_default_style_at_midpoint() {
        let style = communication_style(&TraitSnapshot::uniform(5.0), &StyleThresholds::default());
        assert_eq!(style, CommunicationStyle::default());
    }

    #[test]
    fn test_style_rules() {
        let snap = TraitSnapshot::uniform(5.0)
            .with(Trait::Humor, 8.0)
            .with(Trait::Curiosity, 3.0)
            .with(Trait::Assertiveness, 7.5)
            .with(Trait::Openness, 2.0);
        let style = communication_style(&snap, &StyleThresholds::default());
        assert_eq!(style.humor_usage, HumorUsage::Frequent);
        assert_eq!(style.question_tendency, Level::Low);
        assert_eq!(style.assertiveness_level, AssertivenessLevel::Assertive);
        assert_eq!(style.verbosity, Verbosity::Concise);
        assert_eq!(style.emotional_expression, Level::Low);
        assert_eq!(style.formality, Formality::Informal);
    }

    #[test]
    fn test_empathy_overrides_low_openness_expression() {
        let snap = TraitSnapshot::uniform(5.0)
            .with(Trait::Openness, 2.0)
            .with(Trait::Empathy, 9.0);
        let style = communication_style(&snap, &StyleThresholds::default());
        assert_eq!(style.verbosity, Verbosity::Concise);
        assert_eq!(style.emotional_expression, Level::High);
    }

    #[test]
    fn test_style_serializes_snake_case() {
        let json = serde_json::to_value(CommunicationStyle::default()).unwrap();
        assert_eq!(json["humor_usage"], "occasional");
        assert_eq!(json["assertiveness_level"], "balanced");
    }

    #[test]
    fn test_modifiers_are_neutral_at_midpoint() {
        let m = response_modifiers(&TraitSnapshot::uniform(5.0), &TraitBounds::default());
        for v in [
            m.enthusiasm,
            m.detail_level,
            m.question_frequency,
            m.humor_frequency,
            m.empathy_expression,
            m.directness,
        ] {
            assert!((v - 1.0).abs() < 1e-9, "modifier {}", v);
        }
    }

    #[test]
    fn test_modifier_range() {
        let bounds = TraitBounds::default();
        let low = response_modifiers(&TraitSnapshot::uniform(0.0), &bounds);
        let high = response_modifiers(&TraitSnapshot::uniform(10.0), &bounds);
        assert!((low.humor_frequency - 0.2).abs() < 1e-9);
        assert!((high.humor_frequency - 1.8).abs() < 1e-9);
        assert!((high.enthusiasm - 1.5).abs() < 1e-9);
        assert!((low.directness - 0.4).abs() < 1e-9);
    }
}
