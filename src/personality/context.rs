//! Structural context analysis.
//!
//! Derives trait deltas from how an interaction looks rather than what it
//! says: its length, punctuation and any explicit satisfaction signal. All
//! deltas are already scaled by the interaction-type multiplier, so the
//! engine adds them as-is. Rules run in a fixed order; a later rule naming
//! the same trait replaces the earlier value.

use std::collections::BTreeMap;

use super::interaction::{Interaction, InteractionType, Satisfaction};
use super::traits::Trait;

/// Content longer than this many characters counts as engaged.
pub const LONG_CONTENT_CHARS: usize = 200;
/// Content shorter than this many characters counts as hurried.
pub const SHORT_CONTENT_CHARS: usize = 10;
/// More exclamation marks than this boosts expressiveness.
pub const EXCLAMATION_THRESHOLD: usize = 2;
/// More question marks than this boosts curiosity.
pub const QUESTION_THRESHOLD: usize = 1;

const EXCLAMATION_STEP: f64 = 0.01;

/// Weight of context deltas by interaction origin.
pub fn base_multiplier(kind: &InteractionType) -> f64 {
    match kind {
        InteractionType::UserMessage => 1.0,
        InteractionType::SystemEvent => 0.3,
        InteractionType::Other(_) => 0.5,
    }
}

/// Context deltas for one interaction. Empty for interactions without text.
pub fn analyze(interaction: &Interaction) -> BTreeMap<Trait, f64> {
    let mut deltas = BTreeMap::new();
    let Some(content) = interaction.text() else {
        return deltas;
    };
    let m = base_multiplier(&interaction.interaction_type);

    let length = content.chars().count();
    if length > LONG_CONTENT_CHARS {
        deltas.insert(Trait::Patience, 0.02 * m);
        deltas.insert(Trait::Empathy, 0.03 * m);
    } else if length < SHORT_CONTENT_CHARS {
        deltas.insert(Trait::Patience, -0.01 * m);
    }

    let exclamations = content.matches('!').count();
    if exclamations > EXCLAMATION_THRESHOLD {
        deltas.insert(Trait::Humor, EXCLAMATION_STEP * exclamations as f64 * m);
        deltas.insert(Trait::Openness, 0.02 * m);
    }

    let questions = content.matches('?').count();
    if questions > QUESTION_THRESHOLD {
        deltas.insert(Trait::Curiosity, 0.04 * m);
        deltas.insert(Trait::Openness, 0.02 * m);
    }

    match interaction.satisfaction() {
        Some(Satisfaction::High) => {
            deltas.insert(Trait::Empathy, 0.05 * m);
            deltas.insert(Trait::Patience, 0.03 * m);
        }
        Some(Satisfaction::Low) => {
            deltas.insert(Trait::Assertiveness, 0.03 * m);
            deltas.insert(Trait::Logic, 0.02 * m);
        }
        None => {}
    }

    deltas
}
