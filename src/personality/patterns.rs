//! Interaction pattern catalog and matcher.
//!
//! A pattern fires when any of its triggers occurs anywhere in the lowercased
//! text. Matching is plain substring containment, so "como" also fires inside
//! "comovente". Every firing pattern contributes independently.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named trigger-set → trait-weight rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    pub triggers: Vec<String>,
    /// Trait name → signed base weight, scaled by the learning rate when applied.
    pub traits: BTreeMap<String, f64>,
}

impl Pattern {
    pub fn new(name: &str, triggers: &[&str], traits: &[(&str, f64)]) -> Self {
        Self {
            name: name.to_string(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            traits: traits.iter().map(|(t, w)| (t.to_string(), *w)).collect(),
        }
    }

    /// Whether any trigger occurs in `lowered` (already lowercased text).
    pub fn matches(&self, lowered: &str) -> bool {
        self.triggers
            .iter()
            .any(|trigger| !trigger.is_empty() && lowered.contains(trigger.as_str()))
    }
}

static BUILTIN_PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    vec![
        Pattern::new(
            "question",
            &["?", "como", "por que", "quando", "onde", "o que", "quem"],
            &[("curiosity", 0.05), ("openness", 0.03)],
        ),
        Pattern::new(
            "gratitude",
            &["obrigado", "obrigada", "valeu", "thanks", "thank you", "grato", "grata"],
            &[("empathy", 0.08), ("patience", 0.05)],
        ),
        Pattern::new(
            "disagreement",
            &["não concordo", "discordo", "acho que não", "não acho", "i disagree"],
            &[("assertiveness", 0.06), ("logic", 0.04)],
        ),
        Pattern::new(
            "creativity_request",
            &["crie", "invente", "imagine", "criativo", "original", "create", "invent"],
            &[("creativity", 0.1), ("openness", 0.05)],
        ),
        Pattern::new(
            "humor",
            &["haha", "rsrs", "kkkk", "engraçado", "piada", "humor", "funny"],
            &[("humor", 0.08), ("empathy", 0.03)],
        ),
        Pattern::new(
            "technical",
            &["código", "programação", "algoritmo", "técnico", "sistema", "code", "algorithm"],
            &[("logic", 0.07), ("curiosity", 0.05)],
        ),
        Pattern::new(
            "emotional_sharing",
            &["sinto", "emoção", "sentimento", "coração", "alma", "i feel"],
            &[("empathy", 0.1), ("openness", 0.06)],
        ),
        Pattern::new(
            "impatience",
            &["rápido", "pressa", "demora", "lento", "urgente", "hurry", "urgent"],
            &[("patience", -0.05), ("assertiveness", 0.03)],
        ),
    ]
});

/// Ordered, immutable table of patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternCatalog {
    patterns: Vec<Pattern>,
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::from_patterns(BUILTIN_PATTERNS.clone())
    }
}

impl PatternCatalog {
    /// Build a catalog from explicit patterns. Triggers are lowercased so
    /// matching stays case-insensitive.
    pub fn from_patterns(patterns: Vec<Pattern>) -> Self {
        let patterns = patterns
            .into_iter()
            .map(|mut p| {
                p.triggers = p.triggers.iter().map(|t| t.to_lowercase()).collect();
                p
            })
            .collect();
        Self { patterns }
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    /// Patterns firing on `lowered`, in catalog order.
    pub fn matching<'a>(&'a self, lowered: &'a str) -> impl Iterator<Item = &'a Pattern> + 'a {
        self.patterns.iter().filter(move |p| p.matches(lowered))
    }
}
