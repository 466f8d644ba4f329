//! Trait evolution engine.
//!
//! The engine turns one interaction into a single aggregated delta per trait
//! from three channels, each with its own scaling:
//!
//! ```text
//! pattern weight      × learning_rate
//! emotional influence × learning_rate × emotional_damping
//! context delta       (pre-scaled by the interaction type)
//! ```
//!
//! Deltas whose magnitude does not exceed the significance threshold are
//! dropped. What remains is applied to the [`TraitStore`] in one pass and
//! summarized as a [`LearningEvent`]; if nothing remains, nothing changes.

use std::collections::BTreeMap;

use crate::config::PersonalityConfig;

use super::context;
use super::emotion::EmotionalInfluence;
use super::history::{LearningEvent, LearningHistory};
use super::interaction::Interaction;
use super::patterns::PatternCatalog;
use super::store::TraitStore;
use super::traits::Trait;

/// Reason tag for the emotional channel.
pub const EMOTIONAL_REASON: &str = "emotional_influence";
/// Reason tag for the context channel.
pub const CONTEXT_REASON: &str = "context_analysis";

/// Reason tag for a matched pattern.
pub fn pattern_reason(pattern: &str) -> String {
    format!("{}_pattern", pattern)
}

/// Significant deltas computed for one interaction, not yet applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    pub deltas: BTreeMap<Trait, f64>,
    /// Contributing reasons in the order they first appeared.
    pub reasons: Vec<String>,
}

/// Running per-trait sum with its contributing reasons.
#[derive(Default)]
struct Aggregate {
    deltas: BTreeMap<Trait, f64>,
    reasons: Vec<String>,
}

impl Aggregate {
    /// Add `amount` to the named trait. Unknown names and non-finite amounts
    /// are skipped; returns whether anything was added.
    fn add_named(&mut self, name: &str, amount: f64, source: &str) -> bool {
        match Trait::from_name(name) {
            Some(t) => self.add(t, amount),
            None => {
                log::debug!("Skipping unknown trait '{}' from {}", name, source);
                false
            }
        }
    }

    fn add(&mut self, t: Trait, amount: f64) -> bool {
        if !amount.is_finite() {
            return false;
        }
        *self.deltas.entry(t).or_insert(0.0) += amount;
        true
    }

    fn reason(&mut self, reason: String) {
        if !self.reasons.contains(&reason) {
            self.reasons.push(reason);
        }
    }
}

/// Owns the pattern table, the emotional provider and the learning history.
/// The only writer of trait values.
pub struct TraitEvolutionEngine {
    learning_rate: f64,
    emotional_damping: f64,
    significance_threshold: f64,
    summary_chars: usize,
    catalog: PatternCatalog,
    emotions: Option<Box<dyn EmotionalInfluence>>,
    history: LearningHistory,
}

impl std::fmt::Debug for TraitEvolutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraitEvolutionEngine")
            .field("learning_rate", &self.learning_rate)
            .field("significance_threshold", &self.significance_threshold)
            .field("patterns", &self.catalog.patterns().len())
            .field("has_emotions", &self.emotions.is_some())
            .field("history_len", &self.history.len())
            .finish()
    }
}

impl TraitEvolutionEngine {
    /// Engine with the configured (or built-in) pattern table and no
    /// emotional provider.
    pub fn new(config: &PersonalityConfig) -> Self {
        let catalog = match &config.patterns {
            Some(patterns) => PatternCatalog::from_patterns(patterns.clone()),
            None => PatternCatalog::default(),
        };
        Self {
            learning_rate: config.learning_rate,
            emotional_damping: config.emotional_damping,
            significance_threshold: config.significance_threshold,
            summary_chars: config.history.summary_chars,
            catalog,
            emotions: None,
            history: LearningHistory::new(&config.history),
        }
    }

    /// Attach an emotional influence provider.
    pub fn with_emotions(mut self, provider: impl EmotionalInfluence + 'static) -> Self {
        self.emotions = Some(Box::new(provider));
        self
    }

    /// Replace (or remove) the emotional influence provider.
    pub fn set_emotions(&mut self, provider: Option<Box<dyn EmotionalInfluence>>) {
        self.emotions = provider;
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn history(&self) -> &LearningHistory {
        &self.history
    }

    pub(crate) fn replace_history(&mut self, history: LearningHistory) {
        self.history = history;
    }

    /// Compute the significant deltas for an interaction without touching
    /// any state. `None` when the content is missing or empty, or when no
    /// delta clears the threshold.
    pub fn propose(&self, interaction: &Interaction) -> Option<Adjustment> {
        let content = interaction.text()?;
        let lowered = content.to_lowercase();
        let mut agg = Aggregate::default();

        for pattern in self.catalog.matching(&lowered) {
            let source = pattern_reason(&pattern.name);
            let mut contributed = false;
            for (name, weight) in &pattern.traits {
                contributed |= agg.add_named(name, weight * self.learning_rate, &source);
            }
            if contributed {
                agg.reason(source);
            }
        }

        if let Some(provider) = &self.emotions {
            let mut influence: Vec<(String, f64)> = provider.influence().into_iter().collect();
            influence.sort_by(|a, b| a.0.cmp(&b.0));
            let scale = self.learning_rate * self.emotional_damping;
            let mut contributed = false;
            for (name, amount) in influence {
                contributed |= agg.add_named(&name, amount * scale, EMOTIONAL_REASON);
            }
            if contributed {
                agg.reason(EMOTIONAL_REASON.to_string());
            }
        }

        let context = context::analyze(interaction);
        let mut contributed = false;
        for (t, amount) in context {
            contributed |= agg.add(t, amount);
        }
        if contributed {
            agg.reason(CONTEXT_REASON.to_string());
        }

        let threshold = self.significance_threshold;
        let deltas: BTreeMap<Trait, f64> = agg
            .deltas
            .into_iter()
            .filter(|(_, delta)| delta.abs() > threshold)
            .collect();

        if deltas.is_empty() {
            None
        } else {
            Some(Adjustment {
                deltas,
                reasons: agg.reasons,
            })
        }
    }

    /// Process one interaction: aggregate, apply significant deltas to
    /// `store`, and record a learning event. Invalid input is a no-op.
    pub fn process<S: TraitStore + ?Sized>(&mut self, store: &mut S, interaction: &Interaction) {
        let Some(adjustment) = self.propose(interaction) else {
            return;
        };
        let content = interaction.text().unwrap_or_default();
        let reason_str = adjustment.reasons.join(", ");

        for (&t, &delta) in &adjustment.deltas {
            let old = store.get_trait(t);
            let new = store.set_trait_delta(t, delta);
            if new != old {
                log::info!("Trait updated: {} {:.2} -> {:.2} ({})", t, old, new, reason_str);
            }
        }

        let event = LearningEvent::new(
            content,
            self.summary_chars,
            adjustment.deltas,
            adjustment.reasons,
            store.age_hours(),
        );
        log::debug!(
            "Learning event recorded: {:?} ({})",
            event.trait_changes,
            reason_str
        );
        self.history.record(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HistoryConfig;
    use crate::personality::emotion::{Emotion, EmotionalState};
    use crate::personality::interaction::SATISFACTION_KEY;
    use crate::personality::patterns::Pattern;
    use crate::personality::store::TraitProfile;
    use crate::personality::traits::TraitSnapshot;
    use std::collections::HashMap;

    fn setup() -> (TraitEvolutionEngine, TraitProfile) {
        let config = PersonalityConfig::default();
        (TraitEvolutionEngine::new(&config), TraitProfile::new(&config).unwrap())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_gratitude_raises_empathy_and_patience() {
        let (mut engine, mut profile) = setup();
        engine.process(&mut profile, &Interaction::user("Muito obrigado pela ajuda"));
        assert!(close(profile.get_trait(Trait::Empathy), 5.0 + 0.08 * 0.1));
        assert!(close(profile.get_trait(Trait::Patience), 5.0 + 0.05 * 0.1));
        assert_eq!(engine.history().len(), 1);
        let event = engine.history().recent(1)[0];
        assert_eq!(event.reasons, vec!["gratitude_pattern".to_string()]);
    }

    #[test]
    fn test_delta_scales_with_learning_rate() {
        let config = PersonalityConfig {
            learning_rate: 0.5,
            ..PersonalityConfig::default()
        };
        let mut engine = TraitEvolutionEngine::new(&config);
        let mut profile = TraitProfile::new(&config).unwrap();
        engine.process(&mut profile, &Interaction::user("Muito obrigado pela ajuda"));
        assert!(close(profile.get_trait(Trait::Empathy), 5.0 + 0.08 * 0.5));
    }

    #[test]
    fn test_question_and_technical_aggregate() {
        let (engine, _) = setup();
        let adj = engine
            .propose(&Interaction::user("Esse algoritmo funciona?"))
            .unwrap();
        // question: curiosity 0.05, technical: curiosity 0.05
        assert!(close(adj.deltas[&Trait::Curiosity], 0.1 * 0.1));
        assert!(close(adj.deltas[&Trait::Openness], 0.03 * 0.1));
        assert!(close(adj.deltas[&Trait::Logic], 0.07 * 0.1));
        assert_eq!(adj.reasons, vec!["question_pattern", "technical_pattern"]);
    }

    #[test]
    fn test_short_content_lowers_patience() {
        let (mut engine, mut profile) = setup();
        engine.process(&mut profile, &Interaction::user("ok"));
        assert!(close(profile.get_trait(Trait::Patience), 4.99));
        assert_eq!(
            engine.history().recent(1)[0].reasons,
            vec![CONTEXT_REASON.to_string()]
        );
    }

    #[test]
    fn test_long_content_raises_patience() {
        let (mut engine, mut profile) = setup();
        engine.process(&mut profile, &Interaction::user("a".repeat(250)));
        assert!(close(profile.get_trait(Trait::Patience), 5.02));
        assert!(close(profile.get_trait(Trait::Empathy), 5.03));
    }

    #[test]
    fn test_empty_or_missing_content_is_a_no_op() {
        let (mut engine, mut profile) = setup();
        engine.process(&mut profile, &Interaction::user(""));
        let mut missing = Interaction::user("obrigado");
        missing.content = None;
        engine.process(&mut profile, &missing);
        assert_eq!(profile.snapshot(), TraitSnapshot::uniform(5.0));
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_insignificant_deltas_change_nothing() {
        let config = PersonalityConfig {
            significance_threshold: 0.05,
            ..PersonalityConfig::default()
        };
        let mut engine = TraitEvolutionEngine::new(&config);
        let mut profile = TraitProfile::new(&config).unwrap();
        engine.process(&mut profile, &Interaction::user("obrigado, ficou ótimo"));
        assert_eq!(profile.snapshot(), TraitSnapshot::uniform(5.0));
        assert_eq!(engine.history().total_recorded(), 0);
    }

    #[test]
    fn test_delta_equal_to_threshold_is_dropped() {
        let config = PersonalityConfig {
            significance_threshold: 0.01,
            ..PersonalityConfig::default()
        };
        let mut engine = TraitEvolutionEngine::new(&config);
        let mut profile = TraitProfile::new(&config).unwrap();
        // Short content yields exactly -0.01 patience.
        engine.process(&mut profile, &Interaction::user("ok"));
        assert_eq!(profile.snapshot(), TraitSnapshot::uniform(5.0));
        assert_eq!(engine.history().total_recorded(), 0);
    }

    #[test]
    fn test_plain_medium_text_records_nothing() {
        let (mut engine, mut profile) = setup();
        engine.process(&mut profile, &Interaction::user("bom dia para você"));
        assert!(engine.history().is_empty());
        assert_eq!(profile.snapshot(), TraitSnapshot::uniform(5.0));
    }

    #[test]
    fn test_emotional_influence_is_damped() {
        let config = PersonalityConfig::default();
        let mut engine = TraitEvolutionEngine::new(&config)
            .with_emotions(EmotionalState::default().with(Emotion::Joy, 10.0));
        let mut profile = TraitProfile::new(&config).unwrap();
        engine.process(&mut profile, &Interaction::user("bom dia para você"));
        // joy → empathy 0.1 × lr 0.1 × 0.5
        assert!(close(profile.get_trait(Trait::Empathy), 5.005));
        assert_eq!(
            engine.history().recent(1)[0].reasons,
            vec![EMOTIONAL_REASON.to_string()]
        );
    }

    #[test]
    fn test_unknown_trait_names_are_skipped() {
        let config = PersonalityConfig {
            patterns: Some(vec![Pattern::new(
                "praise",
                &["great"],
                &[("charisma", 0.5), ("empathy", 0.5)],
            )]),
            ..PersonalityConfig::default()
        };
        let influence: HashMap<String, f64> =
            [("wisdom".to_string(), 3.0)].into_iter().collect();
        let mut engine = TraitEvolutionEngine::new(&config).with_emotions(influence);
        let mut profile = TraitProfile::new(&config).unwrap();
        engine.process(&mut profile, &Interaction::user("great answer here"));
        assert!(close(profile.get_trait(Trait::Empathy), 5.05));
        let event = engine.history().recent(1)[0];
        assert_eq!(event.trait_changes.len(), 1);
        assert_eq!(event.reasons, vec!["praise_pattern".to_string()]);
    }

    #[test]
    fn test_process_is_deterministic() {
        let config = PersonalityConfig::default();
        let emotions = || EmotionalState::default().with(Emotion::Interest, 8.0);
        let interaction = Interaction::user("Como funciona esse código? Por que assim?")
            .with_metadata(SATISFACTION_KEY, "high");

        let mut a = TraitProfile::new(&config).unwrap();
        TraitEvolutionEngine::new(&config)
            .with_emotions(emotions())
            .process(&mut a, &interaction);
        let mut b = TraitProfile::new(&config).unwrap();
        TraitEvolutionEngine::new(&config)
            .with_emotions(emotions())
            .process(&mut b, &interaction);
        assert_eq!(a.snapshot(), b.snapshot());
        assert_ne!(a.snapshot(), TraitSnapshot::uniform(5.0));
    }

    #[test]
    fn test_values_stay_bounded_under_repetition() {
        let (mut engine, mut profile) = setup();
        let pushy = Interaction::user("rápido, urgente, que demora! lento!!!");
        for _ in 0..2000 {
            engine.process(&mut profile, &pushy);
        }
        for (_, v) in profile.snapshot().iter() {
            assert!((0.0..=10.0).contains(&v));
        }
        assert_eq!(profile.get_trait(Trait::Patience), 0.0);
    }

    #[test]
    fn test_history_window_and_counter() {
        let config = PersonalityConfig {
            history: HistoryConfig {
                max_events: 5,
                retain_events: 4,
                ..HistoryConfig::default()
            },
            ..PersonalityConfig::default()
        };
        let mut engine = TraitEvolutionEngine::new(&config);
        let mut profile = TraitProfile::new(&config).unwrap();
        for _ in 0..12 {
            engine.process(&mut profile, &Interaction::user("valeu!"));
            assert!(engine.history().len() <= 5);
        }
        assert_eq!(engine.history().total_recorded(), 12);
    }

    #[test]
    fn test_event_summary_is_truncated() {
        let (mut engine, mut profile) = setup();
        let long = format!("obrigado {}", "z".repeat(300));
        engine.process(&mut profile, &Interaction::user(long));
        let event = engine.history().recent(1)[0];
        assert_eq!(event.content_summary.chars().count(), 103);
        assert!(event.content_summary.starts_with("obrigado"));
    }
}
