//! Personality core: owns one profile and its evolution engine, and wires
//! the learning history to disk.
//!
//! Lifecycle: [`initialize`](PersonalityCore::initialize) loads history,
//! [`analyze_interaction`](PersonalityCore::analyze_interaction) is called
//! once per interaction, [`shutdown`](PersonalityCore::shutdown) saves the
//! history. Persistence problems are logged and never stop the core.

use crate::config::PersonalityConfig;
use crate::error::Result;

use super::emotion::EmotionalInfluence;
use super::engine::TraitEvolutionEngine;
use super::history::{HistoryFile, LearningEvent, LearningHistory};
use super::interaction::Interaction;
use super::progress::{learning_progress, LearningProgress};
use super::store::{TraitProfile, TraitStore};
use super::style::{
    communication_style, personality_summary, response_modifiers, CommunicationStyle,
    ResponseModifiers,
};
use super::traits::TraitSnapshot;

#[derive(Debug)]
pub struct PersonalityCore<S: TraitStore = TraitProfile> {
    config: PersonalityConfig,
    store: S,
    engine: TraitEvolutionEngine,
    history_file: HistoryFile,
    initial: TraitSnapshot,
}

impl PersonalityCore<TraitProfile> {
    /// Core over a fresh in-memory profile.
    pub fn new(config: PersonalityConfig) -> Result<Self> {
        let store = TraitProfile::new(&config)?;
        Self::with_store(config, store)
    }
}

impl<S: TraitStore> PersonalityCore<S> {
    /// Core over a caller-supplied trait store. Fails if the configuration
    /// does not validate.
    pub fn with_store(config: PersonalityConfig, store: S) -> Result<Self> {
        config.validate()?;
        let engine = TraitEvolutionEngine::new(&config);
        let history_file = HistoryFile::new(config.history_path());
        let initial = TraitSnapshot::from_fn(|t| config.trait_bounds.clamp(config.initial_value(t)));
        Ok(Self {
            config,
            store,
            engine,
            history_file,
            initial,
        })
    }

    /// Attach an emotional influence provider.
    pub fn with_emotions(mut self, provider: impl EmotionalInfluence + 'static) -> Self {
        self.engine.set_emotions(Some(Box::new(provider)));
        self
    }

    /// Replace (or remove) the emotional influence provider.
    pub fn set_emotions(&mut self, provider: Option<Box<dyn EmotionalInfluence>>) {
        self.engine.set_emotions(provider);
    }

    /// Load the learning history. A missing file is an empty history; a
    /// broken one is logged and replaced by an empty history.
    pub fn initialize(&mut self) {
        log::info!("Initializing personality core");
        let events = match self.history_file.load() {
            Ok(events) => {
                log::info!("Learning history loaded: {} events", events.len());
                events
            }
            Err(e) => {
                log::error!(
                    "Failed to load learning history from {:?}: {}",
                    self.history_file.path(),
                    e
                );
                Vec::new()
            }
        };
        self.engine
            .replace_history(LearningHistory::from_events(&self.config.history, events));
        log::info!("Initial personality: {:?}", self.current_traits());
    }

    /// Feed one interaction through the engine.
    pub fn analyze_interaction(&mut self, interaction: &Interaction) {
        self.engine.process(&mut self.store, interaction);
    }

    pub fn config(&self) -> &PersonalityConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn history(&self) -> &LearningHistory {
        self.engine.history()
    }

    /// Up to `count` most recent learning events, oldest first.
    pub fn recent_events(&self, count: usize) -> Vec<&LearningEvent> {
        self.engine.history().recent(count)
    }

    pub fn current_traits(&self) -> TraitSnapshot {
        self.store.snapshot()
    }

    pub fn personality_summary(&self) -> String {
        personality_summary(&self.current_traits(), &self.config.summary)
    }

    pub fn communication_style(&self) -> CommunicationStyle {
        communication_style(&self.current_traits(), &self.config.style)
    }

    pub fn response_modifiers(&self) -> ResponseModifiers {
        response_modifiers(&self.current_traits(), &self.config.trait_bounds)
    }

    pub fn learning_progress(&self) -> LearningProgress {
        learning_progress(
            &self.initial,
            &self.current_traits(),
            self.engine.history().total_recorded(),
        )
    }

    /// Write the retained history to disk.
    pub fn save_learning_history(&self) -> Result<()> {
        self.history_file.save(self.engine.history().iter())?;
        log::debug!(
            "Learning history saved to {:?}",
            self.history_file.path()
        );
        Ok(())
    }

    /// Save history and hand back the store.
    pub fn shutdown(self) -> S {
        if let Err(e) = self.save_learning_history() {
            log::error!("Failed to save learning history: {}", e);
        }
        log::info!("Personality core shut down");
        self.store
    }
}
