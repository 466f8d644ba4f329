//! Evolving personality: bounded traits that drift with observed
//! interactions, and the communication style derived from them.
//!
//! # Architecture
//!
//! ```text
//! Interaction (text, type, metadata)
//!   ↓
//! TraitEvolutionEngine::process
//!   ├─ PatternCatalog   trigger substrings → weight × learning_rate
//!   ├─ EmotionalInfluence  influence × learning_rate × damping
//!   └─ context::analyze    length / punctuation / satisfaction (pre-scaled)
//!   ↓  aggregate per trait, drop insignificant deltas
//! TraitStore::set_trait_delta (clamped)  +  LearningHistory::record
//!   ↓  read on demand
//! summary · CommunicationStyle · ResponseModifiers · LearningProgress
//! ```

pub mod context;
pub mod core;
pub mod emotion;
pub mod engine;
pub mod history;
pub mod interaction;
pub mod patterns;
pub mod progress;
pub mod store;
pub mod style;
pub mod traits;

// Re-exports
pub use self::core::PersonalityCore;
pub use emotion::{Emotion, EmotionalInfluence, EmotionalState};
pub use engine::{Adjustment, TraitEvolutionEngine};
pub use history::{HistoryFile, LearningEvent, LearningHistory};
pub use interaction::{Interaction, InteractionType, Satisfaction};
pub use patterns::{Pattern, PatternCatalog};
pub use progress::{Direction, LearningProgress, TraitChange};
pub use store::{TraitProfile, TraitStore};
pub use style::{
    AssertivenessLevel, CommunicationStyle, Formality, HumorUsage, Level, ResponseModifiers,
    Verbosity,
};
pub use traits::{Trait, TraitBounds, TraitSnapshot};
