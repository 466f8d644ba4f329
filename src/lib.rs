//! # Kairo Persona
//!
//! Evolving personality core for a conversational agent. Interaction text
//! nudges eight bounded personality traits through a table of trigger
//! patterns, emotional influence and structural context analysis; every
//! significant change is kept in a bounded learning history, and the current
//! traits drive a textual summary, a communication style and numeric
//! response modifiers.

pub mod config;
pub mod error;
pub mod personality;

pub use config::PersonalityConfig;
pub use error::{PersonaError, Result};
pub use personality::{
    CommunicationStyle, Interaction, InteractionType, LearningEvent, PersonalityCore,
    ResponseModifiers, Trait, TraitEvolutionEngine, TraitProfile, TraitStore,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
