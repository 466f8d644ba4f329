//! Personality configuration: learning rate, bounds, thresholds and the
//! optional pattern table override.
//!
//! Every field has a default, so a YAML file only needs to name what it
//! changes:
//!
//! ```yaml
//! learning_rate: 0.2
//! history:
//!   max_events: 200
//!   retain_events: 150
//! initial_traits:
//!   humor: 6.5
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{PersonaError, Result};
use crate::personality::patterns::Pattern;
use crate::personality::traits::{Trait, TraitBounds};

/// Top-level configuration for a personality core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalityConfig {
    /// Scale applied to pattern weights (and, damped, to emotional influence).
    pub learning_rate: f64,
    /// Inclusive bounds shared by every trait.
    pub trait_bounds: TraitBounds,
    /// Starting value per trait name. Missing traits start at the bounds midpoint.
    pub initial_traits: BTreeMap<String, f64>,
    /// Minimum absolute aggregated delta that gets applied and recorded.
    pub significance_threshold: f64,
    /// Extra factor on emotional influence, on top of `learning_rate`.
    pub emotional_damping: f64,
    /// Learning history retention and persistence.
    pub history: HistoryConfig,
    /// Thresholds for the textual summary.
    pub summary: SummaryThresholds,
    /// Thresholds for the communication style rules.
    pub style: StyleThresholds,
    /// Directory holding the learning history file.
    pub data_dir: PathBuf,
    /// Replaces the built-in pattern catalog when present.
    pub patterns: Option<Vec<Pattern>>,
}

impl Default for PersonalityConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            trait_bounds: TraitBounds::default(),
            initial_traits: Trait::ALL
                .iter()
                .map(|t| (t.as_str().to_string(), 5.0))
                .collect(),
            significance_threshold: 0.001,
            emotional_damping: 0.5,
            history: HistoryConfig::default(),
            summary: SummaryThresholds::default(),
            style: StyleThresholds::default(),
            data_dir: PathBuf::from("data"),
            patterns: None,
        }
    }
}

/// Learning history retention and file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Once the log holds more than this many events it is trimmed.
    pub max_events: usize,
    /// Number of most recent events kept after a trim.
    pub retain_events: usize,
    /// Maximum characters of interaction content kept in an event summary.
    pub summary_chars: usize,
    /// File name inside `data_dir`.
    pub file_name: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_events: 1000,
            retain_events: 800,
            summary_chars: 100,
            file_name: "learning_history.json".to_string(),
        }
    }
}

/// Dominant/weak cut-offs for the personality summary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryThresholds {
    pub dominant_above: f64,
    pub weak_below: f64,
}

impl Default for SummaryThresholds {
    fn default() -> Self {
        Self {
            dominant_above: 6.5,
            weak_below: 3.5,
        }
    }
}

/// High/low cut-offs for the communication style rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleThresholds {
    pub high_above: f64,
    pub low_below: f64,
}

impl Default for StyleThresholds {
    fn default() -> Self {
        Self {
            high_above: 7.0,
            low_below: 4.0,
        }
    }
}

impl PersonalityConfig {
    /// Parse a configuration from a YAML string and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a YAML file on disk.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Initial value for one trait.
    pub fn initial_value(&self, t: Trait) -> f64 {
        self.initial_traits
            .iter()
            .find(|(name, _)| Trait::from_name(name) == Some(t))
            .map(|(_, v)| *v)
            .unwrap_or_else(|| self.trait_bounds.min + self.trait_bounds.span() / 2.0)
    }

    /// Full path of the learning history file.
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.history.file_name)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<()> {
        let bounds = self.trait_bounds;
        bounds.check()?;
        for (name, value) in &self.initial_traits {
            if Trait::from_name(name).is_none() {
                return Err(PersonaError::Validation(format!("unknown trait '{}'", name)));
            }
            if !bounds.contains(*value) {
                return Err(PersonaError::Validation(format!(
                    "trait {} value {} is out of bounds [{}, {}]",
                    name, value, bounds.min, bounds.max
                )));
            }
        }
        if !(self.learning_rate > 0.0) {
            return Err(PersonaError::Validation(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.significance_threshold >= 0.0) {
            return Err(PersonaError::Validation(format!(
                "significance_threshold must not be negative, got {}",
                self.significance_threshold
            )));
        }
        if self.history.max_events == 0 || self.history.retain_events > self.history.max_events {
            return Err(PersonaError::Validation(format!(
                "history.retain_events ({}) must not exceed a non-zero history.max_events ({})",
                self.history.retain_events, self.history.max_events
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PersonalityConfig::default();
        config.validate().unwrap();
        assert_eq!(config.learning_rate, 0.1);
        for t in Trait::ALL {
            assert_eq!(config.initial_value(t), 5.0);
        }
        assert_eq!(
            config.history_path(),
            PathBuf::from("data").join("learning_history.json")
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
learning_rate: 0.2
history:
  max_events: 20
  retain_events: 10
initial_traits:
  humor: 6.5
"#;
        let config = PersonalityConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.learning_rate, 0.2);
        assert_eq!(config.history.max_events, 20);
        assert_eq!(config.history.summary_chars, 100);
        assert_eq!(config.initial_value(Trait::Humor), 6.5);
        // Traits absent from the override start at the midpoint.
        assert_eq!(config.initial_value(Trait::Logic), 5.0);
        assert_eq!(config.significance_threshold, 0.001);
    }

    #[test]
    fn test_rejects_out_of_bounds_initial_trait() {
        let err = PersonalityConfig::from_yaml("initial_traits:\n  empathy: 11.0\n").unwrap_err();
        assert!(matches!(err, PersonaError::Validation(_)));
    }

    #[test]
    fn test_rejects_unknown_initial_trait() {
        let err = PersonalityConfig::from_yaml("initial_traits:\n  charisma: 5.0\n").unwrap_err();
        assert!(err.to_string().contains("charisma"));
    }

    #[test]
    fn test_rejects_inverted_bounds_and_bad_retention() {
        let mut config = PersonalityConfig::default();
        config.trait_bounds = TraitBounds { min: 5.0, max: 1.0 };
        assert!(config.validate().is_err());

        let mut config = PersonalityConfig::default();
        config.history.retain_events = 2000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persona.yaml");
        std::fs::write(&path, "significance_threshold: 0.05\n").unwrap();
        let config = PersonalityConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.significance_threshold, 0.05);

        let missing = PersonalityConfig::from_yaml_file(dir.path().join("nope.yaml"));
        assert!(matches!(missing, Err(PersonaError::Io(_))));
    }
}
