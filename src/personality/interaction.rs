//! Interaction events fed to the evolution engine.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Metadata key carrying the user's satisfaction signal.
pub const SATISFACTION_KEY: &str = "user_satisfaction";

/// Where an interaction came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InteractionType {
    /// Text written by the user.
    UserMessage,
    /// Text produced by the system itself.
    SystemEvent,
    /// Any other label.
    Other(String),
}

impl From<&str> for InteractionType {
    fn from(label: &str) -> Self {
        match label {
            "user_message" => Self::UserMessage,
            "system_event" => Self::SystemEvent,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for InteractionType {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<InteractionType> for String {
    fn from(kind: InteractionType) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserMessage => f.write_str("user_message"),
            Self::SystemEvent => f.write_str("system_event"),
            Self::Other(label) => f.write_str(label),
        }
    }
}

/// Explicit satisfaction signal attached to an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Satisfaction {
    High,
    Low,
}

/// One observed interaction. Consumed once by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Interaction text. Anything that is not a JSON string deserializes to `None`.
    #[serde(default, deserialize_with = "text_or_none")]
    pub content: Option<String>,
    #[serde(rename = "type", default = "default_type")]
    pub interaction_type: InteractionType,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

fn default_type() -> InteractionType {
    InteractionType::UserMessage
}

fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

impl Interaction {
    pub fn new(content: impl Into<String>, interaction_type: impl Into<InteractionType>) -> Self {
        Self {
            content: Some(content.into()),
            interaction_type: interaction_type.into(),
            metadata: HashMap::new(),
        }
    }

    /// Shorthand for a `user_message` interaction.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, InteractionType::UserMessage)
    }

    /// Attach one metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Content if it is present and non-empty.
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|text| !text.is_empty())
    }

    /// Satisfaction signal from metadata, if one of `"high"` / `"low"`.
    pub fn satisfaction(&self) -> Option<Satisfaction> {
        match self.metadata.get(SATISFACTION_KEY)?.as_str()? {
            "high" => Some(Satisfaction::High),
            "low" => Some(Satisfaction::Low),
            _ => None,
        }
    }
}
