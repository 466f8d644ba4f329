//! Learning history: an append-only, bounded log of significant
//! trait-adjusting interactions, plus its JSON file persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::HistoryConfig;
use crate::error::Result;

use super::traits::Trait;

/// Marker appended to truncated content summaries.
pub const TRUNCATION_MARKER: &str = "...";

/// One recorded learning step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningEvent {
    pub timestamp: DateTime<Utc>,
    pub content_summary: String,
    /// Significant aggregated deltas sent to the store. A trait already at
    /// a bound may have moved less than recorded.
    pub trait_changes: BTreeMap<Trait, f64>,
    pub reasons: Vec<String>,
    pub agent_age_hours: f64,
}

impl LearningEvent {
    pub fn new(
        content: &str,
        max_chars: usize,
        trait_changes: BTreeMap<Trait, f64>,
        reasons: Vec<String>,
        agent_age_hours: f64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            content_summary: summarize(content, max_chars),
            trait_changes,
            reasons,
            agent_age_hours,
        }
    }
}

/// First `max_chars` characters of `content`, with a marker if anything was cut.
pub fn summarize(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &content[..cut], TRUNCATION_MARKER),
        None => content.to_string(),
    }
}

// ============================================================================
// LearningHistory
// ============================================================================

/// Sliding window of recent events plus a counter of every event ever recorded.
///
/// The counter is monotonic only within one process. The history file keeps
/// just the retained events, so after a trim and a reload the counter
/// restarts at the number of events loaded (1500 recorded becomes 800).
#[derive(Debug, Clone)]
pub struct LearningHistory {
    events: VecDeque<LearningEvent>,
    total_recorded: u64,
    max_events: usize,
    retain_events: usize,
}

impl LearningHistory {
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            events: VecDeque::new(),
            total_recorded: 0,
            max_events: config.max_events.max(1),
            retain_events: config.retain_events.min(config.max_events).max(1),
        }
    }

    /// Seed from previously persisted events. The counter starts at the
    /// number of events loaded.
    pub fn from_events(config: &HistoryConfig, events: Vec<LearningEvent>) -> Self {
        let mut history = Self::new(config);
        history.total_recorded = events.len() as u64;
        history.events = events.into();
        history.enforce_window();
        history
    }

    /// Append an event, trimming the oldest entries once the window overflows.
    pub fn record(&mut self, event: LearningEvent) {
        self.events.push_back(event);
        self.total_recorded += 1;
        self.enforce_window();
    }

    fn enforce_window(&mut self) {
        if self.events.len() > self.max_events {
            let excess = self.events.len() - self.retain_events;
            self.events.drain(..excess);
            log::debug!(
                "Learning history trimmed by {} events to {}",
                excess,
                self.events.len()
            );
        }
    }

    /// Events currently retained.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Every event ever recorded, including those trimmed away.
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }

    /// Retained events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LearningEvent> {
        self.events.iter()
    }

    /// Up to `count` most recent events, oldest first.
    pub fn recent(&self, count: usize) -> Vec<&LearningEvent> {
        let skip = self.events.len().saturating_sub(count);
        self.events.iter().skip(skip).collect()
    }

    /// Owned copy of the retained events, oldest first.
    pub fn to_vec(&self) -> Vec<LearningEvent> {
        self.events.iter().cloned().collect()
    }
}

// ============================================================================
// HistoryFile
// ============================================================================

/// JSON file holding the retained events as an ordered array.
#[derive(Debug, Clone)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the events. A missing file yields an empty history.
    pub fn load(&self) -> Result<Vec<LearningEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the events, creating the parent directory if needed.
    pub fn save<'a>(&self, events: impl IntoIterator<Item = &'a LearningEvent>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let events: Vec<&LearningEvent> = events.into_iter().collect();
        let content = serde_json::to_string_pretty(&events)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
