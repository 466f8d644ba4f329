//! Trait storage: the single authority for current trait values.
//!
//! The engine talks to storage through [`TraitStore`] so a host can plug in
//! its own state manager. [`TraitProfile`] is the in-memory implementation
//! used by [`PersonalityCore`](super::core::PersonalityCore).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::PersonalityConfig;
use crate::error::{PersonaError, Result};

use super::traits::{Trait, TraitBounds, TraitSnapshot};

/// Read/write access to trait values with bound enforcement.
pub trait TraitStore {
    /// Current value of a trait.
    fn get_trait(&self, t: Trait) -> f64;

    /// Add `delta` to a trait, clamp the result to the bounds, and return the
    /// new value.
    fn set_trait_delta(&mut self, t: Trait, delta: f64) -> f64;

    /// Hours since the profile was created.
    fn age_hours(&self) -> f64 {
        0.0
    }

    /// Copy of every trait value.
    fn snapshot(&self) -> TraitSnapshot {
        TraitSnapshot::from_fn(|t| self.get_trait(t))
    }
}

/// In-memory trait store.
///
/// Deserializing rejects invalid bounds and clamps stored values into them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SavedProfile")]
pub struct TraitProfile {
    values: BTreeMap<Trait, f64>,
    bounds: TraitBounds,
    born_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct SavedProfile {
    values: BTreeMap<Trait, f64>,
    bounds: TraitBounds,
    born_at: DateTime<Utc>,
}

impl TryFrom<SavedProfile> for TraitProfile {
    type Error = PersonaError;

    fn try_from(saved: SavedProfile) -> Result<Self> {
        saved.bounds.check()?;
        let bounds = saved.bounds;
        let mid = bounds.min + bounds.span() / 2.0;
        let values = Trait::ALL
            .iter()
            .map(|&t| match saved.values.get(&t) {
                Some(&v) if v.is_finite() => (t, bounds.clamp(v)),
                _ => (t, mid),
            })
            .collect();
        Ok(Self {
            values,
            bounds,
            born_at: saved.born_at,
        })
    }
}

impl TraitProfile {
    /// Fresh profile at the configured initial values, born now. Fails if
    /// the configuration does not validate.
    pub fn new(config: &PersonalityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            values: Trait::ALL
                .iter()
                .map(|&t| (t, config.trait_bounds.clamp(config.initial_value(t))))
                .collect(),
            bounds: config.trait_bounds,
            born_at: Utc::now(),
        })
    }

    /// Rebuild a profile from persisted name → value pairs.
    ///
    /// Unknown names are ignored; missing, non-finite or out-of-bound values
    /// fall back to the configured initial value.
    pub fn restore(
        config: &PersonalityConfig,
        saved: &BTreeMap<String, f64>,
        born_at: DateTime<Utc>,
    ) -> Result<Self> {
        let mut profile = Self::new(config)?.with_birth(born_at);
        for (name, &value) in saved {
            let Some(t) = Trait::from_name(name) else {
                log::debug!("Ignoring unknown trait '{}' in saved profile", name);
                continue;
            };
            if profile.bounds.contains(value) {
                profile.values.insert(t, value);
            } else {
                log::warn!(
                    "Trait {} had invalid value {}; reset to {}",
                    t,
                    value,
                    config.initial_value(t)
                );
            }
        }
        Ok(profile)
    }

    /// Override the creation instant.
    pub fn with_birth(mut self, born_at: DateTime<Utc>) -> Self {
        self.born_at = born_at;
        self
    }

    pub fn born_at(&self) -> DateTime<Utc> {
        self.born_at
    }

    pub fn bounds(&self) -> TraitBounds {
        self.bounds
    }

    /// Age in hours measured at `now`.
    pub fn age_hours_at(&self, now: DateTime<Utc>) -> f64 {
        (now - self.born_at).num_milliseconds() as f64 / 3_600_000.0
    }
}

impl TraitStore for TraitProfile {
    fn get_trait(&self, t: Trait) -> f64 {
        self.values.get(&t).copied().unwrap_or(self.bounds.min)
    }

    fn set_trait_delta(&mut self, t: Trait, delta: f64) -> f64 {
        let current = self.get_trait(t);
        if !delta.is_finite() {
            return current;
        }
        let updated = self.bounds.clamp(current + delta);
        self.values.insert(t, updated);
        updated
    }

    fn age_hours(&self) -> f64 {
        self.age_hours_at(Utc::now())
    }
}
