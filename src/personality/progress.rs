//! Learning progress report: how far each trait has drifted from its
//! initial value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::traits::{Trait, TraitSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increased,
    Decreased,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitChange {
    pub initial: f64,
    pub current: f64,
    /// Absolute distance from the initial value.
    pub change: f64,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningProgress {
    /// Every event ever recorded, not only the retained window.
    pub total_learning_events: u64,
    pub trait_changes: BTreeMap<Trait, TraitChange>,
    /// Trait with the largest absolute change; `None` while nothing has moved.
    pub most_developed_trait: Option<Trait>,
    /// Sum of absolute changes divided by the number of traits.
    pub learning_rate_effectiveness: f64,
}

pub fn learning_progress(
    initial: &TraitSnapshot,
    current: &TraitSnapshot,
    total_learning_events: u64,
) -> LearningProgress {
    let mut trait_changes = BTreeMap::new();
    let mut total_change = 0.0;
    let mut most: Option<(Trait, f64)> = None;

    for t in Trait::ALL {
        let (from, to) = (initial.get(t), current.get(t));
        let change = (to - from).abs();
        let direction = if to > from {
            Direction::Increased
        } else if to < from {
            Direction::Decreased
        } else {
            Direction::Unchanged
        };
        trait_changes.insert(
            t,
            TraitChange {
                initial: from,
                current: to,
                change,
                direction,
            },
        );
        total_change += change;
        if change > most.map_or(0.0, |(_, c)| c) {
            most = Some((t, change));
        }
    }

    LearningProgress {
        total_learning_events,
        trait_changes,
        most_developed_trait: most.map(|(t, _)| t),
        learning_rate_effectiveness: total_change / Trait::ALL.len() as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_change() {
        let snap = TraitSnapshot::uniform(5.0);
        let p = learning_progress(&snap, &snap, 0);
        assert_eq!(p.most_developed_trait, None);
        assert_eq!(p.learning_rate_effectiveness, 0.0);
        assert!(p
            .trait_changes
            .values()
            .all(|c| c.direction == Direction::Unchanged));
    }

    #[test]
    fn test_changes_and_most_developed() {
        let initial = TraitSnapshot::uniform(5.0);
        let current = initial
            .clone()
            .with(Trait::Empathy, 6.0)
            .with(Trait::Patience, 2.0);
        let p = learning_progress(&initial, &current, 1200);
        assert_eq!(p.total_learning_events, 1200);
        assert_eq!(p.most_developed_trait, Some(Trait::Patience));
        let patience = p.trait_changes[&Trait::Patience];
        assert_eq!(patience.change, 3.0);
        assert_eq!(patience.direction, Direction::Decreased);
        assert_eq!(p.trait_changes[&Trait::Empathy].direction, Direction::Increased);
        assert!((p.learning_rate_effectiveness - 4.0 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_serialized_shape() {
        let initial = TraitSnapshot::uniform(5.0);
        let p = learning_progress(&initial, &initial.clone().with(Trait::Logic, 5.5), 3);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["most_developed_trait"], "logic");
        assert_eq!(json["trait_changes"]["logic"]["direction"], "increased");
    }
}
