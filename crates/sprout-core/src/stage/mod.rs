//! Per-plant growth stage tracking.
//!
//! A four-state machine advanced only by explicit user action:
//!
//! ```text
//! seedling -> vegetative -> flowering -> harvest -> seedling (new batch)
//! ```
//!
//! There are no other transitions: no jumps, no regression, no time-based
//! auto-advance. Wrapping past harvest models starting the next batch.

use std::collections::BTreeMap;

use sprout_store::models::GrowthStage;

/// The canonical stage cycle, in order.
pub const STAGES: [GrowthStage; 4] = [
    GrowthStage::Seedling,
    GrowthStage::Vegetative,
    GrowthStage::Flowering,
    GrowthStage::Harvest,
];

/// The next stage in the fixed cyclic order.
pub fn next_stage(stage: GrowthStage) -> GrowthStage {
    match stage {
        GrowthStage::Seedling => GrowthStage::Vegetative,
        GrowthStage::Vegetative => GrowthStage::Flowering,
        GrowthStage::Flowering => GrowthStage::Harvest,
        GrowthStage::Harvest => GrowthStage::Seedling,
    }
}

/// Display progress through the cycle, rounded to a whole percent.
pub fn progress_percent(stage: GrowthStage) -> u8 {
    let index = STAGES
        .iter()
        .position(|s| *s == stage)
        .expect("stage is in the canonical cycle");
    (((index + 1) as f64 / STAGES.len() as f64) * 100.0).round() as u8
}

/// The finer-grained week-by-week vocabulary. Descriptive text only; the
/// state machine above is the single source of truth for stage.
pub const TIMELINE: [(&str, &str); 5] = [
    ("Week 1-2", "Germination and seedling stage"),
    ("Week 3-4", "Early growth stage"),
    ("Week 5-6", "Rapid growth stage"),
    (
        "Week 7-8",
        "Maturation and harvesting (for most leafy greens)",
    ),
    (
        "Week 9+",
        "Extended growth and multiple harvests (for some plants like chili)",
    ),
];

/// Tracks the current stage of each plant. Plants never seen before are
/// seedlings.
#[derive(Debug, Clone, Default)]
pub struct StageTracker {
    stages: BTreeMap<String, GrowthStage>,
}

impl StageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted per-plant stages.
    pub fn from_stages(stages: BTreeMap<String, GrowthStage>) -> Self {
        Self { stages }
    }

    /// The plant's current stage, defaulting to seedling.
    pub fn current(&self, plant: &str) -> GrowthStage {
        self.stages
            .get(plant)
            .copied()
            .unwrap_or(GrowthStage::Seedling)
    }

    /// Advance the plant one stage and return the new stage.
    pub fn advance(&mut self, plant: &str) -> GrowthStage {
        let next = next_stage(self.current(plant));
        self.stages.insert(plant.to_owned(), next);
        next
    }

    /// All tracked stages, for persistence.
    pub fn stages(&self) -> &BTreeMap<String, GrowthStage> {
        &self.stages
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_advances_complete_the_cycle() {
        let mut tracker = StageTracker::new();
        let start = tracker.current("Cabe (Chili)");
        for _ in 0..4 {
            tracker.advance("Cabe (Chili)");
        }
        assert_eq!(tracker.current("Cabe (Chili)"), start);
    }

    #[test]
    fn advance_follows_fixed_order() {
        let mut tracker = StageTracker::new();
        assert_eq!(tracker.advance("Tomat (Tomato)"), GrowthStage::Vegetative);
        assert_eq!(tracker.advance("Tomat (Tomato)"), GrowthStage::Flowering);
        assert_eq!(tracker.advance("Tomat (Tomato)"), GrowthStage::Harvest);
        assert_eq!(tracker.advance("Tomat (Tomato)"), GrowthStage::Seedling);
    }

    #[test]
    fn unknown_plant_is_a_seedling() {
        let tracker = StageTracker::new();
        assert_eq!(tracker.current("Bayam (Spinach)"), GrowthStage::Seedling);
    }

    #[test]
    fn plants_advance_independently() {
        let mut tracker = StageTracker::new();
        tracker.advance("Tomat (Tomato)");
        assert_eq!(tracker.current("Tomat (Tomato)"), GrowthStage::Vegetative);
        assert_eq!(tracker.current("Selada (Lettuce)"), GrowthStage::Seedling);
    }

    #[test]
    fn progress_percentages() {
        assert_eq!(progress_percent(GrowthStage::Seedling), 25);
        assert_eq!(progress_percent(GrowthStage::Vegetative), 50);
        assert_eq!(progress_percent(GrowthStage::Flowering), 75);
        assert_eq!(progress_percent(GrowthStage::Harvest), 100);
    }
}
