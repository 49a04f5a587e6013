//! Shared fixtures for sprout integration tests.
//!
//! Provides canned pairings and pre-populated in-memory stores so tests
//! exercising the service layer or a view adapter do not each rebuild the
//! same garden by hand.

use chrono::NaiveDate;

use sprout_store::memory::MemoryStore;
use sprout_store::models::{GrowthStage, PlantSystemPair};
use sprout_store::store::GardenData;

/// A lettuce batch in a DWC bucket -- the canonical complete pairing.
pub fn lettuce_dwc_pair() -> PlantSystemPair {
    PlantSystemPair::new("Selada (Lettuce)", "Deep Water Culture (DWC)")
}

/// A tomato picked but not yet assigned a system.
pub fn open_tomato_pair() -> PlantSystemPair {
    PlantSystemPair::new("Tomat (Tomato)", "")
}

/// A fixed reference date for deterministic due-date assertions.
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}

/// A store seeded with one complete and one open pairing, plus a tomato in
/// its vegetative stage.
pub fn seeded_store() -> MemoryStore {
    let mut data = GardenData::default();
    data.pairs = vec![lettuce_dwc_pair(), open_tomato_pair()];
    data.stages
        .insert("Tomat (Tomato)".to_owned(), GrowthStage::Vegetative);
    MemoryStore::with_data(data)
}
