//! Care reminder generation.
//!
//! For each plant: water in 2 days, check nutrients in 7, prune in 14, all
//! relative to a caller-supplied reference date. Offsets use calendar-day
//! addition from that one date, so a batch generated on the 1st never drifts
//! across month boundaries.

use chrono::{Days, NaiveDate};

use sprout_store::models::CareReminder;

const SCHEDULE: [(&str, &str, u64); 3] = [
    ("water", "Water plant", 2),
    ("nutrients", "Check nutrient levels", 7),
    ("prune", "Prune if necessary", 14),
];

/// Generate the three care reminders for a plant, relative to `as_of`.
pub fn generate_reminders(plant: &str, as_of: NaiveDate) -> Vec<CareReminder> {
    SCHEDULE
        .iter()
        .map(|(slug, task, offset_days)| CareReminder {
            id: format!("{plant}-{slug}-{as_of}"),
            plant: plant.to_owned(),
            task: (*task).to_owned(),
            due: as_of + Days::new(*offset_days),
            completed: false,
        })
        .collect()
}
