//! Maintenance checklist generation.
//!
//! Every pairing gets the same seven baseline tasks; recognized systems add
//! one system-specific task. Task ids are deterministic functions of
//! (plant, system, sequence), so regeneration after a ledger change can
//! carry completion state forward by id.

use std::collections::HashMap;

use sprout_store::models::{Frequency, MaintenanceTask, PlantSystemPair};

/// Baseline task templates applied to every pairing, in sequence order.
/// `{plant}` and `{system}` are substituted from the pairing.
const BASELINE: [(&str, Frequency); 7] = [
    (
        "Check {plant} for signs of stress or disease",
        Frequency::Daily,
    ),
    (
        "Monitor nutrient solution levels in {system}",
        Frequency::Daily,
    ),
    ("Check and adjust pH levels in {system}", Frequency::Weekly),
    ("Clean {system} components", Frequency::Biweekly),
    ("Prune {plant} as needed", Frequency::Weekly),
    (
        "Replace nutrient solution in {system}",
        Frequency::Biweekly,
    ),
    ("Perform a deep clean of the {system}", Frequency::Monthly),
];

/// Extra task per system, selected by exact name match. An unmatched system
/// name contributes nothing; that is not an error.
fn system_specific(system: &str) -> Option<(&'static str, Frequency)> {
    match system {
        "Wick System" => Some((
            "Check wick condition and replace if necessary",
            Frequency::Biweekly,
        )),
        "Deep Water Culture (DWC)" => Some((
            "Check air pump and air stone functionality",
            Frequency::Weekly,
        )),
        "Nutrient Film Technique (NFT)" => {
            Some(("Ensure proper flow rate in channels", Frequency::Weekly))
        }
        "Ebb and Flow (Flood and Drain)" => Some((
            "Verify timer settings for flooding cycles",
            Frequency::Weekly,
        )),
        "Aeroponics" => Some(("Clean and unclog spray nozzles", Frequency::Weekly)),
        _ => None,
    }
}

/// Derive the maintenance tasks for one pairing. All tasks start incomplete.
pub fn generate_maintenance_tasks(pair: &PlantSystemPair) -> Vec<MaintenanceTask> {
    let instantiate = |template: &str| {
        template
            .replace("{plant}", &pair.plant)
            .replace("{system}", &pair.system)
    };

    let mut tasks: Vec<MaintenanceTask> = BASELINE
        .iter()
        .enumerate()
        .map(|(i, (template, frequency))| MaintenanceTask {
            id: format!("{}-{}-{}", pair.plant, pair.system, i + 1),
            pair_id: pair.id,
            description: instantiate(template),
            frequency: *frequency,
            completed: false,
            last_completed: None,
        })
        .collect();

    if let Some((description, frequency)) = system_specific(&pair.system) {
        tasks.push(MaintenanceTask {
            id: format!("{}-{}-{}", pair.plant, pair.system, BASELINE.len() + 1),
            pair_id: pair.id,
            description: description.to_owned(),
            frequency,
            completed: false,
            last_completed: None,
        });
    }

    tasks
}

/// Recompute the task set for the whole pairing sequence, carrying completion
/// state over from `prior` by task id.
///
/// Only complete pairings (both plant and system chosen) produce tasks; a
/// pairing still waiting for one half has nothing to maintain yet.
pub fn regenerate_tasks(
    pairs: &[PlantSystemPair],
    prior: &[MaintenanceTask],
) -> Vec<MaintenanceTask> {
    let prior_by_id: HashMap<&str, &MaintenanceTask> =
        prior.iter().map(|t| (t.id.as_str(), t)).collect();

    pairs
        .iter()
        .filter(|p| p.is_complete())
        .flat_map(generate_maintenance_tasks)
        .map(|mut task| {
            if let Some(old) = prior_by_id.get(task.id.as_str()) {
                task.completed = old.completed;
                task.last_completed = old.last_completed;
            }
            task
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn baseline_frequencies_match_schedule() {
        let pair = PlantSystemPair::new("Bayam (Spinach)", "Unknown Rig");
        let tasks = generate_maintenance_tasks(&pair);
        let freqs: Vec<Frequency> = tasks.iter().map(|t| t.frequency).collect();
        assert_eq!(
            freqs,
            vec![
                Frequency::Daily,
                Frequency::Daily,
                Frequency::Weekly,
                Frequency::Biweekly,
                Frequency::Weekly,
                Frequency::Biweekly,
                Frequency::Monthly,
            ]
        );
    }

    #[test]
    fn descriptions_interpolate_pair_fields() {
        let pair = PlantSystemPair::new("Bayam (Spinach)", "Wick System");
        let tasks = generate_maintenance_tasks(&pair);
        assert_eq!(
            tasks[0].description,
            "Check Bayam (Spinach) for signs of stress or disease"
        );
        assert_eq!(
            tasks[1].description,
            "Monitor nutrient solution levels in Wick System"
        );
    }

    #[test]
    fn task_ids_are_deterministic() {
        let pair = PlantSystemPair::new("Bayam (Spinach)", "Wick System");
        let a = generate_maintenance_tasks(&pair);
        let b = generate_maintenance_tasks(&pair);
        let ids_a: Vec<&str> = a.iter().map(|t| t.id.as_str()).collect();
        let ids_b: Vec<&str> = b.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
        assert_eq!(ids_a[0], "Bayam (Spinach)-Wick System-1");
    }

    #[test]
    fn regenerate_carries_completion_forward() {
        let lettuce = PlantSystemPair::new("Selada (Lettuce)", "Wick System");
        let mut tasks = regenerate_tasks(std::slice::from_ref(&lettuce), &[]);
        tasks[2].completed = true;
        tasks[2].last_completed = NaiveDate::from_ymd_opt(2024, 6, 1);

        // Ledger changes: a second pairing appears.
        let tomato = PlantSystemPair::new("Tomat (Tomato)", "Aeroponics");
        let regenerated = regenerate_tasks(&[lettuce, tomato], &tasks);

        let carried = regenerated
            .iter()
            .find(|t| t.id == tasks[2].id)
            .expect("task id should be stable");
        assert!(carried.completed);
        assert_eq!(
            carried.last_completed,
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
        // The new pairing's tasks start fresh.
        assert!(
            regenerated
                .iter()
                .filter(|t| t.id.starts_with("Tomat"))
                .all(|t| !t.completed)
        );
    }

    #[test]
    fn incomplete_pairings_produce_no_tasks() {
        let open = PlantSystemPair::new("Selada (Lettuce)", "");
        let degenerate = PlantSystemPair::new("", "Wick System");
        assert!(regenerate_tasks(&[open, degenerate], &[]).is_empty());
    }
}
