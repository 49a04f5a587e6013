//! `sprout tasks`, `sprout reminders`, and `sprout dose` commands.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use sprout_core::garden::Garden;
use sprout_core::schedule::calculate_nutrient_dose;
use sprout_store::models::{GrowthStage, MaintenanceTask, NutrientDose};
use sprout_store::store::GardenStore;

/// List maintenance tasks, optionally only those due today.
pub fn run_tasks_list<S: GardenStore>(garden: &Garden<S>, due: bool, today: NaiveDate) -> Result<()> {
    let tasks: Vec<&MaintenanceTask> = if due {
        garden.due_tasks(today)
    } else {
        garden.tasks().iter().collect()
    };

    if tasks.is_empty() {
        if due {
            println!("Nothing due today.");
        } else {
            println!("No tasks. Pair a plant with a system first.");
        }
        return Ok(());
    }

    println!(
        "{:<44} {:<10} {:<12} {}",
        "ID", "EVERY", "LAST DONE", "TASK"
    );
    println!("{}", "-".repeat(100));
    for task in tasks {
        let last = task
            .last_completed
            .map(|d| d.to_string())
            .unwrap_or_else(|| "never".to_owned());
        println!(
            "{:<44} {:<10} {:<12} {}",
            task.id,
            task.frequency.to_string(),
            last,
            task.description
        );
    }
    Ok(())
}

/// Mark a task done as of today.
pub async fn run_tasks_done<S: GardenStore>(
    garden: &mut Garden<S>,
    task_id: &str,
    today: NaiveDate,
) -> Result<()> {
    garden.complete_task(task_id, today).await
}

/// Show upcoming care reminders for every selected plant.
pub fn run_reminders<S: GardenStore>(garden: &Garden<S>, as_of: NaiveDate) -> Result<()> {
    let reminders = garden.reminders(as_of);
    if reminders.is_empty() {
        println!("No reminders. Add a plant first.");
        return Ok(());
    }

    println!("{:<12} {:<22} {}", "DUE", "PLANT", "TASK");
    println!("{}", "-".repeat(60));
    for reminder in &reminders {
        println!("{:<12} {:<22} {}", reminder.due.to_string(), reminder.plant, reminder.task);
    }
    Ok(())
}

/// Compute a nutrient dose for an explicit growth stage.
///
/// Volume validation lives here: the generator itself tolerates garbage,
/// but the command refuses it so typos surface instead of printing zeros.
pub fn run_dose(stage: &str, liters: f64) -> Result<()> {
    let stage: GrowthStage = stage
        .parse()
        .with_context(|| format!("unknown growth stage {stage:?} (seedling, vegetative, flowering, harvest)"))?;
    if !liters.is_finite() || liters <= 0.0 {
        bail!("water volume must be a positive number of liters");
    }
    print_dose(stage, liters, calculate_nutrient_dose(stage, liters));
    Ok(())
}

/// Compute a nutrient dose from a plant's tracked stage.
pub fn run_dose_for_plant<S: GardenStore>(
    garden: &Garden<S>,
    plant: &str,
    liters: f64,
) -> Result<()> {
    if !liters.is_finite() || liters <= 0.0 {
        bail!("water volume must be a positive number of liters");
    }
    let stage = garden.stage_of(plant);
    print_dose(stage, liters, garden.dose_for(plant, liters));
    Ok(())
}

fn print_dose(stage: GrowthStage, liters: f64, dose: NutrientDose) {
    println!("Dose for {liters} L at the {stage} stage:");
    println!("  Nitrogen (N):   {:.1} ml", dose.nitrogen_ml);
    println!("  Phosphorus (P): {:.1} ml", dose.phosphorus_ml);
    println!("  Potassium (K):  {:.1} ml", dose.potassium_ml);
}
