//! `sprout stage` commands: track and advance growth stages.

use anyhow::Result;

use sprout_core::garden::Garden;
use sprout_core::stage::{STAGES, TIMELINE};
use sprout_store::store::GardenStore;

use crate::StageCommands;

pub async fn run_stage_command<S: GardenStore>(
    command: StageCommands,
    garden: &mut Garden<S>,
) -> Result<()> {
    match command {
        StageCommands::Show { plant, liters } => {
            run_show(garden, &plant)?;
            if let Some(liters) = liters {
                crate::task_cmds::run_dose_for_plant(garden, &plant, liters)?;
            }
            Ok(())
        }
        StageCommands::Advance { plant } => {
            garden.advance_stage(&plant).await?;
            Ok(())
        }
        StageCommands::Timeline => run_timeline(),
    }
}

fn run_show<S: GardenStore>(garden: &Garden<S>, plant: &str) -> Result<()> {
    let current = garden.stage_of(plant);
    println!("{plant}: {current} ({}%)", garden.progress_of(plant));
    let cycle: Vec<String> = STAGES
        .iter()
        .map(|s| {
            if *s == current {
                format!("[{s}]")
            } else {
                s.to_string()
            }
        })
        .collect();
    println!("  {}", cycle.join(" -> "));
    Ok(())
}

fn run_timeline() -> Result<()> {
    println!("Typical hydroponic growth timeline:");
    for (weeks, description) in TIMELINE {
        println!("  {weeks:<10} {description}");
    }
    Ok(())
}
