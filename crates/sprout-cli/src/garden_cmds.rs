//! `sprout garden` commands: manage the plant/system pairing list.

use anyhow::{Context, Result};
use uuid::Uuid;

use sprout_core::garden::Garden;
use sprout_core::ledger::SelectionToggle;
use sprout_store::store::GardenStore;

use crate::GardenCommands;

pub async fn run_garden_command<S: GardenStore>(
    command: GardenCommands,
    garden: &mut Garden<S>,
) -> Result<()> {
    match command {
        GardenCommands::Show => run_show(garden),
        GardenCommands::Add { plant } => run_add(garden, &plant).await,
        GardenCommands::Assign { system, pos } => run_assign(garden, &system, pos).await,
        GardenCommands::Remove { pos } => run_remove(garden, pos).await,
        GardenCommands::Move { from, to } => run_move(garden, from, to).await,
    }
}

/// Resolve a 1-based position from `garden show` to a pairing id.
pub fn pair_at<S: GardenStore>(garden: &Garden<S>, pos: usize) -> Result<Uuid> {
    let index = pos
        .checked_sub(1)
        .context("positions are numbered from 1")?;
    let pair = garden.pairs().get(index).with_context(|| {
        format!("no pairing at position {pos}; garden has {}", garden.pairs().len())
    })?;
    Ok(pair.id)
}

fn run_show<S: GardenStore>(garden: &Garden<S>) -> Result<()> {
    if garden.pairs().is_empty() {
        println!("Your garden is empty. Add a plant with `sprout garden add <plant>`.");
        return Ok(());
    }

    println!(
        "{:<4} {:<22} {:<36} {:<12} {:>8}",
        "#", "PLANT", "SYSTEM", "STAGE", "PROGRESS"
    );
    println!("{}", "-".repeat(86));
    for (index, pair) in garden.pairs().iter().enumerate() {
        let (stage, progress) = if pair.plant.is_empty() {
            ("-".to_owned(), "-".to_owned())
        } else {
            (
                garden.stage_of(&pair.plant).to_string(),
                format!("{}%", garden.progress_of(&pair.plant)),
            )
        };
        println!(
            "{:<4} {:<22} {:<36} {:<12} {:>8}",
            index + 1,
            display_or_dash(&pair.plant),
            display_or_dash(&pair.system),
            stage,
            progress
        );
    }
    Ok(())
}

async fn run_add<S: GardenStore>(garden: &mut Garden<S>, plant: &str) -> Result<()> {
    match garden.select_plant(plant).await? {
        SelectionToggle::Added(_) => {}
        SelectionToggle::Removed(removed) => {
            println!(
                "{plant} was already in the garden; removed {} pairing(s).",
                removed.len()
            );
        }
    }
    Ok(())
}

async fn run_assign<S: GardenStore>(
    garden: &mut Garden<S>,
    system: &str,
    pos: Option<usize>,
) -> Result<()> {
    let target = pos.map(|p| pair_at(garden, p)).transpose()?;
    garden.assign_system(system, target).await?;
    Ok(())
}

async fn run_remove<S: GardenStore>(garden: &mut Garden<S>, pos: usize) -> Result<()> {
    let id = pair_at(garden, pos)?;
    garden.remove_pair(id).await?;
    Ok(())
}

async fn run_move<S: GardenStore>(garden: &mut Garden<S>, from: usize, to: usize) -> Result<()> {
    let from = from.checked_sub(1).context("positions are numbered from 1")?;
    let to = to.checked_sub(1).context("positions are numbered from 1")?;
    garden.move_pair(from, to).await?;
    println!("Moved.");
    Ok(())
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
