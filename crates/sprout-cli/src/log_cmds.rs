//! `sprout log` commands: the growth journal.

use anyhow::Result;
use chrono::NaiveDate;
use uuid::Uuid;

use sprout_core::garden::Garden;
use sprout_store::models::GrowthEntry;
use sprout_store::store::GardenStore;

use crate::LogCommands;
use crate::garden_cmds::pair_at;

pub async fn run_log_command<S: GardenStore>(
    command: LogCommands,
    garden: &mut Garden<S>,
    today: NaiveDate,
) -> Result<()> {
    match command {
        LogCommands::List { pos } => run_list(garden, pos),
        LogCommands::Add { pos, note, date } => {
            let pair_id = pair_at(garden, pos)?;
            let entry = garden.add_entry(pair_id, date.unwrap_or(today), &note).await?;
            println!("Logged {} ({}).", entry.id, entry.date);
            Ok(())
        }
        LogCommands::Remove { id } => run_remove(garden, id).await,
    }
}

fn run_list<S: GardenStore>(garden: &Garden<S>, pos: Option<usize>) -> Result<()> {
    let entries: Vec<&GrowthEntry> = match pos {
        Some(pos) => {
            let pair_id = pair_at(garden, pos)?;
            garden.journal().entries_for(pair_id)
        }
        None => garden.journal().entries().iter().collect(),
    };

    if entries.is_empty() {
        println!("No journal entries.");
        return Ok(());
    }

    for entry in entries {
        let label = garden
            .pairs()
            .iter()
            .find(|p| p.id == entry.pair_id)
            .map(|p| p.plant.as_str())
            .unwrap_or("(removed pairing)");
        println!("{}  {:<22} {}", entry.date, label, entry.note);
        println!("  id: {}", entry.id);
    }
    Ok(())
}

async fn run_remove<S: GardenStore>(garden: &mut Garden<S>, id: Uuid) -> Result<()> {
    match garden.remove_entry(id).await? {
        Some(_) => println!("Entry removed."),
        None => println!("No entry with id {id}."),
    }
    Ok(())
}
