//! `sprout plant` and `sprout system` commands: browse the reference catalog.

use anyhow::{Context, Result};

use sprout_core::catalog::{Catalog, Difficulty, PlantCategory};

use crate::{PlantCommands, SystemCommands};

pub fn run_plant_command(command: PlantCommands) -> Result<()> {
    let catalog = Catalog::load();
    match command {
        PlantCommands::List {
            difficulty,
            category,
        } => run_plant_list(&catalog, difficulty.as_deref(), category.as_deref()),
        PlantCommands::Show { name } => run_plant_show(&catalog, &name),
        PlantCommands::Companions { name } => run_plant_companions(&catalog, &name),
    }
}

pub fn run_system_command(command: SystemCommands) -> Result<()> {
    let catalog = Catalog::load();
    match command {
        SystemCommands::List => run_system_list(&catalog),
        SystemCommands::Show { name } => run_system_show(&catalog, &name),
    }
}

fn run_plant_list(
    catalog: &Catalog,
    difficulty: Option<&str>,
    category: Option<&str>,
) -> Result<()> {
    let mut plants: Vec<_> = match difficulty {
        Some(d) => {
            let max: Difficulty = d.parse()?;
            catalog.plants_by_difficulty(max)
        }
        None => catalog.plants().iter().collect(),
    };
    if let Some(c) = category {
        let category: PlantCategory = c.parse()?;
        plants.retain(|p| p.category == category);
    }

    if plants.is_empty() {
        println!("No plants match.");
        return Ok(());
    }

    println!(
        "{:<22} {:<8} {:<12} {:>6}",
        "NAME", "LEVEL", "CATEGORY", "WEEKS"
    );
    println!("{}", "-".repeat(52));
    for plant in plants {
        println!(
            "{:<22} {:<8} {:<12} {:>6}",
            plant.name,
            plant.difficulty.to_string(),
            plant.category.to_string(),
            plant.growth_weeks
        );
    }
    Ok(())
}

fn run_plant_show(catalog: &Catalog, name: &str) -> Result<()> {
    let plant = catalog
        .find_plant(name)
        .with_context(|| format!("unknown plant {name:?}; see `sprout plant list`"))?;

    println!("{}", plant.name);
    println!("  {}", plant.description);
    println!("  Difficulty: {}", plant.difficulty);
    println!("  Category: {}", plant.category);
    println!("  Growth time: {} weeks", plant.growth_weeks);
    println!("  Harvest: {}", plant.harvest_time);
    println!("  Nutrient needs: {}", plant.nutrient_needs);
    println!("  pH: {:.1} - {:.1}", plant.ph_min, plant.ph_max);
    println!(
        "  Temperature: {:.0} - {:.0} C",
        plant.temp_min_c, plant.temp_max_c
    );
    println!(
        "  Humidity: {} - {} %",
        plant.humidity_min_pct, plant.humidity_max_pct
    );
    Ok(())
}

fn run_plant_companions(catalog: &Catalog, name: &str) -> Result<()> {
    if catalog.find_plant(name).is_none() {
        anyhow::bail!("unknown plant {name:?}; see `sprout plant list`");
    }
    let companions = catalog.companions_of(name);
    if companions.is_empty() {
        println!("No companion plants listed for {name}.");
        return Ok(());
    }
    println!("Companions for {name}:");
    for companion in companions {
        println!("  {} ({})", companion.name, companion.difficulty);
    }
    Ok(())
}

fn run_system_list(catalog: &Catalog) -> Result<()> {
    println!("{:<36} {:<6} {:<12}", "NAME", "COST", "DIFFICULTY");
    println!("{}", "-".repeat(56));
    for system in catalog.systems() {
        println!(
            "{:<36} {:<6} {:<12}",
            system.name,
            tier_bar(system.cost_tier),
            tier_bar(system.difficulty_tier)
        );
    }
    Ok(())
}

fn run_system_show(catalog: &Catalog, name: &str) -> Result<()> {
    let system = catalog
        .find_system(name)
        .with_context(|| format!("unknown system {name:?}; see `sprout system list`"))?;

    println!("{}", system.name);
    println!("  {}", system.description);
    println!("  Cost: {}", tier_bar(system.cost_tier));
    println!("  Difficulty: {}", tier_bar(system.difficulty_tier));
    println!("  Materials: {}", system.materials);
    println!("  Pros:");
    for pro in &system.pros {
        println!("    + {pro}");
    }
    println!("  Cons:");
    for con in &system.cons {
        println!("    - {con}");
    }
    Ok(())
}

/// Render a 1-5 tier as a filled bar, e.g. `$$...` for tier 2.
fn tier_bar(tier: u8) -> String {
    let tier = usize::from(tier.min(5));
    format!("{}{}", "$".repeat(tier), ".".repeat(5 - tier))
}
