//! The garden service.
//!
//! Owns the ledger, stage tracker, and journal, persists them through the
//! storage port, and announces mutations through the notification port.
//! Derived data (tasks, reminders, doses) is regenerated from the ledger
//! after every change, with task completion carried forward by id.
//!
//! Mutations commit in memory first; the in-memory state is authoritative.
//! A persistence failure is surfaced to the caller with context and leaves
//! the in-memory state consistent rather than half-rolled-back.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tracing::warn;
use uuid::Uuid;

use sprout_store::models::{
    CareReminder, GrowthEntry, GrowthStage, MaintenanceTask, NutrientDose, PlantSystemPair,
};
use sprout_store::store::GardenStore;

use crate::catalog::Catalog;
use crate::journal::Journal;
use crate::ledger::{SelectionLedger, SelectionToggle};
use crate::notify::Notifier;
use crate::schedule;
use crate::stage::{self, StageTracker};

pub struct Garden<S: GardenStore> {
    store: S,
    notifier: Box<dyn Notifier>,
    catalog: Catalog,
    ledger: SelectionLedger,
    tracker: StageTracker,
    journal: Journal,
    tasks: Vec<MaintenanceTask>,
}

impl<S: GardenStore> Garden<S> {
    /// Load a garden from the store.
    ///
    /// The persisted task set is reconciled against the loaded ledger, so a
    /// data file edited or partially written elsewhere still yields a task
    /// set consistent with the pairings.
    pub async fn open(store: S, notifier: Box<dyn Notifier>) -> Result<Self> {
        let catalog = Catalog::load();

        let mut ledger = SelectionLedger::new();
        let token = ledger.fetch_token();
        let pairs = store.list_pairs().await.context("failed to load pairings")?;
        ledger.apply_fetch(token, pairs);

        let stored_tasks = store.list_tasks().await.context("failed to load tasks")?;
        let tasks = schedule::regenerate_tasks(ledger.pairs(), &stored_tasks);

        let tracker = StageTracker::from_stages(
            store
                .list_stages()
                .await
                .context("failed to load growth stages")?,
        );
        let journal = Journal::from_entries(
            store
                .list_entries()
                .await
                .context("failed to load journal")?,
        );

        Ok(Self {
            store,
            notifier,
            catalog,
            ledger,
            tracker,
            journal,
            tasks,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn pairs(&self) -> &[PlantSystemPair] {
        self.ledger.pairs()
    }

    pub fn tasks(&self) -> &[MaintenanceTask] {
        &self.tasks
    }

    // -----------------------------------------------------------------
    // Ledger mutations
    // -----------------------------------------------------------------

    /// Toggle a catalog plant in or out of the garden.
    pub async fn select_plant(&mut self, name: &str) -> Result<SelectionToggle> {
        let plant = self
            .catalog
            .find_plant(name)
            .with_context(|| format!("unknown plant {name:?}; see `sprout plant list`"))?;
        let plant_name = plant.name.clone();

        let toggle = self.ledger.select_plant(&plant_name);
        self.persist_ledger().await?;

        match &toggle {
            SelectionToggle::Added(_) => self
                .notifier
                .success(&format!("{plant_name} added to your garden")),
            SelectionToggle::Removed(_) => self
                .notifier
                .info(&format!("{plant_name} removed from your garden")),
        }
        Ok(toggle)
    }

    /// Assign a catalog system, either to a specific pairing or to the most
    /// recent pairing still waiting for one.
    pub async fn assign_system(&mut self, name: &str, target: Option<Uuid>) -> Result<Uuid> {
        let system = self
            .catalog
            .find_system(name)
            .with_context(|| format!("unknown system {name:?}; see `sprout system list`"))?;
        let system_name = system.name.clone();

        let id = self.ledger.select_system(&system_name, target)?;
        self.persist_ledger().await?;

        self.notifier.success(&format!("{system_name} assigned"));
        Ok(id)
    }

    /// Delete a pairing. Unknown ids are a silent no-op.
    pub async fn remove_pair(&mut self, id: Uuid) -> Result<Option<PlantSystemPair>> {
        let Some(removed) = self.ledger.remove_pair(id) else {
            return Ok(None);
        };
        self.persist_ledger().await?;
        self.notifier.info(&format!(
            "pairing removed: {} / {}",
            display_or_dash(&removed.plant),
            display_or_dash(&removed.system)
        ));
        Ok(Some(removed))
    }

    /// Reorder the pairing sequence. Indices are validated here because they
    /// come straight from user input.
    pub async fn move_pair(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.ledger.len();
        if from >= len || to >= len {
            bail!("position out of range: garden has {len} pairings");
        }
        self.ledger.move_pair(from, to);
        self.persist_ledger().await
    }

    /// Regenerate derived tasks and write pairings + tasks through the port.
    async fn persist_ledger(&mut self) -> Result<()> {
        self.tasks = schedule::regenerate_tasks(self.ledger.pairs(), &self.tasks);

        if let Err(e) = self.store.replace_pairs(self.ledger.pairs()).await {
            warn!(error = %e, "failed to persist pairings");
            return Err(e).context("failed to persist pairings");
        }
        if let Err(e) = self.store.replace_tasks(&self.tasks).await {
            warn!(error = %e, "failed to persist tasks");
            return Err(e).context("failed to persist tasks");
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------

    /// Tasks due on `today` per their frequency thresholds.
    pub fn due_tasks(&self, today: NaiveDate) -> Vec<&MaintenanceTask> {
        self.tasks
            .iter()
            .filter(|t| schedule::is_due(t, today))
            .collect()
    }

    /// Mark a task done as of `today`.
    pub async fn complete_task(&mut self, task_id: &str, today: NaiveDate) -> Result<()> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .with_context(|| format!("no task with id {task_id:?}"))?;
        task.completed = true;
        task.last_completed = Some(today);
        let description = task.description.clone();

        self.store
            .replace_tasks(&self.tasks)
            .await
            .context("failed to persist tasks")?;
        self.notifier.success(&format!("done: {description}"));
        Ok(())
    }

    /// Care reminders for every selected plant, soonest first.
    pub fn reminders(&self, as_of: NaiveDate) -> Vec<CareReminder> {
        // One reminder set per distinct plant, even when a plant appears in
        // several pairings.
        let mut seen = std::collections::HashSet::new();
        let plants: Vec<&str> = self
            .ledger
            .pairs()
            .iter()
            .filter(|p| !p.plant.is_empty())
            .map(|p| p.plant.as_str())
            .filter(|plant| seen.insert(*plant))
            .collect();

        let mut reminders: Vec<CareReminder> = plants
            .into_iter()
            .flat_map(|plant| schedule::generate_reminders(plant, as_of))
            .collect();
        reminders.sort_by_key(|r| r.due);
        reminders
    }

    /// Nutrient dose for a plant's current growth stage.
    pub fn dose_for(&self, plant: &str, water_volume_l: f64) -> NutrientDose {
        let stage = self.tracker.current(plant);
        schedule::calculate_nutrient_dose(stage, water_volume_l)
    }

    // -----------------------------------------------------------------
    // Growth stages
    // -----------------------------------------------------------------

    pub fn stage_of(&self, plant: &str) -> GrowthStage {
        self.tracker.current(plant)
    }

    pub fn progress_of(&self, plant: &str) -> u8 {
        stage::progress_percent(self.tracker.current(plant))
    }

    /// Advance a plant to its next growth stage.
    pub async fn advance_stage(&mut self, plant: &str) -> Result<GrowthStage> {
        if self.catalog.find_plant(plant).is_none() {
            bail!("unknown plant {plant:?}; see `sprout plant list`");
        }
        let next = self.tracker.advance(plant);
        self.store
            .put_stage(plant, next)
            .await
            .context("failed to persist growth stage")?;
        self.notifier.success(&format!("{plant} is now {next}"));
        Ok(next)
    }

    // -----------------------------------------------------------------
    // Journal
    // -----------------------------------------------------------------

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Log an observation against an existing pairing.
    pub async fn add_entry(
        &mut self,
        pair_id: Uuid,
        date: NaiveDate,
        note: &str,
    ) -> Result<GrowthEntry> {
        if self.ledger.get(pair_id).is_none() {
            bail!("no pairing with id {pair_id}");
        }
        let entry = self.journal.add(pair_id, date, note)?;
        self.store
            .put_entry(&entry)
            .await
            .context("failed to persist journal entry")?;
        Ok(entry)
    }

    /// Delete a journal entry. Unknown ids are a silent no-op.
    pub async fn remove_entry(&mut self, id: Uuid) -> Result<Option<GrowthEntry>> {
        let Some(removed) = self.journal.remove(id) else {
            return Ok(None);
        };
        self.store
            .delete_entry(id)
            .await
            .context("failed to delete journal entry")?;
        Ok(Some(removed))
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
