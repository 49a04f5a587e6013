//! Growth journal: dated observations logged against a pairing.

use chrono::NaiveDate;
use uuid::Uuid;

use sprout_store::models::GrowthEntry;

/// Errors from journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("journal note must not be empty")]
    EmptyNote,
}

/// In-memory journal. Entries are held newest first.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Vec<GrowthEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted entries, sorting newest first.
    pub fn from_entries(mut entries: Vec<GrowthEntry>) -> Self {
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Self { entries }
    }

    pub fn entries(&self) -> &[GrowthEntry] {
        &self.entries
    }

    /// Entries for one pairing, newest first.
    pub fn entries_for(&self, pair_id: Uuid) -> Vec<&GrowthEntry> {
        self.entries.iter().filter(|e| e.pair_id == pair_id).collect()
    }

    /// Add an observation. Whitespace-only notes are rejected.
    pub fn add(
        &mut self,
        pair_id: Uuid,
        date: NaiveDate,
        note: &str,
    ) -> Result<GrowthEntry, JournalError> {
        let note = note.trim();
        if note.is_empty() {
            return Err(JournalError::EmptyNote);
        }
        let entry = GrowthEntry {
            id: Uuid::new_v4(),
            pair_id,
            date,
            note: note.to_owned(),
        };
        self.entries.insert(0, entry.clone());
        Ok(entry)
    }

    /// Delete by id. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: Uuid) -> Option<GrowthEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }
}
