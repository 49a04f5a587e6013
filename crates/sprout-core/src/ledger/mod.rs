//! The selection ledger -- the authoritative list of plant/system pairings.
//!
//! Every derived view (maintenance checklist, nutrient calculator, care
//! reminders) reads from this one sequence. Mutations notify subscribers
//! synchronously, so a view regenerating in response always observes a
//! consistent snapshot.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use sprout_store::models::PlantSystemPair;

/// Errors from ledger operations that take a caller-supplied id.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("no pairing with id {0}")]
    UnknownPair(Uuid),
}

/// Emitted synchronously to subscribers on every mutation.
#[derive(Debug, Clone)]
pub enum LedgerEvent {
    PlantSelected(PlantSystemPair),
    PlantDeselected(Vec<PlantSystemPair>),
    SystemAssigned(PlantSystemPair),
    PairRemoved(PlantSystemPair),
    PairMoved { from: usize, to: usize },
    Reconciled { appended: usize },
}

/// Result of a [`SelectionLedger::select_plant`] toggle.
#[derive(Debug, Clone)]
pub enum SelectionToggle {
    /// The plant was not selected; a new pairing was appended.
    Added(Uuid),
    /// The plant was already selected; its pairings were removed.
    Removed(Vec<PlantSystemPair>),
}

/// Token tying a pending remote fetch to the ledger revision it was issued
/// against. Results carried by a stale token are discarded on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

type Subscriber = Box<dyn Fn(&LedgerEvent) + Send>;

/// Ordered sequence of pairings with unique ids.
///
/// Plant and system values may repeat (two batches of the same plant in
/// different systems is a normal garden); ids never do.
#[derive(Default)]
pub struct SelectionLedger {
    pairs: Vec<PlantSystemPair>,
    /// Creation sequence per pairing id. Reorders change sequence position
    /// but not creation order, which untargeted system assignment follows.
    created: HashMap<Uuid, u64>,
    next_seq: u64,
    revision: u64,
    subscribers: Vec<Subscriber>,
}

impl SelectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted pairings. Creation order is not
    /// persisted, so the stored sequence order stands in for it.
    pub fn from_pairs(pairs: Vec<PlantSystemPair>) -> Self {
        let mut ledger = Self::default();
        for pair in &pairs {
            ledger.record_creation(pair.id);
        }
        ledger.pairs = pairs;
        ledger
    }

    fn record_creation(&mut self, id: Uuid) {
        self.created.insert(id, self.next_seq);
        self.next_seq += 1;
    }

    pub fn pairs(&self) -> &[PlantSystemPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&PlantSystemPair> {
        self.pairs.iter().find(|p| p.id == id)
    }

    /// Register a callback invoked synchronously on every mutation.
    pub fn subscribe(&mut self, subscriber: impl Fn(&LedgerEvent) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn commit(&mut self, event: LedgerEvent) {
        self.revision += 1;
        for subscriber in &self.subscribers {
            subscriber(&event);
        }
    }

    /// Toggle a plant's membership.
    ///
    /// If any pairing references the plant, all such pairings are removed;
    /// otherwise a new pairing with an empty system field is appended.
    pub fn select_plant(&mut self, plant: &str) -> SelectionToggle {
        let already_selected = self.pairs.iter().any(|p| p.plant == plant);
        if already_selected {
            let mut removed = Vec::new();
            self.pairs.retain(|p| {
                if p.plant == plant {
                    removed.push(p.clone());
                    false
                } else {
                    true
                }
            });
            for pair in &removed {
                self.created.remove(&pair.id);
            }
            self.commit(LedgerEvent::PlantDeselected(removed.clone()));
            SelectionToggle::Removed(removed)
        } else {
            let pair = PlantSystemPair::new(plant, "");
            let id = pair.id;
            self.record_creation(id);
            self.pairs.push(pair.clone());
            self.commit(LedgerEvent::PlantSelected(pair));
            SelectionToggle::Added(id)
        }
    }

    /// Assign a system.
    ///
    /// With a target id, overwrites that pairing's system field. Without
    /// one, fills the most recently created pairing whose system is still
    /// empty (creation order, unaffected by reorders); if none is, appends
    /// a plant-less pairing carrying just the system (the "system chosen
    /// before plant" quirk).
    pub fn select_system(&mut self, system: &str, target: Option<Uuid>) -> Result<Uuid, LedgerError> {
        if let Some(id) = target {
            let pair = self
                .pairs
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(LedgerError::UnknownPair(id))?;
            pair.system = system.to_owned();
            let updated = pair.clone();
            self.commit(LedgerEvent::SystemAssigned(updated));
            return Ok(id);
        }

        let created = &self.created;
        let open = self
            .pairs
            .iter_mut()
            .filter(|p| p.system.is_empty())
            .max_by_key(|p| created.get(&p.id).copied().unwrap_or(0));
        if let Some(pair) = open {
            pair.system = system.to_owned();
            let updated = pair.clone();
            let id = updated.id;
            self.commit(LedgerEvent::SystemAssigned(updated));
            Ok(id)
        } else {
            let pair = PlantSystemPair::new("", system);
            let id = pair.id;
            self.record_creation(id);
            self.pairs.push(pair.clone());
            self.commit(LedgerEvent::SystemAssigned(pair));
            Ok(id)
        }
    }

    /// Delete a pairing by id. Removing an absent id is a silent no-op.
    pub fn remove_pair(&mut self, id: Uuid) -> Option<PlantSystemPair> {
        let index = self.pairs.iter().position(|p| p.id == id)?;
        let removed = self.pairs.remove(index);
        self.created.remove(&removed.id);
        self.commit(LedgerEvent::PairRemoved(removed.clone()));
        Some(removed)
    }

    /// Reorder the sequence, moving the pairing at `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range. Out-of-range reorders are a
    /// caller bug, not user input.
    pub fn move_pair(&mut self, from: usize, to: usize) {
        assert!(
            from < self.pairs.len() && to < self.pairs.len(),
            "move_pair index out of range: {from} -> {to} with {} pairs",
            self.pairs.len()
        );
        let pair = self.pairs.remove(from);
        self.pairs.insert(to, pair);
        self.commit(LedgerEvent::PairMoved { from, to });
    }

    /// Snapshot the current revision for a fetch about to be issued.
    pub fn fetch_token(&self) -> FetchToken {
        FetchToken(self.revision)
    }

    /// Apply the result of a remote fetch.
    ///
    /// If local mutations happened after the token was issued, the result is
    /// stale and discarded (returns `false`). Otherwise fetched pairings are
    /// merged by id: ids already present locally keep their local value,
    /// remote-only ids are appended in fetched order.
    pub fn apply_fetch(&mut self, token: FetchToken, fetched: Vec<PlantSystemPair>) -> bool {
        if token.0 != self.revision {
            debug!(
                issued_at = token.0,
                current = self.revision,
                "discarding stale fetch result"
            );
            return false;
        }

        let mut appended = 0;
        for pair in fetched {
            if self.pairs.iter().all(|p| p.id != pair.id) {
                self.record_creation(pair.id);
                self.pairs.push(pair);
                appended += 1;
            }
        }
        self.commit(LedgerEvent::Reconciled { appended });
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const LETTUCE: &str = "Selada (Lettuce)";
    const TOMATO: &str = "Tomat (Tomato)";

    #[test]
    fn select_plant_appends_open_pairing() {
        let mut ledger = SelectionLedger::new();
        let toggle = ledger.select_plant(LETTUCE);
        assert!(matches!(toggle, SelectionToggle::Added(_)));
        assert_eq!(ledger.pairs().len(), 1);
        assert_eq!(ledger.pairs()[0].plant, LETTUCE);
        assert!(ledger.pairs()[0].system.is_empty());
    }

    #[test]
    fn double_toggle_restores_prior_set() {
        let mut ledger = SelectionLedger::new();
        ledger.select_plant(TOMATO);
        let before: Vec<_> = ledger.pairs().to_vec();

        ledger.select_plant(LETTUCE);
        ledger.select_plant(LETTUCE);

        assert_eq!(ledger.pairs(), before.as_slice());
    }

    #[test]
    fn deselect_removes_every_pairing_of_the_plant() {
        let mut ledger = SelectionLedger::new();
        ledger.select_plant(LETTUCE);
        ledger.select_system("Wick System", None).unwrap();
        ledger.select_plant(TOMATO);

        let toggle = ledger.select_plant(LETTUCE);
        match toggle {
            SelectionToggle::Removed(removed) => {
                assert_eq!(removed.len(), 1);
                assert_eq!(removed[0].system, "Wick System");
            }
            other => panic!("expected removal, got {other:?}"),
        }
        assert!(ledger.pairs().iter().all(|p| p.plant != LETTUCE));
        assert_eq!(ledger.pairs().len(), 1);
    }

    #[test]
    fn select_system_fills_most_recent_open_pairing() {
        let mut ledger = SelectionLedger::new();
        ledger.select_plant(LETTUCE);
        ledger.select_plant(TOMATO);

        ledger.select_system("Deep Water Culture (DWC)", None).unwrap();

        // Tomato was created last, so it gets the system.
        assert_eq!(ledger.pairs()[0].system, "");
        assert_eq!(ledger.pairs()[1].system, "Deep Water Culture (DWC)");
    }

    #[test]
    fn untargeted_assign_follows_creation_order_across_reorders() {
        let mut ledger = SelectionLedger::new();
        ledger.select_plant(LETTUCE);
        ledger.select_plant(TOMATO);

        // After the reorder the lettuce pairing sits last in sequence, but
        // the tomato pairing is still the most recently created open one.
        ledger.move_pair(0, 1);
        let id = ledger.select_system("Wick System", None).unwrap();

        let filled = ledger.get(id).unwrap();
        assert_eq!(filled.plant, TOMATO);
        assert_eq!(filled.system, "Wick System");
        assert!(
            ledger
                .pairs()
                .iter()
                .find(|p| p.plant == LETTUCE)
                .unwrap()
                .system
                .is_empty()
        );
    }

    #[test]
    fn select_system_without_open_pairing_appends_degenerate_pair() {
        let mut ledger = SelectionLedger::new();
        let id = ledger.select_system("Wick System", None).unwrap();
        let pair = ledger.get(id).unwrap();
        assert!(pair.plant.is_empty());
        assert_eq!(pair.system, "Wick System");
    }

    #[test]
    fn select_system_targeted_overwrites() {
        let mut ledger = SelectionLedger::new();
        ledger.select_plant(LETTUCE);
        let id = ledger.pairs()[0].id;
        ledger.select_system("Wick System", Some(id)).unwrap();
        ledger.select_system("Aeroponics", Some(id)).unwrap();
        assert_eq!(ledger.get(id).unwrap().system, "Aeroponics");
    }

    #[test]
    fn select_system_unknown_target_errors() {
        let mut ledger = SelectionLedger::new();
        let result = ledger.select_system("Wick System", Some(Uuid::new_v4()));
        assert!(matches!(result, Err(LedgerError::UnknownPair(_))));
    }

    #[test]
    fn remove_absent_id_is_noop() {
        let mut ledger = SelectionLedger::new();
        ledger.select_plant(LETTUCE);
        let before = ledger.pairs().to_vec();
        assert!(ledger.remove_pair(Uuid::new_v4()).is_none());
        assert_eq!(ledger.pairs(), before.as_slice());
    }

    #[test]
    fn move_then_inverse_move_restores_order() {
        let mut ledger = SelectionLedger::new();
        ledger.select_plant(LETTUCE);
        ledger.select_plant(TOMATO);
        ledger.select_plant("Cabe (Chili)");
        let before = ledger.pairs().to_vec();

        ledger.move_pair(0, 2);
        ledger.move_pair(2, 0);

        assert_eq!(ledger.pairs(), before.as_slice());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn move_pair_out_of_range_panics() {
        let mut ledger = SelectionLedger::new();
        ledger.select_plant(LETTUCE);
        ledger.move_pair(0, 3);
    }

    #[test]
    fn subscribers_are_notified_synchronously() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut ledger = SelectionLedger::new();
        let seen = Arc::clone(&count);
        ledger.subscribe(move |_event| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        ledger.select_plant(LETTUCE);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        ledger.select_system("Wick System", None).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn stale_fetch_is_discarded() {
        let mut ledger = SelectionLedger::new();
        ledger.select_plant(LETTUCE);
        let token = ledger.fetch_token();

        // A local mutation lands while the fetch is in flight.
        ledger.select_plant(TOMATO);
        let before = ledger.pairs().to_vec();

        let fetched = vec![PlantSystemPair::new("Cabe (Chili)", "Wick System")];
        assert!(!ledger.apply_fetch(token, fetched));
        assert_eq!(ledger.pairs(), before.as_slice());
    }

    #[test]
    fn fresh_fetch_merges_by_id_local_wins() {
        let mut ledger = SelectionLedger::new();
        ledger.select_plant(LETTUCE);
        let local = ledger.pairs()[0].clone();
        let token = ledger.fetch_token();

        // Remote copy of the same pairing differs; remote also has one more.
        let mut remote_copy = local.clone();
        remote_copy.system = "Wick System".to_owned();
        let extra = PlantSystemPair::new("Cabe (Chili)", "Aeroponics");

        assert!(ledger.apply_fetch(token, vec![remote_copy, extra.clone()]));
        assert_eq!(ledger.pairs().len(), 2);
        // The local value of the shared id is untouched.
        assert_eq!(ledger.pairs()[0], local);
        assert_eq!(ledger.pairs()[1], extra);
    }
}
