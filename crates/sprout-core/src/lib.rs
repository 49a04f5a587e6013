//! Domain core for the sprout garden tracker.
//!
//! Owns the set of selected plants, their assignment to growing systems, and
//! everything derived from that assignment: maintenance checklists, care
//! reminders, nutrient doses, and growth stages. Data flows one direction:
//! catalog -> ledger -> schedule generators -> views. Views mutate only the
//! ledger, the stage tracker, or task completion state, and derived data is
//! regenerated from the result.

pub mod catalog;
pub mod garden;
pub mod journal;
pub mod ledger;
pub mod notify;
pub mod schedule;
pub mod stage;
