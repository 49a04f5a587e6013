//! Persistence layer for the sprout garden tracker.
//!
//! Defines the domain record types, the [`store::GardenStore`] port that the
//! core depends on, and two implementations behind the same contract:
//! [`memory::MemoryStore`] (ephemeral, used as the test fake) and
//! [`json::JsonFileStore`] (durable single-document JSON file).

pub mod json;
pub mod memory;
pub mod models;
pub mod store;
