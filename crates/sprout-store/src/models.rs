use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How often a maintenance task recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

impl FromStr for Frequency {
    type Err = FrequencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(FrequencyParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Frequency`] string.
#[derive(Debug, Clone)]
pub struct FrequencyParseError(pub String);

impl fmt::Display for FrequencyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid frequency: {:?}", self.0)
    }
}

impl std::error::Error for FrequencyParseError {}

// ---------------------------------------------------------------------------

/// A plant's lifecycle phase. The canonical set is the four-stage one;
/// the finer-grained timeline vocabulary exists only as descriptive text
/// in the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Seedling,
    Vegetative,
    Flowering,
    Harvest,
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Seedling => "seedling",
            Self::Vegetative => "vegetative",
            Self::Flowering => "flowering",
            Self::Harvest => "harvest",
        };
        f.write_str(s)
    }
}

impl FromStr for GrowthStage {
    type Err = GrowthStageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seedling" => Ok(Self::Seedling),
            "vegetative" => Ok(Self::Vegetative),
            "flowering" => Ok(Self::Flowering),
            "harvest" => Ok(Self::Harvest),
            other => Err(GrowthStageParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`GrowthStage`] string.
#[derive(Debug, Clone)]
pub struct GrowthStageParseError(pub String);

impl fmt::Display for GrowthStageParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid growth stage: {:?}", self.0)
    }
}

impl std::error::Error for GrowthStageParseError {}

// ---------------------------------------------------------------------------
// Record structs
// ---------------------------------------------------------------------------

/// A user's pairing of a plant with a growing system.
///
/// Either field may be empty: a plant picked before its system, or a system
/// picked before its plant, are both valid intermediate states. The id is
/// assigned at creation and stable for the pairing's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantSystemPair {
    pub id: Uuid,
    pub plant: String,
    pub system: String,
}

impl PlantSystemPair {
    /// Create a pairing with a fresh id.
    pub fn new(plant: impl Into<String>, system: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            plant: plant.into(),
            system: system.into(),
        }
    }

    /// True when both the plant and the system have been chosen.
    pub fn is_complete(&self) -> bool {
        !self.plant.is_empty() && !self.system.is_empty()
    }
}

/// A recurring maintenance task derived from a pairing.
///
/// The id is a deterministic function of (plant, system, sequence number),
/// which is what lets completion state survive regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceTask {
    pub id: String,
    pub pair_id: Uuid,
    pub description: String,
    pub frequency: Frequency,
    pub completed: bool,
    /// Date the task was last marked done. `None` means never completed.
    pub last_completed: Option<NaiveDate>,
}

/// A dated care reminder for a single plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareReminder {
    pub id: String,
    pub plant: String,
    pub task: String,
    pub due: NaiveDate,
    pub completed: bool,
}

/// An N-P-K dose in millilitres for a given reservoir fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientDose {
    pub nitrogen_ml: f64,
    pub phosphorus_ml: f64,
    pub potassium_ml: f64,
}

impl NutrientDose {
    pub const ZERO: Self = Self {
        nitrogen_ml: 0.0,
        phosphorus_ml: 0.0,
        potassium_ml: 0.0,
    };
}

/// A dated observation logged against a pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthEntry {
    pub id: Uuid,
    pub pair_id: Uuid,
    pub date: NaiveDate,
    pub note: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
