//! Read-only reference catalog of plants and growing systems.
//!
//! The datasets are defined in `plants.toml` and `systems.toml` and embedded
//! in the binary at compile time. Catalog entries are never mutated; user
//! state only references them by name.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// How demanding a plant is to grow. Ordered easiest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        };
        f.write_str(s)
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(DifficultyParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Difficulty`] string.
#[derive(Debug, Clone)]
pub struct DifficultyParseError(pub String);

impl fmt::Display for DifficultyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid difficulty: {:?}", self.0)
    }
}

impl std::error::Error for DifficultyParseError {}

/// Broad category of what the plant yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantCategory {
    LeafyGreen,
    Fruit,
    Root,
}

impl fmt::Display for PlantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::LeafyGreen => "leafy green",
            Self::Fruit => "fruit",
            Self::Root => "root",
        };
        f.write_str(s)
    }
}

impl FromStr for PlantCategory {
    type Err = PlantCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "leafy-green" | "leafy_green" => Ok(Self::LeafyGreen),
            "fruit" => Ok(Self::Fruit),
            "root" => Ok(Self::Root),
            other => Err(PlantCategoryParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`PlantCategory`] string.
#[derive(Debug, Clone)]
pub struct PlantCategoryParseError(pub String);

impl fmt::Display for PlantCategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid plant category: {:?}", self.0)
    }
}

impl std::error::Error for PlantCategoryParseError {}

/// Relative appetite for nutrient solution strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientNeeds {
    Low,
    LowToModerate,
    Moderate,
    High,
}

impl fmt::Display for NutrientNeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::LowToModerate => "low to moderate",
            Self::Moderate => "moderate",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

/// A plant species with its agronomic parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct Plant {
    /// Unique within the catalog; the identifier user state refers to.
    pub name: String,
    pub difficulty: Difficulty,
    /// Typical time to first harvest, in weeks.
    pub growth_weeks: u32,
    pub category: PlantCategory,
    pub description: String,
    pub nutrient_needs: NutrientNeeds,
    pub ph_min: f32,
    pub ph_max: f32,
    pub temp_min_c: f32,
    pub temp_max_c: f32,
    pub humidity_min_pct: u8,
    pub humidity_max_pct: u8,
    pub harvest_time: String,
    /// Companion plant names. Non-owning references into the catalog;
    /// a dangling name is tolerated and simply skipped on resolution.
    pub companions: Vec<String>,
}

/// A growing system with relative cost and difficulty tiers (1-5).
#[derive(Debug, Clone, Deserialize)]
pub struct GrowingSystem {
    pub name: String,
    pub cost_tier: u8,
    pub difficulty_tier: u8,
    pub materials: String,
    pub description: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PlantsFile {
    plants: Vec<Plant>,
}

#[derive(Debug, Deserialize)]
struct SystemsFile {
    systems: Vec<GrowingSystem>,
}

static PLANTS_TOML: &str = include_str!("plants.toml");
static SYSTEMS_TOML: &str = include_str!("systems.toml");

/// The loaded reference data.
#[derive(Debug, Clone)]
pub struct Catalog {
    plants: Vec<Plant>,
    systems: Vec<GrowingSystem>,
}

impl Catalog {
    /// Load the embedded catalog.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. This is a compile-time
    /// invariant -- if the binary was built, the TOML is valid.
    pub fn load() -> Self {
        let plants: PlantsFile =
            toml::from_str(PLANTS_TOML).expect("embedded plants.toml is invalid");
        let systems: SystemsFile =
            toml::from_str(SYSTEMS_TOML).expect("embedded systems.toml is invalid");
        Self {
            plants: plants.plants,
            systems: systems.systems,
        }
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn systems(&self) -> &[GrowingSystem] {
        &self.systems
    }

    /// Look up a plant by its exact name.
    pub fn find_plant(&self, name: &str) -> Option<&Plant> {
        self.plants.iter().find(|p| p.name == name)
    }

    /// Look up a system by its exact name.
    pub fn find_system(&self, name: &str) -> Option<&GrowingSystem> {
        self.systems.iter().find(|s| s.name == name)
    }

    /// Resolve a plant's companion references. Dangling names are skipped.
    pub fn companions_of(&self, name: &str) -> Vec<&Plant> {
        let Some(plant) = self.find_plant(name) else {
            return Vec::new();
        };
        plant
            .companions
            .iter()
            .filter_map(|c| self.find_plant(c))
            .collect()
    }

    /// Plants at or below a given difficulty.
    pub fn plants_by_difficulty(&self, max: Difficulty) -> Vec<&Plant> {
        self.plants.iter().filter(|p| p.difficulty <= max).collect()
    }

    /// Plants in a given category.
    pub fn plants_by_category(&self, category: PlantCategory) -> Vec<&Plant> {
        self.plants
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_catalog_has_reference_data() {
        let catalog = Catalog::load();
        assert_eq!(catalog.plants().len(), 8);
        assert_eq!(catalog.systems().len(), 5);
    }

    #[test]
    fn plant_names_are_unique() {
        let catalog = Catalog::load();
        let mut names: Vec<&str> = catalog.plants().iter().map(|p| p.name.as_str()).collect();
        let original_len = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), original_len);
    }

    #[test]
    fn find_plant_exact_match_only() {
        let catalog = Catalog::load();
        assert!(catalog.find_plant("Tomat (Tomato)").is_some());
        assert!(catalog.find_plant("tomat (tomato)").is_none());
        assert!(catalog.find_plant("Tomato").is_none());
    }

    #[test]
    fn find_system_known_names() {
        let catalog = Catalog::load();
        for name in [
            "Wick System",
            "Deep Water Culture (DWC)",
            "Nutrient Film Technique (NFT)",
            "Ebb and Flow (Flood and Drain)",
            "Aeroponics",
        ] {
            assert!(catalog.find_system(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn companion_references_resolve() {
        let catalog = Catalog::load();
        for plant in catalog.plants() {
            let resolved = catalog.companions_of(&plant.name);
            assert_eq!(
                resolved.len(),
                plant.companions.len(),
                "dangling companion reference in {:?}",
                plant.name
            );
        }
    }

    #[test]
    fn companions_of_unknown_plant_is_empty() {
        let catalog = Catalog::load();
        assert!(catalog.companions_of("Durian").is_empty());
    }

    #[test]
    fn ranges_are_ordered() {
        let catalog = Catalog::load();
        for p in catalog.plants() {
            assert!(p.ph_min < p.ph_max, "{}", p.name);
            assert!(p.temp_min_c < p.temp_max_c, "{}", p.name);
            assert!(p.humidity_min_pct < p.humidity_max_pct, "{}", p.name);
        }
    }

    #[test]
    fn difficulty_filter_is_inclusive() {
        let catalog = Catalog::load();
        let easy = catalog.plants_by_difficulty(Difficulty::Easy);
        assert_eq!(easy.len(), 3);
        let up_to_medium = catalog.plants_by_difficulty(Difficulty::Medium);
        assert_eq!(up_to_medium.len(), 7);
        assert_eq!(catalog.plants_by_difficulty(Difficulty::Hard).len(), 8);
    }

    #[test]
    fn category_filter() {
        let catalog = Catalog::load();
        assert_eq!(
            catalog.plants_by_category(PlantCategory::LeafyGreen).len(),
            4
        );
        assert_eq!(catalog.plants_by_category(PlantCategory::Fruit).len(), 3);
        assert_eq!(catalog.plants_by_category(PlantCategory::Root).len(), 1);
    }

    #[test]
    fn difficulty_display_roundtrip() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(d.to_string().parse::<Difficulty>().unwrap(), d);
        }
        let err = "extreme".parse::<Difficulty>().unwrap_err();
        assert_eq!(err.to_string(), "invalid difficulty: \"extreme\"");
    }

    #[test]
    fn category_parse_accepts_both_spellings() {
        assert_eq!(
            "leafy-green".parse::<PlantCategory>().unwrap(),
            PlantCategory::LeafyGreen
        );
        assert_eq!(
            "leafy_green".parse::<PlantCategory>().unwrap(),
            PlantCategory::LeafyGreen
        );
        let err = "herb".parse::<PlantCategory>().unwrap_err();
        assert_eq!(err.to_string(), "invalid plant category: \"herb\"");
    }

    #[test]
    fn system_tiers_in_range() {
        let catalog = Catalog::load();
        for s in catalog.systems() {
            assert!((1..=5).contains(&s.cost_tier), "{}", s.name);
            assert!((1..=5).contains(&s.difficulty_tier), "{}", s.name);
        }
    }
}
