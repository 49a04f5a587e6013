//! Nutrient dose calculation.
//!
//! Doses scale linearly with reservoir volume from a fixed per-stage table
//! expressed per 1000 litres. Callers validate that the volume is positive;
//! the function itself clamps bad input to a zero dose rather than producing
//! negative or NaN amounts.

use sprout_store::models::{GrowthStage, NutrientDose};

/// Millilitres of each concentrate per [`REFERENCE_VOLUME_L`] litres of
/// water: (nitrogen, phosphorus, potassium).
fn stage_row(stage: GrowthStage) -> (f64, f64, f64) {
    match stage {
        GrowthStage::Seedling => (2000.0, 1000.0, 1500.0),
        GrowthStage::Vegetative => (5000.0, 3000.0, 4000.0),
        GrowthStage::Flowering => (3000.0, 4000.0, 5000.0),
        // Ripening feed: potassium-heavy, nitrogen tapered off.
        GrowthStage::Harvest => (2000.0, 3500.0, 5500.0),
    }
}

/// The table above is expressed per this many litres.
pub const REFERENCE_VOLUME_L: f64 = 1000.0;

/// Compute the N-P-K dose for a reservoir of `water_volume_l` litres.
///
/// Zero, negative, or non-finite volumes yield an all-zero dose.
pub fn calculate_nutrient_dose(stage: GrowthStage, water_volume_l: f64) -> NutrientDose {
    if !water_volume_l.is_finite() || water_volume_l <= 0.0 {
        return NutrientDose::ZERO;
    }

    let (n, p, k) = stage_row(stage);
    let scale = water_volume_l / REFERENCE_VOLUME_L;
    NutrientDose {
        nitrogen_ml: n * scale,
        phosphorus_ml: p * scale,
        potassium_ml: k * scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAGES: [GrowthStage; 4] = [
        GrowthStage::Seedling,
        GrowthStage::Vegetative,
        GrowthStage::Flowering,
        GrowthStage::Harvest,
    ];

    #[test]
    fn zero_volume_yields_zero_dose_for_every_stage() {
        for stage in STAGES {
            assert_eq!(calculate_nutrient_dose(stage, 0.0), NutrientDose::ZERO);
        }
    }

    #[test]
    fn negative_and_nan_volumes_clamp_to_zero() {
        assert_eq!(
            calculate_nutrient_dose(GrowthStage::Vegetative, -10.0),
            NutrientDose::ZERO
        );
        assert_eq!(
            calculate_nutrient_dose(GrowthStage::Vegetative, f64::NAN),
            NutrientDose::ZERO
        );
        assert_eq!(
            calculate_nutrient_dose(GrowthStage::Vegetative, f64::INFINITY),
            NutrientDose::ZERO
        );
    }

    #[test]
    fn dose_is_linear_in_volume() {
        for stage in STAGES {
            let single = calculate_nutrient_dose(stage, 17.5);
            let double = calculate_nutrient_dose(stage, 35.0);
            assert!((double.nitrogen_ml - 2.0 * single.nitrogen_ml).abs() < 1e-9);
            assert!((double.phosphorus_ml - 2.0 * single.phosphorus_ml).abs() < 1e-9);
            assert!((double.potassium_ml - 2.0 * single.potassium_ml).abs() < 1e-9);
        }
    }

    #[test]
    fn vegetative_dose_at_one_litre() {
        // The vegetative row works out to 5/3/4 ml per litre.
        let dose = calculate_nutrient_dose(GrowthStage::Vegetative, 1.0);
        assert!((dose.nitrogen_ml - 5.0).abs() < 1e-9);
        assert!((dose.phosphorus_ml - 3.0).abs() < 1e-9);
        assert!((dose.potassium_ml - 4.0).abs() < 1e-9);
    }
}
