//! Metric calculator: raw unit-tagged measurements → BMI assessment.
//!
//! Pure functions, no side effects. Category thresholds are applied to
//! the full-precision score; only display values are rounded.

use crate::models::{Assessment, BmiCategory, HealthyRange, Measurement};
use crate::pipeline::InsightError;

/// BMI below this is Underweight; the healthy range starts here.
const HEALTHY_BMI_LOW: f64 = 18.5;
/// BMI at or above this is Overweight; the healthy range ends here.
const HEALTHY_BMI_HIGH: f64 = 24.9;
/// BMI at or above this is Obese.
const OBESE_BMI: f64 = 29.9;

/// Domain-sane measurement bounds, in normalized units.
const MIN_HEIGHT_M: f64 = 0.5;
const MAX_HEIGHT_M: f64 = 2.5;
const MIN_WEIGHT_KG: f64 = 2.0;
const MAX_WEIGHT_KG: f64 = 300.0;

/// Static affirmation for the Normal category.
pub const HEALTHY_ADVICE: &str = "Great job! Maintain your current weight.";

/// Compute a BMI assessment from a raw measurement.
///
/// Fails with `InvalidMeasurement` when either value normalizes
/// outside the domain-sane range; callers must not dispatch generation
/// stages in that case.
pub fn compute_assessment(measurement: &Measurement) -> Result<Assessment, InsightError> {
    let height_m = measurement.height.to_meters();
    let weight_kg = measurement.weight.to_kilograms();

    if !height_m.is_finite() || !(MIN_HEIGHT_M..=MAX_HEIGHT_M).contains(&height_m) {
        return Err(InsightError::InvalidMeasurement(format!(
            "height {height_m:.2} m is outside {MIN_HEIGHT_M}-{MAX_HEIGHT_M} m"
        )));
    }
    if !weight_kg.is_finite() || !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&weight_kg) {
        return Err(InsightError::InvalidMeasurement(format!(
            "weight {weight_kg:.2} kg is outside {MIN_WEIGHT_KG}-{MAX_WEIGHT_KG} kg"
        )));
    }

    let score = weight_kg / (height_m * height_m);
    let category = categorize(score);

    let (healthy_range, advice) = match category {
        BmiCategory::Normal => (HealthyRange::AlreadyHealthy, HEALTHY_ADVICE.to_string()),
        _ => {
            // Full-precision bounds; rounded only for the stored range.
            let low = HEALTHY_BMI_LOW * height_m * height_m;
            let high = HEALTHY_BMI_HIGH * height_m * height_m;
            let advice = if category == BmiCategory::Underweight {
                format!(
                    "You should gain at least {:.1} kg to be in the healthy range.",
                    low - weight_kg
                )
            } else {
                format!(
                    "You should lose at least {:.1} kg to be in the healthy range.",
                    weight_kg - high
                )
            };
            (
                HealthyRange::Bounds {
                    low_kg: round1(low),
                    high_kg: round1(high),
                },
                advice,
            )
        }
    };

    Ok(Assessment {
        score: round1(score),
        category,
        healthy_range,
        advice,
    })
}

/// Category for a full-precision BMI score.
pub fn categorize(score: f64) -> BmiCategory {
    if score < HEALTHY_BMI_LOW {
        BmiCategory::Underweight
    } else if score < HEALTHY_BMI_HIGH {
        BmiCategory::Normal
    } else if score < OBESE_BMI {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Round to 1 decimal place for display.
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
