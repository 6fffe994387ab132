use serde::{Deserialize, Serialize};

/// Inches per foot.
const INCHES_PER_FOOT: f64 = 12.0;
/// Meters per inch.
const METERS_PER_INCH: f64 = 0.0254;
/// Kilograms per pound.
const KG_PER_POUND: f64 = 0.453592;

/// Raw user-entered height with an explicit unit tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum HeightInput {
    Cm { value: f64 },
    FeetInches { feet: f64, inches: f64 },
}

impl HeightInput {
    /// Normalize to meters regardless of input unit.
    pub fn to_meters(self) -> f64 {
        match self {
            Self::Cm { value } => value / 100.0,
            Self::FeetInches { feet, inches } => (feet * INCHES_PER_FOOT + inches) * METERS_PER_INCH,
        }
    }
}

/// Raw user-entered weight with an explicit unit tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum WeightInput {
    Kg { value: f64 },
    Lbs { value: f64 },
}

impl WeightInput {
    /// Normalize to kilograms regardless of input unit.
    pub fn to_kilograms(self) -> f64 {
        match self {
            Self::Kg { value } => value,
            Self::Lbs { value } => value * KG_PER_POUND,
        }
    }
}

/// A complete biometric measurement as submitted by the intake wizard.
///
/// Immutable once handed to the metric calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub height: HeightInput,
    pub weight: WeightInput,
}
