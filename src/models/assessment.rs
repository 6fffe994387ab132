use serde::{Deserialize, Serialize};

/// BMI category against fixed thresholds (18.5 / 24.9 / 29.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal Weight")]
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Display / storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal Weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    /// Parse the storage form back. Unknown strings map to `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Underweight" => Some(Self::Underweight),
            "Normal Weight" => Some(Self::Normal),
            "Overweight" => Some(Self::Overweight),
            "Obese" => Some(Self::Obese),
            _ => None,
        }
    }
}

/// Healthy weight range for the measured height.
///
/// Collapses to a single marker when the user is already inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HealthyRange {
    AlreadyHealthy,
    Bounds { low_kg: f64, high_kg: f64 },
}

/// Derived health assessment. Recomputed whenever the measurement
/// changes; no independent lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// BMI score, rounded to 1 decimal for display.
    pub score: f64,
    pub category: BmiCategory,
    pub healthy_range: HealthyRange,
    pub advice: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_storage_form() {
        for cat in [
            BmiCategory::Underweight,
            BmiCategory::Normal,
            BmiCategory::Overweight,
            BmiCategory::Obese,
        ] {
            assert_eq!(BmiCategory::parse(cat.as_str()), Some(cat));
        }
    }

    #[test]
    fn category_json_form_matches_storage_form() {
        for cat in [
            BmiCategory::Underweight,
            BmiCategory::Normal,
            BmiCategory::Overweight,
            BmiCategory::Obese,
        ] {
            let json = serde_json::to_value(cat).unwrap();
            assert_eq!(json, cat.as_str());
            let back: BmiCategory = serde_json::from_value(json).unwrap();
            assert_eq!(back, cat);
        }
    }

    #[test]
    fn unknown_category_string_is_none() {
        assert_eq!(BmiCategory::parse("Svelte"), None);
    }

    #[test]
    fn healthy_range_serializes_tagged() {
        let json = serde_json::to_string(&HealthyRange::AlreadyHealthy).unwrap();
        assert!(json.contains("already_healthy"));
        let json = serde_json::to_string(&HealthyRange::Bounds {
            low_kg: 47.4,
            high_kg: 63.7,
        })
        .unwrap();
        assert!(json.contains("\"kind\":\"bounds\""));
    }
}
