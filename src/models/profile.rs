use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gender as collected by the intake wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "female" => Some(Self::Female),
            "male" => Some(Self::Male),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// The user behind the current intake session.
///
/// Stage prompts embed the display name, age and gender; records are
/// scoped to the owning profile id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
}

impl UserProfile {
    pub fn new(name: &str, age: u32, gender: Gender) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            age,
            gender,
        }
    }
}
