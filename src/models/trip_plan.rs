use serde::{Deserialize, Serialize};

/// A named recommendation with a resolved or synthesized web link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedEntry {
    pub name: String,
    pub link: String,
}

impl LinkedEntry {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
        }
    }
}

/// The fully-assembled plan handed to the presentation layer. Every field
/// is always populated, even when generation fails entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    pub destination: String,
    pub days: u32,
    pub budget: i64,
    pub estimated_cost: i64,
    pub remaining: i64,
    pub suggestion: String,
    pub itinerary: Vec<String>,
    pub hotels: Vec<LinkedEntry>,
    pub food: Vec<LinkedEntry>,
    pub attractions: Vec<LinkedEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TripRequest {
    pub destination: String,
    #[serde(default)]
    pub budget: i64,
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    1
}

/// Partial plan decoded from the model's JSON output. Everything is
/// optional; the assembler fills in whatever the model left out.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlanDraft {
    pub destination: Option<String>,
    pub days: Option<u32>,
    pub budget: Option<i64>,
    pub estimated_cost: Option<i64>,
    pub remaining: Option<i64>,
    pub suggestion: Option<String>,
    pub itinerary: Vec<String>,
    pub hotels: Vec<DraftEntry>,
    pub food: Vec<DraftEntry>,
    pub attractions: Vec<DraftEntry>,
}

/// Models sometimes emit bare strings instead of `{name, link}` objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DraftEntry {
    Named {
        name: String,
        #[serde(default)]
        link: Option<String>,
    },
    Bare(String),
}

impl DraftEntry {
    pub fn name(&self) -> &str {
        match self {
            DraftEntry::Named { name, .. } => name,
            DraftEntry::Bare(name) => name,
        }
    }

    pub fn link(&self) -> Option<&str> {
        match self {
            DraftEntry::Named { link, .. } => link.as_deref(),
            DraftEntry::Bare(_) => None,
        }
    }
}
