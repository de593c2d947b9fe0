use serde::Serialize;

use crate::models::trip_plan::LinkedEntry;

/// A curated destination entry. Immutable for the process lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct Destination {
    pub name: String,
    pub image: String,
    pub description: String,
    pub routes: Vec<String>,
    pub food: Vec<LinkedEntry>,
    pub hotels: Vec<LinkedEntry>,
    pub attractions: Vec<LinkedEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DestinationSummary {
    pub key: String,
    pub name: String,
    pub image: String,
    pub description: String,
}
