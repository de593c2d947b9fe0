use std::collections::HashMap;

use crate::models::destination::{Destination, DestinationSummary};
use crate::models::trip_plan::LinkedEntry;
use crate::services::places_service::search_link;

/// Normalized destination identifier: lowercase, spaces to underscores.
/// No fuzzy matching beyond this.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Static reference data for the known destinations. Built once at startup
/// and shared read-only across requests.
pub struct Catalog {
    destinations: HashMap<String, Destination>,
}

fn curated(names: &[&str], place: &str) -> Vec<LinkedEntry> {
    names
        .iter()
        .map(|name| LinkedEntry::new(*name, search_link(name, place)))
        .collect()
}

impl Catalog {
    pub fn new() -> Self {
        let mut destinations = HashMap::new();

        destinations.insert(
            "palawan".to_string(),
            Destination {
                name: "El Nido, Palawan".to_string(),
                image: "https://images.unsplash.com/photo-1589308078059-be1415eab4c3".to_string(),
                description: "El Nido is known for its crystal-clear lagoons, white sand beaches, \
                              and towering limestone cliffs."
                    .to_string(),
                routes: vec![
                    "Flight from Manila to Puerto Princesa (1 hour)".to_string(),
                    "Van ride from Puerto Princesa to El Nido (5-6 hours)".to_string(),
                ],
                food: curated(&["Artcafe", "Trattoria Altrove"], "El Nido, Palawan"),
                hotels: curated(
                    &["El Nido Resorts Miniloc Island", "Cadlao Resort & Restaurant"],
                    "El Nido, Palawan",
                ),
                attractions: curated(
                    &["Big Lagoon", "Small Lagoon", "Secret Beach", "Nacpan Beach"],
                    "El Nido, Palawan",
                ),
            },
        );

        destinations.insert(
            "baguio".to_string(),
            Destination {
                name: "Baguio City".to_string(),
                image: "https://images.unsplash.com/photo-1605540436418-ef47b9f6d16b".to_string(),
                description: "Known as the 'Summer Capital of the Philippines', Baguio offers cool \
                              weather, pine trees, and scenic spots."
                    .to_string(),
                routes: vec![
                    "Bus from Manila to Baguio (4-5 hours via NLEX/SCTEX)".to_string(),
                    "Private car via TPLEX (approx. 4 hours)".to_string(),
                ],
                food: curated(&["Good Taste", "Hill Station"], "Baguio City"),
                hotels: curated(
                    &["The Manor at Camp John Hay", "Azalea Hotels & Residences"],
                    "Baguio City",
                ),
                attractions: curated(
                    &["Burnham Park", "Mines View Park", "Session Road", "Camp John Hay"],
                    "Baguio City",
                ),
            },
        );

        destinations.insert(
            "cebu".to_string(),
            Destination {
                name: "Cebu".to_string(),
                image: "https://images.unsplash.com/photo-1598951730302-8a9859c03e03".to_string(),
                description: "Cebu is a mix of history, adventure, and modern living. Enjoy \
                              beaches, temples, and whale shark encounters."
                    .to_string(),
                routes: vec![
                    "Flight from Manila to Mactan-Cebu International Airport (1 hour)".to_string(),
                    "Accessible by ferry from nearby islands".to_string(),
                ],
                food: curated(&["Rico's Lechon", "Lantaw Native Restaurant"], "Cebu"),
                hotels: curated(
                    &["Shangri-La's Mactan Resort and Spa", "Quest Hotel Cebu"],
                    "Cebu",
                ),
                attractions: curated(
                    &[
                        "Magellan's Cross",
                        "Temple of Leah",
                        "Kawasan Falls",
                        "Oslob Whale Shark Watching",
                    ],
                    "Cebu",
                ),
            },
        );

        destinations.insert(
            "hundred_islands".to_string(),
            Destination {
                name: "Hundred Islands National Park".to_string(),
                image: "https://upload.wikimedia.org/wikipedia/commons/2/2c/Hundred_Islands_National_Park_Alaminos_Pangasinan.jpg"
                    .to_string(),
                description: "Hundred Islands National Park in Alaminos City, Pangasinan, features \
                              124 stunning islands and islets. It's perfect for island hopping, \
                              snorkeling, and sightseeing."
                    .to_string(),
                routes: vec![
                    "Bus from Manila to Alaminos City (5-6 hours via NLEX & TPLEX)".to_string(),
                    "Boat rental from Lucap Wharf for island-hopping tours".to_string(),
                ],
                food: curated(
                    &["Maxine by the Sea", "Lucap Grill & Resto"],
                    "Hundred Islands",
                ),
                hotels: curated(
                    &[
                        "Island Tropic Hotel and Restaurant",
                        "Casa del Camba Resort",
                        "Alaminos City Hotel",
                    ],
                    "Hundred Islands",
                ),
                attractions: curated(
                    &[
                        "Governor's Island",
                        "Quezon Island",
                        "Children's Island",
                        "Cuenco Island",
                    ],
                    "Hundred Islands",
                ),
            },
        );

        Self { destinations }
    }

    pub fn get(&self, key: &str) -> Option<&Destination> {
        self.destinations.get(key)
    }

    /// Lookup by a raw destination string as the user typed it.
    pub fn lookup(&self, raw: &str) -> Option<&Destination> {
        self.destinations.get(&normalize_key(raw))
    }

    /// Summaries in stable key order for the listing endpoint.
    pub fn summaries(&self) -> Vec<DestinationSummary> {
        let mut keys: Vec<&String> = self.destinations.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                let dest = &self.destinations[key];
                DestinationSummary {
                    key: key.clone(),
                    name: dest.name.clone(),
                    image: dest.image.clone(),
                    description: dest.description.clone(),
                }
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
