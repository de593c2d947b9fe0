//! Itinerary pipeline: prompt, generate, normalize, assemble.
//!
//! Every path through `TripPlanner::plan` ends in a complete `TripPlan`.
//! Generation failures degrade to the line-heuristic plan or the static
//! fallback; nothing surfaces as an error to the request layer.

use std::sync::Arc;

use crate::models::trip_plan::{DraftEntry, LinkedEntry, PlanDraft, TripPlan};
use crate::services::catalog::{normalize_key, Catalog};
use crate::services::gemini_service::{build_trip_prompt, GenerationClient, GenerationOutcome};
use crate::services::places_service::{search_link, GooglePlacesService};

const DEFAULT_COST_PER_DAY: i64 = 3500;
const FLAGSHIP_COST_PER_DAY: i64 = 3000;
const FLAGSHIP_KEY: &str = "hundred_islands";

const FLAGSHIP_ITINERARY: [&str; 3] = [
    "Day 1: Arrive in Alaminos City and check in to your hotel near Lucap Wharf.",
    "Day 2: Start island hopping and visit Governor's, Quezon, and Children's Islands.",
    "Day 3: Explore Cuenco Island's cave and enjoy swimming before heading home.",
];

pub struct TripPlanner<G: GenerationClient> {
    catalog: Arc<Catalog>,
    generator: G,
    places: Option<GooglePlacesService>,
}

impl<G: GenerationClient> TripPlanner<G> {
    pub fn new(catalog: Arc<Catalog>, generator: G, places: Option<GooglePlacesService>) -> Self {
        Self {
            catalog,
            generator,
            places,
        }
    }

    /// Produce a plan for the requested destination, budget, and day count.
    /// Infallible: degraded inputs yield degraded but complete plans.
    pub async fn plan(&self, destination: &str, budget: i64, days: u32) -> TripPlan {
        if !self.generator.is_available() {
            println!(
                "Generation service unavailable, using fallback plan for {}",
                destination
            );
            return self.fallback_plan(destination, budget, days);
        }

        let prompt = build_trip_prompt(destination, budget, days);
        match self.generator.generate(&prompt).await {
            GenerationOutcome::Structured(draft) => {
                self.assemble_structured(draft, destination, budget, days).await
            }
            GenerationOutcome::PlainText(text) => {
                self.assemble_text(&text, destination, budget, days)
            }
            GenerationOutcome::Failed(err) => {
                eprintln!("Generation failed for {}: {}", destination, err);
                self.fallback_plan(destination, budget, days)
            }
        }
    }

    async fn assemble_structured(
        &self,
        draft: PlanDraft,
        destination: &str,
        budget: i64,
        days: u32,
    ) -> TripPlan {
        let itinerary = fit_to_days(draft.itinerary, days, |n| {
            format!("Day {}: Explore more of {}.", n, destination)
        });
        let estimated_cost = draft
            .estimated_cost
            .unwrap_or(days as i64 * DEFAULT_COST_PER_DAY);
        let remaining = budget - estimated_cost;
        let suggestion = draft
            .suggestion
            .unwrap_or_else(|| budget_suggestion(remaining));

        // A catalog match always overwrites the model's recommendation
        // lists; enrichment only applies to model entries on a miss.
        let (hotels, food, attractions) = match self.catalog.lookup(destination) {
            Some(dest) => (dest.hotels.clone(), dest.food.clone(), dest.attractions.clone()),
            None => (
                self.resolve_entries(draft.hotels, destination).await,
                self.resolve_entries(draft.food, destination).await,
                self.resolve_entries(draft.attractions, destination).await,
            ),
        };

        TripPlan {
            destination: draft
                .destination
                .unwrap_or_else(|| self.display_name(destination)),
            days,
            budget,
            estimated_cost,
            remaining,
            suggestion,
            itinerary,
            hotels,
            food,
            attractions,
        }
    }

    /// Line-oriented heuristic for a successful call that returned prose
    /// instead of JSON: each non-blank line becomes one day.
    fn assemble_text(&self, text: &str, destination: &str, budget: i64, days: u32) -> TripPlan {
        let labeled: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(i, line)| format!("Day {}: {}", i + 1, line))
            .collect();
        let itinerary = fit_to_days(labeled, days, |n| {
            format!("Day {}: Continue exploring {}.", n, destination)
        });

        let estimated_cost = days as i64 * DEFAULT_COST_PER_DAY;
        let remaining = budget - estimated_cost;

        let (hotels, food, attractions) = match self.catalog.lookup(destination) {
            Some(dest) => (dest.hotels.clone(), dest.food.clone(), dest.attractions.clone()),
            None => (Vec::new(), Vec::new(), Vec::new()),
        };

        TripPlan {
            destination: self.display_name(destination),
            days,
            budget,
            estimated_cost,
            remaining,
            suggestion: budget_suggestion(remaining),
            itinerary,
            hotels,
            food,
            attractions,
        }
    }

    pub fn fallback_plan(&self, destination: &str, budget: i64, days: u32) -> TripPlan {
        if normalize_key(destination) == FLAGSHIP_KEY {
            flagship_fallback(&self.catalog, budget, days)
        } else {
            generic_fallback(destination, budget, days)
        }
    }

    async fn resolve_entries(
        &self,
        entries: Vec<DraftEntry>,
        place: &str,
    ) -> Vec<LinkedEntry> {
        match &self.places {
            Some(places) => {
                let names: Vec<String> =
                    entries.iter().map(|entry| entry.name().to_string()).collect();
                places.enrich(&names, place).await
            }
            None => entries
                .into_iter()
                .map(|entry| {
                    let link = match entry.link() {
                        Some(link) => link.to_string(),
                        None => search_link(entry.name(), place),
                    };
                    LinkedEntry::new(entry.name(), link)
                })
                .collect(),
        }
    }

    fn display_name(&self, destination: &str) -> String {
        self.catalog
            .lookup(destination)
            .map(|dest| dest.name.clone())
            .unwrap_or_else(|| destination.to_string())
    }
}

/// Deterministic plan for the flagship destination, never touching the
/// network. Itinerary template is padded or truncated to the day count.
pub fn flagship_fallback(catalog: &Catalog, budget: i64, days: u32) -> TripPlan {
    let flagship = catalog
        .get(FLAGSHIP_KEY)
        .expect("flagship destination present in catalog");

    let template: Vec<String> = FLAGSHIP_ITINERARY.iter().map(|s| s.to_string()).collect();
    let itinerary = fit_to_days(template, days, |n| {
        format!("Day {}: Explore more of {}.", n, flagship.name)
    });

    let estimated_cost = FLAGSHIP_COST_PER_DAY * days as i64;
    let remaining = budget - estimated_cost;

    TripPlan {
        destination: flagship.name.clone(),
        days,
        budget,
        estimated_cost,
        remaining,
        suggestion: budget_suggestion(remaining),
        itinerary,
        hotels: flagship.hotels.clone(),
        food: flagship.food.clone(),
        attractions: flagship.attractions.clone(),
    }
}

/// Deterministic templated plan for any other destination when all else
/// has failed.
pub fn generic_fallback(destination: &str, budget: i64, days: u32) -> TripPlan {
    let template = vec![
        format!("Day 1: Explore nearby attractions in {}.", destination),
        "Day 2: Try local restaurants.".to_string(),
        "Day 3: Relax and enjoy your hotel stay.".to_string(),
    ];
    let itinerary = fit_to_days(template, days, |n| {
        format!("Day {}: Explore more of {}.", n, destination)
    });

    let estimated_cost = DEFAULT_COST_PER_DAY * days as i64;
    let remaining = budget - estimated_cost;

    TripPlan {
        destination: destination.to_string(),
        days,
        budget,
        estimated_cost,
        remaining,
        suggestion: budget_suggestion(remaining),
        itinerary,
        hotels: vec![LinkedEntry::new("Local hotel", search_link("hotels in", destination))],
        food: vec![LinkedEntry::new(
            "Local restaurant",
            search_link("restaurants in", destination),
        )],
        attractions: vec![LinkedEntry::new(
            "Local attraction",
            search_link("tourist spots in", destination),
        )],
    }
}

/// Pad with generated filler entries or truncate so the itinerary length
/// equals the requested day count.
fn fit_to_days(mut itinerary: Vec<String>, days: u32, filler: impl Fn(u32) -> String) -> Vec<String> {
    itinerary.truncate(days as usize);
    while (itinerary.len() as u32) < days {
        let next = itinerary.len() as u32 + 1;
        itinerary.push(filler(next));
    }
    itinerary
}

fn budget_suggestion(remaining: i64) -> String {
    if remaining > 0 {
        "You're within budget!".to_string()
    } else {
        "Consider increasing your budget.".to_string()
    }
}
