use actix_web::{web, HttpResponse, Responder};

use crate::models::trip_plan::TripRequest;
use crate::services::catalog::Catalog;
use crate::services::gemini_service::GeminiService;
use crate::services::places_service::GooglePlacesService;
use crate::services::plan_service::TripPlanner;

// The pipeline allocates one itinerary entry per day; cap the count so
// an absurd request cannot balloon memory.
const MAX_TRIP_DAYS: u32 = 30;

/// Plan a trip. Never returns a server error for generation failures;
/// the fallback provider guarantees a complete plan.
pub async fn plan_trip(
    catalog: web::Data<Catalog>,
    input: web::Json<TripRequest>,
) -> impl Responder {
    let request = input.into_inner();
    let days = request.days.clamp(1, MAX_TRIP_DAYS);

    let generator = GeminiService::from_env();
    let places = match GooglePlacesService::new() {
        Ok(service) => Some(service),
        Err(err) => {
            println!("Link enrichment disabled: {}", err);
            None
        }
    };

    let planner = TripPlanner::new(catalog.into_inner(), generator, places);
    let plan = planner.plan(&request.destination, request.budget, days).await;

    HttpResponse::Ok().json(plan)
}
