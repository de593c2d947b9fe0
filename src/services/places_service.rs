//! Link enrichment backed by the Google Places find-place API.
//!
//! Best effort only: every lookup failure degrades to a synthesized
//! search-engine link, so enrichment never fails and always returns one
//! entry per input, in input order.

use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::error::Error;
use std::fmt;
use std::time::Duration;

use crate::models::trip_plan::LinkedEntry;

const FIND_PLACE_URL: &str = "https://maps.googleapis.com/maps/api/place/findplacefromtext/json";
const LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Deterministic search-engine query link for a venue name and place.
pub fn search_link(name: &str, place: &str) -> String {
    format!(
        "https://www.google.com/search?q={}+{}",
        name.replace(' ', "+"),
        place.replace(' ', "+")
    )
}

#[derive(Debug)]
pub enum PlacesError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
}

impl fmt::Display for PlacesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacesError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            PlacesError::HttpError(err) => write!(f, "HTTP error: {}", err),
        }
    }
}

impl Error for PlacesError {}

impl From<reqwest::Error> for PlacesError {
    fn from(err: reqwest::Error) -> Self {
        PlacesError::HttpError(err)
    }
}

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    #[serde(default)]
    candidates: Vec<PlaceCandidate>,
}

#[derive(Debug, Deserialize)]
struct PlaceCandidate {
    website: Option<String>,
    url: Option<String>,
}

/// First candidate's official website, then its Maps listing URL.
fn best_candidate_link(body: FindPlaceResponse) -> Option<String> {
    body.candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.website.or(candidate.url))
}

pub struct GooglePlacesService {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GooglePlacesService {
    pub fn new() -> Result<Self, PlacesError> {
        let api_key = env::var("GOOGLE_PLACES_KEY")
            .map_err(|_| PlacesError::EnvironmentError("GOOGLE_PLACES_KEY not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key,
            endpoint: FIND_PLACE_URL.to_string(),
        })
    }

    #[cfg(test)]
    fn with_endpoint(api_key: &str, endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            endpoint: endpoint.to_string(),
        }
    }

    /// Resolve each name to a real-world link, one lookup per entry.
    /// Order-preserving; a failed lookup yields a search link instead.
    pub async fn enrich(&self, names: &[String], place: &str) -> Vec<LinkedEntry> {
        let mut enriched = Vec::with_capacity(names.len());
        for name in names {
            let link = match self.find_link(name, place).await {
                Ok(Some(link)) => link,
                Ok(None) => search_link(name, place),
                Err(err) => {
                    eprintln!("Google Places error for {}: {}", name, err);
                    search_link(name, place)
                }
            };
            enriched.push(LinkedEntry::new(name.clone(), link));
        }
        enriched
    }

    async fn find_link(&self, name: &str, place: &str) -> Result<Option<String>, PlacesError> {
        let input = format!("{} {} Philippines", name, place);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("input", input.as_str()),
                ("inputtype", "textquery"),
                ("fields", "name,website,url"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let body: FindPlaceResponse = response.json().await?;
        Ok(best_candidate_link(body))
    }
}
