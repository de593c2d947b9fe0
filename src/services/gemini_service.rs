//! Generation client for the Gemini generateContent REST API.
//!
//! One outbound call per invocation, no retries. Every failure mode is
//! folded into `GenerationOutcome::Failed`; nothing here panics or
//! propagates a transport fault to the caller. A missing API key is
//! detected before any network attempt.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error;
use std::fmt;

use crate::models::trip_plan::PlanDraft;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-pro";
const MAX_OUTPUT_TOKENS: u32 = 800;

/// Instruction text sent to the model. Deterministic for identical inputs;
/// no validation, the caller's values pass through literally.
pub fn build_trip_prompt(place: &str, budget: i64, days: u32) -> String {
    format!(
        r#"You are a helpful travel assistant. Produce a JSON object (only JSON) with this structure:

{{
  "destination": "<destination name>",
  "days": <integer>,
  "budget": <integer>,
  "estimated_cost": <integer>,
  "remaining": <integer>,
  "suggestion": "<short advice about budget>",
  "itinerary": ["Day 1: ...", "Day 2: ...", ...],
  "hotels": [{{"name": "...", "link": "https://www.google.com/search?q=<hotel name>+{place}"}}],
  "food": [{{"name": "...", "link": "https://www.google.com/search?q=<restaurant name>+{place}"}}],
  "attractions": [{{"name": "...", "link": "https://www.google.com/search?q=<attraction name>+{place}"}}]
}}

Generate a {days}-day travel plan for '{place}' in the Philippines with a budget of PHP {budget}.
The itinerary must contain exactly {days} entries. Use real-sounding hotels, restaurants, and attractions.
Do not include any explanation outside the JSON."#,
        place = place,
        budget = budget,
        days = days,
    )
}

#[derive(Debug)]
pub enum GenerationError {
    ServiceUnavailable(String),
    TransportFailure(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            GenerationError::TransportFailure(msg) => write!(f, "Transport failure: {}", msg),
        }
    }
}

impl Error for GenerationError {}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::TransportFailure(err.to_string())
    }
}

/// Tagged decode of a generation attempt. Downstream logic switches on
/// this instead of probing response shapes.
#[derive(Debug)]
pub enum GenerationOutcome {
    Structured(PlanDraft),
    PlainText(String),
    Failed(GenerationError),
}

/// Seam between the planner and the model service.
pub trait GenerationClient {
    /// Whether credentials are present. When false the planner skips
    /// generation entirely; no network attempt is made.
    fn is_available(&self) -> bool;

    async fn generate(&self, prompt: &str) -> GenerationOutcome;
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

pub struct GeminiService {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiService {
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            api_key: env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty()),
            model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        }
    }

    async fn call_gemini(&self, api_key: &str, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/{}:generateContent", GEMINI_BASE_URL, self.model);
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::TransportFailure(format!(
                "Gemini API error: HTTP {}",
                response.status()
            )));
        }

        let envelope: GenerateContentResponse = response.json().await?;
        envelope
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                GenerationError::TransportFailure("No candidates in Gemini response".to_string())
            })
    }
}

impl GenerationClient for GeminiService {
    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str) -> GenerationOutcome {
        let Some(api_key) = self.api_key.clone() else {
            return GenerationOutcome::Failed(GenerationError::ServiceUnavailable(
                "GEMINI_API_KEY not set in environment".to_string(),
            ));
        };

        match self.call_gemini(&api_key, prompt).await {
            Ok(text) => decode_generation_text(&text),
            Err(err) => {
                eprintln!("Gemini call failed: {}", err);
                GenerationOutcome::Failed(err)
            }
        }
    }
}

/// Interpret the model's raw text: structured JSON if it parses, plain
/// text if non-blank, failure otherwise.
pub fn decode_generation_text(text: &str) -> GenerationOutcome {
    let trimmed = strip_code_fences(text.trim());
    if trimmed.is_empty() {
        return GenerationOutcome::Failed(GenerationError::TransportFailure(
            "Empty response from model".to_string(),
        ));
    }

    match serde_json::from_str::<PlanDraft>(trimmed) {
        Ok(draft) => GenerationOutcome::Structured(draft),
        Err(_) => GenerationOutcome::PlainText(trimmed.to_string()),
    }
}

// Models often wrap JSON in ```json fences despite instructions.
fn strip_code_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches('\n')
        .trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_trip_prompt("Baguio", 10000, 3);
        let b = build_trip_prompt("Baguio", 10000, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_prompt_names_required_fields() {
        let prompt = build_trip_prompt("Cebu", 8000, 2);
        for field in [
            "\"destination\"",
            "\"estimated_cost\"",
            "\"remaining\"",
            "\"suggestion\"",
            "\"itinerary\"",
            "\"hotels\"",
            "\"food\"",
            "\"attractions\"",
        ] {
            assert!(prompt.contains(field), "prompt missing {}", field);
        }
        assert!(prompt.contains("2-day travel plan for 'Cebu'"));
        assert!(prompt.contains("budget of PHP 8000"));
        assert!(prompt.contains("exactly 2 entries"));
        assert!(prompt.contains("Do not include any explanation outside the JSON"));
    }

    #[test]
    fn test_prompt_passes_odd_values_through() {
        let prompt = build_trip_prompt("Nowhere", -50, 1);
        assert!(prompt.contains("budget of PHP -50"));
    }

    #[test]
    fn test_decode_structured_json() {
        let text = r#"{"destination": "Cebu", "itinerary": ["Day 1: beach"], "estimated_cost": 4000}"#;
        match decode_generation_text(text) {
            GenerationOutcome::Structured(draft) => {
                assert_eq!(draft.destination.as_deref(), Some("Cebu"));
                assert_eq!(draft.itinerary.len(), 1);
                assert_eq!(draft.estimated_cost, Some(4000));
            }
            other => panic!("expected structured outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_fenced_json() {
        let text = "```json\n{\"destination\": \"Baguio\"}\n```";
        match decode_generation_text(text) {
            GenerationOutcome::Structured(draft) => {
                assert_eq!(draft.destination.as_deref(), Some("Baguio"))
            }
            other => panic!("expected structured outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_plain_text() {
        match decode_generation_text("see the park\nstroll downtown") {
            GenerationOutcome::PlainText(text) => {
                assert_eq!(text, "see the park\nstroll downtown")
            }
            other => panic!("expected plain text outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_blank_is_failure() {
        match decode_generation_text("   \n  ") {
            GenerationOutcome::Failed(GenerationError::TransportFailure(_)) => {}
            other => panic!("expected failure outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_entry_shapes_deserialize() {
        let text = r#"{"hotels": ["Plain Hotel", {"name": "Fancy Hotel", "link": "https://fancy.example"}]}"#;
        match decode_generation_text(text) {
            GenerationOutcome::Structured(draft) => {
                assert_eq!(draft.hotels.len(), 2);
                assert_eq!(draft.hotels[0].name(), "Plain Hotel");
                assert_eq!(draft.hotels[1].link(), Some("https://fancy.example"));
            }
            other => panic!("expected structured outcome, got {:?}", other),
        }
    }
}
